//! HTTP surface for the skill-gap analyzer.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use bytes::Bytes;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::analysis::skill_gap::{analyze_skill_gap, extract_missing_skills};
use crate::catalog::{recommend, SkillRecommendation};
use crate::errors::AppError;
use crate::pdf;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    /// Raw model output; error strings from the gateway land here too.
    pub analysis: String,
    pub missing_skills: Vec<String>,
    pub recommendations: Vec<SkillRecommendation>,
    /// False when no catalog is available anywhere, so the client can tell
    /// "no gaps matched" from "nothing to match against".
    pub catalog_loaded: bool,
}

/// POST /api/v1/sessions/:id/analysis
///
/// Multipart body: `resume` (PDF) and `job_description` (text). Runs the whole
/// pipeline in one shot: extract the resume text, compare it against the job
/// description, pull out the missing skills, then recommend courses for them.
pub async fn handle_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let mut resume_bytes: Option<Bytes> = None;
    let mut job_description: Option<String> = None;
    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("resume") => resume_bytes = Some(field.bytes().await?),
            Some("job_description") => job_description = Some(field.text().await?),
            _ => {}
        }
    }
    let resume_bytes = resume_bytes
        .ok_or_else(|| AppError::Validation("a 'resume' PDF upload is required".to_string()))?;
    let job_description = job_description
        .filter(|jd| !jd.trim().is_empty())
        .ok_or_else(|| {
            AppError::Validation("a non-empty 'job_description' field is required".to_string())
        })?;

    let session = state.sessions.get(id).await?;
    let resume_text = pdf::extract_text(&resume_bytes)?;

    let analysis =
        analyze_skill_gap(&state.gateway, &resume_text, &job_description, &session.model_name)
            .await;
    let missing_skills = extract_missing_skills(&analysis);

    // Session uploads shadow the application-level catalog.
    let catalog = session.catalog.clone().or_else(|| state.catalog.clone());
    let recommendations = match &catalog {
        Some(catalog) => recommend(&missing_skills, catalog),
        None => Vec::new(),
    };

    info!(
        "Session {id}: analysis complete ({} missing skills, {} recommendations)",
        missing_skills.len(),
        recommendations.len()
    );

    Ok(Json(AnalysisResponse {
        analysis,
        missing_skills,
        recommendations,
        catalog_loaded: catalog.is_some(),
    }))
}
