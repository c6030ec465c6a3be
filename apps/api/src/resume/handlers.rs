//! HTTP surface for the resume builder.

use anyhow::anyhow;
use axum::extract::{Multipart, Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::ResumeProfile;
use crate::pdf;
use crate::resume::builder::{generate_resume, parse_resume_profile};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateResumeRequest {
    pub profile: ResumeProfile,
    #[serde(default)]
    pub target_jd: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResumeResponse {
    pub markdown: String,
    pub filename: String,
}

#[derive(Debug, Deserialize)]
pub struct RenderResumeRequest {
    pub markdown: String,
    #[serde(default)]
    pub theme_color: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Builds `<name>_Resume.<ext>`, scrubbing characters that would break a
/// Content-Disposition header.
fn download_filename(name: &str, extension: &str) -> String {
    let base = name.trim().replace(['"', '\r', '\n'], "");
    format!("{base}_Resume.{extension}")
}

/// POST /api/v1/sessions/:id/resume/import
///
/// Extracts text from an uploaded PDF and asks the model to structure it.
/// On success the session profile is replaced; on extraction failure the
/// session keeps its prior profile and the client gets a 422.
pub async fn handle_import(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<ResumeProfile>, AppError> {
    let mut resume_bytes = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("resume") {
            resume_bytes = Some(field.bytes().await?);
        }
    }
    let resume_bytes = resume_bytes
        .ok_or_else(|| AppError::Validation("a 'resume' PDF upload is required".to_string()))?;

    let session = state.sessions.get(id).await?;
    let resume_text = pdf::extract_text(&resume_bytes)?;

    match parse_resume_profile(&state.gateway, &resume_text, &session.model_name).await {
        Some(profile) => {
            state
                .sessions
                .update(id, |session| session.profile = profile.clone())
                .await?;
            info!("Session {id}: profile imported from PDF");
            Ok(Json(profile))
        }
        None => Err(AppError::UnprocessableEntity(
            "could not extract structured profile data from the resume".to_string(),
        )),
    }
}

/// POST /api/v1/sessions/:id/resume/generate
///
/// Requires a non-blank name and experience; everything else may be empty.
/// The submitted profile becomes the session profile.
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<GenerateResumeRequest>,
) -> Result<Json<GenerateResumeResponse>, AppError> {
    if request.profile.name.trim().is_empty() || request.profile.experience.trim().is_empty() {
        return Err(AppError::Validation(
            "profile 'name' and 'experience' are required to generate a resume".to_string(),
        ));
    }

    let model_selector = state
        .sessions
        .update(id, |session| {
            session.profile = request.profile.clone();
            session.model_name.clone()
        })
        .await?;

    let markdown = generate_resume(
        &state.gateway,
        &request.profile,
        request.target_jd.as_deref(),
        &model_selector,
    )
    .await?;

    info!("Session {id}: resume generated ({} chars)", markdown.len());
    Ok(Json(GenerateResumeResponse {
        filename: download_filename(&request.profile.name, "md"),
        markdown,
    }))
}

/// POST /api/v1/sessions/:id/resume/render
///
/// Renders markdown to a PDF download. Stateless apart from requiring a live
/// session; the markdown may come edited from the client.
pub async fn handle_render(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RenderResumeRequest>,
) -> Result<Response, AppError> {
    state.sessions.get(id).await?;

    let theme = request
        .theme_color
        .unwrap_or_else(|| pdf::DEFAULT_THEME_COLOR.to_string());
    let markdown = request.markdown;
    // Rendering is CPU-bound; keep it off the async workers.
    let bytes = tokio::task::spawn_blocking(move || pdf::render_pdf(&markdown, &theme))
        .await
        .map_err(|e| AppError::Internal(anyhow!("render task failed: {e}")))??;

    let filename = download_filename(request.name.as_deref().unwrap_or(""), "pdf");
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
