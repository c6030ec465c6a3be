//! HTTP surface for per-session catalog uploads.

use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::catalog::CourseCatalog;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CatalogUploadResponse {
    pub courses_loaded: usize,
}

/// PUT /api/v1/sessions/:id/catalog
///
/// Replaces the session's catalog with an uploaded CSV (exact
/// `Skill,Course Name,URL` headers). The session copy shadows the
/// application-level catalog for subsequent analyses.
pub async fn handle_upload_catalog(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<CatalogUploadResponse>, AppError> {
    let mut csv_bytes = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("catalog") {
            csv_bytes = Some(field.bytes().await?);
        }
    }
    let csv_bytes = csv_bytes
        .ok_or_else(|| AppError::Validation("a 'catalog' CSV upload is required".to_string()))?;

    let catalog = CourseCatalog::from_csv(&csv_bytes)
        .map_err(|e| AppError::Validation(format!("invalid course CSV: {e}")))?;
    let courses_loaded = catalog.len();

    state
        .sessions
        .update(id, |session| session.catalog = Some(Arc::new(catalog)))
        .await?;

    info!("Session {id}: catalog replaced ({courses_loaded} courses)");
    Ok(Json(CatalogUploadResponse { courses_loaded }))
}
