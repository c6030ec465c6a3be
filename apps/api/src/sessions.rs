//! Session lifecycle endpoints.
//!
//! The host UI owns when a visit begins and ends: it creates a session on
//! load, carries the id through every call, and deletes the session when the
//! user leaves.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::chat::ChatMessage;
use crate::models::profile::ResumeProfile;
use crate::state::{AppState, SessionContext};

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub model_name: String,
    pub profile: ResumeProfile,
    pub transcript: Vec<ChatMessage>,
    /// Whether an analysis on this session would have a catalog to match
    /// against (session upload or application-level).
    pub catalog_loaded: bool,
    pub created_at: DateTime<Utc>,
}

impl SessionResponse {
    fn from_context(session: SessionContext, app_catalog_loaded: bool) -> Self {
        Self {
            session_id: session.id,
            model_name: session.model_name,
            profile: session.profile,
            transcript: session.transcript,
            catalog_loaded: session.catalog.is_some() || app_catalog_loaded,
            created_at: session.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SetModelRequest {
    pub model_name: String,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionResponse>) {
    let session = state.sessions.create().await;
    info!("Session {} created", session.id);
    (
        StatusCode::CREATED,
        Json(SessionResponse::from_context(
            session,
            state.catalog.is_some(),
        )),
    )
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.sessions.get(id).await?;
    Ok(Json(SessionResponse::from_context(
        session,
        state.catalog.is_some(),
    )))
}

/// PATCH /api/v1/sessions/:id/model
///
/// Swaps the model selector for every subsequent call in this session.
/// Selectors are not validated against a provider list here; an unknown
/// primary model is handled by the gateway's fallback at call time.
pub async fn handle_set_model(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SetModelRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let selector = request.model_name.trim().to_string();
    if selector.is_empty() {
        return Err(AppError::Validation(
            "'model_name' must not be empty".to_string(),
        ));
    }

    let session = state
        .sessions
        .update(id, |session| {
            session.model_name = selector.clone();
            session.clone()
        })
        .await?;
    info!("Session {id}: model set to '{selector}'");
    Ok(Json(SessionResponse::from_context(
        session,
        state.catalog.is_some(),
    )))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    info!("Session {id} deleted");
    Ok(StatusCode::NO_CONTENT)
}
