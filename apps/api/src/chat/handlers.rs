//! HTTP surface for the career-coach chat.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use bytes::Bytes;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::chat::session::{build_chat_prompt, ATTACHED_PDF_MARKER};
use crate::errors::AppError;
use crate::llm::ImageAttachment;
use crate::models::chat::ChatMessage;
use crate::pdf;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ChatTurnResponse {
    /// Model output, or a gateway error string when the call failed.
    pub reply: String,
}

/// POST /api/v1/sessions/:id/chat
///
/// Multipart body: `message` (text, required) and optionally one `attachment`
/// (PDF, PNG or JPEG). PDF text joins the final prompt line under a marker;
/// images travel to the primary provider as multimodal input. A failed
/// attachment extraction aborts the turn before the transcript changes.
pub async fn handle_chat_turn(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<ChatTurnResponse>, AppError> {
    let mut message: Option<String> = None;
    let mut attachment: Option<(String, Bytes)> = None;
    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("message") => message = Some(field.text().await?),
            Some("attachment") => {
                let content_type = field.content_type().map(str::to_owned).unwrap_or_default();
                attachment = Some((content_type, field.bytes().await?));
            }
            _ => {}
        }
    }
    let message = message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| AppError::Validation("a non-empty 'message' field is required".to_string()))?;

    let mut image: Option<ImageAttachment> = None;
    let mut final_content = message.clone();
    if let Some((content_type, data)) = attachment {
        match content_type.as_str() {
            "image/png" | "image/jpeg" | "image/jpg" => {
                image = Some(ImageAttachment {
                    // Non-standard "image/jpg" still means JPEG upstream.
                    mime_type: if content_type == "image/jpg" {
                        "image/jpeg".to_string()
                    } else {
                        content_type
                    },
                    data: data.to_vec(),
                });
            }
            "application/pdf" => {
                let attachment_text = pdf::extract_text(&data)?;
                final_content = format!("{message}\n\n{ATTACHED_PDF_MARKER}\n{attachment_text}");
            }
            other => {
                return Err(AppError::Validation(format!(
                    "unsupported attachment type '{other}'; expected PDF, PNG or JPEG"
                )))
            }
        }
    }

    let (model_selector, prompt) = state
        .sessions
        .update(id, |session| {
            session.transcript.push(ChatMessage::user(message.clone()));
            (
                session.model_name.clone(),
                build_chat_prompt(&session.transcript, &final_content),
            )
        })
        .await?;

    debug!("Session {id}: chat prompt built ({} chars)", prompt.len());

    let reply = state.gateway.complete(&prompt, &model_selector, image.as_ref()).await;

    state
        .sessions
        .update(id, |session| {
            session.transcript.push(ChatMessage::assistant(reply.clone()));
        })
        .await?;

    Ok(Json(ChatTurnResponse { reply }))
}
