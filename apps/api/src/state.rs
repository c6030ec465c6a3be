use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::catalog::CourseCatalog;
use crate::errors::AppError;
use crate::llm::{LlmGateway, DEFAULT_MODEL};
use crate::models::chat::ChatMessage;
use crate::models::profile::ResumeProfile;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub gateway: LlmGateway,
    /// Catalog resolved at startup: loaded file, embedded defaults, or `None`
    /// when the configured file exists but failed to load.
    pub catalog: Option<Arc<CourseCatalog>>,
    pub sessions: SessionStore,
}

/// Everything one UI visit accumulates. Created when the client starts a
/// session, discarded when it ends; nothing survives a process restart.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub id: Uuid,
    pub model_name: String,
    pub profile: ResumeProfile,
    /// Per-session catalog upload; shadows the application-level catalog.
    pub catalog: Option<Arc<CourseCatalog>>,
    pub transcript: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
}

impl SessionContext {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            model_name: DEFAULT_MODEL.to_string(),
            profile: ResumeProfile::default(),
            catalog: None,
            transcript: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

/// In-memory session registry. The lock guards only the map; a session serves
/// a single UI client, so turns within one session are not serialized here.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, SessionContext>>>,
}

impl SessionStore {
    pub async fn create(&self) -> SessionContext {
        let session = SessionContext::new();
        self.inner
            .write()
            .await
            .insert(session.id, session.clone());
        session
    }

    pub async fn get(&self, id: Uuid) -> Result<SessionContext, AppError> {
        self.inner
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    /// Runs `f` against the live session under the write lock and returns its
    /// result.
    pub async fn update<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut SessionContext) -> T,
    ) -> Result<T, AppError> {
        let mut sessions = self.inner.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        Ok(f(session))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.inner
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}
