//! LLM gateway, the single point of entry for all hosted-model calls.
//!
//! ARCHITECTURAL RULE: no other module may call a provider API directly.
//! All model interactions MUST go through this module.
//!
//! Two providers sit behind it: Google Gemini (primary, multimodal) and Groq
//! (secondary, text-only). A model selector string picks between them; the
//! primary side gets a one-shot fallback to a fixed stable model when the
//! requested model id is unknown.

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::warn;

pub mod gemini;
pub mod groq;

pub use gemini::FALLBACK_MODEL;

/// Model selector assigned to every new session.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// Selector prefix that routes a call to the secondary provider.
pub const GROQ_PREFIX: &str = "groq/";
/// Sentinel returned when a `groq/` selector is used without a credential.
pub const MISSING_GROQ_KEY: &str = "Error: GROQ_API_KEY not found.";

const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("model '{model}' was not found by the provider")]
    ModelNotFound { model: String },

    #[error("provider returned empty content")]
    EmptyContent,

    #[error("no credential configured for the secondary provider")]
    MissingCredential,
}

/// Which provider a model selector resolves to.
///
/// `groq/<model>` goes to the secondary provider (prefix stripped); everything
/// else goes to the primary, with a leading `models/` prefix stripped for
/// callers that pass fully-qualified Gemini ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSelector {
    Gemini(String),
    Groq(String),
}

impl ModelSelector {
    pub fn parse(selector: &str) -> Self {
        if let Some(rest) = selector.strip_prefix(GROQ_PREFIX) {
            ModelSelector::Groq(rest.to_string())
        } else {
            ModelSelector::Gemini(selector.trim_start_matches("models/").to_string())
        }
    }
}

/// An image forwarded to the primary provider as inline multimodal data.
/// The secondary provider is text-only and ignores it.
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// A single-model completion backend. One implementation per provider; the
/// gateway owns selector routing and fallback on top of this seam.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(
        &self,
        model: &str,
        prompt: &str,
        image: Option<&ImageAttachment>,
    ) -> Result<String, LlmError>;
}

/// Retries exactly once, with the fixed fallback model, and only when the
/// provider reported the requested model as unknown. Any other failure (and
/// any failure of the fallback call itself) propagates untouched.
async fn complete_with_fallback(
    provider: &dyn CompletionProvider,
    model: &str,
    prompt: &str,
    image: Option<&ImageAttachment>,
) -> Result<String, LlmError> {
    match provider.complete(model, prompt, image).await {
        Err(LlmError::ModelNotFound { model: missing }) => {
            warn!("Model '{missing}' not found, retrying once with '{FALLBACK_MODEL}'");
            provider.complete(FALLBACK_MODEL, prompt, image).await
        }
        other => other,
    }
}

/// The single gateway used by every feature that talks to a model.
#[derive(Clone)]
pub struct LlmGateway {
    gemini: gemini::GeminiProvider,
    groq: Option<groq::GroqProvider>,
}

impl LlmGateway {
    pub fn new(google_api_key: String, groq_api_key: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            gemini: gemini::GeminiProvider::new(client.clone(), google_api_key),
            groq: groq_api_key.map(|key| groq::GroqProvider::new(client, key)),
        }
    }

    /// Typed variant of [`complete`](Self::complete) for callers that want to
    /// branch on the failure category.
    pub async fn try_complete(
        &self,
        prompt: &str,
        selector: &str,
        image: Option<&ImageAttachment>,
    ) -> Result<String, LlmError> {
        match ModelSelector::parse(selector) {
            ModelSelector::Groq(model) => {
                let provider = self.groq.as_ref().ok_or(LlmError::MissingCredential)?;
                provider.complete(&model, prompt, image).await
            }
            ModelSelector::Gemini(model) => {
                complete_with_fallback(&self.gemini, &model, prompt, image).await
            }
        }
    }

    /// Infallible completion: failures come back as error strings on the text
    /// channel, so callers can surface them in place of model output.
    pub async fn complete(
        &self,
        prompt: &str,
        selector: &str,
        image: Option<&ImageAttachment>,
    ) -> String {
        match self.try_complete(prompt, selector, image).await {
            Ok(text) => text,
            Err(LlmError::MissingCredential) => MISSING_GROQ_KEY.to_string(),
            Err(e) => format!("Error generating content: {e}"),
        }
    }
}

#[cfg(test)]
impl LlmGateway {
    /// Points the primary provider at a local stand-in server.
    pub(crate) fn with_gemini_base_url(google_api_key: String, base_url: String) -> Self {
        let client = Client::new();
        Self {
            gemini: gemini::GeminiProvider::with_base_url(client, google_api_key, base_url),
            groq: None,
        }
    }

    /// Points the secondary provider at a local stand-in server.
    pub(crate) fn with_groq_url(groq_api_key: String, url: String) -> Self {
        let client = Client::new();
        Self {
            gemini: gemini::GeminiProvider::new(client.clone(), "unused".to_string()),
            groq: Some(groq::GroqProvider::with_url(client, groq_api_key, url)),
        }
    }
}
