//! Single-call LLM pipelines behind the resume builder.

use anyhow::anyhow;
use tracing::debug;

use crate::errors::AppError;
use crate::llm::LlmGateway;
use crate::models::profile::ResumeProfile;
use crate::resume::prompts::{PROFILE_EXTRACT_PROMPT_TEMPLATE, RESUME_GENERATE_PROMPT_TEMPLATE};

/// Generates a Markdown resume from the profile, optionally tailored to a
/// target job description. The output is whatever the model produced, with no
/// structural validation; gateway error strings pass through as the "resume".
pub async fn generate_resume(
    gateway: &LlmGateway,
    profile: &ResumeProfile,
    target_jd: Option<&str>,
    model_selector: &str,
) -> Result<String, AppError> {
    let profile_json = serde_json::to_string(profile)
        .map_err(|e| AppError::Internal(anyhow!("failed to serialize profile: {e}")))?;
    let prompt = RESUME_GENERATE_PROMPT_TEMPLATE
        .replace("{profile_json}", &profile_json)
        .replace("{target_jd}", target_jd.unwrap_or(""));
    Ok(gateway.complete(&prompt, model_selector, None).await)
}

/// Asks the model to structure raw resume text into a profile.
/// Any parse failure collapses to `None`; the caller keeps its prior state.
pub async fn parse_resume_profile(
    gateway: &LlmGateway,
    resume_text: &str,
    model_selector: &str,
) -> Option<ResumeProfile> {
    let prompt = PROFILE_EXTRACT_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
    let raw = gateway.complete(&prompt, model_selector, None).await;
    profile_from_reply(&raw)
}

/// Parses a model reply into a profile, tolerating markdown fences.
fn profile_from_reply(raw: &str) -> Option<ResumeProfile> {
    let json = strip_json_fences(raw);
    match serde_json::from_str::<ResumeProfile>(json) {
        Ok(profile) => Some(profile),
        Err(e) => {
            debug!("Profile reply did not parse as JSON: {e}");
            None
        }
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
