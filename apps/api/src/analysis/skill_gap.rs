//! Skill-gap comparison and extraction of the "Missing Skills" section from
//! free-form model output.
//!
//! The extractor is best-effort natural-language scanning, not a parser with
//! guarantees: it needs a heading containing "missing" and "skill", treats
//! "verdict" as the terminator, and silently returns nothing when the model
//! words its output differently.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::prompts::SKILL_GAP_PROMPT_TEMPLATE;
use crate::llm::LlmGateway;

/// Longest phrase accepted as a skill line; anything at or past this is prose.
const MAX_SKILL_CHARS: usize = 80;

/// Runs the comparison prompt through the gateway. Model failures come back
/// as error strings in the analysis text, per the gateway contract.
pub async fn analyze_skill_gap(
    gateway: &LlmGateway,
    resume_text: &str,
    job_description: &str,
    model_selector: &str,
) -> String {
    let prompt = SKILL_GAP_PROMPT_TEMPLATE
        .replace("{job_description}", job_description)
        .replace("{resume_text}", resume_text);
    gateway.complete(&prompt, model_selector, None).await
}

/// Pulls individual skills out of the missing-skills section.
///
/// Capture starts after a line containing both "missing" and "skill"
/// (case-insensitive) and stops at the first captured line containing
/// "verdict". Each captured line loses leading list markers, `**` emphasis
/// and any `:`-suffixed explanation; blanks and over-long lines are dropped
/// and the first occurrence wins on duplicates.
pub fn extract_missing_skills(analysis_text: &str) -> Vec<String> {
    static LIST_MARKER: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^[-*•\d.]+\s*").expect("valid list-marker pattern"));

    let mut missing: Vec<String> = Vec::new();
    let mut capturing = false;

    for line in analysis_text.lines() {
        let trimmed = line.trim();
        let lower = trimmed.to_lowercase();

        if lower.contains("missing") && lower.contains("skill") {
            capturing = true;
            continue;
        }
        if capturing && lower.contains("verdict") {
            break;
        }
        if !capturing {
            continue;
        }

        let cleaned = LIST_MARKER.replace(trimmed, "").replace("**", "");
        let skill = cleaned.split(':').next().unwrap_or("").trim();
        if skill.is_empty() || skill.chars().count() >= MAX_SKILL_CHARS {
            continue;
        }
        if !missing.iter().any(|s| s == skill) {
            missing.push(skill.to_string());
        }
    }

    missing
}
