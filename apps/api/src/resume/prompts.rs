//! Prompt templates for the resume builder.

/// Profile-extraction prompt. Replace `{resume_text}` before sending.
///
/// The nine keys mirror the fields of `models::profile::ResumeProfile`; the
/// plain-string requirement keeps the reply parseable into that struct.
pub const PROFILE_EXTRACT_PROMPT_TEMPLATE: &str = r#"Extract these keys from the resume text: name, email, phone, links, summary, experience, education, skills, certifications.
Every value must be a plain string. Return ONLY valid JSON, no commentary.

RESUME TEXT:
{resume_text}"#;

/// Resume-generation prompt. Replace `{profile_json}` and `{target_jd}`.
pub const RESUME_GENERATE_PROMPT_TEMPLATE: &str = r#"Create a polished resume in Markdown.

CANDIDATE DETAILS (JSON):
{profile_json}

TARGET JOB DESCRIPTION (optional; tailor the resume to it when present):
{target_jd}"#;
