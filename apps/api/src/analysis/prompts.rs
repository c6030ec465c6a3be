//! Prompt template for the skill-gap comparison.

/// Replace `{job_description}` and `{resume_text}` before sending.
///
/// The three numbered sections are load-bearing: the missing-skills extractor
/// scans for a "missing … skills" heading and stops at "verdict".
pub const SKILL_GAP_PROMPT_TEMPLATE: &str = r#"Compare the RESUME against the JOB DESCRIPTION.

JOB DESCRIPTION:
{job_description}

RESUME:
{resume_text}

Output exactly three sections:
1. Matching Skills
2. Missing Skills
3. Verdict"#;
