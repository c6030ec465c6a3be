use serde::{Deserialize, Serialize};

/// Structured resume data for one user.
///
/// All nine fields are free-form strings; the resume generator serializes the
/// whole struct into the prompt and the profile importer parses model output
/// back into it. Every field defaults to empty so a partial JSON object from
/// the model still imports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub links: String,
    pub summary: String,
    pub experience: String,
    pub education: String,
    pub skills: String,
    pub certifications: String,
}
