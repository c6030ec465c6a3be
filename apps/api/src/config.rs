use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
///
/// The primary-provider key is required and startup fails without it. The
/// secondary-provider key is optional: when absent, requests that select a
/// `groq/` model get a sentinel error string instead of a completion.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    pub groq_api_key: Option<String>,
    pub catalog_path: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            google_api_key: require_env("GOOGLE_API_KEY")?,
            groq_api_key: optional_env("GROQ_API_KEY"),
            catalog_path: std::env::var("CATALOG_PATH")
                .unwrap_or_else(|_| "data/skillsbuild_courses.csv".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    let value =
        std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))?;
    if value.trim().is_empty() {
        bail!("Required environment variable '{key}' is set but empty");
    }
    Ok(value)
}

/// Like `require_env`, but absent or blank values become `None`.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
