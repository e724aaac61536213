use anyhow::{Context, Result};

/// Client configuration loaded from environment variables.
/// Every key has a default, so a bare environment works against a
/// locally running backend.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the career API, e.g. `http://localhost:8000/career`.
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub rust_log: String,
}

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/career";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_base_url: std::env::var("CAREER_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
                .parse::<u64>()
                .context("REQUEST_TIMEOUT_SECS must be a number of seconds")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
