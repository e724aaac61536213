//! Career API clients — the single point of entry for all backend calls.
//!
//! ARCHITECTURAL RULE: no other module may touch the network. Each
//! endpoint gets a small client behind a trait so the session can be
//! exercised against in-process fakes.

pub mod analysis;
pub mod catalog;
pub mod intake;

use serde::Deserialize;

use crate::errors::ClientError;

/// Builds the one `reqwest::Client` shared by every service client.
pub fn build_http_client(timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .expect("Failed to build HTTP client")
}

/// Backend self-report from `GET /health`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(default)]
    pub analyzer_available: bool,
    #[serde(default)]
    pub data_loaded: bool,
}

/// Startup probe: tells the adapter whether the enhanced analyzer is up
/// before the user commits to an upload.
pub async fn probe_health(
    http: &reqwest::Client,
    base_url: &str,
) -> Result<ServiceHealth, ClientError> {
    let response = http.get(format!("{base_url}/health")).send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Transport {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json::<ServiceHealth>().await?)
}
