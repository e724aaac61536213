//! Analysis client — submits an extracted profile for career analysis.
//!
//! Every failure on this leg is mapped to `AnalysisUnavailable`: the
//! caller keeps the extracted profile and degrades to showing skills
//! only, never losing data a successful upload already produced.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::errors::ClientError;
use crate::models::{AnalysisResult, AnalysisSource};

/// Marker the backend sets when the deterministic baseline answered.
const FALLBACK_SOURCE: &str = "fallback_analyzer";

/// Wire shape of the `POST /analyze-resume` body.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRequest {
    pub resume_text: String,
    pub skills: Vec<String>,
    pub target_role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
}

/// Wire shape of the `POST /analyze-resume` response.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeResponse {
    pub status: String,
    /// Opaque payload; its schema belongs to the analyzer.
    pub analysis: Value,
    pub role: String,
    pub industry: String,
    #[serde(default)]
    pub analysis_source: Option<String>,
}

impl AnalyzeResponse {
    /// `Fallback` only when the response explicitly says so; anything
    /// else, including an absent field, counts as enhanced.
    pub fn into_result(self) -> AnalysisResult {
        let source = match self.analysis_source.as_deref() {
            Some(FALLBACK_SOURCE) => AnalysisSource::Fallback,
            _ => AnalysisSource::Enhanced,
        };
        AnalysisResult {
            role: self.role,
            industry: self.industry,
            analysis: self.analysis,
            source,
        }
    }
}

/// Career analysis backend.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResult, ClientError>;
}

/// HTTP implementation against the career API.
#[derive(Clone)]
pub struct AnalysisClient {
    http: reqwest::Client,
    base_url: String,
}

impl AnalysisClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl AnalysisService for AnalysisClient {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResult, ClientError> {
        let response = self
            .http
            .post(format!("{}/analyze-resume", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::AnalysisUnavailable {
                body: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::AnalysisUnavailable { body });
        }

        let parsed: AnalyzeResponse =
            response
                .json()
                .await
                .map_err(|e| ClientError::AnalysisUnavailable {
                    body: e.to_string(),
                })?;
        debug!(role = %parsed.role, source = ?parsed.analysis_source, "analysis received");
        Ok(parsed.into_result())
    }
}
