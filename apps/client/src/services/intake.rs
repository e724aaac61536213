//! Intake client — uploads a staged resume and maps the extraction
//! response into an `ExtractedProfile`.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::debug;

use crate::errors::ClientError;
use crate::models::{ExtractedProfile, ResumeFile};

/// Multipart field name the intake endpoint expects.
const FILE_FIELD: &str = "file";

/// Wire shape of `POST /upload-resume`.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResumeResponse {
    pub status: String,
    pub filename: String,
    pub text_length: u64,
    /// Full text, present for PDFs and text files.
    #[serde(default)]
    pub full_text: Option<String>,
    pub anonymized_preview: String,
    #[serde(default)]
    pub extracted_skills: Vec<String>,
    #[serde(default)]
    pub skill_count: usize,
}

impl UploadResumeResponse {
    /// Maps the wire response into the session's profile model.
    ///
    /// Analysis input prefers `full_text` and falls back to the
    /// anonymized preview. The skill count is recomputed from the list
    /// so the two can never disagree.
    pub fn into_profile(self) -> ExtractedProfile {
        let text = self
            .full_text
            .unwrap_or_else(|| self.anonymized_preview.clone());
        let skill_count = self.extracted_skills.len();
        ExtractedProfile {
            filename: self.filename,
            text,
            preview: self.anonymized_preview,
            skills: self.extracted_skills,
            skill_count,
        }
    }
}

/// File intake/extraction backend.
#[async_trait]
pub trait IntakeService: Send + Sync {
    async fn submit(&self, file: &ResumeFile) -> Result<ExtractedProfile, ClientError>;
}

/// HTTP implementation against the career API.
#[derive(Clone)]
pub struct IntakeClient {
    http: reqwest::Client,
    base_url: String,
}

impl IntakeClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl IntakeService for IntakeClient {
    async fn submit(&self, file: &ResumeFile) -> Result<ExtractedProfile, ClientError> {
        let part = Part::bytes(file.data.to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.mime)?;
        let form = Form::new().part(FILE_FIELD, part);

        let response = self
            .http
            .post(format!("{}/upload-resume", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Transport {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: UploadResumeResponse = response.json().await?;
        debug!(
            filename = %parsed.filename,
            text_length = parsed.text_length,
            skills = parsed.extracted_skills.len(),
            "resume extracted"
        );
        Ok(parsed.into_profile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RESPONSE: &str = r#"{
        "status": "success",
        "filename": "cv.pdf",
        "text_length": 1200,
        "full_text": "Jane Doe, data analyst. SQL and Python.",
        "anonymized_preview": "[PERSON_REDACTED], data analyst. SQL and Python.",
        "extracted_skills": ["SQL", "Python"],
        "skill_count": 2
    }"#;

    #[test]
    fn test_profile_prefers_full_text() {
        let response: UploadResumeResponse = serde_json::from_str(FULL_RESPONSE).unwrap();
        let profile = response.into_profile();
        assert_eq!(profile.text, "Jane Doe, data analyst. SQL and Python.");
        assert_eq!(
            profile.preview,
            "[PERSON_REDACTED], data analyst. SQL and Python."
        );
    }

    #[test]
    fn test_profile_falls_back_to_preview_text() {
        let json = r#"{
            "status": "success",
            "filename": "scan.png",
            "text_length": 20,
            "anonymized_preview": "preview only",
            "extracted_skills": [],
            "skill_count": 0
        }"#;
        let response: UploadResumeResponse = serde_json::from_str(json).unwrap();
        let profile = response.into_profile();
        assert_eq!(profile.text, "preview only");
    }

    #[test]
    fn test_skills_preserved_in_order_with_count() {
        let response: UploadResumeResponse = serde_json::from_str(FULL_RESPONSE).unwrap();
        let profile = response.into_profile();
        assert_eq!(profile.skills, vec!["SQL", "Python"]);
        assert_eq!(profile.skill_count, 2);
    }

    #[test]
    fn test_missing_skills_list_maps_to_empty() {
        let json = r#"{
            "status": "success",
            "filename": "cv.pdf",
            "text_length": 10,
            "anonymized_preview": "text"
        }"#;
        let response: UploadResumeResponse = serde_json::from_str(json).unwrap();
        let profile = response.into_profile();
        assert!(profile.skills.is_empty());
        assert_eq!(profile.skill_count, 0);
    }

    #[test]
    fn test_skill_count_recomputed_over_wire_value() {
        // A server bug reporting the wrong count must not leak through.
        let json = r#"{
            "status": "success",
            "filename": "cv.pdf",
            "text_length": 10,
            "anonymized_preview": "text",
            "extracted_skills": ["sql"],
            "skill_count": 7
        }"#;
        let response: UploadResumeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.into_profile().skill_count, 1);
    }
}
