//! Role catalog client plus the selection-reconciliation rule applied
//! after every (re)load.

use async_trait::async_trait;
use serde::Deserialize;

use crate::errors::ClientError;

/// Wire shape of `GET /roles`.
#[derive(Debug, Clone, Deserialize)]
pub struct RolesResponse {
    pub status: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Role catalog backend.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn load(&self) -> Result<Vec<String>, ClientError>;
}

/// HTTP implementation against the career API.
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl CatalogService for CatalogClient {
    async fn load(&self) -> Result<Vec<String>, ClientError> {
        let response = self
            .http
            .get(format!("{}/roles", self.base_url))
            .send()
            .await
            .map_err(|e| ClientError::CatalogLoad(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::CatalogLoad(format!(
                "status {status}: {body}",
                status = status.as_u16()
            )));
        }

        let parsed: RolesResponse = response
            .json()
            .await
            .map_err(|e| ClientError::CatalogLoad(e.to_string()))?;
        Ok(parsed.roles)
    }
}

/// Picks the selected role after a catalog load: keep the current one if
/// the new list still carries it, otherwise fall back to the first
/// entry. An empty list leaves the selection alone.
pub fn reconcile_selection(selected: &str, roles: &[String]) -> String {
    if roles.is_empty() || roles.iter().any(|r| r == selected) {
        selected.to_string()
    } else {
        roles[0].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_roles_response_parses_backend_shape() {
        let json = r#"{"status": "success", "roles": ["Data Analyst", "Data Scientist"]}"#;
        let parsed: RolesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.roles.len(), 2);
    }

    #[test]
    fn test_missing_roles_field_defaults_to_empty() {
        let parsed: RolesResponse = serde_json::from_str(r#"{"status": "success"}"#).unwrap();
        assert!(parsed.roles.is_empty());
    }

    #[test]
    fn test_selection_preserved_when_still_listed() {
        let list = roles(&["Data Analyst", "Data Scientist"]);
        assert_eq!(reconcile_selection("Data Scientist", &list), "Data Scientist");
    }

    #[test]
    fn test_selection_falls_back_to_first_when_absent() {
        let list = roles(&["Software Engineer", "Business Analyst"]);
        assert_eq!(reconcile_selection("Data Analyst", &list), "Software Engineer");
    }

    #[test]
    fn test_empty_catalog_leaves_selection_alone() {
        assert_eq!(reconcile_selection("Data Analyst", &[]), "Data Analyst");
    }
}
