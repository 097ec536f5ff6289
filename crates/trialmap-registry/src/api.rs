//! ClinicalTrials.gov API client

use async_trait::async_trait;
use serde::Deserialize;
use trialmap_core::{FetchError, http_client};

use crate::config::RegistryConfig;
use crate::schema::StudyPage;

/// Query parameters for one `/studies` page request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageQuery {
    /// Free-text location query (`query.locn`)
    pub location: Option<String>,
    /// Free-text term query (`query.term`)
    pub term: Option<String>,
    pub page_size: u32,
    /// Continuation token from the previous page
    pub page_token: Option<String>,
}

impl PageQuery {
    pub fn by_location(location: &str, page_size: u32) -> Self {
        Self {
            location: Some(location.to_string()),
            page_size,
            ..Self::default()
        }
    }

    pub fn by_term(term: &str, page_size: u32) -> Self {
        Self {
            term: Some(term.to_string()),
            page_size,
            ..Self::default()
        }
    }

    /// Same query, continued from `token` (replaces any earlier token)
    pub fn with_token(&self, token: Option<String>) -> Self {
        Self {
            page_token: token,
            ..self.clone()
        }
    }

    /// Message prefix for a failed request with this query
    pub fn failure_context(&self) -> String {
        match &self.term {
            Some(term) => format!("Failed to fetch study {term}"),
            None => "Failed to fetch studies".to_string(),
        }
    }

    /// Query-string pairs in registry naming
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(4);
        if let Some(location) = &self.location {
            params.push(("query.locn", location.clone()));
        }
        if let Some(term) = &self.term {
            params.push(("query.term", term.clone()));
        }
        params.push(("pageSize", self.page_size.to_string()));
        if let Some(token) = &self.page_token {
            params.push(("pageToken", token.clone()));
        }
        params
    }
}

/// Anything that can answer a page query with a page of raw studies.
///
/// The HTTP client is the production implementation; tests plug in
/// in-memory sources.
#[async_trait]
pub trait StudySource: Send + Sync {
    async fn fetch_page(&self, query: &PageQuery) -> Result<StudyPage, FetchError>;
}

/// Parse a `/studies` response body; the top level must be a JSON object
pub fn parse_page(body: &str) -> Result<StudyPage, FetchError> {
    let decode = |message: String| FetchError::Decode { message };
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| decode(e.to_string()))?;
    if !value.is_object() {
        return Err(decode("top-level value is not an object".to_string()));
    }
    StudyPage::deserialize(&value).map_err(|e| decode(e.to_string()))
}

/// HTTP-backed study source using the shared client
#[derive(Debug, Clone)]
pub struct RegistryClient {
    base_url: String,
}

impl RegistryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::new(config.base_url.clone())
    }
}

#[async_trait]
impl StudySource for RegistryClient {
    async fn fetch_page(&self, query: &PageQuery) -> Result<StudyPage, FetchError> {
        log::debug!(
            "GET {} (token: {})",
            self.base_url,
            query.page_token.as_deref().unwrap_or("-")
        );
        let resp = http_client()
            .get(&self.base_url)
            .query(&query.params())
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                context: query.failure_context(),
            });
        }

        let body = resp.text().await.map_err(FetchError::from_reqwest)?;
        parse_page(&body)
    }
}
