//! Registry endpoint and query configuration

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://clinicaltrials.gov/api/v2/studies";

/// Where and how to query the registry
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub base_url: String,
    /// Location query for the full listing
    pub location_query: String,
    /// Page size for the full listing
    pub page_size: u32,
    /// Page size for the single-study term search
    pub search_page_size: u32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            location_query: "Tunisia".to_string(),
            page_size: 1000,
            search_page_size: 50,
        }
    }
}
