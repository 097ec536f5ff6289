//! Trialmap Registry - ClinicalTrials.gov client
//!
//! Fetches study records from the registry's v2 `/studies` endpoint and
//! flattens them into [`trialmap_core::FlatTrial`] records.

pub mod api;
pub mod config;
pub mod fetch;
pub mod flatten;
pub mod schema;

// Re-exports
pub use api::{PageQuery, RegistryClient, StudySource, parse_page};
pub use config::RegistryConfig;
pub use fetch::{FetchStats, StudyFetcher, fetch_all_tunisia_studies, fetch_study_by_nct_id};
pub use flatten::{flatten_study, flatten_value};
pub use schema::{RawStudy, StudyPage};
