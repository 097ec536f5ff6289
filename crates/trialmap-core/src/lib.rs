//! Trialmap Core - Common infrastructure for the trial map pipeline
//!
//! This crate holds the flat trial record shared by the registry client and
//! the geographic aggregation, plus the HTTP, logging and progress plumbing
//! used by every other crate in the workspace.

pub mod error;
pub mod http;
pub mod logging;
pub mod progress;
pub mod trial;

// Re-exports for convenience
pub use error::FetchError;
pub use http::{HttpConfig, SHARED_RUNTIME, http_client, http_config, set_http_config};
pub use logging::{IndicatifLogger, init_logging};
pub use progress::{ProgressContext, SharedProgress, fmt_num};
pub use trial::{FlatTrial, NO_PHASE, OverallStatus};
