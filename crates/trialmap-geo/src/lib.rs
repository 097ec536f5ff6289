//! Trialmap Geo - governorate matching and aggregation
//!
//! Attributes flattened trials to Tunisia's 24 governorates from their
//! free-text location fields and builds the per-governorate views the map
//! consumes.

pub mod aggregate;
pub mod alias;
pub mod governorate;
pub mod matcher;
pub mod normalize;
pub mod region;

// Re-exports
pub use aggregate::{
    Aggregate, PhaseSummary, StateTrials, TrialsPerState, TrialsPerStatePhase, aggregate,
    status_counts, status_counts_by_size, trials_per_state, trials_per_state_phase,
};
pub use alias::AliasTable;
pub use governorate::{Governorate, GovernorateSet, UnknownGovernorate, governorate_names};
pub use matcher::GovernorateMatcher;
pub use normalize::{normalize_location, normalize_region_label};
pub use region::{group_regions, region_to_governorate};
