//! Flat trial record and overall-status taxonomy

use serde::{Deserialize, Serialize};

/// Phase label used when the registry lists no phase
pub const NO_PHASE: &str = "N/A";

/// One registry study flattened to scalar and list fields.
///
/// Every scalar is optional: absence in the source is kept as `None`.
/// `phases` is never empty (`["N/A"]` when the source has none), while
/// `cities`/`states` only hold entries from locations in Tunisia.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatTrial {
    // Identification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nct_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_study_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brief_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official_title: Option<String>,

    // Status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<String>,

    // Sponsor / oversight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_sponsor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsible_party: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fda_reg_drug: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fda_reg_device: Option<bool>,

    // Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brief_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_description: Option<String>,
    #[serde(default)]
    pub conditions: Vec<String>,

    // Design
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrollment: Option<u64>,
    pub phases: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_outcome: Option<String>,

    // Eligibility
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_age: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<String>,

    // Locations in Tunisia
    #[serde(default)]
    pub cities: Vec<String>,
    #[serde(default)]
    pub states: Vec<String>,
}

impl Default for FlatTrial {
    fn default() -> Self {
        Self {
            nct_id: None,
            org_study_id: None,
            organization: None,
            brief_title: None,
            official_title: None,
            overall_status: None,
            start_date: None,
            completion_date: None,
            lead_sponsor: None,
            responsible_party: None,
            fda_reg_drug: None,
            fda_reg_device: None,
            brief_summary: None,
            detailed_description: None,
            conditions: Vec::new(),
            study_type: None,
            enrollment: None,
            phases: vec![NO_PHASE.to_string()],
            primary_outcome: None,
            min_age: None,
            sex: None,
            criteria: None,
            cities: Vec::new(),
            states: Vec::new(),
        }
    }
}

impl FlatTrial {
    /// Known overall status, if the raw value is one of the registry's
    pub fn status(&self) -> Option<OverallStatus> {
        self.overall_status
            .as_deref()
            .and_then(OverallStatus::from_raw)
    }

    /// Best display title: brief, then official, then the NCT ID
    pub fn display_title(&self) -> &str {
        self.brief_title
            .as_deref()
            .or(self.official_title.as_deref())
            .or(self.nct_id.as_deref())
            .unwrap_or("(untitled)")
    }
}

/// Overall recruitment status values published by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallStatus {
    ActiveNotRecruiting,
    Completed,
    EnrollingByInvitation,
    NotYetRecruiting,
    Recruiting,
    Suspended,
    Terminated,
    Withdrawn,
    Available,
    NoLongerAvailable,
    TemporarilyNotAvailable,
    ApprovedForMarketing,
    Withheld,
    Unknown,
}

impl OverallStatus {
    pub const ALL: [Self; 14] = [
        Self::ActiveNotRecruiting,
        Self::Completed,
        Self::EnrollingByInvitation,
        Self::NotYetRecruiting,
        Self::Recruiting,
        Self::Suspended,
        Self::Terminated,
        Self::Withdrawn,
        Self::Available,
        Self::NoLongerAvailable,
        Self::TemporarilyNotAvailable,
        Self::ApprovedForMarketing,
        Self::Withheld,
        Self::Unknown,
    ];

    /// Registry spelling (e.g. "ACTIVE_NOT_RECRUITING")
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ActiveNotRecruiting => "ACTIVE_NOT_RECRUITING",
            Self::Completed => "COMPLETED",
            Self::EnrollingByInvitation => "ENROLLING_BY_INVITATION",
            Self::NotYetRecruiting => "NOT_YET_RECRUITING",
            Self::Recruiting => "RECRUITING",
            Self::Suspended => "SUSPENDED",
            Self::Terminated => "TERMINATED",
            Self::Withdrawn => "WITHDRAWN",
            Self::Available => "AVAILABLE",
            Self::NoLongerAvailable => "NO_LONGER_AVAILABLE",
            Self::TemporarilyNotAvailable => "TEMPORARILY_NOT_AVAILABLE",
            Self::ApprovedForMarketing => "APPROVED_FOR_MARKETING",
            Self::Withheld => "WITHHELD",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Parse a raw status, ignoring case and surrounding whitespace
    pub fn from_raw(raw: &str) -> Option<Self> {
        let upper = raw.trim().to_ascii_uppercase();
        Self::ALL.into_iter().find(|s| s.as_str() == upper)
    }
}

impl std::fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
