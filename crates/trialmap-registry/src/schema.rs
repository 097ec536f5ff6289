//! ClinicalTrials.gov v2 study records, as nested serde structs.
//!
//! The registry omits whole modules, sends `null`, and occasionally sends a
//! field with an unexpected type. Every field is deserialized leniently: a
//! value that doesn't fit is dropped to `None` (or skipped inside a list)
//! instead of failing the whole record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

// === Lenient deserializers ===

/// Deserialize any value, keeping it only if it fits `T`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match serde_json::from_value(v) {
        Ok(t) => Some(t),
        Err(e) => {
            log::debug!("dropping malformed field: {e}");
            None
        }
    }))
}

/// Deserialize a list, skipping elements that don't fit `T` (non-list = empty)
fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Ok(items
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect()),
        Some(Value::Null) | None => Ok(Vec::new()),
        Some(other) => {
            log::debug!("expected list, got {other}; using empty list");
            Ok(Vec::new())
        }
    }
}

/// Deserialize a non-empty string, treating "" like an absent value
fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = lenient(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

// === Page envelope ===

/// One page of `/studies` search results
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPage {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub studies: Vec<RawStudy>,
    /// Continuation token; absent (or empty) on the last page
    #[serde(default, deserialize_with = "non_empty_string")]
    pub next_page_token: Option<String>,
}

// === Study record ===

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStudy {
    #[serde(default, deserialize_with = "lenient")]
    pub protocol_section: Option<ProtocolSection>,
}

impl RawStudy {
    /// NCT ID from the identification module, if present
    pub fn nct_id(&self) -> Option<&str> {
        self.protocol_section
            .as_ref()?
            .identification_module
            .as_ref()?
            .nct_id
            .as_deref()
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolSection {
    #[serde(default, deserialize_with = "lenient")]
    pub identification_module: Option<IdentificationModule>,
    #[serde(default, deserialize_with = "lenient")]
    pub status_module: Option<StatusModule>,
    #[serde(default, deserialize_with = "lenient")]
    pub sponsor_collaborators_module: Option<SponsorCollaboratorsModule>,
    #[serde(default, deserialize_with = "lenient")]
    pub oversight_module: Option<OversightModule>,
    #[serde(default, deserialize_with = "lenient")]
    pub description_module: Option<DescriptionModule>,
    #[serde(default, deserialize_with = "lenient")]
    pub conditions_module: Option<ConditionsModule>,
    #[serde(default, deserialize_with = "lenient")]
    pub design_module: Option<DesignModule>,
    #[serde(default, deserialize_with = "lenient")]
    pub outcomes_module: Option<OutcomesModule>,
    #[serde(default, deserialize_with = "lenient")]
    pub eligibility_module: Option<EligibilityModule>,
    #[serde(default, deserialize_with = "lenient")]
    pub contacts_locations_module: Option<ContactsLocationsModule>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentificationModule {
    #[serde(default, deserialize_with = "lenient")]
    pub nct_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub org_study_id_info: Option<OrgStudyIdInfo>,
    #[serde(default, deserialize_with = "lenient")]
    pub organization: Option<Organization>,
    #[serde(default, deserialize_with = "lenient")]
    pub brief_title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub official_title: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct OrgStudyIdInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[serde(default, deserialize_with = "lenient")]
    pub full_name: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusModule {
    #[serde(default, deserialize_with = "lenient")]
    pub overall_status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub start_date_struct: Option<DateStruct>,
    #[serde(default, deserialize_with = "lenient")]
    pub completion_date_struct: Option<DateStruct>,
}

/// Partial date as published ("2023-04" or "2023-04-17")
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DateStruct {
    #[serde(default, deserialize_with = "lenient")]
    pub date: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SponsorCollaboratorsModule {
    #[serde(default, deserialize_with = "lenient")]
    pub lead_sponsor: Option<Sponsor>,
    #[serde(default, deserialize_with = "lenient")]
    pub responsible_party: Option<ResponsibleParty>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct Sponsor {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsibleParty {
    #[serde(default, deserialize_with = "lenient")]
    pub investigator_full_name: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OversightModule {
    #[serde(default, deserialize_with = "lenient")]
    pub is_fda_regulated_drug: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_fda_regulated_device: Option<bool>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionModule {
    #[serde(default, deserialize_with = "lenient")]
    pub brief_summary: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub detailed_description: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ConditionsModule {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub conditions: Vec<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignModule {
    #[serde(default, deserialize_with = "lenient")]
    pub study_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub enrollment_info: Option<EnrollmentInfo>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub phases: Vec<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct EnrollmentInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub count: Option<u64>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomesModule {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub primary_outcomes: Vec<Outcome>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct Outcome {
    #[serde(default, deserialize_with = "lenient")]
    pub measure: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityModule {
    #[serde(default, deserialize_with = "lenient")]
    pub minimum_age: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub sex: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub eligibility_criteria: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ContactsLocationsModule {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub locations: Vec<Location>,
}

/// One trial site
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Location {
    #[serde(default, deserialize_with = "lenient")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub country: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_parses() {
        let study: RawStudy = serde_json::from_str("{}").unwrap();
        assert!(study.protocol_section.is_none());
        assert_eq!(study.nct_id(), None);
    }

    #[test]
    fn wrong_typed_module_is_dropped() {
        let study: RawStudy = serde_json::from_str(
            r#"{"protocolSection": {
                "identificationModule": {"nctId": "NCT01"},
                "statusModule": "not an object"
            }}"#,
        )
        .unwrap();
        let proto = study.protocol_section.as_ref().unwrap();
        assert!(proto.status_module.is_none());
        assert_eq!(study.nct_id(), Some("NCT01"));
    }

    #[test]
    fn wrong_typed_scalar_is_dropped() {
        let module: DesignModule =
            serde_json::from_str(r#"{"studyType": 7, "enrollmentInfo": {"count": -3}}"#).unwrap();
        assert!(module.study_type.is_none());
        assert!(module.enrollment_info.unwrap().count.is_none());
    }

    #[test]
    fn list_skips_bad_elements() {
        let module: ConditionsModule =
            serde_json::from_str(r#"{"conditions": ["Asthma", 3, null, "COPD"]}"#).unwrap();
        assert_eq!(module.conditions, vec!["Asthma", "COPD"]);
    }

    #[test]
    fn non_list_becomes_empty() {
        let module: DesignModule = serde_json::from_str(r#"{"phases": "PHASE2"}"#).unwrap();
        assert!(module.phases.is_empty());
    }

    #[test]
    fn null_fields_are_absent() {
        let loc: Location =
            serde_json::from_str(r#"{"city": null, "state": null, "country": "Tunisia"}"#)
                .unwrap();
        assert!(loc.city.is_none());
        assert!(loc.state.is_none());
        assert_eq!(loc.country.as_deref(), Some("Tunisia"));
    }

    #[test]
    fn page_with_token() {
        let page: StudyPage =
            serde_json::from_str(r#"{"studies": [{}, {}], "nextPageToken": "abc"}"#).unwrap();
        assert_eq!(page.studies.len(), 2);
        assert_eq!(page.next_page_token.as_deref(), Some("abc"));
    }

    #[test]
    fn page_empty_token_is_last_page() {
        let page: StudyPage = serde_json::from_str(r#"{"studies": [], "nextPageToken": ""}"#)
            .unwrap();
        assert!(page.next_page_token.is_none());
    }

    #[test]
    fn page_without_studies() {
        let page: StudyPage = serde_json::from_str(r#"{"totalCount": 0}"#).unwrap();
        assert!(page.studies.is_empty());
        assert!(page.next_page_token.is_none());
    }
}
