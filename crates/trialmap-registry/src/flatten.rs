//! Nested study record → `FlatTrial`

use serde::Deserialize;
use serde_json::Value;
use trialmap_core::FlatTrial;

use crate::schema::RawStudy;

/// Only locations with exactly this country contribute cities/states
pub const COUNTRY: &str = "Tunisia";

/// Flatten an arbitrary JSON value. Never fails: anything that isn't a
/// study object flattens to an empty record.
pub fn flatten_value(value: &Value) -> FlatTrial {
    match RawStudy::deserialize(value) {
        Ok(study) => flatten_study(&study),
        Err(e) => {
            log::debug!("study is not an object ({e}), flattening as empty");
            FlatTrial::default()
        }
    }
}

/// Flatten one study into the fixed flat schema.
pub fn flatten_study(study: &RawStudy) -> FlatTrial {
    let mut flat = FlatTrial::default();
    let Some(proto) = study.protocol_section.as_ref() else {
        return flat;
    };

    if let Some(id) = &proto.identification_module {
        flat.nct_id = id.nct_id.clone();
        flat.org_study_id = id.org_study_id_info.as_ref().and_then(|i| i.id.clone());
        flat.organization = id.organization.as_ref().and_then(|o| o.full_name.clone());
        flat.brief_title = id.brief_title.clone();
        flat.official_title = id.official_title.clone();
    }

    if let Some(status) = &proto.status_module {
        flat.overall_status = status.overall_status.clone();
        flat.start_date = status.start_date_struct.as_ref().and_then(|d| d.date.clone());
        flat.completion_date = status
            .completion_date_struct
            .as_ref()
            .and_then(|d| d.date.clone());
    }

    if let Some(sponsor) = &proto.sponsor_collaborators_module {
        flat.lead_sponsor = sponsor.lead_sponsor.as_ref().and_then(|s| s.name.clone());
        flat.responsible_party = sponsor
            .responsible_party
            .as_ref()
            .and_then(|p| p.investigator_full_name.clone());
    }

    if let Some(oversight) = &proto.oversight_module {
        flat.fda_reg_drug = oversight.is_fda_regulated_drug;
        flat.fda_reg_device = oversight.is_fda_regulated_device;
    }

    if let Some(desc) = &proto.description_module {
        flat.brief_summary = desc.brief_summary.clone();
        flat.detailed_description = desc.detailed_description.clone();
    }

    if let Some(cond) = &proto.conditions_module {
        flat.conditions = cond.conditions.clone();
    }

    if let Some(design) = &proto.design_module {
        flat.study_type = design.study_type.clone();
        flat.enrollment = design.enrollment_info.as_ref().and_then(|e| e.count);
        // Registry labels are kept verbatim ("PHASE2", "EARLY_PHASE1", ...)
        if !design.phases.is_empty() {
            flat.phases = design.phases.clone();
        }
    }
    debug_assert!(!flat.phases.is_empty());

    if let Some(outcomes) = &proto.outcomes_module {
        flat.primary_outcome = outcomes.primary_outcomes.first().and_then(|o| o.measure.clone());
    }

    if let Some(elig) = &proto.eligibility_module {
        flat.min_age = elig.minimum_age.clone();
        flat.sex = elig.sex.clone();
        flat.criteria = elig.eligibility_criteria.clone();
    }

    if let Some(contacts) = &proto.contacts_locations_module {
        for loc in &contacts.locations {
            if loc.country.as_deref() != Some(COUNTRY) {
                continue;
            }
            if let Some(city) = loc.city.as_ref().filter(|c| !c.is_empty()) {
                flat.cities.push(city.clone());
            }
            if let Some(state) = loc.state.as_ref().filter(|s| !s.is_empty()) {
                flat.states.push(state.clone());
            }
        }
    }

    flat
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_study() -> Value {
        json!({
            "protocolSection": {
                "identificationModule": {
                    "nctId": "NCT05000001",
                    "orgStudyIdInfo": {"id": "ORG-42"},
                    "organization": {"fullName": "Hopital Charles Nicolle"},
                    "briefTitle": "Brief",
                    "officialTitle": "Official"
                },
                "statusModule": {
                    "overallStatus": "RECRUITING",
                    "startDateStruct": {"date": "2023-04"},
                    "completionDateStruct": {"date": "2025-12-31"}
                },
                "sponsorCollaboratorsModule": {
                    "leadSponsor": {"name": "Sponsor"},
                    "responsibleParty": {"investigatorFullName": "Dr. A"}
                },
                "oversightModule": {"isFdaRegulatedDrug": false, "isFdaRegulatedDevice": true},
                "descriptionModule": {"briefSummary": "Summary", "detailedDescription": "Long"},
                "conditionsModule": {"conditions": ["Asthma", "COPD"]},
                "designModule": {
                    "studyType": "INTERVENTIONAL",
                    "enrollmentInfo": {"count": 120},
                    "phases": ["PHASE2", "PHASE3"]
                },
                "outcomesModule": {"primaryOutcomes": [{"measure": "FEV1"}, {"measure": "Other"}]},
                "eligibilityModule": {"minimumAge": "18 Years", "sex": "ALL", "eligibilityCriteria": "Adults"},
                "contactsLocationsModule": {"locations": [
                    {"city": "Sfax", "state": "Sfax Governorate", "country": "Tunisia"},
                    {"city": "Paris", "state": "Ile-de-France", "country": "France"},
                    {"city": "Tunis", "country": "Tunisia"}
                ]}
            }
        })
    }

    #[test]
    fn flattens_every_field() {
        let flat = flatten_value(&full_study());
        assert_eq!(flat.nct_id.as_deref(), Some("NCT05000001"));
        assert_eq!(flat.org_study_id.as_deref(), Some("ORG-42"));
        assert_eq!(flat.organization.as_deref(), Some("Hopital Charles Nicolle"));
        assert_eq!(flat.brief_title.as_deref(), Some("Brief"));
        assert_eq!(flat.official_title.as_deref(), Some("Official"));
        assert_eq!(flat.overall_status.as_deref(), Some("RECRUITING"));
        assert_eq!(flat.start_date.as_deref(), Some("2023-04"));
        assert_eq!(flat.completion_date.as_deref(), Some("2025-12-31"));
        assert_eq!(flat.lead_sponsor.as_deref(), Some("Sponsor"));
        assert_eq!(flat.responsible_party.as_deref(), Some("Dr. A"));
        assert_eq!(flat.fda_reg_drug, Some(false));
        assert_eq!(flat.fda_reg_device, Some(true));
        assert_eq!(flat.brief_summary.as_deref(), Some("Summary"));
        assert_eq!(flat.detailed_description.as_deref(), Some("Long"));
        assert_eq!(flat.conditions, vec!["Asthma", "COPD"]);
        assert_eq!(flat.study_type.as_deref(), Some("INTERVENTIONAL"));
        assert_eq!(flat.enrollment, Some(120));
        assert_eq!(flat.phases, vec!["PHASE2", "PHASE3"]);
        assert_eq!(flat.primary_outcome.as_deref(), Some("FEV1"));
        assert_eq!(flat.min_age.as_deref(), Some("18 Years"));
        assert_eq!(flat.sex.as_deref(), Some("ALL"));
        assert_eq!(flat.criteria.as_deref(), Some("Adults"));
    }

    #[test]
    fn only_tunisian_locations_kept() {
        let flat = flatten_value(&full_study());
        assert_eq!(flat.cities, vec!["Sfax", "Tunis"]);
        assert_eq!(flat.states, vec!["Sfax Governorate"]);
    }

    #[test]
    fn empty_object_is_total() {
        let flat = flatten_value(&json!({}));
        assert_eq!(flat.phases, vec!["N/A"]);
        assert!(flat.cities.is_empty());
        assert!(flat.states.is_empty());
        assert!(flat.nct_id.is_none());
        assert!(flat.conditions.is_empty());
    }

    #[test]
    fn non_object_is_total() {
        for value in [json!(null), json!(42), json!("study"), json!([1, 2])] {
            let flat = flatten_value(&value);
            assert_eq!(flat.phases, vec!["N/A"]);
            assert!(flat.cities.is_empty());
        }
    }

    #[test]
    fn empty_modules_are_total() {
        let flat = flatten_value(&json!({"protocolSection": {
            "identificationModule": {},
            "designModule": {},
            "contactsLocationsModule": {}
        }}));
        assert_eq!(flat.phases, vec!["N/A"]);
        assert!(flat.cities.is_empty());
    }

    #[test]
    fn empty_phase_list_defaults() {
        let flat = flatten_value(&json!({"protocolSection": {"designModule": {"phases": []}}}));
        assert_eq!(flat.phases, vec!["N/A"]);
    }

    #[test]
    fn phase_kept_verbatim() {
        let flat = flatten_value(&json!({"protocolSection": {"designModule": {"phases": ["PHASE2"]}}}));
        assert_eq!(flat.phases, vec!["PHASE2"]);

        let flat = flatten_value(&json!({"protocolSection": {"designModule": {"phases": ["Early_Phase1"]}}}));
        assert_eq!(flat.phases, vec!["Early_Phase1"]);
    }

    #[test]
    fn foreign_country_contributes_nothing() {
        let flat = flatten_value(&json!({"protocolSection": {"contactsLocationsModule": {"locations": [
            {"city": "Lyon", "state": "Rhone", "country": "France"}
        ]}}}));
        assert!(flat.cities.is_empty());
        assert!(flat.states.is_empty());
    }

    #[test]
    fn country_match_is_case_sensitive() {
        let flat = flatten_value(&json!({"protocolSection": {"contactsLocationsModule": {"locations": [
            {"city": "Sousse", "country": "tunisia"},
            {"city": "Sfax", "country": "Tunisia "}
        ]}}}));
        assert!(flat.cities.is_empty());
    }

    #[test]
    fn no_primary_outcomes() {
        let flat = flatten_value(&json!({"protocolSection": {"outcomesModule": {"primaryOutcomes": []}}}));
        assert!(flat.primary_outcome.is_none());
    }
}
