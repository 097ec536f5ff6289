//! Live registry tests
//!
//! These tests require network access and are marked #[ignore] by default.
//! Run with: cargo test -p trialmap-registry --test live -- --ignored

use trialmap_registry::{
    RegistryClient, RegistryConfig, fetch_all_tunisia_studies, fetch_study_by_nct_id,
};

#[tokio::test]
#[ignore]
async fn fetch_all_live() {
    let client = RegistryClient::from_config(&RegistryConfig::default());
    let trials = fetch_all_tunisia_studies(&client)
        .await
        .expect("listing should succeed");

    assert!(
        trials.len() > 100,
        "Expected more than 100 studies, got {}",
        trials.len()
    );
    assert!(trials.iter().all(|t| !t.cities.is_empty()));
    assert!(trials.iter().all(|t| !t.phases.is_empty()));
}

#[tokio::test]
#[ignore]
async fn fetch_one_live() {
    let client = RegistryClient::from_config(&RegistryConfig::default());
    let trials = fetch_all_tunisia_studies(&client)
        .await
        .expect("listing should succeed");
    let id = trials
        .iter()
        .find_map(|t| t.nct_id.clone())
        .expect("at least one study with an NCT ID");

    let trial = fetch_study_by_nct_id(&client, &id)
        .await
        .expect("lookup should succeed")
        .expect("study should be found");
    assert_eq!(trial.nct_id.as_deref(), Some(id.as_str()));
}
