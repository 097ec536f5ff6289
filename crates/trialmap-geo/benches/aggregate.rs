use trialmap_core::FlatTrial;
use trialmap_geo::{GovernorateMatcher, aggregate};

const CITIES: &[&str] = &[
    "Tunis",
    "La Marsa",
    "Sousse Jawhara",
    "Sfax",
    "Le Kef",
    "Mégrine",
    "Monastir",
    "Hammam Chott",
    "Paris",
    "Kairouan",
];

const PHASES: &[&str] = &["PHASE1", "PHASE2", "PHASE3", "N/A"];

/// Synthetic trials cycling through known-good and unmatched locations
fn synthetic_trials(n: usize) -> Vec<FlatTrial> {
    (0..n)
        .map(|i| FlatTrial {
            nct_id: Some(format!("NCT{i:08}")),
            cities: vec![
                CITIES[i % CITIES.len()].to_string(),
                CITIES[(i * 7 + 3) % CITIES.len()].to_string(),
            ],
            states: if i % 3 == 0 {
                vec!["Ben Arous".to_string()]
            } else {
                Vec::new()
            },
            phases: vec![PHASES[i % PHASES.len()].to_string()],
            ..FlatTrial::default()
        })
        .collect()
}

#[divan::bench(args = [100, 1_000, 10_000])]
fn match_trials(bencher: divan::Bencher, n: usize) {
    let trials = synthetic_trials(n);
    let matcher = GovernorateMatcher::default();
    bencher.bench(|| {
        trials
            .iter()
            .map(|t| matcher.match_trial(t).len())
            .sum::<usize>()
    });
}

#[divan::bench(args = [100, 1_000, 10_000])]
fn aggregate_trials(bencher: divan::Bencher, n: usize) {
    let trials = synthetic_trials(n);
    bencher.bench(|| aggregate(&trials).unmatched.len());
}

fn main() {
    divan::main();
}
