//! Per-governorate trial lists, counts and phase tables

use std::collections::BTreeMap;

use serde::Serialize;
use trialmap_core::{FlatTrial, OverallStatus};

use crate::governorate::{Governorate, GovernorateSet};
use crate::matcher::GovernorateMatcher;

/// Trials attributed to each governorate. Always has all 24 keys.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct StateTrials<'t>(BTreeMap<Governorate, Vec<&'t FlatTrial>>);

impl<'t> StateTrials<'t> {
    fn empty() -> Self {
        Self(Governorate::ALL.into_iter().map(|g| (g, Vec::new())).collect())
    }

    pub fn get(&self, g: Governorate) -> &[&'t FlatTrial] {
        self.0.get(&g).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of trials per governorate
    pub fn counts(&self) -> BTreeMap<Governorate, usize> {
        self.0.iter().map(|(g, trials)| (*g, trials.len())).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Governorate, &[&'t FlatTrial])> {
        self.0.iter().map(|(g, trials)| (*g, trials.as_slice()))
    }
}

/// Phase label → occurrence count, for each governorate. Always has all 24 keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PhaseSummary(BTreeMap<Governorate, BTreeMap<String, usize>>);

impl PhaseSummary {
    fn empty() -> Self {
        Self(Governorate::ALL.into_iter().map(|g| (g, BTreeMap::new())).collect())
    }

    fn add(&mut self, g: Governorate, phase: &str) {
        let phases = self.0.entry(g).or_default();
        match phases.get_mut(phase) {
            Some(n) => *n += 1,
            None => {
                phases.insert(phase.to_string(), 1);
            }
        }
    }

    pub fn get(&self, g: Governorate) -> Option<&BTreeMap<String, usize>> {
        self.0.get(&g)
    }

    /// Sum of every count in the table
    pub fn total(&self) -> usize {
        self.0.values().flat_map(|phases| phases.values()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Governorate, &BTreeMap<String, usize>)> {
        self.0.iter().map(|(g, phases)| (*g, phases))
    }
}

/// Everything derived from one pass of matching over a trial collection
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregate<'t> {
    pub state_trials: StateTrials<'t>,
    pub unmatched: Vec<&'t FlatTrial>,
    pub phase_summary: PhaseSummary,
}

/// `trials_per_state` result
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialsPerState<'t> {
    pub state_trials: StateTrials<'t>,
    pub unmatched: Vec<&'t FlatTrial>,
}

/// `trials_per_state_phase` result
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialsPerStatePhase<'t> {
    pub summary: PhaseSummary,
    pub unmatched: Vec<&'t FlatTrial>,
}

impl<'a> GovernorateMatcher<'a> {
    /// Match every trial once and build lists, unmatched set and phase table.
    ///
    /// A trial matched to several governorates appears in each list and
    /// contributes one count per (governorate, phase) pair.
    pub fn aggregate<'t>(&self, trials: &'t [FlatTrial]) -> Aggregate<'t> {
        let mut state_trials = StateTrials::empty();
        let mut phase_summary = PhaseSummary::empty();
        let mut unmatched = Vec::new();

        for trial in trials {
            let found: GovernorateSet = self.match_trial(trial);
            if found.is_empty() {
                unmatched.push(trial);
                continue;
            }
            for g in found.iter() {
                state_trials.0.entry(g).or_default().push(trial);
                for phase in &trial.phases {
                    phase_summary.add(g, phase);
                }
            }
        }

        log::debug!(
            "aggregated {} trials, {} unmatched",
            trials.len(),
            unmatched.len()
        );
        Aggregate {
            state_trials,
            unmatched,
            phase_summary,
        }
    }
}

/// Aggregate with the built-in alias table
pub fn aggregate(trials: &[FlatTrial]) -> Aggregate<'_> {
    GovernorateMatcher::default().aggregate(trials)
}

/// Trials per governorate plus the unmatched ones
pub fn trials_per_state(trials: &[FlatTrial]) -> TrialsPerState<'_> {
    let Aggregate {
        state_trials,
        unmatched,
        ..
    } = aggregate(trials);
    TrialsPerState {
        state_trials,
        unmatched,
    }
}

/// Phase table per governorate plus the unmatched trials
pub fn trials_per_state_phase(trials: &[FlatTrial]) -> TrialsPerStatePhase<'_> {
    let Aggregate {
        phase_summary,
        unmatched,
        ..
    } = aggregate(trials);
    TrialsPerStatePhase {
        summary: phase_summary,
        unmatched,
    }
}

/// Trials per known overall status; absent or unrecognized statuses are skipped
pub fn status_counts(trials: &[FlatTrial]) -> BTreeMap<OverallStatus, usize> {
    let mut counts = BTreeMap::new();
    for status in trials.iter().filter_map(FlatTrial::status) {
        *counts.entry(status).or_insert(0) += 1;
    }
    counts
}

/// Status counts, largest first (ties in taxonomy order)
pub fn status_counts_by_size(trials: &[FlatTrial]) -> Vec<(OverallStatus, usize)> {
    let mut counts: Vec<_> = status_counts(trials).into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
