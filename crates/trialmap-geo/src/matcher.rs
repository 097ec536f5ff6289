//! Trial locations → governorates

use trialmap_core::FlatTrial;

use crate::alias::AliasTable;
use crate::governorate::{Governorate, GovernorateSet};
use crate::normalize::normalize_location;

/// Attributes trials to governorates from their free-text cities/states.
///
/// Three passes, unioned:
/// 1. each city looked up in the alias table,
/// 2. each city containing a governorate name,
/// 3. each state containing a governorate name not matched yet.
///
/// All comparisons are on normalized text. Substring matching is heuristic
/// and may over-match; aliases cover the known misses.
#[derive(Debug, Clone)]
pub struct GovernorateMatcher<'a> {
    aliases: &'a AliasTable,
    names: [String; Governorate::COUNT],
}

impl Default for GovernorateMatcher<'static> {
    fn default() -> Self {
        Self::new(AliasTable::builtin())
    }
}

impl<'a> GovernorateMatcher<'a> {
    pub fn new(aliases: &'a AliasTable) -> Self {
        Self {
            aliases,
            names: Governorate::ALL.map(|g| normalize_location(g.name())),
        }
    }

    /// Governorates the trial is attributed to (empty = unmatched)
    pub fn match_trial(&self, trial: &FlatTrial) -> GovernorateSet {
        let cities: Vec<String> = trial.cities.iter().map(|c| normalize_location(c)).collect();
        let mut found = GovernorateSet::new();

        for city in &cities {
            if let Some(g) = self.aliases.get(city) {
                found.insert(g);
            }
        }

        for (g, name) in Governorate::ALL.into_iter().zip(&self.names) {
            if cities.iter().any(|city| city.contains(name.as_str())) {
                found.insert(g);
            }
        }

        if trial.states.is_empty() {
            return found;
        }
        let states: Vec<String> = trial.states.iter().map(|s| normalize_location(s)).collect();
        for (g, name) in Governorate::ALL.into_iter().zip(&self.names) {
            if found.contains(g) {
                continue;
            }
            if states.iter().any(|state| state.contains(name.as_str())) {
                found.insert(g);
            }
        }

        found
    }
}
