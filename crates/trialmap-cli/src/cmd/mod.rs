//! Subcommands and the state they share

pub mod map;
pub mod regions;
pub mod state;
pub mod trial;

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use serde::Serialize;
use trialmap_core::{FlatTrial, SHARED_RUNTIME, SharedProgress};
use trialmap_geo::{AliasTable, GovernorateMatcher};
use trialmap_registry::{FetchStats, RegistryClient, StudyFetcher};

use crate::config::Config;

/// Loaded configuration plus the registry client and alias table built from it
pub struct Session {
    pub config: Config,
    pub client: RegistryClient,
    pub aliases: AliasTable,
    pub progress: SharedProgress,
}

impl Session {
    pub fn new(config: Config, progress: SharedProgress) -> Self {
        let client = RegistryClient::from_config(&config.registry);
        let aliases = AliasTable::with_overrides(config.alias_pairs());
        Self {
            config,
            client,
            aliases,
            progress,
        }
    }

    pub fn matcher(&self) -> GovernorateMatcher<'_> {
        GovernorateMatcher::new(&self.aliases)
    }

    /// Fetch every study with a site in Tunisia (spinner while paging)
    pub fn fetch_all(&self) -> Result<(Vec<FlatTrial>, FetchStats)> {
        let pb = self.progress.stage_line("fetch");
        let fetcher = StudyFetcher::new(&self.client, &self.config.registry);
        let result = SHARED_RUNTIME.block_on(fetcher.fetch_all(&pb));
        pb.finish_and_clear();
        result.context("Failed to load trials")
    }

    pub fn fetch_one(&self, nct_id: &str) -> Result<Option<FlatTrial>> {
        let fetcher = StudyFetcher::new(&self.client, &self.config.registry);
        SHARED_RUNTIME
            .block_on(fetcher.fetch_by_nct_id(nct_id))
            .with_context(|| format!("Failed to fetch study {nct_id}"))
    }
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );
    table
}

/// Print a key-value summary table on stdout
pub fn print_summary(title: &str, rows: &[(&str, String)]) {
    let mut table = new_table(&[title, "Value"]);
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    println!("\n{table}");
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{out}");
    Ok(())
}

/// Short one-line list of phases: "PHASE2: 3, N/A: 1"
pub fn fmt_phase_counts<'a>(counts: impl IntoIterator<Item = (&'a String, &'a usize)>) -> String {
    counts
        .into_iter()
        .map(|(phase, n)| format!("{phase}: {n}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn phase_counts_line() {
        let mut counts = BTreeMap::new();
        counts.insert("PHASE2".to_string(), 3);
        counts.insert("N/A".to_string(), 1);
        assert_eq!(fmt_phase_counts(&counts), "N/A: 1, PHASE2: 3");
    }

    #[test]
    fn phase_counts_empty() {
        assert_eq!(fmt_phase_counts(&BTreeMap::new()), "");
    }
}
