//! `trialmap map`: nationwide overview per governorate

use std::collections::BTreeMap;

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, CellAlignment};
use serde::Serialize;
use trialmap_core::{OverallStatus, fmt_num};
use trialmap_geo::{Governorate, PhaseSummary, status_counts_by_size};

use super::{Session, fmt_phase_counts, new_table, print_json, print_summary};

#[derive(Args, Debug)]
pub struct MapArgs {
    /// Print the overview as JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapReport {
    total: usize,
    unmatched: usize,
    state_counts: BTreeMap<Governorate, usize>,
    phase_summary: PhaseSummary,
    status_counts: Vec<StatusCount>,
}

#[derive(Serialize)]
struct StatusCount {
    status: OverallStatus,
    count: usize,
}

pub fn run(args: MapArgs, session: &Session) -> Result<()> {
    let (trials, stats) = session.fetch_all()?;
    let agg = session.matcher().aggregate(&trials);
    let state_counts = agg.state_trials.counts();
    let statuses = status_counts_by_size(&trials);

    if args.json {
        return print_json(&MapReport {
            total: trials.len(),
            unmatched: agg.unmatched.len(),
            state_counts,
            phase_summary: agg.phase_summary,
            status_counts: statuses
                .into_iter()
                .map(|(status, count)| StatusCount { status, count })
                .collect(),
        });
    }

    let mut table = new_table(&["Governorate", "Trials", "Phases"]);
    for (g, phases) in agg.phase_summary.iter() {
        table.add_row(vec![
            Cell::new(g),
            Cell::new(fmt_num(state_counts[&g])).set_alignment(CellAlignment::Right),
            Cell::new(fmt_phase_counts(phases)),
        ]);
    }
    println!("\n{table}");

    if !statuses.is_empty() {
        let mut table = new_table(&["Status", "Trials"]);
        for (status, count) in &statuses {
            table.add_row(vec![
                Cell::new(status),
                Cell::new(fmt_num(*count)).set_alignment(CellAlignment::Right),
            ]);
        }
        println!("\n{table}");
    }

    print_summary(
        "Tunisia",
        &[
            ("Trials", fmt_num(trials.len())),
            ("Unmatched", fmt_num(agg.unmatched.len())),
            ("Pages", fmt_num(stats.pages)),
            ("Studies received", fmt_num(stats.received)),
        ],
    );
    Ok(())
}
