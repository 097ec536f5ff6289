//! `trialmap trial`: one study by NCT ID

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, ContentArrangement};
use serde::Serialize;
use trialmap_core::FlatTrial;
use trialmap_geo::Governorate;

use super::{Session, new_table, print_json};

#[derive(Args, Debug)]
pub struct TrialArgs {
    /// Study identifier, e.g. NCT01234567
    pub nct_id: String,

    /// Print the study as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TrialReport<'a> {
    #[serde(flatten)]
    trial: &'a FlatTrial,
    governorates: Vec<Governorate>,
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

fn yes_no(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "yes",
        Some(false) => "no",
        None => "-",
    }
}

fn join_or_dash(values: &[impl AsRef<str>]) -> String {
    if values.is_empty() {
        return "-".to_string();
    }
    values
        .iter()
        .map(|v| v.as_ref())
        .collect::<Vec<&str>>()
        .join(", ")
}

fn detail_rows(trial: &FlatTrial, governorates: &[Governorate]) -> Vec<(&'static str, String)> {
    let names: Vec<&str> = governorates.iter().map(|g| g.name()).collect();
    vec![
        ("NCT ID", opt(&trial.nct_id)),
        ("Title", trial.display_title().to_string()),
        ("Official title", opt(&trial.official_title)),
        ("Organization", opt(&trial.organization)),
        ("Org study ID", opt(&trial.org_study_id)),
        ("Status", opt(&trial.overall_status)),
        ("Start", opt(&trial.start_date)),
        ("Completion", opt(&trial.completion_date)),
        ("Lead sponsor", opt(&trial.lead_sponsor)),
        ("Responsible party", opt(&trial.responsible_party)),
        ("FDA drug", yes_no(trial.fda_reg_drug).to_string()),
        ("FDA device", yes_no(trial.fda_reg_device).to_string()),
        ("Study type", opt(&trial.study_type)),
        ("Phases", join_or_dash(&trial.phases)),
        (
            "Enrollment",
            trial
                .enrollment
                .map_or_else(|| "-".to_string(), |n| n.to_string()),
        ),
        ("Conditions", join_or_dash(&trial.conditions)),
        ("Primary outcome", opt(&trial.primary_outcome)),
        ("Minimum age", opt(&trial.min_age)),
        ("Sex", opt(&trial.sex)),
        ("Cities", join_or_dash(&trial.cities)),
        ("States", join_or_dash(&trial.states)),
        ("Governorates", join_or_dash(&names)),
    ]
}

pub fn run(args: TrialArgs, session: &Session) -> Result<()> {
    let Some(trial) = session.fetch_one(args.nct_id.trim())? else {
        println!("Study {} not found", args.nct_id.trim());
        return Ok(());
    };
    let governorates: Vec<Governorate> = session.matcher().match_trial(&trial).iter().collect();

    if args.json {
        return print_json(&TrialReport {
            trial: &trial,
            governorates,
        });
    }

    let mut table = new_table(&["Field", "Value"]);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    for (label, value) in detail_rows(&trial, &governorates) {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    println!("\n{table}");

    if let Some(summary) = &trial.brief_summary {
        println!("\n{summary}");
    }
    Ok(())
}
