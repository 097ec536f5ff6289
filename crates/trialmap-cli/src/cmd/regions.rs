//! `trialmap regions`: resolve map region labels offline

use anyhow::Result;
use clap::Args;
use comfy_table::Cell;
use trialmap_geo::{group_regions, region_to_governorate};

use super::new_table;

#[derive(Args, Debug)]
pub struct RegionsArgs {
    /// Region labels as named in the map data ("Kebili 2", "El Kef", ...)
    #[arg(required = true)]
    pub labels: Vec<String>,

    /// Group labels under their governorate instead of listing one per row
    #[arg(long)]
    pub group: bool,
}

pub fn run(args: RegionsArgs) -> Result<()> {
    if args.group {
        let groups = group_regions(args.labels.iter().map(String::as_str));
        let mut table = new_table(&["Governorate", "Regions"]);
        for (g, labels) in &groups {
            table.add_row(vec![Cell::new(g), Cell::new(labels.join(", "))]);
        }
        println!("\n{table}");
        let grouped: usize = groups.values().map(Vec::len).sum();
        if grouped < args.labels.len() {
            log::warn!("{} labels match no governorate", args.labels.len() - grouped);
        }
        return Ok(());
    }

    let mut table = new_table(&["Region", "Governorate"]);
    for label in &args.labels {
        let g = region_to_governorate(label);
        table.add_row(vec![
            Cell::new(label),
            Cell::new(g.map_or("-", |g| g.name())),
        ]);
    }
    println!("\n{table}");
    Ok(())
}
