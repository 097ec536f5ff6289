//! `trialmap state`: trials attributed to one governorate, paginated

use anyhow::{Result, anyhow};
use clap::Args;
use comfy_table::Cell;
use serde::Serialize;
use trialmap_core::{FlatTrial, fmt_num};
use trialmap_geo::Governorate;

use super::{Session, fmt_phase_counts, new_table, print_json};

/// Trials listed per page
pub const PAGE_SIZE: usize = 10;

#[derive(Args, Debug)]
pub struct StateArgs {
    /// Governorate name ("Sidi Bouzid", "gabes", "Le Kef", ...)
    pub name: String,

    /// Page to show, starting at 1 (clamped to the last page)
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Print the page as JSON
    #[arg(long)]
    pub json: bool,
}

/// One clamped page of a list
#[derive(Debug, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub pages: usize,
}

/// Slice out `page` (1-based) of `per_page` items.
///
/// The page is clamped to `1..=pages`, where an empty list still has one page.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> Page<'_, T> {
    let per_page = per_page.max(1);
    let pages = items.len().div_ceil(per_page).max(1);
    let page = page.clamp(1, pages);
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(items.len());
    Page {
        items: &items[start.min(end)..end],
        page,
        pages,
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StateReport<'a> {
    governorate: Governorate,
    total: usize,
    page: usize,
    pages: usize,
    phases: Option<&'a std::collections::BTreeMap<String, usize>>,
    trials: &'a [&'a FlatTrial],
}

fn resolve_governorate(session: &Session, name: &str) -> Result<Governorate> {
    name.parse::<Governorate>()
        .ok()
        .or_else(|| session.aliases.resolve(name))
        .ok_or_else(|| anyhow!("unknown governorate: {name:?}"))
}

pub fn run(args: StateArgs, session: &Session) -> Result<()> {
    let governorate = resolve_governorate(session, &args.name)?;
    let (trials, _) = session.fetch_all()?;
    let agg = session.matcher().aggregate(&trials);
    let listed = agg.state_trials.get(governorate);
    let page = paginate(listed, args.page, PAGE_SIZE);
    let phases = agg.phase_summary.get(governorate);

    if args.json {
        return print_json(&StateReport {
            governorate,
            total: listed.len(),
            page: page.page,
            pages: page.pages,
            phases,
            trials: page.items,
        });
    }

    println!(
        "\n{governorate}: {} trials (page {}/{})",
        fmt_num(listed.len()),
        page.page,
        page.pages
    );
    if let Some(phases) = phases.filter(|p| !p.is_empty()) {
        println!("Phases: {}", fmt_phase_counts(phases));
    }
    if page.items.is_empty() {
        return Ok(());
    }

    let mut table = new_table(&["NCT ID", "Title", "Status", "Phases"]);
    for trial in page.items {
        table.add_row(vec![
            Cell::new(trial.nct_id.as_deref().unwrap_or("-")),
            Cell::new(trial.display_title()),
            Cell::new(trial.overall_status.as_deref().unwrap_or("-")),
            Cell::new(trial.phases.join(", ")),
        ]);
    }
    println!("{table}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page() {
        let items: Vec<u32> = (0..25).collect();
        let page = paginate(&items, 1, 10);
        assert_eq!(page.items, &items[0..10]);
        assert_eq!(page.page, 1);
        assert_eq!(page.pages, 3);
    }

    #[test]
    fn last_partial_page() {
        let items: Vec<u32> = (0..25).collect();
        let page = paginate(&items, 3, 10);
        assert_eq!(page.items, &items[20..25]);
    }

    #[test]
    fn clamps_out_of_range() {
        let items: Vec<u32> = (0..25).collect();
        assert_eq!(paginate(&items, 0, 10).page, 1);
        let page = paginate(&items, 99, 10);
        assert_eq!(page.page, 3);
        assert_eq!(page.items, &items[20..25]);
    }

    #[test]
    fn empty_list_has_one_page() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, 5, 10);
        assert_eq!(page.page, 1);
        assert_eq!(page.pages, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn exact_multiple() {
        let items: Vec<u32> = (0..20).collect();
        let page = paginate(&items, 2, 10);
        assert_eq!(page.pages, 2);
        assert_eq!(page.items, &items[10..20]);
    }
}
