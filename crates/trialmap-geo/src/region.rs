//! Map geometry labels → governorates
//!
//! Map data names regions with its own spelling and splits some
//! governorates into numbered fragments. Labels are resolved through the
//! region alias table ([`AliasTable::regions`]), then by exact equality with
//! a canonical name; there is no substring matching. Trial-location aliases
//! such as "La Marsa" do not apply here.

use std::collections::BTreeMap;

use crate::alias::AliasTable;
use crate::governorate::Governorate;
use crate::normalize::{normalize_location, normalize_region_label};

/// Governorate for a map region label, `None` for unknown fragments
pub fn region_to_governorate(label: &str) -> Option<Governorate> {
    let wanted = normalize_region_label(label);
    AliasTable::regions().get(&wanted).or_else(|| {
        Governorate::ALL
            .into_iter()
            .find(|g| normalize_location(g.name()) == wanted)
    })
}

/// Group region labels under their governorate, dropping unknown labels.
///
/// Labels keep their input order within each group.
pub fn group_regions<'l, I>(labels: I) -> BTreeMap<Governorate, Vec<&'l str>>
where
    I: IntoIterator<Item = &'l str>,
{
    let mut groups: BTreeMap<Governorate, Vec<&'l str>> = BTreeMap::new();
    for label in labels {
        match region_to_governorate(label) {
            Some(g) => groups.entry(g).or_default().push(label),
            None => log::debug!("map region {label:?} matches no governorate"),
        }
    }
    groups
}
