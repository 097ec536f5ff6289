//! Alias table: known misspellings and alternate names → governorate

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::governorate::Governorate;
use crate::normalize::normalize_location;

/// Built-in aliases, written as they appear in registry records
const BUILTIN_ALIASES: &[(&str, Governorate)] = &[
    ("Le Kef", Governorate::Kef),
    ("El Kef", Governorate::Kef),
    ("Aryanah", Governorate::Ariana),
    ("La Marsa", Governorate::Tunis),
    ("Bab Saadoun", Governorate::Tunis),
    ("Montfleury", Governorate::Tunis),
    ("Many Locations", Governorate::Tunis),
    ("Multiple Locations", Governorate::Tunis),
    ("Mégrine", Governorate::BenArous),
];

/// Aliases for map region labels. Narrower than [`BUILTIN_ALIASES`]: map
/// data only spells these governorates differently.
const REGION_ALIASES: &[(&str, Governorate)] = &[
    ("Le Kef", Governorate::Kef),
    ("El Kef", Governorate::Kef),
    ("Aryanah", Governorate::Ariana),
];

/// Lookup keyed by normalized name.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: FxHashMap<String, Governorate>,
}

impl AliasTable {
    /// Process-wide built-in table
    pub fn builtin() -> &'static AliasTable {
        static TABLE: LazyLock<AliasTable> = LazyLock::new(|| {
            let mut table = AliasTable::default();
            for &(name, g) in BUILTIN_ALIASES {
                table.insert(name, g);
            }
            table
        });
        &TABLE
    }

    /// Process-wide table for map region labels
    pub fn regions() -> &'static AliasTable {
        static TABLE: LazyLock<AliasTable> = LazyLock::new(|| {
            let mut table = AliasTable::default();
            for &(name, g) in REGION_ALIASES {
                table.insert(name, g);
            }
            table
        });
        &TABLE
    }

    /// Add or replace an alias; the key is normalized first
    pub fn insert(&mut self, name: &str, g: Governorate) {
        self.entries.insert(normalize_location(name), g);
    }

    /// Built-in table extended with `(alias, governorate name)` pairs.
    ///
    /// Pairs naming an unknown governorate are skipped with a warning.
    pub fn with_overrides<'a, I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut table = Self::builtin().clone();
        for (alias, target) in overrides {
            match target.parse::<Governorate>() {
                Ok(g) => table.insert(alias, g),
                Err(e) => log::warn!("alias {alias:?} skipped: {e}"),
            }
        }
        table
    }

    /// Look up an already-normalized name
    pub fn get(&self, normalized: &str) -> Option<Governorate> {
        self.entries.get(normalized).copied()
    }

    /// Normalize then look up
    pub fn resolve(&self, raw: &str) -> Option<Governorate> {
        self.get(&normalize_location(raw))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_entries() {
        let table = AliasTable::builtin();
        assert_eq!(table.len(), BUILTIN_ALIASES.len());
        assert_eq!(table.resolve("Le Kef"), Some(Governorate::Kef));
        assert_eq!(table.resolve("el kef"), Some(Governorate::Kef));
        assert_eq!(table.resolve("ARYANAH"), Some(Governorate::Ariana));
        assert_eq!(table.resolve("La Marsa"), Some(Governorate::Tunis));
        assert_eq!(table.resolve("Bab Saadoun"), Some(Governorate::Tunis));
        assert_eq!(table.resolve("Montfleury"), Some(Governorate::Tunis));
    }

    #[test]
    fn region_table_is_narrow() {
        let table = AliasTable::regions();
        assert_eq!(table.len(), 3);
        assert_eq!(table.resolve("El Kef"), Some(Governorate::Kef));
        assert_eq!(table.resolve("Aryanah"), Some(Governorate::Ariana));
        assert_eq!(table.resolve("La Marsa"), None);
        assert_eq!(table.resolve("Many Locations"), None);
    }

    #[test]
    fn keys_are_normalized() {
        let table = AliasTable::builtin();
        assert_eq!(table.get("megrine"), Some(Governorate::BenArous));
        assert_eq!(table.resolve("Megrine"), Some(Governorate::BenArous));
        assert_eq!(table.get("Mégrine"), None);
    }

    #[test]
    fn unknown_name() {
        assert_eq!(AliasTable::builtin().resolve("Paris"), None);
    }

    #[test]
    fn overrides_extend_builtin() {
        let table = AliasTable::with_overrides([("Hammam Sousse", "Sousse"), ("Radès", "ben arous")]);
        assert_eq!(table.resolve("hammam sousse"), Some(Governorate::Sousse));
        assert_eq!(table.resolve("Rades"), Some(Governorate::BenArous));
        assert_eq!(table.resolve("Le Kef"), Some(Governorate::Kef));
        assert_eq!(table.len(), BUILTIN_ALIASES.len() + 2);
    }

    #[test]
    fn override_replaces_builtin() {
        let table = AliasTable::with_overrides([("La Marsa", "Ariana")]);
        assert_eq!(table.resolve("La Marsa"), Some(Governorate::Ariana));
    }

    #[test]
    fn override_with_unknown_target_skipped() {
        let table = AliasTable::with_overrides([("Somewhere", "Atlantis")]);
        assert_eq!(table.resolve("Somewhere"), None);
        assert_eq!(table.len(), BUILTIN_ALIASES.len());
    }
}
