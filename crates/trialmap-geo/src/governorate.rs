//! The 24 governorates of Tunisia

use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::normalize::normalize_location;

/// One of Tunisia's 24 first-level administrative regions.
///
/// Declaration order is the canonical listing order, so ordered maps keyed
/// by `Governorate` iterate in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Governorate {
    Tunis,
    Sousse,
    Sfax,
    Kairouan,
    Gabes,
    Monastir,
    Bizerte,
    Ariana,
    Beja,
    Jendouba,
    Kasserine,
    Kebili,
    Mahdia,
    Manouba,
    Medenine,
    Nabeul,
    SidiBouzid,
    Siliana,
    Tataouine,
    Tozeur,
    Zaghouan,
    Gafsa,
    Kef,
    BenArous,
}

impl Governorate {
    pub const COUNT: usize = 24;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Tunis,
        Self::Sousse,
        Self::Sfax,
        Self::Kairouan,
        Self::Gabes,
        Self::Monastir,
        Self::Bizerte,
        Self::Ariana,
        Self::Beja,
        Self::Jendouba,
        Self::Kasserine,
        Self::Kebili,
        Self::Mahdia,
        Self::Manouba,
        Self::Medenine,
        Self::Nabeul,
        Self::SidiBouzid,
        Self::Siliana,
        Self::Tataouine,
        Self::Tozeur,
        Self::Zaghouan,
        Self::Gafsa,
        Self::Kef,
        Self::BenArous,
    ];

    /// Canonical spelling
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tunis => "Tunis",
            Self::Sousse => "Sousse",
            Self::Sfax => "Sfax",
            Self::Kairouan => "Kairouan",
            Self::Gabes => "Gabes",
            Self::Monastir => "Monastir",
            Self::Bizerte => "Bizerte",
            Self::Ariana => "Ariana",
            Self::Beja => "Beja",
            Self::Jendouba => "Jendouba",
            Self::Kasserine => "Kasserine",
            Self::Kebili => "Kebili",
            Self::Mahdia => "Mahdia",
            Self::Manouba => "Manouba",
            Self::Medenine => "Medenine",
            Self::Nabeul => "Nabeul",
            Self::SidiBouzid => "Sidi Bouzid",
            Self::Siliana => "Siliana",
            Self::Tataouine => "Tataouine",
            Self::Tozeur => "Tozeur",
            Self::Zaghouan => "Zaghouan",
            Self::Gafsa => "Gafsa",
            Self::Kef => "Kef",
            Self::BenArous => "Ben Arous",
        }
    }

    /// Position in the canonical list
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Canonical names in listing order
pub fn governorate_names() -> [&'static str; Governorate::COUNT] {
    Governorate::ALL.map(Governorate::name)
}

impl std::fmt::Display for Governorate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Governorate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Name that is not one of the 24 governorates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGovernorate(pub String);

impl std::fmt::Display for UnknownGovernorate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown governorate: {:?}", self.0)
    }
}

impl std::error::Error for UnknownGovernorate {}

impl FromStr for Governorate {
    type Err = UnknownGovernorate;

    /// Canonical name, ignoring case, accents and surrounding whitespace
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_location(s);
        Self::ALL
            .into_iter()
            .find(|g| normalize_location(g.name()) == wanted)
            .ok_or_else(|| UnknownGovernorate(s.to_string()))
    }
}

/// Small set of governorates, iterated in canonical order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GovernorateSet(u32);

impl GovernorateSet {
    pub const fn new() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, g: Governorate) {
        self.0 |= 1 << g.index();
    }

    pub const fn contains(self, g: Governorate) -> bool {
        self.0 & (1 << g.index()) != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = Governorate> {
        Governorate::ALL.into_iter().filter(move |g| self.contains(*g))
    }
}

impl FromIterator<Governorate> for GovernorateSet {
    fn from_iter<I: IntoIterator<Item = Governorate>>(iter: I) -> Self {
        let mut set = Self::new();
        for g in iter {
            set.insert(g);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_four_distinct_names() {
        let names = governorate_names();
        assert_eq!(names.len(), 24);
        let mut sorted = names.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 24);
    }

    #[test]
    fn canonical_order() {
        let names = governorate_names();
        assert_eq!(names[0], "Tunis");
        assert_eq!(names[1], "Sousse");
        assert_eq!(names[16], "Sidi Bouzid");
        assert_eq!(names[23], "Ben Arous");
    }

    #[test]
    fn index_matches_position() {
        for (i, g) in Governorate::ALL.into_iter().enumerate() {
            assert_eq!(g.index(), i);
        }
    }

    #[test]
    fn parse_ignores_case_and_accents() {
        assert_eq!("sidi bouzid".parse(), Ok(Governorate::SidiBouzid));
        assert_eq!(" BEN AROUS ".parse(), Ok(Governorate::BenArous));
        assert_eq!("Gabès".parse(), Ok(Governorate::Gabes));
        assert_eq!("Béja".parse(), Ok(Governorate::Beja));
    }

    #[test]
    fn parse_unknown() {
        let err = "Paris".parse::<Governorate>().unwrap_err();
        assert_eq!(err, UnknownGovernorate("Paris".to_string()));
        assert!(err.to_string().contains("Paris"));
    }

    #[test]
    fn serializes_as_name() {
        let json = serde_json::to_string(&Governorate::SidiBouzid).unwrap();
        assert_eq!(json, "\"Sidi Bouzid\"");
    }

    #[test]
    fn set_iterates_in_canonical_order() {
        let set: GovernorateSet = [Governorate::BenArous, Governorate::Tunis, Governorate::Kef]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 3);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Governorate::Tunis, Governorate::Kef, Governorate::BenArous]
        );
    }

    #[test]
    fn set_insert_is_idempotent() {
        let mut set = GovernorateSet::new();
        assert!(set.is_empty());
        set.insert(Governorate::Sfax);
        set.insert(Governorate::Sfax);
        assert_eq!(set.len(), 1);
        assert!(set.contains(Governorate::Sfax));
        assert!(!set.contains(Governorate::Tunis));
    }
}
