//! # Catalogs
//!
//! A catalog is the ordered list of names known for one entity type. Catalogs are
//! fetched per query from a [`crate::source::DataSource`], cleaned with
//! [`normalize::normalize`] and filtered through the configured exclusion policy
//! before the [`matcher`] ever sees them.
//!
//! Entity types are disjoint: no name collision across types is assumed. When two
//! types happen to share a name, the resolver's priority order decides.

pub mod matcher;
pub mod normalize;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ResolveError;

pub use matcher::{match_name, similarity_ratio, MatchResult};
pub use normalize::normalize;

/// Category of game object with its own catalog and record schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityType {
    Item,
    Trinket,
    Card,
    Rune,
    SoulStone,
    Pill,
    Curse,
    Transformation,
    Challenge,
    Character,
    Achievement,
    Pickup,
}

impl EntityType {
    pub const ALL: [EntityType; 12] = [
        EntityType::Item,
        EntityType::Trinket,
        EntityType::Card,
        EntityType::Rune,
        EntityType::SoulStone,
        EntityType::Pill,
        EntityType::Curse,
        EntityType::Transformation,
        EntityType::Challenge,
        EntityType::Character,
        EntityType::Achievement,
        EntityType::Pickup,
    ];

    /// Plural configuration key, also the document store collection name.
    pub fn key(self) -> &'static str {
        match self {
            EntityType::Item => "items",
            EntityType::Trinket => "trinkets",
            EntityType::Card => "cards",
            EntityType::Rune => "runes",
            EntityType::SoulStone => "soulstones",
            EntityType::Pill => "pills",
            EntityType::Curse => "curses",
            EntityType::Transformation => "transformations",
            EntityType::Challenge => "challenges",
            EntityType::Character => "characters",
            EntityType::Achievement => "achievements",
            EntityType::Pickup => "pickups",
        }
    }

    /// Name used in callback keys and replies.
    pub fn label(self) -> &'static str {
        match self {
            EntityType::Item => "Item",
            EntityType::Trinket => "Trinket",
            EntityType::Card => "Card",
            EntityType::Rune => "Rune",
            EntityType::SoulStone => "SoulStone",
            EntityType::Pill => "Pill",
            EntityType::Curse => "Curse",
            EntityType::Transformation => "Transformation",
            EntityType::Challenge => "Challenge",
            EntityType::Character => "Character",
            EntityType::Achievement => "Achievement",
            EntityType::Pickup => "Pickup",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EntityType {
    type Err = ResolveError;

    /// Accepts the label (`Item`), the plural key (`items`) and spaced forms
    /// (`soul stones`), case-insensitively.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let folded: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        EntityType::ALL
            .into_iter()
            .find(|kind| {
                let label = kind.label().to_lowercase();
                folded == label || folded == kind.key()
            })
            .ok_or_else(|| ResolveError::InvalidEntityType(raw.to_string()))
    }
}

/// Normalized, exclusion-filtered names for one entity type.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub kind: EntityType,
    pub names: Vec<String>,
}

impl Catalog {
    /// Build a catalog from raw source names.
    ///
    /// Every name is normalized; empty results and names listed in `excluded`
    /// (compared after normalization) are dropped. Source order is kept.
    pub fn from_raw<I, S>(kind: EntityType, raw: I, excluded: &[String]) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = raw
            .into_iter()
            .map(|name| normalize(name.as_ref()))
            .filter(|name| !name.is_empty())
            .filter(|name| !excluded.iter().any(|ex| normalize(ex) == *name))
            .collect();
        Self { kind, names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Run the similarity matcher against this catalog.
    pub fn find(&self, query: &str, exact: bool, threshold: f64) -> MatchResult {
        match_name(query, &self.names, exact, threshold)
    }
}
