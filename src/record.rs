//! Element records: the full data for one resolved entity.
//!
//! Each entity type has its own record shape; [`ElementRecord`] is the tagged
//! union over them. Records are fetched only once a name is confirmed, rendered
//! once and dropped.
//!
//! Categorized lists (effects, notes, synergies, ...) are stored as
//! [`Sections`]: section key (lowercase) to indented lines.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::EntityType;

/// One line of a categorized list: nesting level and text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionLine(pub u8, pub String);

impl SectionLine {
    pub fn new(level: u8, text: impl Into<String>) -> Self {
        Self(level, text.into())
    }

    pub fn level(&self) -> u8 {
        self.0
    }

    pub fn text(&self) -> &str {
        &self.1
    }
}

/// Section key (lowercase) to its lines.
pub type Sections = BTreeMap<String, Vec<SectionLine>>;

/// Active items have a charge bar; passives do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Active,
    #[default]
    Passive,
}

/// Recharge time: a number of charges or a free-form description
/// (e.g. "timed", "special").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Recharge {
    Charges(u32),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dlc: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: ItemKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recharge: Option<Recharge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlock: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub sections: Sections,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trinket {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dlc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlock: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub sections: Sections,
}

/// Shared shape of cards, runes, soul stones and pickups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consumable {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlock: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
    /// Card deck (tarot, playing cards, ...); cards only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub sections: Sections,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pill {
    pub name: String,
    pub effect: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horse_effect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub sections: Sections,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curse {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub sections: Sections,
}

/// Key/value pair kept in source order (stat changes, starting pickups, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub key: String,
    pub value: AttributeValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Count(u32),
    Text(String),
    List(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transformation {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default)]
    pub effects: Vec<Attribute>,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub sections: Sections,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub name: String,
    #[serde(default)]
    pub character: Vec<Attribute>,
    #[serde(default)]
    pub conditions: Vec<Attribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlock: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prize: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub sections: Sections,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    /// Heart type to amount, in display order.
    #[serde(default)]
    pub health: Vec<Attribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlock: Option<String>,
    #[serde(default)]
    pub pickups: Vec<Attribute>,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub sections: Sections,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub number: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlock: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Full structured data for one resolved entity, keyed by entity type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ElementRecord {
    Item(Item),
    Trinket(Trinket),
    Card(Consumable),
    Rune(Consumable),
    SoulStone(Consumable),
    Pickup(Consumable),
    Pill(Pill),
    Curse(Curse),
    Transformation(Transformation),
    Challenge(Challenge),
    Character(Character),
    Achievement(Achievement),
}

impl ElementRecord {
    pub fn kind(&self) -> EntityType {
        match self {
            ElementRecord::Item(_) => EntityType::Item,
            ElementRecord::Trinket(_) => EntityType::Trinket,
            ElementRecord::Card(_) => EntityType::Card,
            ElementRecord::Rune(_) => EntityType::Rune,
            ElementRecord::SoulStone(_) => EntityType::SoulStone,
            ElementRecord::Pickup(_) => EntityType::Pickup,
            ElementRecord::Pill(_) => EntityType::Pill,
            ElementRecord::Curse(_) => EntityType::Curse,
            ElementRecord::Transformation(_) => EntityType::Transformation,
            ElementRecord::Challenge(_) => EntityType::Challenge,
            ElementRecord::Character(_) => EntityType::Character,
            ElementRecord::Achievement(_) => EntityType::Achievement,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ElementRecord::Item(r) => &r.name,
            ElementRecord::Trinket(r) => &r.name,
            ElementRecord::Card(r)
            | ElementRecord::Rune(r)
            | ElementRecord::SoulStone(r)
            | ElementRecord::Pickup(r) => &r.name,
            ElementRecord::Pill(r) => &r.name,
            ElementRecord::Curse(r) => &r.name,
            ElementRecord::Transformation(r) => &r.name,
            ElementRecord::Challenge(r) => &r.name,
            ElementRecord::Character(r) => &r.name,
            ElementRecord::Achievement(r) => &r.name,
        }
    }

    pub fn image(&self) -> Option<&str> {
        match self {
            ElementRecord::Item(r) => r.image.as_deref(),
            ElementRecord::Trinket(r) => r.image.as_deref(),
            ElementRecord::Card(r)
            | ElementRecord::Rune(r)
            | ElementRecord::SoulStone(r)
            | ElementRecord::Pickup(r) => r.image.as_deref(),
            ElementRecord::Pill(r) => r.image.as_deref(),
            ElementRecord::Curse(r) => r.image.as_deref(),
            ElementRecord::Transformation(r) => r.image.as_deref(),
            ElementRecord::Challenge(r) => r.image.as_deref(),
            ElementRecord::Character(r) => r.image.as_deref(),
            ElementRecord::Achievement(r) => r.image.as_deref(),
        }
    }

    /// Categorized lists; achievements carry none.
    pub fn sections(&self) -> Option<&Sections> {
        match self {
            ElementRecord::Item(r) => Some(&r.sections),
            ElementRecord::Trinket(r) => Some(&r.sections),
            ElementRecord::Card(r)
            | ElementRecord::Rune(r)
            | ElementRecord::SoulStone(r)
            | ElementRecord::Pickup(r) => Some(&r.sections),
            ElementRecord::Pill(r) => Some(&r.sections),
            ElementRecord::Curse(r) => Some(&r.sections),
            ElementRecord::Transformation(r) => Some(&r.sections),
            ElementRecord::Challenge(r) => Some(&r.sections),
            ElementRecord::Character(r) => Some(&r.sections),
            ElementRecord::Achievement(_) => None,
        }
    }

    /// Lines of section `key` (lowercase), if present and non-empty.
    pub fn section(&self, key: &str) -> Option<&[SectionLine]> {
        self.sections()?
            .get(key)
            .map(Vec::as_slice)
            .filter(|lines| !lines.is_empty())
    }

    /// Deserialize a bare document (no `kind` tag) as a record of `kind`.
    pub fn from_document(kind: EntityType, doc: serde_json::Value) -> serde_json::Result<Self> {
        use serde_json::from_value;
        Ok(match kind {
            EntityType::Item => ElementRecord::Item(from_value(doc)?),
            EntityType::Trinket => ElementRecord::Trinket(from_value(doc)?),
            EntityType::Card => ElementRecord::Card(from_value(doc)?),
            EntityType::Rune => ElementRecord::Rune(from_value(doc)?),
            EntityType::SoulStone => ElementRecord::SoulStone(from_value(doc)?),
            EntityType::Pickup => ElementRecord::Pickup(from_value(doc)?),
            EntityType::Pill => ElementRecord::Pill(from_value(doc)?),
            EntityType::Curse => ElementRecord::Curse(from_value(doc)?),
            EntityType::Transformation => ElementRecord::Transformation(from_value(doc)?),
            EntityType::Challenge => ElementRecord::Challenge(from_value(doc)?),
            EntityType::Character => ElementRecord::Character(from_value(doc)?),
            EntityType::Achievement => ElementRecord::Achievement(from_value(doc)?),
        })
    }
}
