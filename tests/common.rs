//! Test utilities & fixtures.
//! Writes a small document store into a temp dir; every entity type gets a
//! collection so resolution across the full priority list never hits a missing file.

use std::path::Path;

use isaacbot::bot::Bot;
use isaacbot::catalog::EntityType;
use isaacbot::config::Config;
use isaacbot::format::Formatter;
use isaacbot::resolver::Resolver;
use isaacbot::source::{DocumentStore, Sources};
use serde_json::{json, Value};

fn collections() -> Vec<(EntityType, Value)> {
    vec![
        (
            EntityType::Item,
            json!([
                {
                    "name": "A Pony",
                    "quote": "Flight + flight speed",
                    "type": "active",
                    "recharge": 2,
                    "quality": 1,
                    "grid": "item room pool",
                    "image": "https://img.example/pony.png",
                    "sections": { "effect": [[0, "Upon use, grants flight."], [1, "Lasts for the current room."]] }
                },
                {
                    "name": "A Pound of Flesh",
                    "quote": "Blood money",
                    "dlc": "†",
                    "quality": 1,
                    "sections": {
                        "effects": [[0, "Shop items cost hearts instead of coins."]],
                        "notes": [[0, "Devil deals cost coins."]]
                    }
                },
                { "name": "Abaddon", "quote": "Evil + fear shot", "quality": 3 },
                { "name": " The Sad Onion", "quote": "Tears up", "quality": 3,
                  "sections": { "effects": [[0, "+0.7 Tears."]] } },
                { "name": "Mom's Knife", "quote": "Stab stab stab", "quality": 4 },
                { "name": "(Added in Afterbirth †)Lil Spewer", "quote": "Puke shot", "quality": 1,
                  "sections": { "effect": [[0, "Isaac shoots a creep-leaving puke shot."]],
                                "synergies": [[0, "Brimstone: puke lasers."]] } },
                { "name": "Tonsil", "quote": "Should never show up as an item" },
                { "name": "Options?", "quote": "More options" },
                { "name": "Dead Eye", "quote": "Accuracy brings power!", "quality": 2 }
            ]),
        ),
        (
            EntityType::Trinket,
            json!([
                { "name": "Tonsil", "quote": "Hawk tuah", "dlc": "Repentance" },
                { "name": "Lil Larva", "quote": "Touch of sin" }
            ]),
        ),
        (
            EntityType::Card,
            json!([
                { "name": "0 - The Fool", "message": "Where journey begins", "effect": "Teleports Isaac to the first room." },
                { "name": "Joker", "message": "???", "effect": "Teleports Isaac to the Devil Room." }
            ]),
        ),
        (
            EntityType::Rune,
            json!([{ "name": "Hagalaz", "message": "Destruction", "effect": "Destroys all rocks." }]),
        ),
        (
            EntityType::SoulStone,
            json!([{ "name": "Soul of Isaac", "message": "Reroll... or not", "effect": "Items cycle." }]),
        ),
        (
            EntityType::Pill,
            json!([{ "name": "Bad Trip", "effect": "Deals a full heart of damage.", "horse_effect": "Deals two hearts." }]),
        ),
        (
            EntityType::Curse,
            json!([
                { "name": "Curse of Darkness", "description": "Floors are dark." },
                { "name": "Curse of the Lost", "description": "The map is hidden." }
            ]),
        ),
        (
            EntityType::Transformation,
            json!([{ "name": "Guppy", "condition": "Three Guppy items", "effects": [{ "key": "flight", "value": "Yes" }] }]),
        ),
        (EntityType::Challenge, json!([{ "name": "Pitch Black", "goal": "Mom's Heart" }])),
        (EntityType::Character, json!([{ "name": "Magdalene", "unlock": "Have 7 red heart containers" }])),
        (
            EntityType::Achievement,
            json!([{ "number": 1, "name": "Magdalene", "description": "You unlocked Magdalene", "unlock": "Have 7 or more red heart containers at one time" }]),
        ),
        (EntityType::Pickup, json!([{ "name": "Penny", "effect": "One coin." }])),
    ]
}

/// Populate `dir` with the fixture collections plus an emoji table.
pub fn write_fixture(dir: &Path) {
    for (kind, docs) in collections() {
        std::fs::write(dir.join(format!("{}.json", kind.key())), docs.to_string()).unwrap();
    }
    std::fs::write(dir.join("emojis.json"), r#"{"Red Heart":"❤️","flight":"🕊"}"#).unwrap();
}

/// Temp data dir and a config pointing at it (wiki off).
pub fn fixture() -> (tempfile::TempDir, Config) {
    let tmp = tempfile::tempdir().expect("tempdir");
    write_fixture(tmp.path());
    let mut config = Config::default();
    config.source.data_dir = tmp.path().display().to_string();
    config.wiki.enabled = false;
    (tmp, config)
}

#[allow(dead_code)]
pub async fn resolver(config: &Config) -> Resolver<Sources> {
    let sources = Sources::from_config(config).unwrap();
    let emojis = sources.documents().emojis().await.unwrap();
    Resolver::new(sources, Formatter::new(emojis), &config.resolver).unwrap()
}

#[allow(dead_code)]
pub async fn bot(config: &Config) -> Bot<Sources> {
    Bot::new(resolver(config).await, config.bot.clone())
}

#[allow(dead_code)]
pub fn store(dir: &Path) -> DocumentStore {
    DocumentStore::new(dir, std::time::Duration::from_secs(5))
}
