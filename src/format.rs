//! Rendering of element records into chat text.
//!
//! The formatter is a pure consumer of resolver output: it dispatches on the
//! record's entity type to a fixed-order template and never performs lookups.
//! Fields are separated by a blank line; names are wrapped in `*` (emphasis) and
//! flavor quotes in `_` (underline), the markdown dialect chat transports accept.
//!
//! Emoji decoration (heart types, stat keys) comes from a preloaded [`Emojis`]
//! table handed in at construction.

use std::collections::HashMap;

use crate::catalog::matcher::title_case;
use crate::catalog::{normalize, EntityType};
use crate::record::{
    Achievement, Attribute, AttributeValue, Challenge, Character, Consumable, Curse,
    ElementRecord, Item, ItemKind, Pill, Recharge, SectionLine, Transformation, Trinket,
};

const FIELD_SEPARATOR: &str = "\n\n";
const INDENT: &str = "\t\t\t\t";
const BATTERY: &str = "\u{1F50B}";
const STAR: &str = "\u{2B50}";
const EMPTY_STAR: &str = "\u{26AB}";
const MAX_QUALITY: u8 = 4;

/// DLC names shown as-is; anything else is an Afterbirth expansion suffix.
const STANDALONE_DLC: [&str; 2] = ["Afterbirth", "Repentance"];

/// Display key (title case) to emoji.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Emojis(HashMap<String, String>);

impl Emojis {
    pub fn new(table: HashMap<String, String>) -> Self {
        Self(table)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .or_else(|| self.0.get(&title_case(key)))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Record-to-text renderer.
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    emojis: Emojis,
}

impl Formatter {
    pub fn new(emojis: Emojis) -> Self {
        Self { emojis }
    }

    /// Render `record` as an entity of type `kind`.
    ///
    /// Returns `None` when the record is not of that type; callers treat this
    /// as "unsupported" rather than an error.
    pub fn render_as(&self, record: &ElementRecord, kind: EntityType) -> Option<String> {
        (record.kind() == kind).then(|| self.render(record))
    }

    /// Render a record with the template for its own entity type.
    pub fn render(&self, record: &ElementRecord) -> String {
        match record {
            ElementRecord::Item(item) => self.item(item),
            ElementRecord::Trinket(trinket) => self.trinket(trinket),
            ElementRecord::Card(c)
            | ElementRecord::Rune(c)
            | ElementRecord::SoulStone(c)
            | ElementRecord::Pickup(c) => self.consumable(c),
            ElementRecord::Pill(pill) => self.pill(pill),
            ElementRecord::Curse(curse) => self.curse(curse),
            ElementRecord::Transformation(t) => self.transformation(t),
            ElementRecord::Challenge(challenge) => self.challenge(challenge),
            ElementRecord::Character(character) => self.character(character),
            ElementRecord::Achievement(achievement) => self.achievement(achievement),
        }
    }

    fn item(&self, item: &Item) -> String {
        let mut fields = vec![heading(&item.name)];
        push_quote(&mut fields, item.quote.as_deref());
        push_plain(&mut fields, item.description.as_deref());
        if let Some(dlc) = item.dlc.as_deref() {
            fields.push(format!("Added in *{}*", dlc_label(dlc)));
        }
        fields.push(match item.kind {
            ItemKind::Active => "Active item.".to_string(),
            ItemKind::Passive => "Passive item.".to_string(),
        });
        if let Some(recharge) = &item.recharge {
            let value = match recharge {
                Recharge::Charges(n) => BATTERY.repeat(*n as usize),
                Recharge::Text(text) => capitalize(&normalize(text)),
            };
            fields.push(format!("*Recharge time*\n{}", value));
        }
        if let Some(quality) = item.quality {
            fields.push(format!("*Quality*\n{}", quality_stars(quality)));
        }
        if let Some(grid) = item.grid.as_deref() {
            fields.push(format!("*Grid position*\n{}", title_case(grid)));
        }
        if let Some(unlock) = item.unlock.as_deref() {
            fields.push(format!("*Unlock Method*\n{}", capitalize(unlock)));
        }
        fields.join(FIELD_SEPARATOR)
    }

    fn trinket(&self, trinket: &Trinket) -> String {
        let mut fields = vec![heading(&trinket.name)];
        push_quote(&mut fields, trinket.quote.as_deref());
        push_plain(&mut fields, trinket.description.as_deref());
        if let Some(dlc) = trinket.dlc.as_deref() {
            fields.push(format!("Added in *{}*", dlc_label(dlc)));
        }
        if let Some(unlock) = trinket.unlock.as_deref() {
            fields.push(format!("*Unlock Method*\n{}", capitalize(unlock)));
        }
        fields.join(FIELD_SEPARATOR)
    }

    fn consumable(&self, c: &Consumable) -> String {
        let mut fields = vec![heading(&c.name)];
        push_quote(&mut fields, c.message.as_deref());
        if let Some(deck) = c.deck.as_deref() {
            fields.push(format!("*Deck*: {}", deck));
        }
        if let Some(unlock) = c.unlock.as_deref() {
            fields.push(format!("*Unlock Method*\n{}", capitalize(unlock)));
        }
        push_plain(&mut fields, c.effect.as_deref());
        fields.join(FIELD_SEPARATOR)
    }

    fn pill(&self, pill: &Pill) -> String {
        let mut fields = vec![heading(&pill.name), format!("*Effect*\n{}", pill.effect)];
        if let Some(horse) = pill.horse_effect.as_deref() {
            fields.push(format!("*Horse effect*\n{}", horse));
        }
        fields.join(FIELD_SEPARATOR)
    }

    fn curse(&self, curse: &Curse) -> String {
        [heading(&curse.name), curse.description.clone()].join(FIELD_SEPARATOR)
    }

    fn transformation(&self, t: &Transformation) -> String {
        let mut fields = vec![heading(&t.name)];
        push_plain(&mut fields, t.description.as_deref());
        if let Some(condition) = t.condition.as_deref() {
            fields.push(format!("*Requirements*\n{}", condition));
        }
        if !t.effects.is_empty() {
            let lines: Vec<String> = t
                .effects
                .iter()
                .map(|attr| {
                    let key = self.emojis.get(&attr.key).map(str::to_string).unwrap_or_else(|| title_case(&attr.key));
                    format!("• {}: {}", key, plain_value(&attr.value))
                })
                .collect();
            fields.push(format!("*Effects*\n{}", lines.join("\n")));
        }
        if !t.items.is_empty() {
            fields.push(bullet_list("Possible Items", &t.items));
        }
        fields.join(FIELD_SEPARATOR)
    }

    fn challenge(&self, challenge: &Challenge) -> String {
        let mut fields = vec![heading(&challenge.name)];
        if !challenge.character.is_empty() {
            fields.push(self.attribute_block("Character", &challenge.character));
        }
        if !challenge.conditions.is_empty() {
            fields.push(self.attribute_block("Conditions", &challenge.conditions));
        }
        if let Some(goal) = challenge.goal.as_deref() {
            fields.push(format!("*Goal*: {}.", goal));
        }
        if let Some(unlock) = challenge.unlock.as_deref().filter(|u| *u != "Default") {
            fields.push(format!("*Unlock method*: {}.", unlock));
        }
        if let Some(prize) = challenge.prize.as_deref() {
            fields.push(format!("*Prize*: {}.", prize));
        }
        fields.join(FIELD_SEPARATOR)
    }

    fn character(&self, character: &Character) -> String {
        let mut fields = vec![heading(&character.name)];
        if !character.health.is_empty() {
            fields.push(self.health_block(&character.health));
        }
        if let Some(unlock) = character.unlock.as_deref() {
            fields.push(format!("*Unlock method*: {}", unlock));
        }
        if !character.pickups.is_empty() {
            fields.push(self.attribute_block("Pickups", &character.pickups));
        }
        if !character.items.is_empty() {
            fields.push(bullet_list("Items", &character.items));
        }
        if !character.conditions.is_empty() {
            fields.push(bullet_list("Conditions", &character.conditions));
        }
        fields.join(FIELD_SEPARATOR)
    }

    fn achievement(&self, a: &Achievement) -> String {
        let mut fields = vec![format!("*{}. {}*", a.number, a.name)];
        push_quote(&mut fields, a.description.as_deref());
        if let Some(unlock) = a.unlock.as_deref() {
            fields.push(format!("{}.", unlock.trim_end_matches('.')));
        }
        fields.join(FIELD_SEPARATOR)
    }

    /// Hearts are drawn as repeated emoji when the table knows the heart type.
    fn health_block(&self, health: &[Attribute]) -> String {
        let mut lines = vec!["*Health*:".to_string()];
        for attr in health {
            let amount = match attr.value {
                AttributeValue::Count(n) => n as usize,
                _ => 1,
            };
            match self.emojis.get(&attr.key) {
                Some(emoji) => lines.push(format!("• {}", emoji.repeat(amount))),
                None => lines.push(format!("• {}: {}", title_case(&attr.key), amount)),
            }
        }
        lines.join("\n")
    }

    fn attribute_block(&self, title: &str, attrs: &[Attribute]) -> String {
        let mut lines = vec![format!("*{}*:", title)];
        for attr in attrs {
            let key = self
                .emojis
                .get(&attr.key)
                .map(str::to_string)
                .unwrap_or_else(|| title_case(&attr.key));
            let value = match &attr.value {
                AttributeValue::Text(text) => self
                    .emojis
                    .get(text)
                    .map(str::to_string)
                    .unwrap_or_else(|| text.clone()),
                AttributeValue::Count(n) => n.to_string(),
                AttributeValue::List(list) => list
                    .iter()
                    .map(|entry| format!("\n{}• {}", INDENT, entry))
                    .collect(),
            };
            lines.push(format!("• {}: {}", key, value));
        }
        lines.join("\n")
    }
}

/// Render one categorized section under a bold title.
pub fn render_section(title: &str, lines: &[SectionLine]) -> String {
    let mut out = vec![format!("*{}*:", title)];
    for line in lines {
        out.push(format!(
            "{}• {}",
            INDENT.repeat(line.level() as usize),
            line.text().trim_start()
        ));
    }
    out.join(FIELD_SEPARATOR)
}

/// Bold uppercase title; stored names may still carry a leading space or DLC tag.
fn heading(name: &str) -> String {
    format!("*{}*", normalize(name).to_uppercase())
}

fn push_quote(fields: &mut Vec<String>, quote: Option<&str>) {
    if let Some(q) = quote.map(str::trim).filter(|q| !q.is_empty()) {
        fields.push(format!("_{}_", q));
    }
}

fn push_plain(fields: &mut Vec<String>, text: Option<&str>) {
    if let Some(t) = text.map(str::trim).filter(|t| !t.is_empty()) {
        fields.push(t.to_string());
    }
}

fn bullet_list(title: &str, entries: &[String]) -> String {
    let mut lines = vec![format!("*{}*:", title)];
    lines.extend(entries.iter().map(|e| format!("• {}", e)));
    lines.join("\n")
}

fn plain_value(value: &AttributeValue) -> String {
    match value {
        AttributeValue::Count(n) => n.to_string(),
        AttributeValue::Text(text) => text.clone(),
        AttributeValue::List(list) => list.join(", "),
    }
}

fn dlc_label(dlc: &str) -> String {
    if STANDALONE_DLC.contains(&dlc) || dlc.starts_with("Afterbirth") {
        dlc.to_string()
    } else {
        format!("Afterbirth {}", dlc)
    }
}

fn quality_stars(quality: u8) -> String {
    let filled = quality.min(MAX_QUALITY) as usize;
    STAR.repeat(filled) + &EMPTY_STAR.repeat(MAX_QUALITY as usize - filled)
}

/// Uppercase the first character, leave the rest untouched.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
