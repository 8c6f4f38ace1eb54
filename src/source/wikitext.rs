//! Minimal wikitext reader for item and trinket pages.
//!
//! Only two structures are extracted:
//! - the infobox template (`{{infobox item | quality = 3 | ... }}`) as key/value pairs
//! - level-2+ headings (`== Effects ==`) with their bullet lists, nesting taken
//!   from the number of leading `*`
//!
//! Inline markup is flattened to plain text: links keep their label, templates
//! keep their last positional argument, `{{dlc|..}}` markers become
//! `(Added in X)` / `(Removed in X)` prefixes, references and HTML tags vanish.

use std::collections::HashMap;

use crate::catalog::normalize::has_dlc_tag;
use crate::record::{Item, ItemKind, Recharge, SectionLine, Sections, Trinket};

/// DLC marker codes used by the wiki's `{{dlc}}` template.
const DLC_CODES: [(&str, &str); 6] = [
    ("a", "Added in Afterbirth"),
    ("a+", "Added in Afterbirth †"),
    ("r", "Added in Repentance"),
    ("na", "Removed in Afterbirth"),
    ("na+", "Removed in Afterbirth †"),
    ("nr", "Removed in Repentance"),
];

#[derive(Debug, Default, Clone, PartialEq)]
pub struct WikiPage {
    /// Infobox parameters, keys lowercased.
    pub infobox: HashMap<String, String>,
    pub sections: Sections,
}

impl WikiPage {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.infobox
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

pub fn parse_page(wikitext: &str) -> WikiPage {
    let mut page = WikiPage::default();
    let mut in_infobox = false;
    let mut current: Option<String> = None;

    for raw in wikitext.lines() {
        let line = raw.trim_end();

        if !in_infobox && line.trim_start().to_lowercase().starts_with("{{infobox") {
            in_infobox = true;
            continue;
        }
        if in_infobox {
            if line.trim() == "}}" {
                in_infobox = false;
            } else if let Some(param) = line.trim_start().strip_prefix('|') {
                if let Some((key, value)) = param.split_once('=') {
                    page.infobox
                        .insert(key.trim().to_lowercase(), clean_inline(value).trim().to_string());
                }
            }
            continue;
        }

        if let Some(title) = heading(line) {
            current = Some(title.to_lowercase());
            continue;
        }

        let Some(section) = current.as_ref() else { continue };
        let stars = line.chars().take_while(|c| *c == '*').count();
        if stars == 0 {
            continue;
        }
        let text = clean_inline(&line[stars..]);
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        page.sections
            .entry(section.clone())
            .or_default()
            .push(SectionLine::new((stars - 1).min(u8::MAX as usize) as u8, text));
    }
    page
}

/// Build an item record from a parsed page.
pub fn item_from_page(name: &str, page: WikiPage) -> Item {
    let recharge = page.field("recharge").map(|r| match r.parse::<u32>() {
        Ok(charges) => Recharge::Charges(charges),
        Err(_) => Recharge::Text(r.to_string()),
    });
    Item {
        name: name.to_string(),
        quote: page.field("quote").map(str::to_string),
        description: page.field("description").map(str::to_string),
        dlc: page.field("dlc").and_then(dlc_name),
        kind: if recharge.is_some() { ItemKind::Active } else { ItemKind::Passive },
        recharge,
        quality: page.field("quality").and_then(|q| q.parse().ok()),
        grid: page.field("alias").map(str::to_string),
        unlock: page.field("unlocked by").map(str::to_string),
        image: page.field("image").map(str::to_string),
        sections: page.sections,
    }
}

pub fn trinket_from_page(name: &str, page: WikiPage) -> Trinket {
    Trinket {
        name: name.to_string(),
        quote: page.field("quote").map(str::to_string),
        description: page.field("description").map(str::to_string),
        dlc: page.field("dlc").and_then(dlc_name),
        unlock: page.field("unlocked by").map(str::to_string),
        image: page.field("image").map(str::to_string),
        sections: page.sections,
    }
}

/// `(Added in Afterbirth †)` to `Afterbirth †`; removals carry no DLC.
fn dlc_name(marker: &str) -> Option<String> {
    if !has_dlc_tag(marker) {
        return Some(marker.to_string());
    }
    let inner = marker.trim().strip_prefix("(Added in ")?;
    inner.split(')').next().map(str::to_string)
}

/// `== Title ==` (any depth >= 2) to `Title`.
fn heading(line: &str) -> Option<String> {
    let trimmed = line.trim();
    let depth = trimmed.chars().take_while(|c| *c == '=').count();
    if depth < 2 || !trimmed.ends_with(&"=".repeat(depth)) || trimmed.len() <= depth * 2 {
        return None;
    }
    let title = trimmed[depth..trimmed.len() - depth].trim();
    (!title.is_empty()).then(|| clean_inline(title))
}

/// Flatten inline wiki markup to plain text.
pub fn clean_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("{{") {
            let (inner, tail) = split_balanced(after, "{{", "}}");
            out.push_str(&expand_template(inner));
            rest = tail;
        } else if let Some(after) = rest.strip_prefix("[[") {
            let (inner, tail) = split_balanced(after, "[[", "]]");
            out.push_str(&expand_link(inner));
            rest = tail;
        } else if rest.starts_with("<ref") {
            rest = skip_reference(rest);
        } else if rest.starts_with('<') {
            rest = rest.find('>').map(|i| &rest[i + 1..]).unwrap_or("");
        } else if let Some(after) = rest.strip_prefix("''") {
            rest = after.trim_start_matches('\'');
        } else {
            let next = match rest.find(['{', '[', '<', '\'']) {
                Some(0) => rest.chars().next().map(char::len_utf8).unwrap_or(1),
                Some(i) => i,
                None => rest.len(),
            };
            out.push_str(&rest[..next]);
            rest = &rest[next..];
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split `s` at the closing delimiter matching an already-consumed opener.
fn split_balanced<'a>(s: &'a str, open: &str, close: &str) -> (&'a str, &'a str) {
    let mut depth = 1;
    let mut i = 0;
    while i < s.len() {
        if s[i..].starts_with(open) {
            depth += 1;
            i += open.len();
        } else if s[i..].starts_with(close) {
            depth -= 1;
            if depth == 0 {
                return (&s[..i], &s[i + close.len()..]);
            }
            i += close.len();
        } else {
            i += s[i..].chars().next().map(char::len_utf8).unwrap_or(1);
        }
    }
    (s, "")
}

fn expand_template(inner: &str) -> String {
    let args = split_top_level(inner);
    let name = args.first().map(|s| s.trim().to_lowercase()).unwrap_or_default();
    if name == "dlc" {
        let code = args.get(1).map(|s| s.trim()).unwrap_or("");
        return DLC_CODES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, label)| format!("({})", label))
            .unwrap_or_default();
    }
    args.iter()
        .skip(1)
        .rev()
        .find(|arg| !arg.contains('='))
        .map(|arg| clean_inline(arg))
        .unwrap_or_default()
}

fn expand_link(inner: &str) -> String {
    let lower = inner.to_lowercase();
    if lower.starts_with("file:") || lower.starts_with("image:") || lower.starts_with("category:") {
        return String::new();
    }
    let label = inner.rsplit('|').next().unwrap_or(inner);
    clean_inline(label)
}

/// Split template arguments on `|` outside nested templates and links.
fn split_top_level(inner: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let (mut depth, mut start) = (0i32, 0);
    let bytes = inner.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'{' | b'[' if bytes.get(i + 1) == Some(&bytes[i]) => {
                depth += 1;
                i += 1;
            }
            b'}' | b']' if bytes.get(i + 1) == Some(&bytes[i]) => {
                depth -= 1;
                i += 1;
            }
            b'|' if depth == 0 => {
                parts.push(&inner[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    parts.push(&inner[start..]);
    parts
}

fn skip_reference(s: &str) -> &str {
    let Some(open_end) = s.find('>') else { return "" };
    if s[..open_end].ends_with('/') {
        return &s[open_end + 1..];
    }
    match s.find("</ref>") {
        Some(i) => &s[i + "</ref>".len()..],
        None => "",
    }
}
