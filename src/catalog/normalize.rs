//! Cleaning of catalog names before comparison.
//!
//! Scraped names carry two kinds of presentation artifacts: a leading space left
//! over from the source markup, and inline DLC annotations such as
//! `(Added in Afterbirth †)` or `(Removed in Repentance)` glued in front of the
//! name. Neither may influence similarity scoring.

const DLC_TAG_PREFIXES: [&str; 2] = ["Added in ", "Removed in "];

/// Strip leading whitespace and any leading DLC annotation tags.
///
/// Pure and idempotent: the output never starts with whitespace or with a
/// `(Added in …)` / `(Removed in …)` segment, so a second pass is a no-op.
pub fn normalize(raw: &str) -> String {
    let mut rest = raw.trim_start();
    while let Some(after) = strip_dlc_tag(rest) {
        rest = after.trim_start();
    }
    rest.to_string()
}

/// Return the text after a leading DLC tag, if `s` starts with one.
fn strip_dlc_tag(s: &str) -> Option<&str> {
    let inner = s.strip_prefix('(')?;
    if !DLC_TAG_PREFIXES.iter().any(|p| inner.starts_with(p)) {
        return None;
    }
    let close = inner.find(')')?;
    Some(&inner[close + 1..])
}

/// True when `text` starts with a DLC annotation tag.
pub fn has_dlc_tag(text: &str) -> bool {
    strip_dlc_tag(text.trim_start()).is_some()
}
