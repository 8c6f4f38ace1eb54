//! Helpers that keep user-supplied text on a single log line.

use std::fmt::Write;

/// Longest query preview written to the log, in characters.
const MAX_PREVIEW: usize = 120;
/// Candidate names shown before the list is summarised.
const MAX_LISTED: usize = 5;

/// Escape control characters in a chat query and cap its length.
///
/// Newlines, carriage returns and tabs become `\n`, `\r`, `\t`; other control
/// characters become `\xNN`. Anything past [`MAX_PREVIEW`] characters is
/// replaced by a single ellipsis.
pub fn escape_log(s: &str) -> String {
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 4);
    for (count, ch) in s.chars().enumerate() {
        if count == MAX_PREVIEW {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

/// Compact rendering of a candidate list, e.g. `["A Pony", "Abaddon"] (+3 more)`.
pub fn name_list<S: AsRef<str>>(names: &[S]) -> String {
    let shown: Vec<String> = names
        .iter()
        .take(MAX_LISTED)
        .map(|n| format!("\"{}\"", escape_log(n.as_ref())))
        .collect();
    let mut out = format!("[{}]", shown.join(", "));
    if names.len() > MAX_LISTED {
        let _ = write!(out, " (+{} more)", names.len() - MAX_LISTED);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_control_characters() {
        assert_eq!(escape_log("Mom's\nKnife\t\u{1}"), "Mom's\\nKnife\\t\\x01");
    }

    #[test]
    fn truncates_long_queries() {
        let long = "a".repeat(MAX_PREVIEW + 10);
        let esc = escape_log(&long);
        assert_eq!(esc.chars().count(), MAX_PREVIEW + 1);
        assert!(esc.ends_with('…'));
    }

    #[test]
    fn summarises_long_candidate_lists() {
        let names = ["a", "b", "c", "d", "e", "f", "g"];
        assert_eq!(name_list(&names), r#"["a", "b", "c", "d", "e"] (+2 more)"#);
        assert_eq!(name_list::<&str>(&[]), "[]");
    }
}
