//! Similarity matching of a free-text query against one catalog.
//!
//! ## Algorithm
//! 1. The candidate form is the query itself in exact mode, or its title-cased
//!    form otherwise.
//! 2. A verbatim hit short-circuits to [`MatchResult::Found`].
//! 3. Exact mode never falls back to fuzzy ranking.
//! 4. Fine matches: entries whose [`similarity_ratio`] exceeds the threshold,
//!    sorted by descending ratio (stable, so ties keep catalog order).
//! 5. Contained matches: entries containing the candidate case-insensitively,
//!    in catalog order.
//! 6. Candidates are fine matches followed by contained matches, deduplicated
//!    on first occurrence.
//! 7. If the first contained match equals the candidate case-insensitively it
//!    wins outright; this recovers names that title-casing mangles
//!    (`"mom's knife"` → `"Mom'S Knife"`).

use std::collections::HashSet;

/// Ratio a fuzzy candidate must exceed to be offered.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Outcome of matching one query against one catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult {
    /// Single confirmed name
    Found(String),

    /// Ordered candidate names, best first
    Ambiguous(Vec<String>),

    /// Nothing matched
    NotFound,
}

impl MatchResult {
    /// Candidate names carried by this result (the confirmed name for `Found`).
    pub fn names(&self) -> &[String] {
        match self {
            MatchResult::Found(name) => std::slice::from_ref(name),
            MatchResult::Ambiguous(names) => names,
            MatchResult::NotFound => &[],
        }
    }
}

/// Match `query` against already-normalized catalog `names`.
pub fn match_name(query: &str, names: &[String], exact: bool, threshold: f64) -> MatchResult {
    let candidate = if exact {
        query.to_string()
    } else {
        title_case(query)
    };

    if let Some(hit) = names.iter().find(|name| **name == candidate) {
        return MatchResult::Found(hit.clone());
    }
    if exact {
        return MatchResult::NotFound;
    }

    let mut fine: Vec<(f64, &String)> = names
        .iter()
        .map(|name| (similarity_ratio(name, &candidate), name))
        .filter(|(ratio, _)| *ratio > threshold)
        .collect();
    // Vec::sort_by is stable: equal ratios keep catalog order.
    fine.sort_by(|a, b| b.0.total_cmp(&a.0));

    let folded = candidate.to_lowercase();
    let contained: Vec<&String> = names
        .iter()
        .filter(|name| name.to_lowercase().contains(&folded))
        .collect();

    if fine.is_empty() && contained.is_empty() {
        return MatchResult::NotFound;
    }

    if let Some(first) = contained.first() {
        if first.to_lowercase() == folded {
            return MatchResult::Found((*first).clone());
        }
    }

    let mut seen = HashSet::new();
    let ranked = fine
        .into_iter()
        .map(|(_, name)| name)
        .chain(contained)
        .filter(|name| seen.insert(name.as_str()))
        .cloned()
        .collect();
    MatchResult::Ambiguous(ranked)
}

/// Capitalize the first cased character of every word and lowercase the rest.
///
/// A word starts at any cased character not preceded by another cased
/// character, so `"mom's knife"` becomes `"Mom'S Knife"` and `"???"` is kept.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_cased = false;
    for ch in s.chars() {
        let cased = ch.is_lowercase() || ch.is_uppercase();
        if cased && !prev_cased {
            out.extend(ch.to_uppercase());
        } else if cased {
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
        prev_cased = cased;
    }
    out
}

/// Ratcliff/Obershelp similarity: twice the number of characters in matching
/// runs divided by the total length of both strings, in `[0, 1]`.
///
/// Runs are found recursively: take the longest common substring, then recurse
/// on the pieces left and right of it. Two empty strings are identical.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        matched += size;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }
    matched
}

/// Longest common run of `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Among runs of equal length the one starting earliest in `a`, then earliest
/// in `b`, wins.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    // run_len[j + 1 - blo] = length of the run ending at a[i - 1], b[j]
    let width = bhi - blo + 1;
    let mut prev = vec![0usize; width];
    let mut cur = vec![0usize; width];
    for i in alo..ahi {
        for j in blo..bhi {
            let slot = j - blo + 1;
            if a[i] == b[j] {
                let k = prev[slot - 1] + 1;
                cur[slot] = k;
                if k > best_size {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_size = k;
                }
            } else {
                cur[slot] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    (best_i, best_j, best_size)
}
