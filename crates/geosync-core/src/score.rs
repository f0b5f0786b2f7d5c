// crates/geosync-core/src/score.rs

//! Weighted string similarity on a 0–100 scale.
//!
//! [`weighted_ratio`] blends a plain edit-distance ratio with token-sorted,
//! token-set and partial (best window) comparisons, so it tolerates word
//! reordering, extra qualifier words and partial overlap. Both inputs are
//! lowercased and stripped of punctuation first, which makes the score
//! symmetric and case-insensitive.

use crate::text::char_len;
use std::collections::BTreeSet;

/// Scale applied to the token based scores.
const UNBASE_SCALE: f64 = 0.95;

/// Lowercase, punctuation to spaces, collapse whitespace.
pub fn preprocess(s: &str) -> String {
    let cleaned: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_lowercase();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized Levenshtein similarity, 0–100. Inputs are used as given.
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    strsim::normalized_levenshtein(a, b) * 100.0
}

/// Best [`ratio`] of the shorter string against every equally long window
/// of the longer one.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let (short, long) = if char_len(a) <= char_len(b) { (a, b) } else { (b, a) };
    if short.is_empty() {
        return 0.0;
    }
    let long: Vec<char> = long.chars().collect();
    let width = char_len(short);
    if width == long.len() {
        return ratio(short, &long.iter().collect::<String>());
    }

    let mut best: f64 = 0.0;
    for window in long.windows(width) {
        let candidate: String = window.iter().collect();
        best = best.max(ratio(short, &candidate));
        if best >= 100.0 {
            break;
        }
    }
    best
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// [`ratio`] after sorting the words of both strings.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

fn join_with(prefix: &str, rest: &[&str]) -> String {
    let rest = rest.join(" ");
    match (prefix.is_empty(), rest.is_empty()) {
        (true, _) => rest,
        (false, true) => prefix.to_string(),
        (false, false) => format!("{prefix} {rest}"),
    }
}

/// Compares the shared words against each side's shared-plus-extra words.
///
/// Scores 100 when one word set contains the other.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let ta: BTreeSet<&str> = a.split_whitespace().collect();
    let tb: BTreeSet<&str> = b.split_whitespace().collect();
    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }

    let common: Vec<&str> = ta.intersection(&tb).copied().collect();
    let only_a: Vec<&str> = ta.difference(&tb).copied().collect();
    let only_b: Vec<&str> = tb.difference(&ta).copied().collect();

    if !common.is_empty() && (only_a.is_empty() || only_b.is_empty()) {
        return 100.0;
    }

    let sect = common.join(" ");
    let combined_a = join_with(&sect, &only_a);
    let combined_b = join_with(&sect, &only_b);

    let mut best = ratio(&combined_a, &combined_b);
    if !sect.is_empty() {
        best = best
            .max(ratio(&sect, &combined_a))
            .max(ratio(&sect, &combined_b));
    }
    best
}

/// Partial comparison on word level: any shared word scores 100, otherwise
/// the best window of the sorted word lists.
pub fn partial_token_ratio(a: &str, b: &str) -> f64 {
    let ta: BTreeSet<&str> = a.split_whitespace().collect();
    let tb: BTreeSet<&str> = b.split_whitespace().collect();
    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }
    if ta.intersection(&tb).next().is_some() {
        return 100.0;
    }
    partial_ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// The weighted similarity used for every candidate score, 0–100.
///
/// ```rust
/// use geosync_core::score::weighted_ratio;
///
/// assert_eq!(weighted_ratio("Москва", "москва"), 100.0);
/// assert!(weighted_ratio("Нижний Новгород", "Новгород Нижний") >= 95.0);
/// assert!(weighted_ratio("Москва", "Zzzxyz") < 50.0);
/// ```
pub fn weighted_ratio(a: &str, b: &str) -> f64 {
    let a = preprocess(a);
    let b = preprocess(b);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (la, lb) = (char_len(&a) as f64, char_len(&b) as f64);
    let len_ratio = la.max(lb) / la.min(lb);

    let base = ratio(&a, &b);
    if len_ratio < 1.5 {
        let token = token_sort_ratio(&a, &b).max(token_set_ratio(&a, &b));
        return base.max(token * UNBASE_SCALE);
    }

    let partial_scale = if len_ratio < 8.0 { 0.9 } else { 0.6 };
    base.max(partial_ratio(&a, &b) * partial_scale)
        .max(partial_token_ratio(&a, &b) * UNBASE_SCALE * partial_scale)
}
