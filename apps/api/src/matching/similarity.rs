//! String similarity scores on a 0–100 integer scale.
//!
//! All scores build on the indel-normalized similarity `2·LCS / (len_a + len_b)`:
//! - `ratio`: whole-string similarity
//! - `partial_ratio`: best alignment of the shorter string inside the longer one
//! - `token_set_ratio`: word-order and duplicate insensitive comparison of word sets

use std::collections::BTreeSet;

use rapidfuzz::distance::indel;

/// Converts a 0.0–1.0 similarity into a rounded 0–100 score.
fn to_score(similarity: f64) -> u32 {
    ((similarity * 100.0).round() as u32).min(100)
}

/// Whole-string similarity. Two empty strings are identical; one empty string scores 0.
pub fn ratio(a: &str, b: &str) -> u32 {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => 100,
        (true, false) | (false, true) => 0,
        (false, false) => to_score(indel::normalized_similarity(a.chars(), b.chars())),
    }
}

/// How well the shorter string fits inside the longer one.
///
/// 100 when the shorter string is a substring of the longer. Otherwise the best
/// `ratio` between the shorter string and every equally long window of the longer.
pub fn partial_ratio(a: &str, b: &str) -> u32 {
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };

    if short.is_empty() {
        return if long.is_empty() { 100 } else { 0 };
    }
    if long.contains(short) {
        return 100;
    }

    let window = short.chars().count();
    // Byte offsets of every char boundary, so windows are plain slices of `long`.
    let boundaries: Vec<usize> = long
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(long.len()))
        .collect();

    let mut best = 0;
    for start in 0..boundaries.len().saturating_sub(window) {
        let slice = &long[boundaries[start]..boundaries[start + window]];
        best = best.max(ratio(short, slice));
        if best == 100 {
            break;
        }
    }
    best
}

/// Word-set similarity, insensitive to word order and repeated words.
///
/// Both strings are split on whitespace into word sets. When they share words and one
/// set is a subset of the other, the score is 100. Otherwise it is the best of:
/// the shared words against each side's full (sorted) word list, and the two full
/// sorted word lists against each other.
pub fn token_set_ratio(a: &str, b: &str) -> u32 {
    let words_a: BTreeSet<&str> = a.split_whitespace().collect();
    let words_b: BTreeSet<&str> = b.split_whitespace().collect();
    if words_a.is_empty() || words_b.is_empty() {
        return 0;
    }

    let shared = join(words_a.intersection(&words_b));
    let only_a = join(words_a.difference(&words_b));
    let only_b = join(words_b.difference(&words_a));

    if !shared.is_empty() && (only_a.is_empty() || only_b.is_empty()) {
        return 100;
    }

    let combined_a = concat(&shared, &only_a);
    let combined_b = concat(&shared, &only_b);

    let mut best = ratio(&combined_a, &combined_b);
    if !shared.is_empty() {
        best = best
            .max(extension_ratio(&shared, &combined_a))
            .max(extension_ratio(&shared, &combined_b));
    }
    best
}

/// `ratio(prefix, extended)` where `extended` starts with `prefix`: the LCS is the
/// prefix itself, so the score is `2·p / (p + total)` without any DP.
fn extension_ratio(prefix: &str, extended: &str) -> u32 {
    let prefix_len = prefix.chars().count();
    let total = extended.chars().count();
    if prefix_len + total == 0 {
        return 100;
    }
    to_score(2.0 * prefix_len as f64 / (prefix_len + total) as f64)
}

fn join<'a>(words: impl Iterator<Item = &'a &'a str>) -> String {
    words.copied().collect::<Vec<_>>().join(" ")
}

fn concat(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (false, true) => head.to_string(),
        (false, false) => format!("{head} {tail}"),
    }
}
