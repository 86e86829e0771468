//! Tokenizer — lowercase word/phrase tokens that keep tech punctuation intact.
//!
//! Dots, plus signs, hashes and hyphens are part of a token so that terms like
//! `next.js`, `c++`, `c#` and `scikit-learn` survive tokenization.

use std::sync::LazyLock;

use regex::Regex;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z0-9.+#-]+").expect("token pattern is a valid regex"));

/// Splits text into lowercase tokens, left to right.
///
/// Trailing dots are sentence punctuation, not part of the term (`"aws."` → `"aws"`);
/// leading and inner dots are kept (`.net`, `node.js`).
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().trim_end_matches('.'))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// All length-`n` contiguous windows of `tokens`, each joined with a single space.
pub fn ngrams(tokens: &[String], n: usize) -> Vec<String> {
    if n == 0 || tokens.len() < n {
        return Vec::new();
    }
    tokens.windows(n).map(|w| w.join(" ")).collect()
}
