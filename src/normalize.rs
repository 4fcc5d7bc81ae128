//! Input normalization for comparison.
//!
//! Every string the engine compares — inbound messages, catalog phrases,
//! expected answers — passes through [`normalize`] first, so matching is
//! insensitive to case, surrounding whitespace, and stray punctuation.

/// Canonicalize raw text for comparison.
///
/// Trims surrounding whitespace, lowercases, and strips ASCII punctuation
/// except the apostrophe (`'`) and hyphen (`-`), which carry meaning in
/// contractions and compound words. Pure and total: empty input yields
/// empty output, and the function is idempotent.
pub fn normalize(text: &str) -> String {
    text.trim()
        .chars()
        .filter(|c| !c.is_ascii_punctuation() || matches!(c, '\'' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}
