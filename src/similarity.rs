//! Fuzzy string similarity: the matching-blocks ratio and its two cutoffs.
//!
//! The score is the classic sequence-matching ratio, `2·M / (len(a) + len(b))`,
//! where `M` is the total length of the matching blocks found by recursively
//! taking the longest common substring (Ratcliff/Obershelp). The same score
//! backs two different decisions with deliberately different cutoffs:
//!
//! - **Command routing** uses [`COMMAND_CUTOFF`] (accept at `>= 0.70`).
//!   Misrouting is cheap — an unmatched command falls through to the
//!   fallback response — so the bar is lenient.
//! - **Answer grading** uses [`ANSWER_CUTOFF`] (accept at strictly `> 0.85`).
//!   Marking a wrong answer correct is costly, so the bar is strict.

use crate::normalize::normalize;

/// Minimum similarity for a command phrase to be accepted as a match.
pub const COMMAND_CUTOFF: f64 = 0.70;

/// Similarity an answer must *exceed* (strictly) to be graded correct.
pub const ANSWER_CUTOFF: f64 = 0.85;

/// Similarity ratio between two strings, in `[0, 1]`.
///
/// `ratio(x, x) == 1.0` for any `x`; two strings sharing no characters
/// score `0.0`. Comparison is by Unicode scalar value — callers are
/// expected to [`normalize`] both sides first.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        // Both empty: identical by convention.
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

/// Grade a free-text answer against the expected answer.
///
/// Both sides are normalized, then the ratio must strictly exceed
/// [`ANSWER_CUTOFF`]. A score of exactly 0.85 is incorrect.
pub fn answer_is_correct(user_answer: &str, expected: &str) -> bool {
    ratio(&normalize(user_answer), &normalize(expected)) > ANSWER_CUTOFF
}

/// Total characters covered by matching blocks.
///
/// Finds the longest common substring, then recurses on the pieces to its
/// left and right. Block boundaries never cross, so the count is the `M`
/// of the sequence-matching ratio.
fn matching_chars(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let (ai, bi, len) = longest_common_block(a, b);
    if len == 0 {
        return 0;
    }
    len + matching_chars(&a[..ai], &b[..bi]) + matching_chars(&a[ai + len..], &b[bi + len..])
}

/// Longest common substring of `a` and `b` as `(start_in_a, start_in_b, len)`.
///
/// Ties resolve to the earliest occurrence in `a`, then in `b`, which keeps
/// the overall score deterministic.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    // prev[j+1] = length of the common suffix ending at a[i-1], b[j].
    let mut prev = vec![0usize; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        let mut cur = vec![0usize; b.len() + 1];
        for (j, &cb) in b.iter().enumerate() {
            if ca == cb {
                let len = prev[j] + 1;
                cur[j + 1] = len;
                if len > best.2 {
                    best = (i + 1 - len, j + 1 - len, len);
                }
            }
        }
        prev = cur;
    }
    best
}
