//! The phrase responder: greetings and stored small-talk phrases.
//!
//! Checked before mode dispatch and intent classification, so a greeting
//! short-circuits everything — including an open quiz or riddle.
//!
//! Matching direction for stored phrases is deliberate and asymmetric: the
//! normalized *input* must appear as a substring of the *stored* phrase,
//! not the reverse. A short input like "are you" matches the stored phrase
//! "how are you doing today"; an input longer than every stored phrase
//! matches nothing.

use serde::{Deserialize, Serialize};

/// Greeting tokens, matched by exact equality on normalized input.
pub const GREETINGS: [&str; 5] = ["hi", "hello", "hey", "hru", "howdy"];

/// Fixed response to any greeting token.
pub const GREETING_RESPONSE: &str =
    "Ah, greetings young wizard! How can I assist you on this magical journey?";

/// One stored small-talk row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhraseEntry {
    /// Stored trigger phrase, lowercased at insertion.
    pub trigger: String,
    /// Canned response emitted on match.
    pub response: String,
}

/// Immutable-after-load table of small-talk phrases.
#[derive(Debug, Clone, Default)]
pub struct PhraseTable {
    entries: Vec<PhraseEntry>,
}

impl PhraseTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a trigger/response pair. The trigger is lowercased so the
    /// substring test compares like against like.
    pub fn push(&mut self, trigger: &str, response: &str) {
        self.entries.push(PhraseEntry {
            trigger: trigger.to_lowercase(),
            response: response.to_string(),
        });
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find a canned response for normalized input, or `None`.
    ///
    /// Greetings are checked first (exact equality) so they never fall
    /// through to the substring scan. The scan returns the first entry
    /// whose stored trigger *contains* the input.
    pub fn respond(&self, normalized_input: &str) -> Option<&str> {
        if GREETINGS.contains(&normalized_input) {
            return Some(GREETING_RESPONSE);
        }
        if normalized_input.is_empty() {
            // An empty needle is a substring of everything; treat it as no match.
            return None;
        }
        self.entries
            .iter()
            .find(|entry| entry.trigger.contains(normalized_input))
            .map(|entry| entry.response.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    fn test_table() -> PhraseTable {
        let mut table = PhraseTable::new();
        table.push("how are you doing today", "I am enchanted as always!");
        table.push("thank you so much", "You are most welcome, young wizard.");
        table
    }

    #[test]
    fn greeting_matches_exactly() {
        let table = PhraseTable::new();
        assert_eq!(table.respond("hello"), Some(GREETING_RESPONSE));
        assert_eq!(table.respond(&normalize("Hello!!")), Some(GREETING_RESPONSE));
    }

    #[test]
    fn greeting_is_not_a_substring_match() {
        // "hello there" is not a greeting token and matches no stored phrase.
        assert_eq!(test_table().respond("hello there"), None);
    }

    #[test]
    fn input_inside_stored_phrase_matches() {
        assert_eq!(
            test_table().respond("are you"),
            Some("I am enchanted as always!")
        );
    }

    #[test]
    fn stored_phrase_inside_input_does_not_match() {
        // Direction preserved: the input must fit inside the stored phrase.
        assert_eq!(
            test_table().respond("how are you doing today and more"),
            None
        );
    }

    #[test]
    fn first_matching_entry_wins() {
        let mut table = PhraseTable::new();
        table.push("you are great", "first");
        table.push("you are grand", "second");
        assert_eq!(table.respond("you are"), Some("first"));
    }

    #[test]
    fn empty_input_matches_nothing() {
        assert_eq!(test_table().respond(""), None);
    }
}
