//! The command catalog: canonical phrases mapped to intents.
//!
//! Classification delegates to the similarity ratio over the whole catalog:
//! the single best-scoring phrase wins if it clears [`COMMAND_CUTOFF`],
//! otherwise the input carries no intent. Ties resolve to the entry loaded
//! first, so catalog order matters and lookups are deterministic.

use serde::{Deserialize, Serialize};

use crate::normalize::normalize;
use crate::similarity::{COMMAND_CUTOFF, ratio};

// ---------------------------------------------------------------------------
// Intents
// ---------------------------------------------------------------------------

/// Closed set of intents the responder knows how to handle.
///
/// Every variant has a handler; the dispatch match in `engine` is exhaustive,
/// so adding a variant without a handler fails to compile rather than falling
/// through at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Start a trivia question (opens the quiz sub-dialogue).
    FetchTrivia,
    /// Report the (scripted) weather.
    FetchWeather,
    /// Ask a riddle (opens the riddle sub-dialogue).
    FetchRiddles,
    /// Share a general magical fact.
    FetchKnowledge,
    /// Share a historical fact.
    FetchHistory,
    /// Explain a spell.
    FetchExplanation,
    /// Recommend a random movie.
    FetchMovie,
    /// Send a cheerful message.
    CheerUser,
    /// Say goodbye.
    EndConversation,
    /// Offer advice.
    GiveAdvice,
    /// Share a fun fact.
    FetchFunFact,
    /// Tell a joke.
    FetchJoke,
    /// Deliver a prophecy.
    FetchProphecy,
    /// Share detailed lore.
    FetchDetails,
}

impl Intent {
    /// All intents, in a fixed order.
    pub const ALL: [Intent; 14] = [
        Intent::FetchTrivia,
        Intent::FetchWeather,
        Intent::FetchRiddles,
        Intent::FetchKnowledge,
        Intent::FetchHistory,
        Intent::FetchExplanation,
        Intent::FetchMovie,
        Intent::CheerUser,
        Intent::EndConversation,
        Intent::GiveAdvice,
        Intent::FetchFunFact,
        Intent::FetchJoke,
        Intent::FetchProphecy,
        Intent::FetchDetails,
    ];

    /// The identifier used in catalog files.
    pub fn as_str(self) -> &'static str {
        match self {
            Intent::FetchTrivia => "fetch_trivia",
            Intent::FetchWeather => "fetch_weather",
            Intent::FetchRiddles => "fetch_riddles",
            Intent::FetchKnowledge => "fetch_knowledge",
            Intent::FetchHistory => "fetch_history",
            Intent::FetchExplanation => "fetch_explanation",
            Intent::FetchMovie => "fetch_movie",
            Intent::CheerUser => "cheer_user",
            Intent::EndConversation => "end_conversation",
            Intent::GiveAdvice => "give_advice",
            Intent::FetchFunFact => "fetch_fun_fact",
            Intent::FetchJoke => "fetch_joke",
            Intent::FetchProphecy => "fetch_prophecy",
            Intent::FetchDetails => "fetch_details",
        }
    }

    /// Parse a catalog-file identifier. Unknown identifiers are a row-level
    /// load diagnostic, not a variant, so this returns `None` rather than
    /// erroring.
    pub fn parse(s: &str) -> Option<Intent> {
        Intent::ALL.into_iter().find(|i| i.as_str() == s.trim())
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// One catalog row: a canonical trigger phrase and the intent it fires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandEntry {
    /// Normalized trigger phrase.
    pub phrase: String,
    /// Intent fired when this phrase wins classification.
    pub intent: Intent,
}

/// Immutable-after-load mapping from canonical phrases to intents.
#[derive(Debug, Clone, Default)]
pub struct IntentCatalog {
    entries: Vec<CommandEntry>,
}

impl IntentCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. The phrase is normalized on the way in so lookups
    /// compare canonical forms on both sides.
    pub fn push(&mut self, phrase: &str, intent: Intent) {
        self.entries.push(CommandEntry {
            phrase: normalize(phrase),
            intent,
        });
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The loaded entries, in catalog order.
    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    /// Classify normalized input into an intent, or `None` if no phrase
    /// clears the cutoff.
    ///
    /// Linear scan over the catalog; the best score wins and ties go to the
    /// first-encountered entry (replacement requires a strictly greater
    /// score). An empty catalog classifies everything as `None`.
    pub fn classify(&self, normalized_input: &str) -> Option<Intent> {
        let mut best_score = 0.0;
        let mut best: Option<Intent> = None;
        for entry in &self.entries {
            let score = ratio(normalized_input, &entry.phrase);
            if score > best_score {
                best_score = score;
                best = Some(entry.intent);
            }
        }
        if best_score >= COMMAND_CUTOFF { best } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_catalog() -> IntentCatalog {
        let mut catalog = IntentCatalog::new();
        catalog.push("tell me a riddle", Intent::FetchRiddles);
        catalog.push("tell me a joke", Intent::FetchJoke);
        catalog.push("what is the weather", Intent::FetchWeather);
        catalog.push("cheer me up", Intent::CheerUser);
        catalog
    }

    #[test]
    fn exact_phrase_classifies() {
        assert_eq!(
            test_catalog().classify("tell me a riddle"),
            Some(Intent::FetchRiddles)
        );
    }

    #[test]
    fn near_miss_still_classifies() {
        // One character off among 16: well above the 0.70 cutoff.
        assert_eq!(
            test_catalog().classify("tell me a riddel"),
            Some(Intent::FetchRiddles)
        );
    }

    #[test]
    fn unrelated_input_yields_none() {
        assert_eq!(test_catalog().classify("xyzzy"), None);
    }

    #[test]
    fn classification_is_deterministic() {
        let catalog = test_catalog();
        let first = catalog.classify("tell me a jokey");
        for _ in 0..10 {
            assert_eq!(catalog.classify("tell me a jokey"), first);
        }
    }

    #[test]
    fn tie_goes_to_first_entry() {
        let mut catalog = IntentCatalog::new();
        catalog.push("same phrase", Intent::FetchJoke);
        catalog.push("same phrase", Intent::FetchMovie);
        assert_eq!(catalog.classify("same phrase"), Some(Intent::FetchJoke));
    }

    #[test]
    fn empty_catalog_classifies_none() {
        assert_eq!(IntentCatalog::new().classify("anything"), None);
    }

    #[test]
    fn intent_identifiers_round_trip() {
        for intent in Intent::ALL {
            assert_eq!(Intent::parse(intent.as_str()), Some(intent));
        }
        assert_eq!(Intent::parse("cast_fireball"), None);
    }
}
