//! The sorting questionnaire: a fixed three-question multiple-choice flow.
//!
//! Answers are normalized and collected; at the end each house scores the
//! number of its keyword answers found anywhere in the collected set, and
//! the highest-scoring house wins. Scoring is global across all answers —
//! a keyword counts no matter which question produced it, and ties break
//! by the fixed house enumeration order.

use serde::{Deserialize, Serialize};

use crate::normalize::normalize;

// ---------------------------------------------------------------------------
// Houses
// ---------------------------------------------------------------------------

/// The four houses a participant can be sorted into.
///
/// Enum order is the tie-break priority: on equal scores the earlier
/// variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum House {
    Gryffindor,
    Slytherin,
    Hufflepuff,
    Ravenclaw,
}

impl House {
    /// All houses, in tie-break priority order.
    pub const ALL: [House; 4] = [
        House::Gryffindor,
        House::Slytherin,
        House::Hufflepuff,
        House::Ravenclaw,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            House::Gryffindor => "Gryffindor",
            House::Slytherin => "Slytherin",
            House::Hufflepuff => "Hufflepuff",
            House::Ravenclaw => "Ravenclaw",
        }
    }

    /// Normalized keyword answers that score for this house.
    fn keywords(self) -> &'static [&'static str] {
        match self {
            House::Gryffindor => &["bravery", "courage", "adventure"],
            House::Slytherin => &["ambition", "power", "leadership"],
            House::Hufflepuff => &["hard work", "loyalty", "helping others"],
            House::Ravenclaw => &["intelligence", "wit", "studying"],
        }
    }
}

impl std::fmt::Display for House {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Questionnaire
// ---------------------------------------------------------------------------

/// The fixed question sequence: prompt plus the four offered options.
pub const QUESTIONS: [(&str, [&str; 4]); 3] = [
    (
        "What do you value most?",
        ["Bravery", "Ambition", "Hard work", "Intelligence"],
    ),
    (
        "Which would you prefer to be known for?",
        ["Courage", "Power", "Loyalty", "Wit"],
    ),
    (
        "Pick your favorite activity:",
        ["Adventure", "Leadership", "Helping others", "Studying"],
    ),
];

/// Per-conversation questionnaire state.
///
/// Created when the sorting sub-dialogue starts and discarded once a
/// result is produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SortingQuiz {
    question_index: usize,
    answers: Vec<String>,
}

impl SortingQuiz {
    /// Start a fresh questionnaire at the first question.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current question formatted with its options, or `None` once all
    /// questions have been answered.
    pub fn next_question(&self) -> Option<String> {
        QUESTIONS
            .get(self.question_index)
            .map(|(question, options)| format!("{question} ({})", options.join(", ")))
    }

    /// Record an answer (normalized before storing) and advance.
    pub fn submit_answer(&mut self, raw_answer: &str) {
        self.answers.push(normalize(raw_answer));
        self.question_index += 1;
    }

    /// Whether every question has been answered.
    pub fn is_complete(&self) -> bool {
        self.question_index >= QUESTIONS.len()
    }

    /// Answers collected so far, in submission order.
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    /// Score the collected answers and pick the winning house.
    pub fn result(&self) -> House {
        let mut winner = House::ALL[0];
        let mut best = self.score(winner);
        for house in House::ALL.into_iter().skip(1) {
            let score = self.score(house);
            if score > best {
                best = score;
                winner = house;
            }
        }
        winner
    }

    /// The congratulatory result message.
    pub fn result_message(&self) -> String {
        format!("Congratulations! You have been sorted into {}!", self.result())
    }

    fn score(&self, house: House) -> usize {
        house
            .keywords()
            .iter()
            .map(|keyword| self.answers.iter().filter(|a| a == keyword).count())
            .sum()
    }
}
