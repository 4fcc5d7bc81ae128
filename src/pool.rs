//! Question/answer pools for the quiz and riddle sub-dialogues.
//!
//! The pool only knows how to hand out a random entry; the engine owns the
//! random source so tests can inject a seeded one.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// One prompt with its expected answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaItem {
    /// Question or riddle text shown to the user.
    pub prompt: String,
    /// Expected answer, graded leniently against free text.
    pub answer: String,
}

/// A fixed pool of question/answer pairs.
#[derive(Debug, Clone, Default)]
pub struct QaPool {
    items: Vec<QaItem>,
}

impl QaPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pool from existing items.
    pub fn from_items(items: Vec<QaItem>) -> Self {
        Self { items }
    }

    /// Append an item.
    pub fn push(&mut self, prompt: &str, answer: &str) {
        self.items.push(QaItem {
            prompt: prompt.to_string(),
            answer: answer.to_string(),
        });
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the pool has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pick a random item, or `None` if the pool is empty.
    pub fn pick(&self, rng: &mut dyn RngCore) -> Option<&QaItem> {
        if self.items.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.items.len());
        Some(&self.items[index])
    }
}
