//! # spellbinder
//!
//! A rule-based conversational responder. Free-text input is normalized,
//! matched against a command catalog with a fuzzy similarity ratio, and
//! routed to a scripted handler — or into one of three stateful
//! sub-dialogues (trivia quiz, riddle, sorting questionnaire) that change
//! how the next message is interpreted.
//!
//! ## Architecture
//!
//! - **Normalization** (`normalize`): canonical lowercase form for comparison
//! - **Similarity** (`similarity`): matching-blocks ratio with two cutoffs
//!   (lenient for command routing, strict for answer grading)
//! - **Intent catalog** (`catalog`): fuzzy lookup from phrase to [`catalog::Intent`]
//! - **Session state machine** (`session`, `engine`): mode-dependent dispatch,
//!   one mutable [`session::DialogueSession`] per conversation, owned by the caller
//! - **Catalog loading** (`data`): tolerant CSV loading with an encoding fallback
//!
//! ## Library usage
//!
//! ```
//! use spellbinder::catalog::{Intent, IntentCatalog};
//! use spellbinder::engine::Responder;
//! use spellbinder::phrases::PhraseTable;
//! use spellbinder::pool::{QaItem, QaPool};
//! use spellbinder::session::DialogueSession;
//!
//! let mut catalog = IntentCatalog::new();
//! catalog.push("tell me a joke", Intent::FetchJoke);
//!
//! let mut responder = Responder::new(
//!     catalog,
//!     PhraseTable::new(),
//!     QaPool::new(),
//!     QaPool::new(),
//! );
//!
//! let mut session = DialogueSession::new();
//! let reply = responder.handle_message(&mut session, "tell me a joke!").unwrap();
//! assert!(reply.contains("wizard"));
//! ```

pub mod catalog;
pub mod data;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod phrases;
pub mod pool;
pub mod session;
pub mod similarity;
pub mod sorting;
