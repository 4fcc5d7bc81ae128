//! Per-conversation dialogue state.
//!
//! A [`DialogueSession`] is created once per conversation, owned by the
//! caller, and mutated only through `Responder::handle_message`. The mode
//! decides how the next inbound message is interpreted; the transcript is
//! append-only and exists for display alone — the engine never reads it
//! back to make decisions.

use serde::{Deserialize, Serialize};

use crate::sorting::SortingQuiz;

/// How the next inbound message will be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// No sub-dialogue open: commands are classified normally.
    #[default]
    Idle,
    /// A trivia question is pending; the next message is graded as its answer.
    Quiz,
    /// A riddle is pending; the next message is graded as its answer.
    Riddle,
    /// The sorting questionnaire is running.
    Sorting,
}

impl Mode {
    /// Short name for logs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Mode::Idle => "idle",
            Mode::Quiz => "quiz",
            Mode::Riddle => "riddle",
            Mode::Sorting => "sorting",
        }
    }
}

/// Who produced a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    User,
    Responder,
}

/// One transcript line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

/// Mutable per-conversation state.
///
/// Invariant: `pending_answer` is present iff `mode` is `Quiz` or `Riddle`;
/// `sorting` is present iff `mode` is `Sorting`. `handle_message` maintains
/// this; a session that violates it fails fast with `InvalidSessionState`
/// instead of silently grading against nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DialogueSession {
    mode: Mode,
    pending_prompt: Option<String>,
    pending_answer: Option<String>,
    sorting: Option<SortingQuiz>,
    transcript: Vec<Turn>,
}

impl DialogueSession {
    /// Create a fresh idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The open question or riddle prompt, if a sub-dialogue is pending.
    pub fn pending_prompt(&self) -> Option<&str> {
        self.pending_prompt.as_deref()
    }

    /// The transcript so far, oldest first.
    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub(crate) fn pending_answer(&self) -> Option<&str> {
        self.pending_answer.as_deref()
    }

    pub(crate) fn sorting_mut(&mut self) -> Option<&mut SortingQuiz> {
        self.sorting.as_mut()
    }

    /// Open a quiz or riddle sub-dialogue.
    pub(crate) fn open_question(&mut self, mode: Mode, prompt: String, answer: String) {
        debug_assert!(matches!(mode, Mode::Quiz | Mode::Riddle));
        self.mode = mode;
        self.pending_prompt = Some(prompt);
        self.pending_answer = Some(answer);
        self.sorting = None;
    }

    /// Start (or restart) the sorting questionnaire.
    pub(crate) fn start_sorting(&mut self) -> &mut SortingQuiz {
        self.mode = Mode::Sorting;
        self.pending_prompt = None;
        self.pending_answer = None;
        self.sorting.insert(SortingQuiz::new())
    }

    /// Close any open sub-dialogue and return to idle.
    pub(crate) fn reset_to_idle(&mut self) {
        self.mode = Mode::Idle;
        self.pending_prompt = None;
        self.pending_answer = None;
        self.sorting = None;
    }

    /// Append a transcript line.
    pub(crate) fn record(&mut self, speaker: Speaker, text: &str) {
        self.transcript.push(Turn {
            speaker,
            text: text.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_is_idle() {
        let session = DialogueSession::new();
        assert_eq!(session.mode(), Mode::Idle);
        assert!(session.pending_prompt().is_none());
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn open_question_sets_mode_and_pending_fields() {
        let mut session = DialogueSession::new();
        session.open_question(Mode::Riddle, "what am I?".into(), "an echo".into());
        assert_eq!(session.mode(), Mode::Riddle);
        assert_eq!(session.pending_prompt(), Some("what am I?"));
        assert_eq!(session.pending_answer(), Some("an echo"));
    }

    #[test]
    fn reset_clears_every_sub_dialogue_field() {
        let mut session = DialogueSession::new();
        session.open_question(Mode::Quiz, "q".into(), "a".into());
        session.reset_to_idle();
        assert_eq!(session.mode(), Mode::Idle);
        assert!(session.pending_answer().is_none());

        session.start_sorting();
        assert_eq!(session.mode(), Mode::Sorting);
        session.reset_to_idle();
        assert!(session.sorting_mut().is_none());
    }

    #[test]
    fn starting_sorting_replaces_a_pending_question() {
        let mut session = DialogueSession::new();
        session.open_question(Mode::Quiz, "q".into(), "a".into());
        session.start_sorting();
        assert_eq!(session.mode(), Mode::Sorting);
        assert!(session.pending_answer().is_none());
        assert!(session.sorting_mut().is_some());
    }

    #[test]
    fn transcript_is_append_only_in_order() {
        let mut session = DialogueSession::new();
        session.record(Speaker::User, "hi");
        session.record(Speaker::Responder, "greetings");
        let turns = session.transcript();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].speaker, Speaker::User);
        assert_eq!(turns[1].text, "greetings");
    }

    #[test]
    fn session_serializes_round_trip() {
        let mut session = DialogueSession::new();
        session.open_question(Mode::Quiz, "q".into(), "a".into());
        session.record(Speaker::User, "tell me a trivia question");

        let json = serde_json::to_string(&session).unwrap();
        let restored: DialogueSession = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.mode(), Mode::Quiz);
        assert_eq!(restored.pending_answer(), Some("a"));
        assert_eq!(restored.transcript().len(), 1);
    }
}
