//! The responder engine: mode dispatch, intent handlers, answer grading.
//!
//! One [`Responder`] holds the read-only catalogs and the random source;
//! any number of caller-owned [`DialogueSession`]s can be driven through
//! [`Responder::handle_message`], which is the single mutation path for
//! session state.
//!
//! Dispatch precedence is strict and ordered; the first applicable rule
//! wins:
//!
//! 1. phrase responder (greetings and stored small talk) — any mode
//! 2. sorting mode: record answer / next question / result
//! 3. literal "sort me" — starts the questionnaire (also interrupts an
//!    open quiz or riddle)
//! 4. quiz mode: grade the answer
//! 5. riddle mode: grade the answer
//! 6. literal "bye"
//! 7. intent classification over the command catalog
//! 8. fallback response
//!
//! Once a sub-dialogue is open, its rule runs before classification, so
//! any non-greeting input is treated as its answer — even text that would
//! otherwise look like a new command. A running questionnaire consumes
//! *everything* but greetings (including "sort me" itself); collected
//! answers are never discarded mid-flow.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::catalog::{Intent, IntentCatalog};
use crate::error::{EngineError, SpellResult};
use crate::normalize::normalize;
use crate::phrases::PhraseTable;
use crate::pool::QaPool;
use crate::session::{DialogueSession, Mode, Speaker};
use crate::similarity::answer_is_correct;

// ---------------------------------------------------------------------------
// Scripted responses
// ---------------------------------------------------------------------------

/// Emitted when neither a phrase nor an intent matched.
pub const FALLBACK_RESPONSE: &str = "I'm not sure what spell you cast, try again!";

/// Emitted for the literal "bye".
pub const FAREWELL_RESPONSE: &str =
    "Farewell, brave spellcaster! May the winds guide your path.";

const QUIZ_CORRECT: &str = "Correct! You've proven your magical knowledge, wizard!";
const RIDDLE_CORRECT: &str = "Well done! You've solved the riddle!";

const KNOWLEDGE_RESPONSE: &str = "Here's a magical fact: The only way to move between \
     different magical realms is by casting a powerful portkey spell.";
const HISTORY_RESPONSE: &str = "Did you know that the first magical duel ever recorded \
     happened in 1547 between two great wizards?";
const EXPLANATION_RESPONSE: &str = "Explanation: The spell 'Alohomora' unlocks doors, \
     but it works only on doors that are magically locked.";
const WEATHER_RESPONSE: &str = "The weather today is sunny with a hint of magic in the air!";
const CHEER_RESPONSE: &str = "You are magical, keep up the good work! \u{2728}";
const GOODBYE_RESPONSE: &str = "Farewell, brave spellcaster! Until we meet again.";
const ADVICE_RESPONSE: &str = "Believe in yourself! You have the power to create your own magic.";
const FUN_FACT_RESPONSE: &str = "Did you know? The first Harry Potter book was published in 1997!";
const JOKE_RESPONSE: &str = "Why did the wizard break up with his girlfriend? \
     Because she had too many hexes!";
const PROPHECY_RESPONSE: &str = "Today is a day of great potential. Use your magic wisely!";
const DETAILS_RESPONSE: &str = "The Wizarding World is vast and filled with magic. \
     From wands to spells, there's so much to explore!";

const MOVIES: [&str; 3] = [
    "Harry Potter and the Philosopher's Stone",
    "Fantastic Beasts and Where to Find Them",
    "The Sorcerer's Apprentice",
];

// ---------------------------------------------------------------------------
// Responder
// ---------------------------------------------------------------------------

/// The conversational responder.
///
/// Catalogs are read-only after construction and may back any number of
/// sessions; the random source is the only mutable piece, used for
/// quiz/riddle/movie picks.
pub struct Responder {
    catalog: IntentCatalog,
    phrases: PhraseTable,
    trivia: QaPool,
    riddles: QaPool,
    rng: Box<dyn RngCore>,
}

impl Responder {
    /// Build a responder with an entropy-seeded random source.
    pub fn new(catalog: IntentCatalog, phrases: PhraseTable, trivia: QaPool, riddles: QaPool) -> Self {
        Self::with_rng(catalog, phrases, trivia, riddles, Box::new(StdRng::from_entropy()))
    }

    /// Build a responder with an injected random source.
    ///
    /// Tests pass `StdRng::seed_from_u64` here to make quiz and movie
    /// picks deterministic.
    pub fn with_rng(
        catalog: IntentCatalog,
        phrases: PhraseTable,
        trivia: QaPool,
        riddles: QaPool,
        rng: Box<dyn RngCore>,
    ) -> Self {
        Self {
            catalog,
            phrases,
            trivia,
            riddles,
            rng,
        }
    }

    /// The command catalog backing classification.
    pub fn catalog(&self) -> &IntentCatalog {
        &self.catalog
    }

    /// The trivia question pool.
    pub fn trivia_pool(&self) -> &QaPool {
        &self.trivia
    }

    /// The riddle pool.
    pub fn riddle_pool(&self) -> &QaPool {
        &self.riddles
    }

    /// The small-talk phrase table.
    pub fn phrase_table(&self) -> &PhraseTable {
        &self.phrases
    }

    /// Handle one inbound message: normalize, dispatch, mutate the session,
    /// and return the reply text.
    ///
    /// The user turn and the reply are appended to the session transcript
    /// only on success; on error (empty pool, invalid session state) the
    /// session is left untouched.
    pub fn handle_message(&mut self, session: &mut DialogueSession, raw: &str) -> SpellResult<String> {
        let input = normalize(raw);
        tracing::debug!(mode = session.mode().name(), input = %input, "dispatching message");

        let reply = self.dispatch(session, &input)?;
        session.record(Speaker::User, raw);
        session.record(Speaker::Responder, &reply);
        Ok(reply)
    }

    fn dispatch(&mut self, session: &mut DialogueSession, input: &str) -> SpellResult<String> {
        // 1. Greetings and stored phrases short-circuit everything, with no
        //    session mutation — an open quiz stays open.
        if let Some(response) = self.phrases.respond(input) {
            return Ok(response.to_string());
        }

        // 2. A running questionnaire consumes every non-greeting input as
        //    an answer — "sort me" included, so progress is never lost.
        if session.mode() == Mode::Sorting {
            return self.sorting_step(session, input);
        }

        // 3. "sort me" starts the questionnaire, interrupting an open
        //    quiz or riddle.
        if input == "sort me" {
            let quiz = session.start_sorting();
            return match quiz.next_question() {
                Some(question) => Ok(question),
                None => self.finish_sorting(session),
            };
        }

        // 4–5. An open quiz or riddle grades the input before classification.
        match session.mode() {
            Mode::Quiz => return self.grade_answer(session, input, Mode::Quiz),
            Mode::Riddle => return self.grade_answer(session, input, Mode::Riddle),
            Mode::Sorting | Mode::Idle => {}
        }

        // 6. Farewell literal.
        if input == "bye" {
            return Ok(FAREWELL_RESPONSE.to_string());
        }

        // 7–8. Classify, or fall back.
        match self.catalog.classify(input) {
            Some(intent) => {
                tracing::debug!(intent = %intent, "intent classified");
                self.dispatch_intent(session, intent)
            }
            None => Ok(FALLBACK_RESPONSE.to_string()),
        }
    }

    fn sorting_step(&mut self, session: &mut DialogueSession, input: &str) -> SpellResult<String> {
        let quiz = session
            .sorting_mut()
            .ok_or_else(|| EngineError::InvalidSessionState {
                mode: Mode::Sorting.name().to_string(),
            })?;
        quiz.submit_answer(input);
        match quiz.next_question() {
            Some(question) => Ok(question),
            None => self.finish_sorting(session),
        }
    }

    fn finish_sorting(&mut self, session: &mut DialogueSession) -> SpellResult<String> {
        let quiz = session
            .sorting_mut()
            .ok_or_else(|| EngineError::InvalidSessionState {
                mode: Mode::Sorting.name().to_string(),
            })?;
        let message = quiz.result_message();
        tracing::info!(result = %quiz.result(), "sorting questionnaire complete");
        session.reset_to_idle();
        Ok(message)
    }

    fn grade_answer(
        &mut self,
        session: &mut DialogueSession,
        input: &str,
        mode: Mode,
    ) -> SpellResult<String> {
        let Some(expected) = session.pending_answer().map(str::to_string) else {
            return Err(EngineError::InvalidSessionState {
                mode: mode.name().to_string(),
            }
            .into());
        };

        let correct = answer_is_correct(input, &expected);
        tracing::debug!(correct, mode = mode.name(), "answer graded");
        session.reset_to_idle();

        let reply = match (mode, correct) {
            (Mode::Quiz, true) => QUIZ_CORRECT.to_string(),
            (Mode::Quiz, false) => format!(
                "Oops, that's not quite right. The correct answer was '{expected}'. \
                 Try another spell or question!"
            ),
            (Mode::Riddle, true) => RIDDLE_CORRECT.to_string(),
            (Mode::Riddle, false) => format!("Not quite! The answer was '{expected}'."),
            // grade_answer is only called for Quiz and Riddle.
            (Mode::Idle | Mode::Sorting, _) => unreachable!("grading outside quiz/riddle mode"),
        };
        Ok(reply)
    }

    fn dispatch_intent(&mut self, session: &mut DialogueSession, intent: Intent) -> SpellResult<String> {
        match intent {
            Intent::FetchTrivia => {
                let item = self
                    .trivia
                    .pick(&mut *self.rng)
                    .ok_or(EngineError::EmptyPool { pool: "trivia" })?;
                let reply = format!("Here's a trivia question for you: {}", item.prompt);
                session.open_question(Mode::Quiz, item.prompt.clone(), item.answer.clone());
                Ok(reply)
            }
            Intent::FetchRiddles => {
                let item = self
                    .riddles
                    .pick(&mut *self.rng)
                    .ok_or(EngineError::EmptyPool { pool: "riddle" })?;
                let reply = format!("Here's a riddle for you: {}", item.prompt);
                session.open_question(Mode::Riddle, item.prompt.clone(), item.answer.clone());
                Ok(reply)
            }
            Intent::FetchMovie => {
                let index = self.rng.gen_range(0..MOVIES.len());
                Ok(MOVIES[index].to_string())
            }
            Intent::FetchWeather => Ok(WEATHER_RESPONSE.to_string()),
            Intent::FetchKnowledge => Ok(KNOWLEDGE_RESPONSE.to_string()),
            Intent::FetchHistory => Ok(HISTORY_RESPONSE.to_string()),
            Intent::FetchExplanation => Ok(EXPLANATION_RESPONSE.to_string()),
            Intent::CheerUser => Ok(CHEER_RESPONSE.to_string()),
            Intent::EndConversation => Ok(GOODBYE_RESPONSE.to_string()),
            Intent::GiveAdvice => Ok(ADVICE_RESPONSE.to_string()),
            Intent::FetchFunFact => Ok(FUN_FACT_RESPONSE.to_string()),
            Intent::FetchJoke => Ok(JOKE_RESPONSE.to_string()),
            Intent::FetchProphecy => Ok(PROPHECY_RESPONSE.to_string()),
            Intent::FetchDetails => Ok(DETAILS_RESPONSE.to_string()),
        }
    }
}

impl std::fmt::Debug for Responder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Responder")
            .field("commands", &self.catalog.len())
            .field("phrases", &self.phrases.len())
            .field("trivia", &self.trivia.len())
            .field("riddles", &self.riddles.len())
            .finish_non_exhaustive()
    }
}
