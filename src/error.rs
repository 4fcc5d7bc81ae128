//! Diagnostic error types for the spellbinder engine.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]`
//! derives, providing error codes and help text, and the top-level
//! [`SpellError`] preserves the full diagnostic chain through to the caller.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the spellbinder engine.
#[derive(Debug, Error, Diagnostic)]
pub enum SpellError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Engine(#[from] EngineError),
}

// ---------------------------------------------------------------------------
// Data loading errors
// ---------------------------------------------------------------------------

/// Errors raised while loading command/phrase/question catalogs.
///
/// Row-level problems (missing fields, unknown intents) are *not* errors:
/// they are skipped with a diagnostic and the catalog simply has fewer
/// entries. Only file-level failures surface here.
#[derive(Debug, Error, Diagnostic)]
pub enum DataError {
    #[error("cannot read catalog file: {path}")]
    #[diagnostic(
        code(spellbinder::data::io),
        help("Check that the file exists and is readable, or point --data-dir at the directory containing the catalogs.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode catalog file: {path}")]
    #[diagnostic(
        code(spellbinder::data::decode),
        help(
            "The file was read as UTF-8 and, after that failed, as Windows-1252. \
             Re-save the file in UTF-8."
        )
    )]
    Decode { path: String },
}

// ---------------------------------------------------------------------------
// Engine errors
// ---------------------------------------------------------------------------

/// Errors raised while handling a message.
#[derive(Debug, Error, Diagnostic)]
pub enum EngineError {
    #[error("the {pool} pool is empty: nothing to ask")]
    #[diagnostic(
        code(spellbinder::engine::empty_pool),
        help(
            "A quiz or riddle was requested but the question pool has no entries. \
             Load at least one row into the corresponding catalog file."
        )
    )]
    EmptyPool { pool: &'static str },

    #[error("invalid session state: mode is {mode} but the expected sub-dialogue state is missing")]
    #[diagnostic(
        code(spellbinder::engine::invalid_state),
        help(
            "The session's mode field says a sub-dialogue is open, but its pending \
             answer (or questionnaire state) is absent. Sessions must only be mutated \
             through Responder::handle_message; rebuild the session and retry."
        )
    )]
    InvalidSessionState { mode: String },
}

/// Convenience alias for functions returning spellbinder results.
pub type SpellResult<T> = std::result::Result<T, SpellError>;
