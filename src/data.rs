//! Tolerant catalog loading from CSV files.
//!
//! Four catalogs feed the responder: spell commands, trivia questions,
//! riddles, and small-talk phrases. Files are decoded as UTF-8 with one
//! retry as Windows-1252; rows missing required fields (or naming an
//! unknown intent) are skipped with a diagnostic, never fatally.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::catalog::{Intent, IntentCatalog};
use crate::error::DataError;
use crate::phrases::PhraseTable;
use crate::pool::QaPool;

/// Default file names inside a data directory.
pub const COMMANDS_FILE: &str = "spell_commands.csv";
pub const TRIVIA_FILE: &str = "trivia_questions.csv";
pub const RIDDLES_FILE: &str = "riddles.csv";
pub const PHRASES_FILE: &str = "magical_responses.csv";

/// Everything the responder needs, loaded from one directory.
#[derive(Debug)]
pub struct Catalogs {
    pub commands: IntentCatalog,
    pub phrases: PhraseTable,
    pub trivia: QaPool,
    pub riddles: QaPool,
}

impl Catalogs {
    /// Load all four catalogs from `dir`, using the default file names.
    pub fn load_dir(dir: &Path) -> Result<Self, DataError> {
        let catalogs = Self {
            commands: load_commands(&dir.join(COMMANDS_FILE))?,
            phrases: load_phrases(&dir.join(PHRASES_FILE))?,
            trivia: load_qa_pool(&dir.join(TRIVIA_FILE), "Question")?,
            riddles: load_qa_pool(&dir.join(RIDDLES_FILE), "Riddle")?,
        };
        tracing::info!(
            commands = catalogs.commands.len(),
            phrases = catalogs.phrases.len(),
            trivia = catalogs.trivia.len(),
            riddles = catalogs.riddles.len(),
            "catalogs loaded"
        );
        Ok(catalogs)
    }
}

/// Read a file and decode it as UTF-8, retrying once as Windows-1252.
fn decode_file(path: &Path) -> Result<String, DataError> {
    let bytes = fs::read(path).map_err(|source| DataError::Io {
        path: path.display().to_string(),
        source,
    })?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                "file is not valid UTF-8, retrying as Windows-1252"
            );
            let (text, _, had_errors) = encoding_rs::WINDOWS_1252.decode(err.as_bytes());
            if had_errors {
                return Err(DataError::Decode {
                    path: path.display().to_string(),
                });
            }
            Ok(text.into_owned())
        }
    }
}

#[derive(Debug, Deserialize)]
struct CommandRow {
    #[serde(rename = "Command")]
    command: String,
    #[serde(rename = "Intent")]
    intent: String,
}

/// Load the command catalog from `path`.
pub fn load_commands(path: &Path) -> Result<IntentCatalog, DataError> {
    let text = decode_file(path)?;
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let mut catalog = IntentCatalog::new();
    for (row, record) in reader.deserialize::<CommandRow>().enumerate() {
        match record {
            Ok(entry) => match Intent::parse(&entry.intent) {
                Some(intent) => catalog.push(&entry.command, intent),
                None => tracing::warn!(
                    path = %path.display(),
                    row,
                    intent = %entry.intent,
                    "unknown intent identifier, skipping row"
                ),
            },
            Err(err) => tracing::warn!(
                path = %path.display(),
                row,
                error = %err,
                "malformed command row, skipping"
            ),
        }
    }
    Ok(catalog)
}

#[derive(Debug, Deserialize)]
struct PhraseRow {
    #[serde(rename = "Input Phrase")]
    phrase: String,
    #[serde(rename = "Response")]
    response: String,
}

/// Load the small-talk phrase table from `path`.
pub fn load_phrases(path: &Path) -> Result<PhraseTable, DataError> {
    let text = decode_file(path)?;
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let mut table = PhraseTable::new();
    for (row, record) in reader.deserialize::<PhraseRow>().enumerate() {
        match record {
            Ok(entry) => table.push(&entry.phrase, &entry.response),
            Err(err) => tracing::warn!(
                path = %path.display(),
                row,
                error = %err,
                "malformed phrase row, skipping"
            ),
        }
    }
    Ok(table)
}

/// Load a question/answer pool from `path`.
///
/// The prompt column differs between files ("Question" for trivia,
/// "Riddle" for riddles); the answer column is always "Answer". Rows are
/// read as loose maps so a missing column is a row diagnostic rather than
/// a file failure.
pub fn load_qa_pool(path: &Path, prompt_column: &str) -> Result<QaPool, DataError> {
    let text = decode_file(path)?;
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let mut pool = QaPool::new();
    for (row, record) in reader.deserialize::<HashMap<String, String>>().enumerate() {
        match record {
            Ok(fields) => {
                let prompt = fields.get(prompt_column).map(String::as_str).unwrap_or("");
                let answer = fields.get("Answer").map(String::as_str).unwrap_or("");
                if prompt.is_empty() || answer.is_empty() {
                    tracing::warn!(
                        path = %path.display(),
                        row,
                        "row is missing {prompt_column} or Answer, skipping"
                    );
                    continue;
                }
                pool.push(prompt, answer);
            }
            Err(err) => tracing::warn!(
                path = %path.display(),
                row,
                error = %err,
                "malformed question row, skipping"
            ),
        }
    }
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents).unwrap();
        path
    }

    #[test]
    fn loads_commands_and_skips_bad_rows() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_file(
            dir.path(),
            "commands.csv",
            b"Command,Intent\n\
              tell me a riddle,fetch_riddles\n\
              tell me a joke,not_a_real_intent\n\
              cheer me up,cheer_user\n",
        );
        let catalog = load_commands(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.classify("tell me a riddle"),
            Some(Intent::FetchRiddles)
        );
    }

    #[test]
    fn loads_qa_pool_and_skips_incomplete_rows() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_file(
            dir.path(),
            "riddles.csv",
            b"Riddle,Answer\n\
              What has keys but cannot open locks?,A piano\n\
              An incomplete riddle,\n",
        );
        let pool = load_qa_pool(&path, "Riddle").unwrap();
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn falls_back_to_windows_1252() {
        let dir = tempfile::TempDir::new().unwrap();
        // "Café" with a Latin-1 é (0xE9): invalid as UTF-8.
        let path = write_file(
            dir.path(),
            "phrases.csv",
            b"Input Phrase,Response\nhow is the caf\xe9,It is lovely today\n",
        );
        let table = load_phrases(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.respond("caf\u{e9}"), Some("It is lovely today"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = load_commands(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }

    #[test]
    fn load_dir_bundles_all_catalogs() {
        let dir = tempfile::TempDir::new().unwrap();
        write_file(
            dir.path(),
            COMMANDS_FILE,
            b"Command,Intent\ntell me a riddle,fetch_riddles\n",
        );
        write_file(
            dir.path(),
            TRIVIA_FILE,
            b"Question,Answer\nWho is the headmaster?,Albus Dumbledore\n",
        );
        write_file(
            dir.path(),
            RIDDLES_FILE,
            b"Riddle,Answer\nWhat am I?,An echo\n",
        );
        write_file(
            dir.path(),
            PHRASES_FILE,
            b"Input Phrase,Response\nhow are you doing today,Enchanted as always!\n",
        );

        let catalogs = Catalogs::load_dir(dir.path()).unwrap();
        assert_eq!(catalogs.commands.len(), 1);
        assert_eq!(catalogs.trivia.len(), 1);
        assert_eq!(catalogs.riddles.len(), 1);
        assert_eq!(catalogs.phrases.len(), 1);
    }
}
