//! Dictionary and speech collaborators
//!
//! Both are best-effort. Their errors are folded into "no data" by
//! [`resolve`] and [`speak`] and never reach the review code.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;

use super::models::Suggestion;
use crate::vocab::storage::{read_rows, VocabStorageError};

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Glossary error: {0}")]
    Glossary(#[from] VocabStorageError),

    #[error("No entry for '{0}'")]
    NotFound(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, LookupError>;

/// Translation / part-of-speech source
pub trait Dictionary {
    fn lookup(&self, word: &str) -> Result<Suggestion>;
}

/// Pronunciation source, returning playable audio bytes
pub trait Speech {
    fn synthesize(&self, text: &str) -> Result<Vec<u8>>;
}

/// Look a word up, treating any failure or empty meaning as no data
pub fn resolve(dictionary: &dyn Dictionary, word: &str) -> Option<Suggestion> {
    match dictionary.lookup(word) {
        Ok(suggestion) if !suggestion.is_empty() => Some(suggestion),
        Ok(_) => None,
        Err(LookupError::NotFound(_)) => None,
        Err(e) => {
            log::warn!("Dictionary lookup for '{}' failed: {}", word, e);
            None
        }
    }
}

/// Synthesize speech, treating any failure as silence
pub fn speak(speech: &dyn Speech, text: &str) -> Option<Vec<u8>> {
    if text.trim().is_empty() {
        return None;
    }
    match speech.synthesize(text) {
        Ok(audio) if !audio.is_empty() => Some(audio),
        Ok(_) => None,
        Err(e) => {
            log::debug!("No audio for '{}': {}", text, e);
            None
        }
    }
}

/// Dictionary that knows nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDictionary;

impl Dictionary for NoDictionary {
    fn lookup(&self, word: &str) -> Result<Suggestion> {
        Err(LookupError::NotFound(word.to_string()))
    }
}

/// Speech provider that never produces audio
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Speech for Silent {
    fn synthesize(&self, _text: &str) -> Result<Vec<u8>> {
        Err(LookupError::Unavailable("speech synthesis is not configured".to_string()))
    }
}

/// Offline dictionary read from a CSV with `word, meaning, gender, example`
/// columns, the same layout as the vocabulary file
#[derive(Debug, Clone, Default)]
pub struct Glossary {
    entries: HashMap<String, Suggestion>,
}

impl Glossary {
    pub fn open(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        let rows = read_rows(file)?;

        let mut entries = HashMap::with_capacity(rows.len());
        for row in rows {
            let key = row.word.trim().to_lowercase();
            if key.is_empty() {
                continue;
            }
            // the first sense listed wins
            entries.entry(key).or_insert(Suggestion {
                meaning: row.meaning.trim().to_string(),
                part_of_speech: row.gender.trim().to_string(),
                example: row.example.trim().to_string(),
            });
        }

        log::info!("Loaded glossary with {} words from {:?}", entries.len(), path);
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Dictionary for Glossary {
    fn lookup(&self, word: &str) -> Result<Suggestion> {
        self.entries
            .get(&word.trim().to_lowercase())
            .cloned()
            .ok_or_else(|| LookupError::NotFound(word.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct Offline;

    impl Dictionary for Offline {
        fn lookup(&self, _word: &str) -> Result<Suggestion> {
            Err(LookupError::Unavailable("no network".to_string()))
        }
    }

    impl Speech for Offline {
        fn synthesize(&self, _text: &str) -> Result<Vec<u8>> {
            Err(LookupError::Unavailable("no network".to_string()))
        }
    }

    struct Blank;

    impl Dictionary for Blank {
        fn lookup(&self, _word: &str) -> Result<Suggestion> {
            Ok(Suggestion::default())
        }
    }

    fn glossary(content: &str) -> (TempDir, Glossary) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("glossary.csv");
        fs::write(&path, content).unwrap();
        let glossary = Glossary::open(&path).unwrap();
        (temp_dir, glossary)
    }

    #[test]
    fn test_failures_fold_to_no_data() {
        assert_eq!(resolve(&Offline, "chat"), None);
        assert_eq!(resolve(&NoDictionary, "chat"), None);
        assert_eq!(resolve(&Blank, "chat"), None);
        assert_eq!(speak(&Offline, "chat"), None);
        assert_eq!(speak(&Silent, "chat"), None);
    }

    #[test]
    fn test_glossary_lookup_ignores_case() {
        let (_dir, glossary) = glossary(
            "word,meaning,gender,example\n\
             Chat,cat,m.,Le chat dort.\n\
             chat,chat (talk),m.,\n\
             maison,house,f.,\n",
        );

        assert_eq!(glossary.len(), 2);
        let suggestion = resolve(&glossary, " CHAT ").unwrap();
        assert_eq!(suggestion.meaning, "cat");
        assert_eq!(suggestion.part_of_speech, "m.");
        assert_eq!(suggestion.example, "Le chat dort.");
        assert!(resolve(&glossary, "chien").is_none());
    }

    #[test]
    fn test_glossary_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(matches!(
            Glossary::open(&temp_dir.path().join("absent.csv")),
            Err(LookupError::Io(_))
        ));
    }

    #[test]
    fn test_unknown_part_of_speech() {
        let suggestion = Suggestion {
            meaning: "cat".to_string(),
            ..Default::default()
        };
        assert_eq!(suggestion.part_of_speech_or_unknown(), "?");
    }
}
