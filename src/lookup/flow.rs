//! Lookup-then-add flow

use super::models::LookupOutcome;
use super::provider::{resolve, speak, Dictionary, Speech};
use crate::vocab::VocabStore;

/// Look `query` up: first in the notebook, then in the dictionary.
///
/// Pronunciation is requested for every non-empty query.
pub fn look_up(
    store: &VocabStore,
    dictionary: &dyn Dictionary,
    speech: &dyn Speech,
    query: &str,
) -> LookupOutcome {
    let word = query.trim();
    if word.is_empty() {
        return LookupOutcome::Empty;
    }

    let audio = speak(speech, word);

    if let Some((id, entry)) = store.find_by_spelling(word) {
        return LookupOutcome::Known {
            id,
            entry: entry.clone(),
            audio,
        };
    }

    match resolve(dictionary, word) {
        Some(suggestion) => LookupOutcome::Resolved {
            word: word.to_string(),
            suggestion,
            audio,
        },
        None => LookupOutcome::Unresolved {
            word: word.to_string(),
            audio,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::models::Suggestion;
    use crate::lookup::provider::{LookupError, NoDictionary, Result, Silent};
    use chrono::NaiveDate;
    use std::cell::RefCell;

    /// Dictionary answering every word, recording what it was asked
    #[derive(Default)]
    struct Echo {
        asked: RefCell<Vec<String>>,
    }

    impl Dictionary for Echo {
        fn lookup(&self, word: &str) -> Result<Suggestion> {
            self.asked.borrow_mut().push(word.to_string());
            Ok(Suggestion {
                meaning: format!("meaning of {}", word),
                part_of_speech: "n.".to_string(),
                example: String::new(),
            })
        }
    }

    struct Beep;

    impl Speech for Beep {
        fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
            if text == "silence" {
                return Err(LookupError::Unavailable("quota".to_string()));
            }
            Ok(vec![0xff, 0xf3])
        }
    }

    fn store() -> VocabStore {
        let mut store = VocabStore::new();
        store.add_entry(
            "chat",
            "cat",
            "m.",
            "",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );
        store
    }

    #[test]
    fn test_empty_query() {
        assert_eq!(look_up(&store(), &NoDictionary, &Silent, "   "), LookupOutcome::Empty);
    }

    #[test]
    fn test_known_word_skips_dictionary() {
        let echo = Echo::default();
        let outcome = look_up(&store(), &echo, &Beep, " Chat ");

        match outcome {
            LookupOutcome::Known { entry, audio, .. } => {
                assert_eq!(entry.meaning, "cat");
                assert_eq!(audio, Some(vec![0xff, 0xf3]));
            }
            other => panic!("expected known word, got {:?}", other),
        }
        assert!(echo.asked.borrow().is_empty());
    }

    #[test]
    fn test_new_word_is_resolved() {
        let echo = Echo::default();
        let outcome = look_up(&store(), &echo, &Silent, "maison");

        match &outcome {
            LookupOutcome::Resolved { word, suggestion, .. } => {
                assert_eq!(word, "maison");
                assert_eq!(suggestion.meaning, "meaning of maison");
            }
            other => panic!("expected resolved word, got {:?}", other),
        }
        assert_eq!(outcome.audio(), None);
        assert_eq!(*echo.asked.borrow(), vec!["maison".to_string()]);
    }

    #[test]
    fn test_dictionary_failure_is_unresolved() {
        let outcome = look_up(&store(), &NoDictionary, &Beep, "silence");
        assert_eq!(
            outcome,
            LookupOutcome::Unresolved {
                word: "silence".to_string(),
                audio: None,
            }
        );
    }
}
