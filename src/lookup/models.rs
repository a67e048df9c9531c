//! Data models for word lookups

use serde::{Deserialize, Serialize};

use crate::vocab::{EntryId, VocabEntry};

/// Tag shown when the part of speech could not be determined
pub const UNKNOWN_PART_OF_SPEECH: &str = "?";

/// Best-effort dictionary data for a word, used to pre-fill the add form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub meaning: String,
    pub part_of_speech: String,
    #[serde(default)]
    pub example: String,
}

impl Suggestion {
    /// A suggestion without a meaning carries nothing worth adding
    pub fn is_empty(&self) -> bool {
        self.meaning.trim().is_empty()
    }

    pub fn part_of_speech_or_unknown(&self) -> &str {
        let tag = self.part_of_speech.trim();
        if tag.is_empty() {
            UNKNOWN_PART_OF_SPEECH
        } else {
            tag
        }
    }
}

/// What a lookup found
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum LookupOutcome {
    /// Nothing was typed
    Empty,
    /// Already in the notebook
    Known {
        id: EntryId,
        entry: VocabEntry,
        #[serde(skip)]
        audio: Option<Vec<u8>>,
    },
    /// Not in the notebook, dictionary data available
    Resolved {
        word: String,
        suggestion: Suggestion,
        #[serde(skip)]
        audio: Option<Vec<u8>>,
    },
    /// Not in the notebook and the dictionary had nothing
    Unresolved {
        word: String,
        #[serde(skip)]
        audio: Option<Vec<u8>>,
    },
}

impl LookupOutcome {
    pub fn audio(&self) -> Option<&[u8]> {
        match self {
            LookupOutcome::Empty => None,
            LookupOutcome::Known { audio, .. }
            | LookupOutcome::Resolved { audio, .. }
            | LookupOutcome::Unresolved { audio, .. } => audio.as_deref(),
        }
    }
}
