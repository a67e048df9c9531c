//! Review session state machine
//!
//! ```text
//! QUESTION --reveal--> ANSWER --grade--> QUESTION (next entry)
//!                                   \--> DONE (queue empty)
//! ```
//! Only the front of the queue is active. Each queued identifier keeps the
//! spelling it was drawn with; one that no longer resolves to that spelling
//! (the row was removed or the file reordered) is dropped from the front
//! without a transition.

use std::collections::VecDeque;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vocab::{EntryId, VocabEntry, VocabStore};

/// Misuse of the review operations. None of these change session state.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewError {
    #[error("No review session has been started")]
    NoSession,

    #[error("The answer has not been revealed yet")]
    AnswerHidden,

    #[error("Today's review session is finished")]
    Finished,

    #[error("Invalid recall quality: {0} (expected 0 or 1)")]
    InvalidQuality(u8),
}

/// Which side of the active entry is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReviewState {
    Question,
    Answer,
    Done,
}

/// A queued entry together with the spelling it was drawn with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedEntry {
    pub id: EntryId,
    pub word: String,
}

impl QueuedEntry {
    pub fn new(id: EntryId, word: impl Into<String>) -> Self {
        Self {
            id,
            word: word.into(),
        }
    }

    /// The store entry this still points at, if the spelling matches
    pub fn resolve<'s>(&self, store: &'s VocabStore) -> Option<&'s VocabEntry> {
        store.get(self.id).filter(|entry| entry.word == self.word)
    }
}

/// One day's review sitting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSession {
    date: NaiveDate,
    total: usize,
    queue: VecDeque<QueuedEntry>,
    /// Not persisted: a resumed session starts at the question side
    #[serde(skip)]
    revealed: bool,
}

impl ReviewSession {
    /// Start a session over an already ordered queue
    pub fn new(date: NaiveDate, queue: Vec<QueuedEntry>) -> Self {
        Self {
            date,
            total: queue.len(),
            queue: queue.into(),
            revealed: false,
        }
    }

    /// Start a session over identifiers drawn from `store`
    pub fn draw(date: NaiveDate, ids: Vec<EntryId>, store: &VocabStore) -> Self {
        let queue = ids
            .into_iter()
            .filter_map(|id| store.get(id).map(|entry| QueuedEntry::new(id, &entry.word)))
            .collect();
        Self::new(date, queue)
    }

    /// Day the queue was drawn for
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn state(&self) -> ReviewState {
        match (self.queue.is_empty(), self.revealed) {
            (true, _) => ReviewState::Done,
            (false, false) => ReviewState::Question,
            (false, true) => ReviewState::Answer,
        }
    }

    pub fn is_done(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Active entry, if any
    pub fn current(&self) -> Option<EntryId> {
        self.queue.front().map(|queued| queued.id)
    }

    /// Entries still waiting, the active one first
    pub fn remaining(&self) -> impl Iterator<Item = EntryId> + '_ {
        self.queue.iter().map(|queued| queued.id)
    }

    /// Waiting entries that still resolve in `store`
    pub fn remaining_in<'a>(
        &'a self,
        store: &'a VocabStore,
    ) -> impl Iterator<Item = (EntryId, &'a VocabEntry)> + 'a {
        self.queue
            .iter()
            .filter_map(move |queued| queued.resolve(store).map(|entry| (queued.id, entry)))
    }

    pub fn remaining_len(&self) -> usize {
        self.queue.len()
    }

    /// `(reviewed, total)` where skipped entries count as reviewed
    pub fn progress(&self) -> (usize, usize) {
        (self.total.saturating_sub(self.queue.len()), self.total)
    }

    /// Share of the session behind us, in `[0, 1]`
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            return 1.0;
        }
        let (reviewed, total) = self.progress();
        (reviewed as f32 / total as f32).clamp(0.0, 1.0)
    }

    /// QUESTION -> ANSWER
    pub fn reveal(&mut self) -> Result<(), ReviewError> {
        if self.queue.is_empty() {
            return Err(ReviewError::Finished);
        }
        self.revealed = true;
        Ok(())
    }

    /// Back to the question side without grading
    pub fn hide(&mut self) {
        self.revealed = false;
    }

    /// Drop leading entries the store cannot resolve
    pub fn skip_missing(&mut self, store: &VocabStore) -> usize {
        let mut skipped = 0;
        while let Some(queued) = self.queue.front() {
            if queued.resolve(store).is_some() {
                break;
            }
            log::debug!(
                "Skipping '{}' ({}) which is no longer in the notebook",
                queued.word,
                queued.id
            );
            self.queue.pop_front();
            self.revealed = false;
            skipped += 1;
        }
        skipped
    }

    /// ANSWER -> next QUESTION or DONE, returning the graded identifier
    pub(crate) fn advance(&mut self) -> Option<EntryId> {
        self.revealed = false;
        self.queue.pop_front().map(|queued| queued.id)
    }
}
