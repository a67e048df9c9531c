//! Daily review scheduling
//!
//! Once per day the due entries are collected, capped to a random sample
//! and shuffled into the session queue. The queue is kept for the rest of
//! the day, even after it runs empty.

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::algorithm::{apply_review, Recall, ReviewResult};
use super::session::{ReviewError, ReviewSession};
use crate::config::ReviewConfig;
use crate::vocab::{EntryId, VocabEntry, VocabStore};

/// Entries due on `today`, in insertion order
pub fn due_entries(store: &VocabStore, today: NaiveDate) -> Vec<EntryId> {
    store
        .iter()
        .filter(|(_, entry)| entry.is_due(today))
        .map(|(id, _)| id)
        .collect()
}

/// Seed for the daily sample, an FNV-1a hash of the ISO date
pub fn daily_seed(date: NaiveDate) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

    date.format("%Y-%m-%d")
        .to_string()
        .bytes()
        .fold(FNV_OFFSET, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
        })
}

/// Uniform sample of at most `cap` entries, without replacement
pub fn sample_due<R: Rng + ?Sized>(due: Vec<EntryId>, cap: usize, rng: &mut R) -> Vec<EntryId> {
    if due.len() <= cap {
        return due;
    }
    due.choose_multiple(rng, cap).copied().collect()
}

/// Select today's entries and put them in review order
pub fn build_queue<S, R>(
    store: &VocabStore,
    today: NaiveDate,
    cap: usize,
    sample_rng: &mut S,
    shuffle_rng: &mut R,
) -> Vec<EntryId>
where
    S: Rng + ?Sized,
    R: Rng + ?Sized,
{
    let due = due_entries(store, today);
    let due_count = due.len();

    let mut queue = sample_due(due, cap, sample_rng);
    queue.shuffle(shuffle_rng);

    log::info!(
        "{} entries due on {}, {} selected for review",
        due_count,
        today,
        queue.len()
    );
    queue
}

fn draw_session<R: Rng + ?Sized>(
    config: &ReviewConfig,
    store: &VocabStore,
    today: NaiveDate,
    shuffle_rng: &mut R,
) -> ReviewSession {
    let queue = if config.seed_daily_sample {
        let mut sample_rng = ChaCha8Rng::seed_from_u64(daily_seed(today));
        build_queue(store, today, config.daily_cap, &mut sample_rng, shuffle_rng)
    } else {
        build_queue(
            store,
            today,
            config.daily_cap,
            &mut rand::thread_rng(),
            shuffle_rng,
        )
    };
    ReviewSession::draw(today, queue, store)
}

/// An entry that was just graded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradedEntry {
    pub id: EntryId,
    pub word: String,
    pub recall: Recall,
    pub result: ReviewResult,
}

/// Owns the day's session and applies grades to the store
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    config: ReviewConfig,
    session: Option<ReviewSession>,
}

impl Scheduler {
    pub fn new(config: ReviewConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    /// Pick up a session kept from an earlier run
    pub fn with_session(config: ReviewConfig, session: Option<ReviewSession>) -> Self {
        Self { config, session }
    }

    pub fn config(&self) -> &ReviewConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&ReviewSession> {
        self.session.as_ref()
    }

    /// Enter review mode: reuse today's session or draw a new one
    pub fn start_or_resume(&mut self, store: &VocabStore, today: NaiveDate) -> &ReviewSession {
        self.start_or_resume_with(store, today, &mut rand::thread_rng())
    }

    /// Like [`Scheduler::start_or_resume`] with a caller-provided shuffle source
    pub fn start_or_resume_with<R: Rng + ?Sized>(
        &mut self,
        store: &VocabStore,
        today: NaiveDate,
        shuffle_rng: &mut R,
    ) -> &ReviewSession {
        if let Some(session) = &self.session {
            if session.date() != today {
                log::info!("Discarding review session from {}", session.date());
                self.session = None;
            } else {
                log::debug!(
                    "Resuming review session, {} entries left",
                    session.remaining_len()
                );
            }
        }

        let config = self.config;
        let session = self
            .session
            .get_or_insert_with(|| draw_session(&config, store, today, shuffle_rng));

        session.skip_missing(store);
        session
    }

    /// Today's session without entering review mode: the kept one, or a
    /// draw that is thrown away. With a seeded sample the drawn entries
    /// match what review mode would pick, in another order.
    pub fn preview(&self, store: &VocabStore, today: NaiveDate) -> ReviewSession {
        let mut session = match &self.session {
            Some(session) if session.date() == today => session.clone(),
            _ => draw_session(&self.config, store, today, &mut rand::thread_rng()),
        };
        session.hide();
        session.skip_missing(store);
        session
    }

    /// Active entry, skipping any that left the store
    pub fn current<'s>(&mut self, store: &'s VocabStore) -> Option<(EntryId, &'s VocabEntry)> {
        let session = self.session.as_mut()?;
        session.skip_missing(store);
        let id = session.current()?;
        store.get(id).map(|entry| (id, entry))
    }

    /// Show the answer side of the active entry
    pub fn reveal_answer<'s>(
        &mut self,
        store: &'s VocabStore,
    ) -> Result<(EntryId, &'s VocabEntry), ReviewError> {
        let session = self.session.as_mut().ok_or(ReviewError::NoSession)?;
        session.skip_missing(store);
        let id = session.current().ok_or(ReviewError::Finished)?;
        let entry = store.get(id).ok_or(ReviewError::Finished)?;
        session.reveal()?;
        Ok((id, entry))
    }

    /// Grade the revealed entry, write its new schedule into the store and
    /// move to the next one
    pub fn grade_current(
        &mut self,
        store: &mut VocabStore,
        recall: Recall,
        today: NaiveDate,
    ) -> Result<GradedEntry, ReviewError> {
        let growth_factor = self.config.growth_factor;
        let session = self.session.as_mut().ok_or(ReviewError::NoSession)?;
        session.skip_missing(store);

        let id = session.current().ok_or(ReviewError::Finished)?;
        if !session.is_revealed() {
            return Err(ReviewError::AnswerHidden);
        }

        let entry = store.get_mut(id).ok_or(ReviewError::Finished)?;
        let result = apply_review(entry, recall, today, growth_factor);
        let word = entry.word.clone();

        session.advance();
        session.skip_missing(store);

        log::debug!(
            "Graded '{}' as {:?}, next review {} (interval {})",
            word,
            recall,
            result.next_review,
            result.interval
        );

        Ok(GradedEntry {
            id,
            word,
            recall,
            result,
        })
    }

    /// Leave review mode. Graded entries stay graded; the active entry goes
    /// back to its question side.
    pub fn leave(&mut self) {
        if let Some(session) = &mut self.session {
            session.hide();
        }
    }

    /// Forget the session so the next start draws a fresh queue
    pub fn reset(&mut self) {
        self.session = None;
    }
}
