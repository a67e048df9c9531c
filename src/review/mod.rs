//! Spaced repetition review for Carnet
//!
//! This module provides:
//! - The interval growth rule (forgot resets to one day, remembered grows)
//! - Daily due-set selection with a capped, date-seeded sample
//! - The QUESTION / ANSWER / DONE session state machine
//! - Session persistence so a day's queue survives restarts

pub mod algorithm;
pub mod scheduler;
pub mod session;
pub mod storage;

pub use algorithm::{format_interval, Recall, ReviewResult, DAILY_CAP, GROWTH_FACTOR};
pub use scheduler::{GradedEntry, Scheduler};
pub use session::{QueuedEntry, ReviewError, ReviewSession, ReviewState};
pub use storage::{SessionStorage, SessionStorageError};
