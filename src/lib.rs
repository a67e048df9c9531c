pub mod config;
pub mod lookup;
pub mod review;
pub mod vocab;

pub use config::{Config, ConfigError, ReviewConfig};
pub use review::{Recall, ReviewError, ReviewSession, ReviewState, Scheduler};
pub use vocab::{EntryId, VocabEntry, VocabStore};
