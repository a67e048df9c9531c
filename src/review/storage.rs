//! Storage for the day's review session
//!
//! The session is kept in a single JSON file so that quitting and restarting
//! on the same day resumes the same queue.

use std::fs;
use std::io;
use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use super::session::ReviewSession;

#[derive(Error, Debug)]
pub enum SessionStorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SessionStorageError>;

/// Storage manager for the review session file
pub struct SessionStorage {
    path: PathBuf,
}

impl SessionStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the stored session if it was drawn on `today`
    pub fn load(&self, today: NaiveDate) -> Result<Option<ReviewSession>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let session: ReviewSession = serde_json::from_str(&content)?;
        if session.date() != today {
            log::debug!("Stored session is from {}, ignoring it", session.date());
            return Ok(None);
        }

        Ok(Some(session))
    }

    pub fn save(&self, session: &ReviewSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(session)?)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
