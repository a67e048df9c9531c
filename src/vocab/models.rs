//! Data models for the vocabulary notebook

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Column order of the vocabulary file
pub const COLUMNS: [&str; 7] = [
    "word",
    "meaning",
    "gender",
    "example",
    "last_review",
    "next_review",
    "interval",
];

/// Date-only layouts accepted when reading the vocabulary file
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];

/// Timestamp layouts written by spreadsheet tools that keep a time part
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Identifier of an entry: its position in the store.
///
/// Entries are only ever appended, so a position stays valid for the life of
/// the file it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub usize);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A learned word together with its review schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabEntry {
    pub word: String,
    pub meaning: String,
    /// Free-form grammatical tag (gender or part of speech)
    pub gender: String,
    #[serde(default)]
    pub example: String,
    /// Day of the last graded review, none until the first one
    #[serde(default)]
    pub last_review: Option<NaiveDate>,
    /// Day the entry becomes due
    pub next_review: NaiveDate,
    /// Days between `last_review` and `next_review`
    #[serde(default)]
    pub interval: u32,
}

impl VocabEntry {
    /// Create a fresh entry, due immediately
    pub fn new(
        word: String,
        meaning: String,
        gender: String,
        example: String,
        today: NaiveDate,
    ) -> Self {
        Self {
            word,
            meaning,
            gender,
            example,
            last_review: None,
            next_review: today,
            interval: 0,
        }
    }

    /// Check if the entry is due for review on `today`
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.next_review <= today
    }

    /// Never grown by a successful review
    pub fn is_new(&self) -> bool {
        self.interval == 0
    }

    /// Case-insensitive spelling comparison
    pub fn is_spelled(&self, word: &str) -> bool {
        self.word.to_lowercase() == word.to_lowercase()
    }
}

/// One record of the vocabulary file, every field kept as written
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabRow {
    pub word: String,
    pub meaning: String,
    pub gender: String,
    pub example: String,
    pub last_review: String,
    pub next_review: String,
    pub interval: String,
}

impl VocabRow {
    /// Normalize the raw record into an entry.
    ///
    /// An empty or unreadable `next_review` becomes `today`, an unreadable
    /// `last_review` becomes none and an unreadable `interval` becomes 0.
    pub fn into_entry(self, today: NaiveDate) -> VocabEntry {
        let next_review = match parse_date(&self.next_review) {
            Some(date) => date,
            None => {
                if !self.next_review.trim().is_empty() {
                    log::warn!(
                        "Unreadable next_review '{}' for '{}', treating as due today",
                        self.next_review,
                        self.word
                    );
                }
                today
            }
        };

        let last_review = parse_date(&self.last_review);
        if last_review.is_none() && !self.last_review.trim().is_empty() {
            log::warn!(
                "Unreadable last_review '{}' for '{}', dropping it",
                self.last_review,
                self.word
            );
        }

        let interval = parse_interval(&self.interval).unwrap_or_else(|| {
            if !self.interval.trim().is_empty() {
                log::warn!(
                    "Unreadable interval '{}' for '{}', resetting to 0",
                    self.interval,
                    self.word
                );
            }
            0
        });

        VocabEntry {
            word: self.word,
            meaning: self.meaning,
            gender: self.gender,
            example: self.example,
            last_review,
            next_review,
            interval,
        }
    }
}

impl From<&VocabEntry> for VocabRow {
    fn from(entry: &VocabEntry) -> Self {
        Self {
            word: entry.word.clone(),
            meaning: entry.meaning.clone(),
            gender: entry.gender.clone(),
            example: entry.example.clone(),
            last_review: entry
                .last_review
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            next_review: entry.next_review.format("%Y-%m-%d").to_string(),
            interval: entry.interval.to_string(),
        }
    }
}

/// Parse a calendar date, accepting ISO dates and common timestamp forms
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Some(datetime.date());
        }
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Parse a stored interval; float spellings such as `3.0` are floored
fn parse_interval(value: &str) -> Option<u32> {
    let value = value.trim();
    if let Ok(days) = value.parse::<u32>() {
        return Some(days);
    }

    match value.parse::<f64>() {
        Ok(days) if days.is_finite() && days >= 0.0 => Some(days.floor() as u32),
        _ => None,
    }
}

/// Counts shown on the statistics screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabStats {
    pub total: usize,
    pub due: usize,
    /// Entries that have never grown (`interval == 0`)
    pub new: usize,
    pub learned: usize,
}
