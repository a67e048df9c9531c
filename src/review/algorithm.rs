//! Interval growth rule
//!
//! A simplified exponential backoff: a forgotten word comes back tomorrow,
//! a remembered one waits `interval * growth_factor` days (floored), starting
//! from one day. There is no ease factor and no per-word difficulty.
//!
//! Recall (binary):
//! - 0: Forgot
//! - 1: Remembered

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::session::ReviewError;
use crate::vocab::VocabEntry;

/// Interval multiplier after a remembered review
pub const GROWTH_FACTOR: f64 = 2.2;

/// Most entries drawn into one day's session
pub const DAILY_CAP: usize = 50;

/// Self-reported recall for one review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Recall {
    Forgot,
    Remembered,
}

impl Recall {
    pub fn quality(self) -> u8 {
        match self {
            Recall::Forgot => 0,
            Recall::Remembered => 1,
        }
    }
}

impl TryFrom<u8> for Recall {
    type Error = ReviewError;

    fn try_from(quality: u8) -> Result<Self, Self::Error> {
        match quality {
            0 => Ok(Recall::Forgot),
            1 => Ok(Recall::Remembered),
            q => Err(ReviewError::InvalidQuality(q)),
        }
    }
}

/// Result of calculating the next review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResult {
    pub interval: u32,
    pub last_review: NaiveDate,
    pub next_review: NaiveDate,
}

/// Interval after a review with the given recall
pub fn next_interval(current: u32, recall: Recall, growth_factor: f64) -> u32 {
    match recall {
        Recall::Forgot => 1,
        Recall::Remembered if current == 0 => 1,
        // float-to-int casts saturate
        Recall::Remembered => (current as f64 * growth_factor).floor() as u32,
    }
}

/// Calculate the schedule after reviewing on `today`
pub fn calculate_next_review(
    current_interval: u32,
    recall: Recall,
    today: NaiveDate,
    growth_factor: f64,
) -> ReviewResult {
    let interval = next_interval(current_interval, recall, growth_factor);
    let next_review = today
        .checked_add_days(Days::new(u64::from(interval)))
        .unwrap_or(NaiveDate::MAX);

    ReviewResult {
        interval,
        last_review: today,
        next_review,
    }
}

/// Apply a review to an entry in place
pub fn apply_review(
    entry: &mut VocabEntry,
    recall: Recall,
    today: NaiveDate,
    growth_factor: f64,
) -> ReviewResult {
    let result = calculate_next_review(entry.interval, recall, today, growth_factor);
    entry.interval = result.interval;
    entry.last_review = Some(result.last_review);
    entry.next_review = result.next_review;
    result
}

/// Intervals the two answers would give, for display before grading
pub fn preview_intervals(current: u32, growth_factor: f64) -> [u32; 2] {
    [
        next_interval(current, Recall::Forgot, growth_factor),
        next_interval(current, Recall::Remembered, growth_factor),
    ]
}

/// Format an interval in days to a human-readable string
pub fn format_interval(days: u32) -> String {
    match days {
        0 => "now".to_string(),
        1..=6 => format!("{}d", days),
        7..=29 => format!("{}w", days / 7),
        30..=364 => format!("{}mo", days / 30),
        _ => format!("{}y", days / 365),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(interval: u32) -> VocabEntry {
        let mut entry = VocabEntry::new(
            "chat".to_string(),
            "cat".to_string(),
            "m.".to_string(),
            String::new(),
            day(2024, 1, 1),
        );
        entry.interval = interval;
        entry
    }

    #[test]
    fn test_first_review_remembered() {
        assert_eq!(next_interval(0, Recall::Remembered, GROWTH_FACTOR), 1);
    }

    #[test]
    fn test_subsequent_review_remembered() {
        assert_eq!(next_interval(1, Recall::Remembered, GROWTH_FACTOR), 2);
        assert_eq!(next_interval(2, Recall::Remembered, GROWTH_FACTOR), 4);
        assert_eq!(next_interval(4, Recall::Remembered, GROWTH_FACTOR), 8);
        assert_eq!(next_interval(5, Recall::Remembered, GROWTH_FACTOR), 11);
        assert_eq!(next_interval(10, Recall::Remembered, GROWTH_FACTOR), 22);
        assert_eq!(next_interval(22, Recall::Remembered, GROWTH_FACTOR), 48);
    }

    #[test]
    fn test_forgot_resets() {
        for interval in [0, 1, 10, 300] {
            assert_eq!(next_interval(interval, Recall::Forgot, GROWTH_FACTOR), 1);
        }
    }

    #[test]
    fn test_huge_interval_saturates() {
        let interval = next_interval(u32::MAX, Recall::Remembered, GROWTH_FACTOR);
        assert_eq!(interval, u32::MAX);

        let result =
            calculate_next_review(u32::MAX, Recall::Remembered, day(2024, 1, 1), GROWTH_FACTOR);
        assert_eq!(result.next_review, NaiveDate::MAX);
    }

    #[test]
    fn test_chat_scenario() {
        let mut chat = entry(0);

        let result = apply_review(&mut chat, Recall::Remembered, day(2024, 1, 1), GROWTH_FACTOR);
        assert_eq!(result.interval, 1);
        assert_eq!(chat.last_review, Some(day(2024, 1, 1)));
        assert_eq!(chat.next_review, day(2024, 1, 2));
        assert_eq!(chat.interval, 1);

        apply_review(&mut chat, Recall::Remembered, day(2024, 1, 2), GROWTH_FACTOR);
        assert_eq!(chat.interval, 2);
        assert_eq!(chat.next_review, day(2024, 1, 4));
    }

    #[test]
    fn test_forgot_at_ten_comes_back_tomorrow() {
        let mut chat = entry(10);
        let today = day(2024, 2, 28);

        apply_review(&mut chat, Recall::Forgot, today, GROWTH_FACTOR);
        assert_eq!(chat.interval, 1);
        assert_eq!(chat.next_review, day(2024, 2, 29));
    }

    #[test]
    fn test_next_review_is_last_review_plus_interval() {
        let today = day(2024, 12, 30);
        for interval in [0, 1, 3, 7, 45, 400] {
            for recall in [Recall::Forgot, Recall::Remembered] {
                let mut e = entry(interval);
                apply_review(&mut e, recall, today, GROWTH_FACTOR);
                let last = e.last_review.unwrap();
                assert_eq!(
                    e.next_review,
                    last + chrono::Duration::days(i64::from(e.interval))
                );
            }
        }
    }

    #[test]
    fn test_quality_conversion() {
        assert_eq!(Recall::try_from(0).unwrap(), Recall::Forgot);
        assert_eq!(Recall::try_from(1).unwrap(), Recall::Remembered);
        assert!(matches!(
            Recall::try_from(3),
            Err(ReviewError::InvalidQuality(3))
        ));
        assert_eq!(Recall::Remembered.quality(), 1);
    }

    #[test]
    fn test_preview_intervals() {
        assert_eq!(preview_intervals(0, GROWTH_FACTOR), [1, 1]);
        assert_eq!(preview_intervals(10, GROWTH_FACTOR), [1, 22]);
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(0), "now");
        assert_eq!(format_interval(1), "1d");
        assert_eq!(format_interval(5), "5d");
        assert_eq!(format_interval(7), "1w");
        assert_eq!(format_interval(14), "2w");
        assert_eq!(format_interval(30), "1mo");
        assert_eq!(format_interval(90), "3mo");
        assert_eq!(format_interval(365), "1y");
        assert_eq!(format_interval(730), "2y");
    }
}
