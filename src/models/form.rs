//! Entry form state as typed by the user.

use super::record::{NewRecord, ValidationError, WatchRecord, parse_date, DATE_FORMAT};
use crate::domain::{MediaType, Rating, WatchStatus};
use chrono::NaiveDate;

/// Form fields kept as entered, so a failed submit can be retried unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordForm {
    pub title: String,
    pub media_type: MediaType,
    pub release_year: String,
    pub rating: Rating,
    pub status: WatchStatus,
    pub date_watched: String,
    pub is_rewatch: bool,
    pub season: String,
    pub episode: String,
    pub total_episodes: String,
    pub notes: String,
}

impl RecordForm {
    /// Blank entry: a completed movie rated GO FOR IT, watched today.
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            title: String::new(),
            media_type: MediaType::Movie,
            release_year: String::new(),
            rating: Rating::GoForIt,
            status: WatchStatus::Completed,
            date_watched: today.format(DATE_FORMAT).to_string(),
            is_rewatch: false,
            season: String::new(),
            episode: String::new(),
            total_episodes: String::new(),
            notes: String::new(),
        }
    }

    #[must_use]
    pub fn from_record(record: &WatchRecord) -> Self {
        fn text<T: ToString>(value: Option<T>) -> String {
            value.map(|v| v.to_string()).unwrap_or_default()
        }

        Self {
            title: record.title.clone(),
            media_type: record.media_type,
            release_year: text(record.release_year),
            rating: record.rating,
            status: record.status,
            date_watched: record.date_watched.format(DATE_FORMAT).to_string(),
            is_rewatch: record.is_rewatch,
            season: text(record.season),
            episode: text(record.episode),
            total_episodes: text(record.total_episodes),
            notes: record.notes.clone().unwrap_or_default(),
        }
    }

    /// Validates the form and infers the effective status.
    ///
    /// Number fields that are blank or not numeric are treated as absent.
    pub fn to_new_record(&self) -> Result<NewRecord, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let date_watched = parse_date(&self.date_watched)?;

        let record = NewRecord {
            title: title.to_string(),
            media_type: self.media_type,
            release_year: lenient_number::<i32>(&self.release_year).filter(|y| *y > 0),
            rating: self.rating,
            status: self.status,
            date_watched,
            is_rewatch: self.is_rewatch,
            season: lenient_number(&self.season),
            episode: lenient_number(&self.episode),
            total_episodes: lenient_number(&self.total_episodes),
            notes: Some(self.notes.trim().to_string()).filter(|n| !n.is_empty()),
        };

        Ok(record.with_inferred_status())
    }
}

fn lenient_number<T: std::str::FromStr>(value: &str) -> Option<T> {
    value.trim().parse().ok()
}
