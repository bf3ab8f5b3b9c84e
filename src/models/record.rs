use crate::domain::{self, MediaType, ParseTagError, Rating, RecordId, WatchStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A record that failed boundary validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title cannot be empty")]
    EmptyTitle,

    #[error("Date watched is required")]
    MissingDate,

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Rating is required")]
    MissingRating,

    #[error("Media type is required")]
    MissingMediaType,

    #[error("Invalid {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },

    #[error(transparent)]
    UnknownTag(#[from] ParseTagError),

    #[error("No entry form is open")]
    NoOpenForm,
}

/// A logged watch event with every field normalized.
///
/// Instances only come out of [`WatchRecord::try_from`] on a [`RawRecord`] or
/// from a store that already validated a [`NewRecord`], so `status` is always
/// populated and the enums are always known values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchRecord {
    pub id: RecordId,
    pub title: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub release_year: Option<i32>,
    pub rating: Rating,
    pub status: WatchStatus,
    pub date_watched: NaiveDate,
    pub is_rewatch: bool,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    pub total_episodes: Option<u32>,
    pub notes: Option<String>,
}

impl WatchRecord {
    #[must_use]
    pub fn from_new(id: RecordId, record: NewRecord) -> Self {
        Self {
            id,
            title: record.title,
            media_type: record.media_type,
            release_year: record.release_year,
            rating: record.rating,
            status: record.status,
            date_watched: record.date_watched,
            is_rewatch: record.is_rewatch,
            season: record.season,
            episode: record.episode,
            total_episodes: record.total_episodes,
            notes: record.notes,
        }
    }

    #[must_use]
    pub fn progress(&self) -> u8 {
        domain::progress(self.media_type, self.episode, self.total_episodes)
    }

    #[must_use]
    pub fn is_series(&self) -> bool {
        self.media_type == MediaType::Series
    }

    /// `S2 • E5` style position, empty for movies or when nothing is known.
    #[must_use]
    pub fn position_label(&self) -> String {
        if !self.is_series() {
            return String::new();
        }
        let season = self.season.filter(|s| *s > 0).map(|s| format!("S{s}"));
        let episode = self.episode.filter(|e| *e > 0).map(|e| format!("E{e}"));
        match (season, episode) {
            (Some(s), Some(e)) => format!("{s} • {e}"),
            (Some(s), None) => s,
            (None, Some(e)) => e,
            (None, None) => String::new(),
        }
    }
}

/// The untrusted shape of a record as read from a store.
///
/// Every enum is kept as text so that a bad row can be rejected with a
/// [`ValidationError`] instead of failing the whole response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: i32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "type", default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub date_watched: Option<String>,
    #[serde(default)]
    pub is_rewatch: Option<bool>,
    #[serde(default)]
    pub season: Option<i64>,
    #[serde(default)]
    pub episode: Option<i64>,
    #[serde(default)]
    pub total_episodes: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn counter(field: &'static str, value: Option<i64>) -> Result<Option<u32>, ValidationError> {
    value
        .map(|v| {
            u32::try_from(v).map_err(|_| ValidationError::InvalidNumber {
                field,
                value: v.to_string(),
            })
        })
        .transpose()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingDate);
    }
    // Stores may hand back a full timestamp; only the calendar day matters.
    let day = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(day, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(trimmed.to_string()))
}

impl TryFrom<RawRecord> for WatchRecord {
    type Error = ValidationError;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        let title = non_blank(raw.title).ok_or(ValidationError::EmptyTitle)?;
        let media_type: MediaType = raw
            .media_type
            .as_deref()
            .ok_or(ValidationError::MissingMediaType)?
            .parse()?;
        let rating: Rating = non_blank(raw.rating)
            .ok_or(ValidationError::MissingRating)?
            .parse()?;
        let status: WatchStatus = match non_blank(raw.status) {
            Some(s) => s.parse()?,
            None => WatchStatus::Completed,
        };
        let date_watched = parse_date(raw.date_watched.as_deref().unwrap_or_default())?;

        Ok(Self {
            id: RecordId::new(raw.id),
            title,
            media_type,
            release_year: raw.release_year.filter(|y| *y > 0),
            rating,
            status,
            date_watched,
            is_rewatch: raw.is_rewatch.unwrap_or(false),
            season: counter("season", raw.season)?,
            episode: counter("episode", raw.episode)?,
            total_episodes: counter("total_episodes", raw.total_episodes)?,
            notes: non_blank(raw.notes),
        })
    }
}

/// A validated record without an id, used for create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    pub title: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    #[serde(default)]
    pub release_year: Option<i32>,
    pub rating: Rating,
    #[serde(default)]
    pub status: WatchStatus,
    pub date_watched: NaiveDate,
    #[serde(default)]
    pub is_rewatch: bool,
    #[serde(default)]
    pub season: Option<u32>,
    #[serde(default)]
    pub episode: Option<u32>,
    #[serde(default)]
    pub total_episodes: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewRecord {
    /// Checks the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if let Some(year) = self.release_year
            && year <= 0
        {
            return Err(ValidationError::InvalidNumber {
                field: "release_year",
                value: year.to_string(),
            });
        }
        Ok(())
    }

    /// Returns the record with its status replaced by the effective one.
    #[must_use]
    pub fn with_inferred_status(mut self) -> Self {
        self.status = domain::infer_status(
            self.media_type,
            self.status,
            self.episode,
            self.total_episodes,
        );
        self
    }
}

impl From<WatchRecord> for NewRecord {
    fn from(record: WatchRecord) -> Self {
        Self {
            title: record.title,
            media_type: record.media_type,
            release_year: record.release_year,
            rating: record.rating,
            status: record.status,
            date_watched: record.date_watched,
            is_rewatch: record.is_rewatch,
            season: record.season,
            episode: record.episode,
            total_episodes: record.total_episodes,
            notes: record.notes,
        }
    }
}
