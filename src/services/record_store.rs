//! The record store seam.
//!
//! Both the local database and the HTTP client implement [`RecordStore`], so
//! the view session and the CLI do not care where records live.

use crate::domain::RecordId;
use crate::models::{NewRecord, RawRecord, ValidationError, WatchRecord};
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Errors for record store operations.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Record not found: {0}")]
    NotFound(RecordId),

    /// The request could not be sent or the response could not be read.
    #[error("Network failure: {0}")]
    Network(String),

    #[error("Invalid record: {0}")]
    Validation(#[from] ValidationError),

    #[error("Database error: {0}")]
    Database(String),

    /// A remote store answered with a non-success status.
    #[error("Server rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
}

impl From<sea_orm::DbErr> for RecordError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<reqwest::Error> for RecordError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Persists watch records.
///
/// # Examples
///
/// ```rust,ignore
/// use watchlog::services::{RecordError, RecordStore};
///
/// async fn titles(store: &dyn RecordStore) -> Result<Vec<String>, RecordError> {
///     Ok(store.list().await?.into_iter().map(|r| r.title).collect())
/// }
/// ```
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// All records, newest watch first.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Network`] or [`RecordError::Database`] when the
    /// backing store is unreachable.
    async fn list(&self) -> Result<Vec<WatchRecord>, RecordError>;

    /// Records whose title contains `term`.
    async fn search(&self, term: &str) -> Result<Vec<WatchRecord>, RecordError>;

    /// Persists a new record and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Validation`] if the record breaks an invariant.
    async fn create(&self, record: NewRecord) -> Result<WatchRecord, RecordError>;

    /// Overwrites every field of an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::NotFound`] if no record has this id.
    async fn update(&self, id: RecordId, record: NewRecord) -> Result<WatchRecord, RecordError>;

    /// # Errors
    ///
    /// Returns [`RecordError::NotFound`] if no record has this id.
    async fn delete(&self, id: RecordId) -> Result<(), RecordError>;
}

#[async_trait::async_trait]
impl<T: RecordStore + ?Sized> RecordStore for Box<T> {
    async fn list(&self) -> Result<Vec<WatchRecord>, RecordError> {
        (**self).list().await
    }

    async fn search(&self, term: &str) -> Result<Vec<WatchRecord>, RecordError> {
        (**self).search(term).await
    }

    async fn create(&self, record: NewRecord) -> Result<WatchRecord, RecordError> {
        (**self).create(record).await
    }

    async fn update(&self, id: RecordId, record: NewRecord) -> Result<WatchRecord, RecordError> {
        (**self).update(id, record).await
    }

    async fn delete(&self, id: RecordId) -> Result<(), RecordError> {
        (**self).delete(id).await
    }
}

#[async_trait::async_trait]
impl<T: RecordStore + ?Sized> RecordStore for Arc<T> {
    async fn list(&self) -> Result<Vec<WatchRecord>, RecordError> {
        (**self).list().await
    }

    async fn search(&self, term: &str) -> Result<Vec<WatchRecord>, RecordError> {
        (**self).search(term).await
    }

    async fn create(&self, record: NewRecord) -> Result<WatchRecord, RecordError> {
        (**self).create(record).await
    }

    async fn update(&self, id: RecordId, record: NewRecord) -> Result<WatchRecord, RecordError> {
        (**self).update(id, record).await
    }

    async fn delete(&self, id: RecordId) -> Result<(), RecordError> {
        (**self).delete(id).await
    }
}

/// Normalizes raw rows, dropping any that fail validation.
///
/// One corrupt row must not blank the whole list, so rejects are logged
/// and skipped.
pub fn ingest(raw: impl IntoIterator<Item = RawRecord>) -> Vec<WatchRecord> {
    raw.into_iter()
        .filter_map(|row| {
            let id = row.id;
            match WatchRecord::try_from(row) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(record_id = id, error = %e, "Skipping invalid watch record");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: i32, rating: Option<&str>) -> RawRecord {
        RawRecord {
            id,
            title: Some(format!("Entry {id}")),
            media_type: Some("MOVIE".to_string()),
            rating: rating.map(str::to_string),
            date_watched: Some("2025-02-10".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn ingest_drops_rows_without_a_valid_rating() {
        let records = ingest(vec![
            raw(1, Some("SKIP")),
            raw(2, None),
            raw(3, Some("OK_I_GUESS")),
            raw(4, Some("TIMEPASS")),
        ]);
        let ids: Vec<i32> = records.iter().map(|r| r.id.value()).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn validation_errors_convert() {
        let err: RecordError = ValidationError::EmptyTitle.into();
        assert_eq!(err.to_string(), "Invalid record: Title cannot be empty");
    }
}
