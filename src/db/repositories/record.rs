use crate::domain::RecordId;
use crate::entities::{prelude::*, watch_logs};
use crate::models::record::DATE_FORMAT;
use crate::models::{NewRecord, RawRecord, ValidationError, WatchRecord};
use crate::services::{RecordError, ingest};
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

pub struct RecordRepository {
    conn: DatabaseConnection,
}

impl RecordRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model_to_raw(model: watch_logs::Model) -> RawRecord {
        RawRecord {
            id: model.id,
            title: Some(model.title),
            media_type: Some(model.media_type),
            release_year: model.release_year,
            rating: Some(model.rating),
            status: model.status,
            date_watched: Some(model.date_watched),
            is_rewatch: Some(model.is_rewatch),
            season: model.season.map(i64::from),
            episode: model.episode.map(i64::from),
            total_episodes: model.total_episodes.map(i64::from),
            notes: model.notes,
        }
    }

    fn map_model(model: watch_logs::Model) -> Result<WatchRecord, RecordError> {
        Ok(WatchRecord::try_from(Self::map_model_to_raw(model))?)
    }

    fn column_counter(
        field: &'static str,
        value: Option<u32>,
    ) -> Result<Option<i32>, ValidationError> {
        value
            .map(|v| {
                i32::try_from(v).map_err(|_| ValidationError::InvalidNumber {
                    field,
                    value: v.to_string(),
                })
            })
            .transpose()
    }

    fn fill(model: &mut watch_logs::ActiveModel, record: NewRecord) -> Result<(), RecordError> {
        model.title = Set(record.title.trim().to_string());
        model.media_type = Set(record.media_type.as_str().to_string());
        model.release_year = Set(record.release_year);
        model.rating = Set(record.rating.as_str().to_string());
        model.status = Set(Some(record.status.as_str().to_string()));
        model.date_watched = Set(record.date_watched.format(DATE_FORMAT).to_string());
        model.is_rewatch = Set(record.is_rewatch);
        model.season = Set(Self::column_counter("season", record.season)?);
        model.episode = Set(Self::column_counter("episode", record.episode)?);
        model.total_episodes = Set(Self::column_counter(
            "total_episodes",
            record.total_episodes,
        )?);
        model.notes = Set(record.notes.filter(|n| !n.trim().is_empty()));
        model.updated_at = Set(chrono::Utc::now().to_rfc3339());
        Ok(())
    }

    /// Newest watch first; ties fall back to the most recently created row.
    pub async fn list(&self) -> Result<Vec<WatchRecord>, RecordError> {
        let rows = WatchLogs::find()
            .order_by_desc(watch_logs::Column::DateWatched)
            .order_by_desc(watch_logs::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(ingest(rows.into_iter().map(Self::map_model_to_raw)))
    }

    /// Substring `LIKE` pattern; `%`, `_` and the escape character match literally.
    fn contains_pattern(term: &str) -> String {
        let mut pattern = String::with_capacity(term.len() + 2);
        pattern.push('%');
        for c in term.chars() {
            if matches!(c, '\\' | '%' | '_') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }

    /// SQLite `LIKE` already folds ASCII case.
    pub async fn search(&self, term: &str) -> Result<Vec<WatchRecord>, RecordError> {
        let pattern = LikeExpr::new(Self::contains_pattern(term.trim())).escape('\\');
        let rows = WatchLogs::find()
            .filter(Expr::col(watch_logs::Column::Title).like(pattern))
            .order_by_desc(watch_logs::Column::DateWatched)
            .order_by_desc(watch_logs::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(ingest(rows.into_iter().map(Self::map_model_to_raw)))
    }

    pub async fn get(&self, id: RecordId) -> Result<Option<WatchRecord>, RecordError> {
        WatchLogs::find_by_id(id.value())
            .one(&self.conn)
            .await?
            .map(Self::map_model)
            .transpose()
    }

    pub async fn create(&self, record: NewRecord) -> Result<WatchRecord, RecordError> {
        let mut active_model = watch_logs::ActiveModel {
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };
        Self::fill(&mut active_model, record)?;

        let model = active_model.insert(&self.conn).await?;
        Self::map_model(model)
    }

    pub async fn update(
        &self,
        id: RecordId,
        record: NewRecord,
    ) -> Result<WatchRecord, RecordError> {
        let existing = WatchLogs::find_by_id(id.value())
            .one(&self.conn)
            .await?
            .ok_or(RecordError::NotFound(id))?;

        let mut active_model: watch_logs::ActiveModel = existing.into();
        Self::fill(&mut active_model, record)?;

        let model = active_model.update(&self.conn).await?;
        Self::map_model(model)
    }

    pub async fn delete(&self, id: RecordId) -> Result<(), RecordError> {
        let result = WatchLogs::delete_by_id(id.value()).exec(&self.conn).await?;
        if result.rows_affected == 0 {
            return Err(RecordError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(RecordRepository::contains_pattern("dune"), "%dune%");
        assert_eq!(RecordRepository::contains_pattern("100%"), "%100\\%%");
        assert_eq!(RecordRepository::contains_pattern("My_Movie"), "%My\\_Movie%");
        assert_eq!(RecordRepository::contains_pattern("a\\b"), "%a\\\\b%");
    }
}
