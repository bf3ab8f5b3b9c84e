use crate::domain::RecordId;
use crate::models::{NewRecord, WatchRecord};
use crate::services::{RecordError, RecordStore};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn record_repo(&self) -> repositories::record::RecordRepository {
        repositories::record::RecordRepository::new(self.conn.clone())
    }

    pub async fn get_record(&self, id: RecordId) -> Result<Option<WatchRecord>, RecordError> {
        self.record_repo().get(id).await
    }

    /// Validates and normalizes a record before it reaches the table.
    fn prepare(record: NewRecord) -> Result<NewRecord, RecordError> {
        record.validate()?;
        Ok(record.with_inferred_status())
    }
}

#[async_trait::async_trait]
impl RecordStore for Store {
    async fn list(&self) -> Result<Vec<WatchRecord>, RecordError> {
        self.record_repo().list().await
    }

    async fn search(&self, term: &str) -> Result<Vec<WatchRecord>, RecordError> {
        if term.trim().is_empty() {
            return self.list().await;
        }
        self.record_repo().search(term).await
    }

    async fn create(&self, record: NewRecord) -> Result<WatchRecord, RecordError> {
        let record = Self::prepare(record)?;
        let saved = self.record_repo().create(record).await?;
        metrics::counter!("watchlog_records_created_total").increment(1);
        debug!(id = %saved.id, status = %saved.status, "Inserted watch record");
        Ok(saved)
    }

    async fn update(&self, id: RecordId, record: NewRecord) -> Result<WatchRecord, RecordError> {
        let record = Self::prepare(record)?;
        let saved = self.record_repo().update(id, record).await?;
        metrics::counter!("watchlog_records_updated_total").increment(1);
        debug!(%id, status = %saved.status, "Updated watch record");
        Ok(saved)
    }

    async fn delete(&self, id: RecordId) -> Result<(), RecordError> {
        self.record_repo().delete(id).await?;
        metrics::counter!("watchlog_records_deleted_total").increment(1);
        Ok(())
    }
}
