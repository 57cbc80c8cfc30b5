use std::str::FromStr;
use std::sync::Arc;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::catalog::Catalog;
use crate::error::{AppError, AppResult};
use crate::model::PredictionRecord;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS predictions (
        timestamp TEXT,
        breed TEXT,
        confidence REAL
    )
"#;

/// Handle to the append-only `predictions` table. Clones share one pool.
#[derive(Debug, Clone)]
pub struct ResultStore {
    pool: SqlitePool,
    catalog: Arc<Catalog>,
}

impl ResultStore {
    /// Open (or create) the database at `url` and make sure the table exists.
    pub async fn initialize(url: &str, catalog: Arc<Catalog>) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let store = Self { pool, catalog };
        store.ensure_table().await?;
        tracing::info!(url, "prediction store ready");
        Ok(store)
    }

    pub async fn ensure_table(&self) -> AppResult<()> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    pub async fn append(&self, record: &PredictionRecord) -> AppResult<()> {
        if !self.catalog.contains(&record.breed_name) {
            return Err(AppError::UnknownBreed(record.breed_name.clone()));
        }
        if !record.has_valid_timestamp() {
            return Err(AppError::InvalidRecord(format!(
                "timestamp {:?} is not in YYYY-MM-DD HH:MM:SS form",
                record.timestamp
            )));
        }
        if !record.has_valid_confidence() {
            return Err(AppError::InvalidRecord(format!(
                "confidence {} is outside (0, 1]",
                record.confidence
            )));
        }

        sqlx::query("INSERT INTO predictions (timestamp, breed, confidence) VALUES (?, ?, ?)")
            .bind(&record.timestamp)
            .bind(&record.breed_name)
            .bind(record.confidence)
            .execute(&self.pool)
            .await?;

        tracing::debug!(
            breed = %record.breed_name,
            confidence = record.confidence,
            "prediction stored"
        );
        Ok(())
    }

    /// Appends one by one. Rows written before a failure stay committed.
    pub async fn append_all(&self, records: &[PredictionRecord]) -> AppResult<()> {
        for record in records {
            self.append(record).await?;
        }
        Ok(())
    }

    /// Newest rows first; equal timestamps come back newest insert first.
    pub async fn recent(&self, limit: u32) -> AppResult<Vec<PredictionRecord>> {
        let records = sqlx::query_as::<_, PredictionRecord>(
            r#"
            SELECT timestamp, breed, confidence FROM predictions
            ORDER BY timestamp DESC, rowid DESC
            LIMIT ?
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM predictions")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("prediction store closed");
    }
}
