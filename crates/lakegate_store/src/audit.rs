//! Ingestion audit log.
//!
//! The bulk loader appends one record per ingestion batch. The validator's
//! quality tier reads the most recent batch per table as corroborating
//! context for live row counts. It is context, not a hard dependency, so
//! callers are expected to skip silently when no audit data exists.

use chrono::{DateTime, Utc};
use lakegate_core::Result;
use sqlx::SqlitePool;

/// One append-only audit record written by the loader.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct IngestBatch {
    pub table_name: String,
    pub loaded_at: DateTime<Utc>,
    pub actor: String,
    pub row_count: i64,
}

/// Appends an audit record for a completed ingestion batch.
pub async fn record_batch(
    pool: &SqlitePool,
    table_name: &str,
    actor: &str,
    row_count: i64,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO trusted_ingest_log (table_name, loaded_at, actor, row_count)
         VALUES (?, ?, ?, ?)",
    )
    .bind(table_name)
    .bind(Utc::now())
    .bind(actor)
    .bind(row_count)
    .execute(pool)
    .await?;
    Ok(())
}

/// Most recent audit record for a table, if any.
pub async fn latest_batch(pool: &SqlitePool, table_name: &str) -> Result<Option<IngestBatch>> {
    let batch = sqlx::query_as::<_, IngestBatch>(
        "SELECT table_name, loaded_at, actor, row_count
         FROM trusted_ingest_log
         WHERE table_name = ?
         ORDER BY loaded_at DESC, rowid DESC
         LIMIT 1",
    )
    .bind(table_name)
    .fetch_optional(pool)
    .await?;
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{connect_memory, create_trusted_schema};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn latest_batch_returns_most_recent_record() {
        let pool = connect_memory().await.unwrap();
        create_trusted_schema(&pool).await.unwrap();

        assert!(latest_batch(&pool, "trusted_order").await.unwrap().is_none());

        record_batch(&pool, "trusted_order", "loader", 100).await.unwrap();
        record_batch(&pool, "trusted_order", "loader", 250).await.unwrap();
        record_batch(&pool, "trusted_brand", "loader", 5).await.unwrap();

        let batch = latest_batch(&pool, "trusted_order").await.unwrap().unwrap();
        assert_eq!(batch.row_count, 250);
        assert_eq!(batch.actor, "loader");
    }
}
