//! Trusted-layer DDL and small catalog helpers.
//!
//! The trusted tables mirror source extracts loaded by the external bulk
//! loader. They are created without primary-key or foreign-key
//! declarations on purpose: the loader appends raw CSV content, and the
//! validator is the component that decides whether keys resolve. Refined
//! tables are never created here; the transformation engine owns them and
//! rebuilds them from scratch on every run.

use lakegate_core::Result;
use sqlx::SqlitePool;
use tracing::debug;

/// Creates the trusted-layer tables if they do not exist. Idempotent.
pub async fn create_trusted_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS trusted_brand (
            id INTEGER,
            name TEXT
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS trusted_product (
            id INTEGER,
            name TEXT,
            category TEXT,
            brand_id INTEGER
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS trusted_date (
            date_key TEXT,
            year INTEGER,
            month INTEGER,
            day INTEGER,
            description TEXT
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS trusted_order (
            id INTEGER,
            order_date TEXT,
            region TEXT,
            total_value REAL,
            status TEXT,
            customer_ref TEXT
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS trusted_order_item (
            id INTEGER,
            order_id INTEGER,
            product_id INTEGER,
            quantity INTEGER,
            unit_price REAL,
            cancelled TEXT
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS trusted_sales_target (
            brand_id INTEGER,
            year INTEGER,
            month INTEGER,
            target_value REAL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS trusted_ingest_log (
            table_name TEXT,
            loaded_at TEXT,
            actor TEXT,
            row_count INTEGER
        )",
    )
    .execute(pool)
    .await?;

    debug!("trusted-layer schema verified");
    Ok(())
}

/// Whether a table is present in the store.
pub async fn table_exists(pool: &SqlitePool, table: &str) -> Result<bool> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?)",
    )
    .bind(table)
    .fetch_one(pool)
    .await?;
    Ok(exists)
}

/// Row count of a table. The table name comes from a static catalog, never
/// from user input.
pub async fn count_rows(pool: &SqlitePool, table: &str) -> Result<i64> {
    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connect_memory;

    #[tokio::test]
    async fn schema_creation_is_idempotent() {
        let pool = connect_memory().await.unwrap();
        create_trusted_schema(&pool).await.unwrap();
        create_trusted_schema(&pool).await.unwrap();
        assert!(table_exists(&pool, "trusted_order").await.unwrap());
        assert!(table_exists(&pool, "trusted_ingest_log").await.unwrap());
        assert!(!table_exists(&pool, "refined_sales_kpis").await.unwrap());
    }

    #[tokio::test]
    async fn count_rows_sees_inserts() {
        let pool = connect_memory().await.unwrap();
        create_trusted_schema(&pool).await.unwrap();
        assert_eq!(count_rows(&pool, "trusted_brand").await.unwrap(), 0);

        sqlx::query("INSERT INTO trusted_brand (id, name) VALUES (1, 'Alpha'), (2, 'Beta')")
            .execute(&pool)
            .await
            .unwrap();
        assert_eq!(count_rows(&pool, "trusted_brand").await.unwrap(), 2);
    }
}
