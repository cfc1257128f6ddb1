//! Database connection setup.

use lakegate_core::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

/// Opens the warehouse database, creating the file if needed.
///
/// Accepts either a plain file path or a full `sqlite:` URL. The pool is
/// capped at one connection: jobs and rules run strictly sequentially
/// against one shared transactional connection scope, and in-memory
/// databases require it (each connection would otherwise see its own
/// empty database).
pub async fn connect(database: &str) -> Result<SqlitePool> {
    let url = if database.starts_with("sqlite:") {
        database.to_string()
    } else {
        format!("sqlite://{database}")
    };

    let options = SqliteConnectOptions::from_str(&url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    info!("opened warehouse database: {database}");
    Ok(pool)
}

/// Opens a private in-memory database. Used by tests and dry runs.
pub async fn connect_memory() -> Result<SqlitePool> {
    connect("sqlite::memory:").await
}
