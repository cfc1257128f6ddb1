//! Existence and volume tiers.

use lakegate_core::{ResultLog, TableRef, VolumeRule};
use lakegate_store::{count_rows, table_exists};
use sqlx::SqlitePool;
use std::collections::HashSet;

/// Checks that every expected table is present.
///
/// Returns the qualified names of missing tables so later tiers can skip
/// rules that target them: a missing table halts its own dependent checks,
/// not the run.
pub async fn check_existence(
    pool: &SqlitePool,
    tables: &[TableRef],
    log: &mut ResultLog,
) -> HashSet<String> {
    let mut missing = HashSet::new();

    for table in tables {
        let qualified = table.qualified();
        match table_exists(pool, &qualified).await {
            Ok(true) => log.success(format!("table {table} exists")),
            Ok(false) => {
                log.error(format!("table {table} does not exist"));
                missing.insert(qualified);
            }
            Err(e) => {
                log.error(format!("existence check for {table} failed: {e}"));
                missing.insert(qualified);
            }
        }
    }

    missing
}

/// Checks row counts: zero rows is ERROR, a count below the rule's floor is
/// WARNING.
pub async fn check_volume(
    pool: &SqlitePool,
    rules: &[VolumeRule],
    missing: &HashSet<String>,
    log: &mut ResultLog,
) {
    for rule in rules {
        let table = rule.table;
        if missing.contains(&table.qualified()) {
            continue;
        }
        match count_rows(pool, &table.qualified()).await {
            Ok(0) => log.error(format!("table {table} is empty")),
            Ok(n) => match rule.warn_below {
                Some(floor) if n < floor => {
                    log.warning(format!("table {table} has only {n} rows"))
                }
                _ => log.success(format!("table {table}: {n} rows")),
            },
            Err(e) => log.error(format!("volume check for {table} failed: {e}")),
        }
    }
}
