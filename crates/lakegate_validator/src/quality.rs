//! Quality-metrics tier.
//!
//! Statistical signals a human should review: completeness of
//! optional-but-expected fields, dimension entities absent from derived
//! facts, future-dated periods, and corroboration against the loader's
//! ingestion audit log. Everything here is WARNING at worst.

use chrono::{NaiveDate, Utc};
use lakegate_core::{CompletenessRule, CoverageRule, MonthRangeRule, ResultLog, TableRef};
use lakegate_store::{count_rows, latest_batch, table_exists};
use sqlx::SqlitePool;
use std::collections::HashSet;

/// Percentage of non-null values per column, warned below the threshold.
pub async fn check_completeness(
    pool: &SqlitePool,
    rules: &[CompletenessRule],
    missing: &HashSet<String>,
    log: &mut ResultLog,
) {
    for rule in rules {
        let table = rule.table;
        if missing.contains(&table.qualified()) {
            continue;
        }
        for column in rule.columns {
            let sql = format!(
                "SELECT COUNT(*), COUNT({column}) FROM {}",
                table.qualified()
            );
            match sqlx::query_as::<_, (i64, i64)>(&sql).fetch_one(pool).await {
                Ok((0, _)) => {}
                Ok((total, non_null)) => {
                    let pct = non_null as f64 / total as f64 * 100.0;
                    if pct < rule.threshold_pct {
                        log.warning(format!(
                            "completeness of {table}.{column}: {pct:.1}% (threshold {:.1}%)",
                            rule.threshold_pct
                        ));
                    } else {
                        log.success(format!("completeness of {table}.{column}: {pct:.1}%"));
                    }
                }
                Err(e) => log.error(format!(
                    "completeness check for {table}.{column} failed: {e}"
                )),
            }
        }
    }
}

/// Dimension entities with no rows in a derived fact table. Absence of
/// activity is a valid state, so this warns rather than errors.
pub async fn check_coverage(
    pool: &SqlitePool,
    rules: &[CoverageRule],
    missing: &HashSet<String>,
    log: &mut ResultLog,
) {
    for rule in rules {
        if missing.contains(&rule.dimension.qualified()) || missing.contains(&rule.fact.qualified())
        {
            continue;
        }
        let sql = format!(
            "SELECT COUNT(*) FROM {dim} d
             WHERE NOT EXISTS (SELECT 1 FROM {fact} f WHERE f.{fk} = d.{dk})",
            dim = rule.dimension.qualified(),
            fact = rule.fact.qualified(),
            fk = rule.fact_key,
            dk = rule.dim_key,
        );
        match sqlx::query_scalar::<_, i64>(&sql).fetch_one(pool).await {
            Ok(0) => log.success(format!("no {}", rule.description)),
            Ok(n) => log.warning(format!("{n} {}", rule.description)),
            Err(e) => log.error(format!(
                "coverage check '{}' failed: {e}",
                rule.description
            )),
        }
    }
}

/// Reports the month range of a table and warns on future-dated periods.
pub async fn check_month_ranges(
    pool: &SqlitePool,
    rules: &[MonthRangeRule],
    missing: &HashSet<String>,
    log: &mut ResultLog,
) {
    for rule in rules {
        let table = rule.table;
        if missing.contains(&table.qualified()) {
            continue;
        }
        let sql = format!(
            "SELECT MIN({col}), MAX({col}) FROM {}",
            table.qualified(),
            col = rule.month_column,
        );
        match sqlx::query_as::<_, (Option<String>, Option<String>)>(&sql)
            .fetch_one(pool)
            .await
        {
            Ok((Some(min), Some(max))) => {
                log.success(format!("{table} covers {min} to {max}"));
                if let Ok(max_date) = NaiveDate::parse_from_str(&max, "%Y-%m-%d") {
                    if max_date > Utc::now().date_naive() {
                        log.warning(format!("{table} contains future-dated periods: {max}"));
                    }
                }
            }
            Ok(_) => {}
            Err(e) => log.error(format!("date range check for {table} failed: {e}")),
        }
    }
}

/// Corroborates live row counts against the loader's most recent audit
/// batch per table. The audit log is context, not a hard dependency:
/// missing audit data is skipped silently.
pub async fn check_audit(pool: &SqlitePool, tables: &[TableRef], log: &mut ResultLog) {
    match table_exists(pool, "trusted_ingest_log").await {
        Ok(true) => {}
        _ => return,
    }

    for table in tables {
        let qualified = table.qualified();
        let batch = match latest_batch(pool, &qualified).await {
            Ok(Some(batch)) => batch,
            Ok(None) => continue,
            Err(e) => {
                log.error(format!("audit lookup for {table} failed: {e}"));
                continue;
            }
        };
        match count_rows(pool, &qualified).await {
            Ok(live) if live == batch.row_count => log.success(format!(
                "{table} matches last ingestion batch ({live} rows)"
            )),
            Ok(live) => log.warning(format!(
                "{table} has {live} rows but the last ingestion batch recorded {}",
                batch.row_count
            )),
            Err(e) => log.error(format!("audit count for {table} failed: {e}")),
        }
    }
}
