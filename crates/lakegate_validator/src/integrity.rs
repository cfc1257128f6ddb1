//! Referential, null-constraint, range/domain and uniqueness tiers.
//!
//! Every check resolves to one result per rule; a query failure is recorded
//! as an ERROR result naming the rule so a broken check cannot silently
//! vanish from the report.

use lakegate_core::{
    DomainCheck, ForeignKeyRule, RangeRule, RequiredFieldRule, Result, ResultLog, UniquenessRule,
};
use regex::Regex;
use sqlx::SqlitePool;
use std::collections::HashSet;

/// One result per declared foreign-key relationship: zero orphans is the
/// only passing state, evaluated independently per relationship.
pub async fn check_foreign_keys(
    pool: &SqlitePool,
    rules: &[ForeignKeyRule],
    missing: &HashSet<String>,
    log: &mut ResultLog,
) {
    for rule in rules {
        if missing.contains(&rule.child.qualified()) || missing.contains(&rule.parent.qualified())
        {
            continue;
        }
        match orphan_count(pool, rule).await {
            Ok(0) => log.success(format!("FK valid: {}", rule.name)),
            Ok(n) => log.error(format!("FK violated: {} - {n} orphan rows", rule.name)),
            Err(e) => log.error(format!("FK check {} failed: {e}", rule.name)),
        }
    }
}

async fn orphan_count(pool: &SqlitePool, rule: &ForeignKeyRule) -> Result<i64> {
    let sql = format!(
        "SELECT COUNT(*) FROM {child} c
         LEFT JOIN {parent} p ON c.{ck} = p.{pk}
         WHERE p.{pk} IS NULL",
        child = rule.child.qualified(),
        parent = rule.parent.qualified(),
        ck = rule.child_key,
        pk = rule.parent_key,
    );
    Ok(sqlx::query_scalar(&sql).fetch_one(pool).await?)
}

/// One result per required field: any NULL is an ERROR.
pub async fn check_required_fields(
    pool: &SqlitePool,
    rules: &[RequiredFieldRule],
    missing: &HashSet<String>,
    log: &mut ResultLog,
) {
    for rule in rules {
        let table = rule.table;
        if missing.contains(&table.qualified()) {
            continue;
        }
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE {} IS NULL",
            table.qualified(),
            rule.column
        );
        match sqlx::query_scalar::<_, i64>(&sql).fetch_one(pool).await {
            Ok(0) => log.success(format!("field {table}.{} has no NULLs", rule.column)),
            Ok(n) => log.error(format!(
                "required field {table}.{} has {n} NULL values",
                rule.column
            )),
            Err(e) => log.error(format!(
                "null check for {table}.{} failed: {e}",
                rule.column
            )),
        }
    }
}

/// Numeric and format domain rules; violations are ERROR.
pub async fn check_ranges(
    pool: &SqlitePool,
    rules: &[RangeRule],
    missing: &HashSet<String>,
    log: &mut ResultLog,
) {
    for rule in rules {
        if missing.contains(&rule.table.qualified()) {
            continue;
        }
        match violation_count(pool, rule).await {
            Ok(0) => log.success(format!("{}: no violations", rule.description)),
            Ok(n) => log.error(format!("{}: {n} violating rows", rule.description)),
            Err(e) => log.error(format!("range check '{}' failed: {e}", rule.description)),
        }
    }
}

async fn violation_count(pool: &SqlitePool, rule: &RangeRule) -> Result<i64> {
    let table = rule.table.qualified();
    let sql = match rule.check {
        DomainCheck::NonNegative { column } => {
            format!("SELECT COUNT(*) FROM {table} WHERE {column} < 0")
        }
        DomainCheck::Positive { column } => {
            format!("SELECT COUNT(*) FROM {table} WHERE {column} <= 0")
        }
        DomainCheck::Between { column, min, max } => format!(
            "SELECT COUNT(*) FROM {table} WHERE {column} < {min} OR {column} > {max}"
        ),
        DomainCheck::Matches { column, pattern } => {
            return pattern_violations(pool, &table, column, pattern).await;
        }
        DomainCheck::DateComponents {
            date_column,
            year_column,
            month_column,
            day_column,
        } => format!(
            "SELECT COUNT(*) FROM {table}
             WHERE CAST(strftime('%Y', {date_column}) AS INTEGER) <> {year_column}
                OR CAST(strftime('%m', {date_column}) AS INTEGER) <> {month_column}
                OR CAST(strftime('%d', {date_column}) AS INTEGER) <> {day_column}"
        ),
        DomainCheck::ViolationQuery { sql } => sql.to_string(),
    };
    Ok(sqlx::query_scalar(&sql).fetch_one(pool).await?)
}

/// The store dialect has no regex support, so pattern rules fetch the
/// non-null column values and match them client-side.
async fn pattern_violations(
    pool: &SqlitePool,
    table: &str,
    column: &str,
    pattern: &str,
) -> Result<i64> {
    let re = Regex::new(pattern)
        .map_err(|e| lakegate_core::PipelineError::Other(format!("bad pattern '{pattern}': {e}")))?;
    let sql = format!("SELECT {column} FROM {table} WHERE {column} IS NOT NULL");
    let values: Vec<String> = sqlx::query_scalar(&sql).fetch_all(pool).await?;
    Ok(values.iter().filter(|v| !re.is_match(v)).count() as i64)
}

/// One result per primary-key column: any duplicated value is an ERROR.
pub async fn check_uniqueness(
    pool: &SqlitePool,
    rules: &[UniquenessRule],
    missing: &HashSet<String>,
    log: &mut ResultLog,
) {
    for rule in rules {
        let table = rule.table;
        if missing.contains(&table.qualified()) {
            continue;
        }
        let sql = format!(
            "SELECT COUNT(*) FROM (
                SELECT {key} FROM {table} GROUP BY {key} HAVING COUNT(*) > 1
             )",
            key = rule.key,
            table = table.qualified(),
        );
        match sqlx::query_scalar::<_, i64>(&sql).fetch_one(pool).await {
            Ok(0) => log.success(format!("PK {table}.{} has no duplicates", rule.key)),
            Ok(n) => log.error(format!("PK {table}.{} has {n} duplicated values", rule.key)),
            Err(e) => log.error(format!(
                "uniqueness check for {table}.{} failed: {e}",
                rule.key
            )),
        }
    }
}
