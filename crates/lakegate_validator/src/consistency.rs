//! Cross-layer consistency tier.
//!
//! Refined aggregates must reconcile with trusted totals within a relative
//! tolerance. Divergence at or above the tolerance is WARNING; directional
//! drift is informative, not necessarily a defect, since refined tables may
//! exclude cancellations differently than a naive trusted sum.

use lakegate_core::{ConsistencyRule, ResultLog};
use sqlx::SqlitePool;
use std::collections::HashSet;

pub async fn check_consistency(
    pool: &SqlitePool,
    rules: &[ConsistencyRule],
    missing: &HashSet<String>,
    log: &mut ResultLog,
) {
    for rule in rules {
        if missing.contains(&rule.refined_table.qualified()) {
            continue;
        }

        let refined = fetch_total(pool, rule.refined_sql).await;
        let trusted = fetch_total(pool, rule.trusted_sql).await;

        match (refined, trusted) {
            (Ok(Some(refined)), Ok(Some(trusted))) if trusted > 0.0 => {
                let diff_pct = ((refined - trusted) / trusted * 100.0).abs();
                // Boundary inclusive on the WARNING side.
                if diff_pct >= rule.tolerance_pct {
                    log.warning(format!(
                        "{}: {diff_pct:.2}% divergence between refined and trusted totals",
                        rule.name
                    ));
                } else {
                    log.success(format!(
                        "{}: totals consistent (diff {diff_pct:.2}%)",
                        rule.name
                    ));
                }
            }
            // No trusted baseline: treated as zero divergence, so the rule
            // still shows up in the report. Volume checks cover emptiness.
            (Ok(_), Ok(_)) => log.success(format!(
                "{}: no trusted baseline; nothing to reconcile",
                rule.name
            )),
            (Err(e), _) | (_, Err(e)) => {
                log.error(format!("consistency check '{}' failed: {e}", rule.name))
            }
        }
    }
}

async fn fetch_total(pool: &SqlitePool, sql: &str) -> lakegate_core::Result<Option<f64>> {
    Ok(sqlx::query_scalar(sql).fetch_one(pool).await?)
}
