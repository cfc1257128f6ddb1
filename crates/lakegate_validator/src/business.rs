//! Business-rule tier.
//!
//! These checks represent data-quality signals rather than hard constraint
//! violations, so they default to WARNING and never fail the gate.

use lakegate_core::{BusinessRule, ResultLog};
use sqlx::SqlitePool;
use std::collections::HashSet;

pub async fn check_business_rules(
    pool: &SqlitePool,
    rules: &[BusinessRule],
    missing: &HashSet<String>,
    log: &mut ResultLog,
) {
    for rule in rules {
        match rule {
            BusinessRule::TotalMatchesItems {
                orders,
                items,
                epsilon,
            } => {
                if missing.contains(&orders.qualified()) || missing.contains(&items.qualified()) {
                    continue;
                }
                // Cancelled line items must not count toward the stored
                // order total.
                let sql = format!(
                    "SELECT COUNT(*) FROM (
                        SELECT o.id FROM {orders} o
                        JOIN {items} i ON i.order_id = o.id
                        GROUP BY o.id, o.total_value
                        HAVING ABS(o.total_value - SUM(
                            CASE WHEN i.cancelled = 'N'
                                 THEN i.quantity * i.unit_price
                                 ELSE 0 END)) > {epsilon}
                     )",
                    orders = orders.qualified(),
                    items = items.qualified(),
                );
                match sqlx::query_scalar::<_, i64>(&sql).fetch_one(pool).await {
                    Ok(0) => {
                        log.success("order totals are consistent with their line items")
                    }
                    Ok(n) => log.warning(format!(
                        "{n} orders diverge from the sum of their line items"
                    )),
                    Err(e) => log.error(format!("order total check failed: {e}")),
                }
            }
            BusinessRule::ParentHasChildren {
                parent,
                child,
                child_fk,
            } => {
                if missing.contains(&parent.qualified()) || missing.contains(&child.qualified()) {
                    continue;
                }
                let sql = format!(
                    "SELECT COUNT(*) FROM {parent} p
                     LEFT JOIN {child} c ON c.{child_fk} = p.id
                     WHERE c.{child_fk} IS NULL",
                    parent = parent.qualified(),
                    child = child.qualified(),
                );
                match sqlx::query_scalar::<_, i64>(&sql).fetch_one(pool).await {
                    Ok(0) => log.success(format!("every {parent} row has {child} rows")),
                    Ok(n) => log.warning(format!("{n} {parent} rows have no {child} rows")),
                    Err(e) => log.error(format!(
                        "child presence check for {parent} failed: {e}"
                    )),
                }
            }
        }
    }
}
