//! The static job catalog for the refined layer.
//!
//! Every query reads trusted tables only and carries a trailing ORDER BY so
//! that, for fixed trusted content, the rebuilt table is byte-for-byte
//! reproducible. Month keys are first-of-month dates produced by
//! `strftime('%Y-%m-01', ...)`.

use crate::TransformJob;
use lakegate_core::TableRef;

/// The refined-layer jobs in declared execution order.
pub fn jobs() -> Vec<TransformJob> {
    vec![
        TransformJob {
            name: "monthly_bestsellers",
            target: TableRef::refined("monthly_bestsellers"),
            // Standard ranking per month and region: ties share a rank and
            // leave a gap after them.
            select_sql: "\
                SELECT
                    strftime('%Y-%m-01', o.order_date) AS month,
                    o.region,
                    i.product_id,
                    p.name AS product_name,
                    SUM(i.quantity) AS total_quantity,
                    RANK() OVER (
                        PARTITION BY strftime('%Y-%m-01', o.order_date), o.region
                        ORDER BY SUM(i.quantity) DESC
                    ) AS rank_position
                FROM trusted_order o
                JOIN trusted_order_item i ON i.order_id = o.id
                JOIN trusted_product p ON p.id = i.product_id
                GROUP BY strftime('%Y-%m-01', o.order_date), o.region, i.product_id, p.name
                ORDER BY month, o.region, rank_position, i.product_id",
        },
        TransformJob {
            name: "monthly_brand_performance",
            target: TableRef::refined("monthly_brand_performance"),
            // Attainment is NULL when no target exists or the target is 0.
            select_sql: "\
                SELECT
                    d.year,
                    d.month,
                    b.id AS brand_id,
                    b.name AS brand_name,
                    SUM(o.total_value) AS total_sold,
                    COALESCE(t.target_value, 0.0) AS target_value,
                    ROUND(SUM(o.total_value) / NULLIF(t.target_value, 0) * 100, 2)
                        AS target_attainment_pct
                FROM trusted_order_item i
                JOIN trusted_order o ON i.order_id = o.id
                JOIN trusted_date d ON o.order_date = d.date_key
                JOIN trusted_product p ON p.id = i.product_id
                JOIN trusted_brand b ON b.id = p.brand_id
                LEFT JOIN trusted_sales_target t
                    ON t.brand_id = b.id AND t.year = d.year AND t.month = d.month
                GROUP BY d.year, d.month, b.id, b.name, t.target_value
                ORDER BY d.year, d.month, b.name, b.id",
        },
        TransformJob {
            name: "sales_kpis",
            target: TableRef::refined("sales_kpis"),
            select_sql: "\
                SELECT
                    strftime('%Y-%m-01', o.order_date) AS month,
                    COUNT(DISTINCT o.id) AS order_count,
                    SUM(o.total_value) AS gross_revenue,
                    ROUND(AVG(o.total_value), 2) AS avg_ticket,
                    COUNT(DISTINCT CASE WHEN o.status = 'CANCELLED' THEN o.id END)
                        AS cancelled_count,
                    ROUND(CAST(COUNT(DISTINCT CASE WHEN o.status = 'CANCELLED' THEN o.id END)
                               AS REAL)
                          / NULLIF(COUNT(DISTINCT o.id), 0) * 100, 2) AS cancellation_pct,
                    COUNT(DISTINCT i.product_id) AS distinct_products,
                    SUM(i.quantity) AS items_sold
                FROM trusted_order o
                LEFT JOIN trusted_order_item i ON i.order_id = o.id AND i.cancelled = 'N'
                GROUP BY strftime('%Y-%m-01', o.order_date)
                ORDER BY month",
        },
        TransformJob {
            name: "cancellation_analysis",
            target: TableRef::refined("cancellation_analysis"),
            select_sql: "\
                SELECT
                    strftime('%Y-%m-01', o.order_date) AS month,
                    o.region,
                    b.name AS brand_name,
                    COUNT(DISTINCT o.id) AS cancelled_orders,
                    SUM(o.total_value) AS cancelled_value,
                    COUNT(DISTINCT i.id) AS cancelled_items,
                    ROUND(AVG(o.total_value), 2) AS avg_cancelled_ticket
                FROM trusted_order o
                JOIN trusted_order_item i ON i.order_id = o.id
                JOIN trusted_product p ON p.id = i.product_id
                JOIN trusted_brand b ON b.id = p.brand_id
                WHERE o.status = 'CANCELLED' OR i.cancelled = 'Y'
                GROUP BY strftime('%Y-%m-01', o.order_date), o.region, b.name
                ORDER BY month, cancelled_orders DESC, brand_name",
        },
        TransformJob {
            name: "category_variation",
            target: TableRef::refined("category_variation"),
            // Period-over-period deltas via LAG; NULL when there is no
            // prior month or the prior value is zero.
            select_sql: "\
                WITH monthly_sales AS (
                    SELECT
                        strftime('%Y-%m-01', o.order_date) AS month,
                        COALESCE(p.category, 'Uncategorized') AS category,
                        SUM(i.quantity) AS total_quantity,
                        SUM(i.quantity * i.unit_price) AS total_value
                    FROM trusted_order o
                    JOIN trusted_order_item i ON i.order_id = o.id
                    JOIN trusted_product p ON p.id = i.product_id
                    WHERE i.cancelled = 'N'
                    GROUP BY strftime('%Y-%m-01', o.order_date),
                             COALESCE(p.category, 'Uncategorized')
                ),
                with_lag AS (
                    SELECT
                        month,
                        category,
                        total_quantity,
                        total_value,
                        LAG(total_quantity) OVER (PARTITION BY category ORDER BY month)
                            AS prev_quantity,
                        LAG(total_value) OVER (PARTITION BY category ORDER BY month)
                            AS prev_value
                    FROM monthly_sales
                )
                SELECT
                    month,
                    category,
                    total_quantity,
                    total_value,
                    ROUND(CASE WHEN prev_quantity IS NOT NULL AND prev_quantity > 0
                          THEN (total_quantity - prev_quantity) * 100.0 / prev_quantity
                          ELSE NULL END, 2) AS quantity_change_pct,
                    ROUND(CASE WHEN prev_value IS NOT NULL AND prev_value > 0
                          THEN (total_value - prev_value) * 100.0 / prev_value
                          ELSE NULL END, 2) AS value_change_pct
                FROM with_lag
                ORDER BY month DESC, total_value DESC, category",
        },
        TransformJob {
            name: "regional_analysis",
            target: TableRef::refined("regional_analysis"),
            select_sql: "\
                SELECT
                    strftime('%Y-%m-01', o.order_date) AS month,
                    o.region,
                    COUNT(DISTINCT o.id) AS order_count,
                    SUM(o.total_value) AS total_revenue,
                    ROUND(AVG(o.total_value), 2) AS avg_ticket,
                    SUM(i.quantity) AS item_count,
                    COUNT(DISTINCT i.product_id) AS distinct_products,
                    COUNT(DISTINCT p.brand_id) AS distinct_brands
                FROM trusted_order o
                LEFT JOIN trusted_order_item i ON i.order_id = o.id AND i.cancelled = 'N'
                LEFT JOIN trusted_product p ON p.id = i.product_id
                WHERE o.region IS NOT NULL
                GROUP BY strftime('%Y-%m-01', o.order_date), o.region
                ORDER BY month DESC, total_revenue DESC, o.region",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_targets_are_distinct_refined_tables() {
        let jobs = jobs();
        assert_eq!(jobs.len(), 6);
        let mut targets: Vec<_> = jobs.iter().map(|j| j.target.qualified()).collect();
        assert!(targets.iter().all(|t| t.starts_with("refined_")));
        targets.sort();
        targets.dedup();
        assert_eq!(targets.len(), 6);
    }
}
