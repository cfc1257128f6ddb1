//! Rule catalogs for the trusted and refined layers.
//!
//! The catalogs are the single place new checks get added. Tolerances come
//! from the pipeline configuration so operators can tune thresholds without
//! touching the catalogs.

use lakegate_core::{
    BusinessRule, CompletenessRule, ConsistencyRule, CoverageRule, DomainCheck, ForeignKeyRule,
    Layer, MonthRangeRule, RangeRule, RequiredFieldRule, RuleSet, TableRef, Tolerances,
    UniquenessRule, VolumeRule,
};

const BRAND: TableRef = TableRef::trusted("brand");
const PRODUCT: TableRef = TableRef::trusted("product");
const DATE: TableRef = TableRef::trusted("date");
const ORDER: TableRef = TableRef::trusted("order");
const ORDER_ITEM: TableRef = TableRef::trusted("order_item");
const SALES_TARGET: TableRef = TableRef::trusted("sales_target");

const BESTSELLERS: TableRef = TableRef::refined("monthly_bestsellers");
const PERFORMANCE: TableRef = TableRef::refined("monthly_brand_performance");
const KPIS: TableRef = TableRef::refined("sales_kpis");
const CANCELLATIONS: TableRef = TableRef::refined("cancellation_analysis");
const CATEGORY: TableRef = TableRef::refined("category_variation");
const REGIONAL: TableRef = TableRef::refined("regional_analysis");

/// Checks for the trusted layer.
pub fn trusted_rules(tol: &Tolerances) -> RuleSet {
    let tables = vec![BRAND, PRODUCT, DATE, ORDER, ORDER_ITEM, SALES_TARGET];

    RuleSet {
        layer: Layer::Trusted,
        volume: tables
            .iter()
            .map(|&table| VolumeRule {
                table,
                warn_below: Some(tol.min_trusted_rows),
            })
            .collect(),
        foreign_keys: vec![
            ForeignKeyRule {
                name: "product.brand_id -> brand.id",
                child: PRODUCT,
                child_key: "brand_id",
                parent: BRAND,
                parent_key: "id",
            },
            ForeignKeyRule {
                name: "order.order_date -> date.date_key",
                child: ORDER,
                child_key: "order_date",
                parent: DATE,
                parent_key: "date_key",
            },
            ForeignKeyRule {
                name: "order_item.order_id -> order.id",
                child: ORDER_ITEM,
                child_key: "order_id",
                parent: ORDER,
                parent_key: "id",
            },
            ForeignKeyRule {
                name: "order_item.product_id -> product.id",
                child: ORDER_ITEM,
                child_key: "product_id",
                parent: PRODUCT,
                parent_key: "id",
            },
            ForeignKeyRule {
                name: "sales_target.brand_id -> brand.id",
                child: SALES_TARGET,
                child_key: "brand_id",
                parent: BRAND,
                parent_key: "id",
            },
        ],
        required_fields: vec![
            RequiredFieldRule { table: BRAND, column: "name" },
            RequiredFieldRule { table: PRODUCT, column: "name" },
            RequiredFieldRule { table: PRODUCT, column: "brand_id" },
            RequiredFieldRule { table: ORDER, column: "order_date" },
            RequiredFieldRule { table: ORDER, column: "total_value" },
            RequiredFieldRule { table: ORDER_ITEM, column: "order_id" },
            RequiredFieldRule { table: ORDER_ITEM, column: "product_id" },
            RequiredFieldRule { table: ORDER_ITEM, column: "quantity" },
            RequiredFieldRule { table: DATE, column: "year" },
            RequiredFieldRule { table: DATE, column: "month" },
        ],
        ranges: vec![
            RangeRule {
                table: ORDER,
                description: "order totals are non-negative",
                check: DomainCheck::NonNegative { column: "total_value" },
            },
            RangeRule {
                table: ORDER_ITEM,
                description: "item quantities are strictly positive",
                check: DomainCheck::Positive { column: "quantity" },
            },
            RangeRule {
                table: ORDER,
                description: "region codes are two uppercase letters",
                check: DomainCheck::Matches {
                    column: "region",
                    pattern: "^[A-Z]{2}$",
                },
            },
            RangeRule {
                table: DATE,
                description: "months lie in 1..=12",
                check: DomainCheck::Between { column: "month", min: 1, max: 12 },
            },
            RangeRule {
                table: DATE,
                description: "date components agree with the date key",
                check: DomainCheck::DateComponents {
                    date_column: "date_key",
                    year_column: "year",
                    month_column: "month",
                    day_column: "day",
                },
            },
        ],
        uniqueness: vec![
            UniquenessRule { table: BRAND, key: "id" },
            UniquenessRule { table: PRODUCT, key: "id" },
            UniquenessRule { table: ORDER, key: "id" },
            UniquenessRule { table: ORDER_ITEM, key: "id" },
            UniquenessRule { table: DATE, key: "date_key" },
        ],
        business: vec![
            BusinessRule::TotalMatchesItems {
                orders: ORDER,
                items: ORDER_ITEM,
                epsilon: tol.order_total_epsilon,
            },
            BusinessRule::ParentHasChildren {
                parent: ORDER,
                child: ORDER_ITEM,
                child_fk: "order_id",
            },
        ],
        consistency: Vec::new(),
        completeness: Vec::new(),
        coverage: Vec::new(),
        month_ranges: Vec::new(),
        check_audit: true,
        tables,
    }
}

/// Checks for the refined layer, including reconciliation back to trusted.
pub fn refined_rules(tol: &Tolerances) -> RuleSet {
    let tables = vec![BESTSELLERS, PERFORMANCE, KPIS, CANCELLATIONS, CATEGORY, REGIONAL];

    RuleSet {
        layer: Layer::Refined,
        volume: tables
            .iter()
            .map(|&table| VolumeRule { table, warn_below: None })
            .collect(),
        foreign_keys: Vec::new(),
        required_fields: Vec::new(),
        ranges: vec![
            RangeRule {
                table: BESTSELLERS,
                description: "every bestseller partition starts at rank 1",
                check: DomainCheck::ViolationQuery {
                    sql: "SELECT COUNT(*) FROM (
                            SELECT month, region FROM refined_monthly_bestsellers
                            GROUP BY month, region HAVING MIN(rank_position) <> 1
                          )",
                },
            },
            RangeRule {
                table: PERFORMANCE,
                description: "attainment percentages match their inputs",
                check: DomainCheck::ViolationQuery {
                    sql: "SELECT COUNT(*) FROM refined_monthly_brand_performance
                          WHERE target_value > 0
                            AND ABS(target_attainment_pct
                                    - total_sold / target_value * 100) > 0.01",
                },
            },
            RangeRule {
                table: PERFORMANCE,
                description: "performance values are non-negative",
                check: DomainCheck::ViolationQuery {
                    sql: "SELECT COUNT(*) FROM refined_monthly_brand_performance
                          WHERE total_sold < 0 OR target_value < 0",
                },
            },
        ],
        uniqueness: Vec::new(),
        business: Vec::new(),
        consistency: vec![
            ConsistencyRule {
                name: "bestseller quantities vs trusted line items",
                refined_table: BESTSELLERS,
                refined_sql: "SELECT CAST(SUM(total_quantity) AS REAL)
                              FROM refined_monthly_bestsellers",
                trusted_sql: "SELECT CAST(SUM(i.quantity) AS REAL)
                              FROM trusted_order_item i
                              JOIN trusted_order o ON i.order_id = o.id
                              WHERE i.cancelled = 'N'",
                tolerance_pct: tol.cross_layer_pct,
            },
            ConsistencyRule {
                name: "performance totals vs trusted order totals",
                refined_table: PERFORMANCE,
                refined_sql: "SELECT SUM(total_sold) FROM refined_monthly_brand_performance",
                trusted_sql: "SELECT SUM(total_value) FROM trusted_order",
                tolerance_pct: tol.cross_layer_pct,
            },
        ],
        completeness: vec![CompletenessRule {
            table: BESTSELLERS,
            columns: &["region", "product_name"],
            threshold_pct: tol.completeness_pct,
        }],
        coverage: vec![CoverageRule {
            description: "brands without performance rows",
            dimension: BRAND,
            dim_key: "id",
            fact: PERFORMANCE,
            fact_key: "brand_id",
        }],
        month_ranges: vec![MonthRangeRule {
            table: BESTSELLERS,
            month_column: "month",
        }],
        check_audit: false,
        tables,
    }
}
