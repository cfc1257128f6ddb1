//! End-to-end tests for the transformation engine against in-memory SQLite.

use lakegate_core::TableRef;
use lakegate_store::{connect_memory, create_trusted_schema, table_exists};
use lakegate_transform::{TransformEngine, TransformJob, jobs};
use pretty_assertions::assert_eq;
use sqlx::SqlitePool;

async fn exec(pool: &SqlitePool, sql: &str) {
    sqlx::query(sql).execute(pool).await.unwrap();
}

/// Two brands, three products, orders across January and February 2024.
/// Order 12 is cancelled along with its single line item.
async fn fixture_pool() -> SqlitePool {
    let pool = connect_memory().await.unwrap();
    create_trusted_schema(&pool).await.unwrap();

    exec(&pool, "INSERT INTO trusted_brand VALUES (1, 'Alpha'), (2, 'Beta')").await;
    exec(
        &pool,
        "INSERT INTO trusted_product VALUES
            (1, 'Runner', 'Footwear', 1),
            (2, 'Jersey', 'Apparel', 2),
            (3, 'Cap', NULL, 2)",
    )
    .await;
    exec(
        &pool,
        "INSERT INTO trusted_date VALUES
            ('2024-01-10', 2024, 1, 10, NULL),
            ('2024-01-15', 2024, 1, 15, NULL),
            ('2024-02-10', 2024, 2, 10, NULL)",
    )
    .await;
    exec(
        &pool,
        "INSERT INTO trusted_order VALUES
            (10, '2024-01-10', 'SP', 100.0, 'COMPLETE', 'c1'),
            (11, '2024-01-15', 'SP', 60.0, 'COMPLETE', 'c2'),
            (12, '2024-02-10', 'RJ', 50.0, 'CANCELLED', 'c3')",
    )
    .await;
    exec(
        &pool,
        "INSERT INTO trusted_order_item VALUES
            (100, 10, 1, 5, 20.0, 'N'),
            (101, 11, 2, 3, 20.0, 'N'),
            (102, 12, 3, 2, 25.0, 'Y')",
    )
    .await;
    exec(&pool, "INSERT INTO trusted_sales_target VALUES (1, 2024, 1, 200.0)").await;

    pool
}

type BestsellerRow = (String, Option<String>, i64, String, i64, i64);

async fn bestseller_rows(pool: &SqlitePool) -> Vec<BestsellerRow> {
    sqlx::query_as(
        "SELECT month, region, product_id, product_name, total_quantity, rank_position
         FROM refined_monthly_bestsellers",
    )
    .fetch_all(pool)
    .await
    .unwrap()
}

#[tokio::test]
async fn full_catalog_builds_all_six_tables() {
    let pool = fixture_pool().await;
    let engine = TransformEngine::new(pool.clone());

    let summary = engine.run_all(&jobs()).await;
    assert_eq!(summary.attempted(), 6);
    assert_eq!(summary.failed(), 0);
    assert!(summary.all_succeeded());

    for job in jobs() {
        assert!(
            table_exists(&pool, &job.target.qualified()).await.unwrap(),
            "{} missing",
            job.target.qualified()
        );
    }
}

#[tokio::test]
async fn rerun_is_idempotent() {
    let pool = fixture_pool().await;
    let engine = TransformEngine::new(pool.clone());

    engine.run_all(&jobs()).await;
    let first = bestseller_rows(&pool).await;
    let first_kpis: Vec<(String, i64, f64, f64)> = sqlx::query_as(
        "SELECT month, order_count, gross_revenue, avg_ticket FROM refined_sales_kpis",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    engine.run_all(&jobs()).await;
    let second = bestseller_rows(&pool).await;
    let second_kpis: Vec<(String, i64, f64, f64)> = sqlx::query_as(
        "SELECT month, order_count, gross_revenue, avg_ticket FROM refined_sales_kpis",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert_eq!(first, second);
    assert_eq!(first_kpis, second_kpis);
    assert!(!first.is_empty());
}

#[tokio::test]
async fn tied_quantities_share_rank_and_leave_a_gap() {
    let pool = connect_memory().await.unwrap();
    create_trusted_schema(&pool).await.unwrap();

    exec(&pool, "INSERT INTO trusted_brand VALUES (1, 'Alpha')").await;
    exec(
        &pool,
        "INSERT INTO trusted_product VALUES
            (1, 'A', NULL, 1), (2, 'B', NULL, 1), (3, 'C', NULL, 1)",
    )
    .await;
    exec(
        &pool,
        "INSERT INTO trusted_order VALUES
            (10, '2024-03-05', 'SP', 240.0, 'COMPLETE', NULL)",
    )
    .await;
    // Products 1 and 2 tie on quantity 5; product 3 trails with 2.
    exec(
        &pool,
        "INSERT INTO trusted_order_item VALUES
            (1, 10, 1, 5, 20.0, 'N'),
            (2, 10, 2, 5, 20.0, 'N'),
            (3, 10, 3, 2, 20.0, 'N')",
    )
    .await;

    let engine = TransformEngine::new(pool.clone());
    let summary = engine.run_all(&jobs()[..1]).await;
    assert!(summary.all_succeeded());

    let ranks: Vec<(i64, i64)> = sqlx::query_as(
        "SELECT product_id, rank_position FROM refined_monthly_bestsellers
         ORDER BY rank_position, product_id",
    )
    .fetch_all(&pool)
    .await
    .unwrap();
    assert_eq!(ranks, vec![(1, 1), (2, 1), (3, 3)]);
}

#[tokio::test]
async fn failed_job_does_not_abort_the_batch() {
    let pool = fixture_pool().await;
    let engine = TransformEngine::new(pool.clone());

    let catalog = jobs();
    let batch = vec![
        catalog[0],
        TransformJob {
            name: "broken",
            target: TableRef::refined("broken"),
            select_sql: "SELECT * FROM trusted_no_such_table",
        },
        catalog[2],
    ];

    let summary = engine.run_all(&batch).await;
    assert_eq!(summary.attempted(), 3);
    assert_eq!(summary.failed(), 1);
    assert!(!summary.outcomes[1].succeeded());
    assert!(summary.outcomes[1].error.is_some());

    // Siblings still ran to completion.
    assert!(table_exists(&pool, "refined_monthly_bestsellers").await.unwrap());
    assert!(table_exists(&pool, "refined_sales_kpis").await.unwrap());
    assert!(!table_exists(&pool, "refined_broken").await.unwrap());
}

#[tokio::test]
async fn failed_rebuild_keeps_the_prior_snapshot() {
    let pool = fixture_pool().await;
    let engine = TransformEngine::new(pool.clone());

    engine.run_all(&jobs()[..1]).await;
    let before = bestseller_rows(&pool).await;
    assert!(!before.is_empty());

    // Same target, broken query: the drop and the failed create roll back
    // together, so the previous snapshot stays visible.
    let broken = TransformJob {
        name: "monthly_bestsellers",
        target: TableRef::refined("monthly_bestsellers"),
        select_sql: "SELECT * FROM trusted_no_such_table",
    };
    let summary = engine.run_all(&[broken]).await;
    assert_eq!(summary.failed(), 1);

    let after = bestseller_rows(&pool).await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn category_variation_uses_lag_with_null_first_period() {
    let pool = connect_memory().await.unwrap();
    create_trusted_schema(&pool).await.unwrap();

    exec(&pool, "INSERT INTO trusted_brand VALUES (1, 'Alpha')").await;
    exec(&pool, "INSERT INTO trusted_product VALUES (1, 'Runner', 'Footwear', 1)").await;
    exec(
        &pool,
        "INSERT INTO trusted_order VALUES
            (10, '2024-01-10', 'SP', 80.0, 'COMPLETE', NULL),
            (11, '2024-02-10', 'SP', 120.0, 'COMPLETE', NULL)",
    )
    .await;
    exec(
        &pool,
        "INSERT INTO trusted_order_item VALUES
            (1, 10, 1, 4, 20.0, 'N'),
            (2, 11, 1, 6, 20.0, 'N')",
    )
    .await;

    let engine = TransformEngine::new(pool.clone());
    let catalog = jobs();
    let variation = catalog.iter().find(|j| j.name == "category_variation").unwrap();
    let summary = engine.run_all(std::slice::from_ref(variation)).await;
    assert!(summary.all_succeeded());

    let rows: Vec<(String, Option<f64>)> = sqlx::query_as(
        "SELECT month, quantity_change_pct FROM refined_category_variation
         WHERE category = 'Footwear' ORDER BY month",
    )
    .fetch_all(&pool)
    .await
    .unwrap();
    assert_eq!(
        rows,
        vec![
            ("2024-01-01".to_string(), None),
            ("2024-02-01".to_string(), Some(50.0)),
        ]
    );
}

#[tokio::test]
async fn brand_performance_attainment_is_null_without_target() {
    let pool = fixture_pool().await;
    let engine = TransformEngine::new(pool.clone());

    let catalog = jobs();
    let perf = catalog
        .iter()
        .find(|j| j.name == "monthly_brand_performance")
        .unwrap();
    assert!(engine.run_all(std::slice::from_ref(perf)).await.all_succeeded());

    let rows: Vec<(i64, i64, String, f64, f64, Option<f64>)> = sqlx::query_as(
        "SELECT year, month, brand_name, total_sold, target_value, target_attainment_pct
         FROM refined_monthly_brand_performance ORDER BY year, month, brand_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    // Alpha sold 100 against a 200 target in January; Beta has no target.
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], (2024, 1, "Alpha".to_string(), 100.0, 200.0, Some(50.0)));
    assert_eq!(rows[1].2, "Beta");
    assert_eq!(rows[1].4, 0.0);
    assert_eq!(rows[1].5, None);
}
