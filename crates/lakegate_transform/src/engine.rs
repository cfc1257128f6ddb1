//! Job executor.

use crate::{JobOutcome, TransformJob, TransformSummary};
use lakegate_core::Result;
use sqlx::SqlitePool;
use tracing::{error, info};

/// Executes transformation jobs against the warehouse.
pub struct TransformEngine {
    pool: SqlitePool,
}

impl TransformEngine {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Runs every job in declared order.
    ///
    /// Failure is job-local: a job whose rebuild raises a database error is
    /// recorded as failed and execution proceeds to the next job. The
    /// summary conveys jobs attempted and jobs failed.
    pub async fn run_all(&self, jobs: &[TransformJob]) -> TransformSummary {
        let mut summary = TransformSummary::default();

        for job in jobs {
            let target = job.target.qualified();
            match self.rebuild(job).await {
                Ok(rows) => {
                    info!("job {}: rebuilt {target} with {rows} rows", job.name);
                    summary.outcomes.push(JobOutcome {
                        job: job.name,
                        target,
                        rows,
                        error: None,
                    });
                }
                Err(e) => {
                    error!("job {} failed: {e}", job.name);
                    summary.outcomes.push(JobOutcome {
                        job: job.name,
                        target,
                        rows: 0,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        summary
    }

    /// Drops and recreates the job's target as a single transaction.
    ///
    /// The transaction is the atomic-replace mechanism: a concurrent reader
    /// of the refined table observes either the prior snapshot or the fully
    /// rebuilt one, never an empty or partially populated table.
    async fn rebuild(&self, job: &TransformJob) -> Result<i64> {
        let target = job.target.qualified();
        let mut tx = self.pool.begin().await?;

        sqlx::query(&format!("DROP TABLE IF EXISTS {target}"))
            .execute(&mut *tx)
            .await?;
        sqlx::query(&format!("CREATE TABLE {target} AS {}", job.select_sql))
            .execute(&mut *tx)
            .await?;
        let rows: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {target}"))
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(rows)
    }
}
