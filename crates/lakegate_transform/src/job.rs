//! Transformation job definitions and outcomes.

use lakegate_core::TableRef;

/// One named transformation: a deterministic aggregate query over trusted
/// tables that fully rebuilds one refined table.
#[derive(Debug, Clone, Copy)]
pub struct TransformJob {
    /// Job name, used in logs and outcomes
    pub name: &'static str,

    /// Refined table the job owns and overwrites
    pub target: TableRef,

    /// Aggregate SELECT computed entirely from trusted-layer inputs
    pub select_sql: &'static str,
}

/// Per-job result of one engine run.
#[derive(Debug, Clone)]
pub struct JobOutcome {
    pub job: &'static str,
    pub target: String,

    /// Rows in the rebuilt table; 0 when the job failed
    pub rows: i64,

    /// Database-level failure, if the rebuild raised one
    pub error: Option<String>,
}

impl JobOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Batch-level summary: jobs attempted and jobs failed, never an abort.
#[derive(Debug, Clone, Default)]
pub struct TransformSummary {
    pub outcomes: Vec<JobOutcome>,
}

impl TransformSummary {
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.succeeded()).count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }
}
