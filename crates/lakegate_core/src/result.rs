//! Validation results, the run log, and the promotion verdict.
//!
//! Every check resolves to a [`CheckResult`] appended to a [`ResultLog`].
//! The log is an explicit value passed through the run and folded into a
//! [`Verdict`] at the end; nothing is accumulated in module-level state, so
//! repeated runs within one process cannot contaminate each other.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Severity of a single validation result.
///
/// `Error` denotes a referential or structural defect that makes downstream
/// consumption unsafe. `Warning` denotes a statistical anomaly a human
/// should review but which does not block promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Success,
    Warning,
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Success => write!(f, "SUCCESS"),
            Status::Warning => write!(f, "WARNING"),
            Status::Error => write!(f, "ERROR"),
        }
    }
}

/// One immutable entry in the run log.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    /// Severity of the outcome
    pub status: Status,

    /// Human-readable description of what was checked and what was found
    pub message: String,

    /// When the result was recorded
    pub timestamp: DateTime<Utc>,
}

impl CheckResult {
    /// Creates a result stamped with the current time.
    pub fn new(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Run-level pass/fail gate.
///
/// `Fail` iff the log contains at least one `ERROR`-severity result;
/// warnings are surfaced but never flip the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    /// Whether the gate is open.
    pub fn passed(&self) -> bool {
        matches!(self, Verdict::Pass)
    }

    /// Process exit signal consumed by the orchestrator: 0 on pass.
    pub fn exit_code(&self) -> i32 {
        match self {
            Verdict::Pass => 0,
            Verdict::Fail => 1,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => write!(f, "PASS"),
            Verdict::Fail => write!(f, "FAIL"),
        }
    }
}

/// Ordered, append-only log of validation results for one run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResultLog {
    entries: Vec<CheckResult>,
}

impl ResultLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a SUCCESS result.
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(CheckResult::new(Status::Success, message));
    }

    /// Records a WARNING result.
    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(CheckResult::new(Status::Warning, message));
    }

    /// Records an ERROR result.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(CheckResult::new(Status::Error, message));
    }

    /// Appends a pre-built result.
    pub fn push(&mut self, result: CheckResult) {
        self.entries.push(result);
    }

    /// All recorded results, in insertion order.
    pub fn entries(&self) -> &[CheckResult] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries with the given status.
    pub fn count(&self, status: Status) -> usize {
        self.entries.iter().filter(|r| r.status == status).count()
    }

    pub fn successes(&self) -> usize {
        self.count(Status::Success)
    }

    pub fn warnings(&self) -> usize {
        self.count(Status::Warning)
    }

    pub fn errors(&self) -> usize {
        self.count(Status::Error)
    }

    /// Folds the log into the run-level verdict.
    pub fn verdict(&self) -> Verdict {
        if self.errors() > 0 {
            Verdict::Fail
        } else {
            Verdict::Pass
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_log_passes() {
        let log = ResultLog::new();
        assert_eq!(log.verdict(), Verdict::Pass);
        assert_eq!(log.verdict().exit_code(), 0);
    }

    #[test]
    fn warnings_do_not_fail_the_gate() {
        let mut log = ResultLog::new();
        log.success("table trusted_brand: 42 rows");
        log.warning("completeness below threshold");
        assert_eq!(log.verdict(), Verdict::Pass);
        assert_eq!(log.warnings(), 1);
        assert_eq!(log.successes(), 1);
    }

    #[test]
    fn single_error_fails_the_gate() {
        let mut log = ResultLog::new();
        log.success("ok");
        log.warning("hm");
        log.error("orphan rows found");
        assert_eq!(log.verdict(), Verdict::Fail);
        assert_eq!(log.verdict().exit_code(), 1);
        assert_eq!(log.errors(), 1);
    }

    #[test]
    fn entries_keep_insertion_order() {
        let mut log = ResultLog::new();
        log.success("first");
        log.error("second");
        log.warning("third");
        let messages: Vec<_> = log.entries().iter().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
    }
}
