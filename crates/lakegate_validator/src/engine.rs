//! Validation engine: runs the tiers in order and folds the verdict.

use crate::{business, consistency, integrity, quality, structural};
use lakegate_core::{ResultLog, RuleSet, Tier, Verdict};
use sqlx::SqlitePool;
use tracing::debug;

/// Outcome of one validation run.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// Ordered log of every check result
    pub log: ResultLog,

    /// FAIL iff the log contains any ERROR-severity result
    pub verdict: Verdict,
}

/// Runs rule sets against the warehouse, tier by tier.
///
/// Tiers execute strictly in order and none is skipped: checks are
/// independent reads, so an error in one tier cannot corrupt another.
/// Tables the existence tier finds missing are excluded from later tiers'
/// rules: the structural failure halts dependent checks for that table
/// only.
pub struct Validator {
    pool: SqlitePool,
}

impl Validator {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Runs every tier of the rule set and returns the folded report.
    pub async fn run_all(&self, rules: &RuleSet) -> ValidationReport {
        let mut log = ResultLog::new();
        self.run_into(rules, &mut log).await;
        let verdict = log.verdict();
        ValidationReport { log, verdict }
    }

    /// Runs every tier, appending to an existing log. Lets a caller gate on
    /// the combined verdict of several layers.
    pub async fn run_into(&self, rules: &RuleSet, log: &mut ResultLog) {
        debug!(
            "validating {} layer ({} tiers)",
            rules.layer,
            Tier::ALL.len()
        );

        debug!("tier: {}", Tier::Existence);
        let missing = structural::check_existence(&self.pool, &rules.tables, log).await;
        debug!("tier: {}", Tier::Volume);
        structural::check_volume(&self.pool, &rules.volume, &missing, log).await;
        debug!("tier: {}", Tier::Referential);
        integrity::check_foreign_keys(&self.pool, &rules.foreign_keys, &missing, log).await;
        debug!("tier: {}", Tier::NullConstraint);
        integrity::check_required_fields(&self.pool, &rules.required_fields, &missing, log).await;
        debug!("tier: {}", Tier::Range);
        integrity::check_ranges(&self.pool, &rules.ranges, &missing, log).await;
        debug!("tier: {}", Tier::Uniqueness);
        integrity::check_uniqueness(&self.pool, &rules.uniqueness, &missing, log).await;
        debug!("tier: {}", Tier::BusinessRule);
        business::check_business_rules(&self.pool, &rules.business, &missing, log).await;
        debug!("tier: {}", Tier::Consistency);
        consistency::check_consistency(&self.pool, &rules.consistency, &missing, log).await;
        debug!("tier: {}", Tier::QualityMetrics);
        quality::check_completeness(&self.pool, &rules.completeness, &missing, log).await;
        quality::check_coverage(&self.pool, &rules.coverage, &missing, log).await;
        quality::check_month_ranges(&self.pool, &rules.month_ranges, &missing, log).await;
        if rules.check_audit {
            quality::check_audit(&self.pool, &rules.tables, log).await;
        }
    }
}
