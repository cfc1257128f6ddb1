//! # Lakegate Validator
//!
//! Tiered data-quality validator for the lakegate warehouse. The validator
//! runs a battery of checks over the trusted and refined layers:
//!
//! 1. Existence: tables present in the store
//! 2. Volume: row counts above zero (and above a floor for trusted tables)
//! 3. Referential integrity: declared foreign keys resolve with no orphans
//! 4. Null constraints: required fields contain no NULLs
//! 5. Ranges and domains: numeric and format invariants
//! 6. Uniqueness: primary-key columns free of duplicates
//! 7. Business rules: cross-row consistency within a layer
//! 8. Cross-layer consistency: refined aggregates reconcile with trusted
//!    totals within a relative tolerance
//! 9. Quality metrics: completeness, coverage, date ranges, audit context
//!
//! Checks are independent reads: every tier runs even when an earlier tier
//! reported errors, and a check whose query fails is recorded as an ERROR
//! result rather than escaping as a fault. The run folds into a
//! [`lakegate_core::Verdict`]: FAIL iff any ERROR-severity result exists.

mod business;
mod consistency;
mod engine;
mod integrity;
mod quality;
mod rules;
mod structural;

pub use engine::*;
pub use rules::*;
