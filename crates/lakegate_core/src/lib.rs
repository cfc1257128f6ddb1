//! # Lakegate Core
//!
//! Core types for the lakegate warehouse quality gate.
//!
//! Lakegate moves retail transaction data through two layers of a relational
//! warehouse: a raw *trusted* layer mirroring source extracts and a derived
//! *refined* layer of analytics-ready aggregates. Promotion between the
//! layers is gated by a tiered battery of data-quality checks.
//!
//! This crate provides the building blocks shared by the transformation
//! engine, the validator, and the CLI:
//!
//! - **Results**: [`Status`], [`CheckResult`], the append-only [`ResultLog`]
//!   and the run-level [`Verdict`] derived from it
//! - **Tiers and layers**: [`Tier`] (validation categories in execution
//!   order) and [`Layer`] (trusted/refined table naming)
//! - **Rules**: declarative rule descriptors evaluated by the validator;
//!   new checks are additions to a catalog, not new code paths
//! - **Configuration**: [`PipelineConfig`] with tolerance thresholds
//! - **Errors**: [`PipelineError`] and the crate [`Result`] alias

pub mod config;
pub mod error;
pub mod result;
pub mod rules;
pub mod tier;

pub use config::*;
pub use error::*;
pub use result::*;
pub use rules::*;
pub use tier::*;
