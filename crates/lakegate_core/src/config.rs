//! Pipeline configuration.
//!
//! A small TOML file sets the database location and the tolerance
//! thresholds used by the validator. Every field has a default, so an
//! absent or partial file is fine.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration for a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Path to the SQLite database file
    pub database: String,

    /// Tolerance thresholds for validation tiers
    pub tolerances: Tolerances,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            database: "lakegate.db".to_string(),
            tolerances: Tolerances::default(),
        }
    }
}

impl PipelineConfig {
    /// Loads configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

/// Numeric thresholds used by the validator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Relative divergence (percent) at which a cross-layer reconciliation
    /// turns WARNING; the boundary is inclusive on the WARNING side
    pub cross_layer_pct: f64,

    /// Absolute rounding tolerance when comparing an order's stored total
    /// against the sum of its line items
    pub order_total_epsilon: f64,

    /// Minimum percentage of non-null values for optional-but-expected
    /// fields before a completeness WARNING
    pub completeness_pct: f64,

    /// Trusted-layer row counts below this are suspicious (WARNING)
    pub min_trusted_rows: i64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            cross_layer_pct: 1.0,
            order_total_epsilon: 0.01,
            completeness_pct: 95.0,
            min_trusted_rows: 10,
        }
    }
}
