//! Declarative validation rule descriptors.
//!
//! Rules are data, not code: each tier of the validator is a generic
//! executor over a list of descriptors, so adding a check means adding an
//! entry to a catalog rather than a new code path. Descriptors are
//! stateless and evaluated independently; ordering within a tier is
//! insignificant.

use crate::tier::{Layer, TableRef};

/// Everything the validator needs for one layer: the tables it must find
/// and the rule lists for each tier.
#[derive(Debug, Clone)]
pub struct RuleSet {
    /// Layer this set targets
    pub layer: Layer,

    /// Tables the existence tier must find in the store
    pub tables: Vec<TableRef>,

    /// Volume tier: row-count rules
    pub volume: Vec<VolumeRule>,

    /// Referential tier: declared foreign-key relationships
    pub foreign_keys: Vec<ForeignKeyRule>,

    /// Null tier: required (NOT NULL) fields
    pub required_fields: Vec<RequiredFieldRule>,

    /// Range tier: numeric and format domain rules
    pub ranges: Vec<RangeRule>,

    /// Uniqueness tier: primary-key columns
    pub uniqueness: Vec<UniquenessRule>,

    /// Business-rule tier: cross-row consistency within the layer
    pub business: Vec<BusinessRule>,

    /// Consistency tier: refined-vs-trusted reconciliations
    pub consistency: Vec<ConsistencyRule>,

    /// Quality tier: completeness of optional-but-expected fields
    pub completeness: Vec<CompletenessRule>,

    /// Quality tier: dimension entities expected in a derived fact table
    pub coverage: Vec<CoverageRule>,

    /// Quality tier: month columns that should not lie in the future
    pub month_ranges: Vec<MonthRangeRule>,

    /// Quality tier: corroborate live row counts against the ingestion
    /// audit log when one is present
    pub check_audit: bool,
}

impl RuleSet {
    /// An empty set for the given layer.
    pub fn empty(layer: Layer) -> Self {
        Self {
            layer,
            tables: Vec::new(),
            volume: Vec::new(),
            foreign_keys: Vec::new(),
            required_fields: Vec::new(),
            ranges: Vec::new(),
            uniqueness: Vec::new(),
            business: Vec::new(),
            consistency: Vec::new(),
            completeness: Vec::new(),
            coverage: Vec::new(),
            month_ranges: Vec::new(),
            check_audit: false,
        }
    }
}

/// Row-count expectation for one table.
///
/// Zero rows is always an ERROR. `warn_below` adds a secondary WARNING
/// threshold for suspiciously low counts; it is only meaningful for
/// trusted-layer tables where an absolute minimum makes sense.
#[derive(Debug, Clone, Copy)]
pub struct VolumeRule {
    pub table: TableRef,
    pub warn_below: Option<i64>,
}

/// One declared foreign-key relationship.
///
/// Evaluated independently per relationship: any orphan in the child is an
/// ERROR, zero orphans is the only passing state.
#[derive(Debug, Clone, Copy)]
pub struct ForeignKeyRule {
    /// Display name, e.g. `product.brand_id -> brand.id`
    pub name: &'static str,
    pub child: TableRef,
    pub child_key: &'static str,
    pub parent: TableRef,
    pub parent_key: &'static str,
}

/// A field that must contain no NULLs. One result per field.
#[derive(Debug, Clone, Copy)]
pub struct RequiredFieldRule {
    pub table: TableRef,
    pub column: &'static str,
}

/// Numeric or format invariant on one table. Violations are ERROR.
#[derive(Debug, Clone, Copy)]
pub struct RangeRule {
    pub table: TableRef,
    /// What the rule guards, for result messages
    pub description: &'static str,
    pub check: DomainCheck,
}

/// The predicate side of a [`RangeRule`].
#[derive(Debug, Clone, Copy)]
pub enum DomainCheck {
    /// Column values must be >= 0 (NULLs ignored)
    NonNegative { column: &'static str },

    /// Column values must be > 0 (NULLs ignored)
    Positive { column: &'static str },

    /// Column values must lie in [min, max] inclusive (NULLs ignored)
    Between {
        column: &'static str,
        min: i64,
        max: i64,
    },

    /// Non-null column values must match the regex pattern.
    /// Evaluated client-side; the store dialect has no native regex.
    Matches {
        column: &'static str,
        pattern: &'static str,
    },

    /// Year/month/day columns must agree with the date column they describe
    DateComponents {
        date_column: &'static str,
        year_column: &'static str,
        month_column: &'static str,
        day_column: &'static str,
    },

    /// Escape hatch for invariants that need their own query: `sql` must
    /// return a single integer count of violating rows
    ViolationQuery { sql: &'static str },
}

/// Primary-key column that must have zero duplicate values.
#[derive(Debug, Clone, Copy)]
pub struct UniquenessRule {
    pub table: TableRef,
    pub key: &'static str,
}

/// Cross-row consistency expectation within one layer.
///
/// Business rules default to WARNING: they are data-quality signals, not
/// hard constraint violations.
#[derive(Debug, Clone, Copy)]
pub enum BusinessRule {
    /// An order's stored total must equal the sum of its non-cancelled line
    /// items' quantity x unit price, within an absolute tolerance.
    TotalMatchesItems {
        orders: TableRef,
        items: TableRef,
        /// Absolute rounding tolerance on the comparison
        epsilon: f64,
    },

    /// Every parent row should have at least one child row.
    ParentHasChildren {
        parent: TableRef,
        child: TableRef,
        child_fk: &'static str,
    },
}

/// Reconciliation of a refined aggregate against a trusted total.
///
/// Both queries must return a single nullable numeric total. Relative
/// divergence at or above `tolerance_pct` is WARNING; the boundary is
/// inclusive on the WARNING side. Drift is informative rather than a
/// defect: refined tables may exclude cancellations differently than a
/// naive trusted sum.
#[derive(Debug, Clone, Copy)]
pub struct ConsistencyRule {
    pub name: &'static str,
    /// Refined table the reconciliation reads; skipped when the existence
    /// tier found it missing
    pub refined_table: TableRef,
    pub refined_sql: &'static str,
    pub trusted_sql: &'static str,
    pub tolerance_pct: f64,
}

/// Completeness (percentage non-null) expectation for optional-but-expected
/// fields. Falling below the threshold is WARNING.
#[derive(Debug, Clone, Copy)]
pub struct CompletenessRule {
    pub table: TableRef,
    pub columns: &'static [&'static str],
    pub threshold_pct: f64,
}

/// Dimension entities expected to appear in a derived fact table.
///
/// Entities with zero fact rows are WARNING, not ERROR: absence of
/// activity is a valid state.
#[derive(Debug, Clone, Copy)]
pub struct CoverageRule {
    /// e.g. "brands without performance rows"
    pub description: &'static str,
    pub dimension: TableRef,
    pub dim_key: &'static str,
    pub fact: TableRef,
    pub fact_key: &'static str,
}

/// A month column that should not contain future periods.
#[derive(Debug, Clone, Copy)]
pub struct MonthRangeRule {
    pub table: TableRef,
    pub month_column: &'static str,
}
