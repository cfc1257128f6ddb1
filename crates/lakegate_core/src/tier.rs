//! Validation tiers and warehouse layers.

use std::fmt;

/// Category of validation rule, executed as a batch.
///
/// Tiers run strictly in the declared order because later tiers assume the
/// structural invariants established by earlier ones (business-rule checks
/// assume tables exist and are non-empty). No tier is skipped when an
/// earlier one reports errors: checks are independent reads, so partial
/// failure in one tier cannot corrupt another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Existence,
    Volume,
    Referential,
    NullConstraint,
    Range,
    Uniqueness,
    BusinessRule,
    Consistency,
    QualityMetrics,
}

impl Tier {
    /// All tiers in execution order.
    pub const ALL: [Tier; 9] = [
        Tier::Existence,
        Tier::Volume,
        Tier::Referential,
        Tier::NullConstraint,
        Tier::Range,
        Tier::Uniqueness,
        Tier::BusinessRule,
        Tier::Consistency,
        Tier::QualityMetrics,
    ];
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Existence => "existence",
            Tier::Volume => "volume",
            Tier::Referential => "referential integrity",
            Tier::NullConstraint => "null constraints",
            Tier::Range => "ranges and domains",
            Tier::Uniqueness => "uniqueness",
            Tier::BusinessRule => "business rules",
            Tier::Consistency => "cross-layer consistency",
            Tier::QualityMetrics => "quality metrics",
        };
        write!(f, "{name}")
    }
}

/// Warehouse layer a table belongs to.
///
/// The store renders layers as table-name prefixes (`trusted_*`,
/// `refined_*`); this type owns that mapping so no other code builds
/// qualified names by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// First-stage, minimally transformed tables mirroring source extracts
    Trusted,
    /// Analytics-ready aggregates derived solely from the trusted layer
    Refined,
}

impl Layer {
    pub fn prefix(&self) -> &'static str {
        match self {
            Layer::Trusted => "trusted",
            Layer::Refined => "refined",
        }
    }

    /// Qualified physical table name for a logical table in this layer.
    pub fn qualify(&self, table: &str) -> String {
        format!("{}_{}", self.prefix(), table)
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

/// Reference to one table in one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRef {
    pub layer: Layer,
    pub name: &'static str,
}

impl TableRef {
    pub const fn new(layer: Layer, name: &'static str) -> Self {
        Self { layer, name }
    }

    pub const fn trusted(name: &'static str) -> Self {
        Self::new(Layer::Trusted, name)
    }

    pub const fn refined(name: &'static str) -> Self {
        Self::new(Layer::Refined, name)
    }

    /// Physical table name in the store.
    pub fn qualified(&self) -> String {
        self.layer.qualify(self.name)
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.layer, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_are_ordered() {
        assert!(Tier::Existence < Tier::Volume);
        assert!(Tier::Uniqueness < Tier::BusinessRule);
        assert!(Tier::Consistency < Tier::QualityMetrics);
        assert_eq!(Tier::ALL.len(), 9);
    }

    #[test]
    fn qualified_names_use_layer_prefix() {
        let t = TableRef::trusted("order_item");
        assert_eq!(t.qualified(), "trusted_order_item");
        let r = TableRef::refined("sales_kpis");
        assert_eq!(r.qualified(), "refined_sales_kpis");
        assert_eq!(r.to_string(), "refined.sales_kpis");
    }
}
