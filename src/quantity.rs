//! Named physical quantities.

use std::hash::{Hash, Hasher};

use crate::dimension::DimensionVector;

/// A named physical quantity with its dimension vector.
///
/// Identity is by `name` alone: two quantities with the same name compare
/// equal even if their symbols or dimensions differ. The catalog refuses to
/// hold two such entries.
#[derive(Debug, Clone)]
pub struct Quantity {
    name: String,
    symbol: String,
    dimensions: DimensionVector,
    description: String,
}

impl Quantity {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        dimensions: DimensionVector,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            dimensions,
            description: description.into(),
        }
    }

    /// Unique identifier (e.g. `"speed_of_light"`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display symbol used in formulas (e.g. `"c"`).
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn dimensions(&self) -> &DimensionVector {
        &self.dimensions
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Quantity {}

impl Hash for Quantity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl std::fmt::Display for Quantity {
    /// `E [L^2 M T^-2]`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.symbol, self.dimensions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::Dimension;

    #[test]
    fn identity_is_by_name() {
        let a = Quantity::new(
            "length",
            "L",
            DimensionVector::from_pairs(&[(Dimension::Length, 1)]),
            "",
        );
        let b = Quantity::new("length", "ℓ", DimensionVector::dimensionless(), "other");
        assert_eq!(a, b);

        let mut set = std::collections::HashSet::new();
        set.insert(a);
        assert!(!set.insert(b));
    }

    #[test]
    fn display_shows_symbol_and_dimensions() {
        let alpha = Quantity::new("fine_structure", "α", DimensionVector::dimensionless(), "");
        assert_eq!(alpha.to_string(), "α [1]");
    }
}
