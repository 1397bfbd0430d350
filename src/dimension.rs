//! Dimension alphabet and exact dimension-exponent vectors.
//!
//! A [`DimensionVector`] maps each base [`Dimension`] to an exact rational
//! [`Exponent`]. Zero exponents are never stored, so two vectors are equal
//! exactly when they describe the same physical dimension.

use std::collections::BTreeMap;

use num_rational::Ratio;
use num_traits::{One, Signed, Zero};

/// Exact rational exponent.
pub type Exponent = Ratio<i64>;

/// Base dimensions of the SI-style system used by the catalog.
///
/// The declaration order is the row order of every dimensional matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    /// L
    Length,
    /// M
    Mass,
    /// N
    Amount,
    /// Q
    Charge,
    /// T
    Time,
    /// Θ
    Temperature,
}

impl Dimension {
    /// All dimensions in matrix row order.
    pub const ALL: [Dimension; 6] = [
        Dimension::Length,
        Dimension::Mass,
        Dimension::Amount,
        Dimension::Charge,
        Dimension::Time,
        Dimension::Temperature,
    ];

    /// Display symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Dimension::Length => "L",
            Dimension::Mass => "M",
            Dimension::Amount => "N",
            Dimension::Charge => "Q",
            Dimension::Time => "T",
            Dimension::Temperature => "Θ",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Sparse mapping `Dimension -> Exponent` with zero entries elided.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DimensionVector {
    exponents: BTreeMap<Dimension, Exponent>,
}

impl DimensionVector {
    /// The dimensionless vector.
    pub fn dimensionless() -> Self {
        Self::default()
    }

    /// Build from integer exponents. Zero entries are dropped and repeated
    /// dimensions accumulate.
    pub fn from_pairs(pairs: &[(Dimension, i64)]) -> Self {
        let mut v = Self::default();
        for &(dim, exp) in pairs {
            v.add_exponent(dim, Exponent::from_integer(exp));
        }
        v
    }

    /// Exponent of `dim`, zero when absent.
    pub fn get(&self, dim: Dimension) -> Exponent {
        self.exponents.get(&dim).copied().unwrap_or_else(Exponent::zero)
    }

    /// Add `exp` to the exponent of `dim`, removing the entry if it cancels.
    pub fn add_exponent(&mut self, dim: Dimension, exp: Exponent) {
        let total = self.get(dim) + exp;
        if total.is_zero() {
            self.exponents.remove(&dim);
        } else {
            self.exponents.insert(dim, total);
        }
    }

    /// Keep only the entries whose dimension satisfies `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(Dimension) -> bool) {
        self.exponents.retain(|d, _| keep(*d));
    }

    /// Dimensions carrying a nonzero exponent, in row order.
    pub fn dimensions(&self) -> impl Iterator<Item = Dimension> + '_ {
        self.exponents.keys().copied()
    }

    /// `(dimension, exponent)` pairs in row order.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, Exponent)> + '_ {
        self.exponents.iter().map(|(d, e)| (*d, *e))
    }

    pub fn contains(&self, dim: Dimension) -> bool {
        self.exponents.contains_key(&dim)
    }

    pub fn len(&self) -> usize {
        self.exponents.len()
    }

    pub fn is_dimensionless(&self) -> bool {
        self.exponents.is_empty()
    }

    /// Whether both vectors use exactly the same set of dimensions.
    pub fn same_dimensions(&self, other: &Self) -> bool {
        self.exponents.keys().eq(other.exponents.keys())
    }

    /// `Σ weight · vector` over the given terms.
    pub fn weighted_sum<'a>(terms: impl IntoIterator<Item = (Exponent, &'a DimensionVector)>) -> Self {
        let mut out = Self::default();
        for (weight, vector) in terms {
            for (dim, exp) in vector.iter() {
                out.add_exponent(dim, weight * exp);
            }
        }
        out
    }

    /// Comma-separated rendering with Unicode superscript exponents, e.g. `L², T⁻²`.
    pub fn superscript_list(&self) -> String {
        self.iter()
            .map(|(dim, exp)| {
                if exp.is_one() {
                    dim.symbol().to_string()
                } else {
                    format!("{}{}", dim.symbol(), superscript(exp))
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for DimensionVector {
    /// Renders as `L^2 M T^-2`, or `1` when dimensionless.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_dimensionless() {
            return f.write_str("1");
        }
        let mut first = true;
        for (dim, exp) in self.iter() {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            if exp.is_one() {
                write!(f, "{dim}")?;
            } else {
                write!(f, "{dim}^{exp}")?;
            }
        }
        Ok(())
    }
}

impl FromIterator<(Dimension, Exponent)> for DimensionVector {
    fn from_iter<I: IntoIterator<Item = (Dimension, Exponent)>>(iter: I) -> Self {
        let mut v = Self::default();
        for (dim, exp) in iter {
            v.add_exponent(dim, exp);
        }
        v
    }
}

/// Render an exponent in Unicode superscript (`-2` → `⁻²`, `1/2` → `¹ᐟ²`).
pub fn superscript(exp: Exponent) -> String {
    let digits = |n: i64| -> String {
        n.to_string()
            .chars()
            .map(|c| match c {
                '-' => '⁻',
                '0' => '⁰',
                '1' => '¹',
                '2' => '²',
                '3' => '³',
                '4' => '⁴',
                '5' => '⁵',
                '6' => '⁶',
                '7' => '⁷',
                '8' => '⁸',
                '9' => '⁹',
                other => other,
            })
            .collect()
    };
    if exp.is_integer() {
        digits(*exp.numer())
    } else {
        let sign = if exp.is_negative() { "⁻" } else { "" };
        format!("{sign}{}ᐟ{}", digits(exp.numer().abs()), digits(*exp.denom()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn energy() -> DimensionVector {
        DimensionVector::from_pairs(&[
            (Dimension::Mass, 1),
            (Dimension::Length, 2),
            (Dimension::Time, -2),
        ])
    }

    #[test]
    fn zero_exponents_are_elided() {
        let v = DimensionVector::from_pairs(&[(Dimension::Length, 0), (Dimension::Mass, 1)]);
        assert_eq!(v.len(), 1);
        assert!(!v.contains(Dimension::Length));
        assert!(DimensionVector::from_pairs(&[(Dimension::Time, 0)]).is_dimensionless());
    }

    #[test]
    fn display_uses_row_order() {
        assert_eq!(energy().to_string(), "L^2 M T^-2");
        assert_eq!(DimensionVector::dimensionless().to_string(), "1");
    }

    #[test]
    fn weighted_sum_cancels_to_dimensionless() {
        let e = energy();
        let sum = DimensionVector::weighted_sum([
            (Exponent::one(), &e),
            (-Exponent::one(), &e),
        ]);
        assert!(sum.is_dimensionless());
    }

    #[test]
    fn superscript_rendering() {
        let missing = DimensionVector::from_pairs(&[(Dimension::Length, 2), (Dimension::Time, -2)]);
        assert_eq!(missing.superscript_list(), "L², T⁻²");
        assert_eq!(superscript(Exponent::new(-1, 2)), "⁻¹ᐟ²");
    }

    #[test]
    fn symbols_are_distinct() {
        let symbols: std::collections::BTreeSet<_> =
            Dimension::ALL.iter().map(|d| d.symbol()).collect();
        assert_eq!(symbols.len(), Dimension::ALL.len());
        assert_eq!(Dimension::Temperature.to_string(), "Θ");
    }
}
