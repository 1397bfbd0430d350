//! Quantity sets and the dimensional matrix built over them.
//!
//! A [`QuantitySet`] is the deduplicated `[output] + inputs + constants` list
//! of a request, resolved against the catalog. The [`DimensionalMatrix`] has
//! one row per dimension used by any member and one column per member, with
//! the output in column 0.

use std::collections::{BTreeSet, HashSet};

use crate::catalog::QuantityCatalog;
use crate::dimension::{Dimension, DimensionVector, Exponent};
use crate::error::DiscoveryResult;
use crate::quantity::Quantity;

/// Ordered, duplicate-free list of resolved quantities. Never empty; the
/// output is always at index 0.
#[derive(Debug, Clone)]
pub struct QuantitySet<'a> {
    members: Vec<&'a Quantity>,
}

impl<'a> QuantitySet<'a> {
    /// Deduplicate `[output] + inputs + constants` preserving first occurrence,
    /// then resolve every name. Fails on the first unknown name.
    pub fn resolve<S: AsRef<str>>(
        catalog: &'a QuantityCatalog,
        output: &str,
        inputs: &[S],
        constants: &[S],
    ) -> DiscoveryResult<Self> {
        let mut seen = HashSet::new();
        let names: Vec<&str> = std::iter::once(output)
            .chain(inputs.iter().map(AsRef::as_ref))
            .chain(constants.iter().map(AsRef::as_ref))
            .filter(|name| seen.insert(*name))
            .collect();
        Ok(Self {
            members: catalog.resolve(names.as_slice())?,
        })
    }

    /// The output quantity.
    pub fn output(&self) -> &'a Quantity {
        self.members[0]
    }

    /// Inputs and constants, in order.
    pub fn predictors(&self) -> &[&'a Quantity] {
        &self.members[1..]
    }

    pub fn members(&self) -> &[&'a Quantity] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|q| q.name() == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.members.iter().map(|&q| q.name())
    }

    /// Sorted union of dimensions used by any member.
    pub fn dimensions(&self) -> BTreeSet<Dimension> {
        QuantityCatalog::all_dimensions(&self.members)
    }

    /// The part of the output's dimension vector whose dimensions no
    /// predictor carries at all. Empty when every output dimension is covered.
    pub fn missing_dimensions(&self) -> DimensionVector {
        let covered = QuantityCatalog::all_dimensions(self.predictors());
        let mut missing = self.output().dimensions().clone();
        missing.retain(|d| !covered.contains(&d));
        missing
    }
}

/// Rectangular matrix of dimension exponents: `rows × columns`.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionalMatrix {
    rows: Vec<Dimension>,
    cells: Vec<Vec<Exponent>>,
}

impl DimensionalMatrix {
    /// `matrix[d][q] = set[q].dimensions[d]`, zero when absent.
    pub fn build(set: &QuantitySet<'_>, dimensions: &BTreeSet<Dimension>) -> Self {
        let rows: Vec<Dimension> = dimensions.iter().copied().collect();
        let cells = rows
            .iter()
            .map(|&d| set.members().iter().map(|q| q.dimensions().get(d)).collect())
            .collect();
        Self { rows, cells }
    }

    /// Row labels.
    pub fn dimensions(&self) -> &[Dimension] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn get(&self, row: usize, column: usize) -> Exponent {
        self.cells[row][column]
    }

    /// The system `[A | b]` with `A` = columns 1..n and `b` = −column 0.
    pub fn augmented_system(&self) -> Vec<Vec<Exponent>> {
        (0..self.row_count())
            .map(|r| {
                let mut out: Vec<Exponent> =
                    (1..self.column_count()).map(|c| self.get(r, c)).collect();
                out.push(-self.get(r, 0));
                out
            })
            .collect()
    }
}
