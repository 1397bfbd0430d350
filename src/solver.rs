//! Consistency solver: classify and exactly solve the dimensional system.
//!
//! For a quantity set `[out, x₁ … xₙ]` the solver looks for exponents `eᵢ`
//! with `Σ eᵢ · dim(xᵢ) = dim(out)`. It works over exact rationals so that
//! half- and third-integer exponents survive to the formatter intact.
//!
//! Classification:
//! - fewer than two quantities → `InsufficientVariables`
//! - an output dimension no input carries → `InconsistentDimensions` (structural,
//!   no elimination performed)
//! - `rank(A) < rank([A|b])` → `InconsistentDimensions`
//! - `rank(A) < n` → `UnderdeterminedSystem`
//! - otherwise → unique solution

use std::collections::BTreeSet;

use num_traits::{CheckedDiv, CheckedMul, CheckedSub, One, Zero};

use crate::dimension::{Dimension, DimensionVector, Exponent};
use crate::error::{DiscoveryError, DiscoveryResult};
use crate::matrix::{DimensionalMatrix, QuantitySet};
use crate::suggest::SuggestionEngine;

/// Exponents aligned with a [`QuantitySet`]; index 0 (the output) is always 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionExponents(Vec<Exponent>);

impl SolutionExponents {
    /// Build from the predictor exponents; the leading 1 is prepended.
    pub fn from_predictors(predictors: impl IntoIterator<Item = Exponent>) -> Self {
        Self(std::iter::once(Exponent::one()).chain(predictors).collect())
    }

    pub fn get(&self, index: usize) -> Exponent {
        self.0[index]
    }

    pub fn as_slice(&self) -> &[Exponent] {
        &self.0
    }

    /// Exponents of the predictors (indices 1..n).
    pub fn predictors(&self) -> &[Exponent] {
        &self.0[1..]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Σ eᵢ · dim(setᵢ)` over the predictors.
    pub fn combined_dimensions(&self, set: &QuantitySet<'_>) -> DimensionVector {
        DimensionVector::weighted_sum(
            self.predictors()
                .iter()
                .zip(set.predictors())
                .map(|(e, q)| (*e, q.dimensions())),
        )
    }
}

/// Classifies quantity sets, attaching suggestions to every recoverable failure.
#[derive(Debug, Clone, Copy)]
pub struct ConsistencySolver<'c> {
    suggester: SuggestionEngine<'c>,
}

impl<'c> ConsistencySolver<'c> {
    pub fn new(suggester: SuggestionEngine<'c>) -> Self {
        Self { suggester }
    }

    /// Classify `set` over `dimensions`, returning the unique solution on success.
    pub fn classify(
        &self,
        set: &QuantitySet<'_>,
        dimensions: &BTreeSet<Dimension>,
    ) -> DiscoveryResult<SolutionExponents> {
        if set.len() < 2 {
            return Err(DiscoveryError::InsufficientVariables);
        }

        let missing = set.missing_dimensions();
        if !missing.is_dimensionless() {
            tracing::debug!(missing = %missing, "output dimensions not covered by inputs");
            let suggestions = self.suggester.suggest(set, Some(&missing));
            return Err(DiscoveryError::InconsistentDimensions {
                culprit: missing.superscript_list(),
                missing: Some(missing),
                suggestions,
            });
        }

        let matrix = DimensionalMatrix::build(set, dimensions);
        let unknowns = set.len() - 1;
        let mut system = ReducedSystem::new(&matrix);
        system
            .reduce()
            .map_err(|cause| DiscoveryError::SolverFailure { cause })?;

        let rank = system.coefficient_rank(unknowns);
        let augmented_rank = system.pivots.len();
        tracing::debug!(rank, augmented_rank, unknowns, "classified dimensional system");

        if rank < augmented_rank {
            let culprit = system
                .conflicting_row(unknowns)
                .map(|d| d.symbol().to_string())
                .unwrap_or_else(|| "an unknown dimension".to_string());
            return Err(DiscoveryError::InconsistentDimensions {
                culprit,
                missing: None,
                suggestions: self.suggester.suggest(set, None),
            });
        }

        if rank < unknowns {
            return Err(DiscoveryError::UnderdeterminedSystem {
                free_parameters: unknowns - rank + 1,
                suggestions: self.suggester.suggest(set, None),
            });
        }

        let solution = system
            .back_substitute(unknowns)
            .map_err(|cause| DiscoveryError::SolverFailure { cause })?;

        // x solves A·x = −dim(out); the exponents are −x.
        let exponents = SolutionExponents::from_predictors(solution.into_iter().map(|x| -x));
        if exponents.combined_dimensions(set) != *set.output().dimensions() {
            return Err(DiscoveryError::SolverFailure {
                cause: "solution does not reproduce the output dimensions".into(),
            });
        }
        Ok(exponents)
    }
}

/// Augmented matrix `[A | b]` under Gauss-Jordan elimination, with row
/// labels tracked through swaps.
struct ReducedSystem {
    rows: Vec<Vec<Exponent>>,
    labels: Vec<Dimension>,
    /// `(row, column)` of every pivot, in column order.
    pivots: Vec<(usize, usize)>,
}

impl ReducedSystem {
    fn new(matrix: &DimensionalMatrix) -> Self {
        tracing::trace!(
            rows = matrix.row_count(),
            columns = matrix.column_count(),
            "reducing dimensional matrix"
        );
        Self {
            rows: matrix.augmented_system(),
            labels: matrix.dimensions().to_vec(),
            pivots: Vec::new(),
        }
    }

    /// Reduce to reduced row echelon form. Fails only on rational overflow.
    fn reduce(&mut self) -> Result<(), String> {
        let row_count = self.rows.len();
        let column_count = self.rows.first().map_or(0, Vec::len);
        let mut next_row = 0;

        for col in 0..column_count {
            if next_row == row_count {
                break;
            }
            let Some(pivot) = (next_row..row_count).find(|&r| !self.rows[r][col].is_zero()) else {
                continue;
            };
            self.rows.swap(next_row, pivot);
            self.labels.swap(next_row, pivot);

            let lead = self.rows[next_row][col];
            for value in self.rows[next_row].iter_mut() {
                *value = value.checked_div(&lead).ok_or_else(|| overflow("normalize"))?;
            }

            for r in 0..row_count {
                if r == next_row {
                    continue;
                }
                let factor = self.rows[r][col];
                if factor.is_zero() {
                    continue;
                }
                for c in 0..column_count {
                    let delta = factor
                        .checked_mul(&self.rows[next_row][c])
                        .ok_or_else(|| overflow("eliminate"))?;
                    self.rows[r][c] = self.rows[r][c]
                        .checked_sub(&delta)
                        .ok_or_else(|| overflow("eliminate"))?;
                }
            }

            self.pivots.push((next_row, col));
            next_row += 1;
        }
        Ok(())
    }

    /// Number of pivots among the first `unknowns` columns.
    fn coefficient_rank(&self, unknowns: usize) -> usize {
        self.pivots.iter().filter(|(_, c)| *c < unknowns).count()
    }

    /// A row whose coefficients all vanish but whose right-hand side does not.
    fn conflicting_row(&self, unknowns: usize) -> Option<Dimension> {
        self.rows
            .iter()
            .position(|row| row[..unknowns].iter().all(Zero::is_zero) && !row[unknowns].is_zero())
            .map(|r| self.labels[r])
    }

    /// Read the unique solution out of the reduced rows.
    fn back_substitute(&self, unknowns: usize) -> Result<Vec<Exponent>, String> {
        let mut solution = vec![None; unknowns];
        for &(row, col) in &self.pivots {
            if col < unknowns {
                solution[col] = Some(self.rows[row][unknowns]);
            }
        }
        solution
            .into_iter()
            .enumerate()
            .map(|(i, x)| x.ok_or_else(|| format!("no pivot for unknown {i}")))
            .collect()
    }
}

fn overflow(stage: &str) -> String {
    format!("rational overflow during {stage} step")
}
