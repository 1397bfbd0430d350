//! Suggestion scoring: which catalog entry to add to a failing hypothesis.
//!
//! Two strategies:
//! 1. Targeted: score every unselected entry against the dimensions the
//!    output needs but no input carries.
//! 2. Fallback: a fixed priority list of fundamental constants, used when
//!    there is no specific dimension to target.

use crate::catalog::QuantityCatalog;
use crate::dimension::DimensionVector;
use crate::matrix::QuantitySet;

/// Constants that get a small bonus in targeted scoring.
pub const FUNDAMENTAL_CONSTANTS: [&str; 4] = [
    "speed_of_light",
    "planck_constant",
    "gravitational_constant",
    "boltzmann_constant",
];

/// Priority order for the fallback suggestions.
pub const FALLBACK_CONSTANTS: [&str; 5] = [
    "speed_of_light",
    "planck_constant",
    "gravitational_constant",
    "boltzmann_constant",
    "elementary_charge",
];

const EXACT_MATCH_SCORE: f64 = 10.0;
const SAME_DIMENSIONS_SCORE: f64 = 5.0;
const EXTRA_DIMENSION_PENALTY: f64 = 0.5;
const FUNDAMENTAL_BONUS: f64 = 0.2;

/// A scored candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub name: String,
    pub score: f64,
}

/// Proposes quantities to add to a quantity set.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionEngine<'c> {
    catalog: &'c QuantityCatalog,
    limit: usize,
}

impl<'c> SuggestionEngine<'c> {
    /// `limit` caps the targeted list; the fallback list is never truncated.
    pub fn new(catalog: &'c QuantityCatalog, limit: usize) -> Self {
        Self { catalog, limit }
    }

    /// Names to try next, best first, excluding anything already in `set`.
    ///
    /// A `missing` vector with no entries behaves like `None`.
    pub fn suggest(&self, set: &QuantitySet<'_>, missing: Option<&DimensionVector>) -> Vec<String> {
        match missing {
            Some(missing) if !missing.is_dimensionless() => self
                .score(set, missing)
                .into_iter()
                .map(|s| s.name)
                .collect(),
            _ => Self::fallback(set),
        }
    }

    /// Targeted scoring against `missing`, top `limit` by score.
    ///
    /// Ties keep catalog order (the sort is stable).
    pub fn score(&self, set: &QuantitySet<'_>, missing: &DimensionVector) -> Vec<Suggestion> {
        let mut scored: Vec<Suggestion> = self
            .catalog
            .iter()
            .filter(|q| !set.contains(q.name()))
            .filter_map(|q| {
                let dims = q.dimensions();
                let mut score = if dims.same_dimensions(missing) {
                    if dims == missing {
                        EXACT_MATCH_SCORE
                    } else {
                        SAME_DIMENSIONS_SCORE
                    }
                } else {
                    let shared = missing.dimensions().filter(|d| dims.contains(*d)).count();
                    if shared == 0 {
                        return None;
                    }
                    let extra = dims.dimensions().filter(|d| !missing.contains(*d)).count();
                    shared as f64 - extra as f64 * EXTRA_DIMENSION_PENALTY
                };
                if FUNDAMENTAL_CONSTANTS.contains(&q.name()) {
                    score += FUNDAMENTAL_BONUS;
                }
                (score > 0.0).then(|| Suggestion {
                    name: q.name().to_string(),
                    score,
                })
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(self.limit);
        scored
    }

    /// The fixed priority list minus whatever is already selected.
    pub fn fallback(set: &QuantitySet<'_>) -> Vec<String> {
        FALLBACK_CONSTANTS
            .iter()
            .filter(|name| !set.contains(name))
            .map(|name| name.to_string())
            .collect()
    }
}
