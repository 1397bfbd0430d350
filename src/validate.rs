//! Heuristic plausibility checks for a solved relationship.
//!
//! Runs only after a successful solve. The report is advisory: warnings lower
//! the confidence score but never turn a solution into a failure.

use serde::{Deserialize, Serialize};

use crate::format::{exponent_to_f64, limit_denominator};
use crate::matrix::QuantitySet;
use crate::solver::SolutionExponents;

const LARGE_EXPONENT_FACTOR: f64 = 0.7;
const COMPLEX_FRACTION_FACTOR: f64 = 0.8;
const NONLINEAR_TEMPERATURE_FACTOR: f64 = 0.9;

/// Plausibility report attached to every successful discovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub dimensionally_correct: bool,
    pub physically_reasonable: bool,
    pub confidence_score: f64,
    pub warnings: Vec<String>,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self {
            dimensionally_correct: true,
            physically_reasonable: true,
            confidence_score: 1.0,
            warnings: Vec::new(),
        }
    }
}

impl ValidationReport {
    fn flag(&mut self, warning: String, factor: f64) {
        tracing::debug!(%warning, factor, "reasonableness warning");
        self.warnings.push(warning);
        self.confidence_score *= factor;
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ReasonablenessValidator {
    pub large_exponent_threshold: f64,
    pub max_denominator: i64,
}

impl Default for ReasonablenessValidator {
    fn default() -> Self {
        Self {
            large_exponent_threshold: 5.0,
            max_denominator: 100,
        }
    }
}

impl ReasonablenessValidator {
    pub fn validate(&self, set: &QuantitySet<'_>, exponents: &SolutionExponents) -> ValidationReport {
        let mut report = ValidationReport::default();
        let predictors = exponents.predictors();

        let max_exp = predictors
            .iter()
            .map(|&e| exponent_to_f64(e).abs())
            .fold(0.0_f64, f64::max);
        if max_exp > self.large_exponent_threshold {
            report.flag(
                format!("Large exponent detected ({max_exp:.1}) - may be unphysical"),
                LARGE_EXPONENT_FACTOR,
            );
        }

        for (quantity, &exp) in set.predictors().iter().zip(predictors) {
            let frac = limit_denominator(exp, self.max_denominator);
            if *frac.denom() > 4 && exponent_to_f64(exp).abs() > 0.1 {
                report.flag(
                    format!("Complex fractional exponent for {}: {frac}", quantity.symbol()),
                    COMPLEX_FRACTION_FACTOR,
                );
            }
        }

        if set.output().name().contains("energy") {
            for (quantity, &exp) in set.predictors().iter().zip(predictors) {
                if quantity.name().contains("temperature") && (exponent_to_f64(exp) - 1.0).abs() > 0.1 {
                    report.flag(
                        "Energy-temperature relationships are typically linear".to_string(),
                        NONLINEAR_TEMPERATURE_FACTOR,
                    );
                }
            }
        }

        report
    }
}
