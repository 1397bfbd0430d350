//! Discovery pipeline and recursive auto-search.
//!
//! [`AutoSearch::run`] resolves a request, classifies it and, on success,
//! formats and validates the solution. When classification fails in a
//! recoverable way and the request asks for auto-search, each suggested
//! quantity is appended to the constants in turn and the whole pipeline is
//! re-run. The first success anywhere below wins.
//!
//! Every nested call adds exactly one quantity not already in the set, so
//! the depth is bounded by the catalog size. Sets that already failed with
//! at least the same remaining depth budget are not searched twice.

use std::collections::HashMap;

use miette::Diagnostic;
use thiserror::Error;

use crate::catalog::QuantityCatalog;
use crate::config::EngineConfig;
use crate::dimension::Exponent;
use crate::error::DiscoveryError;
use crate::matrix::QuantitySet;
use crate::request::RelationshipRequest;
use crate::solver::ConsistencySolver;
use crate::suggest::SuggestionEngine;
use crate::validate::ValidationReport;

pub const UNIQUE_MESSAGE: &str = "Unique dimensionless relationship found.";
pub const DIMENSIONLESS_MESSAGE: &str = "Relationship between dimensionless quantities.";

/// A successfully discovered relationship.
#[derive(Debug, Clone, PartialEq)]
pub struct Discovery {
    pub formula: String,
    /// `(quantity name, exponent)` for every input and constant, in set order.
    /// Empty for the all-dimensionless shortcut, where exponents are free.
    pub exponents: Vec<(String, Exponent)>,
    pub validation: ValidationReport,
    pub message: String,
    /// The top-level auto-search candidate that led to this solution.
    pub resolved_by: Option<String>,
}

impl Discovery {
    /// Exponent of `name` in the formula, if it appears.
    pub fn exponent_of(&self, name: &str) -> Option<Exponent> {
        self.exponents
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, e)| *e)
    }
}

/// A failed discovery: the original diagnostic plus, when auto-search ran at
/// the top level, the ordered list of attempts.
#[derive(Debug, Clone, Error, Diagnostic)]
#[error("{error}")]
#[diagnostic(forward(error))]
pub struct DiscoveryFailure {
    pub error: DiscoveryError,
    pub attempts: Option<Vec<String>>,
}

impl DiscoveryFailure {
    /// Host-facing message: the diagnostic, then the attempt log if any.
    pub fn report(&self) -> String {
        let mut message = self.error.report();
        if let Some(attempts) = &self.attempts {
            message.push_str("\n\n--- Auto-Search Log ---\nAuto-search initiated...");
            for attempt in attempts {
                message.push('\n');
                message.push_str(attempt);
            }
        }
        message
    }
}

impl From<DiscoveryError> for DiscoveryFailure {
    fn from(error: DiscoveryError) -> Self {
        Self {
            error,
            attempts: None,
        }
    }
}

/// Runs the discovery pipeline against one catalog and config.
#[derive(Debug)]
pub struct AutoSearch<'c> {
    catalog: &'c QuantityCatalog,
    config: &'c EngineConfig,
    /// Sorted member names of sets whose search failed, with the depth budget
    /// they were searched under.
    exhausted: HashMap<Vec<String>, usize>,
}

impl<'c> AutoSearch<'c> {
    pub fn new(catalog: &'c QuantityCatalog, config: &'c EngineConfig) -> Self {
        Self {
            catalog,
            config,
            exhausted: HashMap::new(),
        }
    }

    /// Run the full pipeline for `request`.
    pub fn run(&mut self, request: &RelationshipRequest) -> Result<Discovery, DiscoveryFailure> {
        self.discover(request, 0)
    }

    fn discover(
        &mut self,
        request: &RelationshipRequest,
        depth: usize,
    ) -> Result<Discovery, DiscoveryFailure> {
        let catalog = self.catalog;
        let set = QuantitySet::resolve(
            catalog,
            &request.output,
            request.inputs.as_slice(),
            request.constants(),
        )?;
        let dimensions = set.dimensions();

        if dimensions.is_empty() && set.len() > 1 {
            return Ok(Discovery {
                formula: self.config.formatter().format_dimensionless(&set),
                exponents: Vec::new(),
                validation: ValidationReport::default(),
                message: DIMENSIONLESS_MESSAGE.to_string(),
                resolved_by: None,
            });
        }

        let suggester = SuggestionEngine::new(catalog, self.config.max_suggestions);
        let solver = ConsistencySolver::new(suggester);
        match solver.classify(&set, &dimensions) {
            Ok(exponents) => {
                let formula = self.config.formatter().format(&set, &exponents);
                let validation = self.config.validator().validate(&set, &exponents);
                tracing::debug!(%formula, confidence = validation.confidence_score, "solved");
                Ok(Discovery {
                    formula,
                    exponents: set
                        .predictors()
                        .iter()
                        .zip(exponents.predictors())
                        .map(|(q, e)| (q.name().to_string(), *e))
                        .collect(),
                    validation,
                    message: UNIQUE_MESSAGE.to_string(),
                    resolved_by: None,
                })
            }
            Err(error) if request.auto_search && error.is_recoverable() => {
                self.search(request, &set, error, depth)
            }
            Err(error) => {
                if let DiscoveryError::SolverFailure { cause } = &error {
                    tracing::warn!(%cause, "solver failure");
                }
                Err(error.into())
            }
        }
    }

    fn search(
        &mut self,
        request: &RelationshipRequest,
        set: &QuantitySet<'_>,
        error: DiscoveryError,
        depth: usize,
    ) -> Result<Discovery, DiscoveryFailure> {
        let budget = self
            .config
            .max_search_depth
            .map_or(usize::MAX, |max| max.saturating_sub(depth));
        if budget == 0 {
            return Err(error.into());
        }

        let mut key: Vec<String> = set.names().map(str::to_string).collect();
        key.sort();
        if self.exhausted.get(&key).is_some_and(|&b| b >= budget) {
            tracing::debug!(depth, "auto-search: set already exhausted");
            return Err(DiscoveryFailure {
                error,
                attempts: Some(Vec::new()),
            });
        }

        let mut attempts = Vec::new();
        for candidate in error.suggestions() {
            if set.contains(candidate) {
                continue;
            }
            if request.verbose {
                tracing::info!(%candidate, depth, "auto-search: trying candidate");
            } else {
                tracing::debug!(%candidate, depth, "auto-search: trying candidate");
            }
            attempts.push(format!("   ► Trying to add '{candidate}'..."));

            let next = request.with_extra_constant(candidate);
            if let Ok(mut found) = self.discover(&next, depth + 1) {
                found.message = format!("Auto-search found a solution by adding '{candidate}'.");
                found.resolved_by = Some(candidate.clone());
                return Ok(found);
            }
        }

        self.exhausted.insert(key, budget);
        Err(DiscoveryFailure {
            error,
            attempts: Some(attempts),
        })
    }
}
