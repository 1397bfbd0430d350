//! Rich diagnostic error types for the dimlaw engine.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text so users know exactly what went wrong
//! and how to fix the hypothesis.

use miette::Diagnostic;
use thiserror::Error;

use crate::dimension::DimensionVector;

/// Top-level error type for the dimlaw engine.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum DimlawError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Discovery errors
// ---------------------------------------------------------------------------

/// Why a relationship could not be discovered.
///
/// `InconsistentDimensions` and `UnderdeterminedSystem` are recoverable: they
/// carry suggestions a caller (or the auto-search) can use to retry with a
/// larger quantity set.
#[derive(Debug, Clone, Error, Diagnostic)]
pub enum DiscoveryError {
    #[error("engine not initialized: call Engine::initialize() first")]
    #[diagnostic(
        code(dimlaw::engine::not_initialized),
        help("The quantity catalog is built by `Engine::initialize()`. Call it once before discovery.")
    )]
    EngineNotInitialized,

    #[error("unknown quantity: '{name}'")]
    #[diagnostic(
        code(dimlaw::catalog::unknown_quantity),
        help("Please check the list of available quantities with `dimlaw quantities`.")
    )]
    UnknownQuantity { name: String },

    #[error("hypothesis requires at least 2 quantities")]
    #[diagnostic(
        code(dimlaw::solver::insufficient_vars),
        help("Provide an output quantity and at least one distinct input quantity.")
    )]
    InsufficientVariables,

    #[error("hypothesis is dimensionally inconsistent: the equation for '{culprit}' cannot be satisfied")]
    #[diagnostic(
        code(dimlaw::solver::inconsistent),
        help("Add one of the suggested quantities to the constants list, or enable auto-search.")
    )]
    InconsistentDimensions {
        /// The missing dimension(s) or the conflicting dimension row.
        culprit: String,
        /// Dimensions the output needs that no input carries, when the failure
        /// was detected structurally.
        missing: Option<DimensionVector>,
        suggestions: Vec<String>,
    },

    #[error("hypothesis is underdetermined: {free_parameters} dimensionless groups can be formed")]
    #[diagnostic(
        code(dimlaw::solver::underdetermined),
        help("Add constants to constrain the system, or enable auto-search to try the suggestions.")
    )]
    UnderdeterminedSystem {
        free_parameters: usize,
        suggestions: Vec<String>,
    },

    #[error("low-level solver error: {cause}")]
    #[diagnostic(
        code(dimlaw::solver::failure),
        help(
            "The exact elimination hit a case the rank check did not anticipate. \
             This is a bug; please report the request that triggered it."
        )
    )]
    SolverFailure { cause: String },
}

impl DiscoveryError {
    /// Whether retrying with an extended quantity set can fix this failure.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InconsistentDimensions { .. } | Self::UnderdeterminedSystem { .. }
        )
    }

    /// Suggested quantities attached to a classification failure.
    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::InconsistentDimensions { suggestions, .. }
            | Self::UnderdeterminedSystem { suggestions, .. } => suggestions,
            _ => &[],
        }
    }

    /// Render the multi-line diagnostic message returned to hosts.
    pub fn report(&self) -> String {
        match self {
            Self::EngineNotInitialized => {
                "FATAL ERROR: Engine not initialized. The initialize() method must be called first."
                    .to_string()
            }
            Self::UnknownQuantity { name } => format!(
                "Unknown quantity: '{name}'. Please check the list of available quantities."
            ),
            Self::InsufficientVariables => {
                "Hypothesis requires at least 2 quantities.".to_string()
            }
            Self::InconsistentDimensions {
                culprit,
                missing: Some(_),
                suggestions,
            } => format!(
                "Hypothesis is impossible. Inputs are missing required dimensions.\n       \
                 Reason: Output requires '{culprit}', not present in inputs.\n       \
                 Suggestion: Try adding: {}",
                suggestions.join(", ")
            ),
            Self::InconsistentDimensions {
                culprit,
                missing: None,
                suggestions,
            } => format!(
                "Hypothesis is dimensionally inconsistent.\n       \
                 Reason: The equation for '{culprit}' cannot be satisfied.\n       \
                 Analysis: The quantities have conflicting relationships.\n       \
                 Suggestion: A fundamental constant is likely needed. Try: {}",
                suggestions.join(", ")
            ),
            Self::UnderdeterminedSystem {
                free_parameters,
                suggestions,
            } => format!(
                "Hypothesis is underdetermined. Infinite solutions exist.\n       \
                 Reason: {free_parameters} dimensionless groups can be formed.\n       \
                 Suggestion: Add constants to constrain the system, such as: {}",
                suggestions.join(", ")
            ),
            Self::SolverFailure { cause } => {
                format!("A low-level solver error occurred: {cause}")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum CatalogError {
    #[error("duplicate quantity: '{name}' is already in the catalog")]
    #[diagnostic(
        code(dimlaw::catalog::duplicate),
        help(
            "Quantity identity is by name alone. Two entries with the same name \
             would make lookups ambiguous; rename or drop one of them."
        )
    )]
    DuplicateQuantity { name: String },

    #[error("quantity with symbol '{symbol}' has an empty name")]
    #[diagnostic(
        code(dimlaw::catalog::empty_name),
        help("Every quantity needs a non-empty identifier.")
    )]
    EmptyName { symbol: String },
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    #[diagnostic(
        code(dimlaw::config::io),
        help("Check that the file exists and is readable.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config TOML: {message}")]
    #[diagnostic(
        code(dimlaw::config::parse),
        help("The config file must be valid TOML with the keys documented on EngineConfig.")
    )]
    Parse { message: String },

    #[error("invalid configuration: {message}")]
    #[diagnostic(code(dimlaw::config::invalid), help("Check the EngineConfig fields. {message}"))]
    Invalid { message: String },
}

/// Convenience alias for discovery operations.
pub type DiscoveryResult<T> = std::result::Result<T, DiscoveryError>;

/// Convenience alias for functions returning dimlaw results.
pub type DimlawResult<T> = std::result::Result<T, DimlawError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovery_error_converts_to_dimlaw_error() {
        let err = DiscoveryError::InsufficientVariables;
        let top: DimlawError = err.into();
        assert!(matches!(
            top,
            DimlawError::Discovery(DiscoveryError::InsufficientVariables)
        ));
    }

    #[test]
    fn only_classification_failures_are_recoverable() {
        assert!(
            DiscoveryError::UnderdeterminedSystem {
                free_parameters: 2,
                suggestions: vec![],
            }
            .is_recoverable()
        );
        assert!(!DiscoveryError::EngineNotInitialized.is_recoverable());
        assert!(
            !DiscoveryError::SolverFailure {
                cause: "overflow".into()
            }
            .is_recoverable()
        );
    }

    #[test]
    fn report_embeds_suggestions_and_cause() {
        let err = DiscoveryError::UnderdeterminedSystem {
            free_parameters: 2,
            suggestions: vec!["speed_of_light".into(), "planck_constant".into()],
        };
        let msg = err.report();
        assert!(msg.contains("2 dimensionless groups"));
        assert!(msg.contains("speed_of_light, planck_constant"));

        let err = DiscoveryError::SolverFailure {
            cause: "rational overflow".into(),
        };
        assert!(err.report().contains("rational overflow"));
    }

    #[test]
    fn unknown_quantity_display_names_it() {
        let err = DiscoveryError::UnknownQuantity {
            name: "flux".into(),
        };
        assert!(format!("{err}").contains("'flux'"));
    }
}
