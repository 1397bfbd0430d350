//! Engine configuration, loadable from TOML.
//!
//! ```toml
//! max_suggestions = 4
//! max_denominator = 100
//! zero_tolerance = 1e-10
//! large_exponent_threshold = 5.0
//! max_search_depth = 3
//! ```
//!
//! Every key is optional; missing keys take the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::format::FormulaFormatter;
use crate::validate::ReasonablenessValidator;

/// Configuration for the discovery engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Maximum number of scored suggestions (default: 4).
    pub max_suggestions: usize,
    /// Denominator bound for rational approximation (default: 100).
    pub max_denominator: i64,
    /// Exponents smaller than this in magnitude are treated as zero (default: 1e-10).
    pub zero_tolerance: f64,
    /// Largest exponent magnitude considered physical (default: 5.0).
    pub large_exponent_threshold: f64,
    /// Optional cap on auto-search recursion depth. `None` lets the search
    /// run until the catalog is exhausted.
    pub max_search_depth: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_suggestions: 4,
            max_denominator: 100,
            zero_tolerance: 1e-10,
            large_exponent_threshold: 5.0,
            max_search_depth: None,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_suggestions == 0 {
            return Err(ConfigError::Invalid {
                message: "max_suggestions must be > 0".into(),
            });
        }
        if self.max_denominator <= 0 {
            return Err(ConfigError::Invalid {
                message: "max_denominator must be > 0".into(),
            });
        }
        if self.zero_tolerance.is_nan() || self.zero_tolerance < 0.0 {
            return Err(ConfigError::Invalid {
                message: "zero_tolerance must be a non-negative number".into(),
            });
        }
        Ok(())
    }

    pub fn formatter(&self) -> FormulaFormatter {
        FormulaFormatter {
            max_denominator: self.max_denominator,
            zero_tolerance: self.zero_tolerance,
        }
    }

    pub fn validator(&self) -> ReasonablenessValidator {
        ReasonablenessValidator {
            large_exponent_threshold: self.large_exponent_threshold,
            max_denominator: self.max_denominator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn partial_document_overrides_keys() {
        let config = EngineConfig::from_toml_str("max_suggestions = 2\nmax_search_depth = 3\n").unwrap();
        assert_eq!(config.max_suggestions, 2);
        assert_eq!(config.max_search_depth, Some(3));
        assert_eq!(config.max_denominator, 100);
    }

    #[test]
    fn invalid_values_rejected() {
        let err = EngineConfig::from_toml_str("max_suggestions = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
        let err = EngineConfig::from_toml_str("max_denominator = -3").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn unknown_keys_rejected() {
        let err = EngineConfig::from_toml_str("max_sugestions = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("dimlaw.toml");
        std::fs::write(&path, "large_exponent_threshold = 3.0\n").unwrap();
        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.large_exponent_threshold, 3.0);

        let err = EngineConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
