//! Host-facing request and response types.
//!
//! These are the JSON shapes exchanged with whatever drives the engine (the
//! CLI, a batch file, an embedding host). Field names are camelCase.

use serde::{Deserialize, Serialize};

use crate::validate::ValidationReport;

/// A hypothesis to test: can `output` be written as a power law of
/// `inputs` and `constants`?
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipRequest {
    pub output: String,
    pub inputs: Vec<String>,
    #[serde(default)]
    pub constants: Option<Vec<String>>,
    #[serde(default)]
    pub auto_search: bool,
    #[serde(default)]
    pub verbose: bool,
}

impl RelationshipRequest {
    pub fn new<S: Into<String>>(output: impl Into<String>, inputs: impl IntoIterator<Item = S>) -> Self {
        Self {
            output: output.into(),
            inputs: inputs.into_iter().map(Into::into).collect(),
            constants: None,
            auto_search: false,
            verbose: false,
        }
    }

    pub fn with_constants<S: Into<String>>(mut self, constants: impl IntoIterator<Item = S>) -> Self {
        self.constants = Some(constants.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_auto_search(mut self, auto_search: bool) -> Self {
        self.auto_search = auto_search;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Constants, or an empty slice when absent.
    pub fn constants(&self) -> &[String] {
        self.constants.as_deref().unwrap_or(&[])
    }

    /// Copy of this request with `name` appended to the constants.
    pub fn with_extra_constant(&self, name: &str) -> Self {
        let mut next = self.clone();
        next.constants
            .get_or_insert_with(Vec::new)
            .push(name.to_string());
        next
    }
}

/// Result returned to the host. `formula` and `validation` are present only
/// on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationReport>,
    pub message: String,
}

impl DiscoveryResponse {
    pub fn success(
        formula: impl Into<String>,
        validation: ValidationReport,
        message: impl Into<String>,
    ) -> Self {
        Self {
            success: true,
            formula: Some(formula.into()),
            validation: Some(validation),
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            formula: None,
            validation: None,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for DiscoveryResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.formula, &self.validation) {
            (Some(formula), Some(validation)) if self.success => {
                writeln!(f, "{formula}")?;
                writeln!(f, "  {}", self.message)?;
                writeln!(
                    f,
                    "  confidence: {:.0}%",
                    validation.confidence_score * 100.0
                )?;
                for warning in &validation.warnings {
                    writeln!(f, "  warning: {warning}")?;
                }
                Ok(())
            }
            _ => writeln!(f, "{}", self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_deserializes_with_defaults() {
        let req: RelationshipRequest =
            serde_json::from_str(r#"{"output":"energy","inputs":["mass"]}"#).unwrap();
        assert_eq!(req.output, "energy");
        assert!(req.constants().is_empty());
        assert!(!req.auto_search);
        assert!(!req.verbose);
    }

    #[test]
    fn request_uses_camel_case() {
        let req: RelationshipRequest = serde_json::from_str(
            r#"{"output":"energy","inputs":["mass"],"constants":null,"autoSearch":true,"verbose":true}"#,
        )
        .unwrap();
        assert!(req.auto_search);
        assert!(req.constants.is_none());
    }

    #[test]
    fn extra_constant_leaves_original_untouched() {
        let req = RelationshipRequest::new("energy", ["mass"]).with_auto_search(true);
        let next = req.with_extra_constant("speed_of_light");
        assert!(req.constants().is_empty());
        assert_eq!(next.constants(), ["speed_of_light".to_string()]);
        assert!(next.auto_search);
    }

    #[test]
    fn failure_omits_success_fields() {
        let json = serde_json::to_value(DiscoveryResponse::failure("nope")).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("formula").is_none());
        assert!(json.get("validation").is_none());
    }
}
