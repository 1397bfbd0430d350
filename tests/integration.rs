//! End-to-end integration tests for the dimlaw engine.
//!
//! These tests drive the public `Engine` API the way a host does: initialize
//! once, submit requests, and inspect both the typed outcome and the JSON
//! response shape.

use dimlaw::config::EngineConfig;
use dimlaw::dimension::{Dimension, Exponent};
use dimlaw::engine::Engine;
use dimlaw::error::DiscoveryError;
use dimlaw::request::{DiscoveryResponse, RelationshipRequest};

fn test_engine() -> Engine {
    let mut engine = Engine::new(EngineConfig::default()).unwrap();
    engine.initialize();
    engine
}

#[test]
fn force_from_mass_and_acceleration() {
    let engine = test_engine();
    let found = engine
        .try_discover(&RelationshipRequest::new("force", ["mass", "acceleration"]))
        .unwrap();

    assert_eq!(found.formula, "F = Π × m×a");
    assert_eq!(found.exponent_of("mass"), Some(Exponent::from_integer(1)));
    assert_eq!(found.exponent_of("acceleration"), Some(Exponent::from_integer(1)));
    assert_eq!(found.message, "Unique dimensionless relationship found.");
    assert!(found.validation.warnings.is_empty());
}

#[test]
fn energy_from_mass_alone_is_missing_length_and_time() {
    let engine = test_engine();
    let failure = engine
        .try_discover(&RelationshipRequest::new("energy", ["mass"]))
        .unwrap_err();

    let DiscoveryError::InconsistentDimensions {
        culprit,
        missing: Some(missing),
        suggestions,
    } = &failure.error
    else {
        panic!("expected structural inconsistency, got {:?}", failure.error);
    };
    assert_eq!(
        missing.dimensions().collect::<Vec<_>>(),
        vec![Dimension::Length, Dimension::Time]
    );
    assert_eq!(culprit, "L², T⁻²");
    assert!(suggestions.iter().any(|s| s == "speed_of_light"));
    assert!(suggestions.iter().any(|s| s == "velocity"));

    let report = failure.report();
    assert!(report.starts_with("Hypothesis is impossible."));
    assert!(report.contains("Output requires 'L², T⁻²'"));
}

#[test]
fn kinetic_energy_shape() {
    let engine = test_engine();
    let found = engine
        .try_discover(&RelationshipRequest::new("energy", ["mass", "velocity"]))
        .unwrap();

    assert_eq!(found.formula, "E = Π × m×v^2");
    assert_eq!(found.exponent_of("mass"), Some(Exponent::from_integer(1)));
    assert_eq!(found.exponent_of("velocity"), Some(Exponent::from_integer(2)));
}

#[test]
fn redundant_inputs_are_underdetermined() {
    let engine = test_engine();
    let failure = engine
        .try_discover(&RelationshipRequest::new(
            "energy",
            ["mass", "velocity", "momentum"],
        ))
        .unwrap_err();

    assert!(matches!(
        failure.error,
        DiscoveryError::UnderdeterminedSystem {
            free_parameters: 2,
            ..
        }
    ));
    assert!(failure.error.is_recoverable());
    assert!(failure.report().contains("Infinite solutions exist"));
}

#[test]
fn auto_search_names_the_resolving_candidate() {
    let engine = test_engine();
    let request = RelationshipRequest::new("energy", ["mass"]).with_auto_search(true);
    let response = engine.discover(&request);

    assert!(response.success, "{}", response.message);
    assert_eq!(response.formula.as_deref(), Some("E = Π × m×c^2"));
    assert_eq!(
        response.message,
        "Auto-search found a solution by adding 'speed_of_light'."
    );
}

#[test]
fn explicit_constants_join_the_hypothesis() {
    let engine = test_engine();
    let request = RelationshipRequest::new("energy", ["mass"]).with_constants(["speed_of_light"]);
    let found = engine.try_discover(&request).unwrap();
    assert_eq!(found.formula, "E = Π × m×c^2");
    assert!(found.resolved_by.is_none());
}

#[test]
fn pendulum_period() {
    let engine = test_engine();
    let found = engine
        .try_discover(&RelationshipRequest::new("time", ["length", "acceleration"]))
        .unwrap();
    assert_eq!(found.exponent_of("length"), Some(Exponent::new(1, 2)));
    assert_eq!(found.exponent_of("acceleration"), Some(Exponent::new(-1, 2)));
}

#[test]
fn initialize_twice_is_harmless() {
    let mut engine = test_engine();
    let before = engine.discover(&RelationshipRequest::new("force", ["mass", "acceleration"]));
    engine.initialize();
    let after = engine.discover(&RelationshipRequest::new("force", ["mass", "acceleration"]));
    assert_eq!(before, after);
}

#[test]
fn uninitialized_engine_reports_fatal_error() {
    let engine = Engine::new(EngineConfig::default()).unwrap();
    let response = engine.discover(&RelationshipRequest::new("force", ["mass", "acceleration"]));
    assert!(!response.success);
    assert!(response.message.starts_with("FATAL ERROR: Engine not initialized."));
}

#[test]
fn json_request_and_response_shape() {
    let engine = test_engine();
    let request: RelationshipRequest = serde_json::from_str(
        r#"{"output": "energy", "inputs": ["mass"], "autoSearch": true}"#,
    )
    .unwrap();
    assert!(request.auto_search);
    assert!(request.constants.is_none());

    let value = serde_json::to_value(engine.discover(&request)).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["formula"], "E = Π × m×c^2");
    assert_eq!(value["validation"]["dimensionallyCorrect"], true);
    assert_eq!(value["validation"]["physicallyReasonable"], true);
    assert_eq!(value["validation"]["confidenceScore"], 1.0);

    let failure = engine.discover(&RelationshipRequest::new("energy", ["mass"]));
    let value = serde_json::to_value(&failure).unwrap();
    assert_eq!(value["success"], false);
    assert!(value.get("formula").is_none());
    assert!(value.get("validation").is_none());

    let back: DiscoveryResponse = serde_json::from_value(value).unwrap();
    assert_eq!(back, failure);
}

#[test]
fn config_file_drives_engine() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("dimlaw.toml");
    std::fs::write(&path, "max_suggestions = 1\nmax_search_depth = 0\n").unwrap();

    let mut engine = Engine::new(EngineConfig::load(&path).unwrap()).unwrap();
    engine.initialize();

    let failure = engine
        .try_discover(&RelationshipRequest::new("energy", ["mass"]).with_auto_search(true))
        .unwrap_err();
    assert_eq!(failure.error.suggestions(), ["speed_of_light".to_string()]);
    assert!(failure.attempts.is_none());
}
