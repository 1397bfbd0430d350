// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # dimlaw
//!
//! Infers candidate physical-law formulas by dimensional analysis. Given a
//! target quantity and candidate inputs, dimlaw decides whether a unique,
//! dimensionally consistent power law exists; if not, it explains why and
//! suggests what to add.
//!
//! ## Architecture
//!
//! - **Catalog** (`catalog`): immutable table of named quantities and their dimensions
//! - **Matrix** (`matrix`): quantity sets and the dimensional matrix over them
//! - **Solver** (`solver`): exact rational Gauss-Jordan classification
//! - **Suggestions** (`suggest`): scores catalog entries against missing dimensions
//! - **Auto-search** (`search`): recursive retry with suggested constants
//! - **Formatting** (`format`) and **validation** (`validate`) of solved laws
//!
//! ## Library usage
//!
//! ```
//! use dimlaw::engine::Engine;
//! use dimlaw::config::EngineConfig;
//! use dimlaw::request::RelationshipRequest;
//!
//! let mut engine = Engine::new(EngineConfig::default()).unwrap();
//! engine.initialize();
//! let response = engine.discover(&RelationshipRequest::new("energy", ["mass", "velocity"]));
//! assert_eq!(response.formula.as_deref(), Some("E = Π × m×v^2"));
//! ```

pub mod catalog;
pub mod config;
pub mod dimension;
pub mod engine;
pub mod error;
pub mod format;
pub mod matrix;
pub mod quantity;
pub mod request;
pub mod search;
pub mod solver;
pub mod suggest;
pub mod validate;
