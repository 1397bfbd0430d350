//! Engine facade: top-level API for dimlaw.
//!
//! The `Engine` owns the quantity catalog and configuration and exposes the
//! two-step lifecycle hosts rely on: `initialize()` once, then any number of
//! `discover()` calls.

use std::sync::Arc;

use crate::catalog::QuantityCatalog;
use crate::config::EngineConfig;
use crate::dimension::Dimension;
use crate::error::{DimlawResult, DiscoveryError};
use crate::request::{DiscoveryResponse, RelationshipRequest};
use crate::search::{AutoSearch, Discovery, DiscoveryFailure};

/// The dimensional-analysis discovery engine.
///
/// Discovery takes `&self`; once initialized the engine can be shared across
/// threads and queried concurrently.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    catalog: Option<Arc<QuantityCatalog>>,
}

impl Engine {
    /// Create an uninitialized engine with the given configuration.
    pub fn new(config: EngineConfig) -> DimlawResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            catalog: None,
        })
    }

    /// Create an engine that is already initialized with `catalog`.
    pub fn with_catalog(config: EngineConfig, catalog: Arc<QuantityCatalog>) -> DimlawResult<Self> {
        let mut engine = Self::new(config)?;
        engine.catalog = Some(catalog);
        Ok(engine)
    }

    /// Load the built-in catalog. A second call is a no-op.
    pub fn initialize(&mut self) {
        if self.catalog.is_some() {
            return;
        }
        let catalog = QuantityCatalog::builtin();
        tracing::info!(quantities = catalog.len(), "dimlaw engine initialized");
        self.catalog = Some(catalog);
    }

    pub fn is_initialized(&self) -> bool {
        self.catalog.is_some()
    }

    /// The catalog, once initialized.
    pub fn catalog(&self) -> Option<&QuantityCatalog> {
        self.catalog.as_deref()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Discover a relationship, returning the typed outcome.
    pub fn try_discover(&self, request: &RelationshipRequest) -> Result<Discovery, DiscoveryFailure> {
        let catalog = self
            .catalog
            .as_deref()
            .ok_or(DiscoveryError::EngineNotInitialized)?;
        tracing::debug!(
            output = %request.output,
            inputs = request.inputs.len(),
            constants = request.constants().len(),
            auto_search = request.auto_search,
            "discovering relationship"
        );
        AutoSearch::new(catalog, &self.config).run(request)
    }

    /// Discover a relationship, folding every failure into the response.
    pub fn discover(&self, request: &RelationshipRequest) -> DiscoveryResponse {
        match self.try_discover(request) {
            Ok(found) => DiscoveryResponse::success(found.formula, found.validation, found.message),
            Err(failure) => DiscoveryResponse::failure(failure.report()),
        }
    }

    /// Summary information about the engine state.
    pub fn info(&self) -> EngineInfo {
        EngineInfo {
            initialized: self.is_initialized(),
            quantity_count: self.catalog.as_ref().map_or(0, |c| c.len()),
            max_suggestions: self.config.max_suggestions,
            max_search_depth: self.config.max_search_depth,
        }
    }
}

/// Summary information about the engine state.
#[derive(Debug, Clone)]
pub struct EngineInfo {
    pub initialized: bool,
    pub quantity_count: usize,
    pub max_suggestions: usize,
    pub max_search_depth: Option<usize>,
}

impl std::fmt::Display for EngineInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "dimlaw engine info")?;
        writeln!(f, "  initialized:     {}", self.initialized)?;
        writeln!(f, "  quantities:      {}", self.quantity_count)?;
        writeln!(
            f,
            "  dimensions:      {}",
            Dimension::ALL.map(Dimension::symbol).join(" ")
        )?;
        writeln!(f, "  max suggestions: {}", self.max_suggestions)?;
        match self.max_search_depth {
            Some(depth) => writeln!(f, "  search depth:    {depth}")?,
            None => writeln!(f, "  search depth:    unbounded")?,
        }
        Ok(())
    }
}
