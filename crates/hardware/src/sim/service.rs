//! Service layer: the engine plus an injected configuration store.
//!
//! This is the seam a transport (HTTP handler, CLI) talks to. Storage and
//! identity are passed in explicitly; nothing here reaches for global state.

use crate::common::ServiceError;
use crate::config::presets::predefined_configs;
use crate::config::{RawConfig, validate};
use crate::sim::engine::SimulationEngine;
use crate::stats::SimulationResult;
use crate::store::{ConfigStore, Identity, PredefinedConfig, SavedConfig};

/// Simulation requests routed through a [`ConfigStore`].
#[derive(Debug)]
pub struct SimulationService<S> {
    engine: SimulationEngine,
    store: S,
}

impl<S: ConfigStore> SimulationService<S> {
    /// Creates a service over `store`.
    pub const fn new(engine: SimulationEngine, store: S) -> Self {
        Self { engine, store }
    }

    /// Returns the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Validates and runs an ad-hoc configuration (`POST /simulate`).
    ///
    /// # Errors
    ///
    /// [`ServiceError::Invalid`] with every offending field.
    pub fn simulate(&self, raw: &RawConfig) -> Result<SimulationResult, ServiceError> {
        Ok(self.engine.validate_and_run(raw)?)
    }

    /// Returns the preset catalog (`GET /predefined-configs`).
    pub fn predefined(&self) -> Vec<PredefinedConfig> {
        predefined_configs()
    }

    /// Validates `raw` and saves it for `who`.
    ///
    /// # Errors
    ///
    /// [`ServiceError::Invalid`] if the configuration is rejected (nothing is stored),
    /// or [`ServiceError::Store`] if the store fails.
    pub fn save(&self, who: &Identity, name: &str, raw: &RawConfig) -> Result<u64, ServiceError> {
        let config = validate(raw)?;
        Ok(self.store.save(who, name, &config)?)
    }

    /// Lists `who`'s saved configurations.
    ///
    /// # Errors
    ///
    /// [`ServiceError::Store`] if the store fails.
    pub fn saved(&self, who: &Identity) -> Result<Vec<SavedConfig>, ServiceError> {
        Ok(self.store.list(who)?)
    }

    /// Runs one of `who`'s saved configurations.
    ///
    /// # Errors
    ///
    /// [`ServiceError::Store`] if the id is unknown or owned by someone else.
    pub fn simulate_saved(&self, who: &Identity, id: u64) -> Result<SimulationResult, ServiceError> {
        let config = self.store.load(who, id)?;
        Ok(self.engine.run(&config))
    }
}
