//! Analytical computer-architecture estimator.
//!
//! This crate turns a declarative description of a CPU, its L1 cache, main memory
//! and bus into derived performance, power and efficiency metrics. It is formula
//! based: no instructions are executed and run time does not depend on input size.
//!
//! 1. **Configuration:** Field specs, defaults, presets and the batch validator.
//! 2. **Models:** Cache, memory, branch, IPC, power and index estimators.
//! 3. **Simulation:** The engine, raw-record loading and the service layer.
//! 4. **Results:** The wire record, its breakdown and text reports.
//! 5. **Storage:** The saved-configuration capability handed to the service.

/// Shared constants and error types.
pub mod common;
/// Configuration (defaults, field specs, validator, presets).
pub mod config;
/// Analytical models.
pub mod models;
/// Engine, loader and service.
pub mod sim;
/// Simulation results and reporting.
pub mod stats;
/// Saved-configuration storage contract.
pub mod store;

/// Validated hardware configuration; build one with `config::validate` or `Configuration::baseline()`.
pub use crate::config::Configuration;
/// The engine; `SimulationEngine::new().run(&config)`.
pub use crate::sim::engine::SimulationEngine;
/// The `/simulate` response record.
pub use crate::stats::SimulationResult;
