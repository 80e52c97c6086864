//! Simulation entry points.
//!
//! Provides the engine that runs the models, loading of raw configuration
//! records, and the service layer that combines the engine with a store.

pub mod engine;
pub mod loader;
pub mod service;
