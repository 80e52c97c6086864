//! Simulation layer tests.

/// Engine end-to-end behavior.
pub mod engine;


/// Service layer over a configuration store.
pub mod service;
