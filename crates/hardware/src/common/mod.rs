//! Common types and constants shared by every part of the estimator.
//!
//! This module provides:
//! 1. **Constants:** The fixed reference workload and heuristic coefficients.
//! 2. **Error Handling:** Field, validation, load, store and service errors.

/// Engine-wide model constants.
pub mod constants;

/// Error types.
pub mod error;

pub use constants::REFERENCE_INSTRUCTIONS;
pub use error::{FieldError, LoadError, ServiceError, StoreError, ValidationErrors};
