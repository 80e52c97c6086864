//! Error Definitions.
//!
//! This module defines every failure the estimator can report. It provides:
//! 1. **Field Errors:** One offending configuration field and why it was rejected.
//! 2. **Validation Errors:** The batch of field errors found in a single validation pass.
//! 3. **Load Errors:** Failures reading a raw configuration from a file or string.
//! 4. **Store Errors:** Failures reported by a saved-configuration store.
//! 5. **Service Errors:** The union of the above seen by callers of the service layer.
//!
//! Arithmetic never fails: all of these are raised before any model runs.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

/// A single rejected configuration field.
///
/// Serializes as a flat object with `field`, `kind` and `message`, plus the
/// variant's own details (`min`/`max`/`value`, `allowed`, `reason` or `expected`).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    /// The value is numeric but outside the inclusive slider bounds.
    #[error("{field} = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
        /// The rejected value.
        value: f64,
    },

    /// The value is not one of the enumerated variants.
    #[error("{field} must be one of {}", .allowed.join(", "))]
    InvalidEnum {
        /// Name of the offending field.
        field: &'static str,
        /// Accepted spellings.
        allowed: Vec<&'static str>,
    },

    /// The cache geometry cannot be realized.
    #[error("{field}: {reason}")]
    InconsistentGeometry {
        /// Name of the field blamed for the inconsistency.
        field: &'static str,
        /// Human-readable explanation.
        reason: String,
    },

    /// The value has the wrong JSON type, or is not integral where an integer is required.
    #[error("{field} must be {expected}")]
    InvalidType {
        /// Name of the offending field.
        field: &'static str,
        /// Description of the accepted type.
        expected: &'static str,
    },
}

impl FieldError {
    /// Returns the name of the field this error refers to.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::OutOfRange { field, .. }
            | Self::InvalidEnum { field, .. }
            | Self::InconsistentGeometry { field, .. }
            | Self::InvalidType { field, .. } => field,
        }
    }

    /// Returns the snake_case tag of this error.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => "out_of_range",
            Self::InvalidEnum { .. } => "invalid_enum",
            Self::InconsistentGeometry { .. } => "inconsistent_geometry",
            Self::InvalidType { .. } => "invalid_type",
        }
    }
}

impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("field", self.field())?;
        map.serialize_entry("kind", self.kind())?;
        map.serialize_entry("message", &self.to_string())?;
        match self {
            Self::OutOfRange { min, max, value, .. } => {
                map.serialize_entry("min", min)?;
                map.serialize_entry("max", max)?;
                map.serialize_entry("value", value)?;
            }
            Self::InvalidEnum { allowed, .. } => map.serialize_entry("allowed", allowed)?,
            Self::InconsistentGeometry { reason, .. } => map.serialize_entry("reason", reason)?,
            Self::InvalidType { expected, .. } => map.serialize_entry("expected", expected)?,
        }
        map.end()
    }
}

/// Every field error found in one validation pass.
///
/// Never empty when returned from the validator. Serializes as `{"errors": [...]}`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Wraps a batch of field errors.
    pub const fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// Returns the individual field errors in the order fields were checked.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns `true` if some error refers to `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field() == field)
    }

    /// Consumes the batch, returning the field errors.
    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid configuration ({} field(s))", self.errors.len())?;
        for e in &self.errors {
            write!(f, "; {e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Failure reading a raw configuration record.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The input is not valid JSON.
    #[error("malformed configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON document is valid but not a flat object.
    #[error("configuration must be a JSON object, found {0}")]
    NotAnObject(&'static str),
}

/// Failure reported by a saved-configuration store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No configuration with this id exists.
    #[error("configuration {0} not found")]
    NotFound(u64),

    /// The configuration exists but belongs to another user.
    #[error("configuration {id} is not owned by user {user}")]
    Forbidden {
        /// Requested configuration id.
        id: u64,
        /// Caller's user id.
        user: u64,
    },

    /// The store's internal lock was poisoned by a panicking writer.
    #[error("configuration store is unavailable")]
    Poisoned,
}

/// Errors surfaced by [`SimulationService`](crate::sim::service::SimulationService).
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The configuration was rejected by the validator.
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    /// The store could not satisfy the request.
    #[error(transparent)]
    Store(#[from] StoreError),
}
