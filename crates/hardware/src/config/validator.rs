//! Configuration Validator.
//!
//! Turns a raw, flat field map (as received from a form or a JSON file) into a
//! [`Configuration`]. Validation is batched: every numeric field, the predictor
//! name, and the cache geometry are checked in one pass, and all offending fields
//! are reported together. Nothing is ever clamped or auto-corrected.

use serde_json::{Map, Value};
use tracing::{debug, trace};

use super::{BranchPredictor, Configuration, FieldKind, FieldSpec, cache_sets, fields};
use crate::common::{FieldError, ValidationErrors};

/// A raw configuration record: field name → JSON value.
pub type RawConfig = Map<String, Value>;

/// Validates a raw field map.
///
/// Absent fields take their baseline default and unknown keys are ignored. Numbers
/// may be JSON numbers or numeric strings; integer fields reject fractional values.
///
/// # Errors
///
/// Returns every [`FieldError`] found when any field is invalid. No configuration is
/// produced in that case.
pub fn validate(raw: &RawConfig) -> Result<Configuration, ValidationErrors> {
    let mut v = Validator::new(raw);

    let cache_size_kb = v.int(&fields::CACHE_SIZE_KB);
    let cache_block_size_b = v.int(&fields::CACHE_BLOCK_SIZE_B);
    let cache_associativity = v.int(&fields::CACHE_ASSOCIATIVITY);
    let mem_size_gb = v.real(&fields::MEM_SIZE_GB);
    let mem_bandwidth_gbs = v.real(&fields::MEM_BANDWIDTH_GBS);
    let mem_latency_ns = v.real(&fields::MEM_LATENCY_NS);
    let reg_count = v.int(&fields::REG_COUNT);
    let reg_width_bits = v.int(&fields::REG_WIDTH_BITS);
    let bus_width_bits = v.int(&fields::BUS_WIDTH_BITS);
    let bus_freq_ghz = v.real(&fields::BUS_FREQ_GHZ);
    let alu_width_bits = v.int(&fields::ALU_WIDTH_BITS);
    let clock_freq_ghz = v.real(&fields::CLOCK_FREQ_GHZ);
    let pipeline_depth = v.int(&fields::PIPELINE_DEPTH);
    let issue_width = v.int(&fields::ISSUE_WIDTH);
    let branch_predictor = v.predictor();

    // Geometry is only meaningful once each of its inputs is individually valid.
    let cache_fields = [
        fields::CACHE_SIZE_KB.name,
        fields::CACHE_BLOCK_SIZE_B.name,
        fields::CACHE_ASSOCIATIVITY.name,
    ];
    if !cache_fields.iter().any(|f| v.has_error(f)) {
        v.geometry(cache_size_kb, cache_block_size_b, cache_associativity);
    }

    if !v.errors.is_empty() {
        debug!(errors = v.errors.len(), "configuration rejected");
        return Err(ValidationErrors::new(v.errors));
    }

    Ok(Configuration {
        cache_size_kb,
        cache_block_size_b,
        cache_associativity,
        mem_size_gb,
        mem_bandwidth_gbs,
        mem_latency_ns,
        reg_count,
        reg_width_bits,
        bus_width_bits,
        bus_freq_ghz,
        alu_width_bits,
        clock_freq_ghz,
        pipeline_depth,
        issue_width,
        branch_predictor,
    })
}

/// Single-pass accumulator of field errors.
///
/// Each accessor returns the parsed value, or the field default after recording an
/// error; defaults are never observed because a non-empty error list aborts the build.
struct Validator<'a> {
    raw: &'a RawConfig,
    errors: Vec<FieldError>,
}

impl<'a> Validator<'a> {
    const fn new(raw: &'a RawConfig) -> Self {
        Self {
            raw,
            errors: Vec::new(),
        }
    }

    fn has_error(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field() == field)
    }

    /// Reads a field as a finite number, accepting numeric strings.
    fn number(&mut self, spec: &FieldSpec) -> Option<f64> {
        let Some(value) = self.raw.get(spec.name) else {
            trace!(field = spec.name, "absent, using default");
            return Some(spec.default);
        };

        let expected = match spec.kind {
            FieldKind::Integer => "a positive integer",
            FieldKind::Real => "a positive number",
        };
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        match parsed {
            Some(x) if x.is_finite() => Some(x),
            _ => {
                self.errors.push(FieldError::InvalidType {
                    field: spec.name,
                    expected,
                });
                None
            }
        }
    }

    fn check_range(&mut self, spec: &FieldSpec, value: f64) -> bool {
        if spec.contains(value) {
            return true;
        }
        self.errors.push(FieldError::OutOfRange {
            field: spec.name,
            min: spec.min,
            max: spec.max,
            value,
        });
        false
    }

    fn int(&mut self, spec: &FieldSpec) -> u32 {
        let fallback = spec.default as u32;
        let Some(x) = self.number(spec) else {
            return fallback;
        };
        if x.fract() != 0.0 {
            self.errors.push(FieldError::InvalidType {
                field: spec.name,
                expected: "a positive integer",
            });
            return fallback;
        }
        if self.check_range(spec, x) {
            x as u32
        } else {
            fallback
        }
    }

    fn real(&mut self, spec: &FieldSpec) -> f64 {
        match self.number(spec) {
            Some(x) if self.check_range(spec, x) => x,
            _ => spec.default,
        }
    }

    fn predictor(&mut self) -> BranchPredictor {
        let Some(value) = self.raw.get(fields::BRANCH_PREDICTOR) else {
            return BranchPredictor::default();
        };
        let parsed = value.as_str().and_then(|s| s.parse::<BranchPredictor>().ok());
        parsed.unwrap_or_else(|| {
            self.errors.push(FieldError::InvalidEnum {
                field: fields::BRANCH_PREDICTOR,
                allowed: BranchPredictor::names(),
            });
            BranchPredictor::default()
        })
    }

    fn geometry(&mut self, size_kb: u32, block_b: u32, ways: u32) {
        if cache_sets(size_kb, block_b, ways) >= 1 {
            return;
        }
        self.errors.push(FieldError::InconsistentGeometry {
            field: fields::CACHE_ASSOCIATIVITY.name,
            reason: format!(
                "{size_kb} KB cannot hold one set of {ways} x {block_b} B lines"
            ),
        });
    }
}
