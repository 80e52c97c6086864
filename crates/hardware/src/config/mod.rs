//! Hardware configuration for the estimator.
//!
//! This module defines the input side of a simulation request. It provides:
//! 1. **Defaults:** The baseline hardware (the UI's default slider positions).
//! 2. **Field Specs:** Name, kind and inclusive bounds of every numeric field.
//! 3. **Enums:** The closed set of branch predictor strategies.
//! 4. **Configuration:** The immutable, validated value object consumed by the engine.
//!
//! A [`Configuration`] is obtained from a raw field map through [`validate`], or from
//! [`Configuration::baseline`] and the preset catalog. Its fields are read-only.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Built-in catalog of predefined configurations.
pub mod presets;

/// Configuration validator (raw field map → `Configuration`).
pub mod validator;

pub use validator::{RawConfig, validate};

/// Baseline hardware values.
///
/// These are the defaults shown by the UI and the reference point of the
/// performance index.
mod defaults {
    /// L1 cache capacity (KB).
    pub const CACHE_SIZE_KB: u32 = 32;
    /// Cache line size (bytes).
    pub const CACHE_BLOCK_SIZE_B: u32 = 64;
    /// Cache associativity (ways).
    pub const CACHE_ASSOCIATIVITY: u32 = 4;
    /// Main memory capacity (GB).
    pub const MEM_SIZE_GB: f64 = 8.0;
    /// Main memory bandwidth (GB/s).
    pub const MEM_BANDWIDTH_GBS: f64 = 25.0;
    /// Main memory base latency (ns).
    pub const MEM_LATENCY_NS: f64 = 80.0;
    /// Architectural register count.
    pub const REG_COUNT: u32 = 32;
    /// Register width (bits).
    pub const REG_WIDTH_BITS: u32 = 64;
    /// System bus width (bits).
    pub const BUS_WIDTH_BITS: u32 = 64;
    /// System bus frequency (GHz).
    pub const BUS_FREQ_GHZ: f64 = 2.4;
    /// ALU datapath width (bits).
    pub const ALU_WIDTH_BITS: u32 = 64;
    /// Core clock frequency (GHz).
    pub const CLOCK_FREQ_GHZ: f64 = 3.0;
    /// Pipeline depth (stages).
    pub const PIPELINE_DEPTH: u32 = 14;
    /// Superscalar issue width.
    pub const ISSUE_WIDTH: u32 = 4;
}

/// Whether a numeric field accepts fractional values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Positive integer.
    Integer,
    /// Positive real.
    Real,
}

/// Description of one numeric configuration field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Wire name of the field.
    pub name: &'static str,
    /// Integer or real.
    pub kind: FieldKind,
    /// Inclusive lower bound (the slider minimum).
    pub min: f64,
    /// Inclusive upper bound (the slider maximum).
    pub max: f64,
    /// Value used when the field is absent from a request.
    pub default: f64,
}

impl FieldSpec {
    const fn int(name: &'static str, min: u32, max: u32, default: u32) -> Self {
        Self {
            name,
            kind: FieldKind::Integer,
            min: min as f64,
            max: max as f64,
            default: default as f64,
        }
    }

    const fn real(name: &'static str, min: f64, max: f64, default: f64) -> Self {
        Self {
            name,
            kind: FieldKind::Real,
            min,
            max,
            default,
        }
    }

    /// Returns `true` if `value` lies within the inclusive bounds.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Specs of every numeric field, in wire order.
pub mod fields {
    use super::{FieldSpec, defaults};

    /// `cache_size_kb`
    pub const CACHE_SIZE_KB: FieldSpec =
        FieldSpec::int("cache_size_kb", 8, 1024, defaults::CACHE_SIZE_KB);
    /// `cache_block_size_b`
    pub const CACHE_BLOCK_SIZE_B: FieldSpec =
        FieldSpec::int("cache_block_size_b", 16, 1024, defaults::CACHE_BLOCK_SIZE_B);
    /// `cache_associativity`
    pub const CACHE_ASSOCIATIVITY: FieldSpec =
        FieldSpec::int("cache_associativity", 1, 16, defaults::CACHE_ASSOCIATIVITY);
    /// `mem_size_gb`
    pub const MEM_SIZE_GB: FieldSpec =
        FieldSpec::real("mem_size_gb", 1.0, 128.0, defaults::MEM_SIZE_GB);
    /// `mem_bandwidth_gbs`
    pub const MEM_BANDWIDTH_GBS: FieldSpec =
        FieldSpec::real("mem_bandwidth_gbs", 5.0, 200.0, defaults::MEM_BANDWIDTH_GBS);
    /// `mem_latency_ns`
    pub const MEM_LATENCY_NS: FieldSpec =
        FieldSpec::real("mem_latency_ns", 20.0, 200.0, defaults::MEM_LATENCY_NS);
    /// `reg_count`
    pub const REG_COUNT: FieldSpec = FieldSpec::int("reg_count", 8, 256, defaults::REG_COUNT);
    /// `reg_width_bits`
    pub const REG_WIDTH_BITS: FieldSpec =
        FieldSpec::int("reg_width_bits", 16, 128, defaults::REG_WIDTH_BITS);
    /// `bus_width_bits`
    pub const BUS_WIDTH_BITS: FieldSpec =
        FieldSpec::int("bus_width_bits", 16, 256, defaults::BUS_WIDTH_BITS);
    /// `bus_freq_ghz`
    pub const BUS_FREQ_GHZ: FieldSpec =
        FieldSpec::real("bus_freq_ghz", 0.5, 5.0, defaults::BUS_FREQ_GHZ);
    /// `alu_width_bits`
    pub const ALU_WIDTH_BITS: FieldSpec =
        FieldSpec::int("alu_width_bits", 16, 128, defaults::ALU_WIDTH_BITS);
    /// `clock_freq_ghz`
    pub const CLOCK_FREQ_GHZ: FieldSpec =
        FieldSpec::real("clock_freq_ghz", 0.5, 5.0, defaults::CLOCK_FREQ_GHZ);
    /// `pipeline_depth`
    pub const PIPELINE_DEPTH: FieldSpec =
        FieldSpec::int("pipeline_depth", 4, 30, defaults::PIPELINE_DEPTH);
    /// `issue_width`
    pub const ISSUE_WIDTH: FieldSpec =
        FieldSpec::int("issue_width", 1, 8, defaults::ISSUE_WIDTH);

    /// Wire name of the branch predictor field.
    pub const BRANCH_PREDICTOR: &str = "branch_predictor";

    /// All numeric fields.
    pub const NUMERIC: [FieldSpec; 14] = [
        CACHE_SIZE_KB,
        CACHE_BLOCK_SIZE_B,
        CACHE_ASSOCIATIVITY,
        MEM_SIZE_GB,
        MEM_BANDWIDTH_GBS,
        MEM_LATENCY_NS,
        REG_COUNT,
        REG_WIDTH_BITS,
        BUS_WIDTH_BITS,
        BUS_FREQ_GHZ,
        ALU_WIDTH_BITS,
        CLOCK_FREQ_GHZ,
        PIPELINE_DEPTH,
        ISSUE_WIDTH,
    ];
}

/// Branch prediction strategy.
///
/// A closed set: the mispredict rate of each strategy lives in a lookup table in
/// [`crate::models::branch`], so adding a strategy is one variant plus one table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchPredictor {
    /// Fixed direction (e.g. backward-taken/forward-not-taken).
    Static,
    /// Table of 2-bit saturating counters indexed by PC.
    #[default]
    Bimodal,
    /// Chooser between a local and a global predictor.
    Tournament,
}

impl BranchPredictor {
    /// Every strategy, in order of decreasing mispredict rate.
    pub const ALL: [Self; 3] = [Self::Static, Self::Bimodal, Self::Tournament];

    /// Returns the wire spelling of this strategy.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Bimodal => "bimodal",
            Self::Tournament => "tournament",
        }
    }

    /// Returns every accepted wire spelling.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|p| p.as_str()).collect()
    }
}

impl fmt::Display for BranchPredictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known predictor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPredictor;

impl FromStr for BranchPredictor {
    type Err = UnknownPredictor;

    /// Parses a predictor name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or(UnknownPredictor)
    }
}

/// A validated hardware configuration.
///
/// Every numeric field is strictly positive and within its [`FieldSpec`] bounds, and
/// the cache geometry yields at least one set.
///
/// # Examples
///
/// ```
/// use archsim_core::config::{BranchPredictor, Configuration};
///
/// let config = Configuration::baseline();
/// assert_eq!(config.cache_size_kb(), 32);
/// assert_eq!(config.branch_predictor(), BranchPredictor::Bimodal);
/// assert_eq!(config.cache_sets(), 128);
/// ```
///
/// Validating a raw request (absent fields take the baseline value):
///
/// ```
/// use archsim_core::config::{self, BranchPredictor};
///
/// let raw = serde_json::json!({
///     "cache_size_kb": 64,
///     "cache_associativity": 8,
///     "branch_predictor": "tournament"
/// });
/// let config = config::validate(raw.as_object().unwrap()).unwrap();
/// assert_eq!(config.cache_size_kb(), 64);
/// assert_eq!(config.issue_width(), 4);
/// assert_eq!(config.branch_predictor(), BranchPredictor::Tournament);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Configuration {
    cache_size_kb: u32,
    cache_block_size_b: u32,
    cache_associativity: u32,
    mem_size_gb: f64,
    mem_bandwidth_gbs: f64,
    mem_latency_ns: f64,
    reg_count: u32,
    reg_width_bits: u32,
    bus_width_bits: u32,
    bus_freq_ghz: f64,
    alu_width_bits: u32,
    clock_freq_ghz: f64,
    pipeline_depth: u32,
    issue_width: u32,
    branch_predictor: BranchPredictor,
}

impl Configuration {
    /// Returns the baseline configuration (the UI defaults).
    pub const fn baseline() -> Self {
        Self {
            cache_size_kb: defaults::CACHE_SIZE_KB,
            cache_block_size_b: defaults::CACHE_BLOCK_SIZE_B,
            cache_associativity: defaults::CACHE_ASSOCIATIVITY,
            mem_size_gb: defaults::MEM_SIZE_GB,
            mem_bandwidth_gbs: defaults::MEM_BANDWIDTH_GBS,
            mem_latency_ns: defaults::MEM_LATENCY_NS,
            reg_count: defaults::REG_COUNT,
            reg_width_bits: defaults::REG_WIDTH_BITS,
            bus_width_bits: defaults::BUS_WIDTH_BITS,
            bus_freq_ghz: defaults::BUS_FREQ_GHZ,
            alu_width_bits: defaults::ALU_WIDTH_BITS,
            clock_freq_ghz: defaults::CLOCK_FREQ_GHZ,
            pipeline_depth: defaults::PIPELINE_DEPTH,
            issue_width: defaults::ISSUE_WIDTH,
            branch_predictor: BranchPredictor::Bimodal,
        }
    }

    /// Serializes this configuration back into a flat raw field map.
    ///
    /// Feeding the map to [`validate`] yields an identical configuration.
    pub fn to_raw(&self) -> RawConfig {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => RawConfig::new(),
        }
    }

    /// L1 cache capacity (KB).
    pub const fn cache_size_kb(&self) -> u32 {
        self.cache_size_kb
    }

    /// Cache line size (bytes).
    pub const fn cache_block_size_b(&self) -> u32 {
        self.cache_block_size_b
    }

    /// Cache associativity (ways).
    pub const fn cache_associativity(&self) -> u32 {
        self.cache_associativity
    }

    /// Number of cache sets implied by the geometry (always ≥ 1).
    pub const fn cache_sets(&self) -> u64 {
        cache_sets(
            self.cache_size_kb,
            self.cache_block_size_b,
            self.cache_associativity,
        )
    }

    /// Main memory capacity (GB).
    pub const fn mem_size_gb(&self) -> f64 {
        self.mem_size_gb
    }

    /// Main memory bandwidth (GB/s).
    pub const fn mem_bandwidth_gbs(&self) -> f64 {
        self.mem_bandwidth_gbs
    }

    /// Main memory base latency (ns).
    pub const fn mem_latency_ns(&self) -> f64 {
        self.mem_latency_ns
    }

    /// Architectural register count.
    pub const fn reg_count(&self) -> u32 {
        self.reg_count
    }

    /// Register width (bits).
    pub const fn reg_width_bits(&self) -> u32 {
        self.reg_width_bits
    }

    /// System bus width (bits).
    pub const fn bus_width_bits(&self) -> u32 {
        self.bus_width_bits
    }

    /// System bus frequency (GHz).
    pub const fn bus_freq_ghz(&self) -> f64 {
        self.bus_freq_ghz
    }

    /// ALU datapath width (bits).
    pub const fn alu_width_bits(&self) -> u32 {
        self.alu_width_bits
    }

    /// Core clock frequency (GHz).
    pub const fn clock_freq_ghz(&self) -> f64 {
        self.clock_freq_ghz
    }

    /// Pipeline depth (stages).
    pub const fn pipeline_depth(&self) -> u32 {
        self.pipeline_depth
    }

    /// Superscalar issue width.
    pub const fn issue_width(&self) -> u32 {
        self.issue_width
    }

    /// Branch prediction strategy.
    pub const fn branch_predictor(&self) -> BranchPredictor {
        self.branch_predictor
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::baseline()
    }
}

/// Number of sets of a cache with the given geometry, rounded down.
///
/// Returns 0 when a single set does not fit (or when a divisor is zero).
pub const fn cache_sets(size_kb: u32, block_b: u32, ways: u32) -> u64 {
    let bytes = size_kb as u64 * crate::common::constants::BYTES_PER_KB;
    let set_bytes = block_b as u64 * ways as u64;
    if set_bytes == 0 {
        return 0;
    }
    bytes / set_bytes
}
