//! Predefined configurations.
//!
//! The built-in catalog behind `GET /predefined-configs`: a small in-order core,
//! the balanced baseline, and a wide out-of-order core.

use super::{BranchPredictor, Configuration};
use crate::store::PredefinedConfig;

/// A slow, narrow core with a small L1 and a static predictor.
pub const SMALL_L1: Configuration = Configuration {
    cache_size_kb: 16,
    cache_block_size_b: 32,
    cache_associativity: 2,
    mem_size_gb: 4.0,
    mem_bandwidth_gbs: 15.0,
    mem_latency_ns: 100.0,
    reg_count: 16,
    reg_width_bits: 64,
    bus_width_bits: 32,
    bus_freq_ghz: 1.8,
    alu_width_bits: 32,
    clock_freq_ghz: 2.0,
    pipeline_depth: 10,
    issue_width: 2,
    branch_predictor: BranchPredictor::Static,
};

/// The baseline desktop core.
pub const BALANCED: Configuration = Configuration::baseline();

/// A wide, deep, fast core with a tournament predictor.
pub const HIGH_PERF: Configuration = Configuration {
    cache_size_kb: 64,
    cache_block_size_b: 64,
    cache_associativity: 8,
    mem_size_gb: 16.0,
    mem_bandwidth_gbs: 50.0,
    mem_latency_ns: 60.0,
    reg_count: 128,
    reg_width_bits: 64,
    bus_width_bits: 128,
    bus_freq_ghz: 3.6,
    alu_width_bits: 128,
    clock_freq_ghz: 4.0,
    pipeline_depth: 20,
    issue_width: 6,
    branch_predictor: BranchPredictor::Tournament,
};

/// Returns the catalog in display order.
pub fn predefined_configs() -> Vec<PredefinedConfig> {
    [
        ("small-l1", "Small L1, Simple Core", SMALL_L1),
        ("balanced", "Balanced Desktop Core", BALANCED),
        ("high-perf", "High-Performance OoO Core", HIGH_PERF),
    ]
    .into_iter()
    .map(|(id, name, config)| PredefinedConfig {
        id: id.to_string(),
        name: name.to_string(),
        config,
    })
    .collect()
}

/// Looks up a preset by id.
pub fn find(id: &str) -> Option<PredefinedConfig> {
    predefined_configs().into_iter().find(|p| p.id == id)
}
