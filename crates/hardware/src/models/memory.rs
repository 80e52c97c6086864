//! Main Memory Model.
//!
//! Derives the effective DRAM latency seen on a cache miss and the Average
//! Memory Access Time (AMAT) of the single-level hierarchy.

use super::cache::CacheEstimate;
use crate::common::constants::{BANDWIDTH_KNEE_GBS, LATENCY_FLOOR_FRACTION};
use crate::config::Configuration;

/// Output of the memory model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryEstimate {
    /// Miss service latency after bandwidth relief (ns).
    pub effective_latency_ns: f64,
    /// `hit_time + miss_rate × effective_latency` (ns).
    pub amat_ns: f64,
}

/// Estimates memory timing given the cache estimate for the same configuration.
pub fn estimate(config: &Configuration, cache: &CacheEstimate) -> MemoryEstimate {
    let effective_latency_ns =
        effective_latency_ns(config.mem_latency_ns(), config.mem_bandwidth_gbs());
    MemoryEstimate {
        effective_latency_ns,
        amat_ns: amat_ns(cache.hit_time_ns, cache.miss_rate, effective_latency_ns),
    }
}

/// Base latency divided by `1 + bandwidth/50`, floored at 20% of the base latency.
pub fn effective_latency_ns(latency_ns: f64, bandwidth_gbs: f64) -> f64 {
    let relieved = latency_ns / (1.0 + bandwidth_gbs / BANDWIDTH_KNEE_GBS);
    relieved.max(latency_ns * LATENCY_FLOOR_FRACTION)
}

/// Average memory access time; never below `hit_time_ns` for non-negative inputs.
pub fn amat_ns(hit_time_ns: f64, miss_rate: f64, miss_latency_ns: f64) -> f64 {
    miss_rate.mul_add(miss_latency_ns, hit_time_ns)
}
