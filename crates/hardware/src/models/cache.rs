//! Analytical Cache Model.
//!
//! Derives the L1 hit rate, miss rate and hit time from cache geometry. The
//! hit-rate curve is a log-linear heuristic:
//!
//! ```text
//! hit = clamp(0.5 + 0.04·ln(size_kb) + 0.02·min(ways, 8) − 0.01·ln(block_b/64 + 1), 0.10, 0.995)
//! ```
//!
//! Capacity helps with diminishing returns, associativity helps up to eight ways,
//! and long lines cost a little effective capacity per set. Hit time grows with
//! both capacity (one step per doubling) and associativity (wider tag compare).

use crate::common::constants::{
    HIT_RATE_ASSOC_CAP, HIT_RATE_ASSOC_COEFF, HIT_RATE_BASE, HIT_RATE_BLOCK_COEFF,
    HIT_RATE_MAX, HIT_RATE_MIN, HIT_RATE_SIZE_COEFF, HIT_TIME_ASSOC_NS, HIT_TIME_BASE_NS,
    HIT_TIME_SIZE_NS, REFERENCE_BLOCK_BYTES,
};
use crate::config::Configuration;

/// Output of the cache model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheEstimate {
    /// Number of sets implied by the geometry.
    pub sets: u64,
    /// Fraction of accesses that hit in the cache.
    pub hit_rate: f64,
    /// `1 - hit_rate`.
    pub miss_rate: f64,
    /// Access time of a hit (ns).
    pub hit_time_ns: f64,
}

/// Estimates cache behavior for a validated configuration.
pub fn estimate(config: &Configuration) -> CacheEstimate {
    let hit_rate = hit_rate(
        config.cache_size_kb(),
        config.cache_associativity(),
        config.cache_block_size_b(),
    );
    CacheEstimate {
        sets: config.cache_sets(),
        hit_rate,
        miss_rate: 1.0 - hit_rate,
        hit_time_ns: hit_time_ns(config.cache_size_kb(), config.cache_associativity()),
    }
}

/// Hit rate of a cache with the given capacity (KB), ways and line size (bytes).
pub fn hit_rate(size_kb: u32, ways: u32, block_b: u32) -> f64 {
    let size_term = HIT_RATE_SIZE_COEFF * f64::from(size_kb).ln();
    let assoc_term = HIT_RATE_ASSOC_COEFF * f64::from(ways.min(HIT_RATE_ASSOC_CAP));
    let block_term = HIT_RATE_BLOCK_COEFF * (f64::from(block_b) / REFERENCE_BLOCK_BYTES + 1.0).ln();
    (HIT_RATE_BASE + size_term + assoc_term - block_term).clamp(HIT_RATE_MIN, HIT_RATE_MAX)
}

/// Hit time (ns) of a cache with the given capacity (KB) and ways.
pub fn hit_time_ns(size_kb: u32, ways: u32) -> f64 {
    HIT_TIME_SIZE_NS.mul_add(
        f64::from(size_kb).log2(),
        HIT_TIME_ASSOC_NS.mul_add(f64::from(ways), HIT_TIME_BASE_NS),
    )
}
