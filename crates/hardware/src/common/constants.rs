//! Engine-wide Model Constants.
//!
//! This module defines the fixed constants shared by the analytical models. It includes:
//! 1. **Reference Workload:** Instruction count, branch density, and memory access density.
//! 2. **Cache Heuristics:** Coefficients and clamps of the hit-rate and hit-time curves.
//! 3. **Memory Heuristics:** Bandwidth knee and latency floor of the effective-latency model.
//! 4. **Core Heuristics:** Register-pressure scale and IPC floor.
//! 5. **Power Model:** Floor power, dynamic scale, die area, and per-input weights.
//!
//! None of these are user-configurable. They form a reference model that can be
//! recalibrated in one place without touching the formulas.

/// Number of instructions in the reference workload.
pub const REFERENCE_INSTRUCTIONS: u64 = 1_000_000;

/// Fraction of instructions in the reference workload that are branches.
pub const BRANCH_DENSITY: f64 = 0.2;

/// Fraction of instructions in the reference workload that access memory.
pub const ACCESS_DENSITY: f64 = 0.3;

/// Bytes per kilobyte.
pub const BYTES_PER_KB: u64 = 1024;

/// Hit rate of a (hypothetical) 1 KB direct-mapped cache before size and way bonuses.
pub const HIT_RATE_BASE: f64 = 0.5;

/// Hit-rate gain per natural-log unit of cache size (KB).
pub const HIT_RATE_SIZE_COEFF: f64 = 0.04;

/// Hit-rate gain per way of associativity, up to [`HIT_RATE_ASSOC_CAP`].
pub const HIT_RATE_ASSOC_COEFF: f64 = 0.02;

/// Associativity beyond which extra ways no longer improve the hit rate.
pub const HIT_RATE_ASSOC_CAP: u32 = 8;

/// Hit-rate loss per natural-log unit of line size relative to 64 B.
pub const HIT_RATE_BLOCK_COEFF: f64 = 0.01;

/// Line size (bytes) that the block-size penalty is measured against.
pub const REFERENCE_BLOCK_BYTES: f64 = 64.0;

/// Lower clamp of the cache hit rate.
pub const HIT_RATE_MIN: f64 = 0.10;

/// Upper clamp of the cache hit rate.
pub const HIT_RATE_MAX: f64 = 0.995;

/// Fixed component of the cache hit time (ns).
pub const HIT_TIME_BASE_NS: f64 = 0.5;

/// Hit-time cost per doubling of cache size (ns).
pub const HIT_TIME_SIZE_NS: f64 = 0.15;

/// Hit-time cost per way of associativity (ns).
pub const HIT_TIME_ASSOC_NS: f64 = 0.05;

/// Bandwidth (GB/s) at which the base memory latency is halved.
pub const BANDWIDTH_KNEE_GBS: f64 = 50.0;

/// Effective memory latency never drops below this fraction of the base latency.
pub const LATENCY_FLOOR_FRACTION: f64 = 0.2;

/// Register count at which the spill factor reaches `1 - 1/e`.
pub const REGISTER_SCALE: f64 = 64.0;

/// Lowest IPC the core model reports before stalls.
pub const IPC_FLOOR: f64 = 0.1;

/// Static floor of the average power consumption (W).
pub const BASE_POWER_W: f64 = 5.0;

/// Dynamic power (W) added at a power index of 1.0.
pub const POWER_SCALE_W: f64 = 95.0;

/// Die area used for power density (cm²).
pub const DIE_AREA_CM2: f64 = 1.5;

/// Hertz per gigahertz.
pub const HZ_PER_GHZ: f64 = 1e9;

/// Normalizer and weight of one input to the power index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerWeight {
    /// Slider maximum the input is divided by.
    pub max: f64,
    /// Share of the power index contributed by this input.
    pub weight: f64,
}

/// Clock frequency term of the power index.
pub const POWER_CLOCK: PowerWeight = PowerWeight { max: 5.0, weight: 0.35 };

/// Bus width term of the power index.
pub const POWER_BUS_WIDTH: PowerWeight = PowerWeight { max: 256.0, weight: 0.15 };

/// ALU width term of the power index.
pub const POWER_ALU_WIDTH: PowerWeight = PowerWeight { max: 128.0, weight: 0.20 };

/// Register width term of the power index.
pub const POWER_REG_WIDTH: PowerWeight = PowerWeight { max: 128.0, weight: 0.10 };

/// Cache size term of the power index.
pub const POWER_CACHE_SIZE: PowerWeight = PowerWeight { max: 1024.0, weight: 0.20 };
