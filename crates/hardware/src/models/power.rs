//! Power and Energy Model.
//!
//! The power index is a weighted sum of five structural/electrical inputs, each
//! normalized by its slider maximum:
//!
//! | Input            | Max  | Weight |
//! |------------------|------|--------|
//! | `clock_freq_ghz` | 5.0  | 0.35   |
//! | `bus_width_bits` | 256  | 0.15   |
//! | `alu_width_bits` | 128  | 0.20   |
//! | `reg_width_bits` | 128  | 0.10   |
//! | `cache_size_kb`  | 1024 | 0.20   |
//!
//! Average power is a fixed floor plus a dynamic share proportional to the
//! index; energy is that power integrated over the reference workload's run time.

use super::ipc::IpcEstimate;
use crate::common::constants::{
    ACCESS_DENSITY, BASE_POWER_W, DIE_AREA_CM2, HZ_PER_GHZ, POWER_ALU_WIDTH, POWER_BUS_WIDTH,
    POWER_CACHE_SIZE, POWER_CLOCK, POWER_REG_WIDTH, POWER_SCALE_W, PowerWeight,
    REFERENCE_INSTRUCTIONS,
};
use crate::config::Configuration;

/// Output of the power model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerEstimate {
    /// Normalized weighted power score in `(0, 1]`.
    pub power_index: f64,
    /// Average power draw (W).
    pub average_power_w: f64,
    /// Run time of the reference workload (s).
    pub execution_time_s: f64,
    /// Energy spent on the reference workload (J).
    pub total_energy_j: f64,
    /// Memory accesses in the reference workload.
    pub total_memory_accesses: f64,
    /// Energy per memory access (J).
    pub energy_per_access_j: f64,
    /// Power per unit die area (W/cm²).
    pub power_density: f64,
}

/// Estimates power and energy given the IPC estimate for the same configuration.
pub fn estimate(config: &Configuration, ipc: &IpcEstimate) -> PowerEstimate {
    let power_index = power_index(config);
    let average_power_w = POWER_SCALE_W.mul_add(power_index, BASE_POWER_W);
    let execution_time_s = execution_time_s(ipc.ipc_after, config.clock_freq_ghz());
    let total_energy_j = average_power_w * execution_time_s;
    let total_memory_accesses = REFERENCE_INSTRUCTIONS as f64 * ACCESS_DENSITY;

    PowerEstimate {
        power_index,
        average_power_w,
        execution_time_s,
        total_energy_j,
        total_memory_accesses,
        energy_per_access_j: total_energy_j / total_memory_accesses,
        power_density: average_power_w / DIE_AREA_CM2,
    }
}

/// Weighted, normalized power score of a configuration.
pub fn power_index(config: &Configuration) -> f64 {
    let term = |w: PowerWeight, value: f64| w.weight * value / w.max;
    term(POWER_CLOCK, config.clock_freq_ghz())
        + term(POWER_BUS_WIDTH, f64::from(config.bus_width_bits()))
        + term(POWER_ALU_WIDTH, f64::from(config.alu_width_bits()))
        + term(POWER_REG_WIDTH, f64::from(config.reg_width_bits()))
        + term(POWER_CACHE_SIZE, f64::from(config.cache_size_kb()))
}

/// Seconds to retire the reference workload at `ipc` and `clock_ghz`.
pub fn execution_time_s(ipc: f64, clock_ghz: f64) -> f64 {
    REFERENCE_INSTRUCTIONS as f64 / (ipc * clock_ghz * HZ_PER_GHZ)
}
