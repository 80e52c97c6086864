//! Core IPC Model.
//!
//! Derives instructions-per-cycle before and after branch stalls. Register
//! pressure sets how much of the issue width is usable:
//! `reg_factor = 1 − e^(−regs/64)` approaches 1 as spills disappear.

use super::branch::BranchEstimate;
use crate::common::constants::{IPC_FLOOR, REFERENCE_INSTRUCTIONS, REGISTER_SCALE};
use crate::config::Configuration;

/// Output of the core model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IpcEstimate {
    /// Usable fraction of the issue width given register pressure.
    pub reg_factor: f64,
    /// IPC with a perfect predictor.
    pub ipc_before: f64,
    /// IPC after charging branch stall cycles.
    pub ipc_after: f64,
    /// Relative IPC loss to branch stalls (%).
    pub ipc_loss_percent: f64,
    /// Cycles for the reference workload at `ipc_before`.
    pub ideal_cycles: f64,
    /// Cycles for the reference workload at `ipc_after`.
    pub actual_cycles: f64,
}

impl IpcEstimate {
    /// Cycles lost to stalls over the reference workload.
    pub fn stall_cycles(&self) -> f64 {
        (self.actual_cycles - self.ideal_cycles).max(0.0)
    }
}

/// Estimates IPC given the branch estimate for the same configuration.
pub fn estimate(config: &Configuration, branch: &BranchEstimate) -> IpcEstimate {
    let reg_factor = reg_factor(config.reg_count());
    let ipc_before = ipc_before(config.issue_width(), reg_factor);
    let ipc_after = ipc_before / (1.0 + branch.stall_cycles / REFERENCE_INSTRUCTIONS as f64);
    let n = REFERENCE_INSTRUCTIONS as f64;

    IpcEstimate {
        reg_factor,
        ipc_before,
        ipc_after,
        ipc_loss_percent: (ipc_before - ipc_after) / ipc_before * 100.0,
        ideal_cycles: n / ipc_before,
        actual_cycles: n / ipc_after,
    }
}

/// `1 − e^(−reg_count/64)`: strictly increasing, asymptotic to 1.
pub fn reg_factor(reg_count: u32) -> f64 {
    1.0 - (-f64::from(reg_count) / REGISTER_SCALE).exp()
}

/// Issue width scaled by the register factor, clamped to `[0.1, issue_width]`.
pub fn ipc_before(issue_width: u32, reg_factor: f64) -> f64 {
    let width = f64::from(issue_width);
    (width * reg_factor).max(IPC_FLOOR).min(width)
}
