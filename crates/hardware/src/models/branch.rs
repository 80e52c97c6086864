//! Branch Predictor Model.
//!
//! Maps each predictor strategy to a base mispredict rate and turns it into
//! branch, mispredict and stall counts over the reference workload. Deeper
//! pipelines flush more work per mispredict, so the per-mispredict penalty is
//! half the pipeline depth.

use crate::common::constants::{BRANCH_DENSITY, REFERENCE_INSTRUCTIONS};
use crate::config::{BranchPredictor, Configuration};

/// Base mispredict rate of each strategy.
///
/// The match is exhaustive, so a new [`BranchPredictor`] variant cannot compile
/// without its row here.
pub const fn mispredict_rate(predictor: BranchPredictor) -> f64 {
    match predictor {
        BranchPredictor::Static => 0.35,
        BranchPredictor::Bimodal => 0.12,
        BranchPredictor::Tournament => 0.06,
    }
}

/// Output of the branch model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchEstimate {
    /// Fraction of branches mispredicted.
    pub mispredict_rate: f64,
    /// Branches in the reference workload.
    pub total_branches: u64,
    /// Mispredicted branches in the reference workload.
    pub mispredict_count: u64,
    /// Cycles lost per mispredict (half the pipeline depth).
    pub penalty_cycles: f64,
    /// Total cycles lost to mispredicts.
    pub stall_cycles: f64,
    /// `1 - mispredict_rate`.
    pub predictor_efficiency: f64,
}

/// Estimates branch behavior over the reference workload.
pub fn estimate(config: &Configuration) -> BranchEstimate {
    let rate = mispredict_rate(config.branch_predictor());
    let total_branches = total_branches();
    let mispredict_count = (total_branches as f64 * rate).round() as u64;
    let penalty_cycles = f64::from(config.pipeline_depth()) / 2.0;

    BranchEstimate {
        mispredict_rate: rate,
        total_branches,
        mispredict_count,
        penalty_cycles,
        stall_cycles: mispredict_count as f64 * penalty_cycles,
        predictor_efficiency: 1.0 - rate,
    }
}

/// Branches in the reference workload: `round(N × d)`.
pub fn total_branches() -> u64 {
    (REFERENCE_INSTRUCTIONS as f64 * BRANCH_DENSITY).round() as u64
}
