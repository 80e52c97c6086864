//! Simulation engine: runs the models in dependency order.
//!
//! The engine owns no mutable state. The only shared value is the baseline
//! throughput, computed once on first use and immutable afterwards, so a single
//! engine (or many copies of it) can serve any number of threads without locks.

use std::sync::LazyLock;

use tracing::{debug, trace};

use crate::common::ValidationErrors;
use crate::config::{Configuration, RawConfig, validate};
use crate::models::{Baseline, BranchEstimate, CacheEstimate, IpcEstimate, MemoryEstimate};
use crate::models::{branch, cache, index, ipc, memory, power};
use crate::stats::{Breakdown, Report, SimulationResult};

/// Baseline throughput, evaluated from [`Configuration::baseline`] on first use.
static BASELINE: LazyLock<Baseline> = LazyLock::new(|| {
    let config = Configuration::baseline();
    let core = CoreEstimates::evaluate(&config);
    let baseline = Baseline {
        ipc_after: core.ipc.ipc_after,
        clock_freq_ghz: config.clock_freq_ghz(),
    };
    debug!(
        ipc_after = baseline.ipc_after,
        clock_ghz = baseline.clock_freq_ghz,
        "baseline evaluated"
    );
    baseline
});

/// Estimates that do not depend on the baseline.
struct CoreEstimates {
    cache: CacheEstimate,
    memory: MemoryEstimate,
    branch: BranchEstimate,
    ipc: IpcEstimate,
}

impl CoreEstimates {
    fn evaluate(config: &Configuration) -> Self {
        let cache = cache::estimate(config);
        let memory = memory::estimate(config, &cache);
        let branch = branch::estimate(config);
        let ipc = ipc::estimate(config, &branch);
        Self {
            cache,
            memory,
            branch,
            ipc,
        }
    }
}

/// Turns configurations into results.
///
/// # Examples
///
/// ```
/// use archsim_core::{Configuration, SimulationEngine};
///
/// let engine = SimulationEngine::new();
/// let result = engine.run(&Configuration::baseline());
/// assert!((result.performance_index() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationEngine {
    baseline: Baseline,
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationEngine {
    /// Creates an engine, evaluating the baseline on first call in the process.
    pub fn new() -> Self {
        Self {
            baseline: *BASELINE,
        }
    }

    /// Returns the baseline the performance index is normalized against.
    pub const fn baseline(&self) -> &Baseline {
        &self.baseline
    }

    /// Estimates every metric of a validated configuration.
    pub fn run(&self, config: &Configuration) -> SimulationResult {
        self.run_detailed(config).result
    }

    /// Estimates every metric and keeps the intermediate quantities.
    pub fn run_detailed(&self, config: &Configuration) -> Report {
        let CoreEstimates {
            cache,
            memory,
            branch,
            ipc,
        } = CoreEstimates::evaluate(config);
        trace!(
            hit_rate = cache.hit_rate,
            amat_ns = memory.amat_ns,
            ipc_after = ipc.ipc_after,
            "core models evaluated"
        );

        let power = power::estimate(config, &ipc);
        let indices = index::compose(
            &self.baseline,
            ipc.ipc_after,
            config.clock_freq_ghz(),
            power.power_index,
        );
        debug!(
            predictor = %config.branch_predictor(),
            performance_index = indices.performance_index,
            power_index = indices.power_index,
            "simulation complete"
        );

        Report {
            result: SimulationResult::assemble(&cache, &memory, &branch, &ipc, &power, &indices),
            breakdown: Breakdown::assemble(&cache, &memory, &branch, &ipc, &power),
        }
    }

    /// Validates a raw field map and, only if it is valid, runs it.
    ///
    /// # Errors
    ///
    /// Returns the full batch of field errors; no model is evaluated in that case.
    pub fn validate_and_run(&self, raw: &RawConfig) -> Result<SimulationResult, ValidationErrors> {
        let config = validate(raw)?;
        Ok(self.run(&config))
    }
}
