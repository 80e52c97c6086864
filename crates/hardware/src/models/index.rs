//! Aggregate Indices.
//!
//! Performance is normalized against the baseline configuration so that the
//! baseline always scores 1.0; efficiency is performance per unit of power index.

/// Throughput reference captured from the baseline configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baseline {
    /// Baseline IPC after branch stalls.
    pub ipc_after: f64,
    /// Baseline clock frequency (GHz).
    pub clock_freq_ghz: f64,
}

impl Baseline {
    /// Instructions per nanosecond of the baseline.
    pub fn throughput(&self) -> f64 {
        self.ipc_after * self.clock_freq_ghz
    }
}

/// Output of the index calculator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indices {
    /// Throughput relative to the baseline.
    pub performance_index: f64,
    /// Normalized power score.
    pub power_index: f64,
    /// `performance_index / power_index`.
    pub efficiency_index: f64,
}

/// Composes the performance and efficiency indices.
pub fn compose(baseline: &Baseline, ipc_after: f64, clock_freq_ghz: f64, power_index: f64) -> Indices {
    let performance_index = ipc_after * clock_freq_ghz / baseline.throughput();
    Indices {
        performance_index,
        power_index,
        efficiency_index: performance_index / power_index,
    }
}
