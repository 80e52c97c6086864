//! Simulation results and reporting.
//!
//! This module holds the output side of a simulation request. It provides:
//! 1. **Result:** The immutable wire record returned for every valid configuration.
//! 2. **Breakdown:** Intermediate quantities (sets, cycles, run time) kept off the wire.
//! 3. **Report:** Both of the above, with sectioned human-readable printing.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::models::{BranchEstimate, CacheEstimate, Indices, IpcEstimate, MemoryEstimate, PowerEstimate};

/// Derived metrics of one configuration.
///
/// Serializes to exactly the twenty fields of the `/simulate` response. Built once by
/// the engine and read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationResult {
    cache_hit_rate: f64,
    cache_miss_rate: f64,
    cache_hit_time_ns: f64,
    amat_ns: f64,
    branch_mispredict_rate: f64,
    performance_index: f64,
    power_index: f64,
    efficiency_index: f64,
    ipc_index: f64,
    total_energy_consumption: f64,
    average_power_consumption: f64,
    energy_per_access: f64,
    power_density: f64,
    branch_total_branches: u64,
    branch_mispredict_count: u64,
    branch_stall_cycles: f64,
    branch_ipc_before: f64,
    branch_ipc_after: f64,
    branch_ipc_loss_percent: f64,
    branch_predictor_efficiency: f64,
}

/// Wire names of the result fields, in serialization order.
pub const RESULT_FIELDS: [&str; 20] = [
    "cache_hit_rate",
    "cache_miss_rate",
    "cache_hit_time_ns",
    "amat_ns",
    "branch_mispredict_rate",
    "performance_index",
    "power_index",
    "efficiency_index",
    "ipc_index",
    "total_energy_consumption",
    "average_power_consumption",
    "energy_per_access",
    "power_density",
    "branch_total_branches",
    "branch_mispredict_count",
    "branch_stall_cycles",
    "branch_ipc_before",
    "branch_ipc_after",
    "branch_ipc_loss_percent",
    "branch_predictor_efficiency",
];

impl SimulationResult {
    /// Assembles a result from the model estimates.
    pub(crate) const fn assemble(
        cache: &CacheEstimate,
        memory: &MemoryEstimate,
        branch: &BranchEstimate,
        ipc: &IpcEstimate,
        power: &PowerEstimate,
        indices: &Indices,
    ) -> Self {
        Self {
            cache_hit_rate: cache.hit_rate,
            cache_miss_rate: cache.miss_rate,
            cache_hit_time_ns: cache.hit_time_ns,
            amat_ns: memory.amat_ns,
            branch_mispredict_rate: branch.mispredict_rate,
            performance_index: indices.performance_index,
            power_index: indices.power_index,
            efficiency_index: indices.efficiency_index,
            ipc_index: ipc.ipc_after,
            total_energy_consumption: power.total_energy_j,
            average_power_consumption: power.average_power_w,
            energy_per_access: power.energy_per_access_j,
            power_density: power.power_density,
            branch_total_branches: branch.total_branches,
            branch_mispredict_count: branch.mispredict_count,
            branch_stall_cycles: branch.stall_cycles,
            branch_ipc_before: ipc.ipc_before,
            branch_ipc_after: ipc.ipc_after,
            branch_ipc_loss_percent: ipc.ipc_loss_percent,
            branch_predictor_efficiency: branch.predictor_efficiency,
        }
    }

    /// Fraction of accesses that hit in L1.
    pub const fn cache_hit_rate(&self) -> f64 {
        self.cache_hit_rate
    }
    /// Fraction of accesses that miss in L1.
    pub const fn cache_miss_rate(&self) -> f64 {
        self.cache_miss_rate
    }
    /// L1 hit time (ns).
    pub const fn cache_hit_time_ns(&self) -> f64 {
        self.cache_hit_time_ns
    }
    /// Average memory access time (ns).
    pub const fn amat_ns(&self) -> f64 {
        self.amat_ns
    }
    /// Fraction of branches mispredicted.
    pub const fn branch_mispredict_rate(&self) -> f64 {
        self.branch_mispredict_rate
    }
    /// Throughput relative to the baseline configuration.
    pub const fn performance_index(&self) -> f64 {
        self.performance_index
    }
    /// Normalized power score.
    pub const fn power_index(&self) -> f64 {
        self.power_index
    }
    /// Performance per unit of power index.
    pub const fn efficiency_index(&self) -> f64 {
        self.efficiency_index
    }
    /// IPC after branch stalls.
    pub const fn ipc_index(&self) -> f64 {
        self.ipc_index
    }
    /// Energy for the reference workload (J).
    pub const fn total_energy_consumption(&self) -> f64 {
        self.total_energy_consumption
    }
    /// Average power draw (W).
    pub const fn average_power_consumption(&self) -> f64 {
        self.average_power_consumption
    }
    /// Energy per memory access (J).
    pub const fn energy_per_access(&self) -> f64 {
        self.energy_per_access
    }
    /// Power per die area (W/cm²).
    pub const fn power_density(&self) -> f64 {
        self.power_density
    }
    /// Branches in the reference workload.
    pub const fn branch_total_branches(&self) -> u64 {
        self.branch_total_branches
    }
    /// Mispredicted branches in the reference workload.
    pub const fn branch_mispredict_count(&self) -> u64 {
        self.branch_mispredict_count
    }
    /// Cycles lost to mispredicts.
    pub const fn branch_stall_cycles(&self) -> f64 {
        self.branch_stall_cycles
    }
    /// IPC with a perfect predictor.
    pub const fn branch_ipc_before(&self) -> f64 {
        self.branch_ipc_before
    }
    /// IPC after branch stalls.
    pub const fn branch_ipc_after(&self) -> f64 {
        self.branch_ipc_after
    }
    /// Relative IPC loss to branch stalls (%).
    pub const fn branch_ipc_loss_percent(&self) -> f64 {
        self.branch_ipc_loss_percent
    }
    /// `1 - branch_mispredict_rate`.
    pub const fn branch_predictor_efficiency(&self) -> f64 {
        self.branch_predictor_efficiency
    }

    /// Returns every floating-point field paired with its wire name.
    pub fn float_fields(&self) -> [(&'static str, f64); 18] {
        [
            ("cache_hit_rate", self.cache_hit_rate),
            ("cache_miss_rate", self.cache_miss_rate),
            ("cache_hit_time_ns", self.cache_hit_time_ns),
            ("amat_ns", self.amat_ns),
            ("branch_mispredict_rate", self.branch_mispredict_rate),
            ("performance_index", self.performance_index),
            ("power_index", self.power_index),
            ("efficiency_index", self.efficiency_index),
            ("ipc_index", self.ipc_index),
            ("total_energy_consumption", self.total_energy_consumption),
            ("average_power_consumption", self.average_power_consumption),
            ("energy_per_access", self.energy_per_access),
            ("power_density", self.power_density),
            ("branch_stall_cycles", self.branch_stall_cycles),
            ("branch_ipc_before", self.branch_ipc_before),
            ("branch_ipc_after", self.branch_ipc_after),
            ("branch_ipc_loss_percent", self.branch_ipc_loss_percent),
            ("branch_predictor_efficiency", self.branch_predictor_efficiency),
        ]
    }
}

/// Intermediate quantities that explain a result but are not part of the wire record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Breakdown {
    /// Number of cache sets.
    pub cache_sets: u64,
    /// Miss service latency after bandwidth relief (ns).
    pub effective_memory_latency_ns: f64,
    /// Cycles lost per mispredict.
    pub misprediction_penalty_cycles: f64,
    /// Usable fraction of the issue width given register pressure.
    pub register_factor: f64,
    /// Run time of the reference workload (s).
    pub execution_time_s: f64,
    /// Cycles at the stall-free IPC.
    pub ideal_cycles: f64,
    /// Cycles at the stall-adjusted IPC.
    pub actual_cycles: f64,
    /// `actual_cycles - ideal_cycles`.
    pub stall_cycles_total: f64,
    /// Memory accesses in the reference workload.
    pub total_memory_accesses: f64,
}

impl Breakdown {
    pub(crate) fn assemble(
        cache: &CacheEstimate,
        memory: &MemoryEstimate,
        branch: &BranchEstimate,
        ipc: &IpcEstimate,
        power: &PowerEstimate,
    ) -> Self {
        Self {
            cache_sets: cache.sets,
            effective_memory_latency_ns: memory.effective_latency_ns,
            misprediction_penalty_cycles: branch.penalty_cycles,
            register_factor: ipc.reg_factor,
            execution_time_s: power.execution_time_s,
            ideal_cycles: ipc.ideal_cycles,
            actual_cycles: ipc.actual_cycles,
            stall_cycles_total: ipc.stall_cycles(),
            total_memory_accesses: power.total_memory_accesses,
        }
    }
}

/// A result together with its breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Report {
    /// The wire record.
    pub result: SimulationResult,
    /// The supporting quantities.
    pub breakdown: Breakdown,
}

/// Section names for selective report output.
///
/// Valid section identifiers: `"summary"`, `"cache"`, `"branch"`, `"power"`.
/// Pass an empty slice to [`Report::render_sections`] to render all sections.
pub const REPORT_SECTIONS: &[&str] = &["summary", "cache", "branch", "power"];

const RULE: &str = "----------------------------------------------------------";
const BANNER: &str = "==========================================================";

impl Report {
    /// Renders the requested sections as aligned text.
    ///
    /// Each element of `sections` should be one of [`REPORT_SECTIONS`]; unknown names
    /// are ignored. An empty slice renders everything.
    pub fn render_sections(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let r = &self.result;
        let b = &self.breakdown;
        let mut out = String::new();

        // Writing into a String cannot fail.
        let _ = writeln!(out, "{BANNER}");
        let _ = writeln!(out, "ARCHITECTURE ESTIMATE");
        let _ = writeln!(out, "{BANNER}");
        if want("summary") {
            let _ = writeln!(out, "performance_index        {:.4}", r.performance_index);
            let _ = writeln!(out, "power_index              {:.4}", r.power_index);
            let _ = writeln!(out, "efficiency_index         {:.4}", r.efficiency_index);
            let _ = writeln!(out, "ipc                      {:.4}", r.ipc_index);
            let _ = writeln!(out, "exec_time                {:.3} us", b.execution_time_s * 1e6);
            let _ = writeln!(out, "{RULE}");
        }
        if want("cache") {
            let _ = writeln!(out, "CACHE / MEMORY");
            let _ = writeln!(out, "  cache.sets             {}", b.cache_sets);
            let _ = writeln!(out, "  cache.hit_rate         {:.2}%", r.cache_hit_rate * 100.0);
            let _ = writeln!(out, "  cache.miss_rate        {:.2}%", r.cache_miss_rate * 100.0);
            let _ = writeln!(out, "  cache.hit_time         {:.3} ns", r.cache_hit_time_ns);
            let _ = writeln!(out, "  mem.effective_latency  {:.3} ns", b.effective_memory_latency_ns);
            let _ = writeln!(out, "  amat                   {:.3} ns", r.amat_ns);
            let _ = writeln!(out, "{RULE}");
        }
        if want("branch") {
            let _ = writeln!(out, "BRANCH PREDICTION");
            let _ = writeln!(out, "  bp.branches            {}", r.branch_total_branches);
            let _ = writeln!(out, "  bp.mispredicts         {}", r.branch_mispredict_count);
            let _ = writeln!(out, "  bp.mispredict_rate     {:.2}%", r.branch_mispredict_rate * 100.0);
            let _ = writeln!(out, "  bp.accuracy            {:.2}%", r.branch_predictor_efficiency * 100.0);
            let _ = writeln!(out, "  bp.penalty             {:.1} cycles", b.misprediction_penalty_cycles);
            let _ = writeln!(out, "  stalls.control         {:.0}", r.branch_stall_cycles);
            let _ = writeln!(
                out,
                "  ipc.before/after       {:.4} / {:.4} (-{:.2}%)",
                r.branch_ipc_before, r.branch_ipc_after, r.branch_ipc_loss_percent
            );
            let _ = writeln!(out, "{RULE}");
        }
        if want("power") {
            let _ = writeln!(out, "POWER / ENERGY");
            let _ = writeln!(out, "  power.average          {:.3} W", r.average_power_consumption);
            let _ = writeln!(out, "  power.density          {:.3} W/cm2", r.power_density);
            let _ = writeln!(out, "  energy.total           {:.6e} J", r.total_energy_consumption);
            let _ = writeln!(out, "  energy.per_access      {:.6e} J", r.energy_per_access);
            let _ = writeln!(out, "  mem.accesses           {:.0}", b.total_memory_accesses);
        }
        let _ = writeln!(out, "{BANNER}");
        out
    }

    /// Prints only the requested sections to stdout.
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.render_sections(sections));
    }

    /// Prints every section to stdout.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
