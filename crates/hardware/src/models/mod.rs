//! Analytical hardware models.
//!
//! Each model is a set of pure functions over a validated
//! [`Configuration`](crate::config::Configuration) and the estimates of the models
//! it depends on. Evaluation order is fixed by those dependencies:
//!
//! 1. **Cache:** hit/miss rate and hit time from geometry.
//! 2. **Memory:** effective DRAM latency and AMAT (needs cache).
//! 3. **Branch:** mispredict rate, counts and stall cycles.
//! 4. **IPC:** IPC before/after stalls (needs branch).
//! 5. **Power:** power index, power, energy (needs IPC).
//! 6. **Index:** performance and efficiency indices (needs IPC, power, baseline).

/// Branch predictor model.
pub mod branch;

/// Cache model.
pub mod cache;

/// Core IPC model.
pub mod ipc;

/// Aggregate index calculator.
pub mod index;

/// Main memory model.
pub mod memory;

/// Power and energy model.
pub mod power;

pub use self::branch::BranchEstimate;
pub use self::cache::CacheEstimate;
pub use self::index::{Baseline, Indices};
pub use self::ipc::IpcEstimate;
pub use self::memory::MemoryEstimate;
pub use self::power::PowerEstimate;
