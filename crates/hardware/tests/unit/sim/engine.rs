//! Engine tests.

use archsim_core::config::{self, BranchPredictor};
use archsim_core::stats::RESULT_FIELDS;
use archsim_core::{Configuration, SimulationEngine};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{assert_close, config_with, init_tracing, raw};

#[test]
fn baseline_scores_exactly_one() {
    init_tracing();
    let r = SimulationEngine::new().run(&Configuration::baseline());
    assert_close(r.performance_index(), 1.0);
    assert_close(r.power_index(), 0.40375);
    assert_close(r.efficiency_index(), 1.0 / 0.40375);
}

#[test]
fn baseline_matches_hand_computed_figures() {
    let r = SimulationEngine::default().run(&Configuration::baseline());
    let before = 4.0 * (1.0 - (-0.5f64).exp());

    assert_close(r.cache_hit_time_ns(), 1.45);
    assert_close(r.branch_mispredict_rate(), 0.12);
    assert_eq!(r.branch_total_branches(), 200_000);
    assert_eq!(r.branch_mispredict_count(), 24_000);
    assert_close(r.branch_stall_cycles(), 168_000.0);
    assert_close(r.branch_ipc_before(), before);
    assert_close(r.branch_ipc_after(), before / 1.168);
    assert_close(r.ipc_index(), r.branch_ipc_after());
    assert_close(r.branch_predictor_efficiency(), 0.88);
    assert_close(r.amat_ns(), 1.45 + r.cache_miss_rate() * 80.0 / 1.5);
}

#[test]
fn engine_exposes_baseline() {
    let engine = SimulationEngine::new();
    assert_close(engine.baseline().clock_freq_ghz, 3.0);
    assert_close(engine.baseline().throughput(), 3.0 * 4.0 * (1.0 - (-0.5f64).exp()) / 1.168);
}

#[test]
fn all_minimum_configuration_is_well_defined() {
    let config = config::validate(&raw(json!({
        "cache_size_kb": 8, "cache_block_size_b": 16, "cache_associativity": 1,
        "mem_size_gb": 1, "mem_bandwidth_gbs": 5, "mem_latency_ns": 20,
        "reg_count": 8, "reg_width_bits": 16, "bus_width_bits": 16, "bus_freq_ghz": 0.5,
        "alu_width_bits": 16, "clock_freq_ghz": 0.5, "pipeline_depth": 4, "issue_width": 1,
        "branch_predictor": "static"
    })))
    .unwrap();
    let r = SimulationEngine::new().run(&config);

    for (name, value) in r.float_fields() {
        assert!(value.is_finite() && value >= 0.0, "{name} = {value}");
    }
    assert!(r.performance_index() > 0.0 && r.performance_index() < 1.0);
    assert!(r.power_index() > 0.0);
}

#[test]
fn predictor_choice_only_moves_branch_metrics() {
    let engine = SimulationEngine::new();
    let s = engine.run(&config_with(json!({ "branch_predictor": "static" })));
    let t = engine.run(&config_with(json!({ "branch_predictor": "tournament" })));

    assert!(t.branch_stall_cycles() < s.branch_stall_cycles());
    assert!(t.performance_index() > s.performance_index());
    assert_eq!(t.cache_hit_rate(), s.cache_hit_rate());
    assert_eq!(t.power_index(), s.power_index());
    assert_eq!(t.branch_ipc_before(), s.branch_ipc_before());
}

#[test]
fn faster_clock_raises_power_and_performance() {
    let engine = SimulationEngine::new();
    let slow = engine.run(&config_with(json!({ "clock_freq_ghz": 2.0 })));
    let fast = engine.run(&config_with(json!({ "clock_freq_ghz": 4.0 })));
    assert!(fast.performance_index() > slow.performance_index());
    assert!(fast.power_index() > slow.power_index());
    assert!(fast.average_power_consumption() > slow.average_power_consumption());
}

#[test]
fn results_are_deterministic() {
    let config = config_with(json!({ "cache_size_kb": 256, "branch_predictor": "tournament" }));
    let a = SimulationEngine::new().run(&config);
    let b = SimulationEngine::new().run(&config);
    assert_eq!(a, b);
    assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
}

#[test]
fn result_serializes_to_exactly_the_wire_fields() {
    let r = SimulationEngine::new().run(&Configuration::baseline());
    let value = serde_json::to_value(r).unwrap();
    let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();

    let mut expected = RESULT_FIELDS.to_vec();
    expected.sort_unstable();
    assert_eq!(keys, expected);
    assert_eq!(value["branch_total_branches"], json!(200_000));
    assert_eq!(value["branch_mispredict_count"], json!(24_000));
}

#[test]
fn result_deserialization_rejects_unknown_fields() {
    let r = SimulationEngine::new().run(&Configuration::baseline());
    let mut value = serde_json::to_value(r).unwrap();
    let back: archsim_core::SimulationResult = serde_json::from_value(value.clone()).unwrap();
    assert_eq!(back, r);

    let _ = value
        .as_object_mut()
        .unwrap()
        .insert("extra".to_string(), json!(1));
    assert!(serde_json::from_value::<archsim_core::SimulationResult>(value).is_err());
}

#[test]
fn validate_and_run_rejects_before_running() {
    let engine = SimulationEngine::new();
    let err = engine
        .validate_and_run(&raw(json!({ "issue_width": 12, "branch_predictor": "oracle" })))
        .unwrap_err();
    assert_eq!(err.errors().len(), 2);

    let ok = engine
        .validate_and_run(&raw(json!({ "branch_predictor": "tournament" })))
        .unwrap();
    let direct = engine.run(&config_with(json!({ "branch_predictor": BranchPredictor::Tournament.as_str() })));
    assert_eq!(ok, direct);
}

#[test]
fn detailed_report_carries_breakdown() {
    let report = SimulationEngine::new().run_detailed(&Configuration::baseline());
    let b = report.breakdown;
    assert_eq!(b.cache_sets, 128);
    assert_close(b.misprediction_penalty_cycles, 7.0);
    assert_close(b.effective_memory_latency_ns, 80.0 / 1.5);
    assert_close(b.total_memory_accesses, 300_000.0);
    assert_close(b.stall_cycles_total, b.actual_cycles - b.ideal_cycles);
    assert_close(b.execution_time_s * 3.0e9 * report.result.ipc_index() / 1e6, 1.0);
}

#[test]
fn engine_is_shareable_across_threads() {
    let engine = SimulationEngine::new();
    let config = Configuration::baseline();
    let expected = engine.run(&config);

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(|| engine.run(&config))).collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}
