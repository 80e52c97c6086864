//! # Validation Tests
//!
//! Covers defaults for absent fields, range and type checks, the predictor enum,
//! cache geometry, and batching of every error found in one pass.

use archsim_core::Configuration;
use archsim_core::common::FieldError;
use archsim_core::config::{self, BranchPredictor, fields};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

use crate::common::{raw, raw_with, raw_with_field};

#[test]
fn empty_record_is_baseline() {
    let config = config::validate(&raw(json!({}))).unwrap();
    assert_eq!(config, Configuration::baseline());
}

#[test]
fn unknown_keys_are_ignored() {
    let config = config::validate(&raw(json!({ "turbo": true, "cores": 8 }))).unwrap();
    assert_eq!(config, Configuration::baseline());
}

#[test]
fn baseline_survives_raw_round_trip() {
    let raw = Configuration::baseline().to_raw();
    assert_eq!(raw.len(), fields::NUMERIC.len() + 1);
    assert_eq!(config::validate(&raw).unwrap(), Configuration::baseline());
}

#[test]
fn partial_record_fills_defaults() {
    let config = config::validate(&raw(json!({
        "cache_size_kb": 64,
        "issue_width": 2
    })))
    .unwrap();
    assert_eq!(config.cache_size_kb(), 64);
    assert_eq!(config.issue_width(), 2);
    assert_eq!(config.cache_block_size_b(), 64);
    assert_eq!(config.clock_freq_ghz(), 3.0);
    assert_eq!(config.branch_predictor(), BranchPredictor::Bimodal);
}

#[test]
fn every_bound_is_inclusive() {
    let mins = raw(json!({
        "cache_size_kb": 8, "cache_block_size_b": 16, "cache_associativity": 1,
        "mem_size_gb": 1, "mem_bandwidth_gbs": 5, "mem_latency_ns": 20,
        "reg_count": 8, "reg_width_bits": 16, "bus_width_bits": 16, "bus_freq_ghz": 0.5,
        "alu_width_bits": 16, "clock_freq_ghz": 0.5, "pipeline_depth": 4, "issue_width": 1
    }));
    let maxes = raw(json!({
        "cache_size_kb": 1024, "cache_block_size_b": 1024, "cache_associativity": 16,
        "mem_size_gb": 128, "mem_bandwidth_gbs": 200, "mem_latency_ns": 200,
        "reg_count": 256, "reg_width_bits": 128, "bus_width_bits": 256, "bus_freq_ghz": 5,
        "alu_width_bits": 128, "clock_freq_ghz": 5, "pipeline_depth": 30, "issue_width": 8
    }));

    let lo = config::validate(&mins).unwrap();
    assert_eq!(lo.cache_sets(), 512);
    let hi = config::validate(&maxes).unwrap();
    assert_eq!(hi.cache_sets(), 64);
}

#[rstest]
#[case("cache_size_kb", json!(4), 8.0, 1024.0)]
#[case("cache_size_kb", json!(2048), 8.0, 1024.0)]
#[case("cache_block_size_b", json!(8), 16.0, 1024.0)]
#[case("cache_associativity", json!(0), 1.0, 16.0)]
#[case("cache_associativity", json!(32), 1.0, 16.0)]
#[case("mem_size_gb", json!(0.5), 1.0, 128.0)]
#[case("mem_bandwidth_gbs", json!(250), 5.0, 200.0)]
#[case("mem_latency_ns", json!(10.5), 20.0, 200.0)]
#[case("reg_count", json!(-8), 8.0, 256.0)]
#[case("reg_width_bits", json!(256), 16.0, 128.0)]
#[case("bus_width_bits", json!(8), 16.0, 256.0)]
#[case("bus_freq_ghz", json!(5.5), 0.5, 5.0)]
#[case("alu_width_bits", json!(0), 16.0, 128.0)]
#[case("clock_freq_ghz", json!(0.0), 0.5, 5.0)]
#[case("clock_freq_ghz", json!(-1.0), 0.5, 5.0)]
#[case("pipeline_depth", json!(3), 4.0, 30.0)]
#[case("issue_width", json!(9), 1.0, 8.0)]
fn out_of_range_value_is_rejected(
    #[case] field: &'static str,
    #[case] value: Value,
    #[case] min: f64,
    #[case] max: f64,
) {
    let rejected = value.as_f64().unwrap();
    let errors = config::validate(&raw_with_field(field, value)).unwrap_err();
    assert_eq!(
        errors.errors(),
        &[FieldError::OutOfRange {
            field,
            min,
            max,
            value: rejected,
        }]
    );
}

#[rstest]
#[case("cache_size_kb", json!(32.5), "a positive integer")]
#[case("issue_width", json!("two"), "a positive integer")]
#[case("reg_count", json!(true), "a positive integer")]
#[case("pipeline_depth", json!(null), "a positive integer")]
#[case("clock_freq_ghz", json!("fast"), "a positive number")]
#[case("mem_latency_ns", json!([80]), "a positive number")]
#[case("bus_freq_ghz", json!("NaN"), "a positive number")]
#[case("mem_bandwidth_gbs", json!("inf"), "a positive number")]
fn wrong_type_is_rejected(#[case] field: &'static str, #[case] value: Value, #[case] expected: &'static str) {
    let errors = config::validate(&raw_with_field(field, value)).unwrap_err();
    assert_eq!(errors.errors(), &[FieldError::InvalidType { field, expected }]);
}

#[test]
fn numeric_strings_are_accepted() {
    let config = config::validate(&raw(json!({
        "cache_size_kb": "64",
        "clock_freq_ghz": " 3.5 ",
        "issue_width": "6.0"
    })))
    .unwrap();
    assert_eq!(config.cache_size_kb(), 64);
    assert_eq!(config.clock_freq_ghz(), 3.5);
    assert_eq!(config.issue_width(), 6);
}

#[test]
fn integral_float_is_accepted_for_integer_field() {
    let config = config::validate(&raw(json!({ "reg_count": 128.0 }))).unwrap();
    assert_eq!(config.reg_count(), 128);
}

#[rstest]
#[case(json!("neural"))]
#[case(json!(""))]
#[case(json!(2))]
#[case(json!(null))]
fn unknown_predictor_is_rejected(#[case] value: Value) {
    let errors = config::validate(&raw_with_field(fields::BRANCH_PREDICTOR, value)).unwrap_err();
    assert_eq!(
        errors.errors(),
        &[FieldError::InvalidEnum {
            field: "branch_predictor",
            allowed: vec!["static", "bimodal", "tournament"],
        }]
    );
}

#[rstest]
#[case("static", BranchPredictor::Static)]
#[case("Bimodal", BranchPredictor::Bimodal)]
#[case("TOURNAMENT", BranchPredictor::Tournament)]
fn predictor_names_ignore_case(#[case] name: &str, #[case] expected: BranchPredictor) {
    let config = config::validate(&raw_with_field(fields::BRANCH_PREDICTOR, json!(name))).unwrap();
    assert_eq!(config.branch_predictor(), expected);
}

#[test]
fn geometry_without_a_full_set_is_rejected() {
    // 8 KB cannot hold 16 ways of 1 KB lines.
    let errors = config::validate(&raw(json!({
        "cache_size_kb": 8,
        "cache_block_size_b": 1024,
        "cache_associativity": 16
    })))
    .unwrap_err();

    assert_eq!(errors.errors().len(), 1);
    assert!(matches!(
        &errors.errors()[0],
        FieldError::InconsistentGeometry { field: "cache_associativity", .. }
    ));
}

#[test]
fn geometry_with_exactly_one_set_is_accepted() {
    let config = config::validate(&raw(json!({
        "cache_size_kb": 16,
        "cache_block_size_b": 1024,
        "cache_associativity": 16
    })))
    .unwrap();
    assert_eq!(config.cache_sets(), 1);
}

#[test]
fn geometry_is_not_checked_when_an_input_is_invalid() {
    let errors = config::validate(&raw(json!({
        "cache_size_kb": 4,
        "cache_block_size_b": 1024,
        "cache_associativity": 16
    })))
    .unwrap_err();
    assert_eq!(errors.errors().len(), 1);
    assert!(errors.has_field("cache_size_kb"));
    assert!(!errors.has_field("cache_associativity"));
}

#[test]
fn every_offending_field_is_reported_in_check_order() {
    let errors = config::validate(&raw_with(json!({
        "cache_size_kb": 4,
        "clock_freq_ghz": "fast",
        "issue_width": 0,
        "branch_predictor": "perceptron"
    })))
    .unwrap_err();

    let names: Vec<&str> = errors.errors().iter().map(FieldError::field).collect();
    assert_eq!(
        names,
        vec!["cache_size_kb", "clock_freq_ghz", "issue_width", "branch_predictor"]
    );
}

#[test]
fn errors_serialize_with_kind_tags() {
    let errors = config::validate(&raw(json!({ "issue_width": 9, "branch_predictor": "x" }))).unwrap_err();
    let value = serde_json::to_value(&errors).unwrap();

    assert_eq!(
        value,
        json!({
            "errors": [
                {
                    "field": "issue_width",
                    "kind": "out_of_range",
                    "message": "issue_width = 9 is out of range [1, 8]",
                    "min": 1.0,
                    "max": 8.0,
                    "value": 9.0
                },
                {
                    "field": "branch_predictor",
                    "kind": "invalid_enum",
                    "message": "branch_predictor must be one of static, bimodal, tournament",
                    "allowed": ["static", "bimodal", "tournament"]
                }
            ]
        })
    );
}

#[test]
fn error_message_names_the_fields() {
    let errors = config::validate(&raw(json!({ "pipeline_depth": 31 }))).unwrap_err();
    let message = errors.to_string();
    assert!(message.contains("1 field(s)"));
    assert!(message.contains("pipeline_depth = 31 is out of range [4, 30]"));
}
