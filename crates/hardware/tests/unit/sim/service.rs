//! Service layer tests, against both the in-memory store and a mock.

use archsim_core::common::{ServiceError, StoreError};
use archsim_core::sim::service::SimulationService;
use archsim_core::store::{ConfigStore, Identity, InMemoryConfigStore, UNNAMED};
use archsim_core::{Configuration, SimulationEngine};
use mockall::predicate::{always, eq};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::mocks::store::MockStore;
use crate::common::{config_with, raw};

fn service() -> SimulationService<InMemoryConfigStore> {
    SimulationService::new(SimulationEngine::new(), InMemoryConfigStore::new())
}

#[test]
fn simulate_returns_result_or_every_error() {
    let svc = service();
    let ok = svc.simulate(&raw(json!({}))).unwrap();
    assert!((ok.performance_index() - 1.0).abs() < 1e-12);

    match svc.simulate(&raw(json!({ "cache_size_kb": 1, "issue_width": 100 }))) {
        Err(ServiceError::Invalid(errors)) => {
            assert!(errors.has_field("cache_size_kb"));
            assert!(errors.has_field("issue_width"));
        }
        other => panic!("expected Invalid, got {other:?}"),
    }
}

#[test]
fn predefined_lists_three_presets() {
    let ids: Vec<String> = service().predefined().into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["small-l1", "balanced", "high-perf"]);
}

#[test]
fn save_list_and_rerun() {
    let svc = service();
    let alice = Identity::new(1);
    let id = svc
        .save(&alice, "wide", &raw(json!({ "issue_width": 8, "reg_count": 256 })))
        .unwrap();

    let saved = svc.saved(&alice).unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].id, id);
    assert_eq!(saved[0].name, "wide");

    let rerun = svc.simulate_saved(&alice, id).unwrap();
    let direct = SimulationEngine::new().run(&config_with(json!({ "issue_width": 8, "reg_count": 256 })));
    assert_eq!(rerun, direct);
}

#[test]
fn invalid_configuration_is_not_saved() {
    let svc = service();
    let who = Identity::new(7);
    let err = svc.save(&who, "broken", &raw(json!({ "clock_freq_ghz": 9 }))).unwrap_err();
    assert!(matches!(err, ServiceError::Invalid(_)));
    assert!(svc.saved(&who).unwrap().is_empty());
}

#[test]
fn other_users_configuration_is_forbidden() {
    let svc = service();
    let owner = Identity::new(1);
    let intruder = Identity::new(2);
    let id = svc.save(&owner, "mine", &raw(json!({}))).unwrap();

    match svc.simulate_saved(&intruder, id) {
        Err(ServiceError::Store(StoreError::Forbidden { id: got, user })) => {
            assert_eq!(got, id);
            assert_eq!(user, 2);
        }
        other => panic!("expected Forbidden, got {other:?}"),
    }
    assert!(svc.saved(&intruder).unwrap().is_empty());
}

#[test]
fn unknown_id_is_not_found() {
    let err = service().simulate_saved(&Identity::new(1), 99).unwrap_err();
    assert!(matches!(err, ServiceError::Store(StoreError::NotFound(99))));
}

#[test]
fn blank_name_gets_placeholder() {
    let svc = service();
    let who = Identity::new(3);
    let _ = svc.save(&who, "   ", &raw(json!({}))).unwrap();
    assert_eq!(svc.saved(&who).unwrap()[0].name, UNNAMED);
}

#[test]
fn save_hands_validated_configuration_to_store() {
    let mut store = MockStore::new();
    let expected = config_with(json!({ "cache_size_kb": 128 }));
    let _ = store
        .expect_save()
        .with(eq(Identity::new(5)), eq("big l1"), eq(expected))
        .times(1)
        .returning(|_, _, _| Ok(42));

    let svc = SimulationService::new(SimulationEngine::new(), store);
    let id = svc
        .save(&Identity::new(5), "big l1", &raw(json!({ "cache_size_kb": 128 })))
        .unwrap();
    assert_eq!(id, 42);
}

#[test]
fn rejected_save_never_reaches_store() {
    let mut store = MockStore::new();
    let _ = store.expect_save().times(0);

    let svc = SimulationService::new(SimulationEngine::new(), store);
    assert!(svc.save(&Identity::new(5), "x", &raw(json!({ "issue_width": 0 }))).is_err());
}

#[test]
fn store_failure_is_propagated() {
    let mut store = MockStore::new();
    let _ = store
        .expect_load()
        .with(always(), eq(3))
        .returning(|_, _| Err(StoreError::Poisoned));
    let _ = store
        .expect_list()
        .returning(|_| Ok(Vec::new()));

    let svc = SimulationService::new(SimulationEngine::new(), store);
    let err = svc.simulate_saved(&Identity::new(1), 3).unwrap_err();
    assert!(matches!(err, ServiceError::Store(StoreError::Poisoned)));
    assert!(svc.saved(&Identity::new(1)).unwrap().is_empty());
    assert_eq!(svc.store().load(&Identity::new(1), 3), Err(StoreError::Poisoned));
}

#[test]
fn loaded_configuration_is_run_as_is() {
    let mut store = MockStore::new();
    let _ = store
        .expect_load()
        .returning(|_, _| Ok(Configuration::baseline()));

    let svc = SimulationService::new(SimulationEngine::new(), store);
    let r = svc.simulate_saved(&Identity::new(1), 1).unwrap();
    assert_eq!(r, SimulationEngine::new().run(&Configuration::baseline()));
}
