//! Tests for tier orchestration

mod common;

use common::{layout, versions, Call, FakeEngine};
use std::path::PathBuf;
use tempfile::TempDir;
use typegate_core::{
    Silent, Tier, TierAction, TierError, TierKeys, TierOrchestrator, TierPlan,
};

fn plans(tmp: &TempDir) -> Vec<TierPlan> {
    let keys = TierKeys::derive(&versions(), b"lock");
    TierPlan::chain(&layout(tmp.path()), &keys, |tier| {
        Ok(vec![PathBuf::from(format!("/code/{}", tier.short_name()))])
    })
    .unwrap()
}

#[test]
fn test_first_run_builds_every_tier_in_order() {
    let tmp = TempDir::new().unwrap();
    let plans = plans(&tmp);
    let engine = FakeEngine::default();

    let outcomes = TierOrchestrator::new(&engine, true)
        .run(&plans, &Silent)
        .unwrap();

    assert!(outcomes.iter().all(|o| o.action == TierAction::Build));
    assert_eq!(
        outcomes.iter().map(|o| o.tier).collect::<Vec<_>>(),
        Tier::ALL.to_vec()
    );

    let calls = engine.calls();
    assert_eq!(calls.len(), 3);
    for (call, plan) in calls.iter().zip(&plans) {
        assert_eq!(
            call,
            &Call::Build {
                output: plan.database.clone(),
                inputs: plan.code_paths.clone(),
                predecessors: plan.predecessors.clone(),
            }
        );
        assert!(plan.database.exists());
    }
}

#[test]
fn test_predecessors_follow_dependency_chain() {
    let tmp = TempDir::new().unwrap();
    let plans = plans(&tmp);

    assert!(plans[0].predecessors.is_empty());
    assert_eq!(plans[1].predecessors, vec![plans[0].database.clone()]);
    assert_eq!(
        plans[2].predecessors,
        vec![plans[0].database.clone(), plans[1].database.clone()]
    );
}

#[test]
fn test_existing_databases_are_validated_when_check_enabled() {
    let tmp = TempDir::new().unwrap();
    let plans = plans(&tmp);
    let engine = FakeEngine::default();
    let orchestrator = TierOrchestrator::new(&engine, true);
    orchestrator.run(&plans, &Silent).unwrap();
    engine.calls.borrow_mut().clear();

    let outcomes = orchestrator.run(&plans, &Silent).unwrap();

    assert!(outcomes.iter().all(|o| o.action == TierAction::Validate));
    assert_eq!(
        engine.calls(),
        plans
            .iter()
            .map(|p| Call::Check(p.database.clone()))
            .collect::<Vec<_>>()
    );
}

#[test]
fn test_existing_databases_are_skipped_when_check_disabled() {
    let tmp = TempDir::new().unwrap();
    let plans = plans(&tmp);
    let engine = FakeEngine::default();
    TierOrchestrator::new(&engine, true)
        .run(&plans, &Silent)
        .unwrap();
    engine.calls.borrow_mut().clear();

    let outcomes = TierOrchestrator::new(&engine, false)
        .run(&plans, &Silent)
        .unwrap();

    assert!(outcomes.iter().all(|o| o.action == TierAction::Skip));
    assert!(engine.calls().is_empty());
}

#[test]
fn test_missing_database_is_built_even_when_check_disabled() {
    let tmp = TempDir::new().unwrap();
    let plans = plans(&tmp);
    let engine = FakeEngine::default();
    TierOrchestrator::new(&engine, true)
        .run(&plans, &Silent)
        .unwrap();
    std::fs::remove_file(&plans[2].database).unwrap();
    engine.calls.borrow_mut().clear();

    let outcomes = TierOrchestrator::new(&engine, false)
        .run(&plans, &Silent)
        .unwrap();

    let actions: Vec<_> = outcomes.iter().map(|o| o.action).collect();
    assert_eq!(
        actions,
        vec![TierAction::Skip, TierAction::Skip, TierAction::Build]
    );
}

#[test]
fn test_stale_database_is_reported_not_rebuilt() {
    let tmp = TempDir::new().unwrap();
    let plans = plans(&tmp);
    let mut engine = FakeEngine::default();
    for plan in &plans {
        std::fs::create_dir_all(plan.database.parent().unwrap()).unwrap();
        std::fs::write(&plan.database, b"db").unwrap();
    }
    engine.stale.insert(
        plans[1].database.clone(),
        vec!["module Enum changed".to_string()],
    );

    let outcomes = TierOrchestrator::new(&engine, true)
        .run(&plans, &Silent)
        .unwrap();

    assert!(!outcomes[0].is_stale());
    assert_eq!(outcomes[1].stale, vec!["module Enum changed".to_string()]);
    assert_eq!(outcomes[2].action, TierAction::Validate);
    assert!(engine
        .calls()
        .iter()
        .all(|c| matches!(c, Call::Check(_))));
}

#[test]
fn test_build_failure_stops_later_tiers() {
    let tmp = TempDir::new().unwrap();
    let plans = plans(&tmp);
    let engine = FakeEngine {
        fail_build_containing: Some("_language-".to_string()),
        ..Default::default()
    };

    let err = TierOrchestrator::new(&engine, true)
        .run(&plans, &Silent)
        .unwrap_err();

    match err {
        TierError::Engine { tier, .. } => assert_eq!(tier, Tier::LanguageCore),
        other => panic!("unexpected error: {other}"),
    }
    // platform built, language attempted, deps never touched
    assert_eq!(engine.calls().len(), 2);
    assert!(!plans[2].database.exists());
}

#[test]
fn test_dependency_database_lives_in_project_output() {
    let tmp = TempDir::new().unwrap();
    let plans = plans(&tmp);

    assert!(plans[0].database.starts_with(tmp.path().join("user-cache")));
    assert!(plans[1].database.starts_with(tmp.path().join("user-cache")));
    assert!(plans[2]
        .database
        .starts_with(tmp.path().join("_build").join("typegate")));
}

#[test]
fn test_check_failure_stops_later_tiers() {
    let tmp = TempDir::new().unwrap();
    let plans = plans(&tmp);
    for plan in &plans {
        std::fs::create_dir_all(plan.database.parent().unwrap()).unwrap();
        std::fs::write(&plan.database, b"db").unwrap();
    }
    let engine = FakeEngine {
        fail_check_containing: Some("_language-".to_string()),
        ..Default::default()
    };

    let err = TierOrchestrator::new(&engine, true)
        .run(&plans, &Silent)
        .unwrap_err();

    match err {
        TierError::Engine { tier, .. } => assert_eq!(tier, Tier::LanguageCore),
        other => panic!("unexpected error: {other}"),
    }
    // a failed validation is fatal, never a rebuild
    assert_eq!(
        engine.calls(),
        vec![
            Call::Check(plans[0].database.clone()),
            Call::Check(plans[1].database.clone()),
        ]
    );
}
