//! Checkpoint Tests - Save/Load Simulation State
//!
//! Critical invariants tested:
//! - Determinism: a resumed run matches an uninterrupted one exactly
//! - Config matching: reject state from a different config
//! - Integrity: malformed or inconsistent snapshots are refused

use labor_market_core_rs::orchestrator::{compute_config_hash, StateSnapshot};
use labor_market_core_rs::policy::LockInRejection;
use labor_market_core_rs::{LaborMarket, ModelConfig, SimulationError};

// ============================================================================
// Test Helpers
// ============================================================================

fn test_config() -> ModelConfig {
    let mut config = ModelConfig::new(42, 300, 0.05, 0.95, 0.90);
    config.almp = true;
    config.steps = 60;
    config
}

fn run_weeks(model: &mut LaborMarket, weeks: usize) {
    for _ in 0..weeks {
        model.step().expect("week should run");
    }
}

// ============================================================================
// Save / Load
// ============================================================================

#[test]
fn test_save_state_is_json_snapshot() {
    let mut model = LaborMarket::new(test_config()).unwrap();
    run_weeks(&mut model, 5);

    let json = model.save_state().unwrap();
    let snapshot: StateSnapshot = serde_json::from_str(&json).unwrap();

    assert_eq!(snapshot.current_week, 5);
    assert_eq!(snapshot.workers.len(), 300);
    assert_eq!(snapshot.history.len(), 5);
    assert_eq!(snapshot.rng_state, model.rng_state());
    assert_eq!(snapshot.config_hash, compute_config_hash(&test_config()).unwrap());
}

#[test]
fn test_restored_state_matches_saved_state() {
    let mut model = LaborMarket::new(test_config()).unwrap();
    run_weeks(&mut model, 12);

    let restored = LaborMarket::load_state(test_config(), &model.save_state().unwrap()).unwrap();

    assert_eq!(restored.current_week(), 12);
    assert_eq!(restored.population(), model.population());
    assert_eq!(restored.history(), model.history());
    assert_eq!(restored.vacancies_carried_over(), model.vacancies_carried_over());
    assert_eq!(restored.rng_state(), model.rng_state());
}

#[test]
fn test_resume_is_deterministic() {
    let mut uninterrupted = LaborMarket::new(test_config()).unwrap();
    uninterrupted.run().unwrap();

    let mut first_half = LaborMarket::new(test_config()).unwrap();
    run_weeks(&mut first_half, 25);
    let json = first_half.save_state().unwrap();

    let mut resumed = LaborMarket::load_state(test_config(), &json).unwrap();
    let rest = resumed.run().unwrap();

    assert_eq!(rest.len(), 35);
    assert_eq!(resumed.history(), uninterrupted.history());
    assert_eq!(resumed.population(), uninterrupted.population());
    assert_eq!(
        resumed.vacancies_carried_over(),
        uninterrupted.vacancies_carried_over()
    );
}

#[test]
fn test_snapshot_at_end_cannot_step() {
    let mut model = LaborMarket::new(test_config()).unwrap();
    model.run().unwrap();

    let mut restored = LaborMarket::load_state(test_config(), &model.save_state().unwrap()).unwrap();
    assert!(restored.is_finished());
    assert_eq!(restored.step(), Err(SimulationError::SimulationComplete(60)));
}

// ============================================================================
// Rejections
// ============================================================================

#[test]
fn test_config_mismatch_rejected() {
    let mut model = LaborMarket::new(test_config()).unwrap();
    run_weeks(&mut model, 3);
    let json = model.save_state().unwrap();

    let mut other = test_config();
    other.lock_in_rejection = LockInRejection::Counted;

    assert!(matches!(
        LaborMarket::load_state(other, &json),
        Err(SimulationError::ConfigMismatch { .. })
    ));
}

#[test]
fn test_malformed_json_rejected() {
    assert!(matches!(
        LaborMarket::load_state(test_config(), "{ not json"),
        Err(SimulationError::SerializationError(_))
    ));
}

#[test]
fn test_tampered_snapshot_rejected() {
    let mut model = LaborMarket::new(test_config()).unwrap();
    run_weeks(&mut model, 4);

    let mut snapshot = model.snapshot().unwrap();
    snapshot.workers.truncate(100);

    assert!(matches!(
        LaborMarket::restore(test_config(), snapshot),
        Err(SimulationError::InvalidSnapshot(_))
    ));
}

#[test]
fn test_config_hash_changes_with_any_field() {
    let base = compute_config_hash(&test_config()).unwrap();

    let mut seeded = test_config();
    seeded.seed = 43;
    assert_ne!(base, compute_config_hash(&seeded).unwrap());

    let mut wealthy = test_config();
    wealthy.initial_wealth = 1.0;
    assert_ne!(base, compute_config_hash(&wealthy).unwrap());
}
