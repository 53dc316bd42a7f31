//! Checkpoint - Save/Load Simulation State
//!
//! Serializes the complete weekly-cycle state to JSON so a run can be paused
//! between weeks and resumed later.
//!
//! # Critical Invariants
//!
//! - **Determinism**: resuming from a snapshot continues with exactly the
//!   draws an uninterrupted run would have made
//! - **Fixed population**: snapshot holds one worker per labor-force member
//! - **Config Matching**: state can only be loaded with matching config

use crate::metrics::MetricsHistory;
use crate::models::state::Population;
use crate::models::worker::{Worker, MAX_ELIGIBILITY};
use crate::orchestrator::engine::{LaborMarket, ModelConfig, SimulationError};
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;

// ============================================================================
// Snapshot Structures
// ============================================================================

/// Complete model state snapshot
///
/// Captures everything needed to resume between weeks. The vacancy schedule
/// and matching policy are rebuilt from the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Last executed week
    pub current_week: usize,

    /// RNG state at time of snapshot (CRITICAL for determinism)
    pub rng_state: u64,

    /// Every worker, in index order
    pub workers: Vec<Worker>,

    /// Unfilled vacancies waiting for next week
    pub vacancies_carried_over: usize,

    /// Weekly records so far
    pub history: MetricsHistory,

    /// SHA256 hash of original config (for validation)
    pub config_hash: String,
}

// ============================================================================
// Config Hashing
// ============================================================================

/// Compute deterministic SHA256 hash of config
///
/// Uses canonical JSON serialization with sorted keys, so the hash does not
/// depend on field order.
pub fn compute_config_hash<T: Serialize>(config: &T) -> Result<String, SimulationError> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    let value = serde_json::to_value(config).map_err(|e| {
        SimulationError::SerializationError(format!("Config serialization failed: {}", e))
    })?;

    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let json = serde_json::to_string(&canonicalize(value)).map_err(|e| {
        SimulationError::SerializationError(format!("Config serialization failed: {}", e))
    })?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Validate a snapshot against the config it will be resumed under
///
/// Checks:
/// - Population size equals the labor force
/// - Week position within the run, with one record per executed week
/// - Eligibility within bounds, wealth and skill finite
/// - No carried-over vacancies for the plain variant
pub fn validate_snapshot(snapshot: &StateSnapshot, config: &ModelConfig) -> Result<(), SimulationError> {
    if snapshot.workers.len() != config.labor_force {
        return Err(SimulationError::InvalidSnapshot(format!(
            "Population size {} does not match labor force {}",
            snapshot.workers.len(),
            config.labor_force
        )));
    }

    if snapshot.current_week > config.steps {
        return Err(SimulationError::InvalidSnapshot(format!(
            "Week {} is beyond the configured {} weeks",
            snapshot.current_week, config.steps
        )));
    }

    let expected_weeks: Vec<usize> = (1..=snapshot.current_week).collect();
    if snapshot.history.weeks() != expected_weeks {
        return Err(SimulationError::InvalidSnapshot(format!(
            "History holds {} records for {} executed weeks",
            snapshot.history.len(),
            snapshot.current_week
        )));
    }

    for (id, worker) in snapshot.workers.iter().enumerate() {
        if !(0.0..=MAX_ELIGIBILITY).contains(&worker.eligibility()) {
            return Err(SimulationError::InvalidSnapshot(format!(
                "Worker {} eligibility {} out of bounds",
                id,
                worker.eligibility()
            )));
        }
        if !worker.wealth().is_finite() || !worker.skill_level().is_finite() {
            return Err(SimulationError::InvalidSnapshot(format!(
                "Worker {} has non-finite wealth or skill",
                id
            )));
        }
    }

    if !config.variant.carries_vacancies() && snapshot.vacancies_carried_over != 0 {
        return Err(SimulationError::InvalidSnapshot(
            "Plain variant cannot carry vacancies over".to_string(),
        ));
    }

    Ok(())
}

// ============================================================================
// Save / Load
// ============================================================================

impl LaborMarket {
    /// Capture the current state
    pub fn snapshot(&self) -> Result<StateSnapshot, SimulationError> {
        Ok(StateSnapshot {
            current_week: self.current_week(),
            rng_state: self.rng_state(),
            workers: self.population().workers().to_vec(),
            vacancies_carried_over: self.vacancies_carried_over(),
            history: self.history().clone(),
            config_hash: compute_config_hash(self.config())?,
        })
    }

    /// Serialize the current state to JSON
    pub fn save_state(&self) -> Result<String, SimulationError> {
        let snapshot = self.snapshot()?;
        serde_json::to_string(&snapshot).map_err(|e| {
            SimulationError::SerializationError(format!("Snapshot serialization failed: {}", e))
        })
    }

    /// Resume from a JSON snapshot taken under `config`
    ///
    /// # Errors
    ///
    /// * `SerializationError` - JSON does not parse as a snapshot
    /// * `ConfigMismatch` - snapshot was taken under a different config
    /// * `InvalidSnapshot` - snapshot violates a model invariant
    pub fn load_state(config: ModelConfig, state_json: &str) -> Result<Self, SimulationError> {
        config.validate()?;

        let snapshot: StateSnapshot = serde_json::from_str(state_json).map_err(|e| {
            SimulationError::SerializationError(format!("Snapshot deserialization failed: {}", e))
        })?;

        Self::restore(config, snapshot)
    }

    /// Resume from an already-parsed snapshot
    pub fn restore(config: ModelConfig, snapshot: StateSnapshot) -> Result<Self, SimulationError> {
        let actual = compute_config_hash(&config)?;
        if actual != snapshot.config_hash {
            return Err(SimulationError::ConfigMismatch {
                expected: snapshot.config_hash,
                actual,
            });
        }

        validate_snapshot(&snapshot, &config)?;

        info!(
            week = snapshot.current_week,
            labor_force = config.labor_force,
            "Labor market restored from snapshot"
        );

        Ok(Self::from_parts(
            config,
            Population::new(snapshot.workers),
            snapshot.current_week,
            RngManager::new(snapshot.rng_state),
            snapshot.vacancies_carried_over,
            snapshot.history,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ModelConfig {
        let mut config = ModelConfig::new(11, 50, 0.05, 0.95, 0.90);
        config.steps = 12;
        config
    }

    #[test]
    fn test_compute_config_hash_deterministic() {
        let hash1 = compute_config_hash(&config()).unwrap();
        let hash2 = compute_config_hash(&config()).unwrap();
        assert_eq!(hash1, hash2, "Same config should produce same hash");
    }

    #[test]
    fn test_compute_config_hash_different_for_different_configs() {
        let mut other = config();
        other.almp = true;

        assert_ne!(
            compute_config_hash(&config()).unwrap(),
            compute_config_hash(&other).unwrap(),
            "Different configs should produce different hashes"
        );
    }

    #[test]
    fn test_validate_rejects_wrong_population_size() {
        let model = LaborMarket::new(config()).unwrap();
        let mut snapshot = model.snapshot().unwrap();
        snapshot.workers.pop();

        assert!(matches!(
            validate_snapshot(&snapshot, &config()),
            Err(SimulationError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn test_validate_rejects_history_gap() {
        let mut model = LaborMarket::new(config()).unwrap();
        model.step().unwrap();
        model.step().unwrap();
        let mut snapshot = model.snapshot().unwrap();
        snapshot.current_week = 3;

        assert!(validate_snapshot(&snapshot, &config()).is_err());
    }
}
