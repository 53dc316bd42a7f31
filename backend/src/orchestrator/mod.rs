//! Orchestrator - weekly update cycle
//!
//! Runs separation, hiring, eligibility, wealth and recording for every
//! week of the run.
//!
//! See `engine.rs` for full implementation.

pub mod checkpoint;
pub mod engine;

// Re-export main types for convenience
pub use engine::{LaborMarket, ModelConfig, ModelVariant, SimulationError, WeekResult};

// Re-export checkpoint types
pub use checkpoint::{compute_config_hash, validate_snapshot, StateSnapshot};
