//! Labor Market Core - Rust Engine
//!
//! Weekly agent-based labor market simulation with unemployment insurance
//! and an optional active labor market policy (ALMP), with deterministic
//! execution.
//!
//! # Architecture
//!
//! - **core**: Time management
//! - **rng**: Deterministic random number generation and sampling
//! - **vacancies**: Exogenous vacancy schedule
//! - **models**: Domain types (Worker, Population, Event)
//! - **policy**: Hiring-phase matching rules
//! - **metrics**: Unemployment rate, Gini coefficient, weekly history
//! - **orchestrator**: Weekly update cycle and checkpoints
//!
//! # Critical Invariants
//!
//! 1. Population size is fixed for the whole run
//! 2. All randomness is deterministic (one seeded RNG per model)
//! 3. FFI boundary is minimal and safe

// Module declarations
pub mod core;
pub mod metrics;
pub mod models;
pub mod orchestrator;
pub mod policy;
pub mod rng;
pub mod vacancies;

// Re-exports for convenience
pub use core::time::TimeManager;
pub use metrics::{gini_coefficient, unemployment_rate, MetricsHistory, MetricsRecorder, WeeklyRecord};
pub use models::{
    event::{Event, EventLog},
    state::{Population, WorkerId},
    worker::{IncomeRules, Worker},
};
pub use orchestrator::{LaborMarket, ModelConfig, ModelVariant, SimulationError, WeekResult};
pub use rng::RngManager;
pub use vacancies::VacancySchedule;

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn labor_market_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::orchestrator::PyLaborMarket>()?;
    Ok(())
}
