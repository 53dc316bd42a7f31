//! Domain models for the labor market simulator

pub mod event;
pub mod state;
pub mod worker;

// Re-exports
pub use event::{Event, EventLog};
pub use state::{Population, WorkerId};
pub use worker::{IncomeRules, Worker};
