//! Event logging for simulation replay and auditing.
//!
//! Every status change the weekly cycle makes is recorded as an [`Event`]:
//! separations, hires (with the rule that produced the acceptance), vacancies
//! left unfilled after the retry bound, and the end-of-week summary. The log
//! is append-only and ordered by occurrence within a week.
//!
//! # Example
//!
//! ```rust
//! use labor_market_core_rs::models::{Event, EventLog};
//!
//! let mut log = EventLog::new();
//! log.log(Event::Separation {
//!     week: 3,
//!     worker: 17,
//!     skill_level: 4.0,
//!     eligibility: 6.0,
//! });
//!
//! assert_eq!(log.events_at_week(3).len(), 1);
//! assert_eq!(log.events_for_worker(17)[0].event_type(), "Separation");
//! ```

use crate::models::state::WorkerId;
use crate::policy::AcceptReason;
use serde::{Deserialize, Serialize};

/// Simulation event capturing a state change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Employed worker lost their job
    Separation {
        week: usize,
        worker: WorkerId,
        skill_level: f64,
        /// Entitlement carried into the unemployment spell
        eligibility: f64,
    },

    /// Unemployed worker filled a vacancy
    Hire {
        week: usize,
        worker: WorkerId,
        reason: AcceptReason,
        /// Entitlement at the moment of acceptance
        eligibility: f64,
        /// Benefit weeks at the moment of acceptance
        benefit_weeks: u32,
        /// Failed trials spent on this vacancy before the match
        failed_trials: u32,
    },

    /// Vacancy exhausted its trials (or the pool) and carries over
    VacancyUnfilled {
        week: usize,
        failed_trials: u32,
        /// Unemployed candidates left when the vacancy gave up
        pool_size: usize,
    },

    /// All phases of the week completed
    WeekCompleted {
        week: usize,
        unemployment_rate: f64,
        gini_coefficient: f64,
        vacancies_carried_over: usize,
    },
}

impl Event {
    /// Week the event occurred in
    pub fn week(&self) -> usize {
        match self {
            Event::Separation { week, .. } => *week,
            Event::Hire { week, .. } => *week,
            Event::VacancyUnfilled { week, .. } => *week,
            Event::WeekCompleted { week, .. } => *week,
        }
    }

    /// Get a short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::Separation { .. } => "Separation",
            Event::Hire { .. } => "Hire",
            Event::VacancyUnfilled { .. } => "VacancyUnfilled",
            Event::WeekCompleted { .. } => "WeekCompleted",
        }
    }

    /// Worker the event concerns, if any
    pub fn worker(&self) -> Option<WorkerId> {
        match self {
            Event::Separation { worker, .. } => Some(*worker),
            Event::Hire { worker, .. } => Some(*worker),
            Event::VacancyUnfilled { .. } | Event::WeekCompleted { .. } => None,
        }
    }
}

/// Append-only log of simulation events
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Get the number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get all events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events for a specific week
    pub fn events_at_week(&self, week: usize) -> Vec<&Event> {
        self.events.iter().filter(|e| e.week() == week).collect()
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Get events for a specific worker
    pub fn events_for_worker(&self, worker: WorkerId) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.worker() == Some(worker))
            .collect()
    }

    /// Clear all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
