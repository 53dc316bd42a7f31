//! Time management for the simulation
//!
//! The simulation advances in discrete weeks, 1-indexed to match the
//! vacancy schedule. Week 0 means "set up, nothing executed yet".

use serde::{Deserialize, Serialize};

/// Tracks the current week and the configured run length
///
/// # Example
/// ```
/// use labor_market_core_rs::TimeManager;
///
/// let mut time = TimeManager::new(3);
/// assert_eq!(time.current_week(), 0);
///
/// time.advance_week();
/// assert_eq!(time.current_week(), 1);
/// assert_eq!(time.remaining_weeks(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeManager {
    /// Last week that was started (0 before the first step)
    current_week: usize,
    /// Total weeks in the run
    total_weeks: usize,
}

impl TimeManager {
    /// Create a clock for a run of `total_weeks` weeks
    pub fn new(total_weeks: usize) -> Self {
        Self {
            current_week: 0,
            total_weeks,
        }
    }

    /// Restore a clock positioned at `current_week` (used by checkpoints)
    pub(crate) fn at_week(current_week: usize, total_weeks: usize) -> Self {
        Self {
            current_week,
            total_weeks,
        }
    }

    /// Move to the next week and return its index
    pub fn advance_week(&mut self) -> usize {
        self.current_week += 1;
        self.current_week
    }

    /// Index of the week most recently started
    pub fn current_week(&self) -> usize {
        self.current_week
    }

    /// Index the next call to [`advance_week`](Self::advance_week) will return
    pub fn next_week(&self) -> usize {
        self.current_week + 1
    }

    /// Configured run length
    pub fn total_weeks(&self) -> usize {
        self.total_weeks
    }

    /// Weeks left to execute
    pub fn remaining_weeks(&self) -> usize {
        self.total_weeks.saturating_sub(self.current_week)
    }

    /// True once every configured week has been executed
    ///
    /// # Example
    /// ```
    /// use labor_market_core_rs::TimeManager;
    ///
    /// let mut time = TimeManager::new(1);
    /// assert!(!time.is_finished());
    /// time.advance_week();
    /// assert!(time.is_finished());
    /// ```
    pub fn is_finished(&self) -> bool {
        self.current_week >= self.total_weeks
    }
}
