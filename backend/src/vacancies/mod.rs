//! Exogenous vacancy schedule.
//!
//! The schedule is the weekly labor-demand curve that drives separation and
//! hiring volume. It is built once at setup and never mutated.
//!
//! # Shape
//!
//! For weeks counted from 1:
//!
//! ```text
//! weeks  1-19   flat at labor_force * initial
//! weeks 20-29   step down by ((initial - target) / 11) * labor_force per week
//! weeks 30-40   flat at labor_force * target
//! weeks 41-50   step back up by the same amount per week
//! weeks 51..    flat at labor_force * initial
//! ```
//!
//! The weekly cycle only consumes the first difference between consecutive
//! weeks (see [`VacancySchedule::demand_change`]).
//!
//! # Example
//!
//! ```
//! use labor_market_core_rs::vacancies::VacancySchedule;
//!
//! let schedule = VacancySchedule::build(1000, 0.95, 0.90, 70);
//! assert_eq!(schedule.len(), 70);
//! assert!((schedule.level(1).unwrap() - 950.0).abs() < 1e-9);
//! assert!((schedule.level(35).unwrap() - 900.0).abs() < 1e-9);
//! assert_eq!(schedule.demand_change(1), 0.0);
//! ```

use serde::{Deserialize, Serialize};

/// First week of the decline ramp.
const DECLINE_START: usize = 20;
/// First week of the trough.
const TROUGH_START: usize = 30;
/// First week of the recovery ramp.
const RECOVERY_START: usize = 41;
/// First week back at the initial level.
const PLATEAU_START: usize = 51;
/// Number of ramp steps used to compute the weekly increment.
const RAMP_DIVISOR: f64 = 11.0;

/// Weekly vacancy levels, indexed by 1-based week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VacancySchedule {
    levels: Vec<f64>,
}

impl VacancySchedule {
    /// Build the piecewise schedule for a run of `steps` weeks.
    ///
    /// Ramps are cumulative: each ramp week is the previous week's value
    /// plus or minus the fixed increment, so rounding follows the same path
    /// as a week-by-week construction.
    pub fn build(labor_force: usize, initial: f64, target: f64, steps: usize) -> Self {
        let labor_force = labor_force as f64;
        let high = labor_force * initial;
        let low = labor_force * target;
        let increment = ((initial - target) / RAMP_DIVISOR) * labor_force;

        let mut levels: Vec<f64> = Vec::with_capacity(steps);
        for week in 1..=steps {
            let previous = levels.last().copied().unwrap_or(high);
            let level = if week < DECLINE_START {
                high
            } else if week < TROUGH_START {
                previous - increment
            } else if week < RECOVERY_START {
                low
            } else if week < PLATEAU_START {
                previous + increment
            } else {
                high
            };
            levels.push(level);
        }

        Self { levels }
    }

    /// Build a schedule from explicit levels (week 1 first).
    pub fn from_levels(levels: Vec<f64>) -> Self {
        Self { levels }
    }

    /// Vacancy level in `week` (1-based), or `None` outside the schedule.
    pub fn level(&self, week: usize) -> Option<f64> {
        week.checked_sub(1).and_then(|idx| self.levels.get(idx)).copied()
    }

    /// Change in demand entering `week`: `level(week) - level(week - 1)`.
    ///
    /// Defined as 0 for week 1 and for any week outside the schedule.
    pub fn demand_change(&self, week: usize) -> f64 {
        if week <= 1 {
            return 0.0;
        }
        match (self.level(week), self.level(week - 1)) {
            (Some(current), Some(previous)) => current - previous,
            _ => 0.0,
        }
    }

    /// Number of weeks covered
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// True if the schedule covers no weeks
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// All levels, week 1 first
    pub fn as_slice(&self) -> &[f64] {
        &self.levels
    }
}
