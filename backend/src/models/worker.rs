//! Worker model
//!
//! One worker per labor-force member. A worker carries its employment
//! status, unemployment-benefit entitlement, skill and accumulated wealth,
//! and applies its own weekly income rules once the cycle has fixed its
//! status for the week.
//!
//! # Critical Invariants
//!
//! 1. `eligibility` stays in `[0, MAX_ELIGIBILITY]`
//! 2. `wealth` and `skill_level` never decrease
//! 3. `benefit_weeks` is 0 whenever the worker is employed after accrual

use serde::{Deserialize, Serialize};

/// Upper bound on benefit entitlement, in weeks
pub const MAX_ELIGIBILITY: f64 = 6.0;

/// Entitlement re-earned per week of employment
pub const ELIGIBILITY_ACCRUAL: f64 = 1.0 / 3.0;

/// Weekly income while employed
pub const BASE_INCOME: f64 = 2.0;

/// Weekly unemployment benefit
pub const BENEFIT_INCOME: f64 = 0.5;

/// Benefit weeks after which a worker is in the lock-in period
pub const LOCK_IN_WEEKS: u32 = 3;

/// Skill gained per lock-in week of training under ALMP
pub const TRAINING_SKILL_GAIN: f64 = 0.5;

/// Skill gained per week of employment under ALMP
pub const ON_THE_JOB_SKILL_GAIN: f64 = 1.0;

/// Income rules in force for a run
///
/// # Example
/// ```
/// use labor_market_core_rs::models::worker::{IncomeRules, Worker};
///
/// let rules = IncomeRules { benefits: true, almp: true, skill_income_factor: 0.03 };
/// let mut worker = Worker::new(5.0, 0.0);
/// worker.set_employed(true);
/// worker.accrue_wealth(&rules);
///
/// assert!((worker.wealth() - (2.0 + 0.03 * 5.0)).abs() < 1e-12);
/// assert_eq!(worker.skill_level(), 6.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncomeRules {
    /// Unemployment insurance pays benefits to eligible unemployed workers
    pub benefits: bool,
    /// Active labor market policy: skill-based income and training
    pub almp: bool,
    /// Extra weekly income per unit of skill under ALMP
    pub skill_income_factor: f64,
}

/// A single labor-force member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    /// Current employment status
    employed: bool,

    /// Week of the most recent separation, cleared on rehire
    separated_in_week: Option<usize>,

    /// Remaining weeks of benefit entitlement (fractional)
    eligibility: f64,

    /// Consecutive weeks currently receiving benefits
    benefit_weeks: u32,

    /// Eligibility at the moment of the last separation
    initial_eligibility: f64,

    /// Productivity proxy; grows only under ALMP
    skill_level: f64,

    /// Cumulative resources
    wealth: f64,

    /// Employed when the population was set up
    initially_employed: bool,
}

impl Worker {
    /// Create an unemployed worker with no entitlement
    pub fn new(skill_level: f64, initial_wealth: f64) -> Self {
        Self {
            employed: false,
            separated_in_week: None,
            eligibility: 0.0,
            benefit_weeks: 0,
            initial_eligibility: 0.0,
            skill_level,
            wealth: initial_wealth,
            initially_employed: false,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn is_employed(&self) -> bool {
        self.employed
    }

    pub fn separated_in_week(&self) -> Option<usize> {
        self.separated_in_week
    }

    pub fn eligibility(&self) -> f64 {
        self.eligibility
    }

    pub fn benefit_weeks(&self) -> u32 {
        self.benefit_weeks
    }

    pub fn initial_eligibility(&self) -> f64 {
        self.initial_eligibility
    }

    pub fn skill_level(&self) -> f64 {
        self.skill_level
    }

    pub fn wealth(&self) -> f64 {
        self.wealth
    }

    pub fn initially_employed(&self) -> bool {
        self.initially_employed
    }

    /// True if the worker lost their job in `week`
    pub fn was_separated_in(&self, week: usize) -> bool {
        self.separated_in_week == Some(week)
    }

    /// Unemployed with entitlement left
    pub fn is_receiving_benefits(&self) -> bool {
        !self.employed && self.eligibility > 0.0
    }

    /// Past the lock-in threshold of consecutive benefit weeks
    pub fn is_locked_in(&self) -> bool {
        self.benefit_weeks >= LOCK_IN_WEEKS
    }

    // ========================================================================
    // Setup
    // ========================================================================

    /// Set employment status during population setup
    pub fn set_employed(&mut self, employed: bool) {
        self.employed = employed;
        self.separated_in_week = None;
    }

    /// Mark as part of the initially employed cohort
    pub fn mark_initially_employed(&mut self) {
        self.initially_employed = true;
    }

    /// Set the entitlement, clamped to `[0, MAX_ELIGIBILITY]`
    pub fn set_eligibility(&mut self, eligibility: f64) {
        self.eligibility = eligibility.clamp(0.0, MAX_ELIGIBILITY);
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Employed -> unemployed in `week`
    ///
    /// Caps entitlement and snapshots it as the initial eligibility of this
    /// unemployment spell.
    pub fn separate(&mut self, week: usize) {
        self.employed = false;
        self.separated_in_week = Some(week);
        self.eligibility = self.eligibility.min(MAX_ELIGIBILITY);
        self.initial_eligibility = self.eligibility;
    }

    /// Unemployed -> employed
    pub fn hire(&mut self) {
        self.employed = true;
        self.separated_in_week = None;
        self.benefit_weeks = 0;
    }

    /// Weekly entitlement decay (unemployed) or re-accrual (employed)
    pub fn update_eligibility(&mut self) {
        self.eligibility = if self.employed {
            (self.eligibility + ELIGIBILITY_ACCRUAL).min(MAX_ELIGIBILITY)
        } else {
            (self.eligibility - 1.0).max(0.0)
        };
    }

    /// Apply this week's income and skill rules
    ///
    /// Employed workers earn the base wage (plus skill income and on-the-job
    /// skill growth under ALMP). Unemployed workers with entitlement draw
    /// benefits when `rules.benefits` is set, and train after the lock-in
    /// threshold under ALMP. Everyone else is unchanged.
    pub fn accrue_wealth(&mut self, rules: &IncomeRules) {
        if self.employed {
            self.wealth += BASE_INCOME;
            if rules.almp {
                self.wealth += rules.skill_income_factor * self.skill_level;
                self.skill_level += ON_THE_JOB_SKILL_GAIN;
            }
            self.benefit_weeks = 0;
        } else if rules.benefits && self.eligibility > 0.0 {
            self.wealth += BENEFIT_INCOME;
            self.benefit_weeks += 1;
            if rules.almp && self.benefit_weeks >= LOCK_IN_WEEKS {
                self.skill_level += TRAINING_SKILL_GAIN;
            }
        }
    }
}
