//! Orchestrator Engine
//!
//! The weekly update cycle. Owns the worker population, the vacancy
//! schedule, the carried-over vacancy counter and the single RNG, and moves
//! every worker through five ordered phases per week:
//!
//! ```text
//! For each week t:
//! 1. Separation   - lay off workers (uniform or skill-weighted)
//! 2. Hiring       - offer each open vacancy to drawn candidates, up to
//!                   10 failed trials; unfilled vacancies carry over
//! 3. Eligibility  - decay entitlement while unemployed, re-accrue while employed
//! 4. Wealth/skill - apply each worker's income rules
//! 5. Recording    - unemployment rate and wealth Gini
//! ```
//!
//! # Example
//!
//! ```rust
//! use labor_market_core_rs::orchestrator::{LaborMarket, ModelConfig};
//!
//! let mut config = ModelConfig::new(7, 100, 0.05, 0.95, 0.90);
//! config.steps = 10;
//!
//! let mut model = LaborMarket::new(config).unwrap();
//! let weeks = model.run().unwrap();
//!
//! assert_eq!(weeks.len(), 10);
//! assert_eq!(model.history().len(), 10);
//! assert!(model.is_finished());
//! ```

use crate::core::time::TimeManager;
use crate::metrics::{gini_coefficient, unemployment_rate, MetricsHistory, MetricsRecorder, WeeklyRecord};
use crate::models::event::{Event, EventLog};
use crate::models::state::{Population, WorkerId};
use crate::models::worker::{IncomeRules, Worker, MAX_ELIGIBILITY};
use crate::policy::{
    AlmpPolicy, CandidatePool, DirectPlacementPolicy, EntitlementPolicy, LockInRejection,
    MatchingPolicy, OfferOutcome, SelectionWeighting, MAX_FAILED_TRIALS,
};
use crate::rng::{sample_indices, weighted_sample_indices, RngManager};
use crate::vacancies::VacancySchedule;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

// ============================================================================
// Configuration Types
// ============================================================================

fn default_hiring_factor() -> f64 {
    1.0
}

fn default_steps() -> usize {
    70
}

fn default_skill_income_factor() -> f64 {
    0.03
}

fn default_threat_factor() -> f64 {
    1.0
}

/// Which labor market model to run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelVariant {
    /// No unemployment insurance: uniform layoffs, one-shot hiring,
    /// no entitlement, no carried-over vacancies
    Plain,

    /// Unemployment insurance with eligibility, benefits and the optional
    /// active labor market policy
    #[default]
    Insurance,
}

impl ModelVariant {
    /// Eligible unemployed workers receive benefits
    pub fn pays_benefits(self) -> bool {
        self == ModelVariant::Insurance
    }

    /// Unfilled vacancies persist into the next week
    pub fn carries_vacancies(self) -> bool {
        self == ModelVariant::Insurance
    }

    /// Weighting used to pick workers for layoff
    pub fn separation_weighting(self) -> SelectionWeighting {
        match self {
            ModelVariant::Plain => SelectionWeighting::Uniform,
            ModelVariant::Insurance => SelectionWeighting::Skill,
        }
    }
}

/// Complete model configuration
///
/// Required fields: `seed`, `labor_force`, `separation_rate`, `initial`,
/// `target`. Everything else has a default when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// RNG seed for deterministic simulation
    pub seed: u64,

    /// Number of workers
    pub labor_force: usize,

    /// Weekly fraction of employed workers who leave their job
    pub separation_rate: f64,

    /// Initial employment fraction (also the schedule's high level)
    pub initial: f64,

    /// Employment fraction at the bottom of the demand dip
    pub target: f64,

    /// Scale applied to the weekly change in demand
    #[serde(default = "default_hiring_factor")]
    pub hiring_factor: f64,

    /// Number of weeks to simulate
    #[serde(default = "default_steps")]
    pub steps: usize,

    /// Enable the active labor market policy
    #[serde(default)]
    pub almp: bool,

    /// Extra weekly income per unit of skill under ALMP
    #[serde(default = "default_skill_income_factor")]
    pub skill_income_factor: f64,

    /// Accepted and validated but has no effect on the dynamics
    #[serde(default = "default_threat_factor")]
    pub threat_factor: f64,

    /// Spread eligibility over every worker before choosing who starts employed
    #[serde(default)]
    pub rolling_initial_eligibility: bool,

    /// Starting wealth of every worker
    #[serde(default)]
    pub initial_wealth: f64,

    /// Model variant
    #[serde(default)]
    pub variant: ModelVariant,

    /// How lock-in refusals are charged under ALMP
    #[serde(default)]
    pub lock_in_rejection: LockInRejection,
}

impl ModelConfig {
    /// Configuration with every optional field at its default
    pub fn new(seed: u64, labor_force: usize, separation_rate: f64, initial: f64, target: f64) -> Self {
        Self {
            seed,
            labor_force,
            separation_rate,
            initial,
            target,
            hiring_factor: default_hiring_factor(),
            steps: default_steps(),
            almp: false,
            skill_income_factor: default_skill_income_factor(),
            threat_factor: default_threat_factor(),
            rolling_initial_eligibility: false,
            initial_wealth: 0.0,
            variant: ModelVariant::default(),
            lock_in_rejection: LockInRejection::default(),
        }
    }

    /// Reject values outside their documented ranges
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.labor_force == 0 {
            return Err(SimulationError::InvalidConfig(
                "labor_force must be > 0".to_string(),
            ));
        }

        if self.steps == 0 {
            return Err(SimulationError::InvalidConfig(
                "steps must be > 0".to_string(),
            ));
        }

        for (name, value) in [
            ("separation_rate", self.separation_rate),
            ("initial", self.initial),
            ("target", self.target),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SimulationError::InvalidConfig(format!(
                    "{} must be in [0, 1], got {}",
                    name, value
                )));
            }
        }

        for (name, value) in [
            ("hiring_factor", self.hiring_factor),
            ("skill_income_factor", self.skill_income_factor),
            ("initial_wealth", self.initial_wealth),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SimulationError::InvalidConfig(format!(
                    "{} must be finite and >= 0, got {}",
                    name, value
                )));
            }
        }

        if !self.threat_factor.is_finite() {
            return Err(SimulationError::InvalidConfig(format!(
                "threat_factor must be finite, got {}",
                self.threat_factor
            )));
        }

        if self.almp && self.variant == ModelVariant::Plain {
            return Err(SimulationError::InvalidConfig(
                "almp requires the insurance variant".to_string(),
            ));
        }

        Ok(())
    }

    /// Income rules implied by the variant and ALMP flag
    pub fn income_rules(&self) -> IncomeRules {
        IncomeRules {
            benefits: self.variant.pays_benefits(),
            almp: self.almp,
            skill_income_factor: self.skill_income_factor,
        }
    }

    /// Matching policy for the hiring phase
    pub(crate) fn matching_policy(&self) -> Box<dyn MatchingPolicy> {
        match (self.variant, self.almp) {
            (ModelVariant::Plain, _) => Box::new(DirectPlacementPolicy),
            (ModelVariant::Insurance, false) => Box::new(EntitlementPolicy),
            (ModelVariant::Insurance, true) => Box::new(AlmpPolicy::new(self.lock_in_rejection)),
        }
    }

    /// Vacancy schedule for this configuration
    pub fn vacancy_schedule(&self) -> VacancySchedule {
        VacancySchedule::build(self.labor_force, self.initial, self.target, self.steps)
    }
}

// ============================================================================
// Results and Errors
// ============================================================================

/// Summary of a single week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekResult {
    /// Week number (1-based)
    pub week: usize,

    /// Workers laid off this week
    pub separations: usize,

    /// Vacancies filled this week
    pub hires: usize,

    /// Vacancies that exhausted their trials (or the pool)
    pub unfilled_vacancies: usize,

    /// Vacancies carried into next week
    pub vacancies_carried_over: usize,

    /// Employed workers at the end of the week
    pub employed: usize,

    /// Unemployed workers at the end of the week
    pub unemployed: usize,

    /// Percent unemployed at the end of the week
    pub unemployment_rate: f64,

    /// Wealth Gini at the end of the week
    pub gini_coefficient: f64,
}

/// Simulation error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Configuration validation error
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Worker index outside the population
    #[error("Worker not found: {0}")]
    WorkerNotFound(WorkerId),

    /// Every configured week has already run
    #[error("Simulation complete: all {0} weeks executed")]
    SimulationComplete(usize),

    /// Checkpoint (de)serialization failed
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Checkpoint was taken under a different configuration
    #[error("Config mismatch: snapshot hash {expected}, config hash {actual}")]
    ConfigMismatch { expected: String, actual: String },

    /// Checkpoint content violates a model invariant
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Counts from the hiring phase
struct HiringOutcome {
    hires: usize,
    unfilled: usize,
}

// ============================================================================
// LaborMarket
// ============================================================================

/// Weekly update cycle owning all model state
///
/// # Determinism
///
/// All randomness goes through `rng_manager` (seeded xorshift64*), and the
/// draw order within a week is fixed: separation picks, then per-vacancy
/// candidate draws and acceptance coin-flips in vacancy order.
/// Same config = identical results.
pub struct LaborMarket {
    /// Configuration the model was built from
    config: ModelConfig,

    /// Worker population
    population: Population,

    /// Exogenous demand curve
    schedule: VacancySchedule,

    /// Week counter
    time_manager: TimeManager,

    /// Deterministic RNG
    rng_manager: RngManager,

    /// Hiring-phase decision rules
    matching_policy: Box<dyn MatchingPolicy>,

    /// Unfilled vacancies from earlier weeks
    vacancies_carried_over: usize,

    /// Recorded weekly aggregates
    history: MetricsHistory,

    /// Event log (all simulation events)
    event_log: EventLog,
}

impl LaborMarket {
    /// Create a model from configuration
    ///
    /// Validates the configuration, builds the vacancy schedule and sets up
    /// the population (skills, initial employment and eligibility) from the
    /// seeded RNG.
    pub fn new(config: ModelConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        if config.threat_factor != default_threat_factor() {
            warn!(
                threat_factor = config.threat_factor,
                "threat_factor has no effect on the simulation"
            );
        }

        let mut rng_manager = RngManager::new(config.seed);
        let population = initialize_population(&config, &mut rng_manager);

        info!(
            seed = config.seed,
            labor_force = config.labor_force,
            steps = config.steps,
            variant = ?config.variant,
            almp = config.almp,
            employed = population.employed_count(),
            "Labor market initialized"
        );

        Ok(Self::from_parts(
            config,
            population,
            0,
            rng_manager,
            0,
            MetricsHistory::new(),
        ))
    }

    /// Assemble a model from already-validated parts
    pub(crate) fn from_parts(
        config: ModelConfig,
        population: Population,
        current_week: usize,
        rng_manager: RngManager,
        vacancies_carried_over: usize,
        history: MetricsHistory,
    ) -> Self {
        let schedule = config.vacancy_schedule();
        let matching_policy = config.matching_policy();

        Self {
            time_manager: TimeManager::at_week(current_week, config.steps),
            config,
            population,
            schedule,
            rng_manager,
            matching_policy,
            vacancies_carried_over,
            history,
            event_log: EventLog::new(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Last executed week (0 before the first step)
    pub fn current_week(&self) -> usize {
        self.time_manager.current_week()
    }

    /// True once every configured week has run
    pub fn is_finished(&self) -> bool {
        self.time_manager.is_finished()
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn schedule(&self) -> &VacancySchedule {
        &self.schedule
    }

    pub fn vacancies_carried_over(&self) -> usize {
        self.vacancies_carried_over
    }

    /// Recorded weekly aggregates
    pub fn history(&self) -> &MetricsHistory {
        &self.history
    }

    /// Get reference to event log
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Name of the active matching policy
    pub fn matching_policy_name(&self) -> &'static str {
        self.matching_policy.name()
    }

    /// Current RNG state (for checkpointing)
    pub fn rng_state(&self) -> u64 {
        self.rng_manager.get_state()
    }

    /// Unemployment rate of the current population
    pub fn unemployment_rate(&self) -> f64 {
        unemployment_rate(&self.population)
    }

    /// Wealth Gini of the current population
    pub fn gini_coefficient(&self) -> f64 {
        gini_coefficient(&self.population.wealth_distribution())
    }

    // ========================================================================
    // Weekly Cycle
    // ========================================================================

    /// Execute one week
    ///
    /// # Returns
    ///
    /// * `Ok(WeekResult)` - Week executed and recorded
    /// * `Err(SimulationError::SimulationComplete)` - No weeks left
    pub fn step(&mut self) -> Result<WeekResult, SimulationError> {
        if self.time_manager.is_finished() {
            return Err(SimulationError::SimulationComplete(
                self.time_manager.total_weeks(),
            ));
        }

        let week = self.time_manager.advance_week();

        let leavs = self.config.separation_rate * self.population.employed_count() as f64;
        let difemp = (self.schedule.demand_change(week) * self.config.hiring_factor).trunc();

        let separations_target = if difemp < 0.0 {
            (leavs - difemp).floor()
        } else {
            leavs.floor()
        };
        let hires_target = if difemp > 0.0 {
            (leavs + difemp).floor()
        } else {
            leavs.floor()
        };

        // PHASE 1: SEPARATION
        let separations = self.separate(week, separations_target.max(0.0) as usize)?;

        // PHASE 2: HIRING
        let open_vacancies = hires_target.max(0.0) as usize + self.vacancies_carried_over;
        self.vacancies_carried_over = 0;
        let hiring = self.hire(week, open_vacancies)?;
        if self.config.variant.carries_vacancies() {
            self.vacancies_carried_over = hiring.unfilled;
        }

        // PHASE 3: ELIGIBILITY
        if self.config.variant.pays_benefits() {
            self.population.iter_mut().for_each(Worker::update_eligibility);
        }

        // PHASE 4: WEALTH / SKILL
        let rules = self.config.income_rules();
        for worker in self.population.iter_mut() {
            worker.accrue_wealth(&rules);
        }

        // PHASE 5: RECORDING
        let record = WeeklyRecord {
            t: week,
            unemployment_rate: self.unemployment_rate(),
            gini_coefficient: self.gini_coefficient(),
        };
        self.history.record(record);
        self.event_log.log(Event::WeekCompleted {
            week,
            unemployment_rate: record.unemployment_rate,
            gini_coefficient: record.gini_coefficient,
            vacancies_carried_over: self.vacancies_carried_over,
        });

        info!(
            week,
            unemployment_rate = record.unemployment_rate,
            gini = record.gini_coefficient,
            carried_over = self.vacancies_carried_over,
            "Week completed"
        );

        let employed = self.population.employed_count();
        Ok(WeekResult {
            week,
            separations,
            hires: hiring.hires,
            unfilled_vacancies: hiring.unfilled,
            vacancies_carried_over: self.vacancies_carried_over,
            employed,
            unemployed: self.population.len() - employed,
            unemployment_rate: record.unemployment_rate,
            gini_coefficient: record.gini_coefficient,
        })
    }

    /// Run every remaining week
    pub fn run(&mut self) -> Result<Vec<WeekResult>, SimulationError> {
        let mut weeks = Vec::with_capacity(self.time_manager.remaining_weeks());
        while !self.time_manager.is_finished() {
            weeks.push(self.step()?);
        }
        Ok(weeks)
    }

    /// Run every remaining week, also pushing each record to `recorder`
    pub fn run_with<R: MetricsRecorder + ?Sized>(
        &mut self,
        recorder: &mut R,
    ) -> Result<Vec<WeekResult>, SimulationError> {
        let mut weeks = Vec::with_capacity(self.time_manager.remaining_weeks());
        while !self.time_manager.is_finished() {
            let result = self.step()?;
            recorder.record(WeeklyRecord {
                t: result.week,
                unemployment_rate: result.unemployment_rate,
                gini_coefficient: result.gini_coefficient,
            });
            weeks.push(result);
        }
        Ok(weeks)
    }

    /// Phase 1: lay off up to `target` employed workers
    fn separate(&mut self, week: usize, target: usize) -> Result<usize, SimulationError> {
        if target == 0 {
            return Ok(0);
        }

        let employed = self.population.employed_ids();
        if target > employed.len() {
            warn!(
                week,
                target,
                employed = employed.len(),
                "Separation target exceeds employed pool; clamping"
            );
        }

        let picks = match self.config.variant.separation_weighting() {
            SelectionWeighting::Uniform => {
                sample_indices(&mut self.rng_manager, employed.len(), target)
            }
            SelectionWeighting::Skill => {
                let weights = self.population.skill_weights(&employed);
                weighted_sample_indices(&mut self.rng_manager, &weights, target)
            }
        };

        for pick in &picks {
            let id = employed[*pick];
            let worker = self
                .population
                .get_mut(id)
                .ok_or(SimulationError::WorkerNotFound(id))?;
            worker.separate(week);

            self.event_log.log(Event::Separation {
                week,
                worker: id,
                skill_level: worker.skill_level(),
                eligibility: worker.initial_eligibility(),
            });
        }

        debug!(week, separations = picks.len(), "Separation phase done");
        Ok(picks.len())
    }

    /// Phase 2: offer `open` vacancies to the candidate pool
    fn hire(&mut self, week: usize, open: usize) -> Result<HiringOutcome, SimulationError> {
        let candidates: Vec<WorkerId> = self
            .population
            .unemployed_ids()
            .into_iter()
            .filter(|id| {
                self.population
                    .get(*id)
                    .is_some_and(|w| self.matching_policy.admits(w, week))
            })
            .collect();
        let mut pool = CandidatePool::new(&self.population, candidates);

        let mut outcome = HiringOutcome {
            hires: 0,
            unfilled: 0,
        };

        for _ in 0..open {
            if self.fill_vacancy(week, &mut pool)? {
                outcome.hires += 1;
            } else {
                outcome.unfilled += 1;
            }
        }

        debug!(
            week,
            open,
            hires = outcome.hires,
            unfilled = outcome.unfilled,
            policy = self.matching_policy.name(),
            "Hiring phase done"
        );
        Ok(outcome)
    }

    /// Offer one vacancy until a candidate accepts or trials run out
    ///
    /// Returns true if the vacancy was filled.
    fn fill_vacancy(&mut self, week: usize, pool: &mut CandidatePool) -> Result<bool, SimulationError> {
        let mut failed_trials = 0;

        while failed_trials < MAX_FAILED_TRIALS {
            if pool.is_empty()
                || !self
                    .matching_policy
                    .can_progress(&self.population, pool, week)
            {
                break;
            }

            let Some(position) = self.matching_policy.draw_candidate(pool, &mut self.rng_manager)
            else {
                break;
            };
            let id = pool
                .worker_at(position)
                .ok_or(SimulationError::WorkerNotFound(position))?;
            let worker = self
                .population
                .get(id)
                .ok_or(SimulationError::WorkerNotFound(id))?;

            match self
                .matching_policy
                .evaluate_offer(worker, week, &mut self.rng_manager)
            {
                OfferOutcome::Accept(reason) => {
                    let event = Event::Hire {
                        week,
                        worker: id,
                        reason,
                        eligibility: worker.eligibility(),
                        benefit_weeks: worker.benefit_weeks(),
                        failed_trials,
                    };
                    self.population
                        .get_mut(id)
                        .ok_or(SimulationError::WorkerNotFound(id))?
                        .hire();
                    pool.remove(position);
                    self.event_log.log(event);
                    return Ok(true);
                }
                OfferOutcome::Reject {
                    counts_as_failure: true,
                } => failed_trials += 1,
                OfferOutcome::Reject {
                    counts_as_failure: false,
                } => {}
            }
        }

        self.event_log.log(Event::VacancyUnfilled {
            week,
            failed_trials,
            pool_size: pool.len(),
        });
        Ok(false)
    }
}

// ============================================================================
// Population Setup
// ============================================================================

/// Number of distinct initial eligibility values (0 through 6)
const ELIGIBILITY_CYCLE: usize = 7;

/// Create the population: skills, initial employment and eligibility
///
/// `floor(labor_force * initial)` workers start employed. Under the
/// insurance variant the employed start with full entitlement and the
/// unemployed get `0, 1, ..., 6, 0, ...` in index order; with
/// `rolling_initial_eligibility` that cycle is laid over every worker before
/// the employed set is drawn.
fn initialize_population(config: &ModelConfig, rng: &mut RngManager) -> Population {
    let mut workers: Vec<Worker> = (0..config.labor_force)
        .map(|_| Worker::new(rng.range(1, 11) as f64, config.initial_wealth))
        .collect();

    let initially_employed =
        ((config.labor_force as f64 * config.initial).floor() as usize).min(config.labor_force);

    let cycle_eligibility = |n: usize| (n % ELIGIBILITY_CYCLE) as f64;

    match (config.variant, config.rolling_initial_eligibility) {
        (ModelVariant::Plain, _) => {
            for id in sample_indices(rng, config.labor_force, initially_employed) {
                workers[id].set_employed(true);
                workers[id].mark_initially_employed();
            }
        }
        (ModelVariant::Insurance, false) => {
            for id in sample_indices(rng, config.labor_force, initially_employed) {
                workers[id].set_employed(true);
                workers[id].mark_initially_employed();
                workers[id].set_eligibility(MAX_ELIGIBILITY);
            }
            for (n, worker) in workers.iter_mut().filter(|w| !w.is_employed()).enumerate() {
                worker.set_eligibility(cycle_eligibility(n));
            }
        }
        (ModelVariant::Insurance, true) => {
            for (n, worker) in workers.iter_mut().enumerate() {
                worker.set_eligibility(cycle_eligibility(n));
            }
            for id in sample_indices(rng, config.labor_force, initially_employed) {
                workers[id].set_employed(true);
                workers[id].mark_initially_employed();
            }
        }
    }

    Population::new(workers)
}
