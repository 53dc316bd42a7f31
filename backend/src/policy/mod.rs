//! Matching Policy Module
//!
//! This module defines how job seekers are matched to open vacancies during
//! the hiring phase of the weekly cycle.
//!
//! # Overview
//!
//! Each open vacancy is offered to candidates drawn from the unemployed pool
//! until one accepts or the vacancy runs out of trials. A policy answers
//! three questions:
//! - Who is in the candidate pool this week?
//! - How is the next candidate drawn (uniformly, or weighted by skill)?
//! - Does the drawn candidate accept, and if not, does the refusal count
//!   against the vacancy's trial budget?
//!
//! The retry loop itself lives in the orchestrator; policies only decide.
//!
//! # Policy Interface
//!
//! All policies implement the `MatchingPolicy` trait:
//! ```rust
//! use labor_market_core_rs::policy::{AcceptReason, CandidatePool, MatchingPolicy, OfferOutcome};
//! use labor_market_core_rs::{RngManager, Worker};
//!
//! struct TakeAnyone;
//!
//! impl MatchingPolicy for TakeAnyone {
//!     fn name(&self) -> &'static str {
//!         "TakeAnyone"
//!     }
//!
//!     fn draw_candidate(&self, pool: &CandidatePool, rng: &mut RngManager) -> Option<usize> {
//!         rng.index(pool.len())
//!     }
//!
//!     fn evaluate_offer(&self, _worker: &Worker, _week: usize, _rng: &mut RngManager) -> OfferOutcome {
//!         OfferOutcome::Accept(AcceptReason::DirectPlacement)
//!     }
//! }
//! ```
//!
//! Available policies:
//! 1. **DirectPlacementPolicy**: plain model, anyone not laid off this week takes the job
//! 2. **EntitlementPolicy**: UI model without ALMP, only workers with little
//!    entitlement left accept
//! 3. **AlmpPolicy**: skill-weighted draws with the lock-in and 5% acceptance rules

use crate::models::{Population, Worker, WorkerId};
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};

pub mod almp;
pub mod direct;
pub mod entitlement;

pub use almp::AlmpPolicy;
pub use direct::DirectPlacementPolicy;
pub use entitlement::EntitlementPolicy;

/// Maximum failed trials before a vacancy is carried over
pub const MAX_FAILED_TRIALS: u32 = 10;

/// Why a candidate accepted an offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AcceptReason {
    /// Entitlement about to run out (eligibility <= 1)
    BenefitsExpiring,
    /// Accepted the offer voluntarily through the low-probability branch
    VoluntaryAcceptance,
    /// Entitlement below the acceptance threshold (UI model without ALMP)
    LowEntitlement,
    /// Plain model: every available candidate accepts
    DirectPlacement,
}

/// Result of offering a vacancy to one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferOutcome {
    /// Candidate takes the job
    Accept(AcceptReason),
    /// Candidate declines; `counts_as_failure` charges the vacancy a trial
    Reject { counts_as_failure: bool },
}

/// How lock-in refusals are charged against a vacancy's trial budget
///
/// With `Uncounted`, a candidate in the lock-in period refuses without using
/// up a trial. The hiring loop still terminates: a vacancy stops drawing
/// once nobody left in the pool could accept it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockInRejection {
    /// Refusal does not consume a trial
    #[default]
    Uncounted,
    /// Refusal consumes a trial like any other failure
    Counted,
}

/// Weighting used when picking workers for separation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionWeighting {
    /// Every employed worker equally likely
    Uniform,
    /// Probability proportional to skill level
    Skill,
}

/// Unemployed workers still available to this week's vacancies
///
/// Keeps worker indices and their skill weights side by side. Removal keeps
/// the remaining order, so the draw sequence only depends on who was hired.
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    ids: Vec<WorkerId>,
    skills: Vec<f64>,
}

impl CandidatePool {
    /// Build a pool from `ids`, reading skills from `population`
    pub fn new(population: &Population, ids: Vec<WorkerId>) -> Self {
        let skills = population.skill_weights(&ids);
        Self { ids, skills }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Worker indices, in draw order
    pub fn ids(&self) -> &[WorkerId] {
        &self.ids
    }

    /// Skill weights aligned with [`ids`](Self::ids)
    pub fn skills(&self) -> &[f64] {
        &self.skills
    }

    /// Worker at a pool position
    pub fn worker_at(&self, position: usize) -> Option<WorkerId> {
        self.ids.get(position).copied()
    }

    /// Remove the candidate at `position` after a successful match
    pub fn remove(&mut self, position: usize) -> Option<WorkerId> {
        if position >= self.ids.len() {
            return None;
        }
        self.skills.remove(position);
        Some(self.ids.remove(position))
    }
}

/// Matching rules for the hiring phase
pub trait MatchingPolicy: Send + Sync {
    /// Short policy name for logging
    fn name(&self) -> &'static str;

    /// Whether `worker` joins this week's candidate pool
    ///
    /// Only unemployed workers are ever offered; the default admits all of
    /// them.
    fn admits(&self, _worker: &Worker, _week: usize) -> bool {
        true
    }

    /// Draw a pool position for the next offer
    ///
    /// Returning `None` abandons the remaining trials of this vacancy.
    fn draw_candidate(&self, pool: &CandidatePool, rng: &mut RngManager) -> Option<usize>;

    /// Decide the drawn candidate's response
    fn evaluate_offer(&self, worker: &Worker, week: usize, rng: &mut RngManager) -> OfferOutcome;

    /// Whether anyone left in the pool could still accept or fail an offer
    ///
    /// When every candidate would refuse without consuming a trial, the
    /// vacancy is abandoned instead of drawing forever.
    fn can_progress(&self, _population: &Population, _pool: &CandidatePool, _week: usize) -> bool {
        true
    }
}
