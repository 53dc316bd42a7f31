//! Direct placement policy (plain model)
//!
//! Baseline without unemployment insurance: every unemployed worker who was
//! not laid off this week takes the first offer.
//!
//! # Behavior
//!
//! - Pool excludes workers separated in the current week
//! - Uniform draws
//! - Every drawn candidate accepts, so `n` vacancies hire
//!   `min(n, pool size)` distinct workers, the same as a one-shot uniform
//!   sample without replacement

use super::{AcceptReason, CandidatePool, MatchingPolicy, OfferOutcome};
use crate::models::Worker;
use crate::rng::RngManager;

/// Plain-model matching: uniform draws, unconditional acceptance
///
/// # Example
///
/// ```
/// use labor_market_core_rs::policy::{DirectPlacementPolicy, MatchingPolicy};
/// use labor_market_core_rs::Worker;
///
/// let policy = DirectPlacementPolicy;
/// let mut worker = Worker::new(4.0, 0.0);
/// worker.separate(3);
///
/// assert!(!policy.admits(&worker, 3));
/// assert!(policy.admits(&worker, 4));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectPlacementPolicy;

impl MatchingPolicy for DirectPlacementPolicy {
    fn name(&self) -> &'static str {
        "DirectPlacement"
    }

    fn admits(&self, worker: &Worker, week: usize) -> bool {
        !worker.was_separated_in(week)
    }

    fn draw_candidate(&self, pool: &CandidatePool, rng: &mut RngManager) -> Option<usize> {
        rng.index(pool.len())
    }

    fn evaluate_offer(&self, _worker: &Worker, _week: usize, _rng: &mut RngManager) -> OfferOutcome {
        OfferOutcome::Accept(AcceptReason::DirectPlacement)
    }
}
