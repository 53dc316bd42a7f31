//! Entitlement-based acceptance (UI model, ALMP off)
//!
//! Workers still holding two or more weeks of benefit entitlement turn
//! offers down. Candidates are drawn uniformly from every unemployed worker,
//! including those laid off this week, who always fail the trial.

use super::{AcceptReason, CandidatePool, MatchingPolicy, OfferOutcome};
use crate::models::Worker;
use crate::rng::RngManager;

/// Entitlement at or above which an offer is refused
pub const REFUSAL_ENTITLEMENT: f64 = 2.0;

/// Uniform draws; accept only when entitlement is nearly used up
#[derive(Debug, Clone, Copy, Default)]
pub struct EntitlementPolicy;

impl MatchingPolicy for EntitlementPolicy {
    fn name(&self) -> &'static str {
        "Entitlement"
    }

    fn draw_candidate(&self, pool: &CandidatePool, rng: &mut RngManager) -> Option<usize> {
        rng.index(pool.len())
    }

    fn evaluate_offer(&self, worker: &Worker, week: usize, _rng: &mut RngManager) -> OfferOutcome {
        if worker.was_separated_in(week) || worker.eligibility() >= REFUSAL_ENTITLEMENT {
            return OfferOutcome::Reject {
                counts_as_failure: true,
            };
        }
        OfferOutcome::Accept(AcceptReason::LowEntitlement)
    }
}
