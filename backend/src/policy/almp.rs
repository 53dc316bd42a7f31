//! Active labor market policy matching
//!
//! Candidates are drawn with probability proportional to skill (uniform when
//! the pool has no skill at all). The drawn candidate's response follows
//! these rules, first match wins:
//!
//! 1. Laid off this week: refuse, trial consumed
//! 2. Entitlement at or below one week: accept (benefits about to expire)
//! 3. In the lock-in period: refuse, trial consumed only under
//!    [`LockInRejection::Counted`]
//! 4. Otherwise: accept with a small fixed probability, else refuse with the
//!    trial consumed
//!
//! Rule 3 precedes rule 4, so a worker in lock-in with entitlement above one
//! week never takes a job.

use super::{AcceptReason, CandidatePool, LockInRejection, MatchingPolicy, OfferOutcome};
use crate::models::{Population, Worker};
use crate::rng::{weighted_index_or_uniform, RngManager};

/// Entitlement at or below which a candidate accepts immediately
pub const EXPIRING_ENTITLEMENT: f64 = 1.0;

/// Acceptance probability outside lock-in with entitlement remaining
pub const VOLUNTARY_ACCEPTANCE_PROBABILITY: f64 = 0.05;

/// Skill-weighted matching with lock-in refusals
///
/// # Example
///
/// ```
/// use labor_market_core_rs::policy::{AcceptReason, AlmpPolicy, LockInRejection, MatchingPolicy, OfferOutcome};
/// use labor_market_core_rs::{RngManager, Worker};
///
/// let policy = AlmpPolicy::new(LockInRejection::Uncounted);
/// let mut rng = RngManager::new(1);
///
/// let mut worker = Worker::new(3.0, 0.0);
/// worker.set_eligibility(0.5);
/// assert_eq!(
///     policy.evaluate_offer(&worker, 10, &mut rng),
///     OfferOutcome::Accept(AcceptReason::BenefitsExpiring)
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AlmpPolicy {
    lock_in: LockInRejection,
    acceptance_probability: f64,
}

impl AlmpPolicy {
    pub fn new(lock_in: LockInRejection) -> Self {
        Self {
            lock_in,
            acceptance_probability: VOLUNTARY_ACCEPTANCE_PROBABILITY,
        }
    }

    /// How lock-in refusals are charged
    pub fn lock_in(&self) -> LockInRejection {
        self.lock_in
    }

    /// Refusal that costs the vacancy nothing under the uncounted rule
    fn refuses_for_free(&self, worker: &Worker, week: usize) -> bool {
        self.lock_in == LockInRejection::Uncounted
            && !worker.was_separated_in(week)
            && worker.eligibility() > EXPIRING_ENTITLEMENT
            && worker.is_locked_in()
    }
}

impl Default for AlmpPolicy {
    fn default() -> Self {
        Self::new(LockInRejection::default())
    }
}

impl MatchingPolicy for AlmpPolicy {
    fn name(&self) -> &'static str {
        "Almp"
    }

    fn draw_candidate(&self, pool: &CandidatePool, rng: &mut RngManager) -> Option<usize> {
        weighted_index_or_uniform(rng, pool.skills())
    }

    fn evaluate_offer(&self, worker: &Worker, week: usize, rng: &mut RngManager) -> OfferOutcome {
        if worker.was_separated_in(week) {
            return OfferOutcome::Reject {
                counts_as_failure: true,
            };
        }

        if worker.eligibility() <= EXPIRING_ENTITLEMENT {
            return OfferOutcome::Accept(AcceptReason::BenefitsExpiring);
        }

        if worker.is_locked_in() {
            return OfferOutcome::Reject {
                counts_as_failure: self.lock_in == LockInRejection::Counted,
            };
        }

        if rng.chance(self.acceptance_probability) {
            OfferOutcome::Accept(AcceptReason::VoluntaryAcceptance)
        } else {
            OfferOutcome::Reject {
                counts_as_failure: true,
            }
        }
    }

    fn can_progress(&self, population: &Population, pool: &CandidatePool, week: usize) -> bool {
        pool.ids()
            .iter()
            .filter_map(|id| population.get(*id))
            .any(|worker| !self.refuses_for_free(worker, week))
    }
}
