//! Matching policy tests
//!
//! Unit-level checks of each policy's decisions, plus full runs verifying
//! the acceptance rules through the Hire events they leave behind.

use labor_market_core_rs::models::worker::LOCK_IN_WEEKS;
use labor_market_core_rs::policy::{
    AcceptReason, AlmpPolicy, CandidatePool, DirectPlacementPolicy, EntitlementPolicy,
    LockInRejection, MatchingPolicy, OfferOutcome,
};
use labor_market_core_rs::{
    Event, IncomeRules, LaborMarket, ModelConfig, ModelVariant, Population, RngManager, Worker,
};

const ALMP_RULES: IncomeRules = IncomeRules {
    benefits: true,
    almp: true,
    skill_income_factor: 0.03,
};

fn unemployed(skill: f64, eligibility: f64) -> Worker {
    let mut worker = Worker::new(skill, 0.0);
    worker.set_eligibility(eligibility);
    worker
}

/// Unemployed worker with `LOCK_IN_WEEKS` benefit weeks behind them
fn locked_in(skill: f64, eligibility: f64) -> Worker {
    let mut worker = unemployed(skill, 6.0);
    for _ in 0..LOCK_IN_WEEKS {
        worker.accrue_wealth(&ALMP_RULES);
    }
    worker.set_eligibility(eligibility);
    worker
}

fn almp_config(seed: u64, lock_in: LockInRejection) -> ModelConfig {
    let mut config = ModelConfig::new(seed, 1000, 0.05, 0.95, 0.90);
    config.almp = true;
    config.lock_in_rejection = lock_in;
    config
}

fn hires(model: &LaborMarket) -> Vec<(u32, f64, AcceptReason)> {
    model
        .event_log()
        .events_of_type("Hire")
        .into_iter()
        .filter_map(|event| match event {
            Event::Hire {
                benefit_weeks,
                eligibility,
                reason,
                ..
            } => Some((*benefit_weeks, *eligibility, *reason)),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Direct placement (plain model)
// ============================================================================

#[test]
fn test_direct_placement_always_accepts() {
    let policy = DirectPlacementPolicy;
    let mut rng = RngManager::new(1);

    for eligibility in [0.0, 3.0, 6.0] {
        assert_eq!(
            policy.evaluate_offer(&unemployed(2.0, eligibility), 5, &mut rng),
            OfferOutcome::Accept(AcceptReason::DirectPlacement)
        );
    }
}

#[test]
fn test_direct_placement_hires_min_of_vacancies_and_pool() {
    // separation_rate 1.0 empties the employed pool; only the initially
    // unemployed can be hired in week one
    let mut config = ModelConfig::new(3, 100, 1.0, 0.95, 0.90);
    config.variant = ModelVariant::Plain;
    config.steps = 1;
    let mut model = LaborMarket::new(config).unwrap();

    let week = model.step().unwrap();
    assert_eq!(week.separations, 95);
    assert_eq!(week.hires, 5);
    assert_eq!(week.unfilled_vacancies, 90);
    assert_eq!(week.vacancies_carried_over, 0);
}

// ============================================================================
// Entitlement (insurance model, ALMP off)
// ============================================================================

#[test]
fn test_entitlement_threshold() {
    let policy = EntitlementPolicy;
    let mut rng = RngManager::new(1);

    assert!(matches!(
        policy.evaluate_offer(&unemployed(2.0, 1.99), 5, &mut rng),
        OfferOutcome::Accept(AcceptReason::LowEntitlement)
    ));
    assert_eq!(
        policy.evaluate_offer(&unemployed(2.0, 2.0), 5, &mut rng),
        OfferOutcome::Reject {
            counts_as_failure: true
        }
    );
}

#[test]
fn test_entitlement_run_only_hires_low_entitlement() {
    let mut config = ModelConfig::new(12, 600, 0.05, 0.95, 0.90);
    config.steps = 70;
    let mut model = LaborMarket::new(config).unwrap();
    model.run().unwrap();

    let hires = hires(&model);
    assert!(!hires.is_empty());
    for (_, eligibility, reason) in hires {
        assert_eq!(reason, AcceptReason::LowEntitlement);
        assert!(eligibility < 2.0);
    }
}

// ============================================================================
// ALMP
// ============================================================================

#[test]
fn test_almp_decision_order() {
    let policy = AlmpPolicy::new(LockInRejection::Uncounted);
    let mut rng = RngManager::new(5);

    // (a) separated this week
    let mut fresh = unemployed(3.0, 0.5);
    fresh.separate(7);
    assert_eq!(
        policy.evaluate_offer(&fresh, 7, &mut rng),
        OfferOutcome::Reject {
            counts_as_failure: true
        }
    );

    // (b) entitlement about to expire, even in lock-in
    assert_eq!(
        policy.evaluate_offer(&locked_in(3.0, 1.0), 7, &mut rng),
        OfferOutcome::Accept(AcceptReason::BenefitsExpiring)
    );

    // (c) lock-in with entitlement left
    assert_eq!(
        policy.evaluate_offer(&locked_in(3.0, 2.5), 7, &mut rng),
        OfferOutcome::Reject {
            counts_as_failure: false
        }
    );
}

#[test]
fn test_almp_draws_weighted_by_skill() {
    let policy = AlmpPolicy::default();
    let population = Population::new(vec![unemployed(1.0, 3.0), unemployed(9.0, 3.0)]);
    let pool = CandidatePool::new(&population, vec![0, 1]);
    let mut rng = RngManager::new(31);

    let heavy = (0..10_000)
        .filter(|_| policy.draw_candidate(&pool, &mut rng) == Some(1))
        .count();
    let share = heavy as f64 / 10_000.0;
    assert!((0.87..0.93).contains(&share), "share {}", share);
}

#[test]
fn test_almp_zero_skill_pool_draws_uniformly() {
    let policy = AlmpPolicy::default();
    let population = Population::new(vec![unemployed(0.0, 3.0), unemployed(0.0, 3.0)]);
    let pool = CandidatePool::new(&population, vec![0, 1]);
    let mut rng = RngManager::new(31);

    assert!(policy.draw_candidate(&pool, &mut rng).is_some());
}

#[test]
fn test_locked_in_workers_never_accept_voluntarily() {
    let mut model = LaborMarket::new(almp_config(2024, LockInRejection::Uncounted)).unwrap();
    model.run().unwrap();

    let hires = hires(&model);
    assert!(!hires.is_empty());

    let mut locked_in_hires = 0;
    for (benefit_weeks, eligibility, reason) in hires {
        if benefit_weeks >= LOCK_IN_WEEKS {
            locked_in_hires += 1;
            assert_eq!(reason, AcceptReason::BenefitsExpiring);
            assert!(eligibility <= 1.0);
        }
        if reason == AcceptReason::VoluntaryAcceptance {
            assert!(benefit_weeks < LOCK_IN_WEEKS);
        }
    }
    assert!(locked_in_hires > 0);
}

#[test]
fn test_counted_lock_in_keeps_the_same_acceptance_rules() {
    let mut model = LaborMarket::new(almp_config(2024, LockInRejection::Counted)).unwrap();
    model.run().unwrap();

    for (benefit_weeks, _, reason) in hires(&model) {
        if benefit_weeks >= LOCK_IN_WEEKS {
            assert_eq!(reason, AcceptReason::BenefitsExpiring);
        }
    }
}

#[test]
fn test_hiring_terminates_with_mostly_locked_in_pool() {
    let mut config = almp_config(99, LockInRejection::Uncounted);
    config.labor_force = 300;
    config.separation_rate = 0.3;
    let mut model = LaborMarket::new(config).unwrap();

    let weeks = model.run().unwrap();
    assert_eq!(weeks.len(), 70);
    assert!(weeks.iter().all(|w| w.employed + w.unemployed == 300));
}

#[test]
fn test_failed_trials_bounded() {
    let mut model = LaborMarket::new(almp_config(5, LockInRejection::Counted)).unwrap();
    model.run().unwrap();

    for event in model.event_log().events() {
        match event {
            Event::Hire { failed_trials, .. } => assert!(*failed_trials < 10),
            Event::VacancyUnfilled { failed_trials, .. } => assert!(*failed_trials <= 10),
            _ => {}
        }
    }
}
