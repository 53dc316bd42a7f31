//! Weekly update cycle tests
//!
//! Drives `LaborMarket` week by week and checks the phase arithmetic,
//! the recorded series and the event log against each other.

use labor_market_core_rs::models::worker::BASE_INCOME;
use labor_market_core_rs::{
    Event, LaborMarket, ModelConfig, ModelVariant, SimulationError, WeeklyRecord,
};

fn config(seed: u64, labor_force: usize, steps: usize) -> ModelConfig {
    let mut config = ModelConfig::new(seed, labor_force, 0.05, 0.95, 0.90);
    config.steps = steps;
    config
}

fn plain(seed: u64, labor_force: usize, steps: usize) -> ModelConfig {
    let mut config = config(seed, labor_force, steps);
    config.variant = ModelVariant::Plain;
    config
}

// ============================================================================
// Setup
// ============================================================================

#[test]
fn test_initial_employment_share() {
    let model = LaborMarket::new(config(7, 100, 10)).unwrap();

    assert_eq!(model.current_week(), 0);
    assert_eq!(model.population().len(), 100);
    assert_eq!(model.population().employed_count(), 95);
    assert_eq!(model.unemployment_rate(), 5.0);
    assert_eq!(model.vacancies_carried_over(), 0);
    assert!(model.history().is_empty());
}

#[test]
fn test_invalid_config_rejected_at_setup() {
    let mut bad = config(7, 100, 10);
    bad.separation_rate = -0.05;

    assert!(matches!(
        LaborMarket::new(bad),
        Err(SimulationError::InvalidConfig(_))
    ));
}

#[test]
fn test_config_defaults_from_json() {
    let json = r#"{
        "seed": 3,
        "labor_force": 500,
        "separation_rate": 0.05,
        "initial": 0.95,
        "target": 0.9
    }"#;
    let config: ModelConfig = serde_json::from_str(json).unwrap();

    assert_eq!(config.hiring_factor, 1.0);
    assert_eq!(config.steps, 70);
    assert!(!config.almp);
    assert_eq!(config.skill_income_factor, 0.03);
    assert_eq!(config.threat_factor, 1.0);
    assert!(!config.rolling_initial_eligibility);
    assert_eq!(config.initial_wealth, 0.0);
    assert_eq!(config.variant, ModelVariant::Insurance);
}

#[test]
fn test_threat_factor_is_inert() {
    let baseline = config(13, 200, 30);
    let mut scaled = baseline.clone();
    scaled.threat_factor = 2.5;

    let mut a = LaborMarket::new(baseline).unwrap();
    let mut b = LaborMarket::new(scaled).unwrap();

    assert_eq!(a.run().unwrap(), b.run().unwrap());
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_plain_scenario_week_one_matches_initial_unemployment() {
    let mut model = LaborMarket::new(plain(7, 100, 10)).unwrap();
    let initially_unemployed = model.population().unemployed_count();

    let weeks = model.run().unwrap();

    assert_eq!(weeks[0].unemployment_rate, 100.0 * initially_unemployed as f64 / 100.0);
    for week in &weeks {
        assert!(
            (0.0..=20.0).contains(&week.unemployment_rate),
            "week {} rate {}",
            week.week,
            week.unemployment_rate
        );
    }
}

#[test]
fn test_insurance_scenario_stays_bounded() {
    let mut model = LaborMarket::new(config(7, 100, 10)).unwrap();
    let weeks = model.run().unwrap();

    assert_eq!(weeks.len(), 10);
    for week in &weeks {
        assert!(
            (0.0..=30.0).contains(&week.unemployment_rate),
            "week {} rate {}",
            week.week,
            week.unemployment_rate
        );
    }
}

// ============================================================================
// Phase arithmetic
// ============================================================================

#[test]
fn test_plain_model_steady_state() {
    let mut model = LaborMarket::new(plain(1, 1000, 19)).unwrap();

    for week in model.run().unwrap() {
        // floor(0.05 * 950) = 47 out, 47 in; 50 available candidates
        assert_eq!(week.separations, 47);
        assert_eq!(week.hires, 47);
        assert_eq!(week.unfilled_vacancies, 0);
        assert_eq!(week.vacancies_carried_over, 0);
        assert_eq!(week.employed, 950);
    }
}

#[test]
fn test_decline_adds_separations() {
    let mut model = LaborMarket::new(plain(1, 1000, 20)).unwrap();
    let weeks = model.run().unwrap();

    let before = &weeks[18];
    let week20 = &weeks[19];
    assert_eq!(before.employed, 950);

    // DIFEMP = trunc(-50/11) = -4
    let leavs = 0.05 * before.employed as f64;
    assert_eq!(week20.separations, (leavs + 4.0).floor() as usize);
    assert_eq!(week20.hires, leavs.floor() as usize);
}

#[test]
fn test_separations_capped_by_employed_pool() {
    let mut cfg = plain(2, 50, 5);
    cfg.separation_rate = 1.0;
    let mut model = LaborMarket::new(cfg).unwrap();

    let week = model.step().unwrap();
    assert!(week.separations <= 47);
    assert_eq!(week.employed + week.unemployed, 50);
}

#[test]
fn test_plain_model_has_no_carry_over() {
    let mut model = LaborMarket::new(plain(5, 300, 70)).unwrap();
    for week in model.run().unwrap() {
        assert_eq!(week.vacancies_carried_over, 0);
    }
}

#[test]
fn test_insurance_model_carries_unfilled_vacancies() {
    let mut model = LaborMarket::new(config(5, 300, 70)).unwrap();
    let weeks = model.run().unwrap();

    for week in &weeks {
        assert_eq!(week.vacancies_carried_over, week.unfilled_vacancies);
    }
    // Week one: freshly separated workers refuse, so some vacancy is left over
    assert!(weeks.iter().any(|w| w.vacancies_carried_over > 0));
}

#[test]
fn test_newly_hired_earn_in_same_week() {
    let mut model = LaborMarket::new(plain(9, 200, 1)).unwrap();
    model.step().unwrap();

    let hires: Vec<usize> = model
        .event_log()
        .events_of_type("Hire")
        .iter()
        .filter_map(|e| e.worker())
        .collect();
    assert!(!hires.is_empty());

    for id in hires {
        let worker = model.population().get(id).unwrap();
        assert!(worker.is_employed());
        assert_eq!(worker.wealth(), BASE_INCOME);
    }
}

#[test]
fn test_plain_separated_workers_not_rehired_same_week() {
    let mut model = LaborMarket::new(plain(4, 400, 25)).unwrap();
    model.run().unwrap();

    for week in 1..=25 {
        let events = model.event_log().events_at_week(week);
        let separated: Vec<usize> = events
            .iter()
            .filter(|e| matches!(e, Event::Separation { .. }))
            .filter_map(|e| e.worker())
            .collect();
        let hired: Vec<usize> = events
            .iter()
            .filter(|e| matches!(e, Event::Hire { .. }))
            .filter_map(|e| e.worker())
            .collect();

        assert!(separated.iter().all(|id| !hired.contains(id)), "week {}", week);
    }
}

// ============================================================================
// Recording
// ============================================================================

#[test]
fn test_week_results_agree_with_event_log() {
    let mut cfg = config(21, 400, 40);
    cfg.almp = true;
    let mut model = LaborMarket::new(cfg).unwrap();
    let weeks = model.run().unwrap();

    for week in &weeks {
        let events = model.event_log().events_at_week(week.week);
        let count = |kind: &str| events.iter().filter(|e| e.event_type() == kind).count();

        assert_eq!(count("Separation"), week.separations, "week {}", week.week);
        assert_eq!(count("Hire"), week.hires, "week {}", week.week);
        assert_eq!(count("VacancyUnfilled"), week.unfilled_vacancies, "week {}", week.week);
        assert_eq!(count("WeekCompleted"), 1);
        assert_eq!(week.employed + week.unemployed, 400);
    }
}

#[test]
fn test_history_matches_week_results() {
    let mut model = LaborMarket::new(config(8, 250, 30)).unwrap();
    let weeks = model.run().unwrap();

    let history = model.history();
    assert_eq!(history.weeks(), (1..=30).collect::<Vec<_>>());
    for (record, week) in history.records().iter().zip(&weeks) {
        assert_eq!(record.unemployment_rate, week.unemployment_rate);
        assert_eq!(record.gini_coefficient, week.gini_coefficient);
    }
}

#[test]
fn test_run_with_external_recorder() {
    let mut model = LaborMarket::new(config(8, 250, 12)).unwrap();
    let mut sink: Vec<WeeklyRecord> = Vec::new();

    model.run_with(&mut sink).unwrap();

    assert_eq!(sink.len(), 12);
    assert_eq!(sink.as_slice(), model.history().records());
}

#[test]
fn test_step_past_end_is_an_error() {
    let mut model = LaborMarket::new(config(1, 50, 3)).unwrap();
    model.run().unwrap();

    assert!(model.is_finished());
    assert_eq!(model.step(), Err(SimulationError::SimulationComplete(3)));
    assert!(model.run().unwrap().is_empty());
}

#[test]
fn test_same_seed_same_series() {
    let mut cfg = config(77, 500, 70);
    cfg.almp = true;

    let mut a = LaborMarket::new(cfg.clone()).unwrap();
    let mut b = LaborMarket::new(cfg).unwrap();
    a.run().unwrap();
    b.run().unwrap();

    assert_eq!(a.history(), b.history());
    assert_eq!(a.population(), b.population());
}
