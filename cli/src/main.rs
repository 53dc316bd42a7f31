//! Labor Market CLI
//!
//! Runs the weekly labor market simulation from a JSON config (or command
//! line parameters), prints the per-week aggregates and optionally writes
//! a JSON report and a resumable state snapshot.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use labor_market_core_rs::{LaborMarket, ModelConfig, ModelVariant, VacancySchedule, WeekResult};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "labor-market")]
#[command(about = "Agent-based labor market simulation with unemployment insurance", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log filter used when RUST_LOG is unset (e.g. "info", "labor_market_core_rs=debug")
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation and print weekly aggregates
    Run {
        /// JSON model config; command line parameters are used when absent
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the RNG seed
        #[arg(long)]
        seed: Option<u64>,

        /// Override the number of weeks
        #[arg(long)]
        steps: Option<usize>,

        /// Enable the active labor market policy
        #[arg(long)]
        almp: bool,

        /// Run the model without unemployment insurance
        #[arg(long, conflicts_with = "almp")]
        plain: bool,

        #[command(flatten)]
        params: ModelParams,

        /// Resume from a state snapshot written by --save-state
        #[arg(long)]
        resume: Option<PathBuf>,

        /// Stop after this many weeks (run to the end when absent)
        #[arg(long)]
        weeks: Option<usize>,

        /// Write the final state snapshot to this file
        #[arg(long)]
        save_state: Option<PathBuf>,

        /// Write a JSON report (config, weekly results, history) to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the vacancy schedule
    Schedule {
        #[command(flatten)]
        params: ModelParams,

        /// Number of weeks
        #[arg(long, default_value = "70")]
        steps: usize,
    },
}

/// Model parameters used when no config file is given
#[derive(clap::Args)]
struct ModelParams {
    /// Number of workers
    #[arg(long, default_value = "1000")]
    labor_force: usize,

    /// Weekly separation rate
    #[arg(long, default_value = "0.05")]
    separation_rate: f64,

    /// Initial employment fraction
    #[arg(long, default_value = "0.95")]
    initial: f64,

    /// Employment fraction at the bottom of the dip
    #[arg(long, default_value = "0.90")]
    target: f64,
}

#[derive(Serialize)]
struct RunReport<'a> {
    config: &'a ModelConfig,
    weeks: &'a [WeekResult],
    history: &'a labor_market_core_rs::MetricsHistory,
}

fn load_config(path: &Path) -> Result<ModelConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse config {}", path.display()))
}

fn print_weeks(weeks: &[WeekResult]) {
    println!(
        "{:>5} {:>6} {:>6} {:>9} {:>9} {:>8} {:>10} {:>8}",
        "week", "seps", "hires", "unfilled", "carried", "employed", "unemp %", "gini"
    );
    println!("{:-<70}", "");
    for week in weeks {
        println!(
            "{:>5} {:>6} {:>6} {:>9} {:>9} {:>8} {:>10.2} {:>8.4}",
            week.week,
            week.separations,
            week.hires,
            week.unfilled_vacancies,
            week.vacancies_carried_over,
            week.employed,
            week.unemployment_rate,
            week.gini_coefficient
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn run(
    config_path: Option<PathBuf>,
    seed: Option<u64>,
    steps: Option<usize>,
    almp: bool,
    plain: bool,
    params: ModelParams,
    resume: Option<PathBuf>,
    weeks: Option<usize>,
    save_state: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => load_config(&path)?,
        None => ModelConfig::new(
            42,
            params.labor_force,
            params.separation_rate,
            params.initial,
            params.target,
        ),
    };
    if let Some(seed) = seed {
        config.seed = seed;
    }
    if let Some(steps) = steps {
        config.steps = steps;
    }
    if almp {
        config.almp = true;
    }
    if plain {
        config.variant = ModelVariant::Plain;
    }

    let mut model = match resume {
        Some(path) => {
            let state = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read state {}", path.display()))?;
            LaborMarket::load_state(config.clone(), &state)?
        }
        None => LaborMarket::new(config.clone())?,
    };

    info!(
        policy = model.matching_policy_name(),
        start_week = model.current_week(),
        "Starting run"
    );

    let mut results = Vec::new();
    let limit = weeks.unwrap_or(usize::MAX);
    while !model.is_finished() && results.len() < limit {
        results.push(model.step()?);
    }

    print_weeks(&results);
    println!(
        "\nFinal: unemployment {:.2}%, gini {:.4}, week {}/{}",
        model.unemployment_rate(),
        model.gini_coefficient(),
        model.current_week(),
        config.steps
    );

    if let Some(path) = save_state {
        fs::write(&path, model.save_state()?)
            .with_context(|| format!("Failed to write state {}", path.display()))?;
        info!(path = %path.display(), "State snapshot written");
    }

    if let Some(path) = output {
        let report = RunReport {
            config: &config,
            weeks: &results,
            history: model.history(),
        };
        fs::write(&path, serde_json::to_string_pretty(&report)?)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        info!(path = %path.display(), "Report written");
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            config,
            seed,
            steps,
            almp,
            plain,
            params,
            resume,
            weeks,
            save_state,
            output,
        } => run(
            config, seed, steps, almp, plain, params, resume, weeks, save_state, output,
        ),
        Commands::Schedule { params, steps } => {
            let schedule = VacancySchedule::build(
                params.labor_force,
                params.initial,
                params.target,
                steps,
            );
            println!("{:>5} {:>10} {:>8}", "week", "vacancies", "change");
            println!("{:-<25}", "");
            for week in 1..=schedule.len() {
                println!(
                    "{:>5} {:>10.2} {:>8.2}",
                    week,
                    schedule.level(week).unwrap_or_default(),
                    schedule.demand_change(week)
                );
            }
            Ok(())
        }
    }
}
