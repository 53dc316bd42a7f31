//! Aggregate metrics and the per-week record stream.
//!
//! Two series are recorded each week: the unemployment rate (percent of the
//! labor force) and the Gini coefficient of the wealth distribution. Records
//! are pushed to a [`MetricsRecorder`]; [`MetricsHistory`] is the in-memory
//! collector the orchestrator keeps for itself, and callers can plug in their
//! own (a plotting front end, a file writer).

use crate::models::Population;
use serde::{Deserialize, Serialize};

/// Percent of the labor force that is unemployed.
///
/// Returns 0 for an empty population.
pub fn unemployment_rate(population: &Population) -> f64 {
    if population.is_empty() {
        return 0.0;
    }
    100.0 * population.unemployed_count() as f64 / population.len() as f64
}

/// Gini coefficient: mean absolute pairwise difference over `2 * mean`.
///
/// Computed from the sorted values as
/// `sum_i (2i - n - 1) * x_(i) / (n^2 * mean)`, which equals the pairwise
/// definition. Returns 0 for an empty slice or a zero mean.
///
/// # Example
/// ```
/// use labor_market_core_rs::metrics::gini_coefficient;
///
/// assert_eq!(gini_coefficient(&[3.0, 3.0, 3.0]), 0.0);
/// assert!((gini_coefficient(&[0.0, 0.0, 0.0, 8.0]) - 0.75).abs() < 1e-12);
/// assert_eq!(gini_coefficient(&[0.0, 0.0]), 0.0);
/// ```
pub fn gini_coefficient(values: &[f64]) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }

    let total: f64 = values.iter().sum();
    let mean = total / n as f64;
    if mean == 0.0 || !mean.is_finite() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n_f = n as f64;
    let weighted: f64 = sorted
        .iter()
        .enumerate()
        .map(|(i, x)| (2.0 * (i + 1) as f64 - n_f - 1.0) * x)
        .sum();

    weighted / (n_f * n_f * mean)
}

/// One week's recorded aggregates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklyRecord {
    /// Week index (1-based)
    pub t: usize,
    /// Percent unemployed at the end of the week
    pub unemployment_rate: f64,
    /// Wealth Gini at the end of the week
    pub gini_coefficient: f64,
}

/// Sink for per-week records
pub trait MetricsRecorder {
    /// Append one week's record
    fn record(&mut self, record: WeeklyRecord);
}

impl MetricsRecorder for Vec<WeeklyRecord> {
    fn record(&mut self, record: WeeklyRecord) {
        self.push(record);
    }
}

/// In-memory, append-only record history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsHistory {
    records: Vec<WeeklyRecord>,
}

impl MetricsHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records, oldest first
    pub fn records(&self) -> &[WeeklyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Most recent record
    pub fn latest(&self) -> Option<&WeeklyRecord> {
        self.records.last()
    }

    /// Unemployment-rate series
    pub fn unemployment_rates(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.unemployment_rate).collect()
    }

    /// Gini series
    pub fn gini_coefficients(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.gini_coefficient).collect()
    }

    /// Week indices
    pub fn weeks(&self) -> Vec<usize> {
        self.records.iter().map(|r| r.t).collect()
    }
}

impl MetricsRecorder for MetricsHistory {
    fn record(&mut self, record: WeeklyRecord) {
        self.records.push(record);
    }
}
