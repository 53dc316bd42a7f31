//! Simulation State
//!
//! The worker population, stored as a plain vector and addressed by index.
//! The population size is fixed for the whole run: workers are created at
//! setup and never added or removed.
//!
//! # Critical Invariants
//!
//! 1. **Fixed size**: `len()` equals the configured labor force
//! 2. **Partition**: every worker is either employed or unemployed, so
//!    `employed_count() + unemployed_count() == len()`

use crate::models::worker::Worker;
use serde::{Deserialize, Serialize};

/// Index of a worker in the population
pub type WorkerId = usize;

/// Complete worker population
///
/// # Example
///
/// ```rust
/// use labor_market_core_rs::{Population, Worker};
///
/// let mut workers = vec![Worker::new(1.0, 0.0), Worker::new(2.0, 0.0)];
/// workers[0].set_employed(true);
///
/// let population = Population::new(workers);
/// assert_eq!(population.len(), 2);
/// assert_eq!(population.employed_ids(), vec![0]);
/// assert_eq!(population.unemployed_ids(), vec![1]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Population {
    workers: Vec<Worker>,
}

impl Population {
    /// Wrap a set of workers
    pub fn new(workers: Vec<Worker>) -> Self {
        Self { workers }
    }

    /// Number of workers (the labor force)
    pub fn len(&self) -> usize {
        self.workers.len()
    }

    /// True for an empty population
    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Get a worker by index
    pub fn get(&self, id: WorkerId) -> Option<&Worker> {
        self.workers.get(id)
    }

    /// Get a mutable worker by index
    pub fn get_mut(&mut self, id: WorkerId) -> Option<&mut Worker> {
        self.workers.get_mut(id)
    }

    /// All workers in index order
    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    /// Iterate mutably over all workers in index order
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Worker> {
        self.workers.iter_mut()
    }

    /// Indices of employed workers, ascending
    pub fn employed_ids(&self) -> Vec<WorkerId> {
        self.ids_where(|w| w.is_employed())
    }

    /// Indices of unemployed workers, ascending
    pub fn unemployed_ids(&self) -> Vec<WorkerId> {
        self.ids_where(|w| !w.is_employed())
    }

    /// Count of employed workers
    pub fn employed_count(&self) -> usize {
        self.workers.iter().filter(|w| w.is_employed()).count()
    }

    /// Count of unemployed workers
    pub fn unemployed_count(&self) -> usize {
        self.workers.len() - self.employed_count()
    }

    /// Wealth of every worker, in index order
    pub fn wealth_distribution(&self) -> Vec<f64> {
        self.workers.iter().map(|w| w.wealth()).collect()
    }

    /// Skill levels for a subset of workers, in the order given
    pub fn skill_weights(&self, ids: &[WorkerId]) -> Vec<f64> {
        ids.iter()
            .filter_map(|id| self.workers.get(*id))
            .map(|w| w.skill_level())
            .collect()
    }

    fn ids_where(&self, predicate: impl Fn(&Worker) -> bool) -> Vec<WorkerId> {
        self.workers
            .iter()
            .enumerate()
            .filter(|(_, w)| predicate(w))
            .map(|(id, _)| id)
            .collect()
    }
}
