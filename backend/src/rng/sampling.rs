//! Uniform and weighted selection on top of [`RngManager`].
//!
//! Weighted draws use the cumulative-weight walk (one `next_f64` per draw).
//! Sampling without replacement repeats single draws over the remaining
//! candidates, renormalizing after each pick.

use super::RngManager;

/// Total of a weight vector, or `None` if it cannot form a distribution
/// (empty, zero total, or non-finite / negative entries).
fn distribution_total(weights: &[f64]) -> Option<f64> {
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return None;
    }
    let total: f64 = weights.iter().sum();
    if total > 0.0 && total.is_finite() {
        Some(total)
    } else {
        None
    }
}

/// Draw one index with probability proportional to `weights[i]`.
///
/// Returns `None` when the weights do not form a valid distribution.
///
/// # Example
/// ```
/// use labor_market_core_rs::rng::{weighted_index, RngManager};
///
/// let mut rng = RngManager::new(1);
/// assert_eq!(weighted_index(&mut rng, &[0.0, 3.0, 0.0]), Some(1));
/// assert_eq!(weighted_index(&mut rng, &[0.0, 0.0]), None);
/// ```
pub fn weighted_index(rng: &mut RngManager, weights: &[f64]) -> Option<usize> {
    let total = distribution_total(weights)?;
    let mut target = rng.next_f64() * total;

    let mut last_positive = None;
    for (idx, weight) in weights.iter().enumerate() {
        if *weight <= 0.0 {
            continue;
        }
        last_positive = Some(idx);
        if target < *weight {
            return Some(idx);
        }
        target -= weight;
    }

    // Rounding can leave a sliver of target past the final bucket.
    last_positive
}

/// Draw one index weighted by `weights`, falling back to a uniform draw
/// when the weights sum to zero.
///
/// Returns `None` only for an empty slice or weights that are negative or
/// non-finite.
pub fn weighted_index_or_uniform(rng: &mut RngManager, weights: &[f64]) -> Option<usize> {
    if weights.is_empty() {
        return None;
    }
    if weights.iter().all(|w| *w == 0.0) {
        return rng.index(weights.len());
    }
    weighted_index(rng, weights)
}

/// Choose `amount` distinct indices from `0..len` uniformly.
///
/// `amount` is clamped to `len`. The order of the result is the draw order.
pub fn sample_indices(rng: &mut RngManager, len: usize, amount: usize) -> Vec<usize> {
    let amount = amount.min(len);
    let mut pool: Vec<usize> = (0..len).collect();
    let mut picked = Vec::with_capacity(amount);

    for i in 0..amount {
        // Partial Fisher-Yates over the unpicked tail.
        let offset = rng.index(len - i).unwrap_or(0);
        pool.swap(i, i + offset);
        picked.push(pool[i]);
    }

    picked
}

/// Choose `amount` distinct indices without replacement, each draw
/// proportional to the weights of the indices still available.
///
/// `amount` is clamped to `weights.len()`. When the remaining weights sum
/// to zero the draw falls back to uniform over what remains.
pub fn weighted_sample_indices(rng: &mut RngManager, weights: &[f64], amount: usize) -> Vec<usize> {
    let amount = amount.min(weights.len());
    let mut remaining: Vec<usize> = (0..weights.len()).collect();
    let mut remaining_weights: Vec<f64> = weights.iter().map(|w| w.max(0.0)).collect();
    let mut picked = Vec::with_capacity(amount);

    while picked.len() < amount {
        let Some(slot) = weighted_index_or_uniform(rng, &remaining_weights) else {
            break;
        };
        picked.push(remaining.swap_remove(slot));
        remaining_weights.swap_remove(slot);
    }

    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_weighted_index_rejects_invalid_weights() {
        let mut rng = RngManager::new(3);
        assert_eq!(weighted_index(&mut rng, &[]), None);
        assert_eq!(weighted_index(&mut rng, &[1.0, f64::NAN]), None);
        assert_eq!(weighted_index(&mut rng, &[1.0, -1.0]), None);
    }

    #[test]
    fn test_weighted_index_follows_weights() {
        let mut rng = RngManager::new(2024);
        let mut counts = [0usize; 2];
        for _ in 0..10_000 {
            counts[weighted_index(&mut rng, &[1.0, 9.0]).unwrap()] += 1;
        }
        let share = counts[1] as f64 / 10_000.0;
        assert!((0.87..0.93).contains(&share), "heavy bucket share {}", share);
    }

    #[test]
    fn test_uniform_fallback_on_zero_weights() {
        let mut rng = RngManager::new(11);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            seen.insert(weighted_index_or_uniform(&mut rng, &[0.0, 0.0, 0.0]).unwrap());
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_sample_indices_distinct_and_clamped() {
        let mut rng = RngManager::new(8);
        let picked = sample_indices(&mut rng, 5, 50);
        assert_eq!(picked.len(), 5);
        let unique: HashSet<_> = picked.iter().collect();
        assert_eq!(unique.len(), 5);
    }

    #[test]
    fn test_weighted_sample_skips_zero_weights_until_exhausted() {
        let mut rng = RngManager::new(77);
        let picked = weighted_sample_indices(&mut rng, &[0.0, 5.0, 0.0, 5.0], 2);
        let unique: HashSet<_> = picked.iter().copied().collect();
        assert_eq!(unique, HashSet::from([1, 3]));

        let all = weighted_sample_indices(&mut rng, &[0.0, 5.0, 0.0, 5.0], 10);
        assert_eq!(all.len(), 4);
    }
}
