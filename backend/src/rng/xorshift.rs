//! xorshift64* random number generator
//!
//! A small, fast PRNG with 64-bit state. The whole simulation draws from a
//! single instance, so the order of draws (separation picks, matching
//! trials, acceptance coin-flips) is fully determined by the seed.
//!
//! # Algorithm
//!
//! xorshift64* passes TestU01's BigCrush. State is never zero.

use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use labor_market_core_rs::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let skill = rng.range(1, 11); // [1, 11)
/// assert!((1..11).contains(&skill));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngManager {
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    ///
    /// A zero seed is mapped to 1 (xorshift requirement).
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u64 value
    pub fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Generate random value in range [min, max)
    ///
    /// # Panics
    /// Panics if min >= max
    pub fn range(&mut self, min: i64, max: i64) -> i64 {
        assert!(min < max, "min must be less than max");

        let value = self.next();
        let range_size = (max - min) as u64;
        min + (value % range_size) as i64
    }

    /// Uniform index into a collection of `len` elements
    ///
    /// Returns `None` for an empty collection instead of panicking, so
    /// callers selecting from a shrinking pool can treat exhaustion as a
    /// normal outcome.
    ///
    /// # Example
    /// ```
    /// use labor_market_core_rs::RngManager;
    ///
    /// let mut rng = RngManager::new(7);
    /// assert_eq!(rng.index(0), None);
    /// assert!(rng.index(5).unwrap() < 5);
    /// ```
    pub fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some((self.next() % len as u64) as usize)
    }

    /// Get current RNG state (for checkpointing/replay)
    ///
    /// `RngManager::new(rng.get_state())` continues the exact same sequence.
    pub fn get_state(&self) -> u64 {
        self.state
    }

    /// Generate random f64 in range [0.0, 1.0)
    ///
    /// # Example
    /// ```
    /// use labor_market_core_rs::RngManager;
    ///
    /// let mut rng = RngManager::new(12345);
    /// let coin = rng.next_f64();
    /// assert!(coin >= 0.0 && coin < 1.0);
    /// ```
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next();
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Bernoulli trial: true with probability `p`
    ///
    /// `p <= 0` never succeeds, `p >= 1` always does. One draw is consumed
    /// either way so the draw sequence does not depend on `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        let roll = self.next_f64();
        roll < p
    }
}
