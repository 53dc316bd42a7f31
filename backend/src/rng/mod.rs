//! Deterministic random number generation
//!
//! Uses xorshift64* for fast, deterministic random number generation.
//! CRITICAL: All randomness in the simulator MUST go through this module,
//! and the generator is passed explicitly into every phase.

mod sampling;
mod xorshift;

pub use sampling::{
    sample_indices, weighted_index, weighted_index_or_uniform, weighted_sample_indices,
};
pub use xorshift::RngManager;
