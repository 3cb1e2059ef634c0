//! Chaotic split-point selection
//!
//! Splits are placed by iterating the logistic map `x = r * x * (1 - x)` in
//! its chaotic regime, seeded from the splitting node's mutation count. The
//! result is deterministic for a given (range, seed) pair, but nearby seeds
//! land on wildly different split points, which is what makes the partitioning
//! irregular instead of balanced.

use crate::config::IndexConfig;
use crate::error::{FracTreeError, Result};

use super::key::{KeyRange, TermKey};

/// Picks split points inside key ranges via a logistic-map recurrence
#[derive(Clone, Debug)]
pub struct ChaoticPartitioner {
    r: f64,
    iterations: u32,
}

/// splitmix64 finalizer, used to spread consecutive mutation counts across
/// the seed space before they enter the logistic map
fn mix_seed(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

impl ChaoticPartitioner {
    pub fn new(config: &IndexConfig) -> Self {
        Self {
            r: config.logistic_r,
            iterations: config.logistic_iterations,
        }
    }

    /// Choose a split key strictly inside `(range.low, range.high)`
    ///
    /// Fails with `DegenerateRange` when the range holds fewer than two keys,
    /// in which case the caller must refuse the split and let the leaf
    /// overflow instead.
    pub fn split_point(&self, range: KeyRange, seed: u64) -> Result<TermKey> {
        let width = range.width();
        if width < 2 {
            return Err(FracTreeError::DegenerateRange {
                low: range.low,
                high: range.high,
            });
        }

        // Map the mixed seed into (0, 1); the +0.5 keeps x off the map's
        // fixed point at zero.
        let mixed = mix_seed(seed);
        let mut x = ((mixed >> 11) as f64 + 0.5) / (1u64 << 53) as f64;

        for _ in 0..self.iterations {
            x = self.r * x * (1.0 - x);
        }

        // The map's invariant density piles up near 0 and 1. An orbit value
        // hugging an endpoint would slice a sliver off the range, and chains
        // of splits over colliding keys would then take thousands of levels
        // to bottom out. Keep iterating until the orbit clears the edge band,
        // which caps the larger sub-range at 95% of the parent; near zero the
        // recurrence grows by ~4x per step, so this converges fast.
        const EDGE: f64 = 0.05;
        let mut guard = 0;
        while !(EDGE..=1.0 - EDGE).contains(&x) && guard < 64 {
            x = self.r * x * (1.0 - x);
            guard += 1;
        }
        if !(EDGE..=1.0 - EDGE).contains(&x) {
            x = 0.5;
        }

        // There are width - 1 candidate interior keys, low + 1 ..= high - 1.
        let offset = (x * (width - 1) as f64) as u64;
        let split = range.low + 1 + offset.min(width - 2);
        Ok(TermKey(split))
    }
}
