//! Term keys and key ranges
//!
//! A term routes through the tree by a `u64` key derived from its first eight
//! bytes, big-endian so key order agrees with lexical byte order on that
//! prefix. Terms sharing an eight-byte prefix collide onto one key and simply
//! land in the same leaf; leaves store postings under the full term string, so
//! collisions cost locality, never correctness.

use serde::{Deserialize, Serialize};

/// Routing key for a term, totally ordered and stable for the process lifetime
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TermKey(pub u64);

/// Compute the routing key for a term
///
/// Keys are clamped to `u64::MAX - 1` so every term fits inside the half-open
/// root range `[0, u64::MAX)`.
pub fn term_key(term: &str) -> TermKey {
    let bytes = term.as_bytes();
    let mut prefix = [0u8; 8];
    let n = bytes.len().min(8);
    prefix[..n].copy_from_slice(&bytes[..n]);
    TermKey(u64::from_be_bytes(prefix).min(u64::MAX - 1))
}

/// Half-open interval `[low, high)` over term keys
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRange {
    pub low: u64,
    pub high: u64,
}

impl KeyRange {
    /// The root range covering every possible term key
    pub const FULL: KeyRange = KeyRange {
        low: 0,
        high: u64::MAX,
    };

    pub fn new(low: u64, high: u64) -> Self {
        debug_assert!(low < high, "empty key range [{low}, {high})");
        Self { low, high }
    }

    pub fn contains(&self, key: TermKey) -> bool {
        self.low <= key.0 && key.0 < self.high
    }

    /// Number of keys this range can hold
    pub fn width(&self) -> u64 {
        self.high - self.low
    }

    /// Divide at `split` into `[low, split)` and `[split, high)`
    ///
    /// `split` must lie strictly inside the range.
    pub fn split_at(&self, split: TermKey) -> (KeyRange, KeyRange) {
        debug_assert!(self.low < split.0 && split.0 < self.high);
        (
            KeyRange::new(self.low, split.0),
            KeyRange::new(split.0, self.high),
        )
    }
}
