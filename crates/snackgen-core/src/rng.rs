//! # Seeded RNG
//!
//! Reproducible pseudo-random stream derived from an arbitrary string seed.
//!
//! - The seed is reduced to a `u32` with 32-bit FNV-1a over its UTF-16 code
//!   units.
//! - That state drives a Mulberry32 generator.
//! - Every output is a float in `[0, 1)`.
//!
//! The construction is fixed bit-for-bit: generation output pinned by seed
//! depends on it, so it must never be swapped for another PRNG.

use std::time::{SystemTime, UNIX_EPOCH};

/// FNV-1a 32-bit offset basis.
const FNV_OFFSET_BASIS: u32 = 2_166_136_261;

/// FNV-1a 32-bit prime.
const FNV_PRIME: u32 = 16_777_619;

/// Mulberry32 state increment (Weyl sequence constant).
const MULBERRY_INCREMENT: u32 = 0x6D2B_79F5;

/// 2^32 as a float, the divisor mapping a `u32` into `[0, 1)`.
const U32_RANGE: f64 = 4_294_967_296.0;

/// Reduce a seed string to a 32-bit state.
///
/// Order-sensitive: every UTF-16 code unit perturbs the running hash.
#[must_use]
pub fn hash_seed(seed: &str) -> u32 {
    seed.encode_utf16().fold(FNV_OFFSET_BASIS, |hash, unit| {
        (hash ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}

/// Seed used when the caller does not supply one: current time in
/// milliseconds since the Unix epoch.
#[must_use]
pub fn time_seed() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    millis.to_string()
}

/// Mulberry32 generator seeded from a string.
///
/// Also an infinite `Iterator<Item = f64>` over the same stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    /// Create a generator from a seed string.
    #[must_use]
    pub fn new(seed: &str) -> Self {
        Self::from_state(hash_seed(seed))
    }

    /// Create a generator from a raw 32-bit state.
    #[must_use]
    pub const fn from_state(state: u32) -> Self {
        Self { state }
    }

    /// Advance the stream and return the next raw 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(MULBERRY_INCREMENT);
        let t = self.state;
        let mut r = (t ^ (t >> 15)).wrapping_mul(1 | t);
        r ^= r.wrapping_add((r ^ (r >> 7)).wrapping_mul(61 | r));
        r ^ (r >> 14)
    }

    /// Next float, uniformly distributed over `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / U32_RANGE
    }

    /// Uniform index in `0..len`; returns 0 when `len` is 0.
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let i = (self.next_f64() * len as f64) as usize;
        i.min(len - 1)
    }

    /// Uniform integer in `lo..=hi`. Bounds are swapped if reversed.
    pub fn range_inclusive(&mut self, lo: usize, hi: usize) -> usize {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        lo + self.index(hi - lo + 1)
    }

    /// Uniformly chosen element, `None` for an empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.index(items.len()))
    }

    /// Fisher–Yates shuffle, walking from the last index down.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }
}

impl Iterator for SeededRng {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_f64())
    }
}

// =============================================================================
// TESTS
// =============================================================================
