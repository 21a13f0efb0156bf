//! Deterministic seeded random streams.
//!
//! All procedural placement decisions draw from a [`SeededRng`], a thin
//! wrapper around a portable ChaCha generator. The same seed produces the
//! same infinite sequence of unit floats on every platform and every run,
//! which is what makes world generation reproducible bit-for-bit.
//!
//! Subsystems sharing one world seed derive independent streams via
//! [`SeededRng::stream`] with a fixed per-subsystem offset, so no subsystem
//! can perturb another's draws.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic random stream yielding floats in `[0, 1)`.
#[derive(Debug, Clone)]
pub struct SeededRng {
    inner: ChaCha8Rng,
}

impl SeededRng {
    /// Create a stream from a raw seed.
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Derive a dedicated sub-stream from a shared world seed.
    ///
    /// `offset` is a fixed per-subsystem constant; streams with different
    /// offsets are statistically independent and never consume from each
    /// other.
    pub fn stream(world_seed: u64, offset: u64) -> Self {
        Self::new(world_seed.wrapping_add(offset))
    }

    /// Next value in `[0, 1)`.
    #[inline]
    pub fn next_unit(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Next value in `[min, max)`.
    #[inline]
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.next_unit()
    }

    /// Uniformly pick an index into a collection of `len` elements.
    ///
    /// `len` must be non-zero.
    #[inline]
    pub fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "pick_index on empty collection");
        ((self.next_unit() * len as f64) as usize).min(len - 1)
    }
}
