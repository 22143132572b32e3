//! Uniform integer sources for wax depletion and simulated conditions.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform integers in an inclusive range.
pub trait RandomSource {
    /// Returns a value in `[low, high]`. Bounds given in reverse order are
    /// treated as the same range.
    fn uniform_inclusive(&mut self, low: u32, high: u32) -> u32;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn uniform_inclusive(&mut self, low: u32, high: u32) -> u32 {
        (**self).uniform_inclusive(low, high)
    }
}

/// Random source backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngRandomSource<R: Rng> {
    rng: R,
}

impl<R: Rng> RngRandomSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngRandomSource<StdRng> {
    /// Seeds from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible generator for demos and property-style tests.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngRandomSource<R> {
    fn uniform_inclusive(&mut self, low: u32, high: u32) -> u32 {
        let (low, high) = ordered(low, high);
        self.rng.gen_range(low..=high)
    }
}

/// Replays a fixed cyclic sequence of values.
///
/// Values outside the requested range are clamped into it; an empty sequence
/// always yields the lower bound.
#[derive(Debug, Clone)]
pub struct SequenceRandomSource {
    values: Vec<u32>,
    cursor: usize,
}

impl SequenceRandomSource {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// A source that always yields `value` (clamped per call).
    pub fn constant(value: u32) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceRandomSource {
    fn uniform_inclusive(&mut self, low: u32, high: u32) -> u32 {
        let (low, high) = ordered(low, high);
        if self.values.is_empty() {
            return low;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.wrapping_add(1);
        value.clamp(low, high)
    }
}

fn ordered(a: u32, b: u32) -> (u32, u32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
