//! Injectable randomness.
//!
//! Production uses an entropy-seeded generator; tests seed it or script values.

use rand::prelude::*;
use std::f32::consts::TAU;

pub trait RandomSource {
    /// Uniform sample in `[min, max)`.
    fn uniform(&mut self, min: f32, max: f32) -> f32;

    /// Uniform angle in `[0, 2π)`.
    fn unit_circle_angle(&mut self) -> f32 {
        self.uniform(0.0, TAU)
    }

    fn chance(&mut self, probability: f32) -> bool {
        self.uniform(0.0, 1.0) < probability
    }

    /// Uniform integer in `[min, max)`. `max` must exceed `min`.
    fn int_range(&mut self, min: usize, max: usize) -> usize {
        let v = self.uniform(min as f32, max as f32).floor() as usize;
        v.clamp(min, max.saturating_sub(1))
    }

    fn index(&mut self, len: usize) -> usize {
        self.int_range(0, len.max(1))
    }
}

/// `StdRng`-backed source.
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        (**self).uniform(min, max)
    }
    fn unit_circle_angle(&mut self) -> f32 {
        (**self).unit_circle_angle()
    }
    fn chance(&mut self, probability: f32) -> bool {
        (**self).chance(probability)
    }
    fn int_range(&mut self, min: usize, max: usize) -> usize {
        (**self).int_range(min, max)
    }
}

/// Replays fixed fractions of each requested range, cycling.
#[cfg(test)]
pub(crate) struct ScriptedRandom {
    fractions: Vec<f32>,
    next: usize,
}

#[cfg(test)]
impl ScriptedRandom {
    pub(crate) fn new(fractions: &[f32]) -> Self {
        Self {
            fractions: fractions.to_vec(),
            next: 0,
        }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        let f = self.fractions[self.next % self.fractions.len()];
        self.next += 1;
        min + f * (max - min)
    }
}
