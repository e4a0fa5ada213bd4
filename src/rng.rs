//! Randomness seam for dice rolls and card draws.
//!
//! The engine only talks to `RandomSource`, so production play uses a
//! seedable PRNG while tests inject pre-scripted sequences.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource {
    /// One uniform die face in `1..=6`.
    fn roll_die(&mut self) -> u8;
    /// One uniform index in `0..n`.
    fn pick(&mut self, n: usize) -> usize;
}

/// Production source backed by a seedable PRNG.
#[derive(Debug)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        SeededRandom { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        SeededRandom { rng: StdRng::from_entropy() }
    }
}

impl RandomSource for SeededRandom {
    fn roll_die(&mut self) -> u8 {
        self.rng.gen_range(1..=6)
    }

    fn pick(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n)
    }
}

/// Replays a fixed sequence of values; dice and card draws consume from the
/// same queue in call order. Intended for tests and replay drivers.
#[derive(Debug, Default)]
pub struct ScriptedRandom {
    values: VecDeque<usize>,
}

impl ScriptedRandom {
    pub fn new(values: impl IntoIterator<Item = usize>) -> Self {
        ScriptedRandom { values: values.into_iter().collect() }
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn roll_die(&mut self) -> u8 {
        let v = self.values.pop_front().unwrap_or(1);
        v.clamp(1, 6) as u8
    }

    fn pick(&mut self, n: usize) -> usize {
        let v = self.values.pop_front().unwrap_or(0);
        if n == 0 { 0 } else { v % n }
    }
}
