//! Clock and randomness providers injected into the scheduler.

use std::collections::VecDeque;

use chrono::{Local, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of "today" for anchoring horizons.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// The local calendar date of the host.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one date.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Source of the random base draw.
pub trait RandomSource {
    /// A uniform value in `[0, upper)`.
    fn draw(&mut self, upper: f64) -> f64;
}

/// Random draws backed by a ChaCha8 generator.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    /// Reproducible draws from a fixed seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Draws seeded from the thread-local generator.
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }

    /// Seeded when a seed is given, otherwise from entropy.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn draw(&mut self, upper: f64) -> f64 {
        self.rng.random::<f64>() * upper
    }
}

/// Returns the same value for every draw, ignoring the bound.
#[derive(Clone, Copy, Debug)]
pub struct ConstantRandom(pub f64);

impl RandomSource for ConstantRandom {
    fn draw(&mut self, _upper: f64) -> f64 {
        self.0
    }
}

/// Replays a fixed script of values, cycling once exhausted.
#[derive(Clone, Debug)]
pub struct ScriptedRandom {
    script: VecDeque<f64>,
}

impl ScriptedRandom {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            script: values.into_iter().collect(),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn draw(&mut self, _upper: f64) -> f64 {
        match self.script.pop_front() {
            Some(value) => {
                self.script.push_back(value);
                value
            }
            None => 0.0,
        }
    }
}
