//! Injected randomness.
//!
//! The model never owns a generator. Every random decision goes through the
//! [`Draw`] trait so runs can be seeded or replayed draw by draw.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Source of the two uniform draws the model needs.
pub trait Draw {
    /// Uniform integer in `low..=high`.
    fn uniform_int(&mut self, low: u32, high: u32) -> u32;

    /// Uniform index into a collection of `len` elements. `len` is never zero.
    fn choose_index(&mut self, len: usize) -> usize;
}

/// Seeded random number generator
pub struct SimRng(pub SmallRng);

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}

impl Draw for SimRng {
    fn uniform_int(&mut self, low: u32, high: u32) -> u32 {
        self.0.gen_range(low..=high)
    }

    fn choose_index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

/// Replays a fixed sequence of raw draws, cycling once exhausted.
///
/// Integer draws map a raw value `v` to `low + v % (high - low + 1)`, index
/// draws to `v % len`, so a script of small numbers reads literally. An empty
/// script draws 0 forever.
///
/// A script that never yields two distinct indices cannot form a pair;
/// `select_pair` reports that as `SimError::PairSelectionStalled` rather than
/// spinning.
#[derive(Debug, Clone)]
pub struct ScriptedDraw {
    script: VecDeque<u64>,
    consumed: usize,
}

impl ScriptedDraw {
    pub fn new(script: impl IntoIterator<Item = u64>) -> Self {
        let script: VecDeque<u64> = script.into_iter().collect();
        Self { script, consumed: 0 }
    }

    /// Number of draws taken so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    fn next_raw(&mut self) -> u64 {
        self.consumed += 1;
        match self.script.pop_front() {
            Some(v) => {
                self.script.push_back(v);
                v
            }
            None => 0,
        }
    }
}

impl Draw for ScriptedDraw {
    fn uniform_int(&mut self, low: u32, high: u32) -> u32 {
        let span = u64::from(high - low) + 1;
        low + (self.next_raw() % span) as u32
    }

    fn choose_index(&mut self, len: usize) -> usize {
        (self.next_raw() % len as u64) as usize
    }
}
