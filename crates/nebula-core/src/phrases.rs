use rand::prelude::*;
use smallvec::SmallVec;

use crate::error::ConfigError;

/// Non-repeating random picker over a fixed phrase pool.
///
/// Each cycle hands out every phrase exactly once in random order. When the
/// unused set runs dry it is refilled transparently and a new cycle starts.
pub struct PhraseSelector {
    phrases: Vec<String>,
    unused: SmallVec<[usize; 32]>,
    rng: StdRng,
    selections: u64,
    cycles: u64,
}

impl PhraseSelector {
    pub fn new(phrases: Vec<String>, seed: u64) -> Result<Self, ConfigError> {
        if phrases.is_empty() {
            return Err(ConfigError::EmptyPhrasePool);
        }
        let unused = (0..phrases.len()).collect();
        Ok(Self {
            phrases,
            unused,
            rng: StdRng::seed_from_u64(seed),
            selections: 0,
            cycles: 0,
        })
    }

    /// Pick a phrase not yet returned in the current cycle.
    pub fn select(&mut self) -> &str {
        if self.unused.is_empty() {
            self.unused.extend(0..self.phrases.len());
            self.cycles += 1;
            log::debug!("[phrases] pool exhausted, starting cycle {}", self.cycles + 1);
        }
        let slot = self.rng.gen_range(0..self.unused.len());
        let index = self.unused.swap_remove(slot);
        self.selections += 1;
        &self.phrases[index]
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Phrases still available before the next refill.
    pub fn remaining(&self) -> usize {
        self.unused.len()
    }

    /// Total number of `select` calls.
    pub fn selections(&self) -> u64 {
        self.selections
    }

    /// Number of completed refills.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }
}
