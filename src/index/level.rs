//! Level generation for skiplist nodes.
//!
//! A node's level is drawn by flipping a biased coin until it comes up tails
//! or the ceiling is reached, which gives a geometric distribution truncated
//! at `max_level`. The coin itself is a [`LevelSource`], so tests can swap in
//! a seeded or scripted source and get the same index shape on every run.

use rand::prelude::*;

/// A source of uniform draws in `[0, 1)`.
pub trait LevelSource: Send {
    /// Return the next draw.
    fn next_draw(&mut self) -> f64;
}

/// [`LevelSource`] backed by a `StdRng`.
#[derive(Debug, Clone)]
pub struct RngLevelSource {
    rng: StdRng,
}

impl RngLevelSource {
    /// A source with a fixed seed, for reproducible index shapes.
    pub fn seeded(seed: u64) -> Self {
        RngLevelSource {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A source seeded from OS entropy.
    pub fn from_entropy() -> Self {
        RngLevelSource {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Build the source a configuration asks for.
    pub fn for_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl LevelSource for RngLevelSource {
    fn next_draw(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Draws node levels from a [`LevelSource`].
pub struct LevelGenerator {
    source: Box<dyn LevelSource>,
    max_level: usize,
    probability: f64,
}

impl LevelGenerator {
    /// Create a generator. The caller is responsible for having validated
    /// `max_level` and `probability`.
    pub fn new(source: Box<dyn LevelSource>, max_level: usize, probability: f64) -> Self {
        LevelGenerator {
            source,
            max_level,
            probability,
        }
    }

    /// Draw the level for a new node, in `0..=max_level`.
    pub fn next_level(&mut self) -> usize {
        let mut level = 0;
        while level < self.max_level && self.source.next_draw() < self.probability {
            level += 1;
        }
        level
    }
}

impl std::fmt::Debug for LevelGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LevelGenerator")
            .field("max_level", &self.max_level)
            .field("probability", &self.probability)
            .finish()
    }
}
