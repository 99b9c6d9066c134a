//! Engine configuration - plain values resolved by the host at start-up.

use crate::gravity::GravityMode;
use crate::rng::Randomizer;
use crate::types::LINES_PER_LEVEL;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Seed for the piece randomizer.
    pub seed: u32,
    pub gravity: GravityMode,
    /// Cleared lines per level step.
    pub lines_per_level: u32,
    pub randomizer: Randomizer,
}

impl EngineConfig {
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_gravity(mut self, gravity: GravityMode) -> Self {
        self.gravity = gravity;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            gravity: GravityMode::Leveled,
            lines_per_level: LINES_PER_LEVEL,
            randomizer: Randomizer::Bag,
        }
    }
}
