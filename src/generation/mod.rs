//! # Generation Module
//!
//! Procedural dungeon generation: grid topology, start/end selection, and
//! content placement.
//!
//! Generation is fully deterministic given a seed. Every random choice is
//! drawn from one `StdRng` passed explicitly through the build, in a fixed
//! order: candidate edge draws, interconnectivity draws, start/end search,
//! then treasure, arrow, and monster placement.

pub mod dungeon;
pub(crate) mod topology;

pub use dungeon::Dungeon;

use crate::{GameError, GameResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Parameters controlling dungeon generation.
///
/// Dimensions and interconnectivity are unsigned, so the negative-value
/// rejections of the original rules hold by construction; the remaining
/// range checks live in [`DungeonConfig::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonConfig {
    /// Rows in the dungeon grid
    pub rows: usize,
    /// Columns in the dungeon grid
    pub cols: usize,
    /// Whether grid edges wrap to the opposite boundary (toroidal topology)
    pub wrapping: bool,
    /// Extra non-tree edges added on top of the spanning tree
    pub interconnectivity: usize,
    /// Percentage of caves to fill with treasure, 0 to 100; also drives the
    /// fraction of locations seeded with arrows
    pub treasure_percent: f64,
    /// Number of monsters; the end cave always holds one
    pub monster_count: usize,
    /// Seed for the deterministic random stream
    pub seed: u64,
}

impl DungeonConfig {
    /// Creates a configuration with the given seed and sensible defaults.
    pub fn new(seed: u64) -> Self {
        Self {
            rows: 6,
            cols: 6,
            wrapping: false,
            interconnectivity: 2,
            treasure_percent: 50.0,
            monster_count: 1,
            seed,
        }
    }

    /// Creates a small, easy configuration for tests.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            rows: 5,
            cols: 5,
            wrapping: false,
            interconnectivity: 1,
            treasure_percent: 40.0,
            monster_count: 1,
            seed,
        }
    }

    /// Rejects invalid parameters before any randomness is consumed.
    pub fn validate(&self) -> GameResult<()> {
        if self.rows == 0 {
            return Err(GameError::InvalidConfig(
                "number of rows must be positive".to_string(),
            ));
        }
        if self.cols == 0 {
            return Err(GameError::InvalidConfig(
                "number of columns must be positive".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&self.treasure_percent) {
            return Err(GameError::InvalidConfig(format!(
                "treasure percentage {} must be between 0 and 100",
                self.treasure_percent
            )));
        }
        if self.monster_count < 1 {
            return Err(GameError::InvalidConfig(
                "there must be at least one monster, at the end cave".to_string(),
            ));
        }
        Ok(())
    }

    /// Creates the seeded random stream that drives generation and play.
    pub fn create_rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self::new(42)
    }
}
