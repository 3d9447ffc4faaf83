#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Spawning system responsible for emitting new tile commands.

mod random;

use log::debug;
use slide_merge_core::{Command, GameError, TileValue};
use slide_merge_world::Board;

pub use random::TileRng;

/// Candidate values for new tiles.
///
/// Repeating a value in `values` biases the draw toward it; `[2, 2, 2, 4]`
/// yields a four a quarter of the time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnPolicy {
    first_tile: Option<TileValue>,
    values: Vec<TileValue>,
}

impl SpawnPolicy {
    /// Creates a policy, rejecting an empty candidate pool.
    pub fn new(first_tile: Option<TileValue>, values: Vec<TileValue>) -> Result<Self, GameError> {
        if values.is_empty() {
            return Err(GameError::EmptyValuePool);
        }
        Ok(Self { first_tile, values })
    }

    /// Value forced onto the first tile of a game, if any.
    #[must_use]
    pub const fn first_tile(&self) -> Option<TileValue> {
        self.first_tile
    }

    /// Weighted candidate pool used for every other spawn.
    #[must_use]
    pub fn values(&self) -> &[TileValue] {
        &self.values
    }
}

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Debug)]
pub struct Config {
    policy: SpawnPolicy,
    rng_seed: Option<u64>,
}

impl Config {
    /// Creates a configuration that draws from the provided seed.
    #[must_use]
    pub const fn new(policy: SpawnPolicy, rng_seed: u64) -> Self {
        Self {
            policy,
            rng_seed: Some(rng_seed),
        }
    }

    /// Creates a configuration seeded from operating system entropy.
    #[must_use]
    pub const fn unseeded(policy: SpawnPolicy) -> Self {
        Self {
            policy,
            rng_seed: None,
        }
    }
}

/// Pure system that picks a random empty cell and value for new tiles.
#[derive(Debug)]
pub struct Spawning {
    policy: SpawnPolicy,
    rng: TileRng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => TileRng::from_seed(seed),
            None => TileRng::from_entropy(),
        };
        Self {
            policy: config.policy,
            rng,
        }
    }

    /// Emits a spawn command for a random empty cell.
    ///
    /// Returns `false` without emitting anything when the board is full.
    pub fn handle(
        &mut self,
        board: Option<&Board>,
        out: &mut Vec<Command>,
    ) -> Result<bool, GameError> {
        let board = board.ok_or(GameError::UninitializedState)?;
        let candidates = board.empty_cells();
        let Some(&cell) = self.rng.pick(&candidates) else {
            debug!("no empty cell left for a new tile");
            return Ok(false);
        };

        let value = self.next_value(board.is_empty())?;
        debug!("spawning {value} at {cell}");
        out.push(Command::SpawnTile { cell, value });
        Ok(true)
    }

    fn next_value(&mut self, first_of_game: bool) -> Result<TileValue, GameError> {
        if first_of_game {
            if let Some(value) = self.policy.first_tile {
                return Ok(value);
            }
        }
        self.rng
            .pick(&self.policy.values)
            .copied()
            .ok_or(GameError::EmptyValuePool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(raw: u32) -> TileValue {
        TileValue::new(raw).expect("valid tile value")
    }

    #[test]
    fn empty_pools_are_rejected() {
        assert_eq!(
            SpawnPolicy::new(Some(value(2)), Vec::new()),
            Err(GameError::EmptyValuePool)
        );
    }

    #[test]
    fn first_tile_only_applies_to_an_empty_board() {
        let policy = SpawnPolicy::new(Some(value(2)), vec![value(8)]).expect("policy");
        let mut spawning = Spawning::new(Config::new(policy, 3));
        assert_eq!(spawning.next_value(true), Ok(value(2)));
        assert_eq!(spawning.next_value(false), Ok(value(8)));
    }

    #[test]
    fn pool_is_used_without_first_tile() {
        let policy = SpawnPolicy::new(None, vec![value(4)]).expect("policy");
        let mut spawning = Spawning::new(Config::new(policy, 3));
        assert_eq!(spawning.next_value(true), Ok(value(4)));
    }
}
