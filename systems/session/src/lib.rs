#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Game driver that wires the world to the movement, spawning, and outcome systems.
//!
//! A presentation layer owns a [`Session`], forwards swipes to it, advances
//! its clock so merge completions run, and re-renders from the board and the
//! drained event log.

use std::time::Duration;

use log::{debug, warn};
use slide_merge_core::{
    Command, Event, GameError, GameStatus, MovementDescriptor, SwipeCommand, TileValue,
    DEFAULT_BOARD_SIZE, DEFAULT_TARGET_VALUE, MERGE_COMPLETION_DELAY,
};
use slide_merge_system_movement::Movement;
use slide_merge_system_outcome::Outcome;
use slide_merge_system_spawning::{Config as SpawnConfig, SpawnPolicy, Spawning};
use slide_merge_world::{self as world, query, Board, World};

/// Tiles placed on a fresh board unless configured otherwise.
pub const DEFAULT_INITIAL_TILES: usize = 2;

/// Parameters that shape a game.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    board_size: u32,
    target: TileValue,
    initial_tiles: usize,
    policy: SpawnPolicy,
    rng_seed: Option<u64>,
    merge_delay: Duration,
}

impl SessionConfig {
    /// Creates a configuration with default board size, target, and timing.
    #[must_use]
    pub fn new(policy: SpawnPolicy) -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            target: DEFAULT_TARGET_VALUE,
            initial_tiles: DEFAULT_INITIAL_TILES,
            policy,
            rng_seed: None,
            merge_delay: MERGE_COMPLETION_DELAY,
        }
    }

    /// Sets the number of cells along each board edge.
    #[must_use]
    pub fn with_board_size(mut self, board_size: u32) -> Self {
        self.board_size = board_size;
        self
    }

    /// Sets the tile value that wins the game.
    #[must_use]
    pub fn with_target(mut self, target: TileValue) -> Self {
        self.target = target;
        self
    }

    /// Sets how many tiles a fresh board starts with.
    #[must_use]
    pub fn with_initial_tiles(mut self, initial_tiles: usize) -> Self {
        self.initial_tiles = initial_tiles;
        self
    }

    /// Seeds tile placement so games replay identically.
    #[must_use]
    pub fn with_rng_seed(mut self, rng_seed: u64) -> Self {
        self.rng_seed = Some(rng_seed);
        self
    }

    /// Sets how long merges play before completing.
    #[must_use]
    pub fn with_merge_delay(mut self, merge_delay: Duration) -> Self {
        self.merge_delay = merge_delay;
        self
    }

    /// Number of cells along each board edge.
    #[must_use]
    pub const fn board_size(&self) -> u32 {
        self.board_size
    }

    /// Tile value that wins the game.
    #[must_use]
    pub const fn target(&self) -> TileValue {
        self.target
    }

    /// Number of tiles a fresh board starts with.
    #[must_use]
    pub const fn initial_tiles(&self) -> usize {
        self.initial_tiles
    }

    /// Spawn policy applied to every new tile.
    #[must_use]
    pub const fn policy(&self) -> &SpawnPolicy {
        &self.policy
    }
}

/// A running game.
#[derive(Debug)]
pub struct Session {
    world: World,
    movement: Movement,
    spawning: Spawning,
    outcome: Outcome,
    board_size: u32,
    initial_tiles: usize,
    merge_delay: Duration,
    events: Vec<Event>,
}

impl Session {
    /// Creates a session and starts its first game.
    pub fn new(config: SessionConfig) -> Result<Self, GameError> {
        let spawn_config = match config.rng_seed {
            Some(seed) => SpawnConfig::new(config.policy, seed),
            None => SpawnConfig::unseeded(config.policy),
        };
        let mut session = Self {
            world: World::with_merge_delay(config.merge_delay),
            movement: Movement::default(),
            spawning: Spawning::new(spawn_config),
            outcome: Outcome::new(config.target),
            board_size: config.board_size,
            initial_tiles: config.initial_tiles,
            merge_delay: config.merge_delay,
            events: Vec::new(),
        };
        session.restart()?;
        Ok(session)
    }

    /// Discards the current board and starts a new game.
    pub fn restart(&mut self) -> Result<(), GameError> {
        self.execute(Command::ConfigureBoard {
            size: self.board_size,
        })?;
        self.outcome.reset();
        for _ in 0..self.initial_tiles {
            if !self.spawn()? {
                break;
            }
        }
        let _ = self.refresh_status()?;
        Ok(())
    }

    /// Applies a swipe, spawning a new tile when anything moved.
    pub fn swipe(&mut self, swipe: SwipeCommand) -> Result<bool, GameError> {
        self.apply_movement(swipe.movement())
    }

    /// Applies a resolved movement, spawning a new tile when anything moved.
    ///
    /// Fails with [`GameError::MergesPending`] until the merges started by the
    /// previous move have completed; see [`Session::advance`] and
    /// [`Session::settle`].
    pub fn apply_movement(&mut self, movement: MovementDescriptor) -> Result<bool, GameError> {
        let mut commands = Vec::new();
        let moved = self
            .movement
            .handle(
                movement,
                query::board(&self.world),
                query::pending_merges(&self.world),
                &mut commands,
            )
            .inspect_err(|error| warn!("rejected {movement:?}: {error}"))?;

        for command in commands {
            self.execute(command)?;
        }

        if moved {
            let _ = self.spawn()?;
            let _ = self.refresh_status()?;
        } else {
            debug!("{movement:?} left the board unchanged");
        }
        Ok(moved)
    }

    /// Advances the clock, completing merges whose animation has finished.
    pub fn advance(&mut self, dt: Duration) -> Result<(), GameError> {
        self.execute(Command::Tick { dt })?;
        let _ = self.refresh_status()?;
        Ok(())
    }

    /// Completes every pending merge immediately.
    pub fn settle(&mut self) -> Result<(), GameError> {
        if query::pending_merges(&self.world) == 0 {
            return Ok(());
        }
        self.advance(self.merge_delay)
    }

    /// Current game status.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.outcome.status()
    }

    /// Board of the running game.
    #[must_use]
    pub fn board(&self) -> Option<&Board> {
        query::board(&self.world)
    }

    /// Number of merges still waiting to complete.
    #[must_use]
    pub fn pending_merges(&self) -> usize {
        query::pending_merges(&self.world)
    }

    /// Takes every event broadcast since the previous drain.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    fn spawn(&mut self) -> Result<bool, GameError> {
        let mut commands = Vec::new();
        let spawned = self
            .spawning
            .handle(query::board(&self.world), &mut commands)?;
        for command in commands {
            self.execute(command)?;
        }
        Ok(spawned)
    }

    fn refresh_status(&mut self) -> Result<GameStatus, GameError> {
        // Values are only final once every merge has completed.
        if query::pending_merges(&self.world) > 0 {
            return Ok(self.outcome.status());
        }
        self.outcome.evaluate(query::board(&self.world))
    }

    fn execute(&mut self, command: Command) -> Result<(), GameError> {
        world::apply(&mut self.world, command, &mut self.events)
    }
}
