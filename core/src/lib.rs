#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Slide Merge engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems query immutable snapshots of the board
//! and respond exclusively with new command batches.

pub mod axis;

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use axis::{
    movement_for_input, should_continue, start_index, step_index, Axis, Direction, LanePosition,
    MovementDescriptor, SwipeCommand,
};

/// Board edge length used when no size is configured explicitly.
pub const DEFAULT_BOARD_SIZE: u32 = 4;

/// Largest board edge length a world accepts.
pub const MAX_BOARD_SIZE: u32 = 256;

/// Tile value that wins the game unless configured otherwise.
pub const DEFAULT_TARGET_VALUE: TileValue = TileValue(2048);

/// Simulated time a merge animation plays before the absorbed tile is removed.
pub const MERGE_COMPLETION_DELAY: Duration = Duration::from_millis(100);

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Creates an empty square board, discarding any previous game.
    ConfigureBoard {
        /// Number of cells along each edge.
        size: u32,
    },
    /// Advances the simulation clock, completing merges whose delay elapsed.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Places a new tile into an empty cell.
    SpawnTile {
        /// Cell that receives the tile.
        cell: CellCoord,
        /// Value carried by the new tile.
        value: TileValue,
    },
    /// Slides a tile into an empty cell.
    SlideTile {
        /// Tile being moved.
        tile: TileId,
        /// Destination cell.
        to: CellCoord,
    },
    /// Slides a tile onto an equal-valued tile, starting a merge.
    MergeTile {
        /// Tile that survives the merge and doubles its value.
        tile: TileId,
        /// Tile currently occupying the destination; removed once the merge completes.
        absorbed: TileId,
        /// Destination cell shared by both tiles.
        to: CellCoord,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that a fresh, empty board replaced the previous one.
    BoardConfigured {
        /// Number of cells along each edge.
        size: u32,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a tile was placed on the board.
    TileSpawned {
        /// Identifier allocated to the new tile.
        tile: TileId,
        /// Cell the tile occupies.
        cell: CellCoord,
        /// Value carried by the tile.
        value: TileValue,
    },
    /// Confirms that a tile slid into an empty cell.
    TileSlid {
        /// Tile that moved.
        tile: TileId,
        /// Cell the tile occupied before moving.
        from: CellCoord,
        /// Cell the tile occupies after moving.
        to: CellCoord,
    },
    /// Confirms that a tile slid onto an equal-valued tile.
    MergeStarted {
        /// Tile that survives the merge.
        tile: TileId,
        /// Tile that will be removed once the merge completes.
        absorbed: TileId,
        /// Cell the surviving tile occupied before moving.
        from: CellCoord,
        /// Cell shared by both tiles.
        to: CellCoord,
    },
    /// Confirms that a merge finished: the survivor doubled and the absorbed tile is gone.
    MergeCompleted {
        /// Tile that survived the merge.
        tile: TileId,
        /// Tile removed from the board.
        absorbed: TileId,
        /// Value carried by the survivor after doubling.
        value: TileValue,
    },
}

/// Contract violations reported by the engine.
///
/// All variants indicate a caller bug; none of them are retried.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// An axis outside `{X, Y}` reached a positional operation.
    #[error("invalid axis `{0}`")]
    InvalidAxis(String),
    /// A direction outside `{Start, End}` reached a walking primitive.
    #[error("invalid movement direction `{0}`")]
    InvalidDirection(String),
    /// Directional input did not name a known swipe.
    #[error("invalid command `{0}`")]
    InvalidCommand(String),
    /// Movement or placement was requested before a board exists.
    #[error("board has not been configured")]
    UninitializedState,
    /// A move was requested while merges from the previous move are still playing.
    #[error("{0} merge completion(s) still pending")]
    MergesPending(usize),
    /// A coordinate fell outside the board.
    #[error("cell {cell} lies outside a {size}x{size} board")]
    OutOfBounds {
        /// Offending cell.
        cell: CellCoord,
        /// Edge length of the board.
        size: u32,
    },
    /// A tile was directed into a cell that already holds another tile.
    #[error("cell {0} is already occupied")]
    CellOccupied(CellCoord),
    /// A command referenced a tile that is not on the board.
    #[error("unknown tile {0}")]
    UnknownTile(TileId),
    /// A merge paired two tiles with different values.
    #[error("tiles {tile} and {absorbed} do not share a value")]
    MismatchedMerge {
        /// Tile that attempted to merge.
        tile: TileId,
        /// Tile it attempted to absorb.
        absorbed: TileId,
    },
    /// The spawn policy holds no candidate values.
    #[error("spawn policy has no candidate values")]
    EmptyValuePool,
    /// A tile value was zero or not a power of two.
    #[error("tile value {0} is not a positive power of two")]
    InvalidTileValue(u32),
    /// A board edge length outside `1..=MAX_BOARD_SIZE` was requested.
    #[error("board size must be between 1 and {max}, got {0}", max = MAX_BOARD_SIZE)]
    InvalidBoardSize(u32),
    /// Two tiles whose doubled value does not fit a `u32` were asked to merge.
    #[error("merging two {0} tiles would overflow")]
    ValueOverflow(TileValue),
}

/// Location of a single board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    x: u32,
    y: u32,
}

impl CellCoord {
    /// Creates a new board cell coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }
}

/// Unique identifier assigned to a tile for its whole lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(u32);

impl TileId {
    /// Creates a new tile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile-{}", self.0)
    }
}

/// Number carried by a tile; always a positive power of two.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TileValue(u32);

impl TileValue {
    /// Validates and wraps a raw tile value.
    pub fn new(value: u32) -> Result<Self, GameError> {
        if value.is_power_of_two() {
            Ok(Self(value))
        } else {
            Err(GameError::InvalidTileValue(value))
        }
    }

    /// Retrieves the raw value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Value produced when two tiles carrying `self` merge.
    ///
    /// `None` for `2^31`, the largest value a tile can carry; such tiles
    /// never merge.
    #[must_use]
    pub const fn doubled(self) -> Option<Self> {
        match self.0.checked_mul(2) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }
}

impl TryFrom<u32> for TileValue {
    type Error = GameError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TileValue> for u32 {
    fn from(value: TileValue) -> Self {
        value.0
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Display for TileValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle stage of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TilePhase {
    /// The tile occupies a cell and takes part in moves.
    Live,
    /// The tile was absorbed by a merge and awaits removal; it occupies no cell.
    PendingRemoval,
}

/// Immutable representation of a single tile used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileSnapshot {
    /// Identifier allocated to the tile.
    pub id: TileId,
    /// Value currently carried by the tile.
    pub value: TileValue,
    /// Cell the tile occupies, or last occupied when pending removal.
    pub cell: CellCoord,
    /// Lifecycle stage of the tile.
    pub phase: TilePhase,
}

/// Read-only snapshot describing every tile known to the board.
#[derive(Clone, Debug, Default)]
pub struct TileView {
    snapshots: Vec<TileSnapshot>,
}

impl TileView {
    /// Creates a new tile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured tile snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &TileSnapshot> {
        self.snapshots.iter()
    }

    /// Iterator over tiles that still occupy a cell.
    pub fn live(&self) -> impl Iterator<Item = &TileSnapshot> {
        self.snapshots
            .iter()
            .filter(|snapshot| snapshot.phase == TilePhase::Live)
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TileSnapshot> {
        self.snapshots
    }
}

/// Progress of a game as judged by the outcome system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Moves are still possible and the target has not been reached.
    Started,
    /// A tile reached the target value.
    Won,
    /// No move can change the board.
    Lost,
}
