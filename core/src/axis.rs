//! Axis and direction arithmetic used to walk board lanes.
//!
//! Every swipe is reduced to a [`MovementDescriptor`]: the axis tiles travel
//! along and the edge they travel toward. The walking primitives below are
//! shared by the movement and outcome systems so both visit cells in the
//! same order.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CellCoord, GameError};

/// Board dimension selected as the travel axis of a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Tiles travel along the column index.
    X,
    /// Tiles travel along the row index.
    Y,
}

impl FromStr for Axis {
    type Err = GameError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "X" | "x" => Ok(Self::X),
            "Y" | "y" => Ok(Self::Y),
            other => Err(GameError::InvalidAxis(other.to_owned())),
        }
    }
}

/// Edge of the travel axis that tiles slide toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Tiles travel toward index zero.
    Start,
    /// Tiles travel toward the last index.
    End,
}

impl FromStr for Direction {
    type Err = GameError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "Start" | "start" => Ok(Self::Start),
            "End" | "end" => Ok(Self::End),
            other => Err(GameError::InvalidDirection(other.to_owned())),
        }
    }
}

/// Directional input supplied by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwipeCommand {
    /// Swipe toward the top row.
    Up,
    /// Swipe toward the bottom row.
    Down,
    /// Swipe toward the leftmost column.
    Left,
    /// Swipe toward the rightmost column.
    Right,
}

impl SwipeCommand {
    /// Resolves the swipe into the movement it requests.
    #[must_use]
    pub const fn movement(self) -> MovementDescriptor {
        match self {
            Self::Up => MovementDescriptor::new(Axis::Y, Direction::Start),
            Self::Down => MovementDescriptor::new(Axis::Y, Direction::End),
            Self::Left => MovementDescriptor::new(Axis::X, Direction::Start),
            Self::Right => MovementDescriptor::new(Axis::X, Direction::End),
        }
    }
}

impl FromStr for SwipeCommand {
    type Err = GameError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "up" | "u" | "arrowup" => Ok(Self::Up),
            "down" | "d" | "arrowdown" => Ok(Self::Down),
            "left" | "l" | "arrowleft" => Ok(Self::Left),
            "right" | "r" | "arrowright" => Ok(Self::Right),
            _ => Err(GameError::InvalidCommand(trimmed.to_owned())),
        }
    }
}

/// Travel axis and target edge of a single move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MovementDescriptor {
    axis: Axis,
    direction: Direction,
}

impl MovementDescriptor {
    /// Creates a descriptor from its axis and direction.
    #[must_use]
    pub const fn new(axis: Axis, direction: Direction) -> Self {
        Self { axis, direction }
    }

    /// Axis tiles travel along.
    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    /// Edge tiles travel toward.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }
}

/// Parses raw directional input and resolves it into a movement.
///
/// Accepts `up`, `down`, `left`, `right`, their first letters, and the
/// browser key names `ArrowUp` through `ArrowRight`, ignoring case.
pub fn movement_for_input(input: &str) -> Result<MovementDescriptor, GameError> {
    input.parse::<SwipeCommand>().map(SwipeCommand::movement)
}

/// Coordinate expressed relative to a movement's travel axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LanePosition {
    axis: Axis,
    main_index: u32,
    cross_index: u32,
}

impl LanePosition {
    /// Creates a lane-relative position.
    #[must_use]
    pub const fn new(axis: Axis, main_index: u32, cross_index: u32) -> Self {
        Self {
            axis,
            main_index,
            cross_index,
        }
    }

    /// Resolves the position into absolute board coordinates.
    ///
    /// The roles of the two indices are swapped for [`Axis::Y`]; both axes
    /// address the same matrix.
    #[must_use]
    pub const fn to_cell(&self) -> CellCoord {
        match self.axis {
            Axis::X => CellCoord::new(self.main_index, self.cross_index),
            Axis::Y => CellCoord::new(self.cross_index, self.main_index),
        }
    }
}

/// First pivot index visited when walking toward `direction`.
#[must_use]
pub const fn start_index(direction: Direction, size: u32) -> i64 {
    match direction {
        Direction::Start => 0,
        Direction::End => size as i64 - 1,
    }
}

/// Reports whether a walk toward `direction` should visit `index`.
///
/// Pivot walks stop one short of the far edge; lookup scans pass
/// `inclusive = true` to reach it.
#[must_use]
pub const fn should_continue(direction: Direction, index: i64, size: u32, inclusive: bool) -> bool {
    let size = size as i64;
    match direction {
        Direction::Start => {
            if inclusive {
                index < size
            } else {
                index < size - 1
            }
        }
        Direction::End => {
            if inclusive {
                index >= 0
            } else {
                index > 0
            }
        }
    }
}

/// Advances `index` one step away from the target edge, or back toward it
/// when `reverse` is set.
#[must_use]
pub const fn step_index(direction: Direction, index: i64, reverse: bool) -> i64 {
    match (direction, reverse) {
        (Direction::Start, false) | (Direction::End, true) => index + 1,
        (Direction::Start, true) | (Direction::End, false) => index - 1,
    }
}
