#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Slide Merge.

mod board;

use std::time::Duration;

use log::{debug, info, trace};
use slide_merge_core::{
    Axis, CellCoord, Command, Event, GameError, LanePosition, TileId, TilePhase,
    MERGE_COMPLETION_DELAY,
};

pub use board::Board;

/// Represents the authoritative Slide Merge world state.
#[derive(Debug)]
pub struct World {
    board: Option<Board>,
    pending_merges: Vec<PendingMerge>,
    merge_delay: Duration,
}

impl World {
    /// Creates a world without a board; `Command::ConfigureBoard` starts a game.
    #[must_use]
    pub fn new() -> Self {
        Self::with_merge_delay(MERGE_COMPLETION_DELAY)
    }

    /// Creates a world whose merges complete after the provided delay.
    #[must_use]
    pub fn with_merge_delay(merge_delay: Duration) -> Self {
        Self {
            board: None,
            pending_merges: Vec::new(),
            merge_delay,
        }
    }

    fn board_mut(&mut self) -> Result<&mut Board, GameError> {
        self.board.as_mut().ok_or(GameError::UninitializedState)
    }

    fn advance_merges(
        &mut self,
        dt: Duration,
        out_events: &mut Vec<Event>,
    ) -> Result<(), GameError> {
        if self.pending_merges.is_empty() {
            return Ok(());
        }

        for merge in &mut self.pending_merges {
            merge.elapsed = merge.elapsed.saturating_add(dt);
        }

        let delay = self.merge_delay;
        let (due, waiting): (Vec<PendingMerge>, Vec<PendingMerge>) = self
            .pending_merges
            .drain(..)
            .partition(|merge| merge.elapsed >= delay);
        self.pending_merges = waiting;

        let board = self.board_mut()?;
        for merge in due {
            let _ = board.remove_tile(merge.absorbed);
            let Some(survivor) = board.tile(merge.tile) else {
                continue;
            };
            let value = survivor
                .value
                .doubled()
                .ok_or(GameError::ValueOverflow(survivor.value))?;
            board.set_value(merge.tile, value)?;
            trace!("{} absorbed {} and now holds {value}", merge.tile, merge.absorbed);
            out_events.push(Event::MergeCompleted {
                tile: merge.tile,
                absorbed: merge.absorbed,
                value,
            });
        }
        Ok(())
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Commands that violate the board contract are rejected without touching the
/// world and reported as [`GameError`].
pub fn apply(
    world: &mut World,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<(), GameError> {
    debug!("applying {command:?}");
    match command {
        Command::ConfigureBoard { size } => {
            world.board = Some(Board::new(size)?);
            world.pending_merges.clear();
            info!("configured {size}x{size} board");
            out_events.push(Event::BoardConfigured { size });
        }
        Command::Tick { dt } => {
            out_events.push(Event::TimeAdvanced { dt });
            world.advance_merges(dt, out_events)?;
        }
        Command::SpawnTile { cell, value } => {
            let tile = world.board_mut()?.insert_tile(cell, value)?;
            out_events.push(Event::TileSpawned { tile, cell, value });
        }
        Command::SlideTile { tile, to } => {
            let board = world.board_mut()?;
            let from = live_cell(board, tile)?;
            if from == to {
                return Ok(());
            }
            if board.occupant(to).is_some() {
                return Err(GameError::CellOccupied(to));
            }
            relocate(board, tile, from, to)?;
            out_events.push(Event::TileSlid { tile, from, to });
        }
        Command::MergeTile { tile, absorbed, to } => {
            let board = world.board_mut()?;
            let from = live_cell(board, tile)?;
            if tile == absorbed {
                return Err(GameError::MismatchedMerge { tile, absorbed });
            }
            if board.occupant(to) != Some(absorbed) {
                return Err(GameError::UnknownTile(absorbed));
            }
            let value = board.value_at(from);
            if value != board.value_at(to) {
                return Err(GameError::MismatchedMerge { tile, absorbed });
            }
            if let Some(value) = value.filter(|value| value.doubled().is_none()) {
                return Err(GameError::ValueOverflow(value));
            }
            board.mark_pending_removal(absorbed)?;
            relocate(board, tile, from, to)?;
            world.pending_merges.push(PendingMerge {
                tile,
                absorbed,
                elapsed: Duration::ZERO,
            });
            out_events.push(Event::MergeStarted {
                tile,
                absorbed,
                from,
                to,
            });
        }
    }
    Ok(())
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{Board, World};
    use slide_merge_core::TileView;

    /// Provides read-only access to the board, if one has been configured.
    #[must_use]
    pub fn board(world: &World) -> Option<&Board> {
        world.board.as_ref()
    }

    /// Captures every tile on the board, including tiles awaiting removal.
    #[must_use]
    pub fn tile_view(world: &World) -> TileView {
        world.board.as_ref().map(Board::tile_view).unwrap_or_default()
    }

    /// Number of merges whose completion has not run yet.
    #[must_use]
    pub fn pending_merges(world: &World) -> usize {
        world.pending_merges.len()
    }
}

#[derive(Clone, Copy, Debug)]
struct PendingMerge {
    tile: TileId,
    absorbed: TileId,
    elapsed: Duration,
}

fn live_cell(board: &Board, tile: TileId) -> Result<CellCoord, GameError> {
    match board.tile(tile) {
        Some(snapshot) if snapshot.phase == TilePhase::Live => Ok(snapshot.cell),
        _ => Err(GameError::UnknownTile(tile)),
    }
}

fn relocate(
    board: &mut Board,
    tile: TileId,
    from: CellCoord,
    to: CellCoord,
) -> Result<(), GameError> {
    // Absolute cells are X-axis lane positions with main = x and cross = y.
    board.clear(LanePosition::new(Axis::X, from.x(), from.y()))?;
    board.set(LanePosition::new(Axis::X, to.x(), to.y()), tile)
}
