#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement system that slides and merges tiles for a swipe.
//!
//! The system never mutates the world. It replays the swipe against a scratch
//! copy of the board and records every slide and merge it performs as a
//! [`Command`], which the world then applies in order.

use log::{debug, trace};
use slide_merge_core::{
    should_continue, start_index, step_index, Axis, Command, Direction, GameError, LanePosition,
    MovementDescriptor, SwipeCommand, TileId,
};
use slide_merge_world::Board;

/// Pure system that turns movement requests into slide and merge commands.
#[derive(Debug, Default)]
pub struct Movement;

impl Movement {
    /// Plans the movement requested by `movement` and emits the resulting commands.
    ///
    /// Returns `true` when at least one tile slid or merged. Fails with
    /// [`GameError::UninitializedState`] when no board exists and with
    /// [`GameError::MergesPending`] while merges from the previous move have
    /// not completed.
    pub fn handle(
        &mut self,
        movement: MovementDescriptor,
        board: Option<&Board>,
        pending_merges: usize,
        out: &mut Vec<Command>,
    ) -> Result<bool, GameError> {
        let board = board.ok_or(GameError::UninitializedState)?;
        if pending_merges > 0 {
            return Err(GameError::MergesPending(pending_merges));
        }

        let first_command = out.len();
        let mut planner = LanePlanner {
            scratch: board.clone(),
            axis: movement.axis(),
            direction: movement.direction(),
            out,
        };
        let moved = planner.plan()?;

        debug!(
            "{movement:?} produced {} command(s)",
            planner.out.len() - first_command
        );
        Ok(moved)
    }

    /// Resolves a swipe into its movement and plans it.
    pub fn handle_swipe(
        &mut self,
        swipe: SwipeCommand,
        board: Option<&Board>,
        pending_merges: usize,
        out: &mut Vec<Command>,
    ) -> Result<bool, GameError> {
        self.handle(swipe.movement(), board, pending_merges, out)
    }
}

struct LanePlanner<'a> {
    scratch: Board,
    axis: Axis,
    direction: Direction,
    out: &'a mut Vec<Command>,
}

impl LanePlanner<'_> {
    fn plan(&mut self) -> Result<bool, GameError> {
        let size = self.scratch.size();
        let mut moved = false;

        for cross in 0..size {
            let mut main = start_index(self.direction, size);
            while should_continue(self.direction, main, size, false) {
                if self.lookup_and_move(main, cross)? {
                    moved = true;
                }
                main = step_index(self.direction, main, false);
            }
        }

        Ok(moved)
    }

    /// Pulls tiles from further along the lane toward the pivot cell.
    ///
    /// The scan stops at the first occupied lookup cell once the pivot is
    /// occupied, so a pivot takes part in at most one merge per move.
    fn lookup_and_move(&mut self, pivot_index: i64, cross: u32) -> Result<bool, GameError> {
        let size = self.scratch.size();
        let Some(pivot) = lane_position(self.axis, pivot_index, cross) else {
            return Ok(false);
        };

        let mut moved = false;
        let mut lookup_index = step_index(self.direction, pivot_index, false);
        while should_continue(self.direction, lookup_index, size, true) {
            let Some(lookup) = lane_position(self.axis, lookup_index, cross) else {
                break;
            };

            match (self.scratch.get(pivot)?, self.scratch.get(lookup)?) {
                (None, Some(tile)) => {
                    self.shift(tile, lookup, pivot)?;
                    self.out.push(Command::SlideTile {
                        tile,
                        to: pivot.to_cell(),
                    });
                    moved = true;
                }
                (Some(resident), Some(tile)) => {
                    if self.can_merge(resident, tile) {
                        self.shift(tile, lookup, pivot)?;
                        let _ = self.scratch.remove_tile(resident);
                        self.out.push(Command::MergeTile {
                            tile,
                            absorbed: resident,
                            to: pivot.to_cell(),
                        });
                        trace!("{tile} merges into {resident} at {}", pivot.to_cell());
                        moved = true;
                    }
                    break;
                }
                _ => {}
            }

            lookup_index = step_index(self.direction, lookup_index, false);
        }

        Ok(moved)
    }

    fn shift(&mut self, tile: TileId, from: LanePosition, to: LanePosition) -> Result<(), GameError> {
        self.scratch.clear(from)?;
        self.scratch.set(to, tile)
    }

    /// Equal values merge unless doubling them would overflow.
    fn can_merge(&self, resident: TileId, tile: TileId) -> bool {
        match (self.scratch.tile(resident), self.scratch.tile(tile)) {
            (Some(resident), Some(tile)) => {
                resident.value == tile.value && resident.value.doubled().is_some()
            }
            _ => false,
        }
    }
}

fn lane_position(axis: Axis, main: i64, cross: u32) -> Option<LanePosition> {
    u32::try_from(main)
        .ok()
        .map(|main| LanePosition::new(axis, main, cross))
}
