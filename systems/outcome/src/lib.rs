#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Win and loss evaluation for Slide Merge boards.

use log::info;
use slide_merge_core::{
    should_continue, start_index, step_index, Axis, Direction, GameError, GameStatus,
    LanePosition, TileValue, DEFAULT_TARGET_VALUE,
};
use slide_merge_world::Board;

/// Pure system that tracks whether the game was won or lost.
///
/// Once the game is won or lost the status stays put until [`Outcome::reset`].
#[derive(Debug)]
pub struct Outcome {
    target: TileValue,
    status: GameStatus,
}

impl Outcome {
    /// Creates an evaluator that declares victory once `target` appears.
    #[must_use]
    pub const fn new(target: TileValue) -> Self {
        Self {
            target,
            status: GameStatus::Started,
        }
    }

    /// Most recently evaluated status.
    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    /// Forgets any previous verdict.
    pub fn reset(&mut self) {
        self.status = GameStatus::Started;
    }

    /// Re-evaluates the board and returns the resulting status.
    pub fn evaluate(&mut self, board: Option<&Board>) -> Result<GameStatus, GameError> {
        let board = board.ok_or(GameError::UninitializedState)?;
        if self.status != GameStatus::Started {
            return Ok(self.status);
        }

        let status = if has_reached(board, self.target) {
            GameStatus::Won
        } else if can_move(board) {
            GameStatus::Started
        } else {
            GameStatus::Lost
        };

        if status != self.status {
            info!("game status changed to {status:?}");
            self.status = status;
        }
        Ok(status)
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_VALUE)
    }
}

/// Reports whether any live tile carries at least `target`.
#[must_use]
pub fn has_reached(board: &Board, target: TileValue) -> bool {
    board.tile_view().live().any(|tile| tile.value >= target)
}

/// Reports whether some swipe would change the board.
///
/// True when a cell is empty or two orthogonal neighbours share a value.
#[must_use]
pub fn can_move(board: &Board) -> bool {
    if !board.empty_cells().is_empty() {
        return true;
    }

    let size = board.size();
    [Axis::X, Axis::Y].into_iter().any(|axis| {
        (0..size).any(|cross| lane_has_equal_neighbours(board, axis, cross))
    })
}

fn lane_has_equal_neighbours(board: &Board, axis: Axis, cross: u32) -> bool {
    let size = board.size();
    let direction = Direction::Start;
    let mut main = step_index(direction, start_index(direction, size), false);
    while should_continue(direction, main, size, true) {
        let previous = step_index(direction, main, true);
        if let (Ok(current), Ok(previous)) = (u32::try_from(main), u32::try_from(previous)) {
            let here = board.value_at(LanePosition::new(axis, current, cross).to_cell());
            let before = board.value_at(LanePosition::new(axis, previous, cross).to_cell());
            if here.is_some() && here == before {
                return true;
            }
        }
        main = step_index(direction, main, false);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use slide_merge_core::CellCoord;

    fn board_from_rows(rows: &[&[u32]]) -> Board {
        let size = u32::try_from(rows.len()).expect("size fits u32");
        let mut board = Board::new(size).expect("board");
        for (y, row) in rows.iter().enumerate() {
            for (x, raw) in row.iter().enumerate() {
                if *raw == 0 {
                    continue;
                }
                let cell = CellCoord::new(
                    u32::try_from(x).expect("x fits u32"),
                    u32::try_from(y).expect("y fits u32"),
                );
                let value = TileValue::new(*raw).expect("valid value");
                let _ = board.insert_tile(cell, value).expect("insert");
            }
        }
        board
    }

    #[test]
    fn empty_cells_allow_moves() {
        let board = board_from_rows(&[&[2, 4], &[8, 0]]);
        assert!(can_move(&board));
    }

    #[test]
    fn vertical_pairs_allow_moves() {
        let board = board_from_rows(&[&[2, 4], &[2, 8]]);
        assert!(can_move(&board));
    }

    #[test]
    fn horizontal_pairs_allow_moves() {
        let board = board_from_rows(&[&[2, 4], &[8, 8]]);
        assert!(can_move(&board));
    }

    #[test]
    fn checkerboard_is_stuck() {
        let board = board_from_rows(&[&[2, 4], &[4, 2]]);
        assert!(!can_move(&board));
    }

    #[test]
    fn target_detection_ignores_smaller_tiles() {
        let board = board_from_rows(&[&[1024, 512], &[0, 0]]);
        assert!(!has_reached(&board, DEFAULT_TARGET_VALUE));
        let target = TileValue::new(1024).expect("valid value");
        assert!(has_reached(&board, target));
    }
}
