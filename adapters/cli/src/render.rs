//! Plain-text board rendering.

use std::fmt::Write as _;

use slide_merge_world::Board;

const EMPTY_CELL: &str = ".";

/// Renders the board as right-aligned rows, top row first.
pub(crate) fn render_board(board: &Board) -> String {
    let rows = board.value_rows();
    let width = rows
        .iter()
        .flatten()
        .flatten()
        .map(|value| value.to_string().len())
        .max()
        .unwrap_or(0)
        .max(EMPTY_CELL.len());

    let mut output = String::new();
    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| match cell {
                Some(value) => format!("{:>width$}", value.to_string()),
                None => format!("{EMPTY_CELL:>width$}"),
            })
            .collect();
        let _ = writeln!(output, "{}", cells.join(" "));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use slide_merge_core::{CellCoord, TileValue};

    #[test]
    fn empty_board_renders_dots() {
        let board = Board::new(2).expect("board");
        assert_eq!(render_board(&board), ". .\n. .\n");
    }

    #[test]
    fn columns_align_to_widest_value() {
        let mut board = Board::new(2).expect("board");
        let _ = board
            .insert_tile(CellCoord::new(1, 0), TileValue::new(128).expect("value"))
            .expect("insert");
        let _ = board
            .insert_tile(CellCoord::new(0, 1), TileValue::new(2).expect("value"))
            .expect("insert");

        assert_eq!(render_board(&board), "  . 128\n  2   .\n");
    }
}
