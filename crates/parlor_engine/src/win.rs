//! N-in-a-row detection for rectangular boards.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{Board, Cell, CellPosition, Player};

/// Scan directions as `(row step, col step)`, in scan order.
const DIRECTIONS: [(isize, isize); 4] = [
    (0, 1),  // rows
    (1, 0),  // columns
    (1, 1),  // diagonals going down-right
    (1, -1), // diagonals going down-left
];

/// The cells forming a winning run, from the start cell onward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinningLine {
    cells: Vec<CellPosition>,
}

impl WinningLine {
    /// Returns the winning cells in run order.
    pub fn cells(&self) -> &[CellPosition] {
        &self.cells
    }

    /// Returns true if `pos` is part of the line.
    pub fn contains(&self, pos: CellPosition) -> bool {
        self.cells.contains(&pos)
    }
}

/// Finds `run_length` collinear cells owned by one player.
///
/// Rows are scanned first (top to bottom, left to right), then columns, then
/// the down-right diagonals, then the down-left diagonals. The first run found
/// is returned; the order only matters for which cells get highlighted when a
/// move completes several lines at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinDetector {
    run_length: usize,
}

impl WinDetector {
    /// Creates a detector for runs of `run_length` cells.
    pub const fn new(run_length: usize) -> Self {
        Self { run_length }
    }

    /// Returns the run length this detector looks for.
    pub fn run_length(&self) -> usize {
        self.run_length
    }

    /// Returns true if `player` owns a complete run.
    pub fn has_won(&self, board: &Board, player: Player) -> bool {
        self.find_line(board, player).is_some()
    }

    /// Returns the first complete run owned by `player`, if any.
    #[instrument(skip(self, board), fields(run_length = self.run_length))]
    pub fn find_line(&self, board: &Board, player: Player) -> Option<WinningLine> {
        let dims = board.dimensions();
        if self.run_length == 0 {
            return None;
        }

        for (d_row, d_col) in DIRECTIONS {
            for row in 0..dims.rows {
                for col in 0..dims.cols {
                    if let Some(cells) = self.run_from(board, player, row, col, d_row, d_col) {
                        return Some(WinningLine { cells });
                    }
                }
            }
        }
        None
    }

    fn run_from(
        &self,
        board: &Board,
        player: Player,
        row: usize,
        col: usize,
        d_row: isize,
        d_col: isize,
    ) -> Option<Vec<CellPosition>> {
        let target = Cell::Occupied(player);
        let mut cells = Vec::with_capacity(self.run_length);
        for step in 0..self.run_length as isize {
            let r = row.checked_add_signed(d_row * step)?;
            let c = col.checked_add_signed(d_col * step)?;
            let pos = CellPosition::new(r, c);
            if board.get(pos)? != target {
                return None;
            }
            cells.push(pos);
        }
        Some(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dimensions;

    fn board_with(dims: Dimensions, marks: &[(usize, usize, Player)]) -> Board {
        let mut board = Board::new(dims);
        for &(row, col, player) in marks {
            board.place(CellPosition::new(row, col), player).unwrap();
        }
        board
    }

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new(Dimensions::new(6, 7));
        let detector = WinDetector::new(4);
        assert!(!detector.has_won(&board, Player::One));
        assert!(!detector.has_won(&board, Player::Two));
    }

    #[test]
    fn test_row_win() {
        let board = board_with(
            Dimensions::new(6, 7),
            &[
                (5, 2, Player::One),
                (5, 3, Player::One),
                (5, 4, Player::One),
                (5, 5, Player::One),
            ],
        );
        let line = WinDetector::new(4).find_line(&board, Player::One).unwrap();
        assert_eq!(
            line.cells(),
            &[
                CellPosition::new(5, 2),
                CellPosition::new(5, 3),
                CellPosition::new(5, 4),
                CellPosition::new(5, 5),
            ]
        );
        assert!(!WinDetector::new(4).has_won(&board, Player::Two));
    }

    #[test]
    fn test_column_win() {
        let board = board_with(
            Dimensions::new(6, 7),
            &[
                (2, 0, Player::Two),
                (3, 0, Player::Two),
                (4, 0, Player::Two),
                (5, 0, Player::Two),
            ],
        );
        assert!(WinDetector::new(4).has_won(&board, Player::Two));
    }

    #[test]
    fn test_down_right_diagonal() {
        let board = board_with(
            Dimensions::new(6, 7),
            &[
                (1, 3, Player::One),
                (2, 4, Player::One),
                (3, 5, Player::One),
                (4, 6, Player::One),
            ],
        );
        let line = WinDetector::new(4).find_line(&board, Player::One).unwrap();
        assert_eq!(line.cells()[0], CellPosition::new(1, 3));
    }

    #[test]
    fn test_down_left_diagonal() {
        let board = board_with(
            Dimensions::new(3, 3),
            &[
                (0, 2, Player::Two),
                (1, 1, Player::Two),
                (2, 0, Player::Two),
            ],
        );
        let line = WinDetector::new(3).find_line(&board, Player::Two).unwrap();
        assert_eq!(
            line.cells(),
            &[
                CellPosition::new(0, 2),
                CellPosition::new(1, 1),
                CellPosition::new(2, 0),
            ]
        );
    }

    #[test]
    fn test_broken_run_is_not_a_win() {
        let board = board_with(
            Dimensions::new(6, 7),
            &[
                (5, 0, Player::One),
                (5, 1, Player::One),
                (5, 2, Player::Two),
                (5, 3, Player::One),
                (5, 4, Player::One),
            ],
        );
        assert!(!WinDetector::new(4).has_won(&board, Player::One));
    }

    #[test]
    fn test_rows_take_precedence_over_columns() {
        // Player One owns row 0 and column 0 of a 3x3 board.
        let board = board_with(
            Dimensions::new(3, 3),
            &[
                (0, 0, Player::One),
                (0, 1, Player::One),
                (0, 2, Player::One),
                (1, 0, Player::One),
                (2, 0, Player::One),
            ],
        );
        let line = WinDetector::new(3).find_line(&board, Player::One).unwrap();
        assert!(line.contains(CellPosition::new(0, 2)));
        assert!(!line.contains(CellPosition::new(2, 0)));
    }

    #[test]
    fn test_run_longer_than_board_never_wins() {
        let board = board_with(
            Dimensions::new(2, 2),
            &[
                (0, 0, Player::One),
                (0, 1, Player::One),
                (1, 0, Player::One),
                (1, 1, Player::One),
            ],
        );
        assert!(!WinDetector::new(3).has_won(&board, Player::One));
        assert!(!WinDetector::new(0).has_won(&board, Player::One));
    }
}
