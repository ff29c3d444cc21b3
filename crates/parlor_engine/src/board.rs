//! Rectangular game board shared by tic-tac-toe and connect four.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{MoveError, Player};

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell holding a player's mark or disk.
    Occupied(Player),
}

impl Cell {
    /// Returns true if no player occupies the cell.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Returns the occupying player, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }
}

/// A `(row, col)` coordinate. Row 0 is the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPosition {
    /// Row index, counted from the top.
    pub row: usize,
    /// Column index, counted from the left.
    pub col: usize,
}

impl CellPosition {
    /// Creates a new position.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for CellPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Board dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

impl Dimensions {
    /// Creates new dimensions.
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells.
    pub fn area(self) -> usize {
        self.rows * self.cols
    }

    /// Returns true if the position lies on the board.
    pub fn contains(self, pos: CellPosition) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }
}

/// Rectangular grid of cells stored in row-major order.
///
/// Cells are write-once: [`Board::place`] refuses to overwrite an occupied
/// cell, so a mark never reverts or changes owner during a game. A new game
/// gets a new board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    dimensions: Dimensions,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an all-empty board.
    #[instrument]
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            cells: vec![Cell::Empty; dimensions.area()],
        }
    }

    /// Returns the board dimensions.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    fn index(&self, pos: CellPosition) -> Option<usize> {
        self.dimensions
            .contains(pos)
            .then(|| pos.row * self.dimensions.cols + pos.col)
    }

    /// Gets the cell at the given position, or `None` when out of bounds.
    pub fn get(&self, pos: CellPosition) -> Option<Cell> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Returns true if the position is on the board and empty.
    pub fn is_empty_at(&self, pos: CellPosition) -> bool {
        matches!(self.get(pos), Some(Cell::Empty))
    }

    /// Marks an empty cell for `player`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::OutOfBounds`] for positions off the board and
    /// [`MoveError::CellOccupied`] if the cell already holds a mark.
    #[instrument(skip(self))]
    pub fn place(&mut self, pos: CellPosition, player: Player) -> Result<(), MoveError> {
        let index = self.index(pos).ok_or(MoveError::OutOfBounds(pos))?;
        if !self.cells[index].is_empty() {
            return Err(MoveError::CellOccupied(pos));
        }
        self.cells[index] = Cell::Occupied(player);
        Ok(())
    }

    /// Returns the lowest empty row in `col`, where a dropped disk would land.
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if col >= self.dimensions.cols {
            return None;
        }
        (0..self.dimensions.rows)
            .rev()
            .find(|&row| self.is_empty_at(CellPosition::new(row, col)))
    }

    /// Checks if every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Checks if every cell is empty.
    pub fn is_clear(&self) -> bool {
        self.cells.iter().all(|c| c.is_empty())
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterates over rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.dimensions.cols.max(1))
    }

    /// Formats the board as text, one row per line.
    pub fn display(&self) -> String {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Cell::Empty => '.',
                        Cell::Occupied(player) => player.mark(),
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_clear() {
        let board = Board::new(Dimensions::new(6, 7));
        assert!(board.is_clear());
        assert_eq!(board.cells().len(), 42);
        assert!(!board.is_full());
    }

    #[test]
    fn test_place_is_write_once() {
        let mut board = Board::new(Dimensions::new(3, 3));
        let pos = CellPosition::new(1, 1);
        board.place(pos, Player::One).expect("empty cell");
        assert_eq!(
            board.place(pos, Player::Two),
            Err(MoveError::CellOccupied(pos))
        );
        assert_eq!(board.get(pos), Some(Cell::Occupied(Player::One)));
    }

    #[test]
    fn test_place_out_of_bounds() {
        let mut board = Board::new(Dimensions::new(3, 3));
        let pos = CellPosition::new(3, 0);
        assert_eq!(
            board.place(pos, Player::One),
            Err(MoveError::OutOfBounds(pos))
        );
        assert_eq!(board.get(pos), None);
    }

    #[test]
    fn test_landing_row_stacks_upward() {
        let mut board = Board::new(Dimensions::new(6, 7));
        assert_eq!(board.landing_row(3), Some(5));
        board.place(CellPosition::new(5, 3), Player::One).unwrap();
        assert_eq!(board.landing_row(3), Some(4));
        assert_eq!(board.landing_row(7), None);
    }

    #[test]
    fn test_landing_row_full_column() {
        let mut board = Board::new(Dimensions::new(2, 1));
        board.place(CellPosition::new(1, 0), Player::One).unwrap();
        board.place(CellPosition::new(0, 0), Player::Two).unwrap();
        assert_eq!(board.landing_row(0), None);
        assert!(board.is_full());
    }

    #[test]
    fn test_display() {
        let mut board = Board::new(Dimensions::new(2, 2));
        board.place(CellPosition::new(0, 1), Player::Two).unwrap();
        assert_eq!(board.display(), ".O\n..");
    }
}
