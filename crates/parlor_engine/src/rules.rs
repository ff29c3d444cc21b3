//! Per-game rules: board geometry, run length and placement rule.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{Board, CellPosition, Dimensions, MoveError, WinDetector};

/// The games of the suite.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    /// Word guessing against a 7-miss limit.
    #[strum(serialize = "hangman")]
    Hangman,
    /// Gravity-drop four in a row on a 6x7 board.
    #[strum(serialize = "connect4")]
    #[serde(rename = "connect4")]
    ConnectFour,
    /// Three in a row on a 3x3 board.
    #[strum(serialize = "tictactoe")]
    TicTacToe,
}

impl GameKind {
    /// Storage key for the game's score record.
    pub fn key(self) -> &'static str {
        match self {
            GameKind::Hangman => "hangman",
            GameKind::ConnectFour => "connect4",
            GameKind::TicTacToe => "tictactoe",
        }
    }

    /// Name shown in menus.
    pub fn label(self) -> &'static str {
        match self {
            GameKind::Hangman => "Hangman",
            GameKind::ConnectFour => "Connect 4",
            GameKind::TicTacToe => "Tic Tac Toe",
        }
    }

    /// Labels for the two score slots.
    pub fn score_labels(self) -> (&'static str, &'static str) {
        match self {
            GameKind::Hangman => ("Wins", "Losses"),
            GameKind::ConnectFour | GameKind::TicTacToe => ("Player 1", "Player 2"),
        }
    }

    /// Board geometry and rules, or `None` for hangman.
    pub fn board_rules(self) -> Option<BoardRules> {
        match self {
            GameKind::Hangman => None,
            GameKind::ConnectFour => Some(BoardRules::CONNECT_FOUR),
            GameKind::TicTacToe => Some(BoardRules::TIC_TAC_TOE),
        }
    }
}

/// Where a player may put a mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementRule {
    /// Any empty cell.
    Free,
    /// Only the landing cell of a column: the bottom row, or a cell resting on
    /// an occupied cell.
    Gravity,
}

impl PlacementRule {
    /// Checks whether a mark may go at `pos`.
    ///
    /// The gravity rule does not redirect a click to the landing cell; a click
    /// on any other cell of the column is rejected.
    ///
    /// # Errors
    ///
    /// Returns the [`MoveError`] describing why the cell is not playable.
    #[instrument(skip(board))]
    pub fn validate(self, board: &Board, pos: CellPosition) -> Result<(), MoveError> {
        let dims = board.dimensions();
        if !dims.contains(pos) {
            return Err(MoveError::OutOfBounds(pos));
        }
        if !board.is_empty_at(pos) {
            return Err(MoveError::CellOccupied(pos));
        }
        match self {
            PlacementRule::Free => Ok(()),
            PlacementRule::Gravity => {
                let on_bottom_row = pos.row + 1 == dims.rows;
                let below = CellPosition::new(pos.row + 1, pos.col);
                if on_bottom_row || !board.is_empty_at(below) {
                    Ok(())
                } else {
                    Err(MoveError::NotLandingCell(pos))
                }
            }
        }
    }
}

/// Geometry and win condition of a board game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardRules {
    /// Board size.
    pub dimensions: Dimensions,
    /// Cells in a row needed to win.
    pub run_length: usize,
    /// Where marks may be placed.
    pub placement: PlacementRule,
}

impl BoardRules {
    /// 3x3, three in a row, free placement.
    pub const TIC_TAC_TOE: BoardRules = BoardRules {
        dimensions: Dimensions::new(3, 3),
        run_length: 3,
        placement: PlacementRule::Free,
    };

    /// 6 rows by 7 columns, four in a row, gravity placement.
    pub const CONNECT_FOUR: BoardRules = BoardRules {
        dimensions: Dimensions::new(6, 7),
        run_length: 4,
        placement: PlacementRule::Gravity,
    };

    /// Win detector for this game's run length.
    pub fn detector(&self) -> WinDetector {
        WinDetector::new(self.run_length)
    }
}
