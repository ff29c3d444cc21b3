//! Move validation errors.

use serde::{Deserialize, Serialize};

use crate::{CellPosition, TurnError};

/// Error raised when a move cannot be applied.
///
/// Invalid moves are never fatal: the engine reports them in the status
/// message and leaves the session untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum MoveError {
    /// The target cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(CellPosition),

    /// The target cell is not on the board.
    #[display("Cell {} is off the board", _0)]
    OutOfBounds(CellPosition),

    /// The column has no empty cell left.
    #[display("Column {} is full", _0)]
    ColumnFull(usize),

    /// A disk may only rest on the bottom row or on top of another disk.
    #[display("Cell {} is not the landing cell of its column", _0)]
    NotLandingCell(CellPosition),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for MoveError {}

/// Any reason an input was refused.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
pub enum InputError {
    /// The move broke a placement rule.
    #[display("{}", _0)]
    Move(MoveError),
    /// The turn state did not allow the request.
    #[display("{}", _0)]
    Turn(TurnError),
}

impl std::error::Error for InputError {}
