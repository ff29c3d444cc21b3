//! Renderer-facing input handling.
//!
//! A renderer maps its own input (mouse clicks, key presses) onto an engine's
//! input type and calls [`handle_input`]. The engine never sees a UI type; it
//! answers with a snapshot holding everything needed to redraw, including a
//! [`GameEvent`] on the input that ended the game.

use serde::{Deserialize, Serialize};

use crate::{CellPosition, Player};

/// Terminal event emitted once, on the input that ended a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A board game was won.
    Won(Player),
    /// A board game filled up without a winner.
    Tie,
    /// The hangman word was fully revealed.
    WordGuessed,
    /// The hangman miss limit was reached.
    Hanged,
}

/// Input for a board game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardInput {
    /// The user picked a cell.
    Cell(CellPosition),
    /// The user picked a column (connect four drop).
    Column(usize),
    /// Start a new game after the current one finished.
    Restart,
}

/// Input for hangman.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HangmanInput {
    /// A typed character.
    Letter(char),
    /// Start a new game after the current one finished.
    Restart,
}

/// A game engine driven by renderer input.
pub trait GameEngine {
    /// Input accepted by the engine.
    type Input;
    /// State handed back for redrawing.
    type Snapshot;

    /// Applies one input and returns the resulting snapshot.
    fn apply(&mut self, input: Self::Input) -> Self::Snapshot;

    /// Returns the current snapshot without changing state.
    fn snapshot(&self) -> Self::Snapshot;
}

/// Processes one input to completion, passing the session through.
pub fn handle_input<E: GameEngine>(mut session: E, input: E::Input) -> (E, E::Snapshot) {
    let snapshot = session.apply(input);
    (session, snapshot)
}
