//! Parlor engine - pure game state for classic parlor games
//!
//! This crate holds the rules, turn sequencing, win detection and score
//! bookkeeping for tic-tac-toe, connect four and hangman. It has no UI and no
//! storage backend: renderers feed input through [`handle_input`] and draw the
//! snapshot they get back, and durable scores go through the [`ScoreStore`]
//! trait.
//!
//! # Architecture
//!
//! - **Board**: grid of cells with write-once placement
//! - **Rules**: dimensions, run length and placement rule per game
//! - **Win**: line detection in rows, columns and both diagonals
//! - **Turn**: player alternation and the finished state
//! - **Score**: persistence modes, reconciliation and the score keeper
//! - **Hangman**: word list, masking and miss counting
//!
//! # Example
//!
//! ```
//! use parlor_engine::{handle_input, BoardGame, BoardInput, CellPosition, GameEvent, ScoreKeeper, GameKind, Player};
//!
//! let mut game = BoardGame::tic_tac_toe(ScoreKeeper::in_memory(GameKind::TicTacToe));
//! let mut last = None;
//! for (row, col) in [(1, 1), (0, 0), (0, 1), (2, 2), (2, 1)] {
//!     let (next, snapshot) = handle_input(game, BoardInput::Cell(CellPosition::new(row, col)));
//!     game = next;
//!     last = Some(snapshot);
//! }
//! let snapshot = last.unwrap();
//! assert_eq!(snapshot.event, Some(GameEvent::Won(Player::One)));
//! assert_eq!(snapshot.scores.first, 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board;
mod board_game;
mod error;
mod hangman;
mod input;
mod player;
mod rules;
mod score;
mod turn;
mod win;

// Crate-level exports - Board primitives
pub use board::{Board, Cell, CellPosition, Dimensions};
pub use player::Player;

// Crate-level exports - Errors
pub use error::{InputError, MoveError};

// Crate-level exports - Rules and sequencing
pub use rules::{BoardRules, GameKind, PlacementRule};
pub use turn::{Outcome, TurnController, TurnError, TurnState};
pub use win::{WinDetector, WinningLine};

// Crate-level exports - Scores
pub use score::{
    MemoryScoreStore, PersistenceMode, Reconciliation, ScoreKeeper, ScoreRecord, ScoreStore,
    StoreError, reconcile,
};

// Crate-level exports - Engines
pub use board_game::{BoardGame, BoardSnapshot};
pub use hangman::{DEFAULT_WORDS, Guess, HIDDEN, Hangman, HangmanSnapshot, MAX_MISSES, WordList};
pub use input::{BoardInput, GameEngine, GameEvent, HangmanInput, handle_input};
