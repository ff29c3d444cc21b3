//! Screen implementations for the lobby state machine.

mod board;
mod game_select;
mod hangman;
mod scores;
mod settings;

pub use board::BoardScreen;
pub use game_select::GameSelectScreen;
pub use hangman::HangmanScreen;
pub use scores::{ScoreRow, ScoresScreen};
pub use settings::SettingsScreen;
