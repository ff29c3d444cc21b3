//! Screen trait and transition type for the lobby state machine.

use crossterm::event::KeyEvent;
use parlor_engine::{GameKind, PersistenceMode};
use ratatui::Frame;

use crate::Settings;

/// The result of handling an input event on a screen.
///
/// Screens return this from [`Screen::handle_key`] to drive the
/// [`LobbyController`](crate::LobbyController) state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Stay on the current screen.
    Stay,
    /// Navigate to the game selection screen.
    GoToGameSelect,
    /// Navigate to the settings screen.
    GoToSettings,
    /// Navigate to the score overview.
    GoToScores,
    /// Start a round of the given game.
    Launch(GameKind),
    /// Change and save the persistence mode, staying on the current screen.
    SetPersistence(PersistenceMode),
    /// Exit the application cleanly.
    Quit,
}

/// Trait implemented by each screen in the lobby state machine.
///
/// Each screen owns its own state, renders its UI, and handles key events.
/// The controller calls these methods in the event loop.
pub trait Screen {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame, settings: &Settings);

    /// Handles a key event and returns the resulting [`ScreenTransition`].
    fn handle_key(&mut self, key: KeyEvent, settings: &Settings) -> ScreenTransition;
}
