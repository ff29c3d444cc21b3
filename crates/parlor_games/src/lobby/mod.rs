//! Lobby system: multi-screen TUI with game selection, settings and scores.

mod controller;
mod screen;
mod screens;

pub use controller::LobbyController;
pub use screen::{Screen, ScreenTransition};
