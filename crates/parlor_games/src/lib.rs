//! Parlor Games - terminal game selector with persistent scores
//!
//! This crate wraps the pure engines of [`parlor_engine`] in an application:
//! a settings file, a SQLite score store and a multi-screen terminal UI.
//!
//! # Architecture
//!
//! - **Settings**: persistence mode, word list and database path in TOML
//! - **Database**: [`ScoreRepository`], the durable [`ScoreStore`](parlor_engine::ScoreStore)
//! - **Selector**: keeps one engine per game between launches
//! - **Lobby**: screens for game selection, settings, scores and play
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use parlor_games::{GameSelector, ScoreRepository, Settings};
//!
//! # fn example() -> anyhow::Result<()> {
//! let settings = Settings::load_or_init("parlor_games.toml");
//! let repo = ScoreRepository::open(settings.database().display().to_string())?;
//! let mut selector = GameSelector::new(*settings.persistence(), Arc::new(repo), None);
//! let hangman = selector.launch_hangman();
//! println!("{}", hangman.masked());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod db;
mod lobby;
mod selector;
mod settings;

// Crate-level exports - Database
pub use db::{DbError, NewScore, ScoreRepository, StoredScore};

// Crate-level exports - Lobby
pub use lobby::{LobbyController, Screen, ScreenTransition};

// Crate-level exports - Selector and settings
pub use selector::GameSelector;
pub use settings::{ConfigError, DEFAULT_DATABASE_FILE, DEFAULT_SETTINGS_FILE, Settings};
