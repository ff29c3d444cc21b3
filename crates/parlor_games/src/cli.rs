//! Command-line interface for parlor_games.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use parlor_engine::{GameKind, PersistenceMode};

use parlor_games::DEFAULT_SETTINGS_FILE;

/// Parlor Games - Hangman, Connect 4 and Tic Tac Toe in the terminal
#[derive(Parser, Debug)]
#[command(name = "parlor_games")]
#[command(about = "Terminal parlor games with persistent scores", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the settings file (created with defaults if missing)
    #[arg(long, global = true, default_value = DEFAULT_SETTINGS_FILE)]
    pub config: PathBuf,

    /// Score database path, overriding the settings file
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    /// Subcommand to run; defaults to `play`
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the game selector
    Play {
        /// Skip the selector and start this game (hangman, connect4, tictactoe)
        game: Option<GameKind>,

        /// Hangman word list (comma-separated), overriding the settings file
        #[arg(long)]
        words: Option<PathBuf>,
    },

    /// Show or change settings
    Settings {
        /// New persistence mode (discard, session_only, durable)
        #[arg(long)]
        persistence: Option<PersistenceMode>,

        /// New hangman word list file
        #[arg(long)]
        word_file: Option<PathBuf>,
    },

    /// Print stored scores
    Scores {
        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Reset stored scores to zero
    Clear {
        /// Only this game (hangman, connect4, tictactoe); all games if omitted
        game: Option<GameKind>,
    },
}
