//! Parlor Games - Unified CLI
//!
//! Hangman, Connect 4 and Tic Tac Toe in the terminal, with scores that can
//! outlive the session.

#![warn(missing_docs)]

mod cli;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use parlor_engine::{GameKind, MemoryScoreStore, PersistenceMode, ScoreStore};
use parlor_games::{GameSelector, LobbyController, ScoreRepository, Settings};
use ratatui::{Terminal, backend::CrosstermBackend};
use strum::IntoEnumIterator;
use tracing::{error, info, instrument, warn};
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "parlor_games.log";

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Play {
        game: None,
        words: None,
    });

    match command {
        Command::Play { game, words } => run_play(cli.config, cli.database, game, words),
        Command::Settings {
            persistence,
            word_file,
        } => {
            init_stderr_logging();
            run_settings(cli.config, persistence, word_file)
        }
        Command::Scores { json } => {
            init_stderr_logging();
            run_scores(cli.config, cli.database, json)
        }
        Command::Clear { game } => {
            init_stderr_logging();
            run_clear(cli.config, cli.database, game)
        }
    }
}

/// Logs to stderr for the non-interactive commands.
fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .try_init();
}

/// Loads settings and applies the command-line database override.
fn load_settings(config: &Path, database: Option<PathBuf>) -> Settings {
    let settings = Settings::load_or_init(config);
    match database {
        Some(path) => settings.with_database(path),
        None => settings,
    }
}

fn open_repository(settings: &Settings) -> Result<ScoreRepository> {
    let path = settings.database().display().to_string();
    Ok(ScoreRepository::open(path)?)
}

/// Run the interactive game selector
#[instrument(skip_all)]
fn run_play(
    config: PathBuf,
    database: Option<PathBuf>,
    game: Option<GameKind>,
    words: Option<PathBuf>,
) -> Result<()> {
    // Setup logging to file to avoid interfering with TUI
    let log_file = std::fs::File::create(LOG_FILE)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,parlor_games=debug")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!("Starting Parlor Games");

    let mut settings = load_settings(&config, database);
    if let Some(path) = words {
        settings = settings.with_word_file(path);
    }

    let store: Arc<dyn ScoreStore> = match open_repository(&settings) {
        Ok(repo) => Arc::new(repo),
        Err(e) => {
            warn!(error = %e, "Score database unavailable, keeping scores in memory");
            Arc::new(MemoryScoreStore::new())
        }
    };

    let selector = GameSelector::new(*settings.persistence(), store, settings.word_file().clone());
    let mut lobby = LobbyController::new(settings, config, selector);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = lobby.run(&mut terminal, game);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Lobby error");
    }
    info!("Parlor Games closed");
    res
}

/// Show or change settings
fn run_settings(
    config: PathBuf,
    persistence: Option<PersistenceMode>,
    word_file: Option<PathBuf>,
) -> Result<()> {
    let mut settings = Settings::load_or_init(&config);
    let changed = persistence.is_some() || word_file.is_some();

    if let Some(mode) = persistence {
        settings.set_persistence(mode);
    }
    if let Some(path) = word_file {
        settings = settings.with_word_file(path);
    }
    if changed {
        settings.save(&config)?;
        info!(path = %config.display(), "Settings updated");
    }

    println!(
        "persistence = {} ({})",
        settings.persistence(),
        settings.persistence().label()
    );
    match settings.word_file() {
        Some(path) => println!("word_file   = {}", path.display()),
        None => println!("word_file   = (built-in words)"),
    }
    println!("database    = {}", settings.database().display());
    Ok(())
}

/// Print stored scores
fn run_scores(config: PathBuf, database: Option<PathBuf>, json: bool) -> Result<()> {
    let settings = load_settings(&config, database);
    let repo = open_repository(&settings)?;
    let rows = repo.list()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No stored scores");
        return Ok(());
    }
    for row in &rows {
        let kind = match row.kind() {
            Ok(kind) => kind,
            Err(e) => {
                warn!(error = %e, "Skipping unknown row");
                continue;
            }
        };
        let (first, second) = kind.score_labels();
        println!(
            "{:<12} {} {:>4}  {} {:>4}  (updated {})",
            kind.label(),
            first,
            row.first(),
            second,
            row.second(),
            row.updated_at().format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

/// Reset stored scores to zero
fn run_clear(config: PathBuf, database: Option<PathBuf>, game: Option<GameKind>) -> Result<()> {
    let settings = load_settings(&config, database);
    let repo = open_repository(&settings)?;

    let games: Vec<GameKind> = match game {
        Some(kind) => vec![kind],
        None => GameKind::iter().collect(),
    };
    for kind in games {
        repo.clear(kind)?;
        println!("Cleared {}", kind.label());
    }
    Ok(())
}
