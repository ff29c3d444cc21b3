//! Lobby controller: the state machine driving the multi-screen TUI.

use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use derive_getters::Getters;
use parlor_engine::{GameKind, PersistenceMode, ScoreStore};
use ratatui::{Terminal, backend::Backend};
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument, warn};

use crate::lobby::screen::ScreenTransition;
use crate::lobby::screens::{
    BoardScreen, GameSelectScreen, HangmanScreen, ScoreRow, ScoresScreen, SettingsScreen,
};
use crate::{GameSelector, Settings};

/// Active screen in the lobby state machine.
#[derive(Debug)]
enum ActiveScreen {
    GameSelect(GameSelectScreen),
    Settings(SettingsScreen),
    Scores(ScoresScreen),
    Board(BoardScreen),
    Hangman(HangmanScreen),
}

/// Controller that drives the lobby state machine.
///
/// Call [`LobbyController::run`] to start the event loop.
#[derive(Debug, Getters)]
pub struct LobbyController {
    settings: Settings,
    settings_path: PathBuf,
    selector: GameSelector,
}

impl LobbyController {
    /// Creates a new lobby controller.
    #[instrument(skip(settings, selector))]
    pub fn new(settings: Settings, settings_path: PathBuf, selector: GameSelector) -> Self {
        info!("Creating LobbyController");
        Self {
            settings,
            settings_path,
            selector,
        }
    }

    /// Runs the lobby event loop until the user quits.
    ///
    /// Starts on the game selection screen, or straight in `start` if given.
    /// The caller owns terminal setup and restore.
    #[instrument(skip(self, terminal))]
    pub fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        start: Option<GameKind>,
    ) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!("Starting lobby event loop");

        let mut screen = match start {
            Some(kind) => self.launch(kind),
            None => ActiveScreen::GameSelect(GameSelectScreen::new()),
        };

        loop {
            terminal.draw(|f| {
                use crate::lobby::screen::Screen;
                match &screen {
                    ActiveScreen::GameSelect(s) => s.render(f, &self.settings),
                    ActiveScreen::Settings(s) => s.render(f, &self.settings),
                    ActiveScreen::Scores(s) => s.render(f, &self.settings),
                    ActiveScreen::Board(s) => s.render(f, &self.settings),
                    ActiveScreen::Hangman(s) => s.render(f, &self.settings),
                }
            })?;

            if event::poll(Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
            {
                // Skip key release events (crossterm fires both press and release).
                if key.kind == KeyEventKind::Release {
                    continue;
                }

                use crate::lobby::screen::Screen;
                let transition = match &mut screen {
                    ActiveScreen::GameSelect(s) => s.handle_key(key, &self.settings),
                    ActiveScreen::Settings(s) => s.handle_key(key, &self.settings),
                    ActiveScreen::Scores(s) => s.handle_key(key, &self.settings),
                    ActiveScreen::Board(s) => s.handle_key(key, &self.settings),
                    ActiveScreen::Hangman(s) => s.handle_key(key, &self.settings),
                };

                screen = match self.apply_transition(transition, screen) {
                    Some(next) => next,
                    None => {
                        info!("Lobby quitting");
                        return Ok(());
                    }
                };
            }
        }
    }

    /// Applies a screen transition, returning the next screen or `None` to quit.
    #[instrument(skip(self, current))]
    fn apply_transition(
        &mut self,
        transition: ScreenTransition,
        current: ActiveScreen,
    ) -> Option<ActiveScreen> {
        debug!(transition = ?transition, "Applying screen transition");
        match transition {
            ScreenTransition::Stay => Some(current),

            ScreenTransition::GoToGameSelect => {
                self.shelve(current);
                info!("Navigating to GameSelect");
                Some(ActiveScreen::GameSelect(GameSelectScreen::new()))
            }

            ScreenTransition::GoToSettings => {
                info!("Navigating to Settings");
                Some(ActiveScreen::Settings(SettingsScreen::new(
                    *self.settings.persistence(),
                )))
            }

            ScreenTransition::GoToScores => {
                info!("Navigating to Scores");
                Some(ActiveScreen::Scores(ScoresScreen::new(self.score_rows())))
            }

            ScreenTransition::Launch(kind) => {
                info!(game = %kind, "Launching game");
                Some(self.launch(kind))
            }

            ScreenTransition::SetPersistence(mode) => {
                self.set_persistence(mode);
                Some(current)
            }

            ScreenTransition::Quit => None,
        }
    }

    /// Builds the screen for a new round of `kind`.
    #[instrument(skip(self))]
    fn launch(&mut self, kind: GameKind) -> ActiveScreen {
        if kind == GameKind::Hangman {
            return ActiveScreen::Hangman(HangmanScreen::new(self.selector.launch_hangman()));
        }
        match self.selector.launch_board(kind) {
            Some(game) => ActiveScreen::Board(BoardScreen::new(game)),
            None => {
                warn!("No board engine for game");
                ActiveScreen::GameSelect(GameSelectScreen::new())
            }
        }
    }

    /// Returns a game screen's engine to the selector.
    fn shelve(&mut self, screen: ActiveScreen) {
        match screen {
            ActiveScreen::Board(s) => self.selector.shelve_board(s.into_game()),
            ActiveScreen::Hangman(s) => self.selector.shelve_hangman(s.into_game()),
            _ => {}
        }
    }

    /// Applies a new persistence mode and writes it to the settings file.
    ///
    /// Only the mode is written: the file is re-read so command-line
    /// overrides held in memory never reach it.
    #[instrument(skip(self))]
    fn set_persistence(&mut self, mode: PersistenceMode) {
        self.settings.set_persistence(mode);
        self.selector.set_mode(mode);

        let mut on_disk = match Settings::from_file(&self.settings_path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, "Settings file unreadable, using defaults");
                Settings::default()
            }
        };
        on_disk.set_persistence(mode);
        match on_disk.save(&self.settings_path) {
            Ok(()) => info!(mode = %mode, "Settings saved"),
            Err(e) => warn!(error = %e, "Failed to save settings"),
        }
    }

    /// Collects session and stored scores for every game.
    #[instrument(skip(self))]
    fn score_rows(&self) -> Vec<ScoreRow> {
        GameKind::iter()
            .map(|kind| {
                let saved = match self.selector.store().load(kind) {
                    Ok(record) => record,
                    Err(e) => {
                        warn!(game = %kind, error = %e, "Failed to load stored scores");
                        None
                    }
                };
                ScoreRow {
                    kind,
                    session: self.selector.session_scores(kind),
                    saved,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use parlor_engine::{MemoryScoreStore, ScoreRecord};
    use tempfile::NamedTempFile;

    fn controller(path: PathBuf, store: Arc<MemoryScoreStore>) -> LobbyController {
        let settings = Settings::default();
        let selector = GameSelector::new(*settings.persistence(), store, None);
        LobbyController::new(settings, path, selector)
    }

    #[test]
    fn test_leaving_game_keeps_engine() {
        let file = NamedTempFile::new().unwrap();
        let mut lobby = controller(file.path().to_path_buf(), Arc::new(MemoryScoreStore::new()));

        let screen = lobby
            .apply_transition(
                ScreenTransition::Launch(GameKind::TicTacToe),
                ActiveScreen::GameSelect(GameSelectScreen::new()),
            )
            .unwrap();
        assert!(matches!(screen, ActiveScreen::Board(_)));

        let screen = lobby
            .apply_transition(ScreenTransition::GoToGameSelect, screen)
            .unwrap();
        assert!(matches!(screen, ActiveScreen::GameSelect(_)));
        assert_eq!(
            lobby.selector().session_scores(GameKind::TicTacToe),
            Some(ScoreRecord::default())
        );
    }

    #[test]
    fn test_set_persistence_saves_settings_file() {
        let file = NamedTempFile::new().unwrap();
        let mut lobby = controller(file.path().to_path_buf(), Arc::new(MemoryScoreStore::new()));

        let screen = lobby
            .apply_transition(
                ScreenTransition::SetPersistence(PersistenceMode::Durable),
                ActiveScreen::Settings(SettingsScreen::new(PersistenceMode::SessionOnly)),
            )
            .unwrap();
        assert!(matches!(screen, ActiveScreen::Settings(_)));
        assert_eq!(lobby.selector().mode(), PersistenceMode::Durable);

        let saved = Settings::from_file(file.path()).unwrap();
        assert_eq!(*saved.persistence(), PersistenceMode::Durable);
    }

    #[test]
    fn test_set_persistence_keeps_overrides_out_of_settings_file() {
        let file = NamedTempFile::new().unwrap();
        let on_disk = Settings::default().with_word_file(PathBuf::from("saved_words.csv"));
        on_disk.save(file.path()).unwrap();

        let settings = Settings::from_file(file.path())
            .unwrap()
            .with_database(PathBuf::from("/tmp/override.db"))
            .with_word_file(PathBuf::from("/tmp/override_words.csv"));
        let store = Arc::new(MemoryScoreStore::new());
        let selector = GameSelector::new(*settings.persistence(), store, None);
        let mut lobby = LobbyController::new(settings, file.path().to_path_buf(), selector);

        lobby.set_persistence(PersistenceMode::Durable);

        let saved = Settings::from_file(file.path()).unwrap();
        assert_eq!(*saved.persistence(), PersistenceMode::Durable);
        assert_eq!(saved.word_file(), &Some(PathBuf::from("saved_words.csv")));
        assert_eq!(
            saved.database(),
            &PathBuf::from(crate::DEFAULT_DATABASE_FILE)
        );
        assert_eq!(
            lobby.settings().database(),
            &PathBuf::from("/tmp/override.db")
        );
    }

    #[test]
    fn test_score_rows_cover_every_game() {
        let file = NamedTempFile::new().unwrap();
        let store = Arc::new(MemoryScoreStore::new());
        store
            .save(GameKind::Hangman, ScoreRecord::new(4, 1))
            .unwrap();
        let lobby = controller(file.path().to_path_buf(), store);

        let rows = lobby.score_rows();
        assert_eq!(rows.len(), 3);
        let hangman = rows.iter().find(|r| r.kind == GameKind::Hangman).unwrap();
        assert_eq!(hangman.saved, Some(ScoreRecord::new(4, 1)));
        assert_eq!(hangman.session, None);
    }

    #[test]
    fn test_quit_ends_loop() {
        let file = NamedTempFile::new().unwrap();
        let mut lobby = controller(file.path().to_path_buf(), Arc::new(MemoryScoreStore::new()));
        assert!(
            lobby
                .apply_transition(
                    ScreenTransition::Quit,
                    ActiveScreen::GameSelect(GameSelectScreen::new())
                )
                .is_none()
        );
    }
}
