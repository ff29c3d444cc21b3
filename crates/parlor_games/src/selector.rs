//! Game selector: hands out game engines and keeps them between launches.

use std::path::PathBuf;
use std::sync::Arc;

use parlor_engine::{
    BoardGame, GameKind, Hangman, PersistenceMode, ScoreKeeper, ScoreRecord, ScoreStore, WordList,
};
use tracing::{debug, info, instrument};

/// Owns one engine per game between launches.
///
/// Launching a game always begins a new round. Unless the mode is
/// [`PersistenceMode::Discard`], the engine returned through
/// [`shelve_board`](Self::shelve_board) or
/// [`shelve_hangman`](Self::shelve_hangman) is reused on the next launch, so
/// its running score carries over. Under Discard every launch builds a fresh
/// engine.
#[derive(Debug)]
pub struct GameSelector {
    mode: PersistenceMode,
    store: Arc<dyn ScoreStore>,
    word_file: Option<PathBuf>,
    tic_tac_toe: Option<BoardGame>,
    connect_four: Option<BoardGame>,
    hangman: Option<Hangman>,
}

impl GameSelector {
    /// Creates a selector with no engines built yet.
    #[instrument(skip(store))]
    pub fn new(
        mode: PersistenceMode,
        store: Arc<dyn ScoreStore>,
        word_file: Option<PathBuf>,
    ) -> Self {
        info!("Creating GameSelector");
        Self {
            mode,
            store,
            word_file,
            tic_tac_toe: None,
            connect_four: None,
            hangman: None,
        }
    }

    /// Returns the persistence mode applied to new rounds.
    pub fn mode(&self) -> PersistenceMode {
        self.mode
    }

    /// Returns the score store engines are wired to.
    pub fn store(&self) -> &Arc<dyn ScoreStore> {
        &self.store
    }

    /// Changes the persistence mode for every engine.
    ///
    /// Switching to Discard drops the kept engines.
    #[instrument(skip(self))]
    pub fn set_mode(&mut self, mode: PersistenceMode) {
        info!(from = %self.mode, to = %mode, "Persistence mode changed");
        self.mode = mode;
        if mode == PersistenceMode::Discard {
            self.tic_tac_toe = None;
            self.connect_four = None;
            self.hangman = None;
            return;
        }
        for game in [&mut self.tic_tac_toe, &mut self.connect_four]
            .into_iter()
            .flatten()
        {
            game.set_persistence_mode(mode);
        }
        if let Some(game) = &mut self.hangman {
            game.set_persistence_mode(mode);
        }
    }

    fn keeper(&self, kind: GameKind) -> ScoreKeeper {
        ScoreKeeper::new(kind, self.mode, self.store.clone())
    }

    fn board_slot(&mut self, kind: GameKind) -> Option<&mut Option<BoardGame>> {
        match kind {
            GameKind::TicTacToe => Some(&mut self.tic_tac_toe),
            GameKind::ConnectFour => Some(&mut self.connect_four),
            GameKind::Hangman => None,
        }
    }

    /// Starts a round of a board game, or `None` for hangman.
    #[instrument(skip(self))]
    pub fn launch_board(&mut self, kind: GameKind) -> Option<BoardGame> {
        let keep = self.mode != PersistenceMode::Discard;
        let kept = self.board_slot(kind)?.take().filter(|_| keep);
        match kept {
            Some(mut game) => {
                debug!("Reusing kept engine");
                game.begin_game();
                Some(game)
            }
            None => {
                debug!("Building fresh engine");
                BoardGame::for_kind(kind, self.keeper(kind))
            }
        }
    }

    /// Takes back a board game when the player leaves it.
    #[instrument(skip(self, game), fields(kind = %game.kind()))]
    pub fn shelve_board(&mut self, game: BoardGame) {
        if self.mode == PersistenceMode::Discard {
            debug!("Discarding engine");
            return;
        }
        if let Some(slot) = self.board_slot(game.kind()) {
            *slot = Some(game);
        }
    }

    /// Starts a round of hangman.
    #[instrument(skip(self))]
    pub fn launch_hangman(&mut self) -> Hangman {
        let kept = self
            .hangman
            .take()
            .filter(|_| self.mode != PersistenceMode::Discard);
        if let Some(mut game) = kept {
            debug!("Reusing kept engine");
            game.begin_game();
            return game;
        }

        debug!("Building fresh engine");
        let keeper = self.keeper(GameKind::Hangman);
        match &self.word_file {
            Some(path) => Hangman::from_word_file(path.clone(), keeper),
            None => Hangman::new(WordList::default(), keeper),
        }
    }

    /// Takes back hangman when the player leaves it.
    #[instrument(skip(self, game))]
    pub fn shelve_hangman(&mut self, game: Hangman) {
        if self.mode == PersistenceMode::Discard {
            debug!("Discarding engine");
            return;
        }
        self.hangman = Some(game);
    }

    /// Returns the running score of a kept engine.
    pub fn session_scores(&self, kind: GameKind) -> Option<ScoreRecord> {
        match kind {
            GameKind::TicTacToe => self.tic_tac_toe.as_ref().map(BoardGame::scores),
            GameKind::ConnectFour => self.connect_four.as_ref().map(BoardGame::scores),
            GameKind::Hangman => self.hangman.as_ref().map(Hangman::scores),
        }
    }
}
