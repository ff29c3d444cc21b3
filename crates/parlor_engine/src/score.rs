//! Score records, persistence policy and the per-game score keeper.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::{GameKind, Player};

/// A pair of counters kept per game.
///
/// Board games store `(player 1 wins, player 2 wins)`; hangman stores
/// `(wins, losses)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Player 1 score, or hangman wins.
    pub first: u32,
    /// Player 2 score, or hangman losses.
    pub second: u32,
}

impl ScoreRecord {
    /// Creates a record.
    pub const fn new(first: u32, second: u32) -> Self {
        Self { first, second }
    }

    /// True if either slot of `self` is higher than the same slot of `other`.
    pub fn exceeds(&self, other: &ScoreRecord) -> bool {
        self.first > other.first || self.second > other.second
    }
}

/// How scores survive the end of a game and the end of the process.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PersistenceMode {
    /// Scores are never read; the stored record is wiped when a game starts.
    Discard,
    /// Scores live in memory only and storage is never touched.
    #[default]
    SessionOnly,
    /// Scores are loaded at game start and saved after every finished game.
    Durable,
}

impl PersistenceMode {
    /// Short label for menus.
    pub fn label(self) -> &'static str {
        match self {
            Self::Discard => "Don't save scores",
            Self::SessionOnly => "Save scores temporarily",
            Self::Durable => "Save scores permanently",
        }
    }

    /// One-line explanation for the settings screen.
    pub fn description(self) -> &'static str {
        match self {
            Self::Discard => "Progress is lost when you leave a game.",
            Self::SessionOnly => "Progress is lost when the application closes.",
            Self::Durable => "Progress is kept after the application closes.",
        }
    }
}

/// Score storage error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Score store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Storage for one score record per game key.
pub trait ScoreStore: std::fmt::Debug + Send + Sync {
    /// Loads the stored record, or `None` if the game has none.
    fn load(&self, game: GameKind) -> Result<Option<ScoreRecord>, StoreError>;

    /// Stores `record`, replacing any previous one.
    fn save(&self, game: GameKind, record: ScoreRecord) -> Result<(), StoreError>;

    /// Resets the stored record to `(0, 0)`.
    fn clear(&self, game: GameKind) -> Result<(), StoreError> {
        self.save(game, ScoreRecord::default())
    }
}

/// Process-local score store.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    records: Mutex<HashMap<GameKind, ScoreRecord>>,
}

impl MemoryScoreStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self, game: GameKind) -> Result<Option<ScoreRecord>, StoreError> {
        let records = self
            .records
            .lock()
            .map_err(|e| StoreError::new(format!("Score map poisoned: {}", e)))?;
        Ok(records.get(&game).copied())
    }

    fn save(&self, game: GameKind, record: ScoreRecord) -> Result<(), StoreError> {
        let mut records = self
            .records
            .lock()
            .map_err(|e| StoreError::new(format!("Score map poisoned: {}", e)))?;
        records.insert(game, record);
        Ok(())
    }
}

/// What reconciling an in-memory record with a stored one decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// Memory is ahead in some slot; storage gets the whole in-memory pair.
    KeepMemory,
    /// Storage wins; memory takes the whole stored pair.
    TakeStored,
}

/// Decides which whole pair survives a load.
///
/// Never merges slot by slot: memory `(4, 2)` against stored `(3, 5)` keeps
/// `(4, 2)` because memory is ahead in the first slot.
pub fn reconcile(memory: ScoreRecord, stored: ScoreRecord) -> Reconciliation {
    if memory.exceeds(&stored) {
        Reconciliation::KeepMemory
    } else {
        Reconciliation::TakeStored
    }
}

/// Owns a game's running score and applies the persistence policy to it.
///
/// Storage failures are logged and swallowed; the in-memory score is never
/// rolled back because a write failed.
#[derive(Debug, Clone)]
pub struct ScoreKeeper {
    game: GameKind,
    mode: PersistenceMode,
    store: Arc<dyn ScoreStore>,
    record: ScoreRecord,
}

impl ScoreKeeper {
    /// Creates a keeper starting from `(0, 0)`.
    #[instrument(skip(store))]
    pub fn new(game: GameKind, mode: PersistenceMode, store: Arc<dyn ScoreStore>) -> Self {
        Self {
            game,
            mode,
            store,
            record: ScoreRecord::default(),
        }
    }

    /// Creates a keeper that never touches storage.
    pub fn in_memory(game: GameKind) -> Self {
        Self::new(
            game,
            PersistenceMode::SessionOnly,
            Arc::new(MemoryScoreStore::new()),
        )
    }

    /// Returns the game this keeper scores.
    pub fn game(&self) -> GameKind {
        self.game
    }

    /// Returns the persistence mode.
    pub fn mode(&self) -> PersistenceMode {
        self.mode
    }

    /// Changes the persistence mode applied from the next game start.
    pub fn set_mode(&mut self, mode: PersistenceMode) {
        debug!(game = %self.game, from = %self.mode, to = %mode, "Persistence mode changed");
        self.mode = mode;
    }

    /// Returns the current record.
    pub fn record(&self) -> ScoreRecord {
        self.record
    }

    /// Adds one to the slot belonging to `player`.
    pub fn credit(&mut self, player: Player) {
        match player {
            Player::One => self.record.first += 1,
            Player::Two => self.record.second += 1,
        }
    }

    /// Adds one to the first slot (hangman wins).
    pub fn credit_first(&mut self) {
        self.record.first += 1;
    }

    /// Adds one to the second slot (hangman losses).
    pub fn credit_second(&mut self) {
        self.record.second += 1;
    }

    /// Applies the policy at the start of a game.
    ///
    /// Durable loads and reconciles, Discard wipes the stored record,
    /// SessionOnly does nothing.
    #[instrument(skip(self), fields(game = %self.game, mode = %self.mode))]
    pub fn on_game_start(&mut self) {
        match self.mode {
            PersistenceMode::Durable => self.load_and_reconcile(),
            PersistenceMode::Discard => {
                if let Err(e) = self.store.clear(self.game) {
                    warn!(error = %e, "Failed to clear stored scores");
                }
            }
            PersistenceMode::SessionOnly => {}
        }
    }

    /// Applies the policy after a game-ending move.
    #[instrument(skip(self), fields(game = %self.game, mode = %self.mode))]
    pub fn on_game_end(&mut self) {
        if self.mode == PersistenceMode::Durable {
            self.persist();
        }
    }

    fn load_and_reconcile(&mut self) {
        let stored = match self.store.load(self.game) {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                debug!("No stored scores");
                return;
            }
            Err(e) => {
                warn!(error = %e, "Failed to load stored scores, keeping in-memory scores");
                return;
            }
        };

        match reconcile(self.record, stored) {
            Reconciliation::KeepMemory => {
                info!(
                    memory = ?self.record,
                    stored = ?stored,
                    "In-memory scores ahead of storage, overwriting stored record"
                );
                self.persist();
            }
            Reconciliation::TakeStored => {
                debug!(stored = ?stored, "Loaded stored scores");
                self.record = stored;
            }
        }
    }

    fn persist(&self) {
        match self.store.save(self.game, self.record) {
            Ok(()) => debug!(record = ?self.record, "Scores saved"),
            Err(e) => warn!(error = %e, "Failed to save scores"),
        }
    }
}
