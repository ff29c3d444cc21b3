//! Application settings persisted as a TOML file.

use std::path::{Path, PathBuf};

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use parlor_engine::PersistenceMode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Default settings file name.
pub const DEFAULT_SETTINGS_FILE: &str = "parlor_games.toml";

/// Default score database file name.
pub const DEFAULT_DATABASE_FILE: &str = "parlor_games.db";

/// User-configurable settings.
///
/// Missing keys fall back to their defaults, so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Setters)]
#[serde(default)]
#[setters(prefix = "with_")]
pub struct Settings {
    /// How scores survive leaving a game and closing the application.
    persistence: PersistenceMode,

    /// Comma-separated hangman word list, re-read at every new word.
    #[setters(strip_option)]
    word_file: Option<PathBuf>,

    /// SQLite file holding durable scores.
    database: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            persistence: PersistenceMode::default(),
            word_file: None,
            database: PathBuf::from(DEFAULT_DATABASE_FILE),
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read settings file: {}", e)))?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse settings: {}", e)))?;

        info!(persistence = %settings.persistence, "Settings loaded");
        Ok(settings)
    }

    /// Loads settings, creating the file with defaults if it does not exist.
    ///
    /// An unreadable or malformed file is reported and replaced by defaults in
    /// memory; the file itself is left alone.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_init(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No settings file, writing defaults");
            let settings = Self::default();
            if let Err(e) = settings.save(path) {
                warn!(error = %e, "Failed to write default settings");
            }
            return settings;
        }

        match Self::from_file(path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, "Using default settings");
                Self::default()
            }
        }
    }

    /// Writes settings to a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if serialization or the write fails.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize settings: {}", e)))?;
        std::fs::write(path.as_ref(), content)
            .map_err(|e| ConfigError::new(format!("Failed to write settings file: {}", e)))?;
        debug!(persistence = %self.persistence, "Settings saved");
        Ok(())
    }

    /// Sets the persistence mode in place.
    pub fn set_persistence(&mut self, mode: PersistenceMode) {
        self.persistence = mode;
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
