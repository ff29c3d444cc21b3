//! Database models for stored score records.

use std::str::FromStr;

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use parlor_engine::{GameKind, ScoreRecord};
use serde::Serialize;
use tracing::instrument;

use crate::db::{DbError, schema};

/// One stored score row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::scores)]
pub struct StoredScore {
    game: String,
    first: i32,
    second: i32,
    updated_at: NaiveDateTime,
}

impl StoredScore {
    /// Parses the stored game key.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the key names no known game.
    #[instrument(skip(self), fields(game = %self.game))]
    pub fn kind(&self) -> Result<GameKind, DbError> {
        GameKind::from_str(&self.game)
            .map_err(|_| DbError::new(format!("Unknown game key: '{}'", self.game)))
    }

    /// Converts the stored counters into a [`ScoreRecord`].
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if either counter is negative.
    #[instrument(skip(self), fields(game = %self.game))]
    pub fn record(&self) -> Result<ScoreRecord, DbError> {
        let first = u32::try_from(self.first).map_err(|_| {
            DbError::new(format!("Negative score {} for '{}'", self.first, self.game))
        })?;
        let second = u32::try_from(self.second).map_err(|_| {
            DbError::new(format!("Negative score {} for '{}'", self.second, self.game))
        })?;
        Ok(ScoreRecord::new(first, second))
    }
}

/// Insertable score row; inserted with replace semantics.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::scores)]
pub struct NewScore {
    game: String,
    first: i32,
    second: i32,
    updated_at: NaiveDateTime,
}

impl NewScore {
    /// Builds a row for `game` stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a counter does not fit the column type.
    #[instrument]
    pub fn from_record(game: GameKind, record: ScoreRecord) -> Result<Self, DbError> {
        let first = i32::try_from(record.first)
            .map_err(|_| DbError::new(format!("Score {} too large to store", record.first)))?;
        let second = i32::try_from(record.second)
            .map_err(|_| DbError::new(format!("Score {} too large to store", record.second)))?;
        Ok(Self::new(
            game.key().to_string(),
            first,
            second,
            chrono::Utc::now().naive_utc(),
        ))
    }
}
