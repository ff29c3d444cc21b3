//! SQLite score repository.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use parlor_engine::{GameKind, ScoreRecord, ScoreStore, StoreError};
use tracing::{debug, info, instrument};

use crate::db::{DbError, NewScore, StoredScore, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Score storage backed by a SQLite file, one row per game key.
#[derive(Debug, Clone)]
pub struct ScoreRepository {
    db_path: String,
}

impl ScoreRepository {
    /// Creates a repository for the database at the given path.
    ///
    /// Use `":memory:"` only with care: every call opens a new connection, so
    /// an in-memory database does not outlive a single operation.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is empty.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        if db_path.trim().is_empty() {
            return Err(DbError::new("Database path is empty"));
        }
        info!(path = %db_path, "Creating ScoreRepository");
        Ok(Self { db_path })
    }

    /// Creates a repository and applies pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, DbError> {
        let repo = Self::new(db_path)?;
        repo.run_migrations()?;
        Ok(repo)
    }

    /// Returns the database path.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Applies embedded schema migrations that have not run yet.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migrations failed: {}", e)))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Gets the stored row for a game. Returns `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get(&self, game: GameKind) -> Result<Option<StoredScore>, DbError> {
        let mut conn = self.connection()?;

        let row = schema::scores::table
            .filter(schema::scores::game.eq(game.key()))
            .select(StoredScore::as_select())
            .first(&mut conn)
            .optional()?;

        debug!(found = row.is_some(), "Score lookup finished");
        Ok(row)
    }

    /// Lists all stored rows ordered by game key.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list(&self) -> Result<Vec<StoredScore>, DbError> {
        let mut conn = self.connection()?;

        let rows = schema::scores::table
            .order(schema::scores::game.asc())
            .select(StoredScore::as_select())
            .load(&mut conn)?;

        info!(count = rows.len(), "Scores loaded");
        Ok(rows)
    }

    /// Writes the record for a game, replacing any existing row.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the record cannot be stored.
    #[instrument(skip(self))]
    pub fn upsert(&self, game: GameKind, record: ScoreRecord) -> Result<(), DbError> {
        let row = NewScore::from_record(game, record)?;
        let mut conn = self.connection()?;

        diesel::replace_into(schema::scores::table)
            .values(&row)
            .execute(&mut conn)?;

        debug!(
            first = record.first,
            second = record.second,
            "Score row written"
        );
        Ok(())
    }
}

impl ScoreStore for ScoreRepository {
    fn load(&self, game: GameKind) -> Result<Option<ScoreRecord>, StoreError> {
        let Some(row) = self.get(game)? else {
            return Ok(None);
        };
        Ok(Some(row.record()?))
    }

    fn save(&self, game: GameKind, record: ScoreRecord) -> Result<(), StoreError> {
        self.upsert(game, record)?;
        Ok(())
    }
}
