//! Tests for the SQLite score repository.

use std::sync::Arc;

use diesel::{Connection, RunQueryDsl, SqliteConnection};
use parlor_engine::{
    BoardGame, CellPosition, GameKind, PersistenceMode, ScoreKeeper, ScoreRecord, ScoreStore,
};
use tempfile::NamedTempFile;

use parlor_games::ScoreRepository;

/// Creates a temporary database with the schema applied. The file handle must
/// stay in scope to keep the file alive.
fn setup_test_db() -> (NamedTempFile, ScoreRepository) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let repo = ScoreRepository::open(db_path).expect("Failed to open repository");
    (db_file, repo)
}

#[test]
fn test_empty_path_rejected() {
    assert!(ScoreRepository::new(String::new()).is_err());
}

#[test]
fn test_get_missing_game() {
    let (_db, repo) = setup_test_db();
    let found = repo.get(GameKind::Hangman).expect("Query failed");
    assert!(found.is_none());
}

#[test]
fn test_upsert_then_get() {
    let (_db, repo) = setup_test_db();
    repo.upsert(GameKind::ConnectFour, ScoreRecord::new(3, 2))
        .expect("Upsert failed");

    let row = repo
        .get(GameKind::ConnectFour)
        .expect("Query failed")
        .expect("Row missing");
    assert_eq!(row.game(), "connect4");
    assert_eq!(row.kind().expect("Bad key"), GameKind::ConnectFour);
    assert_eq!(row.record().expect("Bad record"), ScoreRecord::new(3, 2));
}

#[test]
fn test_upsert_replaces_row() {
    let (_db, repo) = setup_test_db();
    repo.upsert(GameKind::TicTacToe, ScoreRecord::new(1, 0))
        .expect("First upsert failed");
    repo.upsert(GameKind::TicTacToe, ScoreRecord::new(1, 4))
        .expect("Second upsert failed");

    let rows = repo.list().expect("List failed");
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].record().expect("Bad record"),
        ScoreRecord::new(1, 4)
    );
}

#[test]
fn test_list_ordered_by_game_key() {
    let (_db, repo) = setup_test_db();
    for kind in [
        GameKind::TicTacToe,
        GameKind::Hangman,
        GameKind::ConnectFour,
    ] {
        repo.upsert(kind, ScoreRecord::new(1, 1))
            .expect("Upsert failed");
    }
    let keys: Vec<String> = repo
        .list()
        .expect("List failed")
        .iter()
        .map(|row| row.game().clone())
        .collect();
    assert_eq!(keys, vec!["connect4", "hangman", "tictactoe"]);
}

#[test]
fn test_store_trait_load_and_clear() {
    let (_db, repo) = setup_test_db();
    assert_eq!(repo.load(GameKind::Hangman).expect("Load failed"), None);

    repo.save(GameKind::Hangman, ScoreRecord::new(5, 2))
        .expect("Save failed");
    assert_eq!(
        repo.load(GameKind::Hangman).expect("Load failed"),
        Some(ScoreRecord::new(5, 2))
    );

    repo.clear(GameKind::Hangman).expect("Clear failed");
    assert_eq!(
        repo.load(GameKind::Hangman).expect("Load failed"),
        Some(ScoreRecord::default())
    );
}

#[test]
fn test_negative_stored_value_is_malformed() {
    let (db, repo) = setup_test_db();
    let mut conn = SqliteConnection::establish(db.path().to_str().expect("Invalid path"))
        .expect("Failed to connect");
    diesel::sql_query(
        "INSERT INTO scores (game, first, second) VALUES ('hangman', -1, 0)",
    )
    .execute(&mut conn)
    .expect("Insert failed");

    assert!(repo.load(GameKind::Hangman).is_err());
}

#[test]
fn test_durable_scores_survive_reopen() {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    {
        let repo = Arc::new(ScoreRepository::open(db_path.clone()).expect("Open failed"));
        let keeper = ScoreKeeper::new(GameKind::TicTacToe, PersistenceMode::Durable, repo);
        let mut game = BoardGame::tic_tac_toe(keeper);
        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            game.place(CellPosition::new(row, col))
                .expect("Move failed");
        }
        assert_eq!(game.scores(), ScoreRecord::new(1, 0));
    }

    let repo = Arc::new(ScoreRepository::open(db_path).expect("Reopen failed"));
    let keeper = ScoreKeeper::new(GameKind::TicTacToe, PersistenceMode::Durable, repo);
    let game = BoardGame::tic_tac_toe(keeper);
    assert_eq!(game.scores(), ScoreRecord::new(1, 0));
}
