//! Tests for settings file handling.

use std::path::PathBuf;

use parlor_engine::PersistenceMode;
use tempfile::TempDir;

use parlor_games::{DEFAULT_DATABASE_FILE, Settings};

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("settings.toml");

    let settings = Settings::default()
        .with_persistence(PersistenceMode::Durable)
        .with_word_file(PathBuf::from("words.csv"))
        .with_database(PathBuf::from("scores.db"));
    settings.save(&path).expect("Save failed");

    let loaded = Settings::from_file(&path).expect("Load failed");
    assert_eq!(loaded, settings);
}

#[test]
fn test_load_or_init_writes_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("parlor_games.toml");
    assert!(!path.exists());

    let settings = Settings::load_or_init(&path);
    assert_eq!(settings, Settings::default());
    assert!(path.exists());

    let reread = Settings::from_file(&path).expect("Load failed");
    assert_eq!(*reread.persistence(), PersistenceMode::SessionOnly);
    assert_eq!(reread.database(), &PathBuf::from(DEFAULT_DATABASE_FILE));
}

#[test]
fn test_malformed_file_falls_back_to_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "persistence = [not toml").expect("Write failed");

    assert!(Settings::from_file(&path).is_err());
    assert_eq!(Settings::load_or_init(&path), Settings::default());

    let untouched = std::fs::read_to_string(&path).expect("Read failed");
    assert_eq!(untouched, "persistence = [not toml");
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    assert!(Settings::from_file(dir.path().join("absent.toml")).is_err());
}
