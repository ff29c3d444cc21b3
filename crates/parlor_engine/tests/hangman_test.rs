//! Tests for hangman sessions driven through `handle_input`.

use parlor_engine::{
    GameEvent, GameKind, Hangman, HangmanInput, HangmanSnapshot, MAX_MISSES, ScoreKeeper,
    ScoreRecord, WordList, handle_input,
};

fn hangman(word: &str) -> Hangman {
    Hangman::with_seed(
        WordList::from_csv(word),
        ScoreKeeper::in_memory(GameKind::Hangman),
        1,
    )
}

fn guess_all(mut game: Hangman, letters: &str) -> (Hangman, HangmanSnapshot) {
    let mut last = None;
    for ch in letters.chars() {
        let (next, snapshot) = handle_input(game, HangmanInput::Letter(ch));
        game = next;
        last = Some(snapshot);
    }
    let snapshot = last.expect("No letters guessed");
    (game, snapshot)
}

#[test]
fn test_guess_reveals_every_occurrence() {
    let (_game, snapshot) = guess_all(hangman("banana"), "a");
    assert_eq!(snapshot.revealed, "*a*a*a");
    assert_eq!(snapshot.message, "Guess a word: *a*a*a");
    assert!(snapshot.missed.is_empty());
    assert_eq!(snapshot.misses_remaining, MAX_MISSES);
}

#[test]
fn test_repeated_guess_is_noop() {
    let (game, first) = guess_all(hangman("banana"), "ax");
    let (_game, second) = guess_all(game, "ax");
    assert_eq!(first, second);
    assert_eq!(second.missed, vec!['x']);
}

#[test]
fn test_seven_misses_lose() {
    let (game, snapshot) = guess_all(hangman("chip"), "qwertyu");
    assert_eq!(snapshot.event, Some(GameEvent::Hanged));
    assert!(!snapshot.running);
    assert_eq!(snapshot.won, Some(false));
    assert_eq!(snapshot.revealed, "chip");
    assert_eq!(snapshot.missed, vec!['q', 'w', 'e', 'r', 't', 'y', 'u']);
    assert_eq!(snapshot.scores, ScoreRecord::new(0, 1));

    let (_game, after) = guess_all(game, "c");
    assert_eq!(after.event, None);
    assert_eq!(after.revealed, "chip");
}

#[test]
fn test_word_guessed_with_misses() {
    let (_game, snapshot) = guess_all(hangman("boat"), "bzOqAt");
    assert_eq!(snapshot.event, Some(GameEvent::WordGuessed));
    assert_eq!(snapshot.won, Some(true));
    assert_eq!(snapshot.missed, vec!['z', 'q']);
    assert_eq!(snapshot.message, "The word is: boat");
    assert_eq!(snapshot.scores, ScoreRecord::new(1, 0));
}

#[test]
fn test_restart_after_loss_keeps_scores() {
    let (game, _) = guess_all(hangman("tree"), "abcdfgh");
    let (_game, fresh) = handle_input(game, HangmanInput::Restart);
    assert!(fresh.running);
    assert_eq!(fresh.revealed, "****");
    assert!(fresh.missed.is_empty());
    assert_eq!(fresh.scores, ScoreRecord::new(0, 1));
}

#[test]
fn test_word_file_reread_each_game() {
    let file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    std::fs::write(file.path(), "car").expect("Write failed");
    let game = Hangman::from_word_file(
        file.path().to_path_buf(),
        ScoreKeeper::in_memory(GameKind::Hangman),
    );
    assert_eq!(game.secret(), "car");

    std::fs::write(file.path(), " Ground ").expect("Write failed");
    let (game, _) = guess_all(game, "car");
    let (game, _) = handle_input(game, HangmanInput::Restart);
    assert_eq!(game.secret(), "ground");
}
