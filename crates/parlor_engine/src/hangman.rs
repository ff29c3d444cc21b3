//! Hangman: guess the secret word before seven misses.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    GameEngine, GameEvent, GameKind, HangmanInput, InputError, PersistenceMode, ScoreKeeper,
    ScoreRecord, TurnError,
};

/// Misses that end the game.
pub const MAX_MISSES: usize = 7;

/// Words used when no word file is configured or it has no usable entry.
pub const DEFAULT_WORDS: [&str; 7] = ["banana", "chip", "car", "boat", "ground", "textile", "tree"];

/// Placeholder shown for unrevealed letters.
pub const HIDDEN: char = '*';

/// Candidate secret words.
///
/// Always holds at least one word: parsing that yields nothing usable falls
/// back to [`DEFAULT_WORDS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
    words: Vec<String>,
}

impl Default for WordList {
    fn default() -> Self {
        Self {
            words: DEFAULT_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl WordList {
    /// Parses a comma-separated list.
    ///
    /// Entries are trimmed and lowercased; entries that are empty or contain
    /// anything but `a-z` are skipped.
    #[instrument(skip(csv))]
    pub fn from_csv(csv: &str) -> Self {
        let mut words = Vec::new();
        for entry in csv.split(',') {
            let word = entry.trim().to_ascii_lowercase();
            if word.is_empty() {
                continue;
            }
            if !word.chars().all(|c| c.is_ascii_lowercase()) {
                warn!(word = %word, "Skipping word with non-letter characters");
                continue;
            }
            words.push(word);
        }

        if words.is_empty() {
            warn!("Word list has no usable words, using defaults");
            return Self::default();
        }
        debug!(count = words.len(), "Word list parsed");
        Self { words }
    }

    /// Reads a comma-separated word file, falling back to the defaults if it
    /// is missing or unreadable.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Self {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(content) => Self::from_csv(&content),
            Err(e) => {
                warn!(error = %e, "Failed to read word file, using defaults");
                Self::default()
            }
        }
    }

    /// Returns the words.
    pub fn words(&self) -> &[String] {
        &self.words
    }
}

/// What a guess did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guess {
    /// Not a letter, already guessed, or game over.
    Ignored,
    /// Revealed at least one letter.
    Hit,
    /// Letter is not in the word.
    Miss,
    /// Revealed the last hidden letter.
    Won,
    /// Reached the miss limit.
    Lost,
}

/// Everything a renderer needs to redraw hangman.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HangmanSnapshot {
    /// Word with hidden letters as `*`; the whole word once the game is over.
    pub revealed: String,
    /// Wrong letters in the order they were guessed.
    pub missed: Vec<char>,
    /// Misses left before losing.
    pub misses_remaining: usize,
    /// Status line.
    pub message: String,
    /// True while guesses are accepted.
    pub running: bool,
    /// `Some(true)` after a win, `Some(false)` after a loss.
    pub won: Option<bool>,
    /// Wins and losses.
    pub scores: ScoreRecord,
    /// Why the last input was refused, if it was.
    pub rejection: Option<InputError>,
    /// Set only on the input that ended the game.
    pub event: Option<GameEvent>,
}

/// A hangman session.
#[derive(Debug, Clone)]
pub struct Hangman {
    words: WordList,
    word_file: Option<PathBuf>,
    secret: Vec<char>,
    revealed: Vec<Option<char>>,
    guessed: HashSet<char>,
    missed: Vec<char>,
    running: bool,
    won: bool,
    scores: ScoreKeeper,
    rng: StdRng,
}

impl Hangman {
    /// Starts a game drawing from `words`.
    pub fn new(words: WordList, scores: ScoreKeeper) -> Self {
        Self::with_rng(words, scores, StdRng::from_entropy())
    }

    /// Starts a game whose word choices are reproducible from `seed`.
    pub fn with_seed(words: WordList, scores: ScoreKeeper, seed: u64) -> Self {
        Self::with_rng(words, scores, StdRng::seed_from_u64(seed))
    }

    fn with_rng(words: WordList, scores: ScoreKeeper, rng: StdRng) -> Self {
        let mut game = Self {
            words,
            word_file: None,
            secret: Vec::new(),
            revealed: Vec::new(),
            guessed: HashSet::new(),
            missed: Vec::new(),
            running: false,
            won: false,
            scores,
            rng,
        };
        game.begin_game();
        game
    }

    /// Starts a game that re-reads `path` before every new word.
    pub fn from_word_file(path: PathBuf, scores: ScoreKeeper) -> Self {
        let mut game = Self::new(WordList::load(&path), scores);
        game.word_file = Some(path);
        game
    }

    /// Picks a new secret word and clears all guesses.
    #[instrument(skip(self))]
    pub fn begin_game(&mut self) {
        if let Some(path) = &self.word_file {
            self.words = WordList::load(path);
        }

        let word = self
            .words
            .words()
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_else(|| DEFAULT_WORDS[0].to_string());

        self.secret = word.chars().collect();
        self.revealed = vec![None; self.secret.len()];
        self.guessed.clear();
        self.missed.clear();
        self.won = false;
        self.running = true;
        self.scores.on_game_start();
        info!(letters = self.secret.len(), scores = ?self.scores.record(), "Hangman game started");
    }

    /// Starts a new game once the current one is over.
    ///
    /// # Errors
    ///
    /// Returns [`TurnError::GameInProgress`] while the game is running.
    pub fn restart(&mut self) -> Result<(), TurnError> {
        if self.running {
            return Err(TurnError::GameInProgress);
        }
        self.begin_game();
        Ok(())
    }

    /// Guesses a letter.
    ///
    /// Input is lowercased. Anything outside `a-z`, a repeated letter, or a
    /// guess after the game ended is ignored without changing state.
    #[instrument(skip(self))]
    pub fn guess_letter(&mut self, ch: char) -> Guess {
        let ch = ch.to_ascii_lowercase();
        if !ch.is_ascii_lowercase() || !self.running || !self.guessed.insert(ch) {
            return Guess::Ignored;
        }

        let mut hit = false;
        for (slot, &letter) in self.revealed.iter_mut().zip(&self.secret) {
            if slot.is_none() && letter == ch {
                *slot = Some(ch);
                hit = true;
            }
        }

        if self.is_revealed() {
            self.scores.credit_first();
            self.end_game(true);
            return Guess::Won;
        }

        if hit {
            debug!(letter = %ch, "Letter revealed");
            return Guess::Hit;
        }

        self.missed.push(ch);
        debug!(letter = %ch, misses = self.missed.len(), "Letter missed");
        if self.missed.len() == MAX_MISSES {
            self.scores.credit_second();
            self.end_game(false);
            return Guess::Lost;
        }
        Guess::Miss
    }

    fn end_game(&mut self, won: bool) {
        self.running = false;
        self.won = won;
        self.scores.on_game_end();
        info!(won, scores = ?self.scores.record(), "Hangman game over");
    }

    fn is_revealed(&self) -> bool {
        self.revealed.iter().all(Option::is_some)
    }

    /// Returns the secret word.
    pub fn secret(&self) -> String {
        self.secret.iter().collect()
    }

    /// Returns the word with unrevealed letters hidden.
    pub fn masked(&self) -> String {
        self.revealed.iter().map(|c| c.unwrap_or(HIDDEN)).collect()
    }

    /// Returns every letter guessed this game.
    pub fn guessed(&self) -> &HashSet<char> {
        &self.guessed
    }

    /// Returns the wrong letters in guess order.
    pub fn missed(&self) -> &[char] {
        &self.missed
    }

    /// Returns true while guesses are accepted.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns true if the finished game was won.
    pub fn is_won(&self) -> bool {
        !self.running && self.won
    }

    /// Returns wins and losses.
    pub fn scores(&self) -> ScoreRecord {
        self.scores.record()
    }

    /// Switches the persistence policy for future game starts and ends.
    pub fn set_persistence_mode(&mut self, mode: PersistenceMode) {
        self.scores.set_mode(mode);
    }

    /// Returns the game kind.
    pub fn kind(&self) -> GameKind {
        GameKind::Hangman
    }
}

impl GameEngine for Hangman {
    type Input = HangmanInput;
    type Snapshot = HangmanSnapshot;

    fn apply(&mut self, input: HangmanInput) -> HangmanSnapshot {
        let (event, rejection) = match input {
            HangmanInput::Letter(ch) => match self.guess_letter(ch) {
                Guess::Won => (Some(GameEvent::WordGuessed), None),
                Guess::Lost => (Some(GameEvent::Hanged), None),
                _ => (None, None),
            },
            HangmanInput::Restart => (None, self.restart().err().map(InputError::from)),
        };
        let mut snapshot = self.snapshot();
        snapshot.event = event;
        snapshot.rejection = rejection;
        snapshot
    }

    fn snapshot(&self) -> HangmanSnapshot {
        let (revealed, message) = if self.running {
            let masked = self.masked();
            let message = format!("Guess a word: {}", masked);
            (masked, message)
        } else {
            let word = self.secret();
            let message = format!("The word is: {}", word);
            (word, message)
        };
        HangmanSnapshot {
            revealed,
            missed: self.missed.clone(),
            misses_remaining: MAX_MISSES.saturating_sub(self.missed.len()),
            message,
            running: self.running,
            won: (!self.running).then_some(self.won),
            scores: self.scores.record(),
            rejection: None,
            event: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game_with(word: &str) -> Hangman {
        Hangman::with_seed(
            WordList::from_csv(word),
            ScoreKeeper::in_memory(GameKind::Hangman),
            7,
        )
    }

    #[test]
    fn test_word_list_parsing() {
        let list = WordList::from_csv(" Apple, ,pear,two words,kiwi ");
        assert_eq!(list.words(), &["apple", "pear", "kiwi"]);
    }

    #[test]
    fn test_word_list_falls_back_to_defaults() {
        assert_eq!(WordList::from_csv(" , 123"), WordList::default());
        assert_eq!(
            WordList::load("/nonexistent/parlor/words.txt"),
            WordList::default()
        );
    }

    #[test]
    fn test_begin_game_hides_everything() {
        let game = game_with("banana");
        assert_eq!(game.masked(), "******");
        assert!(game.is_running());
        assert!(game.guessed().is_empty());
        assert!(game.missed().is_empty());
    }

    #[test]
    fn test_uppercase_and_non_letters() {
        let mut game = game_with("banana");
        assert_eq!(game.guess_letter('B'), Guess::Hit);
        assert_eq!(game.masked(), "b*****");
        assert_eq!(game.guess_letter('1'), Guess::Ignored);
        assert_eq!(game.guess_letter('-'), Guess::Ignored);
        assert_eq!(game.guess_letter('é'), Guess::Ignored);
        assert_eq!(game.guessed().len(), 1);
    }

    #[test]
    fn test_win_increments_wins() {
        let mut game = game_with("car");
        assert_eq!(game.guess_letter('c'), Guess::Hit);
        assert_eq!(game.guess_letter('z'), Guess::Miss);
        assert_eq!(game.guess_letter('a'), Guess::Hit);
        assert_eq!(game.guess_letter('r'), Guess::Won);
        assert!(game.is_won());
        assert_eq!(game.scores(), ScoreRecord::new(1, 0));
        assert_eq!(game.guess_letter('q'), Guess::Ignored);
    }

    #[test]
    fn test_snapshot_shows_word_after_loss() {
        let mut game = game_with("tree");
        for ch in ['a', 'b', 'c', 'd', 'f', 'g'] {
            game.guess_letter(ch);
        }
        let snapshot = game.apply(HangmanInput::Letter('h'));
        assert_eq!(snapshot.event, Some(GameEvent::Hanged));
        assert_eq!(snapshot.revealed, "tree");
        assert_eq!(snapshot.message, "The word is: tree");
        assert_eq!(snapshot.won, Some(false));
        assert_eq!(snapshot.misses_remaining, 0);
    }

    #[test]
    fn test_restart_rejected_while_running() {
        let mut game = game_with("boat");
        game.guess_letter('b');
        let snapshot = game.apply(HangmanInput::Restart);
        assert_eq!(
            snapshot.rejection,
            Some(InputError::Turn(TurnError::GameInProgress))
        );
        assert_eq!(snapshot.revealed, "b***");
    }

    #[test]
    fn test_word_choice_is_reproducible() {
        let words = WordList::default();
        let a = Hangman::with_seed(words.clone(), ScoreKeeper::in_memory(GameKind::Hangman), 42);
        let b = Hangman::with_seed(words, ScoreKeeper::in_memory(GameKind::Hangman), 42);
        assert_eq!(a.secret(), b.secret());
        assert!(DEFAULT_WORDS.contains(&a.secret().as_str()));
    }
}
