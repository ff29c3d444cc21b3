//! Hangman screen.

use crossterm::event::{KeyCode, KeyEvent};
use parlor_engine::{GameEngine, Hangman, HangmanInput, HangmanSnapshot, MAX_MISSES};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use tracing::{debug, info, instrument};

use crate::Settings;
use crate::lobby::screen::{Screen, ScreenTransition};

/// Gallows drawing, one frame per miss count.
const GALLOWS: [&str; MAX_MISSES + 1] = [
    "  +---+\n      |\n      |\n      |\n      |\n=======",
    "  +---+\n  |   |\n      |\n      |\n      |\n=======",
    "  +---+\n  |   |\n  O   |\n      |\n      |\n=======",
    "  +---+\n  |   |\n  O   |\n  |   |\n      |\n=======",
    "  +---+\n  |   |\n  O   |\n /|   |\n      |\n=======",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n      |\n=======",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n /    |\n=======",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n / \\  |\n=======",
];

/// State for a running hangman game.
///
/// Every printable key is a guess; the engine ignores anything that is not a
/// letter, so only Esc leaves the screen.
#[derive(Debug)]
pub struct HangmanScreen {
    game: Hangman,
    snapshot: HangmanSnapshot,
}

impl HangmanScreen {
    /// Creates the screen for a freshly launched round.
    #[instrument(skip(game))]
    pub fn new(game: Hangman) -> Self {
        debug!("Initializing HangmanScreen");
        let snapshot = game.snapshot();
        Self { game, snapshot }
    }

    /// Returns the latest snapshot.
    pub fn snapshot(&self) -> &HangmanSnapshot {
        &self.snapshot
    }

    /// Hands the engine back when leaving the screen.
    pub fn into_game(self) -> Hangman {
        self.game
    }

    fn submit(&mut self, input: HangmanInput) {
        self.snapshot = self.game.apply(input);
        if let Some(event) = self.snapshot.event {
            info!(?event, scores = ?self.snapshot.scores, "Round over");
        }
    }
}

impl Screen for HangmanScreen {
    #[instrument(skip(self, frame, _settings))]
    fn render(&self, frame: &mut Frame, _settings: &Settings) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new("Hangman")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let scores = Paragraph::new(format!(
            "Wins: {}   Losses: {}",
            self.snapshot.scores.first, self.snapshot.scores.second
        ))
        .style(Style::default().fg(Color::Green))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Score"));
        frame.render_widget(scores, chunks[1]);

        let misses = self.snapshot.missed.len().min(MAX_MISSES);
        let gallows = Paragraph::new(GALLOWS[misses])
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(gallows, chunks[2]);

        let word_style = match self.snapshot.won {
            Some(true) => Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            Some(false) => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            None => Style::default().add_modifier(Modifier::BOLD),
        };
        let word = Paragraph::new(self.snapshot.message.as_str())
            .style(word_style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(word, chunks[3]);

        let info_text = if self.snapshot.running {
            let missed: String = self.snapshot.missed.iter().collect();
            format!(
                "Missed letters: {}   ({} left)",
                missed, self.snapshot.misses_remaining
            )
        } else {
            "Press ENTER to restart".to_string()
        };
        let info = Paragraph::new(info_text)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(info, chunks[4]);

        let help = Paragraph::new("a-z: Guess | Enter: Restart | Esc: Back")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[5]);
    }

    #[instrument(skip(self, key, _settings))]
    fn handle_key(&mut self, key: KeyEvent, _settings: &Settings) -> ScreenTransition {
        match key.code {
            KeyCode::Char(c) => self.submit(HangmanInput::Letter(c)),
            KeyCode::Enter => self.submit(HangmanInput::Restart),
            KeyCode::Esc => {
                info!("Returning to game selection");
                return ScreenTransition::GoToGameSelect;
            }
            _ => {}
        }
        ScreenTransition::Stay
    }
}
