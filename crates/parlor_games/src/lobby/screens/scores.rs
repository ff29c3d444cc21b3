//! Score overview screen.

use crossterm::event::{KeyCode, KeyEvent};
use parlor_engine::{GameKind, ScoreRecord};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use tracing::{debug, info, instrument};

use crate::Settings;
use crate::lobby::screen::{Screen, ScreenTransition};

/// Scores of one game as shown in the overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRow {
    /// The game.
    pub kind: GameKind,
    /// Running score of the kept engine, if one is kept.
    pub session: Option<ScoreRecord>,
    /// Record in the score store, if any.
    pub saved: Option<ScoreRecord>,
}

/// State for the score overview screen.
#[derive(Debug)]
pub struct ScoresScreen {
    rows: Vec<ScoreRow>,
}

impl ScoresScreen {
    /// Creates the screen from rows collected by the controller.
    #[instrument(skip(rows))]
    pub fn new(rows: Vec<ScoreRow>) -> Self {
        debug!(count = rows.len(), "Initializing ScoresScreen");
        Self { rows }
    }
}

fn format_record(kind: GameKind, record: Option<ScoreRecord>) -> String {
    let (first, second) = kind.score_labels();
    match record {
        Some(r) => format!("{} {} / {} {}", first, r.first, second, r.second),
        None => "-".to_string(),
    }
}

impl Screen for ScoresScreen {
    #[instrument(skip(self, frame, settings))]
    fn render(&self, frame: &mut Frame, settings: &Settings) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new(format!("Scores ({})", settings.persistence().label()))
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let header = Row::new(vec![
            Cell::from("Game").style(Style::default().add_modifier(Modifier::BOLD)),
            Cell::from("This session").style(Style::default().add_modifier(Modifier::BOLD)),
            Cell::from("Saved").style(Style::default().add_modifier(Modifier::BOLD)),
        ])
        .style(Style::default().fg(Color::Yellow));

        let rows: Vec<Row> = self
            .rows
            .iter()
            .map(|row| {
                Row::new(vec![
                    Cell::from(row.kind.label()),
                    Cell::from(format_record(row.kind, row.session)),
                    Cell::from(format_record(row.kind, row.saved)),
                ])
            })
            .collect();

        let widths = [
            Constraint::Percentage(24),
            Constraint::Percentage(38),
            Constraint::Percentage(38),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title("Games"));
        frame.render_widget(table, chunks[1]);

        let help = Paragraph::new("Esc / b: Back | q: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);
    }

    #[instrument(skip(self, key, _settings))]
    fn handle_key(&mut self, key: KeyEvent, _settings: &Settings) -> ScreenTransition {
        match key.code {
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('B') => {
                info!("Returning to game selection from scores");
                ScreenTransition::GoToGameSelect
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_record_uses_game_labels() {
        assert_eq!(
            format_record(GameKind::Hangman, Some(ScoreRecord::new(2, 1))),
            "Wins 2 / Losses 1"
        );
        assert_eq!(
            format_record(GameKind::TicTacToe, Some(ScoreRecord::new(0, 3))),
            "Player 1 0 / Player 2 3"
        );
        assert_eq!(format_record(GameKind::ConnectFour, None), "-");
    }
}
