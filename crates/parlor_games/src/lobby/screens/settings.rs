//! Settings screen: choose how scores are kept.

use crossterm::event::{KeyCode, KeyEvent};
use parlor_engine::PersistenceMode;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

use crate::Settings;
use crate::lobby::screen::{Screen, ScreenTransition};

/// State for the settings screen.
///
/// Picking an option saves it right away; there is no confirm step.
#[derive(Debug)]
pub struct SettingsScreen {
    modes: Vec<PersistenceMode>,
    list_state: ListState,
}

impl SettingsScreen {
    /// Creates the screen with the current mode highlighted.
    #[instrument]
    pub fn new(current: PersistenceMode) -> Self {
        debug!("Initializing SettingsScreen");
        let modes: Vec<PersistenceMode> = PersistenceMode::iter().collect();
        let mut list_state = ListState::default();
        list_state.select(Some(modes.iter().position(|m| *m == current).unwrap_or(0)));
        Self { modes, list_state }
    }

    fn highlighted(&self) -> PersistenceMode {
        let idx = self.list_state.selected().unwrap_or(0);
        self.modes[idx.min(self.modes.len() - 1)]
    }

    fn move_selection(&mut self, forward: bool) {
        let count = self.modes.len();
        let current = self.list_state.selected().unwrap_or(0);
        let next = if forward {
            (current + 1) % count
        } else {
            (current + count - 1) % count
        };
        self.list_state.select(Some(next));
    }
}

impl Screen for SettingsScreen {
    #[instrument(skip(self, frame, settings))]
    fn render(&self, frame: &mut Frame, settings: &Settings) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(5),
                Constraint::Min(3),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new("Settings")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let active = *settings.persistence();
        let items: Vec<ListItem> = self
            .modes
            .iter()
            .map(|mode| {
                let marker = if *mode == active { "(•)" } else { "( )" };
                ListItem::new(format!("{} {}", marker, mode.label()))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Scores"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut list_state = self.list_state;
        frame.render_stateful_widget(list, chunks[1], &mut list_state);

        let description = Paragraph::new(self.highlighted().description())
            .style(Style::default().fg(Color::Green))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(description, chunks[2]);

        let help = Paragraph::new("↑↓: Navigate | Enter: Choose | Esc: Back")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);
    }

    #[instrument(skip(self, key, settings))]
    fn handle_key(&mut self, key: KeyEvent, settings: &Settings) -> ScreenTransition {
        match key.code {
            KeyCode::Up => {
                self.move_selection(false);
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                self.move_selection(true);
                ScreenTransition::Stay
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let mode = self.highlighted();
                if mode == *settings.persistence() {
                    return ScreenTransition::Stay;
                }
                info!(mode = %mode, "Persistence mode chosen");
                ScreenTransition::SetPersistence(mode)
            }
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                info!("Leaving settings screen");
                ScreenTransition::GoToGameSelect
            }
            _ => ScreenTransition::Stay,
        }
    }
}
