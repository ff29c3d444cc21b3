//! Game selection screen: the hub the application starts on.

use crossterm::event::{KeyCode, KeyEvent};
use parlor_engine::GameKind;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

use crate::Settings;
use crate::lobby::screen::{Screen, ScreenTransition};

/// Menu options on the selection screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuOption {
    Play(GameKind),
    Scores,
    Settings,
    Quit,
}

impl MenuOption {
    fn label(self) -> &'static str {
        match self {
            Self::Play(kind) => kind.label(),
            Self::Scores => "Scores",
            Self::Settings => "Settings",
            Self::Quit => "Quit",
        }
    }

    fn all() -> Vec<MenuOption> {
        GameKind::iter()
            .map(Self::Play)
            .chain([Self::Scores, Self::Settings, Self::Quit])
            .collect()
    }
}

/// State for the game selection screen.
#[derive(Debug)]
pub struct GameSelectScreen {
    options: Vec<MenuOption>,
    list_state: ListState,
}

impl Default for GameSelectScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSelectScreen {
    /// Creates the screen with the first game selected.
    #[instrument]
    pub fn new() -> Self {
        debug!("Initializing GameSelectScreen");
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            options: MenuOption::all(),
            list_state,
        }
    }

    fn select_previous(&mut self) {
        let count = self.options.len();
        let i = match self.list_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => count - 1,
        };
        self.list_state.select(Some(i));
    }

    fn select_next(&mut self) {
        let count = self.options.len();
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn selected_option(&self) -> MenuOption {
        let idx = self.list_state.selected().unwrap_or(0);
        self.options[idx.min(self.options.len() - 1)]
    }

    fn transition_for(option: MenuOption) -> ScreenTransition {
        match option {
            MenuOption::Play(kind) => ScreenTransition::Launch(kind),
            MenuOption::Scores => ScreenTransition::GoToScores,
            MenuOption::Settings => ScreenTransition::GoToSettings,
            MenuOption::Quit => ScreenTransition::Quit,
        }
    }
}

impl Screen for GameSelectScreen {
    #[instrument(skip(self, frame, settings))]
    fn render(&self, frame: &mut Frame, settings: &Settings) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new("Select a Mini-Game")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let items: Vec<ListItem> = self
            .options
            .iter()
            .map(|opt| ListItem::new(opt.label()))
            .collect();

        let menu = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Games"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut list_state = self.list_state;
        frame.render_stateful_widget(menu, chunks[1], &mut list_state);

        let mode = Paragraph::new(format!("Scores: {}", settings.persistence().label()))
            .style(Style::default().fg(Color::Green))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(mode, chunks[2]);

        let help = Paragraph::new(
            "↑↓: Navigate | Enter: Select | 1-3: Play | s: Settings | q: Quit",
        )
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);
    }

    #[instrument(skip(self, key, _settings))]
    fn handle_key(&mut self, key: KeyEvent, _settings: &Settings) -> ScreenTransition {
        match key.code {
            KeyCode::Up => {
                self.select_previous();
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                self.select_next();
                ScreenTransition::Stay
            }
            KeyCode::Enter => {
                let option = self.selected_option();
                info!(option = ?option, "Menu option selected");
                Self::transition_for(option)
            }
            KeyCode::Char(c @ '1'..='3') => {
                let idx = c as usize - '1' as usize;
                match self.options.get(idx) {
                    Some(&option) => Self::transition_for(option),
                    None => ScreenTransition::Stay,
                }
            }
            KeyCode::Char('s') | KeyCode::Char('S') => ScreenTransition::GoToSettings,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
