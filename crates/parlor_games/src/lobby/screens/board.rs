//! Board screen for tic-tac-toe and connect four.

use crossterm::event::{KeyCode, KeyEvent};
use parlor_engine::{
    BoardGame, BoardInput, BoardSnapshot, Cell, CellPosition, GameEngine, GameKind, Player,
};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tracing::{debug, info, instrument};

use crate::Settings;
use crate::lobby::screen::{Screen, ScreenTransition};

/// State for a running board game.
///
/// The cursor picks the cell a keyboard "click" lands on. Connect four also
/// accepts a column number, which drops into the lowest free cell.
#[derive(Debug)]
pub struct BoardScreen {
    game: BoardGame,
    snapshot: BoardSnapshot,
    cursor: CellPosition,
}

impl BoardScreen {
    /// Creates the screen for a freshly launched round.
    #[instrument(skip(game), fields(kind = %game.kind()))]
    pub fn new(game: BoardGame) -> Self {
        debug!("Initializing BoardScreen");
        let snapshot = game.snapshot();
        let dims = snapshot.dimensions;
        let cursor = match snapshot.kind {
            GameKind::ConnectFour => CellPosition::new(dims.rows - 1, dims.cols / 2),
            _ => CellPosition::new(dims.rows / 2, dims.cols / 2),
        };
        Self {
            game,
            snapshot,
            cursor,
        }
    }

    /// Returns the latest snapshot.
    pub fn snapshot(&self) -> &BoardSnapshot {
        &self.snapshot
    }

    /// Returns the cursor position.
    pub fn cursor(&self) -> CellPosition {
        self.cursor
    }

    /// Hands the engine back when leaving the screen.
    pub fn into_game(self) -> BoardGame {
        self.game
    }

    fn submit(&mut self, input: BoardInput) {
        self.snapshot = self.game.apply(input);
        if let Some(event) = self.snapshot.event {
            info!(?event, scores = ?self.snapshot.scores, "Round over");
        }
    }

    fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let dims = self.snapshot.dimensions;
        let CellPosition { row, col } = self.cursor;
        let row = row.saturating_add_signed(d_row).min(dims.rows - 1);
        let col = col.saturating_add_signed(d_col).min(dims.cols - 1);
        self.cursor = CellPosition::new(row, col);
    }

    /// Maps a digit key to an input for this game.
    fn digit_input(&self, digit: u32) -> Option<BoardInput> {
        let idx = usize::try_from(digit.checked_sub(1)?).ok()?;
        let dims = self.snapshot.dimensions;
        match self.snapshot.kind {
            GameKind::ConnectFour => Some(BoardInput::Column(idx)),
            _ if idx < dims.area() => Some(BoardInput::Cell(CellPosition::new(
                idx / dims.cols,
                idx % dims.cols,
            ))),
            _ => None,
        }
    }

    fn piece_style(&self, player: Player) -> Style {
        let color = match (self.snapshot.kind, player) {
            (GameKind::ConnectFour, Player::One) => Color::Red,
            (GameKind::ConnectFour, Player::Two) => Color::Blue,
            (_, Player::One) => Color::Cyan,
            (_, Player::Two) => Color::Magenta,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    fn cell_span(&self, pos: CellPosition) -> Span<'static> {
        let cell = self.snapshot.cell(pos).unwrap_or_default();
        let (glyph, mut style) = match (self.snapshot.kind, cell) {
            (GameKind::ConnectFour, Cell::Empty) => ("·".to_string(), Style::default()),
            (GameKind::ConnectFour, Cell::Occupied(p)) => ("●".to_string(), self.piece_style(p)),
            (_, Cell::Empty) => (" ".to_string(), Style::default()),
            (_, Cell::Occupied(p)) => (p.mark().to_string(), self.piece_style(p)),
        };
        if self.snapshot.winning_cells.contains(&pos) {
            style = style.bg(Color::Green);
        }
        if pos == self.cursor && self.snapshot.is_running() {
            style = style.add_modifier(Modifier::REVERSED);
        }
        Span::styled(format!(" {} ", glyph), style)
    }

    fn board_lines(&self) -> Vec<Line<'static>> {
        let dims = self.snapshot.dimensions;
        let mut lines = Vec::new();
        if self.snapshot.kind == GameKind::ConnectFour {
            let header: String = (1..=dims.cols).map(|c| format!(" {} ", c)).collect();
            lines.push(Line::from(Span::styled(
                header,
                Style::default().fg(Color::DarkGray),
            )));
        }

        let grid = self.snapshot.kind != GameKind::ConnectFour;
        for row in 0..dims.rows {
            let mut spans = Vec::new();
            for col in 0..dims.cols {
                if grid && col > 0 {
                    spans.push(Span::raw("│"));
                }
                spans.push(self.cell_span(CellPosition::new(row, col)));
            }
            lines.push(Line::from(spans));
            if grid && row + 1 < dims.rows {
                let rule = vec!["───"; dims.cols].join("┼");
                lines.push(Line::from(rule));
            }
        }
        lines
    }
}

impl Screen for BoardScreen {
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
            ])
            .split(area);

        let kind = self.snapshot.kind;
        let title = Paragraph::new(kind.label())
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let (first, second) = kind.score_labels();
        let scores = Line::from(vec![
            Span::styled(
                format!("{}: {}", first, self.snapshot.scores.first),
                self.piece_style(Player::One),
            ),
            Span::raw("   "),
            Span::styled(
                format!("{}: {}", second, self.snapshot.scores.second),
                self.piece_style(Player::Two),
            ),
        ]);
        let score_bar = Paragraph::new(scores)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Score"));
        frame.render_widget(score_bar, chunks[1]);

        let board = Paragraph::new(self.board_lines())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(board, chunks[2]);

        let status_color = if self.snapshot.is_running() {
            Color::White
        } else {
            Color::Yellow
        };
        let mut status = self.snapshot.message.clone();
        if !self.snapshot.is_running() {
            status.push_str(" Press ENTER to play again");
        }
        let message = Paragraph::new(status)
            .style(Style::default().fg(status_color))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(message, chunks[3]);

        let help_text = match kind {
            GameKind::ConnectFour => {
                "←→↑↓: Move | Enter: Place | 1-7: Drop | r: Restart | Esc: Back | q: Quit"
            }
            _ => "←→↑↓: Move | Enter: Place | 1-9: Cell | r: Restart | Esc: Back | q: Quit",
        };
        let help = Paragraph::new(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[4]);
    }

    #[instrument(skip(self, key, _settings))]
    fn handle_key(&mut self, key: KeyEvent, _settings: &Settings) -> ScreenTransition {
        match key.code {
            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.snapshot.is_running() {
                    self.submit(BoardInput::Cell(self.cursor));
                } else {
                    self.submit(BoardInput::Restart);
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.submit(BoardInput::Restart),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(input) = c.to_digit(10).and_then(|d| self.digit_input(d)) {
                    self.submit(input);
                }
            }
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('B') => {
                info!("Returning to game selection");
                return ScreenTransition::GoToGameSelect;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => return ScreenTransition::Quit,
            _ => {}
        }
        ScreenTransition::Stay
    }
}
