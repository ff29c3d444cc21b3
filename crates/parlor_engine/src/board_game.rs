//! Board game engine for tic-tac-toe and connect four.

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    Board, BoardInput, BoardRules, Cell, CellPosition, Dimensions, GameEngine, GameEvent, GameKind,
    InputError, MoveError, Outcome, PersistenceMode, PlacementRule, Player, ScoreKeeper,
    ScoreRecord, TurnController, TurnError, WinningLine,
};

/// Everything a renderer needs to redraw a board game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    /// Which game this is.
    pub kind: GameKind,
    /// Board size.
    pub dimensions: Dimensions,
    /// Cells in row-major order.
    pub cells: Vec<Cell>,
    /// Player to move, `None` once finished.
    pub current_player: Option<Player>,
    /// Turn or outcome message.
    pub message: String,
    /// Outcome once finished.
    pub outcome: Option<Outcome>,
    /// Running score.
    pub scores: ScoreRecord,
    /// Cells to highlight after a win.
    pub winning_cells: Vec<CellPosition>,
    /// Why the last input was refused, if it was.
    pub rejection: Option<InputError>,
    /// Set only on the input that ended the game.
    pub event: Option<GameEvent>,
}

impl BoardSnapshot {
    /// Returns the cell at `pos`.
    pub fn cell(&self, pos: CellPosition) -> Option<Cell> {
        self.dimensions
            .contains(pos)
            .then(|| self.cells[pos.row * self.dimensions.cols + pos.col])
    }

    /// Returns true while moves are accepted.
    pub fn is_running(&self) -> bool {
        self.outcome.is_none()
    }
}

/// A running tic-tac-toe or connect four session.
///
/// Owns the board, the turn state and the score keeper. A finished game
/// accepts nothing but [`restart`](Self::restart), which builds a fresh board.
#[derive(Debug, Clone)]
pub struct BoardGame {
    kind: GameKind,
    rules: BoardRules,
    board: Board,
    turns: TurnController,
    scores: ScoreKeeper,
    winning_line: Option<WinningLine>,
    message: String,
}

impl BoardGame {
    /// Starts a tic-tac-toe game.
    pub fn tic_tac_toe(scores: ScoreKeeper) -> Self {
        Self::new(GameKind::TicTacToe, BoardRules::TIC_TAC_TOE, scores)
    }

    /// Starts a connect four game.
    pub fn connect_four(scores: ScoreKeeper) -> Self {
        Self::new(GameKind::ConnectFour, BoardRules::CONNECT_FOUR, scores)
    }

    /// Starts a game of `kind`, or `None` if `kind` is not a board game.
    pub fn for_kind(kind: GameKind, scores: ScoreKeeper) -> Option<Self> {
        kind.board_rules().map(|rules| Self::new(kind, rules, scores))
    }

    /// Starts a game with explicit rules.
    #[instrument(skip(scores))]
    pub fn new(kind: GameKind, rules: BoardRules, scores: ScoreKeeper) -> Self {
        let mut game = Self {
            kind,
            rules,
            board: Board::new(rules.dimensions),
            turns: TurnController::new(),
            scores,
            winning_line: None,
            message: String::new(),
        };
        game.begin_game();
        game
    }

    /// Returns which game this is.
    pub fn kind(&self) -> GameKind {
        self.kind
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move, `None` once finished.
    pub fn current_player(&self) -> Option<Player> {
        self.turns.current_player()
    }

    /// Returns true while moves are accepted.
    pub fn is_running(&self) -> bool {
        self.turns.is_running()
    }

    /// Returns the outcome once finished.
    pub fn outcome(&self) -> Option<Outcome> {
        self.turns.outcome()
    }

    /// Returns the current status message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the running score.
    pub fn scores(&self) -> ScoreRecord {
        self.scores.record()
    }

    /// Switches the persistence policy for future game starts and ends.
    pub fn set_persistence_mode(&mut self, mode: PersistenceMode) {
        self.scores.set_mode(mode);
    }

    /// Returns the line that won the game, if any.
    pub fn winning_line(&self) -> Option<&WinningLine> {
        self.winning_line.as_ref()
    }

    /// Clears the board and gives player one the move, whatever the current
    /// state. Scores carry over and the persistence policy runs again.
    #[instrument(skip(self), fields(game = %self.kind))]
    pub fn begin_game(&mut self) {
        self.board = Board::new(self.rules.dimensions);
        self.turns = TurnController::new();
        self.winning_line = None;
        self.scores.on_game_start();
        self.message = self.turn_message(Player::One);
        info!(game = %self.kind, scores = ?self.scores.record(), "Game started");
    }

    /// Starts a new game once the current one has finished.
    ///
    /// # Errors
    ///
    /// Returns [`TurnError::GameInProgress`] while the game is running; nothing
    /// changes in that case.
    #[instrument(skip(self), fields(game = %self.kind))]
    pub fn restart(&mut self) -> Result<(), TurnError> {
        if self.turns.is_running() {
            debug!("Restart ignored while game is running");
            return Err(TurnError::GameInProgress);
        }
        self.begin_game();
        Ok(())
    }

    /// Places the current player's mark at `pos`.
    ///
    /// On success returns the outcome if the move ended the game. A refused
    /// move leaves the board untouched and appends a notice to the turn
    /// message.
    ///
    /// # Errors
    ///
    /// Returns the [`MoveError`] explaining why the cell is not playable.
    #[instrument(skip(self), fields(game = %self.kind))]
    pub fn place(&mut self, pos: CellPosition) -> Result<Option<Outcome>, MoveError> {
        let Some(player) = self.turns.current_player() else {
            return Err(MoveError::GameOver);
        };

        if let Err(e) = self.rules.placement.validate(&self.board, pos) {
            debug!(error = %e, "Move rejected");
            self.flag_rejection();
            return Err(e);
        }
        self.board.place(pos, player)?;
        debug!(player = %player, %pos, "Mark placed");

        if let Some(line) = self.rules.detector().find_line(&self.board, player) {
            self.scores.credit(player);
            self.winning_line = Some(line);
            self.finish(Outcome::Win(player))?;
            return Ok(Some(Outcome::Win(player)));
        }

        if self.board.is_full() {
            self.finish(Outcome::Tie)?;
            return Ok(Some(Outcome::Tie));
        }

        let next = self.turns.advance().map_err(|_| MoveError::GameOver)?;
        self.message = self.turn_message(next);
        Ok(None)
    }

    /// Drops the current player's disk into `col`.
    ///
    /// Resolves the landing cell of the column and submits it through
    /// [`place`](Self::place), so the same landing rule applies.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::ColumnFull`] for a full column,
    /// [`MoveError::OutOfBounds`] for a column off the board, or any error
    /// from [`place`](Self::place).
    #[instrument(skip(self), fields(game = %self.kind))]
    pub fn drop_in_column(&mut self, col: usize) -> Result<Option<Outcome>, MoveError> {
        if !self.turns.is_running() {
            return Err(MoveError::GameOver);
        }
        if col >= self.rules.dimensions.cols {
            self.flag_rejection();
            return Err(MoveError::OutOfBounds(CellPosition::new(0, col)));
        }
        match self.board.landing_row(col) {
            Some(row) => self.place(CellPosition::new(row, col)),
            None => {
                debug!(col, "Column full");
                self.flag_rejection();
                Err(MoveError::ColumnFull(col))
            }
        }
    }

    fn finish(&mut self, outcome: Outcome) -> Result<(), MoveError> {
        self.turns
            .finish(outcome)
            .map_err(|_| MoveError::GameOver)?;
        self.message = self.outcome_message(outcome);
        self.scores.on_game_end();
        info!(game = %self.kind, ?outcome, scores = ?self.scores.record(), "Game over");
        Ok(())
    }

    fn player_name(&self, player: Player) -> String {
        match self.kind {
            GameKind::TicTacToe => format!("{} - {}", player.mark(), player),
            _ => player.to_string(),
        }
    }

    fn turn_message(&self, player: Player) -> String {
        format!("{}'s turn", self.player_name(player))
    }

    fn outcome_message(&self, outcome: Outcome) -> String {
        match outcome {
            Outcome::Win(player) => format!("{} won!", self.player_name(player)),
            Outcome::Tie => "It's a tie!".to_string(),
        }
    }

    /// Appends the refusal notice to the turn message, once.
    fn flag_rejection(&mut self) {
        let notice = match self.rules.placement {
            PlacementRule::Free => " - Cannot go there",
            PlacementRule::Gravity => " - Cannot place disk there",
        };
        if !self.message.contains(notice) {
            self.message.push_str(notice);
        }
    }
}

impl GameEngine for BoardGame {
    type Input = BoardInput;
    type Snapshot = BoardSnapshot;

    fn apply(&mut self, input: BoardInput) -> BoardSnapshot {
        let result: Result<Option<Outcome>, InputError> = match input {
            BoardInput::Cell(pos) => self.place(pos).map_err(InputError::from),
            BoardInput::Column(col) => self.drop_in_column(col).map_err(InputError::from),
            BoardInput::Restart => self.restart().map(|()| None).map_err(InputError::from),
        };

        let mut snapshot = self.snapshot();
        match result {
            Ok(outcome) => {
                snapshot.event = outcome.map(|outcome| match outcome {
                    Outcome::Win(player) => GameEvent::Won(player),
                    Outcome::Tie => GameEvent::Tie,
                });
            }
            Err(e) => snapshot.rejection = Some(e),
        }
        snapshot
    }

    fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            kind: self.kind,
            dimensions: self.rules.dimensions,
            cells: self.board.cells().to_vec(),
            current_player: self.turns.current_player(),
            message: self.message.clone(),
            outcome: self.turns.outcome(),
            scores: self.scores.record(),
            winning_cells: self
                .winning_line
                .as_ref()
                .map(|line| line.cells().to_vec())
                .unwrap_or_default(),
            rejection: None,
            event: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ttt() -> BoardGame {
        BoardGame::tic_tac_toe(ScoreKeeper::in_memory(GameKind::TicTacToe))
    }

    fn c4() -> BoardGame {
        BoardGame::connect_four(ScoreKeeper::in_memory(GameKind::ConnectFour))
    }

    #[test]
    fn test_new_game_is_reset() {
        for game in [ttt(), c4()] {
            assert!(game.board().is_clear());
            assert!(game.is_running());
            assert_eq!(game.current_player(), Some(Player::One));
        }
    }

    #[test]
    fn test_ttt_messages() {
        let mut game = ttt();
        assert_eq!(game.message(), "X - Player 1's turn");
        game.place(CellPosition::new(0, 0)).unwrap();
        assert_eq!(game.message(), "O - Player 2's turn");
    }

    #[test]
    fn test_ttt_occupied_cell_rejected_once() {
        let mut game = ttt();
        game.place(CellPosition::new(0, 0)).unwrap();
        let before = game.board().clone();

        assert!(game.place(CellPosition::new(0, 0)).is_err());
        assert!(game.place(CellPosition::new(0, 0)).is_err());

        assert_eq!(game.board(), &before);
        assert_eq!(game.current_player(), Some(Player::Two));
        assert_eq!(game.message(), "O - Player 2's turn - Cannot go there");

        game.place(CellPosition::new(1, 1)).unwrap();
        assert_eq!(game.message(), "X - Player 1's turn");
    }

    #[test]
    fn test_c4_messages_and_gravity() {
        let mut game = c4();
        assert_eq!(game.message(), "Player 1's turn");
        assert_eq!(
            game.place(CellPosition::new(0, 0)),
            Err(MoveError::NotLandingCell(CellPosition::new(0, 0)))
        );
        assert_eq!(game.message(), "Player 1's turn - Cannot place disk there");
        assert!(game.board().is_clear());

        game.place(CellPosition::new(5, 0)).unwrap();
        assert_eq!(game.message(), "Player 2's turn");
        game.place(CellPosition::new(4, 0)).unwrap();
    }

    #[test]
    fn test_c4_drop_in_column() {
        let mut game = c4();
        game.drop_in_column(3).unwrap();
        game.drop_in_column(3).unwrap();
        assert_eq!(
            game.board().get(CellPosition::new(5, 3)),
            Some(Cell::Occupied(Player::One))
        );
        assert_eq!(
            game.board().get(CellPosition::new(4, 3)),
            Some(Cell::Occupied(Player::Two))
        );
        assert_eq!(
            game.drop_in_column(9),
            Err(MoveError::OutOfBounds(CellPosition::new(0, 9)))
        );
    }

    #[test]
    fn test_c4_vertical_win_credits_player() {
        let mut game = c4();
        for _ in 0..3 {
            game.drop_in_column(0).unwrap();
            game.drop_in_column(1).unwrap();
        }
        let outcome = game.drop_in_column(0).unwrap();
        assert_eq!(outcome, Some(Outcome::Win(Player::One)));
        assert_eq!(game.message(), "Player 1 won!");
        assert_eq!(game.scores(), ScoreRecord::new(1, 0));
        assert_eq!(game.winning_line().unwrap().cells().len(), 4);
        assert_eq!(game.drop_in_column(2), Err(MoveError::GameOver));
    }

    #[test]
    fn test_restart_rejected_while_running() {
        let mut game = ttt();
        game.place(CellPosition::new(0, 0)).unwrap();
        assert_eq!(game.restart(), Err(TurnError::GameInProgress));
        assert!(!game.board().is_clear());
    }

    #[test]
    fn test_scores_survive_restart() {
        let mut game = ttt();
        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            game.place(CellPosition::new(row, col)).unwrap();
        }
        assert_eq!(game.outcome(), Some(Outcome::Win(Player::One)));
        game.restart().unwrap();
        assert!(game.board().is_clear());
        assert!(game.winning_line().is_none());
        assert_eq!(game.scores(), ScoreRecord::new(1, 0));
    }

    #[test]
    fn test_apply_reports_event_once() {
        let mut game = ttt();
        let mut last = game.snapshot();
        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            last = game.apply(BoardInput::Cell(CellPosition::new(row, col)));
        }
        assert_eq!(last.event, Some(GameEvent::Won(Player::One)));
        assert_eq!(last.winning_cells.len(), 3);

        let after = game.apply(BoardInput::Cell(CellPosition::new(2, 2)));
        assert_eq!(after.event, None);
        assert_eq!(after.rejection, Some(InputError::Move(MoveError::GameOver)));
    }
}
