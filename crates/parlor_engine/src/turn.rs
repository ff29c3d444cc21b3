//! Turn sequencing for two-player games.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::Player;

/// How a finished board game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// A player completed a line.
    Win(Player),
    /// The board filled up without a line.
    Tie,
}

/// Turn state of a board game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    /// Waiting for the given player to move.
    Turn(Player),
    /// No more moves until restart.
    Finished(Outcome),
}

/// Errors from illegal turn transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum TurnError {
    /// Restart was requested while the game is still being played.
    #[display("Game is still in progress")]
    GameInProgress,
    /// A move or finish was requested after the game ended.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for TurnError {}

/// State machine alternating the active player.
///
/// `Turn(One) -> Turn(Two) -> Turn(One) -> ...` until [`finish`](Self::finish)
/// moves it to `Finished`. Only a finished game accepts
/// [`restart`](Self::restart).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnController {
    state: TurnState,
}

impl TurnController {
    /// Creates a controller waiting on player one.
    pub fn new() -> Self {
        Self {
            state: TurnState::Turn(Player::One),
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Returns the player to move, or `None` once finished.
    pub fn current_player(&self) -> Option<Player> {
        match self.state {
            TurnState::Turn(player) => Some(player),
            TurnState::Finished(_) => None,
        }
    }

    /// Returns the outcome once finished.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            TurnState::Turn(_) => None,
            TurnState::Finished(outcome) => Some(outcome),
        }
    }

    /// Returns true while moves are accepted.
    pub fn is_running(&self) -> bool {
        matches!(self.state, TurnState::Turn(_))
    }

    /// Hands the turn to the other player.
    #[instrument(skip(self))]
    pub fn advance(&mut self) -> Result<Player, TurnError> {
        match self.state {
            TurnState::Turn(player) => {
                let next = player.opponent();
                self.state = TurnState::Turn(next);
                debug!(next = %next, "Turn passed");
                Ok(next)
            }
            TurnState::Finished(_) => Err(TurnError::GameOver),
        }
    }

    /// Ends the game with `outcome`.
    #[instrument(skip(self))]
    pub fn finish(&mut self, outcome: Outcome) -> Result<(), TurnError> {
        match self.state {
            TurnState::Turn(_) => {
                self.state = TurnState::Finished(outcome);
                debug!(?outcome, "Game finished");
                Ok(())
            }
            TurnState::Finished(_) => Err(TurnError::GameOver),
        }
    }

    /// Returns to player one's turn after a finished game.
    #[instrument(skip(self))]
    pub fn restart(&mut self) -> Result<(), TurnError> {
        match self.state {
            TurnState::Turn(_) => Err(TurnError::GameInProgress),
            TurnState::Finished(_) => {
                self.state = TurnState::Turn(Player::One);
                Ok(())
            }
        }
    }
}

impl Default for TurnController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternates_players() {
        let mut turns = TurnController::new();
        assert_eq!(turns.current_player(), Some(Player::One));
        assert_eq!(turns.advance(), Ok(Player::Two));
        assert_eq!(turns.advance(), Ok(Player::One));
    }

    #[test]
    fn test_finish_freezes() {
        let mut turns = TurnController::new();
        turns.finish(Outcome::Win(Player::One)).unwrap();
        assert!(!turns.is_running());
        assert_eq!(turns.outcome(), Some(Outcome::Win(Player::One)));
        assert_eq!(turns.advance(), Err(TurnError::GameOver));
        assert_eq!(turns.finish(Outcome::Tie), Err(TurnError::GameOver));
    }

    #[test]
    fn test_restart_only_when_finished() {
        let mut turns = TurnController::new();
        turns.advance().unwrap();
        assert_eq!(turns.restart(), Err(TurnError::GameInProgress));
        assert_eq!(turns.current_player(), Some(Player::Two));

        turns.finish(Outcome::Tie).unwrap();
        turns.restart().unwrap();
        assert_eq!(turns.state(), TurnState::Turn(Player::One));
    }
}
