//! First-class move and error types for Pots of Gold.
//!
//! A move is a claimant naming an absolute pot index. Moves are validated
//! against the session before anything is mutated.

use super::types::{Claimant, Frontier, Phase};
use serde::{Deserialize, Serialize};

/// A player claiming the pot at an absolute index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub claimant: Claimant,
    /// Absolute index into the pot row.
    pub index: usize,
}

impl Move {
    /// Creates a new move.
    pub fn new(claimant: Claimant, index: usize) -> Self {
        Self { claimant, index }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> pot {}", self.claimant, self.index)
    }
}

/// Error raised by a session or arbiter operation.
///
/// Every variant leaves the session exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// Start parameters were malformed (e.g. no pots).
    #[display("Invalid configuration: {}", _0)]
    InvalidConfiguration(String),

    /// A game is already running; reset it or finish it first.
    #[display("A game is already in progress")]
    GameAlreadyInProgress,

    /// The index is not one of the current frontier bounds.
    #[display("Pot {} is not selectable (frontier {:?})", index, frontier)]
    IllegalMove {
        /// The rejected index.
        index: usize,
        /// The frontier at the time of the attempt.
        frontier: Option<Frontier>,
    },

    /// The claimant is not the player to move.
    #[display("It is not {}'s turn", _0)]
    OutOfTurn(Claimant),

    /// Moves are only accepted while a game is in progress.
    #[display("No game in progress (phase {:?})", _0)]
    GameNotInProgress(Phase),

    /// The move was planned against a session state that no longer exists.
    #[display("Stale move: {}", _0)]
    StaleMove(String),

    /// The move-computation service failed or answered nonsense.
    #[display("Move service unavailable: {}", _0)]
    MoveServiceUnavailable(String),

    /// A postcondition failed after a move (debug builds only).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for GameError {}

impl GameError {
    /// Returns true if the same request may succeed when reissued.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GameError::MoveServiceUnavailable(_))
    }
}
