//! Contract-based validation for Pots of Gold.
//!
//! Preconditions are checked before a session is touched; postconditions are
//! checked against the candidate state in debug builds before it replaces the
//! committed one.

use super::action::{GameError, Move};
use super::invariants::{InvariantSet, PotsInvariants};
use super::session::GameSession;
use super::types::Phase;
use tracing::instrument;

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions of a state transition.
pub trait Contract<S, A: ?Sized> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), GameError>;

    /// Checks postconditions on the state produced by the action.
    fn post(before: &S, after: &S) -> Result<(), GameError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game must be in progress.
pub struct GameIsInProgress;

impl GameIsInProgress {
    /// Rejects moves outside the `InProgress` phase.
    pub fn check(session: &GameSession) -> Result<(), GameError> {
        if session.phase() != Phase::InProgress {
            Err(GameError::GameNotInProgress(session.phase()))
        } else {
            Ok(())
        }
    }
}

/// Precondition: it must be the claimant's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Rejects a claimant who is not the turn owner.
    pub fn check(mov: &Move, session: &GameSession) -> Result<(), GameError> {
        if mov.claimant != session.turn_owner() {
            Err(GameError::OutOfTurn(mov.claimant))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the index must be a frontier bound.
pub struct OnFrontier;

impl OnFrontier {
    /// Rejects indices that are not `low` or `high`.
    pub fn check(mov: &Move, session: &GameSession) -> Result<(), GameError> {
        match session.frontier() {
            Some(frontier) if frontier.is_bound(mov.index) => Ok(()),
            frontier => Err(GameError::IllegalMove {
                index: mov.index,
                frontier,
            }),
        }
    }
}

/// Composite precondition, checked in order: phase, turn, frontier.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(session))]
    pub fn check(mov: &Move, session: &GameSession) -> Result<(), GameError> {
        GameIsInProgress::check(session)?;
        PlayersTurn::check(mov, session)?;
        OnFrontier::check(mov, session)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for claiming a pot.
///
/// Postconditions: every invariant in [`PotsInvariants`] holds and exactly one
/// more move is recorded.
pub struct MoveContract;

impl Contract<GameSession, Move> for MoveContract {
    fn pre(session: &GameSession, action: &Move) -> Result<(), GameError> {
        LegalMove::check(action, session)
    }

    fn post(before: &GameSession, after: &GameSession) -> Result<(), GameError> {
        if after.history().len() != before.history().len() + 1 {
            return Err(GameError::InvariantViolation(
                "Postcondition failed: exactly one pot is claimed per move".to_string(),
            ));
        }

        PotsInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            GameError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

// ─────────────────────────────────────────────────────────────
//  Start Contract
// ─────────────────────────────────────────────────────────────

/// Contract for starting a game from a row of pot values.
pub struct StartContract;

impl Contract<GameSession, [u32]> for StartContract {
    fn pre(session: &GameSession, pots: &[u32]) -> Result<(), GameError> {
        if session.phase() == Phase::InProgress {
            return Err(GameError::GameAlreadyInProgress);
        }
        if pots.is_empty() {
            return Err(GameError::InvalidConfiguration(
                "a game needs at least one pot".to_string(),
            ));
        }
        Ok(())
    }

    fn post(_before: &GameSession, after: &GameSession) -> Result<(), GameError> {
        PotsInvariants::check_all(after).map_err(|violations| {
            GameError::InvariantViolation(format!(
                "{} invariant(s) broken at start",
                violations.len()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::pots::types::{Claimant, PotStatus};

    fn started() -> GameSession {
        let mut session = GameSession::new();
        session.start_game(vec![3, 9, 1, 2, 7, 4], Claimant::User).unwrap();
        session
    }

    #[test]
    fn test_precondition_frontier_bound() {
        let session = started();
        assert!(MoveContract::pre(&session, &Move::new(Claimant::User, 0)).is_ok());
        assert!(MoveContract::pre(&session, &Move::new(Claimant::User, 5)).is_ok());
        assert!(matches!(
            MoveContract::pre(&session, &Move::new(Claimant::User, 3)),
            Err(GameError::IllegalMove { index: 3, .. })
        ));
    }

    #[test]
    fn test_precondition_wrong_turn() {
        let session = started();
        assert!(matches!(
            MoveContract::pre(&session, &Move::new(Claimant::Computer, 0)),
            Err(GameError::OutOfTurn(Claimant::Computer))
        ));
    }

    #[test]
    fn test_phase_checked_before_turn() {
        let session = GameSession::new();
        assert!(matches!(
            MoveContract::pre(&session, &Move::new(Claimant::Computer, 7)),
            Err(GameError::GameNotInProgress(Phase::Init))
        ));
    }

    #[test]
    fn test_start_precondition() {
        let session = GameSession::new();
        assert!(StartContract::pre(&session, &[1, 2][..]).is_ok());
        assert!(matches!(
            StartContract::pre(&session, &[][..]),
            Err(GameError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            StartContract::pre(&started(), &[1, 2][..]),
            Err(GameError::GameAlreadyInProgress)
        ));
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let before = started();
        let mut after = before.clone();
        after.apply_move(0, Claimant::User).unwrap();
        assert!(MoveContract::post(&before, &after).is_ok());
        assert!(StartContract::post(&GameSession::new(), &before).is_ok());
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let before = started();
        let mut after = before.clone();
        after.apply_move(0, Claimant::User).unwrap();

        // Open an interior pot without claiming its neighbour.
        after.statuses[3] = PotStatus::Edge;
        assert!(MoveContract::post(&before, &after).is_err());
    }
}
