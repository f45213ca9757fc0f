//! First-class invariants for Pots of Gold.
//!
//! Invariants are properties of a session that hold in every reachable state.
//! They are checked after each transition in debug builds and can be tested
//! on their own.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together.
///
/// Implemented for tuples of [`Invariant`]s.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

// Implement InvariantSet for 4-tuples
impl<S, I1, I2, I3, I4> InvariantSet<S> for (I1, I2, I3, I4)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
    I4: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if !I4::holds(state) {
            violations.push(InvariantViolation::new(I4::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod alternating_turn;
pub mod edges_match_frontier;
pub mod score_conservation;
pub mod settled_outside_frontier;

pub use alternating_turn::AlternatingTurnInvariant;
pub use edges_match_frontier::EdgesMatchFrontierInvariant;
pub use score_conservation::ScoreConservationInvariant;
pub use settled_outside_frontier::SettledOutsideFrontierInvariant;

/// All Pots of Gold invariants as a composable set.
pub type PotsInvariants = (
    EdgesMatchFrontierInvariant,
    SettledOutsideFrontierInvariant,
    ScoreConservationInvariant,
    AlternatingTurnInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::pots::{Claimant, GameSession, PotStatus};

    fn play_out(pots: &[u32], picks: &[usize]) -> GameSession {
        let mut session = GameSession::new();
        session.start_game(pots.to_vec(), Claimant::User).unwrap();
        for &index in picks {
            let claimant = session.turn_owner();
            session.apply_move(index, claimant).unwrap();
        }
        session
    }

    #[test]
    fn test_invariant_set_holds_for_fresh_session() {
        assert!(PotsInvariants::check_all(&GameSession::new()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_through_a_game() {
        let pots = [3, 9, 1, 2, 7, 4];
        let picks = [5, 0, 1, 4, 3, 2];
        for played in 0..=picks.len() {
            let session = play_out(&pots, &picks[..played]);
            assert!(PotsInvariants::check_all(&session).is_ok(), "after {} moves", played);
        }
    }

    #[test]
    fn test_invariant_set_detects_violations() {
        let mut session = play_out(&[3, 9, 1, 2], &[0]);
        session.statuses[2] = PotStatus::ClaimedByUser;

        let violations = PotsInvariants::check_all(&session).unwrap_err();
        assert!(violations.len() >= 2);
    }
}
