//! Alternating turn invariant: players alternate, starting with the first-turn player.

use super::super::{GameSession, Phase};
use super::Invariant;

/// Invariant: move history alternates between the players, starting with the
/// configured first player, and the turn owner follows from it.
///
/// After the final move the turn owner stays with the last mover.
pub struct AlternatingTurnInvariant;

impl Invariant<GameSession> for AlternatingTurnInvariant {
    fn holds(session: &GameSession) -> bool {
        let history = session.history();
        let first = session.first_turn();

        let alternates = history.iter().enumerate().all(|(turn, mov)| {
            let expected = if turn % 2 == 0 { first } else { first.opponent() };
            mov.claimant == expected
        });
        if !alternates {
            return false;
        }

        match (session.phase(), history.last()) {
            (Phase::Done, Some(last)) => session.turn_owner() == last.claimant,
            (Phase::Done, None) => false,
            (_, Some(last)) => session.turn_owner() == last.claimant.opponent(),
            (_, None) => session.turn_owner() == first,
        }
    }

    fn description() -> &'static str {
        "Players alternate turns starting with the first-turn player"
    }
}
