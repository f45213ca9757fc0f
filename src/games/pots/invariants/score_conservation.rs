//! Score conservation: each score is the sum of the pots its player owns.

use super::super::{Claimant, GameSession};
use super::Invariant;

/// Invariant: scores equal the values of the pots claimed by each player, and
/// every recorded move points at a pot owned by its claimant.
pub struct ScoreConservationInvariant;

impl ScoreConservationInvariant {
    fn owned_total(session: &GameSession, claimant: Claimant) -> u64 {
        session
            .statuses()
            .iter()
            .zip(session.pots())
            .filter(|(status, _)| status.owner() == Some(claimant))
            .map(|(_, value)| u64::from(*value))
            .sum()
    }
}

impl Invariant<GameSession> for ScoreConservationInvariant {
    fn holds(session: &GameSession) -> bool {
        let scores = session.scores();
        if scores.user != Self::owned_total(session, Claimant::User)
            || scores.computer != Self::owned_total(session, Claimant::Computer)
        {
            return false;
        }

        let claimed = session.statuses().iter().filter(|s| s.is_claimed()).count();
        claimed == session.history().len()
            && session.history().iter().all(|mov| {
                session
                    .statuses()
                    .get(mov.index)
                    .is_some_and(|status| status.owner() == Some(mov.claimant))
            })
    }

    fn description() -> &'static str {
        "Scores equal the sum of each player's claimed pots"
    }
}
