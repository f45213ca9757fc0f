//! Settlement invariant: claimed pots lie outside the frontier, unclaimed ones inside.

use super::super::{GameSession, Phase};
use super::Invariant;

/// Invariant: every pot outside `[low, high]` is claimed and every pot inside is not.
///
/// Once the frontier is gone the game must be over with every pot claimed.
pub struct SettledOutsideFrontierInvariant;

impl Invariant<GameSession> for SettledOutsideFrontierInvariant {
    fn holds(session: &GameSession) -> bool {
        let statuses = session.statuses();
        if statuses.len() != session.pots().len() {
            return false;
        }

        match (session.phase(), session.frontier()) {
            (Phase::Init, None) => statuses.is_empty(),
            (Phase::Done, None) => statuses.iter().all(|status| status.is_claimed()),
            (Phase::InProgress, Some(frontier)) => {
                frontier.high < statuses.len()
                    && statuses
                        .iter()
                        .enumerate()
                        .all(|(index, status)| status.is_claimed() != frontier.contains(index))
            }
            _ => false,
        }
    }

    fn description() -> &'static str {
        "Pots outside the frontier are claimed, pots inside are not"
    }
}
