//! Edge invariant: the selectable pots are exactly the frontier bounds.

use super::super::{GameSession, PotStatus};
use super::Invariant;

/// Invariant: a pot is `Edge` iff it is a bound of the current frontier.
///
/// Two edges while two or more pots remain, one edge for the last pot, none
/// once the game is over.
pub struct EdgesMatchFrontierInvariant;

impl Invariant<GameSession> for EdgesMatchFrontierInvariant {
    fn holds(session: &GameSession) -> bool {
        let edges: Vec<usize> = session
            .statuses()
            .iter()
            .enumerate()
            .filter(|(_, status)| **status == PotStatus::Edge)
            .map(|(index, _)| index)
            .collect();

        match session.frontier() {
            None => edges.is_empty(),
            Some(frontier) if frontier.is_single() => edges == [frontier.low],
            Some(frontier) => edges == [frontier.low, frontier.high],
        }
    }

    fn description() -> &'static str {
        "Edge pots are exactly the frontier bounds"
    }
}
