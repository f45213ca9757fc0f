//! Authoritative state machine for one game of Pots of Gold.
//!
//! All mutation goes through [`GameSession::start_game`],
//! [`GameSession::apply_move`] and [`GameSession::reset`]. Each of them either
//! commits completely or leaves the session untouched.

use super::action::{GameError, Move};
use super::contracts::{Contract, MoveContract, StartContract};
use super::phases::Outcome;
use super::types::{Claimant, End, Frontier, Phase, PotStatus, Scores};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// State of a single game.
#[derive(Debug, Clone, Default)]
pub struct GameSession {
    pub(super) phase: Phase,
    pub(super) pots: Vec<u32>,
    pub(super) statuses: Vec<PotStatus>,
    pub(super) frontier: Option<Frontier>,
    pub(super) turn_owner: Claimant,
    pub(super) first_turn: Claimant,
    pub(super) scores: Scores,
    pub(super) history: Vec<Move>,
    pub(super) epoch: u64,
}

/// What a caller needs to render the session after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    /// The move that was applied.
    pub claimed: Move,
    /// Phase after the move.
    pub phase: Phase,
    /// Remaining frontier; `None` once every pot is claimed.
    pub frontier: Option<Frontier>,
    /// Player to move next (the last mover once the game is done).
    pub turn_owner: Claimant,
    /// Scores after the move.
    pub scores: Scores,
}

/// Read-only copy of the session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameSnapshot {
    phase: Phase,
    pot_values: Vec<u32>,
    pot_statuses: Vec<PotStatus>,
    frontier: Option<Frontier>,
    turn_owner: Claimant,
    scores: Scores,
    history: Vec<Move>,
    epoch: u64,
}

/// The session view a deferred move was planned against.
///
/// Obtained from [`GameSession::ticket`]; redeemed with
/// [`GameSession::apply_ticketed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct MoveTicket {
    epoch: u64,
    frontier: Frontier,
    turn_owner: Claimant,
}

impl GameSession {
    /// Creates a session in the `Init` phase.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new game with the given pot values.
    ///
    /// # Errors
    ///
    /// - `GameAlreadyInProgress` unless the phase is `Init` or `Done`.
    /// - `InvalidConfiguration` if `pot_values` is empty.
    #[instrument(skip(self), fields(pot_count = pot_values.len(), epoch = self.epoch))]
    pub fn start_game(
        &mut self,
        pot_values: Vec<u32>,
        first_turn: Claimant,
    ) -> Result<(), GameError> {
        StartContract::pre(self, pot_values.as_slice())?;

        let last = pot_values.len() - 1;
        let mut statuses = vec![PotStatus::Interior; pot_values.len()];
        statuses[0] = PotStatus::Edge;
        statuses[last] = PotStatus::Edge;

        let next = Self {
            phase: Phase::InProgress,
            pots: pot_values,
            statuses,
            frontier: Some(Frontier::new(0, last)),
            turn_owner: first_turn,
            first_turn,
            scores: Scores::default(),
            history: Vec::new(),
            epoch: self.epoch + 1,
        };

        #[cfg(debug_assertions)]
        StartContract::post(self, &next)?;

        *self = next;

        info!(epoch = self.epoch, first_turn = %first_turn, "Game started");
        Ok(())
    }

    /// Claims the pot at `index` for `claimant`.
    ///
    /// # Errors
    ///
    /// - `GameNotInProgress` if the phase is not `InProgress`.
    /// - `OutOfTurn` if `claimant` is not the player to move.
    /// - `IllegalMove` if `index` is not a frontier bound.
    #[instrument(skip(self), fields(epoch = self.epoch, frontier = ?self.frontier))]
    pub fn apply_move(
        &mut self,
        index: usize,
        claimant: Claimant,
    ) -> Result<MoveResult, GameError> {
        let action = Move::new(claimant, index);
        MoveContract::pre(self, &action)?;

        let frontier = self.frontier.ok_or(GameError::GameNotInProgress(self.phase))?;
        let end = frontier.end_of(index).ok_or(GameError::IllegalMove {
            index,
            frontier: self.frontier,
        })?;

        let mut next = self.clone();
        next.commit(action, frontier, end);

        #[cfg(debug_assertions)]
        MoveContract::post(self, &next)?;

        *self = next;

        debug!(
            claimed = %action,
            value = self.pots[index],
            phase = ?self.phase,
            frontier = ?self.frontier,
            "Move applied"
        );
        if self.phase == Phase::Done {
            info!(user = self.scores.user, computer = self.scores.computer, "Game finished");
        }

        Ok(self.result_of(action))
    }

    /// Records the current view so a move can be chosen without holding the session.
    ///
    /// # Errors
    ///
    /// Returns `GameNotInProgress` outside the `InProgress` phase.
    pub fn ticket(&self) -> Result<MoveTicket, GameError> {
        match (self.phase, self.frontier) {
            (Phase::InProgress, Some(frontier)) => Ok(MoveTicket {
                epoch: self.epoch,
                frontier,
                turn_owner: self.turn_owner,
            }),
            _ => Err(GameError::GameNotInProgress(self.phase)),
        }
    }

    /// Applies a move chosen against `ticket`, taking the given end of its frontier.
    ///
    /// # Errors
    ///
    /// Returns `StaleMove` if the session was reset, restarted or moved since the
    /// ticket was issued, otherwise anything [`GameSession::apply_move`] returns.
    #[instrument(skip(self), fields(epoch = self.epoch))]
    pub fn apply_ticketed(
        &mut self,
        ticket: &MoveTicket,
        end: End,
    ) -> Result<MoveResult, GameError> {
        if ticket.epoch != self.epoch {
            return Err(GameError::StaleMove(format!(
                "issued for game {}, session is on game {}",
                ticket.epoch, self.epoch
            )));
        }
        if self.phase != Phase::InProgress
            || self.frontier != Some(ticket.frontier)
            || self.turn_owner != ticket.turn_owner
        {
            return Err(GameError::StaleMove(format!(
                "planned at frontier {} for {}, session has moved on",
                ticket.frontier, ticket.turn_owner
            )));
        }

        self.apply_move(ticket.frontier.index_of(end), ticket.turn_owner)
    }

    /// Discards the current game and returns to `Init`.
    #[instrument(skip(self), fields(epoch = self.epoch))]
    pub fn reset(&mut self) {
        let epoch = self.epoch + 1;
        *self = Self {
            epoch,
            ..Self::default()
        };
        debug!(epoch, "Session reset");
    }

    /// Returns a snapshot of the full session state.
    pub fn state(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            pot_values: self.pots.clone(),
            pot_statuses: self.statuses.clone(),
            frontier: self.frontier,
            turn_owner: self.turn_owner,
            scores: self.scores,
            history: self.history.clone(),
            epoch: self.epoch,
        }
    }

    /// Outcome of a finished game; `None` until the phase is `Done`.
    pub fn outcome(&self) -> Option<Outcome> {
        (self.phase == Phase::Done).then(|| Outcome::from_scores(&self.scores))
    }

    /// Returns true once every pot is claimed.
    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Pot values of the current game.
    pub fn pots(&self) -> &[u32] {
        &self.pots
    }

    /// Per-pot status.
    pub fn statuses(&self) -> &[PotStatus] {
        &self.statuses
    }

    /// Current frontier, `None` outside `InProgress`.
    pub fn frontier(&self) -> Option<Frontier> {
        self.frontier
    }

    /// Pot values between the frontier bounds, inclusive.
    pub fn live_pots(&self) -> &[u32] {
        match self.frontier {
            Some(frontier) => &self.pots[frontier.low..=frontier.high],
            None => &[],
        }
    }

    /// Player to move.
    pub fn turn_owner(&self) -> Claimant {
        self.turn_owner
    }

    /// Player who moved first in the current game.
    pub fn first_turn(&self) -> Claimant {
        self.first_turn
    }

    /// Current scores.
    pub fn scores(&self) -> Scores {
        self.scores
    }

    /// Moves applied in the current game, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Counter bumped by every start and reset.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    fn commit(&mut self, action: Move, frontier: Frontier, end: End) {
        self.statuses[action.index] = action.claimant.claimed_status();
        self.scores.credit(action.claimant, self.pots[action.index]);
        self.history.push(action);

        // The last pot leaves no frontier, so no edge is opened.
        self.frontier = frontier.narrowed(end);
        if let Some(next) = self.frontier {
            let opened = next.index_of(end);
            if self.statuses[opened] == PotStatus::Interior {
                self.statuses[opened] = PotStatus::Edge;
            }
        }

        if self.statuses.iter().all(|status| status.is_claimed()) {
            self.phase = Phase::Done;
        } else {
            self.turn_owner = action.claimant.opponent();
        }
    }

    fn result_of(&self, claimed: Move) -> MoveResult {
        MoveResult {
            claimed,
            phase: self.phase,
            frontier: self.frontier,
            turn_owner: self.turn_owner,
            scores: self.scores,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PotStatus::{ClaimedByComputer as C, ClaimedByUser as P, Edge as E, Interior as I};

    fn started(pots: &[u32], first: Claimant) -> GameSession {
        let mut session = GameSession::new();
        session.start_game(pots.to_vec(), first).unwrap();
        session
    }

    #[test]
    fn test_start_marks_both_ends() {
        let session = started(&[3, 9, 1, 2, 7, 4], Claimant::User);
        assert_eq!(session.phase(), Phase::InProgress);
        assert_eq!(session.frontier(), Some(Frontier::new(0, 5)));
        assert_eq!(session.statuses(), &[E, I, I, I, I, E]);
        assert_eq!(session.scores(), Scores::default());
        assert_eq!(session.turn_owner(), Claimant::User);
        assert_eq!(session.epoch(), 1);
    }

    #[test]
    fn test_start_single_pot() {
        let session = started(&[5], Claimant::Computer);
        assert_eq!(session.statuses(), &[E]);
        assert_eq!(session.frontier(), Some(Frontier::new(0, 0)));
    }

    #[test]
    fn test_start_rejects_empty_row() {
        let mut session = GameSession::new();
        let err = session.start_game(vec![], Claimant::User).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfiguration(_)));
        assert_eq!(session.phase(), Phase::Init);
        assert_eq!(session.epoch(), 0);
    }

    #[test]
    fn test_start_rejected_mid_game() {
        let mut session = started(&[1, 2], Claimant::User);
        let before = session.state();
        let err = session.start_game(vec![4, 4], Claimant::User).unwrap_err();
        assert_eq!(err, GameError::GameAlreadyInProgress);
        assert_eq!(session.state(), before);
    }

    #[test]
    fn test_high_end_move_opens_neighbour() {
        let mut session = started(&[3, 9, 1, 2, 7, 4], Claimant::User);
        let result = session.apply_move(5, Claimant::User).unwrap();
        assert_eq!(result.scores.user, 4);
        assert_eq!(result.frontier, Some(Frontier::new(0, 4)));
        assert_eq!(result.turn_owner, Claimant::Computer);
        assert_eq!(session.statuses(), &[E, I, I, I, E, P]);
    }

    #[test]
    fn test_two_pots_left_do_not_reopen_claimed() {
        let mut session = started(&[1, 2, 3], Claimant::User);
        session.apply_move(0, Claimant::User).unwrap();
        assert_eq!(session.statuses(), &[P, E, E]);
        session.apply_move(2, Claimant::Computer).unwrap();
        assert_eq!(session.statuses(), &[P, E, C]);
        assert_eq!(session.frontier(), Some(Frontier::new(1, 1)));
    }

    #[test]
    fn test_last_pot_ends_game_without_new_edge() {
        let mut session = started(&[1, 5, 3], Claimant::User);
        session.apply_move(0, Claimant::User).unwrap();
        session.apply_move(2, Claimant::Computer).unwrap();
        let result = session.apply_move(1, Claimant::User).unwrap();
        assert_eq!(result.phase, Phase::Done);
        assert_eq!(result.frontier, None);
        assert_eq!(result.turn_owner, Claimant::User);
        assert_eq!(session.statuses(), &[P, P, C]);
        assert_eq!(session.outcome(), Some(Outcome::Winner(Claimant::User)));
    }

    #[test]
    fn test_rejections_leave_state_unchanged() {
        let mut session = started(&[3, 9, 1, 2, 7, 4], Claimant::User);
        let before = session.state();

        assert!(matches!(
            session.apply_move(2, Claimant::User),
            Err(GameError::IllegalMove { index: 2, .. })
        ));
        assert_eq!(
            session.apply_move(0, Claimant::Computer),
            Err(GameError::OutOfTurn(Claimant::Computer))
        );
        assert!(matches!(
            session.apply_move(99, Claimant::User),
            Err(GameError::IllegalMove { .. })
        ));
        assert_eq!(session.state(), before);
    }

    #[test]
    fn test_moves_rejected_outside_progress() {
        let mut session = GameSession::new();
        assert_eq!(
            session.apply_move(0, Claimant::User),
            Err(GameError::GameNotInProgress(Phase::Init))
        );

        let mut session = started(&[8], Claimant::User);
        session.apply_move(0, Claimant::User).unwrap();
        assert_eq!(
            session.apply_move(0, Claimant::User),
            Err(GameError::GameNotInProgress(Phase::Done))
        );
    }

    #[test]
    fn test_ticket_goes_stale_after_reset() {
        let mut session = started(&[1, 2, 3, 4], Claimant::Computer);
        let ticket = session.ticket().unwrap();
        session.reset();
        session.start_game(vec![1, 2, 3, 4], Claimant::Computer).unwrap();

        let before = session.state();
        assert!(matches!(
            session.apply_ticketed(&ticket, End::High),
            Err(GameError::StaleMove(_))
        ));
        assert_eq!(session.state(), before);
    }

    #[test]
    fn test_ticket_goes_stale_after_move() {
        let mut session = started(&[1, 2, 3, 4], Claimant::User);
        let ticket = session.ticket().unwrap();
        session.apply_move(0, Claimant::User).unwrap();
        assert!(matches!(
            session.apply_ticketed(&ticket, End::Low),
            Err(GameError::StaleMove(_))
        ));
    }

    #[test]
    fn test_fresh_ticket_applies_relative_end() {
        let mut session = started(&[1, 2, 3, 4], Claimant::Computer);
        let ticket = session.ticket().unwrap();
        let result = session.apply_ticketed(&ticket, End::High).unwrap();
        assert_eq!(result.claimed, Move::new(Claimant::Computer, 3));
        assert_eq!(result.scores.computer, 4);
    }

    #[test]
    fn test_reset_returns_to_init_and_bumps_epoch() {
        let mut session = started(&[1, 2], Claimant::User);
        session.reset();
        assert_eq!(session.phase(), Phase::Init);
        assert!(session.pots().is_empty());
        assert_eq!(session.frontier(), None);
        assert_eq!(session.epoch(), 2);
        assert!(session.ticket().is_err());
    }

    #[test]
    fn test_live_pots_follow_frontier() {
        let mut session = started(&[3, 9, 1, 2, 7, 4], Claimant::User);
        session.apply_move(0, Claimant::User).unwrap();
        session.apply_move(5, Claimant::Computer).unwrap();
        assert_eq!(session.live_pots(), &[9, 1, 2, 7]);
    }
}
