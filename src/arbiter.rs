//! Turns the automated player's service answer into a session move.
//!
//! The arbiter sends the move service only the live sub-row of the current
//! frontier. The service answers `0` for the low end, and `1` or the sub-row's
//! last index for the high end. The arbiter maps that back to an absolute
//! index and applies it as the computer.

use crate::games::pots::{
    Claimant, Difficulty, End, GameError, GameSession, MoveResult, MoveTicket, Phase,
};
use crate::services::{MoveService, OptimalMoveRequest};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// A session shared between a driver and in-flight move requests.
pub type SharedSession = Arc<Mutex<GameSession>>;

/// A computer move that has been planned but not yet answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMove {
    ticket: MoveTicket,
    request: OptimalMoveRequest,
}

impl PlannedMove {
    /// Session view the move was planned against.
    pub fn ticket(&self) -> &MoveTicket {
        &self.ticket
    }

    /// Request that will be sent to the move service.
    pub fn request(&self) -> &OptimalMoveRequest {
        &self.request
    }
}

/// Policy layer between a session and the move service.
#[derive(Clone)]
pub struct MoveArbiter {
    service: Arc<dyn MoveService>,
}

impl std::fmt::Debug for MoveArbiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoveArbiter").finish_non_exhaustive()
    }
}

impl MoveArbiter {
    /// Creates an arbiter backed by `service`.
    pub fn new(service: Arc<dyn MoveService>) -> Self {
        Self { service }
    }

    /// Plans the computer's move from the current session.
    ///
    /// # Errors
    ///
    /// `GameNotInProgress` outside `InProgress`; `OutOfTurn` if the user is to move.
    #[instrument(skip(self, session), fields(epoch = session.epoch()))]
    pub fn plan(
        &self,
        session: &GameSession,
        difficulty: Difficulty,
    ) -> Result<PlannedMove, GameError> {
        if session.phase() != Phase::InProgress {
            return Err(GameError::GameNotInProgress(session.phase()));
        }
        if session.turn_owner() != Claimant::Computer {
            return Err(GameError::OutOfTurn(Claimant::Computer));
        }

        let ticket = session.ticket()?;
        let request = OptimalMoveRequest {
            pots: session.live_pots().to_vec(),
            level: difficulty,
        };
        debug!(frontier = %ticket.frontier(), pots = ?request.pots, "Planned computer move");
        Ok(PlannedMove { ticket, request })
    }

    /// Asks the move service which end to take.
    ///
    /// `0` is the low end. The high end may be answered as `1` or as the last
    /// index of the submitted sub-row.
    ///
    /// # Errors
    ///
    /// `MoveServiceUnavailable` if the call fails or the answer names neither end.
    #[instrument(skip(self, plan), fields(level = %plan.request.level))]
    pub async fn consult(&self, plan: &PlannedMove) -> Result<End, GameError> {
        let response = self
            .service
            .optimal_move(&plan.request)
            .await
            .map_err(|e| GameError::MoveServiceUnavailable(e.message))?;

        let index = response.chosen_index;
        let last = plan.request.pots.len().saturating_sub(1);
        End::from_relative(index)
            .or_else(|| (index == last).then_some(End::High))
            .ok_or_else(|| {
                GameError::MoveServiceUnavailable(format!(
                    "chosen_index {} is neither 0, 1 nor {}",
                    index, last
                ))
            })
    }

    /// Applies an answered plan to the session.
    ///
    /// # Errors
    ///
    /// `StaleMove` if the session changed since [`MoveArbiter::plan`].
    pub fn commit(
        session: &mut GameSession,
        plan: &PlannedMove,
        end: End,
    ) -> Result<MoveResult, GameError> {
        session.apply_ticketed(&plan.ticket, end)
    }

    /// Plays the computer's turn on a session the caller holds exclusively.
    ///
    /// On error the session is unchanged and the computer is still to move, so
    /// the call can be retried.
    #[instrument(skip(self, session), fields(epoch = session.epoch()))]
    pub async fn request_computer_move(
        &self,
        session: &mut GameSession,
        difficulty: Difficulty,
    ) -> Result<MoveResult, GameError> {
        let plan = self.plan(session, difficulty)?;
        let end = self.consult(&plan).await?;
        Self::commit(session, &plan, end)
    }

    /// Plays the computer's turn on a shared session.
    ///
    /// The lock is released while the service is consulted. If the session is
    /// reset, restarted or moved in the meantime the answer is discarded with
    /// `StaleMove`.
    #[instrument(skip(self, session))]
    pub async fn request_shared_move(
        &self,
        session: &SharedSession,
        difficulty: Difficulty,
    ) -> Result<MoveResult, GameError> {
        let plan = {
            let guard = session.lock().await;
            self.plan(&guard, difficulty)?
        };
        let end = self.consult(&plan).await?;
        let mut guard = session.lock().await;
        Self::commit(&mut guard, &plan, end)
    }
}
