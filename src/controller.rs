//! Drives one session through the start, move, game over, play again cycle.

use crate::arbiter::MoveArbiter;
use crate::config::GameSettings;
use crate::games::pots::{Claimant, End, GameError, GameSession, MoveResult, Phase};
use crate::services::{MoveService, PotService, StartGameRequest};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Owns a session and the services that feed it.
pub struct GameController {
    session: GameSession,
    arbiter: MoveArbiter,
    pots: Arc<dyn PotService>,
    settings: GameSettings,
}

impl std::fmt::Debug for GameController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameController")
            .field("session", &self.session)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl GameController {
    /// Creates a controller with an idle session.
    pub fn new(
        settings: GameSettings,
        pots: Arc<dyn PotService>,
        moves: Arc<dyn MoveService>,
    ) -> Self {
        Self {
            session: GameSession::new(),
            arbiter: MoveArbiter::new(moves),
            pots,
            settings,
        }
    }

    /// The session being played.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Settings new games are started with.
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// True when the game is running and the computer is to move.
    pub fn awaits_computer(&self) -> bool {
        self.session.phase() == Phase::InProgress && self.session.turn_owner() == Claimant::Computer
    }

    /// Fetches a fresh row and starts a game with it.
    ///
    /// A game in progress is abandoned once the row has arrived. If the fetch
    /// fails the session is left as it was.
    #[instrument(skip(self), fields(pot_count = %self.settings.pot_count()))]
    pub async fn new_game(&mut self) -> Result<()> {
        let request = StartGameRequest {
            pot_count: self.settings.pot_count().count(),
        };
        let response = self
            .pots
            .start_game(&request)
            .await
            .context("Failed to fetch pots for a new game")?;
        debug!(pots = ?response.pots, "Received pots");

        if self.session.phase() == Phase::InProgress {
            info!(epoch = self.session.epoch(), "Abandoning game in progress");
            self.session.reset();
        }
        self.session
            .start_game(response.pots, *self.settings.first_turn())
            .context("Failed to start game")?;
        Ok(())
    }

    /// Claims the pot at `index` for the user.
    pub fn user_move(&mut self, index: usize) -> Result<MoveResult, GameError> {
        self.session.apply_move(index, Claimant::User)
    }

    /// Claims the pot at one end of the frontier for the user.
    pub fn user_take(&mut self, end: End) -> Result<MoveResult, GameError> {
        let frontier = self
            .session
            .frontier()
            .ok_or(GameError::GameNotInProgress(self.session.phase()))?;
        self.user_move(frontier.index_of(end))
    }

    /// Asks the move service for the computer's move and applies it.
    pub async fn computer_move(&mut self) -> Result<MoveResult, GameError> {
        self.arbiter
            .request_computer_move(&mut self.session, *self.settings.difficulty())
            .await
    }

    /// Resets the session and starts another game.
    ///
    /// If the fetch fails the session stays idle.
    #[instrument(skip(self))]
    pub async fn play_again(&mut self) -> Result<()> {
        self.session.reset();
        self.new_game().await
    }
}
