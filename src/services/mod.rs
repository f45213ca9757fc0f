//! Request/response contracts of the two external services.
//!
//! - **Start-game**: `{ potscount }` → `{ pots }`
//! - **Optimal-move**: `{ pots, level }` → `{ chosen_index }`
//!
//! [`HttpServiceClient`] talks to a remote server; [`LocalServices`] answers
//! in-process with the same rules the server uses.

mod http_client;
mod local;

pub use http_client::HttpServiceClient;
pub use local::LocalServices;

use crate::games::pots::Difficulty;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Largest row either service will generate or solve.
pub const MAX_POTS: usize = 64;

/// Request for a fresh row of pots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartGameRequest {
    /// Number of pots to generate.
    #[serde(rename = "potscount", alias = "potCount")]
    pub pot_count: usize,
}

/// A fresh row of pots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartGameResponse {
    /// Pot values, in row order.
    pub pots: Vec<u32>,
}

/// Request for the automated player's choice.
///
/// Carries only the live sub-row: no claimed pots, no absolute indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimalMoveRequest {
    /// The frontier's sub-row, inclusive of both ends.
    pub pots: Vec<u32>,
    /// Difficulty to play at.
    pub level: Difficulty,
}

/// The automated player's choice, relative to the submitted sub-row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimalMoveResponse {
    /// `0` takes the first pot of the sub-row, `1` the last.
    #[serde(alias = "chosenIndex")]
    pub chosen_index: usize,
}

/// Source of pot rows for new games.
#[async_trait::async_trait]
pub trait PotService: Send + Sync {
    /// Generates a row of pots.
    async fn start_game(
        &self,
        request: &StartGameRequest,
    ) -> Result<StartGameResponse, ServiceError>;
}

/// Source of the automated player's moves.
#[async_trait::async_trait]
pub trait MoveService: Send + Sync {
    /// Chooses an end of the submitted sub-row.
    async fn optimal_move(
        &self,
        request: &OptimalMoveRequest,
    ) -> Result<OptimalMoveResponse, ServiceError>;
}

/// Checks that a requested pot count can be dealt.
///
/// # Errors
///
/// Rejects zero, odd counts, and counts above [`MAX_POTS`].
#[instrument]
pub fn check_pot_count(pot_count: usize) -> Result<(), ServiceError> {
    if pot_count == 0 || pot_count % 2 != 0 {
        return Err(ServiceError::new(format!(
            "pot count must be a positive even number, got {}",
            pot_count
        )));
    }
    if pot_count > MAX_POTS {
        return Err(ServiceError::new(format!(
            "pot count {} exceeds the maximum of {}",
            pot_count, MAX_POTS
        )));
    }
    Ok(())
}

/// Service call error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Service error: {} at {}:{}", message, file, line)]
pub struct ServiceError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ServiceError {
    /// Creates a new service error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        Self::new(format!("HTTP error: {}", err))
    }
}
