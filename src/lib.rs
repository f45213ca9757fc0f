//! Pots of Gold library - game session, move arbiter and services
//!
//! Two players alternately claim a pot from either end of a row. The player
//! with the larger total wins.
//!
//! # Architecture
//!
//! - **Session**: [`GameSession`] owns the row, pot statuses, frontier, scores
//!   and turn. All mutation goes through it and is all-or-nothing.
//! - **Arbiter**: [`MoveArbiter`] sends the live sub-row to a [`MoveService`]
//!   and applies the answer as the computer's move.
//! - **Services**: [`LocalServices`] generates rows and solves positions
//!   in-process; [`HttpServiceClient`] calls a remote server; [`router`]
//!   serves both over HTTP.
//! - **Driver**: [`GameController`] runs the start, move, game over cycle.
//!
//! # Example
//!
//! ```
//! use pots_of_gold::{Claimant, GameSession, Outcome};
//!
//! let mut session = GameSession::new();
//! session.start_game(vec![3, 9, 1, 2], Claimant::User)?;
//! session.apply_move(0, Claimant::User)?;
//! session.apply_move(3, Claimant::Computer)?;
//! session.apply_move(1, Claimant::User)?;
//! session.apply_move(2, Claimant::Computer)?;
//! assert_eq!(session.outcome(), Some(Outcome::Winner(Claimant::User)));
//! # Ok::<(), pots_of_gold::GameError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod arbiter;
mod config;
mod controller;
mod games;
mod server;
mod services;

pub mod play;

// Crate-level exports - Game core
pub use games::pots::{
    Claimant, Contract, Difficulty, End, Frontier, GameError, GameSession, GameSnapshot, LegalMove,
    Move, MoveContract, MoveResult, MoveTicket, Outcome, Phase, PotCount, PotStatus, Scores,
    StartContract,
};

// Crate-level exports - Invariants
pub use games::pots::invariants::{
    AlternatingTurnInvariant, EdgesMatchFrontierInvariant, Invariant, InvariantSet,
    InvariantViolation, PotsInvariants, ScoreConservationInvariant, SettledOutsideFrontierInvariant,
};

// Crate-level exports - Rules
pub use games::pots::rules::{
    PotRange, SolveError, best_end, choose_end, generate_pots, guaranteed_total,
};

// Crate-level exports - Arbiter
pub use arbiter::{MoveArbiter, PlannedMove, SharedSession};

// Crate-level exports - Services
pub use services::{
    HttpServiceClient, LocalServices, MAX_POTS, MoveService, OptimalMoveRequest,
    OptimalMoveResponse, PotService, ServiceError, StartGameRequest, StartGameResponse,
    check_pot_count,
};

// Crate-level exports - HTTP server
pub use server::{router, serve};

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError, GameSettings, ServerSettings};

// Crate-level exports - Driver
pub use controller::GameController;
