//! Pots of Gold: claim coins from either end of a row of pots.

mod action;
mod contracts;
mod phases;
mod session;
mod types;

pub mod invariants;
pub mod rules;

pub use action::{GameError, Move};
pub use contracts::{Contract, LegalMove, MoveContract, StartContract};
pub use phases::Outcome;
pub use session::{GameSession, GameSnapshot, MoveResult, MoveTicket};
pub use types::{Claimant, Difficulty, End, Frontier, Phase, PotCount, PotStatus, Scores};
