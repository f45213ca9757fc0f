//! Rules behind the two external services.
//!
//! These are pure functions over a row of pot values; they know nothing
//! about sessions. The HTTP server and the in-process services call them.

pub mod generate;
pub mod solve;

pub use generate::{PotRange, generate_pots};
pub use solve::{SolveError, best_end, choose_end, guaranteed_total};
