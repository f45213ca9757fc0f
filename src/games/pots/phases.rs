//! Result of a finished game.

use super::types::{Claimant, Scores};
use serde::{Deserialize, Serialize};

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// One player collected more gold.
    Winner(Claimant),
    /// Both players collected the same amount.
    Draw,
}

impl Outcome {
    /// Decides the outcome from final scores.
    pub fn from_scores(scores: &Scores) -> Self {
        match scores.user.cmp(&scores.computer) {
            std::cmp::Ordering::Greater => Outcome::Winner(Claimant::User),
            std::cmp::Ordering::Less => Outcome::Winner(Claimant::Computer),
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Claimant> {
        match self {
            Outcome::Winner(claimant) => Some(*claimant),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(claimant) => write!(f, "{} wins", claimant),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_higher_score_wins() {
        let scores = Scores { user: 14, computer: 12 };
        assert_eq!(Outcome::from_scores(&scores), Outcome::Winner(Claimant::User));
        let scores = Scores { user: 3, computer: 12 };
        assert_eq!(Outcome::from_scores(&scores).winner(), Some(Claimant::Computer));
    }

    #[test]
    fn test_equal_scores_draw() {
        let outcome = Outcome::from_scores(&Scores { user: 13, computer: 13 });
        assert!(outcome.is_draw());
        assert_eq!(outcome.to_string(), "Draw");
    }
}
