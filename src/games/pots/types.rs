//! Core domain types for Pots of Gold.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One of the two players.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Claimant {
    /// The human player.
    #[default]
    User,
    /// The automated opponent.
    #[serde(alias = "COMP")]
    #[strum(to_string = "COMPUTER", serialize = "COMP")]
    Computer,
}

impl Claimant {
    /// Returns the other player.
    pub fn opponent(self) -> Self {
        match self {
            Claimant::User => Claimant::Computer,
            Claimant::Computer => Claimant::User,
        }
    }

    /// The status a pot takes when this player claims it.
    pub fn claimed_status(self) -> PotStatus {
        match self {
            Claimant::User => PotStatus::ClaimedByUser,
            Claimant::Computer => PotStatus::ClaimedByComputer,
        }
    }
}

/// Reachability and ownership of a single pot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PotStatus {
    /// Not yet reachable.
    Interior,
    /// One end of the unclaimed run; selectable by the player to move.
    Edge,
    /// Taken by the human player.
    ClaimedByUser,
    /// Taken by the automated player.
    ClaimedByComputer,
}

impl PotStatus {
    /// Returns true once a player owns the pot.
    pub fn is_claimed(self) -> bool {
        matches!(self, PotStatus::ClaimedByUser | PotStatus::ClaimedByComputer)
    }

    /// Returns the owner of a claimed pot.
    pub fn owner(self) -> Option<Claimant> {
        match self {
            PotStatus::ClaimedByUser => Some(Claimant::User),
            PotStatus::ClaimedByComputer => Some(Claimant::Computer),
            PotStatus::Interior | PotStatus::Edge => None,
        }
    }

    /// Single-letter code used by text renderings (`I`, `E`, `P`, `C`).
    pub fn code(self) -> char {
        match self {
            PotStatus::Interior => 'I',
            PotStatus::Edge => 'E',
            PotStatus::ClaimedByUser => 'P',
            PotStatus::ClaimedByComputer => 'C',
        }
    }
}

/// Which end of the remaining run a move takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum End {
    /// The low bound of the frontier.
    Low,
    /// The high bound of the frontier.
    High,
}

impl End {
    /// Decodes a service response: `0` is the low end, `1` the high end.
    pub fn from_relative(index: usize) -> Option<Self> {
        match index {
            0 => Some(End::Low),
            1 => Some(End::High),
            _ => None,
        }
    }

    /// Encodes this end as a service response index.
    pub fn relative(self) -> usize {
        match self {
            End::Low => 0,
            End::High => 1,
        }
    }
}

/// Inclusive bounds of the contiguous unclaimed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Frontier {
    /// Lowest unclaimed index.
    pub low: usize,
    /// Highest unclaimed index.
    pub high: usize,
}

impl Frontier {
    /// Creates a frontier. `low` must not exceed `high`.
    pub fn new(low: usize, high: usize) -> Self {
        debug_assert!(low <= high, "frontier bounds inverted");
        Self { low, high }
    }

    /// Returns true if `index` is one of the two bounds.
    pub fn is_bound(&self, index: usize) -> bool {
        index == self.low || index == self.high
    }

    /// Returns true if `index` lies in `[low, high]`.
    pub fn contains(&self, index: usize) -> bool {
        (self.low..=self.high).contains(&index)
    }

    /// Number of pots still unclaimed.
    pub fn remaining(&self) -> usize {
        self.high - self.low + 1
    }

    /// Returns true when a single pot remains.
    pub fn is_single(&self) -> bool {
        self.low == self.high
    }

    /// Absolute index of the given end.
    pub fn index_of(&self, end: End) -> usize {
        match end {
            End::Low => self.low,
            End::High => self.high,
        }
    }

    /// Which end `index` sits on, if any. The low end wins when both coincide.
    pub fn end_of(&self, index: usize) -> Option<End> {
        if index == self.low {
            Some(End::Low)
        } else if index == self.high {
            Some(End::High)
        } else {
            None
        }
    }

    /// The frontier after claiming `end`, or `None` when nothing remains.
    #[instrument]
    pub fn narrowed(self, end: End) -> Option<Frontier> {
        if self.is_single() {
            return None;
        }
        Some(match end {
            End::Low => Frontier::new(self.low + 1, self.high),
            End::High => Frontier::new(self.low, self.high - 1),
        })
    }
}

impl std::fmt::Display for Frontier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.low, self.high)
    }
}

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Phase {
    /// No game yet, or reset after a finished one.
    #[default]
    Init,
    /// Moves are being accepted.
    InProgress,
    /// Every pot is claimed.
    Done,
}

/// Running totals for both players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Scores {
    /// Sum of pots claimed by the user.
    pub user: u64,
    /// Sum of pots claimed by the computer.
    pub computer: u64,
}

impl Scores {
    /// Score for one player.
    pub fn of(&self, claimant: Claimant) -> u64 {
        match claimant {
            Claimant::User => self.user,
            Claimant::Computer => self.computer,
        }
    }

    /// Combined score of both players.
    pub fn total(&self) -> u64 {
        self.user + self.computer
    }

    pub(crate) fn credit(&mut self, claimant: Claimant, value: u32) {
        match claimant {
            Claimant::User => self.user += u64::from(value),
            Claimant::Computer => self.computer += u64::from(value),
        }
    }
}

/// Number of pots in a new game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(try_from = "usize", into = "usize")]
pub enum PotCount {
    /// Six pots.
    #[default]
    #[strum(serialize = "6")]
    Six,
    /// Eight pots.
    #[strum(serialize = "8")]
    Eight,
    /// Ten pots.
    #[strum(serialize = "10")]
    Ten,
    /// Twelve pots.
    #[strum(serialize = "12")]
    Twelve,
}

impl PotCount {
    /// Number of pots as a plain integer.
    pub fn count(self) -> usize {
        match self {
            PotCount::Six => 6,
            PotCount::Eight => 8,
            PotCount::Ten => 10,
            PotCount::Twelve => 12,
        }
    }
}

impl From<PotCount> for usize {
    fn from(count: PotCount) -> Self {
        count.count()
    }
}

impl TryFrom<usize> for PotCount {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            6 => Ok(PotCount::Six),
            8 => Ok(PotCount::Eight),
            10 => Ok(PotCount::Ten),
            12 => Ok(PotCount::Twelve),
            other => Err(format!("pot count must be 6, 8, 10 or 12, got {}", other)),
        }
    }
}

/// Strength of the automated opponent.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Difficulty {
    /// Always takes the worse end.
    #[default]
    Easy,
    /// Picks the better or worse end with equal probability.
    Medium,
    /// Always takes the better end.
    Hard,
}
