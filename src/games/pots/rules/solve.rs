//! Optimal play for a row of pots.

use super::super::types::{Difficulty, End};
use rand::Rng;
use tracing::instrument;

/// Error returned when there is nothing to choose from.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SolveError {
    /// The row has no pots.
    #[display("Cannot choose a pot from an empty row")]
    EmptyRow,
}

impl std::error::Error for SolveError {}

/// Builds the table of guaranteed totals.
///
/// `best[l][r]` is the largest amount the player to move can secure from
/// `pots[l..=r]` against an opponent who also plays optimally.
fn guarantee_table(pots: &[u32]) -> Vec<Vec<u64>> {
    let n = pots.len();
    let mut prefix = vec![0u64; n + 1];
    for (i, value) in pots.iter().enumerate() {
        prefix[i + 1] = prefix[i] + u64::from(*value);
    }
    let sum = |l: usize, r: usize| prefix[r + 1] - prefix[l];

    let mut best = vec![vec![0u64; n]; n];
    for len in 1..=n {
        for l in 0..=n - len {
            let r = l + len - 1;
            best[l][r] = if l == r {
                u64::from(pots[l])
            } else {
                let take_low = u64::from(pots[l]) + sum(l + 1, r) - best[l + 1][r];
                let take_high = u64::from(pots[r]) + sum(l, r - 1) - best[l][r - 1];
                take_low.max(take_high)
            };
        }
    }
    best
}

/// Largest total the player to move can guarantee from the whole row.
pub fn guaranteed_total(pots: &[u32]) -> u64 {
    if pots.is_empty() {
        return 0;
    }
    guarantee_table(pots)[0][pots.len() - 1]
}

/// The end an optimal player takes.
///
/// Taking an end leaves the opponent the rest of the row; the better end is
/// the one that leaves the opponent less. Ties go to the low end.
///
/// # Errors
///
/// Returns `SolveError::EmptyRow` for an empty row.
#[instrument]
pub fn best_end(pots: &[u32]) -> Result<End, SolveError> {
    let n = pots.len();
    match n {
        0 => Err(SolveError::EmptyRow),
        1 => Ok(End::Low),
        _ => {
            let best = guarantee_table(pots);
            let after_low = best[1][n - 1];
            let after_high = best[0][n - 2];
            Ok(if after_low <= after_high { End::Low } else { End::High })
        }
    }
}

/// The end the automated player takes at the given difficulty.
///
/// `Hard` always plays [`best_end`], `Easy` always plays the other end and
/// `Medium` picks one of the two with equal probability. A single pot is
/// always taken as the low end.
///
/// # Errors
///
/// Returns `SolveError::EmptyRow` for an empty row.
#[instrument(skip(rng))]
pub fn choose_end<R: Rng + ?Sized>(
    pots: &[u32],
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<End, SolveError> {
    let good = best_end(pots)?;
    if pots.len() == 1 {
        return Ok(good);
    }
    let bad = match good {
        End::Low => End::High,
        End::High => End::Low,
    };

    Ok(match difficulty {
        Difficulty::Easy => bad,
        Difficulty::Medium => {
            if rng.random_bool(0.5) {
                good
            } else {
                bad
            }
        }
        Difficulty::Hard => good,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_guaranteed_total_small_rows() {
        assert_eq!(guaranteed_total(&[]), 0);
        assert_eq!(guaranteed_total(&[7]), 7);
        assert_eq!(guaranteed_total(&[2, 9]), 9);
        // Taking 10 first secures 15; taking 5 first secures only 12.
        assert_eq!(guaranteed_total(&[5, 3, 7, 10]), 15);
    }

    #[test]
    fn test_best_end_avoids_greedy_trap() {
        // Taking 1 would hand the 100 to the opponent.
        assert_eq!(best_end(&[1, 100, 2, 8]).unwrap(), End::High);
        assert_eq!(best_end(&[8, 2, 100, 1]).unwrap(), End::Low);
    }

    #[test]
    fn test_best_end_ties_favour_low() {
        assert_eq!(best_end(&[4, 4]).unwrap(), End::Low);
        assert_eq!(best_end(&[9]).unwrap(), End::Low);
    }

    #[test]
    fn test_empty_row_is_an_error() {
        assert_eq!(best_end(&[]), Err(SolveError::EmptyRow));
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(choose_end(&[], Difficulty::Hard, &mut rng), Err(SolveError::EmptyRow));
    }

    #[test]
    fn test_difficulty_levels() {
        let pots = [1, 2, 7];
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(choose_end(&pots, Difficulty::Hard, &mut rng).unwrap(), End::High);
        assert_eq!(choose_end(&pots, Difficulty::Easy, &mut rng).unwrap(), End::Low);
    }

    #[test]
    fn test_medium_plays_both_ends() {
        let pots = [1, 2, 7];
        let mut rng = StdRng::seed_from_u64(42);
        let picks: Vec<End> = (0..64)
            .map(|_| choose_end(&pots, Difficulty::Medium, &mut rng).unwrap())
            .collect();
        assert!(picks.contains(&End::Low));
        assert!(picks.contains(&End::High));
    }

    #[test]
    fn test_single_pot_ignores_difficulty() {
        let mut rng = StdRng::seed_from_u64(3);
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(choose_end(&[4], difficulty, &mut rng).unwrap(), End::Low);
        }
    }
}
