//! Monte Carlo conversion of expected goals into a discrete scoreline.

use tinyrand::Rand;

use crate::domain::Score;
use crate::poisson;

pub const DEFAULT_ITERATIONS: usize = 200;
pub const MAX_GOALS: u8 = 5;

/// Draws `iterations` independent scorelines, each coordinate Poisson-sampled
/// at its side's rate and clamped to `0..=MAX_GOALS`, and returns the most
/// frequent. Ties among equally frequent scorelines resolve to the one drawn
/// first. Deterministic only when `rand` is seeded by the caller.
pub fn simulate_scoreline(
    lambda_home: f64,
    lambda_away: f64,
    iterations: usize,
    rand: &mut impl Rand,
) -> Score {
    assert!(iterations > 0, "at least one iteration is required");

    // tally in first-occurrence order; the tie-break depends on it
    let mut outcomes: Vec<(Score, u32)> = vec![];
    for _ in 0..iterations {
        let home = u8::min(poisson::sample(lambda_home, rand), MAX_GOALS);
        let away = u8::min(poisson::sample(lambda_away, rand), MAX_GOALS);
        let score = Score::new(home, away);
        match outcomes.iter_mut().find(|(tallied, _)| *tallied == score) {
            Some((_, count)) => *count += 1,
            None => outcomes.push((score, 1)),
        }
    }

    let (mut best_score, mut best_count) = outcomes[0];
    for &(score, count) in &outcomes[1..] {
        if count > best_count {
            best_score = score;
            best_count = count;
        }
    }
    best_score
}

#[cfg(test)]
mod tests;
