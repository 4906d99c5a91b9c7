//! Poisson probabilities and sampling over an injectable random source.

use tinyrand::Rand;

/// Probability of exactly `k` events at rate `lambda`, evaluated by the
/// multiplicative recurrence to avoid explicit factorials.
pub fn univariate(k: u8, lambda: f64) -> f64 {
    let mut prob = f64::exp(-lambda);
    for i in 1..=k {
        prob *= lambda / i as f64;
    }
    prob
}

// Bounds the CDF walk when the tail mass underflows at extreme rates.
const MAX_WALK: u8 = 64;

/// Draws a Poisson-distributed count by CDF inversion. A nonpositive rate
/// always yields zero; determinism is entirely in the caller's `rand`.
pub fn sample(lambda: f64, rand: &mut impl Rand) -> u8 {
    debug_assert!(!lambda.is_nan(), "invalid rate {lambda}");
    if lambda <= 0.0 {
        return 0;
    }
    let random = random_f64(rand);
    let mut k = 0;
    let mut prob = f64::exp(-lambda);
    let mut cumulative = prob;
    while random > cumulative && k < MAX_WALK {
        k += 1;
        prob *= lambda / k as f64;
        cumulative += prob;
    }
    k
}

#[inline]
pub(crate) fn random_f64(rand: &mut impl Rand) -> f64 {
    rand.next_u64() as f64 / u64::MAX as f64
}
