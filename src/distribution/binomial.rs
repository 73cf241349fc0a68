//! Binomial probability mass
//!
//! The coefficient is built as a running product of `(n - i) / (i + 1)` so
//! it never passes through a factorial. Past `LOG_SPACE_THRESHOLD` trials
//! the product is accumulated in log space to keep `p^k` from underflowing.

/// Trial count above which the mass is computed in log space
pub const LOG_SPACE_THRESHOLD: u32 = 512;

/// P(exactly `k` successes in `n` independent trials of chance `p`)
pub fn binomial_pmf(n: u32, k: u32, p: f64) -> f64 {
    if k > n {
        return 0.0;
    }
    if p == 0.0 {
        return if k == 0 { 1.0 } else { 0.0 };
    }
    if p == 1.0 {
        return if k == n { 1.0 } else { 0.0 };
    }

    if n > LOG_SPACE_THRESHOLD {
        return log_space_pmf(n, k, p);
    }

    let mut coefficient = 1.0;
    for i in 0..k {
        coefficient *= (n - i) as f64 / (i + 1) as f64;
    }

    coefficient * p.powi(k as i32) * (1.0 - p).powi((n - k) as i32)
}

fn log_space_pmf(n: u32, k: u32, p: f64) -> f64 {
    ln_pmf(n, k, p).exp()
}

/// `ln P(X = k)`, for `0 < p < 1` and `k <= n`
fn ln_pmf(n: u32, k: u32, p: f64) -> f64 {
    let ln_coefficient: f64 = (0..k)
        .map(|i| ((n - i) as f64 / (i + 1) as f64).ln())
        .sum();
    ln_coefficient + k as f64 * p.ln() + (n - k) as f64 * (1.0 - p).ln()
}

/// Masses for `k` in `from..=to`
///
/// Large `n` steps from one mass to the next with the ratio
/// `(n - k) / (k + 1) * p / (1 - p)` in log space, so the whole range costs
/// one direct evaluation plus O(1) per entry.
pub fn binomial_pmf_range(n: u32, p: f64, from: u32, to: u32) -> Vec<f64> {
    if from > to {
        return Vec::new();
    }
    if n <= LOG_SPACE_THRESHOLD || p <= 0.0 || p >= 1.0 {
        return (from..=to).map(|k| binomial_pmf(n, k, p)).collect();
    }

    let ln_odds = (p / (1.0 - p)).ln();
    let mut ln_mass: Option<f64> = None;
    (from..=to)
        .map(|k| {
            if k > n {
                return 0.0;
            }
            let next = match ln_mass {
                Some(prev) => prev + ((n - k + 1) as f64 / k as f64).ln() + ln_odds,
                None => ln_pmf(n, k, p),
            };
            ln_mass = Some(next);
            next.exp()
        })
        .collect()
}

/// `P(X < below)`
///
/// Large `n` walks down from `below - 1` with the inverse mass ratio and
/// stops once the remaining terms cannot change the sum.
pub fn binomial_lower_tail(n: u32, p: f64, below: u32) -> f64 {
    if below == 0 {
        return 0.0;
    }
    if below > n {
        return 1.0;
    }
    if n <= LOG_SPACE_THRESHOLD || p <= 0.0 || p >= 1.0 {
        return (0..below).map(|k| binomial_pmf(n, k, p)).sum::<f64>().min(1.0);
    }

    let ln_inverse_odds = ((1.0 - p) / p).ln();
    let mode = n as f64 * p;
    let mut ln_mass = ln_pmf(n, below - 1, p);
    let mut sum = ln_mass.exp();
    for k in (0..below - 1).rev() {
        ln_mass += ((k + 1) as f64 / (n - k) as f64).ln() + ln_inverse_odds;
        let term = ln_mass.exp();
        sum += term;
        // Below the mode the terms only shrink
        if (k as f64) < mode && term <= sum * f64::EPSILON * 1e-3 {
            break;
        }
    }
    sum.min(1.0)
}

/// Expected successes, `n * p`
pub fn binomial_mean(n: f64, p: f64) -> f64 {
    n * p
}

/// Binomial variance `n * p * (1 - p)`; `n` may be a fractional expectation
pub fn binomial_variance(n: f64, p: f64) -> f64 {
    n * p * (1.0 - p)
}

/// Square root of the binomial variance, floored at zero
pub fn binomial_std_dev(n: f64, p: f64) -> f64 {
    binomial_variance(n, p).max(0.0).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_k_above_n_is_zero() {
        assert_eq!(binomial_pmf(3, 4, 0.5), 0.0);
    }

    #[test]
    fn test_degenerate_probabilities() {
        assert_eq!(binomial_pmf(5, 0, 0.0), 1.0);
        assert_eq!(binomial_pmf(5, 1, 0.0), 0.0);
        assert_eq!(binomial_pmf(5, 5, 1.0), 1.0);
        assert_eq!(binomial_pmf(5, 4, 1.0), 0.0);
    }

    #[test]
    fn test_known_values() {
        assert!((binomial_pmf(2, 1, 0.5) - 0.5).abs() < 1e-12);
        assert!((binomial_pmf(10, 3, 0.5) - 120.0 / 1024.0).abs() < 1e-12);
        assert!((binomial_pmf(4, 2, 1.0 / 6.0) - 6.0 * 25.0 / 1296.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_trials() {
        assert_eq!(binomial_pmf(0, 0, 0.3), 1.0);
    }

    #[test]
    fn test_large_n_sums_to_one() {
        let n = 2_000;
        let total: f64 = (0..=n).map(|k| binomial_pmf(n, k, 0.37)).sum();
        assert!((total - 1.0).abs() < 1e-9, "total = {}", total);
    }

    #[test]
    fn test_log_space_matches_direct_near_threshold() {
        let direct = binomial_pmf(LOG_SPACE_THRESHOLD, 200, 0.4);
        let logged = log_space_pmf(LOG_SPACE_THRESHOLD, 200, 0.4);
        assert!((direct - logged).abs() < 1e-12);
    }

    #[test]
    fn test_pmf_range_matches_pointwise() {
        for n in [40, 3_000] {
            let range = binomial_pmf_range(n, 0.3, n / 4, n / 2);
            assert_eq!(range.len() as u32, n / 2 - n / 4 + 1);
            for (offset, mass) in range.iter().enumerate() {
                let direct = binomial_pmf(n, n / 4 + offset as u32, 0.3);
                assert!((mass - direct).abs() < 1e-12, "n={} k={}", n, n / 4 + offset as u32);
            }
        }
        assert!(binomial_pmf_range(10, 0.5, 4, 2).is_empty());
        assert_eq!(binomial_pmf_range(600, 0.5, 600, 602), vec![binomial_pmf(600, 600, 0.5), 0.0, 0.0]);
    }

    #[test]
    fn test_lower_tail_matches_naive_sum() {
        for (n, p, below) in [(10, 0.5, 6), (1_500, 0.42, 600), (1_500, 0.42, 700), (2_000, 0.9, 1_750)] {
            let naive: f64 = (0..below).map(|k| binomial_pmf(n, k, p)).sum();
            let tail = binomial_lower_tail(n, p, below);
            assert!((tail - naive).abs() < 1e-10, "n={} below={}: {} vs {}", n, below, tail, naive);
        }
        assert_eq!(binomial_lower_tail(50, 0.3, 0), 0.0);
        assert_eq!(binomial_lower_tail(50, 0.3, 51), 1.0);
    }

    #[test]
    fn test_lower_tail_for_huge_n_is_fast_and_sane() {
        // Half a million trials; the mass below mean - 3 sd is about 0.13%
        let n = 500_000;
        let p = 0.5;
        let sd = (n as f64 * p * (1.0 - p)).sqrt();
        let below = (n as f64 * p - 3.0 * sd).floor() as u32;
        let tail = binomial_lower_tail(n, p, below);
        assert!(tail > 0.0008 && tail < 0.0016, "tail = {}", tail);
    }

    #[test]
    fn test_moments() {
        assert_eq!(binomial_mean(20.0, 0.5), 10.0);
        assert!((binomial_std_dev(20.0, 0.5) - 5.0f64.sqrt()).abs() < 1e-12);
        assert_eq!(binomial_std_dev(0.0, 0.5), 0.0);
    }
}
