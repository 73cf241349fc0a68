//! Normal-approximation confidence intervals and sample moments

use serde::{Deserialize, Serialize};

/// Two-sided interval, already clamped to the quantity's valid range
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub low: f64,
    pub high: f64,
}

impl ConfidenceInterval {
    /// `estimate ± z * std_error`, clamped to `[min, max]`
    pub fn normal(estimate: f64, std_error: f64, z: f64, min: f64, max: f64) -> Self {
        let margin = z * std_error;
        Self {
            low: (estimate - margin).max(min),
            high: (estimate + margin).min(max),
        }
    }

    /// Zero-width interval at `value`
    pub fn point(value: f64) -> Self {
        Self { low: value, high: value }
    }

    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }

    /// Rescale both bounds (e.g. a proportion into percent)
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            low: self.low * factor,
            high: self.high * factor,
        }
    }
}

/// Standard error of a sample mean
pub fn standard_error(std_dev: f64, samples: u64) -> f64 {
    if samples == 0 {
        return 0.0;
    }
    std_dev / (samples as f64).sqrt()
}

/// Standard error of a sample proportion, `sqrt(p(1-p)/n)`
pub fn proportion_standard_error(p: f64, samples: u64) -> f64 {
    if samples == 0 {
        return 0.0;
    }
    (p * (1.0 - p) / samples as f64).max(0.0).sqrt()
}

/// Running count, sum and sum of squares of integer samples
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SampleMoments {
    pub count: u64,
    pub sum: f64,
    pub sum_of_squares: f64,
}

impl SampleMoments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `times` samples of `value`
    pub fn push_many(&mut self, value: f64, times: u64) {
        let weight = times as f64;
        self.count += times;
        self.sum += value * weight;
        self.sum_of_squares += value * value * weight;
    }

    pub fn push(&mut self, value: f64) {
        self.push_many(value, 1);
    }

    /// Moments of a frequency table indexed by value
    pub fn from_frequencies(frequencies: &[u64]) -> Self {
        let mut moments = Self::new();
        for (value, &times) in frequencies.iter().enumerate() {
            moments.push_many(value as f64, times);
        }
        moments
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum / self.count as f64
    }

    /// Population variance `E[X²] - E[X]²`, floored at zero
    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let mean = self.mean();
        (self.sum_of_squares / self.count as f64 - mean * mean).max(0.0)
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_interval_clamped() {
        let ci = ConfidenceInterval::normal(0.5, 1.0, 1.96, 0.0, 2.0);
        assert_eq!(ci.low, 0.0);
        assert_eq!(ci.high, 2.0);

        let inner = ConfidenceInterval::normal(5.0, 0.5, 2.0, 0.0, 10.0);
        assert_eq!(inner, ConfidenceInterval { low: 4.0, high: 6.0 });
        assert_eq!(inner.width(), 2.0);
        assert!(inner.contains(5.5));
        assert!(!inner.contains(6.5));
    }

    #[test]
    fn test_scaled_interval() {
        let ci = ConfidenceInterval { low: 0.25, high: 0.5 }.scaled(100.0);
        assert_eq!(ci, ConfidenceInterval { low: 25.0, high: 50.0 });
        assert_eq!(ConfidenceInterval::point(3.0).width(), 0.0);
    }

    #[test]
    fn test_standard_errors() {
        assert_eq!(standard_error(2.0, 4), 1.0);
        assert_eq!(standard_error(2.0, 0), 0.0);
        assert!((proportion_standard_error(0.5, 100) - 0.05).abs() < 1e-12);
        assert_eq!(proportion_standard_error(1.0, 100), 0.0);
    }

    #[test]
    fn test_moments_from_frequencies() {
        // Samples: 0, 1, 1, 2
        let moments = SampleMoments::from_frequencies(&[1, 2, 1]);
        assert_eq!(moments.count, 4);
        assert_eq!(moments.mean(), 1.0);
        assert_eq!(moments.variance(), 0.5);
    }

    #[test]
    fn test_constant_samples_have_no_spread() {
        let mut moments = SampleMoments::new();
        for _ in 0..10 {
            moments.push(3.0);
        }
        assert_eq!(moments.mean(), 3.0);
        assert_eq!(moments.std_dev(), 0.0);
        assert_eq!(SampleMoments::new().mean(), 0.0);
    }
}
