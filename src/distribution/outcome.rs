//! Outcome-count distributions in percent, with running cumulative totals

use serde::{Deserialize, Serialize};

use crate::distribution::binomial::{binomial_lower_tail, binomial_pmf_range};

/// Cumulative percentages never exceed this, whatever the float noise
pub const PERCENT_CEILING: f64 = 100.0;

/// Probability of one outcome count
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeEntry {
    pub count: u32,
    /// Percent in [0, 100]
    pub probability: f64,
    /// Percent of outcomes at or below `count`, capped at 100
    pub cumulative_probability: f64,
}

/// Inclusive range of outcome counts to report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeWindow {
    pub low: u32,
    pub high: u32,
}

impl OutcomeWindow {
    pub fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    /// The whole support `[0, n]`
    pub fn full(n: u32) -> Self {
        Self { low: 0, high: n }
    }

    /// `[max(0, floor(mean - sigmas*sd)), ceil(mean + sigmas*sd)]`
    pub fn around(mean: f64, std_dev: f64, sigmas: f64) -> Self {
        let spread = std_dev * sigmas;
        let low = (mean - spread).floor().max(0.0);
        let high = (mean + spread).ceil().max(0.0);
        Self {
            low: low as u32,
            high: high as u32,
        }
    }

    pub fn contains(&self, count: u32) -> bool {
        (self.low..=self.high).contains(&count)
    }
}

/// Ordered per-count probabilities
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrialOutcomeDistribution {
    entries: Vec<OutcomeEntry>,
}

impl TrialOutcomeDistribution {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from per-count probabilities in [0, 1], accumulating from `prior_mass`
    ///
    /// `prior_mass` is the probability of counts below the first entry, so
    /// the cumulative column stays a true CDF when the window starts above 0.
    pub fn from_probabilities(
        probabilities: impl IntoIterator<Item = (u32, f64)>,
        prior_mass: f64,
    ) -> Self {
        let mut running = prior_mass * 100.0;
        let entries = probabilities
            .into_iter()
            .map(|(count, p)| {
                let probability = p * 100.0;
                running += probability;
                OutcomeEntry {
                    count,
                    probability,
                    cumulative_probability: running.min(PERCENT_CEILING),
                }
            })
            .collect();
        Self { entries }
    }

    /// Build from a frequency table indexed by count
    ///
    /// Counts above `ceiling` are reported with zero probability.
    pub fn from_frequencies(frequencies: &[u64], total: u64, ceiling: Option<u32>) -> Self {
        if total == 0 {
            return Self::empty();
        }
        let probabilities = frequencies.iter().enumerate().map(|(count, &hits)| {
            let count = count as u32;
            let p = match ceiling {
                Some(max) if count > max => 0.0,
                _ => hits as f64 / total as f64,
            };
            (count, p)
        });
        Self::from_probabilities(probabilities, 0.0)
    }

    pub fn entries(&self) -> &[OutcomeEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &OutcomeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Percent for one count (0 when outside the reported range)
    pub fn probability_of(&self, count: u32) -> f64 {
        self.entries
            .iter()
            .find(|e| e.count == count)
            .map(|e| e.probability)
            .unwrap_or(0.0)
    }

    /// Sum of reported percentages
    pub fn total_probability(&self) -> f64 {
        self.entries.iter().map(|e| e.probability).sum()
    }

    /// Most likely count among the reported entries
    pub fn mode(&self) -> Option<u32> {
        self.entries
            .iter()
            .max_by(|a, b| a.probability.total_cmp(&b.probability))
            .map(|e| e.count)
    }

    /// Highest reported count
    pub fn max_count(&self) -> Option<u32> {
        self.entries.last().map(|e| e.count)
    }
}

/// Binomial outcome distribution over `window`
pub fn build_distribution(n: u32, p: f64, window: OutcomeWindow) -> TrialOutcomeDistribution {
    build_shifted_distribution(n, p, 0, window)
}

/// Binomial distribution whose counts are shifted up by `offset` guaranteed successes
///
/// Count `c` has the mass of `c - offset` binomial successes; counts below
/// `offset` are impossible.
pub fn build_shifted_distribution(
    n: u32,
    p: f64,
    offset: u32,
    window: OutcomeWindow,
) -> TrialOutcomeDistribution {
    if window.low > window.high {
        return TrialOutcomeDistribution::empty();
    }

    let prior_mass = binomial_lower_tail(n, p, window.low.saturating_sub(offset));

    // Counts below `offset` stay at zero
    let first_reachable = window.low.max(offset);
    let masses = if window.high >= offset {
        binomial_pmf_range(n, p, first_reachable - offset, window.high - offset)
    } else {
        Vec::new()
    };

    TrialOutcomeDistribution::from_probabilities(
        (window.low..=window.high).map(|count| {
            let mass = if count < first_reachable {
                0.0
            } else {
                masses[(count - first_reachable) as usize]
            };
            (count, mass)
        }),
        prior_mass,
    )
}
