//! Quick-reference probability tables for one D6 and for 2D6

use serde::{Deserialize, Serialize};

use crate::core::types::{RerollPolicy, StatValue};
use crate::dice::profile::resolve_success_profile;

/// How comfortable a given success chance is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskBand {
    Suicide,
    ExtremelyRisky,
    Risky,
    Medium,
    Healthy,
}

impl RiskBand {
    /// Classify a percentage in [0, 100]
    pub fn classify(percent: f64) -> Self {
        if percent >= 80.0 {
            RiskBand::Healthy
        } else if percent >= 50.0 {
            RiskBand::Medium
        } else if percent >= 33.0 {
            RiskBand::Risky
        } else if percent >= 10.0 {
            RiskBand::ExtremelyRisky
        } else {
            RiskBand::Suicide
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskBand::Healthy => "healthy",
            RiskBand::Medium => "medium",
            RiskBand::Risky => "risky",
            RiskBand::ExtremelyRisky => "extremely-risky",
            RiskBand::Suicide => "suicide",
        }
    }
}

/// One row of the single-die table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct D6Row {
    pub target: StatValue,
    /// Faces out of 6 that meet the target
    pub ways: u32,
    pub chance: f64,
    pub reroll_ones_chance: f64,
    pub reroll_fail_chance: f64,
    pub band: RiskBand,
}

/// One row of the two-dice table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoD6Row {
    pub target: u32,
    /// Combinations out of 36 that meet the target
    pub ways: u32,
    pub chance: f64,
    pub reroll_chance: f64,
    pub band: RiskBand,
    pub reroll_band: RiskBand,
}

/// Percentages for 2+ through 6+ on one die
pub fn d6_table() -> Vec<D6Row> {
    (StatValue::MIN..=StatValue::MAX)
        .map(|target| {
            let stat = StatValue(target);
            let pct = |policy| {
                resolve_success_profile(stat, policy, StatValue::SIX).success_chance * 100.0
            };
            let chance = pct(RerollPolicy::None);
            D6Row {
                target: stat,
                ways: (7 - target) as u32,
                chance,
                reroll_ones_chance: pct(RerollPolicy::RerollOnes),
                reroll_fail_chance: pct(RerollPolicy::RerollFailures),
                band: RiskBand::classify(chance),
            }
        })
        .collect()
}

/// Percentages for a 2D6 total of 2 through 12 or more
///
/// The reroll column rerolls both dice once on a miss.
pub fn two_d6_table() -> Vec<TwoD6Row> {
    (2..=12u32)
        .map(|target| {
            let ways = (1..=6u32)
                .flat_map(|a| (1..=6u32).map(move |b| a + b))
                .filter(|&total| total >= target)
                .count() as u32;
            let p = ways as f64 / 36.0;
            let chance = p * 100.0;
            let reroll_chance = (2.0 * p - p * p) * 100.0;
            TwoD6Row {
                target,
                ways,
                chance,
                reroll_chance,
                band: RiskBand::classify(chance),
                reroll_band: RiskBand::classify(reroll_chance),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_d6_table_rows() {
        let table = d6_table();
        assert_eq!(table.len(), 5);
        assert_eq!(table[0].target, StatValue(2));
        assert_eq!(table[0].ways, 5);
        assert_eq!(table[2].chance, 50.0);
        assert!((table[2].reroll_fail_chance - 75.0).abs() < 1e-9);
        assert_eq!(table[4].band, RiskBand::ExtremelyRisky);
    }

    #[test]
    fn test_two_d6_ways() {
        let table = two_d6_table();
        assert_eq!(table.len(), 11);
        assert_eq!(table[0].ways, 36);
        assert_eq!(table[5].ways, 21); // 7+
        assert_eq!(table[10].ways, 1); // 12
        assert_eq!(table[0].band, RiskBand::Healthy);
        assert_eq!(table[10].band, RiskBand::Suicide);
    }

    #[test]
    fn test_reroll_never_worse() {
        for row in two_d6_table() {
            assert!(row.reroll_chance >= row.chance);
            assert!(row.reroll_band >= row.band);
        }
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(RiskBand::classify(80.0), RiskBand::Healthy);
        assert_eq!(RiskBand::classify(79.9), RiskBand::Medium);
        assert_eq!(RiskBand::classify(33.0), RiskBand::Risky);
        assert_eq!(RiskBand::classify(9.99), RiskBand::Suicide);
        assert_eq!(RiskBand::ExtremelyRisky.label(), "extremely-risky");
    }
}
