//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::OddsError;

/// Faces on the die every stage rolls
pub const DIE_FACES: f64 = 6.0;

/// A "roll this or higher" stat (2+ .. 6+)
///
/// Out-of-range values are carried as-is; the arithmetic decides what they mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatValue(pub i32);

impl StatValue {
    pub const MIN: i32 = 2;
    pub const MAX: i32 = 6;

    /// The default critical threshold: a natural 6
    pub const SIX: StatValue = StatValue(6);

    pub fn new(value: i32) -> Self {
        Self(value)
    }

    pub fn value(self) -> i32 {
        self.0
    }

    /// Chance of rolling this value or higher on one die
    pub fn base_chance(self) -> f64 {
        (7 - self.0) as f64 / DIE_FACES
    }

    /// Chance of rolling strictly below this value on one die
    pub fn below_chance(self) -> f64 {
        (self.0 - 1) as f64 / DIE_FACES
    }

    pub fn is_valid(self) -> bool {
        (Self::MIN..=Self::MAX).contains(&self.0)
    }

    /// The easier (lower) of two thresholds
    pub fn better_of(self, other: StatValue) -> StatValue {
        self.min(other)
    }
}

impl Default for StatValue {
    fn default() -> Self {
        Self::SIX
    }
}

impl From<i32> for StatValue {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+", self.0)
    }
}

/// Which dice a stage may pick up and roll again (once)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RerollPolicy {
    #[default]
    #[serde(rename = "no-reroll")]
    None,
    #[serde(rename = "reroll-one")]
    RerollOnes,
    #[serde(rename = "reroll-fail")]
    RerollFailures,
    #[serde(rename = "reroll-non-critical")]
    RerollNonCritical,
}

impl RerollPolicy {
    /// All reroll policies
    pub fn all() -> &'static [RerollPolicy] {
        &[
            RerollPolicy::None,
            RerollPolicy::RerollOnes,
            RerollPolicy::RerollFailures,
            RerollPolicy::RerollNonCritical,
        ]
    }

    /// Canonical wire token
    pub fn token(self) -> &'static str {
        match self {
            RerollPolicy::None => "no-reroll",
            RerollPolicy::RerollOnes => "reroll-one",
            RerollPolicy::RerollFailures => "reroll-fail",
            RerollPolicy::RerollNonCritical => "reroll-non-critical",
        }
    }

    /// Parse a token, treating anything unrecognised as no reroll
    pub fn parse_lenient(token: &str) -> Self {
        token.parse().unwrap_or_default()
    }
}

impl FromStr for RerollPolicy {
    type Err = OddsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        RerollPolicy::all()
            .iter()
            .copied()
            .find(|policy| policy.token() == trimmed)
            .ok_or_else(|| OddsError::UnknownRerollPolicy(s.to_string()))
    }
}

impl fmt::Display for RerollPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_chance_for_every_valid_stat() {
        for (stat, ways) in [(2, 5), (3, 4), (4, 3), (5, 2), (6, 1)] {
            assert_eq!(StatValue(stat).base_chance(), ways as f64 / 6.0);
        }
    }

    #[test]
    fn test_out_of_range_stat_is_not_rejected() {
        let stat = StatValue(8);
        assert!(!stat.is_valid());
        assert!(stat.base_chance() < 0.0);
    }

    #[test]
    fn test_better_of_picks_lower_threshold() {
        assert_eq!(StatValue(4).better_of(StatValue(2)), StatValue(2));
        assert_eq!(StatValue(3).better_of(StatValue(5)), StatValue(3));
    }

    #[test]
    fn test_reroll_tokens_round_trip() {
        for policy in RerollPolicy::all() {
            assert_eq!(policy.token().parse::<RerollPolicy>().unwrap(), *policy);
        }
    }

    #[test]
    fn test_unknown_token_is_error_or_no_reroll() {
        assert!(matches!(
            "reroll-everything".parse::<RerollPolicy>(),
            Err(OddsError::UnknownRerollPolicy(_))
        ));
        assert_eq!(RerollPolicy::parse_lenient("reroll-everything"), RerollPolicy::None);
    }

    #[test]
    fn test_serde_uses_tokens() {
        let json = serde_json::to_string(&RerollPolicy::RerollFailures).unwrap();
        assert_eq!(json, "\"reroll-fail\"");
        let back: RerollPolicy = serde_json::from_str("\"reroll-non-critical\"").unwrap();
        assert_eq!(back, RerollPolicy::RerollNonCritical);
    }

    #[test]
    fn test_stat_display() {
        assert_eq!(StatValue(3).to_string(), "3+");
    }
}
