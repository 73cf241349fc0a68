//! Per-stage success and critical chances
//!
//! Pure functions: a stat, a reroll policy and a critical threshold in,
//! two probabilities out. Success and critical are computed independently
//! and each is capped at 1.

use serde::{Deserialize, Serialize};

use crate::core::types::{RerollPolicy, StatValue};
use crate::dice::reroll::{apply_reroll, Chances};

/// Chance that one die succeeds, and that it succeeds critically
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SuccessProfile {
    pub success_chance: f64,
    pub critical_chance: f64,
}

impl SuccessProfile {
    /// Every die succeeds and none is critical (torrent-style auto hits)
    pub fn guaranteed() -> Self {
        Self {
            success_chance: 1.0,
            critical_chance: 0.0,
        }
    }

    pub fn failure_chance(&self) -> f64 {
        1.0 - self.success_chance
    }
}

/// Resolve a stage's chances from its stat, reroll and critical threshold
pub fn resolve_success_profile(
    stat: StatValue,
    reroll: RerollPolicy,
    critical_value: StatValue,
) -> SuccessProfile {
    let base = Chances {
        success: stat.base_chance(),
        critical: critical_value.base_chance(),
    };
    let rerolled = apply_reroll(reroll, base, critical_value);

    SuccessProfile {
        success_chance: rerolled.success.min(1.0),
        critical_chance: rerolled.critical.min(1.0),
    }
}

/// Resolve the wound stage, honouring an anti override
///
/// With anti enabled the critical threshold becomes the anti value and the
/// success threshold the easier of anti and to-wound. Without it, criticals
/// are natural sixes.
pub fn resolve_wound_success_profile(
    to_wound: StatValue,
    reroll: RerollPolicy,
    anti: Option<StatValue>,
) -> SuccessProfile {
    match anti {
        Some(anti_value) => {
            resolve_success_profile(to_wound.better_of(anti_value), reroll, anti_value)
        }
        None => resolve_success_profile(to_wound, reroll, StatValue::SIX),
    }
}

/// Chance that an armour save blocks an attack (0 with no save)
pub fn save_chance(save: Option<StatValue>, reroll: RerollPolicy) -> f64 {
    match save {
        Some(stat) => resolve_success_profile(stat, reroll, StatValue::SIX)
            .success_chance
            .clamp(0.0, 1.0),
        None => 0.0,
    }
}

/// Chance that a feel-no-pain roll negates one point of damage (0 with none)
pub fn feel_no_pain_chance(fnp: Option<StatValue>) -> f64 {
    fnp.map(|stat| stat.base_chance().clamp(0.0, 1.0))
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_plain_four_plus() {
        let p = resolve_success_profile(StatValue(4), RerollPolicy::None, StatValue::SIX);
        assert_eq!(p.success_chance, 0.5);
        assert!(close(p.critical_chance, 1.0 / 6.0));
    }

    #[test]
    fn test_four_plus_reroll_ones() {
        let p = resolve_success_profile(StatValue(4), RerollPolicy::RerollOnes, StatValue::SIX);
        assert!(close(p.success_chance, 0.583_333_333_3));
    }

    #[test]
    fn test_reroll_capped_at_one() {
        // A 1+ stat rerolling ones would exceed certainty without the cap
        let p = resolve_success_profile(StatValue(1), RerollPolicy::RerollOnes, StatValue(1));
        assert_eq!(p.success_chance, 1.0);
        assert_eq!(p.critical_chance, 1.0);
    }

    #[test]
    fn test_critical_value_shapes_critical_chance() {
        let p = resolve_success_profile(StatValue(3), RerollPolicy::None, StatValue(5));
        assert!(close(p.critical_chance, 2.0 / 6.0));
    }

    #[test]
    fn test_wound_without_anti() {
        let p = resolve_wound_success_profile(StatValue(5), RerollPolicy::None, None);
        assert!(close(p.success_chance, 2.0 / 6.0));
        assert!(close(p.critical_chance, 1.0 / 6.0));
    }

    #[test]
    fn test_wound_with_anti_takes_better_threshold() {
        // Anti 4+ against a 5+ wound roll: wounds on 4+, criticals on 4+
        let p = resolve_wound_success_profile(StatValue(5), RerollPolicy::None, Some(StatValue(4)));
        assert!(close(p.success_chance, 0.5));
        assert!(close(p.critical_chance, 0.5));
    }

    #[test]
    fn test_wound_with_anti_keeps_easier_to_wound() {
        let p = resolve_wound_success_profile(StatValue(2), RerollPolicy::None, Some(StatValue(4)));
        assert!(close(p.success_chance, 5.0 / 6.0));
        assert!(close(p.critical_chance, 0.5));
    }

    #[test]
    fn test_save_chance() {
        assert_eq!(save_chance(None, RerollPolicy::None), 0.0);
        assert_eq!(save_chance(Some(StatValue(4)), RerollPolicy::None), 0.5);
        assert!(close(
            save_chance(Some(StatValue(4)), RerollPolicy::RerollOnes),
            0.5 + 0.5 / 6.0
        ));
        // Out of range saves clamp rather than go negative
        assert_eq!(save_chance(Some(StatValue(9)), RerollPolicy::None), 0.0);
    }

    #[test]
    fn test_feel_no_pain_chance() {
        assert_eq!(feel_no_pain_chance(None), 0.0);
        assert!(close(feel_no_pain_chance(Some(StatValue(5))), 2.0 / 6.0));
    }

    #[test]
    fn test_guaranteed_profile() {
        let p = SuccessProfile::guaranteed();
        assert_eq!(p.success_chance, 1.0);
        assert_eq!(p.critical_chance, 0.0);
        assert_eq!(p.failure_chance(), 0.0);
    }
}
