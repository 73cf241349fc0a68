//! Closed-form reroll transforms
//!
//! Each policy is a pure function of the pre-reroll success and critical
//! chances. A die is rerolled at most once.

use crate::core::types::{RerollPolicy, StatValue, DIE_FACES};

/// Success and critical chances before or after a reroll
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chances {
    pub success: f64,
    pub critical: f64,
}

/// Apply a reroll policy to base chances
///
/// `critical_value` is the threshold that makes a roll critical; only
/// `RerollNonCritical` depends on it.
pub fn apply_reroll(policy: RerollPolicy, base: Chances, critical_value: StatValue) -> Chances {
    match policy {
        RerollPolicy::None => base,
        RerollPolicy::RerollOnes => reroll_ones(base),
        RerollPolicy::RerollFailures => reroll_failures(base),
        RerollPolicy::RerollNonCritical => reroll_non_critical(base, critical_value),
    }
}

/// A natural 1 is rolled again
fn reroll_ones(base: Chances) -> Chances {
    let one = 1.0 / DIE_FACES;
    Chances {
        success: base.success + one * base.success,
        critical: base.critical + one * base.critical,
    }
}

/// Every die that missed the success threshold is rolled again
///
/// The critical track rerolls on the pre-reroll *success* failure, since
/// only dice that failed outright get picked up.
fn reroll_failures(base: Chances) -> Chances {
    let fail = 1.0 - base.success;
    Chances {
        success: 2.0 * base.success - base.success * base.success,
        critical: base.critical + fail * base.critical,
    }
}

/// Every die below the critical threshold is rolled again
fn reroll_non_critical(base: Chances, critical_value: StatValue) -> Chances {
    let at_or_above = critical_value.base_chance();
    let below = critical_value.below_chance();
    Chances {
        success: at_or_above + below * base.success,
        critical: at_or_above + below * base.critical,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    fn four_plus() -> Chances {
        Chances { success: 0.5, critical: 1.0 / 6.0 }
    }

    #[test]
    fn test_no_reroll_is_identity() {
        let out = apply_reroll(RerollPolicy::None, four_plus(), StatValue::SIX);
        assert_eq!(out, four_plus());
    }

    #[test]
    fn test_reroll_ones_adds_a_sixth() {
        let out = apply_reroll(RerollPolicy::RerollOnes, four_plus(), StatValue::SIX);
        assert!(close(out.success, 0.5 + 0.5 / 6.0));
        assert!(close(out.critical, 1.0 / 6.0 + 1.0 / 36.0));
    }

    #[test]
    fn test_reroll_failures_uses_pre_reroll_failure_for_criticals() {
        let out = apply_reroll(RerollPolicy::RerollFailures, four_plus(), StatValue::SIX);
        assert!(close(out.success, 0.75));
        assert!(close(out.critical, 1.0 / 6.0 + 0.5 / 6.0));
    }

    #[test]
    fn test_reroll_non_critical_with_natural_six() {
        let out = apply_reroll(RerollPolicy::RerollNonCritical, four_plus(), StatValue::SIX);
        assert!(close(out.success, 1.0 / 6.0 + 5.0 / 6.0 * 0.5));
        assert!(close(out.critical, 1.0 / 6.0 + 5.0 / 36.0));
    }

    #[test]
    fn test_reroll_non_critical_with_lowered_threshold() {
        // Critical on 5+: 2/6 keep, 4/6 rerolled
        let base = Chances { success: 0.5, critical: 2.0 / 6.0 };
        let out = apply_reroll(RerollPolicy::RerollNonCritical, base, StatValue(5));
        assert!(close(out.success, 2.0 / 6.0 + 4.0 / 6.0 * 0.5));
        assert!(close(out.critical, 2.0 / 6.0 + 4.0 / 6.0 * 2.0 / 6.0));
    }
}
