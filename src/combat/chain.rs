//! Analytic hit → wound chain against a target with unlimited wounds
//!
//! Expectations and spreads are closed form; the wound distribution is the
//! exact binomial over the hits that still roll to wound.

use serde::{Deserialize, Serialize};

use crate::combat::profile::CombatProfile;
use crate::core::config::EngineConfig;
use crate::dice::profile::{resolve_success_profile, resolve_wound_success_profile, SuccessProfile};
use crate::distribution::binomial::{binomial_std_dev, binomial_variance};
use crate::distribution::outcome::{build_shifted_distribution, OutcomeWindow, TrialOutcomeDistribution};

/// Point estimates, spreads and the wound distribution for one chain
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChainResult {
    pub expected_hits: f64,
    pub hit_std_dev: f64,
    pub expected_critical_hits: f64,
    pub critical_hit_std_dev: f64,
    pub expected_wounds: f64,
    pub wound_std_dev: f64,
    pub expected_devastating_wounds: f64,
    pub devastating_wound_std_dev: f64,

    /// Per-die chances, in percent
    pub hit_chance: f64,
    pub critical_hit_chance: f64,
    pub wound_chance: f64,
    pub critical_wound_chance: f64,

    /// Wound counts within the reporting window
    pub distribution: TrialOutcomeDistribution,
    /// Upper edge of the reporting window
    pub max_wounds: u32,

    pub lethal_hits: bool,
    pub sustained_hits: bool,
    pub devastating_wounds: bool,
    pub anti: bool,
}

impl ChainResult {
    /// Result for a chain with no attacks
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Resolve a hit → wound chain analytically
pub fn resolve_combat_chain(profile: &CombatProfile, config: &EngineConfig) -> ChainResult {
    if profile.has_no_attacks() {
        return ChainResult::empty();
    }

    let attacks = profile.attack_count as f64;

    let hit = if profile.torrent {
        SuccessProfile::guaranteed()
    } else {
        resolve_success_profile(profile.to_hit, profile.hit_reroll, profile.critical_hit_value)
    };
    let wound = resolve_wound_success_profile(profile.to_wound, profile.wound_reroll, profile.anti);

    let expected_critical_hits = attacks * hit.critical_chance;
    let mut expected_hits = attacks * hit.success_chance;
    let mut hit_variance = binomial_variance(attacks, hit.success_chance);

    if let Some(bonus) = profile.sustained_hits {
        let bonus = bonus as f64;
        expected_hits += expected_critical_hits * bonus;
        hit_variance += bonus * bonus * binomial_variance(attacks, hit.critical_chance);
    }

    // Lethal hits skip the wound roll; only the rest roll to wound
    let rolling_hits = if profile.lethal_hits {
        expected_hits - expected_critical_hits
    } else {
        expected_hits
    };
    let auto_wounds = if profile.lethal_hits {
        expected_critical_hits
    } else {
        0.0
    };

    let expected_wounds = auto_wounds + rolling_hits * wound.success_chance;
    let wound_std_dev = binomial_std_dev(rolling_hits, wound.success_chance);

    let (expected_devastating_wounds, devastating_wound_std_dev) = if profile.devastating_wounds {
        (
            rolling_hits * wound.critical_chance,
            binomial_std_dev(rolling_hits, wound.critical_chance),
        )
    } else {
        (0.0, 0.0)
    };

    let window = OutcomeWindow::around(expected_wounds, wound_std_dev, config.distribution_sigmas);
    let trials = ceil_count(rolling_hits);
    let guaranteed = ceil_count(auto_wounds);
    let distribution = build_shifted_distribution(trials, wound.success_chance, guaranteed, window);

    ChainResult {
        expected_hits,
        hit_std_dev: hit_variance.max(0.0).sqrt(),
        expected_critical_hits,
        critical_hit_std_dev: binomial_std_dev(attacks, hit.critical_chance),
        expected_wounds,
        wound_std_dev,
        expected_devastating_wounds,
        devastating_wound_std_dev,
        hit_chance: hit.success_chance * 100.0,
        critical_hit_chance: hit.critical_chance * 100.0,
        wound_chance: wound.success_chance * 100.0,
        critical_wound_chance: wound.critical_chance * 100.0,
        distribution,
        max_wounds: window.high,
        lethal_hits: profile.lethal_hits,
        sustained_hits: profile.sustained_hits.is_some(),
        devastating_wounds: profile.devastating_wounds,
        anti: profile.anti.is_some(),
    }
}

/// Float noise below this never pushes an expectation up to the next whole die
const CEIL_TOLERANCE: f64 = 1e-9;

/// Round an expected dice count up to a whole number of dice
fn ceil_count(expected: f64) -> u32 {
    (expected - CEIL_TOLERANCE).ceil().max(0.0) as u32
}
