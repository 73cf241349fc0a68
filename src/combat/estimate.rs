//! Back-of-envelope kill estimate
//!
//! Total expected damage divided by wounds per model. Ignores overkill and
//! the size of the pool, so it overestimates whenever damage does not divide
//! a model's wounds evenly. Useful as a sanity check next to the simulation.

use serde::{Deserialize, Serialize};

use crate::combat::profile::CombatProfile;
use crate::combat::target::TargetPool;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KillEstimate {
    /// Damage points expected to get past saves and feel-no-pain
    pub expected_damage: f64,
    pub expected_kills: f64,
}

pub fn estimate_expected_kills(profile: &CombatProfile, pool: &TargetPool) -> KillEstimate {
    if profile.has_no_attacks() || pool.wounds_per_model == 0 {
        return KillEstimate::default();
    }

    let per_point = (1.0 - pool.save_chance()) * (1.0 - pool.feel_no_pain_chance());
    let expected_damage =
        profile.attack_count as f64 * profile.damage_per_attack.max(0) as f64 * per_point;

    KillEstimate {
        expected_damage,
        expected_kills: expected_damage / pool.wounds_per_model as f64,
    }
}
