//! Raw calculator requests, normalized into engine profiles
//!
//! Field names follow the calculator forms (camelCase). Every numeric field
//! accepts a number or a string.

use serde::{Deserialize, Serialize};

use crate::combat::{CombatProfile, TargetPool};
use crate::core::config::EngineConfig;
use crate::core::error::Result;
use crate::core::types::{RerollPolicy, StatValue};
use crate::input::lenient::{
    lenient_count, lenient_stat, optional_stat, saturating_i32, saturating_u32, NumericInput,
};

const DEFAULT_TO_HIT: i64 = 3;
const DEFAULT_TO_WOUND: i64 = 4;
const DEFAULT_ANTI: i64 = 4;
const DEFAULT_SUSTAINED_HITS: i64 = 1;

fn reroll(token: Option<&str>) -> RerollPolicy {
    token.map(RerollPolicy::parse_lenient).unwrap_or_default()
}

fn stat(value: i64) -> StatValue {
    StatValue(saturating_i32(value))
}

/// Hit → wound form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChainRequest {
    pub attacks: Option<NumericInput>,
    pub torrent: bool,
    pub to_hit: Option<NumericInput>,
    pub hit_reroll: Option<String>,
    pub critical_hit: Option<NumericInput>,
    pub lethal_hits: bool,
    pub sustained_hits: bool,
    pub sustained_hits_value: Option<NumericInput>,
    pub to_wound: Option<NumericInput>,
    pub wound_reroll: Option<String>,
    pub devastating_wounds: bool,
    pub anti_enabled: bool,
    pub anti_value: Option<NumericInput>,
}

impl ChainRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_profile(&self, config: &EngineConfig) -> CombatProfile {
        let critical_default = config.default_critical_value.value() as i64;

        let mut profile = CombatProfile::new(saturating_i32(lenient_count(self.attacks.as_ref(), 0)))
            .with_to_hit(
                stat(lenient_stat(self.to_hit.as_ref(), DEFAULT_TO_HIT)),
                reroll(self.hit_reroll.as_deref()),
            )
            .with_critical_hit(stat(lenient_stat(self.critical_hit.as_ref(), critical_default)))
            .with_to_wound(
                stat(lenient_stat(self.to_wound.as_ref(), DEFAULT_TO_WOUND)),
                reroll(self.wound_reroll.as_deref()),
            );

        if self.torrent {
            profile = profile.with_torrent();
        }
        if self.lethal_hits {
            profile = profile.with_lethal_hits();
        }
        if self.sustained_hits {
            let bonus = lenient_count(self.sustained_hits_value.as_ref(), DEFAULT_SUSTAINED_HITS);
            profile = profile.with_sustained_hits(saturating_u32(bonus));
        }
        if self.devastating_wounds {
            profile = profile.with_devastating_wounds();
        }
        if self.anti_enabled {
            profile = profile.with_anti(stat(lenient_stat(self.anti_value.as_ref(), DEFAULT_ANTI)));
        }

        profile
    }
}

/// Kill-probability form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KillRequest {
    /// Attacks that reached the save step
    pub attacks: Option<NumericInput>,
    pub damage: Option<NumericInput>,
    pub models: Option<NumericInput>,
    pub wounds: Option<NumericInput>,
    /// Empty, missing or zero means no armour save
    pub save: Option<NumericInput>,
    pub save_reroll: Option<String>,
    /// Empty, missing or zero means no feel-no-pain
    pub feel_no_pain: Option<NumericInput>,
}

impl KillRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_profile(&self) -> CombatProfile {
        CombatProfile::new(saturating_i32(lenient_count(self.attacks.as_ref(), 0)))
            .with_damage(saturating_i32(lenient_count(self.damage.as_ref(), 1)))
    }

    pub fn to_pool(&self) -> TargetPool {
        let mut pool = TargetPool::new(
            saturating_u32(lenient_count(self.models.as_ref(), 1)),
            saturating_u32(lenient_count(self.wounds.as_ref(), 1)),
        );
        if let Some(save) = optional_stat(self.save.as_ref()) {
            pool = pool.with_save(stat(save), reroll(self.save_reroll.as_deref()));
        }
        if let Some(fnp) = optional_stat(self.feel_no_pain.as_ref()) {
            pool = pool.with_feel_no_pain(stat(fnp));
        }
        pool
    }
}
