//! Attack-side modifiers for one attack sequence

use serde::{Deserialize, Serialize};

use crate::core::types::{RerollPolicy, StatValue};

/// Everything the attacker brings to a hit → wound chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatProfile {
    /// Dice rolled to hit; in the kill simulation, attacks reaching the save
    pub attack_count: i32,
    pub damage_per_attack: i32,

    /// Every attack hits automatically and none is critical
    pub torrent: bool,
    pub to_hit: StatValue,
    pub hit_reroll: RerollPolicy,
    pub critical_hit_value: StatValue,
    /// Critical hits wound automatically
    pub lethal_hits: bool,
    /// Bonus hits generated per critical hit
    pub sustained_hits: Option<u32>,

    pub to_wound: StatValue,
    pub wound_reroll: RerollPolicy,
    /// Critical wounds bypass saves
    pub devastating_wounds: bool,
    /// Lowered critical-wound threshold
    pub anti: Option<StatValue>,
}

impl CombatProfile {
    /// Plain attacks hitting on 3+ and wounding on 4+
    pub fn new(attack_count: i32) -> Self {
        Self {
            attack_count,
            damage_per_attack: 1,
            torrent: false,
            to_hit: StatValue(3),
            hit_reroll: RerollPolicy::None,
            critical_hit_value: StatValue::SIX,
            lethal_hits: false,
            sustained_hits: None,
            to_wound: StatValue(4),
            wound_reroll: RerollPolicy::None,
            devastating_wounds: false,
            anti: None,
        }
    }

    pub fn with_damage(mut self, damage: i32) -> Self {
        self.damage_per_attack = damage;
        self
    }

    pub fn with_to_hit(mut self, stat: StatValue, reroll: RerollPolicy) -> Self {
        self.to_hit = stat;
        self.hit_reroll = reroll;
        self
    }

    pub fn with_critical_hit(mut self, stat: StatValue) -> Self {
        self.critical_hit_value = stat;
        self
    }

    pub fn with_to_wound(mut self, stat: StatValue, reroll: RerollPolicy) -> Self {
        self.to_wound = stat;
        self.wound_reroll = reroll;
        self
    }

    pub fn with_torrent(mut self) -> Self {
        self.torrent = true;
        self
    }

    pub fn with_lethal_hits(mut self) -> Self {
        self.lethal_hits = true;
        self
    }

    pub fn with_sustained_hits(mut self, bonus_hits: u32) -> Self {
        self.sustained_hits = Some(bonus_hits);
        self
    }

    pub fn with_devastating_wounds(mut self) -> Self {
        self.devastating_wounds = true;
        self
    }

    pub fn with_anti(mut self, stat: StatValue) -> Self {
        self.anti = Some(stat);
        self
    }

    /// No dice to roll
    pub fn has_no_attacks(&self) -> bool {
        self.attack_count <= 0
    }
}

impl Default for CombatProfile {
    fn default() -> Self {
        Self::new(0)
    }
}
