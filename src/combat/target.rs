//! Defending unit: identical multi-wound models

use serde::{Deserialize, Serialize};

use crate::core::types::{RerollPolicy, StatValue};
use crate::dice::profile::{feel_no_pain_chance, save_chance};

/// A finite pool of identical models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetPool {
    pub model_count: u32,
    pub wounds_per_model: u32,
    /// Armour save; `None` means every attack goes through
    pub save: Option<StatValue>,
    pub save_reroll: RerollPolicy,
    /// Per-damage-point mitigation roll
    pub feel_no_pain: Option<StatValue>,
}

impl TargetPool {
    pub fn new(model_count: u32, wounds_per_model: u32) -> Self {
        Self {
            model_count,
            wounds_per_model,
            save: None,
            save_reroll: RerollPolicy::None,
            feel_no_pain: None,
        }
    }

    pub fn with_save(mut self, save: StatValue, reroll: RerollPolicy) -> Self {
        self.save = Some(save);
        self.save_reroll = reroll;
        self
    }

    pub fn with_feel_no_pain(mut self, fnp: StatValue) -> Self {
        self.feel_no_pain = Some(fnp);
        self
    }

    /// Chance one attack is blocked by the save
    pub fn save_chance(&self) -> f64 {
        save_chance(self.save, self.save_reroll)
    }

    /// Chance one damage point is negated
    pub fn feel_no_pain_chance(&self) -> f64 {
        feel_no_pain_chance(self.feel_no_pain)
    }

    pub fn total_wounds(&self) -> u64 {
        self.model_count as u64 * self.wounds_per_model as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unprotected_pool() {
        let pool = TargetPool::new(5, 2);
        assert_eq!(pool.save_chance(), 0.0);
        assert_eq!(pool.feel_no_pain_chance(), 0.0);
        assert_eq!(pool.total_wounds(), 10);
    }

    #[test]
    fn test_save_and_fnp() {
        let pool = TargetPool::new(5, 2)
            .with_save(StatValue(4), RerollPolicy::None)
            .with_feel_no_pain(StatValue(5));
        assert_eq!(pool.save_chance(), 0.5);
        assert!((pool.feel_no_pain_chance() - 2.0 / 6.0).abs() < 1e-12);
    }
}
