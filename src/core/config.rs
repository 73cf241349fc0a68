//! Engine configuration with documented defaults
//!
//! Every value that used to be a baked-in argument default lives here and
//! is passed explicitly to the calculators.

use std::fs;
use std::path::Path;

use crate::core::error::{OddsError, Result};
use crate::core::types::StatValue;

/// Settings shared by the analytic and simulated paths
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    // === DICE ===
    /// Critical threshold used when a stage has no explicit override
    ///
    /// A natural 6 unless a rule lowers it.
    pub default_critical_value: StatValue,

    // === DISTRIBUTION ===
    /// Half-width of the displayed outcome window, in standard deviations
    ///
    /// At 3.0 the window holds roughly 99.7% of the mass of a
    /// near-normal binomial.
    pub distribution_sigmas: f64,

    // === SIMULATION ===
    /// Number of independent Monte Carlo trials per simulation
    pub iterations: u32,

    /// Two-tailed z-score for confidence intervals (1.96 = 95%)
    pub confidence_z: f64,

    /// Fixed RNG seed; `None` draws a fresh seed per run
    pub seed: Option<u64>,

    // === PARALLELIZATION ===
    /// Trials per shard
    ///
    /// Shards are the unit of parallel work and of RNG derivation, so a
    /// seeded run gives the same answer on any thread count.
    pub shard_size: u32,

    /// Minimum iteration count before shards run on the rayon pool
    ///
    /// Below this, thread overhead exceeds the benefit.
    pub parallel_threshold: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_critical_value: StatValue::SIX,
            distribution_sigmas: 3.0,
            iterations: 10_000,
            confidence_z: 1.96,
            seed: None,
            shard_size: 1_000,
            parallel_threshold: 2_000,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !self.default_critical_value.is_valid() {
            return Err(OddsError::InvalidConfig(format!(
                "default_critical_value ({}) must be between {} and {}",
                self.default_critical_value.value(),
                StatValue::MIN,
                StatValue::MAX
            )));
        }

        if self.iterations == 0 {
            return Err(OddsError::InvalidConfig("iterations must be positive".into()));
        }

        if self.shard_size == 0 {
            return Err(OddsError::InvalidConfig("shard_size must be positive".into()));
        }

        if !(self.confidence_z.is_finite() && self.confidence_z > 0.0) {
            return Err(OddsError::InvalidConfig(format!(
                "confidence_z ({}) must be a positive number",
                self.confidence_z
            )));
        }

        if !(self.distribution_sigmas.is_finite() && self.distribution_sigmas > 0.0) {
            return Err(OddsError::InvalidConfig(format!(
                "distribution_sigmas ({}) must be a positive number",
                self.distribution_sigmas
            )));
        }

        Ok(())
    }

    /// Load a config file; missing keys keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse TOML of the form
    ///
    /// ```toml
    /// [dice]
    /// default_critical_value = 6
    ///
    /// [simulation]
    /// iterations = 10000
    /// seed = 42
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let toml: toml::Value = content.parse()?;
        let mut config = Self::default();

        if let Some(dice) = toml.get("dice") {
            if let Some(crit) = dice.get("default_critical_value").and_then(|v| v.as_integer()) {
                config.default_critical_value = StatValue(crit as i32);
            }
        }

        if let Some(dist) = toml.get("distribution") {
            if let Some(sigmas) = dist.get("sigmas").and_then(as_number) {
                config.distribution_sigmas = sigmas;
            }
        }

        if let Some(sim) = toml.get("simulation") {
            if let Some(iterations) = sim.get("iterations").and_then(|v| v.as_integer()) {
                config.iterations = non_negative_u32("simulation.iterations", iterations)?;
            }
            if let Some(z) = sim.get("confidence_z").and_then(as_number) {
                config.confidence_z = z;
            }
            if let Some(seed) = sim.get("seed").and_then(|v| v.as_integer()) {
                config.seed = Some(seed as u64);
            }
            if let Some(shard) = sim.get("shard_size").and_then(|v| v.as_integer()) {
                config.shard_size = non_negative_u32("simulation.shard_size", shard)?;
            }
            if let Some(threshold) = sim.get("parallel_threshold").and_then(|v| v.as_integer()) {
                config.parallel_threshold = non_negative_u32("simulation.parallel_threshold", threshold)?;
            }
        }

        if let Err(e) = config.validate() {
            tracing::warn!("Rejected engine config: {}", e);
            return Err(e);
        }

        Ok(config)
    }
}

/// TOML integers are valid wherever a float is expected
fn as_number(value: &toml::Value) -> Option<f64> {
    value
        .as_float()
        .or_else(|| value.as_integer().map(|i| i as f64))
}

fn non_negative_u32(key: &str, value: i64) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| OddsError::InvalidConfig(format!("{} ({}) is out of range", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.iterations, 10_000);
        assert_eq!(config.default_critical_value, StatValue(6));
        assert!((config.confidence_z - 1.96).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let config = EngineConfig::default().with_iterations(0);
        assert!(matches!(config.validate(), Err(OddsError::InvalidConfig(_))));
    }

    #[test]
    fn test_critical_value_out_of_range_rejected() {
        let config = EngineConfig {
            default_critical_value: StatValue(7),
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_partial_toml_keeps_defaults() {
        let toml_str = r#"
[simulation]
iterations = 2500
seed = 7
confidence_z = 2
"#;
        let config = EngineConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.iterations, 2500);
        assert_eq!(config.seed, Some(7));
        assert!((config.confidence_z - 2.0).abs() < f64::EPSILON);
        assert_eq!(config.shard_size, 1_000);
        assert!((config.distribution_sigmas - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_all_sections() {
        let toml_str = r#"
[dice]
default_critical_value = 5

[distribution]
sigmas = 2.5

[simulation]
shard_size = 250
parallel_threshold = 500
"#;
        let config = EngineConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.default_critical_value, StatValue(5));
        assert!((config.distribution_sigmas - 2.5).abs() < f64::EPSILON);
        assert_eq!(config.shard_size, 250);
        assert_eq!(config.parallel_threshold, 500);
    }

    #[test]
    fn test_negative_iterations_rejected() {
        let toml_str = "[simulation]\niterations = -5\n";
        assert!(matches!(
            EngineConfig::from_toml_str(toml_str),
            Err(OddsError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(matches!(
            EngineConfig::from_toml_str("[simulation\niterations = 1"),
            Err(OddsError::TomlError(_))
        ));
    }
}
