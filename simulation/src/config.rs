//! Mutable simulation parameters, writable by an external control layer
//! between ticks and re-read fresh on every tick.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// All externally tunable parameters of the simulation.
///
/// The reproduction cooldown is configured in seconds, the unit a control
/// slider exposes, but the engine counts ticks: `cooldown_ticks()` converts
/// using `tick_rate`, the nominal ticks-per-second the driver runs at. With
/// the defaults (4.0 s at 10 ticks/s) the observed reproduction rate matches
/// a continuously rendered run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Probability that an empty cell sprouts vegetation each tick.
    pub plant_spawn_rate: f64,
    /// Herbivores reproduce only while hunger is below this value.
    pub herb_reproduce_threshold: f64,
    /// Carnivores reproduce only while hunger is below this value.
    pub carn_reproduce_threshold: f64,
    /// Minimum time between an animal's reproduction events, in seconds.
    pub reproduce_cooldown_secs: f64,
    /// Nominal ticks per second, used to convert the cooldown into ticks.
    pub tick_rate: f64,
    /// Herbivores beyond this head count skip their update entirely.
    pub max_herbivores: usize,
    /// Seed counts used by `SimulationWorld::seed`.
    pub initial_plants: usize,
    pub initial_herbivores: usize,
    pub initial_carnivores: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            plant_spawn_rate: 0.02,
            herb_reproduce_threshold: 8.0,
            carn_reproduce_threshold: 8.0,
            reproduce_cooldown_secs: 4.0,
            tick_rate: 10.0,
            max_herbivores: 500,
            initial_plants: 500,
            initial_herbivores: 200,
            initial_carnivores: 20,
        }
    }
}

impl SimulationConfig {
    /// Reproduction cooldown expressed in whole ticks, rounded up.
    pub fn cooldown_ticks(&self) -> u64 {
        (self.reproduce_cooldown_secs * self.tick_rate).ceil().max(0.0) as u64
    }

    /// Check parameters an external layer may have written without
    /// validation. The tick loop itself never fails on bad values; this is
    /// for control surfaces that want to reject them up front.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.plant_spawn_rate) {
            return Err(ConfigError::SpawnRateOutOfRange(self.plant_spawn_rate));
        }
        if !self.tick_rate.is_finite() || self.tick_rate <= 0.0 {
            return Err(ConfigError::NonPositiveTickRate(self.tick_rate));
        }
        for (name, value) in [
            ("herb_reproduce_threshold", self.herb_reproduce_threshold),
            ("carn_reproduce_threshold", self.carn_reproduce_threshold),
            ("reproduce_cooldown_secs", self.reproduce_cooldown_secs),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("plant spawn rate {0} is outside [0, 1]")]
    SpawnRateOutOfRange(f64),
    #[error("tick rate must be a positive finite number, got {0}")]
    NonPositiveTickRate(f64),
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cooldown_tick_conversion() {
        let config = SimulationConfig::default();
        // 4.0 s at 10 ticks/s
        assert_eq!(config.cooldown_ticks(), 40);

        let config = SimulationConfig {
            reproduce_cooldown_secs: 0.25,
            tick_rate: 10.0,
            ..Default::default()
        };
        assert_eq!(config.cooldown_ticks(), 3); // rounds up
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = SimulationConfig {
            plant_spawn_rate: 1.5,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::SpawnRateOutOfRange(1.5))
        );

        let config = SimulationConfig {
            tick_rate: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveTickRate(_))
        ));

        let config = SimulationConfig {
            reproduce_cooldown_secs: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        // Control layers send partial updates; missing fields keep defaults.
        let config: SimulationConfig =
            serde_json::from_str(r#"{"plant_spawn_rate": 0.5, "max_herbivores": 10}"#).unwrap();
        assert_eq!(config.plant_spawn_rate, 0.5);
        assert_eq!(config.max_herbivores, 10);
        assert_eq!(config.herb_reproduce_threshold, 8.0);
    }
}
