//! Simulation configuration (RON).
//!
//! Per-entity tuning lives in components (`AgentConfig`, `Attributes`) with
//! their own `Default`; this resource only carries the world-wide knobs and
//! the defaults new combatants are spawned with.
//!
//! ```ron
//! (
//!     seed: 7,
//!     fixed_hz: 60.0,
//!     agent: (combat_radius: 600.0, attack_radius: 150.0),
//! )
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::ai::AgentConfig;
use crate::components::Attributes;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed для `DeterministicRng`
    pub seed: u64,
    /// Частота FixedUpdate (Hz)
    pub fixed_hz: f64,
    /// Default tuning for spawned agents.
    pub agent: AgentConfig,
    /// Default attributes for the spawned player.
    pub player_attributes: Attributes,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            fixed_hz: 60.0,
            agent: AgentConfig::default(),
            player_attributes: Attributes::default(),
        }
    }
}

impl SimulationConfig {
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    /// Отсекает значения, с которыми симуляция не имеет смысла.
    ///
    /// Перевёрнутые min/max диапазоны здесь не ошибка: они нормализуются
    /// при сэмплировании.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fixed_hz.is_finite() && self.fixed_hz > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "fixed_hz must be positive, got {}",
                self.fixed_hz
            )));
        }

        let agent = &self.agent;
        let radii = [
            ("combat_radius", agent.combat_radius),
            ("attack_radius", agent.attack_radius),
            ("sensing_radius", agent.sensing_radius),
            ("patrol_radius", agent.patrol_radius),
        ];
        for (name, value) in radii {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "agent.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        let durations = [
            ("patrol_wait_min", agent.patrol_wait_min),
            ("patrol_wait_max", agent.patrol_wait_max),
            ("attack_min", agent.attack_min),
            ("attack_max", agent.attack_max),
        ];
        for (name, value) in durations {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "agent.{} must be a finite non-negative duration, got {}",
                    name, value
                )));
            }
        }
        if agent.attack_radius > agent.combat_radius {
            return Err(ConfigError::Invalid(format!(
                "agent.attack_radius ({}) exceeds agent.combat_radius ({})",
                agent.attack_radius, agent.combat_radius
            )));
        }

        let player = &self.player_attributes;
        if player.max_health <= 0.0 || player.max_stamina < 0.0 {
            return Err(ConfigError::Invalid(
                "player_attributes need max_health > 0 and max_stamina >= 0".into(),
            ));
        }

        Ok(())
    }
}
