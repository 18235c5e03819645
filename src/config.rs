//! Board configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::consts::{DEFAULT_SPAWN_HEIGHT, DEFAULT_SPAWN_WIDTH};
use crate::tile::SpawnArea;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a positive number, got {value}")]
    NotPositive { var: &'static str, value: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardConfig {
    /// Region new tiles are randomly placed in.
    pub spawn: SpawnArea,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self { spawn: SpawnArea { width: DEFAULT_SPAWN_WIDTH, height: DEFAULT_SPAWN_HEIGHT } }
    }
}

impl BoardConfig {
    /// Build typed board config from environment variables.
    ///
    /// Optional:
    /// - `TILEBOARD_SPAWN_WIDTH`: default 800
    /// - `TILEBOARD_SPAWN_HEIGHT`: default 600
    ///
    /// Unparseable values fall back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a spawn dimension is not a positive finite
    /// number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let width = env_parse_f64("TILEBOARD_SPAWN_WIDTH", DEFAULT_SPAWN_WIDTH);
        let height = env_parse_f64("TILEBOARD_SPAWN_HEIGHT", DEFAULT_SPAWN_HEIGHT);

        require_positive("TILEBOARD_SPAWN_WIDTH", width)?;
        require_positive("TILEBOARD_SPAWN_HEIGHT", height)?;

        Ok(Self { spawn: SpawnArea { width, height } })
    }
}

fn env_parse_f64(key: &str, default: f64) -> f64 {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse::<f64>().unwrap_or(default),
        Err(_) => default,
    }
}

fn require_positive(var: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { var, value })
    }
}
