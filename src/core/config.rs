//! Engine configuration.

use super::constants::*;
use super::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for the simulation engine.
///
/// Every field has a default, so a TOML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct EngineConfig {
    /// Nominal timer cadence the host drives `tick` at
    pub tick_interval_ms: u64,

    /// Inverse-percentage duration bonus granted per level above an action's minimum
    pub over_level_speed_up_per_level: f64,

    /// Upper bound on the over-level bonus (None = uncapped)
    pub over_level_speed_up_cap: Option<f64>,

    /// Longest wall-clock gap processed by a single catch-up
    pub max_catch_up_ms: f64,

    /// Completions allowed per step when the effective duration is zero
    pub max_instant_completions: u64,

    /// Open earned chests immediately instead of granting chest items
    pub auto_open_chests: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            over_level_speed_up_per_level: OVER_LEVEL_SPEED_UP_PER_LEVEL,
            over_level_speed_up_cap: Some(OVER_LEVEL_SPEED_UP_CAP),
            max_catch_up_ms: MAX_CATCH_UP_MS,
            max_instant_completions: MAX_INSTANT_COMPLETIONS,
            auto_open_chests: false,
        }
    }
}

impl EngineConfig {
    /// Parses a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// The over-level inverse-percentage bonus for a skill level against a minimum.
    pub fn over_level_bonus(&self, level: u32, min_level: u32) -> f64 {
        let levels_over = level.saturating_sub(min_level) as f64;
        let bonus = (levels_over * self.over_level_speed_up_per_level).max(0.0);
        match self.over_level_speed_up_cap {
            Some(cap) => bonus.min(cap.max(0.0)),
            None => bonus,
        }
    }
}
