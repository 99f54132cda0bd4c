//! Simulation configuration.

use crate::core::amount::Amount;
use crate::core::config::EngineConfig;
use crate::core::constants::TICK_INTERVAL_MS;
use crate::core::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One queued action in a simulated plan. A missing amount repeats forever.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanStep {
    pub action: String,
    #[serde(default)]
    pub amount: Option<u64>,
}

impl PlanStep {
    pub fn new(action: impl Into<String>, amount: Option<u64>) -> Self {
        Self {
            action: action.into(),
            amount,
        }
    }

    pub fn amount(&self) -> Amount {
        match self.amount {
            Some(n) => Amount::Finite(n),
            None => Amount::Unbounded,
        }
    }
}

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of simulation runs to perform
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Simulated play time per run
    pub hours: f64,

    /// Step size when ticking incrementally
    pub tick_interval_ms: u64,

    /// Resolve the whole run as one catch-up instead of timer-sized ticks
    pub single_jump: bool,

    /// Definition file the simulated engine loads
    pub definitions: PathBuf,

    /// Queue contents at the start of each run, in order
    pub plan: Vec<PlanStep>,

    /// Items every run starts with
    pub starting_items: Vec<(String, u64)>,

    pub engine: EngineConfig,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: None,
            hours: 8.0,
            tick_interval_ms: TICK_INTERVAL_MS,
            single_jump: false,
            definitions: PathBuf::from("data/definitions.json"),
            plan: Vec::new(),
            starting_items: Vec::new(),
            engine: EngineConfig::default(),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn total_ms(&self) -> f64 {
        (self.hours * 3_600_000.0).max(0.0)
    }
}
