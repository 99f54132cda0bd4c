//! Per-skill experience ledger. Levels are always derived from XP on read.

use super::level_table::LevelTable;
use crate::core::tick::TickEvent;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct Progression {
    table: LevelTable,
    experience: HashMap<String, f64>,
}

impl Progression {
    pub fn new(table: LevelTable) -> Self {
        Self {
            table,
            experience: HashMap::new(),
        }
    }

    pub fn table(&self) -> &LevelTable {
        &self.table
    }

    pub fn xp(&self, skill_id: &str) -> f64 {
        self.experience.get(skill_id).copied().unwrap_or(0.0)
    }

    /// Adds XP and reports a level-up if the level increased.
    ///
    /// Crossing several levels in one award still yields a single event.
    pub fn add_xp(&mut self, skill_id: &str, amount: f64) -> Option<TickEvent> {
        if !(amount > 0.0) {
            if amount < 0.0 || amount.is_nan() {
                tracing::warn!(skill_id, amount, "ignoring non-positive XP award");
            }
            return None;
        }

        let before = self.xp(skill_id);
        let level_before = self.table.level_for(before);
        let after = before + amount;
        self.experience.insert(skill_id.to_string(), after);
        let level_after = self.table.level_for(after);

        if level_after > level_before {
            tracing::info!(skill_id, new_level = level_after, "level up");
            Some(TickEvent::LevelUp {
                skill_id: skill_id.to_string(),
                new_level: level_after,
            })
        } else {
            None
        }
    }

    /// Explicitly resets a skill's experience to zero.
    pub fn reset(&mut self, skill_id: &str) {
        self.experience.remove(skill_id);
    }

    pub fn level(&self, skill_id: &str) -> u32 {
        self.table.level_for(self.xp(skill_id))
    }

    pub fn remaining_xp_for_next_level(&self, skill_id: &str) -> f64 {
        self.table.remaining_for_next(self.xp(skill_id))
    }

    pub fn progress_fraction(&self, skill_id: &str) -> f64 {
        self.table.progress_fraction(self.xp(skill_id))
    }
}
