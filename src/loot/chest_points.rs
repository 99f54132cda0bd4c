//! Per-chest point accumulators.

use crate::definitions::ChestDefinition;
use std::collections::HashMap;

/// Holds `0 <= points < max_points` for every chest that has earned points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChestPoints {
    points: HashMap<String, f64>,
}

impl ChestPoints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self, chest_id: &str) -> f64 {
        self.points.get(chest_id).copied().unwrap_or(0.0)
    }

    /// Overwrites a chest's accumulator, clamped to be non-negative.
    pub fn set_points(&mut self, chest_id: &str, points: f64) {
        self.points.insert(chest_id.to_string(), points.max(0.0));
    }

    /// Adds points and returns how many whole chests the total crossed. The remainder is kept.
    pub fn add_points(&mut self, chest: &ChestDefinition, points: f64) -> u64 {
        if !(points > 0.0) || !(chest.max_points > 0.0) {
            return 0;
        }
        let total = self.points(&chest.id) + points;
        let count = (total / chest.max_points).floor();
        let remainder = (total - count * chest.max_points).clamp(0.0, chest.max_points);
        // Float error can leave the remainder a hair under a full chest
        let (count, remainder) = if remainder >= chest.max_points {
            (count + 1.0, 0.0)
        } else {
            (count, remainder)
        };
        self.points.insert(chest.id.clone(), remainder);
        count as u64
    }

    pub fn remaining(&self, chest: &ChestDefinition) -> f64 {
        (chest.max_points - self.points(&chest.id)).max(0.0)
    }

    pub fn progress(&self, chest: &ChestDefinition) -> f64 {
        if chest.max_points > 0.0 {
            self.points(&chest.id) / chest.max_points
        } else {
            0.0
        }
    }
}
