//! Cumulative XP thresholds indexed by level.

use crate::core::constants::{XP_CURVE_BASE, XP_CURVE_EXPONENT};
use crate::core::error::DefinitionError;

/// `thresholds[i]` is the total XP needed to be level `i`. `thresholds[0] == 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelTable {
    thresholds: Vec<f64>,
}

impl LevelTable {
    /// Builds a table, rejecting ones that don't start at zero or aren't strictly increasing.
    pub fn new(thresholds: Vec<f64>) -> Result<Self, DefinitionError> {
        if let Some(first) = thresholds.first() {
            if *first != 0.0 {
                return Err(DefinitionError::InvalidLevelTable(format!(
                    "first threshold must be 0, got {first}"
                )));
            }
        }
        if let Some(i) = thresholds.windows(2).position(|w| !(w[1] > w[0])) {
            return Err(DefinitionError::InvalidLevelTable(format!(
                "threshold {} ({}) does not exceed threshold {} ({})",
                i + 1,
                thresholds[i + 1],
                i,
                thresholds[i]
            )));
        }
        Ok(Self { thresholds })
    }

    /// Curve table: reaching level `l` from `l - 1` costs `XP_CURVE_BASE * l^XP_CURVE_EXPONENT`.
    pub fn from_curve(max_level: u32) -> Self {
        let mut thresholds = Vec::with_capacity(max_level as usize + 1);
        thresholds.push(0.0);
        let mut total = 0.0;
        for level in 1..=max_level {
            total += (XP_CURVE_BASE * f64::powf(level as f64, XP_CURVE_EXPONENT)).floor();
            thresholds.push(total);
        }
        Self { thresholds }
    }

    pub fn max_level(&self) -> u32 {
        self.thresholds.len().saturating_sub(1) as u32
    }

    pub fn threshold(&self, level: u32) -> Option<f64> {
        self.thresholds.get(level as usize).copied()
    }

    /// Greatest level whose threshold does not exceed `xp`. Binary search.
    pub fn level_for(&self, xp: f64) -> u32 {
        let reached = self.thresholds.partition_point(|&t| t <= xp);
        reached.saturating_sub(1) as u32
    }

    /// XP still needed for the next level, or infinity at the last level.
    pub fn remaining_for_next(&self, xp: f64) -> f64 {
        let level = self.level_for(xp);
        match self.threshold(level + 1) {
            Some(next) => (next - xp).max(0.0),
            None => f64::INFINITY,
        }
    }

    /// 0 at the start of a level, approaching 1 before the next. 1 at max level.
    pub fn progress_fraction(&self, xp: f64) -> f64 {
        let level = self.level_for(xp);
        let start = self.threshold(level).unwrap_or(0.0);
        match self.threshold(level + 1) {
            Some(next) => ((xp - start) / (next - start)).clamp(0.0, 1.0),
            None => 1.0,
        }
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self::from_curve(crate::core::constants::DEFAULT_MAX_LEVEL)
    }
}
