//! Effective duration, XP and chest points of an action target at the current skill level.

use crate::core::config::EngineConfig;
use crate::core::constants::{
    GLOBAL_ACTION_SPEED, GLOBAL_CHEST_POINTS, GLOBAL_XP_GAIN, OVER_LEVEL_SOURCE_ID,
};
use crate::definitions::ActionTarget;
use crate::modifiers::channels::{skill_chest_points, skill_speed, skill_xp};
use crate::modifiers::{Modifier, ModifierEngine};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveAction {
    /// Milliseconds per repeat, never negative
    pub duration: f64,
    pub xp: f64,
    pub chest_points: f64,
}

impl EffectiveAction {
    pub fn resolve(
        target: &ActionTarget,
        skill_level: u32,
        modifiers: &ModifierEngine,
        config: &EngineConfig,
    ) -> Self {
        let skill = target.skill_id.as_str();
        let over_level = Modifier::inverse_percentage(
            OVER_LEVEL_SOURCE_ID,
            config.over_level_bonus(skill_level, target.min_level),
        );

        let speed = skill_speed(skill);
        let duration = modifiers.resolve_channels(
            &[GLOBAL_ACTION_SPEED, speed.as_str()],
            target.base_duration,
            &[over_level],
        );

        let xp_channel = skill_xp(skill);
        let xp = modifiers.resolve_channels(
            &[GLOBAL_XP_GAIN, xp_channel.as_str()],
            target.base_xp,
            &[],
        );

        let chest_channel = skill_chest_points(skill);
        let chest_points = modifiers.resolve_channels(
            &[GLOBAL_CHEST_POINTS, chest_channel.as_str()],
            target.base_chest_points,
            &[],
        );

        Self {
            duration: duration.max(0.0),
            xp: xp.max(0.0),
            chest_points: chest_points.max(0.0),
        }
    }
}
