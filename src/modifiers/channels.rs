//! Channel naming. Global channels are constants, skill channels are `{skill}.{stat}`.

pub use crate::core::constants::{GLOBAL_ACTION_SPEED, GLOBAL_CHEST_POINTS, GLOBAL_XP_GAIN};

pub fn skill_speed(skill_id: &str) -> String {
    format!("{skill_id}.speed")
}

pub fn skill_xp(skill_id: &str) -> String {
    format!("{skill_id}.xp")
}

pub fn skill_chest_points(skill_id: &str) -> String {
    format!("{skill_id}.chestPoints")
}

/// Modifier source id for whatever is equipped in a slot.
pub fn equipment_source(slot_id: &str) -> String {
    format!("{}{slot_id}", crate::core::constants::EQUIPMENT_SOURCE_PREFIX)
}
