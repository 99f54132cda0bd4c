// Tick and timing
pub const TICK_INTERVAL_MS: u64 = 100;
pub const MAX_CATCH_UP_MS: f64 = 7.0 * 24.0 * 60.0 * 60.0 * 1000.0;
pub const MAX_INSTANT_COMPLETIONS: u64 = 10_000;

// XP and leveling
pub const XP_CURVE_BASE: f64 = 100.0;
pub const XP_CURVE_EXPONENT: f64 = 1.5;
pub const DEFAULT_MAX_LEVEL: u32 = 99;

// Over-level speed-up: inverse-percentage bonus per level above an action's minimum
pub const OVER_LEVEL_SPEED_UP_PER_LEVEL: f64 = 0.01;
pub const OVER_LEVEL_SPEED_UP_CAP: f64 = 1.0;
pub const OVER_LEVEL_SOURCE_ID: &str = "overLevel";

// Modifier channels shared by every skill
pub const GLOBAL_ACTION_SPEED: &str = "global.actionSpeed";
pub const GLOBAL_XP_GAIN: &str = "global.xpGain";
pub const GLOBAL_CHEST_POINTS: &str = "global.chestPoints";

// Equipment modifier sources are namespaced per slot
pub const EQUIPMENT_SOURCE_PREFIX: &str = "equipment:";
