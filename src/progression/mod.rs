//! Skill experience and level derivation.

pub mod level_table;
pub mod skills;

pub use level_table::LevelTable;
pub use skills::Progression;
