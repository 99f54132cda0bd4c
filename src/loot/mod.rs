//! Chest points and loot resolution.

pub mod chest_points;
pub mod resolver;

pub use chest_points::ChestPoints;
pub use resolver::open_chests;
