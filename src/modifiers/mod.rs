//! Modifier composition for every derived number (durations, XP, chest points).

pub mod channels;
pub mod engine;
pub mod types;

pub use engine::ModifierEngine;
pub use types::{Modifier, ModifierKind, ModifierSummary, ModifierTotals};
