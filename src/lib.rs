//! Idlecraft - idle-game simulation engine
//!
//! Time-driven action scheduling with fast-forward catch-up, a modifier engine
//! for every derived number, skill progression, an inventory ledger and
//! chest-point loot. The host owns an [`Engine`] and drives it with elapsed time.

pub mod build_info;
pub mod core;
pub mod definitions;
pub mod engine;
pub mod equipment;
pub mod inventory;
pub mod loot;
pub mod modifiers;
pub mod progression;
pub mod scheduler;
pub mod simulator;

pub use crate::core::{
    Amount, DefinitionError, EngineConfig, EngineError, InventoryError, Result, TickEvent,
    TickResult,
};
pub use definitions::DefinitionStore;
pub use engine::{CatchUpReport, Engine};
pub use modifiers::{Modifier, ModifierEngine, ModifierKind};
