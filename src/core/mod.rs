//! Shared engine types: constants, configuration, errors, amounts and events.

pub mod amount;
pub mod config;
pub mod constants;
pub mod error;
pub mod tick;

pub use amount::Amount;
pub use config::EngineConfig;
pub use error::{DefinitionError, EngineError, InventoryError, Result};
pub use tick::{TickEvent, TickResult};
