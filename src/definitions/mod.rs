//! Definition catalog: typed records and the read-only store built from them.

pub mod store;
pub mod types;

pub use store::DefinitionStore;
pub use types::*;
