//! Inventory ledger.

pub mod ledger;

pub use ledger::Inventory;
