//! Headless balance simulator.
//!
//! Runs seeded playthroughs of an action plan to analyze:
//! - Level reached per skill after N hours
//! - Items and chests produced
//! - Time lost to an exhausted or invalid queue
//!
//! Every run drives a real `Engine`, so results match what a host would see.

mod config;
mod report;
mod runner;

pub use config::{PlanStep, SimConfig};
pub use report::{RunStats, SimReport};
pub use runner::run_simulation;
