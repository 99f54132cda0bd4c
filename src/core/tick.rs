//! Events and results produced by the simulation.
//!
//! The engine never calls back into its host. Everything that happens during a
//! tick is recorded as a [`TickEvent`] in a [`TickResult`], and the host renders
//! or logs those after the tick has returned. Nothing can re-enter the
//! scheduler mid-iteration this way.

use serde::{Deserialize, Serialize};

/// A single notification produced while the engine advances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TickEvent {
    // ── Progression ─────────────────────────────────────────────
    /// A skill reached a new level. One event per XP award, however many levels it crossed.
    LevelUp { skill_id: String, new_level: u32 },

    // ── Queue maintenance ───────────────────────────────────────
    /// The current entry was dropped because its skill level is below the requirement.
    LevelTooLow {
        action_id: String,
        required: u32,
        current: u32,
    },

    /// The current entry was dropped because its ingredients ran out.
    InsufficientMaterials { action_id: String },

    // ── Completions ─────────────────────────────────────────────
    /// A batch of repeats of the current action completed.
    ActionCompleted { action_id: String, count: u64 },

    /// A queue entry finished its requested amount and left the queue.
    QueueEntryFinished { action_id: String },

    /// Chest points crossed one or more thresholds.
    ChestsEarned { chest_id: String, count: u64 },

    /// Chests were opened and produced these item grants.
    LootGranted {
        chest_id: String,
        openings: u64,
        grants: Vec<(String, u64)>,
    },
}

/// Result of advancing the engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickResult {
    /// Events produced during this tick, in chronological order.
    pub events: Vec<TickEvent>,

    /// Simulated milliseconds actually consumed (less than the budget if the queue emptied).
    pub consumed_ms: f64,

    /// Total action completions across all batches.
    pub completions: u64,
}

impl TickResult {
    pub fn level_ups(&self) -> impl Iterator<Item = &TickEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e, TickEvent::LevelUp { .. }))
    }
}
