//! The engine facade: owns every component and exposes the host-facing operations.
//!
//! All state lives in an [`Engine`] value. The host drives it with [`Engine::tick`]
//! (one timer interval) or [`Engine::catch_up`] (a wall-clock gap, e.g. after the
//! app was closed). Both return the events produced, in order.

use crate::core::amount::Amount;
use crate::core::config::EngineConfig;
use crate::core::error::{DefinitionError, EngineError, Result};
use crate::core::tick::{TickEvent, TickResult};
use crate::definitions::{ActionTarget, DefinitionStore};
use crate::equipment::Equipment;
use crate::inventory::Inventory;
use crate::loot::{open_chests, ChestPoints};
use crate::modifiers::{ModifierEngine, ModifierSummary};
use crate::progression::{LevelTable, Progression};
use crate::scheduler::{ActionQueue, EffectiveAction, QueueItem, Scheduler, TickContext};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Outcome of a wall-clock catch-up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatchUpReport {
    /// Real gap since the previous tick timestamp
    pub elapsed_ms: f64,
    /// Gap actually simulated after applying `max_catch_up_ms`
    pub capped_ms: f64,
    pub completions: u64,
    pub level_ups: usize,
    pub events: Vec<TickEvent>,
}

pub struct Engine {
    definitions: Arc<DefinitionStore>,
    config: EngineConfig,
    modifiers: ModifierEngine,
    progression: Progression,
    inventory: Inventory,
    chest_points: ChestPoints,
    equipment: Equipment,
    scheduler: Scheduler,
    last_tick: Option<DateTime<Utc>>,
}

impl Engine {
    pub fn new(definitions: Arc<DefinitionStore>) -> Self {
        Self::with_config(definitions, EngineConfig::default())
    }

    pub fn with_config(definitions: Arc<DefinitionStore>, config: EngineConfig) -> Self {
        Self {
            definitions,
            config,
            modifiers: ModifierEngine::new(),
            progression: Progression::new(LevelTable::default()),
            inventory: Inventory::new(),
            chest_points: ChestPoints::new(),
            equipment: Equipment::new(),
            scheduler: Scheduler::new(),
            last_tick: None,
        }
    }

    /// Replaces the level table. Existing experience is kept and re-evaluated.
    pub fn with_level_table(mut self, table: LevelTable) -> Self {
        let mut progression = Progression::new(table);
        for skill in self.definitions.skills() {
            let xp = self.progression.xp(&skill.id);
            if xp > 0.0 {
                progression.add_xp(&skill.id, xp);
            }
        }
        self.progression = progression;
        self
    }

    // ── Component access ──

    pub fn definitions(&self) -> &DefinitionStore {
        &self.definitions
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn modifiers(&self) -> &ModifierEngine {
        &self.modifiers
    }

    pub fn modifiers_mut(&mut self) -> &mut ModifierEngine {
        &mut self.modifiers
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn progression_mut(&mut self) -> &mut Progression {
        &mut self.progression
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn chest_points(&self) -> &ChestPoints {
        &self.chest_points
    }

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    pub fn queue(&self) -> &ActionQueue {
        self.scheduler.queue()
    }

    pub fn last_tick(&self) -> Option<DateTime<Utc>> {
        self.last_tick
    }

    /// Sets the timestamp the next catch-up measures from.
    pub fn set_last_tick(&mut self, at: DateTime<Utc>) {
        self.last_tick = Some(at);
    }

    // ── Queue ──

    fn validate_entry(&self, action_id: &str, amount: Amount) -> Result<()> {
        if self.definitions.action_target(action_id).is_none() {
            return Err(EngineError::UnknownActionTarget(action_id.to_string()));
        }
        if amount == Amount::Finite(0) {
            return Err(EngineError::ZeroAmount);
        }
        Ok(())
    }

    /// Appends an action to the queue. Level and materials are checked when it becomes current.
    pub fn enqueue(&mut self, action_id: &str, amount: Amount) -> Result<()> {
        self.validate_entry(action_id, amount)?;
        self.scheduler.enqueue(action_id, amount);
        Ok(())
    }

    /// Interrupts the current action, discarding its partial progress.
    pub fn start_immediately(&mut self, action_id: &str, amount: Amount) -> Result<()> {
        self.validate_entry(action_id, amount)?;
        self.scheduler
            .queue_mut()
            .start_immediately(QueueItem::new(action_id, amount));
        Ok(())
    }

    pub fn remove_at(&mut self, index: usize) -> Result<QueueItem> {
        self.scheduler.queue_mut().remove_at(index)
    }

    pub fn move_up(&mut self, index: usize) -> Result<()> {
        self.scheduler.queue_mut().move_up(index)
    }

    pub fn move_down(&mut self, index: usize) -> Result<()> {
        self.scheduler.queue_mut().move_down(index)
    }

    pub fn move_to_top(&mut self, index: usize) -> Result<()> {
        self.scheduler.queue_mut().move_to_top(index)
    }

    pub fn move_to_bottom(&mut self, index: usize) -> Result<()> {
        self.scheduler.queue_mut().move_to_bottom(index)
    }

    pub fn queue_snapshot(&self) -> Vec<(String, Amount)> {
        self.queue()
            .entries()
            .iter()
            .map(|item| (item.action_id.clone(), item.amount))
            .collect()
    }

    pub fn current_action(&self) -> Option<&ActionTarget> {
        let current = self.queue().current()?;
        self.definitions.action_target(&current.action_id)
    }

    /// Duration, XP and chest points of the current action at the current level.
    pub fn current_effective(&self) -> Option<EffectiveAction> {
        let target = self.current_action()?;
        let level = self.progression.level(&target.skill_id);
        Some(EffectiveAction::resolve(target, level, &self.modifiers, &self.config))
    }

    /// Progress of the current cycle in `[0, 1]`; 0 when idle.
    pub fn progress_fraction(&self) -> f64 {
        match self.current_effective() {
            Some(effective) => self.scheduler.progress_fraction(effective.duration),
            None => 0.0,
        }
    }

    // ── Time ──

    /// Advances the simulation by `elapsed_ms`.
    ///
    /// A recorded tick timestamp moves forward by the same amount, so a later
    /// [`Engine::catch_up`] only covers time this call did not.
    pub fn tick(&mut self, elapsed_ms: f64, rng: &mut impl Rng) -> TickResult {
        if elapsed_ms > 0.0 && elapsed_ms.is_finite() {
            let step = Duration::microseconds((elapsed_ms * 1000.0).round() as i64);
            self.last_tick = self.last_tick.map(|at| at + step);
        }
        self.advance(elapsed_ms, rng)
    }

    fn advance(&mut self, elapsed_ms: f64, rng: &mut impl Rng) -> TickResult {
        let mut ctx = TickContext {
            definitions: &self.definitions,
            config: &self.config,
            modifiers: &self.modifiers,
            progression: &mut self.progression,
            inventory: &mut self.inventory,
            chest_points: &mut self.chest_points,
        };
        self.scheduler.tick(elapsed_ms, &mut ctx, rng)
    }

    /// Simulates the wall-clock gap since the last recorded tick, capped by `max_catch_up_ms`.
    ///
    /// The first call only records `now`. A clock that moved backwards simulates nothing.
    pub fn catch_up(&mut self, now: DateTime<Utc>, rng: &mut impl Rng) -> CatchUpReport {
        let Some(last) = self.last_tick.replace(now) else {
            return CatchUpReport::default();
        };

        let elapsed_ms = ((now - last).num_milliseconds() as f64).max(0.0);
        let capped_ms = elapsed_ms.min(self.config.max_catch_up_ms.max(0.0));
        if capped_ms < elapsed_ms {
            tracing::info!(elapsed_ms, capped_ms, "catch-up gap exceeds cap, truncating");
        }

        let result = self.advance(capped_ms, rng);
        let level_ups = result.level_ups().count();
        tracing::info!(
            capped_ms,
            completions = result.completions,
            level_ups,
            "catch-up finished"
        );
        CatchUpReport {
            elapsed_ms,
            capped_ms,
            completions: result.completions,
            level_ups,
            events: result.events,
        }
    }

    // ── Chests ──

    /// Opens `count` held chests of `chest_id` and adds their loot to the inventory.
    pub fn open_chests(
        &mut self,
        chest_id: &str,
        count: u64,
        rng: &mut impl Rng,
    ) -> Result<Vec<(String, u64)>> {
        let chest = self.definitions.chest(chest_id).ok_or_else(|| DefinitionError::NotAChest {
            referenced_by: "open_chests".to_string(),
            id: chest_id.to_string(),
        })?;
        if count == 0 {
            return Ok(Vec::new());
        }
        let held = self.inventory.get(chest_id);
        if held < count {
            return Err(EngineError::NotEnoughChests {
                chest_id: chest_id.to_string(),
                requested: count,
                held,
            });
        }

        self.inventory.remove(chest_id, count)?;
        let grants = open_chests(chest, count, rng);
        self.inventory
            .add_many(grants.iter().map(|(item_id, n)| (item_id.as_str(), *n)));
        tracing::debug!(chest_id, count, kinds = grants.len(), "opened chests");
        Ok(grants)
    }

    pub fn chest_points_for(&self, chest_id: &str) -> f64 {
        self.chest_points.points(chest_id)
    }

    pub fn chest_points_remaining(&self, chest_id: &str) -> Option<f64> {
        let chest = self.definitions.chest(chest_id)?;
        Some(self.chest_points.remaining(chest))
    }

    pub fn chest_progress(&self, chest_id: &str) -> Option<f64> {
        let chest = self.definitions.chest(chest_id)?;
        Some(self.chest_points.progress(chest))
    }

    // ── Equipment ──

    pub fn equip(&mut self, item_id: &str) -> Result<()> {
        self.equipment
            .equip(item_id, &self.definitions, &mut self.inventory, &mut self.modifiers)
    }

    pub fn unequip(&mut self, slot_id: &str) -> Option<String> {
        self.equipment
            .unequip(slot_id, &mut self.inventory, &mut self.modifiers)
    }

    // ── Queries ──

    pub fn skill_level(&self, skill_id: &str) -> u32 {
        self.progression.level(skill_id)
    }

    pub fn skill_xp(&self, skill_id: &str) -> f64 {
        self.progression.xp(skill_id)
    }

    pub fn skill_progress(&self, skill_id: &str) -> f64 {
        self.progression.progress_fraction(skill_id)
    }

    pub fn item_count(&self, item_id: &str) -> u64 {
        self.inventory.get(item_id)
    }

    pub fn modifier_summary(&self, channel: &str) -> ModifierSummary {
        self.modifiers.summary(channel)
    }
}
