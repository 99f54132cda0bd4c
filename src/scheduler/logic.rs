//! The scheduler tick: advances the current action through elapsed time.
//!
//! A tick resolves the head of the queue repeatedly until the time budget is spent
//! or the queue is empty. Each resolution either drops an invalid entry (without
//! spending time), accumulates partial progress, or completes a batch of repeats
//! in one step. Cost is proportional to the number of batches, not to elapsed time,
//! so multi-hour catch-ups are cheap.

use super::queue::{ActionQueue, QueueItem};
use super::valuation::EffectiveAction;
use crate::core::amount::Amount;
use crate::core::config::EngineConfig;
use crate::core::tick::{TickEvent, TickResult};
use crate::definitions::{ActionTarget, DefinitionStore};
use crate::inventory::Inventory;
use crate::loot::{open_chests, ChestPoints};
use crate::modifiers::ModifierEngine;
use crate::progression::Progression;
use rand::Rng;

/// Components a tick reads and writes, borrowed for the duration of one call.
pub struct TickContext<'a> {
    pub definitions: &'a DefinitionStore,
    pub config: &'a EngineConfig,
    pub modifiers: &'a ModifierEngine,
    pub progression: &'a mut Progression,
    pub inventory: &'a mut Inventory,
    pub chest_points: &'a mut ChestPoints,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    queue: ActionQueue,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue(&self) -> &ActionQueue {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut ActionQueue {
        &mut self.queue
    }

    pub fn enqueue(&mut self, action_id: impl Into<String>, amount: Amount) {
        self.queue.enqueue(QueueItem::new(action_id, amount));
    }

    /// Progress of the current cycle in `[0, 1]`. A zero-length cycle counts as complete.
    pub fn progress_fraction(&self, effective_duration: f64) -> f64 {
        if self.queue.is_empty() {
            return 0.0;
        }
        if effective_duration <= 0.0 {
            return 1.0;
        }
        (self.queue.progress_ms() / effective_duration).clamp(0.0, 1.0)
    }

    pub fn tick(
        &mut self,
        elapsed_ms: f64,
        ctx: &mut TickContext<'_>,
        rng: &mut impl Rng,
    ) -> TickResult {
        let mut result = TickResult::default();
        if !(elapsed_ms > 0.0) {
            return result;
        }
        let definitions = ctx.definitions;
        let mut budget = elapsed_ms;

        while budget > 0.0 {
            let Some(current) = self.queue.current().cloned() else {
                break;
            };
            let Some(target) = definitions.action_target(&current.action_id) else {
                tracing::error!(
                    action_id = current.action_id.as_str(),
                    "queued action has no definition"
                );
                self.queue.pop_current();
                continue;
            };

            // Validate: level gate, then material availability. Neither spends time.
            let level = ctx.progression.level(&target.skill_id);
            if level < target.min_level {
                tracing::warn!(
                    action_id = target.id.as_str(),
                    required = target.min_level,
                    current = level,
                    "level too low, dropping queue entry"
                );
                result.events.push(TickEvent::LevelTooLow {
                    action_id: target.id.clone(),
                    required: target.min_level,
                    current: level,
                });
                self.queue.pop_current();
                continue;
            }

            let max_repeats = max_repeats(target, ctx.inventory);
            if max_repeats == Some(0) {
                tracing::warn!(
                    action_id = target.id.as_str(),
                    "insufficient materials, dropping queue entry"
                );
                result.events.push(TickEvent::InsufficientMaterials {
                    action_id: target.id.clone(),
                });
                self.queue.pop_current();
                continue;
            }

            let effective = EffectiveAction::resolve(target, level, ctx.modifiers, ctx.config);
            let remaining_cycle = (effective.duration - self.queue.progress_ms()).max(0.0);

            if budget < remaining_cycle {
                self.queue.add_progress(budget);
                result.consumed_ms += budget;
                break;
            }

            let remaining_xp = ctx.progression.remaining_xp_for_next_level(&target.skill_id);
            let batch = BatchLimits {
                amount: current.amount,
                max_repeats,
                budget,
                remaining_cycle,
                remaining_xp,
                instant_cap: ctx.config.max_instant_completions,
            };
            let count = batch.count(&effective);

            apply_completions(target, &effective, count, ctx, rng, &mut result);

            let consumed = remaining_cycle + effective.duration * (count - 1) as f64;
            tracing::debug!(
                action_id = target.id.as_str(),
                count,
                consumed_ms = consumed,
                "completed batch"
            );
            if self.queue.complete_current(count) {
                result.events.push(TickEvent::QueueEntryFinished {
                    action_id: target.id.clone(),
                });
            } else if consumed <= 0.0 && batch.hit_instant_cap(&effective, count) {
                // Zero-length cycles with nothing else bounding them: resume next tick
                result.consumed_ms += budget;
                break;
            }

            budget -= consumed;
            result.consumed_ms += consumed;
        }

        result
    }
}

/// Repeats the inventory can pay for (None = no ingredients, unbounded).
pub fn max_repeats(target: &ActionTarget, inventory: &Inventory) -> Option<u64> {
    target
        .ingredients
        .iter()
        .map(|stack| inventory.get(&stack.item_id) / stack.count.max(1))
        .min()
}

/// Everything that bounds the size of one completion batch.
struct BatchLimits {
    amount: Amount,
    max_repeats: Option<u64>,
    budget: f64,
    remaining_cycle: f64,
    remaining_xp: f64,
    instant_cap: u64,
}

impl BatchLimits {
    /// `min(amount, max_repeats, repeats that fit in the budget, repeats until next level)`,
    /// at least 1.
    ///
    /// The level clamp stops a batch at the level boundary, since duration shrinks
    /// at the next level and the rest of the batch would otherwise run at the old speed.
    fn count(&self, effective: &EffectiveAction) -> u64 {
        let mut count = u64::MAX;
        if let Some(n) = self.amount.limit() {
            count = count.min(n);
        }
        if let Some(n) = self.max_repeats {
            count = count.min(n);
        }
        if effective.duration > 0.0 {
            let extra = ((self.budget - self.remaining_cycle) / effective.duration).floor();
            count = count.min(1u64.saturating_add(extra.max(0.0) as u64));
        } else {
            count = count.min(self.instant_cap.max(1));
        }
        if effective.xp > 0.0 && self.remaining_xp.is_finite() {
            let until_level = (self.remaining_xp / effective.xp).ceil().max(1.0) as u64;
            count = count.min(until_level);
        }
        count.max(1)
    }

    fn hit_instant_cap(&self, effective: &EffectiveAction, count: u64) -> bool {
        effective.duration <= 0.0 && count >= self.instant_cap.max(1)
    }
}

fn apply_completions(
    target: &ActionTarget,
    effective: &EffectiveAction,
    count: u64,
    ctx: &mut TickContext<'_>,
    rng: &mut impl Rng,
    result: &mut TickResult,
) {
    let definitions = ctx.definitions;
    let consumed: Vec<(&str, u64)> = target
        .ingredients
        .iter()
        .map(|stack| (stack.item_id.as_str(), stack.count.saturating_mul(count)))
        .collect();
    if let Err(e) = ctx.inventory.remove_many(consumed) {
        tracing::error!(
            action_id = target.id.as_str(),
            error = %e,
            "ingredient consumption exceeded holdings"
        );
    }

    result.events.push(TickEvent::ActionCompleted {
        action_id: target.id.clone(),
        count,
    });
    result.completions += count;

    if let Some(level_up) = ctx.progression.add_xp(&target.skill_id, effective.xp * count as f64) {
        result.events.push(level_up);
    }

    let chests = match definitions.chest(&target.chest_id) {
        Some(chest) => ctx
            .chest_points
            .add_points(chest, effective.chest_points * count as f64),
        None => 0,
    };

    ctx.inventory.add_many(
        target
            .products
            .iter()
            .map(|stack| (stack.item_id.as_str(), stack.count.saturating_mul(count))),
    );

    if chests > 0 {
        result.events.push(TickEvent::ChestsEarned {
            chest_id: target.chest_id.clone(),
            count: chests,
        });
        match definitions.chest(&target.chest_id) {
            Some(chest) if ctx.config.auto_open_chests => {
                let grants = open_chests(chest, chests, rng);
                ctx.inventory
                    .add_many(grants.iter().map(|(id, qty)| (id.as_str(), *qty)));
                result.events.push(TickEvent::LootGranted {
                    chest_id: chest.id.clone(),
                    openings: chests,
                    grants,
                });
            }
            _ => ctx.inventory.add(&target.chest_id, chests),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::LevelTable;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const CONTENT: &str = r#"[
        {"type": "skill", "id": "woodcutting"},
        {"type": "skill", "id": "crafting"},
        {"type": "item", "itemType": "resource", "id": "log"},
        {"type": "item", "itemType": "resource", "id": "plank"},
        {"type": "item", "itemType": "chest", "id": "wood_chest", "maxPoints": 100,
         "loots": [{"item": "log", "chance": 1.0, "min": 2, "max": 2}]},
        {"type": "actionTarget", "targetType": "gatheringZone", "id": "forest", "skill": "woodcutting",
         "duration": 1000, "xp": 10, "chest": "wood_chest", "chestPoints": 30,
         "products": [{"item": "log", "count": 1}]},
        {"type": "actionTarget", "targetType": "recipe", "id": "saw", "skill": "crafting",
         "duration": 500, "xp": 5, "chest": "wood_chest",
         "ingredients": [{"item": "log", "count": 3}], "products": [{"item": "plank", "count": 1}]},
        {"type": "actionTarget", "targetType": "gatheringZone", "id": "ancient_grove", "skill": "woodcutting",
         "minLevel": 5, "duration": 1000, "xp": 10, "chest": "wood_chest"}
    ]"#;

    struct Fixture {
        store: DefinitionStore,
        config: EngineConfig,
        modifiers: ModifierEngine,
        progression: Progression,
        inventory: Inventory,
        chest_points: ChestPoints,
        scheduler: Scheduler,
        rng: ChaCha8Rng,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                store: DefinitionStore::from_json_str(CONTENT).unwrap(),
                config: EngineConfig::default(),
                modifiers: ModifierEngine::new(),
                progression: Progression::new(LevelTable::new(vec![0.0, 1e9]).unwrap()),
                inventory: Inventory::new(),
                chest_points: ChestPoints::new(),
                scheduler: Scheduler::new(),
                rng: ChaCha8Rng::seed_from_u64(42),
            }
        }

        fn tick(&mut self, elapsed_ms: f64) -> TickResult {
            let mut ctx = TickContext {
                definitions: &self.store,
                config: &self.config,
                modifiers: &self.modifiers,
                progression: &mut self.progression,
                inventory: &mut self.inventory,
                chest_points: &mut self.chest_points,
            };
            self.scheduler.tick(elapsed_ms, &mut ctx, &mut self.rng)
        }
    }

    #[test]
    fn test_partial_progress_without_completion() {
        let mut f = Fixture::new();
        f.scheduler.enqueue("forest", Amount::Finite(5));
        let result = f.tick(400.0);
        assert!(result.events.is_empty());
        assert_eq!(f.scheduler.queue().progress_ms(), 400.0);
        let result = f.tick(700.0);
        assert_eq!(result.completions, 1);
        assert_eq!(f.scheduler.queue().progress_ms(), 100.0);
    }

    #[test]
    fn test_catch_up_batches_completions() {
        let mut f = Fixture::new();
        f.scheduler.enqueue("forest", Amount::Finite(5));
        let result = f.tick(4500.0);
        assert_eq!(result.completions, 4);
        assert_eq!(f.inventory.get("log"), 4);
        assert_eq!(f.progression.xp("woodcutting"), 40.0);
        assert_eq!(f.scheduler.queue().current().unwrap().amount, Amount::Finite(1));
        assert_eq!(f.scheduler.queue().progress_ms(), 500.0);
    }

    #[test]
    fn test_chest_points_grant_chest_items() {
        let mut f = Fixture::new();
        f.scheduler.enqueue("forest", Amount::Finite(4));
        let result = f.tick(4000.0);
        // 4 * 30 = 120 points => one chest, 20 left over
        assert!(result.events.contains(&TickEvent::ChestsEarned {
            chest_id: "wood_chest".to_string(),
            count: 1
        }));
        assert_eq!(f.inventory.get("wood_chest"), 1);
        assert_eq!(f.chest_points.points("wood_chest"), 20.0);
    }

    #[test]
    fn test_auto_open_chests() {
        let mut f = Fixture::new();
        f.config.auto_open_chests = true;
        f.scheduler.enqueue("forest", Amount::Finite(10));
        f.tick(10_000.0);
        // 300 points => 3 openings of 2 logs each, plus 10 gathered
        assert_eq!(f.inventory.get("wood_chest"), 0);
        assert_eq!(f.inventory.get("log"), 16);
    }

    #[test]
    fn test_exhausted_entry_promotes_next_with_leftover_time() {
        let mut f = Fixture::new();
        f.scheduler.enqueue("forest", Amount::Finite(2));
        f.scheduler.enqueue("saw", Amount::Finite(1));
        let result = f.tick(2600.0);
        // 2 logs chopped, then saw needs 3 logs: dropped without spending time
        assert!(result.events.contains(&TickEvent::QueueEntryFinished {
            action_id: "forest".to_string()
        }));
        assert!(result.events.contains(&TickEvent::InsufficientMaterials {
            action_id: "saw".to_string()
        }));
        assert!(f.scheduler.queue().is_empty());
        assert_eq!(result.consumed_ms, 2000.0);
    }

    #[test]
    fn test_level_gate_drops_entry_without_spending_time() {
        let mut f = Fixture::new();
        f.scheduler.enqueue("ancient_grove", Amount::Unbounded);
        f.scheduler.enqueue("forest", Amount::Finite(1));
        let result = f.tick(1000.0);
        assert_eq!(
            result.events[0],
            TickEvent::LevelTooLow {
                action_id: "ancient_grove".to_string(),
                required: 5,
                current: 0
            }
        );
        assert_eq!(result.completions, 1);
    }

    #[test]
    fn test_ingredient_clamp() {
        let mut f = Fixture::new();
        f.inventory.add("log", 10);
        f.scheduler.enqueue("saw", Amount::Unbounded);
        let result = f.tick(1e9);
        assert_eq!(result.completions, 3);
        assert_eq!(f.inventory.get("plank"), 3);
        assert_eq!(f.inventory.get("log"), 1);
        assert!(result.events.contains(&TickEvent::InsufficientMaterials {
            action_id: "saw".to_string()
        }));
        assert!(f.scheduler.queue().is_empty());
    }

    #[test]
    fn test_empty_queue_and_zero_elapsed() {
        let mut f = Fixture::new();
        assert_eq!(f.tick(1000.0), TickResult::default());
        f.scheduler.enqueue("forest", Amount::Finite(1));
        assert_eq!(f.tick(0.0), TickResult::default());
        assert_eq!(f.scheduler.queue().progress_ms(), 0.0);
    }

    #[test]
    fn test_zero_duration_is_bounded() {
        let mut f = Fixture::new();
        f.modifiers
            .add_modifier("woodcutting.speed", crate::modifiers::Modifier::flat("glitch", -1000.0));
        f.config.max_instant_completions = 50;
        f.scheduler.enqueue("forest", Amount::Unbounded);
        let result = f.tick(100.0);
        assert_eq!(result.completions, 50);
        assert_eq!(f.scheduler.progress_fraction(0.0), 1.0);
    }

    #[test]
    fn test_progress_fraction() {
        let mut f = Fixture::new();
        assert_eq!(f.scheduler.progress_fraction(1000.0), 0.0);
        f.scheduler.enqueue("forest", Amount::Finite(1));
        f.tick(250.0);
        assert!((f.scheduler.progress_fraction(1000.0) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_max_repeats_without_ingredients_is_unbounded() {
        let f = Fixture::new();
        let forest = f.store.action_target("forest").unwrap();
        assert_eq!(max_repeats(forest, &f.inventory), None);
    }
}
