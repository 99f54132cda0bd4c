//! Simulation runner driving a real [`Engine`] per run.
//!
//! Statistics are tracked externally from tick events, so simulated runs
//! exercise exactly the code path a host application uses.

use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::core::error::Result;
use crate::core::tick::{TickEvent, TickResult};
use crate::definitions::DefinitionStore;
use crate::engine::Engine;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig, definitions: &DefinitionStore) -> Result<SimReport> {
    let definitions = Arc::new(definitions.clone());
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let stats = simulate_single_run(config, Arc::clone(&definitions), &mut rng)?;
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - {} completions, {} level ups, levels {:?}",
                run_idx + 1,
                config.num_runs,
                stats.completions,
                stats.level_ups,
                stats.final_levels
            );
        }
        all_runs.push(stats);
    }

    Ok(SimReport::from_runs(all_runs, config.hours))
}

fn simulate_single_run(
    config: &SimConfig,
    definitions: Arc<DefinitionStore>,
    rng: &mut ChaCha8Rng,
) -> Result<RunStats> {
    let mut engine = Engine::with_config(definitions, config.engine.clone());
    for (item_id, count) in &config.starting_items {
        engine.inventory_mut().add(item_id, *count);
    }
    for step in &config.plan {
        engine.enqueue(&step.action, step.amount())?;
    }

    let mut stats = RunStats::default();
    let total_ms = config.total_ms();

    if config.single_jump {
        let result = engine.tick(total_ms, rng);
        record(&mut stats, &result, total_ms);
    } else {
        let step = config.tick_interval_ms.max(1) as f64;
        let mut elapsed = 0.0;
        while elapsed < total_ms {
            if engine.queue().is_empty() {
                stats.idle_ms += total_ms - elapsed;
                break;
            }
            let dt = step.min(total_ms - elapsed);
            let result = engine.tick(dt, rng);
            record(&mut stats, &result, dt);
            elapsed += dt;
        }
    }

    for skill in engine.definitions().skills() {
        stats
            .final_levels
            .insert(skill.id.clone(), engine.skill_level(&skill.id));
    }
    for (item_id, count) in engine.inventory().entries() {
        stats.final_inventory.insert(item_id.to_string(), count);
    }
    Ok(stats)
}

fn record(stats: &mut RunStats, result: &TickResult, elapsed_ms: f64) {
    stats.completions += result.completions;
    stats.idle_ms += (elapsed_ms - result.consumed_ms).max(0.0);
    for event in &result.events {
        match event {
            TickEvent::LevelUp { .. } => stats.level_ups += 1,
            TickEvent::LevelTooLow { .. } | TickEvent::InsufficientMaterials { .. } => {
                stats.dropped_entries += 1
            }
            TickEvent::ChestsEarned { chest_id, count } => {
                *stats.chests_earned.entry(chest_id.clone()).or_insert(0) += count;
            }
            _ => {}
        }
    }
}
