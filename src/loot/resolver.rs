//! Turns chest openings into item grants.

use crate::definitions::ChestDefinition;
use rand::Rng;

/// Opens `openings` chests independently.
///
/// Every loot entry is rolled on every opening: a roll below `chance` grants
/// `min..=max` of that item. Returned grants are summed per item, in loot-table
/// order, and never include zero quantities.
pub fn open_chests(
    chest: &ChestDefinition,
    openings: u64,
    rng: &mut impl Rng,
) -> Vec<(String, u64)> {
    let mut totals = vec![0u64; chest.loot_table.len()];

    for _ in 0..openings {
        for (total, entry) in totals.iter_mut().zip(&chest.loot_table) {
            if roll_entry(entry.chance, rng) {
                *total += rng.gen_range(entry.min..=entry.max);
            }
        }
    }

    chest
        .loot_table
        .iter()
        .zip(totals)
        .filter(|(_, total)| *total > 0)
        .map(|(entry, total)| (entry.item_id.clone(), total))
        .collect()
}

/// `[0, 1)` sample against the chance: 0.0 never hits, 1.0 always does.
fn roll_entry(chance: f64, rng: &mut impl Rng) -> bool {
    rng.gen::<f64>() < chance
}
