//! Integration tests for chest points, chest crossing and loot rolls.
//!
//! Uses seeded ChaCha8Rng for deterministic behavior.

use idlecraft::loot::{open_chests, ChestPoints};
use idlecraft::{Amount, DefinitionStore, Engine, EngineConfig, TickEvent};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

const CONTENT: &str = r#"[
    {"type": "skill", "id": "mining"},
    {"type": "item", "itemType": "resource", "id": "ore"},
    {"type": "item", "itemType": "resource", "id": "gem"},
    {"type": "item", "itemType": "resource", "id": "dust"},
    {"type": "item", "itemType": "resource", "id": "coin"},
    {"type": "item", "itemType": "chest", "id": "sure_chest", "maxPoints": 100,
     "loots": [{"item": "gem", "chance": 1.0, "min": 1, "max": 1},
               {"item": "dust", "chance": 0.0, "min": 1, "max": 1}]},
    {"type": "item", "itemType": "chest", "id": "coin_chest", "maxPoints": 50,
     "loots": [{"item": "coin", "chance": 0.5, "min": 2, "max": 4}]},
    {"type": "actionTarget", "targetType": "gatheringZone", "id": "quarry", "skill": "mining",
     "duration": 1000, "xp": 0, "chest": "sure_chest", "chestPoints": 40,
     "products": [{"item": "ore", "count": 1}]}
]"#;

fn test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}

fn store() -> DefinitionStore {
    DefinitionStore::from_json_str(CONTENT).unwrap()
}

#[test]
fn test_certain_and_impossible_entries() {
    let store = store();
    let chest = store.chest("sure_chest").unwrap();
    let mut rng = test_rng();
    for _ in 0..200 {
        assert_eq!(open_chests(chest, 1, &mut rng), vec![("gem".to_string(), 1)]);
    }
}

#[test]
fn test_many_openings_are_independent_rolls() {
    let store = store();
    let chest = store.chest("coin_chest").unwrap();
    let grants = open_chests(chest, 10_000, &mut test_rng());
    assert_eq!(grants.len(), 1);
    let coins = grants[0].1;
    // ~5000 hits averaging 3 coins each
    assert!(coins > 13_500 && coins < 16_500, "got {coins}");
}

#[test]
fn test_single_opening_stays_within_range() {
    let store = store();
    let chest = store.chest("coin_chest").unwrap();
    let mut rng = test_rng();
    let mut seen = std::collections::BTreeSet::new();
    for _ in 0..500 {
        if let Some((_, n)) = open_chests(chest, 1, &mut rng).first() {
            assert!((2..=4).contains(n));
            seen.insert(*n);
        }
    }
    assert_eq!(seen.into_iter().collect::<Vec<_>>(), vec![2, 3, 4]);
}

#[test]
fn test_zero_openings_grant_nothing() {
    let store = store();
    let chest = store.chest("coin_chest").unwrap();
    assert!(open_chests(chest, 0, &mut test_rng()).is_empty());
}

#[test]
fn test_overflow_grants_whole_chests() {
    let store = store();
    let chest = store.chest("sure_chest").unwrap();
    let mut points = ChestPoints::new();
    assert_eq!(points.add_points(chest, 250.0), 2);
    assert_eq!(points.points("sure_chest"), 50.0);

    let mut points = ChestPoints::new();
    assert_eq!(points.add_points(chest, 80.0), 0);
    assert_eq!(points.add_points(chest, 250.0), 3);
    assert_eq!(points.points("sure_chest"), 30.0);
    assert_eq!(points.remaining(chest), 70.0);
}

#[test]
fn test_tick_grants_chest_items_by_default() {
    let mut engine = Engine::new(Arc::new(store()));
    engine.enqueue("quarry", Amount::Finite(6)).unwrap();

    let result = engine.tick(6000.0, &mut test_rng());

    // 6 × 40 = 240 points: 2 chests, 40 left over
    assert!(result.events.contains(&TickEvent::ChestsEarned {
        chest_id: "sure_chest".to_string(),
        count: 2
    }));
    assert_eq!(engine.item_count("sure_chest"), 2);
    assert_eq!(engine.chest_points_for("sure_chest"), 40.0);
    assert_eq!(engine.item_count("gem"), 0);

    let grants = engine.open_chests("sure_chest", 2, &mut test_rng()).unwrap();
    assert_eq!(grants, vec![("gem".to_string(), 2)]);
    assert_eq!(engine.item_count("sure_chest"), 0);
    assert_eq!(engine.item_count("gem"), 2);
}

#[test]
fn test_auto_open_rolls_each_crossed_chest() {
    let config = EngineConfig {
        auto_open_chests: true,
        ..EngineConfig::default()
    };
    let mut engine = Engine::with_config(Arc::new(store()), config);
    engine.enqueue("quarry", Amount::Finite(10)).unwrap();

    let result = engine.tick(10_000.0, &mut test_rng());

    assert!(result.events.contains(&TickEvent::LootGranted {
        chest_id: "sure_chest".to_string(),
        openings: 4,
        grants: vec![("gem".to_string(), 4)],
    }));
    assert_eq!(engine.item_count("sure_chest"), 0);
    assert_eq!(engine.item_count("gem"), 4);
    assert_eq!(engine.item_count("dust"), 0);
    assert_eq!(engine.item_count("ore"), 10);
}
