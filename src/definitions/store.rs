//! Read-only catalog built from definition records.
//!
//! Loading runs in two passes. The first registers every record in dependency
//! order (skills and slots, then items, then action targets) and rejects
//! duplicate ids. The second resolves every cross reference. Any failure aborts
//! the load; the engine never sees a partially valid catalog.

use super::types::*;
use crate::core::error::DefinitionError;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct DefinitionStore {
    skills: HashMap<String, Skill>,
    slots: HashMap<String, Slot>,
    items: HashMap<String, Item>,
    action_targets: HashMap<String, ActionTarget>,
}

impl DefinitionStore {
    pub fn from_json_str(json: &str) -> Result<Self, DefinitionError> {
        let definitions: Vec<Definition> = serde_json::from_str(json)?;
        Self::load(definitions)
    }

    pub fn from_file(path: &Path) -> Result<Self, DefinitionError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn load(definitions: Vec<Definition>) -> Result<Self, DefinitionError> {
        let mut skills = Vec::new();
        let mut slots = Vec::new();
        let mut items = Vec::new();
        let mut targets = Vec::new();
        for definition in definitions {
            match definition {
                Definition::Skill(s) => skills.push(s),
                Definition::Slot(s) => slots.push(s),
                Definition::Item(i) => items.push(i),
                Definition::ActionTarget(a) => targets.push(a),
            }
        }

        let mut store = Self::default();

        // Pass 1: register
        for skill in skills {
            insert_unique(&mut store.skills, skill.id.clone(), skill)?;
        }
        for slot in slots {
            insert_unique(&mut store.slots, slot.id.clone(), slot)?;
        }
        let mut item_records = Vec::with_capacity(items.len());
        for record in items {
            let item = Item {
                id: record.id.clone(),
                sort: record.sort,
                category: record.item_type,
                chest: None,
                equipment: None,
            };
            insert_unique(&mut store.items, record.id.clone(), item)?;
            item_records.push(record);
        }
        let mut seen_targets = HashMap::new();
        for record in &targets {
            insert_unique(&mut seen_targets, record.id.clone(), ())?;
        }

        // Pass 2: resolve
        for record in item_records {
            let (chest, equipment) = store.resolve_item(&record)?;
            if let Some(item) = store.items.get_mut(&record.id) {
                item.chest = chest;
                item.equipment = equipment;
            }
        }
        for record in targets {
            let target = store.resolve_action_target(record)?;
            store.action_targets.insert(target.id.clone(), target);
        }

        tracing::info!(
            skills = store.skills.len(),
            slots = store.slots.len(),
            items = store.items.len(),
            action_targets = store.action_targets.len(),
            "definitions loaded"
        );
        Ok(store)
    }

    fn resolve_item(
        &self,
        record: &ItemRecord,
    ) -> Result<(Option<ChestDefinition>, Option<EquipmentDefinition>), DefinitionError> {
        match record.item_type {
            ItemCategory::Resource => Ok((None, None)),
            ItemCategory::Chest => {
                let max_points = record.max_points.unwrap_or(0.0);
                if !(max_points > 0.0) || !max_points.is_finite() {
                    return Err(DefinitionError::InvalidChest {
                        chest_id: record.id.clone(),
                        reason: format!("maxPoints must be positive, got {max_points}"),
                    });
                }
                let loot_table = record.loots.clone().unwrap_or_default();
                for entry in &loot_table {
                    self.validate_loot_entry(&record.id, entry)?;
                }
                let chest = ChestDefinition {
                    id: record.id.clone(),
                    max_points,
                    loot_table,
                };
                Ok((Some(chest), None))
            }
            ItemCategory::Equipment => {
                let slot_id = record.slot.clone().unwrap_or_default();
                if !self.slots.contains_key(&slot_id) {
                    return Err(DefinitionError::UnknownSlot {
                        referenced_by: record.id.clone(),
                        id: slot_id,
                    });
                }
                let equipment = EquipmentDefinition {
                    slot_id,
                    effects: record.effects.clone().unwrap_or_default(),
                };
                Ok((None, Some(equipment)))
            }
        }
    }

    fn validate_loot_entry(
        &self,
        chest_id: &str,
        entry: &LootEntry,
    ) -> Result<(), DefinitionError> {
        self.require_item(chest_id, &entry.item_id)?;
        if !(0.0..=1.0).contains(&entry.chance) {
            return Err(DefinitionError::InvalidLootEntry {
                chest_id: chest_id.to_string(),
                reason: format!("chance {} for {} outside [0, 1]", entry.chance, entry.item_id),
            });
        }
        if entry.min > entry.max {
            return Err(DefinitionError::InvalidLootEntry {
                chest_id: chest_id.to_string(),
                reason: format!("min {} > max {} for {}", entry.min, entry.max, entry.item_id),
            });
        }
        Ok(())
    }

    fn resolve_action_target(
        &self,
        record: ActionTargetRecord,
    ) -> Result<ActionTarget, DefinitionError> {
        let invalid = |reason: String| DefinitionError::InvalidActionTarget {
            id: record.id.clone(),
            reason,
        };

        if !self.skills.contains_key(&record.skill) {
            return Err(DefinitionError::UnknownSkill {
                referenced_by: record.id.clone(),
                id: record.skill.clone(),
            });
        }
        let chest = self.require_item(&record.id, &record.chest)?;
        if chest.category != ItemCategory::Chest {
            return Err(DefinitionError::NotAChest {
                referenced_by: record.id.clone(),
                id: record.chest.clone(),
            });
        }
        if !(record.duration >= 0.0) || !record.duration.is_finite() {
            return Err(invalid(format!("duration {} must be >= 0", record.duration)));
        }
        if !(record.xp >= 0.0) || !(record.chest_points >= 0.0) {
            return Err(invalid("xp and chestPoints must be >= 0".to_string()));
        }

        let ingredients = record.ingredients.clone().unwrap_or_default();
        if record.target_type == ActionKind::GatheringZone && !ingredients.is_empty() {
            return Err(invalid("gathering zones cannot have ingredients".to_string()));
        }
        for stack in ingredients.iter().chain(record.products.iter()) {
            self.require_item(&record.id, &stack.item_id)?;
            if stack.count == 0 {
                return Err(invalid(format!("zero count for {}", stack.item_id)));
            }
        }

        Ok(ActionTarget {
            id: record.id,
            kind: record.target_type,
            skill_id: record.skill,
            tab: record.tab,
            min_level: record.min_level,
            sort: record.sort,
            base_duration: record.duration,
            base_xp: record.xp,
            chest_id: record.chest,
            base_chest_points: record.chest_points,
            ingredients,
            products: record.products,
        })
    }

    fn require_item(&self, referenced_by: &str, item_id: &str) -> Result<&Item, DefinitionError> {
        self.items
            .get(item_id)
            .ok_or_else(|| DefinitionError::UnknownItem {
                referenced_by: referenced_by.to_string(),
                id: item_id.to_string(),
            })
    }

    // ── Lookups ─────────────────────────────────────────────────

    pub fn skill(&self, id: &str) -> Option<&Skill> {
        self.skills.get(id)
    }

    pub fn slot(&self, id: &str) -> Option<&Slot> {
        self.slots.get(id)
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn chest(&self, id: &str) -> Option<&ChestDefinition> {
        self.items.get(id).and_then(|item| item.chest.as_ref())
    }

    pub fn action_target(&self, id: &str) -> Option<&ActionTarget> {
        self.action_targets.get(id)
    }

    pub fn skills(&self) -> Vec<&Skill> {
        sorted_by(self.skills.values(), |s| (s.sort, s.id.as_str()))
    }

    pub fn slots(&self) -> Vec<&Slot> {
        sorted_by(self.slots.values(), |s| (s.sort, s.id.as_str()))
    }

    pub fn items(&self) -> Vec<&Item> {
        sorted_by(self.items.values(), |i| (i.sort, i.id.as_str()))
    }

    pub fn chests(&self) -> Vec<&ChestDefinition> {
        self.items()
            .into_iter()
            .filter_map(|item| item.chest.as_ref())
            .collect()
    }

    pub fn action_targets_for_skill(&self, skill_id: &str) -> Vec<&ActionTarget> {
        sorted_by(
            self.action_targets.values().filter(|t| t.skill_id == skill_id),
            |t| (t.sort, t.id.as_str()),
        )
    }
}

fn insert_unique<V>(
    map: &mut HashMap<String, V>,
    id: String,
    value: V,
) -> Result<(), DefinitionError> {
    if map.contains_key(&id) {
        return Err(DefinitionError::DuplicateId(id));
    }
    map.insert(id, value);
    Ok(())
}

fn sorted_by<'a, T, K: Ord>(
    values: impl Iterator<Item = &'a T>,
    key: impl Fn(&'a T) -> K,
) -> Vec<&'a T> {
    let mut list: Vec<&T> = values.collect();
    list.sort_by_key(|v| key(*v));
    list
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT: &str = r#"[
        {"type": "actionTarget", "targetType": "recipe", "id": "plank", "skill": "crafting",
         "minLevel": 2, "sort": 1, "duration": 2000, "xp": 8, "chest": "wood_chest", "chestPoints": 3,
         "ingredients": [{"item": "log", "count": 2}], "products": [{"item": "planks", "count": 1}]},
        {"type": "item", "itemType": "chest", "id": "wood_chest", "sort": 9, "maxPoints": 100,
         "loots": [{"item": "log", "chance": 0.5, "min": 1, "max": 3}]},
        {"type": "item", "itemType": "resource", "id": "log", "sort": 1},
        {"type": "item", "itemType": "resource", "id": "planks", "sort": 2},
        {"type": "item", "itemType": "equipment", "id": "axe", "sort": 3, "slot": "tool",
         "effects": [{"property": "woodcutting.speed", "type": "inversePercentage", "value": 0.1}]},
        {"type": "skill", "id": "woodcutting", "sort": 1},
        {"type": "skill", "id": "crafting", "sort": 2},
        {"type": "slot", "id": "tool", "sort": 1},
        {"type": "actionTarget", "targetType": "gatheringZone", "id": "forest", "skill": "woodcutting",
         "sort": 1, "duration": 3000, "xp": 10, "chest": "wood_chest", "chestPoints": 5,
         "products": [{"item": "log", "count": 1}]}
    ]"#;

    fn load_with(extra: &str) -> Result<DefinitionStore, DefinitionError> {
        let json = CONTENT.trim_end().trim_end_matches(']').to_string() + "," + extra + "]";
        DefinitionStore::from_json_str(&json)
    }

    #[test]
    fn test_loads_regardless_of_record_order() {
        let store = DefinitionStore::from_json_str(CONTENT).unwrap();
        let plank = store.action_target("plank").unwrap();
        assert!(plank.is_recipe());
        assert_eq!(plank.min_level, 2);
        assert_eq!(plank.ingredients, vec![ItemStack::new("log", 2)]);
        assert_eq!(store.chest("wood_chest").unwrap().max_points, 100.0);
        assert_eq!(
            store.item("axe").unwrap().equipment.as_ref().unwrap().slot_id,
            "tool"
        );
    }

    #[test]
    fn test_sorted_queries() {
        let store = DefinitionStore::from_json_str(CONTENT).unwrap();
        let skill_ids: Vec<&str> = store.skills().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(skill_ids, vec!["woodcutting", "crafting"]);
        assert_eq!(store.action_targets_for_skill("woodcutting").len(), 1);
        assert_eq!(store.chests().len(), 1);
        assert!(store.chest("log").is_none());
    }

    #[test]
    fn test_unknown_skill_is_fatal() {
        let err = load_with(
            r#"{"type": "actionTarget", "targetType": "gatheringZone", "id": "mine", "skill": "mining",
                "duration": 1000, "xp": 1, "chest": "wood_chest"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DefinitionError::UnknownSkill { .. }));
    }

    #[test]
    fn test_unknown_product_is_fatal() {
        let err = load_with(
            r#"{"type": "actionTarget", "targetType": "gatheringZone", "id": "grove", "skill": "woodcutting",
                "duration": 1000, "xp": 1, "chest": "wood_chest", "products": [{"item": "gold", "count": 1}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DefinitionError::UnknownItem { ref id, .. } if id == "gold"));
    }

    #[test]
    fn test_chest_reference_must_be_chest() {
        let err = load_with(
            r#"{"type": "actionTarget", "targetType": "gatheringZone", "id": "grove", "skill": "woodcutting",
                "duration": 1000, "xp": 1, "chest": "log"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DefinitionError::NotAChest { .. }));
    }

    #[test]
    fn test_gathering_zone_with_ingredients_is_fatal() {
        let err = load_with(
            r#"{"type": "actionTarget", "targetType": "gatheringZone", "id": "grove", "skill": "woodcutting",
                "duration": 1000, "xp": 1, "chest": "wood_chest", "ingredients": [{"item": "log", "count": 1}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DefinitionError::InvalidActionTarget { .. }));
    }

    #[test]
    fn test_duplicate_id_is_fatal() {
        let err = load_with(r#"{"type": "skill", "id": "crafting"}"#).unwrap_err();
        assert!(matches!(err, DefinitionError::DuplicateId(ref id) if id == "crafting"));
    }

    #[test]
    fn test_invalid_loot_entries() {
        let err = load_with(
            r#"{"type": "item", "itemType": "chest", "id": "bad", "maxPoints": 10,
                "loots": [{"item": "log", "chance": 1.5, "min": 1, "max": 1}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DefinitionError::InvalidLootEntry { .. }));

        let err = load_with(
            r#"{"type": "item", "itemType": "chest", "id": "bad", "maxPoints": 10,
                "loots": [{"item": "log", "chance": 0.5, "min": 4, "max": 2}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DefinitionError::InvalidLootEntry { .. }));
    }

    #[test]
    fn test_chest_needs_positive_max_points() {
        let err = load_with(r#"{"type": "item", "itemType": "chest", "id": "bad", "maxPoints": 0}"#)
            .unwrap_err();
        assert!(matches!(err, DefinitionError::InvalidChest { .. }));
    }

    #[test]
    fn test_equipment_unknown_slot_is_fatal() {
        let err = load_with(
            r#"{"type": "item", "itemType": "equipment", "id": "hat", "slot": "head", "effects": []}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DefinitionError::UnknownSlot { .. }));
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(matches!(
            DefinitionStore::from_json_str("[{\"type\": \"skill\"}]"),
            Err(DefinitionError::Json(_))
        ));
    }
}
