//! Static game content: skills, slots, items and action targets.
//!
//! Records deserialize straight from the content files. Kind-specific fields are
//! optional on the shared record and checked when the store resolves references.

use crate::modifiers::{Modifier, ModifierKind};
use serde::{Deserialize, Serialize};

/// One record from a content file, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Definition {
    Skill(Skill),
    Slot(Slot),
    Item(ItemRecord),
    ActionTarget(ActionTargetRecord),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    #[serde(default)]
    pub sort: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub id: String,
    #[serde(default)]
    pub sort: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemCategory {
    Resource,
    Chest,
    Equipment,
}

/// `{item, count}` pair used for ingredients and products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    #[serde(rename = "item")]
    pub item_id: String,
    pub count: u64,
}

impl ItemStack {
    pub fn new(item_id: impl Into<String>, count: u64) -> Self {
        Self {
            item_id: item_id.into(),
            count,
        }
    }
}

/// One independent roll in a chest's loot table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootEntry {
    #[serde(rename = "item")]
    pub item_id: String,
    pub chance: f64,
    pub min: u64,
    pub max: u64,
}

/// A modifier an equipment item contributes while worn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    #[serde(rename = "property")]
    pub channel: String,
    #[serde(rename = "type")]
    pub kind: ModifierKind,
    pub value: f64,
}

impl Effect {
    pub fn to_modifier(&self, source_id: &str) -> Modifier {
        Modifier::new(source_id, self.kind, self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub item_type: ItemCategory,
    pub id: String,
    #[serde(default)]
    pub sort: i32,
    pub max_points: Option<f64>,
    pub loots: Option<Vec<LootEntry>>,
    pub slot: Option<String>,
    pub effects: Option<Vec<Effect>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    GatheringZone,
    Recipe,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionTargetRecord {
    pub target_type: ActionKind,
    pub id: String,
    pub skill: String,
    pub tab: Option<String>,
    #[serde(default)]
    pub min_level: u32,
    #[serde(default)]
    pub sort: i32,
    pub duration: f64,
    pub xp: f64,
    pub chest: String,
    #[serde(default)]
    pub chest_points: f64,
    pub ingredients: Option<Vec<ItemStack>>,
    #[serde(default)]
    pub products: Vec<ItemStack>,
}

// ── Resolved catalog entries ────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ChestDefinition {
    pub id: String,
    pub max_points: f64,
    pub loot_table: Vec<LootEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentDefinition {
    pub slot_id: String,
    pub effects: Vec<Effect>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: String,
    pub sort: i32,
    pub category: ItemCategory,
    pub chest: Option<ChestDefinition>,
    pub equipment: Option<EquipmentDefinition>,
}

/// A repeatable gather or craft activity. Duration, XP and chest points are base values.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionTarget {
    pub id: String,
    pub kind: ActionKind,
    pub skill_id: String,
    pub tab: Option<String>,
    pub min_level: u32,
    pub sort: i32,
    pub base_duration: f64,
    pub base_xp: f64,
    pub chest_id: String,
    pub base_chest_points: f64,
    /// Always empty for gathering zones
    pub ingredients: Vec<ItemStack>,
    pub products: Vec<ItemStack>,
}

impl ActionTarget {
    pub fn is_recipe(&self) -> bool {
        self.kind == ActionKind::Recipe
    }
}
