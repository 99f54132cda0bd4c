//! Worn equipment. Each occupied slot contributes its item's effects as modifiers.

use crate::core::error::{DefinitionError, EngineError, InventoryError, Result};
use crate::definitions::DefinitionStore;
use crate::inventory::Inventory;
use crate::modifiers::channels::equipment_source;
use crate::modifiers::ModifierEngine;
use std::collections::HashMap;

/// Slot id -> equipped item id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Equipment {
    slots: HashMap<String, String>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn equipped(&self, slot_id: &str) -> Option<&str> {
        self.slots.get(slot_id).map(String::as_str)
    }

    /// Moves one `item_id` from the inventory into its slot, swapping out whatever was there.
    pub fn equip(
        &mut self,
        item_id: &str,
        definitions: &DefinitionStore,
        inventory: &mut Inventory,
        modifiers: &mut ModifierEngine,
    ) -> Result<()> {
        let equipment = definitions
            .item(item_id)
            .and_then(|item| item.equipment.as_ref())
            .ok_or_else(|| DefinitionError::NotEquipment(item_id.to_string()))?;
        if !inventory.has(item_id, 1) {
            return Err(EngineError::Inventory(InventoryError::InsufficientQuantity {
                item_id: item_id.to_string(),
                requested: 1,
                available: 0,
            }));
        }

        let slot_id = &equipment.slot_id;
        self.unequip(slot_id, inventory, modifiers);
        inventory.remove(item_id, 1)?;

        let source = equipment_source(slot_id);
        for effect in &equipment.effects {
            modifiers.add_modifier(&effect.channel, effect.to_modifier(&source));
        }
        self.slots.insert(slot_id.clone(), item_id.to_string());
        tracing::debug!(item_id, slot_id = slot_id.as_str(), "equipped");
        Ok(())
    }

    /// Empties a slot, returning its item to the inventory. Returns the item id, if any.
    pub fn unequip(
        &mut self,
        slot_id: &str,
        inventory: &mut Inventory,
        modifiers: &mut ModifierEngine,
    ) -> Option<String> {
        let item_id = self.slots.remove(slot_id)?;
        modifiers.remove_all_from_source(&equipment_source(slot_id));
        inventory.add(&item_id, 1);
        Some(item_id)
    }
}
