//! Item quantity ledger.

use crate::core::error::InventoryError;
use std::collections::HashMap;

/// Per-item quantities. A quantity of zero is never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    items: HashMap<String, u64>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, item_id: &str) -> u64 {
        self.items.get(item_id).copied().unwrap_or(0)
    }

    pub fn has(&self, item_id: &str, amount: u64) -> bool {
        self.get(item_id) >= amount
    }

    pub fn add(&mut self, item_id: &str, amount: u64) {
        if amount == 0 {
            return;
        }
        let entry = self.items.entry(item_id.to_string()).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Removes up to `amount`. Asking for more than is held deletes the entry and returns an error.
    pub fn remove(&mut self, item_id: &str, amount: u64) -> Result<(), InventoryError> {
        if amount == 0 {
            return Ok(());
        }
        let available = self.get(item_id);
        if available > amount {
            self.items.insert(item_id.to_string(), available - amount);
            return Ok(());
        }

        self.items.remove(item_id);
        if available < amount {
            tracing::error!(
                item_id,
                requested = amount,
                available,
                "inventory removal exceeds holdings, clamped to zero"
            );
            return Err(InventoryError::InsufficientQuantity {
                item_id: item_id.to_string(),
                requested: amount,
                available,
            });
        }
        Ok(())
    }

    pub fn add_many<'a>(&mut self, items: impl IntoIterator<Item = (&'a str, u64)>) {
        for (item_id, amount) in items {
            self.add(item_id, amount);
        }
    }

    /// Applies every removal, returning the first shortfall if any occurred.
    ///
    /// Callers are expected to have checked sufficiency first, so a shortfall here
    /// is an invariant violation. Each removal is still clamped so the ledger stays valid.
    pub fn remove_many<'a>(
        &mut self,
        items: impl IntoIterator<Item = (&'a str, u64)>,
    ) -> Result<(), InventoryError> {
        let mut first_error = None;
        for (item_id, amount) in items {
            if let Err(e) = self.remove(item_id, amount) {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// All held items, sorted by id.
    pub fn entries(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> =
            self.items.iter().map(|(id, qty)| (id.as_str(), *qty)).collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
