//! Inventory storage for characters.
//!
//! Items are keyed by their catalog name; the map is ordered so that the
//! serialized form is stable across saves.

use std::collections::BTreeMap;

use crate::state::InventoryError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Inventory {
    items: BTreeMap<String, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the count for `item`, inserting it when absent.
    pub fn add_item(&mut self, item: &str, quantity: u32) {
        let held = self.items.entry(item.to_string()).or_insert(0);
        *held = held.saturating_add(quantity);
    }

    /// Decrements the count for `item`, dropping the entry at zero.
    ///
    /// Returns the quantity left. Leaves the inventory untouched when fewer
    /// than `quantity` are held.
    pub fn remove_item(&mut self, item: &str, quantity: u32) -> Result<u32, InventoryError> {
        let held = self.quantity(item);
        if held < quantity {
            return Err(InventoryError::InsufficientQuantity {
                item: item.to_string(),
                held,
                requested: quantity,
            });
        }

        let remaining = held - quantity;
        if remaining == 0 {
            self.items.remove(item);
        } else {
            self.items.insert(item.to_string(), remaining);
        }
        Ok(remaining)
    }

    pub fn has_item(&self, item: &str) -> bool {
        self.quantity(item) > 0
    }

    pub fn quantity(&self, item: &str) -> u32 {
        self.items.get(item).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.items.iter().map(|(name, &qty)| (name.as_str(), qty))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for Inventory {
    fn from_iter<T: IntoIterator<Item = (S, u32)>>(iter: T) -> Self {
        let mut inventory = Self::new();
        for (item, quantity) in iter {
            inventory.add_item(&item.into(), quantity);
        }
        inventory
    }
}
