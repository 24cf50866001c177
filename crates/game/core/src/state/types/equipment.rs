use std::collections::BTreeMap;

use crate::env::EquipSlot;

/// Items currently equipped, one per slot. Equipped items remain counted in
/// the inventory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Equipment {
    slots: BTreeMap<EquipSlot, String>,
}

impl Equipment {
    /// Places `item` in `slot`, returning whatever it replaced.
    pub fn equip(&mut self, slot: EquipSlot, item: &str) -> Option<String> {
        self.slots.insert(slot, item.to_string())
    }

    pub fn unequip(&mut self, slot: EquipSlot) -> Option<String> {
        self.slots.remove(&slot)
    }

    pub fn get(&self, slot: EquipSlot) -> Option<&str> {
        self.slots.get(&slot).map(String::as_str)
    }

    pub fn is_equipped(&self, item: &str) -> bool {
        self.slots.values().any(|equipped| equipped == item)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EquipSlot, &str)> {
        self.slots.iter().map(|(&slot, item)| (slot, item.as_str()))
    }
}
