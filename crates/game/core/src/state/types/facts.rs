use std::collections::{BTreeMap, BTreeSet};

/// Mutable facts about one location, layered over the static world.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationFacts {
    /// Declared items that have been picked up.
    #[cfg_attr(feature = "serde", serde(default))]
    pub items_taken: BTreeSet<String>,

    /// Whether the location's trap has already sprung.
    #[cfg_attr(feature = "serde", serde(default))]
    pub trap_sprung: bool,

    /// Hostiles declared here that have been defeated.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hostiles_defeated: BTreeSet<String>,

    /// Items the player has put down here, by catalog name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub items_dropped: BTreeMap<String, u32>,
}

impl LocationFacts {
    pub fn is_taken(&self, item: &str) -> bool {
        self.items_taken.contains(item)
    }

    pub fn is_defeated(&self, hostile: &str) -> bool {
        self.hostiles_defeated.contains(hostile)
    }

    pub fn dropped(&self, item: &str) -> u32 {
        self.items_dropped.get(item).copied().unwrap_or(0)
    }

    pub fn drop_item(&mut self, item: &str) {
        let pile = self.items_dropped.entry(item.to_string()).or_insert(0);
        *pile = pile.saturating_add(1);
    }

    /// Takes one unit back from the dropped pile. Returns false when there
    /// was none.
    pub fn pick_up_dropped(&mut self, item: &str) -> bool {
        match self.items_dropped.get_mut(item) {
            Some(pile) if *pile > 1 => {
                *pile -= 1;
                true
            }
            Some(_) => {
                self.items_dropped.remove(item);
                true
            }
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items_taken.is_empty()
            && !self.trap_sprung
            && self.hostiles_defeated.is_empty()
            && self.items_dropped.is_empty()
    }
}
