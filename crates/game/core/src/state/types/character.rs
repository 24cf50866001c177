//! Characters: the player and every hostile placed in the world.

use core::fmt;

use crate::combat::{DiceExpr, RollMode};
use crate::env::HostileDefinition;

use super::equipment::Equipment;
use super::inventory::Inventory;
use super::status::StatusFlags;

/// Unique identifier of a character record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CharacterId(pub u32);

impl CharacterId {
    pub const PLAYER: CharacterId = CharacterId(0);

    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_player() {
            f.write_str("player")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// Numeric stat block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterStats {
    pub health: u32,
    pub max_health: u32,

    /// Added to every attack roll.
    pub attack_bonus: i32,

    /// Threshold an incoming attack roll must meet, before armor.
    pub defense: i32,

    /// Natural attack roll; `None` uses the configured base attack.
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack: Option<DiceExpr>,

    /// Natural damage; `None` uses the configured unarmed damage.
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage: Option<DiceExpr>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub attack_mode: RollMode,
}

impl CharacterStats {
    /// Full-health stat block with no modifiers.
    pub const fn new(max_health: u32, defense: i32) -> Self {
        Self {
            health: max_health,
            max_health,
            attack_bonus: 0,
            defense,
            attack: None,
            damage: None,
            attack_mode: RollMode::Normal,
        }
    }

    pub fn with_attack_bonus(mut self, bonus: i32) -> Self {
        self.attack_bonus = bonus;
        self
    }

    pub fn with_health(mut self, health: u32) -> Self {
        self.health = health;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub class: String,
    pub stats: CharacterStats,

    #[cfg_attr(feature = "serde", serde(default))]
    pub inventory: Inventory,

    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment: Equipment,

    /// Canonical name of the location the character occupies.
    pub location: String,

    #[cfg_attr(feature = "serde", serde(default))]
    pub status: StatusFlags,
}

impl Character {
    pub fn new(
        id: CharacterId,
        name: impl Into<String>,
        class: impl Into<String>,
        stats: CharacterStats,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            class: class.into(),
            stats,
            inventory: Inventory::new(),
            equipment: Equipment::default(),
            location: location.into(),
            status: StatusFlags::empty(),
        }
    }

    /// Instantiates a hostile template at `location`.
    pub fn from_hostile(id: CharacterId, hostile: &HostileDefinition, location: &str) -> Self {
        let stats = CharacterStats {
            attack: hostile.attack,
            damage: Some(hostile.damage),
            attack_mode: hostile.attack_mode,
            ..CharacterStats::new(hostile.max_health, hostile.defense)
                .with_attack_bonus(hostile.attack_bonus)
        };
        Self::new(id, &hostile.name, &hostile.class, stats, location)
    }

    pub fn with_inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = inventory;
        self
    }

    /// Lowers health by `amount`, clamping at zero. Reaching zero sets
    /// [`StatusFlags::INCAPACITATED`]. Returns the damage actually taken.
    pub fn apply_damage(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.stats.health);
        self.stats.health -= taken;
        if self.stats.health == 0 {
            self.status.insert(StatusFlags::INCAPACITATED);
        }
        taken
    }

    /// Raises health by `amount`, clamping at maximum health. Returns the
    /// health actually restored. Dead characters cannot be healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if self.is_dead() {
            return 0;
        }
        let missing = self.stats.max_health.saturating_sub(self.stats.health);
        let restored = amount.min(missing);
        self.stats.health += restored;
        if self.stats.health > 0 {
            self.status.remove(StatusFlags::INCAPACITATED);
        }
        restored
    }

    /// Heals to maximum health.
    pub fn restore_full(&mut self) -> u32 {
        self.heal(self.stats.max_health)
    }

    pub fn mark_dead(&mut self) {
        self.status.insert(StatusFlags::INCAPACITATED | StatusFlags::DEAD);
    }

    pub fn is_incapacitated(&self) -> bool {
        self.status.contains(StatusFlags::INCAPACITATED)
    }

    pub fn is_dead(&self) -> bool {
        self.status.contains(StatusFlags::DEAD)
    }
}
