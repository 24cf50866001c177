use bitflags::bitflags;

use crate::combat::{DiceExpr, RollMode};

bitflags! {
    /// Behavioural flags attached to an item definition.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ItemFlags: u8 {
        /// Using the item applies its effect and spends one unit.
        const CONSUMABLE    = 1 << 0;
        /// Using the item places it in its equip slot.
        const EQUIPPABLE    = 1 << 1;
        /// While present at a location, obstructs paths that name it.
        const BLOCKS_PATH   = 1 << 2;
        /// Picking the item up springs the location's trap.
        const TRIGGERS_TRAP = 1 << 3;
    }
}

/// Equipment slot an equippable item occupies.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EquipSlot {
    Weapon,
    Armor,
    Trinket,
}

/// Effect applied when a consumable item is used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemEffect {
    /// Restore health by a rolled amount, clamped to maximum health.
    Heal(DiceExpr),

    /// Restore health to maximum.
    RestoreFull,
}

/// Static description of an item. Items are referenced everywhere by name.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub name: String,

    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,

    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: ItemFlags,

    #[cfg_attr(feature = "serde", serde(default))]
    pub effect: Option<ItemEffect>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub slot: Option<EquipSlot>,

    /// Added to attack rolls while equipped.
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack_bonus: i32,

    /// Added to the defense threshold while equipped.
    #[cfg_attr(feature = "serde", serde(default))]
    pub defense_bonus: i32,

    /// Replaces the wielder's damage dice while equipped.
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage: Option<DiceExpr>,

    /// Grants (dis)advantage on the wielder's attack rolls while equipped.
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack_mode: RollMode,
}

impl ItemDefinition {
    /// A plain item with no flags, as registered for names that only appear in
    /// a location's item list.
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            flags: ItemFlags::empty(),
            effect: None,
            slot: None,
            attack_bonus: 0,
            defense_bonus: 0,
            damage: None,
            attack_mode: RollMode::Normal,
        }
    }

    pub fn consumable(name: impl Into<String>, effect: ItemEffect) -> Self {
        Self {
            flags: ItemFlags::CONSUMABLE,
            effect: Some(effect),
            ..Self::plain(name)
        }
    }

    pub fn equippable(name: impl Into<String>, slot: EquipSlot) -> Self {
        Self {
            flags: ItemFlags::EQUIPPABLE,
            slot: Some(slot),
            ..Self::plain(name)
        }
    }

    pub fn with_flags(mut self, flags: ItemFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_attack_bonus(mut self, bonus: i32) -> Self {
        self.attack_bonus = bonus;
        self
    }

    pub fn with_defense_bonus(mut self, bonus: i32) -> Self {
        self.defense_bonus = bonus;
        self
    }

    pub fn with_damage(mut self, damage: DiceExpr) -> Self {
        self.damage = Some(damage);
        self
    }

    pub fn with_attack_mode(mut self, mode: RollMode) -> Self {
        self.attack_mode = mode;
        self
    }

    pub fn is_consumable(&self) -> bool {
        self.flags.contains(ItemFlags::CONSUMABLE)
    }

    pub fn is_equippable(&self) -> bool {
        self.flags.contains(ItemFlags::EQUIPPABLE)
    }

    pub fn blocks_path(&self) -> bool {
        self.flags.contains(ItemFlags::BLOCKS_PATH)
    }

    pub fn triggers_trap(&self) -> bool {
        self.flags.contains(ItemFlags::TRIGGERS_TRAP)
    }
}
