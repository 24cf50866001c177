//! Traps and hostiles declared on locations.

use crate::combat::{DiceExpr, RollMode};

/// A trap that springs the first time the player enters its location.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrapDefinition {
    pub name: String,
    pub damage: DiceExpr,
}

impl TrapDefinition {
    pub fn new(name: impl Into<String>, damage: DiceExpr) -> Self {
        Self {
            name: name.into(),
            damage,
        }
    }
}

/// Template for a hostile placed at a location at new-game time.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HostileDefinition {
    pub name: String,

    #[cfg_attr(feature = "serde", serde(default = "HostileDefinition::default_class"))]
    pub class: String,

    pub max_health: u32,

    /// Attack roll; falls back to the configured base attack.
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack: Option<DiceExpr>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub attack_bonus: i32,

    /// Rolls its attacks with advantage or disadvantage.
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack_mode: RollMode,

    pub damage: DiceExpr,

    /// Threshold an attack roll must meet to hit this hostile.
    pub defense: i32,
}

impl HostileDefinition {
    pub fn new(name: impl Into<String>, max_health: u32, damage: DiceExpr, defense: i32) -> Self {
        Self {
            name: name.into(),
            class: Self::default_class(),
            max_health,
            attack: None,
            attack_bonus: 0,
            attack_mode: RollMode::Normal,
            damage,
            defense,
        }
    }

    pub fn with_attack_mode(mut self, mode: RollMode) -> Self {
        self.attack_mode = mode;
        self
    }

    fn default_class() -> String {
        "hostile".to_string()
    }
}
