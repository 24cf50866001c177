use crate::combat::DiceExpr;

/// Game configuration constants and tunable rule parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Turn units consumed by a successful rest.
    pub rest_turns: u64,

    /// Attack roll made by any character before bonuses are added.
    pub base_attack: DiceExpr,

    /// Damage dealt by a character with no weapon and no natural damage dice.
    pub unarmed_damage: DiceExpr,

    /// Defense threshold of a character before armor is applied.
    pub base_defense: i32,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Version tag written into every save artifact and game state.
    pub const SAVE_FORMAT_VERSION: u32 = 1;
    /// Upper bound on the number of dice in one expression.
    pub const MAX_DICE: u32 = 100;
    /// Upper bound on the number of sides of one die.
    pub const MAX_SIDES: u32 = 1000;
    /// Upper bound on the magnitude of a flat dice modifier.
    pub const MAX_MODIFIER: i32 = 10_000;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_REST_TURNS: u64 = 8;
    pub const DEFAULT_BASE_DEFENSE: i32 = 10;

    pub fn new() -> Self {
        Self {
            rest_turns: Self::DEFAULT_REST_TURNS,
            base_attack: DiceExpr::new(1, 20, 0),
            unarmed_damage: DiceExpr::new(1, 4, 0),
            base_defense: Self::DEFAULT_BASE_DEFENSE,
        }
    }

    pub fn with_rest_turns(mut self, rest_turns: u64) -> Self {
        self.rest_turns = rest_turns;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
