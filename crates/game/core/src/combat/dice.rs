//! Dice expressions (`NdM+K`) and the roller that evaluates them.

use core::fmt;
use core::str::FromStr;

use crate::config::GameConfig;
use crate::env::{RngOracle, compute_seed};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{CharacterId, GameState};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiceError {
    #[error("empty dice expression")]
    Empty,

    #[error("malformed dice expression '{0}'")]
    Malformed(String),

    #[error("dice count {0} out of range (1..={max})", max = GameConfig::MAX_DICE)]
    CountOutOfRange(u32),

    #[error("die sides {0} out of range (1..={max})", max = GameConfig::MAX_SIDES)]
    SidesOutOfRange(u32),

    #[error("modifier {0} out of range (-{max}..={max})", max = GameConfig::MAX_MODIFIER)]
    ModifierOutOfRange(i32),
}

impl GameError for DiceError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "DICE_EMPTY",
            Self::Malformed(_) => "DICE_MALFORMED",
            Self::CountOutOfRange(_) => "DICE_COUNT_OUT_OF_RANGE",
            Self::SidesOutOfRange(_) => "DICE_SIDES_OUT_OF_RANGE",
            Self::ModifierOutOfRange(_) => "DICE_MODIFIER_OUT_OF_RANGE",
        }
    }
}

/// `count` dice of `sides` sides plus a flat `modifier`.
///
/// A constant expression has `count == 0` and `sides == 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DiceExpr {
    count: u32,
    sides: u32,
    modifier: i32,
}

impl DiceExpr {
    /// Builds an expression without range checks. Use [`DiceExpr::parse`] for
    /// untrusted input.
    pub const fn new(count: u32, sides: u32, modifier: i32) -> Self {
        Self {
            count,
            sides,
            modifier,
        }
    }

    pub const fn constant(value: i32) -> Self {
        Self::new(0, 0, value)
    }

    pub const fn count(&self) -> u32 {
        self.count
    }

    pub const fn sides(&self) -> u32 {
        self.sides
    }

    pub const fn modifier(&self) -> i32 {
        self.modifier
    }

    /// Smallest value a roll can produce.
    pub fn min(&self) -> i32 {
        if self.sides == 0 {
            self.modifier
        } else {
            (self.count as i32).saturating_add(self.modifier)
        }
    }

    /// Largest value a roll can produce.
    pub fn max(&self) -> i32 {
        (self.count.saturating_mul(self.sides) as i32).saturating_add(self.modifier)
    }

    /// Parses `NdM`, `dM`, `NdM+K`, `NdM-K` or a bare integer `K`.
    /// Whitespace anywhere in the expression is ignored.
    pub fn parse(input: &str) -> Result<Self, DiceError> {
        let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Err(DiceError::Empty);
        }
        let lower = compact.to_ascii_lowercase();
        let malformed = || DiceError::Malformed(input.to_string());

        let Some((count_part, rest)) = lower.split_once('d') else {
            let value = lower.parse::<i32>().map_err(|_| malformed())?;
            return Ok(Self::constant(check_modifier(value)?));
        };

        let count = if count_part.is_empty() {
            1
        } else {
            count_part.parse::<u32>().map_err(|_| malformed())?
        };

        let (sides_part, modifier) = match rest.find(['+', '-']) {
            Some(idx) => {
                let (sides, modifier) = rest.split_at(idx);
                let modifier = modifier.parse::<i32>().map_err(|_| malformed())?;
                (sides, modifier)
            }
            None => (rest, 0),
        };
        let sides = sides_part.parse::<u32>().map_err(|_| malformed())?;

        if count == 0 || count > GameConfig::MAX_DICE {
            return Err(DiceError::CountOutOfRange(count));
        }
        if sides == 0 || sides > GameConfig::MAX_SIDES {
            return Err(DiceError::SidesOutOfRange(sides));
        }

        Ok(Self::new(count, sides, check_modifier(modifier)?))
    }
}

fn check_modifier(modifier: i32) -> Result<i32, DiceError> {
    if modifier.unsigned_abs() > GameConfig::MAX_MODIFIER as u32 {
        return Err(DiceError::ModifierOutOfRange(modifier));
    }
    Ok(modifier)
}

/// How many times an attack roll is made and which total counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RollMode {
    #[default]
    Normal,
    /// Roll twice, keep the higher total.
    Advantage,
    /// Roll twice, keep the lower total.
    Disadvantage,
}

impl RollMode {
    /// Folds another source of (dis)advantage into this one. Advantage and
    /// disadvantage cancel out.
    pub fn combine(self, other: RollMode) -> RollMode {
        match (self, other) {
            (RollMode::Normal, mode) | (mode, RollMode::Normal) => mode,
            (a, b) if a == b => a,
            _ => RollMode::Normal,
        }
    }
}

impl FromStr for DiceExpr {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sides == 0 {
            return write!(f, "{}", self.modifier);
        }
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{m}"),
            m => write!(f, "{m}"),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for DiceExpr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for DiceExpr {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Evaluates dice expressions for one intent.
///
/// Each individual die draw consumes a fresh context index, so every die in
/// every roll of the same intent gets an independent seed.
pub struct DiceRoller<'a> {
    rng: &'a dyn RngOracle,
    game_seed: u64,
    turn: u64,
    actor: u32,
    context: u32,
}

impl<'a> DiceRoller<'a> {
    pub fn new(rng: &'a dyn RngOracle, game_seed: u64, turn: u64, actor: CharacterId) -> Self {
        Self {
            rng,
            game_seed,
            turn,
            actor: actor.0,
            context: 0,
        }
    }

    /// Roller for the intent about to be applied to `state` by `actor`.
    pub fn for_turn(rng: &'a dyn RngOracle, state: &GameState, actor: CharacterId) -> Self {
        Self::new(rng, state.game_seed, state.turn, actor)
    }

    /// Number of dice drawn so far.
    pub fn draws(&self) -> u32 {
        self.context
    }

    fn draw(&mut self, sides: u32) -> u32 {
        let seed = compute_seed(self.game_seed, self.turn, self.actor, self.context);
        self.context = self.context.wrapping_add(1);
        self.rng.roll_die(seed, sides)
    }

    /// Draws `count` dice in `[1, sides]`, sums them and adds the modifier.
    pub fn roll(&mut self, expr: &DiceExpr) -> i32 {
        let mut total = expr.modifier;
        for _ in 0..expr.count {
            total = total.saturating_add(self.draw(expr.sides) as i32);
        }
        total
    }

    /// Rolls `expr` once, or twice under (dis)advantage keeping the higher
    /// (lower) total. Both rolls consume draws.
    pub fn roll_with(&mut self, expr: &DiceExpr, mode: RollMode) -> i32 {
        let first = self.roll(expr);
        match mode {
            RollMode::Normal => first,
            RollMode::Advantage => first.max(self.roll(expr)),
            RollMode::Disadvantage => first.min(self.roll(expr)),
        }
    }
}
