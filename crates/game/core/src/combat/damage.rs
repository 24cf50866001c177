//! Damage rolls and trap resolution.

use crate::combat::{DiceExpr, DiceRoller};
use crate::env::TrapDefinition;
use crate::state::Character;

/// Damage rolled against one character and the amount it actually lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageEvent {
    pub rolled: u32,
    pub taken: u32,
}

/// Rolls a damage expression, clamping negative totals to zero.
pub fn roll_damage(expr: &DiceExpr, roller: &mut DiceRoller<'_>) -> u32 {
    roller.roll(expr).max(0) as u32
}

/// Rolls the trap's damage once and applies it to `target`.
pub fn resolve_trap(
    trap: &TrapDefinition,
    target: &mut Character,
    roller: &mut DiceRoller<'_>,
) -> DamageEvent {
    let rolled = roll_damage(&trap.damage, roller);
    let taken = target.apply_damage(rolled);
    DamageEvent { rolled, taken }
}
