//! Attack resolution and defeat checks.

use crate::combat::{DiceRoller, roll_damage};
use crate::state::Character;

use super::hit::{CombatProfile, check_hit};

/// An attack that met the defense threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitEvent {
    /// Attack roll including bonuses.
    pub roll: i32,
    /// Damage rolled.
    pub damage: u32,
    /// Health the defender actually lost.
    pub taken: u32,
}

/// An attack that fell short of the defense threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MissEvent {
    pub roll: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackResult {
    Hit(HitEvent),
    Miss(MissEvent),
}

impl AttackResult {
    pub fn is_hit(&self) -> bool {
        matches!(self, AttackResult::Hit(_))
    }
}

/// Rolls `attacker`'s attack (twice under advantage or disadvantage) against
/// `defense_threshold`; on a hit, rolls damage separately and applies it to
/// `defender`.
pub fn resolve_attack(
    attacker: &CombatProfile,
    defender: &mut Character,
    defense_threshold: i32,
    roller: &mut DiceRoller<'_>,
) -> AttackResult {
    let roll = roller
        .roll_with(&attacker.attack, attacker.attack_mode)
        .saturating_add(attacker.attack_bonus);
    if !check_hit(roll, defense_threshold) {
        return AttackResult::Miss(MissEvent { roll });
    }

    let damage = roll_damage(&attacker.damage, roller);
    let taken = defender.apply_damage(damage);
    AttackResult::Hit(HitEvent {
        roll,
        damage,
        taken,
    })
}

/// True once the character's health has reached zero.
pub fn check_defeat(character: &Character) -> bool {
    character.stats.health == 0
}
