//! Combat resolution system.
//!
//! Pure functions over explicit randomness. Every roll goes through a
//! [`DiceRoller`] backed by the injected [`RngOracle`](crate::env::RngOracle),
//! so an exchange replays identically from the same state.
//!
//! # Core Functions
//!
//! - `resolve_trap`: roll a trap's damage once and apply it
//! - `resolve_attack`: attack roll against a defense threshold, then damage on a hit
//! - `check_defeat`: whether a character has been brought to zero health

pub mod damage;
pub mod dice;
pub mod hit;
pub mod result;

pub use damage::{DamageEvent, resolve_trap, roll_damage};
pub use dice::{DiceError, DiceExpr, DiceRoller, RollMode};
pub use hit::{CombatProfile, check_hit};
pub use result::{AttackResult, HitEvent, MissEvent, check_defeat, resolve_attack};
