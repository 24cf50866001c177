//! Intents and their transitions.
//!
//! An [`Intent`] is a structured, already-disambiguated request from the
//! player. Each kind is backed by an action struct implementing
//! [`ActionTransition`], which validates it against the state and the world
//! and applies it, producing [`GameEvent`]s.
//!
//! # Module Structure
//!
//! - `movement`: travel along a path (and arrival traps)
//! - `inventory`: take, use and drop items
//! - `combat`: one exchange of blows with a hostile
//! - `rest`: full recovery at safe locations
//! - `event`: the structured event records
//! - `error`: the flat rejection taxonomy

mod combat;
mod error;
mod event;
mod inventory;
mod movement;
mod rest;
mod transition;

pub use combat::{AttackAction, AttackError};
pub use error::Rejection;
pub use event::GameEvent;
pub use inventory::{
    DropItemAction, DropItemError, TakeItemAction, TakeItemError, UseItemAction, UseItemError,
};
pub use movement::{MoveAction, MoveError};
pub use rest::{RestAction, RestError};
pub use transition::ActionTransition;

/// Structured request to act, issued on behalf of the player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Intent {
    Move(MoveAction),
    TakeItem(TakeItemAction),
    UseItem(UseItemAction),
    DropItem(DropItemAction),
    Attack(AttackAction),
    Rest,
}

impl Intent {
    pub fn go(direction: impl Into<String>) -> Self {
        Self::Move(MoveAction::new(direction))
    }

    pub fn take(item: impl Into<String>) -> Self {
        Self::TakeItem(TakeItemAction::new(item))
    }

    pub fn use_item(item: impl Into<String>) -> Self {
        Self::UseItem(UseItemAction::new(item))
    }

    pub fn drop_item(item: impl Into<String>) -> Self {
        Self::DropItem(DropItemAction::new(item))
    }

    pub fn attack(target: impl Into<String>) -> Self {
        Self::Attack(AttackAction::new(target))
    }

    pub fn rest() -> Self {
        Self::Rest
    }

    /// Snake-case tag of the intent kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Move(_) => "move",
            Self::TakeItem(_) => "take_item",
            Self::UseItem(_) => "use_item",
            Self::DropItem(_) => "drop_item",
            Self::Attack(_) => "attack",
            Self::Rest => "rest",
        }
    }
}

impl core::fmt::Display for Intent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Move(action) => write!(f, "move {}", action.direction),
            Self::TakeItem(action) => write!(f, "take {}", action.item),
            Self::UseItem(action) => write!(f, "use {}", action.item),
            Self::DropItem(action) => write!(f, "drop {}", action.item),
            Self::Attack(action) => write!(f, "attack {}", action.target),
            Self::Rest => f.write_str("rest"),
        }
    }
}
