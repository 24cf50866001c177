//! State management errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::CharacterId;

/// Errors raised by inventory mutation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InventoryError {
    #[error("insufficient quantity of '{item}': holding {held}, need {requested}")]
    InsufficientQuantity {
        item: String,
        held: u32,
        requested: u32,
    },
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientQuantity { .. } => "INVENTORY_INSUFFICIENT_QUANTITY",
        }
    }
}

/// Errors raised when a game state does not fit the world it is paired with.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateValidationError {
    #[error("unsupported state format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("game state has no player character")]
    MissingPlayer,

    #[error("duplicate character id {0}")]
    DuplicateCharacter(CharacterId),

    #[error("character {character} references unknown location '{location}'")]
    UnknownLocation {
        character: CharacterId,
        location: String,
    },

    #[error("facts recorded for unknown location '{0}'")]
    UnknownFactsLocation(String),

    #[error("character {character} references unknown item '{item}'")]
    UnknownItem { character: CharacterId, item: String },

    #[error("location '{location}' records unknown item '{item}' as taken")]
    UnknownTakenItem { location: String, item: String },

    #[error("location '{location}' holds dropped item '{item}' missing from the catalog")]
    UnknownDroppedItem { location: String, item: String },

    #[error("character {character} has '{item}' equipped but does not hold it")]
    EquippedNotHeld { character: CharacterId, item: String },

    #[error("character '{name}' ({character}) does not match a hostile at '{location}'")]
    UnknownCharacter {
        character: CharacterId,
        name: String,
        location: String,
    },

    #[error("location '{location}' records unknown hostile '{hostile}' as defeated")]
    UnknownDefeatedHostile { location: String, hostile: String },

    #[error("player is defeated but the session is still marked active")]
    DefeatedPlayerActive,
}

impl GameError for StateValidationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedVersion { .. } => "STATE_UNSUPPORTED_VERSION",
            Self::MissingPlayer => "STATE_MISSING_PLAYER",
            Self::DuplicateCharacter(_) => "STATE_DUPLICATE_CHARACTER",
            Self::UnknownLocation { .. } => "STATE_UNKNOWN_LOCATION",
            Self::UnknownFactsLocation(_) => "STATE_UNKNOWN_FACTS_LOCATION",
            Self::UnknownItem { .. } => "STATE_UNKNOWN_ITEM",
            Self::UnknownTakenItem { .. } => "STATE_UNKNOWN_TAKEN_ITEM",
            Self::UnknownDroppedItem { .. } => "STATE_UNKNOWN_DROPPED_ITEM",
            Self::EquippedNotHeld { .. } => "STATE_EQUIPPED_NOT_HELD",
            Self::UnknownCharacter { .. } => "STATE_UNKNOWN_CHARACTER",
            Self::UnknownDefeatedHostile { .. } => "STATE_UNKNOWN_DEFEATED_HOSTILE",
            Self::DefeatedPlayerActive => "STATE_DEFEATED_PLAYER_ACTIVE",
        }
    }
}
