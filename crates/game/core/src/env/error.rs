use crate::error::{ErrorSeverity, GameError};

/// Errors raised while building a [`WorldGraph`](super::WorldGraph) from a
/// world definition. Every variant is fatal: the session cannot start.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WorldError {
    #[error("world definition contains no locations")]
    EmptyWorld,

    #[error("duplicate region name '{0}'")]
    DuplicateRegion(String),

    #[error("duplicate location name '{0}'")]
    DuplicateLocation(String),

    #[error("duplicate item definition '{0}'")]
    DuplicateItem(String),

    #[error("duplicate hostile '{hostile}' at '{location}'")]
    DuplicateHostile { location: String, hostile: String },

    #[error("path '{direction}' from '{from}' leads to unknown location '{destination}'")]
    DanglingPath {
        from: String,
        direction: String,
        destination: String,
    },

    #[error("path '{direction}' from '{from}' has an empty direction")]
    EmptyDirection { from: String, direction: String },

    #[error("path '{direction}' from '{from}' is blocked by unknown item '{item}'")]
    UnknownBlocker {
        from: String,
        direction: String,
        item: String,
    },

    #[error("equippable item '{0}' declares no equip slot")]
    MissingEquipSlot(String),
}

impl GameError for WorldError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyWorld => "WORLD_EMPTY",
            Self::DuplicateRegion(_) => "WORLD_DUPLICATE_REGION",
            Self::DuplicateLocation(_) => "WORLD_DUPLICATE_LOCATION",
            Self::DuplicateItem(_) => "WORLD_DUPLICATE_ITEM",
            Self::DuplicateHostile { .. } => "WORLD_DUPLICATE_HOSTILE",
            Self::DanglingPath { .. } => "WORLD_DANGLING_PATH",
            Self::EmptyDirection { .. } => "WORLD_EMPTY_DIRECTION",
            Self::UnknownBlocker { .. } => "WORLD_UNKNOWN_BLOCKER",
            Self::MissingEquipSlot(_) => "WORLD_MISSING_EQUIP_SLOT",
        }
    }
}
