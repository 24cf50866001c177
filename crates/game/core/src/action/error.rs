//! User-facing rejection taxonomy.
//!
//! Each intent has its own error type; [`Rejection`] flattens the recoverable
//! ones into the reasons a caller surfaces to the player.

use crate::error::{ErrorSeverity, GameError};

/// Why an intent was refused. The state is untouched whenever one is
/// returned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "reason", rename_all = "snake_case"))]
pub enum Rejection {
    #[error("you cannot go '{direction}' from here")]
    InvalidDirection { direction: String },

    #[error("the way '{direction}' is blocked by {item}")]
    PathBlocked { direction: String, item: String },

    #[error("there is no '{item}' here")]
    ItemNotFound { item: String },

    #[error("you are not carrying '{item}'")]
    ItemNotHeld { item: String },

    #[error("'{item}' cannot be used")]
    ItemNotUsable { item: String },

    #[error("not enough '{item}'")]
    InsufficientQuantity { item: String },

    #[error("there is no '{target}' to fight here")]
    NoSuchTarget { target: String },

    #[error("{target} has already been defeated")]
    TargetAlreadyDefeated { target: String },

    #[error("it is not safe to rest here")]
    UnsafeToRest,

    #[error("the session is over")]
    SessionOver,
}

impl Rejection {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidDirection { .. } => "invalid_direction",
            Self::PathBlocked { .. } => "path_blocked",
            Self::ItemNotFound { .. } => "item_not_found",
            Self::ItemNotHeld { .. } => "item_not_held",
            Self::ItemNotUsable { .. } => "item_not_usable",
            Self::InsufficientQuantity { .. } => "insufficient_quantity",
            Self::NoSuchTarget { .. } => "no_such_target",
            Self::TargetAlreadyDefeated { .. } => "target_already_defeated",
            Self::UnsafeToRest => "unsafe_to_rest",
            Self::SessionOver => "session_over",
        }
    }
}

impl GameError for Rejection {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        self.code()
    }
}
