//! Error types raised by save codecs and repository implementations.

use game_core::StateValidationError;
use thiserror::Error;

/// Errors surfaced while writing a save artifact.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode save artifact: {0}")]
    Encode(String),

    #[error("invalid save slot name '{0}'")]
    InvalidSlot(String),
}

/// Errors surfaced while reading a save artifact back.
///
/// Every variant is fatal for the load attempt only; the caller keeps
/// whatever session it already had.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("save repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no save found in slot '{0}'")]
    NotFound(String),

    #[error("unsupported save format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("failed to decode save artifact: {0}")]
    Decode(String),

    #[error("save artifact checksum mismatch: recorded {recorded}, computed {computed}")]
    CorruptedSave { recorded: String, computed: String },

    #[error("save does not match the loaded world: {0}")]
    Invalid(#[from] StateValidationError),
}

impl LoadError {
    /// Stable identifier for logs and client messages.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::LockPoisoned => "LOAD_LOCK_POISONED",
            Self::Io(_) => "LOAD_IO",
            Self::NotFound(_) => "LOAD_NOT_FOUND",
            Self::UnsupportedVersion { .. } => "LOAD_UNSUPPORTED_VERSION",
            Self::Decode(_) => "LOAD_DECODE",
            Self::CorruptedSave { .. } => "LOAD_CORRUPTED_SAVE",
            Self::Invalid(StateValidationError::UnknownLocation { .. }) => "LOAD_UNKNOWN_LOCATION",
            Self::Invalid(StateValidationError::UnknownItem { .. }) => "LOAD_UNKNOWN_ITEM",
            Self::Invalid(StateValidationError::UnknownCharacter { .. }) => {
                "LOAD_UNKNOWN_CHARACTER"
            }
            Self::Invalid(_) => "LOAD_INVALID_STATE",
        }
    }
}
