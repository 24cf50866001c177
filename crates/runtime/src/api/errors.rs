//! Unified error types surfaced by the runtime API.
//!
//! Wraps resolution failures, repository failures and narrative-service
//! failures so clients can bubble them up with consistent context.
use game_content::ScenarioError;
use game_core::{ExecuteError, GameError, Rejection, StateValidationError};
use thiserror::Error;

pub use crate::repository::{LoadError, SaveError};

use super::narrative::NarrativeError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The intent was refused; the session state is unchanged.
    #[error("{0}")]
    Rejected(Rejection),

    /// The player has been defeated. Saving is still allowed.
    #[error("the session is over; no further intents are accepted")]
    SessionOver,

    /// The resolver hit an inconsistency that is not the player's doing.
    #[error("intent resolution failed: {0}")]
    Execute(#[source] ExecuteError),

    #[error("unknown location '{0}'")]
    UnknownLocation(String),

    #[error("game state does not match the world: {0}")]
    InvalidState(#[from] StateValidationError),

    #[error("failed to build scenario: {0}")]
    Scenario(#[from] ScenarioError),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Narrative(#[from] NarrativeError),
}

impl RuntimeError {
    /// Whether the caller may simply try another intent.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Rejected(_) | Self::Narrative(_))
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}

impl From<ExecuteError> for RuntimeError {
    fn from(error: ExecuteError) -> Self {
        match error.rejection() {
            Some(Rejection::SessionOver) => Self::SessionOver,
            Some(rejection) => Self::Rejected(rejection),
            None => {
                tracing::error!(
                    code = error.error_code(),
                    phase = ?error.phase(),
                    "internal resolution failure: {error}"
                );
                Self::Execute(error)
            }
        }
    }
}
