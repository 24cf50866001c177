//! Error types for the resolution pipeline.

use crate::action::{
    ActionTransition, AttackAction, DropItemAction, MoveAction, Rejection, RestAction,
    TakeItemAction, UseItemAction,
};
use crate::action::{AttackError, DropItemError, MoveError, RestError, TakeItemError, UseItemError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::InventoryError;

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while resolving an intent through the game engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("move failed: {0}")]
    Move(TransitionPhaseError<<MoveAction as ActionTransition>::Error>),

    #[error("take item failed: {0}")]
    TakeItem(TransitionPhaseError<<TakeItemAction as ActionTransition>::Error>),

    #[error("use item failed: {0}")]
    UseItem(TransitionPhaseError<<UseItemAction as ActionTransition>::Error>),

    #[error("drop item failed: {0}")]
    DropItem(TransitionPhaseError<<DropItemAction as ActionTransition>::Error>),

    #[error("attack failed: {0}")]
    Attack(TransitionPhaseError<<AttackAction as ActionTransition>::Error>),

    #[error("rest failed: {0}")]
    Rest(TransitionPhaseError<<RestAction as ActionTransition>::Error>),

    #[error("the session is over; no further intents are accepted")]
    SessionOver,
}

impl ExecuteError {
    /// Phase that failed, if the error came out of a transition.
    pub fn phase(&self) -> Option<TransitionPhase> {
        match self {
            Self::Move(e) => Some(e.phase),
            Self::TakeItem(e) => Some(e.phase),
            Self::UseItem(e) => Some(e.phase),
            Self::DropItem(e) => Some(e.phase),
            Self::Attack(e) => Some(e.phase),
            Self::Rest(e) => Some(e.phase),
            Self::SessionOver => None,
        }
    }

    /// Maps the error onto the user-facing rejection taxonomy. Returns `None`
    /// for internal inconsistencies, which are not the player's doing.
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Move(e) => match &e.error {
                MoveError::InvalidDirection { direction, .. } => {
                    Some(Rejection::InvalidDirection {
                        direction: direction.clone(),
                    })
                }
                MoveError::PathBlocked { direction, item } => Some(Rejection::PathBlocked {
                    direction: direction.clone(),
                    item: item.clone(),
                }),
                MoveError::UnknownLocation(_) => None,
            },
            Self::TakeItem(e) => match &e.error {
                TakeItemError::ItemNotFound { item, .. } => {
                    Some(Rejection::ItemNotFound { item: item.clone() })
                }
                TakeItemError::UnknownLocation(_) => None,
            },
            Self::UseItem(e) => match &e.error {
                UseItemError::ItemNotHeld(item) => {
                    Some(Rejection::ItemNotHeld { item: item.clone() })
                }
                UseItemError::ItemNotUsable(item) => {
                    Some(Rejection::ItemNotUsable { item: item.clone() })
                }
                UseItemError::Inventory(InventoryError::InsufficientQuantity { item, .. }) => {
                    Some(Rejection::InsufficientQuantity { item: item.clone() })
                }
            },
            Self::DropItem(e) => match &e.error {
                DropItemError::ItemNotHeld(item) => {
                    Some(Rejection::ItemNotHeld { item: item.clone() })
                }
                DropItemError::Inventory(InventoryError::InsufficientQuantity { item, .. }) => {
                    Some(Rejection::InsufficientQuantity { item: item.clone() })
                }
                DropItemError::UnknownLocation(_) => None,
            },
            Self::Attack(e) => match &e.error {
                AttackError::NoSuchTarget { target, .. } => Some(Rejection::NoSuchTarget {
                    target: target.clone(),
                }),
                AttackError::TargetAlreadyDefeated(target) => {
                    Some(Rejection::TargetAlreadyDefeated {
                        target: target.clone(),
                    })
                }
                AttackError::UnknownLocation(_) => None,
            },
            Self::Rest(e) => match &e.error {
                RestError::UnsafeToRest(_) => Some(Rejection::UnsafeToRest),
                RestError::UnknownLocation(_) => None,
            },
            Self::SessionOver => Some(Rejection::SessionOver),
        }
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Move(e) => e.error.severity(),
            Self::TakeItem(e) => e.error.severity(),
            Self::UseItem(e) => e.error.severity(),
            Self::DropItem(e) => e.error.severity(),
            Self::Attack(e) => e.error.severity(),
            Self::Rest(e) => e.error.severity(),
            Self::SessionOver => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Move(e) => e.error.error_code(),
            Self::TakeItem(e) => e.error.error_code(),
            Self::UseItem(e) => e.error.error_code(),
            Self::DropItem(e) => e.error.error_code(),
            Self::Attack(e) => e.error.error_code(),
            Self::Rest(e) => e.error.error_code(),
            Self::SessionOver => "SESSION_OVER",
        }
    }
}
