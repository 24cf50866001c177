//! Boundary to the external narrative service.
//!
//! The service turns free text into a structured [`Intent`] and turns a
//! [`TurnReport`] back into prose. The deterministic core never sees raw
//! text; these calls are the only points where a session may suspend, and
//! they always run without holding the session lock.
use async_trait::async_trait;
use game_core::{Intent, LocationView};
use thiserror::Error;

use crate::manager::TurnReport;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NarrativeError {
    /// The text could not be mapped to any intent.
    #[error("could not understand '{0}'")]
    Unrecognized(String),

    /// The service itself failed or is unreachable.
    #[error("narrative service failed: {0}")]
    Service(String),
}

/// Interprets player text and renders resolved turns.
#[async_trait]
pub trait Narrator: Send + Sync {
    /// Disambiguates `text` against what the player can currently perceive.
    async fn interpret(&self, text: &str, view: &LocationView) -> Result<Intent, NarrativeError>;

    /// Describes a resolved turn. Must only mention what `report` contains.
    async fn render(&self, report: &TurnReport) -> Result<String, NarrativeError>;
}
