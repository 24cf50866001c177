//! Runtime orchestration for the deterministic adventure rules.
//!
//! This crate wraps a [`GameState`](game_core::GameState) in a
//! [`GameStateManager`], persists it through save repositories, and exposes
//! an async [`SessionHandle`] that serializes intents, broadcasts turn
//! reports and talks to the external narrative service.
//!
//! Modules are organized by responsibility:
//! - [`api`] exposes the types downstream clients interact with
//! - [`manager`] owns the session state and the save/load paths
//! - [`repository`] provides save artifacts, codecs and storage backends
//! - [`self_play`] drives a session from an [`IntentProvider`]
pub mod api;
pub mod manager;
pub mod repository;
pub mod self_play;

pub use api::{
    IntentProvider, LoadError, NarrativeError, Narrator, Result, RuntimeError, SaveError,
    ScriptedIntentProvider, SessionHandle,
};
pub use manager::{GameStateManager, TurnReport, restore_state};
pub use repository::{
    FileSaveRepository, InMemorySaveRepository, SaveArtifact, SaveFormat, SaveRepository,
    state_checksum,
};
pub use self_play::{SelfPlayConfig, SelfPlaySummary, StopReason, run_self_play};
