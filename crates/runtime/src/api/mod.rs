//! Public runtime API surface.
//!
//! Re-exports the session handle, intent providers, the narrative boundary
//! and the error types so consumers can drive a session without reaching
//! into internal modules.
mod errors;
mod handle;
mod narrative;
mod providers;

pub use errors::{LoadError, Result, RuntimeError, SaveError};
pub use handle::SessionHandle;
pub use narrative::{NarrativeError, Narrator};
pub use providers::{IntentProvider, ScriptedIntentProvider};
