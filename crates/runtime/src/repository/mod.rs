//! Repository layer for session snapshots.
//!
//! Repositories handle data that CHANGES during gameplay: the game state a
//! player saves and later resumes. Static content (the world graph, rules)
//! comes from `game-content` and is never persisted here.

mod artifact;
mod error;
mod file;
mod memory;
mod traits;

pub use artifact::{SaveArtifact, SaveFormat, state_checksum};
pub use error::{LoadError, SaveError};
pub use file::FileSaveRepository;
pub use memory::InMemorySaveRepository;
pub use traits::{SaveRepository, is_valid_slot};
