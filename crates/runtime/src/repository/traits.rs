//! Repository contract for saving and loading session snapshots.

use super::artifact::SaveArtifact;
use super::error::{LoadError, SaveError};

/// Repository for save artifacts, one per named slot.
///
/// Implementations decode what they store but do not verify the checksum or
/// the world cross references; the session manager does that on restore.
pub trait SaveRepository: Send + Sync {
    /// Stores `artifact` in `slot`, replacing any previous save there.
    fn save(&self, slot: &str, artifact: &SaveArtifact) -> Result<(), SaveError>;

    /// Loads the artifact in `slot`, or `None` when the slot is empty.
    fn load(&self, slot: &str) -> Result<Option<SaveArtifact>, LoadError>;

    fn exists(&self, slot: &str) -> bool;

    fn delete(&self, slot: &str) -> Result<(), SaveError>;

    /// Names of every occupied slot, sorted.
    fn list_slots(&self) -> Result<Vec<String>, LoadError> {
        Ok(Vec::new())
    }
}

/// Slot names become file names, so only a conservative alphabet is allowed.
pub fn is_valid_slot(slot: &str) -> bool {
    !slot.is_empty()
        && slot.len() <= 64
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
