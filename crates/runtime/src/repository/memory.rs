//! In-memory SaveRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use super::artifact::SaveArtifact;
use super::error::{LoadError, SaveError};
use super::traits::SaveRepository;

/// Keeps artifacts in a map keyed by slot.
#[derive(Default)]
pub struct InMemorySaveRepository {
    saves: RwLock<BTreeMap<String, SaveArtifact>>,
}

impl InMemorySaveRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveRepository for InMemorySaveRepository {
    fn save(&self, slot: &str, artifact: &SaveArtifact) -> Result<(), SaveError> {
        let mut saves = self.saves.write().map_err(|_| SaveError::LockPoisoned)?;
        saves.insert(slot.to_string(), artifact.clone());
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<SaveArtifact>, LoadError> {
        let saves = self.saves.read().map_err(|_| LoadError::LockPoisoned)?;
        Ok(saves.get(slot).cloned())
    }

    fn exists(&self, slot: &str) -> bool {
        self.saves
            .read()
            .map(|saves| saves.contains_key(slot))
            .unwrap_or(false)
    }

    fn delete(&self, slot: &str) -> Result<(), SaveError> {
        let mut saves = self.saves.write().map_err(|_| SaveError::LockPoisoned)?;
        saves.remove(slot);
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>, LoadError> {
        let saves = self.saves.read().map_err(|_| LoadError::LockPoisoned)?;
        Ok(saves.keys().cloned().collect())
    }
}
