//! File-based SaveRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use super::artifact::{SaveArtifact, SaveFormat};
use super::error::{LoadError, SaveError};
use super::traits::{SaveRepository, is_valid_slot};

/// Stores one artifact per slot as `{slot}.json` or `{slot}.bin`.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-save never leaves a truncated artifact behind. Reads accept
/// either encoding regardless of the configured write format.
pub struct FileSaveRepository {
    base_dir: PathBuf,
    format: SaveFormat,
}

impl FileSaveRepository {
    /// Creates the repository, creating `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>, format: SaveFormat) -> Result<Self, SaveError> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir, format })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn format(&self) -> SaveFormat {
        self.format
    }

    /// Path the slot is written to in the configured format.
    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.path_for(slot, self.format)
    }

    fn path_for(&self, slot: &str, format: SaveFormat) -> PathBuf {
        self.base_dir.join(format!("{slot}.{}", format.extension()))
    }

    /// Existing file for `slot`, preferring the configured format.
    fn existing_path(&self, slot: &str) -> Option<PathBuf> {
        let other = match self.format {
            SaveFormat::Json => SaveFormat::Binary,
            SaveFormat::Binary => SaveFormat::Json,
        };
        [self.format, other]
            .into_iter()
            .map(|format| self.path_for(slot, format))
            .find(|path| path.exists())
    }

    /// Reads an artifact straight from `path`, whatever its encoding.
    pub fn read_path(path: &Path) -> Result<SaveArtifact, LoadError> {
        let bytes = fs::read(path)?;
        SaveFormat::detect(&bytes).decode(&bytes)
    }
}

impl SaveRepository for FileSaveRepository {
    fn save(&self, slot: &str, artifact: &SaveArtifact) -> Result<(), SaveError> {
        if !is_valid_slot(slot) {
            return Err(SaveError::InvalidSlot(slot.to_string()));
        }
        let path = self.slot_path(slot);
        let temp_path = path.with_extension(format!("{}.tmp", self.format.extension()));

        let bytes = self.format.encode(artifact)?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!(
            slot,
            turn = artifact.state.turn,
            "saved artifact to {}",
            path.display()
        );
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<SaveArtifact>, LoadError> {
        if !is_valid_slot(slot) {
            return Err(LoadError::NotFound(slot.to_string()));
        }
        let Some(path) = self.existing_path(slot) else {
            return Ok(None);
        };

        let artifact = Self::read_path(&path)?;
        tracing::debug!(slot, turn = artifact.state.turn, "loaded artifact from {}", path.display());
        Ok(Some(artifact))
    }

    fn exists(&self, slot: &str) -> bool {
        is_valid_slot(slot) && self.existing_path(slot).is_some()
    }

    fn delete(&self, slot: &str) -> Result<(), SaveError> {
        if !is_valid_slot(slot) {
            return Err(SaveError::InvalidSlot(slot.to_string()));
        }
        for format in [SaveFormat::Json, SaveFormat::Binary] {
            let path = self.path_for(slot, format);
            if path.exists() {
                fs::remove_file(&path)?;
                tracing::debug!(slot, "deleted {}", path.display());
            }
        }
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>, LoadError> {
        let mut slots = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            let extension = path.extension().and_then(|s| s.to_str());
            if !matches!(extension, Some("json") | Some("bin")) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                && is_valid_slot(stem)
            {
                slots.push(stem.to_string());
            }
        }
        slots.sort_unstable();
        slots.dedup();
        Ok(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_path_like_slot_names() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSaveRepository::new(dir.path(), SaveFormat::Json).unwrap();
        assert!(matches!(
            repo.delete("../escape"),
            Err(SaveError::InvalidSlot(_))
        ));
        assert!(!repo.exists("a/b"));
    }

    #[test]
    fn missing_slot_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSaveRepository::new(dir.path().join("nested"), SaveFormat::Binary).unwrap();
        assert!(repo.load("quick").unwrap().is_none());
        assert!(repo.list_slots().unwrap().is_empty());
    }
}
