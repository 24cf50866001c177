//! Content factory for loading bundled scenarios and rules.

use std::path::{Path, PathBuf};

use anyhow::bail;
use game_core::GameConfig;

use crate::loaders::{ConfigLoader, LoadResult, ScenarioLoader};
use crate::scenario::Scenario;

/// Content factory that loads game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── rules.toml
/// └── scenarios/
///     ├── greenwood.ron
///     └── other.json
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data bundled with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load rules from `rules.toml`, or the defaults when the file is absent.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("rules.toml");
        if path.exists() {
            ConfigLoader::load(&path)
        } else {
            tracing::debug!(path = %path.display(), "no rules file; using defaults");
            Ok(GameConfig::default())
        }
    }

    /// Load `scenarios/{name}.ron`, falling back to `scenarios/{name}.json`.
    pub fn load_scenario(&self, name: &str) -> LoadResult<Scenario> {
        let dir = self.data_dir.join("scenarios");
        for extension in ["ron", "json"] {
            let path = dir.join(format!("{name}.{extension}"));
            if path.exists() {
                return ScenarioLoader::load(&path);
            }
        }
        bail!("Scenario '{}' not found in {}", name, dir.display())
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
