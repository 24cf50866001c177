//! Rules configuration loader.

use std::path::Path;

use anyhow::Context;
use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`GameConfig`] from TOML files. Keys missing from the file
/// keep their defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse rules TOML {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded rules");
        Ok(config)
    }

    /// Parses rules from TOML text.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)?;
        anyhow::ensure!(
            config.rest_turns >= 1,
            "rest_turns must be at least 1, got {}",
            config.rest_turns
        );
        Ok(config)
    }

    /// Loads `path` when given, otherwise returns the default rules.
    pub fn load_or_default(path: Option<&Path>) -> LoadResult<GameConfig> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(GameConfig::default()),
        }
    }
}
