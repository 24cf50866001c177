//! Scenario file loader.

use std::path::Path;

use anyhow::{Context, bail};

use crate::loaders::{LoadResult, read_file};
use crate::scenario::{Scenario, ScenarioDefinition};

/// Loader for scenario files. `.ron` and `.json` are recognised.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Reads and parses a scenario definition.
    pub fn load_definition(path: &Path) -> LoadResult<ScenarioDefinition> {
        let content = read_file(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let definition: ScenarioDefinition = match extension.as_deref() {
            Some("ron") => ron::from_str(&content)
                .with_context(|| format!("Failed to parse scenario RON {}", path.display()))?,
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse scenario JSON {}", path.display()))?,
            _ => bail!(
                "Unsupported scenario format for {} (expected .ron or .json)",
                path.display()
            ),
        };
        Ok(definition)
    }

    /// Reads a scenario and builds its world.
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let definition = Self::load_definition(path)?;
        let scenario = Scenario::build(definition)
            .with_context(|| format!("Invalid scenario {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            scenario = scenario.name(),
            "loaded scenario"
        );
        Ok(scenario)
    }
}
