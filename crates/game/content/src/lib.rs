//! Data-driven scenario content and loaders.
//!
//! This crate turns authored files into the values the rules run on:
//! - Scenarios: world regions, locations, paths, hostiles, the item catalog
//!   and the starting player (RON or JSON)
//! - Rules: tunable [`GameConfig`](game_core::GameConfig) values (TOML)
//!
//! Content is read once at session start. The built [`WorldGraph`]
//! (game_core::WorldGraph) is static for the rest of the session and never
//! appears in game state.

pub mod scenario;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use scenario::{PlayerSpec, Scenario, ScenarioDefinition, ScenarioError};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, ScenarioLoader};
