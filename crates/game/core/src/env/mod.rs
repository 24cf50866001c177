//! Read-only world data and injected collaborators.
//!
//! The [`WorldGraph`] exposes the static location graph and item catalog.
//! The [`GameEnv`] aggregate bundles it with the rule configuration and the
//! randomness source so the resolver can reach everything it needs without
//! owning any of it.
mod definition;
mod error;
mod hazards;
mod items;
mod rng;
mod world;

pub use definition::{
    LocationDefinition, LocationKind, PathDefinition, RegionDefinition, WorldDefinition,
};
pub use error::WorldError;
pub use hazards::{HostileDefinition, TrapDefinition};
pub use items::{EquipSlot, ItemDefinition, ItemEffect, ItemFlags};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use world::{Location, LocationId, Path, Region, RegionId, WorldGraph, normalize_key};

use crate::config::GameConfig;

/// Aggregates the read-only collaborators required by the resolver.
///
/// Borrowed for the duration of one resolution; never retained.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    world: &'a WorldGraph,
    config: &'a GameConfig,
    rng: &'a dyn RngOracle,
}

impl<'a> GameEnv<'a> {
    pub fn new(world: &'a WorldGraph, config: &'a GameConfig, rng: &'a dyn RngOracle) -> Self {
        Self { world, config, rng }
    }

    pub fn world(&self) -> &'a WorldGraph {
        self.world
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }
}

impl core::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameEnv")
            .field("locations", &self.world.location_count())
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
