//! Deterministic rules of a turn-based dungeon crawl.
//!
//! `game-core` defines the location graph, characters and inventories, dice
//! combat, and intent resolution, and exposes pure APIs reused by the content
//! loaders, the runtime and offline tools. All state mutation flows through
//! [`engine::GameEngine`], and supporting crates depend on the types
//! re-exported here.
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;
pub mod view;

pub use action::{
    ActionTransition, AttackAction, AttackError, DropItemAction, DropItemError, GameEvent, Intent,
    MoveAction, MoveError, Rejection, RestAction, RestError, TakeItemAction, TakeItemError,
    UseItemAction, UseItemError,
};
pub use combat::{DiceError, DiceExpr, DiceRoller, RollMode};
pub use config::GameConfig;
pub use engine::{ExecuteError, GameEngine, Resolution, TransitionPhase, TransitionPhaseError};
pub use env::{
    EquipSlot, GameEnv, HostileDefinition, ItemDefinition, ItemEffect, ItemFlags, Location,
    LocationDefinition, LocationId, LocationKind, Path, PathDefinition, PcgRng, Region,
    RegionDefinition, RngOracle, TrapDefinition, WorldDefinition, WorldError, WorldGraph,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    Character, CharacterId, CharacterStats, Equipment, GameState, Inventory, InventoryError,
    LocationFacts, SessionStatus, StateValidationError, StatusFlags,
};
pub use view::LocationView;
