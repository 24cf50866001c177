//! Authoritative game state representation.
//!
//! [`GameState`] is the complete mutable snapshot of a session: the player,
//! every hostile spawned from the world, per-location facts layered over the
//! static [`WorldGraph`], the turn counter and the session status. Runtime
//! layers clone or query this state but mutate it exclusively through the
//! engine.
mod error;
pub mod types;

use std::collections::BTreeMap;

pub use error::{InventoryError, StateValidationError};
pub use types::{
    Character, CharacterId, CharacterStats, Equipment, Inventory, LocationFacts, SessionStatus,
    StatusFlags,
};

use crate::config::GameConfig;
use crate::env::{Location, Region, WorldGraph, normalize_key};

/// Canonical snapshot of the deterministic game state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Layout version of this record.
    pub format_version: u32,

    /// RNG seed for deterministic random generation.
    ///
    /// Set once at game initialization and never modified.
    /// Combined with `turn` to derive a unique seed for each roll.
    pub game_seed: u64,

    /// Monotonic turn counter. Advances on every successful resolution.
    pub turn: u64,

    pub status: SessionStatus,

    /// The player character. Its `location` is the party's current location.
    pub player: Character,

    /// Hostiles in spawn order, ids starting at 1.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hostiles: Vec<Character>,

    /// Mutable facts keyed by canonical location name. Locations without any
    /// recorded fact are absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub facts: BTreeMap<String, LocationFacts>,
}

impl GameState {
    /// Starts a new session: places the player and spawns every hostile the
    /// world declares, in declaration order.
    ///
    /// The player's id is forced to [`CharacterId::PLAYER`] and its location
    /// is canonicalized when it names a known location.
    pub fn new_game(world: &WorldGraph, mut player: Character, game_seed: u64) -> Self {
        player.id = CharacterId::PLAYER;
        if let Some(location) = world.find_location(&player.location) {
            player.location = location.name.clone();
        }

        let mut hostiles = Vec::new();
        for location in world.locations() {
            for hostile in &location.hostiles {
                let id = CharacterId(hostiles.len() as u32 + 1);
                hostiles.push(Character::from_hostile(id, hostile, &location.name));
            }
        }

        Self {
            format_version: GameConfig::SAVE_FORMAT_VERSION,
            game_seed,
            turn: 0,
            status: SessionStatus::Active,
            player,
            hostiles,
            facts: BTreeMap::new(),
        }
    }

    pub fn is_over(&self) -> bool {
        self.status == SessionStatus::Over
    }

    /// Every character record, player first.
    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        std::iter::once(&self.player).chain(self.hostiles.iter())
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters().find(|c| c.id == id)
    }

    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        if id.is_player() {
            return Some(&mut self.player);
        }
        self.hostiles.iter_mut().find(|c| c.id == id)
    }

    /// Finds a hostile at `location` whose name matches `name`, ignoring
    /// case. Defeated hostiles are included.
    pub fn hostile_at(&self, location: &str, name: &str) -> Option<&Character> {
        let key = normalize_key(name);
        self.hostiles
            .iter()
            .find(|h| h.location == location && normalize_key(&h.name) == key)
    }

    /// Hostiles at `location` that are still standing, in spawn order.
    pub fn living_hostiles_at<'s>(
        &'s self,
        location: &'s str,
    ) -> impl Iterator<Item = &'s Character> + 's {
        self.hostiles
            .iter()
            .filter(move |h| h.location == location && !h.is_dead())
    }

    /// The location the player occupies.
    pub fn current_location<'w>(&self, world: &'w WorldGraph) -> Option<&'w Location> {
        world.find_location(&self.player.location)
    }

    pub fn current_region<'w>(&self, world: &'w WorldGraph) -> Option<&'w Region> {
        self.current_location(world)
            .map(|location| world.region_of(location))
    }

    pub fn facts(&self, location: &str) -> Option<&LocationFacts> {
        self.facts.get(location)
    }

    pub fn facts_mut(&mut self, location: &str) -> &mut LocationFacts {
        self.facts.entry(location.to_string()).or_default()
    }

    pub fn is_item_taken(&self, location: &str, item: &str) -> bool {
        self.facts(location).is_some_and(|f| f.is_taken(item))
    }

    pub fn is_trap_sprung(&self, location: &str) -> bool {
        self.facts(location).is_some_and(|f| f.trap_sprung)
    }

    /// Whether a declared copy of `item` still lies at `location`.
    pub fn is_declared_item_present(&self, location: &Location, item: &str) -> bool {
        location.declares_item(item) && !self.is_item_taken(&location.name, item)
    }

    /// Whether `item` can be picked up at `location`, either as a declared
    /// copy or from what the player dropped there.
    pub fn is_item_present(&self, location: &Location, item: &str) -> bool {
        self.is_declared_item_present(location, item)
            || self
                .facts(&location.name)
                .is_some_and(|facts| facts.dropped(item) > 0)
    }

    /// Items lying at `location`: declared items not yet taken in declaration
    /// order, then dropped items in name order.
    pub fn visible_items<'s>(&'s self, location: &'s Location) -> impl Iterator<Item = &'s str> {
        let declared = location
            .items
            .iter()
            .map(String::as_str)
            .filter(move |item| !self.is_item_taken(&location.name, item));
        let dropped = self
            .facts(&location.name)
            .into_iter()
            .flat_map(|facts| facts.items_dropped.keys())
            .map(String::as_str)
            .filter(move |item| !self.is_declared_item_present(location, item));
        declared.chain(dropped)
    }

    /// Checks that every cross reference in this state resolves against
    /// `world` and that the record layout is the current one.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn validate(&self, world: &WorldGraph) -> Result<(), StateValidationError> {
        if self.format_version != GameConfig::SAVE_FORMAT_VERSION {
            return Err(StateValidationError::UnsupportedVersion {
                found: self.format_version,
                expected: GameConfig::SAVE_FORMAT_VERSION,
            });
        }
        if !self.player.id.is_player() {
            return Err(StateValidationError::MissingPlayer);
        }

        let mut seen = std::collections::BTreeSet::new();
        for character in self.characters() {
            if !seen.insert(character.id) {
                return Err(StateValidationError::DuplicateCharacter(character.id));
            }
            validate_character(world, character)?;
        }

        for hostile in &self.hostiles {
            if hostile.id.is_player()
                || world
                    .find_location(&hostile.location)
                    .and_then(|location| location.hostile(&hostile.name))
                    .is_none()
            {
                return Err(StateValidationError::UnknownCharacter {
                    character: hostile.id,
                    name: hostile.name.clone(),
                    location: hostile.location.clone(),
                });
            }
        }

        for (name, facts) in &self.facts {
            let location = world
                .find_location(name)
                .filter(|location| &location.name == name)
                .ok_or_else(|| StateValidationError::UnknownFactsLocation(name.clone()))?;
            if let Some(item) = facts
                .items_taken
                .iter()
                .find(|item| !location.declares_item(item))
            {
                return Err(StateValidationError::UnknownTakenItem {
                    location: name.clone(),
                    item: item.clone(),
                });
            }
            if let Some(item) = facts
                .items_dropped
                .keys()
                .find(|item| world.find_item(item).is_none_or(|def| &def.name != *item))
            {
                return Err(StateValidationError::UnknownDroppedItem {
                    location: name.clone(),
                    item: item.clone(),
                });
            }
            if let Some(hostile) = facts
                .hostiles_defeated
                .iter()
                .find(|hostile| location.hostile(hostile).is_none())
            {
                return Err(StateValidationError::UnknownDefeatedHostile {
                    location: name.clone(),
                    hostile: hostile.clone(),
                });
            }
        }

        if self.player.is_dead() && !self.is_over() {
            return Err(StateValidationError::DefeatedPlayerActive);
        }
        Ok(())
    }
}

fn validate_character(
    world: &WorldGraph,
    character: &Character,
) -> Result<(), StateValidationError> {
    let known_location = world
        .find_location(&character.location)
        .is_some_and(|location| location.name == character.location);
    if !known_location {
        return Err(StateValidationError::UnknownLocation {
            character: character.id,
            location: character.location.clone(),
        });
    }

    if let Some((item, _)) = character
        .inventory
        .iter()
        .find(|(item, _)| world.find_item(item).is_none())
    {
        return Err(StateValidationError::UnknownItem {
            character: character.id,
            item: item.to_string(),
        });
    }

    for (_, item) in character.equipment.iter() {
        if world.find_item(item).is_none() {
            return Err(StateValidationError::UnknownItem {
                character: character.id,
                item: item.to_string(),
            });
        }
        if !character.inventory.has_item(item) {
            return Err(StateValidationError::EquippedNotHeld {
                character: character.id,
                item: item.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::DiceExpr;
    use crate::env::{
        HostileDefinition, LocationDefinition, LocationKind, PathDefinition, RegionDefinition,
        WorldDefinition,
    };

    fn world() -> WorldGraph {
        WorldGraph::build(WorldDefinition {
            regions: vec![RegionDefinition::new(
                "Valley",
                "",
                vec![
                    LocationDefinition::new("Gate", LocationKind::Town)
                        .with_path(PathDefinition::new("north", "Den"))
                        .with_item("Rope"),
                    LocationDefinition::new("Den", LocationKind::Cave).with_hostile(
                        HostileDefinition::new("Wolf", 6, DiceExpr::new(1, 4, 0), 8),
                    ),
                ],
            )],
            items: Vec::new(),
        })
        .expect("world builds")
    }

    fn player() -> Character {
        Character::new(CharacterId(9), "Aria", "ranger", CharacterStats::new(10, 10), "gate")
    }

    #[test]
    fn new_game_spawns_hostiles_and_canonicalizes_start() {
        let world = world();
        let state = GameState::new_game(&world, player(), 7);

        assert_eq!(state.player.id, CharacterId::PLAYER);
        assert_eq!(state.player.location, "Gate");
        assert_eq!(state.hostiles.len(), 1);
        assert_eq!(state.hostiles[0].id, CharacterId(1));
        assert_eq!(state.hostiles[0].location, "Den");
        assert_eq!(state.turn, 0);
        assert!(state.validate(&world).is_ok());
    }

    #[test]
    fn hostile_lookup_ignores_case() {
        let world = world();
        let state = GameState::new_game(&world, player(), 7);
        assert!(state.hostile_at("Den", "wOLF").is_some());
        assert!(state.hostile_at("Gate", "wolf").is_none());
    }

    #[test]
    fn visible_items_exclude_taken() {
        let world = world();
        let mut state = GameState::new_game(&world, player(), 7);
        let gate = world.find_location("Gate").expect("gate");
        assert_eq!(state.visible_items(gate).collect::<Vec<_>>(), ["Rope"]);

        state.facts_mut("Gate").items_taken.insert("Rope".into());
        assert_eq!(state.visible_items(gate).count(), 0);
    }

    #[test]
    fn dropped_items_are_listed_after_declared_ones() {
        let world = world();
        let mut state = GameState::new_game(&world, player(), 7);
        let gate = world.find_location("Gate").expect("gate");
        state.facts_mut("Gate").drop_item("Rope");
        assert_eq!(state.visible_items(gate).collect::<Vec<_>>(), ["Rope"]);

        state.facts_mut("Gate").items_taken.insert("Rope".into());
        assert!(state.is_item_present(gate, "Rope"));
        assert!(!state.is_declared_item_present(gate, "Rope"));
        assert_eq!(state.visible_items(gate).collect::<Vec<_>>(), ["Rope"]);
        assert!(state.validate(&world).is_ok());
    }

    #[test]
    fn validate_rejects_unknown_dropped_item() {
        let world = world();
        let mut state = GameState::new_game(&world, player(), 7);
        state.facts_mut("Den").drop_item("Excalibur");
        assert_eq!(
            state.validate(&world),
            Err(StateValidationError::UnknownDroppedItem {
                location: "Den".into(),
                item: "Excalibur".into(),
            })
        );
    }

    #[test]
    fn validate_rejects_unknown_location() {
        let world = world();
        let mut state = GameState::new_game(&world, player(), 7);
        state.player.location = "Atlantis".into();
        assert!(matches!(
            state.validate(&world),
            Err(StateValidationError::UnknownLocation { .. })
        ));
    }

    #[test]
    fn validate_rejects_unknown_item() {
        let world = world();
        let mut state = GameState::new_game(&world, player(), 7);
        state.player.inventory.add_item("Excalibur", 1);
        assert!(matches!(
            state.validate(&world),
            Err(StateValidationError::UnknownItem { .. })
        ));
    }

    #[test]
    fn validate_rejects_other_version() {
        let world = world();
        let mut state = GameState::new_game(&world, player(), 7);
        state.format_version = 99;
        assert_eq!(
            state.validate(&world),
            Err(StateValidationError::UnsupportedVersion {
                found: 99,
                expected: GameConfig::SAVE_FORMAT_VERSION,
            })
        );
    }
}
