//! Scenario definitions and new-game setup.

use std::collections::BTreeMap;

use game_core::{
    Character, CharacterId, CharacterStats, DiceExpr, GameConfig, GameState, ItemDefinition,
    RegionDefinition, StateValidationError, WorldDefinition, WorldError, WorldGraph,
};

/// Errors raised while turning a scenario into a playable session.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error(transparent)]
    World(#[from] WorldError),

    #[error("start location '{0}' does not exist")]
    UnknownStart(String),

    #[error("starting inventory names unknown item '{0}'")]
    UnknownItem(String),

    #[error("'{0}' cannot be equipped")]
    NotEquippable(String),

    #[error("'{0}' is equipped but not carried")]
    EquippedNotCarried(String),

    #[error("initial state is inconsistent: {0}")]
    InvalidState(#[from] StateValidationError),
}

/// Starting player as authored in a scenario.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerSpec {
    pub name: String,

    #[cfg_attr(feature = "serde", serde(default = "PlayerSpec::default_class"))]
    pub class: String,

    pub max_health: u32,

    /// Defaults to the configured base defense.
    #[cfg_attr(feature = "serde", serde(default))]
    pub defense: Option<i32>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub attack_bonus: i32,

    #[cfg_attr(feature = "serde", serde(default))]
    pub attack: Option<DiceExpr>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub damage: Option<DiceExpr>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub inventory: BTreeMap<String, u32>,

    /// Items from the inventory to equip at start.
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipped: Vec<String>,
}

impl PlayerSpec {
    pub fn new(name: impl Into<String>, max_health: u32) -> Self {
        Self {
            name: name.into(),
            class: Self::default_class(),
            max_health,
            defense: None,
            attack_bonus: 0,
            attack: None,
            damage: None,
            inventory: BTreeMap::new(),
            equipped: Vec::new(),
        }
    }

    fn default_class() -> String {
        "adventurer".to_string()
    }
}

/// A scenario file: the world plus where and as whom the player starts.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioDefinition {
    pub name: String,

    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,

    /// Seed used when the caller does not supply one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: Option<u64>,

    /// Name of the starting location.
    pub start: String,

    pub player: PlayerSpec,

    pub regions: Vec<RegionDefinition>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub items: Vec<ItemDefinition>,
}

/// A validated scenario with its world built.
#[derive(Clone, Debug)]
pub struct Scenario {
    name: String,
    description: String,
    seed: Option<u64>,
    start: String,
    player: PlayerSpec,
    world: WorldGraph,
}

impl Scenario {
    /// Builds the world graph and checks the starting location.
    pub fn build(definition: ScenarioDefinition) -> Result<Self, ScenarioError> {
        let ScenarioDefinition {
            name,
            description,
            seed,
            start,
            player,
            regions,
            items,
        } = definition;

        let world = WorldGraph::build(WorldDefinition { regions, items })?;
        let start = world
            .find_location(&start)
            .map(|location| location.name.clone())
            .ok_or(ScenarioError::UnknownStart(start))?;

        tracing::debug!(
            scenario = %name,
            locations = world.location_count(),
            start = %start,
            "built scenario world"
        );

        Ok(Self {
            name,
            description,
            seed,
            start,
            player,
            world,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn world(&self) -> &WorldGraph {
        &self.world
    }

    pub fn into_world(self) -> WorldGraph {
        self.world
    }

    /// Canonical name of the starting location.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Seed authored in the scenario, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Creates the initial state of a new session.
    pub fn new_game(&self, config: &GameConfig, game_seed: u64) -> Result<GameState, ScenarioError> {
        let template = &self.player;
        let stats = CharacterStats {
            attack: template.attack,
            damage: template.damage,
            ..CharacterStats::new(template.max_health, template.defense.unwrap_or(config.base_defense))
                .with_attack_bonus(template.attack_bonus)
        };
        let mut player = Character::new(
            CharacterId::PLAYER,
            template.name.as_str(),
            template.class.as_str(),
            stats,
            self.start.as_str(),
        );

        for (item, &quantity) in &template.inventory {
            let definition = self
                .world
                .find_item(item)
                .ok_or_else(|| ScenarioError::UnknownItem(item.clone()))?;
            player.inventory.add_item(&definition.name, quantity);
        }

        for item in &template.equipped {
            let definition = self
                .world
                .find_item(item)
                .ok_or_else(|| ScenarioError::UnknownItem(item.clone()))?;
            let slot = definition
                .slot
                .filter(|_| definition.is_equippable())
                .ok_or_else(|| ScenarioError::NotEquippable(definition.name.clone()))?;
            if !player.inventory.has_item(&definition.name) {
                return Err(ScenarioError::EquippedNotCarried(definition.name.clone()));
            }
            player.equipment.equip(slot, &definition.name);
        }

        let state = GameState::new_game(&self.world, player, game_seed);
        state.validate(&self.world)?;

        tracing::info!(
            scenario = %self.name,
            seed = game_seed,
            hostiles = state.hostiles.len(),
            "created new game"
        );
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{EquipSlot, LocationDefinition, LocationKind, PathDefinition};

    fn definition() -> ScenarioDefinition {
        let mut player = PlayerSpec::new("Aria", 12);
        player.inventory.insert("dagger".into(), 1);
        player.equipped.push("Dagger".into());

        ScenarioDefinition {
            name: "Test".into(),
            description: String::new(),
            seed: Some(5),
            start: "main road entrance".into(),
            player,
            regions: vec![RegionDefinition::new(
                "Road",
                "",
                vec![
                    LocationDefinition::new("Main Road Entrance", LocationKind::Road)
                        .with_path(PathDefinition::new("west", "Forest Edge")),
                    LocationDefinition::new("Forest Edge", LocationKind::Forest),
                ],
            )],
            items: vec![
                ItemDefinition::equippable("Dagger", EquipSlot::Weapon)
                    .with_damage(DiceExpr::new(1, 4, 1)),
            ],
        }
    }

    #[test]
    fn builds_and_starts_a_game() {
        let scenario = Scenario::build(definition()).unwrap();
        assert_eq!(scenario.start(), "Main Road Entrance");

        let config = GameConfig::default();
        let state = scenario.new_game(&config, 9).unwrap();
        assert_eq!(state.game_seed, 9);
        assert_eq!(state.player.location, "Main Road Entrance");
        assert_eq!(state.player.stats.defense, config.base_defense);
        assert_eq!(state.player.inventory.quantity("Dagger"), 1);
        assert_eq!(state.player.equipment.get(EquipSlot::Weapon), Some("Dagger"));
    }

    #[test]
    fn rejects_unknown_start() {
        let mut def = definition();
        def.start = "Nowhere".into();
        assert!(matches!(
            Scenario::build(def),
            Err(ScenarioError::UnknownStart(name)) if name == "Nowhere"
        ));
    }

    #[test]
    fn rejects_unknown_starting_item() {
        let mut def = definition();
        def.player.inventory.insert("Phoenix Feather".into(), 1);
        let scenario = Scenario::build(def).unwrap();
        assert!(matches!(
            scenario.new_game(&GameConfig::default(), 1),
            Err(ScenarioError::UnknownItem(_))
        ));
    }

    #[test]
    fn surfaces_world_errors() {
        let mut def = definition();
        def.regions[0].locations[0]
            .paths
            .push(PathDefinition::new("east", "Castle"));
        assert!(matches!(
            Scenario::build(def),
            Err(ScenarioError::World(WorldError::DanglingPath { .. }))
        ));
    }
}
