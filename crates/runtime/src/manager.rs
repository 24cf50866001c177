//! Session state owner.
//!
//! [`GameStateManager`] pairs one [`GameState`] with the static world, the
//! rules and the randomness source, applies intents one at a time through
//! the engine and persists snapshots. It performs no locking itself; callers
//! that share a session across tasks go through
//! [`SessionHandle`](crate::SessionHandle).
use std::io::{Read, Write};
use std::sync::Arc;

use game_content::Scenario;
use game_core::{
    GameConfig, GameEngine, GameEnv, GameError, GameEvent, GameState, Intent, LocationView,
    PcgRng, RngOracle, SessionStatus, WorldGraph,
};
use serde::{Deserialize, Serialize};

use crate::api::{Result, RuntimeError};
use crate::repository::{LoadError, SaveArtifact, SaveError, SaveFormat, SaveRepository};

/// Outcome of one applied intent, handed to the narrative layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    /// Turn counter after the intent resolved.
    pub turn: u64,
    pub events: Vec<GameEvent>,
    /// Surroundings after the intent resolved.
    pub view: LocationView,
    pub status: SessionStatus,
}

impl TurnReport {
    pub fn is_over(&self) -> bool {
        self.status == SessionStatus::Over
    }
}

pub struct GameStateManager {
    world: Arc<WorldGraph>,
    config: GameConfig,
    rng: Box<dyn RngOracle>,
    state: GameState,
}

impl GameStateManager {
    /// Wraps an existing state after checking it against `world`.
    pub fn new(world: Arc<WorldGraph>, config: GameConfig, state: GameState) -> Result<Self> {
        state.validate(&world)?;
        Ok(Self {
            world,
            config,
            rng: Box::new(PcgRng),
            state,
        })
    }

    /// Starts a fresh session from `scenario`.
    pub fn new_game(scenario: &Scenario, config: GameConfig, game_seed: u64) -> Result<Self> {
        let state = scenario.new_game(&config, game_seed)?;
        tracing::info!(
            scenario = scenario.name(),
            seed = game_seed,
            start = %state.player.location,
            "new session"
        );
        Self::new(Arc::new(scenario.world().clone()), config, state)
    }

    /// Replaces the randomness source. Tests use fixed-output oracles.
    pub fn with_rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn world(&self) -> &WorldGraph {
        &self.world
    }

    pub fn shared_world(&self) -> Arc<WorldGraph> {
        Arc::clone(&self.world)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> SessionStatus {
        self.state.status
    }

    pub fn view(&self) -> Result<LocationView> {
        Ok(LocationView::capture(&self.state, &self.world)?)
    }

    /// Resolves `intent` and commits the outcome.
    ///
    /// A rejected intent leaves the state exactly as it was. Once the player
    /// is defeated every call fails with [`RuntimeError::SessionOver`].
    pub fn apply(&mut self, intent: &Intent) -> Result<TurnReport> {
        let env = GameEnv::new(&self.world, &self.config, self.rng.as_ref());
        let events = match GameEngine::new(&mut self.state).execute(env, intent) {
            Ok(events) => events,
            Err(error) => {
                let severity = error.severity();
                let error = RuntimeError::from(error);
                tracing::debug!(
                    intent = %intent,
                    turn = self.state.turn,
                    ?severity,
                    "intent refused: {error}"
                );
                return Err(error);
            }
        };

        tracing::debug!(
            intent = %intent,
            turn = self.state.turn,
            events = events.len(),
            "intent resolved"
        );
        if self.state.is_over() {
            tracing::info!(turn = self.state.turn, "player defeated; session over");
        }

        Ok(TurnReport {
            turn: self.state.turn,
            events,
            view: self.view()?,
            status: self.state.status,
        })
    }

    /// Re-arms the trap at `location` so the next arrival triggers it again.
    ///
    /// Returns whether the trap had been sprung.
    pub fn reset_trap(&mut self, location: &str) -> Result<bool> {
        let name = self
            .world
            .find_location(location)
            .map(|location| location.name.clone())
            .ok_or_else(|| RuntimeError::UnknownLocation(location.to_string()))?;

        let Some(facts) = self.state.facts.get_mut(&name) else {
            return Ok(false);
        };
        let was_sprung = std::mem::take(&mut facts.trap_sprung);
        if facts.is_empty() {
            self.state.facts.remove(&name);
        }
        tracing::debug!(location = %name, was_sprung, "trap reset");
        Ok(was_sprung)
    }

    /// Captures the current state as a save artifact.
    pub fn snapshot(&self) -> Result<SaveArtifact> {
        Ok(SaveArtifact::new(self.state.clone())?)
    }

    /// Writes the current state to `writer`.
    pub fn save<W: Write>(&self, mut writer: W, format: SaveFormat) -> Result<()> {
        let bytes = format.encode(&self.snapshot()?)?;
        writer.write_all(&bytes).map_err(SaveError::from)?;
        writer.flush().map_err(SaveError::from)?;
        Ok(())
    }

    /// Reads a save from `reader` and makes it the current state.
    ///
    /// On any failure the current state is kept. Returns the restored
    /// status so a finished session is reported straight away.
    pub fn load<R: Read>(&mut self, mut reader: R) -> Result<SessionStatus> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(LoadError::from)?;
        let artifact = SaveFormat::detect(&bytes).decode(&bytes)?;
        self.restore(artifact)
    }

    /// Installs `artifact` after checking its version, checksum and world
    /// cross references, in that order.
    pub fn restore(&mut self, artifact: SaveArtifact) -> Result<SessionStatus> {
        self.state = restore_state(&self.world, artifact)?;
        if self.state.is_over() {
            tracing::warn!(turn = self.state.turn, "restored a finished session");
        } else {
            tracing::info!(turn = self.state.turn, "session restored");
        }
        Ok(self.state.status)
    }

    pub fn save_to(&self, repository: &dyn SaveRepository, slot: &str) -> Result<SaveArtifact> {
        let artifact = self.snapshot()?;
        repository.save(slot, &artifact)?;
        tracing::info!(slot, turn = artifact.state.turn, "session saved");
        Ok(artifact)
    }

    pub fn load_from(&mut self, repository: &dyn SaveRepository, slot: &str) -> Result<SessionStatus> {
        let artifact = repository
            .load(slot)?
            .ok_or_else(|| LoadError::NotFound(slot.to_string()))?;
        self.restore(artifact)
    }
}

/// Checks `artifact` and returns the state it carries.
pub fn restore_state(
    world: &WorldGraph,
    artifact: SaveArtifact,
) -> std::result::Result<GameState, LoadError> {
    artifact.check_version()?;
    artifact.verify()?;
    artifact.state.validate(world)?;
    Ok(artifact.state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{
        CharacterId, CharacterStats, Character, DiceExpr, LocationDefinition, LocationKind,
        PathDefinition, RegionDefinition, TrapDefinition, WorldDefinition,
    };

    fn manager() -> GameStateManager {
        let world = WorldGraph::build(WorldDefinition {
            regions: vec![RegionDefinition::new(
                "Vale",
                "",
                vec![
                    LocationDefinition::new("Gate", LocationKind::Town)
                        .with_path(PathDefinition::new("north", "Pit")),
                    LocationDefinition::new("Pit", LocationKind::Cave)
                        .with_path(PathDefinition::new("south", "Gate"))
                        .with_trap(TrapDefinition::new("Spikes", DiceExpr::constant(1))),
                ],
            )],
            items: Vec::new(),
        })
        .expect("world builds");
        let player = Character::new(
            CharacterId::PLAYER,
            "Aria",
            "ranger",
            CharacterStats::new(10, 10),
            "Gate",
        );
        let state = GameState::new_game(&world, player, 3);
        GameStateManager::new(Arc::new(world), GameConfig::default(), state).unwrap()
    }

    #[test]
    fn reset_trap_rearms_only_known_locations() {
        let mut manager = manager();
        manager.apply(&Intent::go("north")).unwrap();
        assert!(manager.state().is_trap_sprung("Pit"));

        assert!(manager.reset_trap("pit").unwrap());
        assert!(!manager.state().is_trap_sprung("Pit"));
        assert!(manager.state().facts("Pit").is_none());
        assert!(!manager.reset_trap("Pit").unwrap());

        assert!(matches!(
            manager.reset_trap("Atlantis"),
            Err(RuntimeError::UnknownLocation(_))
        ));
    }

    #[test]
    fn report_carries_the_new_view() {
        let mut manager = manager();
        let report = manager.apply(&Intent::go("north")).unwrap();
        assert_eq!(report.turn, 1);
        assert_eq!(report.view.location, "Pit");
        assert_eq!(report.view.directions, ["south"]);
        assert_eq!(report.status, SessionStatus::Active);
        assert_eq!(report.events.len(), 2);
    }

    #[test]
    fn failed_load_keeps_current_state() {
        let mut manager = manager();
        manager.apply(&Intent::go("north")).unwrap();
        let before = manager.state().clone();

        assert!(manager.load(&b"{ broken"[..]).is_err());
        assert_eq!(manager.state(), &before);
    }
}
