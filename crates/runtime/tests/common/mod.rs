//! Shared fixtures for runtime integration tests.
#![allow(dead_code)]

use game_content::{ContentFactory, Scenario};
use game_core::{GameConfig, GameEvent};
use runtime::GameStateManager;

pub const SEED: u64 = 1337;

pub fn scenario() -> Scenario {
    ContentFactory::bundled()
        .load_scenario("greenwood")
        .expect("bundled scenario loads")
}

pub fn config() -> GameConfig {
    ContentFactory::bundled()
        .load_config()
        .expect("bundled rules load")
}

pub fn manager() -> GameStateManager {
    manager_with_seed(SEED)
}

pub fn manager_with_seed(seed: u64) -> GameStateManager {
    GameStateManager::new_game(&scenario(), config(), seed).expect("new game starts")
}

/// Manager whose player starts with `health` hit points out of `max_health`.
pub fn wounded_manager(seed: u64, health: u32, max_health: u32) -> GameStateManager {
    let scenario = scenario();
    let config = config();
    let mut state = scenario.new_game(&config, seed).expect("new game starts");
    state.player.stats.max_health = max_health;
    state.player.stats.health = health;
    GameStateManager::new(
        std::sync::Arc::new(scenario.into_world()),
        config,
        state,
    )
    .expect("state is valid")
}

pub fn trap_damage(events: &[GameEvent]) -> Option<u32> {
    events.iter().find_map(|event| match event {
        GameEvent::TrapTriggered { damage, .. } => Some(*damage),
        _ => None,
    })
}
