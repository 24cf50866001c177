//! Asynchronous abstraction for sourcing intents without a human.
//!
//! Self-play plugs in [`IntentProvider`] implementations so a session can run
//! from scripted fixtures or automated policies.
use std::collections::VecDeque;

use async_trait::async_trait;
use game_core::{GameState, Intent, LocationView};
use tokio::sync::Mutex;

use super::errors::Result;

/// Supplies the next intent for the player.
#[async_trait]
pub trait IntentProvider: Send + Sync {
    /// Returns the next intent, or `None` once the provider has nothing
    /// more to say.
    async fn next_intent(&self, state: &GameState, view: &LocationView) -> Result<Option<Intent>>;
}

/// Replays a fixed list of intents in order, ignoring the state.
pub struct ScriptedIntentProvider {
    intents: Mutex<VecDeque<Intent>>,
}

impl ScriptedIntentProvider {
    pub fn new(intents: impl IntoIterator<Item = Intent>) -> Self {
        Self {
            intents: Mutex::new(intents.into_iter().collect()),
        }
    }

    pub async fn remaining(&self) -> usize {
        self.intents.lock().await.len()
    }
}

#[async_trait]
impl IntentProvider for ScriptedIntentProvider {
    async fn next_intent(
        &self,
        _state: &GameState,
        _view: &LocationView,
    ) -> Result<Option<Intent>> {
        Ok(self.intents.lock().await.pop_front())
    }
}
