use crate::action::transition::player_location;
use crate::action::{ActionTransition, GameEvent};
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::state::GameState;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RestError {
    #[error("it is not safe to rest at {0}")]
    UnsafeToRest(String),

    #[error("player stands in unknown location '{0}'")]
    UnknownLocation(String),
}

impl GameError for RestError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnsafeToRest(_) => ErrorSeverity::Recoverable,
            Self::UnknownLocation(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsafeToRest(_) => "REST_UNSAFE",
            Self::UnknownLocation(_) => "REST_UNKNOWN_LOCATION",
        }
    }
}

/// Sleep at a safe location, restoring the player to full health.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RestAction;

impl ActionTransition for RestAction {
    type Error = RestError;

    fn cost(&self, env: &GameEnv<'_>) -> u64 {
        env.config().rest_turns.max(1)
    }

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let location = player_location(state, env).map_err(RestError::UnknownLocation)?;
        if location.safe {
            Ok(())
        } else {
            Err(RestError::UnsafeToRest(location.name.clone()))
        }
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
    ) -> Result<Vec<GameEvent>, Self::Error> {
        let location = player_location(state, env).map_err(RestError::UnknownLocation)?;
        let healed = state.player.restore_full();
        Ok(vec![GameEvent::Rested {
            location: location.name.clone(),
            healed,
            turns: self.cost(env),
        }])
    }
}
