use crate::action::transition::player_location;
use crate::action::{ActionTransition, GameEvent};
use crate::combat::{DiceRoller, resolve_trap};
use crate::env::{GameEnv, Location};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{CharacterId, GameState};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("no path leads '{direction}' from {location}")]
    InvalidDirection { location: String, direction: String },

    #[error("the way '{direction}' is blocked by {item}")]
    PathBlocked { direction: String, item: String },

    #[error("player stands in unknown location '{0}'")]
    UnknownLocation(String),
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidDirection { .. } | Self::PathBlocked { .. } => ErrorSeverity::Recoverable,
            Self::UnknownLocation(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDirection { .. } => "MOVE_INVALID_DIRECTION",
            Self::PathBlocked { .. } => "MOVE_PATH_BLOCKED",
            Self::UnknownLocation(_) => "MOVE_UNKNOWN_LOCATION",
        }
    }
}

/// Travel along the first outgoing path whose direction matches.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub direction: String,
}

impl MoveAction {
    pub fn new(direction: impl Into<String>) -> Self {
        Self {
            direction: direction.into(),
        }
    }
}

impl ActionTransition for MoveAction {
    type Error = MoveError;

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let origin = player_location(state, env).map_err(MoveError::UnknownLocation)?;
        let path = env
            .world()
            .resolve_direction(origin, &self.direction)
            .ok_or_else(|| MoveError::InvalidDirection {
                location: origin.name.clone(),
                direction: self.direction.clone(),
            })?;

        match &path.blocked_by {
            Some(item) if !state.is_item_taken(&origin.name, item) => Err(MoveError::PathBlocked {
                direction: path.direction.clone(),
                item: item.clone(),
            }),
            _ => Ok(()),
        }
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
    ) -> Result<Vec<GameEvent>, Self::Error> {
        let world = env.world();
        let origin = player_location(state, env).map_err(MoveError::UnknownLocation)?;
        let path = world
            .resolve_direction(origin, &self.direction)
            .ok_or_else(|| MoveError::InvalidDirection {
                location: origin.name.clone(),
                direction: self.direction.clone(),
            })?;
        let destination = world.location(path.destination);

        let mut events = Vec::with_capacity(2);
        state.player.location = destination.name.clone();
        // The trap goes off on arrival, before the move is reported, unless
        // it is rigged to an item still lying there.
        if !trap_rigged_to_item(state, env, destination) {
            events.extend(spring_trap(state, env, destination));
        }
        events.push(GameEvent::Moved {
            from: origin.name.clone(),
            to: destination.name.clone(),
            direction: path.direction.clone(),
        });
        Ok(events)
    }

    fn post_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        player_location(state, env)
            .map(|_| ())
            .map_err(MoveError::UnknownLocation)
    }
}

/// Whether an untaken `TRIGGERS_TRAP` item at `location` holds its trap.
fn trap_rigged_to_item(state: &GameState, env: &GameEnv<'_>, location: &Location) -> bool {
    state.visible_items(location).any(|item| {
        env.world()
            .find_item(item)
            .is_some_and(|def| def.triggers_trap())
    })
}

/// Fires the location's trap at the player unless it has already sprung, and
/// records the trap fact.
pub(crate) fn spring_trap(
    state: &mut GameState,
    env: &GameEnv<'_>,
    location: &Location,
) -> Option<GameEvent> {
    let trap = location.trap.as_ref()?;
    if state.is_trap_sprung(&location.name) {
        return None;
    }

    let mut roller = DiceRoller::for_turn(env.rng(), state, CharacterId::PLAYER);
    let outcome = resolve_trap(trap, &mut state.player, &mut roller);
    state.facts_mut(&location.name).trap_sprung = true;

    Some(GameEvent::TrapTriggered {
        location: location.name.clone(),
        trap: trap.name.clone(),
        damage: outcome.taken,
    })
}
