use crate::env::{GameEnv, Location};
use crate::state::GameState;

use super::GameEvent;

/// Defines how a concrete intent mutates game state.
///
/// Implementors can override the validation hooks to surface pre- and
/// post-conditions that must hold around the state mutation. The hooks
/// receive read-only access to the world, rules and randomness via
/// [`GameEnv`] and must stay side-effect free.
pub trait ActionTransition {
    type Error;

    /// Turn units consumed by a successful resolution.
    fn cost(&self, _env: &GameEnv<'_>) -> u64 {
        1
    }

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the intent by mutating the game state directly and returns the
    /// events it produced, in order. Implementations may assume that
    /// `pre_validate` has already run successfully.
    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>)
    -> Result<Vec<GameEvent>, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// The location the player stands in, or the player's dangling location name.
pub(crate) fn player_location<'w>(
    state: &GameState,
    env: &GameEnv<'w>,
) -> Result<&'w Location, String> {
    state
        .current_location(env.world())
        .ok_or_else(|| state.player.location.clone())
}
