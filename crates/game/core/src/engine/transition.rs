//! Intent dispatch and the three-phase transition pipeline.

use crate::action::{ActionTransition, GameEvent, Intent, RestAction};
use crate::env::GameEnv;
use crate::state::GameState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Output of one transition: its events and the turn units it consumed
/// (never less than one).
pub(super) struct TransitionOutput {
    pub events: Vec<GameEvent>,
    pub cost: u64,
}

/// Executes a transition through the three-phase pipeline.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the game state and collect events
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<TransitionOutput, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let events = transition
        .apply(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(TransitionOutput {
        events,
        cost: transition.cost(env).max(1),
    })
}

/// Routes each intent to its transition.
pub(super) fn execute_transition(
    intent: &Intent,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<TransitionOutput, ExecuteError> {
    match intent {
        Intent::Move(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Move)
        }
        Intent::TakeItem(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::TakeItem)
        }
        Intent::UseItem(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::UseItem)
        }
        Intent::DropItem(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::DropItem)
        }
        Intent::Attack(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Attack)
        }
        Intent::Rest => drive_transition(&RestAction, state, env).map_err(ExecuteError::Rest),
    }
}
