use crate::action::transition::player_location;
use crate::action::{ActionTransition, GameEvent};
use crate::combat::{AttackResult, CombatProfile, DiceRoller, check_defeat, resolve_attack};
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Character, CharacterId, GameState};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackError {
    #[error("there is no '{target}' to fight at {location}")]
    NoSuchTarget { target: String, location: String },

    #[error("{0} has already been defeated")]
    TargetAlreadyDefeated(String),

    #[error("player stands in unknown location '{0}'")]
    UnknownLocation(String),
}

impl GameError for AttackError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoSuchTarget { .. } | Self::TargetAlreadyDefeated(_) => {
                ErrorSeverity::Recoverable
            }
            Self::UnknownLocation(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoSuchTarget { .. } => "ATTACK_NO_SUCH_TARGET",
            Self::TargetAlreadyDefeated(_) => "ATTACK_TARGET_ALREADY_DEFEATED",
            Self::UnknownLocation(_) => "ATTACK_UNKNOWN_LOCATION",
        }
    }
}

/// One exchange of blows with a hostile at the current location: the player
/// strikes first, and a surviving target strikes back.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackAction {
    pub target: String,
}

impl AttackAction {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    /// Index of the living target in `state.hostiles`.
    fn target_index(&self, state: &GameState, env: &GameEnv<'_>) -> Result<usize, AttackError> {
        let location = player_location(state, env).map_err(AttackError::UnknownLocation)?;
        let target = state
            .hostile_at(&location.name, &self.target)
            .ok_or_else(|| AttackError::NoSuchTarget {
                target: self.target.clone(),
                location: location.name.clone(),
            })?;
        if target.is_dead() {
            return Err(AttackError::TargetAlreadyDefeated(target.name.clone()));
        }

        state
            .hostiles
            .iter()
            .position(|h| h.id == target.id)
            .ok_or_else(|| AttackError::NoSuchTarget {
                target: self.target.clone(),
                location: location.name.clone(),
            })
    }
}

impl ActionTransition for AttackAction {
    type Error = AttackError;

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        self.target_index(state, env).map(|_| ())
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
    ) -> Result<Vec<GameEvent>, Self::Error> {
        let index = self.target_index(state, env)?;
        let world = env.world();
        let config = env.config();

        let player_profile = CombatProfile::of(&state.player, world, config);
        let hostile_profile = CombatProfile::of(&state.hostiles[index], world, config);
        let hostile_id = state.hostiles[index].id;
        let mut player_roller = DiceRoller::for_turn(env.rng(), state, CharacterId::PLAYER);
        let mut hostile_roller = DiceRoller::for_turn(env.rng(), state, hostile_id);

        let mut events = Vec::with_capacity(3);
        let GameState {
            player, hostiles, ..
        } = &mut *state;
        let hostile = &mut hostiles[index];

        let strike = resolve_attack(
            &player_profile,
            hostile,
            hostile_profile.defense,
            &mut player_roller,
        );
        events.push(exchange_event(strike, player, hostile));

        if check_defeat(hostile) {
            hostile.mark_dead();
            let name = hostile.name.clone();
            let location = hostile.location.clone();
            events.push(GameEvent::CharacterDefeated {
                character: hostile_id,
                name: name.clone(),
                location: location.clone(),
            });
            state
                .facts_mut(&location)
                .hostiles_defeated
                .insert(name);
            return Ok(events);
        }

        let counter = resolve_attack(
            &hostile_profile,
            player,
            player_profile.defense,
            &mut hostile_roller,
        );
        events.push(exchange_event(counter, hostile, player));
        Ok(events)
    }

    fn post_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let location = player_location(state, env).map_err(AttackError::UnknownLocation)?;
        match state.hostile_at(&location.name, &self.target) {
            Some(_) => Ok(()),
            None => Err(AttackError::NoSuchTarget {
                target: self.target.clone(),
                location: location.name.clone(),
            }),
        }
    }
}

fn exchange_event(result: AttackResult, attacker: &Character, defender: &Character) -> GameEvent {
    match result {
        AttackResult::Hit(hit) => GameEvent::AttackHit {
            attacker: attacker.name.clone(),
            defender: defender.name.clone(),
            roll: hit.roll,
            damage: hit.taken,
        },
        AttackResult::Miss(miss) => GameEvent::AttackMissed {
            attacker: attacker.name.clone(),
            defender: defender.name.clone(),
            roll: miss.roll,
        },
    }
}
