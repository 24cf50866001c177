use crate::action::movement::spring_trap;
use crate::action::transition::player_location;
use crate::action::{ActionTransition, GameEvent};
use crate::combat::DiceRoller;
use crate::env::{GameEnv, ItemDefinition, ItemEffect};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{CharacterId, GameState, InventoryError};

// ============================================================================
// TakeItem
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TakeItemError {
    #[error("there is no '{item}' at {location}")]
    ItemNotFound { item: String, location: String },

    #[error("player stands in unknown location '{0}'")]
    UnknownLocation(String),
}

impl GameError for TakeItemError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ItemNotFound { .. } => ErrorSeverity::Recoverable,
            Self::UnknownLocation(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ItemNotFound { .. } => "TAKE_ITEM_NOT_FOUND",
            Self::UnknownLocation(_) => "TAKE_UNKNOWN_LOCATION",
        }
    }
}

/// Pick up one item lying at the current location. A declared copy is taken
/// before anything the player dropped there.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TakeItemAction {
    pub item: String,
}

impl TakeItemAction {
    pub fn new(item: impl Into<String>) -> Self {
        Self { item: item.into() }
    }

    /// Catalog definition of the requested item if one still lies at the
    /// player's location.
    fn available<'w>(
        &self,
        state: &GameState,
        env: &GameEnv<'w>,
    ) -> Result<&'w ItemDefinition, TakeItemError> {
        let location = player_location(state, env).map_err(TakeItemError::UnknownLocation)?;
        env.world()
            .find_item(&self.item)
            .filter(|def| state.is_item_present(location, &def.name))
            .ok_or_else(|| TakeItemError::ItemNotFound {
                item: self.item.clone(),
                location: location.name.clone(),
            })
    }
}

impl ActionTransition for TakeItemAction {
    type Error = TakeItemError;

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        self.available(state, env).map(|_| ())
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
    ) -> Result<Vec<GameEvent>, Self::Error> {
        let item = self.available(state, env)?;
        let location = player_location(state, env).map_err(TakeItemError::UnknownLocation)?;

        let mut events = Vec::with_capacity(2);
        if state.is_declared_item_present(location, &item.name) {
            state
                .facts_mut(&location.name)
                .items_taken
                .insert(item.name.clone());
            if item.triggers_trap() {
                events.extend(spring_trap(state, env, location));
            }
        } else if !state.facts_mut(&location.name).pick_up_dropped(&item.name) {
            return Err(TakeItemError::ItemNotFound {
                item: self.item.clone(),
                location: location.name.clone(),
            });
        }
        state.player.inventory.add_item(&item.name, 1);

        events.push(GameEvent::ItemAcquired {
            item: item.name.clone(),
            location: location.name.clone(),
        });
        Ok(events)
    }

    fn post_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let location = player_location(state, env).map_err(TakeItemError::UnknownLocation)?;
        let held = env
            .world()
            .find_item(&self.item)
            .is_some_and(|def| state.player.inventory.has_item(&def.name));
        if held {
            Ok(())
        } else {
            Err(TakeItemError::ItemNotFound {
                item: self.item.clone(),
                location: location.name.clone(),
            })
        }
    }
}

// ============================================================================
// UseItem
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UseItemError {
    #[error("'{0}' is not in the inventory")]
    ItemNotHeld(String),

    #[error("'{0}' cannot be used")]
    ItemNotUsable(String),

    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

impl GameError for UseItemError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ItemNotHeld(_) => "USE_ITEM_NOT_HELD",
            Self::ItemNotUsable(_) => "USE_ITEM_NOT_USABLE",
            Self::Inventory(err) => err.error_code(),
        }
    }
}

/// Consume or equip one held item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseItemAction {
    pub item: String,
}

impl UseItemAction {
    pub fn new(item: impl Into<String>) -> Self {
        Self { item: item.into() }
    }

    fn held<'w>(
        &self,
        state: &GameState,
        env: &GameEnv<'w>,
    ) -> Result<&'w ItemDefinition, UseItemError> {
        env.world()
            .find_item(&self.item)
            .filter(|def| state.player.inventory.has_item(&def.name))
            .ok_or_else(|| UseItemError::ItemNotHeld(self.item.clone()))
    }
}

impl ActionTransition for UseItemAction {
    type Error = UseItemError;

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let item = self.held(state, env)?;
        if item.is_consumable() || (item.is_equippable() && item.slot.is_some()) {
            Ok(())
        } else {
            Err(UseItemError::ItemNotUsable(item.name.clone()))
        }
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
    ) -> Result<Vec<GameEvent>, Self::Error> {
        let item = self.held(state, env)?;

        if item.is_consumable() {
            let remaining = state.player.inventory.remove_item(&item.name, 1)?;
            if remaining == 0 {
                if let Some(slot) = item.slot {
                    if state.player.equipment.get(slot) == Some(item.name.as_str()) {
                        state.player.equipment.unequip(slot);
                    }
                }
            }
            let mut events = vec![GameEvent::ItemConsumed {
                item: item.name.clone(),
                remaining,
            }];

            let restored = match item.effect {
                Some(ItemEffect::Heal(dice)) => {
                    let mut roller = DiceRoller::for_turn(env.rng(), state, CharacterId::PLAYER);
                    let amount = roller.roll(&dice).max(0) as u32;
                    Some(state.player.heal(amount))
                }
                Some(ItemEffect::RestoreFull) => Some(state.player.restore_full()),
                None => None,
            };
            if let Some(amount) = restored {
                events.push(GameEvent::Healed {
                    character: CharacterId::PLAYER,
                    amount,
                    health: state.player.stats.health,
                });
            }
            return Ok(events);
        }

        let slot = item
            .slot
            .ok_or_else(|| UseItemError::ItemNotUsable(item.name.clone()))?;
        let replaced = state
            .player
            .equipment
            .equip(slot, &item.name)
            .filter(|previous| previous != &item.name);
        Ok(vec![GameEvent::ItemEquipped {
            item: item.name.clone(),
            slot,
            replaced,
        }])
    }
}

// ============================================================================
// DropItem
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DropItemError {
    #[error("'{0}' is not in the inventory")]
    ItemNotHeld(String),

    #[error("player stands in unknown location '{0}'")]
    UnknownLocation(String),

    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

impl GameError for DropItemError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ItemNotHeld(_) | Self::Inventory(_) => ErrorSeverity::Recoverable,
            Self::UnknownLocation(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ItemNotHeld(_) => "DROP_ITEM_NOT_HELD",
            Self::UnknownLocation(_) => "DROP_UNKNOWN_LOCATION",
            Self::Inventory(err) => err.error_code(),
        }
    }
}

/// Put one held item down at the current location, unequipping it when it
/// was the last copy.
///
/// Dropping an obstacle does not block its path again.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropItemAction {
    pub item: String,
}

impl DropItemAction {
    pub fn new(item: impl Into<String>) -> Self {
        Self { item: item.into() }
    }

    fn held<'w>(
        &self,
        state: &GameState,
        env: &GameEnv<'w>,
    ) -> Result<&'w ItemDefinition, DropItemError> {
        env.world()
            .find_item(&self.item)
            .filter(|def| state.player.inventory.has_item(&def.name))
            .ok_or_else(|| DropItemError::ItemNotHeld(self.item.clone()))
    }
}

impl ActionTransition for DropItemAction {
    type Error = DropItemError;

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        player_location(state, env).map_err(DropItemError::UnknownLocation)?;
        self.held(state, env).map(|_| ())
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
    ) -> Result<Vec<GameEvent>, Self::Error> {
        let item = self.held(state, env)?;
        let location = player_location(state, env).map_err(DropItemError::UnknownLocation)?;

        let remaining = state.player.inventory.remove_item(&item.name, 1)?;
        let mut unequipped = None;
        if remaining == 0 {
            if let Some(slot) = item.slot {
                if state.player.equipment.get(slot) == Some(item.name.as_str()) {
                    state.player.equipment.unequip(slot);
                    unequipped = Some(slot);
                }
            }
        }
        state.facts_mut(&location.name).drop_item(&item.name);

        Ok(vec![GameEvent::ItemDropped {
            item: item.name.clone(),
            location: location.name.clone(),
            remaining,
            unequipped,
        }])
    }

    fn post_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let location = player_location(state, env).map_err(DropItemError::UnknownLocation)?;
        let lying = env
            .world()
            .find_item(&self.item)
            .is_some_and(|def| state.is_item_present(location, &def.name));
        if lying {
            Ok(())
        } else {
            Err(DropItemError::ItemNotHeld(self.item.clone()))
        }
    }
}
