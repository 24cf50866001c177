//! Grounding view of the player's surroundings.
//!
//! Handed to the narrative layer with every report so descriptions only
//! mention exits, items and hostiles that really exist.

use crate::env::{LocationKind, WorldGraph};
use crate::state::{GameState, StateValidationError};

/// What the player can perceive and do at the current location.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationView {
    pub location: String,
    pub region: String,
    pub kind: LocationKind,
    pub description: String,
    /// Open exits in declaration order.
    pub directions: Vec<String>,
    /// Items still lying here, in declaration order.
    pub items: Vec<String>,
    /// Hostiles still standing here.
    pub hostiles: Vec<String>,
    pub can_rest: bool,
}

impl LocationView {
    /// Captures the view from the player's current location.
    ///
    /// # Errors
    ///
    /// Fails when the player stands in a location the world does not know.
    pub fn capture(state: &GameState, world: &WorldGraph) -> Result<Self, StateValidationError> {
        let location = state.current_location(world).ok_or_else(|| {
            StateValidationError::UnknownLocation {
                character: state.player.id,
                location: state.player.location.clone(),
            }
        })?;

        let directions = world
            .paths_from(location)
            .iter()
            .filter(|path| match &path.blocked_by {
                Some(item) => state.is_item_taken(&location.name, item),
                None => true,
            })
            .map(|path| path.direction.clone())
            .collect();

        Ok(Self {
            location: location.name.clone(),
            region: world.region_of(location).name.clone(),
            kind: location.kind,
            description: location.description.clone(),
            directions,
            items: state.visible_items(location).map(str::to_string).collect(),
            hostiles: state
                .living_hostiles_at(&location.name)
                .map(|h| h.name.clone())
                .collect(),
            can_rest: location.safe,
        })
    }
}
