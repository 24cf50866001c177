use crate::env::EquipSlot;
use crate::state::CharacterId;

/// Structured record of something that happened while resolving an intent.
///
/// Events are ordered and carry everything a narrator needs to describe the
/// outcome without consulting the state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum GameEvent {
    Moved {
        from: String,
        to: String,
        direction: String,
    },
    TrapTriggered {
        location: String,
        trap: String,
        damage: u32,
    },
    ItemAcquired {
        item: String,
        location: String,
    },
    ItemDropped {
        item: String,
        location: String,
        remaining: u32,
        unequipped: Option<EquipSlot>,
    },
    ItemConsumed {
        item: String,
        remaining: u32,
    },
    Healed {
        character: CharacterId,
        amount: u32,
        health: u32,
    },
    ItemEquipped {
        item: String,
        slot: EquipSlot,
        replaced: Option<String>,
    },
    AttackHit {
        attacker: String,
        defender: String,
        roll: i32,
        damage: u32,
    },
    AttackMissed {
        attacker: String,
        defender: String,
        roll: i32,
    },
    CharacterDefeated {
        character: CharacterId,
        name: String,
        location: String,
    },
    Rested {
        location: String,
        healed: u32,
        turns: u64,
    },
}

impl GameEvent {
    /// Snake-case tag of the event kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Moved { .. } => "moved",
            Self::TrapTriggered { .. } => "trap_triggered",
            Self::ItemAcquired { .. } => "item_acquired",
            Self::ItemDropped { .. } => "item_dropped",
            Self::ItemConsumed { .. } => "item_consumed",
            Self::Healed { .. } => "healed",
            Self::ItemEquipped { .. } => "item_equipped",
            Self::AttackHit { .. } => "attack_hit",
            Self::AttackMissed { .. } => "attack_missed",
            Self::CharacterDefeated { .. } => "character_defeated",
            Self::Rested { .. } => "rested",
        }
    }
}
