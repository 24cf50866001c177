mod character;
mod equipment;
mod facts;
mod inventory;
mod status;

pub use character::{Character, CharacterId, CharacterStats};
pub use equipment::Equipment;
pub use facts::LocationFacts;
pub use inventory::Inventory;
pub use status::{SessionStatus, StatusFlags};
