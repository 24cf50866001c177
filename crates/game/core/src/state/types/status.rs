use bitflags::bitflags;

bitflags! {
    /// Condition flags of a character.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct StatusFlags: u8 {
        /// Health reached zero.
        const INCAPACITATED = 1 << 0;
        /// Defeat confirmed; the character takes no further part.
        const DEAD          = 1 << 1;
    }
}

/// Lifecycle of a session. `Over` is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SessionStatus {
    #[default]
    Active,
    Over,
}
