//! Persisted save record and its on-disk encodings.
//!
//! A [`SaveArtifact`] wraps the full [`GameState`] with a format version, a
//! timestamp and a SHA-256 checksum of the state's canonical JSON encoding.
//! Artifacts are written as pretty JSON or as bincode, see [`SaveFormat`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use game_core::{GameConfig, GameState};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::error::{LoadError, SaveError};

/// Everything needed to resume a session, paired with the world it came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveArtifact {
    pub format_version: u32,
    /// Serialized as RFC 3339.
    pub saved_at: DateTime<Utc>,
    /// Hex SHA-256 of the canonical JSON encoding of `state`.
    pub checksum: String,
    pub state: GameState,
}

impl SaveArtifact {
    /// Captures `state` at the current time.
    pub fn new(state: GameState) -> Result<Self, SaveError> {
        let checksum = state_checksum(&state).map_err(|e| SaveError::Encode(e.to_string()))?;
        Ok(Self {
            format_version: GameConfig::SAVE_FORMAT_VERSION,
            saved_at: Utc::now(),
            checksum,
            state,
        })
    }

    /// Rejects artifacts written by another format version.
    pub fn check_version(&self) -> Result<(), LoadError> {
        check_version(self.format_version)
    }

    /// Recomputes the state checksum and compares it with the recorded one.
    pub fn verify(&self) -> Result<(), LoadError> {
        let computed = state_checksum(&self.state).map_err(|e| LoadError::Decode(e.to_string()))?;
        if computed != self.checksum {
            return Err(LoadError::CorruptedSave {
                recorded: self.checksum.clone(),
                computed,
            });
        }
        Ok(())
    }
}

/// Hex SHA-256 digest of the canonical JSON encoding of `state`.
///
/// Maps in the state are ordered, so equal states always hash equally.
pub fn state_checksum(state: &GameState) -> Result<String, serde_json::Error> {
    let canonical = serde_json::to_vec(state)?;
    Ok(hex::encode(Sha256::digest(&canonical)))
}

fn check_version(found: u32) -> Result<(), LoadError> {
    if found != GameConfig::SAVE_FORMAT_VERSION {
        return Err(LoadError::UnsupportedVersion {
            found,
            expected: GameConfig::SAVE_FORMAT_VERSION,
        });
    }
    Ok(())
}

/// Leading fields shared by every format version.
#[derive(Deserialize)]
struct ArtifactHeader {
    format_version: u32,
}

/// Byte encoding of a [`SaveArtifact`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SaveFormat {
    #[default]
    Json,
    Binary,
}

impl SaveFormat {
    pub fn extension(self) -> &'static str {
        match self {
            SaveFormat::Json => "json",
            SaveFormat::Binary => "bin",
        }
    }

    /// Guesses the encoding of `bytes`: JSON documents open with `{`.
    pub fn detect(bytes: &[u8]) -> Self {
        match bytes.iter().find(|b| !b.is_ascii_whitespace()) {
            Some(b'{') => SaveFormat::Json,
            _ => SaveFormat::Binary,
        }
    }

    pub fn encode(self, artifact: &SaveArtifact) -> Result<Vec<u8>, SaveError> {
        match self {
            SaveFormat::Json => {
                serde_json::to_vec_pretty(artifact).map_err(|e| SaveError::Encode(e.to_string()))
            }
            SaveFormat::Binary => {
                bincode::serialize(artifact).map_err(|e| SaveError::Encode(e.to_string()))
            }
        }
    }

    /// Decodes an artifact, reading the format version before anything else
    /// so that records from another version never reach the full decoder.
    ///
    /// The checksum is not verified here; see [`SaveArtifact::verify`].
    pub fn decode(self, bytes: &[u8]) -> Result<SaveArtifact, LoadError> {
        let header: ArtifactHeader = match self {
            SaveFormat::Json => {
                serde_json::from_slice(bytes).map_err(|e| LoadError::Decode(e.to_string()))?
            }
            SaveFormat::Binary => {
                bincode::deserialize(bytes).map_err(|e| LoadError::Decode(e.to_string()))?
            }
        };
        check_version(header.format_version)?;

        match self {
            SaveFormat::Json => {
                serde_json::from_slice(bytes).map_err(|e| LoadError::Decode(e.to_string()))
            }
            SaveFormat::Binary => {
                bincode::deserialize(bytes).map_err(|e| LoadError::Decode(e.to_string()))
            }
        }
    }
}

impl fmt::Display for SaveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveFormat::Json => f.write_str("json"),
            SaveFormat::Binary => f.write_str("binary"),
        }
    }
}

impl FromStr for SaveFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(SaveFormat::Json),
            "binary" | "bin" | "bincode" => Ok(SaveFormat::Binary),
            other => Err(format!("unknown save format '{other}' (expected json or binary)")),
        }
    }
}
