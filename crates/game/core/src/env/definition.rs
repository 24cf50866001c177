//! Plain records a world is authored in.
//!
//! These mirror the on-disk scenario format one-to-one. They carry no
//! invariants; [`WorldGraph::build`](super::WorldGraph::build) validates them.

use super::hazards::{HostileDefinition, TrapDefinition};
use super::items::ItemDefinition;

/// Category tag of a location.
///
/// Unrecognised tags in a world file load as [`LocationKind::Other`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum LocationKind {
    Road,
    Town,
    Inn,
    Building,
    Forest,
    Camp,
    Ruins,
    CaveEntrance,
    Cave,
    Dungeon,
    Wilderness,
    #[default]
    Other,
}

impl LocationKind {
    /// Whether locations of this kind allow resting unless overridden.
    pub const fn is_safe_by_default(self) -> bool {
        matches!(self, Self::Town | Self::Inn)
    }
}

impl From<String> for LocationKind {
    fn from(tag: String) -> Self {
        let tag = tag.trim().replace([' ', '_'], "-");
        tag.parse().unwrap_or(Self::Other)
    }
}

impl From<LocationKind> for String {
    fn from(kind: LocationKind) -> Self {
        kind.as_ref().to_string()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldDefinition {
    pub regions: Vec<RegionDefinition>,

    /// Item catalog. Names used in location item lists but missing here are
    /// registered as plain items.
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: Vec<ItemDefinition>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionDefinition {
    pub name: String,

    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,

    pub locations: Vec<LocationDefinition>,
}

impl RegionDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        locations: Vec<LocationDefinition>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            locations,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationDefinition {
    pub name: String,

    #[cfg_attr(feature = "serde", serde(rename = "type", default))]
    pub kind: LocationKind,

    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,

    /// Overrides [`LocationKind::is_safe_by_default`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub safe: Option<bool>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub paths: Vec<PathDefinition>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub items: Vec<String>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub trap: Option<TrapDefinition>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub hostiles: Vec<HostileDefinition>,
}

impl LocationDefinition {
    pub fn new(name: impl Into<String>, kind: LocationKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    pub fn with_path(mut self, path: PathDefinition) -> Self {
        self.paths.push(path);
        self
    }

    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.items.push(item.into());
        self
    }

    pub fn with_trap(mut self, trap: TrapDefinition) -> Self {
        self.trap = Some(trap);
        self
    }

    pub fn with_hostile(mut self, hostile: HostileDefinition) -> Self {
        self.hostiles.push(hostile);
        self
    }

    pub fn with_safe(mut self, safe: bool) -> Self {
        self.safe = Some(safe);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathDefinition {
    /// Free-form compass token, e.g. `"north northeast"`.
    pub direction: String,

    /// Name of the destination location.
    pub destination: String,

    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,

    /// Advisory travel time label; not consumed by the rules.
    #[cfg_attr(feature = "serde", serde(default))]
    pub distance: String,

    /// Item that obstructs this path while it lies at the origin.
    #[cfg_attr(feature = "serde", serde(default))]
    pub blocked_by: Option<String>,
}

impl PathDefinition {
    pub fn new(direction: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            direction: direction.into(),
            destination: destination.into(),
            ..Self::default()
        }
    }

    pub fn with_distance(mut self, distance: impl Into<String>) -> Self {
        self.distance = distance.into();
        self
    }

    pub fn blocked_by(mut self, item: impl Into<String>) -> Self {
        self.blocked_by = Some(item.into());
        self
    }
}
