//! Immutable location graph built once from a [`WorldDefinition`].
//!
//! Locations live in an arena indexed by [`LocationId`]; paths refer to their
//! destination by id, and a name index keyed by the normalized location name
//! gives O(1) lookups. Nothing in the graph changes after [`WorldGraph::build`]
//! returns: per-session facts (taken items, sprung traps, defeated hostiles)
//! live in [`GameState`](crate::state::GameState).

use std::collections::HashMap;

use super::definition::{LocationKind, WorldDefinition};
use super::error::WorldError;
use super::hazards::{HostileDefinition, TrapDefinition};
use super::items::ItemDefinition;

/// Arena index of a location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationId(pub u32);

/// Arena index of a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub u32);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
    pub description: String,
    pub locations: Vec<LocationId>,
}

/// Directed edge between two locations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    pub direction: String,
    pub destination: LocationId,
    pub description: String,
    pub distance: String,
    pub blocked_by: Option<String>,
    direction_key: String,
}

impl Path {
    /// Whether `text` names this path's direction (case and spacing ignored).
    pub fn matches(&self, text: &str) -> bool {
        self.direction_key == normalize_key(text)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub id: LocationId,
    pub region: RegionId,
    pub name: String,
    pub kind: LocationKind,
    pub description: String,
    pub safe: bool,
    pub paths: Vec<Path>,
    pub items: Vec<String>,
    pub trap: Option<TrapDefinition>,
    pub hostiles: Vec<HostileDefinition>,
}

impl Location {
    /// Finds a hostile declared here by name, ignoring case.
    pub fn hostile(&self, name: &str) -> Option<&HostileDefinition> {
        let key = normalize_key(name);
        self.hostiles.iter().find(|h| normalize_key(&h.name) == key)
    }

    /// Whether `item` (canonical name) is declared at this location.
    pub fn declares_item(&self, item: &str) -> bool {
        self.items.iter().any(|i| i == item)
    }
}

/// Lowercases and collapses internal whitespace.
pub fn normalize_key(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Read-only world: regions, locations, paths and the item catalog.
#[derive(Clone, Debug)]
pub struct WorldGraph {
    regions: Vec<Region>,
    locations: Vec<Location>,
    location_index: HashMap<String, LocationId>,
    items: Vec<ItemDefinition>,
    item_index: HashMap<String, usize>,
}

impl WorldGraph {
    /// Validates a definition and builds the graph.
    ///
    /// # Errors
    ///
    /// Fails on duplicate region, location, item or hostile names, on a path
    /// whose destination or blocker does not exist, on an empty direction, and
    /// on an equippable item without a slot.
    pub fn build(definition: WorldDefinition) -> Result<Self, WorldError> {
        let mut graph = Self {
            regions: Vec::new(),
            locations: Vec::new(),
            location_index: HashMap::new(),
            items: Vec::new(),
            item_index: HashMap::new(),
        };

        for item in definition.items {
            if item.is_equippable() && item.slot.is_none() {
                return Err(WorldError::MissingEquipSlot(item.name));
            }
            graph.register_item(item)?;
        }

        // First pass: allocate every location so paths can resolve forward references.
        let mut region_names = HashMap::new();
        let mut pending_paths = Vec::new();
        for region_def in definition.regions {
            let region_id = RegionId(graph.regions.len() as u32);
            if region_names
                .insert(normalize_key(&region_def.name), region_id)
                .is_some()
            {
                return Err(WorldError::DuplicateRegion(region_def.name));
            }

            let mut region = Region {
                id: region_id,
                name: region_def.name,
                description: region_def.description,
                locations: Vec::new(),
            };

            for location_def in region_def.locations {
                let id = LocationId(graph.locations.len() as u32);
                let key = normalize_key(&location_def.name);
                if graph.location_index.insert(key, id).is_some() {
                    return Err(WorldError::DuplicateLocation(location_def.name));
                }

                let mut hostile_names = Vec::new();
                for hostile in &location_def.hostiles {
                    let hostile_key = normalize_key(&hostile.name);
                    if hostile_names.contains(&hostile_key) {
                        return Err(WorldError::DuplicateHostile {
                            location: location_def.name.clone(),
                            hostile: hostile.name.clone(),
                        });
                    }
                    hostile_names.push(hostile_key);
                }

                let mut items = Vec::with_capacity(location_def.items.len());
                for item in location_def.items {
                    items.push(graph.canonical_or_register(&item));
                }

                pending_paths.push((id, location_def.paths));
                region.locations.push(id);
                graph.locations.push(Location {
                    id,
                    region: region_id,
                    safe: location_def
                        .safe
                        .unwrap_or_else(|| location_def.kind.is_safe_by_default()),
                    name: location_def.name,
                    kind: location_def.kind,
                    description: location_def.description,
                    paths: Vec::new(),
                    items,
                    trap: location_def.trap,
                    hostiles: location_def.hostiles,
                });
            }

            graph.regions.push(region);
        }

        if graph.locations.is_empty() {
            return Err(WorldError::EmptyWorld);
        }

        // Second pass: resolve path destinations now that every name is known.
        for (origin, path_defs) in pending_paths {
            let mut paths = Vec::with_capacity(path_defs.len());
            for path_def in path_defs {
                let from = graph.location(origin).name.clone();
                let direction_key = normalize_key(&path_def.direction);
                if direction_key.is_empty() {
                    return Err(WorldError::EmptyDirection {
                        from,
                        direction: path_def.direction,
                    });
                }

                let Some(destination) = graph.location_id(&path_def.destination) else {
                    return Err(WorldError::DanglingPath {
                        from,
                        direction: path_def.direction,
                        destination: path_def.destination,
                    });
                };

                let blocked_by = match path_def.blocked_by {
                    Some(item) => match graph.find_item(&item) {
                        Some(definition) => Some(definition.name.clone()),
                        None => {
                            return Err(WorldError::UnknownBlocker {
                                from,
                                direction: path_def.direction,
                                item,
                            });
                        }
                    },
                    None => None,
                };

                paths.push(Path {
                    direction: path_def.direction,
                    destination,
                    description: path_def.description,
                    distance: path_def.distance,
                    blocked_by,
                    direction_key,
                });
            }
            graph.locations[origin.0 as usize].paths = paths;
        }

        Ok(graph)
    }

    fn register_item(&mut self, item: ItemDefinition) -> Result<(), WorldError> {
        let key = normalize_key(&item.name);
        if self.item_index.contains_key(&key) {
            return Err(WorldError::DuplicateItem(item.name));
        }
        self.item_index.insert(key, self.items.len());
        self.items.push(item);
        Ok(())
    }

    /// Returns the catalog spelling of `name`, registering a plain item when
    /// the catalog has no entry for it.
    fn canonical_or_register(&mut self, name: &str) -> String {
        if let Some(existing) = self.find_item(name) {
            return existing.name.clone();
        }
        let canonical = name.trim().to_string();
        self.item_index
            .insert(normalize_key(&canonical), self.items.len());
        self.items.push(ItemDefinition::plain(canonical.clone()));
        canonical
    }

    // ===== lookups =====

    /// Exact-name lookup, case-insensitive.
    pub fn find_location(&self, name: &str) -> Option<&Location> {
        self.location_id(name).map(|id| self.location(id))
    }

    pub fn location_id(&self, name: &str) -> Option<LocationId> {
        self.location_index.get(&normalize_key(name)).copied()
    }

    /// Returns the location with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this graph.
    pub fn location(&self, id: LocationId) -> &Location {
        &self.locations[id.0 as usize]
    }

    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    pub fn region(&self, id: RegionId) -> &Region {
        &self.regions[id.0 as usize]
    }

    pub fn region_of(&self, location: &Location) -> &Region {
        self.region(location.region)
    }

    pub fn find_region(&self, name: &str) -> Option<&Region> {
        let key = normalize_key(name);
        self.regions.iter().find(|r| normalize_key(&r.name) == key)
    }

    /// Outgoing paths in declaration order.
    pub fn paths_from<'a>(&self, location: &'a Location) -> &'a [Path] {
        &location.paths
    }

    /// First path (in declaration order) whose direction matches `direction`.
    pub fn resolve_direction<'a>(&self, location: &'a Location, direction: &str) -> Option<&'a Path> {
        let key = normalize_key(direction);
        location.paths.iter().find(|p| p.direction_key == key)
    }

    /// Item definition by name, case-insensitive.
    pub fn find_item(&self, name: &str) -> Option<&ItemDefinition> {
        self.item_index
            .get(&normalize_key(name))
            .map(|&idx| &self.items[idx])
    }

    pub fn items(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.items.iter()
    }

    pub fn location_count(&self) -> usize {
        self.locations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::DiceExpr;
    use crate::env::definition::{LocationDefinition, PathDefinition, RegionDefinition};
    use crate::env::items::{EquipSlot, ItemFlags};

    fn region(name: &str, locations: Vec<LocationDefinition>) -> RegionDefinition {
        RegionDefinition {
            name: name.to_string(),
            description: String::new(),
            locations,
        }
    }

    fn two_room_world() -> WorldDefinition {
        WorldDefinition {
            regions: vec![region(
                "Vale",
                vec![
                    LocationDefinition::new("Gate", LocationKind::Road)
                        .with_path(PathDefinition::new("north northeast", "Keep"))
                        .with_path(PathDefinition::new("North", "Keep").with_distance("1 hour"))
                        .with_item("Rusty Key"),
                    LocationDefinition::new("Keep", LocationKind::Town)
                        .with_path(PathDefinition::new("south", "Gate")),
                ],
            )],
            items: vec![],
        }
    }

    #[test]
    fn builds_and_finds_locations_case_insensitively() {
        let world = WorldGraph::build(two_room_world()).unwrap();
        assert_eq!(world.location_count(), 2);
        assert_eq!(world.find_location("gate").unwrap().name, "Gate");
        assert_eq!(world.find_location("  KEEP ").unwrap().name, "Keep");
        assert!(world.find_location("Cellar").is_none());
    }

    #[test]
    fn resolves_free_form_directions() {
        let world = WorldGraph::build(two_room_world()).unwrap();
        let gate = world.find_location("Gate").unwrap();

        let path = world.resolve_direction(gate, "North   NorthEast").unwrap();
        assert_eq!(world.location(path.destination).name, "Keep");
        assert_eq!(path.direction, "north northeast");

        let path = world.resolve_direction(gate, "north").unwrap();
        assert_eq!(path.distance, "1 hour");
        assert!(world.resolve_direction(gate, "west").is_none());
    }

    #[test]
    fn paths_keep_declaration_order() {
        let world = WorldGraph::build(two_room_world()).unwrap();
        let gate = world.find_location("Gate").unwrap();
        let directions: Vec<_> = world
            .paths_from(gate)
            .iter()
            .map(|p| p.direction.as_str())
            .collect();
        assert_eq!(directions, vec!["north northeast", "North"]);
    }

    #[test]
    fn first_matching_direction_wins() {
        let mut def = two_room_world();
        def.regions[0].locations[1] = LocationDefinition::new("Keep", LocationKind::Town)
            .with_path(PathDefinition::new("south", "Gate"))
            .with_path(PathDefinition::new("SOUTH", "Keep"));
        let world = WorldGraph::build(def).unwrap();
        let keep = world.find_location("Keep").unwrap();
        let path = world.resolve_direction(keep, "south").unwrap();
        assert_eq!(world.location(path.destination).name, "Gate");
    }

    #[test]
    fn rejects_dangling_destination() {
        let mut def = two_room_world();
        def.regions[0].locations[1]
            .paths
            .push(PathDefinition::new("down", "Dungeon"));
        let err = WorldGraph::build(def).unwrap_err();
        assert_eq!(
            err,
            WorldError::DanglingPath {
                from: "Keep".into(),
                direction: "down".into(),
                destination: "Dungeon".into(),
            }
        );
    }

    #[test]
    fn rejects_duplicate_location_names_across_regions() {
        let mut def = two_room_world();
        def.regions.push(region(
            "Hills",
            vec![LocationDefinition::new("gate", LocationKind::Road)],
        ));
        assert_eq!(
            WorldGraph::build(def).unwrap_err(),
            WorldError::DuplicateLocation("gate".into())
        );
    }

    #[test]
    fn rejects_empty_world() {
        assert_eq!(
            WorldGraph::build(WorldDefinition::default()).unwrap_err(),
            WorldError::EmptyWorld
        );
    }

    #[test]
    fn registers_uncatalogued_location_items() {
        let world = WorldGraph::build(two_room_world()).unwrap();
        let key = world.find_item("rusty key").unwrap();
        assert_eq!(key.name, "Rusty Key");
        assert_eq!(key.flags, ItemFlags::empty());
    }

    #[test]
    fn location_items_use_catalog_spelling() {
        let mut def = two_room_world();
        def.items
            .push(ItemDefinition::equippable("Short Sword", EquipSlot::Weapon));
        def.regions[0].locations[1].items.push("short sword".into());
        let world = WorldGraph::build(def).unwrap();
        assert_eq!(world.find_location("Keep").unwrap().items, vec!["Short Sword"]);
    }

    #[test]
    fn rejects_equippable_without_slot() {
        let mut def = two_room_world();
        def.items
            .push(ItemDefinition::plain("Cloak").with_flags(ItemFlags::EQUIPPABLE));
        assert_eq!(
            WorldGraph::build(def).unwrap_err(),
            WorldError::MissingEquipSlot("Cloak".into())
        );
    }

    #[test]
    fn rejects_unknown_blocker() {
        let mut def = two_room_world();
        def.regions[0].locations[0].paths[0].blocked_by = Some("Boulder".into());
        assert!(matches!(
            WorldGraph::build(def).unwrap_err(),
            WorldError::UnknownBlocker { .. }
        ));
    }

    #[test]
    fn rejects_duplicate_hostiles() {
        let mut def = two_room_world();
        let wolf = HostileDefinition::new("Wolf", 5, DiceExpr::new(1, 4, 0), 10);
        def.regions[0].locations[0].hostiles = vec![wolf.clone(), wolf];
        assert!(matches!(
            WorldGraph::build(def).unwrap_err(),
            WorldError::DuplicateHostile { .. }
        ));
    }

    #[test]
    fn safety_follows_kind_unless_overridden() {
        let mut def = two_room_world();
        def.regions[0].locations[0].safe = Some(true);
        let world = WorldGraph::build(def).unwrap();
        assert!(world.find_location("Gate").unwrap().safe);
        assert!(world.find_location("Keep").unwrap().safe);
    }

    #[test]
    fn region_of_location() {
        let world = WorldGraph::build(two_room_world()).unwrap();
        let keep = world.find_location("Keep").unwrap();
        assert_eq!(world.region_of(keep).name, "Vale");
        assert_eq!(world.find_region("vale").unwrap().locations.len(), 2);
    }
}
