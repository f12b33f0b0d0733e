//! The overworld graph: locations joined by bidirectional connections.
//!
//! The world is owned by the session and queried read-only by everything
//! else; only the reducer marks locations explored.

use super::common::AssetId;

/// Identifies a location within the world graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationId(pub u32);

/// A single place the player can stand in.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub description: String,
    pub explored: bool,
    /// Optional overview-map asset forwarded to the presentation layer.
    pub map_asset: Option<AssetId>,
    connections: Vec<LocationId>,
}

impl Location {
    pub fn new(id: LocationId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            explored: false,
            map_asset: None,
            connections: Vec::new(),
        }
    }

    pub fn connections(&self) -> &[LocationId] {
        &self.connections
    }
}

/// Graph of locations. Connections are always bidirectional.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct World {
    locations: Vec<Location>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a location, returning its id. Ids are assigned in insertion
    /// order.
    pub fn add_location(&mut self, name: impl Into<String>, description: impl Into<String>) -> LocationId {
        let id = LocationId(self.locations.len() as u32);
        self.locations.push(Location::new(id, name, description));
        id
    }

    /// Connects two locations in both directions. Duplicate edges and
    /// self-loops are ignored.
    pub fn connect(&mut self, a: LocationId, b: LocationId) {
        if a == b || self.location(a).is_none() || self.location(b).is_none() {
            return;
        }
        let forward = &mut self.locations[a.0 as usize].connections;
        if !forward.contains(&b) {
            forward.push(b);
        }
        let backward = &mut self.locations[b.0 as usize].connections;
        if !backward.contains(&a) {
            backward.push(a);
        }
    }

    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(id.0 as usize)
    }

    pub fn contains(&self, id: LocationId) -> bool {
        self.location(id).is_some()
    }

    /// Ids reachable in one step from `id`.
    pub fn neighbors(&self, id: LocationId) -> &[LocationId] {
        self.location(id).map(Location::connections).unwrap_or(&[])
    }

    pub fn is_connected(&self, from: LocationId, to: LocationId) -> bool {
        self.neighbors(from).contains(&to)
    }

    pub fn mark_explored(&mut self, id: LocationId) {
        if let Some(location) = self.locations.get_mut(id.0 as usize) {
            location.explored = true;
        }
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connections_are_bidirectional() {
        let mut world = World::new();
        let a = world.add_location("Crossroads", "Paths meet here.");
        let b = world.add_location("Old Mill", "The wheel is still.");
        world.connect(a, b);

        assert!(world.is_connected(a, b));
        assert!(world.is_connected(b, a));
    }

    #[test]
    fn duplicate_edges_and_self_loops_are_ignored() {
        let mut world = World::new();
        let a = world.add_location("A", "");
        let b = world.add_location("B", "");
        world.connect(a, b);
        world.connect(a, b);
        world.connect(a, a);

        assert_eq!(world.neighbors(a), [b]);
    }

    #[test]
    fn mark_explored_flips_the_flag_once() {
        let mut world = World::new();
        let a = world.add_location("A", "");
        assert!(!world.location(a).unwrap().explored);
        world.mark_explored(a);
        assert!(world.location(a).unwrap().explored);
    }
}
