//! Street graph storage.
//!
//! Nodes and tracked streets live in dense arenas. External OSM ids are
//! resolved to arena indices through lookup tables, so neighbor entries never
//! hold pointers or ids that could dangle.

use std::collections::HashMap;

use crate::geo::GeoPoint;

/// Index of a node in the graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIndex(usize);

impl NodeIndex {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Adjacency entry: the neighbor node and the edge length in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub node: NodeIndex,
    pub distance: f64,
}

/// Street graph node.
#[derive(Debug, Clone)]
pub struct Node {
    /// OSM id of the node
    pub id: String,
    pub position: GeoPoint,
    neighbors: Vec<Neighbor>,
}

impl Node {
    fn new(id: String, position: GeoPoint) -> Self {
        Self {
            id,
            position,
            neighbors: Vec::new(),
        }
    }

    /// Adjacency list in registration order.
    pub fn neighbors(&self) -> &[Neighbor] {
        &self.neighbors
    }
}

/// Street graph edge.
///
/// Tracked streets carry the way id and are stored in the graph for rendering.
/// Untracked streets (no id) only exist to register per-segment adjacency.
#[derive(Debug, Clone, PartialEq)]
pub struct Street {
    pub id: Option<String>,
    pub start: NodeIndex,
    pub end: NodeIndex,
}

impl Street {
    pub fn new(id: impl Into<String>, start: NodeIndex, end: NodeIndex) -> Self {
        Self {
            id: Some(id.into()),
            start,
            end,
        }
    }

    /// Untracked edge between two consecutive way nodes.
    pub fn segment(start: NodeIndex, end: NodeIndex) -> Self {
        Self {
            id: None,
            start,
            end,
        }
    }

    /// Euclidean distance between the endpoints, or None if an endpoint is
    /// not part of `graph`.
    pub fn length(&self, graph: &StreetGraph) -> Option<f64> {
        let (start, end) = graph.endpoints(self)?;
        Some(start.position.distance_to(&end.position))
    }

    /// Angle in radians of the directed segment start -> end.
    pub fn bearing(&self, graph: &StreetGraph) -> Option<f64> {
        let (start, end) = graph.endpoints(self)?;
        Some(start.position.bearing_to(&end.position))
    }
}

/// Road graph built from a map extract.
#[derive(Debug, Clone, Default)]
pub struct StreetGraph {
    nodes: Vec<Node>,
    node_ids: HashMap<String, NodeIndex>,
    streets: Vec<Street>,
    street_ids: HashMap<String, usize>,
}

impl StreetGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node, or replaces the position of an existing node with the
    /// same id (last write wins). The node keeps its arena slot and adjacency.
    pub fn upsert_node(&mut self, id: &str, position: GeoPoint) -> NodeIndex {
        if let Some(&index) = self.node_ids.get(id) {
            self.nodes[index.0].position = position;
            return index;
        }

        let index = NodeIndex(self.nodes.len());
        self.nodes.push(Node::new(id.to_string(), position));
        self.node_ids.insert(id.to_string(), index);
        index
    }

    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_ids.get(id).copied()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_index(id).and_then(|index| self.node_at(index))
    }

    pub fn node_at(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index.0)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Resolves both endpoints of a street.
    pub fn endpoints(&self, street: &Street) -> Option<(&Node, &Node)> {
        Some((self.node_at(street.start)?, self.node_at(street.end)?))
    }

    /// Registers the street as a bidirectional edge on both endpoint nodes.
    ///
    /// Returns the edge length, or None without touching the graph if an
    /// endpoint does not belong to this graph.
    pub fn register_adjacency(&mut self, street: &Street) -> Option<f64> {
        let distance = street.length(self)?;

        self.nodes[street.start.0].neighbors.push(Neighbor {
            node: street.end,
            distance,
        });
        self.nodes[street.end.0].neighbors.push(Neighbor {
            node: street.start,
            distance,
        });

        Some(distance)
    }

    /// Stores a tracked street. A street with an id already present replaces
    /// the previous one (last write wins). Untracked streets are not stored.
    pub fn insert_street(&mut self, street: Street) {
        let Some(id) = street.id.clone() else {
            return;
        };

        match self.street_ids.get(&id) {
            Some(&slot) => self.streets[slot] = street,
            None => {
                self.street_ids.insert(id, self.streets.len());
                self.streets.push(street);
            }
        }
    }

    pub fn street(&self, id: &str) -> Option<&Street> {
        self.street_ids.get(id).map(|&slot| &self.streets[slot])
    }

    pub fn streets(&self) -> impl Iterator<Item = &Street> {
        self.streets.iter()
    }

    pub fn street_count(&self) -> usize {
        self.streets.len()
    }

    /// Neighbors of a node as (neighbor id, distance) pairs.
    pub fn neighbors(&self, id: &str) -> Option<Vec<(&str, f64)>> {
        let node = self.node(id)?;
        Some(
            node.neighbors
                .iter()
                .filter_map(|n| {
                    self.node_at(n.node)
                        .map(|other| (other.id.as_str(), n.distance))
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn two_node_graph() -> (StreetGraph, NodeIndex, NodeIndex) {
        let mut graph = StreetGraph::new();
        let a = graph.upsert_node("a", GeoPoint::new(0.0, 0.0));
        let b = graph.upsert_node("b", GeoPoint::new(3.0, 4.0));
        (graph, a, b)
    }

    #[test]
    fn test_register_adjacency_is_symmetric() {
        let (mut graph, a, b) = two_node_graph();
        let street = Street::new("s1", a, b);

        let distance = graph.register_adjacency(&street).unwrap();
        assert_relative_eq!(distance, 5.0);

        assert_eq!(graph.neighbors("a").unwrap(), vec![("b", 5.0)]);
        assert_eq!(graph.neighbors("b").unwrap(), vec![("a", 5.0)]);
    }

    #[test]
    fn test_street_derived_attributes() {
        let (graph, a, b) = two_node_graph();
        let street = Street::new("s1", a, b);

        assert_relative_eq!(street.length(&graph).unwrap(), 5.0);
        assert_relative_eq!(street.bearing(&graph).unwrap(), 3.0_f64.atan2(4.0));
    }

    #[test]
    fn test_upsert_last_write_wins() {
        let mut graph = StreetGraph::new();
        let first = graph.upsert_node("a", GeoPoint::new(1.0, 1.0));
        let second = graph.upsert_node("a", GeoPoint::new(2.0, 2.0));

        assert_eq!(first, second);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.node("a").unwrap().position, GeoPoint::new(2.0, 2.0));
    }

    #[test]
    fn test_foreign_index_is_rejected() {
        let (mut graph, a, _) = two_node_graph();
        let mut other = StreetGraph::new();
        for i in 0..5 {
            other.upsert_node(&i.to_string(), GeoPoint::new(0.0, 0.0));
        }
        let foreign = other.node_index("4").unwrap();

        let street = Street::new("bad", a, foreign);
        assert!(graph.register_adjacency(&street).is_none());
        assert!(graph.node("a").unwrap().neighbors().is_empty());
        assert!(street.length(&graph).is_none());
    }

    #[test]
    fn test_untracked_streets_are_not_stored() {
        let (mut graph, a, b) = two_node_graph();
        graph.insert_street(Street::segment(a, b));
        assert_eq!(graph.street_count(), 0);

        graph.insert_street(Street::new("w1", a, b));
        graph.insert_street(Street::new("w1", b, a));
        assert_eq!(graph.street_count(), 1);
        assert_eq!(graph.street("w1").unwrap().start, b);
    }
}
