//! Builds the street graph from an OSM document.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::model::{Street, StreetGraph};
use crate::error::MapError;
use crate::geo::GeoPoint;
use crate::osm::{OsmDocument, OsmWay};

/// Tag key that marks a way as part of the road network.
pub const DEFAULT_ROAD_KEY: &str = "highway";

/// What to do with a way that references a node missing from the document.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DanglingPolicy {
    /// Record the error in the build report and continue with the next way.
    #[default]
    SkipWay,
    /// Stop the build and return the error.
    Abort,
}

/// Summary of a graph build.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub nodes: usize,
    pub streets: usize,
    /// Start-to-end edges registered for road ways.
    pub coarse_edges: usize,
    pub segment_edges: usize,
    /// Point records dropped for non-finite coordinates.
    pub invalid_nodes: usize,
    /// Ways without the road key or with fewer than two node references.
    pub ignored_ways: usize,
    /// Ways dropped because of a dangling node reference.
    pub skipped_ways: Vec<MapError>,
}

/// Graph plus the report of how it was built.
#[derive(Debug)]
pub struct BuiltGraph {
    pub graph: StreetGraph,
    pub report: BuildReport,
}

/// Converts OSM node and way records into a [`StreetGraph`].
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    road_key: String,
    dangling_policy: DanglingPolicy,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_ROAD_KEY, DanglingPolicy::default())
    }
}

impl GraphBuilder {
    pub fn new(road_key: impl Into<String>, dangling_policy: DanglingPolicy) -> Self {
        Self {
            road_key: road_key.into(),
            dangling_policy,
        }
    }

    /// Decodes raw OSM XML and builds the graph. A malformed payload aborts
    /// without returning a partial graph.
    pub fn parse(&self, xml: &str) -> Result<BuiltGraph, MapError> {
        let document = OsmDocument::from_xml(xml)?;
        self.build(&document)
    }

    pub fn build(&self, document: &OsmDocument) -> Result<BuiltGraph, MapError> {
        let mut graph = StreetGraph::new();
        let mut report = BuildReport::default();

        for node in &document.nodes {
            let position = GeoPoint::new(node.lat, node.lon);
            if !position.is_finite() {
                warn!(
                    "Skipping node {}: non-finite coordinates ({}, {})",
                    node.id, node.lat, node.lon
                );
                report.invalid_nodes += 1;
                continue;
            }
            graph.upsert_node(&node.id, position);
        }

        for way in &document.ways {
            match self.add_way(&mut graph, way, &mut report) {
                Ok(()) => {}
                Err(e) => match self.dangling_policy {
                    DanglingPolicy::Abort => return Err(e),
                    DanglingPolicy::SkipWay => {
                        warn!("Skipping way: {}", e);
                        report.skipped_ways.push(e);
                    }
                },
            }
        }

        report.nodes = graph.node_count();
        report.streets = graph.street_count();

        info!(
            "Built street graph: {} nodes ({} invalid), {} streets, {} coarse + {} segment edges, {} ignored ways, {} skipped ways",
            report.nodes,
            report.invalid_nodes,
            report.streets,
            report.coarse_edges,
            report.segment_edges,
            report.ignored_ways,
            report.skipped_ways.len()
        );

        Ok(BuiltGraph { graph, report })
    }

    /// Adds one way. Every node reference is resolved before anything is
    /// registered, so a failing way leaves the graph untouched.
    fn add_way(
        &self,
        graph: &mut StreetGraph,
        way: &OsmWay,
        report: &mut BuildReport,
    ) -> Result<(), MapError> {
        if !way.has_tag(&self.road_key) || way.node_refs.len() < 2 {
            report.ignored_ways += 1;
            return Ok(());
        }

        let indices = way
            .node_refs
            .iter()
            .map(|node_ref| {
                graph
                    .node_index(&node_ref.id)
                    .ok_or_else(|| MapError::DanglingReference {
                        way_id: way.id.clone(),
                        node_id: node_ref.id.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let (Some(&first), Some(&last)) = (indices.first(), indices.last()) else {
            return Ok(());
        };

        // Coarse start-to-end street, used for rendering.
        let street = Street::new(way.id.clone(), first, last);
        if graph.register_adjacency(&street).is_some() {
            report.coarse_edges += 1;
        }
        graph.insert_street(street);

        // Per-segment edges keep adjacency distances faithful to the way's shape.
        for pair in indices.windows(2) {
            let segment = Street::segment(pair[0], pair[1]);
            if graph.register_adjacency(&segment).is_some() {
                report.segment_edges += 1;
            }
        }

        Ok(())
    }
}
