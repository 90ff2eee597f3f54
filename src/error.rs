//! Error types shared by the loading, graph and projection code.

use std::fmt;
use thiserror::Error;

/// Coordinate axis of the geographic extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Latitude => write!(f, "latitude"),
            Axis::Longitude => write!(f, "longitude"),
        }
    }
}

#[derive(Debug, Error)]
pub enum MapError {
    /// The payload is not an OSM XML document.
    #[error("malformed map document: {0}")]
    MalformedDocument(#[from] quick_xml::de::DeError),

    /// A way points at a node id that is not in the document.
    #[error("way {way_id} references unknown node {node_id}")]
    DanglingReference { way_id: String, node_id: String },

    /// All nodes share one coordinate on an axis, so it cannot be scaled.
    #[error("all nodes share the same {axis}, extent cannot be scaled")]
    DegenerateExtent { axis: Axis },

    #[error("graph has no nodes to project")]
    EmptyGraph,

    #[error("invalid viewport: {0}")]
    InvalidViewport(String),

    /// Transport failure or a non-success status from the map server.
    #[error("failed to fetch map data: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed settings: {0}")]
    Settings(#[from] serde_json::Error),

    /// Settings parsed but hold values the app cannot run with.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}
