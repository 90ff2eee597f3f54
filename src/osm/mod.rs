//! OpenStreetMap data access.
//!
//! This module provides:
//! - Retrieval of map extracts from the OSM API or from disk
//! - Decoding of the OSM XML payload into node and way records

mod document;
mod download;

pub use document::{NodeRef, OsmDocument, OsmNode, OsmTag, OsmWay};
pub use download::{read_map_file, BoundingBox, OsmClient, DEFAULT_API_URL};
