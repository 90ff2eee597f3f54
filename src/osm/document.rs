//! OSM XML document model.
//!
//! Only the parts needed to build the street graph are decoded: node ids and
//! coordinates, way node references and way tags. Everything else in the
//! payload (bounds, relations, metadata attributes) is ignored.

use serde::Deserialize;

use crate::error::MapError;

/// Root `<osm>` element.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename = "osm")]
pub struct OsmDocument {
    #[serde(rename = "node", default)]
    pub nodes: Vec<OsmNode>,
    #[serde(rename = "way", default)]
    pub ways: Vec<OsmWay>,
}

impl OsmDocument {
    /// Decodes an OSM XML payload.
    pub fn from_xml(xml: &str) -> Result<Self, MapError> {
        Ok(quick_xml::de::from_str(xml)?)
    }
}

/// A `<node>` point record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OsmNode {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@lat")]
    pub lat: f64,
    #[serde(rename = "@lon")]
    pub lon: f64,
}

/// A `<way>` record: an ordered path through nodes plus its tags.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OsmWay {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "nd", default)]
    pub node_refs: Vec<NodeRef>,
    #[serde(rename = "tag", default)]
    pub tags: Vec<OsmTag>,
}

impl OsmWay {
    /// Returns true if the way carries a tag with the given key.
    pub fn has_tag(&self, key: &str) -> bool {
        self.tags.iter().any(|tag| tag.key == key)
    }
}

/// `<nd ref="..."/>` reference from a way to a node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NodeRef {
    #[serde(rename = "@ref")]
    pub id: String,
}

/// `<tag k="..." v="..."/>` key/value pair.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OsmTag {
    #[serde(rename = "@k")]
    pub key: String,
    #[serde(rename = "@v", default)]
    pub value: String,
}
