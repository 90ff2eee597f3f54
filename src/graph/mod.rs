//! Road graph model and construction.

mod builder;
mod model;

pub use builder::{BuildReport, BuiltGraph, DanglingPolicy, GraphBuilder, DEFAULT_ROAD_KEY};
pub use model::{Neighbor, Node, NodeIndex, Street, StreetGraph};
