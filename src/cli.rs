//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::geo::GeoPoint;
use crate::osm::BoundingBox;

/// Interactive viewer for the street network of an OpenStreetMap extract.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Latitude of the point to fetch the map around
    #[arg(long, default_value_t = 52.520008, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude of the point to fetch the map around
    #[arg(long, default_value_t = 13.404954, allow_hyphen_values = true)]
    pub lon: f64,

    /// Explicit area to fetch as south,west,north,east (overrides --lat/--lon)
    #[arg(long, allow_hyphen_values = true)]
    pub bbox: Option<BoundingBox>,

    /// Read the map from a local .osm file instead of the API
    #[arg(short, long, conflicts_with = "bbox")]
    pub file: Option<PathBuf>,

    /// JSON settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the effective settings as JSON and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}
