//! Map extract retrieval from the OSM API or a local file.
//!
//! The fetch runs once, before the window opens, so a blocking client is
//! used instead of bridging an async download into the egui update loop.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use log::info;

use crate::error::MapError;
use crate::geo::GeoPoint;

/// Default OSM API 0.6 endpoint.
pub const DEFAULT_API_URL: &str = "https://api.openstreetmap.org/api/0.6";

/// Rectangular lat/lon region used to request a map extract.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Builds a box from two opposite corners given in any order.
    pub fn from_corners(a: GeoPoint, b: GeoPoint) -> Self {
        Self {
            min_lat: a.latitude.min(b.latitude),
            min_lon: a.longitude.min(b.longitude),
            max_lat: a.latitude.max(b.latitude),
            max_lon: a.longitude.max(b.longitude),
        }
    }

    /// Builds a box extending `radius_deg` degrees around a point on both axes.
    pub fn around(center: GeoPoint, radius_deg: f64) -> Self {
        let radius = radius_deg.abs();
        Self {
            min_lat: center.latitude - radius,
            min_lon: center.longitude - radius,
            max_lat: center.latitude + radius,
            max_lon: center.longitude + radius,
        }
    }

    /// Formats the box in the `left,bottom,right,top` order the OSM API expects.
    pub fn to_query(&self) -> String {
        format!(
            "{},{},{},{}",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.5}, {:.5}] - [{:.5}, {:.5}]",
            self.min_lat, self.min_lon, self.max_lat, self.max_lon
        )
    }
}

/// Parses `south,west,north,east`.
impl FromStr for BoundingBox {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("invalid coordinate in bounding box: {e}"))?;

        let &[south, west, north, east] = values.as_slice() else {
            return Err(format!(
                "expected 4 comma-separated values (south,west,north,east), got {}",
                values.len()
            ));
        };

        Ok(Self::from_corners(
            GeoPoint::new(south, west),
            GeoPoint::new(north, east),
        ))
    }
}

/// Blocking client for the OSM API `map` call.
pub struct OsmClient {
    api_url: String,
    http_client: reqwest::blocking::Client,
}

impl OsmClient {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, MapError> {
        let http_client = reqwest::blocking::Client::builder()
            .user_agent(concat!("streetmap-workbench/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            http_client,
        })
    }

    /// URL of the `map` request for a bounding box.
    pub fn map_url(&self, bbox: &BoundingBox) -> String {
        format!("{}/map?bbox={}", self.api_url, bbox.to_query())
    }

    /// Downloads the raw OSM XML for a bounding box.
    pub fn fetch_map(&self, bbox: &BoundingBox) -> Result<String, MapError> {
        let url = self.map_url(bbox);
        info!("Fetching map extract for {}", bbox);

        let response = self.http_client.get(&url).send()?.error_for_status()?;
        let body = response.text()?;

        info!("Downloaded {} bytes", body.len());
        Ok(body)
    }

    /// Downloads the extract around a point, `radius_deg` degrees in each direction.
    pub fn fetch_map_around(&self, center: GeoPoint, radius_deg: f64) -> Result<String, MapError> {
        self.fetch_map(&BoundingBox::around(center, radius_deg))
    }
}

/// Reads an OSM XML extract saved on disk.
pub fn read_map_file(path: &Path) -> Result<String, MapError> {
    info!("Reading map extract from {}", path.display());
    Ok(std::fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_corners_are_normalized() {
        let bbox =
            BoundingBox::from_corners(GeoPoint::new(52.6, 13.5), GeoPoint::new(52.4, 13.3));
        assert_eq!(bbox.min_lat, 52.4);
        assert_eq!(bbox.max_lat, 52.6);
        assert_eq!(bbox.min_lon, 13.3);
        assert_eq!(bbox.max_lon, 13.5);
    }

    #[test]
    fn test_around_point() {
        let bbox = BoundingBox::around(GeoPoint::new(52.520008, 13.404954), 0.01);
        assert_relative_eq!(bbox.min_lat, 52.510008, epsilon = 1e-9);
        assert_relative_eq!(bbox.max_lon, 13.414954, epsilon = 1e-9);
    }

    #[test]
    fn test_query_uses_lon_lat_order() {
        let bbox = BoundingBox::from_corners(GeoPoint::new(1.0, 2.0), GeoPoint::new(3.0, 4.0));
        assert_eq!(bbox.to_query(), "2,1,4,3");
    }

    #[test]
    fn test_parse_bbox_argument() {
        let bbox: BoundingBox = "52.51, 13.39, 52.53,13.41".parse().unwrap();
        assert_eq!(bbox.min_lat, 52.51);
        assert_eq!(bbox.min_lon, 13.39);
        assert_eq!(bbox.max_lat, 52.53);
        assert_eq!(bbox.max_lon, 13.41);

        assert!("1,2,3".parse::<BoundingBox>().is_err());
        assert!("1,2,x,4".parse::<BoundingBox>().is_err());
    }

    #[test]
    fn test_map_url_trims_trailing_slash() {
        let client = OsmClient::new("https://example.org/api/0.6/", Duration::from_secs(5)).unwrap();
        let bbox = BoundingBox::from_corners(GeoPoint::new(1.0, 2.0), GeoPoint::new(3.0, 4.0));
        assert_eq!(
            client.map_url(&bbox),
            "https://example.org/api/0.6/map?bbox=2,1,4,3"
        );
    }
}
