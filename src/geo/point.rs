//! Geographic point value type.

use geo_types::Coord;

/// A latitude/longitude pair with an optional accuracy radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Accuracy of the fix in the same units as the source; 0 when unknown.
    pub accuracy: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy: 0.0,
        }
    }

    /// Creates a point with an accuracy value. Negative accuracies are stored as 0.
    pub fn with_accuracy(latitude: f64, longitude: f64, accuracy: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy: accuracy.max(0.0),
        }
    }

    /// Euclidean distance in degrees.
    ///
    /// This is a planar approximation, not a geodesic distance. Edge weights in
    /// the street graph are expressed in these units.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        let d_lat = self.latitude - other.latitude;
        let d_lon = self.longitude - other.longitude;
        (d_lat * d_lat + d_lon * d_lon).sqrt()
    }

    /// Angle in radians of the directed segment from `self` to `other`,
    /// measured from the positive longitude axis towards north.
    pub fn bearing_to(&self, other: &GeoPoint) -> f64 {
        (other.latitude - self.latitude).atan2(other.longitude - self.longitude)
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

impl From<GeoPoint> for Coord<f64> {
    fn from(point: GeoPoint) -> Self {
        Coord {
            x: point.longitude,
            y: point.latitude,
        }
    }
}

impl From<Coord<f64>> for GeoPoint {
    fn from(coord: Coord<f64>) -> Self {
        GeoPoint::new(coord.y, coord.x)
    }
}
