//! Map projection and coordinate transformation.
//!
//! Converts geographic coordinates (lat/lon) to screen coordinates by fitting
//! the extent of the graph into the drawing surface, then applying zoom and
//! pan. All math stays in f64; pixels are truncated only when drawing.

use geo_types::{Coord, Rect};

use crate::error::{Axis, MapError};
use crate::geo::GeoPoint;
use crate::graph::StreetGraph;

/// Position on the drawing surface, in pixels. Also used for pan offsets.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const ZERO: ScreenPoint = ScreenPoint { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Truncates to integer pixel coordinates.
    pub fn to_pixel(self) -> Pixel {
        Pixel {
            x: self.x.trunc() as i32,
            y: self.y.trunc() as i32,
        }
    }
}

/// Integer pixel position handed to the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub x: i32,
    pub y: i32,
}

/// Bounding extent of a set of geographic points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    rect: Rect<f64>,
}

impl Extent {
    /// Computes the extent of the given points, ignoring non-finite ones.
    pub fn of_points(points: impl IntoIterator<Item = GeoPoint>) -> Result<Self, MapError> {
        let mut points = points.into_iter().filter(GeoPoint::is_finite);
        let first: Coord<f64> = points.next().ok_or(MapError::EmptyGraph)?.into();

        let (min, max) = points.fold((first, first), |(min, max), point| {
            let c: Coord<f64> = point.into();
            (
                Coord {
                    x: min.x.min(c.x),
                    y: min.y.min(c.y),
                },
                Coord {
                    x: max.x.max(c.x),
                    y: max.y.max(c.y),
                },
            )
        });

        Ok(Self {
            rect: Rect::new(min, max),
        })
    }

    /// Extent of every node currently in the graph.
    pub fn of_graph(graph: &StreetGraph) -> Result<Self, MapError> {
        Self::of_points(graph.nodes().map(|node| node.position))
    }

    pub fn min_lat(&self) -> f64 {
        self.rect.min().y
    }

    pub fn max_lat(&self) -> f64 {
        self.rect.max().y
    }

    pub fn min_lon(&self) -> f64 {
        self.rect.min().x
    }

    pub fn max_lon(&self) -> f64 {
        self.rect.max().x
    }
}

/// Size of the drawing surface and the blank margin kept around the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

/// Geographic to screen transform for one layout.
#[derive(Debug, Clone)]
pub struct Projector {
    extent: Extent,
    viewport: Viewport,
    zoom: f64,
    pan_offset: ScreenPoint,
    lon_scale: f64,
    lat_scale: f64,
}

impl Projector {
    /// Sets up the transform.
    ///
    /// Fails if an axis of the extent has zero span, if the surface leaves no
    /// room inside the margin, or if the zoom is not positive.
    pub fn new(
        extent: Extent,
        viewport: Viewport,
        zoom: f64,
        pan_offset: ScreenPoint,
    ) -> Result<Self, MapError> {
        if !(zoom.is_finite() && zoom > 0.0) {
            return Err(MapError::InvalidViewport(format!(
                "zoom factor must be positive, got {zoom}"
            )));
        }

        let drawable_width = viewport.width - 2.0 * viewport.margin;
        let drawable_height = viewport.height - 2.0 * viewport.margin;
        if drawable_width <= 0.0 || drawable_height <= 0.0 {
            return Err(MapError::InvalidViewport(format!(
                "{}x{} surface has no room inside a {} px margin",
                viewport.width, viewport.height, viewport.margin
            )));
        }

        let lon_span = extent.max_lon() - extent.min_lon();
        if lon_span == 0.0 {
            return Err(MapError::DegenerateExtent {
                axis: Axis::Longitude,
            });
        }
        let lat_span = extent.max_lat() - extent.min_lat();
        if lat_span == 0.0 {
            return Err(MapError::DegenerateExtent {
                axis: Axis::Latitude,
            });
        }

        Ok(Self {
            extent,
            viewport,
            zoom,
            pan_offset,
            lon_scale: drawable_width / lon_span,
            lat_scale: drawable_height / lat_span,
        })
    }

    /// Builds a projector for the graph's current extent.
    pub fn for_graph(
        graph: &StreetGraph,
        viewport: Viewport,
        zoom: f64,
        pan_offset: ScreenPoint,
    ) -> Result<Self, MapError> {
        Self::new(Extent::of_graph(graph)?, viewport, zoom, pan_offset)
    }

    pub fn extent(&self) -> &Extent {
        &self.extent
    }

    /// Converts a geographic point to a screen position.
    ///
    /// Longitude grows to the right; latitude is inverted so north is up.
    pub fn project(&self, point: &GeoPoint) -> ScreenPoint {
        let x = (point.longitude - self.extent.min_lon()) * self.lon_scale * self.zoom;
        let y = (self.extent.max_lat() - point.latitude) * self.lat_scale * self.zoom;

        ScreenPoint {
            x: x + self.viewport.margin - self.pan_offset.x,
            y: y + self.viewport.margin - self.pan_offset.y,
        }
    }

    /// Converts a screen position back to geographic coordinates.
    pub fn unproject(&self, pos: ScreenPoint) -> GeoPoint {
        let x = pos.x + self.pan_offset.x - self.viewport.margin;
        let y = pos.y + self.pan_offset.y - self.viewport.margin;

        GeoPoint::new(
            self.extent.max_lat() - y / (self.lat_scale * self.zoom),
            self.extent.min_lon() + x / (self.lon_scale * self.zoom),
        )
    }
}
