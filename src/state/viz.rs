//! Visualization state (zoom/pan).

use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::geo::ScreenPoint;

/// Zoom change per tick while a zoom key is held, multiplied by the zoom rate.
pub const ZOOM_STEP: f64 = 0.1;
/// Zoom rate change per tick while a rate key is held.
pub const RATE_STEP: f64 = 0.1;

/// Rounds to 2 decimal digits so repeated increments compare stably.
pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Bounds for the zoom factor and zoom rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomLimits {
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub min_rate: f64,
    pub max_rate: f64,
}

impl ZoomLimits {
    /// Checks that both ranges are ordered and the zoom stays positive.
    pub fn validate(&self) -> Result<(), MapError> {
        let ordered = |min: f64, max: f64| min.is_finite() && max.is_finite() && min <= max;

        if !ordered(self.min_zoom, self.max_zoom) || self.min_zoom <= 0.0 {
            return Err(MapError::InvalidSettings(format!(
                "zoom range [{}, {}] must be positive and ordered",
                self.min_zoom, self.max_zoom
            )));
        }
        if !ordered(self.min_rate, self.max_rate) || self.min_rate <= 0.0 {
            return Err(MapError::InvalidSettings(format!(
                "zoom rate range [{}, {}] must be positive and ordered",
                self.min_rate, self.max_rate
            )));
        }
        Ok(())
    }
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min_zoom: 0.1,
            max_zoom: 100.0,
            min_rate: 0.1,
            max_rate: 10.0,
        }
    }
}

/// View controls owned by the interaction loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Current zoom level (1.0 = whole extent fits the surface)
    pub zoom_factor: f64,

    /// Multiplier applied to each zoom step
    pub zoom_rate: f64,

    /// Pan offset in pixels, subtracted from projected positions
    pub pan_offset: ScreenPoint,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom_factor: 1.0,
            zoom_rate: 1.0,
            pan_offset: ScreenPoint::ZERO,
        }
    }
}

impl ViewState {
    pub fn zoom_in(&mut self) {
        self.zoom_factor += ZOOM_STEP * self.zoom_rate;
    }

    pub fn zoom_out(&mut self) {
        self.zoom_factor -= ZOOM_STEP * self.zoom_rate;
    }

    pub fn increase_rate(&mut self) {
        self.zoom_rate += RATE_STEP;
    }

    pub fn decrease_rate(&mut self) {
        self.zoom_rate -= RATE_STEP;
    }

    /// Moves the visible window by a drag delta. Dragging right moves the
    /// content right, so the offset decreases.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_offset.x -= dx;
        self.pan_offset.y -= dy;
    }

    /// Restores zoom 1 and no pan. The zoom rate is kept.
    pub fn reset(&mut self) {
        self.zoom_factor = 1.0;
        self.pan_offset = ScreenPoint::ZERO;
    }

    /// Clamps zoom and rate into the limits and rounds both to 2 decimals.
    ///
    /// The upper bound wins if a range is inverted; see [`ZoomLimits::validate`].
    pub fn normalize(&mut self, limits: &ZoomLimits) {
        self.zoom_factor =
            round_hundredths(self.zoom_factor.max(limits.min_zoom).min(limits.max_zoom));
        self.zoom_rate =
            round_hundredths(self.zoom_rate.max(limits.min_rate).min(limits.max_rate));
    }
}
