//! Geographic primitives, projection and rendering.
//!
//! This module provides the point type, the geographic-to-screen projection
//! and the renderer that draws the street graph onto a drawing surface.

mod point;
mod projection;
mod renderer;
mod surface;

pub use point::GeoPoint;
pub use projection::{Extent, Pixel, Projector, ScreenPoint, Viewport};
pub use renderer::{render_graph, RenderStats, RenderStyle};
pub use surface::{DrawingSurface, ShapeSurface};
