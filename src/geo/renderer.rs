//! Street graph rendering.
//!
//! Renders the projected graph onto a drawing surface: a full clear, then
//! every street as a line, then every node as a marker on top.

use std::time::Duration;

use eframe::egui::Color32;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use web_time::Instant;

use super::{DrawingSurface, Projector};
use crate::graph::StreetGraph;

/// Colors and sizes used to draw the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    /// Background RGB
    pub background: [u8; 3],
    pub street_color: [u8; 3],
    pub street_width: f32,
    pub node_color: [u8; 3],
    pub node_radius: f32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background: [0, 0, 0],
            street_color: [255, 255, 255],
            street_width: 2.0,
            node_color: [255, 0, 0],
            node_radius: 3.0,
        }
    }
}

fn rgb([r, g, b]: [u8; 3]) -> Color32 {
    Color32::from_rgb(r, g, b)
}

/// Counters from one render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderStats {
    pub streets_drawn: usize,
    pub nodes_drawn: usize,
    /// Entries that could not be drawn and were skipped
    pub skipped: usize,
    pub elapsed: Duration,
}

/// Clears the surface and draws the whole graph, then presents it.
///
/// Streets whose endpoints do not resolve, and entries that project to a
/// non-finite position, are logged and skipped.
pub fn render_graph<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    graph: &StreetGraph,
    projector: &Projector,
    style: &RenderStyle,
) -> RenderStats {
    let started = Instant::now();
    let mut stats = RenderStats::default();

    surface.clear(rgb(style.background));

    let street_color = rgb(style.street_color);
    for street in graph.streets() {
        let Some((start, end)) = graph.endpoints(street) else {
            warn!("Skipping street {:?}: endpoint not in graph", street.id);
            stats.skipped += 1;
            continue;
        };

        let from = projector.project(&start.position);
        let to = projector.project(&end.position);
        if !(from.is_finite() && to.is_finite()) {
            warn!("Skipping street {:?}: non-finite position", street.id);
            stats.skipped += 1;
            continue;
        }

        surface.draw_line(from.to_pixel(), to.to_pixel(), street_color, style.street_width);
        stats.streets_drawn += 1;
    }

    let node_color = rgb(style.node_color);
    for node in graph.nodes() {
        let pos = projector.project(&node.position);
        if !pos.is_finite() {
            warn!("Skipping node {}: non-finite position", node.id);
            stats.skipped += 1;
            continue;
        }

        surface.draw_filled_circle(pos.to_pixel(), style.node_radius, node_color);
        stats.nodes_drawn += 1;
    }

    surface.present();

    stats.elapsed = started.elapsed();
    debug!(
        "Rendered {} streets, {} nodes ({} skipped) in {:?}",
        stats.streets_drawn, stats.nodes_drawn, stats.skipped, stats.elapsed
    );

    stats
}
