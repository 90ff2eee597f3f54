//! Application state management.
//!
//! The root [`AppState`] owns the loaded graph, the interaction loop that
//! decides when to redraw, and the surface the map is drawn onto.

mod input;
mod interaction;
mod settings;
mod viz;

pub use input::InputSnapshot;
pub use interaction::{InteractionLoop, LoopState};
pub use settings::Settings;
pub use viz::{ViewState, ZoomLimits};

use crate::geo::{GeoPoint, Projector, RenderStats, ShapeSurface};
use crate::graph::{BuildReport, BuiltGraph, StreetGraph};

/// Root application state containing all sub-states.
pub struct AppState {
    /// Road graph being displayed
    pub graph: StreetGraph,

    /// How the graph was built (counts, skipped ways)
    pub build_report: BuildReport,

    pub settings: Settings,

    /// Zoom/pan controls and the redraw state machine
    pub interaction: InteractionLoop,

    /// Shapes of the last completed redraw
    pub surface: ShapeSurface,

    /// Transform used by the last successful redraw
    pub projector: Option<Projector>,

    pub last_render: Option<RenderStats>,

    /// Geographic position under the pointer, if any
    pub cursor: Option<GeoPoint>,

    /// Error from the most recent redraw, cleared by the next successful one
    pub redraw_error: Option<String>,

    /// Application status message displayed in top bar
    pub status_message: String,
}

impl AppState {
    pub fn new(built: BuiltGraph, settings: Settings) -> Self {
        let interaction = InteractionLoop::new(ViewState::default(), settings.zoom);
        let status_message = summarize(&built.report);

        Self {
            graph: built.graph,
            build_report: built.report,
            settings,
            interaction,
            surface: ShapeSurface::new(),
            projector: None,
            last_render: None,
            cursor: None,
            redraw_error: None,
            status_message,
        }
    }
}

fn summarize(report: &BuildReport) -> String {
    let mut message = format!(
        "Loaded {} nodes, {} streets",
        report.nodes, report.streets
    );
    if !report.skipped_ways.is_empty() {
        message.push_str(&format!(
            " ({} ways skipped)",
            report.skipped_ways.len()
        ));
    }
    message
}
