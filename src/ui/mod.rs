//! UI modules for the Street Map Workbench application.
//!
//! The UI is split into two panels:
//! - Top bar: Title, map summary, cursor position, and status
//! - Central canvas: Street map drawing and view controls

mod canvas;
mod top_bar;

pub use canvas::render_canvas;
pub use top_bar::render_top_bar;
