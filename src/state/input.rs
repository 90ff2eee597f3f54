//! Per-tick input snapshot.

/// Input observed during one loop iteration.
///
/// The canvas builds one of these from egui each frame; tests build them by
/// hand to drive the interaction loop.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Zoom-in key held (`+` or `=`)
    pub zoom_in: bool,
    /// Zoom-out key held (`-`)
    pub zoom_out: bool,
    /// Zoom-rate increase key held (arrow up)
    pub rate_up: bool,
    /// Zoom-rate decrease key held (arrow down)
    pub rate_down: bool,
    /// Cancel key held (Escape)
    pub quit: bool,
    /// Window close requested
    pub close_requested: bool,
    /// Pointer drag since the previous tick, in pixels
    pub drag_delta: (f64, f64),
    /// Double-click on the canvas
    pub reset_view: bool,
    /// Current drawing surface size, if known
    pub surface_size: Option<(f64, f64)>,
}

impl InputSnapshot {
    pub fn wants_quit(&self) -> bool {
        self.quit || self.close_requested
    }
}
