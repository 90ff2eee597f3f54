//! Interaction loop: turns input snapshots into view changes and redraws.
//!
//! The loop is driven once per frame by the canvas. It redraws only when the
//! rendered view changes: the rounded zoom factor, the pan offset, or the
//! surface size. Zoom rate changes alone never redraw.

use log::info;

use super::input::InputSnapshot;
use super::viz::{ViewState, ZoomLimits};
use crate::error::MapError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Nothing changed since the last draw
    Idle,
    /// The view changed and needs a redraw
    Dirty,
    /// A quit signal was received; terminal
    Stopped,
}

pub struct InteractionLoop {
    view: ViewState,
    limits: ZoomLimits,
    state: LoopState,
    surface_size: Option<(f64, f64)>,
    redraws: u64,
}

impl InteractionLoop {
    /// Creates a loop that starts Dirty so the first tick draws the map.
    pub fn new(mut view: ViewState, limits: ZoomLimits) -> Self {
        view.normalize(&limits);
        Self {
            view,
            limits,
            state: LoopState::Dirty,
            surface_size: None,
            redraws: 0,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Number of successful redraws so far.
    pub fn redraws(&self) -> u64 {
        self.redraws
    }

    /// Runs one iteration.
    ///
    /// Quit is checked first and short-circuits everything else. Otherwise the
    /// input is applied and, if the view is dirty, `redraw` is called once. A
    /// failed redraw returns the loop to Idle and hands the error back; it is
    /// attempted again on the next view change.
    pub fn step<F>(&mut self, input: &InputSnapshot, redraw: F) -> Result<LoopState, MapError>
    where
        F: FnOnce(&ViewState) -> Result<(), MapError>,
    {
        if self.state == LoopState::Stopped {
            return Ok(LoopState::Stopped);
        }

        if input.wants_quit() {
            info!("Quit requested, stopping interaction loop");
            self.state = LoopState::Stopped;
            return Ok(LoopState::Stopped);
        }

        if self.apply(input) {
            self.state = LoopState::Dirty;
        }

        if self.state == LoopState::Dirty {
            let result = redraw(&self.view);
            self.state = LoopState::Idle;
            result?;
            self.redraws += 1;
        }

        Ok(self.state)
    }

    /// Applies the input to the view. Returns true if the rendered view changed.
    fn apply(&mut self, input: &InputSnapshot) -> bool {
        let previous_zoom = self.view.zoom_factor;
        let previous_pan = self.view.pan_offset;

        if input.zoom_in {
            self.view.zoom_in();
        }
        if input.zoom_out {
            self.view.zoom_out();
        }
        if input.rate_up {
            self.view.increase_rate();
        }
        if input.rate_down {
            self.view.decrease_rate();
        }
        self.view.normalize(&self.limits);

        if input.reset_view {
            self.view.reset();
        }

        let (dx, dy) = input.drag_delta;
        if dx != 0.0 || dy != 0.0 {
            self.view.pan_by(dx, dy);
        }

        let resized = match input.surface_size {
            Some(size) if self.surface_size != Some(size) => {
                self.surface_size = Some(size);
                true
            }
            _ => false,
        };

        resized || self.view.zoom_factor != previous_zoom || self.view.pan_offset != previous_pan
    }
}

impl Default for InteractionLoop {
    fn default() -> Self {
        Self::new(ViewState::default(), ZoomLimits::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Axis;
    use crate::geo::ScreenPoint;
    use approx::assert_relative_eq;

    const ZOOM_IN: InputSnapshot = InputSnapshot {
        zoom_in: true,
        zoom_out: false,
        rate_up: false,
        rate_down: false,
        quit: false,
        close_requested: false,
        drag_delta: (0.0, 0.0),
        reset_view: false,
        surface_size: None,
    };

    fn idle() -> InputSnapshot {
        InputSnapshot::default()
    }

    /// Runs the initial draw so the loop starts the test Idle.
    fn settled_loop() -> InteractionLoop {
        let mut interaction = InteractionLoop::default();
        interaction.step(&idle(), |_| Ok(())).unwrap();
        assert_eq!(interaction.state(), LoopState::Idle);
        interaction
    }

    #[test]
    fn test_first_tick_draws() {
        let mut interaction = InteractionLoop::default();
        assert_eq!(interaction.state(), LoopState::Dirty);

        let mut draws = 0;
        interaction
            .step(&idle(), |_| {
                draws += 1;
                Ok(())
            })
            .unwrap();
        assert_eq!(draws, 1);
        assert_eq!(interaction.redraws(), 1);
    }

    #[test]
    fn test_zoom_in_held_five_ticks() {
        let mut interaction = settled_loop();
        for _ in 0..5 {
            interaction.step(&ZOOM_IN, |_| Ok(())).unwrap();
        }
        assert_relative_eq!(interaction.view().zoom_factor, 1.5);
        assert_eq!(interaction.redraws(), 6);
    }

    #[test]
    fn test_redraw_only_on_zoom_change() {
        let mut interaction = settled_loop();
        let mut drawn_zooms = Vec::new();

        interaction
            .step(&ZOOM_IN, |view| {
                drawn_zooms.push(view.zoom_factor);
                Ok(())
            })
            .unwrap();
        for _ in 0..10 {
            let state = interaction
                .step(&idle(), |view| {
                    drawn_zooms.push(view.zoom_factor);
                    Ok(())
                })
                .unwrap();
            assert_eq!(state, LoopState::Idle);
        }

        assert_eq!(drawn_zooms, vec![1.1]);
    }

    #[test]
    fn test_rate_change_does_not_redraw() {
        let mut interaction = settled_loop();
        let input = InputSnapshot {
            rate_up: true,
            ..Default::default()
        };

        let mut draws = 0;
        for _ in 0..3 {
            interaction
                .step(&input, |_| {
                    draws += 1;
                    Ok(())
                })
                .unwrap();
        }
        assert_eq!(draws, 0);
        assert_relative_eq!(interaction.view().zoom_rate, 1.3);

        interaction.step(&ZOOM_IN, |_| Ok(())).unwrap();
        assert_relative_eq!(interaction.view().zoom_factor, 1.13);
    }

    #[test]
    fn test_opposite_keys_cancel_out() {
        let mut interaction = settled_loop();
        let input = InputSnapshot {
            zoom_in: true,
            zoom_out: true,
            ..Default::default()
        };
        let mut draws = 0;
        interaction
            .step(&input, |_| {
                draws += 1;
                Ok(())
            })
            .unwrap();
        assert_eq!(draws, 0);
    }

    #[test]
    fn test_zoom_clamped_at_limit_stops_redrawing() {
        let limits = ZoomLimits {
            max_zoom: 1.2,
            ..Default::default()
        };
        let mut interaction = InteractionLoop::new(ViewState::default(), limits);
        interaction.step(&idle(), |_| Ok(())).unwrap();

        let mut draws = 0;
        for _ in 0..5 {
            interaction
                .step(&ZOOM_IN, |_| {
                    draws += 1;
                    Ok(())
                })
                .unwrap();
        }
        assert_eq!(draws, 2);
        assert_relative_eq!(interaction.view().zoom_factor, 1.2);
    }

    #[test]
    fn test_quit_short_circuits() {
        let mut interaction = settled_loop();
        let input = InputSnapshot {
            zoom_in: true,
            quit: true,
            ..Default::default()
        };

        let state = interaction
            .step(&input, |_| panic!("must not redraw after quit"))
            .unwrap();
        assert_eq!(state, LoopState::Stopped);
        assert_relative_eq!(interaction.view().zoom_factor, 1.0);

        // Stopped is terminal
        let state = interaction
            .step(&ZOOM_IN, |_| panic!("must not redraw after quit"))
            .unwrap();
        assert_eq!(state, LoopState::Stopped);
    }

    #[test]
    fn test_close_request_stops() {
        let mut interaction = settled_loop();
        let input = InputSnapshot {
            close_requested: true,
            ..Default::default()
        };
        assert_eq!(
            interaction.step(&input, |_| Ok(())).unwrap(),
            LoopState::Stopped
        );
    }

    #[test]
    fn test_drag_and_resize_mark_dirty() {
        let mut interaction = settled_loop();

        let drag = InputSnapshot {
            drag_delta: (5.0, -3.0),
            ..Default::default()
        };
        let mut draws = 0;
        interaction
            .step(&drag, |view| {
                assert_eq!(view.pan_offset, ScreenPoint::new(-5.0, 3.0));
                draws += 1;
                Ok(())
            })
            .unwrap();

        let resize = InputSnapshot {
            surface_size: Some((640.0, 480.0)),
            ..Default::default()
        };
        interaction
            .step(&resize, |_| {
                draws += 1;
                Ok(())
            })
            .unwrap();
        // Same size again is not a change
        interaction
            .step(&resize, |_| {
                draws += 1;
                Ok(())
            })
            .unwrap();

        assert_eq!(draws, 2);
    }

    #[test]
    fn test_failed_redraw_returns_error_and_idles() {
        let mut interaction = InteractionLoop::default();
        let result = interaction.step(&idle(), |_| {
            Err(MapError::DegenerateExtent {
                axis: Axis::Latitude,
            })
        });

        assert!(matches!(result, Err(MapError::DegenerateExtent { .. })));
        assert_eq!(interaction.state(), LoopState::Idle);
        assert_eq!(interaction.redraws(), 0);

        // No retry until something changes
        let mut draws = 0;
        interaction
            .step(&idle(), |_| {
                draws += 1;
                Ok(())
            })
            .unwrap();
        assert_eq!(draws, 0);
    }
}
