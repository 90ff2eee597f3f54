//! Central canvas UI: street map drawing area.
//!
//! Each egui frame is one iteration of the interaction loop. The map itself is
//! only re-projected when the loop reports a redraw; otherwise the shapes of
//! the last redraw are replayed.

use crate::geo::{render_graph, Projector, ScreenPoint, Viewport};
use crate::state::{AppState, InputSnapshot, LoopState};
use eframe::egui::{self, Color32, Key, Rect, RichText, Sense, Vec2, ViewportCommand};

pub fn render_canvas(ctx: &egui::Context, state: &mut AppState) {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
            let rect = response.rect;
            let input = read_input(ctx, &response);

            let AppState {
                graph,
                settings,
                interaction,
                surface,
                projector,
                last_render,
                cursor,
                redraw_error,
                ..
            } = &mut *state;

            let result = interaction.step(&input, |view| {
                let size = rect.size();
                surface.resize(size);
                let viewport = Viewport {
                    width: size.x as f64,
                    height: size.y as f64,
                    margin: settings.margin,
                };
                let next =
                    Projector::for_graph(graph, viewport, view.zoom_factor, view.pan_offset)?;
                *last_render = Some(render_graph(surface, graph, &next, &settings.style));
                *projector = Some(next);
                *redraw_error = None;
                Ok(())
            });

            match result {
                Ok(LoopState::Stopped) => {
                    ctx.send_viewport_cmd(ViewportCommand::Close);
                    return;
                }
                Ok(_) => {}
                Err(e) => {
                    log::error!("Redraw failed: {}", e);
                    *redraw_error = Some(e.to_string());
                }
            }

            surface.paint(&painter, rect.min);

            *cursor = response.hover_pos().and_then(|pos| {
                let local = pos - rect.min;
                projector
                    .as_ref()
                    .map(|p| p.unproject(ScreenPoint::new(local.x as f64, local.y as f64)))
            });

            draw_overlay_info(ui, &rect, state);
        });
}

/// Collects this frame's keyboard and pointer state.
fn read_input(ctx: &egui::Context, response: &egui::Response) -> InputSnapshot {
    let drag = if response.dragged() {
        response.drag_delta()
    } else {
        Vec2::ZERO
    };
    let size = response.rect.size();

    ctx.input(|i| InputSnapshot {
        zoom_in: i.key_down(Key::Plus) || i.key_down(Key::Equals),
        zoom_out: i.key_down(Key::Minus),
        rate_up: i.key_down(Key::ArrowUp),
        rate_down: i.key_down(Key::ArrowDown),
        quit: i.key_down(Key::Escape),
        close_requested: i.viewport().close_requested(),
        drag_delta: (drag.x as f64, drag.y as f64),
        reset_view: response.double_clicked(),
        surface_size: Some((size.x as f64, size.y as f64)),
    })
}

fn draw_overlay_info(ui: &mut egui::Ui, rect: &Rect, state: &AppState) {
    let overlay_pos = rect.left_top() + Vec2::new(10.0, 10.0);
    let overlay_rect = Rect::from_min_size(overlay_pos, Vec2::new(180.0, 60.0));
    let text_color = Color32::from_rgb(200, 200, 220);
    let view = state.interaction.view();

    ui.scope_builder(egui::UiBuilder::new().max_rect(overlay_rect), |ui| {
        ui.vertical(|ui| {
            ui.label(
                RichText::new(format!("Zoom: {:.2}x", view.zoom_factor))
                    .monospace()
                    .size(12.0)
                    .color(text_color),
            );
            ui.label(
                RichText::new(format!("Rate: {:.2}", view.zoom_rate))
                    .monospace()
                    .size(12.0)
                    .color(text_color),
            );
            if let Some(stats) = &state.last_render {
                ui.label(
                    RichText::new(format!("Draw: {:.1} ms", stats.elapsed.as_secs_f64() * 1000.0))
                        .monospace()
                        .size(12.0)
                        .color(text_color),
                );
            }
        });
    });
}
