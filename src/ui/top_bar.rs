//! Top bar UI: app title, map summary, cursor position, and status.

use crate::state::AppState;
use eframe::egui::{self, Color32, RichText};

pub fn render_top_bar(ctx: &egui::Context, state: &AppState) {
    egui::TopBottomPanel::top("top_bar")
        .exact_height(36.0)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                // App title
                ui.label(
                    RichText::new("Street Map Workbench")
                        .strong()
                        .size(16.0)
                        .color(Color32::WHITE),
                );

                ui.separator();

                ui.label(
                    RichText::new(format!(
                        "{} nodes  {} streets",
                        state.graph.node_count(),
                        state.graph.street_count()
                    ))
                    .monospace()
                    .size(12.0)
                    .color(Color32::GRAY),
                );

                ui.separator();

                let cursor_text = match state.cursor {
                    Some(point) => format!("{:.5}, {:.5}", point.latitude, point.longitude),
                    None => "-".to_string(),
                };
                ui.label(
                    RichText::new(cursor_text)
                        .monospace()
                        .size(12.0)
                        .color(Color32::GRAY),
                );

                ui.separator();

                // Redraw errors take precedence over the load summary
                match &state.redraw_error {
                    Some(error) => ui.label(
                        RichText::new(error)
                            .size(13.0)
                            .color(Color32::from_rgb(230, 90, 90)),
                    ),
                    None => ui.label(
                        RichText::new(&state.status_message)
                            .size(13.0)
                            .color(Color32::GRAY),
                    ),
                };
            });
        });
}
