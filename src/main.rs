#![warn(clippy::all)]

//! Street Map Workbench - A desktop viewer for OpenStreetMap road networks.
//!
//! This application fetches a map extract from the OSM API (or reads one from
//! disk), builds a road graph from it, and draws the graph in a window with
//! keyboard zoom and mouse panning.

mod cli;
mod error;
mod geo;
mod graph;
mod osm;
mod state;
mod ui;

use std::time::Duration;

use clap::Parser;
use eframe::egui;

use cli::Cli;
use error::MapError;
use graph::{BuiltGraph, GraphBuilder};
use osm::{read_map_file, OsmClient};
use state::{AppState, Settings};

fn main() -> eframe::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let settings = match Settings::load_or_default(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Failed to load settings: {}", e);
            std::process::exit(1);
        }
    };

    if cli.print_config {
        match settings.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to serialize settings: {}", e),
        }
        return Ok(());
    }

    let built = match load_graph(&cli, &settings) {
        Ok(built) => built,
        Err(e) => {
            log::error!("Failed to load map: {}", e);
            std::process::exit(1);
        }
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Street Map Workbench")
            .with_inner_size([settings.window_width, settings.window_height]),
        ..Default::default()
    };

    eframe::run_native(
        "Street Map Workbench",
        native_options,
        Box::new(|_cc| Ok(Box::new(WorkbenchApp::new(built, settings)))),
    )
}

/// Fetches or reads the map extract and builds the road graph.
fn load_graph(cli: &Cli, settings: &Settings) -> Result<BuiltGraph, MapError> {
    let xml = if let Some(path) = &cli.file {
        read_map_file(path)?
    } else {
        let client = OsmClient::new(&settings.api_url, settings.request_timeout())?;
        match &cli.bbox {
            Some(bbox) => client.fetch_map(bbox)?,
            None => client.fetch_map_around(cli.center(), settings.fetch_radius_deg)?,
        }
    };

    GraphBuilder::new(&settings.road_key, settings.dangling_policy).parse(&xml)
}

/// Main application state and logic.
pub struct WorkbenchApp {
    state: AppState,

    /// Delay between loop iterations while idle
    frame_interval: Duration,
}

impl WorkbenchApp {
    pub fn new(built: BuiltGraph, settings: Settings) -> Self {
        log::info!(
            "Opening map view ({} nodes, {} streets)",
            built.report.nodes,
            built.report.streets
        );
        Self {
            frame_interval: settings.frame_interval(),
            state: AppState::new(built, settings),
        }
    }
}

impl eframe::App for WorkbenchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top panel must be rendered before CentralPanel
        ui::render_top_bar(ctx, &self.state);
        ui::render_canvas(ctx, &mut self.state);

        // Keep polling held keys at the configured rate
        ctx.request_repaint_after(self.frame_interval);
    }
}
