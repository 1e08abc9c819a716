//! Chainscope - a blockchain transaction graph visualizer
//!
//! Entry point for the application.

use eframe::egui;
use serde_json::json;

use chainscope::app::PanelApp;
use chainscope::graph::{validation, GraphDataset};

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title("Chainscope"),
        ..Default::default()
    };

    eframe::run_native(
        "Chainscope",
        options,
        Box::new(|_cc| Ok(Box::new(PanelApp::new(demo_dataset())))),
    )
}

/// Small bundled dataset so the window shows something without an indexer
/// attached. Runs through the same validation gate as real input.
fn demo_dataset() -> GraphDataset {
    let raw = json!({
        "nodes": [
            {"id": "0x1a2b", "label": "0x1a2b…9c", "chainId": 7000},
            {"id": "0x3c4d", "label": "0x3c4d…1f", "chainId": 7000},
            {"id": "0x5e6f", "label": "0x5e6f…77", "chainId": 1},
        ],
        "edges": [
            {"source": "0x1a2b", "target": "0x3c4d", "status": "success"},
            {"source": "0x3c4d", "target": "0x5e6f", "status": "pending"},
        ],
    });

    if !validation::is_valid_graph_data(&raw) {
        tracing::warn!("bundled dataset failed validation, starting empty");
        return GraphDataset::default();
    }
    serde_json::from_value(raw).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "bundled dataset failed to deserialize");
        GraphDataset::default()
    })
}
