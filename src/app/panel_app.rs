//! Main application struct wiring the control panel to a graph service.
//!
//! `PanelApp` owns the egui shell: toolbar with the control panel, status
//! bar, and the central viewport area. Export futures run on a
//! current-thread tokio runtime owned by the app.

use std::cell::RefCell;
use std::rc::Rc;

use eframe::egui::{self, Align, Layout, RichText};

use super::control_panel::{ControlPanel, PanelActions};
use super::theme;
use crate::export::{ExportCoordinator, SaveDialogSink};
use crate::graph::{CallbackGraphService, GraphDataset, LayoutKind};

/// Application state for the chainscope window.
pub struct PanelApp {
    panel: ControlPanel,
    coordinator: Rc<ExportCoordinator>,

    /// Runtime driving export futures; kept as a Result so a failed start
    /// degrades to a visible status-bar message instead of aborting.
    runtime: Result<tokio::runtime::Runtime, std::io::Error>,

    /// Dataset shown in the viewport; shared with the demo graph service.
    dataset: Rc<RefCell<GraphDataset>>,

    /// Layout identifier last forwarded to the layout collaborator.
    active_layout: Rc<RefCell<String>>,

    theme_applied: bool,
}

impl PanelApp {
    /// Create the app around a dataset, wiring a callback-backed graph
    /// service that serves it for structured exports.
    pub fn new(dataset: GraphDataset) -> Self {
        let dataset = Rc::new(RefCell::new(dataset));
        let active_layout = Rc::new(RefCell::new(LayoutKind::default().id().to_string()));

        let export_source = dataset.clone();
        let service = Rc::new(
            CallbackGraphService::new()
                .with_fit(|| tracing::info!("fit viewport to graph"))
                .with_center(|| tracing::info!("center viewport on graph"))
                .with_export_structured(move || {
                    let dataset = export_source.borrow().clone();
                    Box::pin(async move {
                        if dataset.is_empty() {
                            return Ok(None);
                        }
                        Ok(Some(serde_json::to_value(&dataset)?))
                    })
                }),
        );

        let layout_sink = active_layout.clone();
        let coordinator = Rc::new(
            ExportCoordinator::new(Rc::new(SaveDialogSink::new()))
                .with_service(service)
                .on_layout_change(move |id| {
                    tracing::info!(layout = id, "layout changed");
                    *layout_sink.borrow_mut() = id.to_string();
                }),
        );

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build();

        Self {
            panel: ControlPanel::new(),
            coordinator,
            runtime,
            dataset,
            active_layout,
            theme_applied: false,
        }
    }

    fn apply_actions(&mut self, actions: PanelActions) {
        if let Some(kind) = actions.layout {
            self.coordinator.set_layout(kind.id());
        }
        if actions.fit {
            self.coordinator.fit();
        }
        if actions.center {
            self.coordinator.center();
        }
        if let Some(format) = actions.export {
            match &self.runtime {
                Ok(runtime) => {
                    let coordinator = self.coordinator.clone();
                    runtime.block_on(async move {
                        coordinator.request_export(format).await;
                    });
                }
                Err(err) => tracing::warn!(error = %err, "no runtime, export skipped"),
            }
        }
    }

    fn draw_viewport(&self, ui: &mut egui::Ui) {
        let rect = ui.available_rect_before_wrap();
        let painter = ui.painter();
        painter.rect_filled(rect, 0.0, theme::background::MAIN);

        let dataset = self.dataset.borrow();
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            format!(
                "{} nodes · {} edges\n{} layout",
                dataset.nodes.len(),
                dataset.edges.len(),
                self.active_layout.borrow()
            ),
            egui::FontId::proportional(20.0),
            theme::text::DISABLED,
        );

        ui.allocate_rect(rect, egui::Sense::hover());
    }

    fn draw_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);

            match &self.runtime {
                Err(err) => {
                    ui.label(
                        RichText::new(format!("⚠ runtime unavailable: {}", err))
                            .color(theme::status::FAILED)
                            .small(),
                    );
                }
                Ok(_) if self.coordinator.is_exporting() => {
                    ui.label(
                        RichText::new("Exporting…")
                            .color(theme::status::PENDING)
                            .small(),
                    );
                }
                Ok(_) => {
                    ui.label(
                        RichText::new("Ready")
                            .color(theme::text::SECONDARY)
                            .small(),
                    );
                }
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label(
                    RichText::new("chainscope v0.1")
                        .color(theme::text::DISABLED)
                        .small(),
                );
            });
        });
    }
}

impl eframe::App for PanelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.theme_applied {
            theme::apply_theme(ctx);
            self.theme_applied = true;
        }

        let actions = egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::none()
                    .fill(theme::background::PANEL)
                    .inner_margin(egui::Margin::symmetric(0.0, 8.0)),
            )
            .show(ctx, |ui| self.panel.ui(ui, &self.coordinator))
            .inner;

        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                egui::Frame::none()
                    .fill(theme::background::PANEL)
                    .inner_margin(egui::Margin::symmetric(0.0, 4.0)),
            )
            .show(ctx, |ui| {
                self.draw_status_bar(ui);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.draw_viewport(ui);
            });

        self.apply_actions(actions);
    }
}
