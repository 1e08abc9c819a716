//! The visible control surface: layout picker, view commands, export menu.

use eframe::egui::{self, Align, Layout, RichText};

use super::dismiss::OutsideDismiss;
use super::layout_selector::LayoutSelector;
use super::theme;
use crate::export::{ExportCoordinator, ExportFormat};
use crate::graph::LayoutKind;

/// Clicks collected during drawing for deferred execution.
#[derive(Default)]
pub struct PanelActions {
    pub fit: bool,
    pub center: bool,
    pub export: Option<ExportFormat>,
    pub layout: Option<LayoutKind>,
}

/// Composes the layout selector, fit/center buttons, and the export button
/// with its dropdown menu.
///
/// Menu open/closed state lives in the [`ExportCoordinator`]; the panel owns
/// the dismiss detector, armed exactly while the menu is open.
pub struct ControlPanel {
    selector: LayoutSelector,
    dismiss: Option<OutsideDismiss>,
}

impl ControlPanel {
    pub fn new() -> Self {
        Self {
            selector: LayoutSelector::new(),
            dismiss: None,
        }
    }

    pub fn current_layout(&self) -> LayoutKind {
        self.selector.current()
    }

    #[cfg(test)]
    fn dismiss_armed(&self) -> bool {
        self.dismiss.is_some()
    }

    /// Draw the toolbar row and the export menu, collecting clicks.
    pub fn ui(&mut self, ui: &mut egui::Ui, coordinator: &ExportCoordinator) -> PanelActions {
        let mut actions = PanelActions::default();

        ui.horizontal(|ui| {
            ui.add_space(8.0);

            ui.label(
                RichText::new("CHAINSCOPE")
                    .size(18.0)
                    .color(theme::text::PRIMARY)
                    .strong(),
            );

            ui.add_space(16.0);
            ui.separator();
            ui.add_space(16.0);

            ui.label(RichText::new("Layout").color(theme::text::SECONDARY));
            actions.layout = self.selector.ui(ui);

            ui.add_space(16.0);
            ui.separator();
            ui.add_space(16.0);

            if ui.button("Fit").clicked() {
                actions.fit = true;
            }
            if ui.button("Center").clicked() {
                actions.center = true;
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.add_space(8.0);
                self.export_controls(ui, coordinator, &mut actions);
            });
        });

        self.update_dismiss(ui.ctx(), coordinator);

        actions
    }

    fn export_controls(
        &mut self,
        ui: &mut egui::Ui,
        coordinator: &ExportCoordinator,
        actions: &mut PanelActions,
    ) {
        let label = if coordinator.is_exporting() {
            "Exporting…"
        } else {
            "Export ⏷"
        };
        let button =
            ui.add_enabled(!coordinator.is_exporting(), egui::Button::new(label));
        if button.clicked() {
            coordinator.toggle_menu();
        }

        if !coordinator.is_menu_open() {
            self.dismiss = None;
            return;
        }

        let menu = egui::Area::new(egui::Id::new("export_menu"))
            .fixed_pos(button.rect.left_bottom() + egui::vec2(0.0, 4.0))
            .order(egui::Order::Foreground)
            .show(ui.ctx(), |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_min_width(140.0);
                    if ui.button("Export as PNG").clicked() {
                        actions.export = Some(ExportFormat::Image);
                    }
                    if ui.button("Export as JSON").clicked() {
                        actions.export = Some(ExportFormat::Structured);
                    }
                });
            });

        // The detector region covers the menu and its anchor button, so a
        // press on either never counts as "outside".
        self.dismiss = Some(OutsideDismiss::new(menu.response.rect.union(button.rect)));
    }

    fn update_dismiss(&mut self, ctx: &egui::Context, coordinator: &ExportCoordinator) {
        if !coordinator.is_menu_open() {
            self.dismiss = None;
            return;
        }
        if let Some(dismiss) = &self.dismiss {
            if dismiss.poll(ctx) {
                coordinator.close_menu();
                self.dismiss = None;
            }
        }
    }
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new()
    }
}
