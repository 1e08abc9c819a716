//! Layout picker for the control panel.

use egui::ComboBox;

use crate::graph::LayoutKind;

/// Holds the currently selected layout and reports changes.
///
/// The selector only offers the closed [`LayoutKind`] set; validating
/// identifiers beyond that is the rendering engine's job.
pub struct LayoutSelector {
    current: LayoutKind,
}

impl LayoutSelector {
    pub fn new() -> Self {
        Self {
            current: LayoutKind::default(),
        }
    }

    pub fn current(&self) -> LayoutKind {
        self.current
    }

    /// Switch to `kind`, returning it when this is an actual change.
    pub fn select(&mut self, kind: LayoutKind) -> Option<LayoutKind> {
        if kind == self.current {
            return None;
        }
        self.current = kind;
        Some(kind)
    }

    /// Draw the combo box. Returns the new layout when the user picked a
    /// different one this frame.
    pub fn ui(&mut self, ui: &mut egui::Ui) -> Option<LayoutKind> {
        let mut picked = self.current;
        ComboBox::from_id_salt("layout_selector")
            .selected_text(picked.label())
            .show_ui(ui, |ui| {
                for kind in LayoutKind::ALL {
                    ui.selectable_value(&mut picked, kind, kind.label());
                }
            });
        self.select(picked)
    }
}

impl Default for LayoutSelector {
    fn default() -> Self {
        Self::new()
    }
}
