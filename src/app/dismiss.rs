//! Outside-press dismissal for the export menu.
//!
//! An [`OutsideDismiss`] exists only while the menu is open: the panel
//! creates one when the menu opens (recording the menu region) and drops it
//! when the menu closes, so the detector can never outlive the overlay it
//! guards.

use egui::{Pos2, Rect};

/// Scoped detector that closes an overlay on any press outside its region.
pub struct OutsideDismiss {
    region: Rect,
}

impl OutsideDismiss {
    /// Arm the detector for the given screen region.
    pub fn new(region: Rect) -> Self {
        Self { region }
    }

    pub fn region(&self) -> Rect {
        self.region
    }

    /// True when a pointer press at `pointer_down` should dismiss the
    /// overlay, i.e. the press landed outside the region.
    pub fn observe(&self, pointer_down: Pos2) -> bool {
        !self.region.contains(pointer_down)
    }

    /// Check this frame's pointer input for a dismissing press.
    pub fn poll(&self, ctx: &egui::Context) -> bool {
        ctx.input(|input| {
            if !input.pointer.any_pressed() {
                return false;
            }
            input
                .pointer
                .press_origin()
                .is_some_and(|pos| self.observe(pos))
        })
    }
}
