//! Theme definitions for the chainscope UI
//!
//! Color constants and style configuration for a dark explorer aesthetic.

use eframe::egui::{self, Color32};

/// Background colors
pub mod background {
    use super::Color32;

    /// Main window background - near-black blue
    pub const MAIN: Color32 = Color32::from_rgb(18, 22, 32);

    /// Panel background - slightly lifted
    pub const PANEL: Color32 = Color32::from_rgb(26, 31, 44);

    /// Widget background (buttons, combo boxes)
    pub const WIDGET: Color32 = Color32::from_rgb(38, 45, 62);

    /// Widget background when hovered
    pub const WIDGET_HOVERED: Color32 = Color32::from_rgb(50, 58, 80);

    /// Widget background when active/pressed
    pub const WIDGET_ACTIVE: Color32 = Color32::from_rgb(62, 72, 98);
}

/// Text colors
pub mod text {
    use super::Color32;

    /// Primary text - bright
    pub const PRIMARY: Color32 = Color32::from_rgb(236, 239, 244);

    /// Secondary text - dimmed labels
    pub const SECONDARY: Color32 = Color32::from_rgb(148, 156, 176);

    /// Disabled text
    pub const DISABLED: Color32 = Color32::from_rgb(92, 99, 116);
}

/// Transaction status colors - badges and node accents
pub mod status {
    use super::Color32;

    /// Confirmed/successful - green
    pub const SUCCESS: Color32 = Color32::from_rgb(102, 187, 106);

    /// Pending - amber
    pub const PENDING: Color32 = Color32::from_rgb(255, 202, 40);

    /// Failed/reverted - red
    pub const FAILED: Color32 = Color32::from_rgb(239, 83, 80);

    /// Cross-chain message accent - violet
    pub const CROSS_CHAIN: Color32 = Color32::from_rgb(171, 130, 255);
}

/// Apply the dark theme to the egui context.
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    let visuals = &mut style.visuals;

    visuals.dark_mode = true;
    visuals.panel_fill = background::PANEL;
    visuals.window_fill = background::MAIN;
    visuals.extreme_bg_color = background::MAIN;

    visuals.widgets.noninteractive.bg_fill = background::PANEL;
    visuals.widgets.noninteractive.fg_stroke.color = text::SECONDARY;
    visuals.widgets.inactive.bg_fill = background::WIDGET;
    visuals.widgets.inactive.fg_stroke.color = text::PRIMARY;
    visuals.widgets.hovered.bg_fill = background::WIDGET_HOVERED;
    visuals.widgets.hovered.fg_stroke.color = text::PRIMARY;
    visuals.widgets.active.bg_fill = background::WIDGET_ACTIVE;
    visuals.widgets.active.fg_stroke.color = text::PRIMARY;

    ctx.set_style(style);
}
