//! Application module
//!
//! The egui shell: control panel composition, dismiss behavior, layout
//! selection, and theme.

pub mod control_panel;
pub mod dismiss;
pub mod layout_selector;
pub mod panel_app;
pub mod theme;

pub use control_panel::{ControlPanel, PanelActions};
pub use dismiss::OutsideDismiss;
pub use layout_selector::LayoutSelector;
pub use panel_app::PanelApp;
