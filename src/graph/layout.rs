//! Layout algorithm identifiers for the graph view.
//!
//! The actual layout computation lives in the rendering engine; this module
//! only defines the closed set of algorithms the control panel offers.

use serde::{Deserialize, Serialize};

/// A layout algorithm the user can pick from the control panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutKind {
    /// Physics-based layout, the default.
    ForceDirected,
    /// Layered top-down layout, good for call/flow structure.
    Hierarchical,
    /// Alternate force-directed layout with stronger cluster separation.
    ForceAtlas,
}

impl LayoutKind {
    /// Every layout offered by the selector, in display order.
    pub const ALL: [LayoutKind; 3] = [
        LayoutKind::ForceDirected,
        LayoutKind::Hierarchical,
        LayoutKind::ForceAtlas,
    ];

    /// Stable identifier passed to the layout-change collaborator.
    pub fn id(&self) -> &'static str {
        match self {
            LayoutKind::ForceDirected => "force-directed",
            LayoutKind::Hierarchical => "hierarchical",
            LayoutKind::ForceAtlas => "force-atlas",
        }
    }

    /// Human-readable name shown in the combo box.
    pub fn label(&self) -> &'static str {
        match self {
            LayoutKind::ForceDirected => "Force directed",
            LayoutKind::Hierarchical => "Hierarchical",
            LayoutKind::ForceAtlas => "Force atlas",
        }
    }
}

impl Default for LayoutKind {
    fn default() -> Self {
        LayoutKind::ForceDirected
    }
}
