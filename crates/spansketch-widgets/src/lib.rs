//! Styled egui components for SpanSketch.
//!
//! - **Rail**: navigation rail destinations (icon over label, pill indicator)
//! - **Frames**: rail and status bar frames
//! - **Layout**: the rail divider

pub mod frames;
pub mod layout;
pub mod rail;

pub use frames::{rail_frame, status_frame};
pub use layout::vertical_divider;
pub use rail::{RailDestination, RailStyle, navigation_rail};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Minimum rail width.
    pub const RAIL_WIDTH: f32 = 100.0;
    /// Height of one rail destination (indicator + label).
    pub const DESTINATION_HEIGHT: f32 = 56.0;
    /// Selection indicator pill.
    pub const INDICATOR_WIDTH: f32 = 56.0;
    pub const INDICATOR_HEIGHT: f32 = 32.0;
    pub const ICON: f32 = 24.0;
    /// Panel corner radius
    pub const PANEL_RADIUS: u8 = 8;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Selection/active color (blue)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
    /// Hover background
    pub const HOVER_BG: Color32 = Color32::from_rgb(245, 245, 245);
    /// Selected indicator background
    pub const SELECTED_BG: Color32 = Color32::from_rgb(219, 234, 254);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(250, 250, 252, 250);
}
