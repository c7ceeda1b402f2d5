//! Panel frames.

use egui::{Color32, CornerRadius, Frame, Margin, Stroke};

use crate::{sizing, theme};

/// Frame of the navigation rail: flat, full height, no rounding.
pub fn rail_frame() -> Frame {
    Frame::new()
        .fill(theme::PANEL_BG)
        .inner_margin(Margin::symmetric(8, 12))
}

/// Floating status bar frame with shadow.
pub fn status_frame() -> Frame {
    Frame::new()
        .fill(theme::PANEL_BG)
        .corner_radius(CornerRadius::same(sizing::PANEL_RADIUS))
        .stroke(Stroke::new(1.0, theme::BORDER))
        .shadow(egui::epaint::Shadow {
            spread: 0,
            blur: 6,
            offset: [0, 2],
            color: Color32::from_black_alpha(10),
        })
        .inner_margin(Margin::symmetric(12, 6))
}
