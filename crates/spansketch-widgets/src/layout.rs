//! Layout helpers.

use egui::{Pos2, Stroke, Ui};

use crate::theme;

/// Full-height vertical divider at `x`, from `top` to `bottom`.
pub fn vertical_divider(ui: &Ui, x: f32, top: f32, bottom: f32) {
    ui.painter().line_segment(
        [Pos2::new(x, top), Pos2::new(x, bottom)],
        Stroke::new(1.0, theme::BORDER),
    );
}
