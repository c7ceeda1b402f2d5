//! Navigation rail: a vertical list of destinations, one of them selected.

use egui::{
    Align2, Color32, CornerRadius, CursorIcon, FontId, Image, ImageSource, Rect, Sense, Ui, Vec2,
    vec2,
};

use crate::{sizing, theme};

/// Style of a rail destination.
#[derive(Clone)]
pub struct RailStyle {
    /// Whole clickable area.
    pub size: Vec2,
    /// Pill drawn behind the icon of the selected destination.
    pub indicator_size: Vec2,
    pub icon_size: Vec2,
    pub indicator_color: Color32,
    pub hover_color: Color32,
    pub icon_tint: Color32,
    pub selected_icon_tint: Color32,
    pub label_color: Color32,
    pub selected_label_color: Color32,
    pub label_size: f32,
}

impl Default for RailStyle {
    fn default() -> Self {
        Self {
            size: vec2(sizing::RAIL_WIDTH - 16.0, sizing::DESTINATION_HEIGHT),
            indicator_size: vec2(sizing::INDICATOR_WIDTH, sizing::INDICATOR_HEIGHT),
            icon_size: vec2(sizing::ICON, sizing::ICON),
            indicator_color: theme::SELECTED_BG,
            hover_color: theme::HOVER_BG,
            icon_tint: Color32::from_gray(80),
            selected_icon_tint: theme::ACCENT,
            label_color: theme::TEXT_MUTED,
            selected_label_color: theme::TEXT,
            label_size: 12.0,
        }
    }
}

/// One rail destination: an icon over a label.
pub struct RailDestination<'a> {
    icon: ImageSource<'a>,
    label: &'a str,
    shortcut: Option<&'a str>,
    selected: bool,
    style: RailStyle,
}

impl<'a> RailDestination<'a> {
    pub fn new(icon: ImageSource<'a>, label: &'a str) -> Self {
        Self {
            icon,
            label,
            shortcut: None,
            selected: false,
            style: RailStyle::default(),
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Set keyboard shortcut (shown in hover tooltip).
    pub fn shortcut(mut self, shortcut: &'a str) -> Self {
        self.shortcut = Some(shortcut);
        self
    }

    /// Show the destination and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let style = &self.style;
        let (rect, response) = ui.allocate_exact_size(style.size, Sense::click());

        if ui.is_rect_visible(rect) {
            let indicator = Rect::from_center_size(
                rect.center_top() + vec2(0.0, style.indicator_size.y / 2.0),
                style.indicator_size,
            );
            let radius = CornerRadius::same((style.indicator_size.y / 2.0) as u8);
            if self.selected {
                ui.painter()
                    .rect_filled(indicator, radius, style.indicator_color);
            } else if response.hovered() {
                ui.painter().rect_filled(indicator, radius, style.hover_color);
            }

            let tint = if self.selected {
                style.selected_icon_tint
            } else {
                style.icon_tint
            };
            Image::new(self.icon)
                .fit_to_exact_size(style.icon_size)
                .tint(tint)
                .paint_at(ui, Rect::from_center_size(indicator.center(), style.icon_size));

            let label_color = if self.selected {
                style.selected_label_color
            } else {
                style.label_color
            };
            ui.painter().text(
                indicator.center_bottom() + vec2(0.0, 4.0),
                Align2::CENTER_TOP,
                self.label,
                FontId::proportional(style.label_size),
                label_color,
            );
        }

        let clicked = response.clicked();
        let response = match self.shortcut {
            Some(shortcut) => response.on_hover_text(format!("{} ({})", self.label, shortcut)),
            None => response.on_hover_text(self.label),
        };
        response.on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}

/// Show `destinations` stacked vertically; returns the index clicked this frame.
///
/// Each entry is `(icon, label, shortcut)`; `selected` is highlighted.
pub fn navigation_rail<'a>(
    ui: &mut Ui,
    destinations: impl IntoIterator<Item = (ImageSource<'a>, &'a str, &'a str)>,
    selected: usize,
) -> Option<usize> {
    let mut clicked = None;
    ui.vertical_centered(|ui| {
        ui.spacing_mut().item_spacing.y = 12.0;
        for (index, (icon, label, shortcut)) in destinations.into_iter().enumerate() {
            let destination = RailDestination::new(icon, label)
                .shortcut(shortcut)
                .selected(index == selected);
            if destination.show(ui) {
                clicked = Some(index);
            }
        }
    });
    clicked
}
