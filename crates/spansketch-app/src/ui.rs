//! UI components using egui: navigation rail, status bar, axis labels.

use egui::{Align2, Color32, Context, FontId, ImageSource, LayerId, Pos2, include_image};
use kurbo::Point;
use spansketch_core::{Board, Mode, Surface, SurfaceKind};
use spansketch_render::{GridStyle, axis_ticks};
use spansketch_widgets::{navigation_rail, rail_frame, status_frame, theme, vertical_divider};

use crate::layout::BoardLayout;
use crate::shortcuts::ShortcutRegistry;

/// Upper bound on labelled ticks per axis.
const MAX_LABELS: usize = 9;

/// Actions that can be triggered by the UI or the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// Select the mode at this rail index.
    SelectMode(usize),
    ClearSelection,
    /// Canvas surface only.
    ResetView,
    /// Canvas surface only.
    CycleGrid,
}

/// A tick label drawn next to the chart axes.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub pos: Pos2,
    pub text: String,
    pub align: Align2,
}

/// What the UI shows, mirrored from the board once per frame.
#[derive(Debug, Clone)]
pub struct UiState {
    pub layout: BoardLayout,
    pub mode: Mode,
    pub surface: SurfaceKind,
    /// Data coordinate of the last tap or drag point.
    pub last_point: Option<Point>,
    /// Visible selection span.
    pub span: Option<(f64, f64)>,
    /// Canvas zoom; `None` on a chart.
    pub zoom: Option<f64>,
    pub grid_style: GridStyle,
    pub axis_labels: Vec<AxisLabel>,
}

impl UiState {
    pub fn new(layout: BoardLayout) -> Self {
        Self {
            layout,
            mode: Mode::default(),
            surface: SurfaceKind::default(),
            last_point: None,
            span: None,
            zoom: None,
            grid_style: GridStyle::default(),
            axis_labels: Vec::new(),
        }
    }

    /// Refresh everything derived from the board.
    pub fn sync(&mut self, board: &Board) {
        self.mode = board.mode();
        self.surface = board.surface().kind();
        let overlay = board.overlay();
        self.span = overlay.is_visible().then(|| overlay.range());
        self.zoom = board.surface().as_canvas().map(|c| c.zoom);
        self.axis_labels = axis_labels(board, self.layout.origin());
    }

    /// One-line summary for the status bar.
    pub fn status_text(&self) -> String {
        let mut parts = vec![format!("Mode: {}", self.mode.label())];
        match self.last_point {
            Some(p) => parts.push(format!("({:.2}, {:.2})", p.x, p.y)),
            None => parts.push("(-, -)".to_string()),
        }
        if let Some((a, b)) = self.span {
            parts.push(format!("span [{:.2}, {:.2}]", a, b));
        }
        if let Some(zoom) = self.zoom {
            parts.push(format!("{:.0}%", zoom * 100.0));
        }
        parts.join("  |  ")
    }
}

/// Format a tick value without trailing zeros.
pub fn format_tick(value: f64) -> String {
    let text = format!("{:.3}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" | "" => "0".to_string(),
        t => t.to_string(),
    }
}

/// Tick labels around a chart's axes, in logical window pixels.
///
/// Empty for a canvas or a board that is not laid out yet.
pub fn axis_labels(board: &Board, origin: Point) -> Vec<AxisLabel> {
    let Some(chart) = board.surface().as_chart() else {
        return Vec::new();
    };
    let (Ok(area), Ok(to_pixel)) = (chart.plot_area(), chart.data_to_pixel_affine()) else {
        return Vec::new();
    };
    let limits = chart.axes().limits;
    let offset = origin.to_vec2();
    let gap = 6.0;
    let mut labels = Vec::new();

    for x in axis_ticks(limits.x_min, limits.x_max, MAX_LABELS) {
        let px = (to_pixel * Point::new(x, limits.y_min)).x;
        let p = Point::new(px, area.y1 + gap) + offset;
        labels.push(AxisLabel {
            pos: Pos2::new(p.x as f32, p.y as f32),
            text: format_tick(x),
            align: Align2::CENTER_TOP,
        });
    }
    for y in axis_ticks(limits.y_min, limits.y_max, MAX_LABELS) {
        let py = (to_pixel * Point::new(limits.x_min, y)).y;
        let p = Point::new(area.x0 - gap, py) + offset;
        labels.push(AxisLabel {
            pos: Pos2::new(p.x as f32, p.y as f32),
            text: format_tick(y),
            align: Align2::RIGHT_CENTER,
        });
    }
    labels
}

fn mode_icon(mode: Mode) -> ImageSource<'static> {
    match mode {
        Mode::Rect => include_image!("../assets/rect.svg"),
        Mode::Circle => include_image!("../assets/circle.svg"),
        Mode::Spline => include_image!("../assets/spline.svg"),
    }
}

/// Render all UI and return any triggered action.
pub fn render_ui(ctx: &Context, ui_state: &UiState) -> Option<UiAction> {
    egui_extras::install_image_loaders(ctx);

    let rail_action = render_rail(ctx, ui_state);
    let status_action = render_status_bar(ctx, ui_state);
    render_axis_labels(ctx, ui_state);

    rail_action.or(status_action)
}

/// Navigation rail pinned to the left edge, full height.
fn render_rail(ctx: &Context, ui_state: &UiState) -> Option<UiAction> {
    let mut action = None;
    #[allow(deprecated)]
    let screen = ctx.input(|i| i.content_rect());
    let width = ui_state.layout.rail_width as f32;

    egui::Area::new(egui::Id::new("navigation_rail"))
        .fixed_pos(Pos2::ZERO)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.set_min_size(egui::vec2(width, screen.height()));
            rail_frame().show(ui, |ui| {
                ui.set_min_size(egui::vec2(width - 16.0, screen.height() - 24.0));
                let destinations = Mode::ALL.iter().map(|mode| {
                    let key = ShortcutRegistry::mode_key(mode.rail_index()).unwrap_or("");
                    (mode_icon(*mode), mode.label(), key)
                });
                if let Some(index) =
                    navigation_rail(ui, destinations, ui_state.mode.rail_index())
                {
                    action = Some(UiAction::SelectMode(index));
                }
            });
            vertical_divider(ui, width, screen.top(), screen.bottom());
        });

    action
}

/// Status bar under the board; canvas boards get view controls.
fn render_status_bar(ctx: &Context, ui_state: &UiState) -> Option<UiAction> {
    let mut action = None;
    let board = ui_state.layout.board;

    egui::Area::new(egui::Id::new("status_bar"))
        .fixed_pos(Pos2::new(board.x0 as f32, (board.y1 + 8.0) as f32))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            status_frame().show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(ui_state.status_text())
                            .monospace()
                            .color(theme::TEXT),
                    );
                    if ui_state.surface == SurfaceKind::Canvas {
                        ui.separator();
                        if ui.small_button("Reset view").clicked() {
                            action = Some(UiAction::ResetView);
                        }
                        let grid = format!("Grid: {}", ui_state.grid_style.name());
                        if ui.small_button(grid).clicked() {
                            action = Some(UiAction::CycleGrid);
                        }
                    }
                    if ui_state.span.is_some() && ui.small_button("Clear").clicked() {
                        action = Some(UiAction::ClearSelection);
                    }
                });
            });
        });

    action
}

fn render_axis_labels(ctx: &Context, ui_state: &UiState) {
    if ui_state.axis_labels.is_empty() {
        return;
    }
    let painter = ctx.layer_painter(LayerId::background());
    let font = FontId::proportional(11.0);
    let color = Color32::from_gray(70);
    for label in &ui_state.axis_labels {
        painter.text(label.pos, label.align, &label.text, font.clone(), color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use kurbo::Size;
    use spansketch_core::{BoardConfig, GestureEvent};

    fn laid_out(config: &AppConfig) -> (BoardLayout, Board) {
        let layout = BoardLayout::from_config(config);
        let mut board = Board::from_config(&config.board);
        board.set_viewport(layout.board_size());
        (layout, board)
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(10.0), "10");
        assert_eq!(format_tick(-2.5), "-2.5");
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(-0.0), "0");
        assert_eq!(format_tick(0.30000000000000004), "0.3");
    }

    #[test]
    fn test_sync_from_board() {
        let config = AppConfig::default();
        let (layout, mut board) = laid_out(&config);
        let mut state = UiState::new(layout);

        board.select_mode(1).unwrap();
        board
            .handle_gesture(GestureEvent::PanStart {
                position: Point::new(100.0, 100.0),
            })
            .unwrap();
        state.sync(&board);
        assert_eq!(state.mode, Mode::Circle);
        assert!(state.span.is_none());

        board.select_mode(0).unwrap();
        board
            .handle_gesture(GestureEvent::PanStart {
                position: Point::new(100.0, 100.0),
            })
            .unwrap();
        state.sync(&board);
        assert!(state.span.is_some());
        assert!(state.zoom.is_none());
    }

    #[test]
    fn test_axis_labels_chart() {
        let config = AppConfig::default();
        let (layout, board) = laid_out(&config);
        let labels = axis_labels(&board, layout.origin());
        // -40..40 in steps of 10 on both axes.
        assert_eq!(labels.len(), 18);
        let zero_x = labels
            .iter()
            .find(|l| l.text == "0" && l.align == Align2::CENTER_TOP)
            .unwrap();
        let center = layout.origin().x + layout.board_size().width / 2.0;
        assert!((zero_x.pos.x as f64 - center).abs() < 1e-3);
    }

    #[test]
    fn test_no_axis_labels_on_canvas_or_before_layout() {
        let mut config = AppConfig::default();
        let board = Board::from_config(&config.board);
        assert!(axis_labels(&board, Point::ZERO).is_empty());

        config.board = BoardConfig {
            surface: SurfaceKind::Canvas,
            ..Default::default()
        };
        let (layout, board) = laid_out(&config);
        assert!(axis_labels(&board, layout.origin()).is_empty());
    }

    #[test]
    fn test_status_text() {
        let mut state = UiState::new(BoardLayout::from_config(&AppConfig::default()));
        assert_eq!(state.status_text(), "Mode: Rect  |  (-, -)");

        state.last_point = Some(Point::new(-2.0, 3.0));
        state.span = Some((-2.0, 1.0));
        state.zoom = Some(1.5);
        assert_eq!(
            state.status_text(),
            "Mode: Rect  |  (-2.00, 3.00)  |  span [-2.00, 1.00]  |  150%"
        );
    }

    #[test]
    fn test_render_ui_headless() {
        let config = AppConfig::default();
        let (layout, board) = laid_out(&config);
        let mut state = UiState::new(layout);
        state.sync(&board);

        let ctx = Context::default();
        let mut action = Some(UiAction::ResetView);
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            action = render_ui(ctx, &state);
        });
        assert_eq!(action, None);
        assert_eq!(board.surface().viewport(), Size::new(640.0, 640.0));
    }
}
