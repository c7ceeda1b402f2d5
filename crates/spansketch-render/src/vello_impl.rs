//! Vello-based renderer implementation.

use crate::renderer::{GridStyle, RenderContext, Renderer, axis_ticks, clip_segment};
use kurbo::{Affine, BezPath, Circle, Point, Rect, Stroke};
use peniko::{Color, Fill};
use spansketch_core::{Board, CanvasSurface, ChartSurface, Series, Surface};
use vello::Scene;

/// Canvas grid spacing in world units.
const CANVAS_GRID_SIZE: f64 = 20.0;
/// Upper bound on ticks per chart axis.
const MAX_TICKS: usize = 9;
/// Radius of the drag markers, in pixels.
const MARKER_RADIUS: f64 = 3.5;
/// Span fill opacity.
const SPAN_ALPHA: f32 = 0.1;

/// Vello-based renderer for GPU-accelerated 2D graphics.
pub struct VelloRenderer {
    scene: Scene,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene.reset();

        let screen = ctx.screen_transform();
        let board_rect = ctx.board_rect();
        if board_rect.is_zero_area() {
            return;
        }
        self.scene
            .fill(Fill::NonZero, screen, ctx.palette.figure, None, &board_rect);

        let surface = ctx.board.surface();
        if let Some(chart) = surface.as_chart() {
            self.render_chart(chart, ctx);
        } else if let Some(canvas) = surface.as_canvas() {
            self.render_canvas(canvas, ctx);
        }

        self.render_span(ctx.board, ctx);
        self.render_drag_markers(ctx.board, ctx);
    }
}

impl VelloRenderer {
    /// Axes face, grid, ticks, series and frame of a chart.
    fn render_chart(&mut self, chart: &ChartSurface, ctx: &RenderContext) {
        let screen = ctx.screen_transform();
        let (Ok(area), Ok(to_pixel)) = (chart.plot_area(), chart.data_to_pixel_affine()) else {
            log::trace!("Chart not laid out; skipping axes");
            return;
        };

        self.scene
            .fill(Fill::NonZero, screen, ctx.palette.axes_face, None, &area);

        let limits = chart.axes().limits;
        let grid_stroke = Stroke::new(0.5);
        let tick_len = 4.0;
        let mut grid = BezPath::new();
        let mut ticks = BezPath::new();

        for x in axis_ticks(limits.x_min, limits.x_max, MAX_TICKS) {
            let px = (to_pixel * Point::new(x, limits.y_min)).x;
            grid.move_to((px, area.y0));
            grid.line_to((px, area.y1));
            ticks.move_to((px, area.y1));
            ticks.line_to((px, area.y1 + tick_len));
        }
        for y in axis_ticks(limits.y_min, limits.y_max, MAX_TICKS) {
            let py = (to_pixel * Point::new(limits.x_min, y)).y;
            grid.move_to((area.x0, py));
            grid.line_to((area.x1, py));
            ticks.move_to((area.x0 - tick_len, py));
            ticks.line_to((area.x0, py));
        }
        self.scene
            .stroke(&grid_stroke, screen, ctx.palette.grid, None, &grid);

        let bounds = limits.as_rect();
        for series in chart.series() {
            self.render_series(series, bounds, to_pixel, screen);
        }

        let edge = Stroke::new(1.0);
        self.scene
            .stroke(&edge, screen, ctx.palette.axes_edge, None, &ticks);
        self.scene
            .stroke(&edge, screen, ctx.palette.axes_edge, None, &area);
    }

    /// Polyline clipped to the axes limits, stroked in pixel space.
    fn render_series(&mut self, series: &Series, bounds: Rect, to_pixel: Affine, screen: Affine) {
        let mut path = BezPath::new();
        let mut pen: Option<Point> = None;
        for pair in series.points.windows(2) {
            let Some((a, b)) = clip_segment(pair[0], pair[1], bounds) else {
                pen = None;
                continue;
            };
            let (a, b) = (to_pixel * a, to_pixel * b);
            if pen != Some(a) {
                path.move_to(a);
            }
            path.line_to(b);
            pen = Some(b);
        }
        if path.elements().is_empty() {
            return;
        }
        let color: Color = series.color.into();
        self.scene
            .stroke(&Stroke::new(series.line_width), screen, color, None, &path);
    }

    /// Background grid under the current pan/zoom view.
    fn render_canvas(&mut self, canvas: &CanvasSurface, ctx: &RenderContext) {
        let Ok(visible) = canvas.data_bounds() else {
            return;
        };
        let view = ctx.screen_transform() * canvas.view_transform();
        // Keep grid lines one physical pixel wide at any zoom.
        let width = 0.5 / canvas.zoom;

        let start_x = (visible.x0 / CANVAS_GRID_SIZE).floor() * CANVAS_GRID_SIZE;
        let start_y = (visible.y0 / CANVAS_GRID_SIZE).floor() * CANVAS_GRID_SIZE;
        let end_x = (visible.x1 / CANVAS_GRID_SIZE).ceil() * CANVAS_GRID_SIZE;
        let end_y = (visible.y1 / CANVAS_GRID_SIZE).ceil() * CANVAS_GRID_SIZE;

        let mut path = BezPath::new();
        match ctx.grid_style {
            GridStyle::None => return,
            GridStyle::Lines => {
                let mut x = start_x;
                while x <= end_x {
                    path.move_to((x, start_y));
                    path.line_to((x, end_y));
                    x += CANVAS_GRID_SIZE;
                }
                let mut y = start_y;
                while y <= end_y {
                    path.move_to((start_x, y));
                    path.line_to((end_x, y));
                    y += CANVAS_GRID_SIZE;
                }
                self.scene
                    .stroke(&Stroke::new(width), view, ctx.palette.grid, None, &path);
            }
            GridStyle::Dots => {
                let half = 1.5 / canvas.zoom;
                let mut x = start_x;
                while x <= end_x {
                    let mut y = start_y;
                    while y <= end_y {
                        let dot = Rect::new(x - half, y - half, x + half, y + half);
                        path.extend(kurbo::Shape::path_elements(&dot, 0.1));
                        y += CANVAS_GRID_SIZE;
                    }
                    x += CANVAS_GRID_SIZE;
                }
                self.scene
                    .fill(Fill::NonZero, view, ctx.palette.grid, None, &path);
            }
        }
    }

    /// The selection span: translucent fill with a thin edge.
    fn render_span(&mut self, board: &Board, ctx: &RenderContext) {
        let Some(rect) = board.overlay_rect() else {
            return;
        };
        let screen = ctx.screen_transform();
        let fill = ctx.palette.selection.multiply_alpha(SPAN_ALPHA);
        self.scene.fill(Fill::NonZero, screen, fill, None, &rect);
        self.scene
            .stroke(&Stroke::new(0.5), screen, ctx.palette.selection, None, &rect);
    }

    /// Markers at the drag start and current points.
    fn render_drag_markers(&mut self, board: &Board, ctx: &RenderContext) {
        let session = board.session();
        if !session.is_dragging() {
            return;
        }
        let surface: &dyn Surface = board.surface();
        let screen = ctx.screen_transform();
        for state in [session.start(), session.current()] {
            let Ok(pixel) = surface.data_to_pixel(state.point()) else {
                continue;
            };
            let dot = Circle::new(pixel, MARKER_RADIUS);
            self.scene
                .fill(Fill::NonZero, screen, ctx.palette.marker, None, &dot);
        }
    }
}
