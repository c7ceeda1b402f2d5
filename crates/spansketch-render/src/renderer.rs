//! Renderer trait abstraction.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use peniko::Color;
use spansketch_core::Board;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Background grid of the canvas surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridStyle {
    None,
    #[default]
    Lines,
    Dots,
}

impl GridStyle {
    /// Cycle to the next grid style.
    pub fn next(self) -> Self {
        match self {
            GridStyle::None => GridStyle::Lines,
            GridStyle::Lines => GridStyle::Dots,
            GridStyle::Dots => GridStyle::None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GridStyle::None => "None",
            GridStyle::Lines => "Lines",
            GridStyle::Dots => "Dots",
        }
    }
}

/// Colors used to draw a board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Area around the axes (the figure).
    pub figure: Color,
    /// Inside of the axes.
    pub axes_face: Color,
    pub axes_edge: Color,
    pub grid: Color,
    /// Span color; drawn translucent.
    pub selection: Color,
    /// Drag start/current markers.
    pub marker: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            figure: Color::from_rgba8(250, 250, 250, 255),
            axes_face: Color::WHITE,
            axes_edge: Color::from_rgba8(40, 40, 40, 255),
            grid: Color::from_rgba8(200, 200, 200, 100),
            selection: Color::from_rgba8(0, 0, 255, 255),
            marker: Color::from_rgba8(214, 39, 40, 255),
        }
    }
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The board to render.
    pub board: &'a Board,
    /// Top-left of the board inside the window, in logical pixels.
    pub origin: Point,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    pub palette: Palette,
    /// Grid drawn behind a canvas surface.
    pub grid_style: GridStyle,
}

impl<'a> RenderContext<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            origin: Point::ZERO,
            scale_factor: 1.0,
            palette: Palette::default(),
            grid_style: GridStyle::default(),
        }
    }

    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    pub fn with_grid(mut self, style: GridStyle) -> Self {
        self.grid_style = style;
        self
    }

    /// Board-local pixels -> physical window pixels.
    pub fn screen_transform(&self) -> Affine {
        Affine::scale(self.scale_factor) * Affine::translate(self.origin.to_vec2())
    }

    /// Board rectangle in board-local pixels.
    pub fn board_rect(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.board.surface().viewport())
    }

    /// Physical size of the board area.
    pub fn physical_size(&self) -> Size {
        self.board.surface().viewport() * self.scale_factor
    }

    /// Physical offset of the board inside the window.
    pub fn physical_origin(&self) -> Vec2 {
        self.origin.to_vec2() * self.scale_factor
    }
}

/// Trait for rendering backends.
pub trait Renderer: Send + Sync {
    /// Build the drawing commands for one frame.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.palette.figure
    }
}

/// Evenly spaced "nice" tick positions covering `[min, max]`.
///
/// The step is 1, 2, 2.5 or 5 times a power of ten, chosen so that at most
/// `max_ticks` ticks fall inside the range.
pub fn axis_ticks(min: f64, max: f64, max_ticks: usize) -> Vec<f64> {
    let (lo, hi) = (min.min(max), min.max(max));
    let range = hi - lo;
    if !range.is_finite() || range <= 0.0 || max_ticks < 2 {
        return Vec::new();
    }

    let raw_step = range / (max_ticks - 1) as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw_step)
        .unwrap_or(10.0 * magnitude);

    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last)
        .map(|i| {
            let v = i as f64 * step;
            // Avoid printing "-0".
            if v == 0.0 { 0.0 } else { v }
        })
        .collect()
}

/// Clip the segment `a`-`b` to `bounds` (Liang-Barsky).
pub fn clip_segment(a: Point, b: Point, bounds: Rect) -> Option<(Point, Point)> {
    let d = b - a;
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;
    let checks = [
        (-d.x, a.x - bounds.x0),
        (d.x, bounds.x1 - a.x),
        (-d.y, a.y - bounds.y0),
        (d.y, bounds.y1 - a.y),
    ];
    for (p, q) in checks {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((a + d * t0, a + d * t1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_style_cycle() {
        let mut style = GridStyle::default();
        assert_eq!(style, GridStyle::Lines);
        style = style.next();
        assert_eq!(style.name(), "Dots");
        assert_eq!(style.next().next(), GridStyle::Lines);
    }

    #[test]
    fn test_axis_ticks_symmetric() {
        let ticks = axis_ticks(-40.0, 40.0, 9);
        assert_eq!(ticks, vec![-40.0, -30.0, -20.0, -10.0, 0.0, 10.0, 20.0, 30.0, 40.0]);
    }

    #[test]
    fn test_axis_ticks_within_range() {
        let ticks = axis_ticks(-8.0, 16.0, 6);
        assert!(ticks.len() <= 6 && ticks.len() >= 2);
        assert!(ticks.iter().all(|t| (-8.0..=16.0).contains(t)));
        let step = ticks[1] - ticks[0];
        assert!(ticks.windows(2).all(|w| (w[1] - w[0] - step).abs() < 1e-9));
    }

    #[test]
    fn test_axis_ticks_degenerate() {
        assert!(axis_ticks(3.0, 3.0, 5).is_empty());
        assert!(axis_ticks(0.0, f64::NAN, 5).is_empty());
        assert!(axis_ticks(0.0, 1.0, 1).is_empty());
    }

    #[test]
    fn test_clip_segment() {
        let bounds = Rect::new(-1.0, -1.0, 1.0, 1.0);
        let (a, b) = clip_segment(Point::new(-2.0, 0.0), Point::new(2.0, 0.0), bounds).unwrap();
        assert!((a.x + 1.0).abs() < 1e-12);
        assert!((b.x - 1.0).abs() < 1e-12);

        let inside = clip_segment(Point::new(0.0, 0.0), Point::new(0.5, 0.5), bounds).unwrap();
        assert_eq!(inside, (Point::new(0.0, 0.0), Point::new(0.5, 0.5)));

        assert!(clip_segment(Point::new(2.0, 2.0), Point::new(3.0, 5.0), bounds).is_none());
    }

    #[test]
    fn test_context_transforms() {
        let mut board = Board::new(Box::new(spansketch_core::CanvasSurface::new()));
        board.set_viewport(Size::new(200.0, 100.0));
        let ctx = RenderContext::new(&board)
            .with_origin(Point::new(100.0, 0.0))
            .with_scale_factor(2.0);
        let p = ctx.screen_transform() * Point::new(10.0, 10.0);
        assert_eq!(p, Point::new(220.0, 20.0));
        assert_eq!(ctx.physical_size(), Size::new(400.0, 200.0));
        assert_eq!(ctx.board_rect(), Rect::new(0.0, 0.0, 200.0, 100.0));
    }
}
