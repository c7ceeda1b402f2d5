//! Canvas-backed surface: a vector canvas with a pan/zoom view.

use super::{Surface, SurfaceKind};
use crate::axes::{TransformResult, ensure_layout};
use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Surface whose data space is canvas world space.
///
/// World y grows downward like screen pixels. The view maps world to pixels
/// as `pixel = world * zoom + offset`.
#[derive(Debug, Clone)]
pub struct CanvasSurface {
    /// Pan offset in pixels.
    pub offset: Vec2,
    /// Pixels per world unit.
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    viewport: Size,
}

impl Default for CanvasSurface {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 10.0,
            viewport: Size::ZERO,
        }
    }
}

impl CanvasSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// World -> pixel transform.
    pub fn view_transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Pan the view by a pixel delta.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom by `factor`, keeping the world point under `pixel` fixed.
    pub fn zoom_at(&mut self, pixel: Point, factor: f64) {
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        let world = (pixel - self.offset).to_vec2() / self.zoom;
        self.zoom = new_zoom;
        self.offset = pixel.to_vec2() - world * self.zoom;
    }

    /// Back to identity: one world unit per pixel, no pan.
    pub fn reset_view(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = 1.0;
    }
}

impl Surface for CanvasSurface {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Canvas
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn set_viewport(&mut self, size: Size) {
        self.viewport = size;
    }

    fn pixel_to_data(&self, pixel: Point) -> TransformResult<Point> {
        ensure_layout(self.viewport)?;
        Ok(self.view_transform().inverse() * pixel)
    }

    fn data_to_pixel(&self, data: Point) -> TransformResult<Point> {
        ensure_layout(self.viewport)?;
        Ok(self.view_transform() * data)
    }

    fn data_to_pixel_affine(&self) -> TransformResult<Affine> {
        ensure_layout(self.viewport)?;
        Ok(self.view_transform())
    }

    fn data_bounds(&self) -> TransformResult<Rect> {
        ensure_layout(self.viewport)?;
        let inverse = self.view_transform().inverse();
        let top_left = inverse * Point::ZERO;
        let bottom_right = inverse * Point::new(self.viewport.width, self.viewport.height);
        Ok(Rect::from_points(top_left, bottom_right))
    }

    fn as_canvas(&self) -> Option<&CanvasSurface> {
        Some(self)
    }

    fn as_canvas_mut(&mut self) -> Option<&mut CanvasSurface> {
        Some(self)
    }
}
