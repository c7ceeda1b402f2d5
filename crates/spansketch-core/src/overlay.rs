//! Live selection span drawn over the surface while dragging.

use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// A vertical band between two data-space x positions.
///
/// The band always covers the full height of the visible data area. The
/// endpoints are kept in the order they were set (start, current); use
/// [`SpanOverlay::range`] for the normalized `(min, max)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpanOverlay {
    start: f64,
    end: f64,
    visible: bool,
}

impl SpanOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both endpoints.
    pub fn set_range(&mut self, start: f64, end: f64) {
        self.start = start;
        self.end = end;
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Endpoints as `(min, max)`.
    pub fn range(&self) -> (f64, f64) {
        (self.start.min(self.end), self.start.max(self.end))
    }

    /// Endpoints in start -> current order.
    pub fn raw(&self) -> (f64, f64) {
        (self.start, self.end)
    }

    /// Width of the span in data units.
    pub fn width(&self) -> f64 {
        (self.end - self.start).abs()
    }

    /// Data-space rectangle to draw, spanning the full height of `data_bounds`.
    ///
    /// Returns `None` while hidden.
    pub fn rect(&self, data_bounds: Rect) -> Option<Rect> {
        if !self.visible {
            return None;
        }
        let (x0, x1) = self.range();
        Some(Rect::new(x0, data_bounds.y0, x1, data_bounds.y1))
    }
}
