//! Drawing surfaces: the coordinate systems a board can be backed by.
//!
//! A surface owns the widget viewport and knows how to map widget-local
//! pixels into its data space. The chart surface maps onto plotted axes; the
//! canvas surface maps onto a pannable, zoomable vector canvas.

mod canvas;
mod chart;

pub use canvas::CanvasSurface;
pub use chart::{ChartSurface, Series};

use crate::axes::TransformResult;
use kurbo::{Affine, Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Which surface backs a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceKind {
    /// Plotted chart with axes.
    #[default]
    Chart,
    /// Native vector canvas.
    Canvas,
}

impl SurfaceKind {
    pub fn name(self) -> &'static str {
        match self {
            SurfaceKind::Chart => "chart",
            SurfaceKind::Canvas => "canvas",
        }
    }
}

/// Unknown surface name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown surface kind '{0}' (expected 'chart' or 'canvas')")]
pub struct ParseSurfaceKindError(pub String);

impl FromStr for SurfaceKind {
    type Err = ParseSurfaceKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chart" => Ok(SurfaceKind::Chart),
            "canvas" => Ok(SurfaceKind::Canvas),
            _ => Err(ParseSurfaceKindError(s.to_string())),
        }
    }
}

/// A rendering surface gestures are interpreted against.
pub trait Surface: std::fmt::Debug + Send + Sync {
    /// Which kind of surface this is.
    fn kind(&self) -> SurfaceKind;

    /// Current widget size in pixels.
    fn viewport(&self) -> Size;

    /// Update the widget size (called on layout/resize).
    fn set_viewport(&mut self, size: Size);

    /// Map a widget-local pixel position into data space.
    fn pixel_to_data(&self, pixel: Point) -> TransformResult<Point>;

    /// Map a data-space point to a widget-local pixel position.
    fn data_to_pixel(&self, data: Point) -> TransformResult<Point>;

    /// Data -> pixel transform for rendering.
    fn data_to_pixel_affine(&self) -> TransformResult<Affine>;

    /// Data-space rectangle visible through the surface.
    fn data_bounds(&self) -> TransformResult<Rect>;

    fn as_chart(&self) -> Option<&ChartSurface> {
        None
    }

    fn as_canvas(&self) -> Option<&CanvasSurface> {
        None
    }

    fn as_canvas_mut(&mut self) -> Option<&mut CanvasSurface> {
        None
    }
}
