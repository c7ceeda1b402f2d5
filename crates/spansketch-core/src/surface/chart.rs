//! Chart-backed surface: plotted axes inside a figure.

use super::{Surface, SurfaceKind};
use crate::axes::{Axes, AxesBox, AxisLimits, TransformError, TransformResult};
use crate::color::SerializableColor;
use kurbo::{Affine, Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// A polyline plotted in data space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub points: Vec<Point>,
    #[serde(default = "SerializableColor::series_blue")]
    pub color: SerializableColor,
    #[serde(default = "default_line_width")]
    pub line_width: f64,
}

fn default_line_width() -> f64 {
    1.5
}

impl Series {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            color: SerializableColor::series_blue(),
            line_width: default_line_width(),
        }
    }

    /// Straight line between two data points.
    pub fn line(from: Point, to: Point) -> Self {
        Self::new(vec![from, to])
    }
}

/// Surface whose data space is a set of plotted axes.
///
/// The axes box is recomputed from the viewport on every resize: a fixed
/// pixel margin is kept around the axes and, when `equal_aspect` is set, the
/// box is shrunk so both axes share one scale. A failed layout is kept and
/// reported by every transform until a later resize succeeds.
#[derive(Debug, Clone)]
pub struct ChartSurface {
    axes: Axes,
    layout: TransformResult<()>,
    series: Vec<Series>,
    viewport: Size,
    padding: f64,
    equal_aspect: bool,
}

impl Default for ChartSurface {
    fn default() -> Self {
        Self::new(AxisLimits::default())
            .with_series(Series::line(Point::new(-10.0, 0.0), Point::new(10.0, 20.0)))
    }
}

impl ChartSurface {
    /// Default margin between the widget edge and the axes, in pixels.
    pub const DEFAULT_PADDING: f64 = 32.0;

    /// Create an empty chart with the given limits.
    pub fn new(limits: AxisLimits) -> Self {
        Self {
            axes: Axes::new(limits, AxesBox::FULL),
            layout: Err(TransformError::LayoutNotReady {
                width: 0.0,
                height: 0.0,
            }),
            series: Vec::new(),
            viewport: Size::ZERO,
            padding: Self::DEFAULT_PADDING,
            equal_aspect: true,
        }
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self.relayout_logged();
        self
    }

    pub fn with_equal_aspect(mut self, equal_aspect: bool) -> Self {
        self.equal_aspect = equal_aspect;
        self.relayout_logged();
        self
    }

    pub fn axes(&self) -> &Axes {
        &self.axes
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }

    /// Change the data limits and lay the axes out again.
    pub fn set_limits(&mut self, limits: AxisLimits) {
        self.axes.limits = limits;
        self.relayout_logged();
    }

    /// Pixel rectangle covered by the axes.
    pub fn plot_area(&self) -> TransformResult<Rect> {
        self.laid_out()?.plot_area(self.viewport)
    }

    /// The axes, or the error left by the last layout attempt.
    fn laid_out(&self) -> TransformResult<&Axes> {
        self.layout.map(|()| &self.axes)
    }

    /// Recompute the axes box for the current viewport.
    ///
    /// On failure the surface stays unusable until the next successful layout.
    pub fn relayout(&mut self) -> TransformResult<()> {
        self.layout = self.fit_axes();
        self.layout
    }

    fn fit_axes(&mut self) -> TransformResult<()> {
        let mut axes = Axes::new(self.axes.limits, AxesBox::tight(self.viewport, self.padding)?);
        if self.equal_aspect {
            axes.set_equal_aspect(self.viewport)?;
        }
        self.axes = axes;
        Ok(())
    }

    fn relayout_logged(&mut self) {
        let result = self.relayout();
        if self.viewport.is_zero_area() {
            return;
        }
        if let Err(e) = result {
            log::warn!("Chart layout failed: {}", e);
        }
    }
}

impl Surface for ChartSurface {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Chart
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn set_viewport(&mut self, size: Size) {
        self.viewport = size;
        self.relayout_logged();
    }

    fn pixel_to_data(&self, pixel: Point) -> TransformResult<Point> {
        self.laid_out()?.pixel_to_data(pixel, self.viewport)
    }

    fn data_to_pixel(&self, data: Point) -> TransformResult<Point> {
        self.laid_out()?.data_to_pixel(data, self.viewport)
    }

    fn data_to_pixel_affine(&self) -> TransformResult<Affine> {
        self.laid_out()?.data_to_pixel_affine(self.viewport)
    }

    fn data_bounds(&self) -> TransformResult<Rect> {
        self.plot_area()?;
        Ok(self.axes.limits.as_rect())
    }

    fn as_chart(&self) -> Option<&ChartSurface> {
        Some(self)
    }
}
