//! Axes geometry and the pixel <-> data coordinate transform.
//!
//! An [`Axes`] is positioned inside its widget by a normalized [`AxesBox`]
//! (fractions of the widget, origin at the bottom-left like a plotting
//! figure) and maps that box onto its data-space [`AxisLimits`]. Pixel rows
//! grow downward while data y grows upward, so the vertical axis is flipped.

use kurbo::{Affine, Point, Rect, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced by coordinate transforms.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TransformError {
    /// The widget has not been laid out yet (zero or invalid size).
    #[error("layout not ready: widget is {width}x{height}")]
    LayoutNotReady { width: f64, height: f64 },
    /// The axes box or the data limits collapse to zero extent.
    #[error("degenerate axes: {0}")]
    DegenerateAxes(&'static str),
}

/// Result type for transform operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Fail with [`TransformError::LayoutNotReady`] unless the widget has a usable size.
pub fn ensure_layout(widget: Size) -> TransformResult<()> {
    let usable = |v: f64| v.is_finite() && v > 0.0;
    if usable(widget.width) && usable(widget.height) {
        Ok(())
    } else {
        Err(TransformError::LayoutNotReady {
            width: widget.width,
            height: widget.height,
        })
    }
}

/// Data-space limits of both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisLimits {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for AxisLimits {
    fn default() -> Self {
        Self::new(-40.0, 40.0, -40.0, 40.0)
    }
}

impl AxisLimits {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Signed extent of the x axis (`x_max - x_min`).
    pub fn x_span(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Signed extent of the y axis (`y_max - y_min`).
    pub fn y_span(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// The limits as a normalized data-space rectangle.
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.x_min.min(self.x_max),
            self.y_min.min(self.y_max),
            self.x_min.max(self.x_max),
            self.y_min.max(self.y_max),
        )
    }

    fn validate(&self) -> TransformResult<()> {
        let ok = |span: f64| span.is_finite() && span != 0.0;
        if !ok(self.x_span()) {
            return Err(TransformError::DegenerateAxes("empty x range"));
        }
        if !ok(self.y_span()) {
            return Err(TransformError::DegenerateAxes("empty y range"));
        }
        Ok(())
    }
}

/// Normalized placement of the axes inside the widget.
///
/// `x0`/`y0` is the bottom-left corner, all values are fractions of the
/// widget size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxesBox {
    pub x0: f64,
    pub y0: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for AxesBox {
    fn default() -> Self {
        Self::FULL
    }
}

impl AxesBox {
    /// Axes covering the whole widget.
    pub const FULL: AxesBox = AxesBox {
        x0: 0.0,
        y0: 0.0,
        width: 1.0,
        height: 1.0,
    };

    pub fn new(x0: f64, y0: f64, width: f64, height: f64) -> Self {
        Self {
            x0,
            y0,
            width,
            height,
        }
    }

    /// Box leaving a fixed pixel margin on every side of the widget.
    pub fn tight(widget: Size, padding: f64) -> TransformResult<Self> {
        ensure_layout(widget)?;
        let bbox = Self::new(
            padding / widget.width,
            padding / widget.height,
            1.0 - 2.0 * padding / widget.width,
            1.0 - 2.0 * padding / widget.height,
        );
        bbox.validate()?;
        Ok(bbox)
    }

    fn validate(&self) -> TransformResult<()> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) && self.x0.is_finite() && self.y0.is_finite() {
            Ok(())
        } else {
            Err(TransformError::DegenerateAxes("empty axes box"))
        }
    }
}

/// Plotted axes: data limits placed in a normalized box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Axes {
    pub limits: AxisLimits,
    pub bbox: AxesBox,
}

impl Axes {
    pub fn new(limits: AxisLimits, bbox: AxesBox) -> Self {
        Self { limits, bbox }
    }

    fn check(&self, widget: Size) -> TransformResult<()> {
        ensure_layout(widget)?;
        self.bbox.validate()?;
        self.limits.validate()
    }

    /// Convert a widget-local pixel position to data coordinates.
    pub fn pixel_to_data(&self, pixel: Point, widget: Size) -> TransformResult<Point> {
        self.check(widget)?;
        let b = &self.bbox;
        let l = &self.limits;

        let x_rel = (pixel.x / widget.width - b.x0) / b.width;
        let y_rel = ((1.0 - pixel.y / widget.height) - b.y0) / b.height;

        Ok(Point::new(
            l.x_span() * x_rel + l.x_min,
            l.y_span() * y_rel + l.y_min,
        ))
    }

    /// Convert data coordinates back to a widget-local pixel position.
    pub fn data_to_pixel(&self, data: Point, widget: Size) -> TransformResult<Point> {
        self.check(widget)?;
        let b = &self.bbox;
        let l = &self.limits;

        let x_rel = (data.x - l.x_min) / l.x_span();
        let y_rel = (data.y - l.y_min) / l.y_span();

        Ok(Point::new(
            widget.width * (b.x0 + b.width * x_rel),
            widget.height * (1.0 - (b.y0 + b.height * y_rel)),
        ))
    }

    /// The pixel -> data map as an affine transform.
    pub fn pixel_to_data_affine(&self, widget: Size) -> TransformResult<Affine> {
        self.check(widget)?;
        let b = &self.bbox;
        let l = &self.limits;

        let sx = l.x_span() / (widget.width * b.width);
        let sy = -l.y_span() / (widget.height * b.height);
        let tx = l.x_min - l.x_span() * b.x0 / b.width;
        let ty = l.y_min + l.y_span() * (1.0 - b.y0) / b.height;

        Ok(Affine::new([sx, 0.0, 0.0, sy, tx, ty]))
    }

    /// The data -> pixel map as an affine transform (used for rendering).
    pub fn data_to_pixel_affine(&self, widget: Size) -> TransformResult<Affine> {
        Ok(self.pixel_to_data_affine(widget)?.inverse())
    }

    /// The axes box in widget pixels.
    pub fn plot_area(&self, widget: Size) -> TransformResult<Rect> {
        self.check(widget)?;
        let b = &self.bbox;
        Ok(Rect::new(
            widget.width * b.x0,
            widget.height * (1.0 - b.y0 - b.height),
            widget.width * (b.x0 + b.width),
            widget.height * (1.0 - b.y0),
        ))
    }

    /// Shrink the box so one data unit covers the same number of pixels on
    /// both axes. The shrunk box stays centered in the original one.
    pub fn set_equal_aspect(&mut self, widget: Size) -> TransformResult<()> {
        let area = self.plot_area(widget)?;
        let dx = self.limits.x_span().abs();
        let dy = self.limits.y_span().abs();

        let scale = (area.width() / dx).min(area.height() / dy);
        let w = scale * dx;
        let h = scale * dy;
        let left = area.x0 + (area.width() - w) / 2.0;
        let bottom = area.y1 - (area.height() - h) / 2.0;

        self.bbox = AxesBox::new(
            left / widget.width,
            1.0 - bottom / widget.height,
            w / widget.width,
            h / widget.height,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn widget() -> Size {
        Size::new(400.0, 400.0)
    }

    /// Axes where pixel (100, 100) is data (-2, 3) and pixel (150, 100) is data (1, 3).
    fn reference_axes() -> Axes {
        Axes::new(AxisLimits::new(-8.0, 16.0, -9.0, 7.0), AxesBox::FULL)
    }

    fn assert_close(a: Point, b: Point) {
        assert!((a.x - b.x).abs() < EPS, "{a:?} != {b:?}");
        assert!((a.y - b.y).abs() < EPS, "{a:?} != {b:?}");
    }

    #[test]
    fn test_reference_points() {
        let axes = reference_axes();
        let p = axes.pixel_to_data(Point::new(100.0, 100.0), widget()).unwrap();
        assert_close(p, Point::new(-2.0, 3.0));
        let p = axes.pixel_to_data(Point::new(150.0, 100.0), widget()).unwrap();
        assert_close(p, Point::new(1.0, 3.0));
    }

    #[test]
    fn test_row_flip() {
        let axes = Axes::new(AxisLimits::new(0.0, 1.0, 0.0, 1.0), AxesBox::FULL);
        let top_left = axes.pixel_to_data(Point::ZERO, widget()).unwrap();
        assert_close(top_left, Point::new(0.0, 1.0));
        let bottom_right = axes.pixel_to_data(Point::new(400.0, 400.0), widget()).unwrap();
        assert_close(bottom_right, Point::new(1.0, 0.0));
    }

    #[test]
    fn test_inset_box() {
        let axes = Axes::new(
            AxisLimits::new(-40.0, 40.0, -40.0, 40.0),
            AxesBox::new(0.1, 0.2, 0.8, 0.6),
        );
        // Bottom-left corner of the box is (40, 320) in pixels.
        let p = axes.pixel_to_data(Point::new(40.0, 320.0), widget()).unwrap();
        assert_close(p, Point::new(-40.0, -40.0));
        // Top-right corner is (360, 80).
        let p = axes.pixel_to_data(Point::new(360.0, 80.0), widget()).unwrap();
        assert_close(p, Point::new(40.0, 40.0));
    }

    #[test]
    fn test_monotonic() {
        let axes = Axes::new(AxisLimits::default(), AxesBox::new(0.1, 0.1, 0.8, 0.8));
        let mut last = axes.pixel_to_data(Point::new(0.0, 0.0), widget()).unwrap();
        for i in 1..=40 {
            let v = i as f64 * 10.0;
            let p = axes.pixel_to_data(Point::new(v, v), widget()).unwrap();
            assert!(p.x > last.x);
            assert!(p.y < last.y);
            last = p;
        }
    }

    #[test]
    fn test_roundtrip() {
        let axes = Axes::new(
            AxisLimits::new(-3.5, 12.25, 100.0, -20.0),
            AxesBox::new(0.13, 0.07, 0.71, 0.82),
        );
        let size = Size::new(640.0, 480.0);
        for &(x, y) in &[(0.0, 0.0), (12.5, 400.0), (639.0, 1.0), (-20.0, 900.0)] {
            let pixel = Point::new(x, y);
            let data = axes.pixel_to_data(pixel, size).unwrap();
            let back = axes.data_to_pixel(data, size).unwrap();
            assert_close(back, pixel);
        }
    }

    #[test]
    fn test_affine_matches_formula() {
        let axes = Axes::new(AxisLimits::default(), AxesBox::new(0.1, 0.15, 0.75, 0.7));
        let size = Size::new(640.0, 640.0);
        let affine = axes.pixel_to_data_affine(size).unwrap();
        for &(x, y) in &[(0.0, 0.0), (320.0, 320.0), (17.0, 600.0)] {
            let pixel = Point::new(x, y);
            assert_close(affine * pixel, axes.pixel_to_data(pixel, size).unwrap());
        }
        let inverse = axes.data_to_pixel_affine(size).unwrap();
        assert_close(inverse * (affine * Point::new(5.0, 9.0)), Point::new(5.0, 9.0));
    }

    #[test]
    fn test_layout_not_ready() {
        let axes = reference_axes();
        let err = axes.pixel_to_data(Point::new(1.0, 1.0), Size::new(0.0, 400.0));
        assert!(matches!(err, Err(TransformError::LayoutNotReady { .. })));
        let err = axes.data_to_pixel(Point::ZERO, Size::new(400.0, 0.0));
        assert!(matches!(err, Err(TransformError::LayoutNotReady { .. })));
        let err = axes.pixel_to_data(Point::ZERO, Size::new(f64::NAN, 10.0));
        assert!(matches!(err, Err(TransformError::LayoutNotReady { .. })));
    }

    #[test]
    fn test_degenerate_axes() {
        let flat = Axes::new(AxisLimits::new(1.0, 1.0, 0.0, 1.0), AxesBox::FULL);
        assert!(matches!(
            flat.pixel_to_data(Point::ZERO, widget()),
            Err(TransformError::DegenerateAxes(_))
        ));
        let squashed = Axes::new(AxisLimits::default(), AxesBox::new(0.0, 0.0, 1.0, 0.0));
        assert!(matches!(
            squashed.pixel_to_data(Point::ZERO, widget()),
            Err(TransformError::DegenerateAxes(_))
        ));
    }

    #[test]
    fn test_tight_box() {
        let bbox = AxesBox::tight(Size::new(640.0, 320.0), 32.0).unwrap();
        assert!((bbox.x0 - 0.05).abs() < EPS);
        assert!((bbox.y0 - 0.1).abs() < EPS);
        assert!((bbox.width - 0.9).abs() < EPS);
        assert!((bbox.height - 0.8).abs() < EPS);

        assert!(AxesBox::tight(Size::new(40.0, 40.0), 20.0).is_err());
        assert!(AxesBox::tight(Size::ZERO, 1.0).is_err());
    }

    #[test]
    fn test_equal_aspect() {
        let size = Size::new(600.0, 400.0);
        let mut axes = Axes::new(AxisLimits::default(), AxesBox::FULL);
        axes.set_equal_aspect(size).unwrap();

        let area = axes.plot_area(size).unwrap();
        assert!((area.width() - 400.0).abs() < EPS);
        assert!((area.height() - 400.0).abs() < EPS);
        assert!((area.x0 - 100.0).abs() < EPS);

        // One data unit spans the same pixels on both axes.
        let a = axes.data_to_pixel(Point::new(0.0, 0.0), size).unwrap();
        let b = axes.data_to_pixel(Point::new(1.0, 1.0), size).unwrap();
        assert!(((b.x - a.x) - (a.y - b.y)).abs() < EPS);
    }
}
