//! Interaction context: mode, drag points and the live selection span.

use crate::axes::TransformError;
use crate::mode::{Mode, ModeError};
use crate::overlay::SpanOverlay;
use crate::surface::Surface;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while handling a gesture or a mode change.
///
/// All of them are recoverable: the session is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error(transparent)]
    Mode(#[from] ModeError),
}

/// A data-space point tracked during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct State {
    pub x: f64,
    pub y: f64,
}

impl State {
    pub fn set(&mut self, point: Point) {
        self.x = point.x;
        self.y = point.y;
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Where the drag state machine is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
}

/// Summary of a finished drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub mode: Mode,
    pub start: Point,
    pub end: Point,
    /// Normalized `(min, max)` data-x range.
    pub span: (f64, f64),
}

/// What a handler changed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureResponse {
    /// The surface must be redrawn.
    pub redraw: bool,
    /// Data-space position of the gesture, when it had one.
    pub point: Option<Point>,
    /// Set when a drag finished.
    pub finished: Option<Selection>,
}

/// Per-board interaction state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    mode: Mode,
    start: State,
    current: State,
    phase: DragPhase,
    overlay: SpanOverlay,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn start(&self) -> State {
        self.start
    }

    pub fn current(&self) -> State {
        self.current
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    pub fn overlay(&self) -> &SpanOverlay {
        &self.overlay
    }

    /// Select the mode for a 0-based navigation rail index.
    ///
    /// An invalid index leaves the current mode in place.
    pub fn select_mode(&mut self, index: usize) -> Result<Mode, SessionError> {
        let mode = Mode::from_rail_index(index)?;
        if mode != self.mode {
            log::info!("Mode changed: {} -> {}", self.mode, mode);
        }
        self.mode = mode;
        Ok(mode)
    }

    /// Begin a drag at `pixel`.
    pub fn on_pan_start(
        &mut self,
        surface: &dyn Surface,
        pixel: Point,
    ) -> Result<GestureResponse, SessionError> {
        let point = surface.pixel_to_data(pixel)?;
        self.start.set(point);
        self.current.set(point);
        self.phase = DragPhase::Dragging;

        if self.mode.draws_span() {
            self.overlay.set_range(point.x, point.x);
            self.overlay.show();
        } else {
            self.overlay.hide();
        }

        log::info!(
            "Pan started at pixel ({:.1}, {:.1}) -> data ({:.3}, {:.3})",
            pixel.x,
            pixel.y,
            point.x,
            point.y
        );
        Ok(GestureResponse {
            redraw: true,
            point: Some(point),
            finished: None,
        })
    }

    /// Move the current drag point to `pixel` and refresh the span.
    pub fn on_pan_update(
        &mut self,
        surface: &dyn Surface,
        pixel: Point,
    ) -> Result<GestureResponse, SessionError> {
        if !self.is_dragging() {
            log::debug!("Pan update at ({:.1}, {:.1}) ignored: no drag", pixel.x, pixel.y);
            return Ok(GestureResponse::default());
        }

        let point = surface.pixel_to_data(pixel)?;
        self.current.set(point);
        if self.mode.draws_span() {
            self.overlay.set_range(self.start.x, self.current.x);
        }

        log::trace!("Pan updated: data ({:.3}, {:.3})", point.x, point.y);
        Ok(GestureResponse {
            redraw: true,
            point: Some(point),
            finished: None,
        })
    }

    /// Finish the drag.
    ///
    /// Nothing is stored; the finished selection is returned to the caller
    /// and the span stays visible until the next drag or [`Session::clear_selection`].
    pub fn on_pan_end(&mut self) -> GestureResponse {
        if !self.is_dragging() {
            return GestureResponse::default();
        }
        self.phase = DragPhase::Idle;

        let (a, b) = (self.start.x, self.current.x);
        let selection = Selection {
            mode: self.mode,
            start: self.start.point(),
            end: self.current.point(),
            span: (a.min(b), a.max(b)),
        };
        log::info!(
            "Pan ended: start ({:.3}, {:.3}), current ({:.3}, {:.3}), mode {}",
            selection.start.x,
            selection.start.y,
            selection.end.x,
            selection.end.y,
            selection.mode
        );
        GestureResponse {
            redraw: true,
            point: Some(selection.end),
            finished: Some(selection),
        }
    }

    /// Single tap: report the data coordinate, change nothing.
    pub fn on_tap(&self, surface: &dyn Surface, pixel: Point) -> Result<GestureResponse, SessionError> {
        let point = surface.pixel_to_data(pixel)?;
        log::info!(
            "Tapped at pixel ({:.1}, {:.1}) -> data ({:.3}, {:.3})",
            pixel.x,
            pixel.y,
            point.x,
            point.y
        );
        Ok(GestureResponse {
            redraw: false,
            point: Some(point),
            finished: None,
        })
    }

    /// Double tap: report the data coordinate, change nothing.
    pub fn on_double_tap(
        &self,
        surface: &dyn Surface,
        pixel: Point,
    ) -> Result<GestureResponse, SessionError> {
        let point = surface.pixel_to_data(pixel)?;
        log::info!("Double-tapped at data ({:.3}, {:.3})", point.x, point.y);
        Ok(GestureResponse {
            redraw: false,
            point: Some(point),
            finished: None,
        })
    }

    /// Hide the span and abandon any drag.
    pub fn clear_selection(&mut self) -> GestureResponse {
        let was_visible = self.overlay.is_visible();
        self.overlay.hide();
        self.phase = DragPhase::Idle;
        GestureResponse {
            redraw: was_visible,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axes::{AxesBox, AxisLimits};
    use crate::surface::{CanvasSurface, ChartSurface};
    use kurbo::Size;

    /// Chart where pixel (100, 100) is data (-2, 3) and pixel (150, 100) is data (1, 3).
    fn reference_chart() -> ChartSurface {
        let mut chart = ChartSurface::new(AxisLimits::new(-8.0, 16.0, -9.0, 7.0))
            .with_padding(0.0)
            .with_equal_aspect(false);
        chart.set_viewport(Size::new(400.0, 400.0));
        assert_eq!(chart.axes().bbox, AxesBox::FULL);
        chart
    }

    fn assert_span(session: &Session, lo: f64, hi: f64) {
        let (a, b) = session.overlay().range();
        assert!((a - lo).abs() < 1e-9, "span start {a} != {lo}");
        assert!((b - hi).abs() < 1e-9, "span end {b} != {hi}");
    }

    #[test]
    fn test_drag_builds_span() {
        let chart = reference_chart();
        let mut session = Session::new();

        session.on_pan_start(&chart, Point::new(100.0, 100.0)).unwrap();
        assert!(session.is_dragging());
        assert!(session.overlay().is_visible());
        assert!((session.start().x + 2.0).abs() < 1e-9);
        assert!((session.start().y - 3.0).abs() < 1e-9);

        let response = session.on_pan_update(&chart, Point::new(150.0, 100.0)).unwrap();
        assert!(response.redraw);
        assert!((session.current().x - 1.0).abs() < 1e-9);
        assert_span(&session, -2.0, 1.0);
    }

    #[test]
    fn test_reverse_drag_is_normalized() {
        let chart = reference_chart();
        let mut session = Session::new();
        session.on_pan_start(&chart, Point::new(150.0, 100.0)).unwrap();
        session.on_pan_update(&chart, Point::new(100.0, 100.0)).unwrap();
        assert_span(&session, -2.0, 1.0);

        let (start, current) = session.overlay().raw();
        assert!((start - 1.0).abs() < 1e-9);
        assert!((current + 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_pan_end_reports_selection() {
        let chart = reference_chart();
        let mut session = Session::new();
        session.on_pan_start(&chart, Point::new(100.0, 100.0)).unwrap();
        session.on_pan_update(&chart, Point::new(150.0, 100.0)).unwrap();

        let response = session.on_pan_end();
        let selection = response.finished.unwrap();
        assert_eq!(selection.mode, Mode::Rect);
        assert!((selection.span.0 + 2.0).abs() < 1e-9);
        assert!((selection.span.1 - 1.0).abs() < 1e-9);
        assert_eq!(session.phase(), DragPhase::Idle);
        // The last selection stays on screen.
        assert!(session.overlay().is_visible());

        // A second end is a no-op.
        assert!(session.on_pan_end().finished.is_none());
    }

    #[test]
    fn test_update_without_start_is_ignored() {
        let chart = reference_chart();
        let mut session = Session::new();
        let response = session.on_pan_update(&chart, Point::new(150.0, 100.0)).unwrap();
        assert!(!response.redraw);
        assert_eq!(session.current(), State::default());
    }

    #[test]
    fn test_tap_is_read_only() {
        let chart = reference_chart();
        let mut session = Session::new();
        session.on_pan_start(&chart, Point::new(100.0, 100.0)).unwrap();
        session.on_pan_update(&chart, Point::new(150.0, 100.0)).unwrap();
        let (start, current, overlay) = (session.start(), session.current(), *session.overlay());

        let tap = session.on_tap(&chart, Point::new(10.0, 390.0)).unwrap();
        assert!(tap.point.is_some());
        session.on_double_tap(&chart, Point::new(300.0, 20.0)).unwrap();

        assert_eq!(session.start(), start);
        assert_eq!(session.current(), current);
        assert_eq!(*session.overlay(), overlay);
    }

    #[test]
    fn test_mode_selection() {
        let mut session = Session::new();
        assert_eq!(session.select_mode(1), Ok(Mode::Circle));
        assert_eq!(session.select_mode(2), Ok(Mode::Spline));
        assert_eq!(session.select_mode(0), Ok(Mode::Rect));

        let err = session.select_mode(7);
        assert_eq!(err, Err(SessionError::Mode(ModeError::InvalidIndex(7))));
        assert_eq!(session.mode(), Mode::Rect);
    }

    #[test]
    fn test_non_rect_modes_do_not_draw_span() {
        let chart = reference_chart();
        let mut session = Session::new();
        session.select_mode(1).unwrap();
        session.on_pan_start(&chart, Point::new(100.0, 100.0)).unwrap();
        session.on_pan_update(&chart, Point::new(150.0, 100.0)).unwrap();

        assert!(!session.overlay().is_visible());
        assert!((session.current().x - 1.0).abs() < 1e-9);
        let selection = session.on_pan_end().finished.unwrap();
        assert_eq!(selection.mode, Mode::Circle);
    }

    #[test]
    fn test_layout_not_ready_leaves_state() {
        let canvas = CanvasSurface::new();
        let mut session = Session::new();
        let err = session.on_pan_start(&canvas, Point::new(1.0, 1.0));
        assert!(matches!(
            err,
            Err(SessionError::Transform(TransformError::LayoutNotReady { .. }))
        ));
        assert!(!session.is_dragging());
        assert!(!session.overlay().is_visible());
        assert!(session.on_tap(&canvas, Point::ZERO).is_err());
    }

    #[test]
    fn test_clear_selection() {
        let chart = reference_chart();
        let mut session = Session::new();
        session.on_pan_start(&chart, Point::new(100.0, 100.0)).unwrap();
        assert!(session.clear_selection().redraw);
        assert!(!session.overlay().is_visible());
        assert!(!session.is_dragging());
        assert!(!session.clear_selection().redraw);
    }
}
