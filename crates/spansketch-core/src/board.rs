//! The drawing board: a surface plus the interaction session driving it.

use crate::config::BoardConfig;
use crate::gesture::{GestureEvent, GestureRecognizer, PointerEvent};
use crate::mode::Mode;
use crate::overlay::SpanOverlay;
use crate::session::{GestureResponse, Session, SessionError};
use crate::surface::{CanvasSurface, ChartSurface, Series, Surface, SurfaceKind};
use kurbo::{Rect, Size};
use std::time::Instant;

/// A drawing surface and everything needed to interpret input on it.
#[derive(Debug)]
pub struct Board {
    surface: Box<dyn Surface>,
    session: Session,
    recognizer: GestureRecognizer,
}

impl Board {
    pub fn new(surface: Box<dyn Surface>) -> Self {
        Self {
            surface,
            session: Session::new(),
            recognizer: GestureRecognizer::default(),
        }
    }

    /// Build the board described by `config`.
    pub fn from_config(config: &BoardConfig) -> Self {
        let surface: Box<dyn Surface> = match config.surface {
            SurfaceKind::Chart => {
                let mut chart = ChartSurface::new(config.limits)
                    .with_padding(config.padding)
                    .with_equal_aspect(config.equal_aspect);
                for series in &config.series {
                    chart.add_series(series.clone());
                }
                Box::new(chart)
            }
            SurfaceKind::Canvas => Box::new(CanvasSurface::new()),
        };
        log::info!("Board created with {} surface", config.surface.name());

        Self {
            surface,
            session: Session::new(),
            recognizer: GestureRecognizer::new(config.gesture),
        }
    }

    pub fn surface(&self) -> &dyn Surface {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> &mut dyn Surface {
        self.surface.as_mut()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn overlay(&self) -> &SpanOverlay {
        self.session.overlay()
    }

    pub fn mode(&self) -> Mode {
        self.session.mode()
    }

    pub fn select_mode(&mut self, index: usize) -> Result<Mode, SessionError> {
        self.session.select_mode(index)
    }

    /// Resize the drawing area.
    pub fn set_viewport(&mut self, size: Size) {
        if size != self.surface.viewport() {
            log::debug!("Board viewport: {}x{}", size.width, size.height);
            self.surface.set_viewport(size);
        }
    }

    /// Hide the selection and drop any in-flight gesture.
    pub fn clear_selection(&mut self) -> GestureResponse {
        self.recognizer.reset();
        self.session.clear_selection()
    }

    /// Dispatch a recognized gesture to the session.
    pub fn handle_gesture(&mut self, gesture: GestureEvent) -> Result<GestureResponse, SessionError> {
        let surface = self.surface.as_ref();
        match gesture {
            GestureEvent::Tap { position } => self.session.on_tap(surface, position),
            GestureEvent::DoubleTap { position } => self.session.on_double_tap(surface, position),
            GestureEvent::PanStart { position } => self.session.on_pan_start(surface, position),
            GestureEvent::PanUpdate { position } => self.session.on_pan_update(surface, position),
            GestureEvent::PanEnd => Ok(self.session.on_pan_end()),
        }
    }

    /// Feed raw pointer input through the recognizer and the session.
    ///
    /// Responses are merged. Every gesture is dispatched even after a failure
    /// so a `PanEnd` always reaches the session; the first error is returned.
    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        now: Instant,
    ) -> Result<GestureResponse, SessionError> {
        let mut merged = GestureResponse::default();
        let mut first_error = None;
        for gesture in self.recognizer.handle(event, now) {
            match self.handle_gesture(gesture) {
                Ok(response) => {
                    merged.redraw |= response.redraw;
                    merged.point = response.point.or(merged.point);
                    merged.finished = response.finished.or(merged.finished);
                }
                Err(e) => {
                    log::debug!("Gesture {:?} failed: {}", gesture, e);
                    first_error.get_or_insert(e);
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(merged),
        }
    }

    /// Span overlay rectangle in widget pixels, if one is showing.
    pub fn overlay_rect(&self) -> Option<Rect> {
        let bounds = self.surface.data_bounds().ok()?;
        let data_rect = self.session.overlay().rect(bounds)?;
        let transform = self.surface.data_to_pixel_affine().ok()?;
        Some(transform.transform_rect_bbox(data_rect))
    }

    /// Series plotted on a chart surface; empty for a canvas.
    pub fn series(&self) -> &[Series] {
        self.surface.as_chart().map(|c| c.series()).unwrap_or(&[])
    }
}
