//! Translates window input into board gestures and canvas view changes.

use crate::layout::BoardLayout;
use kurbo::{Point, Vec2};
use spansketch_core::{Board, GestureResponse, PointerEvent, SessionError};
use std::time::Instant;

/// Zoom step per wheel notch.
const ZOOM_IN: f64 = 1.1;
const ZOOM_OUT: f64 = 0.9;

/// Mouse buttons the board cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Middle,
}

/// Routes window-space pointer input to a [`Board`].
///
/// The primary button drives the gesture recognizer; the middle button pans
/// a canvas surface.
#[derive(Debug)]
pub struct EventHandler {
    layout: BoardLayout,
    /// Last cursor position in logical window pixels.
    cursor: Option<Point>,
    /// The primary button went down inside the board.
    primary_down: bool,
    /// Middle-drag anchor while panning a canvas.
    pan_anchor: Option<Point>,
}

impl EventHandler {
    pub fn new(layout: BoardLayout) -> Self {
        Self {
            layout,
            cursor: None,
            primary_down: false,
            pan_anchor: None,
        }
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    /// Whether a primary-button interaction started on the board is in flight.
    pub fn is_tracking(&self) -> bool {
        self.primary_down
    }

    pub fn cursor_moved(
        &mut self,
        board: &mut Board,
        position: Point,
        now: Instant,
    ) -> Result<GestureResponse, SessionError> {
        self.cursor = Some(position);

        if let Some(anchor) = self.pan_anchor {
            self.pan_anchor = Some(position);
            return Ok(pan_canvas(board, position - anchor));
        }

        if !self.primary_down {
            return Ok(GestureResponse::default());
        }
        let local = self.layout.to_local(position);
        board.handle_pointer(PointerEvent::Move { position: local }, now)
    }

    pub fn button_pressed(
        &mut self,
        board: &mut Board,
        button: Button,
        now: Instant,
    ) -> Result<GestureResponse, SessionError> {
        let Some(position) = self.cursor.filter(|p| self.layout.contains(*p)) else {
            return Ok(GestureResponse::default());
        };

        match button {
            Button::Primary => {
                self.primary_down = true;
                let local = self.layout.to_local(position);
                board.handle_pointer(PointerEvent::Down { position: local }, now)
            }
            Button::Middle => {
                if board.surface().as_canvas().is_some() {
                    self.pan_anchor = Some(position);
                }
                Ok(GestureResponse::default())
            }
        }
    }

    pub fn button_released(
        &mut self,
        board: &mut Board,
        button: Button,
        now: Instant,
    ) -> Result<GestureResponse, SessionError> {
        match button {
            Button::Primary => {
                if !std::mem::take(&mut self.primary_down) {
                    return Ok(GestureResponse::default());
                }
                let position = self.cursor.unwrap_or(Point::ZERO);
                let local = self.layout.to_local(position);
                board.handle_pointer(PointerEvent::Up { position: local }, now)
            }
            Button::Middle => {
                self.pan_anchor = None;
                Ok(GestureResponse::default())
            }
        }
    }

    /// Pointer left the window or focus was lost.
    pub fn cancel(&mut self, board: &mut Board, now: Instant) -> Result<GestureResponse, SessionError> {
        self.pan_anchor = None;
        if !std::mem::take(&mut self.primary_down) {
            return Ok(GestureResponse::default());
        }
        board.handle_pointer(PointerEvent::Cancel, now)
    }

    /// Wheel zoom around the cursor; canvas surfaces only.
    pub fn wheel(&mut self, board: &mut Board, scroll_y: f64) -> GestureResponse {
        let Some(position) = self.cursor.filter(|p| self.layout.contains(*p)) else {
            return GestureResponse::default();
        };
        let Some(canvas) = board.surface_mut().as_canvas_mut() else {
            return GestureResponse::default();
        };
        if scroll_y == 0.0 {
            return GestureResponse::default();
        }
        let factor = if scroll_y > 0.0 { ZOOM_IN } else { ZOOM_OUT };
        canvas.zoom_at(self.layout.to_local(position), factor);
        log::debug!("Canvas zoom: {:.2}", canvas.zoom);
        GestureResponse {
            redraw: true,
            ..Default::default()
        }
    }
}

fn pan_canvas(board: &mut Board, delta: Vec2) -> GestureResponse {
    match board.surface_mut().as_canvas_mut() {
        Some(canvas) if delta != Vec2::ZERO => {
            canvas.pan(delta);
            GestureResponse {
                redraw: true,
                ..Default::default()
            }
        }
        _ => GestureResponse::default(),
    }
}
