//! SpanSketch Core Library
//!
//! Platform-agnostic logic for the SpanSketch drawing board: the pixel to
//! data transform, drawing surfaces, gesture recognition and the selection
//! session.

pub mod axes;
pub mod board;
pub mod color;
pub mod config;
pub mod gesture;
pub mod mode;
pub mod overlay;
pub mod session;
pub mod surface;

pub use axes::{Axes, AxesBox, AxisLimits, TransformError, TransformResult};
pub use board::Board;
pub use color::SerializableColor;
pub use config::{BoardConfig, ConfigError, read_json_file};
pub use gesture::{GestureConfig, GestureEvent, GestureRecognizer, PointerEvent};
pub use mode::{Mode, ModeError};
pub use overlay::SpanOverlay;
pub use session::{DragPhase, GestureResponse, Selection, Session, SessionError, State};
pub use surface::{CanvasSurface, ChartSurface, Series, Surface, SurfaceKind};
