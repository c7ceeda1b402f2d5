//! SpanSketch Application
//!
//! The application shell: window, GPU surface, navigation rail and the
//! input glue that drives a drawing board.

mod app;
mod config;
mod event_handler;
mod layout;
mod shortcuts;
mod ui;

pub use app::{App, AppError};
pub use config::{AppConfig, CONFIG_ENV, SURFACE_ENV};
pub use event_handler::{Button, EventHandler};
pub use layout::BoardLayout;
pub use shortcuts::{Shortcut, ShortcutRegistry};
pub use ui::{AxisLabel, UiAction, UiState, axis_labels, render_ui};
