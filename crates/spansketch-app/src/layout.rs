//! Placement of the drawing board inside the window.

use crate::config::AppConfig;
use kurbo::{Point, Rect, Size};

/// Where the board sits, in logical window pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    pub rail_width: f64,
    pub board: Rect,
}

impl BoardLayout {
    pub fn from_config(config: &AppConfig) -> Self {
        let origin = Point::new(
            config.rail_width + config.board_margin,
            config.board_margin,
        );
        Self {
            rail_width: config.rail_width,
            board: Rect::from_origin_size(
                origin,
                Size::new(config.board_width, config.board_height),
            ),
        }
    }

    pub fn origin(&self) -> Point {
        self.board.origin()
    }

    pub fn board_size(&self) -> Size {
        self.board.size()
    }

    /// Window position -> board-local pixels.
    ///
    /// Positions outside the board are still converted; callers decide
    /// whether they count.
    pub fn to_local(&self, window: Point) -> Point {
        window - self.board.origin().to_vec2()
    }

    pub fn contains(&self, window: Point) -> bool {
        self.board.contains(window)
    }
}
