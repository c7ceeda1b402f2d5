//! Drawing modes selectable from the navigation rail.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from mode selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ModeError {
    #[error("invalid navigation index {0} (expected 0..{count})", count = Mode::ALL.len())]
    InvalidIndex(usize),
}

/// Shape mode used by the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Rect,
    Circle,
    Spline,
}

impl Mode {
    /// All modes in navigation rail order.
    pub const ALL: [Mode; 3] = [Mode::Rect, Mode::Circle, Mode::Spline];

    /// Map a 0-based navigation rail index to a mode.
    pub fn from_rail_index(index: usize) -> Result<Self, ModeError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(ModeError::InvalidIndex(index))
    }

    /// 0-based position in the navigation rail.
    pub fn rail_index(self) -> usize {
        match self {
            Mode::Rect => 0,
            Mode::Circle => 1,
            Mode::Spline => 2,
        }
    }

    /// 1-based enum number (Rect = 1).
    pub fn ordinal(self) -> u8 {
        self.rail_index() as u8 + 1
    }

    /// Label shown under the rail destination.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Rect => "Rect",
            Mode::Circle => "Circle",
            Mode::Spline => "Spline",
        }
    }

    /// Whether the mode draws the live selection span while dragging.
    pub fn draws_span(self) -> bool {
        self == Mode::Rect
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rail_index_mapping() {
        assert_eq!(Mode::from_rail_index(0), Ok(Mode::Rect));
        assert_eq!(Mode::from_rail_index(1), Ok(Mode::Circle));
        assert_eq!(Mode::from_rail_index(2), Ok(Mode::Spline));
    }

    #[test]
    fn test_invalid_index() {
        assert_eq!(Mode::from_rail_index(3), Err(ModeError::InvalidIndex(3)));
        assert_eq!(
            Mode::from_rail_index(usize::MAX),
            Err(ModeError::InvalidIndex(usize::MAX))
        );
    }

    #[test]
    fn test_ordinal_is_one_based() {
        for mode in Mode::ALL {
            assert_eq!(mode.ordinal() as usize, mode.rail_index() + 1);
            assert_eq!(Mode::from_rail_index(mode.rail_index()), Ok(mode));
        }
    }

    #[test]
    fn test_only_rect_draws_span() {
        assert!(Mode::Rect.draws_span());
        assert!(!Mode::Circle.draws_span());
        assert!(!Mode::Spline.draws_span());
    }
}
