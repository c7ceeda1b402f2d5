//! Application configuration.

use serde::{Deserialize, Serialize};
use spansketch_core::{BoardConfig, ConfigError, SerializableColor, SurfaceKind, read_json_file};
use std::path::Path;

/// Names a JSON file holding an [`AppConfig`].
pub const CONFIG_ENV: &str = "SPANSKETCH_CONFIG";
/// Overrides the board surface: `chart` or `canvas`.
pub const SURFACE_ENV: &str = "SPANSKETCH_SURFACE";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    /// Initial window size in logical pixels.
    pub width: u32,
    pub height: u32,
    /// Width of the navigation rail.
    pub rail_width: f64,
    /// Drawing board size in logical pixels.
    pub board_width: f64,
    pub board_height: f64,
    /// Gap between the rail divider and the board.
    pub board_margin: f64,
    /// Window clear color.
    pub background_color: SerializableColor,
    pub board: BoardConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "SpanSketch".to_string(),
            width: 800,
            height: 720,
            rail_width: 100.0,
            board_width: 640.0,
            board_height: 640.0,
            board_margin: 16.0,
            background_color: SerializableColor::new(245, 245, 247, 255),
            board: BoardConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from the environment.
    ///
    /// Reads the file named by `SPANSKETCH_CONFIG` when set, then applies
    /// `SPANSKETCH_SURFACE`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV);
        let surface = std::env::var(SURFACE_ENV).ok();
        Self::load_from(path.as_deref().map(Path::new), surface.as_deref())
    }

    /// Load from an optional file, with an optional surface override.
    ///
    /// An unknown surface name is logged and ignored.
    pub fn load_from(path: Option<&Path>, surface: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                log::info!("Loading config from {}", path.display());
                read_json_file(path)?
            }
            None => Self::default(),
        };

        if let Some(name) = surface {
            match name.parse::<SurfaceKind>() {
                Ok(kind) => config.board.surface = kind,
                Err(e) => log::warn!("Ignoring {}: {}", SURFACE_ENV, e),
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::load_from(None, None).unwrap();
        assert_eq!(config.title, "SpanSketch");
        assert!((config.board_width - 640.0).abs() < f64::EPSILON);
        assert_eq!(config.board.surface, SurfaceKind::Chart);
    }

    #[test]
    fn test_surface_override() {
        let config = AppConfig::load_from(None, Some("canvas")).unwrap();
        assert_eq!(config.board.surface, SurfaceKind::Canvas);

        let config = AppConfig::load_from(None, Some("photo")).unwrap();
        assert_eq!(config.board.surface, SurfaceKind::Chart);
    }

    #[test]
    fn test_file_with_nested_board() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "title": "Test", "board_width": 320.0, "board": {{ "surface": "canvas" }} }}"#
        )
        .unwrap();

        let config = AppConfig::load_from(Some(file.path()), None).unwrap();
        assert_eq!(config.title, "Test");
        assert!((config.board_width - 320.0).abs() < f64::EPSILON);
        assert!((config.board_height - 640.0).abs() < f64::EPSILON);
        assert_eq!(config.board.surface, SurfaceKind::Canvas);
    }

    #[test]
    fn test_override_beats_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "board": {{ "surface": "canvas" }} }}"#).unwrap();
        let config = AppConfig::load_from(Some(file.path()), Some("chart")).unwrap();
        assert_eq!(config.board.surface, SurfaceKind::Chart);
    }

    #[test]
    fn test_bad_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2").unwrap();
        assert!(matches!(
            AppConfig::load_from(Some(file.path()), None),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            AppConfig::load_from(Some(Path::new("/missing/spansketch.json")), None),
            Err(ConfigError::Io(_))
        ));
    }
}
