//! Board configuration loaded from JSON.

use crate::axes::AxisLimits;
use crate::gesture::GestureConfig;
use crate::surface::{ChartSurface, Series, SurfaceKind};
use kurbo::Point;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors from reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read and parse a JSON configuration file.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    log::debug!("Loading config from {}", path.display());
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Everything needed to build a [`crate::Board`].
///
/// Every field has a default, so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub surface: SurfaceKind,
    /// Chart data limits.
    pub limits: AxisLimits,
    /// Chart content.
    pub series: Vec<Series>,
    /// Pixel margin around the chart axes.
    pub padding: f64,
    pub equal_aspect: bool,
    pub gesture: GestureConfig,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            surface: SurfaceKind::default(),
            limits: AxisLimits::default(),
            series: vec![Series::line(Point::new(-10.0, 0.0), Point::new(10.0, 20.0))],
            padding: ChartSurface::DEFAULT_PADDING,
            equal_aspect: true,
            gesture: GestureConfig::default(),
        }
    }
}

impl BoardConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        read_json_file(path.as_ref())
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
