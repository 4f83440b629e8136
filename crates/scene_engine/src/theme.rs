//! Theme defaults
//!
//! Styling and camera defaults consulted when a caller does not specify a
//! value, loadable from TOML so applications can ship their own look.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};

/// Font family for decoration labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    /// Monospace
    Courier,
    /// Serif
    Times,
    /// Sans-serif
    #[default]
    Arial,
}

impl FromStr for FontFamily {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "courier" => Ok(Self::Courier),
            "times" => Ok(Self::Times),
            "arial" => Ok(Self::Arial),
            other => Err(SceneError::UnknownFontFamily(other.to_string())),
        }
    }
}

/// Default camera placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDefaults {
    /// Offset direction from the scene center for the isometric view
    pub position: [f64; 3],
    /// Default view-up direction
    pub viewup: [f64; 3],
}

impl Default for CameraDefaults {
    fn default() -> Self {
        Self {
            position: [1.0, 1.0, 1.0],
            viewup: [0.0, 0.0, 1.0],
        }
    }
}

/// Default label typography
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontDefaults {
    /// Font family for titles and labels
    pub family: FontFamily,
    /// Label font size in points
    pub size: u32,
    /// Label color, RGB in [0, 1]
    pub color: [f64; 3],
    /// printf-style numeric label format
    pub fmt: Option<String>,
}

impl Default for FontDefaults {
    fn default() -> Self {
        Self {
            family: FontFamily::Arial,
            size: 12,
            color: [1.0, 1.0, 1.0],
            fmt: None,
        }
    }
}

/// Viewport-wide defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Camera placement defaults
    pub camera: CameraDefaults,
    /// Typography defaults
    pub font: FontDefaults,
    /// Default bounding-box outline color, RGB in [0, 1]
    pub outline_color: [f64; 3],
    /// Whether decorations are lit by default
    pub lighting: bool,
    /// Size of the colorbar display-slot pool
    pub max_color_bars: u32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            camera: CameraDefaults::default(),
            font: FontDefaults::default(),
            outline_color: [1.0, 1.0, 1.0],
            lighting: true,
            max_color_bars: 10,
        }
    }
}

impl Theme {
    /// Parse a theme from TOML, filling missing fields with defaults
    pub fn from_toml(contents: &str) -> SceneResult<Self> {
        toml::from_str(contents).map_err(|e| SceneError::Config(e.to_string()))
    }

    /// Serialize the theme to TOML
    pub fn to_toml(&self) -> SceneResult<String> {
        toml::to_string_pretty(self).map_err(|e| SceneError::Config(e.to_string()))
    }
}
