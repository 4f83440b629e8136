//! Decoration styling and state
//!
//! Styling records for the two bound decorations: the bounding-box outline
//! and the cube-axes grid. The renderer owns at most one live instance of
//! each; the state records here pair the decoration's actor key with the
//! bounds it was built for, which is what decoration synchronization
//! compares against after every scene mutation.

use std::str::FromStr;

use crate::actor::{ActorKey, Culling};
use crate::bounds::Bounds;
use crate::error::{SceneError, SceneResult};
use crate::theme::FontFamily;

/// Tick placement on the cube-axes grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickLocation {
    /// Ticks point into the bounds
    Inside,
    /// Ticks point out of the bounds
    Outside,
    /// Ticks on both sides
    Both,
}

impl FromStr for TickLocation {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inside" => Ok(Self::Inside),
            "outside" => Ok(Self::Outside),
            "both" => Ok(Self::Both),
            other => Err(SceneError::InvalidTickLocation(other.to_string())),
        }
    }
}

/// Which edges of the bounds the axes are drawn on, relative to the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridLocation {
    /// Static: draw all edges
    All,
    /// Static triad closest to the origin
    Origin,
    /// Outer edges
    Outer,
    /// Triad closest to the camera
    #[default]
    Closest,
    /// Triad furthest from the camera
    Furthest,
}

impl FromStr for GridLocation {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "origin" => Ok(Self::Origin),
            "outer" => Ok(Self::Outer),
            "default" | "closest" | "front" => Ok(Self::Closest),
            "furthest" | "back" => Ok(Self::Furthest),
            other => Err(SceneError::InvalidGridLocation(other.to_string())),
        }
    }
}

/// Which face of the axes box carries grid lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridPlacement {
    /// Grid lines on the face closest to the camera
    Front,
    /// Grid lines on the face furthest from the camera
    Back,
    /// Grid lines on every face
    All,
}

/// Style for the bounding-box outline decoration
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBoxStyle {
    /// Outline color, RGB in [0, 1]; defaults to the theme outline color
    pub color: Option<[f64; 3]>,
    /// Corner fraction for the outline-corner source; 0.5 draws full edges
    pub corner_factor: f64,
    /// Line thickness override
    pub line_width: Option<f64>,
    /// Opacity in [0, 1]
    pub opacity: f64,
    /// Draw corner outlines instead of a solid cube
    pub outline: bool,
    /// Draw line primitives as 3D tubes
    pub render_lines_as_tubes: bool,
    /// Lighting override; `None` falls back to the theme
    pub lighting: Option<bool>,
    /// Face culling; front-culled by default so the box interior shows
    pub culling: Culling,
}

impl Default for BoundingBoxStyle {
    fn default() -> Self {
        Self {
            color: None,
            corner_factor: 0.5,
            line_width: None,
            opacity: 1.0,
            outline: true,
            render_lines_as_tubes: false,
            lighting: None,
            culling: Culling::Front,
        }
    }
}

/// Style for the cube-axes grid decoration
#[derive(Debug, Clone, PartialEq)]
pub struct CubeAxesStyle {
    /// Show the x axis line
    pub show_xaxis: bool,
    /// Show the y axis line
    pub show_yaxis: bool,
    /// Show the z axis line
    pub show_zaxis: bool,
    /// Show numeric labels on the x axis
    pub show_xlabels: bool,
    /// Show numeric labels on the y axis
    pub show_ylabels: bool,
    /// Show numeric labels on the z axis
    pub show_zlabels: bool,
    /// X axis title
    pub xlabel: String,
    /// Y axis title
    pub ylabel: String,
    /// Z axis title
    pub zlabel: String,
    /// Bold labels
    pub bold: bool,
    /// Italic labels
    pub italic: bool,
    /// Drop-shadow behind label text
    pub shadow: bool,
    /// Label font size override; `None` falls back to the theme
    pub font_size: Option<u32>,
    /// Label font family override; `None` falls back to the theme
    pub font_family: Option<FontFamily>,
    /// Label and line color override; `None` falls back to the theme
    pub color: Option<[f64; 3]>,
    /// Force 2D tick rendering even under identity scale
    pub use_2d: bool,
    /// Grid-line placement; `None` draws no grid lines
    pub grid: Option<GridPlacement>,
    /// Which edges the axes fly to
    pub location: GridLocation,
    /// Tick placement; `None` keeps the backend default
    pub ticks: Option<TickLocation>,
    /// Also add an unlabeled bounding-box outline at the bounds
    pub all_edges: bool,
    /// Corner factor forwarded to the `all_edges` outline
    pub corner_factor: f64,
    /// Show minor ticks
    pub minor_ticks: bool,
    /// printf-style numeric label format override
    pub label_format: Option<String>,
    /// Fraction in [0, 1) to cushion the bounds by before drawing
    pub padding: f64,
}

impl Default for CubeAxesStyle {
    fn default() -> Self {
        Self {
            show_xaxis: true,
            show_yaxis: true,
            show_zaxis: true,
            show_xlabels: true,
            show_ylabels: true,
            show_zlabels: true,
            xlabel: "X Axis".to_string(),
            ylabel: "Y Axis".to_string(),
            zlabel: "Z Axis".to_string(),
            bold: true,
            italic: false,
            shadow: false,
            font_size: None,
            font_family: None,
            color: None,
            use_2d: false,
            grid: None,
            location: GridLocation::Closest,
            ticks: None,
            all_edges: false,
            corner_factor: 0.5,
            minor_ticks: false,
            label_format: None,
            padding: 0.0,
        }
    }
}

impl CubeAxesStyle {
    /// Validate fields that cannot be made unrepresentable
    ///
    /// Runs before any registry mutation so a rejected style leaves the
    /// scene untouched.
    pub fn validate(&self) -> SceneResult<()> {
        if !(0.0..1.0).contains(&self.padding) || !self.padding.is_finite() {
            return Err(SceneError::InvalidPadding(self.padding));
        }
        Ok(())
    }
}

/// Style for the origin axes marker
///
/// The glyph itself is built by the graphics subsystem from these
/// parameters; this layer registers the marker actor and keeps its style
/// reachable for the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct AxesMarkerStyle {
    /// X axis color override; `None` keeps the backend default
    pub x_color: Option<[f64; 3]>,
    /// Y axis color override; `None` keeps the backend default
    pub y_color: Option<[f64; 3]>,
    /// Z axis color override; `None` keeps the backend default
    pub z_color: Option<[f64; 3]>,
    /// X axis label
    pub xlabel: String,
    /// Y axis label
    pub ylabel: String,
    /// Z axis label
    pub zlabel: String,
    /// Axis line thickness
    pub line_width: f64,
    /// Hide the axis labels entirely
    pub labels_off: bool,
    /// Length of each axis shaft from the origin
    pub total_length: f64,
}

impl Default for AxesMarkerStyle {
    fn default() -> Self {
        Self {
            x_color: None,
            y_color: None,
            z_color: None,
            xlabel: "X".to_string(),
            ylabel: "Y".to_string(),
            zlabel: "Z".to_string(),
            line_width: 2.0,
            labels_off: false,
            total_length: 1.0,
        }
    }
}

/// Live bounding-box decoration owned by the renderer
#[derive(Debug, Clone)]
pub struct BoundingBoxState {
    /// Registry key of the decoration actor
    pub key: ActorKey,
    /// Aggregate bounds the box was built for
    pub bounds: Bounds,
    /// Style used to build the box, reused on regeneration
    pub style: BoundingBoxStyle,
}

/// The most recently added axes marker
#[derive(Debug, Clone)]
pub struct AxesMarkerState {
    /// Registry key of the marker actor
    pub key: ActorKey,
    /// Style the marker was created with
    pub style: AxesMarkerStyle,
}

/// Live cube-axes decoration owned by the renderer
#[derive(Debug, Clone)]
pub struct CubeAxesState {
    /// Registry key of the decoration actor
    pub key: ActorKey,
    /// Bounds the axes currently annotate (after padding)
    pub bounds: Bounds,
    /// Style the axes were created with
    pub style: CubeAxesStyle,
    /// Whether ticks render in 2D mode; forced on under anisotropic scale
    pub use_2d: bool,
}
