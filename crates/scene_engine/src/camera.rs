//! Camera state and view presets
//!
//! The camera stores its position and focal point in the *scaled* space
//! defined by its model-transform matrix; callers always read and write
//! unscaled world coordinates, converted through [`scale_point`] on the
//! way in and out. Whether an explicit position has ever been chosen is
//! tracked by the renderer as the camera-set state, which decides between
//! auto-fit and redraw-only on scene changes.

use std::str::FromStr;

use crate::error::{SceneError, SceneResult};
use crate::foundation::math::{Mat4, Vec3};
use crate::scale::scale_point;

/// Camera pose as seen by callers: unscaled world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Camera position
    pub position: Vec3,
    /// Point the camera looks at
    pub focal_point: Vec3,
    /// Up direction of the view
    pub view_up: Vec3,
}

/// Viewport camera
///
/// Position and focal point are stored in scaled camera space; the
/// world-facing accessors convert through the model transform.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    focal_point: Vec3,
    view_up: Vec3,
    model_transform: Mat4,
    clipping_range: (f64, f64),
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 1.0),
            focal_point: Vec3::zeros(),
            view_up: Vec3::new(0.0, 1.0, 0.0),
            model_transform: Mat4::identity(),
            clipping_range: (0.01, 1000.0),
        }
    }
}

impl Camera {
    /// Create a camera with the default pose and an identity model
    /// transform
    pub fn new() -> Self {
        Self::default()
    }

    /// Position in scaled camera space
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Set the position directly in scaled camera space
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        log::trace!("camera position (scaled space) set to {position:?}");
    }

    /// Focal point in scaled camera space
    pub fn focal_point(&self) -> Vec3 {
        self.focal_point
    }

    /// Set the focal point directly in scaled camera space
    pub fn set_focal_point(&mut self, focal_point: Vec3) {
        self.focal_point = focal_point;
        log::trace!("camera focal point (scaled space) set to {focal_point:?}");
    }

    /// View-up direction
    pub fn view_up(&self) -> Vec3 {
        self.view_up
    }

    /// Set the view-up direction
    pub fn set_view_up(&mut self, view_up: Vec3) {
        self.view_up = view_up;
    }

    /// The installed model-transform matrix
    pub fn model_transform(&self) -> &Mat4 {
        &self.model_transform
    }

    /// Install a new model-transform matrix
    pub fn set_model_transform(&mut self, matrix: Mat4) {
        self.model_transform = matrix;
    }

    /// Near/far clipping distances
    pub fn clipping_range(&self) -> (f64, f64) {
        self.clipping_range
    }

    /// Set the near/far clipping distances
    pub fn set_clipping_range(&mut self, near: f64, far: f64) {
        self.clipping_range = (near, far);
    }

    /// Position in unscaled world coordinates
    pub fn world_position(&self) -> SceneResult<Vec3> {
        scale_point(&self.model_transform, self.position, true)
    }

    /// Write the position from unscaled world coordinates
    pub fn set_world_position(&mut self, position: Vec3) -> SceneResult<()> {
        self.position = scale_point(&self.model_transform, position, false)?;
        log::trace!("camera position (world) set to {position:?}");
        Ok(())
    }

    /// Focal point in unscaled world coordinates
    pub fn world_focal_point(&self) -> SceneResult<Vec3> {
        scale_point(&self.model_transform, self.focal_point, true)
    }

    /// Write the focal point from unscaled world coordinates
    pub fn set_world_focal_point(&mut self, focal_point: Vec3) -> SceneResult<()> {
        self.focal_point = scale_point(&self.model_transform, focal_point, false)?;
        log::trace!("camera focal point (world) set to {focal_point:?}");
        Ok(())
    }

    /// The full pose in unscaled world coordinates
    pub fn world_pose(&self) -> SceneResult<CameraPose> {
        Ok(CameraPose {
            position: self.world_position()?,
            focal_point: self.world_focal_point()?,
            view_up: self.view_up,
        })
    }

    /// Unit view direction from position toward the focal point
    ///
    /// Falls back to -Z when position and focal point coincide.
    pub fn view_direction(&self) -> Vec3 {
        let direction = self.focal_point - self.position;
        if direction.norm() > 0.0 {
            direction.normalize()
        } else {
            Vec3::new(0.0, 0.0, -1.0)
        }
    }
}

/// The six canonical axis-aligned planar views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPreset {
    /// Look down +Z with +Y up
    Xy,
    /// Look down -Z with +X up
    Yx,
    /// Look down -Y with +Z up
    Xz,
    /// Look down +Y with +X up
    Zx,
    /// Look down +X with +Z up
    Yz,
    /// Look down -X with +Y up
    Zy,
}

impl ViewPreset {
    /// View vector pointing from the scene center toward the camera
    pub fn vector(self) -> Vec3 {
        match self {
            Self::Xy => Vec3::new(0.0, 0.0, 1.0),
            Self::Yx => Vec3::new(0.0, 0.0, -1.0),
            Self::Xz => Vec3::new(0.0, -1.0, 0.0),
            Self::Zx => Vec3::new(0.0, 1.0, 0.0),
            Self::Yz => Vec3::new(1.0, 0.0, 0.0),
            Self::Zy => Vec3::new(-1.0, 0.0, 0.0),
        }
    }

    /// View-up direction paired with this preset
    pub fn view_up(self) -> Vec3 {
        match self {
            Self::Xy => Vec3::new(0.0, 1.0, 0.0),
            Self::Yx => Vec3::new(1.0, 0.0, 0.0),
            Self::Xz => Vec3::new(0.0, 0.0, 1.0),
            Self::Zx => Vec3::new(1.0, 0.0, 0.0),
            Self::Yz => Vec3::new(0.0, 0.0, 1.0),
            Self::Zy => Vec3::new(0.0, 1.0, 0.0),
        }
    }
}

impl FromStr for ViewPreset {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xy" => Ok(Self::Xy),
            "yx" => Ok(Self::Yx),
            "xz" => Ok(Self::Xz),
            "zx" => Ok(Self::Zx),
            "yz" => Ok(Self::Yz),
            "zy" => Ok(Self::Zy),
            other => Err(SceneError::UnknownView(other.to_string())),
        }
    }
}

/// Where to put the camera
///
/// One polymorphic entry point replaces the original's runtime dispatch on
/// strings, bare vectors and pose triples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraLocation {
    /// A named planar shorthand, optionally negated
    Preset {
        /// Which canonical plane to view
        preset: ViewPreset,
        /// Flip the view vector to the opposite side
        negative: bool,
    },
    /// A view direction from the current scene center
    Direction(Vec3),
    /// An explicit pose in unscaled world coordinates
    Pose(CameraPose),
}

/// What a scene mutation does to the camera
///
/// Replaces the original's three-valued nullable boolean with an explicit
/// enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraPolicy {
    /// Always refit the camera to the scene bounds
    ForceReset,
    /// Never refit; request a plain redraw
    NeverReset,
    /// Refit only while no explicit camera position has ever been chosen
    #[default]
    AutoIfUnset,
}
