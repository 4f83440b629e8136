//! Anisotropic scene scale
//!
//! Scaling is realized through the camera's model-transform matrix rather
//! than by touching actor geometry: a diagonal matrix built from the three
//! axis factors is installed on the camera, and caller-facing coordinates
//! are mapped through it (or its inverse) by [`scale_point`].

use approx::relative_eq;

use crate::error::{SceneError, SceneResult};
use crate::foundation::math::{Mat4, Vec3, Vec4};

/// Per-axis scene scale factors
///
/// Invariant: every factor is finite and strictly positive. The fields
/// are private so the invariant holds by construction; inputs that would
/// violate it are normalized to 1, never installed, since a degenerate
/// factor would collapse the camera transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    x: f64,
    y: f64,
    z: f64,
}

impl Default for Scale {
    fn default() -> Self {
        Self {
            x: 1.0,
            y: 1.0,
            z: 1.0,
        }
    }
}

impl Scale {
    /// Build a scale from three factors, normalizing degenerate ones to 1
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        let mut scale = Self::default();
        scale.set(Some(x), Some(y), Some(z));
        scale
    }

    /// X axis factor
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y axis factor
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Z axis factor
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Merge new per-axis factors onto the current ones
    ///
    /// Missing axes retain their previous value. Zero, negative and
    /// non-finite factors normalize to 1.
    pub fn set(&mut self, x: Option<f64>, y: Option<f64>, z: Option<f64>) {
        self.x = normalize_factor('x', x.unwrap_or(self.x));
        self.y = normalize_factor('y', y.unwrap_or(self.y));
        self.z = normalize_factor('z', z.unwrap_or(self.z));
    }

    /// Build the diagonal model-transform matrix for these factors
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_nonuniform_scaling(&Vec3::new(self.x, self.y, self.z))
    }

    /// The factors as a vector
    pub fn as_vec3(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// True when all three factors are 1 within floating tolerance
    pub fn is_identity(&self) -> bool {
        relative_eq!(self.x, 1.0, epsilon = 1e-8, max_relative = 1e-5)
            && relative_eq!(self.y, 1.0, epsilon = 1e-8, max_relative = 1e-5)
            && relative_eq!(self.z, 1.0, epsilon = 1e-8, max_relative = 1e-5)
    }
}

fn normalize_factor(axis: char, factor: f64) -> f64 {
    if factor.is_finite() && factor > 0.0 {
        factor
    } else {
        log::warn!("scale factor {factor} for the {axis} axis is not positive; using 1");
        1.0
    }
}

/// Map a point through a camera model transform
///
/// Multiplies `(point, w = 0)` by `model`, or by its inverse when `invert`
/// is set, converting between caller-facing world coordinates and the
/// camera's scaled space. A singular matrix surfaces
/// [`SceneError::DegenerateTransform`] instead of NaN coordinates.
pub fn scale_point(model: &Mat4, point: Vec3, invert: bool) -> SceneResult<Vec3> {
    let matrix = if invert {
        model.try_inverse().ok_or(SceneError::DegenerateTransform)?
    } else {
        *model
    };
    let mapped = matrix * Vec4::new(point.x, point.y, point.z, 0.0);
    Ok(Vec3::new(mapped.x, mapped.y, mapped.z))
}
