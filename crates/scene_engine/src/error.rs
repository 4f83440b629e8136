//! Error types for scene-management operations
//!
//! Validation errors fail fast at the public-operation boundary and leave
//! the registry untouched. Removing something that is not registered is
//! deliberately *not* an error; those paths return `bool` so cleanup code
//! stays idempotent.

use thiserror::Error;

/// Errors surfaced by scene-management operations
///
/// Abstracted from any particular graphics backend so the public API stays
/// backend-agnostic.
#[derive(Error, Debug)]
pub enum SceneError {
    /// Unrecognized face-culling option
    ///
    /// Accepted forms are `"front"`/`"frontface"`/`"f"` and
    /// `"back"`/`"backface"`/`"b"`.
    #[error("culling option ({0:?}) not understood; expected 'front' or 'back'")]
    InvalidCulling(String),

    /// Unrecognized named camera view
    ///
    /// Accepted names are the six axis-aligned planes: `xy`, `yx`, `xz`,
    /// `zx`, `yz` and `zy`.
    #[error("named view ({0:?}) not understood")]
    UnknownView(String),

    /// Unrecognized tick placement for the cube-axes decoration
    #[error("tick location ({0:?}) not understood; expected 'inside', 'outside' or 'both'")]
    InvalidTickLocation(String),

    /// Unrecognized edge placement for the cube-axes decoration
    #[error("axes location ({0:?}) not understood; expected 'all', 'origin', 'outer', 'closest' or 'furthest'")]
    InvalidGridLocation(String),

    /// Unrecognized font family name
    #[error("font family ({0:?}) not understood; expected 'courier', 'times' or 'arial'")]
    UnknownFontFamily(String),

    /// Cube-axes padding outside the half-open interval [0, 1)
    #[error("padding ({0}) not understood; must be a fraction in [0, 1)")]
    InvalidPadding(f64),

    /// The camera model transform could not be inverted
    ///
    /// Raised instead of silently propagating NaN coordinates when a point
    /// is mapped out of the camera's scaled space through a singular matrix.
    #[error("camera model transform is singular and cannot be inverted")]
    DegenerateTransform,

    /// Theme configuration could not be parsed or serialized
    #[error("theme configuration error: {0}")]
    Config(String),
}

/// Result type for scene-management operations
pub type SceneResult<T> = Result<T, SceneError>;
