//! Math types for scene bookkeeping
//!
//! Thin aliases over nalgebra. Everything in this crate works in f64
//! because actor bounds and camera poses come from double-precision
//! scene data.

pub use nalgebra::{Matrix4, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f64>;

/// 4D vector type (homogeneous coordinates)
pub type Vec4 = Vector4<f64>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f64>;
