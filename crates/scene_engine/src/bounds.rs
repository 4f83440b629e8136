//! Axis-aligned bounding volumes
//!
//! The aggregate scene volume is built by folding per-actor boxes into an
//! accumulator that starts at the infinite identity ([`Bounds::NOTHING`])
//! and is finalized into the degenerate unit box when nothing contributed
//! to an axis. Folding is per-axis min/max, so partially-defined scenes
//! still produce a usable volume.

use approx::relative_eq;

use crate::foundation::math::Vec3;

/// Axis-aligned bounding volume stored as six edge coordinates
///
/// Invariant: `x_min <= x_max` (same for y and z) for any finalized
/// volume. The fold accumulator temporarily violates this by starting at
/// the infinite identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Lower x edge
    pub x_min: f64,
    /// Upper x edge
    pub x_max: f64,
    /// Lower y edge
    pub y_min: f64,
    /// Upper y edge
    pub y_max: f64,
    /// Lower z edge
    pub z_min: f64,
    /// Upper z edge
    pub z_max: f64,
}

impl Bounds {
    /// Fold identity: every lower edge at +inf, every upper edge at -inf
    pub const NOTHING: Self = Self {
        x_min: f64::INFINITY,
        x_max: f64::NEG_INFINITY,
        y_min: f64::INFINITY,
        y_max: f64::NEG_INFINITY,
        z_min: f64::INFINITY,
        z_max: f64::NEG_INFINITY,
    };

    /// The degenerate unit box reported for an empty scene
    pub const DEGENERATE: Self = Self {
        x_min: -1.0,
        x_max: 1.0,
        y_min: -1.0,
        y_max: 1.0,
        z_min: -1.0,
        z_max: 1.0,
    };

    /// Create a volume from the six edge coordinates
    pub const fn new(
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        z_min: f64,
        z_max: f64,
    ) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
            z_min,
            z_max,
        }
    }

    /// Widen this volume to also cover `other`
    ///
    /// Per-axis min of the lower edges and max of the upper edges, so each
    /// axis is folded independently.
    pub fn fold(&mut self, other: &Self) {
        self.x_min = self.x_min.min(other.x_min);
        self.x_max = self.x_max.max(other.x_max);
        self.y_min = self.y_min.min(other.y_min);
        self.y_max = self.y_max.max(other.y_max);
        self.z_min = self.z_min.min(other.z_min);
        self.z_max = self.z_max.max(other.z_max);
    }

    /// Replace untouched fold-identity edges with the degenerate unit box
    ///
    /// Any lower edge still at +inf becomes -1 and any upper edge still at
    /// -inf becomes +1, axis by axis. A fully empty accumulator therefore
    /// finalizes to [`Bounds::DEGENERATE`].
    #[must_use]
    pub fn finalized(mut self) -> Self {
        for (lo, hi) in [
            (&mut self.x_min, &mut self.x_max),
            (&mut self.y_min, &mut self.y_max),
            (&mut self.z_min, &mut self.z_max),
        ] {
            if *lo == f64::INFINITY {
                *lo = -1.0;
            }
            if *hi == f64::NEG_INFINITY {
                *hi = 1.0;
            }
        }
        self
    }

    /// Center point of the volume
    pub fn center(&self) -> Vec3 {
        Vec3::new(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
            (self.z_min + self.z_max) / 2.0,
        )
    }

    /// Edge lengths along each axis
    pub fn lengths(&self) -> Vec3 {
        Vec3::new(
            (self.x_max - self.x_min).abs(),
            (self.y_max - self.y_min).abs(),
            (self.z_max - self.z_min).abs(),
        )
    }

    /// Length of the volume's diagonal
    pub fn diagonal(&self) -> f64 {
        self.lengths().norm()
    }

    /// True if any edge coordinate is non-finite
    pub fn has_infinite_edge(&self) -> bool {
        [
            self.x_min, self.x_max, self.y_min, self.y_max, self.z_min, self.z_max,
        ]
        .iter()
        .any(|edge| edge.is_infinite())
    }

    /// Expand each axis outward by `fraction` of its length
    ///
    /// Used to cushion datasets from the axes annotations. Volumes with an
    /// infinite edge are returned unchanged. The fraction must already be
    /// validated to lie in [0, 1).
    #[must_use]
    pub fn padded(&self, fraction: f64) -> Self {
        if self.has_infinite_edge() {
            return *self;
        }
        let cushion = self.lengths() * fraction;
        Self {
            x_min: self.x_min - cushion.x,
            x_max: self.x_max + cushion.x,
            y_min: self.y_min - cushion.y,
            y_max: self.y_max + cushion.y,
            z_min: self.z_min - cushion.z,
            z_max: self.z_max + cushion.z,
        }
    }

    /// Compare against another volume within floating tolerance
    ///
    /// Decoration regeneration keys off this, so the tolerance is loose
    /// enough to ignore round-off drift but tight enough to notice any
    /// real change in scene content.
    pub fn approx_eq(&self, other: &Self) -> bool {
        relative_eq!(self.x_min, other.x_min, epsilon = 1e-10, max_relative = 1e-8)
            && relative_eq!(self.x_max, other.x_max, epsilon = 1e-10, max_relative = 1e-8)
            && relative_eq!(self.y_min, other.y_min, epsilon = 1e-10, max_relative = 1e-8)
            && relative_eq!(self.y_max, other.y_max, epsilon = 1e-10, max_relative = 1e-8)
            && relative_eq!(self.z_min, other.z_min, epsilon = 1e-10, max_relative = 1e-8)
            && relative_eq!(self.z_max, other.z_max, epsilon = 1e-10, max_relative = 1e-8)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::DEGENERATE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fold_unions_per_axis() {
        let mut acc = Bounds::NOTHING;
        acc.fold(&Bounds::new(0.0, 1.0, 0.0, 1.0, 0.0, 1.0));
        acc.fold(&Bounds::new(1.0, 2.0, -3.0, 0.5, 0.25, 0.75));
        let unioned = acc.finalized();
        assert_eq!(unioned, Bounds::new(0.0, 2.0, -3.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn test_empty_accumulator_finalizes_to_unit_box() {
        assert_eq!(Bounds::NOTHING.finalized(), Bounds::DEGENERATE);
    }

    #[test]
    fn test_partially_defined_axis_keeps_contributions() {
        // Only x got a contribution; y and z collapse to the unit edges.
        let mut acc = Bounds::NOTHING;
        acc.fold(&Bounds::new(
            2.0,
            4.0,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
        ));
        let result = acc.finalized();
        assert_eq!(result, Bounds::new(2.0, 4.0, -1.0, 1.0, -1.0, 1.0));
    }

    #[test]
    fn test_center_and_lengths() {
        let bounds = Bounds::new(0.0, 2.0, -1.0, 1.0, 4.0, 8.0);
        assert_relative_eq!(bounds.center(), Vec3::new(1.0, 0.0, 6.0));
        assert_relative_eq!(bounds.lengths(), Vec3::new(2.0, 2.0, 4.0));
    }

    #[test]
    fn test_padded_expands_each_axis() {
        let bounds = Bounds::new(0.0, 2.0, 0.0, 4.0, 0.0, 1.0);
        let padded = bounds.padded(0.5);
        assert_relative_eq!(padded.x_min, -1.0);
        assert_relative_eq!(padded.x_max, 3.0);
        assert_relative_eq!(padded.y_min, -2.0);
        assert_relative_eq!(padded.y_max, 6.0);
        assert_relative_eq!(padded.z_min, -0.5);
        assert_relative_eq!(padded.z_max, 1.5);
    }

    #[test]
    fn test_padded_skips_infinite_volumes() {
        let padded = Bounds::NOTHING.padded(0.1);
        assert_eq!(padded, Bounds::NOTHING);
    }

    #[test]
    fn test_approx_eq_tolerates_round_off() {
        let a = Bounds::new(0.0, 1.0, 0.0, 1.0, 0.0, 1.0);
        let mut b = a;
        b.x_max += 1e-12;
        assert!(a.approx_eq(&b));
        b.x_max += 0.1;
        assert!(!a.approx_eq(&b));
    }
}
