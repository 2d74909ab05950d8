//! Orthonormal frames from three picked points

use nalgebra::Matrix3;
use pickalign_core::{Degeneracy, Point3d, Vector3d};

/// Default length below which an axis is considered unconstructible
pub const DEFAULT_DEGENERACY_EPSILON: f64 = 1e-9;

/// A right-handed orthonormal frame anchored at an object's first picked point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    /// First picked point
    pub origin: Point3d,
    /// Direction from the first to the second point
    pub axis1: Vector3d,
    /// Component of the third point orthogonal to `axis1`
    pub axis2: Vector3d,
    /// `axis1 × axis2`
    pub axis3: Vector3d,
}

impl Basis {
    /// Build a basis from an ordered triple using Gram-Schmidt orthogonalization
    ///
    /// `p1 - p0` gives the primary axis. The third point is projected onto the
    /// infinite line through `p0` and `p1`; the offset from that projection
    /// gives the second axis.
    ///
    /// `epsilon` is an absolute length, so it has to grow with the magnitude
    /// of the coordinates: rounding alone leaves offsets near 1e-9 once the
    /// points sit around 1e7.
    ///
    /// # Errors
    /// * [`Degeneracy::CoincidentPoints`] if `|p1 - p0| < epsilon`
    /// * [`Degeneracy::CollinearPoints`] if `p2` lies within `epsilon` of the line
    pub fn from_points(
        p0: &Point3d,
        p1: &Point3d,
        p2: &Point3d,
        epsilon: f64,
    ) -> Result<Self, Degeneracy> {
        let edge = p1 - p0;
        let edge_length = edge.norm();
        if edge_length < epsilon {
            return Err(Degeneracy::CoincidentPoints);
        }
        let axis1 = edge / edge_length;

        let foot = closest_point_on_line(p0, p1, p2);
        let offset = p2 - foot;
        let offset_length = offset.norm();
        if offset_length < epsilon {
            return Err(Degeneracy::CollinearPoints);
        }
        let axis2 = offset / offset_length;

        let axis3 = axis1.cross(&axis2).normalize();

        Ok(Self {
            origin: *p0,
            axis1,
            axis2,
            axis3,
        })
    }

    /// Basis matrix with columns `[axis1, axis2, axis3]`
    pub fn matrix(&self) -> Matrix3<f64> {
        Matrix3::from_columns(&[self.axis1, self.axis2, self.axis3])
    }

    /// Check unit length and mutual orthogonality within `tolerance`
    pub fn is_orthonormal(&self, tolerance: f64) -> bool {
        let axes = [self.axis1, self.axis2, self.axis3];
        let unit = axes.iter().all(|a| (a.norm() - 1.0).abs() < tolerance);
        let orthogonal = self.axis1.dot(&self.axis2).abs() < tolerance
            && self.axis2.dot(&self.axis3).abs() < tolerance
            && self.axis1.dot(&self.axis3).abs() < tolerance;
        unit && orthogonal
    }
}

/// Closest point to `point` on the infinite line through `a` and `b`
///
/// Falls back to `a` when the two line points coincide.
pub fn closest_point_on_line(a: &Point3d, b: &Point3d, point: &Point3d) -> Point3d {
    let direction = b - a;
    let length_squared = direction.norm_squared();
    if length_squared == 0.0 {
        return *a;
    }
    let t = (point - a).dot(&direction) / length_squared;
    a + direction * t
}
