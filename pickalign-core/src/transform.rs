//! 3D transformation utilities

use crate::point::{Point3d, Vector3d};
use nalgebra::{Matrix3, Matrix4};
use serde::{Deserialize, Serialize};

/// A 4x4 homogeneous object transform
///
/// Solved alignments are rigid, but the transform an object already carries
/// may hold anything its host put there, so the full matrix is kept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidTransform {
    pub matrix: Matrix4<f64>,
}

impl RigidTransform {
    /// Create a translation transformation
    pub fn translation(translation: Vector3d) -> Self {
        Self {
            matrix: Matrix4::new_translation(&translation),
        }
    }

    /// Create a rotation transformation from a 3x3 rotation matrix
    pub fn from_rotation_matrix(rotation: Matrix3<f64>) -> Self {
        Self {
            matrix: rotation.to_homogeneous(),
        }
    }

    /// The upper-left 3x3 block (rotation and any scale of the host transform)
    pub fn linear_part(&self) -> Matrix3<f64> {
        self.matrix.fixed_view::<3, 3>(0, 0).into_owned()
    }

    /// The translation column
    pub fn translation_part(&self) -> Vector3d {
        self.matrix.fixed_view::<3, 1>(0, 3).into_owned()
    }

    /// Add `offset` to the translation column, leaving every other entry untouched
    pub fn translated_by(mut self, offset: &Vector3d) -> Self {
        self.matrix[(0, 3)] += offset.x;
        self.matrix[(1, 3)] += offset.y;
        self.matrix[(2, 3)] += offset.z;
        self
    }

    /// Apply the transformation to a point
    pub fn transform_point(&self, point: &Point3d) -> Point3d {
        let homogeneous = self.matrix * point.to_homogeneous();
        Point3d::from_homogeneous(homogeneous).unwrap_or(*point)
    }

    /// Apply the transformation to a vector
    pub fn transform_vector(&self, vector: &Vector3d) -> Vector3d {
        self.matrix.fixed_view::<3, 3>(0, 0) * vector
    }

    /// Compose this transformation with another (`self` applied last)
    pub fn compose(self, other: Self) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Check if this is approximately the identity transformation
    pub fn is_identity(&self, epsilon: f64) -> bool {
        (self.matrix - Matrix4::identity()).norm() < epsilon
    }
}

impl std::ops::Mul for RigidTransform {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(rhs)
    }
}
