//! Rigid transforms from point correspondences
//!
//! Rotation alignment maps the frame spanned by three points on the
//! transforming object onto the frame spanned by three points on the fixed
//! object. Translation alignment moves one picked point onto another.

use crate::basis::Basis;
use nalgebra::Matrix3;
use pickalign_core::{ObjectId, ObjectTransforms, Point3d, RigidTransform, Vector3d};
use tracing::{debug, info};

/// Rotation taking the transforming frame onto the fixed frame: `Mf · Mtᵀ`
pub fn rotation_between(transforming: &Basis, fixed: &Basis) -> Matrix3<f64> {
    fixed.matrix() * transforming.matrix().transpose()
}

/// Compose a solved rotation onto an existing transform as `E · R`
///
/// The rotation is expressed in the object's current local frame. Without an
/// existing transform the result is `R` alone.
pub fn compose_rotation(
    existing: Option<RigidTransform>,
    rotation: Matrix3<f64>,
) -> RigidTransform {
    let rotation = RigidTransform::from_rotation_matrix(rotation);
    match existing {
        Some(existing) => existing * rotation,
        None => rotation,
    }
}

/// Add a translation to an existing transform's translation column
///
/// The linear part of `existing` is never touched. Without an existing
/// transform a pure translation is built.
pub fn compose_translation(existing: Option<RigidTransform>, offset: Vector3d) -> RigidTransform {
    match existing {
        Some(existing) => existing.translated_by(&offset),
        None => RigidTransform::translation(offset),
    }
}

/// Solves alignments and writes them through an [`ObjectTransforms`] accessor
///
/// Only the transforming object's transform is ever read or written.
#[derive(Debug)]
pub struct TransformSolver<T> {
    transforms: T,
}

impl<T: ObjectTransforms> TransformSolver<T> {
    /// Create a solver around a transform accessor
    pub fn new(transforms: T) -> Self {
        Self { transforms }
    }

    /// Get the transform accessor
    pub fn transforms(&self) -> &T {
        &self.transforms
    }

    /// Get the transform accessor mutably
    pub fn transforms_mut(&mut self) -> &mut T {
        &mut self.transforms
    }

    /// Consume the solver, returning the accessor
    pub fn into_inner(self) -> T {
        self.transforms
    }

    /// Rotate `target` so that its frame lines up with the fixed frame
    pub fn solve_rotation(
        &mut self,
        target: ObjectId,
        transforming: &Basis,
        fixed: &Basis,
    ) -> RigidTransform {
        let rotation = rotation_between(transforming, fixed);
        let existing = self.transforms.transform(target);
        debug!(object = %target, has_existing = existing.is_some(), "composing rotation");

        let result = compose_rotation(existing, rotation);
        self.transforms.set_transform(target, result);
        info!(object = %target, "rotation alignment applied");
        result
    }

    /// Translate `target` so that `transforming_point` lands on `fixed_point`
    pub fn solve_translation(
        &mut self,
        target: ObjectId,
        transforming_point: &Point3d,
        fixed_point: &Point3d,
    ) -> RigidTransform {
        let offset = fixed_point - transforming_point;
        let existing = self.transforms.transform(target);
        debug!(
            object = %target,
            ?offset,
            has_existing = existing.is_some(),
            "composing translation"
        );

        let result = compose_translation(existing, offset);
        self.transforms.set_transform(target, result);
        info!(object = %target, "translation alignment applied");
        result
    }
}
