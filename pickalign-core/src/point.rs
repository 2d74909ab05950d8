//! Point types and pick results

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// Opaque identifier of an object (model) taking part in an alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u32);

impl ObjectId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ObjectId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// A point already snapped to scene geometry, together with the object it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickResult {
    pub object_id: ObjectId,
    pub point: Point3d,
}

impl PickResult {
    /// Create a new pick result
    pub fn new(object_id: impl Into<ObjectId>, point: Point3d) -> Self {
        Self {
            object_id: object_id.into(),
            point,
        }
    }

    /// Whether every coordinate of the picked point is finite
    pub fn is_finite(&self) -> bool {
        self.point.iter().all(|c| c.is_finite())
    }
}
