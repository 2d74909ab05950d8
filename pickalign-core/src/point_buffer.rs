//! Per-object buffers of picked points

use crate::point::{ObjectId, Point3d};
use serde::{Deserialize, Serialize};

/// Points picked on one object, in pick order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectPoints {
    pub object_id: ObjectId,
    pub points: Vec<Point3d>,
}

/// Ordered point lists keyed by object identifier
///
/// Objects are kept in the order they received their first point. No
/// geometric validation happens here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointBuffer {
    entries: Vec<ObjectPoints>,
}

impl PointBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a point to the sequence of `object_id`
    pub fn add_point(&mut self, object_id: ObjectId, point: Point3d) {
        match self.entries.iter_mut().find(|e| e.object_id == object_id) {
            Some(entry) => entry.points.push(point),
            None => self.entries.push(ObjectPoints {
                object_id,
                points: vec![point],
            }),
        }
    }

    /// Sum of buffered points across all objects
    pub fn total_count(&self) -> usize {
        self.entries.iter().map(|e| e.points.len()).sum()
    }

    /// Number of points buffered for `object_id`
    pub fn count(&self, object_id: ObjectId) -> usize {
        self.get(object_id).len()
    }

    /// Ordered points of `object_id` (empty if the object has none)
    pub fn get(&self, object_id: ObjectId) -> &[Point3d] {
        self.entries
            .iter()
            .find(|e| e.object_id == object_id)
            .map(|e| e.points.as_slice())
            .unwrap_or(&[])
    }

    /// Drop every point of `object_id`, returning what was removed
    pub fn remove(&mut self, object_id: ObjectId) -> Vec<Point3d> {
        match self.entries.iter().position(|e| e.object_id == object_id) {
            Some(idx) => self.entries.remove(idx).points,
            None => Vec::new(),
        }
    }

    /// Get an iterator over the per-object entries
    pub fn iter(&self) -> std::slice::Iter<'_, ObjectPoints> {
        self.entries.iter()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Empty all state
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
