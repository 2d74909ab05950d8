//! In-memory collaborators for hosts without a scene graph

use pickalign_core::{Marker, MarkerSink, ObjectId, ObjectTransforms, RigidTransform};
use std::collections::HashMap;

/// Object transforms kept in a map
#[derive(Debug, Clone, Default)]
pub struct SceneTransforms {
    transforms: HashMap<ObjectId, RigidTransform>,
}

impl SceneTransforms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with_transform(mut self, object_id: ObjectId, transform: RigidTransform) -> Self {
        self.transforms.insert(object_id, transform);
        self
    }

    pub fn get(&self, object_id: ObjectId) -> Option<&RigidTransform> {
        self.transforms.get(&object_id)
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

impl ObjectTransforms for SceneTransforms {
    fn transform(&self, object_id: ObjectId) -> Option<RigidTransform> {
        self.transforms.get(&object_id).copied()
    }

    fn set_transform(&mut self, object_id: ObjectId, transform: RigidTransform) {
        self.transforms.insert(object_id, transform);
    }
}

/// Markers kept in a list, in the order they were emitted
#[derive(Debug, Clone, Default)]
pub struct MarkerLayer {
    markers: Vec<Marker>,
    clears: usize,
}

impl MarkerLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Number of times the layer was cleared
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl MarkerSink for MarkerLayer {
    fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    fn clear_markers(&mut self) {
        self.markers.clear();
        self.clears += 1;
    }
}
