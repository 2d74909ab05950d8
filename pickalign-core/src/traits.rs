//! Collaborator traits consumed by the alignment core

use crate::{marker::Marker, point::{ObjectId, PickResult}, transform::RigidTransform};

/// Read and write access to the transforms of scene objects
pub trait ObjectTransforms {
    /// Current transform of `object_id`, if it carries one
    fn transform(&self, object_id: ObjectId) -> Option<RigidTransform>;

    /// Replace the transform of `object_id`
    fn set_transform(&mut self, object_id: ObjectId, transform: RigidTransform);
}

/// Fire-and-forget sink for pick markers
pub trait MarkerSink {
    /// Render a marker for an accepted pick
    fn add_marker(&mut self, marker: Marker);

    /// Remove every marker
    fn clear_markers(&mut self);
}

/// Source of snapped picks
pub trait PickProvider {
    /// The geometry currently under the cursor, if the snapper found any
    fn snap_result(&self) -> Option<PickResult>;
}

impl<T: ObjectTransforms + ?Sized> ObjectTransforms for &mut T {
    fn transform(&self, object_id: ObjectId) -> Option<RigidTransform> {
        (**self).transform(object_id)
    }

    fn set_transform(&mut self, object_id: ObjectId, transform: RigidTransform) {
        (**self).set_transform(object_id, transform)
    }
}

impl<T: MarkerSink + ?Sized> MarkerSink for &mut T {
    fn add_marker(&mut self, marker: Marker) {
        (**self).add_marker(marker)
    }

    fn clear_markers(&mut self) {
        (**self).clear_markers()
    }
}

impl PickProvider for Option<PickResult> {
    fn snap_result(&self) -> Option<PickResult> {
        *self
    }
}
