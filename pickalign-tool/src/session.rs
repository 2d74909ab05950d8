//! Point-collection state machine
//!
//! A session collects picks until both objects hold the number of points the
//! [`AlignmentMode`] requires, solves, applies the transform to the object
//! that was picked first, and returns to [`SessionState::Idle`].

use crate::config::{AlignConfig, AlignmentMode, MarkerConfig};
use pickalign_algorithms::{Basis, TransformSolver};
use pickalign_core::{
    Error, Marker, MarkerSink, MarkerStyle, ObjectId, ObjectTransforms, PickResult, Point3d,
    PointBuffer, Result, RigidTransform, SequenceViolation,
};
use tracing::{debug, info, warn};

/// Where a session stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No points buffered
    #[default]
    Idle,
    /// At least one pick accepted
    Collecting {
        /// Object touched first; it is the one that gets moved
        transforming: ObjectId,
        /// The other object, once it has been picked
        fixed: Option<ObjectId>,
    },
}

/// A solved and applied alignment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alignment {
    pub mode: AlignmentMode,
    pub transforming_object_id: ObjectId,
    pub fixed_object_id: ObjectId,
    /// Transform written to the transforming object
    pub transform: RigidTransform,
}

/// What an accepted pick led to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickOutcome {
    /// The point was buffered; more picks are needed
    Accepted {
        object_id: ObjectId,
        sequence_index: usize,
    },
    /// The point completed the session
    Resolved(Alignment),
}

/// One numbered style per pick slot, labelled from "1"
pub fn marker_styles(config: &MarkerConfig, count: usize) -> Vec<MarkerStyle> {
    (1..=count)
        .map(|label| MarkerStyle {
            label: label.to_string(),
            color: config.color,
            sprite_size: config.sprite_size,
        })
        .collect()
}

/// Alignment session over injected transform and marker collaborators
pub struct AlignmentSession<T, V> {
    mode: AlignmentMode,
    epsilon: f64,
    id_offset: u32,
    styles: Vec<MarkerStyle>,
    state: SessionState,
    buffer: PointBuffer,
    solver: TransformSolver<T>,
    markers: V,
}

impl<T: ObjectTransforms, V: MarkerSink> AlignmentSession<T, V> {
    /// Create an idle session
    pub fn new(config: &AlignConfig, transforms: T, markers: V) -> Self {
        Self {
            mode: config.mode,
            epsilon: config.degeneracy_epsilon,
            id_offset: config.markers.id_offset,
            styles: marker_styles(&config.markers, config.mode.required_total()),
            state: SessionState::Idle,
            buffer: PointBuffer::new(),
            solver: TransformSolver::new(transforms),
            markers,
        }
    }

    pub fn mode(&self) -> AlignmentMode {
        self.mode
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == SessionState::Idle
    }

    /// Object that will be moved, once the first pick arrived
    pub fn transforming_object_id(&self) -> Option<ObjectId> {
        match self.state {
            SessionState::Collecting { transforming, .. } => Some(transforming),
            SessionState::Idle => None,
        }
    }

    /// Object used as the alignment target, once it has been picked
    pub fn fixed_object_id(&self) -> Option<ObjectId> {
        match self.state {
            SessionState::Collecting { fixed, .. } => fixed,
            SessionState::Idle => None,
        }
    }

    pub fn buffer(&self) -> &PointBuffer {
        &self.buffer
    }

    pub fn marker_styles(&self) -> &[MarkerStyle] {
        &self.styles
    }

    pub fn transforms(&self) -> &T {
        self.solver.transforms()
    }

    pub fn transforms_mut(&mut self) -> &mut T {
        self.solver.transforms_mut()
    }

    pub fn markers(&self) -> &V {
        &self.markers
    }

    /// Consume the session, returning its collaborators
    pub fn into_parts(self) -> (T, V) {
        (self.solver.into_inner(), self.markers)
    }

    /// Accept a snapped pick
    ///
    /// # Errors
    /// * [`Error::DegenerateInput`] when an object's third point makes its
    ///   triple collinear. That object's points are discarded and the session
    ///   keeps collecting.
    /// * [`Error::InvalidSequence`] for a non-finite point, a third object, or
    ///   a point beyond the object's quota. The session is reset.
    pub fn add_point(&mut self, object_id: ObjectId, point: Point3d) -> Result<PickOutcome> {
        if let Err(violation) = self.admit(&PickResult::new(object_id, point)) {
            warn!(object = %object_id, %violation, "pick rejected, resetting session");
            self.reset();
            return Err(violation.into());
        }

        self.buffer.add_point(object_id, point);
        let sequence_index = self.buffer.total_count() - 1;
        self.emit_marker(sequence_index, point);
        debug!(object = %object_id, sequence_index, "pick accepted");

        if self.mode == AlignmentMode::Rotation
            && self.buffer.count(object_id) == self.mode.required_points_per_object()
        {
            if let Err(err) = self.triple_basis(object_id) {
                warn!(object = %object_id, %err, "discarding degenerate triple");
                self.buffer.remove(object_id);
                self.redraw_markers();
                return Err(err);
            }
        }

        if self.buffer.total_count() < self.mode.required_total() {
            return Ok(PickOutcome::Accepted {
                object_id,
                sequence_index,
            });
        }

        let SessionState::Collecting {
            transforming,
            fixed: Some(fixed),
        } = self.state
        else {
            // per-object quotas rule out a full buffer holding a single object
            return Ok(PickOutcome::Accepted {
                object_id,
                sequence_index,
            });
        };

        let alignment = self.resolve(transforming, fixed);
        self.reset();
        alignment.map(PickOutcome::Resolved)
    }

    /// Discard all partial picks and return to idle
    pub fn cancel(&mut self) {
        if !self.is_idle() {
            info!(discarded = self.buffer.total_count(), "alignment session cancelled");
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.state = SessionState::Idle;
        self.markers.clear_markers();
    }

    /// Check the pick against the sequence and move Idle -> Collecting
    fn admit(&mut self, pick: &PickResult) -> std::result::Result<(), SequenceViolation> {
        let object_id = pick.object_id;
        if !pick.is_finite() {
            return Err(SequenceViolation::MalformedPoint { object: object_id });
        }

        let next = match self.state {
            SessionState::Idle => SessionState::Collecting {
                transforming: object_id,
                fixed: None,
            },
            SessionState::Collecting { transforming, fixed } => {
                if object_id == transforming {
                    self.state
                } else {
                    match fixed {
                        None => SessionState::Collecting {
                            transforming,
                            fixed: Some(object_id),
                        },
                        Some(fixed) if fixed == object_id => self.state,
                        Some(fixed) => {
                            return Err(SequenceViolation::UnexpectedObject {
                                object: object_id,
                                transforming,
                                fixed,
                            })
                        }
                    }
                }
            }
        };

        let limit = self.mode.required_points_per_object();
        if self.buffer.count(object_id) >= limit {
            return Err(SequenceViolation::QuotaExceeded {
                object: object_id,
                limit,
            });
        }

        self.state = next;
        Ok(())
    }

    fn resolve(&mut self, transforming: ObjectId, fixed: ObjectId) -> Result<Alignment> {
        let transform = match self.mode {
            AlignmentMode::Rotation => {
                let transforming_basis = self.triple_basis(transforming)?;
                let fixed_basis = self.triple_basis(fixed)?;
                self.solver
                    .solve_rotation(transforming, &transforming_basis, &fixed_basis)
            }
            AlignmentMode::Translation => {
                let transforming_point = self.buffer.get(transforming)[0];
                let fixed_point = self.buffer.get(fixed)[0];
                self.solver
                    .solve_translation(transforming, &transforming_point, &fixed_point)
            }
        };

        info!(
            mode = ?self.mode,
            transforming = %transforming,
            fixed = %fixed,
            "alignment resolved"
        );

        Ok(Alignment {
            mode: self.mode,
            transforming_object_id: transforming,
            fixed_object_id: fixed,
            transform,
        })
    }

    /// Basis of an object holding a full triple
    fn triple_basis(&self, object_id: ObjectId) -> Result<Basis> {
        let points = self.buffer.get(object_id);
        Basis::from_points(&points[0], &points[1], &points[2], self.epsilon).map_err(|kind| {
            Error::DegenerateInput {
                object: object_id,
                kind,
            }
        })
    }

    fn emit_marker(&mut self, sequence_index: usize, position: Point3d) {
        let Some(style) = self.styles.get(sequence_index).cloned() else {
            return;
        };
        // ids past u32::MAX wrap; validated configs never get there
        let id = self.id_offset.wrapping_add(sequence_index as u32 + 1);
        self.markers.add_marker(Marker {
            id,
            sequence_index,
            position,
            style,
        });
    }

    /// Re-emit markers for the surviving points with contiguous labels
    fn redraw_markers(&mut self) {
        self.markers.clear_markers();
        let points: Vec<Point3d> = self
            .buffer
            .iter()
            .flat_map(|entry| entry.points.iter().copied())
            .collect();
        for (sequence_index, point) in points.into_iter().enumerate() {
            self.emit_marker(sequence_index, point);
        }
    }
}
