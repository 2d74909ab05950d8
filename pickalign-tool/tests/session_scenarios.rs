//! End-to-end alignment scenarios
//!
//! These tests drive full picking sessions through the tool and check the
//! transforms written back to the scene.

use approx::assert_relative_eq;
use nalgebra::Rotation3;
use pickalign_algorithms::{rotation_between, Basis, DEFAULT_DEGENERACY_EPSILON};
use pickalign_core::{ObjectId, ObjectTransforms, PickResult, Point3d, RigidTransform, Vector3d};
use pickalign_tool::*;

const A: ObjectId = ObjectId(1);
const B: ObjectId = ObjectId(2);

fn p(x: f64, y: f64, z: f64) -> Point3d {
    Point3d::new(x, y, z)
}

/// Picks from the rotation scenario: A's frame is the world frame, B's frame
/// has its first axis along +y and its second along +z.
fn rotation_picks() -> Vec<(ObjectId, Point3d)> {
    vec![
        (A, p(0.0, 0.0, 0.0)),
        (A, p(1.0, 0.0, 0.0)),
        (A, p(0.0, 1.0, 0.0)),
        (B, p(5.0, 5.0, 5.0)),
        (B, p(5.0, 6.0, 5.0)),
        (B, p(5.0, 5.0, 6.0)),
    ]
}

#[test]
fn rotation_scenario_maps_axes_between_bases() {
    let mut session = AlignmentSession::new(
        &AlignConfig::for_mode(AlignmentMode::Rotation),
        SceneTransforms::new(),
        MarkerLayer::new(),
    );

    let mut last = None;
    for (object, point) in rotation_picks() {
        last = Some(session.add_point(object, point).unwrap());
    }
    let Some(PickOutcome::Resolved(alignment)) = last else {
        panic!("session did not resolve: {:?}", last);
    };

    let picks = rotation_picks();
    let eps = DEFAULT_DEGENERACY_EPSILON;
    let basis_a = Basis::from_points(&picks[0].1, &picks[1].1, &picks[2].1, eps).unwrap();
    let basis_b = Basis::from_points(&picks[3].1, &picks[4].1, &picks[5].1, eps).unwrap();
    let rotation = rotation_between(&basis_a, &basis_b);

    assert_relative_eq!(rotation * basis_a.axis1, basis_b.axis1, epsilon = 1e-12);
    assert_relative_eq!(alignment.transform.linear_part(), rotation, epsilon = 1e-12);
    assert_relative_eq!(
        alignment.transform.transform_vector(&Vector3d::x()),
        Vector3d::y(),
        epsilon = 1e-12
    );
    assert_eq!(session.transforms().transform(A), Some(alignment.transform));
    assert!(session.is_idle());
}

#[test]
fn rotation_composes_onto_existing_transform() {
    let existing = RigidTransform::translation(Vector3d::new(0.0, 0.0, -3.0));
    let scene = SceneTransforms::new().with_transform(A, existing);
    let mut session = AlignmentSession::new(
        &AlignConfig::for_mode(AlignmentMode::Rotation),
        scene,
        MarkerLayer::new(),
    );

    for (object, point) in rotation_picks() {
        session.add_point(object, point).unwrap();
    }

    let applied = session.transforms().transform(A).unwrap();
    // E · R: rotation in the local frame, existing translation kept
    assert_relative_eq!(applied.translation_part(), Vector3d::new(0.0, 0.0, -3.0), epsilon = 1e-12);
    assert_relative_eq!(
        applied.transform_point(&p(1.0, 0.0, 0.0)),
        p(0.0, 1.0, -3.0),
        epsilon = 1e-12
    );
}

#[test]
fn identical_bases_leave_object_in_place() {
    let mut session = AlignmentSession::new(
        &AlignConfig::for_mode(AlignmentMode::Rotation),
        SceneTransforms::new(),
        MarkerLayer::new(),
    );
    let triple = [p(1.0, 2.0, 3.0), p(2.0, 2.5, 3.0), p(0.0, 4.0, 1.0)];
    for point in triple {
        session.add_point(A, point).unwrap();
    }
    for point in triple {
        session.add_point(B, point).unwrap();
    }

    let applied = session.transforms().transform(A).unwrap();
    assert!(applied.is_identity(1e-12));
}

#[test]
fn translation_scenario_then_fresh_session() {
    let mut session = AlignmentSession::new(
        &AlignConfig::for_mode(AlignmentMode::Translation),
        SceneTransforms::new(),
        MarkerLayer::new(),
    );

    session.add_point(A, p(0.0, 0.0, 0.0)).unwrap();
    session.add_point(B, p(1.0, 2.0, 3.0)).unwrap();

    assert!(session.is_idle());
    assert!(session.buffer().is_empty());
    assert_eq!(
        session.transforms().transform(A),
        Some(RigidTransform::translation(Vector3d::new(1.0, 2.0, 3.0)))
    );

    // the next pick starts over: B is now the transforming object
    let outcome = session.add_point(B, p(10.0, 0.0, 0.0)).unwrap();
    assert_eq!(
        outcome,
        PickOutcome::Accepted {
            object_id: B,
            sequence_index: 0
        }
    );
    assert_eq!(session.transforming_object_id(), Some(B));
    assert_eq!(session.fixed_object_id(), None);
}

#[test]
fn translation_preserves_existing_rotation_bitwise() {
    let rotation = Rotation3::from_euler_angles(0.4, 0.2, -1.1);
    let mut existing = RigidTransform::from_rotation_matrix(*rotation.matrix());
    existing.matrix[(1, 3)] = 5.0;

    let mut tool = PickAlignTool::new(
        &AlignConfig::for_mode(AlignmentMode::Translation),
        SceneTransforms::new().with_transform(B, existing),
        MarkerLayer::new(),
    );
    tool.activate();

    assert!(!tool.handle_pick(Some(PickResult::new(B, p(1.0, 1.0, 1.0)))).unwrap());
    assert!(tool.handle_pick(Some(PickResult::new(A, p(2.0, 3.0, 4.0)))).unwrap());

    let applied = tool.session().transforms().transform(B).unwrap();
    assert_eq!(applied.linear_part(), existing.linear_part());
    assert_eq!(applied.translation_part(), Vector3d::new(1.0, 7.0, 3.0));
    assert_eq!(tool.session().transforms().transform(A), None);
}

#[test]
fn degenerate_triple_can_be_repicked() {
    let mut session = AlignmentSession::new(
        &AlignConfig::for_mode(AlignmentMode::Rotation),
        SceneTransforms::new(),
        MarkerLayer::new(),
    );

    session.add_point(A, p(0.0, 0.0, 0.0)).unwrap();
    session.add_point(A, p(1.0, 0.0, 0.0)).unwrap();
    let err = session.add_point(A, p(2.0, 0.0, 0.0)).unwrap_err();
    assert!(!err.is_fatal());
    assert!(session.buffer().is_empty());
    assert_eq!(session.transforming_object_id(), Some(A));

    let mut last = None;
    for (object, point) in rotation_picks() {
        last = Some(session.add_point(object, point).unwrap());
    }
    assert!(matches!(last, Some(PickOutcome::Resolved(_))));
    assert!(session.transforms().transform(A).is_some());
}

#[test]
fn markers_follow_the_session() {
    let mut session = AlignmentSession::new(
        &AlignConfig::for_mode(AlignmentMode::Rotation),
        SceneTransforms::new(),
        MarkerLayer::new(),
    );

    for (object, point) in rotation_picks().into_iter().take(5) {
        session.add_point(object, point).unwrap();
    }
    let labels: Vec<_> = session
        .markers()
        .markers()
        .iter()
        .map(|m| m.style.label.clone())
        .collect();
    assert_eq!(labels, vec!["1", "2", "3", "4", "5"]);

    session.cancel();
    let (_, markers) = session.into_parts();
    assert!(markers.is_empty());
    assert!(markers.clear_count() >= 1);
}
