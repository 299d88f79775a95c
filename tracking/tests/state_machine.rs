//! Plane state machine tests: transitions, failure isolation and the
//! one-representation-per-plane invariant.

mod common;

use rstest::rstest;

use common::{bad_layout, floor, manager, table};
use hiddenbox_tracking::{
    PhysicsScene, PlaneEvent, PlaneId, PlaneState, PlaneTrackingManager, PlaneTransition,
    TrackingConfig, TrackingError, find_box_anchor,
};

const A: PlaneId = PlaneId(0xA);
const B: PlaneId = PlaneId(0xB);

// ============================================================================
// Transitions
// ============================================================================

#[test]
fn test_add_update_update_remove() {
    let mut manager = manager();
    let events = [
        PlaneEvent::added(A, table(0.5, [0.0, 0.7, -1.0])),
        PlaneEvent::updated(A, table(0.6, [0.0, 0.7, -1.0])),
        PlaneEvent::updated(A, table(0.7, [0.0, 0.7, -1.0])),
        PlaneEvent::removed(A),
    ];
    let expected_states = [
        PlaneState::Present,
        PlaneState::Present,
        PlaneState::Present,
        PlaneState::Absent,
    ];
    let expected_transitions = [
        PlaneTransition::Added,
        PlaneTransition::Updated,
        PlaneTransition::Updated,
        PlaneTransition::Removed,
    ];

    for ((event, state), transition) in events
        .into_iter()
        .zip(expected_states)
        .zip(expected_transitions)
    {
        assert_eq!(manager.on_plane_event(event).unwrap(), transition);
        assert_eq!(manager.registry().state(A), state);
        assert!(manager.scene().meshes_for(A) <= 1);
    }

    assert!(manager.registry().is_empty());
    assert_eq!(manager.scene().mesh_count(), 0);
    assert_eq!(manager.scene().collider_count(), 0);
    assert_eq!(manager.scene().colliders.len(), 0);
}

#[test]
fn test_remove_of_absent_plane_is_noop() {
    let mut manager = manager();
    manager
        .on_plane_event(PlaneEvent::added(A, table(0.5, [0.0; 3])))
        .unwrap();
    assert_eq!(
        manager.on_plane_event(PlaneEvent::removed(A)).unwrap(),
        PlaneTransition::Removed
    );
    assert_eq!(
        manager.on_plane_event(PlaneEvent::removed(A)).unwrap(),
        PlaneTransition::Unchanged
    );
    assert_eq!(
        manager.on_plane_event(PlaneEvent::removed(B)).unwrap(),
        PlaneTransition::Unchanged
    );
    assert!(manager.registry().is_empty());
}

#[test]
fn test_update_of_absent_plane_adds_it() {
    let mut manager = manager();
    let transition = manager
        .on_plane_event(PlaneEvent::updated(A, table(0.5, [0.0; 3])))
        .unwrap();
    assert_eq!(transition, PlaneTransition::Added);
    assert_eq!(manager.registry().state(A), PlaneState::Present);
}

#[test]
fn test_repeated_add_replaces() {
    let mut manager = manager();
    manager
        .on_plane_event(PlaneEvent::added(A, table(0.5, [0.0; 3])))
        .unwrap();
    let transition = manager
        .on_plane_event(PlaneEvent::added(A, table(0.8, [0.0; 3])))
        .unwrap();
    assert_eq!(transition, PlaneTransition::Updated);
    assert_eq!(manager.scene().meshes_for(A), 1);
    assert_eq!(manager.scene().colliders_for(A), 1);
}

// ============================================================================
// Failure isolation
// ============================================================================

#[test]
fn test_failed_update_keeps_previous_representation() {
    let mut manager = manager();
    manager
        .on_plane_event(PlaneEvent::added(A, table(0.5, [0.0, 0.7, 0.0])))
        .unwrap();
    let before = manager.registry().get(A).unwrap().clone();

    let err = manager
        .on_plane_event(PlaneEvent::updated(A, bad_layout()))
        .unwrap_err();
    assert!(err.is_layout_mismatch());
    assert_eq!(err.plane(), A);

    assert_eq!(manager.registry().get(A), Some(&before));
    assert!(manager.scene().mesh(before.mesh_entity).is_some());
    let collision = before.collision_entity.unwrap();
    assert!(manager.scene().collider(collision).is_some());
    assert_eq!(manager.scene().meshes_for(A), 1);
}

#[test]
fn test_failed_add_leaves_plane_absent() {
    let mut manager = manager();
    let err = manager
        .on_plane_event(PlaneEvent::added(A, bad_layout()))
        .unwrap_err();
    assert!(matches!(err, TrackingError::Decode { .. }));
    assert_eq!(manager.registry().state(A), PlaneState::Absent);
    assert_eq!(manager.scene().mesh_count(), 0);
    assert_eq!(manager.scene().collider_count(), 0);
}

#[rstest]
#[case::with_collision(true, 1)]
#[case::without_collision(false, 0)]
fn test_collision_toggle(#[case] collision: bool, #[case] colliders: usize) {
    let config = TrackingConfig {
        collision,
        ..TrackingConfig::default()
    };
    let mut manager = PlaneTrackingManager::new(config, PhysicsScene::new());
    manager
        .on_plane_event(PlaneEvent::added(A, table(0.5, [0.0; 3])))
        .unwrap();
    manager
        .on_plane_event(PlaneEvent::updated(A, table(0.6, [0.0; 3])))
        .unwrap();

    assert_eq!(manager.scene().meshes_for(A), 1);
    assert_eq!(manager.scene().colliders_for(A), colliders);
    assert_eq!(
        manager.registry().get(A).unwrap().collision_entity.is_some(),
        collision
    );
}

// ============================================================================
// Placement
// ============================================================================

#[test]
fn test_box_goes_on_earliest_table() {
    let mut manager = manager();
    manager
        .on_plane_event(PlaneEvent::added(PlaneId(1), floor()))
        .unwrap();
    manager
        .on_plane_event(PlaneEvent::added(B, table(0.5, [1.0, 0.7, 0.0])))
        .unwrap();
    manager
        .on_plane_event(PlaneEvent::added(A, table(0.5, [-1.0, 0.8, 0.0])))
        .unwrap();

    let anchor = find_box_anchor(manager.registry(), [0.3, 0.3]).unwrap();
    assert_eq!(anchor.plane, B);
    assert_eq!(anchor.translation, [1.0, 0.7, 0.0]);
    assert_eq!(anchor.surface_size, [1.0, 1.0]);

    // Once the first table goes away the box moves to the next one.
    manager.on_plane_event(PlaneEvent::removed(B)).unwrap();
    let anchor = find_box_anchor(manager.registry(), [0.3, 0.3]).unwrap();
    assert_eq!(anchor.plane, A);
}

#[rstest]
#[case::fits([0.3, 0.3], true)]
#[case::rotated([0.9, 0.2], true)]
#[case::too_big([1.2, 0.3], false)]
fn test_box_footprint(#[case] footprint: [f32; 2], #[case] found: bool) {
    let mut manager = manager();
    manager
        .on_plane_event(PlaneEvent::added(A, table(0.5, [0.0; 3])))
        .unwrap();
    assert_eq!(
        find_box_anchor(manager.registry(), footprint).is_some(),
        found
    );
}
