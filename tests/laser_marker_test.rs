//! Marker placement tests: the laser contact point derived from the reveal
//! progress, the tracked face's normal and the object's half extents.

mod common;

use std::time::Duration;

use approx::assert_relative_eq;
use common::test_utils::{store_with_text, test_engraver};
use etch_ngin::store::{EngravingFace, ObjectShape};

const DT: Duration = Duration::from_millis(100);

#[test]
fn marker_starts_at_the_leading_edge_of_the_text_span() {
    let mut engraver = test_engraver(64, ObjectShape::Cube);
    let mut store = store_with_text("AB");
    store.start_engraving();
    engraver.start(&store.laser);

    // A zero-length tick keeps progress at 0: empty substring, lateral
    // offset exactly -0.5.
    let outcome = engraver.tick(Duration::ZERO, &store.object, &store.laser);
    assert!(outcome.marker.visible);
    // (normal + tangent * -0.5 * 0.7) * half_extents, front face of the
    // 1.25-half cube with tangent = normal x up = -x.
    assert_relative_eq!(outcome.marker.position.x, 0.4375, epsilon = 1e-5);
    assert_relative_eq!(outcome.marker.position.y, 0.0, epsilon = 1e-5);
    assert_relative_eq!(outcome.marker.position.z, 1.25, epsilon = 1e-5);
}

#[test]
fn marker_ends_at_the_trailing_edge_when_the_reveal_finishes() {
    let mut engraver = test_engraver(64, ObjectShape::Cube);
    let mut store = store_with_text("AB");
    store.start_engraving();
    engraver.start(&store.laser);

    let mut completing = None;
    for _ in 0..8 {
        let outcome = engraver.tick(DT, &store.object, &store.laser);
        if outcome.completed {
            completing = Some(outcome);
            break;
        }
    }
    let outcome = completing.expect("session should complete");

    // Full substring: lateral offset exactly +0.5. The marker is still
    // visible on the completing tick; beam and sparks are already off
    // because `engraving` dropped.
    assert!(outcome.marker.visible);
    assert!(!outcome.engraving);
    assert_relative_eq!(outcome.marker.position.x, -0.4375, epsilon = 1e-5);
    assert_relative_eq!(outcome.marker.position.z, 1.25, epsilon = 1e-5);

    // Hidden from the next idle tick on.
    let idle = engraver.tick(DT, &store.object, &store.laser);
    assert!(!idle.marker.visible);
}

#[test]
fn top_face_falls_back_to_a_horizontal_tangent() {
    let mut engraver = test_engraver(64, ObjectShape::Cube);
    let mut store = store_with_text("AB");
    store.laser.engraving_faces = vec![EngravingFace::Top];
    store.start_engraving();
    engraver.start(&store.laser);

    // normal (0,1,0) is parallel to world-up; the cross product degenerates
    // and the tangent falls back to +x.
    let outcome = engraver.tick(Duration::ZERO, &store.object, &store.laser);
    assert!(outcome.marker.visible);
    assert_relative_eq!(outcome.marker.position.x, -0.4375, epsilon = 1e-5);
    assert_relative_eq!(outcome.marker.position.y, 1.25, epsilon = 1e-5);
    assert_relative_eq!(outcome.marker.position.z, 0.0, epsilon = 1e-5);
}

#[test]
fn marker_scales_with_the_shape_half_extents() {
    let mut engraver = test_engraver(64, ObjectShape::Panel);
    let mut store = store_with_text("AB");
    store.object.shape = ObjectShape::Panel;
    store.start_engraving();
    engraver.start(&store.laser);

    let outcome = engraver.tick(Duration::ZERO, &store.object, &store.laser);
    // Panel half extents are (1.5, 2.0, 0.1): the front marker hugs the
    // thin z axis while sweeping the wide x axis.
    assert_relative_eq!(outcome.marker.position.x, 0.35 * 1.5, epsilon = 1e-5);
    assert_relative_eq!(outcome.marker.position.z, 0.1, epsilon = 1e-5);
}
