//! Session lifecycle tests for the engraving animator: progress advance,
//! reveal indexing, bake-on-completion, clears and abandonment.

mod common;

use std::time::Duration;

use approx::assert_relative_eq;
use common::test_utils::{store_with_text, test_engraver};
use etch_ngin::store::{EngravingFace, ObjectShape};

const DT: Duration = Duration::from_millis(100);

#[test]
fn progress_is_monotone_and_capped_at_one() {
    let mut engraver = test_engraver(64, ObjectShape::Cube);
    let mut store = store_with_text("GLASS");
    store.laser.speed = 2.0;
    store.start_engraving();
    engraver.start(&store.laser);

    let mut last_progress = 0.0;
    let mut completions = 0;
    for _ in 0..32 {
        let outcome = engraver.tick(DT, &store.object, &store.laser);
        assert!(outcome.progress >= last_progress);
        assert!(outcome.progress <= 1.0);
        last_progress = outcome.progress;
        if outcome.completed {
            completions += 1;
            store.stop_engraving();
        }
    }
    assert_eq!(last_progress, 1.0);
    assert_eq!(completions, 1);
}

#[test]
fn revealed_chars_follow_progress() {
    let mut engraver = test_engraver(64, ObjectShape::Cube);
    let mut store = store_with_text("ENGRAVE");
    store.start_engraving();
    engraver.start(&store.laser);

    let len = store.laser.text.chars().count();
    let mut last_revealed = 0;
    loop {
        let outcome = engraver.tick(DT, &store.object, &store.laser);
        assert!(outcome.revealed_chars >= last_revealed);
        assert!(outcome.revealed_chars <= len);
        last_revealed = outcome.revealed_chars;
        if outcome.completed {
            assert_eq!(outcome.progress, 1.0);
            assert_eq!(outcome.revealed_chars, len);
            break;
        }
    }
}

#[test]
fn two_char_reveal_timeline() {
    let mut engraver = test_engraver(64, ObjectShape::Cube);
    let mut store = store_with_text("AB");
    store.start_engraving();
    engraver.start(&store.laser);

    // duration = 2 chars * 0.15 s / speed 1 = 0.3 s
    let first = engraver.tick(DT, &store.object, &store.laser);
    assert_relative_eq!(first.progress, 1.0 / 3.0, epsilon = 1e-3);
    assert_eq!(first.revealed_chars, 0);
    assert!(engraver.live().is_blank());

    let second = engraver.tick(DT, &store.object, &store.laser);
    assert_relative_eq!(second.progress, 2.0 / 3.0, epsilon = 1e-3);
    assert_eq!(second.revealed_chars, 1);
    assert!(!engraver.live().is_blank());

    // The third 100 ms tick lands on the 0.3 s mark; leave one spare tick
    // for float rounding.
    let mut completed_ticks = 0;
    for _ in 0..2 {
        let outcome = engraver.tick(DT, &store.object, &store.laser);
        if outcome.completed {
            completed_ticks += 1;
            assert_eq!(outcome.progress, 1.0);
            assert_eq!(outcome.revealed_chars, 2);
        }
    }
    assert_eq!(completed_ticks, 1);

    // The bake is authoritative and mirrored into the live canvas.
    assert!(!engraver.baked().is_blank());
    assert_eq!(
        engraver.live().image().as_raw(),
        engraver.baked().image().as_raw()
    );

    // Completion fires exactly once per session.
    let after = engraver.tick(DT, &store.object, &store.laser);
    assert!(!after.completed);
    assert!(!after.engraving);
    assert!(!engraver.is_active());
}

#[test]
fn idle_live_canvas_mirrors_baked() {
    let mut engraver = test_engraver(64, ObjectShape::Cube);
    let mut store = store_with_text("HI");
    store.start_engraving();
    engraver.start(&store.laser);
    while !engraver.tick(DT, &store.object, &store.laser).completed {}
    store.stop_engraving();

    for _ in 0..3 {
        let outcome = engraver.tick(DT, &store.object, &store.laser);
        assert!(!outcome.engraving);
        assert!(!outcome.marker.visible);
        assert_eq!(
            engraver.live().image().as_raw(),
            engraver.baked().image().as_raw()
        );
    }
}

#[test]
fn whitespace_text_start_is_a_noop() {
    let mut engraver = test_engraver(64, ObjectShape::Cube);
    let mut store = store_with_text("   ");
    let generation = engraver.generation();

    store.start_engraving();
    assert!(!store.laser.is_engraving);
    engraver.start(&store.laser);

    assert!(!engraver.is_active());
    assert_eq!(engraver.generation(), generation);

    let outcome = engraver.tick(DT, &store.object, &store.laser);
    assert!(!outcome.engraving);
    assert!(engraver.live().is_blank());
}

#[test]
fn start_while_active_is_a_noop() {
    let mut engraver = test_engraver(64, ObjectShape::Cube);
    let mut store = store_with_text("AB");
    store.start_engraving();
    engraver.start(&store.laser);
    engraver.tick(DT, &store.object, &store.laser);

    let generation = engraver.generation();
    let progress = engraver.progress();
    engraver.start(&store.laser);
    assert_eq!(engraver.generation(), generation);
    assert_eq!(engraver.progress(), progress);
    assert!(engraver.is_active());
}

#[test]
fn clear_resets_to_idle_from_any_state() {
    let mut engraver = test_engraver(64, ObjectShape::Cube);
    let mut store = store_with_text("ABCD");
    store.start_engraving();
    engraver.start(&store.laser);
    engraver.tick(DT, &store.object, &store.laser);
    engraver.tick(DT, &store.object, &store.laser);
    assert!(!engraver.live().is_blank());

    let generation = engraver.generation();
    store.clear_engraving();
    engraver.clear(&store.laser);

    assert!(!engraver.is_active());
    assert_eq!(engraver.progress(), 0.0);
    assert_eq!(engraver.generation(), generation + 1);
    assert!(store.laser.text.is_empty());
    assert!(engraver.live().is_blank());
    assert!(engraver.baked().is_blank());

    // The abandoned session never reports completion, and the adopted nonce
    // does not trigger a second wipe.
    let outcome = engraver.tick(DT, &store.object, &store.laser);
    assert!(!outcome.completed);
    assert_eq!(engraver.generation(), generation + 1);
}

#[test]
fn nonce_bump_observed_mid_session_acts_as_clear() {
    let mut engraver = test_engraver(64, ObjectShape::Cube);
    let mut store = store_with_text("ABCD");
    store.start_engraving();
    engraver.start(&store.laser);
    engraver.tick(DT, &store.object, &store.laser);
    engraver.tick(DT, &store.object, &store.laser);

    // The host cleared the store but never called Engraver::clear; the next
    // tick picks the nonce up as the external clear trigger.
    store.clear_engraving();
    let outcome = engraver.tick(DT, &store.object, &store.laser);

    assert!(!outcome.engraving);
    assert!(!outcome.completed);
    assert!(!engraver.is_active());
    assert_eq!(engraver.progress(), 0.0);
    assert!(engraver.live().is_blank());
    assert!(engraver.baked().is_blank());
}

#[test]
fn shape_change_abandons_the_session() {
    let mut engraver = test_engraver(64, ObjectShape::Cube);
    let mut store = store_with_text("ABCD");
    store.start_engraving();
    engraver.start(&store.laser);
    engraver.tick(DT, &store.object, &store.laser);
    let generation = engraver.generation();

    store.object.shape = ObjectShape::Panel;
    let outcome = engraver.tick(DT, &store.object, &store.laser);

    assert!(!outcome.engraving);
    assert!(!outcome.completed);
    assert!(!engraver.is_active());
    assert_eq!(engraver.generation(), generation + 1);
    assert!(engraver.live().is_blank());
    assert!(engraver.baked().is_blank());

    // No completion ever fires for the abandoned session.
    for _ in 0..5 {
        assert!(!engraver.tick(DT, &store.object, &store.laser).completed);
    }
}

#[test]
fn unresolved_first_face_hides_marker_but_paints_the_rest() {
    let mut engraver = test_engraver(64, ObjectShape::Panel);
    let mut store = store_with_text("AB");
    store.object.shape = ObjectShape::Panel;
    store.laser.engraving_faces = vec![EngravingFace::Top, EngravingFace::Front];
    store.start_engraving();
    engraver.start(&store.laser);

    let second = {
        engraver.tick(DT, &store.object, &store.laser);
        engraver.tick(DT, &store.object, &store.laser)
    };
    // Top has no cell on a panel: skipped silently, no marker. Front still
    // receives paint.
    assert!(!second.marker.visible);
    assert!(!engraver.live().is_blank());
}

#[test]
fn empty_face_selection_still_completes() {
    let mut engraver = test_engraver(64, ObjectShape::Cube);
    let mut store = store_with_text("AB");
    store.laser.engraving_faces = Vec::new();
    store.start_engraving();
    engraver.start(&store.laser);

    let mut completed = false;
    for _ in 0..8 {
        let outcome = engraver.tick(DT, &store.object, &store.laser);
        assert!(!outcome.marker.visible);
        completed |= outcome.completed;
    }
    assert!(completed);
    assert!(engraver.live().is_blank());
}
