// File: crates/chart-overlay/tests/drag.rs
// Purpose: Drag controller state machine, hit-testing and override persistence.

use chart_overlay::drag::{hit_radius, hit_test};
use chart_overlay::{CalloutTarget, CursorIcon, DragController, DragState, OverrideStore, Point, PointerEvent, SlotKey};

fn target() -> CalloutTarget {
    CalloutTarget::new(SlotKey::new(0, 1), Point::new(100.0, 100.0), 40.0)
}

#[test]
fn hit_radius_has_a_floor() {
    assert_eq!(hit_radius(40.0), 20.0);
    assert_eq!(hit_radius(4.0), 8.0);
    assert_eq!(hit_radius(0.0), 8.0);
}

#[test]
fn hit_test_is_symmetric_around_the_annotation() {
    let targets = [target()];
    let overrides = OverrideStore::default();
    for (dx, dy) in [(20.0, 0.0), (-20.0, 0.0), (0.0, 20.0), (0.0, -20.0)] {
        let inside = Point::new(100.0 + dx, 100.0 + dy);
        assert!(hit_test(&targets, &overrides, inside).is_some(), "{inside:?} should hit");
        let outside = Point::new(100.0 + dx * 1.05, 100.0 + dy * 1.05);
        assert!(hit_test(&targets, &overrides, outside).is_none(), "{outside:?} should miss");
    }
}

#[test]
fn drag_moves_callout_and_keeps_grab_offset() {
    let targets = [target()];
    let mut overrides = OverrideStore::default();
    let mut drag = DragController::new();

    let down = drag.handle(&PointerEvent::Down { x: 105.0, y: 100.0 }, &targets, &mut overrides);
    assert!(down.consumed);
    assert_eq!(down.cursor, Some(CursorIcon::Grabbing));
    assert!(matches!(drag.state(), DragState::Dragging { slot, .. } if slot == SlotKey::new(0, 1)));

    let mv = drag.handle(&PointerEvent::Move { x: 305.0, y: 150.0 }, &targets, &mut overrides);
    assert!(mv.redraw);
    assert_eq!(overrides.get(SlotKey::new(0, 1)), Some(Point::new(300.0, 150.0)));

    let up = drag.handle(&PointerEvent::Up { x: 305.0, y: 150.0 }, &targets, &mut overrides);
    assert!(up.consumed);
    assert_eq!(up.cursor, Some(CursorIcon::Grab));
    assert_eq!(drag.state(), DragState::Idle);

    // override outlives the gesture and becomes the hit-test position
    assert_eq!(overrides.len(), 1);
    assert!(hit_test(&targets, &overrides, Point::new(300.0, 150.0)).is_some());
    assert!(hit_test(&targets, &overrides, Point::new(100.0, 100.0)).is_none());
}

#[test]
fn press_outside_any_callout_is_ignored() {
    let targets = [target()];
    let mut overrides = OverrideStore::default();
    let mut drag = DragController::new();
    let out = drag.handle(&PointerEvent::Down { x: 10.0, y: 10.0 }, &targets, &mut overrides);
    assert!(!out.consumed);
    assert!(!drag.is_dragging());
    let out = drag.handle(&PointerEvent::Move { x: 20.0, y: 20.0 }, &targets, &mut overrides);
    assert!(!out.redraw);
    assert!(overrides.is_empty());
}

#[test]
fn leaving_the_surface_ends_a_drag() {
    let targets = [target()];
    let mut overrides = OverrideStore::default();
    let mut drag = DragController::new();
    drag.handle(&PointerEvent::Down { x: 100.0, y: 100.0 }, &targets, &mut overrides);
    drag.handle(&PointerEvent::Move { x: 140.0, y: 90.0 }, &targets, &mut overrides);
    let out = drag.handle(&PointerEvent::Leave, &targets, &mut overrides);
    assert_eq!(out.cursor, Some(CursorIcon::Default));
    assert_eq!(drag.state(), DragState::Idle);
    assert_eq!(overrides.get(SlotKey::new(0, 1)), Some(Point::new(140.0, 90.0)));
}

#[test]
fn hover_changes_cursor_only_on_transitions() {
    let targets = [target()];
    let mut overrides = OverrideStore::default();
    let mut drag = DragController::new();
    let enter = drag.handle(&PointerEvent::Move { x: 100.0, y: 95.0 }, &targets, &mut overrides);
    assert_eq!(enter.cursor, Some(CursorIcon::Grab));
    let stay = drag.handle(&PointerEvent::Move { x: 101.0, y: 96.0 }, &targets, &mut overrides);
    assert_eq!(stay.cursor, None);
    let exit = drag.handle(&PointerEvent::Move { x: 200.0, y: 200.0 }, &targets, &mut overrides);
    assert_eq!(exit.cursor, Some(CursorIcon::Default));
}

#[test]
fn overlapping_callouts_grab_the_one_drawn_last() {
    let below = CalloutTarget::new(SlotKey::new(0, 0), Point::new(100.0, 100.0), 40.0);
    let above = CalloutTarget::new(SlotKey::new(0, 3), Point::new(110.0, 100.0), 40.0);
    let targets = [below, above];
    let mut overrides = OverrideStore::default();
    let mut drag = DragController::new();

    let hit = hit_test(&targets, &overrides, Point::new(105.0, 100.0)).map(|t| t.slot);
    assert_eq!(hit, Some(SlotKey::new(0, 3)));

    drag.handle(&PointerEvent::Down { x: 105.0, y: 100.0 }, &targets, &mut overrides);
    assert!(matches!(drag.state(), DragState::Dragging { slot, .. } if slot == SlotKey::new(0, 3)));
}
