mod common;

use cropper_core::gesture::{GestureController, GestureOutcome, InputEvent, Listeners, Touch};
use cropper_core::kurbo::{Point, Vec2};
use cropper_core::{CropperConfig, Rejection, StepOutcome, ViewportState};

use common::ready_viewport;

fn controller() -> GestureController {
    GestureController::new(&CropperConfig::default())
}

fn down(x: f64, y: f64) -> InputEvent {
    InputEvent::PointerDown {
        position: Point::new(x, y),
    }
}

fn moved(x: f64, y: f64) -> InputEvent {
    InputEvent::PointerMove {
        position: Point::new(x, y),
    }
}

fn wheel(dx: f64, dy: f64) -> InputEvent {
    InputEvent::Wheel {
        delta: Vec2::new(dx, dy),
    }
}

fn touch_start(touches: &[Touch]) -> InputEvent {
    InputEvent::TouchStart {
        touches: touches.to_vec(),
    }
}

fn touch_move(touches: &[Touch]) -> InputEvent {
    InputEvent::TouchMove {
        touches: touches.to_vec(),
    }
}

fn touch_end(touches: &[Touch]) -> InputEvent {
    InputEvent::TouchEnd {
        touches: touches.to_vec(),
    }
}

const APPLIED: GestureOutcome = GestureOutcome::Step(StepOutcome::Applied);

// ---------------------------------------------------------------------------
// Mouse drag
// ---------------------------------------------------------------------------

#[test]
fn test_drag_accumulates_per_event() {
    let mut viewport = ready_viewport((1000.0, 1000.0), (500.0, 500.0));
    let mut gestures = controller();

    assert_eq!(gestures.handle(down(100.0, 100.0), &mut viewport), GestureOutcome::Tracked);
    for x in [105.0, 110.0, 115.0] {
        assert_eq!(gestures.handle(moved(x, 100.0), &mut viewport), APPLIED);
    }

    // Three steps of -5 * 2 each.
    assert_eq!(viewport.pan(), Some(Point::new(220.0, 250.0)));
}

#[test]
fn test_drag_track_advances_after_rejection() {
    let mut viewport = ready_viewport((1000.0, 1000.0), (500.0, 500.0));
    let mut gestures = controller();

    gestures.handle(down(0.0, 0.0), &mut viewport);
    // -200 * 2 would push the window to x = 650: rejected.
    assert_eq!(
        gestures.handle(moved(-200.0, 0.0), &mut viewport),
        GestureOutcome::Step(StepOutcome::Rejected(Rejection::OutOfBounds))
    );
    assert_eq!(
        gestures.pointer_track().map(|t| t.last),
        Some(Point::new(-200.0, 0.0))
    );

    // Next delta is measured from the rejected position, not the drag start.
    assert_eq!(gestures.handle(moved(-195.0, 0.0), &mut viewport), APPLIED);
    assert_eq!(viewport.pan(), Some(Point::new(240.0, 250.0)));
}

#[test]
fn test_move_without_press_is_ignored() {
    let mut viewport = ready_viewport((1000.0, 1000.0), (500.0, 500.0));
    let mut gestures = controller();

    assert_eq!(gestures.handle(moved(50.0, 50.0), &mut viewport), GestureOutcome::Ignored);
    assert_eq!(gestures.handle(InputEvent::PointerUp, &mut viewport), GestureOutcome::Ignored);
    assert_eq!(viewport.pan(), Some(Point::new(250.0, 250.0)));
}

#[test]
fn test_drag_listeners_follow_session() {
    let mut viewport = ready_viewport((1000.0, 1000.0), (500.0, 500.0));
    let mut gestures = controller();
    assert!(gestures.listeners().is_empty());

    gestures.handle(down(10.0, 10.0), &mut viewport);
    assert_eq!(
        gestures.listeners(),
        Listeners::POINTER_MOVE | Listeners::POINTER_UP
    );

    // A second press without release replaces the session, not the listener set.
    gestures.handle(down(20.0, 20.0), &mut viewport);
    assert_eq!(
        gestures.listeners(),
        Listeners::POINTER_MOVE | Listeners::POINTER_UP
    );

    assert_eq!(gestures.handle(InputEvent::PointerUp, &mut viewport), GestureOutcome::Tracked);
    assert!(gestures.listeners().is_empty());
    assert!(!gestures.is_dragging());
}

#[test]
fn test_pointer_cancel_ends_drag() {
    let mut viewport = ready_viewport((1000.0, 1000.0), (500.0, 500.0));
    let mut gestures = controller();

    gestures.handle(down(10.0, 10.0), &mut viewport);
    assert_eq!(
        gestures.handle(InputEvent::PointerCancel, &mut viewport),
        GestureOutcome::Tracked
    );
    assert!(gestures.listeners().is_empty());
    assert_eq!(gestures.handle(moved(30.0, 10.0), &mut viewport), GestureOutcome::Ignored);
}

#[test]
fn test_zero_length_move_is_noop() {
    let mut viewport = ready_viewport((1000.0, 1000.0), (500.0, 500.0));
    let mut gestures = controller();

    gestures.handle(down(10.0, 10.0), &mut viewport);
    assert_eq!(
        gestures.handle(moved(10.0, 10.0), &mut viewport),
        GestureOutcome::Step(StepOutcome::Rejected(Rejection::ZeroDelta))
    );
}

// ---------------------------------------------------------------------------
// Uninitialized viewport
// ---------------------------------------------------------------------------

#[test]
fn test_controller_inert_before_reset() {
    let mut viewport = ViewportState::default();
    let mut gestures = controller();

    assert_eq!(gestures.handle(down(10.0, 10.0), &mut viewport), GestureOutcome::Ignored);
    assert_eq!(gestures.handle(moved(20.0, 10.0), &mut viewport), GestureOutcome::Ignored);
    assert_eq!(gestures.handle(wheel(0.0, -1.0), &mut viewport), GestureOutcome::Ignored);
    assert_eq!(
        gestures.handle(touch_start(&[Touch::new(1, 0.0, 0.0)]), &mut viewport),
        GestureOutcome::Ignored
    );

    assert!(gestures.listeners().is_empty());
    assert!(!viewport.is_ready());
}

// ---------------------------------------------------------------------------
// Wheel
// ---------------------------------------------------------------------------

#[test]
fn test_wheel_direction() {
    let mut viewport = ready_viewport((1000.0, 1000.0), (500.0, 500.0));
    let mut gestures = controller();

    // Scrolling up zooms in.
    assert_eq!(gestures.handle(wheel(0.0, -120.0), &mut viewport), APPLIED);
    assert!((viewport.scale().unwrap() - 0.95).abs() < 1e-12);

    assert_eq!(gestures.handle(wheel(0.0, 120.0), &mut viewport), APPLIED);
    assert!((viewport.scale().unwrap() - 1.0).abs() < 1e-12);

    // Scrolling left also zooms in.
    assert_eq!(gestures.handle(wheel(-3.0, 1.0), &mut viewport), APPLIED);
    assert!((viewport.scale().unwrap() - 0.95).abs() < 1e-12);
}

#[test]
fn test_wheel_zero_delta_is_noop() {
    let mut viewport = ready_viewport((1000.0, 1000.0), (500.0, 500.0));
    let mut gestures = controller();

    for event in [wheel(0.0, 0.0), wheel(2.0, -2.0)] {
        assert_eq!(
            gestures.handle(event, &mut viewport),
            GestureOutcome::Step(StepOutcome::Rejected(Rejection::ZeroDelta))
        );
    }
    assert_eq!(viewport.scale(), Some(1.0));
}

// ---------------------------------------------------------------------------
// Touch
// ---------------------------------------------------------------------------

#[test]
fn test_single_touch_drag() {
    let mut viewport = ready_viewport((1000.0, 1000.0), (500.0, 500.0));
    let mut gestures = controller();

    gestures.handle(touch_start(&[Touch::new(7, 100.0, 100.0)]), &mut viewport);
    assert_eq!(
        gestures.listeners(),
        Listeners::TOUCH_MOVE | Listeners::TOUCH_END
    );
    for x in [105.0, 110.0, 115.0] {
        assert_eq!(
            gestures.handle(touch_move(&[Touch::new(7, x, 100.0)]), &mut viewport),
            APPLIED
        );
    }
    assert_eq!(viewport.pan(), Some(Point::new(220.0, 250.0)));

    gestures.handle(touch_end(&[]), &mut viewport);
    assert!(gestures.listeners().is_empty());
    assert_eq!(gestures.touch_track(), None);
}

#[test]
fn test_pinch_deadzone() {
    let mut viewport = ready_viewport((1000.0, 1000.0), (500.0, 500.0));
    let mut gestures = controller();
    let a = Touch::new(1, 100.0, 100.0);

    gestures.handle(touch_start(&[a, Touch::new(2, 200.0, 100.0)]), &mut viewport);
    assert_eq!(gestures.pinch_track().map(|p| p.latched_distance), Some(100.0));

    let mut steps = 0;
    for x in [203.0, 206.0, 208.0] {
        if let GestureOutcome::Step(_) =
            gestures.handle(touch_move(&[a, Touch::new(2, x, 100.0)]), &mut viewport)
        {
            steps += 1;
        }
        match x as u32 {
            // 3 px: below the deadzone, nothing latched.
            203 => {
                assert_eq!(steps, 0);
                assert_eq!(gestures.pinch_track().map(|p| p.latched_distance), Some(100.0));
            }
            // 6 px from the latched distance: one zoom-in step.
            206 => {
                assert_eq!(steps, 1);
                assert_eq!(gestures.pinch_track().map(|p| p.latched_distance), Some(106.0));
            }
            _ => assert_eq!(steps, 1),
        }
    }

    assert!((viewport.scale().unwrap() - 0.95).abs() < 1e-12);
}

#[test]
fn test_pinch_closing_zooms_out() {
    let mut viewport = ready_viewport((1000.0, 1000.0), (500.0, 500.0));
    let mut gestures = controller();
    let a = Touch::new(1, 100.0, 100.0);

    gestures.handle(touch_start(&[a, Touch::new(2, 200.0, 100.0)]), &mut viewport);
    assert_eq!(
        gestures.handle(touch_move(&[a, Touch::new(2, 180.0, 100.0)]), &mut viewport),
        APPLIED
    );
    assert!((viewport.scale().unwrap() - 1.05).abs() < 1e-12);
}

#[test]
fn test_pinch_cancels_single_touch_drag() {
    let mut viewport = ready_viewport((1000.0, 1000.0), (500.0, 500.0));
    let mut gestures = controller();

    gestures.handle(touch_start(&[Touch::new(1, 100.0, 100.0)]), &mut viewport);
    assert!(gestures.touch_track().is_some());

    gestures.handle(
        touch_start(&[Touch::new(1, 100.0, 100.0), Touch::new(2, 200.0, 100.0)]),
        &mut viewport,
    );
    assert_eq!(gestures.touch_track(), None);
    assert!(gestures.pinch_track().is_some());

    // Moving both fingers together keeps their distance: no pan, no zoom.
    let outcome = gestures.handle(
        touch_move(&[Touch::new(1, 140.0, 100.0), Touch::new(2, 240.0, 100.0)]),
        &mut viewport,
    );
    assert_eq!(outcome, GestureOutcome::Tracked);
    assert_eq!(viewport.pan(), Some(Point::new(250.0, 250.0)));
    assert_eq!(viewport.scale(), Some(1.0));
}

#[test]
fn test_pinch_to_single_touch_relatches() {
    let mut viewport = ready_viewport((1000.0, 1000.0), (500.0, 500.0));
    let mut gestures = controller();

    gestures.handle(touch_start(&[Touch::new(1, 10.0, 10.0)]), &mut viewport);
    gestures.handle(
        touch_start(&[Touch::new(1, 10.0, 10.0), Touch::new(2, 300.0, 300.0)]),
        &mut viewport,
    );

    // Finger 1 lifts; finger 2 keeps going and must not inherit finger 1's position.
    gestures.handle(touch_end(&[Touch::new(2, 300.0, 300.0)]), &mut viewport);
    assert_eq!(
        gestures.touch_track().map(|t| (t.touch_id, t.last)),
        Some((Some(2), Point::new(300.0, 300.0)))
    );
    assert_eq!(
        gestures.listeners(),
        Listeners::TOUCH_MOVE | Listeners::TOUCH_END
    );

    assert_eq!(
        gestures.handle(touch_move(&[Touch::new(2, 305.0, 300.0)]), &mut viewport),
        APPLIED
    );
    assert_eq!(viewport.pan(), Some(Point::new(240.0, 250.0)));
}

#[test]
fn test_touch_cancel_ends_session() {
    let mut viewport = ready_viewport((1000.0, 1000.0), (500.0, 500.0));
    let mut gestures = controller();

    gestures.handle(touch_start(&[Touch::new(1, 10.0, 10.0)]), &mut viewport);
    assert_eq!(
        gestures.handle(InputEvent::TouchCancel, &mut viewport),
        GestureOutcome::Tracked
    );
    assert!(gestures.listeners().is_empty());
    assert_eq!(
        gestures.handle(touch_move(&[Touch::new(1, 20.0, 10.0)]), &mut viewport),
        GestureOutcome::Ignored
    );
}

#[test]
fn test_mouse_and_touch_sessions_are_independent() {
    let mut viewport = ready_viewport((1000.0, 1000.0), (500.0, 500.0));
    let mut gestures = controller();

    gestures.handle(down(10.0, 10.0), &mut viewport);
    gestures.handle(touch_start(&[Touch::new(1, 50.0, 50.0)]), &mut viewport);
    assert_eq!(gestures.listeners(), Listeners::all());

    gestures.handle(touch_end(&[]), &mut viewport);
    assert_eq!(
        gestures.listeners(),
        Listeners::POINTER_MOVE | Listeners::POINTER_UP
    );
    assert_eq!(gestures.handle(moved(15.0, 10.0), &mut viewport), APPLIED);
}
