//! End-to-end pipeline tests over synthetic landmark frames


use hand_cursor_control::{
    config::Config,
    pipeline::{GeometryMode, PointerPipeline},
};
use test_helpers::{empty_frame_at, frame_at, open_hand, pinched_hand};

fn pipeline(mode: GeometryMode) -> PointerPipeline {
    let mut config = Config::for_mode(mode);
    config.screen.width = 1920;
    config.screen.height = 1080;
    PointerPipeline::new(&config).unwrap()
}

/// A stationary hand at 60 Hz converges to a stable pointer with no pinch
#[test]
fn test_front_mode_stationary_hand_converges() {
    let mut pipeline = pipeline(GeometryMode::Front);
    let hand = open_hand();

    let mut updates = Vec::new();
    for i in 0..30 {
        let update = pipeline
            .process(&frame_at(&hand, i))
            .expect("a hand is present every frame");
        assert!(!update.pinch, "open hand must never read as a pinch");
        updates.push(update);
    }

    let last = updates[29];
    for update in &updates[25..] {
        assert!((update.x - last.x).abs() <= 1, "x stable within one pixel");
        assert!((update.y - last.y).abs() <= 1, "y stable within one pixel");
    }

    // Pointer lands inside the screen
    assert!((0..1920).contains(&last.x));
    assert!((0..1080).contains(&last.y));
}

/// Frames with zero hands emit nothing and leave state untouched
#[test]
fn test_no_hand_frame_is_skipped_without_state_change() {
    let mut pipeline = pipeline(GeometryMode::Front);
    let hand = open_hand();

    let mut before = None;
    for i in 0..10 {
        before = pipeline.process(&frame_at(&hand, i));
    }

    assert!(pipeline.process(&empty_frame_at(10)).is_none());
    assert!(pipeline.process(&empty_frame_at(11)).is_none());

    // The hand returns, stationary: the emitted pointer picks up exactly
    // where it left off
    let after = pipeline.process(&frame_at(&hand, 12));
    assert_eq!(before, after);
}

/// Direct-mapping modes put the fingertip on the screen without tilt math
#[test]
fn test_down_mode_direct_mapping() {
    let mut config = Config::for_mode(GeometryMode::Down);
    config.screen.width = 1000;
    config.screen.height = 1000;
    let mut pipeline = PointerPipeline::new(&config).unwrap();

    // Thumb tip (0.30, 0.62): mirrored to (0.70, 0.38), remapped through
    // the 0.2..0.8 band to (0.8333, 0.30)
    let update = pipeline.process(&frame_at(&open_hand(), 0)).unwrap();
    assert!((update.x - 833).abs() <= 1, "got x = {}", update.x);
    assert!((update.y - 300).abs() <= 1, "got y = {}", update.y);
    assert!(!update.pinch);
}

#[test]
fn test_topdown_mode_direct_mapping() {
    let mut config = Config::for_mode(GeometryMode::TopDown);
    config.screen.width = 1000;
    config.screen.height = 1000;
    let mut pipeline = PointerPipeline::new(&config).unwrap();

    // Moving average passes the first sample through unchanged
    let update = pipeline.process(&frame_at(&open_hand(), 0)).unwrap();
    assert!((update.x - 833).abs() <= 1, "got x = {}", update.x);
    assert!((update.y - 300).abs() <= 1, "got y = {}", update.y);
}

/// A pinch is confirmed only after the majority of the window agrees
#[test]
fn test_down_mode_pinch_debounce_latency() {
    let mut pipeline = pipeline(GeometryMode::Down);
    let open = open_hand();
    let pinched = pinched_hand();

    // Fill the 9-frame window with open-hand estimates
    for i in 0..8 {
        let update = pipeline.process(&frame_at(&open, i)).unwrap();
        assert!(!update.pinch);
    }

    // Majority (5 of 9 at tolerance 0.5) flips on the fifth pinched frame
    let mut confirmed_at = None;
    for i in 0..9 {
        let update = pipeline.process(&frame_at(&pinched, 8 + i)).unwrap();
        if update.pinch {
            confirmed_at = Some(i);
            break;
        }
    }
    assert_eq!(confirmed_at, Some(4));
}

/// Pinching must not drift the pointer in the tilt-compensated mode: the
/// closing thumb and index leave the anchoring middle finger alone, and
/// the angle lock freezes near the pinch
#[test]
fn test_front_mode_pinch_does_not_move_pointer() {
    let mut pipeline = pipeline(GeometryMode::Front);
    let open = open_hand();
    let pinched = pinched_hand();

    let mut resting = None;
    for i in 0..20 {
        resting = pipeline.process(&frame_at(&open, i));
    }
    let resting = resting.unwrap();

    for i in 20..40 {
        let update = pipeline.process(&frame_at(&pinched, i)).unwrap();
        assert_eq!(update.x, resting.x, "pinch must not move the pointer");
        assert_eq!(update.y, resting.y, "pinch must not move the pointer");
    }
}

/// The redesigned normal mode reports real pinches instead of a constant
#[test]
fn test_normal_mode_reports_pinch() {
    let mut pipeline = pipeline(GeometryMode::Normal);
    let pinched = pinched_hand();

    let mut saw_pinch = false;
    for i in 0..30 {
        let update = pipeline.process(&frame_at(&pinched, i)).unwrap();
        saw_pinch |= update.pinch;
    }
    assert!(saw_pinch, "a held pinch must eventually be confirmed");
}

/// Normal mode produces in-screen, stable output for a stationary hand
#[test]
fn test_normal_mode_stationary_hand() {
    let mut config = Config::for_mode(GeometryMode::Normal);
    config.screen.width = 1920;
    config.screen.height = 1080;
    let mut pipeline = PointerPipeline::new(&config).unwrap();
    let hand = open_hand();

    let mut last = None;
    for i in 0..30 {
        last = pipeline.process(&frame_at(&hand, i));
    }
    let last = last.unwrap();
    assert!((0..1920).contains(&last.x));
    assert!((0..1080).contains(&last.y));

    let next = pipeline.process(&frame_at(&hand, 30)).unwrap();
    assert!((next.x - last.x).abs() <= 1);
    assert!((next.y - last.y).abs() <= 1);
}

/// An out-of-order timestamp must not break the session
#[test]
fn test_non_monotonic_timestamp_recovers() {
    let mut pipeline = pipeline(GeometryMode::Front);
    let hand = open_hand();

    pipeline.process(&frame_at(&hand, 10)).unwrap();
    // Older timestamp than the previous frame
    let update = pipeline.process(&frame_at(&hand, 2)).unwrap();
    assert!((0..1920).contains(&update.x));
    assert!((0..1080).contains(&update.y));

    // Back to normal cadence
    let update = pipeline.process(&frame_at(&hand, 11)).unwrap();
    assert!((0..1920).contains(&update.x));
}

/// Independent sessions do not share state
#[test]
fn test_independent_sessions() {
    let mut first = pipeline(GeometryMode::Front);
    let mut second = pipeline(GeometryMode::Front);
    let open = open_hand();
    let pinched = pinched_hand();

    for i in 0..20 {
        first.process(&frame_at(&pinched, i));
        second.process(&frame_at(&open, i));
    }

    let first_update = first.process(&frame_at(&pinched, 20)).unwrap();
    let second_update = second.process(&frame_at(&open, 20)).unwrap();
    assert!(first_update.pinch);
    assert!(!second_update.pinch);
}
