//! Unit tests for swipe classification.

use catcare::triage::{classify, Swipe, SwipeThresholds, Vector2};

fn swipe(offset: (f64, f64), velocity: (f64, f64)) -> Swipe {
    classify(
        Vector2::new(offset.0, offset.1),
        Vector2::new(velocity.0, velocity.1),
        SwipeThresholds::default(),
    )
}

#[test]
fn short_slow_drag_springs_back() {
    assert_eq!(swipe((40.0, 10.0), (50.0, 0.0)), Swipe::None);
    assert_eq!(swipe((0.0, 0.0), (0.0, 0.0)), Swipe::None);
}

#[test]
fn long_drag_commits_horizontally() {
    assert_eq!(swipe((120.0, 5.0), (0.0, 0.0)), Swipe::Right);
    assert_eq!(swipe((-120.0, 5.0), (0.0, 0.0)), Swipe::Left);
}

#[test]
fn exact_threshold_commits() {
    assert_eq!(swipe((100.0, 0.0), (0.0, 0.0)), Swipe::Right);
}

#[test]
fn fast_flick_commits_without_distance() {
    // 600 px/s * 0.2 = 120 px of power.
    assert_eq!(swipe((0.0, 0.0), (600.0, 0.0)), Swipe::Right);
    assert_eq!(swipe((0.0, 0.0), (-600.0, 0.0)), Swipe::Left);
}

#[test]
fn velocity_and_offset_combine() {
    // 60 + 250 * 0.2 = 110.
    assert_eq!(swipe((60.0, 0.0), (250.0, 0.0)), Swipe::Right);
}

#[test]
fn opposing_velocity_cancels_offset() {
    // 150 - 400 * 0.2 = 70.
    assert_eq!(swipe((150.0, 0.0), (-400.0, 0.0)), Swipe::None);
}

#[test]
fn vertical_swipes_switch_direction_by_sign() {
    assert_eq!(swipe((10.0, -150.0), (0.0, 0.0)), Swipe::Up);
    assert_eq!(swipe((10.0, 150.0), (0.0, 0.0)), Swipe::Down);
}

#[test]
fn dominant_axis_wins() {
    assert_eq!(swipe((110.0, 130.0), (0.0, 0.0)), Swipe::Down);
    assert_eq!(swipe((-140.0, 130.0), (0.0, 0.0)), Swipe::Left);
}

#[test]
fn horizontal_wins_ties() {
    assert_eq!(swipe((120.0, -120.0), (0.0, 0.0)), Swipe::Right);
}

#[test]
fn non_finite_input_is_ignored() {
    assert_eq!(swipe((f64::NAN, 0.0), (0.0, 0.0)), Swipe::None);
    assert_eq!(swipe((0.0, 0.0), (f64::INFINITY, 0.0)), Swipe::None);
}

#[test]
fn custom_thresholds_apply() {
    let strict = SwipeThresholds {
        distance: 200.0,
        velocity_weight: 0.0,
    };
    let offset = Vector2::new(150.0, 0.0);
    let velocity = Vector2::new(5000.0, 0.0);
    assert_eq!(classify(offset, velocity, strict), Swipe::None);
}
