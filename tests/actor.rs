/// Unit tests for the actor primitives: speed invariant, the (deliberately
/// oversized) spacing test, and capped straight-line movement. All pure —
/// no window, no GPU.
use glam::Vec2;
use homeward::actor::{Actor, ActorError, MAX_SPEED, MIN_SPEED, Skin};
use homeward::canvas::Color;

fn actor_at(position: Vec2, speed: f32) -> Actor {
    Actor::new(position, speed, 5.0, Skin::Tint(Color::RED), "test").unwrap()
}

// ── Speed invariant ──────────────────────────────────────────────────────────

#[test]
fn speed_just_below_minimum_is_rejected() {
    let result = Actor::new(Vec2::ZERO, MIN_SPEED - 0.01, 5.0, Skin::Tint(Color::RED), "slow");
    assert_eq!(
        result.unwrap_err(),
        ActorError::SpeedOutOfRange { speed: MIN_SPEED - 0.01 }
    );
}

#[test]
fn speed_above_maximum_is_rejected() {
    let result = Actor::new(Vec2::ZERO, MAX_SPEED + 1.0, 5.0, Skin::Tint(Color::RED), "fast");
    assert!(result.is_err());
}

#[test]
fn speed_endpoints_are_accepted() {
    assert!(Actor::new(Vec2::ZERO, MIN_SPEED, 5.0, Skin::Tint(Color::RED), "min").is_ok());
    assert!(Actor::new(Vec2::ZERO, MAX_SPEED, 5.0, Skin::Tint(Color::RED), "max").is_ok());
}

#[test]
fn inverse_speed_complements_speed() {
    let a = actor_at(Vec2::ZERO, 1.5);
    assert!((a.inverse_speed() - (MAX_SPEED - 1.5)).abs() < 1e-6);
    // The extremes swap: the fastest seeker is the slowest homer.
    assert_eq!(actor_at(Vec2::ZERO, MAX_SPEED).inverse_speed(), 0.0);
}

#[test]
fn home_is_recorded_at_creation() {
    let mut a = actor_at(Vec2::new(10.0, 20.0), 1.0);
    a.move_toward(Vec2::new(50.0, 50.0), 5.0);
    assert_eq!(a.home(), Vec2::new(10.0, 20.0));
}

// ── contains ─────────────────────────────────────────────────────────────────

#[test]
fn contains_uses_twice_the_padded_radius() {
    // radius 5, buffer 3 → separation threshold is 2 * (5 + 3) = 16.
    let a = actor_at(Vec2::ZERO, 1.0);
    assert!(a.contains(Vec2::new(16.0, 0.0), 3.0));
    assert!(!a.contains(Vec2::new(16.1, 0.0), 3.0));
}

#[test]
fn contains_is_loose_even_with_no_buffer() {
    // The doubled radius means a point a full diameter away still "hits".
    let a = actor_at(Vec2::ZERO, 1.0);
    assert!(a.contains(Vec2::new(10.0, 0.0), 0.0));
    assert!(!a.contains(Vec2::new(10.5, 0.0), 0.0));
}

// ── move_toward ──────────────────────────────────────────────────────────────

#[test]
fn move_toward_snaps_exactly_when_within_reach() {
    let mut a = actor_at(Vec2::new(1.0, 1.0), 1.0);
    let target = Vec2::new(3.0, 3.0);
    a.move_toward(target, 10.0);
    // Exact equality: snapping must not leave floating-point residue.
    assert_eq!(a.position(), target);
}

#[test]
fn move_toward_covers_exactly_max_distance_when_out_of_reach() {
    let mut a = actor_at(Vec2::ZERO, 1.0);
    let target = Vec2::new(100.0, 100.0);
    let before = a.position().distance(target);
    a.move_toward(target, 5.0);
    let after = a.position().distance(target);
    assert!((before - after - 5.0).abs() < 1e-3, "moved {} instead of 5", before - after);
}

#[test]
fn move_toward_travels_along_the_straight_line() {
    let mut a = actor_at(Vec2::ZERO, 1.0);
    a.move_toward(Vec2::new(100.0, 100.0), 5.0);
    let expected = 5.0 / 2.0_f32.sqrt();
    assert!((a.position().x - expected).abs() < 1e-3);
    assert!((a.position().y - expected).abs() < 1e-3);
}

#[test]
fn move_toward_own_position_is_a_no_op() {
    let mut a = actor_at(Vec2::new(7.0, 7.0), 1.0);
    a.move_toward(Vec2::new(7.0, 7.0), 5.0);
    assert_eq!(a.position(), Vec2::new(7.0, 7.0));
}
