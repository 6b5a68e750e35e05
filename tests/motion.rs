/// Tests for the per-frame motion policy: seek the target at `speed`, drift
/// home at `inverse_speed`, and treat near-zero time or distance as a no-op.
use glam::Vec2;
use homeward::actor::{Actor, MAX_SPEED, Skin};
use homeward::canvas::Color;
use homeward::motion::MotionPolicy;

fn actor_at(position: Vec2, speed: f32) -> Actor {
    Actor::new(position, speed, 5.0, Skin::Tint(Color::GREEN), "test").unwrap()
}

#[test]
fn seeks_target_along_the_diagonal() {
    // Speed 5 for 1 ms toward (100, 100) moves 5 units along the diagonal,
    // i.e. about (3.54, 3.54).
    let policy = MotionPolicy::default();
    let mut a = actor_at(Vec2::ZERO, 5.0);
    policy.step(&mut a, Some(Vec2::new(100.0, 100.0)), 1.0);
    assert!((a.position().x - 3.5355).abs() < 1e-2, "x = {}", a.position().x);
    assert!((a.position().y - 3.5355).abs() < 1e-2, "y = {}", a.position().y);
}

#[test]
fn snaps_onto_a_target_within_reach() {
    let policy = MotionPolicy::default();
    let target = Vec2::new(4.0, 4.0);
    let mut a = actor_at(Vec2::new(1.0, 1.0), 5.0);
    policy.step(&mut a, Some(target), 10.0);
    assert_eq!(a.position(), target);
}

#[test]
fn zero_elapsed_time_moves_nothing() {
    let policy = MotionPolicy::default();
    let mut a = actor_at(Vec2::new(10.0, 10.0), 5.0);
    policy.step(&mut a, Some(Vec2::new(100.0, 100.0)), 0.0);
    assert_eq!(a.position(), Vec2::new(10.0, 10.0));
}

#[test]
fn arrived_actor_stays_put() {
    let policy = MotionPolicy::default();
    let target = Vec2::new(10.0, 10.0);
    let mut a = actor_at(target, 5.0);
    policy.step(&mut a, Some(target), 1.0);
    assert_eq!(a.position(), target);
}

// ── Homing ───────────────────────────────────────────────────────────────────

/// Displace an actor from home by seeking a target for a few frames.
fn displaced(speed: f32) -> Actor {
    let policy = MotionPolicy::default();
    let mut a = actor_at(Vec2::ZERO, speed);
    policy.step(&mut a, Some(Vec2::new(100.0, 0.0)), 10.0);
    assert!(a.position().x > 0.0, "setup: actor should have left home");
    a
}

#[test]
fn homing_uses_inverse_speed_not_speed() {
    // Speed 4 homes at 5 - 4 = 1 unit per ms.
    let policy = MotionPolicy::default();
    let mut a = displaced(4.0);
    let before = a.position().distance(a.home());
    policy.step(&mut a, None, 1.0);
    let after = a.position().distance(a.home());
    assert!((before - after - 1.0).abs() < 1e-3, "homed {} instead of 1", before - after);
}

#[test]
fn fastest_actor_never_comes_home() {
    // inverse_speed is zero at MAX_SPEED, and a zero step is a no-op.
    let policy = MotionPolicy::default();
    let mut a = displaced(MAX_SPEED);
    let stranded = a.position();
    for _ in 0..100 {
        policy.step(&mut a, None, 16.0);
    }
    assert_eq!(a.position(), stranded);
}

#[test]
fn slow_actor_homes_faster_than_a_fast_one() {
    let policy = MotionPolicy::default();
    let mut slow = displaced(1.0);
    let mut fast = displaced(4.0);
    let slow_before = slow.position().distance(slow.home());
    let fast_before = fast.position().distance(fast.home());
    policy.step(&mut slow, None, 1.0);
    policy.step(&mut fast, None, 1.0);
    let slow_covered = slow_before - slow.position().distance(slow.home());
    let fast_covered = fast_before - fast.position().distance(fast.home());
    assert!(
        slow_covered > fast_covered,
        "slow covered {slow_covered}, fast covered {fast_covered}"
    );
}

#[test]
fn homing_converges_and_snaps_onto_home() {
    let policy = MotionPolicy::default();
    let mut a = displaced(2.0);
    for _ in 0..100 {
        policy.step(&mut a, None, 16.0);
    }
    assert_eq!(a.position(), a.home());
}

#[test]
fn custom_absolute_tolerance_swallows_tiny_steps() {
    // With abs_tol = 1.0, a 0.5-unit step counts as zero and is skipped.
    let policy = MotionPolicy { rel_tol: 0.1, abs_tol: 1.0 };
    let mut a = actor_at(Vec2::ZERO, 0.5);
    policy.step(&mut a, Some(Vec2::new(100.0, 0.0)), 1.0);
    assert_eq!(a.position(), Vec2::ZERO);
}
