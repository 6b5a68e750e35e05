use glam::Vec2;

use crate::actor::Actor;

/// Per-frame displacement policy: seek the shared target when one is set,
/// otherwise drift back home.
///
/// The tolerances feed [`is_close`] when deciding whether an elapsed-time or
/// distance value counts as zero. The defaults mirror the coarse 10 %
/// relative tolerance the motion update has always used; both knobs are
/// plain fields so callers can tighten or loosen them.
#[derive(Debug, Clone, Copy)]
pub struct MotionPolicy {
    pub rel_tol: f32,
    pub abs_tol: f32,
}

impl Default for MotionPolicy {
    fn default() -> Self {
        Self { rel_tol: 0.1, abs_tol: 0.0 }
    }
}

impl MotionPolicy {
    /// Advance one actor by one frame of `dt_ms` milliseconds.
    ///
    /// With a target, the step is capped at `speed * dt`. With no target the
    /// actor heads for its home position at `inverse_speed` — the inversion
    /// makes slow seekers fast homers and is intentional.
    pub fn step(&self, actor: &mut Actor, target: Option<Vec2>, dt_ms: f32) {
        match target {
            Some(point) => self.advance(actor, point, actor.speed() * dt_ms),
            None => self.advance(actor, actor.home(), actor.inverse_speed() * dt_ms),
        }
    }

    fn advance(&self, actor: &mut Actor, toward: Vec2, max_distance: f32) {
        if self.near_zero(max_distance) {
            return;
        }
        let distance = actor.position().distance(toward);
        if self.near_zero(distance) {
            // Already arrived.
            return;
        }
        actor.move_toward(toward, max_distance);
    }

    fn near_zero(&self, value: f32) -> bool {
        is_close(value, 0.0, self.rel_tol, self.abs_tol)
    }
}

/// Approximate float equality with both a relative and an absolute bound:
/// `|a - b| <= max(rel_tol * max(|a|, |b|), abs_tol)`.
pub fn is_close(a: f32, b: f32, rel_tol: f32, abs_tol: f32) -> bool {
    (a - b).abs() <= (rel_tol * a.abs().max(b.abs())).max(abs_tol)
}
