use glam::Vec2;
use rand::Rng;

use crate::actor::{Actor, MAX_SPEED, MIN_SPEED, Skin};
use crate::animation::Animator;
use crate::canvas::Color;

/// Rejection-sampling guard. At sane actor-count/surface ratios this is
/// never reached; it exists so a config typo (say, 5000 actors on a tiny
/// window) degrades into overlap instead of a hang.
const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;

/// How many actors to scatter and how much space each one claims.
#[derive(Debug, Clone, Copy)]
pub struct SpawnPlan {
    pub count: usize,
    pub radius: f32,
    pub buffer: f32,
}

impl Default for SpawnPlan {
    fn default() -> Self {
        Self { count: 50, radius: 5.0, buffer: 3.0 }
    }
}

/// Scatter a fresh set of actors over a `bounds.x × bounds.y` surface.
///
/// Placement is rejection-sampled so that no two actors start within
/// `2 * (radius + buffer)` of each other. `sheet_frames` carries the frame
/// count of each loaded sheet variant; when it is empty the actors get
/// random tint colors instead of animated sheets. All randomness comes from
/// the injected `rng`, so a seeded generator reproduces the exact layout.
pub fn scatter(
    plan: &SpawnPlan,
    bounds: Vec2,
    sheet_frames: &[usize],
    rng: &mut impl Rng,
) -> Vec<Actor> {
    let mut actors = Vec::with_capacity(plan.count);
    for i in 0..plan.count {
        let position = place_clear(&actors, bounds, plan.buffer, rng);
        let speed = rng.gen_range(MIN_SPEED..=MAX_SPEED);
        let skin = if sheet_frames.is_empty() {
            Skin::Tint(Color::random(rng))
        } else {
            let variant = rng.gen_range(0..sheet_frames.len());
            Skin::Sheet { variant, animator: Animator::new(sheet_frames[variant]) }
        };
        let actor = Actor::new(position, speed, plan.radius, skin, (i + 1).to_string())
            .expect("sampled speed is inside the valid range");
        actors.push(actor);
    }
    actors
}

fn place_clear(existing: &[Actor], bounds: Vec2, buffer: f32, rng: &mut impl Rng) -> Vec2 {
    let mut candidate = random_position(bounds, rng);
    let mut attempts = 0u32;
    while existing.iter().any(|a| a.contains(candidate, buffer)) {
        attempts += 1;
        if attempts >= MAX_PLACEMENT_ATTEMPTS {
            log::warn!(
                "no clear spawn spot after {MAX_PLACEMENT_ATTEMPTS} attempts; placing anyway"
            );
            break;
        }
        candidate = random_position(bounds, rng);
    }
    candidate
}

/// Integer pixel coordinate in `[0, w) × [0, h)`.
fn random_position(bounds: Vec2, rng: &mut impl Rng) -> Vec2 {
    let w = (bounds.x as u32).max(1);
    let h = (bounds.y as u32).max(1);
    Vec2::new(rng.gen_range(0..w) as f32, rng.gen_range(0..h) as f32)
}
