use glam::Vec2;
use thiserror::Error;

use crate::animation::Animator;
use crate::canvas::Color;

/// Slowest permitted actor, in pixels per millisecond of frame time.
pub const MIN_SPEED: f32 = 0.25;
/// Fastest permitted actor.
pub const MAX_SPEED: f32 = 5.0;

#[derive(Debug, Error, PartialEq)]
pub enum ActorError {
    #[error("actor speed {speed} is outside the allowed range [{MIN_SPEED}, {MAX_SPEED}]")]
    SpeedOutOfRange { speed: f32 },
}

/// How an actor is drawn: a flat tinted circle, or the current frame of an
/// animated sheet variant.
#[derive(Debug, Clone)]
pub enum Skin {
    Tint(Color),
    Sheet { variant: usize, animator: Animator },
}

/// A circular entity with a home position it drifts back to.
#[derive(Debug, Clone)]
pub struct Actor {
    position: Vec2,
    home: Vec2,
    speed: f32,
    radius: f32,
    label: String,
    pub skin: Skin,
}

impl Actor {
    /// Rejects speeds outside `[MIN_SPEED, MAX_SPEED]`. The spawn position
    /// doubles as the home position the actor returns to.
    pub fn new(
        position: Vec2,
        speed: f32,
        radius: f32,
        skin: Skin,
        label: impl Into<String>,
    ) -> Result<Self, ActorError> {
        if !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
            return Err(ActorError::SpeedOutOfRange { speed });
        }
        Ok(Self {
            position,
            home: position,
            speed,
            radius,
            label: label.into(),
            skin,
        })
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn home(&self) -> Vec2 {
        self.home
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Speed used when heading home: slow actors hurry back, fast ones dawdle.
    pub fn inverse_speed(&self) -> f32 {
        MAX_SPEED - self.speed
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Spacing test used at spawn time: true when `point` lies within twice
    /// the padded radius of this actor. Deliberately oversized — all actors
    /// share one radius, so doubling it keeps two freshly spawned circles
    /// from touching. Not a precise hit test.
    pub fn contains(&self, point: Vec2, buffer: f32) -> bool {
        let separation = 2.0 * (self.radius + buffer);
        point.distance(self.position) <= separation
    }

    /// Move straight toward `target`, at most `max_distance`. Snaps exactly
    /// onto `target` when it is already within reach.
    pub fn move_toward(&mut self, target: Vec2, max_distance: f32) {
        let offset = target - self.position;
        let distance = offset.length();
        if distance <= max_distance {
            self.position = target;
        } else {
            self.position += offset * (max_distance / distance);
        }
    }
}
