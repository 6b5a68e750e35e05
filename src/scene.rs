use glam::Vec2;
use rand::rngs::SmallRng;

use crate::actor::{Actor, Skin};
use crate::canvas::{Canvas, Color};
use crate::input::{KeyCode, SceneEvent};
use crate::motion::MotionPolicy;
use crate::spawn::{self, SpawnPlan};

/// A one-shot sound request. Scenes emit cues; the app layer decides what
/// they sound like (or drops them when no audio is configured).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Target acquired — the swarm converges on it.
    Converge,
    /// Target cleared — everyone heads home.
    Disperse,
}

/// Which keys end the scene. `EscapeOnly` is the base behavior; `AnyKey`
/// turns the scene into a press-any-key-to-exit screen (keys with a
/// dedicated binding, like reset, are still handled first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitPolicy {
    EscapeOnly,
    AnyKey,
}

/// One screenful of interactive state, driven by the app loop:
/// every frame drains events through `process_event`, then calls `update`
/// with the measured frame time, then `draw`. A scene that reports
/// `is_valid() == false` is finished — the loop stops for good.
pub trait Scene {
    /// React to one input event. May emit a sound cue for the driver.
    fn process_event(&mut self, event: &SceneEvent) -> Option<Cue>;

    /// Advance scene state by `dt_ms` milliseconds of real frame time.
    fn update(&mut self, dt_ms: f32);

    /// Queue this frame's draw commands.
    fn draw(&self, canvas: &mut Canvas);

    /// False once the scene has been invalidated. Terminal.
    fn is_valid(&self) -> bool;

    /// Name of a loaded looping track to start with the scene, if any.
    fn soundtrack(&self) -> Option<&str> {
        None
    }
}

// ── MoveScene ───────────────────────────────────────────────────────────────

pub struct MoveSceneConfig {
    /// Surface size in pixels; actors spawn and roam inside it.
    pub bounds: Vec2,
    pub plan: SpawnPlan,
    pub policy: MotionPolicy,
    /// Frame count per loaded sheet variant; empty means tinted circles.
    pub sheet_frames: Vec<usize>,
    pub exit_policy: ExitPolicy,
    pub background: Color,
    pub soundtrack: Option<String>,
}

impl Default for MoveSceneConfig {
    fn default() -> Self {
        Self {
            bounds: Vec2::new(800.0, 600.0),
            plan: SpawnPlan::default(),
            policy: MotionPolicy::default(),
            sheet_frames: Vec::new(),
            exit_policy: ExitPolicy::AnyKey,
            background: Color::BLACK,
            soundtrack: None,
        }
    }
}

/// The demo scene: a swarm of circles that idles homeward until a click
/// gives it a target, and scatters home again on the next click.
pub struct MoveScene {
    actors: Vec<Actor>,
    target: Option<Vec2>,
    valid: bool,
    policy: MotionPolicy,
    plan: SpawnPlan,
    bounds: Vec2,
    sheet_frames: Vec<usize>,
    exit_policy: ExitPolicy,
    background: Color,
    soundtrack: Option<String>,
    rng: SmallRng,
}

impl MoveScene {
    pub fn new(config: MoveSceneConfig, mut rng: SmallRng) -> Self {
        let actors = spawn::scatter(&config.plan, config.bounds, &config.sheet_frames, &mut rng);
        Self {
            actors,
            target: None,
            valid: true,
            policy: config.policy,
            plan: config.plan,
            bounds: config.bounds,
            sheet_frames: config.sheet_frames,
            exit_policy: config.exit_policy,
            background: config.background,
            soundtrack: config.soundtrack,
            rng,
        }
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn target(&self) -> Option<Vec2> {
        self.target
    }

    /// Throw every actor away and scatter a fresh set; the target is cleared
    /// too, so the new swarm starts out heading nowhere.
    pub fn reset(&mut self) {
        log::info!("reset: respawning {} actors", self.plan.count);
        self.target = None;
        self.actors = spawn::scatter(&self.plan, self.bounds, &self.sheet_frames, &mut self.rng);
    }

    fn toggle_target(&mut self, point: Vec2) -> Cue {
        match self.target.take() {
            Some(_) => {
                log::info!("going home");
                Cue::Disperse
            }
            None => {
                log::info!("target acquired at ({:.0}, {:.0})", point.x, point.y);
                self.target = Some(point);
                Cue::Converge
            }
        }
    }

    fn invalidate(&mut self, why: &str) {
        log::info!("{why}, leaving scene");
        self.valid = false;
    }
}

impl Scene for MoveScene {
    fn process_event(&mut self, event: &SceneEvent) -> Option<Cue> {
        // Invalidated is terminal; late-arriving events must not revive or
        // mutate the scene.
        if !self.valid {
            return None;
        }
        match *event {
            SceneEvent::Quit => {
                self.invalidate("quit requested");
                None
            }
            SceneEvent::PointerDown(point) => Some(self.toggle_target(point)),
            SceneEvent::KeyDown(KeyCode::KeyR) => {
                self.reset();
                None
            }
            SceneEvent::KeyDown(KeyCode::Escape) => {
                self.invalidate("escape pressed");
                None
            }
            SceneEvent::KeyDown(_) => {
                if self.exit_policy == ExitPolicy::AnyKey {
                    self.invalidate("key pressed");
                }
                None
            }
        }
    }

    fn update(&mut self, dt_ms: f32) {
        if !self.valid {
            return;
        }
        let target = self.target;
        let policy = self.policy;
        for actor in &mut self.actors {
            policy.step(actor, target, dt_ms);
            // Frame cycling runs on the same clock but is otherwise
            // independent of motion.
            if let Skin::Sheet { animator, .. } = &mut actor.skin {
                animator.tick(dt_ms);
            }
        }
    }

    fn draw(&self, canvas: &mut Canvas) {
        canvas.clear(self.background);
        // Spawn order is draw order; later actors land on top.
        for actor in &self.actors {
            match &actor.skin {
                Skin::Tint(color) => canvas.circle(actor.position(), actor.radius(), *color),
                Skin::Sheet { variant, animator } => {
                    canvas.frame(actor.position(), *variant, animator.frame_index());
                }
            }
        }
    }

    fn is_valid(&self) -> bool {
        self.valid
    }

    fn soundtrack(&self) -> Option<&str> {
        self.soundtrack.as_deref()
    }
}
