use glam::Vec2;
use rand::Rng;

// ── Color ──────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const WHITE: Self = Self([1.0, 1.0, 1.0, 1.0]);
    pub const BLACK: Self = Self([0.0, 0.0, 0.0, 1.0]);
    pub const GRAY: Self = Self([0.6, 0.6, 0.6, 1.0]);
    pub const RED: Self = Self([1.0, 0.0, 0.0, 1.0]);
    pub const GREEN: Self = Self([0.0, 1.0, 0.0, 1.0]);
    pub const BLUE: Self = Self([0.0, 0.0, 1.0, 1.0]);

    /// Random opaque tint. Channels start at 0.15 so an actor never
    /// disappears into a black background.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self([
            rng.gen_range(0.15..=1.0),
            rng.gen_range(0.15..=1.0),
            rng.gen_range(0.15..=1.0),
            1.0,
        ])
    }
}

// ── Draw commands ───────────────────────────────────────────────────────────

/// One queued draw call. The scene emits these; the renderer turns them into
/// vertices at the end of the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Filled circle at `center` in window pixels.
    Circle { center: Vec2, radius: f32, color: Color },
    /// Current frame of sheet variant `variant`, centered on `center`.
    Frame { center: Vec2, variant: usize, frame: usize },
}

/// Per-frame draw-command collector. Submission order is draw order:
/// whatever is pushed last lands on top.
#[derive(Debug)]
pub struct Canvas {
    clear_color: Color,
    commands: Vec<DrawCommand>,
}

impl Canvas {
    pub fn new() -> Self {
        Self { clear_color: Color::BLACK, commands: Vec::new() }
    }

    /// Reset for a new frame. Keeps the allocation.
    pub fn begin(&mut self) {
        self.commands.clear();
        self.clear_color = Color::BLACK;
    }

    /// Set the background color the frame is cleared to.
    pub fn clear(&mut self, color: Color) {
        self.clear_color = color;
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle { center, radius, color });
    }

    pub fn frame(&mut self, center: Vec2, variant: usize, frame: usize) {
        self.commands.push(DrawCommand::Frame { center, variant, frame });
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}
