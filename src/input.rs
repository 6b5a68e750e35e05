use std::collections::VecDeque;

use glam::Vec2;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::PhysicalKey;
pub use winit::keyboard::KeyCode;

/// The discrete events a scene reacts to. Everything else the window system
/// produces (cursor motion, releases, focus churn) is folded away before the
/// scene sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneEvent {
    Quit,
    KeyDown(KeyCode),
    /// Any mouse button pressed, with the cursor position at that moment in
    /// window pixels.
    PointerDown(Vec2),
}

/// Collects winit window events into a per-frame queue of [`SceneEvent`]s.
///
/// The queue remembers the last cursor position so a button press can be
/// stamped with where it happened — winit reports motion and clicks as
/// separate events.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<SceneEvent>,
    cursor: Vec2,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.events.push_back(SceneEvent::Quit);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput { state: ElementState::Pressed, .. } => {
                self.events.push_back(SceneEvent::PointerDown(self.cursor));
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.events.push_back(SceneEvent::KeyDown(*code));
            }
            _ => {}
        }
    }

    /// Drain every event queued since the last frame, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = SceneEvent> + '_ {
        self.events.drain(..)
    }

    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }
}
