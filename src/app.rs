use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use crate::audio::{AudioContext, AudioError};
use crate::canvas::Canvas;
use crate::input::{EventQueue, SceneEvent};
use crate::renderer::Renderer;
use crate::scene::{Cue, Scene};
use crate::sheet::SheetSet;

/// Longest frame time fed into the scene, in milliseconds. A stall (window
/// drag, laptop sleep) becomes one slow frame instead of a teleport.
const MAX_FRAME_MS: f32 = 250.0;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error(transparent)]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error(transparent)]
    Audio(#[from] AudioError),
}

/// Entry point for the demo: configure the window and platform services,
/// then hand over a scene to run until it invalidates.
pub struct DemoBuilder {
    title: String,
    width: u32,
    height: u32,
    sheets: Option<SheetSet>,
    audio: Option<AudioContext>,
    soundtrack_volume: f64,
}

impl Default for DemoBuilder {
    fn default() -> Self {
        Self {
            title: "homeward".into(),
            width: 800,
            height: 600,
            sheets: None,
            audio: None,
            soundtrack_volume: 0.5,
        }
    }
}

impl DemoBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_sheets(mut self, sheets: Option<SheetSet>) -> Self {
        self.sheets = sheets;
        self
    }

    /// Audio is optional as a whole: without a context, cues are dropped and
    /// no soundtrack plays. With one, any playback failure is fatal.
    pub fn with_audio(mut self, audio: Option<AudioContext>) -> Self {
        self.audio = audio;
        self
    }

    pub fn with_soundtrack_volume(mut self, volume: f64) -> Self {
        self.soundtrack_volume = volume;
        self
    }

    /// Run the scene to completion. Returns once the scene invalidates (or
    /// immediately with the error that aborted the loop).
    pub fn run(self, scene: Box<dyn Scene>) -> Result<(), DemoError> {
        let event_loop = EventLoop::new()?;
        let mut app = App {
            title: self.title,
            width: self.width,
            height: self.height,
            sheets: self.sheets,
            audio: self.audio,
            soundtrack_volume: self.soundtrack_volume,
            scene,
            renderer: None,
            events: EventQueue::new(),
            canvas: Canvas::new(),
            last_frame: None,
            started: false,
            fatal: None,
        };
        event_loop.run_app(&mut app)?;
        match app.fatal {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

// ── App (winit ApplicationHandler) ──────────────────────────────────────────

struct App {
    title: String,
    width: u32,
    height: u32,
    sheets: Option<SheetSet>,
    audio: Option<AudioContext>,
    soundtrack_volume: f64,
    scene: Box<dyn Scene>,
    renderer: Option<Renderer>,
    events: EventQueue,
    canvas: Canvas,
    last_frame: Option<Instant>,
    started: bool,
    /// Error that forced the loop to exit; surfaced by `DemoBuilder::run`.
    fatal: Option<DemoError>,
}

impl App {
    fn play_cue(&mut self, cue: Cue) -> Result<(), AudioError> {
        let Some(audio) = self.audio.as_mut() else {
            return Ok(());
        };
        let name = match cue {
            Cue::Converge => "converge",
            Cue::Disperse => "disperse",
        };
        audio.play(name)
    }

    fn start_soundtrack(&mut self) -> Result<(), AudioError> {
        let track = self.scene.soundtrack().map(str::to_owned);
        if let (Some(track), Some(audio)) = (track, self.audio.as_mut()) {
            audio.play_music(&track, self.soundtrack_volume)?;
        }
        Ok(())
    }

    fn abort(&mut self, event_loop: &ActiveEventLoop, err: DemoError) {
        self.fatal = Some(err);
        event_loop.exit();
    }

    /// One frame: drain input, update, draw, render.
    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let dt_ms = match self.last_frame {
            Some(prev) => (now.duration_since(prev).as_secs_f32() * 1000.0).min(MAX_FRAME_MS),
            None => 1000.0 / 60.0,
        };
        self.last_frame = Some(now);

        let pending: Vec<SceneEvent> = self.events.drain().collect();
        for event in &pending {
            if let Some(cue) = self.scene.process_event(event) {
                if let Err(e) = self.play_cue(cue) {
                    self.abort(event_loop, e.into());
                    return;
                }
            }
        }

        // Invalidation is terminal: fade the music and stop processing frames.
        if !self.scene.is_valid() {
            if let Some(audio) = self.audio.as_mut() {
                audio.stop_music(0.5);
            }
            event_loop.exit();
            return;
        }

        self.scene.update(dt_ms);

        self.canvas.begin();
        self.scene.draw(&mut self.canvas);

        let renderer = self.renderer.as_mut().expect("frame without renderer");
        match renderer.render(&self.canvas) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost) => {
                let size = renderer.window.inner_size();
                renderer.resize(size);
            }
            Err(e) => log::warn!("render error: {e}"),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }

        let window = Arc::new(
            event_loop
                .create_window(
                    Window::default_attributes()
                        .with_title(&self.title)
                        .with_inner_size(winit::dpi::PhysicalSize::new(self.width, self.height))
                        .with_resizable(false),
                )
                .expect("failed to create window"),
        );
        let renderer = pollster::block_on(Renderer::new(window, self.sheets.as_ref()));
        self.renderer = Some(renderer);

        if !self.started {
            self.started = true;
            if let Err(e) = self.start_soundtrack() {
                self.abort(event_loop, e.into());
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(renderer) = self.renderer.as_ref() {
            renderer.window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if self.renderer.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size);
                }
            }
            WindowEvent::RedrawRequested => self.frame(event_loop),
            other => self.events.push_window_event(&other),
        }
    }
}
