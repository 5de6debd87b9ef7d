//! Wavetank - classic rendering demos around a wave height-field simulator.
//!
//! Pick a demo on the command line (box, hills, shapes, skull, waves),
//! orbit with the left mouse button, zoom with the right.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use wavetank::cli::Args;
use wavetank::params::RenderConfig;
use wavetank::rendering::RenderSystem;
use wavetank::scene::Scene;

/// Tracks which mouse buttons are down and where the cursor last was.
#[derive(Default)]
struct MouseState {
    left_down: bool,
    right_down: bool,
    last_position: Option<PhysicalPosition<f64>>,
}

/// Once-per-second frame statistics, logged rather than drawn.
struct FrameStats {
    frames: u32,
    window_start: Instant,
}

impl FrameStats {
    fn new() -> Self {
        Self {
            frames: 0,
            window_start: Instant::now(),
        }
    }

    fn tick(&mut self) {
        self.frames += 1;
        let elapsed = self.window_start.elapsed().as_secs_f32();
        if elapsed >= 1.0 {
            let fps = self.frames as f32 / elapsed;
            log::debug!("{:.0} fps ({:.2} ms per frame)", fps, 1000.0 / fps);
            self.frames = 0;
            self.window_start = Instant::now();
        }
    }
}

/// Main application state
struct App {
    scene: Scene,
    render_config: RenderConfig,

    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    mouse: MouseState,
    stats: FrameStats,
    last_frame: Instant,
}

impl App {
    fn new(scene: Scene, render_config: RenderConfig) -> Self {
        Self {
            scene,
            render_config,
            window: None,
            render_system: None,
            mouse: MouseState::default(),
            stats: FrameStats::new(),
            last_frame: Instant::now(),
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &winit::event_loop::ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        let window_attributes = Window::default_attributes()
            .with_title(format!("Wavetank - {}", self.scene.label()))
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };

        match pollster::block_on(RenderSystem::new(Arc::clone(&window), &self.scene)) {
            Ok(render_system) => {
                self.render_system = Some(render_system);
                self.window = Some(window);
                self.last_frame = Instant::now();
            }
            Err(err) => {
                log::error!("failed to initialize rendering: {err:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let down = state == ElementState::Pressed;
                match button {
                    MouseButton::Left => self.mouse.left_down = down,
                    MouseButton::Right => self.mouse.right_down = down,
                    _ => {}
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(last) = self.mouse.last_position {
                    let dx = (position.x - last.x) as f32;
                    let dy = (position.y - last.y) as f32;
                    if self.mouse.left_down {
                        self.scene.camera_mut().rotate(dx, dy);
                    } else if self.mouse.right_down {
                        self.scene.camera_mut().zoom(dx, dy);
                    }
                }
                self.mouse.last_position = Some(position);
            }
            WindowEvent::RedrawRequested => {
                self.render_frame(event_loop);
            }
            _ => {}
        }
    }
}

impl App {
    /// Advance the scene and render a single frame.
    fn render_frame(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        let Some(render_system) = &self.render_system else {
            return;
        };

        let now = Instant::now();
        let delta_time = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        // Simulation and disturbance strictly before the vertex upload.
        self.scene.update(delta_time);
        if let Some((base_vertex, vertices)) = self.scene.dynamic_vertices() {
            render_system.update_vertices(base_vertex, vertices);
        }

        let view_proj = self
            .scene
            .camera()
            .view_proj(render_system.aspect_ratio(), &self.render_config);

        match render_system.render(self.scene.draws(), view_proj) {
            Ok(()) => self.stats.tick(),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                if let (Some(window), Some(render_system)) =
                    (&self.window, &mut self.render_system)
                {
                    let size = window.inner_size();
                    render_system.resize(size.width, size.height);
                }
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("out of GPU memory, exiting");
                event_loop.exit();
            }
            Err(err) => log::warn!("frame dropped: {err:?}"),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let mut render_config = RenderConfig::default();
    render_config.window_width = args.width;
    render_config.window_height = args.height;

    let scene = Scene::build(args.demo, &args)?;
    log::info!("starting {}", scene.label());

    let mut app = App::new(scene, render_config);
    let event_loop = EventLoop::new()?;
    event_loop.run_app(&mut app)?;
    Ok(())
}
