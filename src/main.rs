use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use scene_viewer::cli::Cli;
use scene_viewer::core::clock::Clock;
use scene_viewer::core::input_adapter::WinitController;
use scene_viewer::loaders::manifest::Manifest;
use scene_viewer::renderer::Renderer;
use scene_viewer::scene::Scene;
use scene_viewer::traits::camera::MoveDirection;
use scene_viewer::traits::controller::{Button, Controller};

const TITLE_UPDATE_INTERVAL: f32 = 1.0;

struct App {
    cli: Cli,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    scene: Option<Scene>,
    clock: Clock,
    controller: WinitController,
    title_timer: f32,
}

impl App {
    fn new(cli: Cli) -> Self {
        Self {
            cli,
            window: None,
            renderer: None,
            scene: None,
            clock: Clock::new(),
            controller: WinitController::new(),
            title_timer: 0.0,
        }
    }

    /// One frame: input mutations first, then the scene tick, then the
    /// render pass reads the matrices
    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let delta = self.clock.tick();

        let Some(scene) = self.scene.as_mut() else {
            return;
        };

        if self.controller.is_down(Button::KeyW) {
            scene.move_camera(MoveDirection::Forward, delta);
        }
        if self.controller.is_down(Button::KeyS) {
            scene.move_camera(MoveDirection::Backward, delta);
        }
        if self.controller.is_down(Button::KeyA) {
            scene.move_camera(MoveDirection::Left, delta);
        }
        if self.controller.is_down(Button::KeyD) {
            scene.move_camera(MoveDirection::Right, delta);
        }

        if self.controller.is_down(Button::MouseLeft) {
            let (dx, dy) = self.controller.mouse_delta();
            if dx != 0.0 || dy != 0.0 {
                scene.rotate_camera(dx, dy);
            }
        }

        // scroll up zooms in (factor < 1), scroll down zooms out
        let scroll = self.controller.scroll_delta();
        if scroll != 0.0 {
            scene.zoom_camera(0.9f32.powf(scroll));
        }

        scene.update(delta);

        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            match renderer.render(scene) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let size = window.inner_size();
                    renderer.resize(size.width, size.height);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("surface out of memory, exiting");
                    event_loop.exit();
                }
                Err(e) => log::warn!("render error: {}", e),
            }
        }

        self.controller.reset_deltas();

        self.title_timer += delta;
        if self.title_timer >= TITLE_UPDATE_INTERVAL {
            if let Some(window) = &self.window {
                window.set_title(&format!(
                    "Scene Viewer [{}] - avg fps: {:.0}, spf: {:.4}",
                    scene.active_camera_name(),
                    self.clock.average_fps(),
                    self.clock.average_spf(),
                ));
            }
            self.title_timer = 0.0;
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title("Scene Viewer")
                .with_inner_size(winit::dpi::LogicalSize::new(self.cli.width, self.cli.height)),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let scene = match load_scene(&self.cli) {
            Ok(scene) => scene,
            Err(e) => {
                log::error!("failed to load scene: {:#}", e);
                event_loop.exit();
                return;
            }
        };

        let renderer = match pollster::block_on(Renderer::new(window.clone(), &scene)) {
            Ok(renderer) => renderer,
            Err(e) => {
                log::error!("failed to initialize renderer: {:#}", e);
                event_loop.exit();
                return;
            }
        };

        self.window = Some(window);
        self.scene = Some(scene);
        self.renderer = Some(renderer);
        self.clock.reset();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        self.controller.process_event(&event);

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::KeyK),
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if let Some(scene) = self.scene.as_mut() {
                    if let Err(e) = scene.cycle_camera() {
                        log::warn!("camera switch failed: {:#}", e);
                    }
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size.width, size.height);
                }
                if let Some(scene) = self.scene.as_mut() {
                    scene.set_aspect(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.frame(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn load_scene(cli: &Cli) -> Result<Scene> {
    let manifest = Manifest::load_or_default(&cli.manifest)?;
    log::info!(
        "scene: {} cameras, {} lights, {} models",
        manifest.cameras.len(),
        manifest.lights.len(),
        manifest.models.len()
    );
    Scene::new(manifest, cli.camera, cli.width, cli.height)
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli);

    println!("Scene Viewer - Controls: drag to orbit/look, scroll to zoom, WASD to move, K to switch camera, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
