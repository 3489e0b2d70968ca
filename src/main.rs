use std::sync::Arc;

use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use plane_sketch::cli::Cli;
use plane_sketch::renderer::SketchRenderer;
use plane_sketch::viewport::Viewport;
use plane_sketch::window::WindowPaint;
use plane_sketch::Sketch;

const FPS_UPDATE_INTERVAL: f32 = 1.0;

struct App {
    cli: Cli,
    window: Option<Arc<Window>>,
    renderer: Option<SketchRenderer>,
    sketch: Option<Sketch>,
    frame_count: u32,
    fps: f32,
    fps_update_timer: f32,
}

impl App {
    fn new(cli: Cli) -> Self {
        Self {
            cli,
            window: None,
            renderer: None,
            sketch: None,
            frame_count: 0,
            fps: 0.0,
            fps_update_timer: 0.0,
        }
    }

    fn update_fps(&mut self, delta: f32) {
        self.frame_count += 1;
        self.fps_update_timer += delta;

        if self.fps_update_timer >= FPS_UPDATE_INTERVAL {
            self.fps = self.frame_count as f32 / self.fps_update_timer;
            log::debug!("fps: {:.1}", self.fps);
            self.frame_count = 0;
            self.fps_update_timer = 0.0;
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window = match event_loop.create_window(
                Window::default_attributes()
                    .with_title("Plane Sketch")
                    .with_transparent(true)
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        self.cli.width,
                        self.cli.height,
                    )),
            ) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let viewport = Viewport::new(
                self.cli.width as f64,
                self.cli.height as f64,
                window.scale_factor(),
            );
            let sketch = Sketch::new(viewport);

            let renderer = match pollster::block_on(SketchRenderer::new(
                window.clone(),
                &sketch.viewport,
                &sketch.plane,
            )) {
                Ok(r) => r,
                Err(e) => {
                    log::error!("failed to initialize renderer: {:#}", e);
                    event_loop.exit();
                    return;
                }
            };

            self.window = Some(window);
            self.renderer = Some(renderer);
            self.sketch = Some(sketch);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui see the event first. Button releases still reach the
        // controls even when egui consumes them, so a drag started over the
        // scene cannot stay stuck after the cursor releases over the panel.
        if !self.cli.no_ui {
            if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
                if renderer.handle_event(window, &event) {
                    if let WindowEvent::MouseInput {
                        state: state @ ElementState::Released,
                        button,
                        ..
                    } = event
                    {
                        if let Some(sketch) = &mut self.sketch {
                            sketch.controls.process_mouse_button(button, state);
                        }
                    }
                    return;
                }
            }
        }

        let (Some(window), Some(renderer), Some(sketch)) =
            (&self.window, &mut self.renderer, &mut self.sketch)
        else {
            return;
        };

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
            WindowEvent::Resized(size) => {
                let logical: winit::dpi::LogicalSize<f64> = size.to_logical(window.scale_factor());
                sketch.resize(logical.width, logical.height);
                renderer.resize(&sketch.viewport);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                sketch.set_scale_factor(scale_factor);
                renderer.resize(&sketch.viewport);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                sketch.controls.process_mouse_button(button, state);
            }
            WindowEvent::CursorMoved { position, .. } => {
                sketch.controls.process_cursor_moved(position);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                sketch.controls.process_scroll(delta);
            }
            WindowEvent::RedrawRequested => {
                let mut target =
                    WindowPaint::new(window, renderer, self.fps, !self.cli.no_ui);
                match sketch.tick(&mut target) {
                    Ok(frame) => self.update_fps(frame.delta),
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        renderer.resize(&sketch.viewport);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("render aborted: out of GPU memory");
                        event_loop.exit();
                    }
                    Err(e) => log::warn!("render error: {}", e),
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli);

    log::info!("plane sketch - drag to orbit, scroll to zoom, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
