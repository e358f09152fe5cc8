//! The winit application that hosts the starfield.
//!
//! Each redraw runs exactly one simulation step into the CPU frame buffer,
//! presents it, and requests the next redraw. Key presses mutate
//! [`SimParams`] between frames.

use std::path::PathBuf;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

use crate::config::StarfieldConfig;
use crate::controls::{Action, Effect, SimParams};
use crate::error::SimulationError;
use crate::field::Starfield;
use crate::gpu::Presenter;
use crate::input::Keymap;
use crate::surface::FrameBuffer;
use crate::time::FrameClock;

/// Everything that only exists once the window is up.
struct Scene {
    window: Arc<Window>,
    presenter: Presenter,
    field: Starfield,
    frame: FrameBuffer,
}

pub(crate) struct App {
    config: StarfieldConfig,
    keymap: Keymap,
    params: SimParams,
    clock: FrameClock,
    scene: Option<Scene>,
    snapshot_count: u32,
    error: Option<SimulationError>,
}

impl App {
    pub(crate) fn new(config: StarfieldConfig, keymap: Keymap) -> Self {
        let params = SimParams::new(&config);
        Self {
            config,
            keymap,
            params,
            clock: FrameClock::new(),
            scene: None,
            snapshot_count: 0,
            error: None,
        }
    }

    /// The error that stopped the event loop, if any.
    pub(crate) fn take_error(&mut self) -> Option<SimulationError> {
        self.error.take()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: SimulationError) {
        log::error!("{}", err);
        self.error = Some(err);
        event_loop.exit();
    }

    fn create_scene(&self, event_loop: &ActiveEventLoop) -> Result<Scene, SimulationError> {
        let window_attrs = Window::default_attributes()
            .with_title("Warpfield")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let presenter = pollster::block_on(Presenter::new(window.clone()))?;
        let (width, height) = presenter.size();

        let field = Starfield::from_config(&self.config, width, height);
        let frame = FrameBuffer::new(width, height, self.config.background);
        log::info!("Started with {} stars at {}x{}", field.len(), width, height);

        Ok(Scene {
            window,
            presenter,
            field,
            frame,
        })
    }

    fn handle_action(&mut self, event_loop: &ActiveEventLoop, action: Action) {
        log::debug!("Action: {:?}", action);
        match self.params.apply(action) {
            Effect::None => {}
            Effect::Reseed => {
                if let Some(scene) = &mut self.scene {
                    scene.field.set_density(self.params.density());
                }
            }
            Effect::Snapshot => self.save_snapshot(),
            Effect::Quit => event_loop.exit(),
        }
        self.update_title();
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        let Some(scene) = &mut self.scene else {
            return;
        };
        if size.width == 0 || size.height == 0 {
            return;
        }
        scene.presenter.resize(size.width, size.height);
        scene.frame.resize(size.width, size.height);
        scene.field.resize(size.width, size.height);
        log::debug!("Resized to {}x{}", size.width, size.height);
    }

    fn save_snapshot(&mut self) {
        let Some(scene) = &self.scene else {
            return;
        };
        self.snapshot_count += 1;
        let path = PathBuf::from(&self.config.snapshot_dir)
            .join(format!("warpfield-{:04}.png", self.snapshot_count));
        match scene.frame.save_png(&path) {
            Ok(()) => log::info!("Saved snapshot to {}", path.display()),
            Err(e) => log::warn!("{}", e),
        }
    }

    fn update_title(&self) {
        if let Some(scene) = &self.scene {
            scene.window.set_title(&format!(
                "Warpfield - {} - {} - {} stars",
                self.params.speed_text(),
                self.params.direction_text(),
                scene.field.len()
            ));
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(scene) = &mut self.scene else {
            return;
        };

        scene.field.step(&self.params.step_params(), &mut scene.frame);

        match scene.presenter.present(&scene.frame) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                scene.presenter.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }

        if self.clock.tick() {
            log::debug!("FPS: {:.1}", self.clock.fps());
        }

        scene.window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.scene.is_some() {
            return;
        }
        match self.create_scene(event_loop) {
            Ok(scene) => {
                scene.window.request_redraw();
                self.scene = Some(scene);
                self.update_title();
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                self.resize(physical_size);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(action) = self.keymap.action_for_event(&event) {
                    self.handle_action(event_loop, action);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }
}
