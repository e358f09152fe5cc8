//! Simulation builder and runner

use winit::event_loop::{ControlFlow, EventLoop};

use crate::config::StarfieldConfig;
use crate::controls::Action;
use crate::error::SimulationError;
use crate::input::{KeyCode, Keymap};
use crate::window::App;

/// A windowed starfield builder.
///
/// Use method chaining to configure, then call `.run()` to open the window.
///
/// ```ignore
/// Simulation::new()
///     .with_density(800)
///     .with_seed(42)
///     .with_binding(KeyCode::Space, Action::Snapshot)
///     .run()?;
/// ```
pub struct Simulation {
    config: StarfieldConfig,
    keymap: Keymap,
}

impl Simulation {
    /// Create a simulation with default settings.
    pub fn new() -> Self {
        Self {
            config: StarfieldConfig::default(),
            keymap: Keymap::default(),
        }
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: StarfieldConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the starting number of stars.
    pub fn with_density(mut self, count: usize) -> Self {
        self.config.initial_density = count;
        self
    }

    /// Set the speed at which relativistic effects begin, and the top speed.
    pub fn with_speeds(mut self, light_threshold: f32, max_speed: f32) -> Self {
        self.config.light_threshold = light_threshold;
        self.config.max_speed = max_speed;
        self
    }

    /// Fix the RNG seed for a reproducible star layout.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.config.window_width = width;
        self.config.window_height = height;
        self
    }

    /// Bind a key to an action, replacing the default for that key.
    pub fn with_binding(mut self, key: KeyCode, action: Action) -> Self {
        self.keymap.bind(key, action);
        self
    }

    /// The configuration `run` will use.
    pub fn config(&self) -> &StarfieldConfig {
        &self.config
    }

    /// Validate the configuration, open the window and run until it closes.
    pub fn run(self) -> Result<(), SimulationError> {
        self.config.validate()?;

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self.config, self.keymap);
        event_loop.run_app(&mut app)?;

        match app.take_error() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}
