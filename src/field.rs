//! The star collection and its per-frame driver.
//!
//! A [`Starfield`] owns every [`Star`] exclusively, along with the viewport
//! they are bound to and the RNG that seeds them. Anything that invalidates the
//! stars' depth frame (a resize, a density change, a reset) rebuilds the whole
//! collection rather than patching it.
//!
//! # Example
//!
//! ```
//! use warpfield::{FrameBuffer, Starfield, StarfieldConfig, SimParams, Action};
//!
//! let config = StarfieldConfig { seed: Some(42), ..Default::default() };
//! let mut params = SimParams::new(&config);
//! let mut field = Starfield::from_config(&config, 640, 480);
//! let mut frame = FrameBuffer::new(640, 480, config.background);
//!
//! params.apply(Action::SpeedUp);
//! field.step(&params.step_params(), &mut frame);
//! assert_eq!(field.len(), 500);
//! ```

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::StarfieldConfig;
use crate::controls::StepParams;
use crate::particle::{Star, Viewport};
use crate::surface::Surface;

/// A field of stars bound to one viewport.
#[derive(Debug, Clone)]
pub struct Starfield {
    stars: Vec<Star>,
    viewport: Viewport,
    rng: SmallRng,
}

impl Starfield {
    /// Build `count` freshly seeded stars for a `width` x `height` viewport.
    pub fn seed(width: u32, height: u32, count: usize, rng: SmallRng) -> Self {
        let mut field = Self {
            stars: Vec::new(),
            viewport: Viewport::new(width, height),
            rng,
        };
        field.reseed(width, height, count);
        field
    }

    /// Build from config: initial density, and the configured seed if any.
    pub fn from_config(config: &StarfieldConfig, width: u32, height: u32) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self::seed(width, height, config.initial_density.max(config.min_density), rng)
    }

    /// Replace every star with `count` fresh ones bound to new dimensions.
    pub fn reseed(&mut self, width: u32, height: u32, count: usize) {
        self.viewport = Viewport::new(width, height);
        let viewport = self.viewport;
        let rng = &mut self.rng;
        self.stars = (0..count).map(|_| Star::new(viewport, rng)).collect();
        log::debug!(
            "Seeded {} stars for {}x{} viewport",
            count,
            viewport.width,
            viewport.height
        );
    }

    /// Reseed at new dimensions, keeping the star count.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.reseed(width, height, self.stars.len());
    }

    /// Reseed with a new star count, keeping the dimensions.
    pub fn set_density(&mut self, count: usize) {
        let (width, height) = self.dimensions();
        self.reseed(width, height, count);
    }

    /// Reseed with the same count and dimensions.
    pub fn reset(&mut self) {
        self.set_density(self.stars.len());
    }

    /// Advance (when moving) and draw every star into `surface`.
    ///
    /// The surface is cleared first. At zero speed nothing moves but every
    /// star is still drawn.
    pub fn step<S: Surface + ?Sized>(&mut self, params: &StepParams, surface: &mut S) {
        surface.clear();
        let moving = params.speed > 0.0;
        for star in &mut self.stars {
            if moving {
                star.advance(params, &mut self.rng);
            }
            star.draw(surface);
        }
    }

    /// Draw every star without advancing.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear();
        for star in &self.stars {
            star.draw(surface);
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Viewport size in whole pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.viewport.width as u32, self.viewport.height as u32)
    }
}
