//! # Warpfield
//!
//! A starfield simulation: point lights streaming out of a vanishing point,
//! with adjustable speed and direction, motion streaks, and Doppler-style
//! color and cone-of-vision effects as speed approaches "light speed".
//!
//! ## Quick Start
//!
//! ```ignore
//! use warpfield::prelude::*;
//!
//! fn main() -> Result<(), SimulationError> {
//!     Simulation::new()
//!         .with_density(800)
//!         .with_seed(42)
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Stars
//!
//! A [`Star`] has an offset from the projection center, a depth `z` in
//! `(0, width)`, and the depth it had last frame. Each frame it moves
//! `0.5 * speed` along the depth axis; when it passes the viewer or the
//! horizon it is reseeded at a fresh random position.
//!
//! ### The Field
//!
//! A [`Starfield`] owns all stars for one viewport. Density changes, resizes
//! and resets rebuild the whole collection. The host calls
//! [`Starfield::step`] once per display refresh with the current
//! [`StepParams`] and a [`Surface`] to draw into.
//!
//! ### Relativistic Effects
//!
//! At or above the lightspeed threshold, stars in the nearer half of the depth
//! range shift toward blue, stars in the farther half shift toward a dim red,
//! and every star's offset is squeezed toward the center. The squeeze
//! compounds frame over frame until the star is reseeded.
//!
//! ### Driving Without a Window
//!
//! ```
//! use warpfield::prelude::*;
//!
//! let config = StarfieldConfig { seed: Some(1), ..Default::default() };
//! let mut params = SimParams::new(&config);
//! let mut field = Starfield::from_config(&config, 320, 240);
//! let mut frame = FrameBuffer::new(320, 240, config.background);
//!
//! params.set_speed(90.0);
//! for _ in 0..10 {
//!     field.step(&params.step_params(), &mut frame);
//! }
//! assert!(frame.lit_pixels() > 0);
//! ```

pub mod config;
pub mod controls;
pub mod error;
pub mod field;
mod gpu;
pub mod input;
pub mod particle;
mod simulation;
pub mod surface;
pub mod time;
pub mod visuals;
mod window;

pub use config::StarfieldConfig;
pub use controls::{Action, Effect, Facing, SimParams, StepParams};
pub use error::{ConfigError, GpuError, SimulationError, SnapshotError};
pub use field::Starfield;
pub use glam::Vec2;
pub use particle::{Projection, Star, Viewport};
pub use simulation::Simulation;
pub use surface::{FrameBuffer, Surface};
pub use visuals::{Color, StarPalette};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use warpfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::StarfieldConfig;
    pub use crate::controls::{Action, Effect, Facing, SimParams, StepParams};
    pub use crate::error::SimulationError;
    pub use crate::field::Starfield;
    pub use crate::input::{KeyCode, Keymap};
    pub use crate::particle::{Star, Viewport};
    pub use crate::simulation::Simulation;
    pub use crate::surface::{FrameBuffer, Surface};
    pub use crate::time::FrameClock;
    pub use crate::visuals::{Color, StarPalette};
    pub use crate::Vec2;
}
