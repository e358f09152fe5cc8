//! Driver-owned simulation parameters and the control actions that mutate them.
//!
//! The window runner (or any other host) keeps a [`SimParams`], applies
//! [`Action`]s to it in response to input, and hands a [`StepParams`] view to
//! [`crate::Starfield::step`] once per frame. All clamping happens here, so the
//! simulation core only ever sees well-formed values.

use crate::config::StarfieldConfig;

/// Which way the viewer is looking along the travel axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    /// Stars approach (depth shrinks).
    #[default]
    Forward,
    /// Stars recede (depth grows).
    Backward,
}

impl Facing {
    /// The opposite heading.
    pub fn turned(self) -> Self {
        match self {
            Facing::Forward => Facing::Backward,
            Facing::Backward => Facing::Forward,
        }
    }

    pub fn is_forward(self) -> bool {
        self == Facing::Forward
    }

    /// HUD label: `"Front"` or `"Back"`.
    pub fn label(self) -> &'static str {
        match self {
            Facing::Forward => "Front",
            Facing::Backward => "Back",
        }
    }
}

/// Per-frame inputs to the simulation core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepParams {
    /// Travel speed, `0..=max_speed`.
    pub speed: f32,
    pub facing: Facing,
    /// Speed at which relativistic effects start.
    pub light_threshold: f32,
    pub max_speed: f32,
}

impl StepParams {
    /// Whether relativistic effects apply at this speed.
    #[inline]
    pub fn is_relativistic(&self) -> bool {
        self.speed >= self.light_threshold
    }

    /// How far past the threshold we are, `0.0` at the threshold and `1.0` at
    /// `max_speed`.
    pub fn velocity_ratio(&self) -> f32 {
        let span = self.max_speed - self.light_threshold;
        if span <= 0.0 {
            return 1.0;
        }
        ((self.speed - self.light_threshold) / span).clamp(0.0, 1.0)
    }

    /// Factor applied to star offsets by the cone-of-vision distortion.
    #[inline]
    pub fn cone_factor(&self) -> f32 {
        1.0 - self.velocity_ratio() * 0.8
    }
}

/// A user-initiated change to the simulation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SpeedUp,
    SlowDown,
    /// Add stars (reseeds the field).
    MoreStars,
    /// Remove stars, never below the configured minimum (reseeds the field).
    FewerStars,
    TurnAround,
    /// Stop, face forward and reseed.
    Reset,
    /// Save the current frame as a PNG.
    Snapshot,
    Quit,
}

/// What the host must do after an action has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Nothing beyond picking up the new parameters next frame.
    None,
    /// The star collection must be rebuilt.
    Reseed,
    /// The host should save a snapshot.
    Snapshot,
    /// The host should shut down.
    Quit,
}

/// Mutable simulation parameters owned by the driver.
#[derive(Debug, Clone, PartialEq)]
pub struct SimParams {
    speed: f32,
    facing: Facing,
    density: usize,
    max_speed: f32,
    light_threshold: f32,
    speed_step: f32,
    density_step: usize,
    min_density: usize,
}

impl SimParams {
    /// Parameters at rest, facing forward, at the configured initial density.
    pub fn new(config: &StarfieldConfig) -> Self {
        Self {
            speed: 0.0,
            facing: Facing::Forward,
            density: config.initial_density.max(config.min_density),
            max_speed: config.max_speed,
            light_threshold: config.light_threshold,
            speed_step: config.speed_step,
            density_step: config.density_step,
            min_density: config.min_density,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Number of stars the field should hold.
    pub fn density(&self) -> usize {
        self.density
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    pub fn light_threshold(&self) -> f32 {
        self.light_threshold
    }

    /// Set speed directly, clamped to `[0, max_speed]`.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.clamp(0.0, self.max_speed);
    }

    /// Set the facing directly.
    pub fn set_facing(&mut self, facing: Facing) {
        self.facing = facing;
    }

    /// Snapshot for the next frame.
    pub fn step_params(&self) -> StepParams {
        StepParams {
            speed: self.speed,
            facing: self.facing,
            light_threshold: self.light_threshold,
            max_speed: self.max_speed,
        }
    }

    /// Apply an action and report what the host must do about it.
    pub fn apply(&mut self, action: Action) -> Effect {
        match action {
            Action::SpeedUp => {
                if self.speed < self.max_speed {
                    self.set_speed(self.speed + self.speed_step);
                }
                Effect::None
            }
            Action::SlowDown => {
                if self.speed > 0.0 {
                    self.set_speed(self.speed - self.speed_step);
                }
                Effect::None
            }
            Action::MoreStars => {
                self.density += self.density_step;
                Effect::Reseed
            }
            Action::FewerStars => {
                // Only shrink while strictly above the floor; at the floor the
                // field is left untouched.
                if self.density > self.min_density {
                    self.density = self
                        .density
                        .saturating_sub(self.density_step)
                        .max(self.min_density);
                    Effect::Reseed
                } else {
                    Effect::None
                }
            }
            Action::TurnAround => {
                self.facing = self.facing.turned();
                Effect::None
            }
            Action::Reset => {
                self.speed = 0.0;
                self.facing = Facing::Forward;
                Effect::Reseed
            }
            Action::Snapshot => Effect::Snapshot,
            Action::Quit => Effect::Quit,
        }
    }

    /// Whole percent of max speed, rounded down.
    pub fn speed_percent(&self) -> u32 {
        if self.max_speed <= 0.0 {
            return 0;
        }
        ((self.speed / self.max_speed) * 100.0).floor() as u32
    }

    /// HUD speed text, e.g. `"42% Speed of Light"`.
    pub fn speed_text(&self) -> String {
        format!("{}% Speed of Light", self.speed_percent())
    }

    /// HUD direction text, `"Front"` or `"Back"`.
    pub fn direction_text(&self) -> &'static str {
        self.facing.label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SimParams {
        SimParams::new(&StarfieldConfig::default())
    }

    #[test]
    fn test_defaults() {
        let p = params();
        assert_eq!(p.speed(), 0.0);
        assert_eq!(p.facing(), Facing::Forward);
        assert_eq!(p.density(), 500);
        assert_eq!(p.max_speed(), 100.0);
        assert_eq!(p.light_threshold(), 80.0);
    }

    #[test]
    fn test_speed_clamps_at_zero() {
        let mut p = params();
        assert_eq!(p.apply(Action::SlowDown), Effect::None);
        assert_eq!(p.speed(), 0.0);
    }

    #[test]
    fn test_speed_clamps_at_max() {
        let mut p = params();
        for _ in 0..150 {
            p.apply(Action::SpeedUp);
        }
        assert_eq!(p.speed(), 100.0);
        assert_eq!(p.speed_text(), "100% Speed of Light");
    }

    #[test]
    fn test_density_steps_and_floor() {
        let mut p = params();
        assert_eq!(p.apply(Action::FewerStars), Effect::Reseed);
        assert_eq!(p.density(), 400);
        for _ in 0..10 {
            p.apply(Action::FewerStars);
        }
        assert_eq!(p.density(), 100);
        assert_eq!(p.apply(Action::FewerStars), Effect::None);
        assert_eq!(p.density(), 100);

        assert_eq!(p.apply(Action::MoreStars), Effect::Reseed);
        assert_eq!(p.density(), 200);
    }

    #[test]
    fn test_turn_around_toggles() {
        let mut p = params();
        p.apply(Action::TurnAround);
        assert_eq!(p.direction_text(), "Back");
        p.apply(Action::TurnAround);
        assert_eq!(p.direction_text(), "Front");
    }

    #[test]
    fn test_reset_keeps_density() {
        let mut p = params();
        p.apply(Action::MoreStars);
        p.set_speed(90.0);
        p.apply(Action::TurnAround);

        assert_eq!(p.apply(Action::Reset), Effect::Reseed);
        assert_eq!(p.speed(), 0.0);
        assert_eq!(p.facing(), Facing::Forward);
        assert_eq!(p.density(), 600);
    }

    #[test]
    fn test_speed_text_floors() {
        let mut p = params();
        p.set_speed(42.9);
        assert_eq!(p.speed_text(), "42% Speed of Light");
        p.set_speed(0.0);
        assert_eq!(p.speed_text(), "0% Speed of Light");
    }

    #[test]
    fn test_velocity_ratio_and_cone() {
        let step = StepParams {
            speed: 100.0,
            facing: Facing::Forward,
            light_threshold: 80.0,
            max_speed: 100.0,
        };
        assert!(step.is_relativistic());
        assert_eq!(step.velocity_ratio(), 1.0);
        assert!((step.cone_factor() - 0.2).abs() < 1e-6);

        let half = StepParams { speed: 90.0, ..step };
        assert_eq!(half.velocity_ratio(), 0.5);
        assert!((half.cone_factor() - 0.6).abs() < 1e-6);

        let below = StepParams { speed: 79.0, ..step };
        assert!(!below.is_relativistic());
    }

    #[test]
    fn test_snapshot_and_quit_are_passed_through() {
        let mut p = params();
        let before = p.clone();
        assert_eq!(p.apply(Action::Snapshot), Effect::Snapshot);
        assert_eq!(p.apply(Action::Quit), Effect::Quit);
        assert_eq!(p, before);
    }
}
