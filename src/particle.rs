//! A single star: depth-space state, lifecycle, effects and projection.
//!
//! Every star lives in a depth frame centered on the vanishing point. Its
//! lifecycle is `seed -> advance* -> (depth out of range) -> seed -> ...`;
//! leaving the valid depth range is routine and handled by reseeding in place.

use glam::Vec2;
use rand::Rng;

use crate::controls::StepParams;
use crate::surface::Surface;
use crate::visuals::{blue_shift, red_shift, Color, StarPalette};

/// Depth units moved per frame for each unit of speed.
pub const DEPTH_PER_SPEED: f32 = 0.5;

/// Pixel dimensions a star is seeded and projected against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Viewport from pixel dimensions. Zero sizes are bumped to 1.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1) as f32,
            height: height.max(1) as f32,
        }
    }

    /// Projection center.
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * 0.5
    }

    /// Whether `z` is inside the live depth range `(0, width)`.
    #[inline]
    pub fn contains_depth(&self, z: f32) -> bool {
        z > 0.0 && z < self.width
    }

    /// Project a depth-space offset at depth `z` to screen coordinates.
    #[inline]
    pub fn project(&self, offset: Vec2, z: f32) -> Vec2 {
        let half = self.center();
        offset / z * half + half
    }
}

/// Screen-space result of projecting a star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Where the star is this frame.
    pub head: Vec2,
    /// Where it was last frame; equal to `head` right after a reseed.
    pub tail: Vec2,
}

/// One point light in the field.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    /// Offset from the projection center.
    pub offset: Vec2,
    /// Depth, `0 < z < viewport.width` while alive.
    pub z: f32,
    /// Depth at the previous step, for the trail.
    pub prev_z: f32,
    pub color: Color,
    pub alpha: f32,
    viewport: Viewport,
}

impl Star {
    /// A freshly seeded star bound to `viewport`.
    pub fn new<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Self {
        let mut star = Self {
            offset: Vec2::ZERO,
            z: 1.0,
            prev_z: 1.0,
            color: StarPalette::White.color(),
            alpha: 1.0,
            viewport,
        };
        star.seed(rng);
        star
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Replace all state with a uniformly random position, depth and palette
    /// color. The trail collapses to zero length.
    pub fn seed<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let Viewport { width, height } = self.viewport;
        self.offset = Vec2::new(
            rng.gen_range(-width / 2.0..width / 2.0),
            rng.gen_range(-height / 2.0..height / 2.0),
        );
        self.z = random_depth(width, rng);
        self.prev_z = self.z;
        self.color = StarPalette::random_color(rng);
        self.alpha = 1.0;
    }

    /// Advance one frame.
    ///
    /// Records the current depth for the trail, moves `0.5 * speed` toward
    /// (facing forward) or away from the viewer, reseeds if the depth leaves
    /// `(0, width)`, then applies relativistic effects at or above the
    /// lightspeed threshold.
    pub fn advance<R: Rng + ?Sized>(&mut self, params: &StepParams, rng: &mut R) {
        self.prev_z = self.z;

        if params.speed > 0.0 {
            let dz = params.speed * DEPTH_PER_SPEED;
            if params.facing.is_forward() {
                self.z -= dz;
            } else {
                self.z += dz;
            }
        }

        if !self.viewport.contains_depth(self.z) {
            self.seed(rng);
        }

        if params.is_relativistic() {
            self.apply_relativistic_effects(params);
        }
    }

    /// Doppler color shift plus cone-of-vision squeeze.
    ///
    /// The squeeze multiplies the stored offset, so it compounds every frame
    /// the speed stays at or above the threshold. Only a reseed undoes it.
    pub fn apply_relativistic_effects(&mut self, params: &StepParams) {
        let ratio = params.velocity_ratio();

        self.color = if self.z < self.viewport.width / 2.0 {
            blue_shift(ratio)
        } else {
            red_shift(ratio)
        };

        self.offset *= params.cone_factor();
    }

    /// Screen position and trail start. Pure.
    pub fn project(&self) -> Projection {
        Projection {
            head: self.viewport.project(self.offset, self.z),
            tail: self.viewport.project(self.offset, self.prev_z),
        }
    }

    /// Stroke the trail segment onto `surface`.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let Projection { head, tail } = self.project();
        surface.draw_line(tail, head, self.color.with_alpha(self.alpha));
    }

    /// Length of the trail in screen pixels.
    pub fn trail_length(&self) -> f32 {
        let Projection { head, tail } = self.project();
        head.distance(tail)
    }
}

/// Uniform depth in the open interval `(0, width)`.
fn random_depth<R: Rng + ?Sized>(width: f32, rng: &mut R) -> f32 {
    loop {
        let z = rng.gen_range(0.0..width);
        if z > 0.0 {
            return z;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::Facing;
    use crate::surface::FrameBuffer;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const VIEW: Viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(0xC0FFEE)
    }

    fn params(speed: f32, facing: Facing) -> StepParams {
        StepParams {
            speed,
            facing,
            light_threshold: 80.0,
            max_speed: 100.0,
        }
    }

    fn star_at(offset: Vec2, z: f32) -> Star {
        let mut star = Star::new(VIEW, &mut rng());
        star.offset = offset;
        star.z = z;
        star.prev_z = z;
        star.color = StarPalette::Gold.color();
        star
    }

    #[test]
    fn test_seed_ranges() {
        let mut rng = rng();
        for _ in 0..2000 {
            let star = Star::new(VIEW, &mut rng);
            assert!(star.offset.x >= -400.0 && star.offset.x < 400.0);
            assert!(star.offset.y >= -300.0 && star.offset.y < 300.0);
            assert!(star.z > 0.0 && star.z < 800.0);
            assert_eq!(star.prev_z, star.z);
            assert_eq!(star.alpha, 1.0);
            assert!(StarPalette::contains(star.color));
        }
    }

    #[test]
    fn test_zero_speed_only_updates_trail() {
        let mut star = star_at(Vec2::new(10.0, -20.0), 300.0);
        star.prev_z = 305.0;
        star.advance(&params(0.0, Facing::Forward), &mut rng());
        assert_eq!(star.offset, Vec2::new(10.0, -20.0));
        assert_eq!(star.z, 300.0);
        assert_eq!(star.prev_z, 300.0);
        assert_eq!(star.trail_length(), 0.0);
    }

    #[test]
    fn test_forward_moves_closer() {
        let mut star = star_at(Vec2::new(10.0, 10.0), 300.0);
        star.advance(&params(10.0, Facing::Forward), &mut rng());
        assert_eq!(star.prev_z, 300.0);
        assert_eq!(star.z, 295.0);
    }

    #[test]
    fn test_backward_moves_away() {
        let mut star = star_at(Vec2::new(10.0, 10.0), 300.0);
        star.advance(&params(10.0, Facing::Backward), &mut rng());
        assert_eq!(star.prev_z, 300.0);
        assert_eq!(star.z, 305.0);
    }

    #[test]
    fn test_passing_viewer_reseeds() {
        let mut star = star_at(Vec2::new(10.0, 10.0), 2.0);
        star.advance(&params(10.0, Facing::Forward), &mut rng());
        assert!(star.z > 0.0 && star.z < 800.0);
        assert_eq!(star.prev_z, star.z);
        assert!(StarPalette::contains(star.color));
    }

    #[test]
    fn test_reaching_horizon_reseeds() {
        let mut star = star_at(Vec2::new(10.0, 10.0), 797.0);
        star.advance(&params(10.0, Facing::Backward), &mut rng());
        assert!(star.z > 0.0 && star.z < 800.0);
        assert_eq!(star.prev_z, star.z);
    }

    #[test]
    fn test_exact_zero_depth_reseeds() {
        let mut star = star_at(Vec2::ZERO, 5.0);
        star.advance(&params(10.0, Facing::Forward), &mut rng());
        assert!(star.z > 0.0);
    }

    #[test]
    fn test_below_threshold_keeps_color_and_offset() {
        let mut star = star_at(Vec2::new(40.0, -30.0), 300.0);
        star.advance(&params(79.0, Facing::Forward), &mut rng());
        assert_eq!(star.offset, Vec2::new(40.0, -30.0));
        assert_eq!(star.color, StarPalette::Gold.color());
    }

    #[test]
    fn test_max_speed_near_half_is_pure_blue() {
        let mut star = star_at(Vec2::new(40.0, -30.0), 300.0);
        star.advance(&params(100.0, Facing::Forward), &mut rng());
        // 300 - 50 = 250, nearer half of 800
        assert_eq!(star.z, 250.0);
        assert_eq!(star.color, Color::rgb(0, 0, 255));
        assert!((star.offset.x - 8.0).abs() < 1e-4);
        assert!((star.offset.y + 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_far_half_is_red_shifted_and_dim() {
        let mut star = star_at(Vec2::new(40.0, -30.0), 700.0);
        star.advance(&params(90.0, Facing::Forward), &mut rng());
        // 700 - 45 = 655, farther half; ratio 0.5
        assert_eq!(star.z, 655.0);
        assert_eq!(star.color.channels(), [255, 250, 250]);
        assert!((star.color.a - 0.525).abs() < 1e-6);
    }

    #[test]
    fn test_threshold_exactly_applies_effects() {
        let mut star = star_at(Vec2::new(40.0, -30.0), 300.0);
        star.advance(&params(80.0, Facing::Forward), &mut rng());
        // ratio 0: white blue-shift, cone factor 1
        assert_eq!(star.color, Color::rgb(255, 255, 255));
        assert_eq!(star.offset, Vec2::new(40.0, -30.0));
    }

    #[test]
    fn test_cone_squeeze_compounds() {
        // Known characteristic: the squeeze is never undone while the star lives.
        let mut star = star_at(Vec2::new(100.0, 50.0), 300.0);
        let p = params(90.0, Facing::Forward);
        star.advance(&p, &mut rng());
        assert!(star.offset.abs_diff_eq(Vec2::new(60.0, 30.0), 1e-3));
        star.advance(&p, &mut rng());
        assert_eq!(star.z, 210.0);
        assert!(star.offset.abs_diff_eq(Vec2::new(36.0, 18.0), 1e-3));

        // Dropping below the threshold does not restore the offset.
        star.advance(&params(10.0, Facing::Forward), &mut rng());
        assert!(star.offset.abs_diff_eq(Vec2::new(36.0, 18.0), 1e-3));
    }

    #[test]
    fn test_project_center_and_scale() {
        let star = star_at(Vec2::ZERO, 100.0);
        assert_eq!(star.project().head, Vec2::new(400.0, 300.0));

        let star = star_at(Vec2::new(100.0, -60.0), 200.0);
        // 100/200 * 400 + 400 = 600; -60/200 * 300 + 300 = 210
        assert!(star.project().head.abs_diff_eq(Vec2::new(600.0, 210.0), 1e-3));
    }

    #[test]
    fn test_project_is_pure() {
        let mut rng = rng();
        let mut star = Star::new(VIEW, &mut rng);
        star.advance(&params(30.0, Facing::Forward), &mut rng);
        let before = star.clone();
        assert_eq!(star.project(), star.project());
        assert_eq!(star, before);
    }

    #[test]
    fn test_trail_grows_with_speed() {
        let mut star = star_at(Vec2::new(200.0, 100.0), 400.0);
        star.advance(&params(40.0, Facing::Forward), &mut rng());
        let Projection { head, tail } = star.project();
        assert!(star.trail_length() > 0.0);
        // Approaching stars move outward from the center.
        assert!(head.x > tail.x);
    }

    #[test]
    fn test_draw_strokes_trail() {
        let mut fb = FrameBuffer::new(800, 600, [0, 0, 0]);
        let mut star = star_at(Vec2::new(200.0, 100.0), 400.0);
        star.advance(&params(40.0, Facing::Forward), &mut rng());
        star.draw(&mut fb);
        assert!(fb.lit_pixels() > 1);

        let mut fb = FrameBuffer::new(800, 600, [0, 0, 0]);
        star_at(Vec2::new(200.0, 100.0), 400.0).draw(&mut fb);
        assert_eq!(fb.lit_pixels(), 1);
    }

    #[test]
    fn test_viewport_zero_is_bumped() {
        let view = Viewport::new(0, 0);
        assert_eq!(view.width, 1.0);
        assert_eq!(view.height, 1.0);
    }
}
