//! Drawing surfaces that stars render into.
//!
//! [`Surface`] is the contract the simulation core draws against: clear, then
//! a stream of one-pixel line segments. [`FrameBuffer`] is the CPU
//! implementation used by the window runner (uploaded to a GPU texture each
//! frame) and by tests and snapshots.

use std::path::Path;

use glam::Vec2;
use image::{ImageFormat, Rgba, RgbaImage};

use crate::error::SnapshotError;
use crate::visuals::Color;

/// A 2D target with known pixel dimensions.
pub trait Surface {
    /// Width and height in pixels.
    fn size(&self) -> (u32, u32);

    /// Reset every pixel to the background.
    fn clear(&mut self);

    /// Stroke a 1-pixel line from `from` to `to`, blended with `color.a`.
    ///
    /// When `from == to` a single pixel is drawn.
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color);
}

/// CPU-side RGBA frame buffer with alpha-blended line rasterization.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    image: RgbaImage,
    background: [u8; 3],
}

impl FrameBuffer {
    /// Create a frame buffer filled with `background`.
    ///
    /// Zero dimensions are bumped to 1 so the buffer is never empty.
    pub fn new(width: u32, height: u32, background: [u8; 3]) -> Self {
        let [r, g, b] = background;
        Self {
            image: RgbaImage::from_pixel(width.max(1), height.max(1), Rgba([r, g, b, 255])),
            background,
        }
    }

    /// Reallocate at a new size, cleared to the background.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height, self.background);
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Background color used by [`Surface::clear`].
    pub fn background(&self) -> [u8; 3] {
        self.background
    }

    /// Read a pixel. Returns `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Raw RGBA8 bytes, row-major, tightly packed.
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Number of pixels that differ from the background.
    pub fn lit_pixels(&self) -> usize {
        let [r, g, b] = self.background;
        self.image
            .pixels()
            .filter(|p| p.0[..3] != [r, g, b])
            .count()
    }

    /// Write the current frame as a PNG.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), SnapshotError> {
        self.image.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }

    fn blend(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 {
            return;
        }
        let Some(px) = self.image.get_pixel_mut_checked(x as u32, y as u32) else {
            return;
        };
        let a = color.a.clamp(0.0, 1.0);
        for (dst, src) in px.0.iter_mut().zip(color.channels()) {
            let mixed = src as f32 * a + *dst as f32 * (1.0 - a);
            *dst = mixed.round().clamp(0.0, 255.0) as u8;
        }
    }
}

impl Surface for FrameBuffer {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn clear(&mut self) {
        let [r, g, b] = self.background;
        for px in self.image.pixels_mut() {
            *px = Rgba([r, g, b, 255]);
        }
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        if !from.is_finite() || !to.is_finite() || color.a <= 0.0 {
            return;
        }
        // Projected trails of very close stars can reach far off-screen.
        let max = Vec2::new(self.width() as f32, self.height() as f32);
        let Some((a, b)) = clip_segment(from, to, Vec2::splat(-1.0), max + 1.0) else {
            return;
        };

        let delta = b - a;
        let steps = delta.abs().max_element().ceil() as i64;
        if steps == 0 {
            self.blend(a.x.floor() as i64, a.y.floor() as i64, color);
            return;
        }
        let inc = delta / steps as f32;
        let mut last = None;
        for i in 0..=steps {
            let p = a + inc * i as f32;
            let cell = (p.x.floor() as i64, p.y.floor() as i64);
            // Don't blend the same pixel twice within one segment.
            if last != Some(cell) {
                self.blend(cell.0, cell.1, color);
                last = Some(cell);
            }
        }
    }
}

/// Liang-Barsky clip of segment `a -> b` against the box `[min, max]`.
fn clip_segment(a: Vec2, b: Vec2, min: Vec2, max: Vec2) -> Option<(Vec2, Vec2)> {
    let d = b - a;
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;

    let edges = [
        (-d.x, a.x - min.x),
        (d.x, max.x - a.x),
        (-d.y, a.y - min.y),
        (d.y, max.y - a.y),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((a + d * t0, a + d * t1))
}
