//! Star colors and the Doppler-style color shifts.
//!
//! Stars at rest pick one of four colors from [`StarPalette`]. Once travel speed
//! crosses the lightspeed threshold, [`blue_shift`] and [`red_shift`] replace
//! that color every frame depending on which half of the depth range the star
//! is in.

use rand::Rng;

/// An RGBA color with 8-bit channels and floating-point opacity.
///
/// Mirrors the `rgba(r, g, b, a)` notation: channels are `0..=255`, alpha is
/// `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    /// Fully opaque color from channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Color with explicit opacity.
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a `#RRGGBB` hex string.
    ///
    /// Returns `None` for anything that isn't exactly six hex digits after `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Same color with opacity multiplied by `alpha`.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: (self.a * alpha).clamp(0.0, 1.0),
            ..self
        }
    }

    /// Channels as `[r, g, b]`.
    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.a >= 1.0 {
            write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Rest colors for stars, loosely following stellar temperature classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarPalette {
    /// `#FFFFFF`
    White,
    /// `#FFD700`
    Gold,
    /// `#FF4500`
    OrangeRed,
    /// `#87CEFA`
    SkyBlue,
}

impl StarPalette {
    /// Every palette entry, in selection order.
    pub const ALL: [StarPalette; 4] = [
        StarPalette::White,
        StarPalette::Gold,
        StarPalette::OrangeRed,
        StarPalette::SkyBlue,
    ];

    /// The color for this entry.
    pub const fn color(self) -> Color {
        match self {
            StarPalette::White => Color::rgb(0xFF, 0xFF, 0xFF),
            StarPalette::Gold => Color::rgb(0xFF, 0xD7, 0x00),
            StarPalette::OrangeRed => Color::rgb(0xFF, 0x45, 0x00),
            StarPalette::SkyBlue => Color::rgb(0x87, 0xCE, 0xFA),
        }
    }

    /// Uniformly pick a rest color.
    pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
        Self::ALL[rng.gen_range(0..Self::ALL.len())].color()
    }

    /// Whether `color` is one of the rest colors.
    pub fn contains(color: Color) -> bool {
        Self::ALL.iter().any(|entry| entry.color() == color)
    }
}

/// Color for a star in the nearer half of the depth range.
///
/// Red and green fade out together as `velocity_ratio` goes from 0 to 1,
/// leaving pure blue at maximum speed.
pub fn blue_shift(velocity_ratio: f32) -> Color {
    let intensity = 255.0 - (velocity_ratio * 255.0).floor();
    let c = intensity.clamp(0.0, 255.0) as u8;
    Color::rgb(c, c, 255)
}

/// Color for a star in the farther half of the depth range.
///
/// Green and blue rise from 50 (capped at 255) while the star dims to 5%
/// opacity at maximum speed.
pub fn red_shift(velocity_ratio: f32) -> Color {
    let intensity = (50.0 + (velocity_ratio * 400.0).floor()).clamp(0.0, 255.0) as u8;
    let dim = 1.0 - velocity_ratio * 0.95;
    Color::rgba(255, intensity, intensity, dim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex("#FFD700"), Some(Color::rgb(255, 215, 0)));
        assert_eq!(Color::from_hex("#87cefa"), Some(Color::rgb(135, 206, 250)));
        assert_eq!(Color::from_hex("FFD700"), None);
        assert_eq!(Color::from_hex("#FFF"), None);
        assert_eq!(Color::from_hex("#GG0000"), None);
    }

    #[test]
    fn test_palette_matches_hex() {
        let hex = ["#FFFFFF", "#FFD700", "#FF4500", "#87CEFA"];
        for (entry, hex) in StarPalette::ALL.iter().zip(hex) {
            assert_eq!(Some(entry.color()), Color::from_hex(hex));
        }
    }

    #[test]
    fn test_random_color_covers_palette() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let color = StarPalette::random_color(&mut rng);
            let idx = StarPalette::ALL
                .iter()
                .position(|e| e.color() == color)
                .expect("color outside palette");
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_blue_shift_endpoints() {
        assert_eq!(blue_shift(0.0), Color::rgb(255, 255, 255));
        assert_eq!(blue_shift(1.0), Color::rgb(0, 0, 255));
        // floor(0.5 * 255) = 127
        assert_eq!(blue_shift(0.5), Color::rgb(128, 128, 255));
    }

    #[test]
    fn test_red_shift_endpoints() {
        let rest = red_shift(0.0);
        assert_eq!(rest.channels(), [255, 50, 50]);
        assert_eq!(rest.a, 1.0);

        let full = red_shift(1.0);
        assert_eq!(full.channels(), [255, 255, 255]);
        assert!((full.a - 0.05).abs() < 1e-6);

        // 50 + floor(0.25 * 400) = 150
        assert_eq!(red_shift(0.25).channels(), [255, 150, 150]);
    }

    #[test]
    fn test_display_css_notation() {
        assert_eq!(Color::rgb(0, 0, 255).to_string(), "rgb(0, 0, 255)");
        assert_eq!(Color::rgba(255, 50, 50, 0.5).to_string(), "rgba(255, 50, 50, 0.5)");
    }

    #[test]
    fn test_with_alpha_multiplies() {
        let c = Color::rgba(10, 20, 30, 0.5).with_alpha(0.5);
        assert_eq!(c.a, 0.25);
    }
}
