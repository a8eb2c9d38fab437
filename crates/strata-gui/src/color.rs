/// RGBA color in linear space with values in [0, 1]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// 8-bit sRGB to linear, using the same polynomial gamma approximation as
    /// the palette constants below so they stay `const`.
    pub const fn srgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        const fn to_linear(c: u8) -> f32 {
            let x = c as f32 / 255.0;
            if x <= 0.04045 {
                x / 12.92
            } else {
                let t = (x + 0.055) / 1.055;
                t * t * (0.5870 * t + 0.4130)
            }
        }

        Self::rgba(to_linear(r), to_linear(g), to_linear(b), a as f32 / 255.0)
    }

    pub const fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    /// Fully transparent colors draw nothing
    pub fn is_invisible(&self) -> bool {
        self.a <= 0.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

/// Default theme palette (dark slate)
pub mod palette {
    use super::Color;

    pub const BASE: Color = Color::srgba(30, 32, 40, 255);
    pub const RAISED: Color = Color::srgba(44, 47, 58, 255);
    pub const HOVER: Color = Color::srgba(60, 64, 78, 255);
    pub const PRESSED: Color = Color::srgba(22, 24, 30, 255);
    pub const TEXT: Color = Color::srgba(214, 218, 230, 255);
    pub const ACCENT: Color = Color::srgba(110, 160, 250, 255);
}
