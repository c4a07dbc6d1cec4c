/// An RGBA color with `f32` components in the `0.0..=1.0` range.
///
/// ```
/// use trellis_core::Color;
///
/// let red = Color::rgb(1.0, 0.0, 0.0);
/// let from_hex = Color::from_hex(0xFF8800);
/// assert!(red.is_visible());
/// assert!(!Color::TRANSPARENT.is_visible());
/// # let _ = from_hex;
/// ```
///
/// The struct is `#[repr(C)]` and implements `bytemuck::Pod`, so backends can
/// upload it without conversion.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

static_assertions::assert_eq_size!(Color, [f32; 4]);

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const GRAY: Color = Color::rgb(0.5, 0.5, 0.5);
    pub const LIGHT_GRAY: Color = Color::rgb(0.83, 0.83, 0.83);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from 8-bit RGBA values (0–255 mapped to 0.0–1.0).
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create a color from a 24-bit RGB hex value (e.g. `0xFF8800`).
    pub fn from_hex(hex: u32) -> Self {
        Self::from_rgba_u8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 255)
    }

    /// Whether painting this color would change any pixel.
    pub fn is_visible(&self) -> bool {
        self.a > 0.0
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Scale the RGB channels by `1 + amount`, clamped to the valid range.
    /// Negative amounts darken.
    pub fn adjust_brightness(self, amount: f32) -> Self {
        let scale = 1.0 + amount;
        Self {
            r: (self.r * scale).clamp(0.0, 1.0),
            g: (self.g * scale).clamp(0.0, 1.0),
            b: (self.b * scale).clamp(0.0, 1.0),
            a: self.a,
        }
    }
}
