//! RGB565 packed color
//!
//! 16-bit color with 5 red, 6 green, 5 blue bits, the framebuffer and
//! texture format of the whole pipeline. Every float-to-channel conversion
//! here truncates rather than rounds; the paired hardware implementation
//! does the same, and bit-exact parity depends on it.

use serde::{Deserialize, Serialize};

/// A packed 16-bit RGB565 color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    pub const BLACK: Rgb565 = Rgb565(0x0000);
    pub const WHITE: Rgb565 = Rgb565(0xFFFF);

    /// Pack 8-bit channels, truncating to 5/6/5 bits.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Rgb565((((r >> 3) as u16) << 11) | (((g >> 2) as u16) << 5) | (b >> 3) as u16)
    }

    /// Pack float channels in [0, 1]. Out-of-range inputs are clamped.
    pub fn from_rgbf(r: f32, g: f32, b: f32) -> Self {
        let ri = (r.clamp(0.0, 1.0) * 255.0) as u8;
        let gi = (g.clamp(0.0, 1.0) * 255.0) as u8;
        let bi = (b.clamp(0.0, 1.0) * 255.0) as u8;
        Self::from_rgb8(ri, gi, bi)
    }

    /// Expand to 8-bit channels by shifting into the high bits.
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let c = self.0;
        (
            (((c >> 11) & 0x1F) << 3) as u8,
            (((c >> 5) & 0x3F) << 2) as u8,
            ((c & 0x1F) << 3) as u8,
        )
    }

    /// Expand to RGBA bytes (alpha forced opaque) for display or encoding.
    pub fn to_rgba8(self) -> [u8; 4] {
        let (r, g, b) = self.to_rgb8();
        [r, g, b, 255]
    }
}
