//! Texture store with nearest and bilinear sampling
//!
//! Textures are power-of-two RGB565 arrays, at most 256 per axis, read-only
//! while draws are in flight. UV coordinates wrap: the fractional part is
//! taken per axis, so u = -0.2 samples the same texel column as u = 0.8.

use crate::error::Error;
use crate::rasterizer::color::Rgb565;
use crate::rasterizer::MAX_TEXTURE_SIZE;

#[derive(Debug, Clone)]
pub struct Texture {
    pub width: usize,
    pub height: usize,
    texels: Vec<Rgb565>,
}

/// Wrap a texture coordinate into [0, 1). Negative values wrap forward.
#[inline]
fn wrap_uv(v: f32) -> f32 {
    v - v.floor()
}

impl Texture {
    /// Create a texture initialized to black.
    ///
    /// Dimensions must be powers of two, at most [`MAX_TEXTURE_SIZE`] per
    /// axis.
    pub fn new(width: usize, height: usize) -> Result<Self, Error> {
        if width == 0
            || height == 0
            || !width.is_power_of_two()
            || !height.is_power_of_two()
            || width > MAX_TEXTURE_SIZE
            || height > MAX_TEXTURE_SIZE
        {
            return Err(Error::TextureSize {
                width,
                height,
                max: MAX_TEXTURE_SIZE,
            });
        }
        Ok(Self {
            width,
            height,
            texels: vec![Rgb565::BLACK; width * height],
        })
    }

    /// Create a texture from row-major packed texel data.
    ///
    /// `data` must hold exactly `width * height` texels.
    pub fn from_texels(width: usize, height: usize, data: &[Rgb565]) -> Result<Self, Error> {
        let mut tex = Self::new(width, height)?;
        if data.len() != tex.texels.len() {
            return Err(Error::TextureData {
                width,
                height,
                expected: tex.texels.len(),
                actual: data.len(),
            });
        }
        tex.texels.copy_from_slice(data);
        Ok(tex)
    }

    /// Set one texel; out of range is a no-op.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgb565) {
        if x < self.width && y < self.height {
            self.texels[y * self.width + x] = color;
        }
    }

    /// Get one texel; out of range returns black.
    pub fn get_pixel(&self, x: usize, y: usize) -> Rgb565 {
        if x < self.width && y < self.height {
            self.texels[y * self.width + x]
        } else {
            Rgb565::BLACK
        }
    }

    /// Point-sample the nearest texel, with UV wrap.
    pub fn sample_nearest(&self, u: f32, v: f32) -> Rgb565 {
        let u = wrap_uv(u);
        let v = wrap_uv(v);

        let x = (u * self.width as f32) as usize % self.width;
        let y = (v * self.height as f32) as usize % self.height;
        self.texels[y * self.width + x]
    }

    /// Bilinearly filter four neighboring texels, with UV wrap.
    ///
    /// Texel-center convention: u maps to texel space as u*width - 0.5, so
    /// sampling exactly at a texel center returns that texel unchanged. The
    /// per-channel blend truncates to integer values; the hardware path
    /// truncates too, and parity requires it.
    pub fn sample_bilinear(&self, u: f32, v: f32) -> Rgb565 {
        let u = wrap_uv(u);
        let v = wrap_uv(v);

        let tx = u * self.width as f32 - 0.5;
        let ty = v * self.height as f32 - 0.5;

        let x0 = tx.floor() as i32;
        let y0 = ty.floor() as i32;
        let fx = tx - x0 as f32;
        let fy = ty - y0 as f32;

        // Each neighbor index wraps independently per axis.
        let x0 = (x0.rem_euclid(self.width as i32)) as usize;
        let y0 = (y0.rem_euclid(self.height as i32)) as usize;
        let x1 = (x0 + 1) % self.width;
        let y1 = (y0 + 1) % self.height;

        let (r00, g00, b00) = self.texels[y0 * self.width + x0].to_rgb8();
        let (r10, g10, b10) = self.texels[y0 * self.width + x1].to_rgb8();
        let (r01, g01, b01) = self.texels[y1 * self.width + x0].to_rgb8();
        let (r11, g11, b11) = self.texels[y1 * self.width + x1].to_rgb8();

        let w00 = (1.0 - fx) * (1.0 - fy);
        let w10 = fx * (1.0 - fy);
        let w01 = (1.0 - fx) * fy;
        let w11 = fx * fy;

        let r = (r00 as f32 * w00 + r10 as f32 * w10 + r01 as f32 * w01 + r11 as f32 * w11) as u8;
        let g = (g00 as f32 * w00 + g10 as f32 * w10 + g01 as f32 * w01 + g11 as f32 * w11) as u8;
        let b = (b00 as f32 * w00 + b10 as f32 * w10 + b01 as f32 * w01 + b11 as f32 * w11) as u8;

        Rgb565::from_rgb8(r, g, b)
    }

    /// Square checkerboard test texture.
    ///
    /// A `check_size` of zero is treated as 1 (per-texel alternation).
    pub fn checkerboard(
        size: usize,
        check_size: usize,
        color1: Rgb565,
        color2: Rgb565,
    ) -> Result<Self, Error> {
        let check_size = check_size.max(1);
        let mut tex = Self::new(size, size)?;
        for y in 0..size {
            for x in 0..size {
                let checker = (x / check_size + y / check_size) % 2 == 0;
                tex.texels[y * size + x] = if checker { color1 } else { color2 };
            }
        }
        Ok(tex)
    }

    /// Red/green ramp test texture.
    pub fn gradient(width: usize, height: usize) -> Result<Self, Error> {
        let mut tex = Self::new(width, height)?;
        for y in 0..height {
            for x in 0..width {
                let r = ((x * 255) / width) as u8;
                let g = ((y * 255) / height) as u8;
                tex.texels[y * width + x] = Rgb565::from_rgb8(r, g, 128);
            }
        }
        Ok(tex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_sizes() {
        assert!(Texture::new(0, 16).is_err());
        assert!(Texture::new(48, 16).is_err());
        assert!(Texture::new(512, 16).is_err());
        assert!(Texture::new(256, 256).is_ok());
    }

    #[test]
    fn uv_wrap_positive_and_negative() {
        let tex = Texture::gradient(16, 16).unwrap();
        assert_eq!(tex.sample_nearest(1.3, 0.0), tex.sample_nearest(0.3, 0.0));
        assert_eq!(tex.sample_nearest(-0.2, 0.0), tex.sample_nearest(0.8, 0.0));
        assert_eq!(tex.sample_bilinear(0.0, 1.3), tex.sample_bilinear(0.0, 0.3));
        assert_eq!(tex.sample_bilinear(0.0, -0.2), tex.sample_bilinear(0.0, 0.8));
    }

    #[test]
    fn nearest_picks_the_containing_texel() {
        let mut tex = Texture::new(2, 2).unwrap();
        tex.set_pixel(0, 0, Rgb565::from_rgb8(255, 0, 0));
        tex.set_pixel(1, 0, Rgb565::from_rgb8(0, 255, 0));
        tex.set_pixel(0, 1, Rgb565::from_rgb8(0, 0, 255));
        tex.set_pixel(1, 1, Rgb565::WHITE);

        assert_eq!(tex.sample_nearest(0.1, 0.1), Rgb565::from_rgb8(255, 0, 0));
        assert_eq!(tex.sample_nearest(0.9, 0.1), Rgb565::from_rgb8(0, 255, 0));
        assert_eq!(tex.sample_nearest(0.1, 0.9), Rgb565::from_rgb8(0, 0, 255));
        assert_eq!(tex.sample_nearest(0.9, 0.9), Rgb565::WHITE);
    }

    #[test]
    fn bilinear_exact_at_texel_centers() {
        let tex = Texture::gradient(8, 8).unwrap();
        for y in 0..8 {
            for x in 0..8 {
                let u = (x as f32 + 0.5) / 8.0;
                let v = (y as f32 + 0.5) / 8.0;
                assert_eq!(tex.sample_bilinear(u, v), tex.get_pixel(x, y));
            }
        }
    }

    #[test]
    fn bilinear_midpoint_truncates() {
        let mut tex = Texture::new(2, 1).unwrap();
        tex.set_pixel(0, 0, Rgb565::from_rgb8(0, 0, 0));
        tex.set_pixel(1, 0, Rgb565::from_rgb8(248, 0, 0));

        // Halfway between the two texel centers along u, on the row center.
        let c = tex.sample_bilinear(0.5, 0.5);
        // 0 * 0.5 + 248 * 0.5 = 124.0, truncated then repacked: 124 >> 3 = 15.
        assert_eq!(c, Rgb565::from_rgb8(124, 0, 0));
    }

    #[test]
    fn checkerboard_zero_check_size_alternates_per_texel() {
        let c1 = Rgb565::WHITE;
        let c2 = Rgb565::from_rgb8(96, 96, 96);
        let tex = Texture::checkerboard(4, 0, c1, c2).unwrap();
        let per_texel = Texture::checkerboard(4, 1, c1, c2).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(tex.get_pixel(x, y), per_texel.get_pixel(x, y));
            }
        }
    }

    #[test]
    fn from_texels_rejects_length_mismatch() {
        let data = vec![Rgb565::WHITE; 4 * 4];
        assert!(Texture::from_texels(4, 4, &data).is_ok());
        assert!(Texture::from_texels(4, 4, &data[..15]).is_err());
        assert!(Texture::from_texels(2, 2, &data).is_err());
    }

    #[test]
    fn set_pixel_out_of_range_is_noop() {
        let mut tex = Texture::new(4, 4).unwrap();
        tex.set_pixel(4, 0, Rgb565::WHITE);
        tex.set_pixel(0, 100, Rgb565::WHITE);
        assert_eq!(tex.get_pixel(4, 0), Rgb565::BLACK);
    }
}
