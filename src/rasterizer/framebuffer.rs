//! Framebuffer: packed color buffer plus parallel depth buffer
//!
//! All access is bounds-checked: out-of-range writes are silent no-ops,
//! out-of-range reads return defined defaults (black, far depth). Depth is
//! stored as f32 in [0, 1], smaller = nearer.

use crate::error::Error;
use crate::rasterizer::color::Rgb565;

pub struct Framebuffer {
    pub width: usize,
    pub height: usize,
    color: Vec<Rgb565>,
    depth: Vec<f32>,
}

fn alloc_buffer<T: Clone>(
    what: &'static str,
    width: usize,
    height: usize,
    fill: T,
) -> Result<Vec<T>, Error> {
    let len = width * height;
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|source| Error::Alloc {
        what,
        width,
        height,
        source,
    })?;
    buf.resize(len, fill);
    Ok(buf)
}

impl Framebuffer {
    /// Create a framebuffer cleared to black and far depth.
    ///
    /// Allocation failure is the only error; on failure nothing is retained.
    pub fn new(width: usize, height: usize) -> Result<Self, Error> {
        let color = alloc_buffer("color", width, height, Rgb565::BLACK)?;
        let depth = alloc_buffer("depth", width, height, 1.0f32)?;
        Ok(Self {
            width,
            height,
            color,
            depth,
        })
    }

    pub fn clear_color(&mut self, color: Rgb565) {
        self.color.fill(color);
    }

    pub fn clear_depth(&mut self, depth: f32) {
        self.depth.fill(depth);
    }

    pub fn clear(&mut self, color: Rgb565, depth: f32) {
        self.clear_color(color);
        self.clear_depth(depth);
    }

    /// Write one pixel.
    ///
    /// With `depth_test` set, the write is rejected when `depth` is not
    /// strictly less than the stored value (ties lose), and both color and
    /// depth are written on pass. With `depth_test` clear, the color always
    /// writes and the depth buffer is left untouched.
    pub fn write_pixel(&mut self, x: i32, y: i32, color: Rgb565, depth: f32, depth_test: bool) {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return;
        }
        let index = y as usize * self.width + x as usize;
        if depth_test {
            if depth >= self.depth[index] {
                return;
            }
            self.depth[index] = depth;
        }
        self.color[index] = color;
    }

    /// Read one pixel; out of range returns black.
    pub fn read_pixel(&self, x: i32, y: i32) -> Rgb565 {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return Rgb565::BLACK;
        }
        self.color[y as usize * self.width + x as usize]
    }

    /// Read one depth value; out of range returns far (1.0).
    pub fn read_depth(&self, x: i32, y: i32) -> f32 {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return 1.0;
        }
        self.depth[y as usize * self.width + x as usize]
    }

    /// The packed color buffer, row-major.
    pub fn color_buffer(&self) -> &[Rgb565] {
        &self.color
    }

    /// Expand the color buffer to RGBA bytes for display or image encoding.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.color.len() * 4);
        for c in &self.color {
            out.extend_from_slice(&c.to_rgba8());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clears_to_black_and_far() {
        let fb = Framebuffer::new(4, 4).unwrap();
        assert_eq!(fb.read_pixel(3, 3), Rgb565::BLACK);
        assert_eq!(fb.read_depth(0, 0), 1.0);
    }

    #[test]
    fn out_of_range_write_is_noop() {
        let mut fb = Framebuffer::new(4, 4).unwrap();
        fb.write_pixel(-1, 0, Rgb565::WHITE, 0.0, false);
        fb.write_pixel(4, 0, Rgb565::WHITE, 0.0, false);
        fb.write_pixel(0, 17, Rgb565::WHITE, 0.0, false);
        assert!(fb.color_buffer().iter().all(|&c| c == Rgb565::BLACK));
    }

    #[test]
    fn out_of_range_read_returns_defaults() {
        let fb = Framebuffer::new(4, 4).unwrap();
        assert_eq!(fb.read_pixel(-1, 2), Rgb565::BLACK);
        assert_eq!(fb.read_depth(9, 9), 1.0);
    }

    #[test]
    fn depth_test_strict_less() {
        let mut fb = Framebuffer::new(2, 2).unwrap();
        fb.write_pixel(0, 0, Rgb565::WHITE, 0.5, true);
        assert_eq!(fb.read_depth(0, 0), 0.5);

        // Equal depth loses.
        fb.write_pixel(0, 0, Rgb565::BLACK, 0.5, true);
        assert_eq!(fb.read_pixel(0, 0), Rgb565::WHITE);

        // Nearer wins.
        fb.write_pixel(0, 0, Rgb565::BLACK, 0.25, true);
        assert_eq!(fb.read_pixel(0, 0), Rgb565::BLACK);
        assert_eq!(fb.read_depth(0, 0), 0.25);
    }

    #[test]
    fn disabled_depth_test_skips_depth_write() {
        let mut fb = Framebuffer::new(2, 2).unwrap();
        fb.write_pixel(1, 1, Rgb565::WHITE, 0.1, false);
        assert_eq!(fb.read_pixel(1, 1), Rgb565::WHITE);
        // Depth stays at the cleared value.
        assert_eq!(fb.read_depth(1, 1), 1.0);
    }

    #[test]
    fn clear_overwrites_everything() {
        let mut fb = Framebuffer::new(3, 3).unwrap();
        fb.write_pixel(1, 1, Rgb565::WHITE, 0.2, true);
        fb.clear(Rgb565::from_rgb8(32, 32, 64), 1.0);
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(fb.read_pixel(x, y), Rgb565::from_rgb8(32, 32, 64));
                assert_eq!(fb.read_depth(x, y), 1.0);
            }
        }
    }
}
