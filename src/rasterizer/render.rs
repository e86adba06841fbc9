//! Rasterizer core: render state, statistics, and the per-pixel fill loop
//!
//! One draw call runs to completion before returning: setup, then a walk of
//! the clamped bounding box with edge test, depth test, perspective-correct
//! attribute recovery, shading, and the framebuffer write. Triangles take
//! effect strictly in submission order.

use std::sync::Arc;

use crate::rasterizer::color::Rgb565;
use crate::rasterizer::framebuffer::Framebuffer;
use crate::rasterizer::setup::{TriangleSetup, Vertex};
use crate::rasterizer::texture::Texture;

/// Texture sampling filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum TexFilter {
    Nearest,
    #[default]
    Bilinear,
}

/// Per-draw render state. Owned by a [`Rasterizer`] context, never global.
#[derive(Debug, Clone)]
pub struct RenderState {
    /// Texture consulted when texturing is enabled; `None` falls back to
    /// vertex-color shading.
    pub bound_texture: Option<Arc<Texture>>,
    pub depth_test_enabled: bool,
    pub depth_write_enabled: bool,
    pub texture_enabled: bool,
    /// Gouraud modulation: multiply sampled texels by the interpolated
    /// vertex color.
    pub modulate_enabled: bool,
    pub tex_filter: TexFilter,
    /// Stored toggle only; blend arithmetic is not implemented.
    pub blend_enabled: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            bound_texture: None,
            depth_test_enabled: true,
            depth_write_enabled: true,
            texture_enabled: true,
            modulate_enabled: true,
            tex_filter: TexFilter::Bilinear,
            blend_enabled: false,
        }
    }
}

/// Draw statistics, resettable as a unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RasterStats {
    pub triangles_submitted: u64,
    /// Degenerate triangles rejected at setup.
    pub triangles_culled: u64,
    pub pixels_drawn: u64,
    /// Pixels that failed the depth test.
    pub pixels_rejected: u64,
}

/// Rasterizer context: render state plus statistics.
///
/// Independent instances are fully isolated; each draw call borrows the
/// target framebuffer explicitly.
#[derive(Debug, Default)]
pub struct Rasterizer {
    pub state: RenderState,
    stats: RasterStats,
}

impl Rasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind_texture(&mut self, texture: Option<Arc<Texture>>) {
        self.state.bound_texture = texture;
    }

    pub fn set_depth_test(&mut self, enable: bool) {
        self.state.depth_test_enabled = enable;
    }

    pub fn set_depth_write(&mut self, enable: bool) {
        self.state.depth_write_enabled = enable;
    }

    pub fn set_texturing(&mut self, enable: bool) {
        self.state.texture_enabled = enable;
    }

    pub fn set_modulation(&mut self, enable: bool) {
        self.state.modulate_enabled = enable;
    }

    pub fn set_tex_filter(&mut self, filter: TexFilter) {
        self.state.tex_filter = filter;
    }

    pub fn set_blend(&mut self, enable: bool) {
        self.state.blend_enabled = enable;
    }

    pub fn stats(&self) -> RasterStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = RasterStats::default();
    }

    /// Rasterize one screen-space triangle into `fb`.
    ///
    /// Degenerate triangles are culled and counted, not an error. The call
    /// visits every pixel of the clamped bounding box before returning.
    pub fn draw_triangle(&mut self, fb: &mut Framebuffer, v0: &Vertex, v1: &Vertex, v2: &Vertex) {
        self.stats.triangles_submitted += 1;

        let setup = match TriangleSetup::new(v0, v1, v2, fb.width, fb.height) {
            Some(setup) => setup,
            None => {
                self.stats.triangles_culled += 1;
                return;
            }
        };

        let ccw = setup.area2 > 0.0;
        // Depth only reaches the buffer when both the test and the mask
        // allow it; write_pixel couples the depth write to this flag.
        let depth_flag = self.state.depth_test_enabled && self.state.depth_write_enabled;

        for py in setup.min_y..=setup.max_y {
            for px in setup.min_x..=setup.max_x {
                // Sample at the pixel center.
                let x = px as f32 + 0.5;
                let y = py as f32 + 0.5;

                if !Self::inside(&setup, ccw, x, y) {
                    continue;
                }

                let dx = x - setup.x0;
                let dy = y - setup.y0;

                let z = setup.z.interpolate(setup.z0, dx, dy);
                let w = setup.w.interpolate(setup.w0, dx, dy);

                if self.state.depth_test_enabled && z >= fb.read_depth(px, py) {
                    self.stats.pixels_rejected += 1;
                    continue;
                }

                // Recover perspective-correct attributes.
                let inv_w = 1.0 / w;
                let u = setup.uw.interpolate(setup.uw0, dx, dy) * inv_w;
                let v = setup.vw.interpolate(setup.vw0, dx, dy) * inv_w;
                let r = (setup.rw.interpolate(setup.rw0, dx, dy) * inv_w).clamp(0.0, 1.0);
                let g = (setup.gw.interpolate(setup.gw0, dx, dy) * inv_w).clamp(0.0, 1.0);
                let b = (setup.bw.interpolate(setup.bw0, dx, dy) * inv_w).clamp(0.0, 1.0);

                let color = self.shade(u, v, r, g, b);

                fb.write_pixel(px, py, color, z, depth_flag);
                self.stats.pixels_drawn += 1;
            }
        }
    }

    /// Submit a flat vertex list, three vertices per triangle.
    pub fn draw_triangles(&mut self, fb: &mut Framebuffer, vertices: &[Vertex]) {
        for tri in vertices.chunks_exact(3) {
            self.draw_triangle(fb, &tri[0], &tri[1], &tri[2]);
        }
    }

    /// Submit an indexed triangle list, three indices per triangle.
    pub fn draw_indexed(&mut self, fb: &mut Framebuffer, vertices: &[Vertex], indices: &[u16]) {
        for tri in indices.chunks_exact(3) {
            let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            if i0 < vertices.len() && i1 < vertices.len() && i2 < vertices.len() {
                self.draw_triangle(fb, &vertices[i0], &vertices[i1], &vertices[i2]);
            }
        }
    }

    /// Top-left fill rule, mirrored for clockwise winding. A pixel exactly
    /// on a shared edge lands in exactly one of the two adjacent triangles.
    fn inside(setup: &TriangleSetup, ccw: bool, x: f32, y: f32) -> bool {
        for edge in &setup.edges {
            let e = edge.evaluate(x, y);
            if ccw {
                if e < 0.0 || (e == 0.0 && !edge.top_left) {
                    return false;
                }
            } else if e > 0.0 || (e == 0.0 && edge.top_left) {
                return false;
            }
        }
        true
    }

    fn shade(&self, u: f32, v: f32, r: f32, g: f32, b: f32) -> Rgb565 {
        if self.state.texture_enabled {
            if let Some(tex) = &self.state.bound_texture {
                let texel = match self.state.tex_filter {
                    TexFilter::Nearest => tex.sample_nearest(u, v),
                    TexFilter::Bilinear => tex.sample_bilinear(u, v),
                };
                if !self.state.modulate_enabled {
                    return texel;
                }
                // Truncating per-channel multiply, matching the hardware.
                let (tr, tg, tb) = texel.to_rgb8();
                return Rgb565::from_rgb8(
                    (tr as f32 * r) as u8,
                    (tg as f32 * g) as u8,
                    (tb as f32 * b) as u8,
                );
            }
        }
        // Texturing off, or on with nothing bound: vertex color.
        Rgb565::from_rgbf(r, g, b)
    }
}
