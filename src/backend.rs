//! Render backend contract
//!
//! The algorithm lives once, in floating point, in [`crate::rasterizer`].
//! Anything that can fill triangles and hand back a packed framebuffer can
//! stand behind this trait: the software reference here, or a hardware
//! device driven over a bus. Callers write against the trait and never
//! depend on which one they got.

use std::sync::Arc;

use crate::error::Error;
use crate::rasterizer::{
    Framebuffer, RasterStats, Rasterizer, Rgb565, TexFilter, Texture, Vertex,
};

pub trait RenderBackend {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    fn clear(&mut self, color: Rgb565, depth: f32);

    /// Upload a texture and bind it.
    fn upload_texture(&mut self, texture: Texture) -> Result<(), Error>;
    fn bind_texture(&mut self, texture: Option<Arc<Texture>>);

    fn set_depth_test(&mut self, enable: bool);
    fn set_depth_write(&mut self, enable: bool);
    fn set_texturing(&mut self, enable: bool);
    fn set_modulation(&mut self, enable: bool);
    fn set_tex_filter(&mut self, filter: TexFilter);
    fn set_blend(&mut self, enable: bool);

    fn draw_triangle(&mut self, v0: &Vertex, v1: &Vertex, v2: &Vertex);

    fn draw_triangles(&mut self, vertices: &[Vertex]) {
        for tri in vertices.chunks_exact(3) {
            self.draw_triangle(&tri[0], &tri[1], &tri[2]);
        }
    }

    fn draw_indexed(&mut self, vertices: &[Vertex], indices: &[u16]) {
        for tri in indices.chunks_exact(3) {
            let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            if i0 < vertices.len() && i1 < vertices.len() && i2 < vertices.len() {
                self.draw_triangle(&vertices[i0], &vertices[i1], &vertices[i2]);
            }
        }
    }

    /// Row-major packed color read-back.
    fn color_buffer(&self) -> &[Rgb565];

    fn stats(&self) -> RasterStats;
    fn reset_stats(&mut self);
}

/// The software reference backend: a [`Rasterizer`] context plus the
/// framebuffer it draws into.
pub struct SoftwareBackend {
    fb: Framebuffer,
    raster: Rasterizer,
}

impl SoftwareBackend {
    pub fn new(width: usize, height: usize) -> Result<Self, Error> {
        Ok(Self {
            fb: Framebuffer::new(width, height)?,
            raster: Rasterizer::new(),
        })
    }

    /// Direct access to the framebuffer for display glue.
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.fb
    }
}

impl RenderBackend for SoftwareBackend {
    fn width(&self) -> usize {
        self.fb.width
    }

    fn height(&self) -> usize {
        self.fb.height
    }

    fn clear(&mut self, color: Rgb565, depth: f32) {
        self.fb.clear(color, depth);
    }

    fn upload_texture(&mut self, texture: Texture) -> Result<(), Error> {
        log::debug!("uploading {}x{} texture", texture.width, texture.height);
        self.raster.bind_texture(Some(Arc::new(texture)));
        Ok(())
    }

    fn bind_texture(&mut self, texture: Option<Arc<Texture>>) {
        self.raster.bind_texture(texture);
    }

    fn set_depth_test(&mut self, enable: bool) {
        self.raster.set_depth_test(enable);
    }

    fn set_depth_write(&mut self, enable: bool) {
        self.raster.set_depth_write(enable);
    }

    fn set_texturing(&mut self, enable: bool) {
        self.raster.set_texturing(enable);
    }

    fn set_modulation(&mut self, enable: bool) {
        self.raster.set_modulation(enable);
    }

    fn set_tex_filter(&mut self, filter: TexFilter) {
        self.raster.set_tex_filter(filter);
    }

    fn set_blend(&mut self, enable: bool) {
        self.raster.set_blend(enable);
    }

    fn draw_triangle(&mut self, v0: &Vertex, v1: &Vertex, v2: &Vertex) {
        self.raster.draw_triangle(&mut self.fb, v0, v1, v2);
    }

    fn color_buffer(&self) -> &[Rgb565] {
        self.fb.color_buffer()
    }

    fn stats(&self) -> RasterStats {
        self.raster.stats()
    }

    fn reset_stats(&mut self) {
        self.raster.reset_stats();
    }
}
