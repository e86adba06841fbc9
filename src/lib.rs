//! Rastly: Voodoo-style fixed-function software rasterizer
//!
//! An immediate-mode triangle rasterizer in the spirit of late-90s
//! fixed-function accelerators:
//! - Packed RGB565 color with a float depth buffer
//! - Edge-function triangle setup with the top-left fill rule
//! - Perspective-correct texturing and Gouraud modulation
//! - Strict-less depth testing with an independent write mask
//!
//! The caller transforms and lights; [`rasterizer::Rasterizer`] fills.
//! [`backend::RenderBackend`] abstracts the renderer behind a trait so the
//! demos run the same against the software implementation or anything else
//! that can fill triangles.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod backend;
pub mod error;
pub mod math;
pub mod rasterizer;
pub mod scene;

pub use backend::{RenderBackend, SoftwareBackend};
pub use error::Error;
pub use rasterizer::{
    Framebuffer, RasterStats, Rasterizer, Rgb565, TexFilter, Texture, Vertex, MAX_TEXTURE_SIZE,
};
