//! Voodoo-style fixed-function software rasterizer
//!
//! Immediate-mode triangle filling over a packed RGB565 framebuffer. The
//! caller does all transformation and lighting and submits screen-space
//! triangles; the core handles:
//! - Triangle setup: edge equations, signed area, per-attribute gradients
//! - Bounding-box traversal with the top-left fill rule
//! - Perspective-correct attribute recovery (attribute * 1/w interpolation)
//! - Depth testing (strict less, ties lose)
//! - Nearest and bilinear texture sampling with Gouraud modulation

mod color;
mod framebuffer;
mod render;
mod setup;
mod texture;

pub use color::*;
pub use framebuffer::*;
pub use render::*;
pub use setup::*;
pub use texture::*;

/// Maximum texture extent per axis.
pub const MAX_TEXTURE_SIZE: usize = 256;
