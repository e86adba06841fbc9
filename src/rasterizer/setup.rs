//! Triangle setup: edge equations, signed area, attribute gradients
//!
//! Pure screen-space math, no state. Setup output is immutable for the
//! duration of a draw call; the traversal in `render` only reads it.
//!
//! Depth z and reciprocal-w interpolate linearly in screen space. Texture
//! coordinates and colors do not, so each vertex attribute is pre-multiplied
//! by that vertex's w; the products are linear, and the per-pixel value is
//! recovered by dividing by the interpolated w.

use serde::{Deserialize, Serialize};

/// Triangles with |doubled area| below this are culled as degenerate.
pub const DEGENERATE_AREA_EPSILON: f32 = 1e-4;

/// A screen-space vertex, submitted by the caller after T&L.
///
/// `x`, `y` are pixels with sub-pixel precision; `z` is depth in [0, 1]
/// (0 = near); `w` is the reciprocal of the clip-space W, expected > 0;
/// `u`, `v` are raw (undivided) texture coordinates; colors are in [0, 1].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
    pub u: f32,
    pub v: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Edge equation a*x + b*y + c = 0 for a directed triangle edge.
#[derive(Debug, Clone, Copy)]
pub struct EdgeEquation {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    /// Top edge (horizontal, traversed right-to-left) or left edge
    /// (trending downward). Pixels exactly on such an edge belong to this
    /// triangle; on any other edge they belong to the neighbor.
    pub top_left: bool,
}

impl EdgeEquation {
    /// Build the equation for the directed edge v0 -> v1.
    pub fn new(v0: &Vertex, v1: &Vertex) -> Self {
        let a = v0.y - v1.y;
        let b = v1.x - v0.x;
        let c = v0.x * v1.y - v1.x * v0.y;

        let is_top = a == 0.0 && b > 0.0;
        let is_left = a > 0.0;

        Self {
            a,
            b,
            c,
            top_left: is_top || is_left,
        }
    }

    #[inline]
    pub fn evaluate(&self, x: f32, y: f32) -> f32 {
        self.a * x + self.b * y + self.c
    }
}

/// Screen-space rate of change of one interpolated attribute.
#[derive(Debug, Clone, Copy)]
pub struct Gradient {
    pub dx: f32,
    pub dy: f32,
}

impl Gradient {
    fn new(
        a0: f32,
        a1: f32,
        a2: f32,
        dx01: f32,
        dy01: f32,
        dx02: f32,
        dy02: f32,
        inv_area2: f32,
    ) -> Self {
        let d01 = a1 - a0;
        let d02 = a2 - a0;
        Self {
            dx: (d01 * dy02 - d02 * dy01) * inv_area2,
            dy: (d02 * dx01 - d01 * dx02) * inv_area2,
        }
    }

    /// Interpolate from a base value at v0 by a pixel offset.
    #[inline]
    pub fn interpolate(&self, base: f32, dx: f32, dy: f32) -> f32 {
        base + self.dx * dx + self.dy * dy
    }
}

/// Everything the pixel traversal needs, built once per draw call.
#[derive(Debug, Clone)]
pub struct TriangleSetup {
    pub edges: [EdgeEquation; 3],
    /// Signed doubled area; positive = counter-clockwise winding.
    pub area2: f32,

    /// Pixel bounding box, clamped to the framebuffer extent.
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,

    /// Position of v0, the interpolation origin.
    pub x0: f32,
    pub y0: f32,

    /// Base values at v0 and their gradients. z and w are linear; the rest
    /// are the perspective-weighted products (attribute times vertex w).
    pub z0: f32,
    pub w0: f32,
    pub uw0: f32,
    pub vw0: f32,
    pub rw0: f32,
    pub gw0: f32,
    pub bw0: f32,
    pub aw0: f32,
    pub z: Gradient,
    pub w: Gradient,
    pub uw: Gradient,
    pub vw: Gradient,
    pub rw: Gradient,
    pub gw: Gradient,
    pub bw: Gradient,
    pub aw: Gradient,
}

impl TriangleSetup {
    /// Run triangle setup against a framebuffer extent.
    ///
    /// Returns `None` for degenerate (near-zero-area) triangles; no
    /// gradients are computed in that case.
    pub fn new(
        v0: &Vertex,
        v1: &Vertex,
        v2: &Vertex,
        fb_width: usize,
        fb_height: usize,
    ) -> Option<Self> {
        let edges = [
            EdgeEquation::new(v0, v1),
            EdgeEquation::new(v1, v2),
            EdgeEquation::new(v2, v0),
        ];

        // An empty framebuffer has no pixels to own; bail before the
        // bounding-box clamp, which needs a non-empty extent.
        if fb_width == 0 || fb_height == 0 {
            return None;
        }

        let area2 = (v1.x - v0.x) * (v2.y - v0.y) - (v2.x - v0.x) * (v1.y - v0.y);
        if area2.abs() < DEGENERATE_AREA_EPSILON {
            return None;
        }
        let inv_area2 = 1.0 / area2;

        let min_x = v0.x.min(v1.x).min(v2.x).floor() as i32;
        let min_y = v0.y.min(v1.y).min(v2.y).floor() as i32;
        let max_x = v0.x.max(v1.x).max(v2.x).ceil() as i32;
        let max_y = v0.y.max(v1.y).max(v2.y).ceil() as i32;

        let dx01 = v1.x - v0.x;
        let dy01 = v1.y - v0.y;
        let dx02 = v2.x - v0.x;
        let dy02 = v2.y - v0.y;

        let grad = |a0: f32, a1: f32, a2: f32| {
            Gradient::new(a0, a1, a2, dx01, dy01, dx02, dy02, inv_area2)
        };

        Some(Self {
            edges,
            area2,
            min_x: min_x.clamp(0, fb_width as i32 - 1),
            min_y: min_y.clamp(0, fb_height as i32 - 1),
            max_x: max_x.clamp(0, fb_width as i32 - 1),
            max_y: max_y.clamp(0, fb_height as i32 - 1),
            x0: v0.x,
            y0: v0.y,
            z0: v0.z,
            w0: v0.w,
            uw0: v0.u * v0.w,
            vw0: v0.v * v0.w,
            rw0: v0.r * v0.w,
            gw0: v0.g * v0.w,
            bw0: v0.b * v0.w,
            aw0: v0.a * v0.w,
            z: grad(v0.z, v1.z, v2.z),
            w: grad(v0.w, v1.w, v2.w),
            uw: grad(v0.u * v0.w, v1.u * v1.w, v2.u * v2.w),
            vw: grad(v0.v * v0.w, v1.v * v1.w, v2.v * v2.w),
            rw: grad(v0.r * v0.w, v1.r * v1.w, v2.r * v2.w),
            gw: grad(v0.g * v0.w, v1.g * v1.w, v2.g * v2.w),
            bw: grad(v0.b * v0.w, v1.b * v1.w, v2.b * v2.w),
            aw: grad(v0.a * v0.w, v1.a * v1.w, v2.a * v2.w),
        })
    }
}
