//! Demo scene: a spinning textured cube
//!
//! Geometry, the clip-to-screen transform, and the RON-loadable demo
//! configuration shared by the interactive and headless frontends.

use serde::{Deserialize, Serialize};

use crate::math::{Mat4, Vec3, Vec4};
use crate::rasterizer::{TexFilter, Vertex};

/// 24 unique vertices, four per face, front/back/top/bottom/right/left.
pub const CUBE_POSITIONS: [Vec3; 24] = [
    // Front
    Vec3 { x: -1.0, y: -1.0, z: 1.0 },
    Vec3 { x: 1.0, y: -1.0, z: 1.0 },
    Vec3 { x: 1.0, y: 1.0, z: 1.0 },
    Vec3 { x: -1.0, y: 1.0, z: 1.0 },
    // Back
    Vec3 { x: 1.0, y: -1.0, z: -1.0 },
    Vec3 { x: -1.0, y: -1.0, z: -1.0 },
    Vec3 { x: -1.0, y: 1.0, z: -1.0 },
    Vec3 { x: 1.0, y: 1.0, z: -1.0 },
    // Top
    Vec3 { x: -1.0, y: 1.0, z: 1.0 },
    Vec3 { x: 1.0, y: 1.0, z: 1.0 },
    Vec3 { x: 1.0, y: 1.0, z: -1.0 },
    Vec3 { x: -1.0, y: 1.0, z: -1.0 },
    // Bottom
    Vec3 { x: -1.0, y: -1.0, z: -1.0 },
    Vec3 { x: 1.0, y: -1.0, z: -1.0 },
    Vec3 { x: 1.0, y: -1.0, z: 1.0 },
    Vec3 { x: -1.0, y: -1.0, z: 1.0 },
    // Right
    Vec3 { x: 1.0, y: -1.0, z: 1.0 },
    Vec3 { x: 1.0, y: -1.0, z: -1.0 },
    Vec3 { x: 1.0, y: 1.0, z: -1.0 },
    Vec3 { x: 1.0, y: 1.0, z: 1.0 },
    // Left
    Vec3 { x: -1.0, y: -1.0, z: -1.0 },
    Vec3 { x: -1.0, y: -1.0, z: 1.0 },
    Vec3 { x: -1.0, y: 1.0, z: 1.0 },
    Vec3 { x: -1.0, y: 1.0, z: -1.0 },
];

/// One (u, v) pair per vertex, same square mapping on every face.
pub const CUBE_UVS: [(f32, f32); 24] = [
    (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0), // Front
    (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0), // Back
    (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0), // Top
    (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0), // Bottom
    (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0), // Right
    (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0), // Left
];

/// Per-face tint, multiplied into the texture when modulation is on.
pub const FACE_COLORS: [Vec3; 6] = [
    Vec3 { x: 1.0, y: 0.8, z: 0.8 }, // Front
    Vec3 { x: 0.8, y: 1.0, z: 0.8 }, // Back
    Vec3 { x: 0.8, y: 0.8, z: 1.0 }, // Top
    Vec3 { x: 1.0, y: 1.0, z: 0.8 }, // Bottom
    Vec3 { x: 1.0, y: 0.8, z: 1.0 }, // Right
    Vec3 { x: 0.8, y: 1.0, z: 1.0 }, // Left
];

/// Two triangles per face, counter-clockwise when the face points at
/// the camera.
pub const CUBE_INDICES: [u16; 36] = [
    0, 1, 2, 0, 2, 3, // Front
    4, 5, 6, 4, 6, 7, // Back
    8, 9, 10, 8, 10, 11, // Top
    12, 13, 14, 12, 14, 15, // Bottom
    16, 17, 18, 16, 18, 19, // Right
    20, 21, 22, 20, 22, 23, // Left
];

/// Project a model-space position to a screen-space vertex.
///
/// Applies the perspective divide, flips Y so screen Y grows downward,
/// maps NDC depth to [0, 1], and carries 1/clip.w in `w` so the
/// rasterizer can recover perspective-correct attributes.
pub fn transform_vertex(
    pos: Vec3,
    uv: (f32, f32),
    color: Vec3,
    mvp: &Mat4,
    screen_width: usize,
    screen_height: usize,
) -> Vertex {
    let clip = mvp.transform(Vec4::from_point(pos));

    let inv_w = 1.0 / clip.w;
    let ndc_x = clip.x * inv_w;
    let ndc_y = clip.y * inv_w;
    let ndc_z = clip.z * inv_w;

    Vertex {
        x: (ndc_x + 1.0) * 0.5 * screen_width as f32,
        y: (1.0 - ndc_y) * 0.5 * screen_height as f32,
        z: (ndc_z + 1.0) * 0.5,
        w: inv_w,
        u: uv.0,
        v: uv.1,
        r: color.x,
        g: color.y,
        b: color.z,
        a: 1.0,
    }
}

/// Transform the whole cube for one animation frame.
///
/// Returns 36 screen-space vertices, three per triangle, ready for
/// [`crate::rasterizer::Rasterizer::draw_triangles`].
pub fn cube_frame(mvp: &Mat4, screen_width: usize, screen_height: usize) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(CUBE_INDICES.len());
    for (tri, corners) in CUBE_INDICES.chunks_exact(3).enumerate() {
        let color = FACE_COLORS[tri / 2];
        for &idx in corners {
            let idx = idx as usize;
            out.push(transform_vertex(
                CUBE_POSITIONS[idx],
                CUBE_UVS[idx],
                color,
                mvp,
                screen_width,
                screen_height,
            ));
        }
    }
    out
}

/// Model-view-projection matrix for a given spin angle.
pub fn cube_mvp(angle: f32, aspect: f32) -> Mat4 {
    let view = Mat4::look_at(
        Vec3::new(0.0, 0.0, 4.0),
        Vec3::ZERO,
        Vec3::new(0.0, 1.0, 0.0),
    );
    let proj = Mat4::perspective(std::f32::consts::FRAC_PI_4, aspect, 0.1, 100.0);
    let model = Mat4::rotate_y(angle).multiply(Mat4::rotate_x(0.3));
    proj.multiply(view.multiply(model))
}

/// Demo settings, loadable from a RON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub width: usize,
    pub height: usize,
    pub frames: usize,
    pub texture_size: usize,
    pub check_size: usize,
    pub texturing: bool,
    pub modulation: bool,
    pub depth_test: bool,
    pub tex_filter: TexFilter,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            frames: 60,
            texture_size: 64,
            check_size: 8,
            texturing: true,
            modulation: true,
            depth_test: true,
            tex_filter: TexFilter::Bilinear,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_frame_produces_whole_triangles() {
        let mvp = cube_mvp(0.0, 1.0);
        let verts = cube_frame(&mvp, 64, 64);
        assert_eq!(verts.len(), 36);
    }

    #[test]
    fn transform_centers_the_origin() {
        let mvp = cube_mvp(0.0, 1.0);
        let v = transform_vertex(
            Vec3::ZERO,
            (0.0, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
            &mvp,
            64,
            64,
        );
        assert!((v.x - 32.0).abs() < 0.01);
        assert!((v.y - 32.0).abs() < 0.01);
        assert!(v.z > 0.0 && v.z < 1.0);
        assert!(v.w > 0.0);
    }

    #[test]
    fn closer_points_carry_larger_inv_w() {
        let mvp = cube_mvp(0.0, 1.0);
        let white = Vec3::new(1.0, 1.0, 1.0);
        let near = transform_vertex(Vec3::new(0.0, 0.0, 1.0), (0.0, 0.0), white, &mvp, 64, 64);
        let far = transform_vertex(Vec3::new(0.0, 0.0, -1.0), (0.0, 0.0), white, &mvp, 64, 64);
        assert!(near.w > far.w);
    }

    #[test]
    fn config_round_trips_through_ron() {
        let config = DemoConfig {
            frames: 12,
            tex_filter: TexFilter::Nearest,
            ..Default::default()
        };
        let text = ron::to_string(&config).unwrap();
        let back: DemoConfig = ron::from_str(&text).unwrap();
        assert_eq!(back.frames, 12);
        assert_eq!(back.tex_filter, TexFilter::Nearest);
    }

    #[test]
    fn config_accepts_partial_ron() {
        let back: DemoConfig = ron::from_str("(frames: 5)").unwrap();
        assert_eq!(back.frames, 5);
        assert_eq!(back.width, 64);
    }
}
