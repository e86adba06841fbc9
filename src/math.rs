//! Vector and matrix math for the demo transform stage
//!
//! The rasterizer itself consumes screen-space vertices; this module is the
//! model/view/projection glue the demos use to produce them.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// 2D Vector
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> Vec3 {
        let l = self.len();
        if l < 1e-4 {
            return self;
        }
        Vec3 {
            x: self.x / l,
            y: self.y / l,
            z: self.z / l,
        }
    }

    pub fn scale(self, s: f32) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f32) -> Vec3 {
        self.scale(s)
    }
}

/// Homogeneous 4D vector.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn from_point(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z, 1.0)
    }
}

/// Row-major 4x4 matrix.
#[derive(Debug, Clone, Copy)]
pub struct Mat4 {
    pub m: [[f32; 4]; 4],
}

impl Mat4 {
    pub fn identity() -> Self {
        let mut m = [[0.0; 4]; 4];
        for (i, row) in m.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        Self { m }
    }

    pub fn multiply(self, other: Mat4) -> Mat4 {
        let mut r = [[0.0; 4]; 4];
        for i in 0..4 {
            for j in 0..4 {
                for k in 0..4 {
                    r[i][j] += self.m[i][k] * other.m[k][j];
                }
            }
        }
        Mat4 { m: r }
    }

    pub fn transform(self, v: Vec4) -> Vec4 {
        let m = &self.m;
        Vec4 {
            x: m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z + m[0][3] * v.w,
            y: m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z + m[1][3] * v.w,
            z: m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z + m[2][3] * v.w,
            w: m[3][0] * v.x + m[3][1] * v.y + m[3][2] * v.z + m[3][3] * v.w,
        }
    }

    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        let tan_half_fov = (fov_y / 2.0).tan();
        let mut m = [[0.0; 4]; 4];
        m[0][0] = 1.0 / (aspect * tan_half_fov);
        m[1][1] = 1.0 / tan_half_fov;
        m[2][2] = -(far + near) / (far - near);
        m[2][3] = -(2.0 * far * near) / (far - near);
        m[3][2] = -1.0;
        Mat4 { m }
    }

    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let f = (target - eye).normalize();
        let r = f.cross(up).normalize();
        let u = r.cross(f);

        let mut mat = Mat4::identity();
        let m = &mut mat.m;
        m[0][0] = r.x;
        m[0][1] = r.y;
        m[0][2] = r.z;
        m[1][0] = u.x;
        m[1][1] = u.y;
        m[1][2] = u.z;
        m[2][0] = -f.x;
        m[2][1] = -f.y;
        m[2][2] = -f.z;
        m[0][3] = -r.dot(eye);
        m[1][3] = -u.dot(eye);
        m[2][3] = f.dot(eye);
        mat
    }

    pub fn translate(x: f32, y: f32, z: f32) -> Mat4 {
        let mut mat = Mat4::identity();
        mat.m[0][3] = x;
        mat.m[1][3] = y;
        mat.m[2][3] = z;
        mat
    }

    pub fn rotate_x(angle: f32) -> Mat4 {
        let (s, c) = angle.sin_cos();
        let mut mat = Mat4::identity();
        mat.m[1][1] = c;
        mat.m[1][2] = -s;
        mat.m[2][1] = s;
        mat.m[2][2] = c;
        mat
    }

    pub fn rotate_y(angle: f32) -> Mat4 {
        let (s, c) = angle.sin_cos();
        let mut mat = Mat4::identity();
        mat.m[0][0] = c;
        mat.m[0][2] = s;
        mat.m[2][0] = -s;
        mat.m[2][2] = c;
        mat
    }

    pub fn rotate_z(angle: f32) -> Mat4 {
        let (s, c) = angle.sin_cos();
        let mut mat = Mat4::identity();
        mat.m[0][0] = c;
        mat.m[0][1] = -s;
        mat.m[1][0] = s;
        mat.m[1][1] = c;
        mat
    }

    pub fn scale(x: f32, y: f32, z: f32) -> Mat4 {
        let mut mat = Mat4::identity();
        mat.m[0][0] = x;
        mat.m[1][1] = y;
        mat.m[2][2] = z;
        mat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec3_dot() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert!((a.dot(b) - 32.0).abs() < 0.001);
    }

    #[test]
    fn vec3_cross() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        assert!((a.cross(b).z - 1.0).abs() < 0.001);
    }

    #[test]
    fn identity_transform_is_noop() {
        let v = Vec4::new(1.0, 2.0, 3.0, 1.0);
        let r = Mat4::identity().transform(v);
        assert!((r.x - 1.0).abs() < 1e-6);
        assert!((r.y - 2.0).abs() < 1e-6);
        assert!((r.z - 3.0).abs() < 1e-6);
        assert!((r.w - 1.0).abs() < 1e-6);
    }

    #[test]
    fn perspective_divide_shrinks_with_distance() {
        let proj = Mat4::perspective(std::f32::consts::FRAC_PI_3, 1.0, 0.1, 100.0);
        let near = proj.transform(Vec4::new(1.0, 0.0, -2.0, 1.0));
        let far = proj.transform(Vec4::new(1.0, 0.0, -10.0, 1.0));
        assert!((near.x / near.w).abs() > (far.x / far.w).abs());
    }

    #[test]
    fn look_at_maps_target_to_negative_z() {
        let view = Mat4::look_at(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::ZERO,
            Vec3::new(0.0, 1.0, 0.0),
        );
        let t = view.transform(Vec4::from_point(Vec3::ZERO));
        assert!(t.z < 0.0);
        assert!(t.x.abs() < 1e-6 && t.y.abs() < 1e-6);
    }
}
