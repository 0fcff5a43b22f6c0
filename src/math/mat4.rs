//! 4x4 transformation matrix using a column-vector convention.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat4 * Vec`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//! - Rotations and the projection are right-handed; view space looks down -Z

use std::ops::Mul;

use super::vec3::Vec3;
use super::vec4::Vec4;

/// 4x4 matrix stored as `data[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Mat4 {
    pub fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix.
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a scale matrix.
    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the X axis.
    pub fn rotation_x(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Y axis.
    pub fn rotation_y(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Z axis.
    pub fn rotation_z(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix of `angle` radians around an arbitrary axis.
    ///
    /// The axis does not need to be normalized.
    pub fn rotation(angle: f32, axis: Vec3) -> Self {
        let k = axis.normalize();
        let c = angle.cos();
        let s = angle.sin();
        let t = 1.0 - c;
        Mat4::new([
            [
                c + k.x * k.x * t,
                k.x * k.y * t - k.z * s,
                k.x * k.z * t + k.y * s,
                0.0,
            ],
            [
                k.y * k.x * t + k.z * s,
                c + k.y * k.y * t,
                k.y * k.z * t - k.x * s,
                0.0,
            ],
            [
                k.z * k.x * t - k.y * s,
                k.z * k.y * t + k.x * s,
                c + k.z * k.z * t,
                0.0,
            ],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a right-handed perspective projection with a [-1, 1] clip range.
    pub fn perspective(fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let g = 1.0 / (fov_y / 2.0).tan();
        Mat4::new([
            [g / aspect_ratio, 0.0, 0.0, 0.0],
            [0.0, g, 0.0, 0.0],
            [
                0.0,
                0.0,
                (far + near) / (near - far),
                2.0 * far * near / (near - far),
            ],
            [0.0, 0.0, -1.0, 0.0],
        ])
    }

    /// Creates a right-handed view matrix looking from `eye` toward `target`.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let f = (target - eye).normalize();
        let s = f.cross(up).normalize();
        let u = s.cross(f);
        Mat4::new([
            [s.x, s.y, s.z, -s.dot(eye)],
            [u.x, u.y, u.z, -u.dot(eye)],
            [-f.x, -f.y, -f.z, f.dot(eye)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Inverts an affine transform (last row `0 0 0 1`).
    ///
    /// Model-view matrices in this pipeline are always affine, so the
    /// general cofactor expansion is not needed.
    pub fn inverse_affine(&self) -> Self {
        let m = &self.data;

        let c00 = m[1][1] * m[2][2] - m[1][2] * m[2][1];
        let c01 = m[1][2] * m[2][0] - m[1][0] * m[2][2];
        let c02 = m[1][0] * m[2][1] - m[1][1] * m[2][0];
        let det = m[0][0] * c00 + m[0][1] * c01 + m[0][2] * c02;
        let inv_det = 1.0 / det;

        let i00 = c00 * inv_det;
        let i01 = (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv_det;
        let i02 = (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv_det;
        let i10 = c01 * inv_det;
        let i11 = (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv_det;
        let i12 = (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv_det;
        let i20 = c02 * inv_det;
        let i21 = (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv_det;
        let i22 = (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv_det;

        let tx = -(i00 * m[0][3] + i01 * m[1][3] + i02 * m[2][3]);
        let ty = -(i10 * m[0][3] + i11 * m[1][3] + i12 * m[2][3]);
        let tz = -(i20 * m[0][3] + i21 * m[1][3] + i22 * m[2][3]);

        Mat4::new([
            [i00, i01, i02, tx],
            [i10, i11, i12, ty],
            [i20, i21, i22, tz],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }
}

/// Matrix multiplication: Mat4 * Mat4.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for row in 0..4 {
            for col in 0..4 {
                result[row][col] = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Transform a Vec4 by a matrix: Mat4 * Vec4 (column vector).
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        Vec4::new(
            self.data[0][0] * v.x
                + self.data[0][1] * v.y
                + self.data[0][2] * v.z
                + self.data[0][3] * v.w,
            self.data[1][0] * v.x
                + self.data[1][1] * v.y
                + self.data[1][2] * v.z
                + self.data[1][3] * v.w,
            self.data[2][0] * v.x
                + self.data[2][1] * v.y
                + self.data[2][2] * v.z
                + self.data[2][3] * v.w,
            self.data[3][0] * v.x
                + self.data[3][1] * v.y
                + self.data[3][2] * v.z
                + self.data[3][3] * v.w,
        )
    }
}
