//! 4x4 matrix type and transform builders
//!
//! Matrices are stored row-major and follow the row-vector convention: a
//! point is transformed as `p × M`, so translation lives in row 3 and a chain
//! `world × view × projection` applies `world` first. The builders below all
//! assume this convention; feeding a column-vector matrix to
//! [`Matrix4x4::transform_point`] gives the transpose of what you expect.

use std::ops::Mul;

use approx::{AbsDiffEq, RelativeEq};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use super::vector::Vector3;
use crate::error::GeometryError;

/// Row-major 4x4 matrix, row-vector convention
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Matrix4x4 {
    /// Entries indexed as `m[row][column]`
    pub m: [[f32; 4]; 4],
}

impl Default for Matrix4x4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4x4 {
    /// All-zero matrix, also the result of inverting a singular matrix
    pub const ZERO: Self = Self { m: [[0.0; 4]; 4] };

    /// Identity matrix
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Create a matrix from rows
    pub const fn from_rows(m: [[f32; 4]; 4]) -> Self {
        Self { m }
    }

    /// Matrix product `self × rhs`
    pub fn multiply(&self, rhs: &Self) -> Self {
        let mut result = Self::ZERO;
        for (i, row) in result.m.iter_mut().enumerate() {
            for (j, entry) in row.iter_mut().enumerate() {
                *entry = (0..4).map(|k| self.m[i][k] * rhs.m[k][j]).sum();
            }
        }
        result
    }

    /// Transposed copy
    pub fn transpose(&self) -> Self {
        let mut result = Self::ZERO;
        for (i, row) in result.m.iter_mut().enumerate() {
            for (j, entry) in row.iter_mut().enumerate() {
                *entry = self.m[j][i];
            }
        }
        result
    }

    /// Determinant of the 3x3 matrix left after deleting `row` and `column`
    fn minor(&self, row: usize, column: usize) -> f32 {
        let mut sub = [[0.0_f32; 3]; 3];
        for (r, i) in (0..4).filter(|&i| i != row).enumerate() {
            for (c, j) in (0..4).filter(|&j| j != column).enumerate() {
                sub[r][c] = self.m[i][j];
            }
        }

        sub[0][0] * (sub[1][1] * sub[2][2] - sub[1][2] * sub[2][1])
            - sub[0][1] * (sub[1][0] * sub[2][2] - sub[1][2] * sub[2][0])
            + sub[0][2] * (sub[1][0] * sub[2][1] - sub[1][1] * sub[2][0])
    }

    /// Signed minor
    fn cofactor(&self, row: usize, column: usize) -> f32 {
        let sign = if (row + column) % 2 == 0 { 1.0 } else { -1.0 };
        sign * self.minor(row, column)
    }

    /// Determinant by cofactor expansion along the first row
    pub fn determinant(&self) -> f32 {
        (0..4).map(|j| self.m[0][j] * self.cofactor(0, j)).sum()
    }

    /// Inverse via the adjugate, or `Err` when the determinant is exactly zero
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::SingularMatrix`] for a zero determinant.
    pub fn try_inverse(&self) -> Result<Self, GeometryError> {
        let determinant = self.determinant();
        if determinant == 0.0 {
            return Err(GeometryError::SingularMatrix);
        }

        let inverse_determinant = 1.0 / determinant;
        let mut result = Self::ZERO;
        for (i, row) in result.m.iter_mut().enumerate() {
            for (j, entry) in row.iter_mut().enumerate() {
                // adjugate is the transposed cofactor matrix
                *entry = self.cofactor(j, i) * inverse_determinant;
            }
        }
        Ok(result)
    }

    /// Inverse via the adjugate.
    ///
    /// A singular matrix yields [`Matrix4x4::ZERO`] rather than an error;
    /// callers that need to tell the cases apart should use
    /// [`Matrix4x4::try_inverse`].
    pub fn inverse(&self) -> Self {
        self.try_inverse().unwrap_or_else(|_| {
            log::debug!("inverse of singular matrix requested, returning zero matrix");
            Self::ZERO
        })
    }

    /// Translation by `t`
    pub const fn translation(t: Vector3) -> Self {
        Self {
            m: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [t.x, t.y, t.z, 1.0],
            ],
        }
    }

    /// Non-uniform scale by `s`
    pub const fn scale(s: Vector3) -> Self {
        Self {
            m: [
                [s.x, 0.0, 0.0, 0.0],
                [0.0, s.y, 0.0, 0.0],
                [0.0, 0.0, s.z, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Rotation about the X axis
    pub fn rotation_x(radian: f32) -> Self {
        let (sin, cos) = radian.sin_cos();
        Self {
            m: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, cos, sin, 0.0],
                [0.0, -sin, cos, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Rotation about the Y axis
    pub fn rotation_y(radian: f32) -> Self {
        let (sin, cos) = radian.sin_cos();
        Self {
            m: [
                [cos, 0.0, -sin, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [sin, 0.0, cos, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Rotation about the Z axis
    pub fn rotation_z(radian: f32) -> Self {
        let (sin, cos) = radian.sin_cos();
        Self {
            m: [
                [cos, sin, 0.0, 0.0],
                [-sin, cos, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Combined rotation `Rx(r.x) × Ry(r.y) × Rz(r.z)`
    pub fn rotation_xyz(rotate: Vector3) -> Self {
        Self::rotation_x(rotate.x)
            .multiply(&Self::rotation_y(rotate.y).multiply(&Self::rotation_z(rotate.z)))
    }

    /// Scale, then rotate, then translate.
    ///
    /// Scale is diagonal, so `S × R` is `R` with row `i` multiplied by `s_i`;
    /// the translation row is written directly. The result equals
    /// `scale(s) × rotation_xyz(r) × translation(t)`.
    pub fn affine(scale: Vector3, rotate: Vector3, translate: Vector3) -> Self {
        let rotation = Self::rotation_xyz(rotate);
        let factors = scale.to_array();

        let mut result = Self::IDENTITY;
        for (i, factor) in factors.iter().enumerate() {
            for j in 0..3 {
                result.m[i][j] = factor * rotation.m[i][j];
            }
        }
        result.m[3] = [translate.x, translate.y, translate.z, 1.0];
        result
    }

    /// Orthographic projection mapping the box to x,y ∈ [-1, 1], z ∈ [0, 1]
    pub fn orthographic(
        left: f32,
        top: f32,
        right: f32,
        bottom: f32,
        near_clip: f32,
        far_clip: f32,
    ) -> Self {
        Self {
            m: [
                [2.0 / (right - left), 0.0, 0.0, 0.0],
                [0.0, 2.0 / (top - bottom), 0.0, 0.0],
                [0.0, 0.0, 1.0 / (far_clip - near_clip), 0.0],
                [
                    (left + right) / (left - right),
                    (top + bottom) / (bottom - top),
                    near_clip / (near_clip - far_clip),
                    1.0,
                ],
            ],
        }
    }

    /// Left-handed perspective projection with depth mapped to [0, 1]
    ///
    /// `fov_y` is the full vertical field of view in radians.
    pub fn perspective_fov(fov_y: f32, aspect_ratio: f32, near_clip: f32, far_clip: f32) -> Self {
        let cot = 1.0 / (fov_y / 2.0).tan();
        let depth = far_clip / (far_clip - near_clip);
        Self {
            m: [
                [cot / aspect_ratio, 0.0, 0.0, 0.0],
                [0.0, cot, 0.0, 0.0],
                [0.0, 0.0, depth, 1.0],
                [0.0, 0.0, -near_clip * depth, 0.0],
            ],
        }
    }

    /// NDC to pixel mapping with a top-left origin (Y flipped)
    pub fn viewport(
        left: f32,
        top: f32,
        width: f32,
        height: f32,
        min_depth: f32,
        max_depth: f32,
    ) -> Self {
        Self {
            m: [
                [width / 2.0, 0.0, 0.0, 0.0],
                [0.0, -height / 2.0, 0.0, 0.0],
                [0.0, 0.0, max_depth - min_depth, 0.0],
                [left + width / 2.0, top + height / 2.0, min_depth, 1.0],
            ],
        }
    }

    /// Homogeneous product `(x, y, z, 1) × M` before the divide
    fn homogeneous(&self, v: Vector3) -> [f32; 4] {
        let mut out = [0.0_f32; 4];
        for (j, entry) in out.iter_mut().enumerate() {
            *entry = v.x * self.m[0][j] + v.y * self.m[1][j] + v.z * self.m[2][j] + self.m[3][j];
        }
        out
    }

    /// Transform a point and divide by the resulting w
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateHomogeneous`] when w is exactly zero.
    pub fn try_transform_point(&self, point: Vector3) -> Result<Vector3, GeometryError> {
        let [x, y, z, w] = self.homogeneous(point);
        if w == 0.0 {
            return Err(GeometryError::DegenerateHomogeneous { w });
        }
        Ok(Vector3::new(x / w, y / w, z / w))
    }

    /// Transform a point and divide by the resulting w.
    ///
    /// # Panics
    ///
    /// Panics when w is exactly zero, e.g. a point sitting on the eye plane of
    /// a perspective projection. This is a caller bug, not a recoverable
    /// condition; use [`Matrix4x4::try_transform_point`] to probe instead.
    pub fn transform_point(&self, point: Vector3) -> Vector3 {
        let [x, y, z, w] = self.homogeneous(point);
        assert!(w != 0.0, "homogeneous w is zero when transforming {point}");
        Vector3::new(x / w, y / w, z / w)
    }

    /// Apply the upper 3x3 block only (no translation, no divide)
    pub fn transform_vector(&self, v: Vector3) -> Vector3 {
        Vector3::new(
            v.x * self.m[0][0] + v.y * self.m[1][0] + v.z * self.m[2][0],
            v.x * self.m[0][1] + v.y * self.m[1][1] + v.z * self.m[2][1],
            v.x * self.m[0][2] + v.y * self.m[1][2] + v.z * self.m[2][2],
        )
    }

    /// Equivalent column-vector `nalgebra` matrix (the transpose)
    pub fn to_nalgebra(&self) -> nalgebra::Matrix4<f32> {
        nalgebra::Matrix4::from_fn(|row, column| self.m[column][row])
    }

    /// Build from a column-vector `nalgebra` matrix
    pub fn from_nalgebra(matrix: &nalgebra::Matrix4<f32>) -> Self {
        let mut result = Self::ZERO;
        for (i, row) in result.m.iter_mut().enumerate() {
            for (j, entry) in row.iter_mut().enumerate() {
                *entry = matrix[(j, i)];
            }
        }
        result
    }
}

impl Mul for Matrix4x4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl AbsDiffEq for Matrix4x4 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Matrix4x4 {
    fn default_max_relative() -> f32 {
        f32::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
