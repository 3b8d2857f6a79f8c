//! Three-component vector type
//!
//! `Vector3` is a plain `f32` triple used both as a point and as a direction.
//! Arithmetic is exposed through the standard operator traits so collision
//! code reads like the formulas it implements.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use approx::{AbsDiffEq, RelativeEq};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// A 3D vector or point
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vector3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vector3 {
    /// The zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// Unit X axis
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    /// Unit Y axis
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    /// Unit Z axis
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Create a vector from its components
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Dot product
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Right-handed cross product
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Squared Euclidean length
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Euclidean length, zero for the zero vector
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Unit vector with the same direction.
    ///
    /// Every component is divided by the full length, so partially-zero
    /// vectors such as `(3, 0, 4)` come out unit length. The zero vector has
    /// no direction and maps to itself.
    pub fn normalize(self) -> Self {
        let length = self.length();
        if length == 0.0 {
            return Self::ZERO;
        }
        Self::new(self.x / length, self.y / length, self.z / length)
    }

    /// Orthogonal projection of `self` onto the direction of `onto`
    ///
    /// Returns the zero vector when `onto` is zero.
    pub fn project_onto(self, onto: Self) -> Self {
        let direction = onto.normalize();
        direction * self.dot(direction)
    }

    /// Components as an array
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vector3> for [f32; 3] {
    fn from(v: Vector3) -> Self {
        v.to_array()
    }
}

impl From<Vector3> for nalgebra::Vector3<f32> {
    fn from(v: Vector3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<nalgebra::Vector3<f32>> for Vector3 {
    fn from(v: nalgebra::Vector3<f32>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<f32> for Vector3 {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Mul<Vector3> for f32 {
    type Output = Vector3;

    fn mul(self, v: Vector3) -> Vector3 {
        v * self
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

impl AbsDiffEq for Vector3 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl RelativeEq for Vector3 {
    fn default_max_relative() -> f32 {
        f32::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_arithmetic_is_component_wise() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, -5.0, 6.0);

        assert_eq!(a + b, Vector3::new(5.0, -3.0, 9.0));
        assert_eq!(a - b, Vector3::new(-3.0, 7.0, -3.0));
        assert_eq!(2.0 * a, Vector3::new(2.0, 4.0, 6.0));
        assert_eq!(a * 2.0, 2.0 * a);
        assert_eq!(-a, Vector3::new(-1.0, -2.0, -3.0));

        let mut c = a;
        c += b;
        c -= a;
        assert_eq!(c, b);
    }

    #[test]
    fn test_dot_and_cross() {
        let a = Vector3::new(1.0, 3.0, -5.0);
        let b = Vector3::new(4.0, -2.0, -1.0);
        assert_relative_eq!(a.dot(b), 3.0, epsilon = EPSILON);

        // Right-handed basis
        assert_eq!(Vector3::X.cross(Vector3::Y), Vector3::Z);
        assert_eq!(Vector3::Y.cross(Vector3::Z), Vector3::X);
        assert_eq!(Vector3::Z.cross(Vector3::X), Vector3::Y);

        let c = a.cross(b);
        assert_relative_eq!(c.dot(a), 0.0, epsilon = EPSILON);
        assert_relative_eq!(c.dot(b), 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_length() {
        assert_relative_eq!(Vector3::new(3.0, 4.0, 12.0).length(), 13.0, epsilon = EPSILON);
        assert_eq!(Vector3::ZERO.length(), 0.0);
    }

    #[test]
    fn test_normalize_partially_zero_vector_is_unit() {
        // (3, 0, 4) has a zero component; every non-zero component must still
        // be divided by the full length.
        let n = Vector3::new(3.0, 0.0, 4.0).normalize();
        assert_relative_eq!(n, Vector3::new(0.6, 0.0, 0.8), epsilon = EPSILON);
        assert_relative_eq!(n.length(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_normalize_zero_vector() {
        assert_eq!(Vector3::ZERO.normalize(), Vector3::ZERO);
    }

    #[test]
    fn test_normalize_many_directions() {
        let directions = [
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(-2.0, 0.5, 0.0),
            Vector3::new(0.0, 0.0, -7.0),
            Vector3::new(1e-3, 2e-3, -3e-3),
            Vector3::new(120.0, -80.0, 33.0),
        ];
        for v in directions {
            assert_relative_eq!(v.normalize().length(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_project_scales_all_components() {
        let v = Vector3::new(2.0, 3.0, 4.0);
        let onto = Vector3::new(1.0, 1.0, 1.0);
        // dot(v, n) * n with n = onto / sqrt(3) gives (3, 3, 3)
        let p = v.project_onto(onto);
        assert_relative_eq!(p, Vector3::new(3.0, 3.0, 3.0), epsilon = 1e-5);

        let along_z = Vector3::new(5.0, -1.0, 2.0).project_onto(Vector3::new(0.0, 0.0, 10.0));
        assert_relative_eq!(along_z, Vector3::new(0.0, 0.0, 2.0), epsilon = EPSILON);
    }

    #[test]
    fn test_project_onto_zero_vector() {
        assert_eq!(Vector3::new(1.0, 2.0, 3.0).project_onto(Vector3::ZERO), Vector3::ZERO);
    }

    #[test]
    fn test_nalgebra_conversion() {
        let v = Vector3::new(1.5, -2.0, 0.25);
        let na: nalgebra::Vector3<f32> = v.into();
        assert_eq!(na, nalgebra::Vector3::new(1.5, -2.0, 0.25));
        assert_eq!(Vector3::from(na), v);

        // Cross product agrees with nalgebra
        let w = Vector3::new(-3.0, 0.5, 4.0);
        let expected = Vector3::from(na.cross(&w.into()));
        assert_relative_eq!(v.cross(w), expected, epsilon = EPSILON);
    }

    #[test]
    fn test_bytes_layout() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), 12);
        let floats: &[f32] = bytemuck::cast_slice(bytes);
        assert_eq!(floats, &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_display_uses_two_decimals() {
        assert_eq!(Vector3::new(1.0, -0.25, 1.0 / 3.0).to_string(), "(1.00, -0.25, 0.33)");
    }
}
