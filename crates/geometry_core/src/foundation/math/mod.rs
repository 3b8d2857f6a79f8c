//! Math utilities and types
//!
//! Provides the vector and matrix value types the collision predicates are
//! built on, plus the scalar clamp used by segment queries.

pub mod matrix;
pub mod vector;

pub use matrix::Matrix4x4;
pub use vector::Vector3;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;
}

/// Math utility functions
pub mod utils {
    /// Clamp a value between min and max
    ///
    /// Unlike `f32::clamp` this never panics when `min > max`; the lower
    /// bound is checked first.
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min {
            min
        } else if value > max {
            max
        } else {
            value
        }
    }

}
