//! # Unified Configuration
//!
//! Every tunable the crate exposes lives here: collision tolerances, the ray
//! parameter policy, projection and viewport parameters, and the logging
//! level. All types are serializable and load from TOML or RON through the
//! [`Config`] trait.
//!
//! ## Defaults
//!
//! Defaults reproduce exact-arithmetic behavior: a zero parallel tolerance,
//! so "parallel" means the direction is exactly perpendicular to the plane
//! normal in floating point.

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};
use crate::foundation::math::Matrix4x4;

/// Lower bound a ray's plane parameter must reach to count as a hit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RayBound {
    /// Accept `t >= 0`, the whole forward half-line
    #[default]
    Forward,
    /// Accept `t >= 1`, i.e. only beyond `origin + diff`. Kept for parity
    /// with older demo scenes that relied on it.
    Legacy,
}

impl RayBound {
    /// Smallest accepted parameter
    pub const fn min_parameter(self) -> f32 {
        match self {
            Self::Forward => 0.0,
            Self::Legacy => 1.0,
        }
    }
}

/// # Collision Configuration
///
/// Knobs for the line/plane family of predicates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// `|dot(normal, direction)|` at or below this is treated as parallel.
    /// Zero means exact comparison.
    pub parallel_tolerance: f32,
    /// Which ray parameters count as hits
    pub ray_bound: RayBound,
}

impl CollisionConfig {
    /// Exact comparisons, forward rays
    pub const fn new() -> Self {
        Self {
            parallel_tolerance: 0.0,
            ray_bound: RayBound::Forward,
        }
    }

    /// Set the parallel tolerance
    #[must_use]
    pub fn with_parallel_tolerance(mut self, tolerance: f32) -> Self {
        self.parallel_tolerance = tolerance;
        self
    }

    /// Set the ray bound policy
    #[must_use]
    pub fn with_ray_bound(mut self, ray_bound: RayBound) -> Self {
        self.ray_bound = ray_bound;
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Rejects a negative or non-finite tolerance.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.parallel_tolerance.is_finite() || self.parallel_tolerance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "parallel_tolerance must be finite and non-negative, got {}",
                self.parallel_tolerance
            )));
        }
        Ok(())
    }
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Projection Configuration
///
/// Perspective camera parameters. The aspect ratio comes from the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Full vertical field of view in radians
    pub fov_y: f32,
    /// Near clip distance
    pub near_clip: f32,
    /// Far clip distance
    pub far_clip: f32,
}

impl ProjectionConfig {
    /// Perspective matrix for the given aspect ratio
    pub fn to_matrix(&self, aspect_ratio: f32) -> Matrix4x4 {
        Matrix4x4::perspective_fov(self.fov_y, aspect_ratio, self.near_clip, self.far_clip)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Rejects a non-positive near plane, `far <= near`, or a field of view
    /// outside `(0, π)`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.near_clip <= 0.0 {
            return Err(ConfigError::Invalid("near_clip must be positive".to_string()));
        }
        if self.far_clip <= self.near_clip {
            return Err(ConfigError::Invalid(
                "far_clip must be greater than near_clip".to_string(),
            ));
        }
        if self.fov_y <= 0.0 || self.fov_y >= std::f32::consts::PI {
            return Err(ConfigError::Invalid(format!(
                "fov_y must be in (0, pi), got {}",
                self.fov_y
            )));
        }
        Ok(())
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_y: 0.45,
            near_clip: 0.1,
            far_clip: 100.0,
        }
    }
}

/// # Viewport Configuration
///
/// Pixel rectangle and depth range that NDC coordinates map onto.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Left edge in pixels
    pub left: f32,
    /// Top edge in pixels
    pub top: f32,
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
    /// Depth mapped from NDC z = 0
    pub min_depth: f32,
    /// Depth mapped from NDC z = 1
    pub max_depth: f32,
}

impl ViewportConfig {
    /// Width over height
    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    /// Viewport matrix
    pub fn to_matrix(&self) -> Matrix4x4 {
        Matrix4x4::viewport(
            self.left,
            self.top,
            self.width,
            self.height,
            self.min_depth,
            self.max_depth,
        )
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Rejects an empty pixel rectangle.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "viewport must have a positive size, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: 1280.0,
            height: 720.0,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level filter, overridden by `RUST_LOG`
    pub log_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// # Complete Configuration
///
/// Top-level configuration; this is what applications load from disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Collision predicate settings
    pub collision: CollisionConfig,
    /// Camera projection
    pub projection: ProjectionConfig,
    /// Screen mapping
    pub viewport: ViewportConfig,
    /// Logging
    pub logging: LoggingConfig,
}

impl GeometryConfig {
    /// Validate the entire configuration
    ///
    /// # Errors
    ///
    /// Returns the first failing section's error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.collision.validate()?;
        self.projection.validate()?;
        self.viewport.validate()?;
        Ok(())
    }

    /// Projection matrix using the viewport's aspect ratio
    pub fn projection_matrix(&self) -> Matrix4x4 {
        self.projection.to_matrix(self.viewport.aspect_ratio())
    }
}

impl Config for GeometryConfig {}
