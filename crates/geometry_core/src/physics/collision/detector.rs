//! Collision predicates
//!
//! All tests are boolean and side-effect free. [`CollisionDetector`] carries
//! the [`CollisionConfig`] that decides what "parallel" means and how far a
//! ray reaches; [`CollisionDetector::exact`] is the zero-tolerance detector
//! behind the free functions in the parent module.

use super::primitives::{Line, Plane, Ray, Segment, Sphere, Triangle};
use crate::core::config::CollisionConfig;
use crate::foundation::math::Vector3;

/// A line-like primitive that can cross a plane
///
/// `Line`, `Ray` and `Segment` share the same parametric form
/// `origin + t * diff` and differ only in which `t` they accept.
pub trait PlaneIntersection {
    /// Parametric origin
    fn origin(&self) -> Vector3;

    /// Parametric direction
    fn diff(&self) -> Vector3;

    /// Whether the primitive covers parameter `t`
    fn accepts(&self, t: f32, config: &CollisionConfig) -> bool;

    /// Parameter where the primitive's carrier line meets `plane`, or `None`
    /// when `|dot(normal, diff)| <= parallel_tolerance`.
    ///
    /// A line lying inside the plane is also reported as `None`.
    fn plane_parameter(&self, plane: &Plane, parallel_tolerance: f32) -> Option<f32> {
        let dot = plane.normal.dot(self.diff());
        if dot.abs() <= parallel_tolerance {
            return None;
        }
        Some((plane.distance - self.origin().dot(plane.normal)) / dot)
    }
}

impl PlaneIntersection for Line {
    fn origin(&self) -> Vector3 {
        self.origin
    }

    fn diff(&self) -> Vector3 {
        self.diff
    }

    fn accepts(&self, _t: f32, _config: &CollisionConfig) -> bool {
        true
    }
}

impl PlaneIntersection for Ray {
    fn origin(&self) -> Vector3 {
        self.origin
    }

    fn diff(&self) -> Vector3 {
        self.diff
    }

    fn accepts(&self, t: f32, config: &CollisionConfig) -> bool {
        t >= config.ray_bound.min_parameter()
    }
}

impl PlaneIntersection for Segment {
    fn origin(&self) -> Vector3 {
        self.origin
    }

    fn diff(&self) -> Vector3 {
        self.diff
    }

    fn accepts(&self, t: f32, _config: &CollisionConfig) -> bool {
        (0.0..=1.0).contains(&t)
    }
}

/// Stateless collision tester parameterized by a [`CollisionConfig`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollisionDetector {
    config: CollisionConfig,
}

impl CollisionDetector {
    /// Exact comparisons and forward rays
    pub const fn exact() -> Self {
        Self {
            config: CollisionConfig::new(),
        }
    }

    /// Detector with the given configuration.
    ///
    /// A tolerance that [`CollisionConfig::validate`] rejects is replaced by
    /// zero. An infinite one would treat every direction as parallel; a
    /// negative or NaN one would treat none as parallel.
    pub fn new(mut config: CollisionConfig) -> Self {
        if !config.parallel_tolerance.is_finite() || config.parallel_tolerance < 0.0 {
            log::warn!(
                "parallel tolerance {} is invalid, using exact comparison",
                config.parallel_tolerance
            );
            config.parallel_tolerance = 0.0;
        }
        Self { config }
    }

    /// Active configuration
    pub const fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Two spheres touch or overlap (touching counts)
    pub fn sphere_sphere(&self, a: &Sphere, b: &Sphere) -> bool {
        a.intersects_sphere(b)
    }

    /// A sphere touches or crosses a plane
    pub fn sphere_plane(&self, sphere: &Sphere, plane: &Plane) -> bool {
        sphere.intersects_plane(plane)
    }

    /// A line, ray or segment crosses a plane
    ///
    /// Parallel inputs never collide, even when they lie in the plane.
    pub fn line_plane<L: PlaneIntersection>(&self, line: &L, plane: &Plane) -> bool {
        match line.plane_parameter(plane, self.config.parallel_tolerance) {
            Some(t) => {
                let hit = line.accepts(t, &self.config);
                if !hit {
                    log::trace!("plane parameter {t} outside primitive range");
                }
                hit
            }
            None => {
                log::trace!("direction parallel to plane, no collision");
                false
            }
        }
    }

    /// A segment passes through a triangle's interior or edges
    ///
    /// The crossing must be strictly between the endpoints: a segment that
    /// only touches the triangle's plane with an endpoint does not count.
    pub fn triangle_segment(&self, triangle: &Triangle, segment: &Segment) -> bool {
        let plane = triangle.plane();
        let Some(t) = segment.plane_parameter(&plane, self.config.parallel_tolerance) else {
            return false;
        };
        if t <= 0.0 || t >= 1.0 {
            return false;
        }

        let point = segment.point_at(t);
        triangle
            .edges()
            .iter()
            .all(|&(edge, end)| edge.cross(point - end).dot(plane.normal) >= 0.0)
    }
}
