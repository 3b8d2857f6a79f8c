//! Collision predicates between simple primitives
//!
//! Boolean intersection tests for spheres, planes, lines, rays, segments and
//! triangles. Every test is a pure function of its inputs.
//!
//! # Module Organization
//!
//! - [`primitives`] - Value types for the shapes
//! - [`detector`] - [`CollisionDetector`] and the [`PlaneIntersection`] trait
//!
//! # Key Functions
//!
//! - [`is_collision_sphere`], [`is_collision_plane`] - sphere tests, touching counts
//! - [`is_collision_line`] - any [`PlaneIntersection`] against a plane
//! - [`is_collision_triangle`] - segment through a triangle
//!
//! The free functions use [`CollisionDetector::exact`]. Build a detector from
//! a [`CollisionConfig`](crate::core::config::CollisionConfig) for a parallel
//! tolerance or the legacy ray bound.

pub mod detector;
pub mod primitives;

pub use detector::{CollisionDetector, PlaneIntersection};
pub use primitives::{Line, Plane, Ray, Segment, Sphere, Triangle};

/// Two spheres touch or overlap
pub fn is_collision_sphere(a: &Sphere, b: &Sphere) -> bool {
    CollisionDetector::exact().sphere_sphere(a, b)
}

/// A sphere touches or crosses a plane
pub fn is_collision_plane(sphere: &Sphere, plane: &Plane) -> bool {
    CollisionDetector::exact().sphere_plane(sphere, plane)
}

/// A line, ray or segment crosses a plane
pub fn is_collision_line<L: PlaneIntersection>(line: &L, plane: &Plane) -> bool {
    CollisionDetector::exact().line_plane(line, plane)
}

/// A segment passes through a triangle
pub fn is_collision_triangle(triangle: &Triangle, segment: &Segment) -> bool {
    CollisionDetector::exact().triangle_segment(triangle, segment)
}
