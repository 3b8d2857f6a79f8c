//! Physics module
//!
//! Currently only collision predicates; there is no response or integration.

pub mod collision;

pub use collision::{
    is_collision_line, is_collision_plane, is_collision_sphere, is_collision_triangle,
    CollisionDetector, Line, Plane, PlaneIntersection, Ray, Segment, Sphere, Triangle,
};
