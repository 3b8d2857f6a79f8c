//! # Geometry Core
//!
//! 3D vector and 4x4 matrix math with boolean collision predicates for
//! spheres, planes, lines, rays, segments and triangles.
//!
//! ## Conventions
//!
//! - Points are row vectors multiplied on the left: `p' = p × M`
//! - Matrices are row-major, translation lives in row 3
//! - Planes are `dot(normal, p) == distance` with a unit normal
//!
//! ## Quick Start
//!
//! ```rust
//! use geometry_core::prelude::*;
//!
//! let triangle = Triangle::new(
//!     Vector3::new(0.0, 1.0, 0.0),
//!     Vector3::new(1.0, 0.0, 0.0),
//!     Vector3::new(-1.0, 0.0, 0.0),
//! );
//! let segment = Segment::new(Vector3::new(0.0, 0.3, -1.0), Vector3::new(0.0, 0.0, 2.0));
//! assert!(is_collision_triangle(&triangle, &segment));
//!
//! let world = Matrix4x4::affine(Vector3::new(1.0, 1.0, 1.0), Vector3::ZERO, Vector3::new(0.0, 0.0, 5.0));
//! assert_eq!(world.transform_point(Vector3::ZERO), Vector3::new(0.0, 0.0, 5.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::many_single_char_names,
    clippy::float_cmp
)]

pub mod core;

pub mod config;
pub mod debug;
pub mod error;
pub mod foundation;
pub mod physics;

pub use error::GeometryError;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        core::config::{CollisionConfig, Config, GeometryConfig, RayBound},
        debug::{Color, DebugDrawList, ScreenProjector},
        foundation::math::{Matrix4x4, Vector3},
        physics::collision::{
            is_collision_line, is_collision_plane, is_collision_sphere, is_collision_triangle,
            CollisionDetector, Line, Plane, PlaneIntersection, Ray, Segment, Sphere, Triangle,
        },
        GeometryError,
    };
}
