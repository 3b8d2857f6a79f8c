//! Debug visualization helpers
//!
//! Screen-space line lists for grids, spheres, triangles, segments and planes,
//! plus text formatting for vectors.

pub mod draw;

pub use draw::{format_vector, Color, DebugDrawList, DebugLine, ScreenProjector};
