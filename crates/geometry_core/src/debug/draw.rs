//! Screen-space debug line lists
//!
//! World-space shapes are pushed through a view-projection and a viewport
//! matrix and stored as 2D line segments (z keeps the depth value). Nothing
//! here rasterizes; a renderer or a test consumes [`DebugDrawList::lines`].

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::foundation::math::{constants, Matrix4x4, Vector3};
use crate::physics::collision::{Plane, Segment, Sphere, Triangle};

/// Half-width of the ground grid in world units
pub const GRID_HALF_WIDTH: f32 = 2.0;
/// Cells along each grid axis
pub const GRID_SUBDIVISIONS: u32 = 10;
/// Latitude and longitude bands of a wireframe sphere
pub const SPHERE_SUBDIVISIONS: u32 = 30;
/// Half-size of the square drawn for a plane
pub const PLANE_HALF_SIZE: f32 = 2.0;

/// Packed `0xRRGGBBAA` color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    /// Opaque white
    pub const WHITE: Self = Self(0xFFFF_FFFF);
    /// Opaque black
    pub const BLACK: Self = Self(0x0000_00FF);
    /// Opaque red
    pub const RED: Self = Self(0xFF00_00FF);
    /// Opaque green
    pub const GREEN: Self = Self(0x00FF_00FF);
    /// Opaque blue
    pub const BLUE: Self = Self(0x0000_FFFF);
    /// Grid line gray
    pub const GRID_GRAY: Self = Self(0xAAAA_AAFF);

    /// Normalized `[r, g, b, a]`
    pub fn to_rgba(self) -> [f32; 4] {
        let [r, g, b, a] = self.0.to_be_bytes();
        [r, g, b, a].map(|c| f32::from(c) / 255.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// One screen-space line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugLine {
    /// Start in pixels
    pub start: Vector3,
    /// End in pixels
    pub end: Vector3,
    /// Line color
    pub color: Color,
}

/// Maps world points to screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenProjector {
    /// World to clip space (`view × projection`)
    pub view_projection: Matrix4x4,
    /// NDC to pixels
    pub viewport: Matrix4x4,
}

impl ScreenProjector {
    /// Create a projector from precomposed matrices
    pub const fn new(view_projection: Matrix4x4, viewport: Matrix4x4) -> Self {
        Self {
            view_projection,
            viewport,
        }
    }

    /// Project a world point to screen space
    ///
    /// # Panics
    ///
    /// Panics when the point lands on the camera plane (w = 0).
    pub fn project(&self, point: Vector3) -> Vector3 {
        let ndc = self.view_projection.transform_point(point);
        self.viewport.transform_point(ndc)
    }

    /// Project a world point, reporting a degenerate w instead of panicking
    ///
    /// # Errors
    ///
    /// [`GeometryError::DegenerateHomogeneous`] from either transform.
    pub fn try_project(&self, point: Vector3) -> Result<Vector3, GeometryError> {
        let ndc = self.view_projection.try_transform_point(point)?;
        self.viewport.try_transform_point(ndc)
    }
}

/// Collects projected debug lines
///
/// Lines whose endpoints cannot be projected are skipped.
#[derive(Debug, Clone)]
pub struct DebugDrawList {
    lines: Vec<DebugLine>,
    /// Master enable/disable flag
    pub enabled: bool,
}

impl DebugDrawList {
    /// Create an empty, enabled list
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            enabled: true,
        }
    }

    /// Project and store one world-space line
    pub fn line(&mut self, projector: &ScreenProjector, start: Vector3, end: Vector3, color: Color) {
        if !self.enabled {
            return;
        }

        match (projector.try_project(start), projector.try_project(end)) {
            (Ok(start), Ok(end)) => self.lines.push(DebugLine { start, end, color }),
            (Err(err), _) | (_, Err(err)) => {
                log::debug!("skipping debug line {start} -> {end}: {err}");
            }
        }
    }

    /// Ground grid on `y = 0`
    pub fn grid(&mut self, projector: &ScreenProjector) {
        let every = GRID_HALF_WIDTH * 2.0 / GRID_SUBDIVISIONS as f32;

        // Back to front, lines running along z
        for index in 0..=GRID_SUBDIVISIONS {
            let x = index as f32 * every - GRID_HALF_WIDTH;
            self.line(
                projector,
                Vector3::new(x, 0.0, -GRID_HALF_WIDTH),
                Vector3::new(x, 0.0, GRID_HALF_WIDTH),
                Color::GRID_GRAY,
            );
        }

        // Left to right, lines running along x
        for index in 0..=GRID_SUBDIVISIONS {
            let z = index as f32 * every - GRID_HALF_WIDTH;
            self.line(
                projector,
                Vector3::new(-GRID_HALF_WIDTH, 0.0, z),
                Vector3::new(GRID_HALF_WIDTH, 0.0, z),
                Color::GRID_GRAY,
            );
        }
    }

    /// Latitude/longitude wireframe sphere
    pub fn sphere(&mut self, projector: &ScreenProjector, sphere: &Sphere, color: Color) {
        let lon_every = constants::TAU / SPHERE_SUBDIVISIONS as f32;
        let lat_every = constants::PI / SPHERE_SUBDIVISIONS as f32;

        let surface = |lat: f32, lon: f32| {
            sphere.center
                + Vector3::new(lat.cos() * lon.cos(), lat.sin(), lat.cos() * lon.sin()) * sphere.radius
        };

        for lat_index in 0..SPHERE_SUBDIVISIONS {
            let lat = -constants::HALF_PI + lat_every * lat_index as f32;
            for lon_index in 0..SPHERE_SUBDIVISIONS {
                let lon = lon_every * lon_index as f32;

                let a = surface(lat, lon);
                let b = surface(lat + lat_every, lon);
                let c = surface(lat, lon + lon_every);

                self.line(projector, a, b, color);
                self.line(projector, a, c, color);
            }
        }
    }

    /// Triangle outline
    pub fn triangle(&mut self, projector: &ScreenProjector, triangle: &Triangle, color: Color) {
        let [v0, v1, v2] = triangle.vertices;
        self.line(projector, v0, v1, color);
        self.line(projector, v1, v2, color);
        self.line(projector, v2, v0, color);
    }

    /// Segment from origin to end
    pub fn segment(&mut self, projector: &ScreenProjector, segment: &Segment, color: Color) {
        self.line(projector, segment.origin, segment.end(), color);
    }

    /// Square patch of a plane centered on its point closest to the origin
    pub fn plane(&mut self, projector: &ScreenProjector, plane: &Plane, color: Color) {
        let center = plane.center();
        let (tangent, bitangent) = plane_axes(plane.normal);
        let u = tangent * PLANE_HALF_SIZE;
        let v = bitangent * PLANE_HALF_SIZE;

        let corners = [
            center + u + v,
            center - u + v,
            center - u - v,
            center + u - v,
        ];
        for (index, &corner) in corners.iter().enumerate() {
            self.line(projector, corner, corners[(index + 1) % corners.len()], color);
        }
    }

    /// All collected lines
    pub fn lines(&self) -> &[DebugLine] {
        &self.lines
    }

    /// Number of collected lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether no lines were collected
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drop every line
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl Default for DebugDrawList {
    fn default() -> Self {
        Self::new()
    }
}

/// Two unit vectors spanning the plane with normal `normal`
fn plane_axes(normal: Vector3) -> (Vector3, Vector3) {
    let tangent = if normal.x != 0.0 || normal.y != 0.0 {
        Vector3::new(-normal.y, normal.x, 0.0)
    } else {
        Vector3::new(0.0, -normal.z, normal.y)
    }
    .normalize();
    (tangent, normal.normalize().cross(tangent))
}

/// Vector as aligned two-decimal columns followed by a label
pub fn format_vector(vector: &Vector3, label: &str) -> String {
    format!("{:>8.2}{:>8.2}{:>8.2}  {label}", vector.x, vector.y, vector.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn identity_projector() -> ScreenProjector {
        ScreenProjector::new(Matrix4x4::IDENTITY, Matrix4x4::IDENTITY)
    }

    #[test]
    fn test_grid_line_count_and_extent() {
        let mut list = DebugDrawList::new();
        list.grid(&identity_projector());

        assert_eq!(list.len(), 22);
        assert!(list.lines().iter().all(|line| line.color == Color::GRID_GRAY));

        let first = list.lines()[0];
        assert_eq!(first.start, Vector3::new(-2.0, 0.0, -2.0));
        assert_eq!(first.end, Vector3::new(-2.0, 0.0, 2.0));

        let last = list.lines()[21];
        assert_relative_eq!(last.start, Vector3::new(-2.0, 0.0, 2.0), epsilon = 1e-6);
        assert_relative_eq!(last.end, Vector3::new(2.0, 0.0, 2.0), epsilon = 1e-6);
    }

    #[test]
    fn test_sphere_wireframe_stays_on_surface() {
        let sphere = Sphere::new(Vector3::new(1.0, -2.0, 0.5), 0.75);
        let mut list = DebugDrawList::new();
        list.sphere(&identity_projector(), &sphere, Color::RED);

        assert_eq!(list.len(), 1800);
        for line in list.lines() {
            assert_relative_eq!((line.start - sphere.center).length(), 0.75, epsilon = 1e-5);
            assert_relative_eq!((line.end - sphere.center).length(), 0.75, epsilon = 1e-5);
            assert_eq!(line.color, Color::RED);
        }
    }

    #[test]
    fn test_triangle_and_segment() {
        let triangle = Triangle::new(
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(-1.0, 0.0, 0.0),
        );
        let segment = Segment::new(Vector3::new(-0.45, 0.35, 0.0), Vector3::new(0.0, 0.5, 0.0));

        let mut list = DebugDrawList::new();
        list.triangle(&identity_projector(), &triangle, Color::WHITE);
        assert_eq!(list.len(), 3);
        assert_eq!(list.lines()[2].end, triangle.vertices[0]);

        list.segment(&identity_projector(), &segment, Color::RED);
        assert_eq!(list.len(), 4);
        assert_eq!(list.lines()[3].end, segment.end());
    }

    #[test]
    fn test_plane_square_lies_in_plane() {
        let plane = Plane::from_normal_and_point(Vector3::new(1.0, 2.0, -0.5), Vector3::new(0.0, 1.0, 0.0));
        let mut list = DebugDrawList::new();
        list.plane(&identity_projector(), &plane, Color::WHITE);

        assert_eq!(list.len(), 4);
        for line in list.lines() {
            assert_relative_eq!(plane.signed_distance(line.start), 0.0, epsilon = 1e-5);
            // Each edge of a square of half-size 2 has length 4
            assert_relative_eq!((line.end - line.start).length(), 4.0, epsilon = 1e-5);
        }
        assert_eq!(list.lines()[3].end, list.lines()[0].start);
    }

    #[test]
    fn test_plane_axes_for_z_normal() {
        let (u, v) = plane_axes(Vector3::Z);
        assert_relative_eq!(u.dot(Vector3::Z), 0.0);
        assert_relative_eq!(v.dot(Vector3::Z), 0.0);
        assert_relative_eq!(u.dot(v), 0.0);
        assert_relative_eq!(u.length(), 1.0);
    }

    #[test]
    fn test_unprojectable_line_is_skipped() {
        // w equals view-space z, so the camera origin cannot be projected
        let projector = ScreenProjector::new(
            Matrix4x4::perspective_fov(0.45, 16.0 / 9.0, 0.1, 100.0),
            Matrix4x4::viewport(0.0, 0.0, 1280.0, 720.0, 0.0, 1.0),
        );
        assert!(matches!(
            projector.try_project(Vector3::ZERO),
            Err(GeometryError::DegenerateHomogeneous { .. })
        ));

        let mut list = DebugDrawList::new();
        list.segment(&projector, &Segment::new(Vector3::ZERO, Vector3::Z), Color::WHITE);
        assert!(list.is_empty());

        list.segment(&projector, &Segment::new(Vector3::Z, Vector3::Z), Color::WHITE);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_disabled_list_collects_nothing() {
        let mut list = DebugDrawList::default();
        list.enabled = false;
        list.grid(&identity_projector());
        assert!(list.is_empty());

        list.enabled = true;
        list.grid(&identity_projector());
        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn test_color_channels() {
        assert_eq!(Color::RED.to_rgba(), [1.0, 0.0, 0.0, 1.0]);
        let [r, g, b, a] = Color::GRID_GRAY.to_rgba();
        assert_relative_eq!(r, 170.0 / 255.0);
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert_eq!(a, 1.0);
    }

    #[test]
    fn test_format_vector_columns() {
        let text = format_vector(&Vector3::new(1.0, -0.25, 12.5), "segment.origin");
        assert_eq!(text, "    1.00   -0.25   12.50  segment.origin");
    }
}
