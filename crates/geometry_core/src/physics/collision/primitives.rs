//! Primitive collision shapes
//!
//! Plain value types (spheres, planes, lines, rays, segments, triangles).
//! Nothing here owns anything beyond its fields; predicates live in the
//! parent module and only ever read these.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{utils, Vector3};

/// A sphere given by center and radius
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    /// The center position of the sphere
    pub center: Vector3,
    /// The radius of the sphere, expected non-negative
    pub radius: f32,
}

impl Sphere {
    /// Creates a new sphere with the given center and radius
    pub const fn new(center: Vector3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Touches or overlaps `other`
    pub fn intersects_sphere(&self, other: &Self) -> bool {
        (self.center - other.center).length() <= self.radius + other.radius
    }

    /// Touches or crosses `plane`
    pub fn intersects_plane(&self, plane: &Plane) -> bool {
        plane.signed_distance(self.center).abs() <= self.radius
    }
}

/// An infinite plane `dot(normal, p) == distance`
///
/// The normal is expected to be unit length. Predicates never renormalize it,
/// so a non-unit normal scales every distance they compute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Plane normal (caller-normalized)
    pub normal: Vector3,
    /// Signed offset from the origin along the normal
    pub distance: f32,
}

impl Default for Plane {
    fn default() -> Self {
        Self::new(Vector3::Y, 0.0)
    }
}

impl Plane {
    /// Creates a plane from a normal and a signed distance
    pub const fn new(normal: Vector3, distance: f32) -> Self {
        Self { normal, distance }
    }

    /// Plane through `point` facing `normal` (normalized here)
    pub fn from_normal_and_point(normal: Vector3, point: Vector3) -> Self {
        let normal = normal.normalize();
        Self::new(normal, normal.dot(point))
    }

    /// Signed distance from the plane, positive on the normal side
    pub fn signed_distance(&self, point: Vector3) -> f32 {
        self.normal.dot(point) - self.distance
    }

    /// The point of the plane closest to the origin
    pub fn center(&self) -> Vector3 {
        self.normal * self.distance
    }
}

/// An infinite line through `origin` along `diff`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// A point on the line
    pub origin: Vector3,
    /// Direction, non-zero
    pub diff: Vector3,
}

impl Line {
    /// Creates a line through `origin` with direction `diff`
    pub const fn new(origin: Vector3, diff: Vector3) -> Self {
        Self { origin, diff }
    }

    /// Point at parameter `t`
    pub fn point_at(&self, t: f32) -> Vector3 {
        self.origin + self.diff * t
    }
}

/// A half-line starting at `origin` and extending along `diff`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    /// Start of the ray
    pub origin: Vector3,
    /// Direction, non-zero. Not normalized, so `t` is in units of `diff`.
    pub diff: Vector3,
}

impl Ray {
    /// Creates a ray from `origin` along `diff`
    pub const fn new(origin: Vector3, diff: Vector3) -> Self {
        Self { origin, diff }
    }

    /// Point at parameter `t`
    pub fn point_at(&self, t: f32) -> Vector3 {
        self.origin + self.diff * t
    }
}

/// A bounded segment from `origin` to `origin + diff`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start point
    pub origin: Vector3,
    /// Offset from start to end point
    pub diff: Vector3,
}

impl Segment {
    /// Creates a segment from a start point and an offset
    pub const fn new(origin: Vector3, diff: Vector3) -> Self {
        Self { origin, diff }
    }

    /// Creates a segment between two points
    pub fn from_points(start: Vector3, end: Vector3) -> Self {
        Self::new(start, end - start)
    }

    /// End point
    pub fn end(&self) -> Vector3 {
        self.origin + self.diff
    }

    /// Point at parameter `t`, `t ∈ [0, 1]` stays on the segment
    pub fn point_at(&self, t: f32) -> Vector3 {
        self.origin + self.diff * t
    }

    /// Closest point on the segment to `point`
    ///
    /// The parameter is clamped to `[0, 1]` before the point is built, so the
    /// result never leaves the segment. A zero-length segment returns its
    /// origin.
    pub fn closest_point(&self, point: Vector3) -> Vector3 {
        let length_squared = self.diff.length_squared();
        if length_squared == 0.0 {
            return self.origin;
        }
        let t = (point - self.origin).dot(self.diff) / length_squared;
        self.point_at(utils::clamp(t, 0.0, 1.0))
    }
}

/// A triangle given by three vertices
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    /// Vertices in order; winding decides the normal direction
    pub vertices: [Vector3; 3],
}

impl Triangle {
    /// Creates a new triangle
    pub const fn new(v0: Vector3, v1: Vector3, v2: Vector3) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Unit normal `(v1 - v0) × (v2 - v1)`, zero for a degenerate triangle
    pub fn normal(&self) -> Vector3 {
        let [v0, v1, v2] = self.vertices;
        (v1 - v0).cross(v2 - v1).normalize()
    }

    /// Supporting plane of the triangle
    pub fn plane(&self) -> Plane {
        let normal = self.normal();
        Plane::new(normal, self.vertices[0].dot(normal))
    }

    /// Average of the three vertices
    pub fn centroid(&self) -> Vector3 {
        let [v0, v1, v2] = self.vertices;
        (v0 + v1 + v2) * (1.0 / 3.0)
    }

    /// Edges `v0→v1`, `v1→v2`, `v2→v0`, each paired with its end vertex
    pub(crate) fn edges(&self) -> [(Vector3, Vector3); 3] {
        let [v0, v1, v2] = self.vertices;
        [(v1 - v0, v1), (v2 - v1, v2), (v0 - v2, v0)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_closest_point_inside_segment() {
        let segment = Segment::new(Vector3::new(-2.0, -1.0, 0.0), Vector3::new(3.0, 2.0, -2.0));
        let point = Vector3::new(-1.5, 0.6, 0.6);
        // t = dot((0.5, 1.6, 0.6), (3, 2, -2)) / 17 = 3.5 / 17
        let t = 3.5 / 17.0;
        assert_relative_eq!(
            segment.closest_point(point),
            segment.origin + segment.diff * t,
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_closest_point_is_clamped_to_endpoints() {
        let segment = Segment::new(Vector3::ZERO, Vector3::new(2.0, 0.0, 0.0));

        // Beyond the end: t = 2.5 clamps to the end point
        assert_eq!(segment.closest_point(Vector3::new(5.0, 1.0, 0.0)), segment.end());
        // Before the start: t = -1.5 clamps to the origin
        assert_eq!(segment.closest_point(Vector3::new(-3.0, 4.0, 2.0)), segment.origin);
        // Inside
        assert_eq!(
            segment.closest_point(Vector3::new(0.5, 3.0, -1.0)),
            Vector3::new(0.5, 0.0, 0.0)
        );
    }

    #[test]
    fn test_closest_point_on_zero_length_segment() {
        let segment = Segment::new(Vector3::new(1.0, 2.0, 3.0), Vector3::ZERO);
        assert_eq!(segment.closest_point(Vector3::new(9.0, 9.0, 9.0)), segment.origin);
    }

    #[test]
    fn test_triangle_plane() {
        let triangle = Triangle::new(
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(-1.0, 0.0, 0.0),
        );
        let plane = triangle.plane();
        assert_relative_eq!(plane.normal, Vector3::new(0.0, 0.0, -1.0), epsilon = EPSILON);
        assert_eq!(plane.distance, 0.0);

        for vertex in triangle.vertices {
            assert_relative_eq!(plane.signed_distance(vertex), 0.0, epsilon = EPSILON);
        }
        assert_relative_eq!(
            triangle.centroid(),
            Vector3::new(0.0, 1.0 / 3.0, 0.0),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_plane_from_normal_and_point() {
        let plane = Plane::from_normal_and_point(Vector3::new(0.0, 2.0, 0.0), Vector3::new(5.0, 3.0, -1.0));
        assert_eq!(plane.normal, Vector3::Y);
        assert_eq!(plane.distance, 3.0);
        assert_eq!(plane.center(), Vector3::new(0.0, 3.0, 0.0));
        assert_eq!(plane.signed_distance(Vector3::new(0.0, 1.0, 0.0)), -2.0);
    }

    #[test]
    fn test_point_at() {
        let line = Line::new(Vector3::new(1.0, 1.0, 1.0), Vector3::new(0.0, 2.0, 0.0));
        assert_eq!(line.point_at(-1.0), Vector3::new(1.0, -1.0, 1.0));
        let ray = Ray::new(Vector3::ZERO, Vector3::X);
        assert_eq!(ray.point_at(3.0), Vector3::new(3.0, 0.0, 0.0));
        let segment = Segment::from_points(Vector3::ZERO, Vector3::new(4.0, 0.0, 0.0));
        assert_eq!(segment.point_at(0.5), Vector3::new(2.0, 0.0, 0.0));
        assert_eq!(segment.end(), Vector3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn test_shapes_deserialize_from_toml() {
        let text = r#"
            center = { x = 1.0, y = 2.0, z = 3.0 }
            radius = 0.5
        "#;
        let sphere: Sphere = toml::from_str(text).expect("valid sphere");
        assert_eq!(sphere, Sphere::new(Vector3::new(1.0, 2.0, 3.0), 0.5));
    }
}
