//! Demo scene description and single-frame evaluation

use geometry_core::core::config::{Config, ConfigError, GeometryConfig};
use geometry_core::debug::{format_vector, Color, DebugDrawList, ScreenProjector};
use geometry_core::foundation::math::{Matrix4x4, Vector3};
use geometry_core::physics::collision::{CollisionDetector, Plane, Ray, Segment, Sphere, Triangle};
use geometry_core::GeometryError;
use log::info;
use serde::{Deserialize, Serialize};

/// Errors that stop the demo
#[derive(thiserror::Error, Debug)]
pub enum DemoError {
    /// Settings could not be loaded or are invalid
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The camera or a scene point cannot be projected
    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),
}

/// Scale, rotation and translation of an object or the camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformSettings {
    /// Per-axis scale
    pub scale: Vector3,
    /// Euler angles in radians, applied X then Y then Z
    pub rotate: Vector3,
    /// Position
    pub translate: Vector3,
}

impl TransformSettings {
    /// Affine matrix for this transform
    pub fn to_matrix(&self) -> Matrix4x4 {
        Matrix4x4::affine(self.scale, self.rotate, self.translate)
    }
}

impl Default for TransformSettings {
    fn default() -> Self {
        Self {
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotate: Vector3::ZERO,
            translate: Vector3::ZERO,
        }
    }
}

/// Everything placed in the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    /// Camera placement
    pub camera: TransformSettings,
    /// World transform shared by every shape
    pub world: TransformSettings,
    /// Triangle tested against the segment
    pub triangle: Triangle,
    /// Segment tested against the triangle and the plane
    pub segment: Segment,
    /// Spheres tested against each other and the plane
    pub spheres: Vec<Sphere>,
    /// Ground plane
    pub plane: Plane,
    /// Ray tested against the plane
    pub ray: Ray,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            camera: TransformSettings {
                rotate: Vector3::new(0.26, 0.0, 0.0),
                translate: Vector3::new(0.0, 1.9, -6.49),
                ..TransformSettings::default()
            },
            world: TransformSettings::default(),
            triangle: Triangle::new(
                Vector3::new(0.0, 1.0, 0.0),
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(-1.0, 0.0, 0.0),
            ),
            segment: Segment::new(Vector3::new(-0.45, 0.35, 0.0), Vector3::new(0.0, 0.5, 0.0)),
            spheres: vec![
                Sphere::new(Vector3::ZERO, 0.5),
                Sphere::new(Vector3::new(0.6, 0.5, 0.0), 0.3),
            ],
            plane: Plane::new(Vector3::Y, 0.0),
            ray: Ray::new(Vector3::new(0.0, 1.9, -6.49), Vector3::new(0.0, -1.9, 6.49)),
        }
    }
}

/// Settings file layout: library configuration plus the scene
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// Collision, projection, viewport and logging settings
    pub geometry: GeometryConfig,
    /// Scene contents
    pub scene: Scene,
}

impl Config for DemoSettings {}

/// Results of one evaluated frame
#[derive(Debug, Clone)]
pub struct Frame {
    /// Segment passes through the triangle
    pub segment_hits_triangle: bool,
    /// Segment crosses the plane
    pub segment_hits_plane: bool,
    /// Ray crosses the plane
    pub ray_hits_plane: bool,
    /// Index pairs of touching spheres
    pub sphere_contacts: Vec<(usize, usize)>,
    /// Per sphere, whether it touches the plane
    pub spheres_on_plane: Vec<bool>,
    /// Segment endpoints in pixels
    pub segment_screen: (Vector3, Vector3),
    /// Triangle label anchor (projected centroid) in pixels
    pub triangle_label: Vector3,
    /// Projected debug geometry
    pub draw_list: DebugDrawList,
}

impl Frame {
    /// Build the camera chain, run every predicate and collect debug lines
    ///
    /// # Errors
    ///
    /// Fails when the camera matrix is singular, or when a segment endpoint or
    /// the triangle centroid sits on the camera plane.
    pub fn evaluate(settings: &DemoSettings) -> Result<Self, DemoError> {
        let scene = &settings.scene;
        let geometry = &settings.geometry;

        let world = scene.world.to_matrix();
        let view = scene.camera.to_matrix().try_inverse()?;
        let projector = ScreenProjector::new(
            world * view * geometry.projection_matrix(),
            geometry.viewport.to_matrix(),
        );
        let detector = CollisionDetector::new(geometry.collision);

        let segment_hits_triangle = detector.triangle_segment(&scene.triangle, &scene.segment);
        let segment_hits_plane = detector.line_plane(&scene.segment, &scene.plane);
        let ray_hits_plane = detector.line_plane(&scene.ray, &scene.plane);

        let mut sphere_contacts = Vec::new();
        for (i, a) in scene.spheres.iter().enumerate() {
            for (j, b) in scene.spheres.iter().enumerate().skip(i + 1) {
                if detector.sphere_sphere(a, b) {
                    sphere_contacts.push((i, j));
                }
            }
        }
        let spheres_on_plane: Vec<bool> = scene
            .spheres
            .iter()
            .map(|sphere| detector.sphere_plane(sphere, &scene.plane))
            .collect();

        let segment_screen = (
            projector.try_project(scene.segment.origin)?,
            projector.try_project(scene.segment.end())?,
        );
        let triangle_label = projector.try_project(scene.triangle.centroid())?;

        let mut draw_list = DebugDrawList::new();
        draw_list.grid(&projector);
        draw_list.triangle(&projector, &scene.triangle, Color::WHITE);
        draw_list.segment(&projector, &scene.segment, hit_color(segment_hits_triangle));
        for (index, sphere) in scene.spheres.iter().enumerate() {
            let touching = sphere_contacts.iter().any(|&(i, j)| i == index || j == index);
            draw_list.sphere(&projector, sphere, hit_color(touching));
        }
        draw_list.plane(&projector, &scene.plane, hit_color(spheres_on_plane.contains(&true)));

        Ok(Self {
            segment_hits_triangle,
            segment_hits_plane,
            ray_hits_plane,
            sphere_contacts,
            spheres_on_plane,
            segment_screen,
            triangle_label,
            draw_list,
        })
    }

    /// Log the frame's results
    pub fn log_summary(&self) {
        info!("{}", format_vector(&self.segment_screen.0, "segment start (screen)"));
        info!("{}", format_vector(&self.segment_screen.1, "segment end (screen)"));
        info!("{}", format_vector(&self.triangle_label, "triangle (screen)"));
        info!("Segment through triangle: {}", self.segment_hits_triangle);
        info!("Segment crosses plane: {}", self.segment_hits_plane);
        info!("Ray crosses plane: {}", self.ray_hits_plane);
        for (i, j) in &self.sphere_contacts {
            info!("Spheres {i} and {j} touch");
        }
        for (index, on_plane) in self.spheres_on_plane.iter().enumerate() {
            info!("Sphere {index} touches plane: {on_plane}");
        }
        info!("Collected {} debug lines", self.draw_list.len());
    }
}

const fn hit_color(hit: bool) -> Color {
    if hit {
        Color::RED
    } else {
        Color::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use geometry_core::core::config::RayBound;

    #[test]
    fn test_default_scene_frame() {
        let frame = Frame::evaluate(&DemoSettings::default()).expect("default scene evaluates");

        // The default segment lies in the triangle's plane
        assert!(!frame.segment_hits_triangle);
        assert!(!frame.segment_hits_plane);
        assert!(frame.ray_hits_plane);
        assert_eq!(frame.sphere_contacts, vec![(0, 1)]);
        assert_eq!(frame.spheres_on_plane, vec![true, false]);

        // grid + triangle + segment + two spheres + plane
        assert_eq!(frame.draw_list.len(), 22 + 3 + 1 + 2 * 1800 + 4);

        let (start, end) = frame.segment_screen;
        assert_abs_diff_eq!(start.x, 533.89, epsilon = 1.0);
        assert_abs_diff_eq!(start.y, 319.78, epsilon = 1.0);
        assert_abs_diff_eq!(end.y, 202.81, epsilon = 1.0);

        // Centroid (0, 1/3, 0)
        assert_abs_diff_eq!(frame.triangle_label.x, 640.0, epsilon = 1.0);
        assert_abs_diff_eq!(frame.triangle_label.y, 323.61, epsilon = 1.0);
    }

    #[test]
    fn test_segment_through_triangle_is_red() {
        let mut settings = DemoSettings::default();
        settings.scene.segment = Segment::new(Vector3::new(0.0, 0.3, -1.0), Vector3::new(0.0, 0.0, 2.0));

        let frame = Frame::evaluate(&settings).expect("scene evaluates");
        assert!(frame.segment_hits_triangle);

        let segment_line = frame.draw_list.lines()[22 + 3];
        assert_eq!(segment_line.color, Color::RED);
    }

    #[test]
    fn test_singular_camera_is_an_error() {
        let mut settings = DemoSettings::default();
        settings.scene.camera.scale = Vector3::ZERO;

        let result = Frame::evaluate(&settings);
        assert!(matches!(result, Err(DemoError::Geometry(GeometryError::SingularMatrix))));
    }

    #[test]
    fn test_settings_from_toml() {
        let text = r#"
            [geometry.collision]
            ray_bound = "Legacy"

            [scene.segment]
            origin = { x = 0.0, y = 0.3, z = -1.0 }
            diff = { x = 0.0, y = 0.0, z = 2.0 }
        "#;
        let settings = DemoSettings::parse("demo.toml", text).expect("valid settings");

        assert_eq!(settings.geometry.collision.ray_bound, RayBound::Legacy);
        assert_eq!(settings.scene.segment.diff, Vector3::new(0.0, 0.0, 2.0));
        assert_eq!(settings.scene.triangle, Scene::default().triangle);
        assert_eq!(settings.scene.camera, Scene::default().camera);
    }

    #[test]
    fn test_settings_round_trip_ron() {
        let path = std::env::temp_dir().join(format!("{}_collision_demo.ron", std::process::id()));
        let path = path.to_str().expect("utf-8 temp path");

        let settings = DemoSettings::default();
        settings.save_to_file(path).expect("save");
        let loaded = DemoSettings::load_from_file(path).expect("load");
        assert_eq!(loaded, settings);
        let _ = std::fs::remove_file(path);
    }
}
