//! Scene camera and screen-to-world picking rays.

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use homestead_config::CameraConfig;

/// Size of the canvas the pointer coordinates are measured against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Create a viewport. Dimensions are clamped to at least one pixel.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    /// Map a pixel position (origin top-left, Y down) to normalized device
    /// coordinates (origin center, Y up, both axes in `[-1, 1]`).
    pub fn to_ndc(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            (screen.x / self.width) * 2.0 - 1.0,
            -(screen.y / self.height) * 2.0 + 1.0,
        )
    }
}

/// A half-line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at parameter `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// A camera looking down its local -Z axis.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    /// Rotation as a unit quaternion.
    pub rotation: Quat,
    pub projection: Projection,
    /// Near clip plane distance (always positive).
    pub near: f32,
    /// Far clip plane distance (always positive, > near).
    pub far: f32,
}

/// Projection type for the camera.
#[derive(Debug, Clone)]
pub enum Projection {
    Perspective {
        /// Vertical field of view in radians.
        fov_y: f32,
        /// Width / height.
        aspect_ratio: f32,
    },
    Orthographic {
        /// Half-width of the view volume in world units.
        half_width: f32,
        /// Half-height of the view volume in world units.
        half_height: f32,
    },
}

impl Camera {
    /// Build the base camera pose for a viewport.
    pub fn from_config(config: &CameraConfig, viewport: Viewport) -> Self {
        let (px, py, pz) = config.position;
        let (rx, ry, rz) = config.rotation;
        Self {
            position: Vec3::new(px, py, pz),
            rotation: Quat::from_euler(EulerRot::XYZ, rx, ry, rz),
            projection: Projection::Perspective {
                fov_y: config.fov_y_degrees.to_radians(),
                aspect_ratio: viewport.aspect_ratio(),
            },
            near: config.near,
            far: config.far,
        }
    }

    /// View matrix (inverse of the camera transform).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

    /// The forward direction vector (-Z in camera space).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Ray from the camera through a pixel of `viewport`.
    pub fn screen_ray(&self, screen: Vec2, viewport: Viewport) -> Ray {
        let ndc = viewport.to_ndc(screen);
        match self.projection {
            Projection::Perspective {
                fov_y,
                aspect_ratio,
            } => {
                let tan = (fov_y * 0.5).tan();
                let local = Vec3::new(ndc.x * tan * aspect_ratio, ndc.y * tan, -1.0);
                Ray::new(self.position, self.rotation * local)
            }
            Projection::Orthographic {
                half_width,
                half_height,
            } => {
                let offset = self.rotation
                    * Vec3::new(ndc.x * half_width, ndc.y * half_height, -self.near);
                Ray::new(self.position + offset, self.forward())
            }
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            projection: Projection::Perspective {
                fov_y: std::f32::consts::FRAC_PI_4,
                aspect_ratio: 16.0 / 9.0,
            },
            near: 0.1,
            far: 2000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ndc_corners() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.to_ndc(Vec2::new(0.0, 0.0)), Vec2::new(-1.0, 1.0));
        assert_eq!(vp.to_ndc(Vec2::new(800.0, 600.0)), Vec2::new(1.0, -1.0));
        assert_eq!(vp.to_ndc(Vec2::new(400.0, 300.0)), Vec2::ZERO);
    }

    #[test]
    fn test_viewport_clamps_degenerate_size() {
        let vp = Viewport::new(0.0, -5.0);
        assert_eq!(vp.width, 1.0);
        assert_eq!(vp.height, 1.0);
    }

    #[test]
    fn test_center_ray_follows_forward() {
        let camera = Camera {
            position: Vec3::new(0.0, 10.0, 0.0),
            rotation: Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2),
            ..Camera::default()
        };
        let vp = Viewport::new(1600.0, 900.0);
        let ray = camera.screen_ray(Vec2::new(800.0, 450.0), vp);
        assert!((ray.direction - Vec3::NEG_Y).length() < 1e-5);
        assert_eq!(ray.origin, camera.position);
    }

    #[test]
    fn test_right_edge_ray_tilts_right() {
        let camera = Camera::default();
        let vp = Viewport::new(1600.0, 900.0);
        let ray = camera.screen_ray(Vec2::new(1600.0, 450.0), vp);
        assert!(ray.direction.x > 0.0);
        assert!((ray.direction.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_orthographic_rays_are_parallel() {
        let camera = Camera {
            projection: Projection::Orthographic {
                half_width: 10.0,
                half_height: 5.0,
            },
            ..Camera::default()
        };
        let vp = Viewport::new(200.0, 100.0);
        let a = camera.screen_ray(Vec2::new(0.0, 0.0), vp);
        let b = camera.screen_ray(Vec2::new(200.0, 100.0), vp);
        assert_eq!(a.direction, b.direction);
        assert!((a.origin.x + 10.0).abs() < 1e-5);
        assert!((b.origin.y + 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_config_camera_looks_down_at_farm() {
        let vp = Viewport::new(1920.0, 1080.0);
        let camera = Camera::from_config(&CameraConfig::default(), vp);
        assert!(camera.forward().y < 0.0);
        let inv = camera.view_matrix().inverse();
        assert!((inv.col(3).truncate() - camera.position).length() < 1e-3);
    }
}
