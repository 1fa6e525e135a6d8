//! Orbit camera for the body viewport: projection for drawing, rays for picking.

use glam::{Mat4, Vec2, Vec3};
use serde::Deserialize;

pub const CAMERA_TARGET: Vec3 = Vec3::new(0.0, 1.0, 0.0);
pub const CAMERA_START_EYE: Vec3 = Vec3::new(0.0, 1.5, 4.0);
pub const MIN_DISTANCE: f32 = 1.5;
pub const MAX_DISTANCE: f32 = 8.0;
const FOV_Y_DEGREES: f32 = 45.0;
const MAX_PITCH_DEGREES: f32 = 85.0;
const Z_NEAR: f32 = 0.05;
const Z_FAR: f32 = 100.0;
const ORBIT_RADIANS_PER_PX: f32 = 0.008;
const ZOOM_PER_WHEEL_UNIT: f32 = 0.001;

/// Pixel size of the viewport element.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width.max(1.0) / self.height.max(1.0)
    }
}

/// A half-line in world space. `direction` is normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// A projected point: pixel position plus distance along the view direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub pos: Vec2,
    pub depth: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        let offset = CAMERA_START_EYE - CAMERA_TARGET;
        let distance = offset.length();
        Self {
            target: CAMERA_TARGET,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).asin(),
            distance,
        }
    }
}

impl OrbitCamera {
    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + self.distance * Vec3::new(cp * sy, sp, cp * cy)
    }

    fn fov_y(&self) -> f32 {
        FOV_Y_DEGREES.to_radians()
    }

    pub fn view_proj(&self, viewport: Viewport) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye(), self.target, Vec3::Y);
        let proj = Mat4::perspective_rh_gl(self.fov_y(), viewport.aspect(), Z_NEAR, Z_FAR);
        proj * view
    }

    /// Project a world point to viewport pixels. `None` when behind the camera.
    pub fn project(&self, point: Vec3, viewport: Viewport) -> Option<ScreenPoint> {
        let clip = self.view_proj(viewport) * point.extend(1.0);
        if clip.w <= Z_NEAR {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(ScreenPoint {
            pos: Vec2::new(
                (ndc.x + 1.0) * 0.5 * viewport.width,
                (1.0 - ndc.y) * 0.5 * viewport.height,
            ),
            depth: clip.w,
        })
    }

    /// On-screen radius in pixels of a sphere at `depth`.
    pub fn projected_radius(&self, radius: f32, depth: f32, viewport: Viewport) -> f32 {
        if depth <= 0.0 {
            return 0.0;
        }
        radius * viewport.height * 0.5 / ((self.fov_y() * 0.5).tan() * depth)
    }

    /// Picking ray through a viewport pixel.
    pub fn ray_through(&self, pixel: Vec2, viewport: Viewport) -> Ray {
        let ndc = Vec2::new(
            pixel.x / viewport.width * 2.0 - 1.0,
            1.0 - pixel.y / viewport.height * 2.0,
        );
        let inverse = self.view_proj(viewport).inverse();
        let near = inverse.project_point3(Vec3::new(ndc.x, ndc.y, -1.0));
        let far = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(near, far - near)
    }

    /// Rotate around the target by a pointer drag delta in pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        let limit = MAX_PITCH_DEGREES.to_radians();
        self.yaw -= dx * ORBIT_RADIANS_PER_PX;
        self.pitch = (self.pitch + dy * ORBIT_RADIANS_PER_PX).clamp(-limit, limit);
    }

    /// Dolly toward or away from the target by a wheel delta.
    pub fn zoom(&mut self, wheel_delta: f32) {
        let factor = (1.0 + wheel_delta * ZOOM_PER_WHEEL_UNIT).max(0.1);
        self.distance = (self.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    #[test]
    fn test_default_eye_matches_start_position() {
        let camera = OrbitCamera::default();
        assert!(camera.eye().distance(CAMERA_START_EYE) < 1e-4);
    }

    #[test]
    fn test_target_projects_to_center() {
        let camera = OrbitCamera::default();
        let point = camera.project(CAMERA_TARGET, viewport()).unwrap();
        assert!((point.pos - Vec2::new(400.0, 300.0)).length() < 0.5);
        assert!((point.depth - camera.distance).abs() < 1e-3);
    }

    #[test]
    fn test_point_behind_camera_is_not_projected() {
        let camera = OrbitCamera::default();
        assert!(camera.project(Vec3::new(0.0, 1.5, 10.0), viewport()).is_none());
    }

    #[test]
    fn test_ray_passes_through_projected_point() {
        let camera = OrbitCamera::default();
        let world = Vec3::new(0.3, 1.4, 0.2);
        let pixel = camera.project(world, viewport()).unwrap().pos;
        let ray = camera.ray_through(pixel, viewport());
        let t = (world - ray.origin).dot(ray.direction);
        assert!(ray.at(t).distance(world) < 1e-3);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut camera = OrbitCamera::default();
        camera.zoom(-100_000.0);
        assert_eq!(camera.distance, MIN_DISTANCE);
        camera.zoom(100_000.0);
        assert_eq!(camera.distance, MAX_DISTANCE);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = OrbitCamera::default();
        camera.orbit(0.0, 10_000.0);
        assert!((camera.pitch - MAX_PITCH_DEGREES.to_radians()).abs() < 1e-5);
        camera.orbit(120.0, 0.0);
        assert!(camera.yaw < 0.0);
    }
}
