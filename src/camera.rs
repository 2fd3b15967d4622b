//! Follow camera.
//!
//! The camera drifts toward the target on x and y, snaps back to zero once
//! an axis passes the wrap bound, and always faces the world origin.

use glam::{Mat4, Vec2, Vec3};

use crate::config::CameraConfig;

/// What an axis did during the last [`FollowCamera::follow`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisMode {
    /// Moved a fraction of the way toward its goal.
    Follow,
    /// Exceeded the wrap bound and was reset to zero.
    Wrap,
}

/// Perspective camera that chases the swarm target.
#[derive(Debug, Clone)]
pub struct FollowCamera {
    /// World-space position.
    pub position: Vec3,
    /// Width over height of the viewport.
    pub aspect: f32,
    fov_y: f32,
    near: f32,
    far: f32,
    follow_rate: f32,
    wrap_bound: f32,
}

impl FollowCamera {
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            position: config.start,
            aspect,
            fov_y: config.fov_degrees.to_radians(),
            near: config.near,
            far: config.far,
            follow_rate: config.follow_rate,
            wrap_bound: config.wrap_bound,
        }
    }

    /// Advance one tick toward `target`.
    ///
    /// X chases `target.x`, Y chases `-target.y`. Z is left alone.
    pub fn follow(&mut self, target: Vec3) -> [AxisMode; 2] {
        let (x, x_mode) = follow_axis(self.position.x, target.x, self.follow_rate, self.wrap_bound);
        let (y, y_mode) = follow_axis(self.position.y, -target.y, self.follow_rate, self.wrap_bound);
        self.position.x = x;
        self.position.y = y;
        [x_mode, y_mode]
    }

    /// Update the aspect ratio from a viewport size. Zero-sized viewports are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// View matrix looking from the camera at the world origin.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, Vec3::ZERO, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Unit direction of the ray leaving the camera through `ndc`.
    ///
    /// Computed in view space and rotated into the world, which gives the
    /// same ray as unprojecting any depth along the pixel without the
    /// precision loss of inverting a projection with a tiny near plane.
    pub fn ray_direction(&self, ndc: Vec2) -> Vec3 {
        let half_height = (self.fov_y * 0.5).tan();
        let view_dir = Vec3::new(ndc.x * half_height * self.aspect, ndc.y * half_height, -1.0);
        self.view_matrix()
            .inverse()
            .transform_vector3(view_dir)
            .normalize()
    }
}

/// One axis of the follow controller.
pub fn follow_axis(position: f32, goal: f32, rate: f32, bound: f32) -> (f32, AxisMode) {
    if position > bound {
        (0.0, AxisMode::Wrap)
    } else {
        (position + (goal - position) * rate, AxisMode::Follow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> FollowCamera {
        FollowCamera::new(&CameraConfig::default(), 16.0 / 9.0)
    }

    #[test]
    fn test_wrap_is_exact() {
        let mut cam = camera();
        cam.position.x = 101.0;
        let modes = cam.follow(Vec3::new(50.0, 0.0, 0.0));
        assert_eq!(cam.position.x, 0.0);
        assert_eq!(modes[0], AxisMode::Wrap);
        assert_eq!(modes[1], AxisMode::Follow);
    }

    #[test]
    fn test_wrap_returns_to_follow() {
        let mut cam = camera();
        cam.position.y = 150.0;
        assert_eq!(cam.follow(Vec3::ZERO)[1], AxisMode::Wrap);
        assert_eq!(cam.follow(Vec3::ZERO)[1], AxisMode::Follow);
    }

    #[test]
    fn test_follow_is_exponential() {
        let mut cam = camera();
        cam.follow(Vec3::new(10.0, 0.0, 0.0));
        assert!((cam.position.x - 0.1).abs() < 1e-6);
        cam.follow(Vec3::new(10.0, 0.0, 0.0));
        assert!((cam.position.x - (0.1 + 9.9 * 0.01)).abs() < 1e-6);
    }

    #[test]
    fn test_y_chases_inverted_target() {
        let mut cam = camera();
        cam.follow(Vec3::new(0.0, 20.0, 0.0));
        assert!((cam.position.y + 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_z_untouched() {
        let mut cam = camera();
        for _ in 0..10 {
            cam.follow(Vec3::new(3.0, 4.0, -30.0));
        }
        assert_eq!(cam.position.z, 50.0);
    }

    #[test]
    fn test_negative_axis_never_wraps() {
        let (p, mode) = follow_axis(-500.0, 0.0, 0.01, 100.0);
        assert_eq!(mode, AxisMode::Follow);
        assert!((p + 495.0).abs() < 1e-3);
    }

    #[test]
    fn test_always_faces_origin() {
        let mut cam = camera();
        cam.position = Vec3::new(30.0, -20.0, 50.0);
        let origin_in_view = cam.view_matrix().transform_point3(Vec3::ZERO);
        // Origin sits straight ahead on the view axis.
        assert!(origin_in_view.x.abs() < 1e-4);
        assert!(origin_in_view.y.abs() < 1e-4);
        assert!(origin_in_view.z < 0.0);
    }

    #[test]
    fn test_center_ray_points_at_origin() {
        let mut cam = camera();
        cam.position = Vec3::new(10.0, 5.0, 40.0);
        let dir = cam.ray_direction(Vec2::ZERO);
        let expected = (-cam.position).normalize();
        assert!((dir - expected).length() < 1e-5);
    }

    #[test]
    fn test_ray_direction_matches_projection() {
        let cam = camera();
        let ndc = Vec2::new(0.4, -0.7);
        let dir = cam.ray_direction(ndc);
        // A point along the ray must land back on the same pixel.
        let clip = cam.view_projection().project_point3(cam.position + dir * 20.0);
        assert!((clip.x - ndc.x).abs() < 1e-3);
        assert!((clip.y - ndc.y).abs() < 1e-3);
    }

    #[test]
    fn test_set_viewport_ignores_zero() {
        let mut cam = camera();
        cam.set_viewport(0, 100);
        assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-6);
        cam.set_viewport(800, 400);
        assert_eq!(cam.aspect, 2.0);
    }
}
