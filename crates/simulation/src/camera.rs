//! Chase camera that trails the aircraft with smoothed zoom.

use engine_core::Transform;
use glam::{Mat4, Vec3};
use input::FlightIntent;

use crate::config::CameraConfig;

/// Follows the player at a smoothed distance that widens under nitro.
///
/// Smoothing factors are applied once per frame and are not scaled by `dt`.
#[derive(Debug, Clone)]
pub struct CameraController {
    config: CameraConfig,
    /// Current (smoothed) zoom distance.
    zoom: f32,
    position: Vec3,
    look_target: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
}

impl CameraController {
    pub fn new(config: CameraConfig, player: &Transform) -> Self {
        let mut camera = Self {
            zoom: config.near_zoom,
            config,
            position: Vec3::ZERO,
            look_target: Vec3::ZERO,
            fov_degrees: 75.0,
            near: 0.1,
            far: 30000.0,
            aspect: 16.0 / 9.0,
        };
        camera.snap_to(player);
        camera
    }

    /// Update aspect ratio (call on window resize).
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Zoom distance the camera is heading for this frame.
    pub fn target_zoom(&self, intent: &FlightIntent, nitro: f32) -> f32 {
        if intent.throttle && nitro > 0.0 {
            self.config.far_zoom
        } else {
            self.config.near_zoom
        }
    }

    /// One frame of follow. Zooming out is faster than settling back in.
    pub fn update(&mut self, player: &Transform, intent: &FlightIntent, nitro: f32) {
        let target = self.target_zoom(intent, nitro);
        let rate = if target > self.zoom {
            self.config.zoom_out_rate
        } else {
            self.config.zoom_in_rate
        };
        self.zoom += (target - self.zoom) * rate;

        let desired = self.chase_point(player);
        self.position = self.position.lerp(desired, self.config.follow_factor);
        self.look_target = player.transform_point(self.config.look_ahead);
    }

    /// Jump straight to the chase position, no smoothing.
    pub fn snap_to(&mut self, player: &Transform) {
        self.position = self.chase_point(player);
        self.look_target = player.transform_point(self.config.look_ahead);
    }

    fn chase_point(&self, player: &Transform) -> Vec3 {
        player.transform_point(Vec3::new(0.0, self.zoom * self.config.height_ratio, self.zoom))
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn look_target(&self) -> Vec3 {
        self.look_target
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
