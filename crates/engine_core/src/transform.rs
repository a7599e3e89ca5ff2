//! Transform component and utilities for spatial positioning.

use glam::{Mat4, Quat, Vec3};

/// A 3D transform representing position, rotation, and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a new transform with position and rotation.
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Create the model matrix for this transform.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Get the forward direction (negative Z in right-handed coordinates).
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Get the right direction (positive X).
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Get the up direction (positive Y).
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Translate along the transform's own axes.
    pub fn translate_local(&mut self, delta: Vec3) {
        self.position += self.rotation * delta;
    }

    /// Rotate around the local X axis (pitch).
    pub fn rotate_local_x(&mut self, angle: f32) {
        self.rotation = (self.rotation * Quat::from_rotation_x(angle)).normalize();
    }

    /// Rotate around the local Y axis (yaw).
    pub fn rotate_local_y(&mut self, angle: f32) {
        self.rotation = (self.rotation * Quat::from_rotation_y(angle)).normalize();
    }

    /// Rotate around the local Z axis (roll).
    pub fn rotate_local_z(&mut self, angle: f32) {
        self.rotation = (self.rotation * Quat::from_rotation_z(angle)).normalize();
    }

    /// Map a point from local space into world space.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.to_matrix().transform_point3(local)
    }

    /// Nose elevation above the horizon, in radians.
    pub fn pitch_angle(&self) -> f32 {
        self.forward().y.clamp(-1.0, 1.0).asin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn identity_faces_negative_z() {
        let t = Transform::default();
        assert!(approx(t.forward(), -Vec3::Z));
        assert!(approx(t.right(), Vec3::X));
        assert!(approx(t.up(), Vec3::Y));
    }

    #[test]
    fn positive_local_x_rotation_raises_the_nose() {
        let mut t = Transform::default();
        t.rotate_local_x(0.3);
        assert!(t.forward().y > 0.0);
        assert!((t.pitch_angle() - 0.3).abs() < 1e-5);
    }

    #[test]
    fn local_rotations_do_not_commute() {
        let mut a = Transform::default();
        a.rotate_local_x(0.5);
        a.rotate_local_y(0.5);

        let mut b = Transform::default();
        b.rotate_local_y(0.5);
        b.rotate_local_x(0.5);

        assert!(!approx(a.forward(), b.forward()));
    }

    #[test]
    fn translate_local_follows_heading() {
        let mut t = Transform::default();
        t.rotate_local_y(std::f32::consts::FRAC_PI_2);
        t.translate_local(Vec3::new(0.0, 0.0, -10.0));
        assert!(approx(t.position, Vec3::new(-10.0, 0.0, 0.0)));
    }

    #[test]
    fn transform_point_applies_rotation_and_translation() {
        let mut t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        t.rotate_local_y(std::f32::consts::PI);
        let p = t.transform_point(Vec3::new(0.0, 5.0, 15.0));
        assert!(approx(p, Vec3::new(1.0, 7.0, -12.0)));
    }
}
