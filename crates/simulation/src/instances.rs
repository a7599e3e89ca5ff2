//! Flat per-instance records for renderers.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// One billboard or mesh instance: where, how big, how visible.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 3],
    pub scale: f32,
    /// Billboard rotation around the view axis, radians.
    pub rotation: f32,
    pub opacity: f32,
    pub _pad: [f32; 2],
}

impl ParticleInstance {
    pub fn new(position: Vec3, scale: f32, rotation: f32, opacity: f32) -> Self {
        Self {
            position: position.to_array(),
            scale,
            rotation,
            opacity,
            _pad: [0.0; 2],
        }
    }
}
