//! Small components shared by simulated entities.

use glam::Vec3;

/// Slack for frame steps that are not exact binary fractions (1/60, 1/144).
const LIFETIME_EPSILON: f64 = 1e-6;

/// Lifetime component for temporary entities (projectiles, effects).
///
/// Age accumulates in f64 so that many small f32 steps add up to the
/// full duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lifetime {
    pub duration: f32,
    age: f64,
}

impl Lifetime {
    pub fn new(seconds: f32) -> Self {
        Self {
            duration: seconds,
            age: 0.0,
        }
    }

    /// Tick down; returns true once the lifetime is used up.
    pub fn update(&mut self, dt: f32) -> bool {
        self.age += f64::from(dt);
        self.is_expired()
    }

    pub fn remaining(&self) -> f32 {
        (f64::from(self.duration) - self.age).max(0.0) as f32
    }

    pub fn is_expired(&self) -> bool {
        self.age + LIFETIME_EPSILON >= f64::from(self.duration)
    }
}

/// Continuous cosmetic spin, in radians per second about each axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spin {
    pub rate: Vec3,
    pub angles: Vec3,
}

impl Spin {
    pub fn new(rate: Vec3) -> Self {
        Self {
            rate,
            angles: Vec3::ZERO,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.angles += self.rate * dt;
    }
}
