//! Target drones: population control, scripted drift, despawn.

use engine_core::{Spin, Transform};
use glam::{EulerRot, Quat, Vec3};
use rand::Rng;

use crate::config::DroneConfig;

/// Vertical bob amplitude around the base altitude.
const BOB_AMPLITUDE: f32 = 10.0;
/// Lateral weave amplitude, units per second.
const WEAVE_AMPLITUDE: f32 = 10.0;
/// Spin rates (radians/s) about local X, Y, Z.
const SPIN_RATE: Vec3 = Vec3::new(0.0, 0.5, 1.0);

/// Glow shell opacity at a given phase: pulses around 0.3.
pub fn glow_pulse(phase: f32) -> f32 {
    0.3 + (phase * 5.0).sin() * 0.1
}

#[derive(Debug, Clone, PartialEq)]
pub struct Drone {
    /// Spawn-order identifier, unique per manager.
    pub id: u64,
    pub position: Vec3,
    pub active: bool,
    pub radius: f32,
    /// Motion clock, seconds. Starts at a random offset.
    pub phase: f32,
    pub base_altitude: f32,
    pub speed: f32,
    pub spin: Spin,
    pub glow_opacity: f32,
}

impl Drone {
    fn new(id: u64, position: Vec3, phase: f32, config: &DroneConfig) -> Self {
        Self {
            id,
            position,
            active: true,
            radius: config.radius,
            phase,
            base_altitude: position.y,
            speed: config.speed,
            spin: Spin::new(SPIN_RATE),
            glow_opacity: glow_pulse(phase),
        }
    }

    /// Scripted motion: constant drift along -Z, vertical bob, lateral weave.
    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.phase += dt;
        self.position.z -= self.speed * dt;
        self.position.y = self.base_altitude + self.phase.sin() * BOB_AMPLITUDE;
        self.position.x += (self.phase * 0.5).cos() * WEAVE_AMPLITUDE * dt;
        self.spin.update(dt);
        self.glow_opacity = glow_pulse(self.phase);
    }

    pub fn transform(&self) -> Transform {
        let a = self.spin.angles;
        Transform::from_position_rotation(self.position, Quat::from_euler(EulerRot::XYZ, a.x, a.y, a.z))
    }
}

/// Keeps a small population of drones in front of the player.
#[derive(Debug, Clone)]
pub struct DroneManager {
    config: DroneConfig,
    drones: Vec<Drone>,
    next_id: u64,
}

impl DroneManager {
    pub fn new(config: DroneConfig) -> Self {
        Self {
            config,
            drones: Vec::new(),
            next_id: 0,
        }
    }

    pub fn config(&self) -> &DroneConfig {
        &self.config
    }

    /// One frame: top up the population by at most one, move everyone, then
    /// drop the dead and the distant.
    pub fn update<R: Rng>(&mut self, player: &Transform, dt: f32, spawning_enabled: bool, rng: &mut R) {
        if spawning_enabled && self.active_count() < self.config.target_population {
            self.spawn(player, rng);
        }

        for drone in &mut self.drones {
            drone.update(dt);
        }

        let origin = player.position;
        let radius = self.config.despawn_radius;
        let before = self.drones.len();
        self.drones
            .retain(|d| d.active && d.position.distance(origin) <= radius);
        if self.drones.len() < before {
            log::debug!("Despawned {} drone(s)", before - self.drones.len());
        }
    }

    fn spawn<R: Rng>(&mut self, player: &Transform, rng: &mut R) {
        let c = &self.config;
        let distance = if c.spawn_distance_max > c.spawn_distance_min {
            rng.gen_range(c.spawn_distance_min..c.spawn_distance_max)
        } else {
            c.spawn_distance_min
        };
        let jitter = Vec3::new(
            (rng.gen::<f32>() - 0.5) * 2.0 * c.jitter_x,
            (rng.gen::<f32>() - 0.5) * 2.0 * c.jitter_y,
            0.0,
        );
        let mut position = player.position + player.forward() * distance + jitter;
        position.y = position.y.max(c.min_spawn_altitude);

        let phase = rng.gen::<f32>() * 100.0;
        let id = self.next_id;
        self.next_id += 1;
        log::debug!("Spawned drone {} at {:.0?}", id, position);

        self.drones.push(Drone::new(id, position, phase, c));
    }

    pub fn drones(&self) -> &[Drone] {
        &self.drones
    }

    /// Mutable access in spawn order, for hit marking.
    pub fn drones_mut(&mut self) -> &mut [Drone] {
        &mut self.drones
    }

    pub fn active_count(&self) -> usize {
        self.drones.iter().filter(|d| d.active).count()
    }

    pub fn clear(&mut self) {
        self.drones.clear();
    }

    #[cfg(test)]
    pub(crate) fn push(&mut self, position: Vec3) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.drones.push(Drone::new(id, position, 0.0, &self.config));
        id
    }
}
