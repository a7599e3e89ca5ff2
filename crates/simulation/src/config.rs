//! Tuning for every simulation component. All sections deserialize with
//! per-field defaults so a partial `config.ron` is valid.

use glam::Vec3;
use procgen::CloudConfig;
use serde::{Deserialize, Serialize};

/// Aircraft performance envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    /// Top speed without nitro.
    pub base_max_speed: f32,
    /// Floor for braking (drag alone may go lower).
    pub min_speed: f32,
    /// Speed at session start and after every reset.
    pub initial_speed: f32,
    pub acceleration: f32,
    pub deceleration: f32,
    /// Radians per second at full stick.
    pub pitch_rate: f32,
    pub roll_rate: f32,
    pub yaw_rate: f32,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            base_max_speed: 200.0,
            min_speed: 50.0,
            initial_speed: 100.0,
            acceleration: 40.0,
            deceleration: 20.0,
            pitch_rate: 1.5,
            roll_rate: 2.0,
            yaw_rate: 0.5,
        }
    }
}

/// Nose cannon.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    /// Minimum seconds between shots.
    pub fire_interval: f64,
    /// Added to the craft's speed at the moment of firing.
    pub muzzle_speed: f32,
    /// Seconds before a round silently expires.
    pub projectile_lifetime: f32,
    /// Max random deflection per axis, radians.
    pub spread: f32,
    /// Muzzle position in the aircraft's local frame.
    pub muzzle_offset: Vec3,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            fire_interval: 0.066,
            muzzle_speed: 800.0,
            projectile_lifetime: 2.0,
            spread: 0.0025,
            muzzle_offset: Vec3::new(0.0, 0.0, -2.0),
        }
    }
}

/// Target drone population and motion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DroneConfig {
    pub target_population: usize,
    pub spawn_distance_min: f32,
    pub spawn_distance_max: f32,
    /// Half-width of the random lateral offset.
    pub jitter_x: f32,
    /// Half-height of the random vertical offset.
    pub jitter_y: f32,
    /// Spawn altitude floor. Terrain is not consulted.
    pub min_spawn_altitude: f32,
    /// Drift speed along -Z.
    pub speed: f32,
    /// Drones farther than this from the player are dropped.
    pub despawn_radius: f32,
    /// Declared hitbox radius. Combat uses its own flat threshold.
    pub radius: f32,
}

impl Default for DroneConfig {
    fn default() -> Self {
        Self {
            target_population: 5,
            spawn_distance_min: 1000.0,
            spawn_distance_max: 1500.0,
            jitter_x: 500.0,
            jitter_y: 250.0,
            min_spawn_altitude: 200.0,
            speed: 40.0,
            despawn_radius: 3000.0,
            radius: 2.0,
        }
    }
}

/// Contrail particle pool and emitter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContrailConfig {
    pub capacity: usize,
    /// Anchors emitted per qualifying frame.
    pub spawns_per_frame: usize,
    /// Contrails appear above this speed even without nitro.
    pub speed_threshold: f32,
    /// Per-axis spawn jitter around an anchor.
    pub jitter: f32,
    pub base_scale: f32,
    /// Exhaust position in the aircraft's local frame.
    pub engine_offset: Vec3,
}

impl Default for ContrailConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            spawns_per_frame: 2,
            speed_threshold: 100.0,
            jitter: 0.4,
            base_scale: 1.0,
            engine_offset: Vec3::new(0.0, 0.0, 2.5),
        }
    }
}

/// Explosion bursts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionConfig {
    /// Seconds an explosion lives.
    pub lifetime: f32,
    pub debris_count: usize,
    pub debris_speed: f32,
    /// The flash sphere stops growing at this scale.
    pub flash_max_scale: f32,
}

impl Default for ExplosionConfig {
    fn default() -> Self {
        Self {
            lifetime: 2.0,
            debris_count: 24,
            debris_speed: 40.0,
            flash_max_scale: 5.0,
        }
    }
}

/// Chase camera.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Zoom distance when cruising.
    pub near_zoom: f32,
    /// Zoom distance while boosting.
    pub far_zoom: f32,
    /// Per-frame blend factor when pulling out.
    pub zoom_out_rate: f32,
    /// Per-frame blend factor when returning.
    pub zoom_in_rate: f32,
    /// Per-frame position smoothing factor.
    pub follow_factor: f32,
    /// Camera height as a fraction of zoom distance.
    pub height_ratio: f32,
    /// Look target in the aircraft's local frame.
    pub look_ahead: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            near_zoom: 15.0,
            far_zoom: 25.0,
            zoom_out_rate: 0.1,
            zoom_in_rate: 0.03,
            follow_factor: 0.1,
            height_ratio: 1.0 / 3.0,
            look_ahead: Vec3::new(0.0, 2.0, -30.0),
        }
    }
}

/// Session flow: spawning, crash recovery, frame guard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Where the aircraft appears at start and after a reset.
    pub spawn_point: Vec3,
    /// Minimum height above terrain at the spawn point.
    pub spawn_clearance: f32,
    /// Real-time seconds between a crash and the reset.
    pub reset_delay: f64,
    /// Frame deltas are capped at this many seconds.
    pub max_frame_dt: f32,
    /// Fixed RNG seed; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            spawn_point: Vec3::new(0.0, 800.0, 0.0),
            spawn_clearance: 300.0,
            reset_delay: 3.0,
            max_frame_dt: 0.25,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// `max_frame_dt` made usable as a clamp bound. Negative caps become 0,
    /// NaN or infinite ones fall back to the default.
    pub fn frame_dt_cap(&self) -> f32 {
        if self.max_frame_dt.is_finite() {
            self.max_frame_dt.max(0.0)
        } else {
            Self::default().max_frame_dt
        }
    }
}

/// Complete simulation tuning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub flight: FlightConfig,
    pub weapon: WeaponConfig,
    pub drones: DroneConfig,
    pub contrails: ContrailConfig,
    pub explosions: ExplosionConfig,
    pub camera: CameraConfig,
    pub clouds: CloudConfig,
    pub session: SessionConfig,
}
