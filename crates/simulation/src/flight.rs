//! Aircraft flight model: nitro/overheat energy state machine, speed
//! integration and sequential local-axis steering.
//!
//! Arcade approximation only. Rotations are applied directly in the
//! aircraft's local frame each frame (no slerp, no aerodynamics).

use engine_core::{Transform, Vec3};
use input::FlightIntent;

use crate::config::{ContrailConfig, FlightConfig};

/// Full tank.
pub const NITRO_CAPACITY: f32 = 100.0;
/// Nitro consumed per second while boosting.
pub const NITRO_BURN_RATE: f32 = 15.0;
/// Nitro recovered per second while not boosting.
pub const NITRO_REGEN_RATE: f32 = 5.0;
/// An overheated engine unlocks once the tank refills past this level.
pub const OVERHEAT_RECOVERY: f32 = 25.0;
/// Max speed multiplier while boosting.
pub const BOOST_SPEED_MULTIPLIER: f32 = 2.5;
/// Yaw contributed per unit of roll input (banked-turn coupling).
const ROLL_YAW_COUPLING: f32 = -0.5;
/// Cosmetic bank angle at full roll input, radians.
const VISUAL_BANK_LIMIT: f32 = 0.9;
/// Cosmetic bank blend rate, per second.
const VISUAL_BANK_RATE: f32 = 5.0;
/// Overspeed bleeds off this many times faster than cruise drag.
const OVERSPEED_DRAG_FACTOR: f32 = 3.0;
/// Cruise drag as a fraction of `deceleration`.
const CRUISE_DRAG_FACTOR: f32 = 0.2;
/// Engine plume blend rate, per second.
const PLUME_RATE: f32 = 4.0;
/// Plume intensity at base max speed without nitro.
const PLUME_IDLE: f32 = 0.3;

/// Authoritative aircraft state.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightState {
    pub transform: Transform,
    pub speed: f32,
    /// Current ceiling: base max speed, or boosted while nitro burns.
    pub max_speed: f32,
    pub nitro: f32,
    /// Latched when the tank runs dry; cleared once nitro > [`OVERHEAT_RECOVERY`].
    pub overheated: bool,
}

impl FlightState {
    fn new(config: &FlightConfig, position: Vec3) -> Self {
        Self {
            transform: Transform::from_position(position),
            speed: config.initial_speed,
            max_speed: config.base_max_speed,
            nitro: NITRO_CAPACITY,
            overheated: false,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn forward(&self) -> Vec3 {
        self.transform.forward()
    }

    /// Nitro as a 0–100 percentage.
    pub fn nitro_percent(&self) -> f32 {
        self.nitro / NITRO_CAPACITY * 100.0
    }
}

/// What happened during one flight update.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlightFrame {
    /// Nitro burned this frame.
    pub boosting: bool,
    /// Distance travelled this frame.
    pub distance: f32,
}

/// Integrates intent into aircraft state once per frame.
#[derive(Debug, Clone)]
pub struct FlightModel {
    config: FlightConfig,
    state: FlightState,
    /// Cosmetic roll angle, independent of the flight rotation.
    visual_bank: f32,
    /// Cosmetic afterburner intensity, 0..1.
    plume: f32,
}

impl FlightModel {
    pub fn new(config: FlightConfig, position: Vec3) -> Self {
        let state = FlightState::new(&config, position);
        Self {
            config,
            state,
            visual_bank: 0.0,
            plume: 0.0,
        }
    }

    pub fn state(&self) -> &FlightState {
        &self.state
    }

    pub fn transform(&self) -> &Transform {
        &self.state.transform
    }

    pub fn config(&self) -> &FlightConfig {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut FlightState {
        &mut self.state
    }

    pub fn visual_bank(&self) -> f32 {
        self.visual_bank
    }

    pub fn plume(&self) -> f32 {
        self.plume
    }

    /// Transform for drawing the aircraft: flight rotation plus cosmetic bank.
    pub fn visual_transform(&self) -> Transform {
        let mut t = self.state.transform;
        t.rotate_local_z(self.visual_bank);
        t
    }

    /// Advance one frame. Negative `dt` is treated as zero.
    pub fn update(&mut self, intent: &FlightIntent, dt: f32) -> FlightFrame {
        let dt = dt.max(0.0);
        let boosting = self.update_energy(intent, dt);
        self.steer(intent, dt);
        self.update_cosmetics(intent, boosting, dt);

        let distance = self.state.speed * dt;
        self.state.transform.translate_local(Vec3::new(0.0, 0.0, -distance));

        FlightFrame { boosting, distance }
    }

    /// Nitro/overheat state machine and speed integration. Returns whether
    /// nitro burned this frame.
    fn update_energy(&mut self, intent: &FlightIntent, dt: f32) -> bool {
        let config = &self.config;
        let s = &mut self.state;

        let mut thrust_enabled = true;
        if s.overheated {
            thrust_enabled = false;
            if s.nitro > OVERHEAT_RECOVERY {
                s.overheated = false;
                log::debug!("Engine cooled down at {:.1} nitro", s.nitro);
            }
        } else if s.nitro <= 0.0 {
            s.overheated = true;
            thrust_enabled = false;
        }

        let boosting = thrust_enabled && intent.throttle && s.nitro > 0.0;
        if boosting {
            s.nitro = (s.nitro - NITRO_BURN_RATE * dt).max(0.0);
            s.max_speed = config.base_max_speed * BOOST_SPEED_MULTIPLIER;
            if s.speed < s.max_speed {
                s.speed = (s.speed + 2.0 * config.acceleration * dt).min(s.max_speed);
            }
            if s.nitro <= 0.0 {
                s.overheated = true;
                log::debug!("Nitro exhausted, engine overheated");
            }
        } else {
            s.nitro = (s.nitro + NITRO_REGEN_RATE * dt).min(NITRO_CAPACITY);
            s.max_speed = config.base_max_speed;
            if intent.brake {
                if s.speed > config.min_speed {
                    s.speed = (s.speed - config.acceleration * dt).max(config.min_speed);
                }
            } else if s.speed > s.max_speed {
                // Residual nitro overspeed bleeds off quickly.
                let decay = OVERSPEED_DRAG_FACTOR * config.deceleration * dt;
                s.speed = (s.speed - decay).max(s.max_speed);
            } else {
                let drag = config.deceleration * CRUISE_DRAG_FACTOR * dt;
                s.speed = (s.speed - drag).max(0.0);
            }
        }

        boosting
    }

    /// Pitch, then yaw (with roll coupling), then roll. Order matters.
    fn steer(&mut self, intent: &FlightIntent, dt: f32) {
        let config = &self.config;
        let roll = intent.roll_axis();
        let transform = &mut self.state.transform;

        transform.rotate_local_x(intent.pitch_axis() * config.pitch_rate * dt);
        transform.rotate_local_y((intent.yaw_axis() * config.yaw_rate + roll * ROLL_YAW_COUPLING) * dt);
        transform.rotate_local_z(-roll * config.roll_rate * dt);
    }

    fn update_cosmetics(&mut self, intent: &FlightIntent, boosting: bool, dt: f32) {
        let target_bank = -intent.roll_axis() * VISUAL_BANK_LIMIT;
        self.visual_bank += (target_bank - self.visual_bank) * (VISUAL_BANK_RATE * dt).min(1.0);

        let target_plume = if boosting {
            1.0
        } else {
            PLUME_IDLE * (self.state.speed / self.config.base_max_speed).min(1.0)
        };
        self.plume += (target_plume - self.plume) * (PLUME_RATE * dt).min(1.0);
    }

    /// Whether contrails should be emitted after the given frame.
    pub fn emits_contrail(&self, frame: &FlightFrame, contrails: &ContrailConfig) -> bool {
        self.state.speed > contrails.speed_threshold || (frame.boosting && self.state.nitro > 0.0)
    }

    /// Contrail anchors for this frame, spread back along the path travelled
    /// so fast flight leaves no gaps. Empty when no contrail is due.
    pub fn contrail_anchors(&self, frame: &FlightFrame, contrails: &ContrailConfig) -> Vec<Vec3> {
        if !self.emits_contrail(frame, contrails) || contrails.spawns_per_frame == 0 {
            return Vec::new();
        }
        let exhaust = self.state.transform.transform_point(contrails.engine_offset);
        let step = self.state.forward() * (frame.distance / contrails.spawns_per_frame as f32);
        (0..contrails.spawns_per_frame)
            .map(|i| exhaust - step * i as f32)
            .collect()
    }

    /// Crash: the aircraft stops dead where it is.
    pub fn crash(&mut self) {
        self.state.speed = 0.0;
        self.plume = 0.0;
    }

    /// Return to a fresh aircraft at `position`, level and with a full tank.
    pub fn reset(&mut self, position: Vec3) {
        self.state = FlightState::new(&self.config, position);
        self.visual_bank = 0.0;
        self.plume = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn model() -> FlightModel {
        FlightModel::new(FlightConfig::default(), Vec3::new(0.0, 1000.0, 0.0))
    }

    fn boost() -> FlightIntent {
        FlightIntent { throttle: true, ..Default::default() }
    }

    #[test]
    fn plume_flares_on_boost_and_settles_to_idle() {
        let mut m = model();
        assert_eq!(m.plume(), 0.0);

        m.update(&boost(), 0.5);
        assert!((m.plume() - 1.0).abs() < 1e-6);

        // rate × dt = 1 snaps the plume onto its target each frame.
        for _ in 0..8 {
            m.update(&FlightIntent::default(), 0.25);
            let idle = PLUME_IDLE * (m.state().speed / m.config().base_max_speed).min(1.0);
            assert!((m.plume() - idle).abs() < 1e-5);
        }
        assert!(m.plume() <= PLUME_IDLE);
    }

    #[test]
    fn crash_and_reset_douse_the_plume() {
        let mut m = model();
        m.update(&boost(), 0.5);
        m.crash();
        assert_eq!(m.plume(), 0.0);

        m.update(&boost(), 0.5);
        assert!(m.plume() > 0.0);
        m.reset(Vec3::new(0.0, 800.0, 0.0));
        assert_eq!(m.plume(), 0.0);
    }

    #[test]
    fn idle_flight_moves_forward_and_drags() {
        let mut m = model();
        let frame = m.update(&FlightIntent::default(), 1.0);
        // 100 - 20 * 0.2
        assert!((m.state().speed - 96.0).abs() < 1e-4);
        assert!((frame.distance - 96.0).abs() < 1e-4);
        assert!((m.state().position().z + 96.0).abs() < 1e-3);
        assert!(!frame.boosting);
    }

    #[test]
    fn boost_burns_nitro_and_raises_ceiling() {
        let mut m = model();
        let frame = m.update(&boost(), 1.0);
        assert!(frame.boosting);
        assert_eq!(m.state().nitro, 85.0);
        assert_eq!(m.state().max_speed, 500.0);
        // 100 + 2 * 40
        assert_eq!(m.state().speed, 180.0);
    }

    #[test]
    fn releasing_boost_restores_base_ceiling_and_regenerates() {
        let mut m = model();
        m.update(&boost(), 1.0);
        m.update(&FlightIntent::default(), 1.0);
        assert_eq!(m.state().max_speed, 200.0);
        assert_eq!(m.state().nitro, 90.0);
    }

    #[test]
    fn overheat_latches_at_empty_and_releases_above_threshold() {
        let mut m = model();
        // 100 / 15 ≈ 6.67 s of burn empties the tank.
        for _ in 0..7 {
            m.update(&boost(), 1.0);
        }
        assert_eq!(m.state().nitro, 0.0);
        assert!(m.state().overheated);

        // Holding throttle does nothing while overheated; nitro regenerates.
        for _ in 0..5 {
            let frame = m.update(&boost(), 1.0);
            assert!(!frame.boosting);
            assert!(m.state().overheated);
        }
        assert_eq!(m.state().nitro, 25.0);

        // 25 is not above the threshold; regen to 30 first.
        m.update(&boost(), 1.0);
        assert!(m.state().overheated);
        assert_eq!(m.state().nitro, 30.0);

        // The frame that clears the latch still keeps thrust off.
        let frame = m.update(&boost(), 1.0);
        assert!(!m.state().overheated);
        assert!(!frame.boosting);

        let frame = m.update(&boost(), 1.0);
        assert!(frame.boosting);
    }

    #[test]
    fn brake_stops_at_min_speed() {
        let mut m = model();
        let brake = FlightIntent { brake: true, ..Default::default() };
        for _ in 0..10 {
            m.update(&brake, 0.5);
        }
        assert_eq!(m.state().speed, 50.0);
    }

    #[test]
    fn brake_never_raises_speed_to_min() {
        let mut m = model();
        for _ in 0..40 {
            m.update(&FlightIntent::default(), 1.0);
        }
        let slow = m.state().speed;
        assert!(slow < 50.0);
        m.update(&FlightIntent { brake: true, ..Default::default() }, 0.1);
        assert_eq!(m.state().speed, slow);
    }

    #[test]
    fn overspeed_bleeds_toward_base_ceiling() {
        let mut m = model();
        for _ in 0..4 {
            m.update(&boost(), 1.0);
        }
        let fast = m.state().speed;
        assert!(fast > 200.0);

        // 420 -> 200 in eight half-second frames.
        let mut previous = fast;
        for _ in 0..8 {
            m.update(&FlightIntent::default(), 0.5);
            let s = m.state().speed;
            // 3 * 20 * 0.5 per frame, never undershooting the ceiling.
            assert!(s <= previous);
            assert!(previous - s <= 30.0 + 1e-3);
            assert!(s >= 200.0);
            previous = s;
        }
        assert_eq!(m.state().speed, 200.0);
    }

    #[test]
    fn drag_never_goes_negative() {
        let mut m = model();
        for _ in 0..100 {
            m.update(&FlightIntent::default(), 1.0);
        }
        assert_eq!(m.state().speed, 0.0);
    }

    #[test]
    fn random_inputs_keep_energy_invariants() {
        let mut rng = StdRng::seed_from_u64(0xF11E);
        let mut m = model();
        let mut was_overheated = false;
        for _ in 0..5000 {
            let intent = FlightIntent {
                pitch_up: rng.gen_bool(0.2),
                pitch_down: rng.gen_bool(0.2),
                roll_left: rng.gen_bool(0.2),
                roll_right: rng.gen_bool(0.2),
                yaw_left: rng.gen_bool(0.1),
                yaw_right: rng.gen_bool(0.1),
                throttle: rng.gen_bool(0.7),
                brake: rng.gen_bool(0.1),
                fire: false,
            };
            let before = m.state().clone();
            m.update(&intent, rng.gen_range(0.0..0.1));
            let s = m.state();

            assert!((0.0..=NITRO_CAPACITY).contains(&s.nitro));
            assert!(s.speed >= 0.0);
            if s.overheated && !was_overheated {
                assert_eq!(s.nitro, 0.0, "overheat must latch only on an empty tank");
            }
            if was_overheated && !s.overheated {
                assert!(before.nitro > OVERHEAT_RECOVERY);
            }
            // Above the ceiling speed may only fall.
            if before.speed > s.max_speed {
                assert!(s.speed <= before.speed);
            }
            was_overheated = s.overheated;
        }
    }

    #[test]
    fn pitch_up_raises_the_nose() {
        let mut m = model();
        m.update(&FlightIntent { pitch_up: true, ..Default::default() }, 0.2);
        assert!(m.transform().pitch_angle() > 0.0);
    }

    #[test]
    fn right_roll_banks_and_turns_right() {
        let mut m = model();
        for _ in 0..10 {
            m.update(&FlightIntent { roll_right: true, ..Default::default() }, 1.0 / 30.0);
        }
        // Right wing down.
        assert!(m.transform().right().y < 0.0);
        // Coupled yaw swings the nose toward +X.
        assert!(m.state().forward().x > 0.0);
        assert!(m.visual_bank() < 0.0);
        assert!(m.visual_bank() >= -VISUAL_BANK_LIMIT);
    }

    #[test]
    fn steering_order_is_pitch_then_yaw_then_roll() {
        let config = FlightConfig::default();
        let intent = FlightIntent {
            pitch_up: true,
            roll_right: true,
            yaw_left: true,
            ..Default::default()
        };
        let dt = 0.25;

        let mut expected = Transform::from_position(Vec3::ZERO);
        expected.rotate_local_x(config.pitch_rate * dt);
        expected.rotate_local_y((config.yaw_rate + ROLL_YAW_COUPLING) * dt);
        expected.rotate_local_z(-config.roll_rate * dt);

        let mut m = FlightModel::new(config, Vec3::ZERO);
        m.update(&intent, dt);
        let got = m.transform().rotation;
        assert!(got.abs_diff_eq(expected.rotation, 1e-6) || got.abs_diff_eq(-expected.rotation, 1e-6));
    }

    #[test]
    fn visual_bank_does_not_touch_flight_rotation() {
        let mut m = model();
        m.update(&FlightIntent { roll_left: true, ..Default::default() }, 0.1);
        let flight = m.transform().rotation;
        let visual = m.visual_transform().rotation;
        assert!(!flight.abs_diff_eq(visual, 1e-6));
    }

    #[test]
    fn contrails_follow_speed_or_boost() {
        let contrails = ContrailConfig::default();
        let mut m = model();
        let frame = m.update(&FlightIntent::default(), 0.016);
        // Cruise below threshold: no contrail.
        assert!(!m.emits_contrail(&frame, &contrails));
        assert!(m.contrail_anchors(&frame, &contrails).is_empty());

        let frame = m.update(&boost(), 0.016);
        let anchors = m.contrail_anchors(&frame, &contrails);
        assert_eq!(anchors.len(), 2);
        assert!(anchors[0].distance(anchors[1]) > 0.0);
    }

    #[test]
    fn reset_restores_fresh_aircraft() {
        let mut m = model();
        for _ in 0..3 {
            m.update(&FlightIntent { throttle: true, pitch_up: true, ..Default::default() }, 1.0);
        }
        m.crash();
        assert_eq!(m.state().speed, 0.0);

        m.reset(Vec3::new(1.0, 2.0, 3.0));
        let s = m.state();
        assert_eq!(s.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(s.speed, 100.0);
        assert_eq!(s.nitro, NITRO_CAPACITY);
        assert!(!s.overheated);
        assert_eq!(s.transform.rotation, engine_core::Quat::IDENTITY);
        assert_eq!(m.visual_bank(), 0.0);
    }
}
