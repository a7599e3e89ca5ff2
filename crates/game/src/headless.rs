//! Windowless run: a scripted autopilot flies fixed-length frames.

use engine_core::Time;
use simulation::{FlightIntent, FlightTelemetry};
use std::time::Duration;

use crate::config::GameConfig;
use crate::session::{Session, SessionStats};

/// Keeps the craft level inside an altitude band while cycling the cannon
/// and nitro.
#[derive(Debug, Clone)]
pub struct Autopilot {
    pub floor: f32,
    pub ceiling: f32,
    /// Seconds per boost cycle; boost is held for the first `boost_seconds`.
    pub boost_period: f64,
    pub boost_seconds: f64,
    /// Seconds per trigger cycle; fire is held for the first half.
    pub fire_period: f64,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            floor: 600.0,
            ceiling: 1200.0,
            boost_period: 10.0,
            boost_seconds: 3.0,
            fire_period: 2.0,
        }
    }
}

impl Autopilot {
    pub fn intent(&self, t: &FlightTelemetry, now: f64) -> FlightIntent {
        let target_pitch = if t.altitude < self.floor {
            10.0
        } else if t.altitude > self.ceiling {
            -10.0
        } else {
            0.0
        };
        FlightIntent {
            pitch_up: t.pitch_degrees < target_pitch - 2.0,
            pitch_down: t.pitch_degrees > target_pitch + 2.0,
            throttle: now.rem_euclid(self.boost_period) < self.boost_seconds,
            fire: now.rem_euclid(self.fire_period) < self.fire_period * 0.5,
            ..Default::default()
        }
    }
}

/// Fly for `headless_seconds` at `headless_frame_rate` and report.
pub fn run(config: &GameConfig) -> SessionStats {
    let mut session = Session::new(config);
    let autopilot = Autopilot::default();
    let dt = config.headless_dt();
    let frames = (config.headless_seconds.max(0.0) / dt).round() as u64;
    let report_every = config.headless_frame_rate.max(1) as u64;
    let mut time = Time::new();

    log::info!("Headless run: {} frames at {:.4}s", frames, dt);
    session.describe();

    for _ in 0..frames {
        time.step(Duration::from_secs_f32(dt));
        let now = time.elapsed_seconds();
        let intent = autopilot.intent(&session.sim.telemetry(), now);
        session.frame(&intent, dt, now);

        if time.frame_count() % report_every == 0 {
            log::info!("[{:6.1}s] {}", now, session.hud());
        }
    }

    let stats = session.stats;
    log::info!(
        "Headless run finished: {} frames, {} kills, {} crashes, {} resets",
        stats.frames,
        stats.kills,
        stats.crashes,
        stats.resets
    );
    stats
}
