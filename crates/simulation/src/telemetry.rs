//! Read-only flight readouts for the HUD.

use crate::flight::{FlightModel, FlightState};

/// Snapshot of what the instrument panel shows.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlightTelemetry {
    pub speed: f32,
    pub max_speed: f32,
    /// 0–100.
    pub nitro_percent: f32,
    pub overheated: bool,
    /// World Y, not height above terrain.
    pub altitude: f32,
    /// Nose above (+) or below (-) the horizon.
    pub pitch_degrees: f32,
    /// Afterburner glow, 0..1.
    pub engine_plume: f32,
}

impl From<&FlightState> for FlightTelemetry {
    fn from(state: &FlightState) -> Self {
        Self {
            speed: state.speed,
            max_speed: state.max_speed,
            nitro_percent: state.nitro_percent(),
            overheated: state.overheated,
            altitude: state.transform.position.y,
            pitch_degrees: state.transform.pitch_angle().to_degrees(),
            engine_plume: 0.0,
        }
    }
}

impl From<&FlightModel> for FlightTelemetry {
    fn from(model: &FlightModel) -> Self {
        Self {
            engine_plume: model.plume(),
            ..Self::from(model.state())
        }
    }
}
