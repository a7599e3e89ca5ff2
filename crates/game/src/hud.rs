//! HUD readouts formatted from flight telemetry.

use simulation::FlightTelemetry;
use std::fmt;

/// Dash length of the full speed gauge arc.
pub const GAUGE_ARC: f32 = 377.0;
/// Speed (units/s) at which the gauge is full.
pub const GAUGE_FULL_SPEED: f32 = 300.0;
/// Units/s to km/h.
const KMH_PER_UNIT: f32 = 3.6;
/// Characters in the text nitro bar.
const NITRO_BAR_CELLS: usize = 10;
/// Plume intensity at which the afterburner tag lights.
const AFTERBURNER_GLOW: f32 = 0.5;

/// Round half toward positive infinity.
fn round_half_up(value: f32) -> i64 {
    (value + 0.5).floor() as i64
}

/// Everything the instrument panel shows for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct HudReadout {
    pub speed_kmh: i64,
    /// 0..1 fill of the speed gauge.
    pub gauge_ratio: f32,
    /// Undrawn part of the gauge arc.
    pub gauge_offset: f32,
    /// Nitro bar width in percent, 0..100.
    pub nitro_width: f32,
    pub nitro_label: &'static str,
    pub overheated: bool,
    pub altitude: String,
    pub pitch: String,
    pub afterburner: bool,
}

impl From<&FlightTelemetry> for HudReadout {
    fn from(t: &FlightTelemetry) -> Self {
        let gauge_ratio = (t.speed / GAUGE_FULL_SPEED).min(1.0);
        let altitude = round_half_up(t.altitude).max(0);
        Self {
            speed_kmh: round_half_up(t.speed * KMH_PER_UNIT),
            gauge_ratio,
            gauge_offset: GAUGE_ARC * (1.0 - gauge_ratio),
            nitro_width: t.nitro_percent.clamp(0.0, 100.0),
            nitro_label: if t.overheated { "OVERHEAT" } else { "NITRO" },
            overheated: t.overheated,
            altitude: format!("ALT: {:04}", altitude),
            pitch: format!("PITCH: {}°", round_half_up(t.pitch_degrees)),
            afterburner: t.engine_plume >= AFTERBURNER_GLOW,
        }
    }
}

impl HudReadout {
    fn nitro_bar(&self) -> String {
        let filled = ((self.nitro_width / 100.0) * NITRO_BAR_CELLS as f32).round() as usize;
        let filled = filled.min(NITRO_BAR_CELLS);
        format!("{}{}", "#".repeat(filled), ".".repeat(NITRO_BAR_CELLS - filled))
    }
}

impl fmt::Display for HudReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} km/h | {} [{}] | {} | {}",
            self.speed_kmh,
            self.nitro_label,
            self.nitro_bar(),
            self.altitude,
            self.pitch
        )?;
        if self.afterburner {
            write!(f, " | AB")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn telemetry() -> FlightTelemetry {
        FlightTelemetry {
            speed: 100.0,
            max_speed: 200.0,
            nitro_percent: 100.0,
            overheated: false,
            altitude: 800.0,
            pitch_degrees: 0.0,
            engine_plume: 0.0,
        }
    }

    #[test]
    fn speed_in_kmh_and_gauge() {
        let hud = HudReadout::from(&telemetry());
        assert_eq!(hud.speed_kmh, 360);
        assert!((hud.gauge_ratio - 1.0 / 3.0).abs() < 1e-6);
        assert!((hud.gauge_offset - 377.0 * 2.0 / 3.0).abs() < 1e-3);

        let fast = HudReadout::from(&FlightTelemetry { speed: 450.0, ..telemetry() });
        assert_eq!(fast.gauge_ratio, 1.0);
        assert_eq!(fast.gauge_offset, 0.0);
    }

    #[test]
    fn nitro_label_and_clamp() {
        let hot = HudReadout::from(&FlightTelemetry { overheated: true, nitro_percent: -3.0, ..telemetry() });
        assert_eq!(hot.nitro_label, "OVERHEAT");
        assert_eq!(hot.nitro_width, 0.0);

        let ready = HudReadout::from(&telemetry());
        assert_eq!(ready.nitro_label, "NITRO");
        assert_eq!(ready.nitro_width, 100.0);
    }

    #[test]
    fn altitude_is_padded_and_non_negative() {
        assert_eq!(HudReadout::from(&FlightTelemetry { altitude: 42.4, ..telemetry() }).altitude, "ALT: 0042");
        assert_eq!(HudReadout::from(&FlightTelemetry { altitude: -120.0, ..telemetry() }).altitude, "ALT: 0000");
        assert_eq!(HudReadout::from(&FlightTelemetry { altitude: 12345.0, ..telemetry() }).altitude, "ALT: 12345");
    }

    #[test]
    fn pitch_rounds_half_up() {
        assert_eq!(HudReadout::from(&FlightTelemetry { pitch_degrees: 12.5, ..telemetry() }).pitch, "PITCH: 13°");
        assert_eq!(HudReadout::from(&FlightTelemetry { pitch_degrees: -2.5, ..telemetry() }).pitch, "PITCH: -2°");
    }

    #[test]
    fn one_line_summary() {
        let hud = HudReadout::from(&FlightTelemetry { nitro_percent: 50.0, ..telemetry() });
        assert_eq!(hud.to_string(), "360 km/h | NITRO [#####.....] | ALT: 0800 | PITCH: 0°");
    }

    #[test]
    fn afterburner_tag_follows_the_plume() {
        let idle = HudReadout::from(&FlightTelemetry { engine_plume: 0.3, ..telemetry() });
        assert!(!idle.afterburner);
        assert!(!idle.to_string().ends_with("AB"));

        let lit = HudReadout::from(&FlightTelemetry { engine_plume: 0.8, ..telemetry() });
        assert!(lit.afterburner);
        assert!(lit.to_string().ends_with(" | AB"));
    }
}
