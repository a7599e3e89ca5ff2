//! Per-frame flight intent, decoupled from the physical input device.

/// Boolean control request sampled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlightIntent {
    pub pitch_up: bool,
    pub pitch_down: bool,
    pub roll_left: bool,
    pub roll_right: bool,
    pub yaw_left: bool,
    pub yaw_right: bool,
    /// Nitro boost request.
    pub throttle: bool,
    pub brake: bool,
    pub fire: bool,
}

fn axis(positive: bool, negative: bool) -> f32 {
    (positive as i8 - negative as i8) as f32
}

impl FlightIntent {
    /// +1 nose up, -1 nose down.
    pub fn pitch_axis(&self) -> f32 {
        axis(self.pitch_up, self.pitch_down)
    }

    /// +1 rolling right, -1 rolling left.
    pub fn roll_axis(&self) -> f32 {
        axis(self.roll_right, self.roll_left)
    }

    /// +1 yawing left, -1 yawing right.
    pub fn yaw_axis(&self) -> f32 {
        axis(self.yaw_left, self.yaw_right)
    }

    /// True when no control is requested.
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}
