//! Input handling: raw keyboard and mouse state reduced to a flight intent.

mod intent;

pub use intent::FlightIntent;

use std::collections::HashSet;

/// Manages input state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed this frame.
    keys_pressed: HashSet<KeyCode>,

    /// Mouse buttons currently held.
    mouse_held: HashSet<MouseButton>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame state. Call at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.keys_held.contains(&key) {
                    self.keys_pressed.insert(key);
                }
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
            }
        }
    }

    /// Process a mouse button event.
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.mouse_held.insert(button);
            }
            ElementState::Released => {
                self.mouse_held.remove(&button);
            }
        }
    }

    /// Drop everything held, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        if !self.keys_held.is_empty() || !self.mouse_held.is_empty() {
            log::debug!("Releasing {} held keys", self.keys_held.len());
        }
        self.keys_held.clear();
        self.keys_pressed.clear();
        self.mouse_held.clear();
    }

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a mouse button is held.
    pub fn is_mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    /// Escape went down this frame.
    pub fn quit_requested(&self) -> bool {
        self.is_key_pressed(KeyCode::Escape)
    }

    fn any_held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|k| self.is_key_held(*k))
    }

    /// Snapshot the current state as a flight intent.
    ///
    /// The stick is inverted: pulling back (S / Down) raises the nose.
    pub fn intent(&self) -> FlightIntent {
        FlightIntent {
            pitch_up: self.any_held(&[KeyCode::KeyS, KeyCode::ArrowDown]),
            pitch_down: self.any_held(&[KeyCode::KeyW, KeyCode::ArrowUp]),
            roll_left: self.any_held(&[KeyCode::KeyA, KeyCode::ArrowLeft]),
            roll_right: self.any_held(&[KeyCode::KeyD, KeyCode::ArrowRight]),
            yaw_left: self.is_key_held(KeyCode::KeyQ),
            yaw_right: self.is_key_held(KeyCode::KeyE),
            throttle: self.any_held(&[KeyCode::ShiftLeft, KeyCode::ShiftRight]),
            brake: self.any_held(&[KeyCode::KeyZ, KeyCode::ControlLeft]),
            fire: self.is_key_held(KeyCode::Space) || self.is_mouse_held(MouseButton::Left),
        }
    }
}

// Re-export for convenience
pub use winit::event::{ElementState, MouseButton};
pub use winit::keyboard::KeyCode;
