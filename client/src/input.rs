//! Keyboard and mouse input
//!
//! Input is collected into [`InputState`] first; the simulation and camera systems consume it
//! later in the same frame.

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use shared::MovementIntent;

/// Orbit rotation per pixel of right-drag (radians).
const ORBIT_SENSITIVITY: f32 = 0.005;

/// Pixels of smooth scrolling that count as one wheel notch.
const PIXELS_PER_SCROLL_LINE: f32 = 100.0;

/// Client-side input state
#[derive(Resource, Default, Debug)]
pub struct InputState {
    /// Movement keys currently held.
    pub intent: MovementIntent,
    /// Set on the jump key's down edge, cleared once the simulation has seen it.
    pub jump_requested: bool,
    /// Pending orbit rotation (x = azimuth, y = polar), consumed by the camera.
    pub orbit: Vec2,
    /// Pending zoom in wheel notches (positive zooms in), consumed by the camera.
    pub zoom_steps: f32,
}

/// Movement flags for the keys currently held.
///
/// `A` raises the `right` flag and `D` the `left` flag. Combined with the flags' own
/// mapping onto the camera axes this moves the avatar toward the pressed side of the screen.
pub fn bind_movement_keys(keyboard: &ButtonInput<KeyCode>) -> MovementIntent {
    MovementIntent {
        forward: keyboard.pressed(KeyCode::KeyW),
        backward: keyboard.pressed(KeyCode::KeyS),
        left: keyboard.pressed(KeyCode::KeyD),
        right: keyboard.pressed(KeyCode::KeyA),
    }
}

/// Handle keyboard input for movement and jumping
pub fn handle_keyboard_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut input_state: ResMut<InputState>,
) {
    input_state.intent = bind_movement_keys(&keyboard);

    if keyboard.just_pressed(KeyCode::Space) {
        input_state.jump_requested = true;
    }
}

/// Right-drag orbits the camera, the wheel zooms. No panning.
pub fn handle_mouse_input(
    mut mouse_motion: MessageReader<MouseMotion>,
    mut mouse_wheel: MessageReader<MouseWheel>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut input_state: ResMut<InputState>,
) {
    let mut delta = Vec2::ZERO;
    for motion in mouse_motion.read() {
        delta += motion.delta;
    }
    if mouse_button.pressed(MouseButton::Right) && delta != Vec2::ZERO {
        input_state.orbit += delta * ORBIT_SENSITIVITY;
    }

    for wheel in mouse_wheel.read() {
        let notches = match wheel.unit {
            MouseScrollUnit::Line => wheel.y,
            MouseScrollUnit::Pixel => wheel.y / PIXELS_PER_SCROLL_LINE,
        };
        input_state.zoom_steps += notches;
    }
}
