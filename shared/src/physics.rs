//! Vertical physics: gravity, jump impulse and the flat ground plane at y = 0.
//!
//! Unlike planar movement these terms are integrated with the frame delta, so a zero-length
//! frame leaves height and vertical velocity exactly as they were.

use crate::AvatarState;

/// Gravity in units/s^2 (negative Y). Very strong, for a snappy toy-like fall.
pub const GRAVITY: f32 = -200.0;

/// Upward velocity added by a jump (units/s).
pub const JUMP_IMPULSE: f32 = 60.0;

/// Height of the ground plane.
pub const GROUND_HEIGHT: f32 = 0.0;

/// Integrate gravity for one frame and resolve contact with the ground.
///
/// Crossing below the ground snaps the avatar onto it, kills vertical velocity and re-arms
/// the jump.
pub fn step_vertical(state: &mut AvatarState, dt: f32) {
    state.vertical_velocity += GRAVITY * dt;
    state.position.y += state.vertical_velocity * dt;

    if state.position.y < GROUND_HEIGHT {
        state.position.y = GROUND_HEIGHT;
        state.vertical_velocity = 0.0;
        state.can_jump = true;
    }
}

/// Apply the jump impulse if the avatar is allowed to jump.
///
/// Returns whether the jump fired. Only the ground re-arms it, so repeated presses while
/// airborne do nothing.
pub fn apply_jump(state: &mut AvatarState) -> bool {
    if !state.can_jump {
        return false;
    }
    state.vertical_velocity += JUMP_IMPULSE;
    state.can_jump = false;
    true
}
