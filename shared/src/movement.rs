//! Planar movement: facing smoothing and per-frame translation driven by movement intent.
//!
//! Both steps are fixed amounts *per frame*, not per second. A faster display moves and turns
//! the avatar faster; that coupling is part of the game feel and is kept on purpose.

use std::f32::consts::TAU;

use bevy::prelude::*;

/// Planar distance covered per frame for each active movement flag.
pub const MOVE_SPEED: f32 = 0.1;

/// Fraction of the remaining heading error closed per frame.
pub const ROTATION_SMOOTHING: f32 = 0.05;

/// Currently held movement keys.
///
/// `left` moves along +camera-right and `right` along -camera-right. The keyboard mapping
/// swaps the keys to match (`A` raises `right`, `D` raises `left`), so on screen the avatar
/// strafes the way the key suggests.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct MovementIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MovementIntent {
    pub fn any(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Combined direction in camera space (-Z is "into the screen").
    fn camera_local(&self) -> Vec3 {
        let mut local = Vec3::ZERO;
        if self.forward {
            local.z -= 1.0;
        }
        if self.backward {
            local.z += 1.0;
        }
        if self.left {
            local.x += 1.0;
        }
        if self.right {
            local.x -= 1.0;
        }
        local
    }
}

/// Camera orientation as seen by the movement code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    /// World-space look direction (may be pitched).
    pub forward: Vec3,
    /// Strafe axis, `normalize(forward × up)`.
    pub right: Vec3,
}

impl Default for CameraFrame {
    fn default() -> Self {
        Self::new(Vec3::NEG_Z)
    }
}

impl CameraFrame {
    pub fn new(forward: Vec3) -> Self {
        Self {
            forward,
            right: forward.cross(Vec3::Y).normalize_or_zero(),
        }
    }

    /// Look direction flattened onto the ground plane.
    pub fn ground_forward(&self) -> Vec3 {
        Vec3::new(self.forward.x, 0.0, self.forward.z).normalize_or_zero()
    }
}

/// Wrap an angle difference into (-π, π].
#[inline]
pub fn wrap_angle(delta: f32) -> f32 {
    delta.sin().atan2(delta.cos())
}

/// Normalize an angle into [0, 2π).
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Heading the avatar should turn toward.
///
/// With no effective intent (nothing held, or opposite keys cancelling out) this is the
/// current facing, so there is no rotation pressure.
pub fn target_heading(current: f32, intent: &MovementIntent, camera: &CameraFrame) -> f32 {
    let local = intent.camera_local();
    if local == Vec3::ZERO {
        return current;
    }

    let local = local.normalize();
    // Camera space to world: +X is the strafe axis, -Z is the look direction.
    let world = camera.right * local.x - camera.forward * local.z;
    (-world.x).atan2(-world.z)
}

/// Turn `current` a fixed fraction of the shortest way toward `target`.
pub fn smooth_facing(current: f32, target: f32) -> f32 {
    let delta = wrap_angle(target - current);
    normalize_angle(current + delta * ROTATION_SMOOTHING)
}

/// Planar displacement for this frame, before any boundary clamp.
pub fn planar_offset(intent: &MovementIntent, camera: &CameraFrame) -> Vec3 {
    let ahead = camera.ground_forward();
    let strafe = camera.right;

    let mut offset = Vec3::ZERO;
    if intent.forward {
        offset += ahead * MOVE_SPEED;
    }
    if intent.backward {
        offset -= ahead * MOVE_SPEED;
    }
    if intent.left {
        offset += strafe * MOVE_SPEED;
    }
    if intent.right {
        offset -= strafe * MOVE_SPEED;
    }
    offset.y = 0.0;
    offset
}
