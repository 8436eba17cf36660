//! Limb swing for the box-built avatars.
//!
//! The swing phase is a sine of the running clock, so every avatar walking at the same time
//! swings in step. Limbs ease toward their targets instead of snapping, which also returns
//! them to rest smoothly when the avatar stops or leaves the ground.

use std::f32::consts::PI;

/// Swing frequency (rad/s) and limb easing rate.
pub const SWING_SPEED: f32 = 12.0;

/// Peak arm rotation around the shoulder (radians).
pub const ARM_SWING_AMPLITUDE: f32 = PI / 8.0;

/// Peak leg rotation around the hip (radians).
pub const LEG_SWING_AMPLITUDE: f32 = PI / 4.0;

/// X-axis rotations of the four limb pivots.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct LimbPose {
    pub left_arm: f32,
    pub right_arm: f32,
    pub left_leg: f32,
    pub right_leg: f32,
}

impl LimbPose {
    pub const REST: Self = Self {
        left_arm: 0.0,
        right_arm: 0.0,
        left_leg: 0.0,
        right_leg: 0.0,
    };

    /// Alternating gait: left arm swings with the right leg, right arm with the left leg.
    pub fn gait(arm: f32, leg: f32) -> Self {
        Self {
            left_arm: arm,
            right_arm: -arm,
            left_leg: -leg,
            right_leg: leg,
        }
    }

    /// Largest absolute limb rotation.
    pub fn max_abs(&self) -> f32 {
        self.left_arm
            .abs()
            .max(self.right_arm.abs())
            .max(self.left_leg.abs())
            .max(self.right_leg.abs())
    }
}

#[inline]
fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Pose the limbs are heading for this frame.
///
/// Only a walking avatar (moving and on the ground) swings; anything else eases back to rest.
pub fn swing_targets(elapsed_secs: f32, walking: bool) -> LimbPose {
    if !walking {
        return LimbPose::REST;
    }
    let phase = (elapsed_secs * SWING_SPEED).sin();
    LimbPose::gait(phase * ARM_SWING_AMPLITUDE, phase * LEG_SWING_AMPLITUDE)
}

/// Ease every limb toward `target`.
///
/// The easing factor is `dt * SWING_SPEED`, capped at 1 so a long frame lands on the target
/// instead of overshooting it.
pub fn step_limbs(pose: &mut LimbPose, target: &LimbPose, dt: f32) {
    let t = (dt * SWING_SPEED).clamp(0.0, 1.0);
    pose.left_arm = lerp(pose.left_arm, target.left_arm, t);
    pose.right_arm = lerp(pose.right_arm, target.right_arm, t);
    pose.left_leg = lerp(pose.left_leg, target.left_leg, t);
    pose.right_leg = lerp(pose.right_leg, target.right_leg, t);
}
