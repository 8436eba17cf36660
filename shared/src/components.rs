//! ECS components shared by anything that hosts avatars in a Bevy world.
//!
//! The avatar root entity carries an [`AvatarState`](crate::AvatarState) plus exactly one of
//! [`PlayerAvatar`] / [`ExtraAvatar`]. Limb pivots are separate entities tagged with
//! [`LimbJoint`] so the renderer can pose them without walking the hierarchy.

use bevy::prelude::*;

use crate::animation::LimbPose;

/// Marker for the keyboard-driven avatar the camera follows.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct PlayerAvatar;

/// Marker for an autonomous avatar. It never receives movement intent, so it only falls,
/// lands and idles.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ExtraAvatar;

/// Which limb a pivot drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Limb {
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl Limb {
    pub const ALL: [Limb; 4] = [Limb::LeftArm, Limb::RightArm, Limb::LeftLeg, Limb::RightLeg];

    /// Swing rotation of this limb in `pose`.
    pub fn angle(self, pose: &LimbPose) -> f32 {
        match self {
            Limb::LeftArm => pose.left_arm,
            Limb::RightArm => pose.right_arm,
            Limb::LeftLeg => pose.left_leg,
            Limb::RightLeg => pose.right_leg,
        }
    }

    pub fn is_arm(self) -> bool {
        matches!(self, Limb::LeftArm | Limb::RightArm)
    }

    /// -1 for the avatar's left side, +1 for its right.
    pub fn side(self) -> f32 {
        match self {
            Limb::LeftArm | Limb::LeftLeg => -1.0,
            Limb::RightArm | Limb::RightLeg => 1.0,
        }
    }
}

/// Limb pivot entity. `owner` is the avatar root whose [`LimbPose`] drives it.
#[derive(Component, Clone, Copy, Debug)]
pub struct LimbJoint {
    pub owner: Entity,
    pub limb: Limb,
}
