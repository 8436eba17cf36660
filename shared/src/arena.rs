//! Arena bounds: the flat square ground plane every avatar stands on.

use bevy::prelude::*;

/// Edge length of the ground plane (world units).
pub const PLANE_SIZE: f32 = 100.0;

/// Number of autonomous avatars spawned next to the player.
pub const EXTRA_AVATAR_COUNT: usize = 10;

/// Square ground plane centred on the origin.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct Arena {
    pub size: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(PLANE_SIZE)
    }
}

impl Arena {
    pub fn new(size: f32) -> Self {
        Self { size }
    }

    /// Distance from the centre to an edge.
    pub fn half_extent(&self) -> f32 {
        self.size / 2.0
    }

    /// Clamp x and z into the plane. Height is untouched.
    pub fn clamp(&self, position: Vec3) -> Vec3 {
        let half = self.half_extent();
        Vec3::new(
            position.x.clamp(-half, half),
            position.y,
            position.z.clamp(-half, half),
        )
    }
}
