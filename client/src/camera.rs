//! Orbit camera that follows the player
//!
//! The camera rides along with the player's planar movement, sits a fixed height above it and
//! orbits a point at head height. Right-drag and the wheel adjust the orbit.

use std::f32::consts::{FRAC_PI_2, PI};

use bevy::prelude::*;
use shared::{AvatarState, PlayerAvatar};

use crate::input::InputState;
use crate::systems::PlayerStep;

/// Camera eye height above the player's feet.
const CAMERA_HEIGHT_ABOVE_PLAYER: f32 = 12.0;

/// Orbit pivot height above the player's feet (head level).
const LOOK_AT_HEIGHT: f32 = 4.5;

/// Where the camera starts before the first follow update.
const CAMERA_START: Vec3 = Vec3::new(0.0, 0.0, 12.0);

const FOV: f32 = 75.0 * PI / 180.0;
const NEAR: f32 = 0.1;
const FAR: f32 = 1000.0;

/// Distance multiplier per wheel notch toward the pivot.
const ZOOM_PER_NOTCH: f32 = 0.95;
const MIN_DISTANCE: f32 = 1.0;
const MAX_DISTANCE: f32 = 500.0;

/// Polar angle limits measured from straight up. The upper limit keeps the camera above the
/// horizon; the lower one avoids the degenerate straight-down view.
const MIN_POLAR: f32 = 0.01;
const MAX_POLAR: f32 = FRAC_PI_2;

/// Marker for the follow camera
#[derive(Component)]
pub struct FollowCamera;

/// Spawn the follow camera
pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        FollowCamera,
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: FOV,
            near: NEAR,
            far: FAR,
            ..default()
        }),
        Transform::from_translation(CAMERA_START).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Rotate and scale `eye` around `target` on a sphere.
///
/// `yaw` turns around the vertical axis, `pitch` moves toward the pole, `zoom` scales the
/// distance. The result never dips below the pivot's horizon.
pub fn orbit_eye(eye: Vec3, target: Vec3, yaw: f32, pitch: f32, zoom: f32) -> Vec3 {
    let arm = eye - target;
    let radius = arm.length();
    if radius <= f32::EPSILON {
        return eye;
    }

    let theta = arm.x.atan2(arm.z) - yaw;
    let phi = ((arm.y / radius).clamp(-1.0, 1.0).acos() - pitch).clamp(MIN_POLAR, MAX_POLAR);
    let radius = (radius * zoom).clamp(MIN_DISTANCE, MAX_DISTANCE);

    target
        + Vec3::new(
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
            radius * phi.sin() * theta.cos(),
        )
}

/// Update camera to follow the player
pub fn update_camera(
    player: Query<&AvatarState, With<PlayerAvatar>>,
    mut camera: Query<&mut Transform, With<FollowCamera>>,
    step: Res<PlayerStep>,
    mut input_state: ResMut<InputState>,
) {
    let Ok(player) = player.single() else {
        return;
    };
    let Ok(mut transform) = camera.single_mut() else {
        return;
    };

    // Ride along with the player's planar step, then hold a fixed height above it.
    let mut eye = transform.translation + Vec3::new(step.offset.x, 0.0, step.offset.z);
    eye.y = player.position.y + CAMERA_HEIGHT_ABOVE_PLAYER;
    let target = player.position + Vec3::Y * LOOK_AT_HEIGHT;

    let orbit = std::mem::take(&mut input_state.orbit);
    let zoom_steps = std::mem::take(&mut input_state.zoom_steps);
    let eye = orbit_eye(eye, target, orbit.x, orbit.y, ZOOM_PER_NOTCH.powf(zoom_steps));

    *transform = Transform::from_translation(eye).looking_at(target, Vec3::Y);
}
