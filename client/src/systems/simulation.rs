//! The per-frame avatar loop.
//!
//! One system walks every avatar in the world and advances it; the player differs only in
//! receiving keyboard intent and in handing its planar step to the camera.

use bevy::prelude::*;
use shared::{Arena, AvatarState, CameraFrame, FrameContext, MovementIntent, PlayerAvatar};

use crate::camera::FollowCamera;
use crate::input::InputState;

/// Planar offset the player moved this frame (before the arena clamp), for the camera to follow.
#[derive(Resource, Default, Debug)]
pub struct PlayerStep {
    pub offset: Vec3,
}

/// Fire a pending jump on the player.
pub fn apply_jump_input(
    mut input_state: ResMut<InputState>,
    mut player: Query<&mut AvatarState, With<PlayerAvatar>>,
) {
    if !std::mem::take(&mut input_state.jump_requested) {
        return;
    }
    let Ok(mut state) = player.single_mut() else {
        return;
    };
    if state.try_jump() {
        debug!("Player jumped from {:?}", state.position);
    }
}

/// Advance every avatar by one frame.
pub fn advance_avatars(
    time: Res<Time>,
    arena: Res<Arena>,
    input_state: Res<InputState>,
    camera: Query<&Transform, With<FollowCamera>>,
    mut avatars: Query<(&mut AvatarState, Has<PlayerAvatar>)>,
    mut step: ResMut<PlayerStep>,
) {
    let frame = FrameContext::new(time.delta_secs(), time.elapsed_secs(), *arena);
    let camera_frame = camera
        .single()
        .map(|transform| CameraFrame::new(transform.forward().as_vec3()))
        .unwrap_or_default();

    step.offset = Vec3::ZERO;
    for (mut state, is_player) in avatars.iter_mut() {
        let intent = if is_player {
            input_state.intent
        } else {
            MovementIntent::default()
        };
        let offset = state.advance(&frame, &intent, &camera_frame);
        if is_player {
            step.offset = offset;
        }
    }
}
