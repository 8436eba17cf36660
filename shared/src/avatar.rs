//! The avatar update loop.
//!
//! One [`AvatarState`] per avatar, stepped once per rendered frame with [`AvatarState::advance`].
//! The player and the autonomous extras run exactly the same code; they only differ in who
//! supplies the [`MovementIntent`] (keyboard vs. nobody) and in whether the caller moves a
//! camera along with the returned offset.

use bevy::prelude::*;

use crate::animation::{step_limbs, swing_targets, LimbPose};
use crate::arena::Arena;
use crate::movement::{planar_offset, smooth_facing, target_heading, CameraFrame, MovementIntent};
use crate::physics::{apply_jump, step_vertical, GROUND_HEIGHT};

/// Height new avatars drop in from.
pub const SPAWN_HEIGHT: f32 = 20.0;

/// Clock readings and world bounds for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Seconds since the previous frame (>= 0).
    pub delta_secs: f32,
    /// Seconds since the clock started; drives the swing phase.
    pub elapsed_secs: f32,
    pub arena: Arena,
}

impl FrameContext {
    pub fn new(delta_secs: f32, elapsed_secs: f32, arena: Arena) -> Self {
        Self {
            delta_secs,
            elapsed_secs,
            arena,
        }
    }
}

/// Transform and motion state of a single avatar.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct AvatarState {
    /// Feet position; y = 0 is standing on the ground.
    pub position: Vec3,
    pub vertical_velocity: f32,
    /// Yaw in [0, 2π). Zero faces -Z.
    pub facing: f32,
    /// True only while standing on the ground and not already jumping.
    pub can_jump: bool,
    pub limbs: LimbPose,
}

impl AvatarState {
    /// Fresh avatar at `position`, at rest and not yet grounded.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            vertical_velocity: 0.0,
            facing: 0.0,
            can_jump: false,
            limbs: LimbPose::REST,
        }
    }

    /// Fresh avatar hovering at [`SPAWN_HEIGHT`] above `(x, z)`.
    pub fn at_spawn_point(x: f32, z: f32) -> Self {
        Self::new(Vec3::new(x, SPAWN_HEIGHT, z))
    }

    pub fn is_grounded(&self) -> bool {
        self.position.y == GROUND_HEIGHT
    }

    /// Jump on a key-down edge. Returns whether the impulse was applied.
    pub fn try_jump(&mut self) -> bool {
        apply_jump(self)
    }

    /// Advance the avatar by one frame.
    ///
    /// Order matters: facing, planar move, boundary clamp, gravity, ground contact, then the
    /// limb swing (which reads the freshly updated grounded state).
    ///
    /// Returns the planar offset applied this frame *before* clamping, so a following camera
    /// can be moved by the same amount.
    pub fn advance(
        &mut self,
        frame: &FrameContext,
        intent: &MovementIntent,
        camera: &CameraFrame,
    ) -> Vec3 {
        // --- Facing ---
        let target = target_heading(self.facing, intent, camera);
        self.facing = smooth_facing(self.facing, target);

        // --- Planar movement ---
        let offset = planar_offset(intent, camera);
        self.position += offset;
        self.position = frame.arena.clamp(self.position);

        // --- Gravity + ground ---
        step_vertical(self, frame.delta_secs);

        // --- Limbs ---
        let walking = intent.any() && self.can_jump;
        let limb_target = swing_targets(frame.elapsed_secs, walking);
        step_limbs(&mut self.limbs, &limb_target, frame.delta_secs);

        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::MOVE_SPEED;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::{FRAC_PI_2, TAU};

    const DT: f32 = 1.0 / 60.0;

    fn frame(dt: f32, elapsed: f32) -> FrameContext {
        FrameContext::new(dt, elapsed, Arena::default())
    }

    fn grounded_at(x: f32, z: f32) -> AvatarState {
        let mut state = AvatarState::new(Vec3::new(x, 0.0, z));
        state.can_jump = true;
        state
    }

    #[test]
    fn test_spawn_state() {
        let state = AvatarState::at_spawn_point(4.0, -7.0);
        assert_eq!(state.position, Vec3::new(4.0, SPAWN_HEIGHT, -7.0));
        assert_eq!(state.vertical_velocity, 0.0);
        assert!(!state.can_jump);
        assert!(!state.is_grounded());
    }

    #[test]
    fn test_first_frame_of_fall() {
        let mut state = AvatarState::at_spawn_point(0.0, 0.0);
        state.advance(&frame(0.1, 0.1), &MovementIntent::default(), &CameraFrame::default());

        assert_abs_diff_eq!(state.vertical_velocity, -20.0, epsilon = 1e-4);
        assert_abs_diff_eq!(state.position.y, 18.0, epsilon = 1e-4);
    }

    #[test]
    fn test_lands_and_can_jump() {
        let mut state = AvatarState::new(Vec3::new(0.0, 0.05, 0.0));
        state.vertical_velocity = -21.0;
        state.advance(&frame(0.1, 1.0), &MovementIntent::default(), &CameraFrame::default());

        assert_eq!(state.position.y, 0.0);
        assert_eq!(state.vertical_velocity, 0.0);
        assert!(state.can_jump);
        assert!(state.is_grounded());
    }

    #[test]
    fn test_zero_delta_without_intent_is_identity() {
        let mut state = AvatarState::new(Vec3::new(1.0, 6.0, -2.0));
        state.vertical_velocity = -8.0;
        state.facing = 2.0;
        let before = state.clone();

        state.advance(&frame(0.0, 3.0), &MovementIntent::default(), &CameraFrame::default());
        assert_eq!(state, before);
    }

    #[test]
    fn test_zero_delta_with_intent_turns_but_keeps_vertical() {
        let mut state = AvatarState::new(Vec3::new(0.0, 6.0, 0.0));
        state.vertical_velocity = -8.0;
        let intent = MovementIntent {
            left: true,
            ..default()
        };

        state.advance(&frame(0.0, 3.0), &intent, &CameraFrame::default());
        assert_eq!(state.position.y, 6.0);
        assert_eq!(state.vertical_velocity, -8.0);
        // Turned a twentieth of the way toward -π/2, wrapped into [0, 2π).
        assert_abs_diff_eq!(state.facing, TAU - FRAC_PI_2 * 0.05, epsilon = 1e-4);
    }

    #[test]
    fn test_forward_moves_along_camera() {
        let mut state = grounded_at(0.0, 0.0);
        let intent = MovementIntent {
            forward: true,
            ..default()
        };
        let offset = state.advance(&frame(DT, 0.0), &intent, &CameraFrame::default());

        assert_abs_diff_eq!(offset.z, -MOVE_SPEED, epsilon = 1e-6);
        assert_abs_diff_eq!(state.position.z, -MOVE_SPEED, epsilon = 1e-6);
        assert_abs_diff_eq!(state.position.x, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_boundary_clamp() {
        let arena = Arena::default();
        let half = arena.half_extent();
        let intent = MovementIntent {
            forward: true,
            right: true,
            ..default()
        };
        let cameras = [
            CameraFrame::default(),
            CameraFrame::new(Vec3::X),
            CameraFrame::new(Vec3::new(0.3, -0.5, 0.8).normalize()),
        ];
        let starts = [
            Vec3::new(half, 0.0, -half),
            Vec3::new(-half, 3.0, half),
            Vec3::new(half - 0.05, 0.0, half - 0.05),
        ];

        for camera in &cameras {
            for start in starts {
                let mut state = grounded_at(start.x, start.z);
                state.position.y = start.y;
                for i in 0..50 {
                    let offset = state.advance(&frame(DT, i as f32 * DT), &intent, camera);
                    assert!(offset.length() > 0.0);
                    assert_eq!(arena.clamp(state.position), state.position);
                }
            }
        }
    }

    #[test]
    fn test_offset_reported_before_clamp() {
        let mut state = grounded_at(50.0, 0.0);
        let intent = MovementIntent {
            left: true,
            ..default()
        };
        let offset = state.advance(&frame(DT, 0.0), &intent, &CameraFrame::default());

        assert_abs_diff_eq!(offset.x, MOVE_SPEED, epsilon = 1e-6);
        assert_eq!(state.position.x, 50.0);
    }

    #[test]
    fn test_facing_stays_normalized() {
        let mut state = grounded_at(0.0, 0.0);
        let intents = [
            MovementIntent { forward: true, ..default() },
            MovementIntent { backward: true, left: true, ..default() },
            MovementIntent { right: true, ..default() },
            MovementIntent::default(),
            MovementIntent { backward: true, ..default() },
        ];
        let camera = CameraFrame::new(Vec3::new(-0.2, -0.4, 0.9).normalize());

        for i in 0..500 {
            let intent = intents[(i / 37) % intents.len()];
            state.advance(&frame(DT, i as f32 * DT), &intent, &camera);
            assert!((0.0..TAU).contains(&state.facing), "facing {}", state.facing);
        }
    }

    #[test]
    fn test_limbs_settle_when_idle() {
        let mut state = grounded_at(0.0, 0.0);
        state.limbs = LimbPose::gait(0.35, 0.7);

        let mut last = state.limbs.max_abs();
        for i in 0..120 {
            state.advance(&frame(DT, i as f32 * DT), &MovementIntent::default(), &CameraFrame::default());
            let now = state.limbs.max_abs();
            assert!(now <= last);
            last = now;
        }
        assert!(last < 1e-3);
    }

    #[test]
    fn test_airborne_walker_does_not_swing() {
        let mut state = AvatarState::at_spawn_point(0.0, 0.0);
        let intent = MovementIntent {
            forward: true,
            ..default()
        };
        for i in 0..10 {
            state.advance(&frame(DT, 0.1 + i as f32 * DT), &intent, &CameraFrame::default());
        }
        assert!(!state.can_jump);
        assert_eq!(state.limbs, LimbPose::REST);
    }

    #[test]
    fn test_grounded_walker_swings() {
        let mut state = grounded_at(0.0, 0.0);
        let intent = MovementIntent {
            forward: true,
            ..default()
        };
        // Elapsed chosen so sin(12t) is at its peak.
        state.advance(&frame(DT, std::f32::consts::PI / 24.0), &intent, &CameraFrame::default());

        assert!(state.limbs.left_arm > 0.0);
        assert!(state.limbs.right_arm < 0.0);
        assert!(state.limbs.left_leg < 0.0);
        assert!(state.limbs.right_leg > 0.0);
    }

    #[test]
    fn test_jump_then_second_press_ignored() {
        let mut state = grounded_at(0.0, 0.0);
        assert!(state.try_jump());
        assert_eq!(state.vertical_velocity, 60.0);
        assert!(!state.try_jump());
        assert_eq!(state.vertical_velocity, 60.0);

        state.advance(&frame(DT, 0.0), &MovementIntent::default(), &CameraFrame::default());
        assert!(state.position.y > 0.0);
        assert!(!state.try_jump());
    }
}
