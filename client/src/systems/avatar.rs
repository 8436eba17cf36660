//! Avatar rigs
//!
//! Every avatar is a handful of boxes: head (with a face decal on the front), body, and four
//! limbs hanging from shoulder/hip pivots. The root follows `AvatarState::position` and
//! `facing`; each pivot takes its swing angle from `AvatarState::limbs`.

use std::f32::consts::PI;

use bevy::prelude::*;
use shared::{
    spawn_avatars, Arena, AvatarState, ExtraAvatar, Limb, LimbJoint, PlayerAvatar,
    EXTRA_AVATAR_COUNT, SPAWN_HEIGHT,
};

// =============================================================================
// RIG LAYOUT
// =============================================================================

const HEAD_SIZE: f32 = 1.0;
const HEAD_Y: f32 = 4.5;
/// The face decal sits a hair in front of the head's -Z side.
const FACE_OFFSET: f32 = HEAD_SIZE * 0.5 + 0.0005;

const BODY_SIZE: Vec3 = Vec3::new(2.0, 2.0, 1.0);
const BODY_Y: f32 = 3.0;

const LIMB_SIZE: Vec3 = Vec3::new(1.0, 2.0, 1.0);
/// Limb boxes hang below their pivot.
const LIMB_DROP: f32 = 0.5;

const SHOULDER_X: f32 = 1.5;
const SHOULDER_Y: f32 = 3.5;
const HIP_X: f32 = 0.5;
const HIP_Y: f32 = 1.5;

const SKIN_COLOR: Color = Color::srgb_u8(0xfc, 0xd4, 0x62);
const SHIRT_COLOR: Color = Color::srgb_u8(0x3c, 0xb3, 0x71);
const TROUSER_COLOR: Color = Color::srgb_u8(0x00, 0x00, 0xff);

/// Pivot position of a limb relative to the avatar root.
pub fn limb_pivot(limb: Limb) -> Vec3 {
    if limb.is_arm() {
        Vec3::new(limb.side() * SHOULDER_X, SHOULDER_Y, 0.0)
    } else {
        Vec3::new(limb.side() * HIP_X, HIP_Y, 0.0)
    }
}

// =============================================================================
// ASSETS
// =============================================================================

/// Meshes and materials shared by every avatar rig.
#[derive(Clone)]
struct AvatarAssets {
    head: Handle<Mesh>,
    face: Handle<Mesh>,
    body: Handle<Mesh>,
    limb: Handle<Mesh>,
    skin: Handle<StandardMaterial>,
    face_decal: Handle<StandardMaterial>,
    shirt: Handle<StandardMaterial>,
    trousers: Handle<StandardMaterial>,
}

impl AvatarAssets {
    fn load(
        asset_server: &AssetServer,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
    ) -> Self {
        let face_texture: Handle<Image> = asset_server.load("texture/face.png");

        Self {
            head: meshes.add(Cuboid::from_length(HEAD_SIZE)),
            face: meshes.add(Rectangle::new(HEAD_SIZE, HEAD_SIZE)),
            body: meshes.add(Cuboid::from_size(BODY_SIZE)),
            limb: meshes.add(Cuboid::from_size(LIMB_SIZE)),
            skin: materials.add(StandardMaterial::from_color(SKIN_COLOR)),
            face_decal: materials.add(StandardMaterial {
                base_color_texture: Some(face_texture),
                alpha_mode: AlphaMode::Blend,
                ..default()
            }),
            shirt: materials.add(StandardMaterial::from_color(SHIRT_COLOR)),
            trousers: materials.add(StandardMaterial::from_color(TROUSER_COLOR)),
        }
    }
}

// =============================================================================
// SPAWNING
// =============================================================================

/// Spawn one avatar root with its rig and return the root entity.
fn spawn_avatar_rig(
    commands: &mut Commands,
    assets: &AvatarAssets,
    state: AvatarState,
    role: impl Bundle,
) -> Entity {
    let root = commands
        .spawn((
            role,
            Transform::from_translation(state.position)
                .with_rotation(Quat::from_rotation_y(state.facing)),
            Visibility::default(),
            state,
        ))
        .id();

    let head = commands
        .spawn((
            Mesh3d(assets.head.clone()),
            MeshMaterial3d(assets.skin.clone()),
            Transform::from_xyz(0.0, HEAD_Y, 0.0),
        ))
        .id();
    // Rectangle faces +Z; turn it round to sit on the front (-Z) of the head.
    let face = commands
        .spawn((
            Mesh3d(assets.face.clone()),
            MeshMaterial3d(assets.face_decal.clone()),
            Transform::from_xyz(0.0, HEAD_Y, -FACE_OFFSET).with_rotation(Quat::from_rotation_y(PI)),
        ))
        .id();
    let body = commands
        .spawn((
            Mesh3d(assets.body.clone()),
            MeshMaterial3d(assets.shirt.clone()),
            Transform::from_xyz(0.0, BODY_Y, 0.0),
        ))
        .id();
    commands.entity(root).add_children(&[head, face, body]);

    for limb in Limb::ALL {
        let material = if limb.is_arm() {
            assets.skin.clone()
        } else {
            assets.trousers.clone()
        };
        let pivot = commands
            .spawn((
                LimbJoint { owner: root, limb },
                Transform::from_translation(limb_pivot(limb)),
                Visibility::default(),
            ))
            .id();
        let mesh = commands
            .spawn((
                Mesh3d(assets.limb.clone()),
                MeshMaterial3d(material),
                Transform::from_xyz(0.0, -LIMB_DROP, 0.0),
            ))
            .id();
        commands.entity(pivot).add_child(mesh);
        commands.entity(root).add_child(pivot);
    }

    root
}

/// Spawn the player at the origin and the autonomous extras scattered over the arena.
pub fn spawn_avatar_rigs(
    mut commands: Commands,
    arena: Res<Arena>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let assets = AvatarAssets::load(&asset_server, &mut meshes, &mut materials);

    let player = AvatarState::at_spawn_point(0.0, 0.0);
    spawn_avatar_rig(&mut commands, &assets, player, PlayerAvatar);
    info!("Spawned player at height {}", SPAWN_HEIGHT);

    let mut rng = rand::thread_rng();
    for state in spawn_avatars(EXTRA_AVATAR_COUNT, &arena, &mut rng) {
        trace!("Spawned extra avatar at {:?}", state.position);
        spawn_avatar_rig(&mut commands, &assets, state, ExtraAvatar);
    }
    info!("Spawned {} extra avatars", EXTRA_AVATAR_COUNT);
}

// =============================================================================
// TRANSFORM SYNC
// =============================================================================

/// Copy each avatar's position and facing onto its root transform.
pub fn sync_avatar_roots(mut avatars: Query<(&AvatarState, &mut Transform)>) {
    for (state, mut transform) in avatars.iter_mut() {
        transform.translation = state.position;
        transform.rotation = Quat::from_rotation_y(state.facing);
    }
}

/// Swing each limb pivot to its owner's current pose.
pub fn pose_limbs(
    avatars: Query<&AvatarState>,
    mut joints: Query<(&LimbJoint, &mut Transform)>,
) {
    for (joint, mut transform) in joints.iter_mut() {
        let Ok(state) = avatars.get(joint.owner) else {
            continue;
        };
        transform.rotation = Quat::from_rotation_x(joint.limb.angle(&state.limbs));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limb_pivots_are_mirrored() {
        assert_eq!(limb_pivot(Limb::LeftArm), Vec3::new(-1.5, 3.5, 0.0));
        assert_eq!(limb_pivot(Limb::RightArm), Vec3::new(1.5, 3.5, 0.0));
        assert_eq!(limb_pivot(Limb::LeftLeg), Vec3::new(-0.5, 1.5, 0.0));
        assert_eq!(limb_pivot(Limb::RightLeg), Vec3::new(0.5, 1.5, 0.0));
    }
}
