//! World systems
//!
//! Ground plane, lights and sky.
//!
//! The sky is a cube map attached to the follow camera once its texture has loaded. Until
//! then (or if the texture is missing) the clear colour stands in for it.

use bevy::core_pipeline::Skybox;
use bevy::image::{ImageAddressMode, ImageLoaderSettings, ImageSampler, ImageSamplerDescriptor};
use bevy::light::light_consts::lux;
use bevy::math::Affine2;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureViewDescriptor, TextureViewDimension};
use shared::Arena;

use crate::camera::FollowCamera;

/// Thickness of the ground slab.
const GROUND_THICKNESS: f32 = 0.5;

/// Height of the ground slab's centre.
const GROUND_CENTER_Y: f32 = -0.5;

/// How many times the grass texture repeats along each edge.
const GRASS_REPEAT: f32 = 10.0;

const SKY_COLOR: Color = Color::srgb(0.53, 0.81, 0.92);

/// Six square faces stacked top to bottom in +X, -X, +Y, -Y, +Z, -Z order.
const SKYBOX_TEXTURE: &str = "texture/skybox.png";
const CUBE_FACES: u32 = 6;
const SKYBOX_BRIGHTNESS: f32 = 1000.0;

/// Sky cube map, pending until the image is loaded and re-shaped into six layers.
#[derive(Resource)]
pub struct SkyCubemap {
    pub image: Handle<Image>,
    pub attached: bool,
}

/// Root entity for all client-side world visuals
#[derive(Component)]
pub struct ClientWorldRoot;

/// Spawn the visual world
pub fn setup_world(
    mut commands: Commands,
    arena: Res<Arena>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let root = commands
        .spawn((ClientWorldRoot, Transform::default(), Visibility::default()))
        .id();

    // --- Light ---
    // Straight down, like a noon sun.
    let sun = commands
        .spawn((
            DirectionalLight {
                illuminance: lux::AMBIENT_DAYLIGHT,
                shadows_enabled: false,
                ..default()
            },
            Transform::from_xyz(0.0, 1.0, 0.0).looking_at(Vec3::ZERO, Vec3::Z),
        ))
        .id();
    commands.entity(root).add_child(sun);

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 900.0,
        affects_lightmapped_meshes: true,
    });
    commands.insert_resource(ClearColor(SKY_COLOR));
    commands.insert_resource(SkyCubemap {
        image: asset_server.load(SKYBOX_TEXTURE),
        attached: false,
    });

    // --- Ground ---
    let grass: Handle<Image> = asset_server.load_with_settings(
        "texture/grass.jpg",
        |settings: &mut ImageLoaderSettings| {
            settings.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
                address_mode_u: ImageAddressMode::Repeat,
                address_mode_v: ImageAddressMode::Repeat,
                ..default()
            });
        },
    );

    let ground = commands
        .spawn((
            Mesh3d(meshes.add(Cuboid::new(arena.size, GROUND_THICKNESS, arena.size))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color_texture: Some(grass),
                uv_transform: Affine2::from_scale(Vec2::splat(GRASS_REPEAT)),
                perceptual_roughness: 1.0,
                ..default()
            })),
            Transform::from_xyz(0.0, GROUND_CENTER_Y, 0.0),
        ))
        .id();
    commands.entity(root).add_child(ground);

    info!("World ready: {}x{} ground plane", arena.size, arena.size);
}

/// Re-shape a vertical strip of six square faces into a cube texture.
///
/// Returns false (leaving the image untouched) when it is not such a strip.
pub fn stack_as_cubemap(image: &mut Image) -> bool {
    let size = image.texture_descriptor.size;
    if size.depth_or_array_layers == 1 {
        if size.height != size.width * CUBE_FACES {
            return false;
        }
        image.texture_descriptor.size = Extent3d {
            width: size.width,
            height: size.width,
            depth_or_array_layers: CUBE_FACES,
        };
    } else if size.depth_or_array_layers != CUBE_FACES {
        return false;
    }

    image.texture_view_descriptor = Some(TextureViewDescriptor {
        dimension: Some(TextureViewDimension::Cube),
        ..default()
    });
    true
}

/// Put the sky cube map on the camera once the texture is in.
pub fn attach_skybox(
    mut commands: Commands,
    mut sky: ResMut<SkyCubemap>,
    mut images: ResMut<Assets<Image>>,
    cameras: Query<Entity, With<FollowCamera>>,
) {
    if sky.attached {
        return;
    }
    let Some(image) = images.get_mut(&sky.image) else {
        return;
    };

    sky.attached = true;
    if !stack_as_cubemap(image) {
        warn!(
            "{} is not a strip of {} square faces, keeping the plain sky",
            SKYBOX_TEXTURE, CUBE_FACES
        );
        return;
    }

    for camera in cameras.iter() {
        commands.entity(camera).insert(Skybox {
            image: sky.image.clone(),
            brightness: SKYBOX_BRIGHTNESS,
            ..default()
        });
    }
    info!("Skybox attached");
}
