//! Avatar Plaza client - renders the arena and drives every avatar once per frame
//!
//! Runs natively or in the browser (served by the `server` crate from `public/`).

mod camera;
mod input;
mod systems;

use bevy::asset::{AssetMetaCheck, AssetPlugin};
use bevy::prelude::*;
use bevy::window::WindowResolution;
use shared::{Arena, EXTRA_AVATAR_COUNT, PLANE_SIZE};

/// Asset loading for the current target.
///
/// Natively Bevy resolves `assets/` next to the crate or the executable. In the browser the
/// same relative path is fetched from the page's origin (`public/assets/`). The static server
/// has no `.meta` files, so the browser build skips asking for them.
fn asset_plugin() -> AssetPlugin {
    AssetPlugin {
        meta_check: if cfg!(target_arch = "wasm32") {
            AssetMetaCheck::Never
        } else {
            AssetMetaCheck::default()
        },
        ..default()
    }
}

fn main() {
    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Avatar Plaza".to_string(),
                    resolution: WindowResolution::new(1280, 720),
                    // Web build: render into the page's canvas and keep key presses away
                    // from the browser.
                    canvas: Some("#scene".to_string()),
                    fit_canvas_to_parent: true,
                    prevent_default_event_handling: true,
                    ..default()
                }),
                ..default()
            })
            .set(asset_plugin()),
    );

    app.insert_resource(Arena::new(PLANE_SIZE));
    app.init_resource::<input::InputState>();
    app.init_resource::<systems::PlayerStep>();

    app.add_systems(
        Startup,
        (
            systems::setup_world,
            camera::spawn_camera,
            systems::spawn_avatar_rigs,
        ),
    );

    // One frame, in order: read input, advance every avatar, follow with the camera, then
    // copy simulation state onto the rigs.
    app.add_systems(
        Update,
        (
            input::handle_keyboard_input,
            input::handle_mouse_input,
            systems::apply_jump_input,
            systems::advance_avatars,
            camera::update_camera,
            systems::sync_avatar_roots,
            systems::pose_limbs,
        )
            .chain(),
    );
    app.add_systems(Update, systems::attach_skybox);

    info!(
        "Starting client: {} extra avatars on a {}x{} plane",
        EXTRA_AVATAR_COUNT, PLANE_SIZE, PLANE_SIZE
    );
    app.run();
}
