//! Office world entry point.
//!
//! A top-down office map written in Rust using:
//! - **raylib** for windowing and graphics
//! - **bevy_ecs** for entity-component-system architecture
//!
//! # Main Loop
//!
//! 1. Load `config.ini` (defaults when missing) and the map document
//! 2. Open the window, build the ECS world and the scene
//! 3. Load textures, register observers and systems
//! 4. Each frame:
//!    - Poll the keyboard and refresh input intents
//!    - Tick the scene (player velocity, facing and animation)
//!    - Move bodies, resolve collisions, follow with the camera
//!    - Render the world with camera transforms
//!
//! # Keys
//!
//! Arrows or W/S/A/D move, Enter hands the keyboard away and back (as a chat
//! box would), F11 toggles the debug overlay.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --config ./config.ini
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::{Path, PathBuf};

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info, warn};
use raylib::prelude::*;

use officeworld::events::keyboardfocus::{KeyboardFocusEvent, keyboard_focus_observer};
use officeworld::events::switchdebug::switch_debug_observer;
use officeworld::resources::camera2d::Camera2DRes;
use officeworld::resources::debugmode::DebugMode;
use officeworld::resources::gameconfig::GameConfig;
use officeworld::resources::input::InputState;
use officeworld::resources::keyboard::KeyboardDevice;
use officeworld::resources::screensize::ScreenSize;
use officeworld::resources::texturestore::TextureStore;
use officeworld::resources::tilemapstore::TilemapStore;
use officeworld::resources::tilesetregistry::TilesetRegistry;
use officeworld::resources::worldtime::WorldTime;
use officeworld::scene::{SceneLifecycle, WorldScene, texture_tilesets};
use officeworld::systems::animation::animation;
use officeworld::systems::camera::camera_follow;
use officeworld::systems::collision::resolve_collisions;
use officeworld::systems::input::{poll_keyboard, update_input_state};
use officeworld::systems::movement::{depth_from_y, movement};
use officeworld::systems::render::{render_debug_ui, render_pass};
use officeworld::systems::stuckto::stuck_to_entity_system;
use officeworld::systems::time::update_world_time;
use officeworld::texturekeys::{self, TEXTURE_FILES};

const FOCUS_TOGGLE_KEY: KeyboardKey = KeyboardKey::KEY_ENTER;

/// Office world
#[derive(Parser)]
#[command(version, about = "Walk around a top-down office map.")]
struct Cli {
    /// Configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Map document to load instead of the configured one.
    #[arg(long, value_name = "PATH")]
    map: Option<PathBuf>,

    /// Directory the texture paths are relative to.
    #[arg(long, value_name = "DIR", default_value = "./assets")]
    assets: PathBuf,

    /// Start with the debug overlay on.
    #[arg(long)]
    debug: bool,

    /// Write the effective configuration to the config path and exit.
    #[arg(long)]
    write_default_config: bool,
}

/// Frame size for a texture: the character sheet uses the configured sprite
/// size, tileset images the tile size of the tileset the scene bound them to.
fn frame_size(key: &str, config: &GameConfig, tilesets: Option<&TilesetRegistry>) -> (f32, f32) {
    if key == config.player_texture {
        return (config.sprite_width, config.sprite_height);
    }
    let Some(tilesets) = tilesets else {
        return (32.0, 32.0);
    };
    texture_tilesets()
        .map(|(_, tileset)| tileset)
        .filter(|tileset| tilesets.texture_of(tileset) == Some(key))
        .find_map(|tileset| tilesets.get(tileset).ok())
        .filter(|t| t.tile_width > 0 && t.tile_height > 0)
        .map(|t| (t.tile_width as f32, t.tile_height as f32))
        .unwrap_or((32.0, 32.0))
}

fn load_textures(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    world: &World,
    config: &GameConfig,
    assets: &Path,
) -> TextureStore {
    let mut store = TextureStore::new();
    let tilesets = world.get_resource::<TilesetRegistry>();
    for (key, file) in TEXTURE_FILES {
        let path = assets.join(file);
        let Some(path_str) = path.to_str() else {
            warn!("Texture path {:?} is not valid UTF-8", path);
            continue;
        };
        match rl.load_texture(thread, path_str) {
            Ok(texture) => {
                let (w, h) = frame_size(key, config, tilesets);
                info!("Loaded texture '{}' from {:?} ({}x{} frames)", key, path, w, h);
                store.insert(key, texture, w, h);
            }
            Err(e) => warn!("Texture '{}' not loaded from {:?}: {}", key, path, e),
        }
    }
    store
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    if let Some(map) = cli.map {
        config.map_path = map;
    }

    if cli.write_default_config {
        if let Err(e) = config.save_to_file() {
            error!("{}", e);
            std::process::exit(1);
        }
        return;
    }

    // --------------- Map ---------------
    let mut maps = TilemapStore::new();
    if let Err(e) = maps.load(texturekeys::TILE_MAP, &config.map_path) {
        error!("Failed to load map {:?}: {}", config.map_path, e);
        std::process::exit(1);
    }

    // --------------- Raylib window ---------------
    let (mut rl, thread) = raylib::init()
        .size(config.window_width as i32, config.window_height as i32)
        .resizable()
        .title("Office World")
        .build();
    rl.set_target_fps(config.target_fps);
    // Disable ESC to exit
    rl.set_exit_key(None);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(ScreenSize {
        w: rl.get_screen_width(),
        h: rl.get_screen_height(),
    });
    world.insert_resource(Camera2DRes::for_viewport(
        rl.get_screen_width() as f32,
        rl.get_screen_height() as f32,
    ));
    world.insert_resource(KeyboardDevice::new());
    world.insert_resource(InputState::default());
    world.insert_resource(maps);
    if cli.debug {
        world.insert_resource(DebugMode);
    }

    world.add_observer(switch_debug_observer);
    world.add_observer(keyboard_focus_observer);
    world.flush();

    // --------------- Scene ---------------
    let mut scene = WorldScene::from_config(&config);
    if let Err(e) = scene.build(&mut world) {
        error!("Scene build aborted: {}", e);
        std::process::exit(1);
    }

    let textures = load_textures(&mut rl, &thread, &world, &config, &cli.assets);
    world.insert_resource(textures);
    world.insert_resource(config);

    let mut input = Schedule::default();
    input.add_systems(update_input_state);

    let mut update = Schedule::default();
    update.add_systems(
        (
            movement,
            resolve_collisions,
            depth_from_y,
            stuck_to_entity_system,
            camera_follow,
            animation,
        )
            .chain(),
    );

    // --------------- Main loop ---------------
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        update_world_time(&mut world, dt);

        poll_keyboard(&mut world, &rl);
        if rl.is_key_pressed(FOCUS_TOGGLE_KEY) {
            let enabled = world
                .get_resource::<InputState>()
                .is_some_and(|i| !i.is_enabled());
            world.trigger(KeyboardFocusEvent { enabled });
        }

        // Screen may change due to resize
        let (w, h) = (rl.get_screen_width(), rl.get_screen_height());
        world.insert_resource(ScreenSize { w, h });
        world.resource_mut::<Camera2DRes>().0.offset = Vector2 {
            x: w as f32 * 0.5,
            y: h as f32 * 0.5,
        };

        input.run(&mut world);
        let elapsed = world.resource::<WorldTime>().delta;
        scene.tick(&mut world, elapsed);
        update.run(&mut world);

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::new(32, 32, 40, 255));
        {
            let cam = world.resource::<Camera2DRes>().0;
            let mut d2 = d.begin_mode2D(cam);
            render_pass(&mut world, &mut d2);
        }
        render_debug_ui(&mut world, &mut d);
    }

    scene.teardown(&mut world);
    info!("Bye");
}
