//! Game configuration resource.
//!
//! Manages scene settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! target_fps = 60
//!
//! [map]
//! path = ./assets/map/map.json
//!
//! [player]
//! x = 705
//! y = 500
//! id = tempId
//! texture = adam
//! sprite_width = 32
//! sprite_height = 48
//! speed = 200
//! footprint_scale_x = 0.5
//! footprint_scale_y = 0.2
//!
//! [camera]
//! zoom = 1.5
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use raylib::prelude::Vector2;
use std::path::PathBuf;

use crate::texturekeys;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_MAP_PATH: &str = "./assets/map/map.json";
const DEFAULT_PLAYER_X: f32 = 705.0;
const DEFAULT_PLAYER_Y: f32 = 500.0;
const DEFAULT_PLAYER_ID: &str = "tempId";
const DEFAULT_SPRITE_WIDTH: f32 = 32.0;
const DEFAULT_SPRITE_HEIGHT: f32 = 48.0;
const DEFAULT_PLAYER_SPEED: f32 = 200.0;
const DEFAULT_FOOTPRINT_SCALE: [f32; 2] = [0.5, 0.2];
const DEFAULT_CAMERA_ZOOM: f32 = 1.5;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
///
/// Stores window settings, the map to load, the local player's spawn data
/// and the camera zoom.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Map document to load for the scene.
    pub map_path: PathBuf,
    /// Player spawn position in world units.
    pub player_x: f32,
    pub player_y: f32,
    /// Session id of the local player.
    pub player_id: String,
    /// Character sheet texture key.
    pub player_texture: String,
    /// Size of one frame of the character sheet.
    pub sprite_width: f32,
    pub sprite_height: f32,
    /// Player speed in world units per second.
    pub player_speed: f32,
    /// Collision footprint as a fraction of the sprite size.
    pub footprint_scale: Vector2,
    /// Camera zoom while following the player.
    pub camera_zoom: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            map_path: PathBuf::from(DEFAULT_MAP_PATH),
            player_x: DEFAULT_PLAYER_X,
            player_y: DEFAULT_PLAYER_Y,
            player_id: DEFAULT_PLAYER_ID.to_string(),
            player_texture: texturekeys::ADAM.to_string(),
            sprite_width: DEFAULT_SPRITE_WIDTH,
            sprite_height: DEFAULT_SPRITE_HEIGHT,
            player_speed: DEFAULT_PLAYER_SPEED,
            footprint_scale: Vector2 {
                x: DEFAULT_FOOTPRINT_SCALE[0],
                y: DEFAULT_FOOTPRINT_SCALE[1],
            },
            camera_zoom: DEFAULT_CAMERA_ZOOM,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);

        info!(
            "Loaded config: {}x{} window, fps={}, map={:?}, player '{}' at ({}, {}), zoom={}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.map_path,
            self.player_id,
            self.player_x,
            self.player_y,
            self.camera_zoom
        );

        Ok(())
    }

    /// Parse configuration from INI text. Used by tests and embedded defaults.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        let get_f32 = |section: &str, key: &str| {
            config
                .getfloat(section, key)
                .ok()
                .flatten()
                .map(|v| v as f32)
        };

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }

        // [map] section
        if let Some(path) = config.get("map", "path") {
            self.map_path = PathBuf::from(path);
        }

        // [player] section
        if let Some(x) = get_f32("player", "x") {
            self.player_x = x;
        }
        if let Some(y) = get_f32("player", "y") {
            self.player_y = y;
        }
        if let Some(id) = config.get("player", "id") {
            self.player_id = id;
        }
        if let Some(texture) = config.get("player", "texture") {
            self.player_texture = texture;
        }
        if let Some(w) = get_f32("player", "sprite_width") {
            self.sprite_width = w;
        }
        if let Some(h) = get_f32("player", "sprite_height") {
            self.sprite_height = h;
        }
        if let Some(speed) = get_f32("player", "speed") {
            self.player_speed = speed;
        }
        if let Some(sx) = get_f32("player", "footprint_scale_x") {
            self.footprint_scale.x = sx;
        }
        if let Some(sy) = get_f32("player", "footprint_scale_y") {
            self.footprint_scale.y = sy;
        }

        // [camera] section
        if let Some(zoom) = get_f32("camera", "zoom") {
            self.camera_zoom = zoom;
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [window] section
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));

        // [map] section
        config.set("map", "path", Some(self.map_path.display().to_string()));

        // [player] section
        config.set("player", "x", Some(self.player_x.to_string()));
        config.set("player", "y", Some(self.player_y.to_string()));
        config.set("player", "id", Some(self.player_id.clone()));
        config.set("player", "texture", Some(self.player_texture.clone()));
        config.set("player", "sprite_width", Some(self.sprite_width.to_string()));
        config.set("player", "sprite_height", Some(self.sprite_height.to_string()));
        config.set("player", "speed", Some(self.player_speed.to_string()));
        config.set(
            "player",
            "footprint_scale_x",
            Some(self.footprint_scale.x.to_string()),
        );
        config.set(
            "player",
            "footprint_scale_y",
            Some(self.footprint_scale.y.to_string()),
        );

        // [camera] section
        config.set("camera", "zoom", Some(self.camera_zoom.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}
