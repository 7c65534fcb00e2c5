//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! read by the scene and its systems.
//!
//! Overview
//! - `animationstore` – animation tables, including the player's
//! - `camera2d` – shared 2D camera and the entity it follows
//! - `colliders` – registered collision relationships
//! - `debugmode` – presence toggles the debug overlay
//! - `gameconfig` – INI-backed scene and window settings
//! - `groundlayer` – collision grid of the ground tile layer
//! - `input` – navigation intents, bindings and keyboard focus
//! - `keyboard` – raw state of the physical keyboard
//! - `screensize` – current framebuffer dimensions in pixels
//! - `texturestore` – loaded textures keyed by string IDs
//! - `tilemap` – map document types and loading
//! - `tilemapstore` – loaded map documents
//! - `tilesetregistry` – tileset lookups and gid translation
//! - `worldtime` – simulation time and delta
pub mod animationstore;
pub mod camera2d;
pub mod colliders;
pub mod debugmode;
pub mod gameconfig;
pub mod groundlayer;
pub mod input;
pub mod keyboard;
pub mod screensize;
pub mod texturestore;
pub mod tilemap;
pub mod tilemapstore;
pub mod tilesetregistry;
pub mod worldtime;
