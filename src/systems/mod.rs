//! Scene systems.
//!
//! Construction helpers the scene calls while building, plus the per-frame
//! systems the binary schedules.
//!
//! Submodules overview
//! - [`animation`] – advance sprite animations on the shared clock
//! - [`camera`] – keep the camera on its followed entity
//! - [`collision`] – push bodies out of registered groups and ground cells
//! - [`groundlayer`] – build the ground collision grid and tile sprites
//! - [`input`] – keyboard polling, intents and focus control
//! - [`movement`] – integrate positions from rigid body velocities and time
//! - [`player`] – per-tick player behavior driven by the scene
//! - [`playerspawn`] – create the player, camera follow and ground collision
//! - [`render`] – draw world and debug overlays using Raylib
//! - [`staticlayer`] – spawn static bodies from object layers
//! - [`stuckto`] – keep attached entities on their targets
//! - [`time`] – update simulation time and delta

pub mod animation;
pub mod camera;
pub mod collision;
pub mod groundlayer;
pub mod input;
pub mod movement;
pub mod player;
pub mod playerspawn;
pub mod render;
pub mod staticlayer;
pub mod stuckto;
pub mod time;
