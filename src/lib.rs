//! Office world library.
//!
//! Builds a top-down office map from a Tiled export: static props from the
//! object layers, a collidable ground layer, and a keyboard-driven player the
//! camera follows. Exposes the ECS components, resources, systems, events and
//! the [`scene`] orchestrator for the binary and the integration tests.

pub mod components;
pub mod error;
pub mod events;
pub mod resources;
pub mod scene;
pub mod systems;
pub mod texturekeys;
