//! Debug overlay toggle.
//!
//! When present, the renderer outlines every collision footprint and the
//! collidable ground cells, and prints camera and focus state.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct DebugMode;
