//! Shared 2D camera resource.
//!
//! Wraps raylib's [`raylib::prelude::Camera2D`] so that systems can agree on
//! a single world/screen transform. [`CameraFollow`] names the entity the
//! camera tracks; the camera follow system keeps `target` on it each frame.

use bevy_ecs::prelude::{Entity, Resource};
use raylib::prelude::{Camera2D, Vector2};

/// ECS resource that holds the active 2D camera parameters.
#[derive(Resource, Clone, Copy)]
pub struct Camera2DRes(pub Camera2D);

impl Camera2DRes {
    /// Camera centered on a viewport of the given size, looking at the origin.
    pub fn for_viewport(width: f32, height: f32) -> Self {
        Self(Camera2D {
            target: Vector2 { x: 0.0, y: 0.0 },
            offset: Vector2 {
                x: width * 0.5,
                y: height * 0.5,
            },
            rotation: 0.0,
            zoom: 1.0,
        })
    }
}

/// Entity tracked by the camera.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraFollow {
    pub target: Entity,
    /// Snap the camera target to whole pixels.
    pub round_pixels: bool,
}
