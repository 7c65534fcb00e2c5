use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Sprite is identified by a texture key, a frame index into that texture's
/// sprite sheet and its size in world units.
///
/// `frame` is the tileset-local index for map props and the current
/// animation frame for animated entities. The renderer turns it into a source
/// rectangle using the sheet's column count. The origin is the pivot (in
/// pixels) relative to the frame's top-left.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Sprite {
    pub tex_key: String,
    pub frame: u32,
    pub width: f32,
    pub height: f32,
    pub origin: Vector2,
}

impl Sprite {
    /// Sprite pivoted at its center, the convention for everything in the scene.
    pub fn centered(tex_key: impl Into<String>, frame: u32, width: f32, height: f32) -> Self {
        Self {
            tex_key: tex_key.into(),
            frame,
            width,
            height,
            origin: Vector2 {
                x: width * 0.5,
                y: height * 0.5,
            },
        }
    }
}
