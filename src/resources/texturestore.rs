//! Loaded textures and their sprite-sheet layout.
//!
//! Textures are only available with a window, so this store is filled by the
//! binary. [`SheetLayout`] tells the renderer how to cut a frame index out of
//! a texture.

use bevy_ecs::prelude::Resource;
use raylib::prelude::{Rectangle, Texture2D};
use rustc_hash::FxHashMap;

/// Frame grid of a sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetLayout {
    pub frame_width: f32,
    pub frame_height: f32,
    pub columns: u32,
}

impl SheetLayout {
    /// Source rectangle of `frame`, left-to-right then top-to-bottom.
    pub fn frame_rect(&self, frame: u32) -> Rectangle {
        let columns = self.columns.max(1);
        Rectangle {
            x: (frame % columns) as f32 * self.frame_width,
            y: (frame / columns) as f32 * self.frame_height,
            width: self.frame_width,
            height: self.frame_height,
        }
    }
}

#[derive(Resource, Default)]
pub struct TextureStore {
    pub map: FxHashMap<String, (Texture2D, SheetLayout)>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a texture cut into `frame_width` x `frame_height` frames.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        texture: Texture2D,
        frame_width: f32,
        frame_height: f32,
    ) {
        let columns = ((texture.width as f32 / frame_width).floor() as u32).max(1);
        self.map.insert(
            key.into(),
            (
                texture,
                SheetLayout {
                    frame_width,
                    frame_height,
                    columns,
                },
            ),
        );
    }

    pub fn get(&self, key: &str) -> Option<&(Texture2D, SheetLayout)> {
        self.map.get(key)
    }
}
