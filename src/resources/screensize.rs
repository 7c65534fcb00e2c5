use bevy_ecs::prelude::Resource;

/// Current framebuffer size in pixels, refreshed by the binary each frame.
/// The renderer culls against the camera view derived from it.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenSize {
    pub w: i32,
    pub h: i32,
}
