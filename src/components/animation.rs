use bevy_ecs::prelude::Component;

/// Playback state of a sprite animation.
///
/// `animation_key` names an entry in
/// [`AnimationStore`](crate::resources::animationstore::AnimationStore).
/// Changing the key through [`Animation::play`] restarts playback.
#[derive(Debug, Clone, Component, PartialEq)]
pub struct Animation {
    pub animation_key: String,
    pub frame_index: usize,
    pub elapsed_time: f32,
}

impl Animation {
    pub fn new(animation_key: impl Into<String>) -> Self {
        Self {
            animation_key: animation_key.into(),
            frame_index: 0,
            elapsed_time: 0.0,
        }
    }

    /// Switch to `key`, restarting only if it differs from the current one.
    pub fn play(&mut self, key: &str) {
        if self.animation_key != key {
            self.animation_key = key.to_string();
            self.frame_index = 0;
            self.elapsed_time = 0.0;
        }
    }
}
