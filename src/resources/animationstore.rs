//! Animation resource registry.
//!
//! Holds the animation tables referenced by [`Animation`] components. The
//! scene builds the player's table once, before anything refers to a player
//! animation key.
//!
//! [`Animation`]: crate::components::animation::Animation

use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use log::debug;
use rustc_hash::FxHashMap;

/// Central registry of reusable animation definitions keyed by string IDs.
#[derive(Resource, Debug, Default)]
pub struct AnimationStore {
    pub animations: FxHashMap<String, AnimationResource>,
}

/// A run of consecutive frames on one sprite sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationResource {
    /// Texture key of the sheet.
    pub tex_key: Arc<str>,
    /// Index of the first frame on the sheet.
    pub first_frame: u32,
    /// Number of frames in the animation.
    pub frame_count: usize,
    /// Frames per second playback speed.
    pub fps: f32,
    /// Whether the animation restarts after the last frame.
    pub looped: bool,
}

impl AnimationResource {
    /// Sheet frame for a playback index, clamped or wrapped per `looped`.
    pub fn sheet_frame(&self, frame_index: usize) -> u32 {
        let count = self.frame_count.max(1);
        let i = if self.looped {
            frame_index % count
        } else {
            frame_index.min(count - 1)
        };
        self.first_frame + i as u32
    }
}

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&AnimationResource> {
        self.animations.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, animation: AnimationResource) {
        self.animations.insert(key.into(), animation);
    }
}

const ANIMS_FRAME_RATE: f32 = 15.0;
const DIRECTIONS: [&str; 4] = ["right", "up", "left", "down"];
const FRAMES_PER_DIRECTION: u32 = 6;
const IDLE_START: u32 = 0;
const RUN_START: u32 = 24;
const SIT_START: u32 = 48;
const SIT_ORDER: [&str; 4] = ["down", "left", "right", "up"];

/// Register idle, run and sit tracks for a character sheet.
///
/// Keys are `"{texture}_{idle|run|sit}_{direction}"`. The sheet holds six
/// idle frames per direction, then six run frames per direction, then one
/// sit frame per direction.
pub fn build_player_animations(store: &mut AnimationStore, texture_key: &str) {
    let tex: Arc<str> = Arc::from(texture_key);
    for (i, dir) in DIRECTIONS.iter().enumerate() {
        let offset = i as u32 * FRAMES_PER_DIRECTION;
        store.insert(
            format!("{texture_key}_idle_{dir}"),
            AnimationResource {
                tex_key: tex.clone(),
                first_frame: IDLE_START + offset,
                frame_count: FRAMES_PER_DIRECTION as usize,
                fps: ANIMS_FRAME_RATE * 0.6,
                looped: true,
            },
        );
        store.insert(
            format!("{texture_key}_run_{dir}"),
            AnimationResource {
                tex_key: tex.clone(),
                first_frame: RUN_START + offset,
                frame_count: FRAMES_PER_DIRECTION as usize,
                fps: ANIMS_FRAME_RATE,
                looped: true,
            },
        );
    }
    for (i, dir) in SIT_ORDER.iter().enumerate() {
        store.insert(
            format!("{texture_key}_sit_{dir}"),
            AnimationResource {
                tex_key: tex.clone(),
                first_frame: SIT_START + i as u32,
                frame_count: 1,
                fps: ANIMS_FRAME_RATE,
                looped: false,
            },
        );
    }
    debug!("Built {} animations for '{}'", store.animations.len(), texture_key);
}
