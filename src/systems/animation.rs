//! Animation playback.
//!
//! [`advance_animation`] steps one [`Animation`] by a time delta against its
//! track and returns the sheet frame to show. The [`animation`] system does
//! that for every animated entity on the shared clock; the local player is
//! excluded because the scene advances it on the tick's elapsed time.
//!
//! # Related
//!
//! - [`crate::components::animation::Animation`] – per-entity playback state
//! - [`crate::resources::animationstore::AnimationStore`] – animation definitions

use bevy_ecs::prelude::*;

use crate::components::animation::Animation;
use crate::components::player::Player;
use crate::components::sprite::Sprite;
use crate::resources::animationstore::{AnimationResource, AnimationStore};
use crate::resources::worldtime::WorldTime;

/// Advance `anim` by `dt` seconds and return the sheet frame to display.
pub fn advance_animation(anim: &mut Animation, track: &AnimationResource, dt: f32) -> u32 {
    if track.fps > 0.0 {
        anim.elapsed_time += dt;
        let frame_duration = 1.0 / track.fps;
        while anim.elapsed_time >= frame_duration {
            anim.elapsed_time -= frame_duration;
            anim.frame_index += 1;
            if anim.frame_index >= track.frame_count {
                if track.looped {
                    anim.frame_index = 0;
                } else {
                    anim.frame_index = track.frame_count.saturating_sub(1);
                    anim.elapsed_time = 0.0;
                    break;
                }
            }
        }
    }
    track.sheet_frame(anim.frame_index)
}

/// Advance animation playback and update the sprite frame.
pub fn animation(
    mut query: Query<(&mut Animation, &mut Sprite), Without<Player>>,
    animation_store: Res<AnimationStore>,
    time: Res<WorldTime>,
) {
    for (mut anim, mut sprite) in query.iter_mut() {
        if let Some(track) = animation_store.get(&anim.animation_key) {
            sprite.frame = advance_animation(&mut anim, track, time.delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn track(looped: bool) -> AnimationResource {
        AnimationResource {
            tex_key: Arc::from("adam"),
            first_frame: 24,
            frame_count: 3,
            fps: 10.0,
            looped,
        }
    }

    #[test]
    fn looped_track_wraps() {
        let mut anim = Animation::new("run");
        assert_eq!(advance_animation(&mut anim, &track(true), 0.05), 24);
        assert_eq!(advance_animation(&mut anim, &track(true), 0.1), 25);
        assert_eq!(advance_animation(&mut anim, &track(true), 0.2), 24);
    }

    #[test]
    fn one_shot_track_holds_last_frame() {
        let mut anim = Animation::new("sit");
        assert_eq!(advance_animation(&mut anim, &track(false), 1.0), 26);
        assert_eq!(anim.frame_index, 2);
    }

    #[test]
    fn system_skips_the_player() {
        let mut world = World::new();
        let mut store = AnimationStore::new();
        store.insert("run", track(true));
        world.insert_resource(store);
        world.insert_resource(WorldTime {
            delta: 0.15,
            ..Default::default()
        });
        let prop = world
            .spawn((Animation::new("run"), Sprite::centered("adam", 0, 32.0, 48.0)))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(animation);
        schedule.run(&mut world);
        assert_eq!(world.get::<Sprite>(prop).unwrap().frame, 25);
    }
}
