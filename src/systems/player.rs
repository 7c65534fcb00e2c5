//! Per-tick behavior of scene-driven entities.
//!
//! The scene does not run the player through the shared schedule; it owns a
//! handle implementing [`SceneEntity`] and forwards each tick's elapsed time
//! and input snapshot to it. The player turns input into a velocity, keeps
//! its facing and picks the run or idle animation for that facing.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::animation::Animation;
use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::player::{Facing, Player};
use crate::components::rigidbody::RigidBody;
use crate::components::sprite::Sprite;
use crate::resources::animationstore::AnimationStore;
use crate::resources::input::InputSnapshot;
use crate::systems::animation::advance_animation;

/// Something the scene places in the world and updates every tick.
pub trait SceneEntity {
    fn entity(&self) -> Entity;

    fn position(&self, world: &World) -> Option<Vector2> {
        world.get::<MapPosition>(self.entity()).map(|p| p.pos)
    }

    fn footprint(&self, world: &World) -> Option<BoxCollider> {
        world.get::<BoxCollider>(self.entity()).copied()
    }

    fn update(&mut self, world: &mut World, elapsed: f32, input: &InputSnapshot);
}

/// The local player as seen by the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerHandle(pub Entity);

/// Unit direction from the held intents; diagonals are normalized.
pub fn direction_from(input: &InputSnapshot) -> Vector2 {
    let mut dir = Vector2::zero();
    if input.left {
        dir.x -= 1.0;
    }
    if input.right {
        dir.x += 1.0;
    }
    if input.up {
        dir.y -= 1.0;
    }
    if input.down {
        dir.y += 1.0;
    }
    if dir.x != 0.0 || dir.y != 0.0 {
        dir.normalized()
    } else {
        dir
    }
}

/// Facing after this input; horizontal wins on diagonals, no input keeps it.
pub fn facing_from(input: &InputSnapshot, current: Facing) -> Facing {
    if input.left && !input.right {
        Facing::Left
    } else if input.right && !input.left {
        Facing::Right
    } else if input.up && !input.down {
        Facing::Up
    } else if input.down && !input.up {
        Facing::Down
    } else {
        current
    }
}

impl SceneEntity for PlayerHandle {
    fn entity(&self) -> Entity {
        self.0
    }

    fn update(&mut self, world: &mut World, elapsed: f32, input: &InputSnapshot) {
        let (speed, texture, facing) = match world.get_mut::<Player>(self.0) {
            Some(mut player) => {
                player.facing = facing_from(input, player.facing);
                (player.speed, player.texture_key.clone(), player.facing)
            }
            None => return,
        };

        let dir = direction_from(input);
        let moving = dir.x != 0.0 || dir.y != 0.0;
        if let Some(mut body) = world.get_mut::<RigidBody>(self.0) {
            body.set_velocity(dir * speed);
        }

        let state = if moving { "run" } else { "idle" };
        let key = format!("{}_{}_{}", texture, state, facing.as_str());

        let track = world
            .get_resource::<AnimationStore>()
            .and_then(|store| store.get(&key).cloned());
        let frame = {
            let Some(mut anim) = world.get_mut::<Animation>(self.0) else {
                return;
            };
            anim.play(&key);
            track.map(|track| advance_animation(&mut anim, &track, elapsed))
        };
        if let (Some(frame), Some(mut sprite)) = (frame, world.get_mut::<Sprite>(self.0)) {
            sprite.frame = frame;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::animationstore::build_player_animations;
    use crate::systems::playerspawn::{PlayerSpawn, spawn_player};

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn setup() -> (World, PlayerHandle) {
        let mut world = World::new();
        let mut store = AnimationStore::new();
        build_player_animations(&mut store, "adam");
        world.insert_resource(store);
        let e = spawn_player(&mut world, &PlayerSpawn::default()).unwrap();
        (world, PlayerHandle(e))
    }

    #[test]
    fn diagonal_is_normalized() {
        let input = InputSnapshot {
            up: true,
            right: true,
            ..Default::default()
        };
        let d = direction_from(&input);
        assert!(approx_eq(d.length(), 1.0));
        assert!(d.x > 0.0 && d.y < 0.0);
    }

    #[test]
    fn opposite_keys_cancel() {
        let input = InputSnapshot {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(direction_from(&input), Vector2::zero());
        assert_eq!(facing_from(&input, Facing::Up), Facing::Up);
    }

    #[test]
    fn moving_sets_velocity_and_run_animation() {
        let (mut world, mut player) = setup();
        let input = InputSnapshot {
            left: true,
            ..Default::default()
        };
        player.update(&mut world, 0.016, &input);

        let body = world.get::<RigidBody>(player.0).unwrap();
        assert!(approx_eq(body.velocity.x, -200.0));
        assert!(approx_eq(body.velocity.y, 0.0));
        assert_eq!(world.get::<Player>(player.0).unwrap().facing, Facing::Left);
        assert_eq!(
            world.get::<Animation>(player.0).unwrap().animation_key,
            "adam_run_left"
        );
        // run_left starts at sheet frame 24 + 2 * 6
        assert_eq!(world.get::<Sprite>(player.0).unwrap().frame, 36);
    }

    #[test]
    fn releasing_keys_idles_in_last_facing() {
        let (mut world, mut player) = setup();
        let up = InputSnapshot {
            up: true,
            ..Default::default()
        };
        player.update(&mut world, 0.016, &up);
        player.update(&mut world, 0.016, &InputSnapshot::default());

        let body = world.get::<RigidBody>(player.0).unwrap();
        assert!(approx_eq(body.velocity.length(), 0.0));
        assert_eq!(
            world.get::<Animation>(player.0).unwrap().animation_key,
            "adam_idle_up"
        );
    }

    #[test]
    fn accessors_read_components() {
        let (world, player) = setup();
        let pos = player.position(&world).unwrap();
        assert!(approx_eq(pos.x, 705.0));
        assert!(approx_eq(player.footprint(&world).unwrap().size.y, 9.6));
    }
}
