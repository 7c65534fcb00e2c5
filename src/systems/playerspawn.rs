//! Local player creation.
//!
//! The player is two entities: the body, which moves and collides, and a
//! container stuck above it for overhead visuals (name label, chat bubble).
//! Collision registrations always name both so the pair stays together.
//!
//! The body's collision box is a footprint: a fraction of the sprite size,
//! horizontally centered and aligned to the sprite's bottom edge, so the
//! character can walk "behind" props.

use bevy_ecs::prelude::*;
use log::{debug, info};
use raylib::prelude::Vector2;
use smallvec::{SmallVec, smallvec};

use crate::components::animation::Animation;
use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::player::{Player, PlayerContainer};
use crate::components::rigidbody::RigidBody;
use crate::components::sprite::Sprite;
use crate::components::stuckto::StuckTo;
use crate::components::zindex::ZIndex;
use crate::error::{SceneError, SceneResult};
use crate::resources::camera2d::{Camera2DRes, CameraFollow};
use crate::resources::colliders::{ColliderRegistry, ColliderTarget};
use crate::resources::gameconfig::GameConfig;
use crate::resources::groundlayer::GroundLayer;
use crate::resources::screensize::ScreenSize;

/// Vertical distance from the body's pivot to the overhead container.
const CONTAINER_OFFSET_Y: f32 = -30.0;

/// Everything needed to create the local player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSpawn {
    pub x: f32,
    pub y: f32,
    pub texture_key: String,
    pub player_id: String,
    pub sprite_width: f32,
    pub sprite_height: f32,
    pub speed: f32,
    pub footprint_scale: Vector2,
}

impl PlayerSpawn {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            x: config.player_x,
            y: config.player_y,
            texture_key: config.player_texture.clone(),
            player_id: config.player_id.clone(),
            sprite_width: config.sprite_width,
            sprite_height: config.sprite_height,
            speed: config.player_speed,
            footprint_scale: config.footprint_scale,
        }
    }
}

impl Default for PlayerSpawn {
    fn default() -> Self {
        Self::from_config(&GameConfig::new())
    }
}

/// The player body, if one exists.
pub fn find_player(world: &mut World) -> Option<Entity> {
    let mut query = world.query_filtered::<Entity, With<Player>>();
    query.iter(world).next()
}

/// Entities a collision registration against the player should name.
pub fn collision_subjects(world: &World, player: Entity) -> SmallVec<[Entity; 2]> {
    let mut subjects: SmallVec<[Entity; 2]> = smallvec![player];
    if let Some(container) = world.get::<Player>(player).and_then(|p| p.container) {
        subjects.push(container);
    }
    subjects
}

/// Create the player body and its overhead container.
///
/// The physics body is attached after the entity exists and then read back;
/// a body that cannot be found afterwards is reported as [`SceneError::MissingBody`].
pub fn spawn_player(world: &mut World, spawn: &PlayerSpawn) -> SceneResult<Entity> {
    if find_player(world).is_some() {
        return Err(SceneError::PlayerAlreadySpawned);
    }

    let idle = format!("{}_idle_down", spawn.texture_key);
    let position = Vector2 {
        x: spawn.x,
        y: spawn.y,
    };

    let player = world
        .spawn((
            Player {
                id: spawn.player_id.clone(),
                texture_key: spawn.texture_key.clone(),
                speed: spawn.speed,
                facing: Default::default(),
                container: None,
            },
            MapPosition::from_vec(position),
            Sprite::centered(
                spawn.texture_key.as_str(),
                0,
                spawn.sprite_width,
                spawn.sprite_height,
            ),
            ZIndex(spawn.y),
            Animation::new(idle),
        ))
        .id();

    world.entity_mut(player).insert((
        RigidBody::with_max_speed(spawn.speed),
        BoxCollider::footprint(spawn.sprite_width, spawn.sprite_height, spawn.footprint_scale),
    ));
    if world.get::<RigidBody>(player).is_none() {
        world.despawn(player);
        return Err(SceneError::MissingBody(spawn.player_id.clone()));
    }

    let container = world
        .spawn((
            PlayerContainer {
                label: spawn.player_id.clone(),
            },
            MapPosition::new(spawn.x, spawn.y + CONTAINER_OFFSET_Y),
            StuckTo::new(player).with_offset(Vector2 {
                x: 0.0,
                y: CONTAINER_OFFSET_Y,
            }),
        ))
        .id();

    if let Some(mut p) = world.get_mut::<Player>(player) {
        p.container = Some(container);
    }

    info!(
        "Spawned player '{}' at ({}, {}) with texture '{}'",
        spawn.player_id, spawn.x, spawn.y, spawn.texture_key
    );
    Ok(player)
}

/// Point the shared camera at `player` and keep it there.
///
/// The camera jumps straight to the player; there is no easing.
pub fn follow_with_camera(world: &mut World, player: Entity, zoom: f32) -> SceneResult<()> {
    let position = world
        .get::<MapPosition>(player)
        .map(|p| p.pos)
        .ok_or(SceneError::PlayerNotSpawned("camera"))?;

    if !world.contains_resource::<Camera2DRes>() {
        let (w, h) = world
            .get_resource::<ScreenSize>()
            .map(|s| (s.w as f32, s.h as f32))
            .unwrap_or((0.0, 0.0));
        world.insert_resource(Camera2DRes::for_viewport(w, h));
    }

    {
        let mut camera = world.resource_mut::<Camera2DRes>();
        camera.0.zoom = zoom;
        camera.0.target = Vector2 {
            x: position.x.round(),
            y: position.y.round(),
        };
    }
    world.insert_resource(CameraFollow {
        target: player,
        round_pixels: true,
    });
    debug!("Camera following {:?} at zoom {}", player, zoom);
    Ok(())
}

/// Register the player against the collidable cells of the ground layer.
pub fn collide_with_ground(world: &mut World, player: Entity, layer: &str) -> SceneResult<()> {
    match world.get_resource::<GroundLayer>() {
        Some(ground) if ground.name == layer => {}
        _ => return Err(SceneError::MissingTileLayer(layer.to_string())),
    }
    let subjects = collision_subjects(world, player);
    world.init_resource::<ColliderRegistry>();
    world
        .resource_mut::<ColliderRegistry>()
        .add(&subjects, ColliderTarget::TileLayer(layer.to_string()));
    debug!("Player collides with tile layer '{}'", layer);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn spawn_creates_body_and_container() {
        let mut world = World::new();
        let player = spawn_player(&mut world, &PlayerSpawn::default()).unwrap();

        let p = world.get::<Player>(player).unwrap();
        assert_eq!(p.id, "tempId");
        let container = p.container.unwrap();
        assert_eq!(world.get::<StuckTo>(container).unwrap().target, player);
        assert_eq!(world.get::<PlayerContainer>(container).unwrap().label, "tempId");

        let pos = world.get::<MapPosition>(player).unwrap().pos;
        assert!(approx_eq(pos.x, 705.0));
        assert!(approx_eq(pos.y, 500.0));
        assert_eq!(
            world.get::<Animation>(player).unwrap().animation_key,
            "adam_idle_down"
        );
        assert_eq!(collision_subjects(&world, player).as_slice(), &[player, container]);
    }

    #[test]
    fn footprint_is_a_fifth_of_sprite_height() {
        let mut world = World::new();
        let player = spawn_player(&mut world, &PlayerSpawn::default()).unwrap();
        let fp = world.get::<BoxCollider>(player).unwrap();
        assert!(approx_eq(fp.size.x, 16.0));
        assert!(approx_eq(fp.size.y, 9.6));
        let (min, max) = fp.aabb(Vector2::new(705.0, 500.0));
        assert!(approx_eq(min.x, 697.0));
        assert!(approx_eq(max.y, 524.0));
    }

    #[test]
    fn second_spawn_is_rejected() {
        let mut world = World::new();
        spawn_player(&mut world, &PlayerSpawn::default()).unwrap();
        assert!(matches!(
            spawn_player(&mut world, &PlayerSpawn::default()),
            Err(SceneError::PlayerAlreadySpawned)
        ));
    }

    #[test]
    fn camera_snaps_to_player() {
        let mut world = World::new();
        world.insert_resource(ScreenSize { w: 800, h: 600 });
        let player = spawn_player(&mut world, &PlayerSpawn::default()).unwrap();
        follow_with_camera(&mut world, player, 1.5).unwrap();

        let cam = world.resource::<Camera2DRes>().0;
        assert!(approx_eq(cam.zoom, 1.5));
        assert!(approx_eq(cam.target.x, 705.0));
        assert!(approx_eq(cam.offset.x, 400.0));
        assert_eq!(world.resource::<CameraFollow>().target, player);
    }

    #[test]
    fn ground_collision_needs_the_layer() {
        let mut world = World::new();
        let player = spawn_player(&mut world, &PlayerSpawn::default()).unwrap();
        assert!(matches!(
            collide_with_ground(&mut world, player, "Ground"),
            Err(SceneError::MissingTileLayer(_))
        ));

        world.insert_resource(GroundLayer {
            name: "Ground".into(),
            width: 1,
            height: 1,
            tile_width: 32.0,
            tile_height: 32.0,
            solid: vec![true],
        });
        collide_with_ground(&mut world, player, "Ground").unwrap();
        let reg = world.resource::<ColliderRegistry>();
        assert_eq!(reg.len(), 1);
        assert_eq!(
            reg.targets_of(player).next(),
            Some(&ColliderTarget::TileLayer("Ground".into()))
        );
    }
}
