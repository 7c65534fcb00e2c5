//! The office world scene.
//!
//! [`WorldScene`] builds the playable map in a fixed sequence of
//! [`BuildStep`]s and afterwards forwards every tick to the local player.
//!
//! # Build order
//!
//! The order in [`BUILD_SEQUENCE`] matters: the animation table exists before
//! anything names a player animation, and every step that registers
//! collisions against the player or points the camera at it runs after the
//! player is spawned. Steps declare this through [`BuildStep::requires_player`].
//!
//! # Failure
//!
//! Building is all-or-nothing. The keyboard and the map are checked before
//! anything is spawned; a failing step despawns everything the build created
//! and drops the scene's registries, so no partial scene is left in the world.

use std::sync::Arc;

use bevy_ecs::prelude::*;
use log::{error, info, warn};

use crate::components::player::Player;
use crate::error::{SceneError, SceneResult};
use crate::resources::animationstore::{AnimationStore, build_player_animations};
use crate::resources::camera2d::CameraFollow;
use crate::resources::colliders::ColliderRegistry;
use crate::resources::gameconfig::GameConfig;
use crate::resources::groundlayer::GroundLayer;
use crate::resources::input::{InputSnapshot, InputState};
use crate::resources::keyboard::KeyboardDevice;
use crate::resources::tilemap::MapDocument;
use crate::resources::tilemapstore::TilemapStore;
use crate::resources::tilesetregistry::TilesetRegistry;
use crate::systems::groundlayer::{GroundImport, build_ground_layer};
use crate::systems::input::{disable_keys, enable_keys, register_keys};
use crate::systems::player::{PlayerHandle, SceneEntity};
use crate::systems::playerspawn::{
    PlayerSpawn, collide_with_ground, follow_with_camera, spawn_player,
};
use crate::systems::staticlayer::{
    ObjectLayerImport, StaticGroup, import_chair_layer, import_object_layer,
};
use crate::texturekeys;

/// A scene the game loop can build once and then tick every frame.
pub trait SceneLifecycle {
    fn build(&mut self, world: &mut World) -> SceneResult<()>;
    fn tick(&mut self, world: &mut World, elapsed: f32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStep {
    PlayerAnimations,
    LoadMap,
    SpawnPlayer,
    GroundLayer,
    ChairLayer,
    ObjectLayers,
    Camera,
    GroundCollision,
    KeyboardFocus,
}

impl BuildStep {
    pub fn name(&self) -> &'static str {
        match self {
            BuildStep::PlayerAnimations => "player animations",
            BuildStep::LoadMap => "load map",
            BuildStep::SpawnPlayer => "spawn player",
            BuildStep::GroundLayer => "ground layer",
            BuildStep::ChairLayer => "chair layer",
            BuildStep::ObjectLayers => "object layers",
            BuildStep::Camera => "camera",
            BuildStep::GroundCollision => "ground collision",
            BuildStep::KeyboardFocus => "keyboard focus",
        }
    }

    /// Whether the step refers to the player and so must run after it spawns.
    pub fn requires_player(&self) -> bool {
        matches!(
            self,
            BuildStep::ChairLayer
                | BuildStep::ObjectLayers
                | BuildStep::Camera
                | BuildStep::GroundCollision
        )
    }
}

pub const BUILD_SEQUENCE: [BuildStep; 9] = [
    BuildStep::PlayerAnimations,
    BuildStep::LoadMap,
    BuildStep::SpawnPlayer,
    BuildStep::GroundLayer,
    BuildStep::ChairLayer,
    BuildStep::ObjectLayers,
    BuildStep::Camera,
    BuildStep::GroundCollision,
    BuildStep::KeyboardFocus,
];

pub const GROUND_IMPORT: GroundImport = GroundImport {
    layer: "Ground",
    tileset: "FloorAndGround",
    texture_key: texturekeys::TILES_WALL,
    collision_flag: "collides",
};

pub const CHAIR_IMPORT: ObjectLayerImport = ObjectLayerImport {
    layer: "Chair",
    texture_key: texturekeys::CHAIRS,
    tileset: "chair",
    collidable: false,
};

/// Remaining object layers, imported in this order after the chairs.
pub const OBJECT_LAYER_IMPORTS: [ObjectLayerImport; 6] = [
    ObjectLayerImport {
        layer: "Wall",
        texture_key: texturekeys::TILES_WALL,
        tileset: "FloorAndGround",
        collidable: false,
    },
    ObjectLayerImport {
        layer: "Objects",
        texture_key: texturekeys::OFFICE,
        tileset: "Modern_Office_Black_Shadow",
        collidable: false,
    },
    ObjectLayerImport {
        layer: "ObjectsOnCollide",
        texture_key: texturekeys::OFFICE,
        tileset: "Modern_Office_Black_Shadow",
        collidable: true,
    },
    ObjectLayerImport {
        layer: "GenericObjects",
        texture_key: texturekeys::GENERIC,
        tileset: "Generic",
        collidable: false,
    },
    ObjectLayerImport {
        layer: "GenericObjectsOnCollide",
        texture_key: texturekeys::GENERIC,
        tileset: "Generic",
        collidable: true,
    },
    ObjectLayerImport {
        layer: "Basement",
        texture_key: texturekeys::BASEMENT,
        tileset: "Basement",
        collidable: true,
    },
];

/// Every (texture, tileset) pairing the scene draws with.
pub fn texture_tilesets() -> impl Iterator<Item = (&'static str, &'static str)> {
    std::iter::once((GROUND_IMPORT.texture_key, GROUND_IMPORT.tileset))
        .chain(std::iter::once((CHAIR_IMPORT.texture_key, CHAIR_IMPORT.tileset)))
        .chain(OBJECT_LAYER_IMPORTS.iter().map(|i| (i.texture_key, i.tileset)))
}

/// Steps completed by the last build, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildTrace {
    pub completed: Vec<BuildStep>,
    /// Step that failed, if the build aborted.
    pub failed: Option<BuildStep>,
}

impl BuildTrace {
    pub fn is_complete(&self, sequence: &[BuildStep]) -> bool {
        self.failed.is_none() && self.completed == sequence
    }
}

pub struct WorldScene {
    map_key: String,
    spawn: PlayerSpawn,
    camera_zoom: f32,
    sequence: Vec<BuildStep>,
    object_layers: Vec<ObjectLayerImport>,
    map: Option<Arc<MapDocument>>,
    player: Option<PlayerHandle>,
    groups: Vec<StaticGroup>,
    spawned: Vec<Entity>,
    trace: BuildTrace,
}

impl WorldScene {
    pub fn new(map_key: impl Into<String>, spawn: PlayerSpawn, camera_zoom: f32) -> Self {
        Self {
            map_key: map_key.into(),
            spawn,
            camera_zoom,
            sequence: BUILD_SEQUENCE.to_vec(),
            object_layers: OBJECT_LAYER_IMPORTS.to_vec(),
            map: None,
            player: None,
            groups: Vec::new(),
            spawned: Vec::new(),
            trace: BuildTrace::default(),
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            texturekeys::TILE_MAP,
            PlayerSpawn::from_config(config),
            config.camera_zoom,
        )
    }

    /// Replace the build order.
    pub fn with_sequence(mut self, sequence: &[BuildStep]) -> Self {
        self.sequence = sequence.to_vec();
        self
    }

    /// Replace the object layers imported by [`BuildStep::ObjectLayers`].
    pub fn with_object_layers(mut self, layers: &[ObjectLayerImport]) -> Self {
        self.object_layers = layers.to_vec();
        self
    }

    pub fn player(&self) -> Option<Entity> {
        self.player.map(|p| p.0)
    }

    pub fn map(&self) -> Option<&MapDocument> {
        self.map.as_deref()
    }

    pub fn groups(&self) -> &[StaticGroup] {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&StaticGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn trace(&self) -> &BuildTrace {
        &self.trace
    }

    /// Hand the keyboard back to the scene.
    pub fn enable_keys(&self, world: &mut World) -> SceneResult<()> {
        enable_keys(world)
    }

    /// Let another element own the keyboard.
    pub fn disable_keys(&self, world: &mut World) -> SceneResult<()> {
        disable_keys(world)
    }

    /// Despawn everything the scene created and drop its registries.
    pub fn teardown(&mut self, world: &mut World) {
        for entity in self.spawned.drain(..) {
            world.despawn(entity);
        }
        world.remove_resource::<ColliderRegistry>();
        world.remove_resource::<GroundLayer>();
        world.remove_resource::<TilesetRegistry>();
        world.remove_resource::<CameraFollow>();
        self.groups.clear();
        self.player = None;
        self.map = None;
    }

    fn preflight(&self, world: &World) -> SceneResult<()> {
        if !world.contains_resource::<KeyboardDevice>() {
            return Err(SceneError::KeyboardUnavailable);
        }
        let loaded = world
            .get_resource::<TilemapStore>()
            .is_some_and(|store| store.contains(&self.map_key));
        if !loaded {
            return Err(SceneError::MapNotLoaded(self.map_key.clone()));
        }
        Ok(())
    }

    fn require_player(&self, step: BuildStep) -> SceneResult<Entity> {
        self.player
            .map(|p| p.0)
            .ok_or(SceneError::PlayerNotSpawned(step.name()))
    }

    fn require_map(&self) -> SceneResult<Arc<MapDocument>> {
        self.map
            .clone()
            .ok_or_else(|| SceneError::MapNotLoaded(self.map_key.clone()))
    }

    fn keep_group(&mut self, group: StaticGroup) {
        self.spawned.extend(group.members.iter().copied());
        self.groups.push(group);
    }

    fn run_step(&mut self, world: &mut World, step: BuildStep) -> SceneResult<()> {
        if step.requires_player() {
            self.require_player(step)?;
        }
        match step {
            BuildStep::PlayerAnimations => {
                world.init_resource::<AnimationStore>();
                build_player_animations(
                    &mut world.resource_mut::<AnimationStore>(),
                    &self.spawn.texture_key,
                );
            }
            BuildStep::LoadMap => {
                let map = world
                    .get_resource::<TilemapStore>()
                    .ok_or_else(|| SceneError::MapNotLoaded(self.map_key.clone()))?
                    .get(&self.map_key)?;
                world.insert_resource(TilesetRegistry::from_map(&map));
                self.map = Some(map);
            }
            BuildStep::SpawnPlayer => {
                let player = spawn_player(world, &self.spawn)?;
                self.spawned.push(player);
                if let Some(container) = world.get::<Player>(player).and_then(|p| p.container) {
                    self.spawned.push(container);
                }
                self.player = Some(PlayerHandle(player));
            }
            BuildStep::GroundLayer => {
                let map = self.require_map()?;
                let tiles = build_ground_layer(world, &map, &GROUND_IMPORT)?;
                self.spawned.extend(tiles);
            }
            BuildStep::ChairLayer => {
                let map = self.require_map()?;
                let group = import_chair_layer(world, &map, &CHAIR_IMPORT)?;
                self.keep_group(group);
            }
            BuildStep::ObjectLayers => {
                let map = self.require_map()?;
                for import in self.object_layers.clone() {
                    let group = import_object_layer(world, &map, &import)?;
                    self.keep_group(group);
                }
            }
            BuildStep::Camera => {
                let player = self.require_player(step)?;
                follow_with_camera(world, player, self.camera_zoom)?;
            }
            BuildStep::GroundCollision => {
                let player = self.require_player(step)?;
                collide_with_ground(world, player, GROUND_IMPORT.layer)?;
            }
            BuildStep::KeyboardFocus => {
                register_keys(world)?;
                enable_keys(world)?;
            }
        }
        Ok(())
    }
}

impl SceneLifecycle for WorldScene {
    fn build(&mut self, world: &mut World) -> SceneResult<()> {
        self.trace = BuildTrace::default();
        if let Err(e) = self.preflight(world) {
            error!("Scene cannot start: {}", e);
            return Err(e);
        }

        for step in self.sequence.clone() {
            if let Err(e) = self.run_step(world, step) {
                error!("Scene build failed at '{}': {}", step.name(), e);
                self.trace.failed = Some(step);
                self.teardown(world);
                return Err(e);
            }
            self.trace.completed.push(step);
        }

        info!(
            "Scene built: {} static groups, {} entities",
            self.groups.len(),
            self.spawned.len()
        );
        Ok(())
    }

    fn tick(&mut self, world: &mut World, elapsed: f32) {
        let Some(player) = self.player.as_mut() else {
            return;
        };
        let input = match world.get_resource::<InputState>() {
            Some(input) => input.snapshot(),
            None => {
                warn!("Tick without registered keys");
                InputSnapshot::default()
            }
        };
        player.update(world, elapsed, &input);
    }
}
