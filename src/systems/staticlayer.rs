//! Static entity instantiation from object layers.
//!
//! Every placed object of a layer becomes one non-moving body: positioned at
//! its center, drawn with the frame its gid selects on the layer's tileset,
//! and depth-sorted by its center Y.
//!
//! The authoring tool anchors objects at their bottom-left corner, so the
//! center is `x + width/2` but `y - height/2`. The asymmetry is intended.
//!
//! A layer is validated as a whole before anything is spawned: one bad object
//! aborts the import and leaves no body from that layer behind. Collidability
//! belongs to the layer; a collidable layer is registered against the player
//! once, as a group.

use bevy_ecs::prelude::*;
use log::{debug, info};
use raylib::prelude::Vector2;

use crate::components::boxcollider::BoxCollider;
use crate::components::group::Group;
use crate::components::mapposition::MapPosition;
use crate::components::sprite::Sprite;
use crate::components::staticbody::{Chair, StaticBody};
use crate::components::zindex::ZIndex;
use crate::error::{SceneError, SceneResult};
use crate::resources::colliders::{ColliderRegistry, ColliderTarget};
use crate::resources::tilemap::{MapDocument, PlacedObject};
use crate::resources::tilesetregistry::TilesetRegistry;
use crate::systems::playerspawn::{collision_subjects, find_player};

/// How one object layer is brought into the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectLayerImport {
    /// Object layer name in the map.
    pub layer: &'static str,
    /// Texture the layer's props are drawn with.
    pub texture_key: &'static str,
    /// Tileset the objects' gids refer to.
    pub tileset: &'static str,
    /// Whether the player collides with this layer.
    pub collidable: bool,
}

/// Bodies spawned for one layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticGroup {
    pub name: String,
    pub members: Vec<Entity>,
    /// Whether a collision registration was recorded for this group.
    pub registered: bool,
}

/// Center anchor for an object placed with the authoring tool's convention.
pub fn center_anchor(x: f32, y: f32, width: f32, height: f32) -> Vector2 {
    Vector2 {
        x: x + width * 0.5,
        y: y - height * 0.5,
    }
}

struct ValidObject {
    id: u32,
    gid: u32,
    frame: u32,
    center: Vector2,
    size: Vector2,
    facing: Option<String>,
}

fn required_f32(
    layer: &str,
    obj: &PlacedObject,
    value: Option<f32>,
    field: &'static str,
) -> SceneResult<f32> {
    match value {
        Some(v) if v != 0.0 => Ok(v),
        _ => Err(SceneError::InvalidObject {
            layer: layer.to_string(),
            object_id: obj.id,
            field,
        }),
    }
}

fn validate_object(
    layer: &str,
    obj: &PlacedObject,
    tilesets: &TilesetRegistry,
    tileset: &str,
    with_facing: bool,
) -> SceneResult<ValidObject> {
    let x = required_f32(layer, obj, obj.x, "x")?;
    let width = required_f32(layer, obj, obj.width, "width")?;
    let y = required_f32(layer, obj, obj.y, "y")?;
    let height = required_f32(layer, obj, obj.height, "height")?;
    let gid = match obj.gid {
        Some(gid) if gid != 0 => gid,
        _ => {
            return Err(SceneError::InvalidObject {
                layer: layer.to_string(),
                object_id: obj.id,
                field: "gid",
            });
        }
    };

    let frame = tilesets.local_index(tileset, gid)?;

    let facing = if with_facing {
        let first = obj
            .properties
            .first()
            .ok_or_else(|| SceneError::MissingProperty {
                layer: layer.to_string(),
                object_id: obj.id,
            })?;
        Some(first.value_string())
    } else {
        None
    };

    Ok(ValidObject {
        id: obj.id,
        gid,
        frame,
        center: center_anchor(x, y, width, height),
        size: Vector2 {
            x: width,
            y: height,
        },
        facing,
    })
}

fn instantiate(
    world: &mut World,
    map: &MapDocument,
    import: &ObjectLayerImport,
    with_facing: bool,
) -> SceneResult<StaticGroup> {
    let layer = map.object_layer(import.layer)?;

    let valid: Vec<ValidObject> = {
        let tilesets = world
            .get_resource_mut::<TilesetRegistry>()
            .ok_or_else(|| SceneError::MissingTileset(import.tileset.to_string()))?
            .into_inner();
        tilesets.add_tileset_image(import.tileset, import.texture_key)?;
        let tilesets: &TilesetRegistry = tilesets;
        layer
            .objects
            .iter()
            .map(|obj| validate_object(import.layer, obj, tilesets, import.tileset, with_facing))
            .collect::<SceneResult<_>>()?
    };

    let mut members = Vec::with_capacity(valid.len());
    for obj in valid {
        let mut entity = world.spawn((
            StaticBody {
                object_id: obj.id,
                gid: obj.gid,
            },
            Group::new(import.layer),
            MapPosition::from_vec(obj.center),
            Sprite::centered(import.texture_key, obj.frame, obj.size.x, obj.size.y),
            ZIndex(obj.center.y),
            BoxCollider::centered(obj.size.x, obj.size.y),
        ));
        if let Some(facing) = obj.facing {
            entity.insert(Chair::new(facing));
        }
        debug!(
            "Layer '{}': object {} at ({}, {}) frame {}",
            import.layer, obj.id, obj.center.x, obj.center.y, obj.frame
        );
        members.push(entity.id());
    }

    let mut registered = false;
    if import.collidable {
        if let Some(player) = find_player(world) {
            let subjects = collision_subjects(world, player);
            world.init_resource::<ColliderRegistry>();
            world
                .resource_mut::<ColliderRegistry>()
                .add(&subjects, ColliderTarget::Group(import.layer.to_string()));
            registered = true;
        }
    }

    info!(
        "Imported {} objects from layer '{}' (collidable: {})",
        members.len(),
        import.layer,
        registered
    );

    Ok(StaticGroup {
        name: import.layer.to_string(),
        members,
        registered,
    })
}

/// Spawn one static body per placed object of `import.layer`.
pub fn import_object_layer(
    world: &mut World,
    map: &MapDocument,
    import: &ObjectLayerImport,
) -> SceneResult<StaticGroup> {
    instantiate(world, map, import, false)
}

/// Like [`import_object_layer`], also fixing each body's facing from the
/// object's first custom property.
pub fn import_chair_layer(
    world: &mut World,
    map: &MapDocument,
    import: &ObjectLayerImport,
) -> SceneResult<StaticGroup> {
    instantiate(world, map, import, true)
}
