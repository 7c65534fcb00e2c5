//! Ground tile layer construction.
//!
//! Binds the ground layer's tileset to its texture, builds the
//! [`GroundLayer`] collision grid from the tiles flagged as colliding and
//! spawns one sprite per non-empty cell for drawing.

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::group::Group;
use crate::components::mapposition::MapPosition;
use crate::components::sprite::Sprite;
use crate::components::zindex::ZIndex;
use crate::error::{SceneError, SceneResult};
use crate::resources::groundlayer::GroundLayer;
use crate::resources::tilemap::MapDocument;
use crate::resources::tilesetregistry::TilesetRegistry;

/// Ground tiles draw below every depth-sorted body.
pub const GROUND_DEPTH: f32 = -1.0e6;

/// How the ground layer is brought into the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroundImport {
    pub layer: &'static str,
    pub tileset: &'static str,
    pub texture_key: &'static str,
    /// Boolean tile property marking a cell as solid.
    pub collision_flag: &'static str,
}

/// Build the ground grid and its tile sprites. Returns the spawned tiles.
pub fn build_ground_layer(
    world: &mut World,
    map: &MapDocument,
    import: &GroundImport,
) -> SceneResult<Vec<Entity>> {
    let layer = map.tile_layer(import.layer)?;
    if map.tile_width == 0 || map.tile_height == 0 {
        return Err(SceneError::ZeroTileSize {
            width: map.tile_width,
            height: map.tile_height,
        });
    }

    let (ground, tiles) = {
        let tilesets = world
            .get_resource_mut::<TilesetRegistry>()
            .ok_or_else(|| SceneError::MissingTileset(import.tileset.to_string()))?
            .into_inner();
        tilesets.add_tileset_image(import.tileset, import.texture_key)?;

        let tile_width = map.tile_width as f32;
        let tile_height = map.tile_height as f32;
        let mut solid = Vec::with_capacity((layer.width * layer.height) as usize);
        let mut tiles = Vec::new();
        for row in 0..layer.height {
            for col in 0..layer.width {
                let gid = layer.gid_at(col, row);
                solid.push(gid != 0 && tilesets.tile_has_flag(gid, import.collision_flag));
                if gid == 0 {
                    continue;
                }
                // only tiles of the bound tileset are drawn
                let owned = tilesets
                    .tileset_for_gid(gid)
                    .is_some_and(|t| t.name == import.tileset);
                if !owned {
                    debug!("Ground cell ({}, {}) gid {} belongs to another tileset", col, row, gid);
                    continue;
                }
                match tilesets.local_index(import.tileset, gid) {
                    Ok(frame) => tiles.push((col, row, frame)),
                    Err(e) => debug!("Ground cell ({}, {}) skipped: {}", col, row, e),
                }
            }
        }
        (
            GroundLayer {
                name: import.layer.to_string(),
                width: layer.width,
                height: layer.height,
                tile_width,
                tile_height,
                solid,
            },
            tiles,
        )
    };

    let (tw, th) = (ground.tile_width, ground.tile_height);
    let mut spawned = Vec::with_capacity(tiles.len());
    for (col, row, frame) in tiles {
        let e = world
            .spawn((
                Group::new(import.layer),
                MapPosition::new(col as f32 * tw + tw * 0.5, row as f32 * th + th * 0.5),
                Sprite::centered(import.texture_key, frame, tw, th),
                ZIndex(GROUND_DEPTH),
            ))
            .id();
        spawned.push(e);
    }

    info!(
        "Ground layer '{}': {}x{} cells, {} solid, {} tiles drawn",
        ground.name,
        ground.width,
        ground.height,
        ground.solid_count(),
        spawned.len()
    );
    world.insert_resource(ground);
    Ok(spawned)
}
