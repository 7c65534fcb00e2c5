//! Tileset registry.
//!
//! Maps tileset names to their first global tile id so that a placed object's
//! global tile reference can be turned into a frame index on the tileset's own
//! sprite sheet, and records which texture each tileset is drawn with.

use bevy_ecs::prelude::Resource;
use log::{debug, warn};
use rustc_hash::FxHashMap;

use crate::error::{SceneError, SceneResult};
use crate::resources::tilemap::{GID_MASK, MapDocument, Tileset};

#[derive(Resource, Debug, Default, Clone)]
pub struct TilesetRegistry {
    /// Tilesets in authoring order.
    tilesets: Vec<Tileset>,
    by_name: FxHashMap<String, usize>,
    /// Texture bound to a tileset name via [`TilesetRegistry::add_tileset_image`].
    textures: FxHashMap<String, String>,
}

impl TilesetRegistry {
    pub fn from_map(map: &MapDocument) -> Self {
        let mut registry = Self::default();
        for tileset in &map.tilesets {
            registry.insert(tileset.clone());
        }
        registry
    }

    pub fn insert(&mut self, tileset: Tileset) {
        if let Some(last) = self.tilesets.last() {
            if tileset.first_gid < last.first_gid {
                warn!(
                    "Tileset '{}' first gid {} is lower than previous '{}' ({})",
                    tileset.name, tileset.first_gid, last.name, last.first_gid
                );
            }
        }
        debug!("Registered tileset '{}' at gid {}", tileset.name, tileset.first_gid);
        self.by_name.insert(tileset.name.clone(), self.tilesets.len());
        self.tilesets.push(tileset);
    }

    pub fn get(&self, name: &str) -> SceneResult<&Tileset> {
        self.by_name
            .get(name)
            .map(|&i| &self.tilesets[i])
            .ok_or_else(|| SceneError::MissingTileset(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.tilesets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tilesets.is_empty()
    }

    /// Bind a texture to a tileset; the tileset must exist in the map.
    pub fn add_tileset_image(&mut self, name: &str, texture_key: &str) -> SceneResult<&Tileset> {
        let index = *self
            .by_name
            .get(name)
            .ok_or_else(|| SceneError::MissingTileset(name.to_string()))?;
        self.textures
            .insert(name.to_string(), texture_key.to_string());
        Ok(&self.tilesets[index])
    }

    /// Texture bound to a tileset, if any.
    pub fn texture_of(&self, name: &str) -> Option<&str> {
        self.textures.get(name).map(String::as_str)
    }

    /// Sheet-local index for a global tile id: `gid - first_gid`.
    pub fn local_index(&self, tileset_name: &str, gid: u32) -> SceneResult<u32> {
        let tileset = self.get(tileset_name)?;
        let gid = gid & GID_MASK;
        gid.checked_sub(tileset.first_gid)
            .ok_or_else(|| SceneError::GidOutOfRange {
                tileset: tileset.name.clone(),
                gid,
                first_gid: tileset.first_gid,
            })
    }

    /// Tileset owning a global id: the one with the largest first gid not above it.
    pub fn tileset_for_gid(&self, gid: u32) -> Option<&Tileset> {
        let gid = gid & GID_MASK;
        if gid == 0 {
            return None;
        }
        self.tilesets
            .iter()
            .filter(|t| t.first_gid <= gid)
            .max_by_key(|t| t.first_gid)
    }

    /// Whether the tile behind `gid` carries a true boolean custom property `flag`.
    pub fn tile_has_flag(&self, gid: u32, flag: &str) -> bool {
        let gid = gid & GID_MASK;
        self.tileset_for_gid(gid)
            .map(|t| t.tile_flag(gid - t.first_gid, flag))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::tilemap::{Property, TileDef};
    use serde_json::Value;

    fn tileset(name: &str, first_gid: u32) -> Tileset {
        Tileset {
            name: name.to_string(),
            first_gid,
            tile_count: 10,
            columns: 5,
            tile_width: 32,
            tile_height: 32,
            tiles: vec![],
        }
    }

    fn registry() -> TilesetRegistry {
        let mut r = TilesetRegistry::default();
        let mut floor = tileset("FloorAndGround", 1);
        floor.tiles.push(TileDef {
            id: 2,
            properties: vec![Property {
                name: "collides".into(),
                kind: "bool".into(),
                value: Value::Bool(true),
            }],
        });
        r.insert(floor);
        r.insert(tileset("Chairs", 11));
        r.insert(tileset("Generic", 40));
        r
    }

    #[test]
    fn local_index_subtracts_first_gid() {
        let r = registry();
        assert_eq!(r.local_index("Chairs", 15).unwrap(), 4);
        assert_eq!(r.local_index("Chairs", 11).unwrap(), 0);
        assert_eq!(r.local_index("FloorAndGround", 5).unwrap(), 4);
    }

    #[test]
    fn local_index_below_first_gid_fails() {
        let r = registry();
        assert!(matches!(
            r.local_index("Generic", 12),
            Err(SceneError::GidOutOfRange { gid: 12, first_gid: 40, .. })
        ));
    }

    #[test]
    fn unknown_tileset_fails() {
        let mut r = registry();
        assert!(matches!(r.get("Basement"), Err(SceneError::MissingTileset(_))));
        assert!(matches!(
            r.add_tileset_image("Basement", "basement"),
            Err(SceneError::MissingTileset(_))
        ));
    }

    #[test]
    fn add_tileset_image_binds_texture() {
        let mut r = registry();
        let ts = r.add_tileset_image("FloorAndGround", "tiles_wall").unwrap();
        assert_eq!(ts.first_gid, 1);
        assert_eq!(r.texture_of("FloorAndGround"), Some("tiles_wall"));
        assert_eq!(r.texture_of("Chairs"), None);
    }

    #[test]
    fn tileset_for_gid_picks_owner() {
        let r = registry();
        assert_eq!(r.tileset_for_gid(0), None);
        assert_eq!(r.tileset_for_gid(10).unwrap().name, "FloorAndGround");
        assert_eq!(r.tileset_for_gid(11).unwrap().name, "Chairs");
        assert_eq!(r.tileset_for_gid(99).unwrap().name, "Generic");
    }

    #[test]
    fn tile_has_flag_resolves_through_owner() {
        let r = registry();
        assert!(r.tile_has_flag(3, "collides"));
        assert!(!r.tile_has_flag(2, "collides"));
        assert!(!r.tile_has_flag(13, "collides"));
    }
}
