//! Loaded map documents.
//!
//! Maps are loaded once per scene instance and stored by resource key; the
//! scene then reads layers from the stored document. Documents are never
//! mutated after insertion.

use std::path::Path;
use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use log::info;
use rustc_hash::FxHashMap;

use crate::error::{SceneError, SceneResult};
use crate::resources::tilemap::{MapDocument, load_tilemap};

/// Registry of loaded tilemaps by key.
#[derive(Resource, Debug, Default)]
pub struct TilemapStore {
    pub map: FxHashMap<String, Arc<MapDocument>>,
}

impl TilemapStore {
    /// Create an empty store.
    pub fn new() -> Self {
        TilemapStore {
            map: FxHashMap::default(),
        }
    }

    /// Get a tilemap by its key.
    pub fn get(&self, key: impl AsRef<str>) -> SceneResult<Arc<MapDocument>> {
        let key = key.as_ref();
        self.map
            .get(key)
            .cloned()
            .ok_or_else(|| SceneError::MapNotLoaded(key.to_string()))
    }

    pub fn contains(&self, key: impl AsRef<str>) -> bool {
        self.map.contains_key(key.as_ref())
    }

    /// Insert a tilemap with a specific key.
    pub fn insert(&mut self, key: impl Into<String>, tilemap: MapDocument) {
        self.map.insert(key.into(), Arc::new(tilemap));
    }

    /// Load a map file and store it under `key`.
    pub fn load(&mut self, key: impl Into<String>, path: impl AsRef<Path>) -> SceneResult<()> {
        let path = path.as_ref();
        let doc = load_tilemap(path)?;
        info!(
            "Loaded map {:?}: {}x{} tiles, {} tile layers, {} object layers, {} tilesets",
            path,
            doc.width,
            doc.height,
            doc.tile_layers().count(),
            doc.object_layers().count(),
            doc.tilesets.len()
        );
        self.insert(key, doc);
        Ok(())
    }

    /// Clear all loaded tilemaps.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_map() -> MapDocument {
        MapDocument::from_json_str(r#"{ "width": 1, "height": 1, "tilewidth": 8, "tileheight": 8 }"#)
            .unwrap()
    }

    #[test]
    fn get_unknown_key_fails() {
        let store = TilemapStore::new();
        assert!(matches!(store.get("tilemap"), Err(SceneError::MapNotLoaded(k)) if k == "tilemap"));
    }

    #[test]
    fn insert_then_get_shares_document() {
        let mut store = TilemapStore::new();
        store.insert("tilemap", empty_map());
        assert!(store.contains("tilemap"));
        let a = store.get("tilemap").unwrap();
        let b = store.get("tilemap").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        store.clear();
        assert!(!store.contains("tilemap"));
    }
}
