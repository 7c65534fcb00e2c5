//! Map document types.
//!
//! Mirrors the parts of Tiled's JSON export the scene consumes: tile layers
//! (grids of global tile ids), object layers (placed props with position,
//! size, tile reference and custom properties) and the tileset table used to
//! turn global ids into sheet-local ones.
//!
//! Object coordinates follow the authoring tool: `x` is the left edge and `y`
//! is the *bottom* edge of the tile image.

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{SceneError, SceneResult};

/// Tiled stores flip flags in the top three bits of every gid.
pub const GID_MASK: u32 = 0x1FFF_FFFF;

/// A custom key/value property authored on an object or tile.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Property {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub value: Value,
}

impl Property {
    /// The value as text. Strings come back unquoted, anything else as JSON.
    pub fn value_string(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// A placed instance inside an object layer.
///
/// Geometry and `gid` are optional in the document; the instantiator rejects
/// objects where any of them is missing or zero.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlacedObject {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub gid: Option<u32>,
    #[serde(default)]
    pub properties: Vec<Property>,
}

/// A named set of placed objects.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ObjectLayer {
    pub name: String,
    #[serde(default)]
    pub objects: Vec<PlacedObject>,
}

/// A named grid of cells, row-major, holding global tile ids (0 = empty).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TileLayer {
    pub name: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub data: Vec<u32>,
}

impl TileLayer {
    /// Global tile id at a cell with flip flags stripped, 0 for empty or out of range.
    pub fn gid_at(&self, col: u32, row: u32) -> u32 {
        if col >= self.width || row >= self.height {
            return 0;
        }
        self.data
            .get((row * self.width + col) as usize)
            .map(|gid| gid & GID_MASK)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum Layer {
    #[serde(rename = "tilelayer")]
    Tile(TileLayer),
    #[serde(rename = "objectgroup")]
    Object(ObjectLayer),
    #[serde(other)]
    Other,
}

/// Per-tile metadata declared inside a tileset.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TileDef {
    /// Tileset-local id.
    pub id: u32,
    #[serde(default)]
    pub properties: Vec<Property>,
}

/// A tileset reference in the map.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Tileset {
    pub name: String,
    #[serde(rename = "firstgid")]
    pub first_gid: u32,
    #[serde(rename = "tilecount", default)]
    pub tile_count: u32,
    #[serde(default)]
    pub columns: u32,
    #[serde(rename = "tilewidth", default)]
    pub tile_width: u32,
    #[serde(rename = "tileheight", default)]
    pub tile_height: u32,
    #[serde(default)]
    pub tiles: Vec<TileDef>,
}

impl Tileset {
    /// Boolean custom property on a tileset-local tile id.
    pub fn tile_flag(&self, local_id: u32, flag: &str) -> bool {
        self.tiles
            .iter()
            .find(|t| t.id == local_id)
            .and_then(|t| t.properties.iter().find(|p| p.name == flag))
            .and_then(|p| p.value.as_bool())
            .unwrap_or(false)
    }
}

/// An immutable tile-based map.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MapDocument {
    /// Map width in tiles.
    pub width: u32,
    /// Map height in tiles.
    pub height: u32,
    #[serde(rename = "tilewidth")]
    pub tile_width: u32,
    #[serde(rename = "tileheight")]
    pub tile_height: u32,
    #[serde(default)]
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub tilesets: Vec<Tileset>,
}

impl MapDocument {
    pub fn from_json_str(text: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn object_layer(&self, name: &str) -> SceneResult<&ObjectLayer> {
        self.layers
            .iter()
            .find_map(|layer| match layer {
                Layer::Object(l) if l.name == name => Some(l),
                _ => None,
            })
            .ok_or_else(|| SceneError::MissingObjectLayer(name.to_string()))
    }

    pub fn tile_layer(&self, name: &str) -> SceneResult<&TileLayer> {
        self.layers
            .iter()
            .find_map(|layer| match layer {
                Layer::Tile(l) if l.name == name => Some(l),
                _ => None,
            })
            .ok_or_else(|| SceneError::MissingTileLayer(name.to_string()))
    }

    pub fn object_layers(&self) -> impl Iterator<Item = &ObjectLayer> {
        self.layers.iter().filter_map(|layer| match layer {
            Layer::Object(l) => Some(l),
            _ => None,
        })
    }

    pub fn tile_layers(&self) -> impl Iterator<Item = &TileLayer> {
        self.layers.iter().filter_map(|layer| match layer {
            Layer::Tile(l) => Some(l),
            _ => None,
        })
    }
}

/// Read and parse a map exported as JSON.
pub fn load_tilemap(path: impl AsRef<Path>) -> SceneResult<MapDocument> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| SceneError::MapIo {
        path: path.to_path_buf(),
        source,
    })?;
    let map = MapDocument::from_json_str(&text)?;
    info!(
        "Loaded map {:?}: {}x{} tiles, {} layers, {} tilesets",
        path,
        map.width,
        map.height,
        map.layers.len(),
        map.tilesets.len()
    );
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "width": 2, "height": 2, "tilewidth": 32, "tileheight": 32,
        "layers": [
            { "type": "tilelayer", "name": "Ground", "width": 2, "height": 2,
              "data": [1, 2, 0, 2147483649] },
            { "type": "objectgroup", "name": "Chair", "objects": [
                { "id": 7, "gid": 5, "x": 100, "y": 200, "width": 32, "height": 32,
                  "properties": [ { "name": "direction", "type": "string", "value": "south" } ] }
            ] },
            { "type": "imagelayer", "name": "Backdrop" }
        ],
        "tilesets": [
            { "name": "FloorAndGround", "firstgid": 1, "tilecount": 4, "columns": 2,
              "tiles": [ { "id": 1, "properties": [ { "name": "collides", "type": "bool", "value": true } ] } ] }
        ]
    }"#;

    #[test]
    fn parses_layers_and_tilesets() {
        let map = MapDocument::from_json_str(SAMPLE).unwrap();
        assert_eq!(map.tile_width, 32);
        assert_eq!(map.layers.len(), 3);
        assert_eq!(map.layers[2], Layer::Other);
        assert_eq!(map.tilesets[0].first_gid, 1);

        let chairs = map.object_layer("Chair").unwrap();
        assert_eq!(chairs.objects.len(), 1);
        let obj = &chairs.objects[0];
        assert_eq!(obj.id, 7);
        assert_eq!(obj.gid, Some(5));
        assert_eq!(obj.x, Some(100.0));
        assert_eq!(obj.properties[0].value_string(), "south");
    }

    #[test]
    fn missing_layers_are_errors() {
        let map = MapDocument::from_json_str(SAMPLE).unwrap();
        assert!(matches!(
            map.object_layer("Ground"),
            Err(SceneError::MissingObjectLayer(name)) if name == "Ground"
        ));
        assert!(matches!(
            map.tile_layer("Chair"),
            Err(SceneError::MissingTileLayer(_))
        ));
    }

    #[test]
    fn gid_at_strips_flip_flags() {
        let map = MapDocument::from_json_str(SAMPLE).unwrap();
        let ground = map.tile_layer("Ground").unwrap();
        assert_eq!(ground.gid_at(0, 0), 1);
        assert_eq!(ground.gid_at(0, 1), 0);
        assert_eq!(ground.gid_at(1, 1), 1);
        assert_eq!(ground.gid_at(5, 0), 0);
    }

    #[test]
    fn tile_flag_reads_bool_property() {
        let map = MapDocument::from_json_str(SAMPLE).unwrap();
        let ts = &map.tilesets[0];
        assert!(ts.tile_flag(1, "collides"));
        assert!(!ts.tile_flag(0, "collides"));
        assert!(!ts.tile_flag(1, "other"));
    }

    #[test]
    fn object_without_gid_still_parses() {
        let map = MapDocument::from_json_str(
            r#"{ "width": 1, "height": 1, "tilewidth": 16, "tileheight": 16,
                 "layers": [ { "type": "objectgroup", "name": "Wall",
                               "objects": [ { "id": 1, "x": 4, "y": 4 } ] } ] }"#,
        )
        .unwrap();
        let obj = &map.object_layer("Wall").unwrap().objects[0];
        assert_eq!(obj.gid, None);
        assert_eq!(obj.width, None);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        assert!(matches!(
            load_tilemap("./definitely/not/here.json"),
            Err(SceneError::MapIo { .. })
        ));
    }
}
