//! Texture and map resource keys.
//!
//! String keys shared by the scene, the texture store and the binary's asset
//! table, plus the relative asset path each key is loaded from.

pub const TILE_MAP: &str = "tilemap";
pub const TILES_WALL: &str = "tiles_wall";
pub const CHAIRS: &str = "chairs";
pub const OFFICE: &str = "office";
pub const GENERIC: &str = "generic";
pub const BASEMENT: &str = "basement";
pub const ADAM: &str = "adam";

/// Image file for each texture key, relative to the assets directory.
pub const TEXTURE_FILES: [(&str, &str); 6] = [
    (TILES_WALL, "map/FloorAndGround.png"),
    (CHAIRS, "items/chair.png"),
    (OFFICE, "tileset/Modern_Office_Black_Shadow.png"),
    (GENERIC, "tileset/Generic.png"),
    (BASEMENT, "tileset/Basement.png"),
    (ADAM, "character/adam.png"),
];

pub fn texture_file(key: &str) -> Option<&'static str> {
    TEXTURE_FILES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, path)| *path)
}
