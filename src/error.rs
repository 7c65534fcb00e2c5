//! Scene build errors.
//!
//! Every failure the scene can report is a precondition or data-integrity
//! violation: the map is authored offline and the keyboard is an environment
//! precondition, so none of these are retried or patched over. A build that
//! hits one aborts and leaves no partial scene behind.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("no keyboard input device available")]
    KeyboardUnavailable,
    #[error("no map loaded under key '{0}'")]
    MapNotLoaded(String),
    #[error("failed to read map file {path}: {source}")]
    MapIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse map document: {0}")]
    MapParse(#[from] serde_json::Error),
    #[error("map has no tile layer named '{0}'")]
    MissingTileLayer(String),
    #[error("map has no object layer named '{0}'")]
    MissingObjectLayer(String),
    #[error("map tile size {width}x{height} has a zero side")]
    ZeroTileSize { width: u32, height: u32 },
    #[error("map has no tileset named '{0}'")]
    MissingTileset(String),
    #[error("object {object_id} in layer '{layer}' has no usable '{field}'")]
    InvalidObject {
        layer: String,
        object_id: u32,
        field: &'static str,
    },
    #[error("object {object_id} in layer '{layer}' has no custom properties")]
    MissingProperty { layer: String, object_id: u32 },
    #[error("gid {gid} is below first gid {first_gid} of tileset '{tileset}'")]
    GidOutOfRange {
        tileset: String,
        gid: u32,
        first_gid: u32,
    },
    #[error("entity {0} has no physics body after creation")]
    MissingBody(String),
    #[error("build step '{0}' needs the player, but it has not been spawned")]
    PlayerNotSpawned(&'static str),
    #[error("the player has already been spawned")]
    PlayerAlreadySpawned,
}

pub type SceneResult<T> = Result<T, SceneError>;
