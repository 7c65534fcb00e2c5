//! Static map props.
//!
//! [`StaticBody`] marks a non-moving collidable object instantiated from an
//! object layer of the map. It has no individual lifecycle: it lives until
//! the scene is torn down. [`Chair`] is the one specialization, carrying the
//! facing direction read from the placed object's first custom property.

use bevy_ecs::prelude::Component;

/// Non-moving body spawned from a placed map object.
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct StaticBody {
    /// Object id in the map document.
    pub object_id: u32,
    /// Global tile reference the body was created from.
    pub gid: u32,
}

/// Seat prop. `facing` is fixed when the chair is spawned.
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct Chair {
    facing: String,
}

impl Chair {
    pub fn new(facing: impl Into<String>) -> Self {
        Self {
            facing: facing.into(),
        }
    }

    pub fn facing(&self) -> &str {
        &self.facing
    }
}
