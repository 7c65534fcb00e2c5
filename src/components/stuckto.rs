//! Component for attaching an entity's position to another entity.
//!
//! The player's visual container uses [`StuckTo`] to ride along with the
//! player body, optionally with an offset (the name label sits above the head).

use bevy_ecs::prelude::{Component, Entity};
use raylib::prelude::Vector2;

/// Component that makes an entity follow another entity's position.
///
/// The `stuck_to_entity_system` updates this entity's `MapPosition` to match
/// the target's position plus the offset.
#[derive(Debug, Clone, Component)]
pub struct StuckTo {
    /// The entity to follow.
    pub target: Entity,
    /// Offset from the target's position.
    pub offset: Vector2,
}

impl StuckTo {
    pub fn new(target: Entity) -> Self {
        Self {
            target,
            offset: Vector2::zero(),
        }
    }

    /// Set the offset from the target's position.
    pub fn with_offset(mut self, offset: Vector2) -> Self {
        self.offset = offset;
        self
    }
}
