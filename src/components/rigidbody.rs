//! Dynamic body component.
//!
//! The [`RigidBody`] component marks an entity as moved by the simulation and
//! stores its velocity. Entities without it never move on their own; static
//! map props use [`StaticBody`](super::staticbody::StaticBody) instead.
//!
//! The `frozen` flag allows temporarily disabling all movement calculations,
//! useful when an entity's position is controlled externally.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Kinematic body storing velocity.
///
/// Updated by the player controller and consumed by the movement system to
/// update [`MapPosition`](super::mapposition::MapPosition).
#[derive(Component, Clone, Debug)]
pub struct RigidBody {
    /// Current velocity in world units per second.
    pub velocity: Vector2,
    /// Optional maximum speed. If set, velocity magnitude is clamped to this value.
    pub max_speed: Option<f32>,
    /// When true, the movement system skips this entity.
    pub frozen: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a RigidBody with zero velocity.
    pub fn new() -> Self {
        Self {
            velocity: Vector2 { x: 0.0, y: 0.0 },
            max_speed: None,
            frozen: false,
        }
    }

    /// Create a RigidBody whose speed never exceeds `max_speed`.
    pub fn with_max_speed(max_speed: f32) -> Self {
        Self {
            max_speed: Some(max_speed),
            ..Self::new()
        }
    }

    /// Set the velocity, clamping it to `max_speed` when one is configured.
    pub fn set_velocity(&mut self, velocity: Vector2) {
        self.velocity = match self.max_speed {
            Some(max) if velocity.length() > max => velocity.normalized() * max,
            _ => velocity,
        };
    }

    /// Stop immediately.
    pub fn stop(&mut self) {
        self.velocity = Vector2 { x: 0.0, y: 0.0 };
    }

    /// Freeze the rigid body, preventing movement system from updating it.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Unfreeze the rigid body, allowing movement system to update it.
    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }
}
