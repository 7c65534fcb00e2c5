//! Locally controlled player components.
//!
//! - [`Player`] – the one entity driven by this client's keyboard
//! - [`PlayerContainer`] – the visual container (name label) that follows it
//! - [`Facing`] – last direction the player moved in

use bevy_ecs::prelude::{Component, Entity};

/// Cardinal direction used for animation keys and chair orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Facing::Up => "up",
            Facing::Down => "down",
            Facing::Left => "left",
            Facing::Right => "right",
        }
    }
}

/// The locally controlled player.
#[derive(Component, Clone, Debug)]
pub struct Player {
    /// Session identifier for this player.
    pub id: String,
    /// Texture key of the character sheet; also the animation key prefix.
    pub texture_key: String,
    /// Movement speed in world units per second.
    pub speed: f32,
    pub facing: Facing,
    /// Separate entity drawn with the player (name label).
    pub container: Option<Entity>,
}

/// Marker for the player's visual container.
#[derive(Component, Clone, Debug)]
pub struct PlayerContainer {
    pub label: String,
}
