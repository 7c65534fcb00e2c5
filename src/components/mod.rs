//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the scene.
//!
//! Submodules overview:
//! - [`animation`] – playback state for sprite animations
//! - [`boxcollider`] – axis-aligned collision footprint
//! - [`group`] – tag naming the object layer an entity was spawned from
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`player`] – the locally controlled player and its visual container
//! - [`rigidbody`] – dynamic body storing velocity
//! - [`sprite`] – 2D sprite rendering component
//! - [`staticbody`] – non-moving props spawned from map data, including chairs
//! - [`stuckto`] – make one entity follow another
//! - [`zindex`] – rendering order hint for 2D drawing

pub mod animation;
pub mod boxcollider;
pub mod group;
pub mod mapposition;
pub mod player;
pub mod rigidbody;
pub mod sprite;
pub mod staticbody;
pub mod stuckto;
pub mod zindex;
