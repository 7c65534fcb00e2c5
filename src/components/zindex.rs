//! Z-index component for render ordering.
//!
//! The [`ZIndex`] component controls the drawing order of entities. Entities
//! with higher values are drawn on top of those with lower values. Map props
//! use their center Y as depth so that things lower on screen paint over
//! things higher on screen.

use std::cmp::Ordering;

use bevy_ecs::prelude::Component;

/// Rendering order hint for 2D drawing.
///
/// Higher values are drawn later (on top). The renderer sorts by
/// [`ZIndex::cmp_depth`] to achieve a painter's algorithm.
#[derive(Component, Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct ZIndex(pub f32);

impl ZIndex {
    /// Total order over depths; NaN sorts last.
    pub fn cmp_depth(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}
