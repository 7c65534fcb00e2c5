//! Axis-aligned collision footprint.
//!
//! A [`BoxCollider`] is the box used for collision detection, kept distinct
//! from the drawn sprite bounds. `offset` is measured from the entity's
//! [`MapPosition`](super::mapposition::MapPosition) to the box's top-left.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vector2,
    pub offset: Vector2,
}

impl BoxCollider {
    /// Create a BoxCollider with given size and its top-left at the entity position.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vector2::new(width, height),
            offset: Vector2::zero(),
        }
    }

    /// Box of the given size centered on the entity position.
    pub fn centered(width: f32, height: f32) -> Self {
        Self {
            size: Vector2::new(width, height),
            offset: Vector2::new(-width * 0.5, -height * 0.5),
        }
    }

    /// Reduced footprint for a center-pivoted sprite.
    ///
    /// The box is `scale` times the sprite size, centered horizontally and
    /// resting on the sprite's bottom edge.
    pub fn footprint(sprite_width: f32, sprite_height: f32, scale: Vector2) -> Self {
        let size = Vector2::new(sprite_width * scale.x, sprite_height * scale.y);
        // Offset from the sprite's top-left, then shifted to the center pivot.
        let from_top_left = Vector2::new(
            sprite_width * (1.0 - scale.x) * 0.5,
            sprite_height * (1.0 - scale.y),
        );
        Self {
            size,
            offset: Vector2::new(
                from_top_left.x - sprite_width * 0.5,
                from_top_left.y - sprite_height * 0.5,
            ),
        }
    }

    /// Modify BoxCollider with given offset
    pub fn with_offset(mut self, offset: Vector2) -> Self {
        self.offset = offset;
        self
    }

    /// Returns (min, max) of the collider AABB for a given entity position.
    /// Handles negative size by normalizing to proper min/max.
    pub fn aabb(&self, position: Vector2) -> (Vector2, Vector2) {
        let p0 = position + self.offset;
        let p1 = p0 + self.size;
        let min = Vector2::new(p0.x.min(p1.x), p0.y.min(p1.y));
        let max = Vector2::new(p0.x.max(p1.x), p0.y.max(p1.y));
        (min, max)
    }

    pub fn get_aabb(&self, position: Vector2) -> (f32, f32, f32, f32) {
        let (min, max) = self.aabb(position);
        (min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// AABB vs AABB overlap test against another BoxCollider at a different entity position.
    pub fn overlaps(&self, position: Vector2, other: &Self, other_position: Vector2) -> bool {
        let (min_a, max_a) = self.aabb(position);
        let (min_b, max_b) = other.aabb(other_position);
        overlaps_rect(min_a, max_a, min_b, max_b)
    }

    /// Smallest translation that moves this box out of the `(min, max)` rectangle.
    ///
    /// Returns `None` when they do not overlap. The push is along a single
    /// axis, whichever needs the shorter move.
    /// Smallest push out of `(min_b, max_b)` on each axis, `(dx, dy)`, if overlapping.
    pub fn overlap_pushes(
        &self,
        position: Vector2,
        min_b: Vector2,
        max_b: Vector2,
    ) -> Option<(f32, f32)> {
        let (min_a, max_a) = self.aabb(position);
        if !overlaps_rect(min_a, max_a, min_b, max_b) {
            return None;
        }
        let push_left = max_a.x - min_b.x;
        let push_right = max_b.x - min_a.x;
        let push_up = max_a.y - min_b.y;
        let push_down = max_b.y - min_a.y;

        let dx = if push_left < push_right { -push_left } else { push_right };
        let dy = if push_up < push_down { -push_up } else { push_down };
        Some((dx, dy))
    }

    /// Push along the shallower axis that separates this box from `(min_b, max_b)`.
    pub fn separation(&self, position: Vector2, min_b: Vector2, max_b: Vector2) -> Option<Vector2> {
        let (dx, dy) = self.overlap_pushes(position, min_b, max_b)?;
        if dx.abs() < dy.abs() {
            Some(Vector2::new(dx, 0.0))
        } else {
            Some(Vector2::new(0.0, dy))
        }
    }
}

fn overlaps_rect(min_a: Vector2, max_a: Vector2, min_b: Vector2, max_b: Vector2) -> bool {
    min_a.x < max_b.x && max_a.x > min_b.x && min_a.y < max_b.y && max_a.y > min_b.y
}
