//! Keeps attached entities on their targets.
//!
//! The player's overhead container carries a [`StuckTo`] pointing at the
//! player body; this system copies the body's position plus the offset onto
//! it after collisions have settled.

use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::stuckto::StuckTo;

pub fn stuck_to_entity_system(
    mut followers: Query<(&StuckTo, &mut MapPosition)>,
    targets: Query<&MapPosition, Without<StuckTo>>,
) {
    for (stuck_to, mut follower_pos) in followers.iter_mut() {
        if let Ok(target_pos) = targets.get(stuck_to.target) {
            follower_pos.pos = target_pos.pos + stuck_to.offset;
        }
    }
}
