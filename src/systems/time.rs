//! Clock update.
//!
//! Advances the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! once per frame, applying `time_scale` to the raw frame delta.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Advance `WorldTime` by the unscaled frame delta `dt` (seconds).
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.get_resource_or_init::<WorldTime>();
    let scaled_dt = dt * wt.time_scale;
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_delta() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_time_scale(0.5));
        update_world_time(&mut world, 0.2);
        update_world_time(&mut world, 0.2);
        let wt = world.resource::<WorldTime>();
        assert!((wt.delta - 0.1).abs() < 1e-6);
        assert!((wt.elapsed - 0.2).abs() < 1e-6);
    }
}
