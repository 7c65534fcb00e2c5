//! Body integration and depth sorting.
use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::zindex::ZIndex;
use crate::resources::worldtime::WorldTime;

/// Move every unfrozen body by `velocity * delta`.
pub fn movement(mut query: Query<(&mut MapPosition, &RigidBody)>, time: Res<WorldTime>) {
    for (mut position, rigidbody) in query.iter_mut() {
        if rigidbody.frozen {
            continue;
        }
        let delta = rigidbody.velocity * time.delta;
        position.pos += delta;
    }
}

/// Moving bodies draw in front of whatever sits above them on the map.
pub fn depth_from_y(mut query: Query<(&MapPosition, &mut ZIndex), With<RigidBody>>) {
    for (position, mut z) in query.iter_mut() {
        z.0 = position.pos.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raylib::prelude::Vector2;

    #[test]
    fn moves_and_resorts() {
        let mut world = World::new();
        world.insert_resource(WorldTime {
            delta: 0.5,
            ..Default::default()
        });
        let mut body = RigidBody::new();
        body.set_velocity(Vector2::new(10.0, -4.0));
        let e = world
            .spawn((MapPosition::new(1.0, 1.0), body, ZIndex(1.0)))
            .id();
        let mut frozen = RigidBody::new();
        frozen.set_velocity(Vector2::new(10.0, 0.0));
        frozen.freeze();
        let f = world.spawn((MapPosition::new(0.0, 0.0), frozen)).id();

        let mut schedule = Schedule::default();
        schedule.add_systems((movement, depth_from_y).chain());
        schedule.run(&mut world);

        let pos = world.get::<MapPosition>(e).unwrap().pos;
        assert_eq!((pos.x, pos.y), (6.0, -1.0));
        assert_eq!(world.get::<ZIndex>(e).unwrap().0, -1.0);
        assert_eq!(world.get::<MapPosition>(f).unwrap().pos.x, 0.0);
    }
}
