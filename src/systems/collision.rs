//! Collision resolution for registered pairs.
//!
//! Only what the scene registered in [`ColliderRegistry`] collides. Moving
//! bodies are pushed out of overlapping static bodies of a registered group
//! and out of the solid cells of a registered ground layer, along the
//! shallowest axis. Static bodies never move.

use bevy_ecs::prelude::*;
use log::trace;
use raylib::prelude::Vector2;

use crate::components::boxcollider::BoxCollider;
use crate::components::group::Group;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::resources::colliders::{ColliderRegistry, ColliderTarget};
use crate::resources::groundlayer::GroundLayer;

pub fn resolve_collisions(
    registry: Option<Res<ColliderRegistry>>,
    ground: Option<Res<GroundLayer>>,
    mut bodies: Query<(Entity, &mut MapPosition, &BoxCollider), With<RigidBody>>,
    statics: Query<(&Group, &MapPosition, &BoxCollider), Without<RigidBody>>,
) {
    let Some(registry) = registry else {
        return;
    };
    for (entity, mut position, collider) in bodies.iter_mut() {
        for target in registry.targets_of(entity) {
            match target {
                ColliderTarget::Group(name) => {
                    for (group, static_pos, static_box) in statics.iter() {
                        if group.name() != name.as_str() {
                            continue;
                        }
                        let (min, max) = static_box.aabb(static_pos.pos);
                        if let Some(push) = collider.separation(position.pos, min, max) {
                            trace!(
                                "{:?} pushed out of '{}' by ({}, {})",
                                entity, name, push.x, push.y
                            );
                            position.pos += push;
                        }
                    }
                }
                ColliderTarget::TileLayer(name) => {
                    let Some(ground) = ground.as_deref().filter(|g| &g.name == name) else {
                        continue;
                    };
                    let (min, max) = collider.aabb(position.pos);
                    for (col, row) in ground.solid_cells_in(min, max) {
                        let (cell_min, cell_max) = ground.cell_rect(col, row);
                        let Some((dx, dy)) =
                            collider.overlap_pushes(position.pos, cell_min, cell_max)
                        else {
                            continue;
                        };
                        // never push into a neighbouring solid cell
                        let x_open = !ground.is_solid(col + dx.signum() as i64, row);
                        let y_open = !ground.is_solid(col, row + dy.signum() as i64);
                        let push = match (x_open, y_open) {
                            (true, true) if dx.abs() < dy.abs() => Vector2::new(dx, 0.0),
                            (_, true) => Vector2::new(0.0, dy),
                            (true, false) => Vector2::new(dx, 0.0),
                            (false, false) => continue,
                        };
                        position.pos += push;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn run(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(resolve_collisions);
        schedule.run(world);
    }

    #[test]
    fn registered_group_blocks_body() {
        let mut world = World::new();
        let body = world
            .spawn((
                MapPosition::new(0.0, 0.0),
                BoxCollider::centered(10.0, 10.0),
                RigidBody::new(),
            ))
            .id();
        world.spawn((
            Group::new("Wall"),
            MapPosition::new(12.0, 0.0),
            BoxCollider::centered(20.0, 40.0),
        ));
        world.spawn((
            Group::new("Objects"),
            MapPosition::new(0.0, 0.0),
            BoxCollider::centered(4.0, 4.0),
        ));
        let mut reg = ColliderRegistry::new();
        reg.add(&[body], ColliderTarget::Group("Wall".into()));
        world.insert_resource(reg);

        run(&mut world);

        // wall spans x 2..22, body 5 wide to the right of center: pushed 3 left
        let pos = world.get::<MapPosition>(body).unwrap().pos;
        assert!(approx_eq(pos.x, -3.0));
        assert!(approx_eq(pos.y, 0.0));
    }

    #[test]
    fn unregistered_body_passes_through() {
        let mut world = World::new();
        let body = world
            .spawn((
                MapPosition::new(0.0, 0.0),
                BoxCollider::centered(10.0, 10.0),
                RigidBody::new(),
            ))
            .id();
        world.spawn((
            Group::new("Wall"),
            MapPosition::new(2.0, 0.0),
            BoxCollider::centered(10.0, 10.0),
        ));
        world.insert_resource(ColliderRegistry::new());
        run(&mut world);
        assert_eq!(world.get::<MapPosition>(body).unwrap().pos.x, 0.0);
    }

    #[test]
    fn solid_ground_cell_blocks_body() {
        let mut world = World::new();
        let body = world
            .spawn((
                MapPosition::new(16.0, 30.0),
                BoxCollider::centered(8.0, 8.0),
                RigidBody::new(),
            ))
            .id();
        world.insert_resource(GroundLayer {
            name: "Ground".into(),
            width: 1,
            height: 2,
            tile_width: 32.0,
            tile_height: 32.0,
            solid: vec![false, true],
        });
        let mut reg = ColliderRegistry::new();
        reg.add(&[body], ColliderTarget::TileLayer("Ground".into()));
        world.insert_resource(reg);

        run(&mut world);

        // bottom edge was at 34, cell (0, 1) starts at 32
        let pos = world.get::<MapPosition>(body).unwrap().pos;
        assert!(approx_eq(pos.y, 28.0));
        assert!(approx_eq(pos.x, 16.0));
    }

    #[test]
    fn straddling_two_wall_cells_pushes_off_the_wall() {
        let mut world = World::new();
        // footprint x 152..168 spans cells 4 and 5 of a solid top row
        let body = world
            .spawn((
                MapPosition::new(160.0, 20.0),
                BoxCollider::centered(16.0, 10.0),
                RigidBody::new(),
            ))
            .id();
        let mut solid = vec![true; 10];
        solid.extend(vec![false; 10]);
        world.insert_resource(GroundLayer {
            name: "Ground".into(),
            width: 10,
            height: 2,
            tile_width: 32.0,
            tile_height: 32.0,
            solid,
        });
        let mut reg = ColliderRegistry::new();
        reg.add(&[body], ColliderTarget::TileLayer("Ground".into()));
        world.insert_resource(reg);

        run(&mut world);

        let pos = world.get::<MapPosition>(body).unwrap().pos;
        assert!(approx_eq(pos.x, 160.0));
        assert!(approx_eq(pos.y, 37.0));
    }
}
