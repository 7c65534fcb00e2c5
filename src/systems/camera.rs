//! Camera follow.
use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::resources::camera2d::{Camera2DRes, CameraFollow};

/// Keep the camera target on the followed entity.
pub fn camera_follow(
    follow: Option<Res<CameraFollow>>,
    camera: Option<ResMut<Camera2DRes>>,
    positions: Query<&MapPosition>,
) {
    let (Some(follow), Some(mut camera)) = (follow, camera) else {
        return;
    };
    if let Ok(position) = positions.get(follow.target) {
        let mut target = position.pos;
        if follow.round_pixels {
            target.x = target.x.round();
            target.y = target.y.round();
        }
        camera.0.target = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snaps_to_rounded_position() {
        let mut world = World::new();
        let e = world.spawn(MapPosition::new(10.4, 20.6)).id();
        world.insert_resource(Camera2DRes::for_viewport(100.0, 100.0));
        world.insert_resource(CameraFollow {
            target: e,
            round_pixels: true,
        });

        let mut schedule = Schedule::default();
        schedule.add_systems(camera_follow);
        schedule.run(&mut world);

        let cam = world.resource::<Camera2DRes>().0;
        assert_eq!((cam.target.x, cam.target.y), (10.0, 21.0));
    }
}
