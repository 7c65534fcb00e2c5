use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::sprite::Sprite;
use crate::components::zindex::ZIndex;
use crate::resources::camera2d::Camera2DRes;
use crate::resources::debugmode::DebugMode;
use crate::resources::groundlayer::GroundLayer;
use crate::resources::input::InputState;
use crate::resources::screensize::ScreenSize;
use crate::resources::texturestore::TextureStore;

/// We render inside raylib's drawing scopes and query the ECS World.
/// For culling we compute the world-rect visible by the camera using
/// screen_to_world on the screen corners and then do AABB intersection.
pub fn render_pass(world: &mut World, d2: &mut RaylibMode2D<RaylibDrawHandle>) {
    let cam = world.resource::<Camera2DRes>().0;
    let screen = *world.resource::<ScreenSize>();

    let tl = d2.get_screen_to_world2D(Vector2 { x: 0.0, y: 0.0 }, cam);
    let br = d2.get_screen_to_world2D(
        Vector2 {
            x: screen.w as f32,
            y: screen.h as f32,
        },
        cam,
    );
    let view_min = Vector2 {
        x: tl.x.min(br.x),
        y: tl.y.min(br.y),
    };
    let view_max = Vector2 {
        x: tl.x.max(br.x),
        y: tl.y.max(br.y),
    };

    let mut to_draw: Vec<(Sprite, MapPosition, ZIndex)> = {
        let mut q = world.query::<(&Sprite, &MapPosition, &ZIndex)>();
        q.iter(world)
            .filter(|(s, p, _)| {
                // MapPosition is the sprite pivot
                let min = p.pos - s.origin;
                let max = Vector2 {
                    x: min.x + s.width,
                    y: min.y + s.height,
                };
                !(max.x < view_min.x
                    || min.x > view_max.x
                    || max.y < view_min.y
                    || min.y > view_max.y)
            })
            .map(|(s, p, z)| (s.clone(), *p, *z))
            .collect()
    };

    to_draw.sort_by(|(_, _, a), (_, _, b)| a.cmp_depth(b));

    let textures = world.get_resource::<TextureStore>();
    for (sprite, pos, _z) in to_draw.iter() {
        match textures.and_then(|t| t.get(&sprite.tex_key)) {
            Some((tex, layout)) => {
                let src = layout.frame_rect(sprite.frame);
                let dest = Rectangle {
                    x: pos.pos.x,
                    y: pos.pos.y,
                    width: sprite.width,
                    height: sprite.height,
                };
                d2.draw_texture_pro(tex, src, dest, sprite.origin, 0.0, Color::WHITE);
            }
            // texture failed to load: outline where the sprite would be
            None => {
                let min = pos.pos - sprite.origin;
                d2.draw_rectangle_lines(
                    min.x as i32,
                    min.y as i32,
                    sprite.width as i32,
                    sprite.height as i32,
                    Color::LIGHTGRAY,
                );
            }
        }
    }

    if world.contains_resource::<DebugMode>() {
        if let Some(ground) = world.get_resource::<GroundLayer>() {
            for row in 0..ground.height as i64 {
                for col in 0..ground.width as i64 {
                    if ground.is_solid(col, row) {
                        let (min, _) = ground.cell_rect(col, row);
                        d2.draw_rectangle_lines(
                            min.x as i32,
                            min.y as i32,
                            ground.tile_width as i32,
                            ground.tile_height as i32,
                            Color::ORANGE,
                        );
                    }
                }
            }
        }
        let mut colliders = world.query::<(&BoxCollider, &MapPosition)>();
        for (collider, position) in colliders.iter(world) {
            let (x, y, w, h) = collider.get_aabb(position.pos);
            d2.draw_rectangle_lines(x as i32, y as i32, w as i32, h as i32, Color::RED);
        }
        let mut positions = world.query::<&MapPosition>();
        for position in positions.iter(world) {
            // small cross on the pivot
            let (x, y) = (position.pos.x as i32, position.pos.y as i32);
            d2.draw_line(x - 5, y, x + 5, y, Color::GREEN);
            d2.draw_line(x, y - 5, x, y + 5, Color::GREEN);
        }
    }
}

pub fn render_debug_ui(world: &mut World, d: &mut RaylibDrawHandle) {
    if !world.contains_resource::<DebugMode>() {
        return;
    }
    let screen = *world.resource::<ScreenSize>();

    let fps = d.get_fps();
    let text = format!("DEBUG MODE (press F11 to toggle) | FPS: {}", fps);
    d.draw_text(&text, 10, 10, 10, Color::WHITE);

    let positioned = world.query::<&MapPosition>().iter(world).count();
    d.draw_text(&format!("Entities: {}", positioned), 10, 30, 10, Color::WHITE);

    let focus = world
        .get_resource::<InputState>()
        .map(|i| format!("{:?}", i.focus()))
        .unwrap_or_else(|| "no keys".to_string());
    d.draw_text(&format!("Keyboard: {}", focus), 10, 50, 10, Color::WHITE);

    let cam = world.resource::<Camera2DRes>().0;
    let cam_text = format!(
        "Camera pos: ({:.1}, {:.1}) Zoom: {:.2}",
        cam.target.x, cam.target.y, cam.zoom
    );
    d.draw_text(&cam_text, 10, screen.h - 30, 10, Color::WHITE);

    let mouse_pos = d.get_mouse_position();
    let mouse_world = d.get_screen_to_world2D(mouse_pos, cam);
    let mouse_text = format!(
        "Mouse screen: ({:.1}, {:.1}) World: ({:.1}, {:.1})",
        mouse_pos.x, mouse_pos.y, mouse_world.x, mouse_world.y
    );
    d.draw_text(&mouse_text, 10, 70, 10, Color::WHITE);
}
