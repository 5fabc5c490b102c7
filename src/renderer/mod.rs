//! Rendering: world state to draw calls
//!
//! Three render systems run in a fixed order (images, sprites, squares), so
//! later ones draw over earlier ones. The HUD and the optional debug overlay
//! draw on top of everything.

pub mod hud;

use glam::Vec2;

use crate::assets::AssetRegistry;
use crate::color::Color;
use crate::platform::DrawSurface;
use crate::sim::{Rect, World, contract_violation};

/// Draw every image renderable centered on its transform
pub fn draw_images(world: &World, assets: &AssetRegistry, surface: &mut dyn DrawSurface) {
    for (&id, renderable) in &world.images {
        let Some(transform) = world.transforms.get(&id) else {
            contract_violation(id, "transform");
            continue;
        };
        let Some(image) = assets.image(renderable.asset) else {
            contract_violation(id, "image asset");
            continue;
        };

        let size = Vec2::new(image.width as f32, image.height as f32);
        let scaled = size * transform.scale;
        let dest = Rect::from_pos_size(transform.position - scaled * 0.5, scaled);
        let src = Rect::from_pos_size(Vec2::ZERO, size);
        surface.draw_image(image.handle, dest, src);
    }
}

/// Draw the current cell of every sprite renderable from its transform
pub fn draw_sprites(world: &World, assets: &AssetRegistry, surface: &mut dyn DrawSurface) {
    for (&id, sprite) in &world.sprites {
        let Some(transform) = world.transforms.get(&id) else {
            contract_violation(id, "transform");
            continue;
        };
        let Some(image) = assets.image(sprite.asset) else {
            contract_violation(id, "sprite asset");
            continue;
        };

        let src = sprite.source_rect(image.width, image.height);
        let dest = Rect::from_pos_size(transform.position, src.size() * transform.scale);
        surface.draw_image(image.handle, dest, src);
    }
}

/// Fill every square renderable at its transform
pub fn draw_squares(world: &World, surface: &mut dyn DrawSurface) {
    for (&id, square) in &world.squares {
        let Some(transform) = world.transforms.get(&id) else {
            contract_violation(id, "transform");
            continue;
        };

        let rect = Rect::from_pos_size(transform.position, square.size * transform.scale);
        surface.draw_filled_rect(rect, square.color);
    }
}

/// All render systems, in draw order
pub fn draw_world(world: &World, assets: &AssetRegistry, surface: &mut dyn DrawSurface) {
    draw_images(world, assets, surface);
    draw_sprites(world, assets, surface);
    draw_squares(world, surface);
}

/// Collision box outlines plus the screen-center cross
pub fn draw_debug_overlay(world: &World, screen: Vec2, surface: &mut dyn DrawSurface) {
    let center = screen * 0.5;
    surface.draw_line(Vec2::new(center.x, 0.0), Vec2::new(center.x, screen.y), Color::RED);
    surface.draw_line(Vec2::new(0.0, center.y), Vec2::new(screen.x, center.y), Color::GREEN);

    for &id in world.collision_boxes.keys() {
        if let Some(rect) = world.hit_box(id) {
            surface.draw_rect(rect, Color::YELLOW);
        }
    }
}
