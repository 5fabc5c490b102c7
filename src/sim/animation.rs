//! Sprite animation phase
//!
//! Runs after the render systems each tick, so the frame selected at the
//! end of one tick is the one drawn on the next and a fresh sprite always
//! shows its first cell for at least one tick.

use super::world::World;

pub fn update(world: &mut World, dt: f32) {
    for sprite in world.sprites.values_mut() {
        sprite.advance(dt);
    }
}
