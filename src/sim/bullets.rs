//! Bullet motion and off-screen cleanup

use super::world::{World, contract_violation};

/// Move every bullet vertically by its speed and destroy the ones that leave
/// `[0, height)`.
pub fn update(world: &mut World, dt: f32, height: f32) {
    let mut expired = Vec::new();

    for &id in &world.bullets {
        let Some(speed) = world.attributes.get(&id).map(|a| a.speed) else {
            contract_violation(id, "attributes");
            continue;
        };
        let Some(transform) = world.transforms.get_mut(&id) else {
            contract_violation(id, "transform");
            continue;
        };

        transform.position.y += speed * dt;
        let y = transform.position.y;
        if y < 0.0 || y >= height {
            expired.push(id);
        }
    }

    for id in expired {
        world.destroy(id);
    }
}
