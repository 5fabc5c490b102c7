//! Player control: horizontal movement and firing

use super::tick::TickInput;
use super::world::{BulletOwner, BulletSpec, GameEvent, World, contract_violation};

/// Edge detector for the fire key
#[derive(Debug, Clone, Default)]
pub struct PlayerControl {
    fire_was_held: bool,
}

impl PlayerControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move every controlled entity and handle the fire trigger.
    ///
    /// Left and right are applied independently; holding both cancels out.
    /// Fire spawns a bullet only on the press edge and only while no player
    /// bullet is alive.
    pub fn update(&mut self, world: &mut World, input: &TickInput, dt: f32, bullet: BulletSpec) {
        let fire_pressed = input.fire && !self.fire_was_held;
        self.fire_was_held = input.fire;

        let controlled: Vec<_> = world.controlled.iter().copied().collect();
        for id in controlled {
            let Some(speed) = world.attributes.get(&id).map(|a| a.speed) else {
                contract_violation(id, "attributes");
                continue;
            };
            let Some(transform) = world.transforms.get_mut(&id) else {
                contract_violation(id, "transform");
                continue;
            };

            if input.left {
                transform.position.x -= speed * dt;
            }
            if input.right {
                transform.position.x += speed * dt;
            }

            if fire_pressed && world.player_bullets.is_empty() {
                let origin = transform.position;
                world.spawn_bullet(
                    origin,
                    BulletSpec {
                        owner: BulletOwner::Player,
                        ..bullet
                    },
                );
                world.push_event(GameEvent::PlayerFired);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::color::Color;
    use crate::sim::components::Attributes;
    use crate::sim::geometry::Transform;

    fn setup() -> (World, crate::sim::EntityId) {
        let mut world = World::new();
        let id = world.create_entity();
        world.transforms.insert(id, Transform::at(Vec2::new(100.0, 200.0)));
        world.attributes.insert(
            id,
            Attributes {
                speed: 50.0,
                health: 3,
            },
        );
        world.controlled.insert(id);
        world.player = Some(id);
        (world, id)
    }

    fn bullet() -> BulletSpec {
        BulletSpec {
            owner: BulletOwner::Player,
            speed: -100.0,
            size: Vec2::new(1.0, 5.0),
            color: Color::WHITE,
        }
    }

    fn input(left: bool, right: bool, fire: bool) -> TickInput {
        TickInput { left, right, fire }
    }

    #[test]
    fn test_move_left_and_right() {
        let (mut world, id) = setup();
        let mut control = PlayerControl::new();

        control.update(&mut world, &input(true, false, false), 0.5, bullet());
        assert!((world.transforms[&id].position.x - 75.0).abs() < 1e-4);

        control.update(&mut world, &input(false, true, false), 1.0, bullet());
        assert!((world.transforms[&id].position.x - 125.0).abs() < 1e-4);
    }

    #[test]
    fn test_both_keys_cancel() {
        let (mut world, id) = setup();
        let mut control = PlayerControl::new();
        control.update(&mut world, &input(true, true, false), 0.3, bullet());
        assert!((world.transforms[&id].position.x - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_fire_spawns_upward_bullet_at_player() {
        let (mut world, _) = setup();
        let mut control = PlayerControl::new();
        control.update(&mut world, &input(false, false, true), 0.016, bullet());

        assert_eq!(world.player_bullets.len(), 1);
        let b = *world.player_bullets.iter().next().unwrap();
        assert_eq!(world.transforms[&b].position, Vec2::new(100.0, 200.0));
        assert!(world.attributes[&b].speed < 0.0);
        assert!(world.bullets.contains(&b));
        assert_eq!(world.events, vec![GameEvent::PlayerFired]);
    }

    #[test]
    fn test_bullet_cap() {
        let (mut world, _) = setup();
        let mut control = PlayerControl::new();

        control.update(&mut world, &input(false, false, true), 0.016, bullet());
        control.update(&mut world, &input(false, false, false), 0.016, bullet());
        // Second press while the first bullet lives
        control.update(&mut world, &input(false, false, true), 0.016, bullet());
        assert_eq!(world.player_bullets.len(), 1);

        // Bullet gone: firing works again
        let b = *world.player_bullets.iter().next().unwrap();
        world.destroy(b);
        control.update(&mut world, &input(false, false, false), 0.016, bullet());
        control.update(&mut world, &input(false, false, true), 0.016, bullet());
        assert_eq!(world.player_bullets.len(), 1);
        assert!(!world.player_bullets.contains(&b));
    }

    #[test]
    fn test_holding_fire_does_not_refire() {
        let (mut world, _) = setup();
        let mut control = PlayerControl::new();

        control.update(&mut world, &input(false, false, true), 0.016, bullet());
        let b = *world.player_bullets.iter().next().unwrap();
        world.destroy(b);

        control.update(&mut world, &input(false, false, true), 0.016, bullet());
        assert!(world.player_bullets.is_empty());
    }
}
