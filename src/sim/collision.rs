//! Bullet collision resolution
//!
//! Player bullets hit invaders, enemy bullets hit the player. Both systems
//! collect every hit first and apply the results afterwards, so iteration
//! never observes a half-updated world.

use std::collections::BTreeSet;

use super::entity::EntityId;
use super::geometry::Rect;
use super::world::{GameEvent, World, contract_violation};

/// Hit box of a bullet. Every bullet is spawned with one, so a missing box
/// is a contract violation rather than a miss.
fn bullet_box(world: &World, bullet: EntityId) -> Option<Rect> {
    if !world.collision_boxes.contains_key(&bullet) {
        contract_violation(bullet, "collision box");
        return None;
    }
    world.hit_box(bullet)
}

/// Resolve player bullets against invaders.
///
/// Every bullet is checked against every live invader. Each bullet destroys
/// at most one invader and each invader is claimed by at most one bullet per
/// tick; a bullet whose only targets are already claimed keeps flying.
pub fn resolve_player_bullets(world: &mut World, reward: u64) {
    let mut claimed = BTreeSet::new();
    let mut hits = Vec::new();

    for &bullet in &world.player_bullets {
        let Some(bullet_box) = bullet_box(world, bullet) else {
            continue;
        };

        let target = world.invaders.iter().copied().find(|invader| {
            !claimed.contains(invader)
                && world
                    .hit_box(*invader)
                    .is_some_and(|invader_box| bullet_box.overlaps(&invader_box))
        });

        if let Some(invader) = target {
            claimed.insert(invader);
            hits.push((bullet, invader));
        }
    }

    for (bullet, invader) in hits {
        world.destroy(bullet);
        destroy_invader(world, invader, reward);
    }
}

/// Remove an invader and award the score for it.
///
/// Returns false (and awards nothing) if the invader was already gone.
pub fn destroy_invader(world: &mut World, invader: EntityId, reward: u64) -> bool {
    if !world.invaders.contains(&invader) {
        return false;
    }

    world.destroy(invader);
    world.score += reward;
    world.push_event(GameEvent::InvaderDestroyed { invader, reward });
    log::info!(
        "Invader {} destroyed (+{}), score {}, {} left",
        invader,
        reward,
        world.score,
        world.invaders.len()
    );
    true
}

/// Resolve enemy bullets against the player.
///
/// All overlapping bullets are consumed in the same tick, one point of damage
/// each. Health stops at zero.
pub fn resolve_enemy_bullets(world: &mut World) {
    let Some(player) = world.player else {
        return;
    };
    let Some(player_box) = world.hit_box(player) else {
        return;
    };

    let hits: Vec<EntityId> = world
        .enemy_bullets
        .iter()
        .copied()
        .filter(|&bullet| {
            bullet_box(world, bullet).is_some_and(|rect| rect.overlaps(&player_box))
        })
        .collect();

    for bullet in hits {
        world.destroy(bullet);

        let Some(attrs) = world.attributes.get_mut(&player) else {
            contract_violation(player, "attributes");
            continue;
        };
        let was_alive = attrs.health > 0;
        let health = attrs.take_damage(1);

        world.push_event(GameEvent::PlayerHit { health });
        log::info!("Player hit, health {}", health);
        if was_alive && health == 0 {
            world.push_event(GameEvent::PlayerDefeated);
            log::info!("Player defeated with score {}", world.score);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::color::Color;
    use crate::sim::components::{Attributes, CollisionBox};
    use crate::sim::geometry::Transform;
    use crate::sim::world::{BulletOwner, BulletSpec};

    fn shot(owner: BulletOwner) -> BulletSpec {
        BulletSpec {
            owner,
            speed: 0.0,
            size: Vec2::new(1.0, 5.0),
            color: Color::WHITE,
        }
    }

    fn spawn_invader(world: &mut World, pos: Vec2) -> EntityId {
        let id = world.create_entity();
        world.transforms.insert(id, Transform::at(pos));
        world
            .collision_boxes
            .insert(id, CollisionBox::new(Vec2::new(10.0, 8.0), Vec2::ZERO));
        world.invaders.insert(id);
        id
    }

    fn spawn_player(world: &mut World, pos: Vec2, health: u32) -> EntityId {
        let id = world.create_entity();
        world.transforms.insert(id, Transform::at(pos));
        world.attributes.insert(id, Attributes { speed: 0.0, health });
        world
            .collision_boxes
            .insert(id, CollisionBox::centered(Vec2::new(16.0, 8.0)));
        world.player = Some(id);
        id
    }

    #[test]
    fn test_player_bullet_destroys_invader() {
        let mut world = World::new();
        let invader = spawn_invader(&mut world, Vec2::new(50.0, 50.0));
        let other = spawn_invader(&mut world, Vec2::new(150.0, 50.0));
        let bullet = world.spawn_bullet(Vec2::new(55.0, 55.0), shot(BulletOwner::Player));

        resolve_player_bullets(&mut world, 25);

        assert!(!world.is_alive(bullet));
        assert!(!world.is_alive(invader));
        assert!(world.invaders.contains(&other));
        assert_eq!(world.score, 25);
        assert_eq!(
            world.events,
            vec![GameEvent::InvaderDestroyed { invader, reward: 25 }]
        );
    }

    #[test]
    #[should_panic(expected = "missing its collision box")]
    fn test_player_bullet_without_box_panics_in_debug() {
        let mut world = World::new();
        spawn_invader(&mut world, Vec2::new(50.0, 50.0));
        let bullet = world.spawn_bullet(Vec2::new(55.0, 55.0), shot(BulletOwner::Player));
        world.collision_boxes.remove(&bullet);

        resolve_player_bullets(&mut world, 25);
    }

    #[test]
    #[should_panic(expected = "missing its collision box")]
    fn test_enemy_bullet_without_box_panics_in_debug() {
        let mut world = World::new();
        spawn_player(&mut world, Vec2::new(100.0, 200.0), 3);
        let bullet = world.spawn_bullet(Vec2::new(100.0, 198.0), shot(BulletOwner::Enemy));
        world.collision_boxes.remove(&bullet);

        resolve_enemy_bullets(&mut world);
    }

    #[test]
    fn test_miss_leaves_everything() {
        let mut world = World::new();
        spawn_invader(&mut world, Vec2::new(50.0, 50.0));
        let bullet = world.spawn_bullet(Vec2::new(100.0, 100.0), shot(BulletOwner::Player));

        resolve_player_bullets(&mut world, 25);

        assert!(world.is_alive(bullet));
        assert_eq!(world.invaders.len(), 1);
        assert_eq!(world.score, 0);
    }

    #[test]
    fn test_enemy_bullets_ignore_invaders() {
        let mut world = World::new();
        spawn_invader(&mut world, Vec2::new(50.0, 50.0));
        let bullet = world.spawn_bullet(Vec2::new(55.0, 55.0), shot(BulletOwner::Enemy));

        resolve_player_bullets(&mut world, 25);

        assert!(world.is_alive(bullet));
        assert_eq!(world.invaders.len(), 1);
    }

    #[test]
    fn test_simultaneous_hits_all_resolve() {
        let mut world = World::new();
        spawn_invader(&mut world, Vec2::new(50.0, 50.0));
        spawn_invader(&mut world, Vec2::new(150.0, 50.0));
        world.spawn_bullet(Vec2::new(52.0, 52.0), shot(BulletOwner::Player));
        world.spawn_bullet(Vec2::new(152.0, 52.0), shot(BulletOwner::Player));

        resolve_player_bullets(&mut world, 25);

        assert!(world.invaders.is_empty());
        assert!(world.player_bullets.is_empty());
        assert_eq!(world.score, 50);
    }

    #[test]
    fn test_two_bullets_one_invader_scores_once() {
        let mut world = World::new();
        let invader = spawn_invader(&mut world, Vec2::new(50.0, 50.0));
        let first = world.spawn_bullet(Vec2::new(52.0, 52.0), shot(BulletOwner::Player));
        let second = world.spawn_bullet(Vec2::new(54.0, 52.0), shot(BulletOwner::Player));

        resolve_player_bullets(&mut world, 25);

        assert!(!world.is_alive(invader));
        assert!(!world.is_alive(first));
        // Target already claimed: the second bullet flies on
        assert!(world.is_alive(second));
        assert_eq!(world.score, 25);
    }

    #[test]
    fn test_destroy_invader_twice_awards_once() {
        let mut world = World::new();
        let invader = spawn_invader(&mut world, Vec2::new(50.0, 50.0));

        assert!(destroy_invader(&mut world, invader, 25));
        assert!(!destroy_invader(&mut world, invader, 25));
        assert_eq!(world.score, 25);
    }

    #[test]
    fn test_enemy_bullet_damages_player() {
        let mut world = World::new();
        spawn_player(&mut world, Vec2::new(100.0, 200.0), 3);
        let bullet = world.spawn_bullet(Vec2::new(100.0, 198.0), shot(BulletOwner::Enemy));

        resolve_enemy_bullets(&mut world);

        assert!(!world.is_alive(bullet));
        assert_eq!(world.player_health(), 2);
        assert_eq!(world.events, vec![GameEvent::PlayerHit { health: 2 }]);
    }

    #[test]
    fn test_all_enemy_hits_apply_same_tick() {
        let mut world = World::new();
        spawn_player(&mut world, Vec2::new(100.0, 200.0), 3);
        for dx in [-4.0, 0.0, 4.0] {
            world.spawn_bullet(Vec2::new(100.0 + dx, 198.0), shot(BulletOwner::Enemy));
        }

        resolve_enemy_bullets(&mut world);

        assert!(world.enemy_bullets.is_empty());
        assert_eq!(world.player_health(), 0);
        assert!(world.events.contains(&GameEvent::PlayerDefeated));
    }

    #[test]
    fn test_health_clamps_at_zero() {
        let mut world = World::new();
        spawn_player(&mut world, Vec2::new(100.0, 200.0), 1);
        for _ in 0..5 {
            world.spawn_bullet(Vec2::new(100.0, 198.0), shot(BulletOwner::Enemy));
        }

        resolve_enemy_bullets(&mut world);

        assert_eq!(world.player_health(), 0);
        let defeats = world
            .events
            .iter()
            .filter(|e| **e == GameEvent::PlayerDefeated)
            .count();
        assert_eq!(defeats, 1);
    }

    #[test]
    fn test_player_bullets_ignore_player() {
        let mut world = World::new();
        spawn_player(&mut world, Vec2::new(100.0, 200.0), 3);
        let bullet = world.spawn_bullet(Vec2::new(100.0, 198.0), shot(BulletOwner::Player));

        resolve_enemy_bullets(&mut world);

        assert!(world.is_alive(bullet));
        assert_eq!(world.player_health(), 3);
    }
}
