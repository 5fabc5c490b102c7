//! The world: every component table, membership tag and piece of shared
//! game state, owned in one place and passed to each system by reference.
//!
//! Tables are `BTreeMap`s keyed by `EntityId`. Ids are issued in increasing
//! order, so iterating a table visits entities in creation order.

use std::collections::{BTreeMap, BTreeSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::components::{
    Attributes, CollisionBox, ImageRenderable, SpriteRenderable, SquareRenderable,
};
use super::entity::{EntityAllocator, EntityId};
use super::geometry::{Rect, Transform};
use crate::color::Color;

/// Which side fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Enemy,
}

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayerFired,
    EnemyFired { invader: EntityId },
    InvaderDestroyed { invader: EntityId, reward: u64 },
    PlayerHit { health: u32 },
    PlayerDefeated,
    /// One discrete formation step (index cycles for the marching beat)
    FormationStepped { step: u32 },
    FormationReversed,
}

/// Shape of a bullet to spawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletSpec {
    pub owner: BulletOwner,
    /// Signed vertical speed (negative = up)
    pub speed: f32,
    pub size: Vec2,
    pub color: Color,
}

#[derive(Debug, Default)]
pub struct World {
    entities: EntityAllocator,

    pub transforms: BTreeMap<EntityId, Transform>,
    pub attributes: BTreeMap<EntityId, Attributes>,
    pub images: BTreeMap<EntityId, ImageRenderable>,
    pub sprites: BTreeMap<EntityId, SpriteRenderable>,
    pub squares: BTreeMap<EntityId, SquareRenderable>,
    pub collision_boxes: BTreeMap<EntityId, CollisionBox>,

    /// Entities driven by keyboard input
    pub controlled: BTreeSet<EntityId>,
    pub bullets: BTreeSet<EntityId>,
    pub player_bullets: BTreeSet<EntityId>,
    pub enemy_bullets: BTreeSet<EntityId>,
    pub invaders: BTreeSet<EntityId>,

    /// The player ship (set once at start)
    pub player: Option<EntityId>,
    pub score: u64,

    /// Events raised this tick, drained by the frame driver
    pub events: Vec<GameEvent>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new entity id. Ids are strictly increasing and never reused.
    pub fn create_entity(&mut self) -> EntityId {
        self.entities.allocate()
    }

    /// Remove `entity` from every table and tag.
    ///
    /// Absent entries are skipped, so destroying twice is harmless. Returns
    /// whether anything was removed.
    pub fn destroy(&mut self, entity: EntityId) -> bool {
        let mut removed = false;
        removed |= self.transforms.remove(&entity).is_some();
        removed |= self.attributes.remove(&entity).is_some();
        removed |= self.images.remove(&entity).is_some();
        removed |= self.sprites.remove(&entity).is_some();
        removed |= self.squares.remove(&entity).is_some();
        removed |= self.collision_boxes.remove(&entity).is_some();
        removed |= self.controlled.remove(&entity);
        removed |= self.bullets.remove(&entity);
        removed |= self.player_bullets.remove(&entity);
        removed |= self.enemy_bullets.remove(&entity);
        removed |= self.invaders.remove(&entity);

        if removed {
            log::debug!("Destroyed entity {}", entity);
        }
        removed
    }

    /// True if the entity still has any table entry
    pub fn is_alive(&self, entity: EntityId) -> bool {
        self.transforms.contains_key(&entity)
            || self.attributes.contains_key(&entity)
            || self.bullets.contains(&entity)
            || self.invaders.contains(&entity)
    }

    /// World-space hit box of an entity, if it has one
    pub fn hit_box(&self, entity: EntityId) -> Option<Rect> {
        let collision_box = self.collision_boxes.get(&entity)?;
        let Some(transform) = self.transforms.get(&entity) else {
            contract_violation(entity, "transform");
            return None;
        };
        Some(collision_box.world_rect(transform))
    }

    /// Spawn a bullet at `position`, tagged as a bullet and by owner
    pub fn spawn_bullet(&mut self, position: Vec2, spec: BulletSpec) -> EntityId {
        let id = self.create_entity();
        self.transforms.insert(id, Transform::at(position));
        self.attributes.insert(id, Attributes::with_speed(spec.speed));
        self.squares.insert(
            id,
            SquareRenderable {
                size: spec.size,
                color: spec.color,
            },
        );
        self.collision_boxes
            .insert(id, CollisionBox::new(spec.size, Vec2::ZERO));
        self.bullets.insert(id);
        match spec.owner {
            BulletOwner::Player => self.player_bullets.insert(id),
            BulletOwner::Enemy => self.enemy_bullets.insert(id),
        };

        log::debug!("Spawned {:?} bullet {} at {}", spec.owner, id, position);
        id
    }

    /// Health of the player ship (0 if there is none)
    pub fn player_health(&self) -> u32 {
        self.player
            .and_then(|id| self.attributes.get(&id))
            .map(|attrs| attrs.health)
            .unwrap_or(0)
    }

    /// Total number of live entities that hold a transform
    pub fn entity_count(&self) -> usize {
        self.transforms.len()
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// A system looked up a component that must exist for this entity.
///
/// Panics in debug builds so lifecycle bugs surface immediately; release
/// builds log and let the caller skip the entity.
#[track_caller]
pub fn contract_violation(entity: EntityId, component: &str) {
    log::error!("entity {} is missing its {} component", entity, component);
    debug_assert!(false, "entity {entity} is missing its {component} component");
}
