//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No platform backends; drawing, input and audio go through collaborator traits

pub mod animation;
pub mod bullets;
pub mod collision;
pub mod components;
pub mod control;
pub mod entity;
pub mod formation;
pub mod geometry;
pub mod tick;
pub mod world;

pub use components::{
    Attributes, CollisionBox, ImageRenderable, SpriteRenderable, SquareRenderable,
};
pub use control::PlayerControl;
pub use entity::{EntityAllocator, EntityId};
pub use formation::{Direction, Formation, FormationParams};
pub use geometry::{Rect, Transform};
pub use tick::{Game, TickInput};
pub use world::{BulletOwner, BulletSpec, GameEvent, World, contract_violation};
