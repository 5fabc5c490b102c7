//! Invader formation AI
//!
//! The whole formation marches sideways in discrete steps on a fixed
//! interval. When any invader reaches the screen edge the formation drops a
//! row and turns around. Once per tick a random invader may shoot.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::world::{BulletOwner, BulletSpec, GameEvent, World, contract_violation};
use crate::consts::FORMATION_MAX_STEPS_PER_TICK;

/// Horizontal march direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Sign of x movement
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// Fixed parameters of the march
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormationParams {
    pub step_interval: f32,
    pub step_distance: f32,
    pub row_drop: f32,
    /// Right screen bound (left bound is 0)
    pub screen_width: f32,
    /// Per-tick probability that an invader fires
    pub fire_chance: f32,
    pub bullet: BulletSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Formation {
    pub direction: Direction,
    /// Time accumulated toward the next step
    pub timer: f32,
    /// Steps taken so far (drives the marching beat)
    pub steps: u32,
}

impl Default for Formation {
    fn default() -> Self {
        Self::new(Direction::Right)
    }
}

impl Formation {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            timer: 0.0,
            steps: 0,
        }
    }

    /// Run one tick: as many discrete steps as the accumulated time allows,
    /// then at most one enemy shot.
    pub fn update(&mut self, world: &mut World, dt: f32, params: &FormationParams, rng: &mut impl Rng) {
        if params.step_interval > 0.0 {
            self.timer += dt;
            let due = (self.timer / params.step_interval).floor();
            self.timer = (self.timer - due * params.step_interval).max(0.0);

            let steps = (due as u32).min(FORMATION_MAX_STEPS_PER_TICK);
            if steps < due as u32 {
                log::debug!("Formation dropped {} overdue steps", due as u32 - steps);
            }
            for _ in 0..steps {
                self.step(world, params);
            }
        }

        let roll: f32 = rng.random();
        if roll < params.fire_chance {
            self.fire(world, params, rng);
        }
    }

    /// Move every invader one step, then reverse and drop if the formation
    /// touched the edge it is heading toward.
    fn step(&mut self, world: &mut World, params: &FormationParams) {
        let dx = self.direction.sign() * params.step_distance;
        let mut at_edge = false;

        for &id in &world.invaders {
            let Some(transform) = world.transforms.get_mut(&id) else {
                contract_violation(id, "transform");
                continue;
            };
            transform.position.x += dx;

            let width = world
                .collision_boxes
                .get(&id)
                .map(|b| b.size.x)
                .unwrap_or(0.0);
            let x = transform.position.x;
            at_edge |= match self.direction {
                Direction::Left => x <= 0.0,
                Direction::Right => x + width >= params.screen_width,
            };
        }

        world.push_event(GameEvent::FormationStepped { step: self.steps });
        self.steps = self.steps.wrapping_add(1);

        if at_edge {
            self.direction = self.direction.flipped();
            for &id in &world.invaders {
                if let Some(transform) = world.transforms.get_mut(&id) {
                    transform.position.y += params.row_drop;
                }
            }
            world.push_event(GameEvent::FormationReversed);
            log::debug!("Formation reversed, now heading {:?}", self.direction);
        }
    }

    /// Pick a random live invader and shoot downward from it
    fn fire(&self, world: &mut World, params: &FormationParams, rng: &mut impl Rng) {
        if world.invaders.is_empty() {
            return;
        }

        let index = rng.random_range(0..world.invaders.len());
        let Some(&shooter) = world.invaders.iter().nth(index) else {
            return;
        };
        let Some(origin) = world.transforms.get(&shooter).map(|t| t.position) else {
            contract_violation(shooter, "transform");
            return;
        };

        world.spawn_bullet(
            origin,
            BulletSpec {
                owner: BulletOwner::Enemy,
                ..params.bullet
            },
        );
        world.push_event(GameEvent::EnemyFired { invader: shooter });
    }
}
