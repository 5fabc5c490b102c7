//! Data-driven game balance
//!
//! Every gameplay number lives here so a JSON file can rebalance the game
//! without a rebuild. Defaults come from `consts`.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::{BulletOwner, BulletSpec, FormationParams};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Run seed for the invaders' fire rolls
    pub seed: u64,

    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Player ===
    pub player_speed: f32,
    pub player_health: u32,
    pub player_bottom_margin: f32,
    pub player_image: String,

    // === Bullets ===
    pub player_bullet_speed: f32,
    pub enemy_bullet_speed: f32,
    pub bullet_size: Vec2,
    pub player_bullet_color: Color,
    pub enemy_bullet_color: Color,

    // === Invaders ===
    pub invader_columns: u32,
    pub invader_rows: u32,
    pub invader_spacing: Vec2,
    pub invader_origin: Vec2,
    pub invader_image: String,
    pub invader_sheet_columns: u32,
    pub invader_sheet_rows: u32,
    pub invader_frame_duration: f32,
    pub invader_reward: u64,

    // === Formation ===
    pub step_interval: f32,
    pub step_distance: f32,
    pub row_drop: f32,
    pub enemy_fire_chance: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,

            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            player_speed: PLAYER_SPEED,
            player_health: PLAYER_HEALTH,
            player_bottom_margin: PLAYER_BOTTOM_MARGIN,
            player_image: PLAYER_IMAGE_PATH.to_string(),

            player_bullet_speed: PLAYER_BULLET_SPEED,
            enemy_bullet_speed: ENEMY_BULLET_SPEED,
            bullet_size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            player_bullet_color: Color::WHITE,
            enemy_bullet_color: Color::LIGHT_RED,

            invader_columns: INVADER_COLUMNS,
            invader_rows: INVADER_ROWS,
            invader_spacing: Vec2::new(INVADER_SPACING_X, INVADER_SPACING_Y),
            invader_origin: Vec2::new(INVADER_ORIGIN_X, INVADER_ORIGIN_Y),
            invader_image: INVADER_IMAGE_PATH.to_string(),
            invader_sheet_columns: INVADER_SHEET_COLUMNS,
            invader_sheet_rows: INVADER_SHEET_ROWS,
            invader_frame_duration: INVADER_FRAME_DURATION,
            invader_reward: INVADER_REWARD,

            step_interval: FORMATION_STEP_INTERVAL,
            step_distance: FORMATION_STEP_DISTANCE,
            row_drop: FORMATION_ROW_DROP,
            enemy_fire_chance: ENEMY_FIRE_CHANCE,
        }
    }
}

impl Tuning {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let tuning = Self::from_json(&fs::read_to_string(path)?)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return invalid("screen size must be positive");
        }
        if !(MIN_TIMER_INTERVAL..).contains(&self.step_interval) {
            return invalid("step_interval must be at least 0.001");
        }
        if !(MIN_TIMER_INTERVAL..).contains(&self.invader_frame_duration) {
            return invalid("invader_frame_duration must be at least 0.001");
        }
        if !(0.0..=1.0).contains(&self.enemy_fire_chance) {
            return invalid("enemy_fire_chance must be within [0, 1]");
        }
        if self.invader_columns == 0 || self.invader_rows == 0 {
            return invalid("invader grid must not be empty");
        }
        if self.invader_sheet_columns == 0 || self.invader_sheet_rows == 0 {
            return invalid("invader sheet must have at least one cell");
        }
        if self.bullet_size.x <= 0.0 || self.bullet_size.y <= 0.0 {
            return invalid("bullet_size must be positive");
        }
        if self.player_health == 0 {
            return invalid("player_health must be at least 1");
        }
        Ok(())
    }

    /// Bullet spawned by the player's fire key
    pub fn player_bullet(&self) -> BulletSpec {
        BulletSpec {
            owner: BulletOwner::Player,
            speed: self.player_bullet_speed,
            size: self.bullet_size,
            color: self.player_bullet_color,
        }
    }

    /// Bullet dropped by an invader
    pub fn enemy_bullet(&self) -> BulletSpec {
        BulletSpec {
            owner: BulletOwner::Enemy,
            speed: self.enemy_bullet_speed,
            size: self.bullet_size,
            color: self.enemy_bullet_color,
        }
    }

    pub fn formation(&self) -> FormationParams {
        FormationParams {
            step_interval: self.step_interval,
            step_distance: self.step_distance,
            row_drop: self.row_drop,
            screen_width: self.screen_width,
            fire_chance: self.enemy_fire_chance,
            bullet: self.enemy_bullet(),
        }
    }
}
