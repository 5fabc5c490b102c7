//! Pixel Invaders - A tiny Space Invaders clone
//!
//! Core modules:
//! - `sim`: Entity/component world, per-frame systems and the frame driver
//! - `renderer`: Turns world state into draw calls on a `DrawSurface`
//! - `platform`: Drawing/input/audio collaborator traits and a headless backend
//! - `assets`: Image registry (one load per path)
//! - `audio`: Game events to fire-and-forget notes
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod audio;
pub mod color;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use color::Color;
pub use error::{AssetError, ConfigError};
pub use settings::{KeyBindings, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical screen size (pre-scaled pixels)
    pub const SCREEN_WIDTH: f32 = 320.0;
    pub const SCREEN_HEIGHT: f32 = 240.0;

    /// Longest frame the driver will simulate in one go (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 100.0;
    pub const PLAYER_HEALTH: u32 = 3;
    /// Distance of the player ship above the bottom edge
    pub const PLAYER_BOTTOM_MARGIN: f32 = 10.0;

    /// Bullets (negative = up the screen)
    pub const PLAYER_BULLET_SPEED: f32 = -100.0;
    pub const ENEMY_BULLET_SPEED: f32 = 100.0;
    pub const BULLET_WIDTH: f32 = 1.0;
    pub const BULLET_HEIGHT: f32 = 5.0;

    /// Invader grid
    pub const INVADER_COLUMNS: u32 = 10;
    pub const INVADER_ROWS: u32 = 3;
    pub const INVADER_SPACING_X: f32 = 26.0;
    pub const INVADER_SPACING_Y: f32 = 20.0;
    pub const INVADER_ORIGIN_X: f32 = 20.0;
    pub const INVADER_ORIGIN_Y: f32 = 20.0;

    /// Formation movement: one discrete step every interval
    pub const FORMATION_STEP_INTERVAL: f32 = 0.5;
    pub const FORMATION_STEP_DISTANCE: f32 = 4.0;
    pub const FORMATION_ROW_DROP: f32 = 8.0;
    /// Steps beyond this in one tick are dropped rather than replayed
    pub const FORMATION_MAX_STEPS_PER_TICK: u32 = 32;
    /// Shortest step interval or sprite frame duration a tuning file may set
    pub const MIN_TIMER_INTERVAL: f32 = 1e-3;
    /// Chance per tick that some invader fires
    pub const ENEMY_FIRE_CHANCE: f32 = 0.02;

    /// Score awarded per destroyed invader
    pub const INVADER_REWARD: u64 = 25;

    /// Invader sprite sheet animation
    pub const INVADER_FRAME_DURATION: f32 = 0.5;
    pub const INVADER_SHEET_COLUMNS: u32 = 2;
    pub const INVADER_SHEET_ROWS: u32 = 1;

    /// Asset paths
    pub const PLAYER_IMAGE_PATH: &str = "assets/space_invaders/spaceship.png";
    pub const INVADER_IMAGE_PATH: &str = "assets/space_invaders/invader_01.png";

    /// Default RNG seed
    pub const DEFAULT_SEED: u64 = 0x5EED_1A7E;
}
