//! Component types
//!
//! Each lives in its own table on `World`, keyed by `EntityId`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, Transform};
use crate::assets::AssetId;
use crate::color::Color;

/// Movement speed + hit points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    /// Pixels per second. Signed for bullets (negative = up)
    pub speed: f32,
    /// Only meaningful for the player
    pub health: u32,
}

impl Attributes {
    pub fn with_speed(speed: f32) -> Self {
        Self { speed, health: 0 }
    }

    /// Apply damage, never dropping below zero. Returns the remaining health.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }
}

/// Whole-image renderable, drawn centered on the transform position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageRenderable {
    pub asset: AssetId,
}

/// Animated sprite-sheet renderable, drawn from the transform position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteRenderable {
    pub asset: AssetId,
    /// Current cell (row-major)
    pub frame: u32,
    /// Time accumulated toward the next frame
    pub elapsed: f32,
    /// Seconds each frame stays on screen
    pub frame_duration: f32,
    /// Cells across the sheet
    pub columns: u32,
    /// Cells down the sheet
    pub rows: u32,
}

impl SpriteRenderable {
    pub fn new(asset: AssetId, columns: u32, rows: u32, frame_duration: f32) -> Self {
        Self {
            asset,
            frame: 0,
            elapsed: 0.0,
            frame_duration,
            columns: columns.max(1),
            rows: rows.max(1),
        }
    }

    pub fn frame_count(&self) -> u32 {
        self.columns * self.rows
    }

    /// Advance the animation clock by `dt`, stepping as many frames as fit
    pub fn advance(&mut self, dt: f32) {
        if self.frame_duration <= 0.0 {
            return;
        }

        self.elapsed += dt;
        let due = (self.elapsed / self.frame_duration).floor();
        if due < 1.0 {
            return;
        }
        self.elapsed = (self.elapsed - due * self.frame_duration).max(0.0);

        let count = self.frame_count() as u64;
        self.frame = ((self.frame as u64 + due as u64 % count) % count) as u32;
    }

    /// Size of one cell on a sheet of the given pixel size
    pub fn cell_size(&self, sheet_width: u32, sheet_height: u32) -> Vec2 {
        Vec2::new(
            sheet_width as f32 / self.columns as f32,
            sheet_height as f32 / self.rows as f32,
        )
    }

    /// Source rectangle of the current frame on the sheet
    pub fn source_rect(&self, sheet_width: u32, sheet_height: u32) -> Rect {
        let cell = self.cell_size(sheet_width, sheet_height);
        let col = self.frame % self.columns;
        let row = self.frame / self.columns;
        Rect::new(col as f32 * cell.x, row as f32 * cell.y, cell.x, cell.y)
    }
}

/// Solid-color rectangle renderable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SquareRenderable {
    pub size: Vec2,
    pub color: Color,
}

/// Axis-aligned hit box relative to the transform position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionBox {
    /// Width/height
    pub size: Vec2,
    /// Offset of the top-left corner from the transform position
    pub offset: Vec2,
}

impl CollisionBox {
    pub fn new(size: Vec2, offset: Vec2) -> Self {
        Self { size, offset }
    }

    /// Box centered on the transform position
    pub fn centered(size: Vec2) -> Self {
        Self::new(size, -size * 0.5)
    }

    /// World-space rectangle for an entity at `transform`
    pub fn world_rect(&self, transform: &Transform) -> Rect {
        Rect::from_pos_size(transform.position + self.offset, self.size)
    }
}
