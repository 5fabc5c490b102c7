//! Platform abstraction layer
//!
//! The game core never touches a window, a bitmap or a sound device. It talks
//! to these collaborators instead:
//! - `DrawSurface`: pixel drawing in logical (pre-scaled) coordinates
//! - `InputState`: keyboard state, sampled once per tick
//! - `AudioSink`: fire-and-forget note playback
//! - `assets::ImageLoader`: image decoding
//!
//! `FrameRunner` replaces an engine base class: the embedder hands it a setup
//! closure and a per-frame closure and drives it from its own loop.

pub mod headless;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::assets::ImageHandle;
use crate::color::Color;
use crate::consts::MAX_FRAME_DT;
use crate::sim::Rect;

/// Platform key code (Win32 virtual-key values)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(pub u8);

impl KeyCode {
    pub const SPACE: KeyCode = KeyCode(0x20);
    pub const ARROW_LEFT: KeyCode = KeyCode(0x25);
    pub const ARROW_UP: KeyCode = KeyCode(0x26);
    pub const ARROW_RIGHT: KeyCode = KeyCode(0x27);
}

/// Horizontal anchoring of a text draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Drawing collaborator
pub trait DrawSurface {
    fn clear(&mut self, color: Color);
    fn draw_filled_rect(&mut self, rect: Rect, color: Color);
    /// Outline only
    fn draw_rect(&mut self, rect: Rect, color: Color);
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color);
    fn draw_image(&mut self, image: ImageHandle, dest: Rect, src: Rect);
    fn draw_text(&mut self, pos: Vec2, text: &str, align: TextAlign, color: Color, scale: f32);
}

/// Keyboard collaborator
pub trait InputState {
    fn is_key_down(&self, key: KeyCode) -> bool;
}

/// Audio collaborator. Must return immediately.
pub trait AudioSink {
    fn play_note(&self, note_id: i32, duration_ms: i32);
}

/// Audio sink that drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_note(&self, _note_id: i32, _duration_ms: i32) {}
}

/// Drives an embedder-owned context through setup and per-frame closures
pub struct FrameRunner<C, S, T> {
    context: C,
    on_start: S,
    on_tick: T,
    started: bool,
    frames: u64,
    elapsed: f64,
    max_dt: f32,
}

impl<C, S, T> FrameRunner<C, S, T>
where
    T: FnMut(&mut C, f32),
{
    pub fn new(context: C, on_start: S, on_tick: T) -> Self {
        Self {
            context,
            on_start,
            on_tick,
            started: false,
            frames: 0,
            elapsed: 0.0,
            max_dt: MAX_FRAME_DT,
        }
    }

    /// Longest frame passed to `on_tick`. Raising it lets a slow frame run
    /// several formation steps or sprite frames in one tick.
    pub fn with_max_dt(mut self, max_dt: f32) -> Self {
        self.max_dt = max_dt.max(0.0);
        self
    }

    /// Run the setup closure. Only the first successful call has any effect.
    pub fn start<E>(&mut self) -> Result<(), E>
    where
        S: FnMut(&mut C) -> Result<(), E>,
    {
        if self.started {
            return Ok(());
        }
        (self.on_start)(&mut self.context)?;
        self.started = true;
        Ok(())
    }

    /// Run one frame. `dt` is clamped to `[0, max_dt]` (`MAX_FRAME_DT`
    /// unless the embedder chose otherwise) so a stall (debugger, window
    /// drag) doesn't turn into one giant step.
    pub fn frame(&mut self, dt: f32) {
        debug_assert!(self.started, "frame() called before start()");
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.max_dt)
        } else {
            0.0
        };

        (self.on_tick)(&mut self.context, dt);
        self.frames += 1;
        self.elapsed += dt as f64;
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Simulated seconds so far
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn into_context(self) -> C {
        self.context
    }
}
