//! Headless collaborators
//!
//! A surface that records draw calls, a keyboard driven by code and an image
//! loader backed by a table of known sizes. Used by the native runner and by
//! tests.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};

use glam::Vec2;

use super::{AudioSink, DrawSurface, InputState, KeyCode, TextAlign};
use crate::assets::{ImageHandle, ImageLoader, LoadedImage};
use crate::color::Color;
use crate::error::AssetError;
use crate::sim::Rect;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FilledRect(Rect, Color),
    Rect(Rect, Color),
    Line(Vec2, Vec2, Color),
    Image {
        image: ImageHandle,
        dest: Rect,
        src: Rect,
    },
    Text {
        pos: Vec2,
        text: String,
        align: TextAlign,
        color: Color,
        scale: f32,
    },
}

/// Surface that keeps every draw call of the current frame
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }

    pub fn image_draws(&self) -> usize {
        self.count(|c| matches!(c, DrawCommand::Image { .. }))
    }

    pub fn text_draws(&self) -> usize {
        self.count(|c| matches!(c, DrawCommand::Text { .. }))
    }

    pub fn filled_rect_draws(&self) -> usize {
        self.count(|c| matches!(c, DrawCommand::FilledRect(..)))
    }

    /// Every draw call except `Clear`
    pub fn draw_calls(&self) -> usize {
        self.count(|c| !matches!(c, DrawCommand::Clear(_)))
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self, color: Color) {
        // A clear starts a new frame
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn draw_filled_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FilledRect(rect, color));
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect(rect, color));
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.commands.push(DrawCommand::Line(from, to, color));
    }

    fn draw_image(&mut self, image: ImageHandle, dest: Rect, src: Rect) {
        self.commands.push(DrawCommand::Image { image, dest, src });
    }

    fn draw_text(&mut self, pos: Vec2, text: &str, align: TextAlign, color: Color, scale: f32) {
        self.commands.push(DrawCommand::Text {
            pos,
            text: text.to_string(),
            align,
            color,
            scale,
        });
    }
}

/// Keyboard whose keys are pressed and released in code
#[derive(Debug, Clone, Default)]
pub struct ScriptedKeyboard {
    down: BTreeSet<KeyCode>,
}

impl ScriptedKeyboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: KeyCode) {
        self.down.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.down.remove(&key);
    }

    pub fn set(&mut self, key: KeyCode, down: bool) {
        if down {
            self.press(key);
        } else {
            self.release(key);
        }
    }

    pub fn release_all(&mut self) {
        self.down.clear();
    }
}

impl InputState for ScriptedKeyboard {
    fn is_key_down(&self, key: KeyCode) -> bool {
        self.down.contains(&key)
    }
}

/// Image loader that knows image sizes up front
#[derive(Debug, Default)]
pub struct MemoryImageLoader {
    sizes: HashMap<String, (u32, u32)>,
    next_handle: u64,
    loads: usize,
}

impl MemoryImageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, path: &str, width: u32, height: u32) -> Self {
        self.sizes.insert(path.to_string(), (width, height));
        self
    }

    /// Number of successful loads served
    pub fn load_count(&self) -> usize {
        self.loads
    }
}

impl ImageLoader for MemoryImageLoader {
    fn load_image(&mut self, path: &str) -> Result<LoadedImage, AssetError> {
        let &(width, height) = self.sizes.get(path).ok_or_else(|| AssetError::NotFound {
            path: path.to_string(),
        })?;
        if width == 0 || height == 0 {
            return Err(AssetError::Decode {
                path: path.to_string(),
                reason: "zero-sized image".to_string(),
            });
        }

        self.next_handle += 1;
        self.loads += 1;
        Ok(LoadedImage {
            handle: ImageHandle(self.next_handle),
            width,
            height,
        })
    }
}

/// Audio sink that remembers every note it was asked to play
#[derive(Debug, Default)]
pub struct RecordingAudio {
    notes: RefCell<Vec<(i32, i32)>>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notes(&self) -> Vec<(i32, i32)> {
        self.notes.borrow().clone()
    }
}

impl AudioSink for RecordingAudio {
    fn play_note(&self, note_id: i32, duration_ms: i32) {
        self.notes.borrow_mut().push((note_id, duration_ms));
    }
}
