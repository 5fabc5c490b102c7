//! Score and lives readout

use glam::Vec2;

use crate::color::Color;
use crate::platform::{DrawSurface, TextAlign};

const HUD_MARGIN: f32 = 4.0;
const HUD_TEXT_SCALE: f32 = 1.0;

/// Score top-left, lives top-right
pub fn draw_hud(score: u64, lives: u32, screen_width: f32, surface: &mut dyn DrawSurface) {
    surface.draw_text(
        Vec2::new(HUD_MARGIN, HUD_MARGIN),
        &format!("SCORE {score}"),
        TextAlign::Left,
        Color::LIGHT_GRAY,
        HUD_TEXT_SCALE,
    );
    surface.draw_text(
        Vec2::new(screen_width - HUD_MARGIN, HUD_MARGIN),
        &format!("LIVES {lives}"),
        TextAlign::Right,
        Color::LIGHT_GRAY,
        HUD_TEXT_SCALE,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::RecordingSurface;

    #[test]
    fn test_hud_text() {
        let mut surface = RecordingSurface::new();
        draw_hud(125, 2, 320.0, &mut surface);
        assert_eq!(surface.texts(), vec!["SCORE 125", "LIVES 2"]);
    }
}
