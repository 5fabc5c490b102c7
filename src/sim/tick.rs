//! Frame driver
//!
//! `Game` owns the world and runs every system once per tick in a fixed
//! order, so movement always happens before collision tests and drawing
//! always shows the post-collision state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::components::{Attributes, CollisionBox, ImageRenderable, SpriteRenderable};
use super::control::PlayerControl;
use super::formation::Formation;
use super::geometry::Transform;
use super::world::{GameEvent, World};
use super::{animation, bullets, collision};
use crate::assets::{AssetId, AssetRegistry, ImageLoader};
use crate::audio::AudioManager;
use crate::color::Color;
use crate::error::AssetError;
use crate::platform::{AudioSink, DrawSurface, InputState};
use crate::renderer;
use crate::settings::{KeyBindings, Settings};
use crate::tuning::Tuning;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move left held
    pub left: bool,
    /// Move right held
    pub right: bool,
    /// Fire held (the control system looks for the press edge)
    pub fire: bool,
}

impl TickInput {
    /// Snapshot the bound keys once, before any system runs
    pub fn sample(input: &dyn InputState, keys: &KeyBindings) -> Self {
        Self {
            left: input.is_key_down(keys.left),
            right: input.is_key_down(keys.right),
            fire: input.is_key_down(keys.fire),
        }
    }
}

/// Complete game: world, assets and system state
#[derive(Debug)]
pub struct Game {
    world: World,
    assets: AssetRegistry,
    tuning: Tuning,
    settings: Settings,
    control: PlayerControl,
    formation: Formation,
    rng: Pcg32,
    audio: AudioManager,
    started: bool,
    defeated: bool,
}

impl Game {
    pub fn new(tuning: Tuning, settings: Settings) -> Self {
        let rng = Pcg32::seed_from_u64(tuning.seed);
        let audio = AudioManager::new(settings.sound);
        Self {
            world: World::new(),
            assets: AssetRegistry::new(),
            tuning,
            settings,
            control: PlayerControl::new(),
            formation: Formation::default(),
            rng,
            audio,
            started: false,
            defeated: false,
        }
    }

    /// One-time world setup: load images, spawn the player and the invader grid.
    ///
    /// Calling it again after a successful start does nothing.
    pub fn start(&mut self, loader: &mut dyn ImageLoader) -> Result<(), AssetError> {
        if self.started {
            return Ok(());
        }

        let player_image = self
            .assets
            .get_or_load_image(&self.tuning.player_image, loader)?;
        let invader_image = self
            .assets
            .get_or_load_image(&self.tuning.invader_image, loader)?;

        self.spawn_player(player_image);
        self.spawn_invaders(invader_image);
        self.started = true;

        log::info!(
            "Game started: {} invaders, player health {}, seed {:#x}",
            self.world.invaders.len(),
            self.world.player_health(),
            self.tuning.seed
        );
        Ok(())
    }

    fn image_size(&self, asset: AssetId) -> Vec2 {
        self.assets
            .image(asset)
            .map_or(Vec2::ZERO, |image| Vec2::new(image.width as f32, image.height as f32))
    }

    fn spawn_player(&mut self, asset: AssetId) {
        let t = &self.tuning;
        let position = Vec2::new(
            t.screen_width * 0.5,
            t.screen_height - t.player_bottom_margin,
        );
        let attributes = Attributes {
            speed: t.player_speed,
            health: t.player_health,
        };
        let size = self.image_size(asset);

        let id = self.world.create_entity();
        self.world.transforms.insert(id, Transform::at(position));
        self.world.attributes.insert(id, attributes);
        self.world.images.insert(id, ImageRenderable { asset });
        self.world
            .collision_boxes
            .insert(id, CollisionBox::centered(size));
        self.world.controlled.insert(id);
        self.world.player = Some(id);
        log::debug!("Spawned player {} at {}", id, position);
    }

    fn spawn_invaders(&mut self, asset: AssetId) {
        let t = &self.tuning;
        let sprite = SpriteRenderable::new(
            asset,
            t.invader_sheet_columns,
            t.invader_sheet_rows,
            t.invader_frame_duration,
        );
        let sheet = self.image_size(asset);
        let cell = sprite.cell_size(sheet.x as u32, sheet.y as u32);
        let (columns, rows) = (t.invader_columns, t.invader_rows);
        let (origin, spacing) = (t.invader_origin, t.invader_spacing);

        for row in 0..rows {
            for col in 0..columns {
                let position = origin + Vec2::new(col as f32, row as f32) * spacing;
                let id = self.world.create_entity();
                self.world.transforms.insert(id, Transform::at(position));
                self.world.sprites.insert(id, sprite.clone());
                self.world
                    .collision_boxes
                    .insert(id, CollisionBox::new(cell, Vec2::ZERO));
                self.world.invaders.insert(id);
            }
        }
    }

    /// Run one frame.
    ///
    /// Order: clear, control, formation, bullet motion, both collision
    /// passes, render systems, overlay and HUD, then sprite animation and
    /// event dispatch.
    pub fn tick(
        &mut self,
        dt: f32,
        input: &TickInput,
        surface: &mut dyn DrawSurface,
        audio: &dyn AudioSink,
    ) {
        surface.clear(Color::BLACK);

        // === Update ===
        let player_bullet = self.tuning.player_bullet();
        self.control
            .update(&mut self.world, input, dt, player_bullet);

        let params = self.tuning.formation();
        self.formation
            .update(&mut self.world, dt, &params, &mut self.rng);

        bullets::update(&mut self.world, dt, self.tuning.screen_height);
        collision::resolve_player_bullets(&mut self.world, self.tuning.invader_reward);
        collision::resolve_enemy_bullets(&mut self.world);

        // === Draw ===
        renderer::draw_world(&self.world, &self.assets, surface);
        if self.settings.debug_overlay {
            let screen = Vec2::new(self.tuning.screen_width, self.tuning.screen_height);
            renderer::draw_debug_overlay(&self.world, screen, surface);
        }
        if self.settings.show_hud {
            renderer::hud::draw_hud(
                self.world.score,
                self.world.player_health(),
                self.tuning.screen_width,
                surface,
            );
        }

        // Frame N stays visible for the tick it was selected in
        animation::update(&mut self.world, dt);

        let events = self.world.drain_events();
        for event in &events {
            log::trace!("{:?}", event);
            if *event == GameEvent::PlayerDefeated {
                self.defeated = true;
            }
        }
        self.audio.play_events(&events, audio);
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Player health has reached zero. Ending the session is up to the caller.
    pub fn is_player_defeated(&self) -> bool {
        self.defeated
    }

    pub fn score(&self) -> u64 {
        self.world.score
    }

    pub fn player_health(&self) -> u32 {
        self.world.player_health()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn assets(&self) -> &AssetRegistry {
        &self.assets
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Swap settings mid-run (e.g. toggling the overlay or sound)
    pub fn set_settings(&mut self, settings: Settings) {
        self.audio.set_muted(!settings.sound);
        self.settings = settings;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::KeyCode;
    use crate::platform::headless::{
        DrawCommand, MemoryImageLoader, RecordingAudio, RecordingSurface, ScriptedKeyboard,
    };
    use crate::platform::NullAudio;

    const DT: f32 = 1.0 / 60.0;

    fn loader(tuning: &Tuning) -> MemoryImageLoader {
        MemoryImageLoader::new()
            .with_image(&tuning.player_image, 16, 8)
            .with_image(&tuning.invader_image, 44, 16)
    }

    /// Game with no enemy fire, so only the player's actions spawn bullets
    fn quiet_game(tuning: Tuning) -> Game {
        let tuning = Tuning {
            enemy_fire_chance: 0.0,
            ..tuning
        };
        let mut game = Game::new(tuning, Settings::default());
        let mut loader = loader(game.tuning());
        game.start(&mut loader).unwrap();
        game
    }

    #[test]
    fn test_start_builds_grid_and_player() {
        let game = quiet_game(Tuning::default());
        let world = game.world();

        assert_eq!(world.invaders.len(), 30);
        assert_eq!(world.sprites.len(), 30);
        assert_eq!(world.entity_count(), 31);
        assert_eq!(world.images.len(), 1);
        assert_eq!(game.player_health(), 3);
        assert_eq!(game.score(), 0);
        assert_eq!(game.assets().len(), 2);

        let player = world.player.unwrap();
        assert_eq!(world.transforms[&player].position, Vec2::new(160.0, 230.0));
        assert_eq!(
            world.hit_box(player).unwrap(),
            crate::sim::Rect::new(152.0, 226.0, 16.0, 8.0)
        );

        // Invader hit box is one sheet cell
        let first = *world.invaders.iter().next().unwrap();
        assert_eq!(world.collision_boxes[&first].size, Vec2::new(22.0, 16.0));
        assert_eq!(world.transforms[&first].position, Vec2::new(20.0, 20.0));
    }

    #[test]
    fn test_first_tick_draws_grid_player_and_hud() {
        let mut game = quiet_game(Tuning::default());
        let mut surface = RecordingSurface::new();

        game.tick(0.0, &TickInput::default(), &mut surface, &NullAudio);

        assert_eq!(surface.commands[0], DrawCommand::Clear(Color::BLACK));
        assert_eq!(surface.image_draws(), 31);
        assert_eq!(surface.text_draws(), 2);
        assert_eq!(surface.draw_calls(), 33);
        assert!(game.world().bullets.is_empty());
        assert_eq!(game.score(), 0);
        assert_eq!(game.player_health(), 3);
    }

    #[test]
    fn test_new_frame_shows_for_a_tick_before_advancing() {
        let mut game = quiet_game(Tuning {
            invader_frame_duration: 0.5,
            ..Tuning::default()
        });
        let invader_image = game.assets().find(&game.tuning().invader_image).unwrap();
        let handle = game.assets().image(invader_image).unwrap().handle;
        let mut surface = RecordingSurface::new();

        let invader_cells = |surface: &RecordingSurface| -> Vec<f32> {
            surface
                .commands
                .iter()
                .filter_map(|c| match c {
                    DrawCommand::Image { image, src, .. } if *image == handle => Some(src.x),
                    _ => None,
                })
                .collect()
        };

        // A full frame duration passes, but this tick still draws cell 0
        game.tick(0.5, &TickInput::default(), &mut surface, &NullAudio);
        let cells = invader_cells(&surface);
        assert_eq!(cells.len(), 30);
        assert!(cells.iter().all(|&x| x == 0.0));

        game.tick(0.0, &TickInput::default(), &mut surface, &NullAudio);
        let cells = invader_cells(&surface);
        assert_eq!(cells.len(), 30);
        assert!(cells.iter().all(|&x| x == 22.0));
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut game = quiet_game(Tuning::default());
        let mut loader = loader(game.tuning());
        game.start(&mut loader).unwrap();
        assert_eq!(game.world().invaders.len(), 30);
        assert_eq!(loader.load_count(), 0);
    }

    #[test]
    fn test_start_fails_on_missing_image() {
        let mut game = Game::new(Tuning::default(), Settings::default());
        let mut loader = MemoryImageLoader::new().with_image(&game.tuning().player_image, 16, 8);

        let err = game.start(&mut loader).unwrap_err();
        assert!(matches!(err, AssetError::NotFound { .. }));
        assert!(!game.is_started());
        assert!(game.world().invaders.is_empty());
    }

    #[test]
    fn test_fire_cap_through_driver() {
        let mut game = quiet_game(Tuning::default());
        let mut surface = RecordingSurface::new();
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };

        game.tick(DT, &fire, &mut surface, &NullAudio);
        assert_eq!(game.world().player_bullets.len(), 1);

        // Release and press again while the first bullet is still flying
        game.tick(DT, &TickInput::default(), &mut surface, &NullAudio);
        game.tick(DT, &fire, &mut surface, &NullAudio);
        assert_eq!(game.world().player_bullets.len(), 1);
        assert_eq!(surface.filled_rect_draws(), 1);
    }

    #[test]
    fn test_bullet_destroys_invader_and_scores() {
        // Freeze the formation so the shot goes straight up a column
        let mut game = quiet_game(Tuning {
            step_interval: 1000.0,
            ..Tuning::default()
        });
        let mut surface = RecordingSurface::new();
        let sink = RecordingAudio::new();
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };

        game.tick(DT, &fire, &mut surface, &sink);
        for _ in 0..200 {
            game.tick(DT, &TickInput::default(), &mut surface, &sink);
        }

        assert_eq!(game.score(), 25);
        assert_eq!(game.world().invaders.len(), 29);
        assert!(game.world().player_bullets.is_empty());
        assert_eq!(surface.image_draws(), 30);
        assert_eq!(
            sink.notes(),
            vec![(84, 40), (60, 30), (55, 30), (48, 60)]
        );
    }

    #[test]
    fn test_enemy_hit_defeats_player() {
        let mut game = quiet_game(Tuning {
            player_health: 1,
            ..Tuning::default()
        });
        let player = game.world().player.unwrap();
        let at = game.world().transforms[&player].position;
        let bullet = game.tuning().enemy_bullet();
        game.world_mut().spawn_bullet(at, bullet);

        let mut surface = RecordingSurface::new();
        game.tick(0.0, &TickInput::default(), &mut surface, &NullAudio);

        assert_eq!(game.player_health(), 0);
        assert!(game.is_player_defeated());
        assert!(game.world().enemy_bullets.is_empty());
        assert_eq!(surface.texts(), vec!["SCORE 0", "LIVES 0"]);

        // The tick keeps running after defeat
        game.tick(DT, &TickInput::default(), &mut surface, &NullAudio);
        assert_eq!(game.player_health(), 0);
    }

    #[test]
    fn test_hud_and_overlay_follow_settings() {
        let mut game = quiet_game(Tuning::default());
        game.set_settings(Settings {
            show_hud: false,
            debug_overlay: true,
            ..Settings::default()
        });
        let mut surface = RecordingSurface::new();

        game.tick(0.0, &TickInput::default(), &mut surface, &NullAudio);

        assert_eq!(surface.text_draws(), 0);
        assert_eq!(surface.count(|c| matches!(c, DrawCommand::Line(..))), 2);
        assert_eq!(surface.count(|c| matches!(c, DrawCommand::Rect(..))), 31);
    }

    #[test]
    fn test_sound_setting_mutes_audio() {
        let mut game = Game::new(
            Tuning {
                enemy_fire_chance: 0.0,
                ..Tuning::default()
            },
            Settings {
                sound: false,
                ..Settings::default()
            },
        );
        let mut loader = loader(game.tuning());
        game.start(&mut loader).unwrap();
        let sink = RecordingAudio::new();
        let mut surface = RecordingSurface::new();

        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        game.tick(DT, &fire, &mut surface, &sink);

        assert_eq!(game.world().player_bullets.len(), 1);
        assert!(sink.notes().is_empty());
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = || {
            let mut game = Game::new(Tuning::default(), Settings::default());
            let mut loader = loader(game.tuning());
            game.start(&mut loader).unwrap();
            let mut surface = RecordingSurface::new();
            let mut frames = Vec::new();
            for i in 0..600 {
                let input = TickInput {
                    left: i % 120 < 40,
                    right: i % 120 >= 80,
                    fire: i % 20 < 10,
                };
                game.tick(DT, &input, &mut surface, &NullAudio);
                frames.push(surface.commands.clone());
            }
            (frames, game.score(), game.player_health())
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn test_sample_reads_bound_keys() {
        let mut keyboard = ScriptedKeyboard::new();
        keyboard.press(KeyCode::ARROW_LEFT);
        keyboard.press(KeyCode::SPACE);
        keyboard.press(KeyCode::ARROW_UP);

        let input = TickInput::sample(&keyboard, &KeyBindings::default());
        assert_eq!(
            input,
            TickInput {
                left: true,
                right: false,
                fire: true,
            }
        );
    }
}
