//! Pixel Invaders headless runner
//!
//! Plays the game for a fixed number of simulated seconds with an autopilot
//! at the controls, recording draw calls instead of presenting them.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Result, anyhow};
use clap::Parser;

use pixel_invaders::audio::NoteQueue;
use pixel_invaders::platform::headless::{MemoryImageLoader, RecordingSurface, ScriptedKeyboard};
use pixel_invaders::platform::FrameRunner;
use pixel_invaders::sim::{Game, TickInput};
use pixel_invaders::{Settings, Tuning};

#[derive(Debug, Parser)]
#[command(author, version, about = "Pixel Invaders headless runner")]
struct Cli {
    /// Simulated seconds to run
    #[arg(long, default_value_t = 30.0)]
    seconds: f32,

    /// Frames per simulated second
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Override the tuning seed
    #[arg(long)]
    seed: Option<u64>,

    /// Tuning JSON file (defaults when omitted)
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Settings JSON file (defaults when omitted)
    #[arg(long)]
    settings: Option<PathBuf>,
}

/// Everything the frame closures need
struct Session {
    game: Game,
    loader: MemoryImageLoader,
    surface: RecordingSurface,
    keyboard: ScriptedKeyboard,
    audio: NoteQueue,
    frame: u64,
}

/// Steer under the nearest invader and tap fire when lined up
fn autopilot(game: &Game, keyboard: &mut ScriptedKeyboard, frame: u64) {
    let keys = game.settings().keys;
    keyboard.release_all();

    let world = game.world();
    let Some(player_x) = world
        .player
        .and_then(|id| world.transforms.get(&id))
        .map(|t| t.position.x)
    else {
        return;
    };

    let target = world
        .invaders
        .iter()
        .filter_map(|id| {
            let rect = world.hit_box(*id)?;
            Some(rect.center().x)
        })
        .min_by(|a, b| (a - player_x).abs().total_cmp(&(b - player_x).abs()));
    let Some(target_x) = target else {
        return;
    };

    let dx = target_x - player_x;
    if dx < -1.0 {
        keyboard.press(keys.left);
    } else if dx > 1.0 {
        keyboard.press(keys.right);
    }
    // Release every other frame so each press is a new edge
    if dx.abs() < 4.0 && frame % 2 == 0 {
        keyboard.press(keys.fire);
    }
}

fn main() -> Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let cli = Cli::parse();
    log::info!("Pixel Invaders (headless) starting...");

    let mut tuning = match &cli.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    if let Some(seed) = cli.seed {
        tuning.seed = seed;
    }
    let settings = match &cli.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if cli.fps == 0 {
        return Err(anyhow!("--fps must be at least 1"));
    }

    // Stand-in sizes for the sprite sheets a windowed build would decode
    let loader = MemoryImageLoader::new()
        .with_image(&tuning.player_image, 16, 8)
        .with_image(&tuning.invader_image, 44, 16);

    // Playback loop on its own thread; the game only ever enqueues
    let (audio, notes) = NoteQueue::channel();
    let player = thread::spawn(move || notes.iter().map(|note| note.duration).sum::<Duration>());

    let session = Session {
        game: Game::new(tuning, settings),
        loader,
        surface: RecordingSurface::new(),
        keyboard: ScriptedKeyboard::new(),
        audio,
        frame: 0,
    };

    let mut runner = FrameRunner::new(
        session,
        |s: &mut Session| s.game.start(&mut s.loader),
        |s: &mut Session, dt: f32| {
            autopilot(&s.game, &mut s.keyboard, s.frame);
            let keys = s.game.settings().keys;
            let input = TickInput::sample(&s.keyboard, &keys);
            s.game.tick(dt, &input, &mut s.surface, &s.audio);
            s.frame += 1;
        },
    );
    runner.start()?;

    let dt = 1.0 / cli.fps as f32;
    let frames = (cli.seconds.max(0.0) * cli.fps as f32).round() as u64;
    for _ in 0..frames {
        runner.frame(dt);

        let game = &runner.context().game;
        if game.is_player_defeated() {
            log::info!("Player defeated after {:.1}s", runner.elapsed());
            break;
        }
        if game.world().invaders.is_empty() {
            log::info!("Wave cleared after {:.1}s", runner.elapsed());
            break;
        }
    }

    let frames_run = runner.frames();
    let session = runner.into_context();
    let draw_calls = session.surface.draw_calls();
    let (score, health) = (session.game.score(), session.game.player_health());
    drop(session);

    let music = player
        .join()
        .map_err(|_| anyhow!("audio playback thread panicked"))?;

    println!(
        "Ran {} frames. Score: {}, health: {}, last frame draw calls: {}, music queued: {:.1}s",
        frames_run,
        score,
        health,
        draw_calls,
        music.as_secs_f32()
    );
    Ok(())
}
