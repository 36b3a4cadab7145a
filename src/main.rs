mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use space_invaders::compute::Controls;
use space_invaders::config::{Config, ARENA_HEIGHT, ARENA_WIDTH};
use space_invaders::entities::SoundCue;
use space_invaders::game::Game;
use space_invaders::highscore::HighScoreFile;
use space_invaders::Error;

/// Frames a key stays down after its last press or auto-repeat when the
/// terminal never reports a release.  Eight frames is about 133 ms at the
/// default 60 FPS, longer than the gap between two auto-repeats.
const HOLD_WINDOW: u64 = 8;

fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// The screen belongs to the game, so diagnostics only go to a file.
fn init_logging(config: &Config) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path).map_err(|source| Error::LogFile {
        path: path.clone(),
        source,
    })?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

// ── Audio ─────────────────────────────────────────────────────────────────────

/// The terminal bell is the only sound channel available; lasers stay silent.
fn play_sounds<W: Write>(out: &mut W, cues: &[SoundCue]) -> std::io::Result<()> {
    if cues.contains(&SoundCue::Explosion) {
        out.write_all(b"\x07")?;
    }
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// One iteration per frame: drain every pending event without blocking,
/// stamp each pressed key with the current frame in `key_frame`, turn the
/// keys still down into `Controls`, step the game, draw, then sleep out the
/// rest of the frame budget.
///
/// A release event (sent only by terminals with keyboard enhancement) clears
/// the key at once.
fn game_loop<W: Write>(out: &mut W, config: &Config) -> Result<()> {
    let frame_time = Duration::from_secs_f64(1.0 / f64::from(config.fps));
    let mut rng = thread_rng();
    let start = Instant::now();

    let store = HighScoreFile::new(config.high_score_file.clone());
    let mut game = Game::new(store, ARENA_WIDTH, ARENA_HEIGHT, 0.0, &mut rng);

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while event::poll(Duration::ZERO)? {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = event::read()?
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            info!(score = game.state().score, "quit");
                            return Ok(());
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let controls = Controls {
            left: any_held(
                &key_frame,
                &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
                frame,
            ),
            right: any_held(
                &key_frame,
                &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
                frame,
            ),
            fire: is_held(&key_frame, &KeyCode::Char(' '), frame),
            restart: is_held(&key_frame, &KeyCode::Enter, frame),
        };

        let now = start.elapsed().as_secs_f64();
        game.handle_input(&controls, now);
        game.update(&controls, now, &mut rng);

        let (cols, rows) = terminal::size()?;
        let view = display::Viewport::new(cols, rows, game.state());
        display::render(out, game.state(), &view)?;
        play_sounds(out, &game.take_sounds())?;
        out.flush()?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            std::thread::sleep(frame_time - elapsed);
        } else {
            debug!(frame, ?elapsed, "frame overran its budget");
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config)?;
    info!(?config, "launching");

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let result = game_loop(&mut out, &config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.queue(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
